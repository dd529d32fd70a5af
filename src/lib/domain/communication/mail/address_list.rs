//! Address list

use std::collections::BTreeMap;

/// Addresses keyed by email, each with an optional display name.
///
/// An address appears at most once; adding it again replaces its name.
/// Addresses are trimmed before they are used as keys.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AddressList(BTreeMap<String, Option<String>>);

impl AddressList {
    /// Creates an empty list
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `email`, overwriting the name of an existing entry
    pub fn add(&mut self, email: &str, name: Option<&str>) {
        self.0
            .insert(email.trim().to_string(), name.map(str::to_string));
    }

    /// Returns the display name stored for `email`.
    ///
    /// The outer [`Option`] is [`None`] when `email` is not in the list.
    pub fn get(&self, email: &str) -> Option<Option<&str>> {
        self.0.get(email.trim()).map(Option::as_deref)
    }

    /// Whether `email` is in the list
    pub fn contains(&self, email: &str) -> bool {
        self.0.contains_key(email.trim())
    }

    /// Number of distinct addresses
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the list is empty
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over `(email, name)` pairs
    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.0
            .iter()
            .map(|(email, name)| (email.as_str(), name.as_deref()))
    }
}

impl FromIterator<(String, Option<String>)> for AddressList {
    fn from_iter<I: IntoIterator<Item = (String, Option<String>)>>(iter: I) -> Self {
        let mut list = Self::new();

        for (email, name) in iter {
            list.add(&email, name.as_deref());
        }

        list
    }
}
