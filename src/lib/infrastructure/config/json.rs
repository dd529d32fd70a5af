//! JSON file store configuration

use std::{fs, path::PathBuf, sync::Arc};

use anyhow::{Context, Result};
use clap::Parser;
use serde_json::Value;
use tracing::debug;

use crate::domain::configuration::StoreConfig;

/// Where to load the store configuration from
#[derive(Debug, Clone, Parser)]
pub struct StoreConfigDetails {
    /// Path of the JSON store configuration file
    #[arg(long = "store-config", env = "STORE_CONFIG_PATH")]
    pub path: PathBuf,
}

/// Store configuration backed by a JSON document.
///
/// Paths are resolved segment by segment, so `trans_email/ident_general/email`
/// reads `{"trans_email": {"ident_general": {"email": ...}}}`.
#[derive(Debug, Clone)]
pub struct JsonStoreConfig {
    root: Arc<Value>,
}

impl JsonStoreConfig {
    /// Wraps an already parsed document
    pub fn new(root: Value) -> Self {
        Self {
            root: Arc::new(root),
        }
    }

    /// Parses a JSON document
    pub fn parse(raw: &str) -> Result<Self> {
        let root = serde_json::from_str(raw).context("invalid store configuration")?;

        Ok(Self::new(root))
    }

    /// Loads the document at `details.path`
    pub fn load(details: &StoreConfigDetails) -> Result<Self> {
        debug!("loading store configuration from {}", details.path.display());

        let raw = fs::read_to_string(&details.path).with_context(|| {
            format!(
                "failed to read store configuration {}",
                details.path.display()
            )
        })?;

        Self::parse(&raw)
    }
}

impl StoreConfig for JsonStoreConfig {
    fn get_store_config(&self, path: &str) -> Option<String> {
        let node = path
            .split('/')
            .filter(|segment| !segment.is_empty())
            .try_fold(self.root.as_ref(), |node, segment| node.get(segment))?;

        match node {
            Value::String(value) => Some(value.clone()),
            Value::Number(value) => Some(value.to_string()),
            Value::Bool(value) => Some(value.to_string()),
            _ => None,
        }
    }
}
