//! Store configuration port

#[cfg(test)]
use mockall::mock;

/// Read access to the store's key-value configuration
pub trait StoreConfig: Clone + Send + Sync + 'static {
    /// Returns the value at a slash-separated `path`, e.g. `trans_email/ident_general/email`.
    fn get_store_config(&self, path: &str) -> Option<String>;
}

#[cfg(test)]
mock! {
    pub StoreConfig {}

    impl Clone for StoreConfig {
        fn clone(&self) -> Self;
    }

    impl StoreConfig for StoreConfig {
        fn get_store_config(&self, path: &str) -> Option<String>;
    }
}
