//! Configuration for link resolution.

/// Track storage server used when none is configured.
pub const DEFAULT_STORAGE_URL: &str = "https://tracks.nakarte.me";

/// Configuration for [`LinkResolver`](crate::LinkResolver).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkConfig {
    /// Base URL of the track storage server.
    pub storage_url: String,
}

impl LinkConfig {
    /// Creates a configuration pointing at `storage_url`.
    pub fn new(storage_url: impl Into<String>) -> Self {
        Self {
            storage_url: storage_url.into(),
        }
    }

    /// Sets the storage server base URL.
    pub fn with_storage_url(mut self, storage_url: impl Into<String>) -> Self {
        self.storage_url = storage_url.into();
        self
    }

    /// URL of the stored track `id`.
    pub fn track_url(&self, id: &str) -> String {
        format!("{}/track/{id}", self.storage_url.trim_end_matches('/'))
    }
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self::new(DEFAULT_STORAGE_URL)
    }
}
