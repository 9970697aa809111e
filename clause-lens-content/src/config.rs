//! Store configuration.

/// Environment variable holding the content store URL.
pub const STORE_URL_ENV: &str = "CLAUSE_LENS_STORE_URL";

/// Whether and where a content store is configured.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoreConfig {
    pub url: Option<String>,
}

impl StoreConfig {
    /// Read [`STORE_URL_ENV`]. Unset means no store.
    pub fn from_env() -> Self {
        Self::from_url(std::env::var(STORE_URL_ENV).ok())
    }

    pub fn from_url(url: Option<String>) -> Self {
        Self { url }
    }

    /// A store is used only for a non-empty URL that is not a placeholder.
    pub fn is_enabled(&self) -> bool {
        match self.url.as_deref() {
            Some(url) => !url.trim().is_empty() && !url.contains("placeholder"),
            None => false,
        }
    }
}
