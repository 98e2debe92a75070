//! Catalog configuration

use std::path::PathBuf;

/// Catalog service configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Path of the catalog JSON document
    pub catalog_file: PathBuf,

    /// Address the HTTP server binds to
    pub bind_addr: String,
}

impl Config {
    /// Creates configuration from environment variables
    ///
    /// - CATALOG_FILE (optional, default: /data/catalog.json)
    /// - CATALOG_BIND_ADDR (optional, default: 0.0.0.0:8082)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds configuration from an arbitrary variable source
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            catalog_file: lookup("CATALOG_FILE")
                .map(PathBuf::from)
                .unwrap_or(defaults.catalog_file),
            bind_addr: lookup("CATALOG_BIND_ADDR").unwrap_or(defaults.bind_addr),
        }
    }

    /// Validates the configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.catalog_file.as_os_str().is_empty() {
            anyhow::bail!("catalog_file cannot be empty");
        }

        if self.bind_addr.is_empty() {
            anyhow::bail!("bind_addr cannot be empty");
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            catalog_file: PathBuf::from("/data/catalog.json"),
            bind_addr: "0.0.0.0:8082".to_string(),
        }
    }
}
