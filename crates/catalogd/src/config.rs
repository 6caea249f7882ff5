//! TOML configuration for catalogd
//!
//! Every section is optional; a missing file section falls back to the
//! defaults below. Environment variables (`PORT`, `MONGODB_URI`,
//! `MONGODB_DATABASE`) override values from the file.

use std::path::PathBuf;

use anyhow::Context;
use serde::Deserialize;

/// Default listen port
pub const DEFAULT_PORT: u16 = 3000;

/// Top-level daemon configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub store: StoreConfig,
    pub logging: LoggingConfig,
}

/// `[server]` section
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Directory served as static content; must contain `form.html`
    pub public_dir: PathBuf,
    /// Where uploads are written (defaults to `<public_dir>/uploads`)
    pub upload_dir: Option<PathBuf>,
    /// Largest accepted request body in bytes
    pub max_upload_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: DEFAULT_PORT,
            public_dir: PathBuf::from("public"),
            upload_dir: None,
            max_upload_bytes: catalog_api::state::DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

/// Which persistence backend to run against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    #[default]
    Mongodb,
    Memory,
}

/// `[store]` section
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub backend: StoreBackend,
    /// MongoDB connection string
    pub uri: Option<String>,
    pub database: String,
    pub collection: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::Mongodb,
            uri: None,
            database: "catalog".to_string(),
            collection: "products".to_string(),
        }
    }
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// `[logging]` section
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub format: LogFormat,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file '{}'", path))?;
        Self::from_toml(&content).with_context(|| format!("Failed to parse config file '{}'", path))
    }

    pub fn from_toml(content: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Apply environment overrides using `lookup` (normally `std::env::var`)
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<()> {
        if let Some(port) = lookup("PORT") {
            self.server.port = port
                .trim()
                .parse()
                .with_context(|| format!("Invalid PORT: '{}'", port))?;
        }
        if let Some(uri) = lookup("MONGODB_URI").filter(|u| !u.is_empty()) {
            self.store.uri = Some(uri);
        }
        if let Some(database) = lookup("MONGODB_DATABASE").filter(|d| !d.is_empty()) {
            self.store.database = database;
        }
        Ok(())
    }

    /// Effective upload directory
    pub fn upload_dir(&self) -> PathBuf {
        self.server
            .upload_dir
            .clone()
            .unwrap_or_else(|| self.server.public_dir.join("uploads"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_toml("").unwrap();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.store.backend, StoreBackend::Mongodb);
        assert_eq!(config.store.database, "catalog");
        assert_eq!(config.store.collection, "products");
        assert_eq!(config.logging.format, LogFormat::Text);
        assert_eq!(config.upload_dir(), PathBuf::from("public/uploads"));
    }

    #[test]
    fn test_full_file() {
        let config = Config::from_toml(
            r#"
[server]
host = "127.0.0.1"
port = 8080
public_dir = "/srv/catalog"
upload_dir = "/var/lib/catalog/uploads"
max_upload_bytes = 2048

[store]
backend = "memory"
uri = "mongodb://db:27017"
database = "shop"
collection = "items"

[logging]
format = "json"
"#,
        )
        .unwrap();

        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.max_upload_bytes, 2048);
        assert_eq!(config.store.backend, StoreBackend::Memory);
        assert_eq!(config.store.uri.as_deref(), Some("mongodb://db:27017"));
        assert_eq!(config.store.collection, "items");
        assert_eq!(config.logging.format, LogFormat::Json);
        assert_eq!(
            config.upload_dir(),
            PathBuf::from("/var/lib/catalog/uploads")
        );
    }

    #[test]
    fn test_env_overrides() {
        let mut config = Config::from_toml("[server]\nport = 8080").unwrap();
        config
            .apply_env(env(&[
                ("PORT", "4000"),
                ("MONGODB_URI", "mongodb://localhost:27017"),
                ("MONGODB_DATABASE", "shop"),
            ]))
            .unwrap();

        assert_eq!(config.server.port, 4000);
        assert_eq!(config.store.uri.as_deref(), Some("mongodb://localhost:27017"));
        assert_eq!(config.store.database, "shop");
    }

    #[test]
    fn test_invalid_port_env() {
        let mut config = Config::default();
        assert!(config.apply_env(env(&[("PORT", "http")])).is_err());
    }

    #[test]
    fn test_unknown_backend_rejected() {
        assert!(Config::from_toml("[store]\nbackend = \"redis\"").is_err());
    }
}
