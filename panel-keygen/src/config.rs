//! Server configuration

use std::net::SocketAddr;
use std::path::Path;

use serde::Deserialize;

use crate::domain::short_id::MAX_SHORT_ID_BATCH;

/// Environment variable that overrides the listen port.
pub const PORT_ENV: &str = "PANEL_KEYGEN_PORT";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Configuration for the key generation HTTP server
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address the HTTP API binds to
    pub listen: SocketAddr,
    /// Default tracing filter when `RUST_LOG` is unset
    pub log_level: String,
    /// Upper bound for `count` on short ID requests
    pub max_short_ids: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen: SocketAddr::from(([127, 0, 0, 1], 4010)),
            log_level: "info".to_string(),
            max_short_ids: 64,
        }
    }
}

impl ServerConfig {
    pub fn from_toml_str(value: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(value)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_toml_str(&raw)
    }

    /// Applies `PANEL_KEYGEN_PORT` if it is set to a valid port.
    pub fn apply_env(&mut self) {
        if let Some(port) = std::env::var(PORT_ENV).ok().and_then(|s| s.parse().ok()) {
            self.listen.set_port(port);
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_short_ids == 0 {
            return Err(ConfigError::Invalid(
                "max_short_ids must be at least 1".to_string(),
            ));
        }
        if self.max_short_ids > MAX_SHORT_ID_BATCH {
            return Err(ConfigError::Invalid(format!(
                "max_short_ids must be at most {MAX_SHORT_ID_BATCH}"
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let config = ServerConfig::from_toml_str("log_level = \"debug\"").unwrap();
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.listen, ServerConfig::default().listen);
        assert_eq!(config.max_short_ids, 64);
    }

    #[test]
    fn load_reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "listen = \"0.0.0.0:9000\"").unwrap();
        writeln!(file, "max_short_ids = 8").unwrap();

        let config = ServerConfig::load(file.path()).unwrap();
        assert_eq!(config.listen.port(), 9000);
        assert_eq!(config.max_short_ids, 8);
    }

    #[test]
    fn zero_short_id_limit_is_rejected() {
        let result = ServerConfig::from_toml_str("max_short_ids = 0");
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn short_id_limit_above_batch_size_is_rejected() {
        let result = ServerConfig::from_toml_str("max_short_ids = 1025");
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
        assert!(ServerConfig::from_toml_str("max_short_ids = 1024").is_ok());
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let result = ServerConfig::from_toml_str("listen = ");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = ServerConfig::load(dir.path().join("absent.toml"));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }
}
