//! Environment-driven server configuration.

use std::path::PathBuf;

use thiserror::Error;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_MODEL_PATH: &str = "/models/best_pneumonia_model.onnx";
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 16 * 1024 * 1024;

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value:?}")]
    Invalid { key: &'static str, value: String },
}

/// Settings read once at startup.
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub model_path: PathBuf,
    pub max_upload_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.into(),
            port: DEFAULT_PORT,
            model_path: PathBuf::from(DEFAULT_MODEL_PATH),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

impl ServerConfig {
    /// Reads `PNEUMO_*` variables from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from an arbitrary key lookup, falling back to defaults
    /// for missing keys.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let host = lookup("PNEUMO_HOST").unwrap_or(defaults.host);
        let port = match lookup("PNEUMO_PORT") {
            Some(v) => parse("PNEUMO_PORT", v)?,
            None => defaults.port,
        };
        let model_path = lookup("PNEUMO_MODEL_PATH")
            .map(PathBuf::from)
            .unwrap_or(defaults.model_path);
        let max_upload_bytes = match lookup("PNEUMO_MAX_UPLOAD_BYTES") {
            Some(v) => parse("PNEUMO_MAX_UPLOAD_BYTES", v)?,
            None => defaults.max_upload_bytes,
        };

        Ok(Self {
            host,
            port,
            model_path,
            max_upload_bytes,
        })
    }

    /// `host:port` string handed to the TCP listener.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse<T: std::str::FromStr>(key: &'static str, value: String) -> Result<T, ConfigError> {
    let parsed = value.trim().parse().ok();
    parsed.ok_or(ConfigError::Invalid { key, value })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ServerConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config, ServerConfig::default());
        assert_eq!(config.bind_addr(), "0.0.0.0:5000");
    }

    #[test]
    fn test_overrides() {
        let config = ServerConfig::from_lookup(lookup_from(&[
            ("PNEUMO_HOST", "127.0.0.1"),
            ("PNEUMO_PORT", "8080"),
            ("PNEUMO_MODEL_PATH", "/tmp/model.onnx"),
            ("PNEUMO_MAX_UPLOAD_BYTES", "1024"),
        ]))
        .unwrap();

        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 8080);
        assert_eq!(config.model_path, PathBuf::from("/tmp/model.onnx"));
        assert_eq!(config.max_upload_bytes, 1024);
    }

    #[test]
    fn test_invalid_port() {
        let err = ServerConfig::from_lookup(lookup_from(&[("PNEUMO_PORT", "eighty")])).unwrap_err();
        assert_eq!(
            err,
            ConfigError::Invalid {
                key: "PNEUMO_PORT",
                value: "eighty".into()
            }
        );
    }

    #[test]
    fn test_invalid_upload_limit() {
        let err = ServerConfig::from_lookup(lookup_from(&[("PNEUMO_MAX_UPLOAD_BYTES", "-1")])).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "PNEUMO_MAX_UPLOAD_BYTES", .. }));
    }

    #[test]
    fn test_port_is_trimmed() {
        let config = ServerConfig::from_lookup(lookup_from(&[("PNEUMO_PORT", " 9000 ")])).unwrap();
        assert_eq!(config.bind_addr(), "0.0.0.0:9000");
    }
}
