//! Runtime configuration read from the environment.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{Error, Result};

pub const DEFAULT_PORT: u16 = 3001;
pub const DEFAULT_STATIC_DIR: &str = "dist";
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Top-level server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PanelConfig {
    /// HTTP server port.
    pub port: u16,
    /// Built front-end served alongside the API (`dist/`).
    pub static_dir: PathBuf,
    /// Request body limit for uploads.
    pub max_upload_bytes: usize,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            static_dir: PathBuf::from(DEFAULT_STATIC_DIR),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

impl PanelConfig {
    /// Create configuration from environment and defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup (environment in production).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let port = parse_or(&lookup, "PORT", defaults.port);
        let max_upload_bytes =
            parse_or(&lookup, "PANEL_MAX_UPLOAD_BYTES", defaults.max_upload_bytes);
        let static_dir = lookup("PANEL_STATIC_DIR")
            .filter(|s| !s.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or(defaults.static_dir);

        Self {
            port,
            static_dir,
            max_upload_bytes,
        }
    }

    /// Reject values that would leave the server unusable.
    pub fn validate(&self) -> Result<()> {
        if self.max_upload_bytes == 0 {
            return Err(Error::Config(
                "PANEL_MAX_UPLOAD_BYTES must be greater than zero".into(),
            ));
        }
        Ok(())
    }

    /// Socket address string to bind.
    pub fn bind_addr(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }
}

fn parse_or<T: std::str::FromStr + Copy + std::fmt::Display>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
) -> T {
    match lookup(key) {
        Some(raw) => match raw.trim().parse() {
            Ok(v) => v,
            Err(_) => {
                warn!("Ignoring invalid {}={:?}, using {}", key, raw, default);
                default
            }
        },
        None => default,
    }
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
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = PanelConfig::from_lookup(lookup_from(&[]));
        assert_eq!(config.port, 3001);
        assert_eq!(config.static_dir, PathBuf::from("dist"));
        assert_eq!(config.max_upload_bytes, DEFAULT_MAX_UPLOAD_BYTES);
        assert_eq!(config.bind_addr(), "0.0.0.0:3001");
    }

    #[test]
    fn test_overrides() {
        let config = PanelConfig::from_lookup(lookup_from(&[
            ("PORT", "8080"),
            ("PANEL_STATIC_DIR", "/srv/panel"),
            ("PANEL_MAX_UPLOAD_BYTES", "1024"),
        ]));
        assert_eq!(config.port, 8080);
        assert_eq!(config.static_dir, PathBuf::from("/srv/panel"));
        assert_eq!(config.max_upload_bytes, 1024);
    }

    #[test]
    fn test_invalid_port_falls_back() {
        let config = PanelConfig::from_lookup(lookup_from(&[("PORT", "not-a-port")]));
        assert_eq!(config.port, DEFAULT_PORT);
    }

    #[test]
    fn test_zero_upload_limit_rejected() {
        let config = PanelConfig::from_lookup(lookup_from(&[("PANEL_MAX_UPLOAD_BYTES", "0")]));
        assert!(matches!(config.validate(), Err(Error::Config(_))));
        assert!(PanelConfig::default().validate().is_ok());
    }
}
