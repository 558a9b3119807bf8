//! Command-line configuration.
//!
//! Read from `odata-uri.toml` in the working directory, falling back to
//! `<config_dir>/odata-uri/config.toml`. A missing file is not an error.
//!
//! ```toml
//! metadata = "northwind.json"
//! dialect = "v401"
//! base_url = "https://services.odata.org/V4/Northwind/Northwind.svc"
//! max_depth = 64
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{UriError, UriResult};
use crate::transpiler::{CompileOptions, DEFAULT_MAX_DEPTH, Dialect};

/// Project-local configuration file name.
pub const FILE_NAME: &str = "odata-uri.toml";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Metadata document (JSON or TOML).
    pub metadata: Option<PathBuf>,
    pub dialect: Option<Dialect>,
    /// Prepended to compiled URIs.
    pub base_url: Option<String>,
    pub max_depth: Option<usize>,
}

impl Config {
    pub fn from_toml(input: &str) -> UriResult<Self> {
        let config: Config = toml::from_str(input).map_err(|e| UriError::Config(e.to_string()))?;
        config.compile_options().validate()?;
        Ok(config)
    }

    /// Load from an explicit path. Relative metadata paths are resolved
    /// against the file's directory.
    pub fn from_path(path: &Path) -> UriResult<Self> {
        let content = fs::read_to_string(path)?;
        let mut config = Self::from_toml(&content)?;
        if let (Some(metadata), Some(dir)) = (config.metadata.as_mut(), path.parent()) {
            if metadata.is_relative() {
                *metadata = dir.join(&*metadata);
            }
        }
        Ok(config)
    }

    /// First existing config file, project-local before user-wide.
    pub fn locate() -> Option<PathBuf> {
        let local = PathBuf::from(FILE_NAME);
        if local.exists() {
            return Some(local);
        }
        dirs::config_dir()
            .map(|dir| dir.join("odata-uri").join("config.toml"))
            .filter(|p| p.exists())
    }

    /// Load the located config, or defaults when there is none.
    pub fn load() -> UriResult<Self> {
        match Self::locate() {
            Some(path) => {
                debug!(path = %path.display(), "loading config");
                Self::from_path(&path)
            }
            None => Ok(Self::default()),
        }
    }

    pub fn compile_options(&self) -> CompileOptions {
        CompileOptions {
            dialect: self.dialect.unwrap_or_default(),
            max_depth: self.max_depth.unwrap_or(DEFAULT_MAX_DEPTH),
        }
    }

    /// Prefix `uri` with the configured base URL.
    pub fn join_base(&self, uri: &str) -> String {
        match &self.base_url {
            Some(base) => format!("{}/{}", base.trim_end_matches('/'), uri.trim_start_matches('/')),
            None => uri.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        let config = Config::from_toml(
            r#"
            metadata = "northwind.json"
            dialect = "v401"
            max_depth = 32
            "#,
        )
        .unwrap();
        assert_eq!(config.metadata, Some(PathBuf::from("northwind.json")));
        let options = config.compile_options();
        assert_eq!(options.dialect, Dialect::ODataV401);
        assert_eq!(options.max_depth, 32);
    }

    #[test]
    fn test_defaults() {
        let options = Config::default().compile_options();
        assert_eq!(options, CompileOptions::default());
    }

    #[test]
    fn test_rejects_unknown_keys_and_zero_depth() {
        assert!(Config::from_toml("dialekt = \"v4\"").is_err());
        assert!(Config::from_toml("max_depth = 0").is_err());
        assert!(Config::from_toml("dialect = \"v3\"").is_err());
    }

    #[test]
    fn test_join_base() {
        let config = Config {
            base_url: Some("https://host/svc/".to_string()),
            ..Config::default()
        };
        assert_eq!(config.join_base("Customers?$top=1"), "https://host/svc/Customers?$top=1");
        assert_eq!(Config::default().join_base("Customers"), "Customers");
    }
}
