//! Configuration management for memhash CLI

use anyhow::{Context, Result};
use memhash::Algorithm;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Config {
    pub default_algorithm: Option<String>,
    pub default_pid: Option<u32>,
}

impl Config {
    /// Get the path to the config file
    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not determine config directory")?
            .join("memhash");

        Ok(config_dir.join("config.toml"))
    }

    /// Load configuration from file, or create default if it doesn't exist
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            return Ok(Config::default());
        }

        let contents = fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config from {}", config_path.display()))?;

        toml::from_str(&contents).context("Failed to parse config file")
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        // Create config directory if it doesn't exist
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory at {}", parent.display())
            })?;
        }

        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(config_path, contents)
            .with_context(|| format!("Failed to write config to {}", config_path.display()))?;

        Ok(())
    }

    /// Resolve the digest algorithm: explicit flag, then config, then MD5
    pub fn algorithm(&self, flag: Option<&str>) -> Result<Algorithm> {
        match flag.or(self.default_algorithm.as_deref()) {
            Some(name) => name.parse::<Algorithm>().with_context(|| {
                format!("Unknown algorithm '{}' (see `memhash algorithms`)", name)
            }),
            None => Ok(Algorithm::default()),
        }
    }

    /// Set default algorithm in config, rejecting names that don't parse
    pub fn set_algorithm(&mut self, name: &str) -> Result<Algorithm> {
        let algorithm: Algorithm = name
            .parse()
            .with_context(|| format!("Unknown algorithm '{}'", name))?;
        self.default_algorithm = Some(algorithm.name().to_string());
        Ok(algorithm)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_path_exists() {
        assert!(Config::config_path().is_ok());
    }

    #[test]
    fn test_load_missing_is_default() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&temp_dir.path().join("config.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.set_algorithm("sha-256").unwrap();
        config.default_pid = Some(4242);
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.default_algorithm.as_deref(), Some("SHA256"));
        assert_eq!(loaded.default_pid, Some(4242));
    }

    #[test]
    fn test_algorithm_resolution() {
        let mut config = Config::default();
        assert_eq!(config.algorithm(None).unwrap(), Algorithm::Md5);

        config.default_algorithm = Some("sha256".to_string());
        assert_eq!(config.algorithm(None).unwrap(), Algorithm::Sha256);
        assert_eq!(config.algorithm(Some("md5")).unwrap(), Algorithm::Md5);

        assert!(config.algorithm(Some("crc32")).is_err());
    }

    #[test]
    fn test_set_algorithm_rejects_unknown() {
        let mut config = Config::default();
        assert!(config.set_algorithm("whirlpool").is_err());
        assert!(config.default_algorithm.is_none());
    }

    #[test]
    fn test_invalid_toml() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "default_pid = \"not a number\"").unwrap();
        assert!(Config::load_from(&path).is_err());
    }
}
