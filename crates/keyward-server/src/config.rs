//! Server configuration: TOML file plus environment variable overrides.
//!
//! Priority: environment variables > config file > defaults.

use anyhow::{Context, Result};
use keyward_wallet::WalletPolicy;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// SQLite file name inside the data directory
pub const DB_FILE: &str = "keyward.db";

/// Top-level configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct KeywardConfig {
    /// General server settings
    #[serde(default)]
    pub server: ServerSection,

    /// Wallet request limits
    #[serde(default)]
    pub wallet: WalletSection,
}

/// General server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSection {
    /// Data directory holding the SQLite database
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            log_level: default_log_level(),
        }
    }
}

/// Wallet name limits, in characters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WalletSection {
    #[serde(default = "default_min_name_len")]
    pub min_name_len: usize,

    #[serde(default = "default_max_name_len")]
    pub max_name_len: usize,
}

impl Default for WalletSection {
    fn default() -> Self {
        Self {
            min_name_len: default_min_name_len(),
            max_name_len: default_max_name_len(),
        }
    }
}

// ============================================================================
// Default value functions
// ============================================================================

fn default_data_dir() -> PathBuf {
    PathBuf::from("/data")
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_min_name_len() -> usize {
    WalletPolicy::default().min_name_len
}

fn default_max_name_len() -> usize {
    WalletPolicy::default().max_name_len
}

// ============================================================================
// Loading & environment override
// ============================================================================

impl KeywardConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: KeywardConfig =
            toml::from_str(&contents).with_context(|| "Failed to parse TOML config")?;
        Ok(config)
    }

    /// Apply environment variable overrides.
    ///
    /// Supported env vars:
    /// - `KEYWARD_DATA_DIR`
    /// - `KEYWARD_LOG_LEVEL`
    pub fn apply_env_overrides(&mut self) {
        if let Ok(v) = std::env::var("KEYWARD_DATA_DIR") {
            self.server.data_dir = PathBuf::from(v);
        }
        if let Ok(v) = std::env::var("KEYWARD_LOG_LEVEL") {
            self.server.log_level = v;
        }
    }

    /// Validate that the configuration is usable.
    pub fn validate(&self) -> Result<()> {
        anyhow::ensure!(
            !self.server.data_dir.as_os_str().is_empty(),
            "server.data_dir must not be empty"
        );

        anyhow::ensure!(
            self.wallet.min_name_len > 0,
            "wallet.min_name_len must be > 0"
        );

        anyhow::ensure!(
            self.wallet.min_name_len <= self.wallet.max_name_len,
            "wallet.min_name_len must be <= wallet.max_name_len"
        );

        Ok(())
    }

    /// Path of the SQLite database.
    pub fn db_path(&self) -> PathBuf {
        self.server.data_dir.join(DB_FILE)
    }

    pub fn wallet_policy(&self) -> WalletPolicy {
        WalletPolicy {
            min_name_len: self.wallet.min_name_len,
            max_name_len: self.wallet.max_name_len,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn full_toml() -> &'static str {
        r#"
[server]
data_dir = "/custom/data"
log_level = "debug"

[wallet]
min_name_len = 1
max_name_len = 20
"#
    }

    fn load(toml: &str) -> KeywardConfig {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", toml).unwrap();
        KeywardConfig::from_file(file.path()).unwrap()
    }

    #[test]
    fn test_parse_empty_config_uses_defaults() {
        let config = load("");
        assert_eq!(config.server.data_dir, PathBuf::from("/data"));
        assert_eq!(config.server.log_level, "info");
        assert_eq!(config.wallet_policy(), WalletPolicy::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_full_config() {
        let config = load(full_toml());

        assert_eq!(config.server.data_dir, PathBuf::from("/custom/data"));
        assert_eq!(config.server.log_level, "debug");
        assert_eq!(config.wallet.min_name_len, 1);
        assert_eq!(config.wallet.max_name_len, 20);
        assert_eq!(
            config.db_path(),
            PathBuf::from("/custom/data").join("keyward.db")
        );
    }

    #[test]
    fn test_partial_wallet_section() {
        let config = load("[wallet]\nmax_name_len = 80\n");
        assert_eq!(config.wallet.min_name_len, 3);
        assert_eq!(config.wallet.max_name_len, 80);
    }

    #[test]
    fn test_env_overrides() {
        let mut config = load(full_toml());

        std::env::set_var("KEYWARD_DATA_DIR", "/env/data");
        std::env::set_var("KEYWARD_LOG_LEVEL", "trace");

        config.apply_env_overrides();

        assert_eq!(config.server.data_dir, PathBuf::from("/env/data"));
        assert_eq!(config.server.log_level, "trace");

        std::env::remove_var("KEYWARD_DATA_DIR");
        std::env::remove_var("KEYWARD_LOG_LEVEL");
    }

    #[test]
    fn test_missing_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(KeywardConfig::from_file(&dir.path().join("nope.toml")).is_err());
    }

    #[test]
    fn test_malformed_toml_is_error() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "[server\ndata_dir = ").unwrap();
        assert!(KeywardConfig::from_file(file.path()).is_err());
    }

    #[test]
    fn test_validation_empty_data_dir() {
        let config = load("[server]\ndata_dir = \"\"\n");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_zero_min_len() {
        let config = load("[wallet]\nmin_name_len = 0\n");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_min_above_max() {
        let config = load("[wallet]\nmin_name_len = 10\nmax_name_len = 5\n");
        assert!(config.validate().is_err());
    }
}
