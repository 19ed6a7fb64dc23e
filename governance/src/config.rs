//! Module configuration with TOML file support.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use dnsdao_types::AccountAddress;
use dnsdao_utils::LogFormat;

use crate::keeper::MODULE_NAME;
use crate::GovernanceError;

/// Configuration for hosting the governance module.
///
/// Can be loaded from a TOML file via [`GovernanceConfig::from_toml_file`] or
/// built programmatically (e.g. for tests).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GovernanceConfig {
    /// Address allowed to update params.
    pub authority: String,

    /// Holding account for escrowed deposits and minted grants.
    #[serde(default = "default_module_account")]
    pub module_account: String,

    #[serde(default)]
    pub log_format: LogFormat,

    /// Log level filter: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Directory for the LMDB environment.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    #[serde(default = "default_map_size")]
    pub lmdb_map_size: usize,

    /// JSON genesis to load into an empty store.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genesis_file: Option<PathBuf>,
}

// ── Serde default helpers ──────────────────────────────────────────────

fn default_module_account() -> String {
    MODULE_NAME.to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("./dnsdao_data")
}

fn default_map_size() -> usize {
    1 << 30
}

// ── Impl ───────────────────────────────────────────────────────────────

impl GovernanceConfig {
    pub fn new(authority: impl Into<String>) -> Self {
        Self {
            authority: authority.into(),
            module_account: default_module_account(),
            log_format: LogFormat::default(),
            log_level: default_log_level(),
            data_dir: default_data_dir(),
            lmdb_map_size: default_map_size(),
            genesis_file: None,
        }
    }

    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: &str) -> Result<Self, GovernanceError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| GovernanceError::Config(e.to_string()))?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, GovernanceError> {
        let config: Self = toml::from_str(s).map_err(|e| GovernanceError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize the configuration to a TOML string.
    pub fn to_toml_string(&self) -> Result<String, GovernanceError> {
        toml::to_string_pretty(self).map_err(|e| GovernanceError::Config(e.to_string()))
    }

    /// Install the global tracing subscriber described by this config.
    pub fn init_logging(&self) -> bool {
        dnsdao_utils::init_logging(self.log_format, &self.log_level)
    }

    pub fn validate(&self) -> Result<(), GovernanceError> {
        if !AccountAddress::is_valid(&self.authority) {
            return Err(GovernanceError::Config(format!(
                "invalid authority address: {}",
                self.authority
            )));
        }
        if self.module_account.trim().is_empty() {
            return Err(GovernanceError::Config("module account name cannot be empty".into()));
        }
        if self.lmdb_map_size == 0 {
            return Err(GovernanceError::Config("lmdb_map_size must be positive".into()));
        }
        Ok(())
    }
}
