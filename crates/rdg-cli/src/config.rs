//! Configuration loading and management.

use std::path::{Path, PathBuf};

use chrono::Duration;
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use rdg_core::DedupPolicy;
use serde::{Deserialize, Serialize};

/// Overlap tie-break policy names accepted in configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum PolicyName {
    #[default]
    Tolerant,
    LongestWins,
}

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Path to the JSON Lines record store.
    pub records_path: PathBuf,

    /// Overlap tie-break policy for deduplication.
    pub dedup_policy: PolicyName,

    /// Tolerance window for the tolerant policy, in seconds.
    pub tolerance_seconds: i64,

    /// Default gap for `merged` when `--max-gap` is not given, in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_max_gap_seconds: Option<i64>,
}

impl Default for Config {
    fn default() -> Self {
        let data_dir = dirs_data_path().unwrap_or_else(|| PathBuf::from("."));
        Self {
            records_path: data_dir.join("records.jsonl"),
            dedup_policy: PolicyName::Tolerant,
            tolerance_seconds: 60,
            default_max_gap_seconds: None,
        }
    }
}

impl Config {
    /// Loads configuration from default locations.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load() -> Result<Self, figment::Error> {
        Self::load_from(None)
    }

    /// Loads configuration, optionally from a specific file.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, figment::Error> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Load from default config location
        if let Some(config_dir) = dirs_config_path() {
            figment = figment.merge(Toml::file(config_dir.join("config.toml")));
        }

        // Load from specified config file
        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        // Load from environment variables (RDG_*)
        figment = figment.merge(Env::prefixed("RDG_"));

        figment.extract()
    }

    /// The configured policy in engine terms.
    #[must_use]
    pub fn policy(&self) -> DedupPolicy {
        match self.dedup_policy {
            PolicyName::Tolerant => DedupPolicy::Tolerant {
                tolerance: Duration::seconds(self.tolerance_seconds),
            },
            PolicyName::LongestWins => DedupPolicy::LongestWins,
        }
    }
}

/// Returns the platform-specific config directory for rdg.
fn dirs_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("rdg"))
}

/// Returns the platform-specific data directory for rdg.
///
/// On Linux: `~/.local/share/rdg`
pub fn dirs_data_path() -> Option<PathBuf> {
    dirs::data_dir().map(|p| p.join("rdg"))
}
