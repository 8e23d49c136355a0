//! Configuration management
//!
//! Settings live in `settings.json` inside the wallet directory:
//! ```json
//! {
//!   "database": { "path": "wallets.duckdb", "seedDefaults": true },
//!   "logging": { "level": "info" }
//! }
//! ```
//! Keys this crate does not manage are preserved when saving.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::{Error, Result};

pub const SETTINGS_FILE: &str = "settings.json";
pub const DEFAULT_DB_FILE: &str = "wallets.duckdb";
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Environment variable overriding the database path
pub const DB_PATH_ENV: &str = "WALLET_DB_PATH";
/// Environment variable overriding seeding of the sample wallets
pub const SEED_ENV: &str = "WALLET_SEED_DEFAULTS";

/// Raw settings.json structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SettingsFile {
    #[serde(default)]
    database: DatabaseSettings,
    #[serde(default)]
    logging: LoggingSettings,
    #[serde(flatten)]
    other: HashMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DatabaseSettings {
    #[serde(default = "default_db_file")]
    path: String,
    #[serde(default = "default_true")]
    seed_defaults: bool,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            path: default_db_file(),
            seed_defaults: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LoggingSettings {
    #[serde(default = "default_log_level")]
    level: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_db_file() -> String {
    DEFAULT_DB_FILE.to_string()
}

fn default_log_level() -> String {
    DEFAULT_LOG_LEVEL.to_string()
}

fn default_true() -> bool {
    true
}

/// Resolved configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Absolute path of the database file
    pub db_path: PathBuf,
    /// Seed the sample wallets into an empty table on startup
    pub seed_defaults: bool,
    /// Default tracing filter when no env filter is set
    pub log_level: String,
}

impl Config {
    /// Default configuration rooted at `wallet_dir`
    pub fn default_for(wallet_dir: &Path) -> Self {
        Self::from_raw(wallet_dir, SettingsFile::default())
    }

    /// Settings as written in the file, without environment overrides.
    ///
    /// Start from this when the result will be saved back, so that a
    /// temporary override never becomes a stored setting.
    pub fn from_file(wallet_dir: &Path) -> Result<Self> {
        Ok(Self::from_raw(wallet_dir, read_settings(wallet_dir)?))
    }

    /// Load config from the wallet directory.
    ///
    /// A missing settings file yields the defaults. `WALLET_DB_PATH` and
    /// `WALLET_SEED_DEFAULTS` override the file.
    pub fn load(wallet_dir: &Path) -> Result<Self> {
        let mut config = Self::from_file(wallet_dir)?;

        if let Ok(path) = std::env::var(DB_PATH_ENV) {
            if !path.trim().is_empty() {
                config.db_path = resolve(wallet_dir, path.trim());
            }
        }

        match std::env::var(SEED_ENV).ok().as_deref() {
            Some("true" | "1" | "yes" | "TRUE" | "YES") => config.seed_defaults = true,
            Some("false" | "0" | "no" | "FALSE" | "NO") => config.seed_defaults = false,
            _ => {}
        }

        Ok(config)
    }

    /// Save config to the wallet directory, preserving unmanaged keys
    pub fn save(&self, wallet_dir: &Path) -> Result<()> {
        let mut settings = read_settings(wallet_dir)?;

        settings.database.path = self.db_path.to_string_lossy().into_owned();
        settings.database.seed_defaults = self.seed_defaults;
        settings.logging.level = self.log_level.clone();

        let content = serde_json::to_string_pretty(&settings)?;
        std::fs::write(wallet_dir.join(SETTINGS_FILE), content)?;
        Ok(())
    }

    fn from_raw(wallet_dir: &Path, raw: SettingsFile) -> Self {
        Self {
            db_path: resolve(wallet_dir, &raw.database.path),
            seed_defaults: raw.database.seed_defaults,
            log_level: raw.logging.level,
        }
    }
}

fn read_settings(wallet_dir: &Path) -> Result<SettingsFile> {
    let settings_path = wallet_dir.join(SETTINGS_FILE);
    if !settings_path.exists() {
        return Ok(SettingsFile::default());
    }

    let content = std::fs::read_to_string(&settings_path)?;
    serde_json::from_str(&content)
        .map_err(|e| Error::Config(format!("{}: {}", settings_path.display(), e)))
}

/// Relative paths are taken relative to the wallet directory
fn resolve(wallet_dir: &Path, path: &str) -> PathBuf {
    let path = Path::new(path);
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        wallet_dir.join(path)
    }
}
