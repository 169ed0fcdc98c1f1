use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{Result, WordError};
use crate::paginator::DEFAULT_PAGE_SIZE;
use crate::source::{DEFAULT_DICTIONARY_URL, DEFAULT_ENTRIES_URL};

/// Load environment variables from .env files
///
/// Priority order (highest to lowest):
/// 1. Current directory .env
/// 2. ~/.wordctl/.env
/// 3. Environment variables already set
pub fn load_dotenv() {
    let mut loaded_from = Vec::new();

    if let Ok(path) = dotenvy::dotenv() {
        loaded_from.push(path.display().to_string());
    }

    if let Some(env_file) = config_dir().map(|dir| dir.join(".env")) {
        if env_file.exists() {
            // dotenvy doesn't overwrite existing vars
            match dotenvy::from_path(&env_file) {
                Ok(_) => loaded_from.push(env_file.display().to_string()),
                Err(e) => debug!("Failed to load {}: {}", env_file.display(), e),
            }
        }
    }

    if loaded_from.is_empty() {
        debug!("No .env files found");
    } else {
        info!("Loaded environment from: {}", loaded_from.join(", "));
    }
}

/// The wordctl config directory (~/.wordctl)
pub fn config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".wordctl"))
}

/// Global config file path: ~/.wordctl/config.toml
pub fn config_path() -> PathBuf {
    config_dir()
        .unwrap_or_else(|| PathBuf::from(".wordctl"))
        .join("config.toml")
}

/// Project-local config file name
pub const LOCAL_CONFIG_FILE: &str = "wordctl.toml";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct WordctlConfig {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub list: ListConfig,

    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub session: SessionConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_dictionary_url")]
    pub dictionary_url: String,

    #[serde(default = "default_entries_url")]
    pub entries_url: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            dictionary_url: default_dictionary_url(),
            entries_url: default_entries_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListConfig {
    #[serde(default = "default_page_size")]
    pub page_size: usize,
}

impl Default for ListConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StorageConfig {
    /// Where favorites/history files live. Defaults to ~/.wordctl/data
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SessionConfig {
    /// User id used when --user / WORDCTL_USER is not given
    #[serde(default)]
    pub user: Option<String>,
}

fn default_dictionary_url() -> String {
    DEFAULT_DICTIONARY_URL.to_string()
}

fn default_entries_url() -> String {
    DEFAULT_ENTRIES_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    15
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

impl WordctlConfig {
    /// Load config from TOML files
    ///
    /// Priority order (highest to lowest):
    /// 1. ./wordctl.toml (project-specific)
    /// 2. ~/.wordctl/config.toml (user defaults)
    /// 3. Built-in defaults
    ///
    /// Files are merged key by key, so a local file only overrides the
    /// keys it sets. Unreadable or invalid files are logged and skipped.
    pub fn load() -> Self {
        let mut merged = toml::Table::new();

        for path in [config_path(), PathBuf::from(LOCAL_CONFIG_FILE)] {
            if !path.exists() {
                continue;
            }
            match read_table(&path) {
                Ok(table) => {
                    debug!("Loaded config from {}", path.display());
                    merge_tables(&mut merged, table);
                }
                Err(e) => warn!("{}", e),
            }
        }

        Self::from_table(merged).unwrap_or_else(|e| {
            warn!("{}", e);
            Self::default()
        })
    }

    fn from_table(table: toml::Table) -> Result<Self> {
        toml::Value::Table(table)
            .try_into()
            .map_err(|e: toml::de::Error| WordError::config("<inline>", e.to_string()))
    }

    /// Data directory for the file store
    pub fn data_dir(&self) -> PathBuf {
        self.storage.data_dir.clone().unwrap_or_else(|| {
            config_dir()
                .unwrap_or_else(|| PathBuf::from(".wordctl"))
                .join("data")
        })
    }

    /// Page size, never zero
    pub fn page_size(&self) -> usize {
        self.list.page_size.max(1)
    }

    /// Render as TOML for `config show` / `config init`
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| WordError::config("<inline>", e.to_string()))
    }
}

/// Read a config file as a raw table, rejecting contents that do not
/// deserialize into [`WordctlConfig`]
fn read_table(path: &Path) -> Result<toml::Table> {
    let content =
        std::fs::read_to_string(path).map_err(|e| WordError::config(path, e.to_string()))?;
    let table: toml::Table = content
        .parse()
        .map_err(|e: toml::de::Error| WordError::config(path, e.to_string()))?;
    WordctlConfig::from_table(table.clone()).map_err(|e| relabel(e, path))?;
    Ok(table)
}

fn relabel(err: WordError, path: &Path) -> WordError {
    match err {
        WordError::Config { reason, .. } => WordError::config(path, reason),
        other => other,
    }
}

/// Overlay `overlay` onto `base`; nested tables merge, other values replace
fn merge_tables(base: &mut toml::Table, overlay: toml::Table) {
    for (key, value) in overlay {
        match (base.get_mut(&key), value) {
            (Some(toml::Value::Table(existing)), toml::Value::Table(nested)) => {
                merge_tables(existing, nested);
            }
            (_, value) => {
                base.insert(key, value);
            }
        }
    }
}
