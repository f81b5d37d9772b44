//! Config file parsing for `~/.config/find-libraries/config.toml`.
//!
//! Everything has a working default; a missing or malformed config file
//! falls back to defaults rather than failing.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::providers::{minuteman, openlibrary};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub providers: ProvidersConfig,
    #[serde(default)]
    pub shelf: ShelfConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProvidersConfig {
    /// OverDrive subdomains, tried in listed order.
    #[serde(default = "default_overdrive_subdomains")]
    pub overdrive_subdomains: Vec<String>,
    /// Host of the Hoopla-annotated catalog.
    #[serde(default = "default_catalog_base_url")]
    pub catalog_base_url: String,
    #[serde(default = "default_open_library_base_url")]
    pub open_library_base_url: String,
    /// Per-fetch timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_overdrive_subdomains() -> Vec<String> {
    vec!["minuteman".to_string(), "bpl".to_string()]
}

fn default_catalog_base_url() -> String {
    minuteman::DEFAULT_BASE_URL.to_string()
}

fn default_open_library_base_url() -> String {
    openlibrary::DEFAULT_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        Self {
            overdrive_subdomains: default_overdrive_subdomains(),
            catalog_base_url: default_catalog_base_url(),
            open_library_base_url: default_open_library_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl ProvidersConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShelfConfig {
    /// Bookshelf that marks a row as wanted (rows without a Bookshelves
    /// column are always kept).
    #[serde(default = "default_shelf")]
    pub shelf: String,
    /// Bookshelves worth surfacing as tags on output records. Empty means
    /// every bookshelf becomes a tag.
    #[serde(default)]
    pub tag_shelves: Vec<String>,
}

fn default_shelf() -> String {
    "to-read".to_string()
}

impl Default for ShelfConfig {
    fn default() -> Self {
        Self {
            shelf: default_shelf(),
            tag_shelves: Vec::new(),
        }
    }
}

/// Load config from the default path (`~/.config/find-libraries/config.toml`).
pub fn load_config() -> AppConfig {
    let config_path = match config_path() {
        Some(p) => p,
        None => return AppConfig::default(),
    };

    let content = match std::fs::read_to_string(&config_path) {
        Ok(c) => c,
        Err(_) => return AppConfig::default(),
    };

    match toml::from_str::<AppConfig>(&content) {
        Ok(cfg) => cfg,
        Err(_) => AppConfig::default(),
    }
}

/// Return the default config file path (for init and show).
pub fn config_path() -> Option<std::path::PathBuf> {
    dirs::config_dir().map(|mut p| {
        p.push("find-libraries");
        p.push("config.toml");
        p
    })
}
