//! Application configuration for vc-scout.
//!
//! User config lives at `~/.vcscout/scout.toml`.
//! CLI flags override config file values, which override defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, ScoutError};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "scout.toml";

/// Default config directory name under the user's home.
const CONFIG_DIR_NAME: &str = ".vcscout";

/// User-Agent sent with every page fetch.
pub const DEFAULT_USER_AGENT: &str =
    "vc-scout-enricher/0.1 (+https://example.com; bot for enrichment demo)";

// ---------------------------------------------------------------------------
// Config structs (matching scout.toml schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP endpoint settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// Outbound fetch settings.
    #[serde(default)]
    pub fetch: FetchConfig,

    /// Heuristic tunables for the analysis stages.
    #[serde(default)]
    pub enrichment: EnrichmentConfig,
}

/// `[server]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Socket address the enrich endpoint listens on.
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

fn default_bind() -> String {
    "127.0.0.1:3000".into()
}

/// `[fetch]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchConfig {
    /// Identifying User-Agent header.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Whole-request timeout. Unset means the HTTP client default (none).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
            timeout_secs: None,
        }
    }
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.into()
}

/// `[enrichment]` section.
///
/// Defaults reproduce the heuristics the dashboard was tuned against; change
/// them only knowing downstream display depends on the shapes they produce.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrichmentConfig {
    /// Sentences joined into the summary.
    #[serde(default = "default_summary_sentences")]
    pub summary_sentences: usize,

    /// A sentence longer than this (in chars) counts as substantial.
    #[serde(default = "default_summary_min_chars")]
    pub summary_min_chars: usize,

    /// Only this many leading sentences are scored for "what they do".
    #[serde(default = "default_focus_window")]
    pub focus_window: usize,

    /// Maximum "what they do" entries.
    #[serde(default = "default_what_they_do_limit")]
    pub what_they_do_limit: usize,

    /// Maximum keywords.
    #[serde(default = "default_keyword_limit")]
    pub keyword_limit: usize,

    /// Placeholder records returned when no signal is present.
    #[serde(default = "default_min_signal_records")]
    pub min_signal_records: usize,

    /// Allow at most one in-flight fetch per normalized URL.
    #[serde(default)]
    pub single_flight: bool,
}

impl Default for EnrichmentConfig {
    fn default() -> Self {
        Self {
            summary_sentences: default_summary_sentences(),
            summary_min_chars: default_summary_min_chars(),
            focus_window: default_focus_window(),
            what_they_do_limit: default_what_they_do_limit(),
            keyword_limit: default_keyword_limit(),
            min_signal_records: default_min_signal_records(),
            single_flight: false,
        }
    }
}

fn default_summary_sentences() -> usize {
    2
}
fn default_summary_min_chars() -> usize {
    40
}
fn default_focus_window() -> usize {
    15
}
fn default_what_they_do_limit() -> usize {
    4
}
fn default_keyword_limit() -> usize {
    10
}
fn default_min_signal_records() -> usize {
    2
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Get the path to the config directory (`~/.vcscout/`).
pub fn config_dir() -> Result<PathBuf> {
    let home =
        dirs::home_dir().ok_or_else(|| ScoutError::config("could not determine home directory"))?;
    Ok(home.join(CONFIG_DIR_NAME))
}

/// Get the path to the config file (`~/.vcscout/scout.toml`).
pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// Load the application config from disk. Returns defaults if the file does not exist.
pub fn load_config() -> Result<AppConfig> {
    let path = config_file_path()?;

    if !path.exists() {
        tracing::debug!(?path, "config file not found, using defaults");
        return Ok(AppConfig::default());
    }

    load_config_from(&path)
}

/// Load the application config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| ScoutError::io(path, e))?;

    toml::from_str(&content)
        .map_err(|e| ScoutError::config(format!("failed to parse {}: {e}", path.display())))
}

/// Create the config directory and write a default config file.
/// Returns the path to the created file.
pub fn init_config() -> Result<PathBuf> {
    let dir = config_dir()?;
    std::fs::create_dir_all(&dir).map_err(|e| ScoutError::io(&dir, e))?;

    let path = dir.join(CONFIG_FILE_NAME);
    let config = AppConfig::default();
    let content = toml::to_string_pretty(&config).map_err(|e| ScoutError::config(e.to_string()))?;

    std::fs::write(&path, content).map_err(|e| ScoutError::io(&path, e))?;
    tracing::info!(?path, "created default config file");

    Ok(path)
}
