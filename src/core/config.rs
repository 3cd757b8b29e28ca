//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.villa/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::description::DEFAULT_DESCRIPTION_LIMIT;
use crate::core::images::DEFAULT_PLACEHOLDER;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct VillaConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub images: ImagesConfig,
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ApiConfig {
    pub base_url: Option<String>,
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ImagesConfig {
    pub base_url: Option<String>,
    pub placeholder: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct DisplayConfig {
    pub description_limit: Option<usize>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct StorageConfig {
    /// Directory for the persistent store (default `~/.villa`).
    pub dir: Option<String>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";
pub const DEFAULT_API_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_IMAGE_BASE_URL: &str = "https://storage.googleapis.com/villa-assets";

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub api_base_url: String,
    pub api_timeout_secs: u64,
    pub image_base_url: String,
    pub image_placeholder: String,
    pub description_limit: usize,
    pub storage_dir: Option<PathBuf>,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            api_timeout_secs: DEFAULT_API_TIMEOUT_SECS,
            image_base_url: DEFAULT_IMAGE_BASE_URL.to_string(),
            image_placeholder: DEFAULT_PLACEHOLDER.to_string(),
            description_limit: DEFAULT_DESCRIPTION_LIMIT,
            storage_dir: None,
        }
    }
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns `~/.villa`.
pub fn villa_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".villa"))
}

/// Returns the path to `~/.villa/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    villa_dir().map(|d| d.join("config.toml"))
}

/// Load config from `~/.villa/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `VillaConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<VillaConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(VillaConfig::default());
        }
    };
    load_config_from(&path)
}

pub fn load_config_from(path: &Path) -> Result<VillaConfig, ConfigError> {
    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(path);
        return Ok(VillaConfig::default());
    }

    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: VillaConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    let default_content = r#"# Villa Configuration
# All settings are optional. Defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [api]
# base_url = "http://localhost:8000"      # Or set VILLA_API_URL
# timeout_secs = 30                       # Or set VILLA_API_TIMEOUT_SECS

# [images]
# base_url = "https://storage.googleapis.com/villa-assets"   # Or set VILLA_IMAGE_BASE_URL
# placeholder = "/placeholder.svg"

# [display]
# description_limit = 300                 # Characters shown before "read more"

# [storage]
# dir = "/home/me/.villa"                 # Where the auth token is kept
"#;

    if let Some(parent) = path.parent()
        && let Err(e) = fs::create_dir_all(parent)
    {
        warn!("Failed to create config directory: {}", e);
        return;
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Overrides taken from the command line (None = not specified).
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub api_url: Option<String>,
}

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &VillaConfig, cli: &CliOverrides) -> ResolvedConfig {
    // API base URL: CLI → env → config → default
    let api_base_url = cli
        .api_url
        .clone()
        .or_else(|| std::env::var("VILLA_API_URL").ok())
        .or_else(|| config.api.base_url.clone())
        .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());

    // Timeout: env → config → default; zero is not a usable timeout
    let api_timeout_secs = std::env::var("VILLA_API_TIMEOUT_SECS")
        .ok()
        .and_then(|s| s.parse().ok())
        .or(config.api.timeout_secs)
        .filter(|secs| *secs > 0)
        .unwrap_or(DEFAULT_API_TIMEOUT_SECS);

    // Image bucket: env → config → default
    let image_base_url = std::env::var("VILLA_IMAGE_BASE_URL")
        .ok()
        .or_else(|| config.images.base_url.clone())
        .unwrap_or_else(|| DEFAULT_IMAGE_BASE_URL.to_string());

    let storage_dir = config
        .storage
        .dir
        .as_ref()
        .map(PathBuf::from)
        .or_else(villa_dir);

    ResolvedConfig {
        api_base_url,
        api_timeout_secs,
        image_base_url,
        image_placeholder: config
            .images
            .placeholder
            .clone()
            .unwrap_or_else(|| DEFAULT_PLACEHOLDER.to_string()),
        description_limit: config
            .display
            .description_limit
            .unwrap_or(DEFAULT_DESCRIPTION_LIMIT),
        storage_dir,
    }
}
