//! # Configuration
//!
//! Centralizes client settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.agri-sahayak/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::PathBuf;

use crate::api::DEFAULT_SERVER_URL;
use crate::core::i18n::Language;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct SahayakConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// `"en"` or `"hi"`; unset defers to the stored/detected locale.
    pub language: Option<String>,
    pub alert_poll_minutes: Option<u64>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ServerConfig {
    pub base_url: Option<String>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_ALERT_POLL_MINUTES: u64 = 30;

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub server_url: String,
    /// Explicit locale override; `None` means detect from store/environment.
    pub language: Option<Language>,
    pub alert_poll_minutes: u64,
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

/// Returns the path to `~/.agri-sahayak/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".agri-sahayak").join("config.toml"))
}

/// Load config from `~/.agri-sahayak/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `SahayakConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<SahayakConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(SahayakConfig::default());
        }
    };

    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(&path);
        return Ok(SahayakConfig::default());
    }

    let contents = fs::read_to_string(&path).map_err(ConfigError::Io)?;
    let config: SahayakConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &PathBuf) {
    let default_content = r#"# Agri-Sahayak Configuration
# All settings are optional; defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# language = "en"              # "en" or "hi"
# alert_poll_minutes = 30      # weather alert poll interval

# [server]
# base_url = "http://127.0.0.1:8000"
"#;

    if let Some(parent) = path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            warn!("Failed to create config directory: {}", e);
            return;
        }
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars
/// → CLI flags (`None` = not specified on the command line).
pub fn resolve(
    config: &SahayakConfig,
    cli_server_url: Option<&str>,
    cli_language: Option<Language>,
) -> ResolvedConfig {
    // Server origin: CLI → env → config → default
    let server_url = cli_server_url
        .map(|s| s.to_string())
        .or_else(|| std::env::var("AGRI_SAHAYAK_SERVER_URL").ok())
        .or_else(|| config.server.base_url.clone())
        .unwrap_or_else(|| DEFAULT_SERVER_URL.to_string());

    // Locale override: CLI → config (store/env detection happens later)
    let language = cli_language.or_else(|| {
        config
            .general
            .language
            .as_deref()
            .and_then(Language::from_code)
    });

    ResolvedConfig {
        server_url,
        language,
        alert_poll_minutes: config
            .general
            .alert_poll_minutes
            .unwrap_or(DEFAULT_ALERT_POLL_MINUTES),
    }
}
