// Configuration loading and parsing (settings.toml, credentials.toml).

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {}", .path.display())]
    FileNotFound { path: PathBuf },

    #[error("failed to parse config file {}: {source}", .path.display())]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("validation error for field `{field}`: {message}")]
    ValidationError { field: String, message: String },

    #[error("failed to initialize config from defaults: {message}")]
    DefaultsCopyError { message: String },
}

// ---------------------------------------------------------------------------
// Top-level assembled Config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct Config {
    pub api: ApiConfig,
    pub chart: ChartConfig,
}

// ---------------------------------------------------------------------------
// settings.toml structs
// ---------------------------------------------------------------------------

/// Raw deserialization target for settings.toml.
#[derive(Debug, Clone, Deserialize)]
struct SettingsFile {
    api: ApiSection,
    #[serde(default)]
    chart: ChartConfig,
}

#[derive(Debug, Clone, Deserialize)]
struct ApiSection {
    base_url: String,
}

/// Upstream API endpoint plus the key used to obtain temp tokens.
///
/// The key comes from `config/credentials.toml` or, taking precedence, the
/// `DUGOUT_API_KEY` environment variable. It is optional at startup; fetches
/// fail with a visible error instead of the app refusing to launch.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub base_url: String,
    pub api_key: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChartConfig {
    /// Length of the "best stretch" highlight window, in games.
    #[serde(default = "default_best_window_games")]
    pub best_window_games: usize,
}

fn default_best_window_games() -> usize {
    crate::stats::DEFAULT_WINDOW
}

impl Default for ChartConfig {
    fn default() -> Self {
        ChartConfig {
            best_window_games: default_best_window_games(),
        }
    }
}

// ---------------------------------------------------------------------------
// credentials.toml structs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize, Default)]
struct CredentialsFile {
    api_key: Option<String>,
}

// ---------------------------------------------------------------------------
// Loading logic
// ---------------------------------------------------------------------------

/// Load and validate configuration from `config/settings.toml` and
/// (optionally) `config/credentials.toml`, relative to `base_dir`.
///
/// This is the lower-level loading primitive that does not auto-copy
/// defaults. Prefer `load_config()` which handles default initialization.
pub(crate) fn load_config_from(base_dir: &Path) -> Result<Config, ConfigError> {
    let config_dir = base_dir.join("config");

    // --- settings.toml (required) ---
    let settings_path = config_dir.join("settings.toml");
    let settings_text = read_file(&settings_path)?;
    let settings_file: SettingsFile =
        toml::from_str(&settings_text).map_err(|e| ConfigError::ParseError {
            path: settings_path.clone(),
            source: e,
        })?;

    // --- credentials.toml (optional) ---
    let credentials_path = config_dir.join("credentials.toml");
    let credentials: CredentialsFile = if credentials_path.exists() {
        let cred_text = read_file(&credentials_path)?;
        toml::from_str(&cred_text).map_err(|e| ConfigError::ParseError {
            path: credentials_path.clone(),
            source: e,
        })?
    } else {
        CredentialsFile::default()
    };

    // Environment variable wins over the credentials file.
    let api_key = std::env::var("DUGOUT_API_KEY")
        .ok()
        .filter(|k| !k.is_empty())
        .or(credentials.api_key)
        .filter(|k| !k.is_empty());

    let config = Config {
        api: ApiConfig {
            base_url: settings_file.api.base_url,
            api_key,
        },
        chart: settings_file.chart,
    };

    validate(&config)?;

    Ok(config)
}

/// Ensure all config files exist by copying missing ones from `defaults/`.
/// Returns the list of files that were copied. Skips `.example` files.
pub fn ensure_config_files(base_dir: &Path) -> Result<Vec<PathBuf>, ConfigError> {
    let defaults_dir = base_dir.join("defaults");
    let config_dir = base_dir.join("config");

    if !defaults_dir.exists() {
        if !config_dir.exists() {
            return Err(ConfigError::DefaultsCopyError {
                message: format!(
                    "neither defaults/ nor config/ directory found in {}; \
                     run from the project root or ensure defaults/ is present",
                    base_dir.display()
                ),
            });
        }
        return Ok(vec![]);
    }

    std::fs::create_dir_all(&config_dir).map_err(|e| ConfigError::DefaultsCopyError {
        message: format!("failed to create config directory: {e}"),
    })?;

    let mut copied = Vec::new();

    let entries = std::fs::read_dir(&defaults_dir).map_err(|e| ConfigError::DefaultsCopyError {
        message: format!("failed to read defaults directory: {e}"),
    })?;

    for entry in entries {
        let entry = entry.map_err(|e| ConfigError::DefaultsCopyError {
            message: format!("failed to read defaults entry: {e}"),
        })?;
        let path = entry.path();

        if !path.is_file() {
            continue;
        }
        let Some(file_name) = path.file_name() else {
            continue;
        };

        // Skip .example template files
        if file_name.to_str().is_some_and(|n| n.ends_with(".example")) {
            continue;
        }
        let target = config_dir.join(file_name);

        match std::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&target)
        {
            Ok(mut dest) => {
                let content = std::fs::read(&path).map_err(|e| ConfigError::DefaultsCopyError {
                    message: format!("failed to read {}: {e}", path.display()),
                })?;
                std::io::Write::write_all(&mut dest, &content).map_err(|e| {
                    ConfigError::DefaultsCopyError {
                        message: format!("failed to write {}: {e}", target.display()),
                    }
                })?;
                copied.push(target);
            }
            Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
                // File already exists in config/, skip it
            }
            Err(e) => {
                return Err(ConfigError::DefaultsCopyError {
                    message: format!("failed to create {}: {e}", target.display()),
                });
            }
        }
    }

    Ok(copied)
}

/// Convenience wrapper: loads config relative to the current working directory.
/// Ensures default config files are copied before loading.
pub fn load_config() -> Result<Config, ConfigError> {
    let cwd = std::env::current_dir().map_err(|_| ConfigError::FileNotFound {
        path: PathBuf::from("."),
    })?;
    ensure_config_files(&cwd)?;
    load_config_from(&cwd)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn read_file(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
        path: path.to_path_buf(),
    })
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate(config: &Config) -> Result<(), ConfigError> {
    if config.api.base_url.is_empty() {
        return Err(ConfigError::ValidationError {
            field: "api.base_url".into(),
            message: "must not be empty".into(),
        });
    }

    if !config.api.base_url.starts_with("http://") && !config.api.base_url.starts_with("https://") {
        return Err(ConfigError::ValidationError {
            field: "api.base_url".into(),
            message: format!("must be an http(s) URL, got {}", config.api.base_url),
        });
    }

    if config.chart.best_window_games == 0 {
        return Err(ConfigError::ValidationError {
            field: "chart.best_window_games".into(),
            message: "must be greater than 0".into(),
        });
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
