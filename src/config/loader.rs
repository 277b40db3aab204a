//! Configuration loading from disk and the environment.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::schema::{GatewayConfig, LogFormat};
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Env { var: &'static str, message: String },
    Validation(Vec<ValidationError>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "IO error: {}", e),
            ConfigError::Parse(e) => write!(f, "Parse error: {}", e),
            ConfigError::Env { var, message } => write!(f, "Invalid {}: {}", var, message),
            ConfigError::Validation(errors) => {
                write!(f, "Validation failed: ")?;
                for (i, err) in errors.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", err)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Load a dotenv file into the process environment.
///
/// `BACKEND_ENV_PATH` selects the file; otherwise `.env` is used when present.
/// Returns the path that was loaded, if any.
pub fn load_dotenv() -> Option<PathBuf> {
    match std::env::var("BACKEND_ENV_PATH") {
        Ok(path) if !path.trim().is_empty() => {
            let path = PathBuf::from(path);
            match dotenvy::from_path(&path) {
                Ok(()) => Some(path),
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "Failed to load env file");
                    None
                }
            }
        }
        _ => dotenvy::dotenv().ok(),
    }
}

/// Load configuration: defaults, then the optional TOML file, then process
/// environment overrides. The result is validated before it is returned.
pub fn load_config(path: Option<&Path>) -> Result<GatewayConfig, ConfigError> {
    let config = match path {
        Some(path) => {
            let content = fs::read_to_string(path).map_err(ConfigError::Io)?;
            toml::from_str(&content).map_err(ConfigError::Parse)?
        }
        None => GatewayConfig::default(),
    };

    let config = apply_env(config, |name| std::env::var(name).ok())?;

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Overlay environment variables onto `config`.
///
/// `lookup` abstracts the environment so tests can supply a fixed map.
/// Blank values are treated as unset.
pub fn apply_env<F>(mut config: GatewayConfig, lookup: F) -> Result<GatewayConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let get = |name: &str| {
        lookup(name)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    };

    if let Some(host) = get("HOST") {
        config.listener.host = host;
    }
    if let Some(port) = get("PORT") {
        config.listener.port = port.parse().map_err(|e: std::num::ParseIntError| {
            ConfigError::Env { var: "PORT", message: e.to_string() }
        })?;
    }
    if let Some(origin) = get("CORS_ORIGIN") {
        config.cors.origin = origin;
    }
    if let Some(flag) = get("BACKEND_MOCK") {
        config.mock_mode = parse_flag(&flag);
    }

    if let Some(base_url) = get("JIRA_BASE_URL") {
        config.jira.base_url = Some(base_url);
    }
    if let Some(email) = get("JIRA_EMAIL") {
        config.jira.email = Some(email);
    }
    if let Some(token) = get("JIRA_API_TOKEN") {
        config.jira.api_token = Some(token);
    }
    if let Some(secs) = get("JIRA_TIMEOUT_SECS") {
        config.jira.timeout_secs = secs.parse().map_err(|e: std::num::ParseIntError| {
            ConfigError::Env { var: "JIRA_TIMEOUT_SECS", message: e.to_string() }
        })?;
    }

    if let Some(level) = get("LOG_LEVEL") {
        config.observability.log_level = level;
    }
    if let Some(format) = get("LOG_FORMAT") {
        config.observability.log_format = format
            .parse::<LogFormat>()
            .map_err(|message| ConfigError::Env { var: "LOG_FORMAT", message })?;
    }
    if let Some(flag) = get("METRICS_ENABLED") {
        config.observability.metrics_enabled = parse_flag(&flag);
    }
    if let Some(addr) = get("METRICS_ADDRESS") {
        config.observability.metrics_address = addr;
    }

    Ok(config)
}

fn parse_flag(value: &str) -> bool {
    matches!(value.to_ascii_lowercase().as_str(), "true" | "1" | "yes")
}
