//! Configuration loading and validation.
//!
//! Reads `config/advisor.yaml` and resolves environment variables. When no
//! file exists, [`AdvisorConfig::from_env`] builds the same structure from
//! `OPENAI_*` variables and defaults.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

/// Env var pointing directly at a config file.
pub const CONFIG_PATH_ENV: &str = "GIFT_ADVISOR_CONFIG";

/// Location of the config file relative to a project root.
const CONFIG_RELATIVE_PATH: &str = "config/advisor.yaml";

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_MODEL: &str = "gpt-3.5-turbo";

/// Configuration loading or validation error.
#[derive(Debug, Error)]
#[error("config error: {reason}")]
pub struct ConfigError {
    pub reason: String,
}

impl ConfigError {
    fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

// ─── Public Types ────────────────────────────────────────────────────────────

/// Text-generation service settings.
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceConfig {
    /// Base URL of an OpenAI-compatible API, without the trailing `/chat/completions`.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_model")]
    pub model: String,
    /// Bearer token. Empty means every request fails with an auth error.
    #[serde(default)]
    pub api_key: String,
    /// Upper bound on generated tokens per request.
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    /// Sampling temperature. Must be in (0, 2].
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    /// Total request timeout.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

/// Conversation lifecycle settings.
#[derive(Debug, Clone, Deserialize)]
pub struct SessionsConfig {
    /// Sessions untouched for longer than this are discarded.
    #[serde(default = "default_idle_timeout_mins")]
    pub idle_timeout_mins: u32,
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Where and how to write logs.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoggingConfig {
    /// Directory for `advisor.log`. Logs go to stderr when unset.
    #[serde(default)]
    pub dir: Option<PathBuf>,
    #[serde(default)]
    pub format: LogFormat,
}

/// Top-level configuration (mirrors `config/advisor.yaml`).
#[derive(Debug, Clone, Deserialize)]
pub struct AdvisorConfig {
    pub service: ServiceConfig,
    #[serde(default)]
    pub sessions: SessionsConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}
fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}
fn default_max_tokens() -> u32 {
    500
}
fn default_temperature() -> f32 {
    0.7
}
fn default_timeout_secs() -> u64 {
    30
}
fn default_idle_timeout_mins() -> u32 {
    30
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            model: default_model(),
            api_key: String::new(),
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for SessionsConfig {
    fn default() -> Self {
        Self {
            idle_timeout_mins: default_idle_timeout_mins(),
        }
    }
}

impl ServiceConfig {
    /// Reject settings the client cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.base_url.trim().is_empty() {
            return Err(ConfigError::new("service.base_url must not be empty"));
        }
        if self.model.trim().is_empty() {
            return Err(ConfigError::new("service.model must not be empty"));
        }
        if self.max_tokens == 0 {
            return Err(ConfigError::new("service.max_tokens must be positive"));
        }
        if !(self.temperature > 0.0 && self.temperature <= 2.0) {
            return Err(ConfigError::new(format!(
                "service.temperature must be in (0, 2], got {}",
                self.temperature
            )));
        }
        if self.timeout_secs == 0 {
            return Err(ConfigError::new("service.timeout_secs must be positive"));
        }
        Ok(())
    }
}

impl AdvisorConfig {
    /// Defaults plus `OPENAI_API_KEY`, `OPENAI_BASE_URL` and `OPENAI_MODEL`.
    pub fn from_env() -> Self {
        let service = ServiceConfig {
            base_url: std::env::var("OPENAI_BASE_URL").unwrap_or_else(|_| default_base_url()),
            model: std::env::var("OPENAI_MODEL").unwrap_or_else(|_| default_model()),
            api_key: std::env::var("OPENAI_API_KEY").unwrap_or_default(),
            ..ServiceConfig::default()
        };
        Self {
            service,
            sessions: SessionsConfig::default(),
            logging: LoggingConfig::default(),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.service.validate()?;
        if self.sessions.idle_timeout_mins == 0 {
            return Err(ConfigError::new("sessions.idle_timeout_mins must be positive"));
        }
        Ok(())
    }
}

// ─── Loading ─────────────────────────────────────────────────────────────────

/// Locate the config file.
///
/// Checks `GIFT_ADVISOR_CONFIG` first, then searches upward from `start`
/// for `config/advisor.yaml`. Returns `None` when neither exists.
pub fn find_config_path(start: &Path) -> Option<PathBuf> {
    if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
        let candidate = PathBuf::from(expand_tilde(&path));
        if candidate.exists() {
            return Some(candidate);
        }
        tracing::warn!(path = %candidate.display(), "{CONFIG_PATH_ENV} points to a missing file");
    }

    let mut dir = start.to_path_buf();
    loop {
        let candidate = dir.join(CONFIG_RELATIVE_PATH);
        if candidate.exists() {
            return Some(candidate);
        }
        if !dir.pop() {
            return None;
        }
    }
}

/// Load, interpolate and validate a config file.
///
/// String values may reference `${VAR_NAME}` or `${VAR_NAME:-default}`.
pub fn load_config(path: &Path) -> Result<AdvisorConfig, ConfigError> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| ConfigError::new(format!("failed to read {}: {e}", path.display())))?;
    parse_config(&raw)
}

/// Parse config text (after env interpolation) and validate it.
pub fn parse_config(raw: &str) -> Result<AdvisorConfig, ConfigError> {
    let interpolated = interpolate_env_vars(raw);

    let mut config: AdvisorConfig = serde_yaml::from_str(&interpolated)
        .map_err(|e| ConfigError::new(format!("failed to parse config: {e}")))?;

    if let Some(dir) = config.logging.dir.take() {
        config.logging.dir = Some(PathBuf::from(expand_tilde(&dir.to_string_lossy())));
    }

    config.validate()?;
    Ok(config)
}

/// Load the config file if one can be found, otherwise fall back to the
/// environment.
pub fn resolve_config(start: &Path) -> Result<AdvisorConfig, ConfigError> {
    match find_config_path(start) {
        Some(path) => load_config(&path),
        None => {
            let config = AdvisorConfig::from_env();
            config.validate()?;
            Ok(config)
        }
    }
}

// ─── Env-var interpolation ───────────────────────────────────────────────────

/// Replace `${VAR}` and `${VAR:-default}` in a string.
fn interpolate_env_vars(input: &str) -> String {
    let mut result = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '$' && chars.peek() == Some(&'{') {
            chars.next();
            let mut var_expr = String::new();
            for c in chars.by_ref() {
                if c == '}' {
                    break;
                }
                var_expr.push(c);
            }
            result.push_str(&resolve_var_expr(&var_expr));
        } else {
            result.push(ch);
        }
    }

    result
}

/// Resolve `VAR` or `VAR:-default`. An unset or empty variable takes the default.
fn resolve_var_expr(expr: &str) -> String {
    match expr.split_once(":-") {
        Some((name, default)) => std::env::var(name)
            .ok()
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| default.to_string()),
        None => std::env::var(expr).unwrap_or_default(),
    }
}

/// Expand a leading `~` to the user's home directory.
fn expand_tilde(path: &str) -> String {
    if let Some(rest) = path.strip_prefix('~') {
        if let Some(home) = dirs::home_dir() {
            return format!("{}{rest}", home.display());
        }
    }
    path.to_string()
}

// ─── Tests ───────────────────────────────────────────────────────────────────
