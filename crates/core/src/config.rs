use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::settings::HostAutoReplySettings;

pub const DEFAULT_MODEL: &str = "claude-sonnet-4-20250514";
pub const DEFAULT_BASE_URL: &str = "https://api.anthropic.com";

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub anthropic: AnthropicConfig,
    pub auto_reply: AutoReplyConfig,
    pub logging: LoggingConfig,
}

#[derive(Clone, Debug)]
pub struct AnthropicConfig {
    pub api_key: Option<SecretString>,
    pub base_url: String,
    pub model: String,
    pub timeout_secs: u64,
}

/// Host-level auto-reply defaults. Stands in for the external host-settings
/// lookup when running from the CLI.
#[derive(Clone, Debug)]
pub struct AutoReplyConfig {
    pub enabled: bool,
    pub business_hours_start: String,
    pub business_hours_end: String,
}

#[derive(Clone, Debug)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    Compact,
    Pretty,
    Json,
}

#[derive(Clone, Debug, Default)]
pub struct ConfigOverrides {
    pub api_key: Option<String>,
    pub model: Option<String>,
    pub auto_reply_enabled: Option<bool>,
    pub log_level: Option<String>,
}

#[derive(Clone, Debug, Default)]
pub struct LoadOptions {
    pub config_path: Option<PathBuf>,
    pub require_file: bool,
    pub overrides: ConfigOverrides,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file `{path}`: {source}")]
    ReadFile { path: PathBuf, source: std::io::Error },
    #[error("could not parse config file `{path}`: {source}")]
    ParseFile { path: PathBuf, source: toml::de::Error },
    #[error("required config file was not found: `{0}`")]
    MissingConfigFile(PathBuf),
    #[error("environment variable interpolation failed for `{var}`")]
    MissingEnvInterpolation { var: String },
    #[error("unterminated environment interpolation expression")]
    UnterminatedInterpolation,
    #[error("invalid environment override for `{key}`: `{value}`")]
    InvalidEnvOverride { key: String, value: String },
    #[error("configuration validation failed: {0}")]
    Validation(String),
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            anthropic: AnthropicConfig {
                api_key: None,
                base_url: DEFAULT_BASE_URL.to_string(),
                model: DEFAULT_MODEL.to_string(),
                timeout_secs: 60,
            },
            auto_reply: AutoReplyConfig {
                enabled: true,
                business_hours_start: "09:00".to_string(),
                business_hours_end: "21:00".to_string(),
            },
            logging: LoggingConfig { level: "info".to_string(), format: LogFormat::Compact },
        }
    }
}

impl AutoReplyConfig {
    pub fn as_host_settings(&self) -> HostAutoReplySettings {
        HostAutoReplySettings::new(
            self.enabled,
            self.business_hours_start.clone(),
            self.business_hours_end.clone(),
        )
    }
}

fn secret_value(value: String) -> SecretString {
    value.into()
}

impl std::str::FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "compact" => Ok(Self::Compact),
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(ConfigError::Validation(format!(
                "unsupported log format `{other}` (expected compact|pretty|json)"
            ))),
        }
    }
}

impl AppConfig {
    pub fn load(options: LoadOptions) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        let maybe_path = resolve_config_path(options.config_path.as_deref());

        if let Some(path) = maybe_path {
            let patch = read_patch(&path)?;
            config.apply_patch(patch);
        } else if options.require_file {
            let expected = options.config_path.unwrap_or_else(|| PathBuf::from("lana.toml"));
            return Err(ConfigError::MissingConfigFile(expected));
        }

        config.apply_env_overrides()?;
        config.apply_overrides(options.overrides);
        config.validate()?;

        Ok(config)
    }

    fn apply_patch(&mut self, patch: ConfigPatch) {
        if let Some(anthropic) = patch.anthropic {
            if let Some(api_key_value) = anthropic.api_key {
                self.anthropic.api_key = Some(secret_value(api_key_value));
            }
            if let Some(base_url) = anthropic.base_url {
                self.anthropic.base_url = base_url;
            }
            if let Some(model) = anthropic.model {
                self.anthropic.model = model;
            }
            if let Some(timeout_secs) = anthropic.timeout_secs {
                self.anthropic.timeout_secs = timeout_secs;
            }
        }

        if let Some(auto_reply) = patch.auto_reply {
            if let Some(enabled) = auto_reply.enabled {
                self.auto_reply.enabled = enabled;
            }
            if let Some(start) = auto_reply.business_hours_start {
                self.auto_reply.business_hours_start = start;
            }
            if let Some(end) = auto_reply.business_hours_end {
                self.auto_reply.business_hours_end = end;
            }
        }

        if let Some(logging) = patch.logging {
            if let Some(level) = logging.level {
                self.logging.level = level;
            }
            if let Some(format) = logging.format {
                self.logging.format = format;
            }
        }
    }

    fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        let api_key =
            read_env("LANA_ANTHROPIC_API_KEY").or_else(|| read_env("ANTHROPIC_API_KEY"));
        if let Some(value) = api_key {
            self.anthropic.api_key = Some(secret_value(value));
        }
        if let Some(value) = read_env("LANA_ANTHROPIC_BASE_URL") {
            self.anthropic.base_url = value;
        }
        if let Some(value) = read_env("LANA_ANTHROPIC_MODEL") {
            self.anthropic.model = value;
        }
        if let Some(value) = read_env("LANA_ANTHROPIC_TIMEOUT_SECS") {
            self.anthropic.timeout_secs = parse_u64("LANA_ANTHROPIC_TIMEOUT_SECS", &value)?;
        }

        if let Some(value) = read_env("LANA_AUTO_REPLY_ENABLED") {
            self.auto_reply.enabled = parse_bool("LANA_AUTO_REPLY_ENABLED", &value)?;
        }
        if let Some(value) = read_env("LANA_BUSINESS_HOURS_START") {
            self.auto_reply.business_hours_start = value;
        }
        if let Some(value) = read_env("LANA_BUSINESS_HOURS_END") {
            self.auto_reply.business_hours_end = value;
        }

        let log_level = read_env("LANA_LOGGING_LEVEL").or_else(|| read_env("LANA_LOG_LEVEL"));
        if let Some(value) = log_level {
            self.logging.level = value;
        }
        let log_format = read_env("LANA_LOGGING_FORMAT").or_else(|| read_env("LANA_LOG_FORMAT"));
        if let Some(value) = log_format {
            self.logging.format = value.parse()?;
        }

        Ok(())
    }

    fn apply_overrides(&mut self, overrides: ConfigOverrides) {
        if let Some(api_key) = overrides.api_key {
            self.anthropic.api_key = Some(secret_value(api_key));
        }
        if let Some(model) = overrides.model {
            self.anthropic.model = model;
        }
        if let Some(enabled) = overrides.auto_reply_enabled {
            self.auto_reply.enabled = enabled;
        }
        if let Some(log_level) = overrides.log_level {
            self.logging.level = log_level;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_anthropic(&self.anthropic)?;
        validate_auto_reply(&self.auto_reply)?;
        validate_logging(&self.logging)?;
        Ok(())
    }
}

fn resolve_config_path(explicit_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit_path {
        return path.exists().then_some(path.to_path_buf());
    }

    [PathBuf::from("lana.toml"), PathBuf::from("config/lana.toml")]
        .into_iter()
        .find(|path| path.exists())
}

fn read_patch(path: &Path) -> Result<ConfigPatch, ConfigError> {
    let raw = fs::read_to_string(path)
        .map_err(|source| ConfigError::ReadFile { path: path.to_path_buf(), source })?;

    let interpolated = interpolate_env_vars(&raw)?;
    toml::from_str::<ConfigPatch>(&interpolated)
        .map_err(|source| ConfigError::ParseFile { path: path.to_path_buf(), source })
}

fn interpolate_env_vars(input: &str) -> Result<String, ConfigError> {
    let mut output = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '$' && matches!(chars.peek(), Some('{')) {
            chars.next();
            let mut key = String::new();

            loop {
                match chars.next() {
                    Some('}') => break,
                    Some(next) => key.push(next),
                    None => return Err(ConfigError::UnterminatedInterpolation),
                }
            }

            let value = env::var(&key)
                .map_err(|_| ConfigError::MissingEnvInterpolation { var: key.clone() })?;
            output.push_str(&value);
            continue;
        }

        output.push(ch);
    }

    Ok(output)
}

fn validate_anthropic(anthropic: &AnthropicConfig) -> Result<(), ConfigError> {
    let missing = anthropic
        .api_key
        .as_ref()
        .map(|value| value.expose_secret().trim().is_empty())
        .unwrap_or(true);
    if missing {
        return Err(ConfigError::Validation(
            "anthropic.api_key is required. Set LANA_ANTHROPIC_API_KEY (or ANTHROPIC_API_KEY)"
                .to_string(),
        ));
    }

    if !anthropic.base_url.starts_with("http://") && !anthropic.base_url.starts_with("https://") {
        return Err(ConfigError::Validation(
            "anthropic.base_url must start with http:// or https://".to_string(),
        ));
    }

    if anthropic.model.trim().is_empty() {
        return Err(ConfigError::Validation("anthropic.model must not be empty".to_string()));
    }

    if anthropic.timeout_secs == 0 || anthropic.timeout_secs > 300 {
        return Err(ConfigError::Validation(
            "anthropic.timeout_secs must be in range 1..=300".to_string(),
        ));
    }

    Ok(())
}

fn validate_auto_reply(auto_reply: &AutoReplyConfig) -> Result<(), ConfigError> {
    auto_reply.as_host_settings().window().map_err(|error| {
        ConfigError::Validation(format!("auto_reply business hours are invalid: {error}"))
    })?;
    Ok(())
}

fn validate_logging(logging: &LoggingConfig) -> Result<(), ConfigError> {
    let level = logging.level.trim().to_ascii_lowercase();
    match level.as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => Ok(()),
        _ => Err(ConfigError::Validation(
            "logging.level must be one of trace|debug|info|warn|error".to_string(),
        )),
    }
}

fn read_env(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

fn parse_u64(key: &str, value: &str) -> Result<u64, ConfigError> {
    value.parse::<u64>().map_err(|_| ConfigError::InvalidEnvOverride {
        key: key.to_string(),
        value: value.to_string(),
    })
}

fn parse_bool(key: &str, value: &str) -> Result<bool, ConfigError> {
    value.parse::<bool>().map_err(|_| ConfigError::InvalidEnvOverride {
        key: key.to_string(),
        value: value.to_string(),
    })
}

#[derive(Debug, Default, Deserialize)]
struct ConfigPatch {
    anthropic: Option<AnthropicPatch>,
    auto_reply: Option<AutoReplyPatch>,
    logging: Option<LoggingPatch>,
}

#[derive(Debug, Default, Deserialize)]
struct AnthropicPatch {
    api_key: Option<String>,
    base_url: Option<String>,
    model: Option<String>,
    timeout_secs: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
struct AutoReplyPatch {
    enabled: Option<bool>,
    business_hours_start: Option<String>,
    business_hours_end: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct LoggingPatch {
    level: Option<String>,
    format: Option<LogFormat>,
}
