use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use lana_core::config::{AppConfig, LoadOptions};
use secrecy::ExposeSecret;
use toml::Value;

pub fn run() -> String {
    let config = match AppConfig::load(LoadOptions::default()) {
        Ok(config) => config,
        Err(error) => return format!("config validation failed: {error}"),
    };

    let config_file_path = detect_config_path();
    let config_file_doc = load_config_file_doc(config_file_path.as_deref());

    let mut lines = vec!["effective config (source precedence: env > file > default):".to_string()];

    let api_key = config
        .anthropic
        .api_key
        .as_ref()
        .map(|key| redact_key(key.expose_secret()))
        .unwrap_or_else(|| "<unset>".to_string());
    lines.push(render_line(
        "anthropic.api_key",
        &api_key,
        api_key_source(config_file_doc.as_ref(), config_file_path.as_deref()),
    ));
    lines.push(render_line(
        "anthropic.base_url",
        &config.anthropic.base_url,
        field_source(
            "anthropic.base_url",
            Some("LANA_ANTHROPIC_BASE_URL"),
            config_file_doc.as_ref(),
            config_file_path.as_deref(),
        ),
    ));
    lines.push(render_line(
        "anthropic.model",
        &config.anthropic.model,
        field_source(
            "anthropic.model",
            Some("LANA_ANTHROPIC_MODEL"),
            config_file_doc.as_ref(),
            config_file_path.as_deref(),
        ),
    ));
    lines.push(render_line(
        "anthropic.timeout_secs",
        &config.anthropic.timeout_secs.to_string(),
        field_source(
            "anthropic.timeout_secs",
            Some("LANA_ANTHROPIC_TIMEOUT_SECS"),
            config_file_doc.as_ref(),
            config_file_path.as_deref(),
        ),
    ));

    lines.push(render_line(
        "auto_reply.enabled",
        &config.auto_reply.enabled.to_string(),
        field_source(
            "auto_reply.enabled",
            Some("LANA_AUTO_REPLY_ENABLED"),
            config_file_doc.as_ref(),
            config_file_path.as_deref(),
        ),
    ));
    lines.push(render_line(
        "auto_reply.business_hours_start",
        &config.auto_reply.business_hours_start,
        field_source(
            "auto_reply.business_hours_start",
            Some("LANA_BUSINESS_HOURS_START"),
            config_file_doc.as_ref(),
            config_file_path.as_deref(),
        ),
    ));
    lines.push(render_line(
        "auto_reply.business_hours_end",
        &config.auto_reply.business_hours_end,
        field_source(
            "auto_reply.business_hours_end",
            Some("LANA_BUSINESS_HOURS_END"),
            config_file_doc.as_ref(),
            config_file_path.as_deref(),
        ),
    ));

    lines.push(render_line(
        "logging.level",
        &config.logging.level,
        field_source(
            "logging.level",
            Some("LANA_LOGGING_LEVEL"),
            config_file_doc.as_ref(),
            config_file_path.as_deref(),
        ),
    ));
    lines.push(render_line(
        "logging.format",
        &format!("{:?}", config.logging.format),
        field_source(
            "logging.format",
            Some("LANA_LOGGING_FORMAT"),
            config_file_doc.as_ref(),
            config_file_path.as_deref(),
        ),
    ));

    lines.join("\n")
}

fn detect_config_path() -> Option<PathBuf> {
    let root = PathBuf::from("lana.toml");
    if root.exists() {
        return Some(root);
    }

    let nested = PathBuf::from("config/lana.toml");
    if nested.exists() {
        return Some(nested);
    }

    None
}

fn load_config_file_doc(path: Option<&Path>) -> Option<Value> {
    let path = path?;
    let raw = fs::read_to_string(path).ok()?;
    raw.parse::<Value>().ok()
}

// The api key accepts two env names, so it cannot go through `field_source`.
fn api_key_source(config_file_doc: Option<&Value>, config_file_path: Option<&Path>) -> String {
    if env::var_os("LANA_ANTHROPIC_API_KEY").is_some() {
        return "env (LANA_ANTHROPIC_API_KEY)".to_string();
    }
    if env::var_os("ANTHROPIC_API_KEY").is_some() {
        return "env (ANTHROPIC_API_KEY)".to_string();
    }
    field_source("anthropic.api_key", None, config_file_doc, config_file_path)
}

fn field_source(
    key_path: &str,
    env_key: Option<&str>,
    config_file_doc: Option<&Value>,
    config_file_path: Option<&Path>,
) -> String {
    if let Some(env_key) = env_key {
        if env::var_os(env_key).is_some() {
            return format!("env ({env_key})");
        }
    }

    if let Some(doc) = config_file_doc {
        if contains_path(doc, key_path) {
            let file_path = config_file_path
                .map(|path| path.display().to_string())
                .unwrap_or_else(|| "config file".to_string());
            return format!("file ({file_path})");
        }
    }

    "default".to_string()
}

fn contains_path(root: &Value, key_path: &str) -> bool {
    let mut current = root;
    for key in key_path.split('.') {
        let Some(next) = current.get(key) else {
            return false;
        };
        current = next;
    }
    true
}

fn render_line(key: &str, value: &str, source: String) -> String {
    format!("- {key} = {value} (source: {source})")
}

fn redact_key(key: &str) -> String {
    let trimmed = key.trim();
    if trimmed.is_empty() {
        return "<empty>".to_string();
    }

    if trimmed.starts_with("sk-ant-") {
        return "sk-ant-***".to_string();
    }

    "<redacted>".to_string()
}
