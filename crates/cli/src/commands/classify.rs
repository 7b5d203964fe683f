use std::sync::Arc;

use lana_agent::{AnthropicClient, IntentClassifier};
use lana_core::config::{AppConfig, LoadOptions};

use crate::commands::CommandResult;

pub fn run(message: &str) -> CommandResult {
    let config = match AppConfig::load(LoadOptions::default()) {
        Ok(config) => config,
        Err(error) => {
            return CommandResult::failure(
                "classify",
                "config_validation",
                format!("configuration issue: {error}"),
                2,
            );
        }
    };

    let client = match AnthropicClient::from_config(&config.anthropic) {
        Ok(client) => Arc::new(client),
        Err(error) => {
            return CommandResult::failure(
                "classify",
                "client_init",
                format!("failed to initialize completion client: {error}"),
                4,
            );
        }
    };

    let runtime = match tokio::runtime::Builder::new_current_thread().enable_all().build() {
        Ok(runtime) => runtime,
        Err(error) => {
            return CommandResult::failure(
                "classify",
                "runtime_init",
                format!("failed to initialize async runtime: {error}"),
                3,
            );
        }
    };

    let classifier = IntentClassifier::new(client, config.anthropic.model.clone());
    let intent = runtime.block_on(classifier.classify(message));

    let details = serde_json::to_value(&intent).ok();
    let summary = format!(
        "classified as {} ({} urgency){}",
        intent.category.as_str(),
        intent.urgency.as_str(),
        if intent.requires_host_attention { ", requires host attention" } else { "" },
    );
    CommandResult::success("classify", summary, details)
}
