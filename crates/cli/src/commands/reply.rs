use std::sync::Arc;

use lana_agent::{AnthropicClient, AutoReplyPipeline};
use lana_core::config::{AppConfig, LoadOptions};
use lana_core::domain::context::AutoReplyContext;
use serde_json::json;

use crate::commands::CommandResult;
use crate::ReplyArgs;

pub fn run(args: &ReplyArgs) -> CommandResult {
    let config = match AppConfig::load(LoadOptions::default()) {
        Ok(config) => config,
        Err(error) => {
            return CommandResult::failure(
                "reply",
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
                "reply",
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
                "reply",
                "runtime_init",
                format!("failed to initialize async runtime: {error}"),
                3,
            );
        }
    };

    let context = AutoReplyContext {
        guest_name: args.guest_name.clone(),
        guest_message: args.message.clone(),
        property_name: args.property.clone(),
        check_in_date: args.check_in.clone(),
        check_out_date: args.check_out.clone(),
        conversation_history: Vec::new(),
        host_name: args.host_name.clone(),
    };
    let settings = config.auto_reply.as_host_settings();

    let pipeline = AutoReplyPipeline::new(client, config.anthropic.model.clone());
    let outcome = match runtime.block_on(pipeline.handle(&context, &settings)) {
        Ok(outcome) => outcome,
        Err(error) => {
            return CommandResult::failure(
                "reply",
                "reply_generation",
                format!("auto-reply generation failed: {error}"),
                5,
            );
        }
    };

    let details = json!({
        "correlation_id": outcome.correlation_id,
        "intent": outcome.intent,
        "auto_reply": outcome.decision.allows(),
        "reason_code": outcome.decision.reason_code(),
        "reply": outcome.reply,
    });
    let summary = match outcome.decision.reason_code() {
        None => "auto-reply generated".to_string(),
        Some(reason_code) => format!("deferred to host ({reason_code})"),
    };
    CommandResult::success("reply", summary, Some(details))
}
