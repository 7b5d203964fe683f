//! Intent Classifier - guest message text → structured [`MessageIntent`].
//!
//! Infallible by contract: any API failure, unexpected response shape, or
//! unparsable payload degrades to the conservative fallback intent, which
//! routes the message to the host. Classification failure must never block
//! the pipeline.

use std::sync::Arc;

use tracing::warn;

use lana_core::domain::message::{truncate_chars, MessageIntent};

use crate::llm::{ChatMessage, CompletionClient, CompletionRequest};

const CLASSIFY_MAX_TOKENS: u32 = 500;
const SUMMARY_FALLBACK_CHARS: usize = 100;

pub struct IntentClassifier {
    client: Arc<dyn CompletionClient>,
    model: String,
}

impl IntentClassifier {
    pub fn new(client: Arc<dyn CompletionClient>, model: impl Into<String>) -> Self {
        Self { client, model: model.into() }
    }

    /// Classifies one guest message. Single upstream attempt; every failure
    /// path returns [`MessageIntent::conservative_fallback`].
    pub async fn classify(&self, message: &str) -> MessageIntent {
        let request = CompletionRequest {
            model: self.model.clone(),
            max_tokens: CLASSIFY_MAX_TOKENS,
            system: None,
            messages: vec![ChatMessage::user(classification_prompt(message))],
        };

        let response = match self.client.complete(request).await {
            Ok(response) => response,
            Err(error) => {
                warn!(
                    event_name = "agent.classify.fallback",
                    reason = "completion_failed",
                    error = %error,
                    "intent classification degraded to conservative fallback"
                );
                return MessageIntent::conservative_fallback(message);
            }
        };

        let Some(text) = response.first_text() else {
            warn!(
                event_name = "agent.classify.fallback",
                reason = "non_text_response",
                "intent classification degraded to conservative fallback"
            );
            return MessageIntent::conservative_fallback(message);
        };

        match parse_intent(text, message) {
            Some(intent) => intent,
            None => {
                warn!(
                    event_name = "agent.classify.fallback",
                    reason = "unparsable_payload",
                    "intent classification degraded to conservative fallback"
                );
                MessageIntent::conservative_fallback(message)
            }
        }
    }
}

fn classification_prompt(message: &str) -> String {
    format!(
        "Analyze this guest message and classify it. Return a JSON object with:\n\
         - category: one of [question, request, complaint, information, greeting, other]\n\
         - urgency: one of [low, medium, high]\n\
         - requiresHostAttention: boolean (true if host should personally respond)\n\
         - summary: brief one-sentence summary\n\n\
         Guest message: \"{message}\"\n\n\
         Respond with ONLY the JSON object, no other text."
    )
}

/// Parses the classifier payload with per-field tolerance: each field falls
/// back individually when missing or outside its allowed values. Returns
/// `None` only when the payload is not a JSON object at all.
fn parse_intent(text: &str, original_message: &str) -> Option<MessageIntent> {
    let payload = strip_code_fences(text);
    let value: serde_json::Value = serde_json::from_str(payload).ok()?;
    let object = value.as_object()?;

    let category = object
        .get("category")
        .and_then(|field| field.as_str())
        .and_then(|raw| raw.parse().ok())
        .unwrap_or(lana_core::IntentCategory::Other);
    let urgency = object
        .get("urgency")
        .and_then(|field| field.as_str())
        .and_then(|raw| raw.parse().ok())
        .unwrap_or(lana_core::Urgency::Medium);
    let requires_host_attention =
        object.get("requiresHostAttention").and_then(|field| field.as_bool()).unwrap_or(false);
    let summary = object
        .get("summary")
        .and_then(|field| field.as_str())
        .filter(|raw| !raw.trim().is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| truncate_chars(original_message, SUMMARY_FALLBACK_CHARS));

    Some(MessageIntent { category, urgency, requires_host_attention, summary })
}

/// Models frequently wrap JSON in markdown code fences; strip them before
/// parsing.
pub(crate) fn strip_code_fences(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    let rest = rest.strip_suffix("```").unwrap_or(rest);
    rest.trim()
}
