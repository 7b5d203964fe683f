//! Reply Generator - [`AutoReplyContext`] → guest-facing reply text.
//!
//! Fails hard: there is no safe default free-text reply, so any upstream
//! failure or untrusted response shape surfaces as an [`AgentError`] and the
//! caller decides whether to retry, log, or route to a human.

use std::sync::Arc;

use lana_core::domain::context::AutoReplyContext;

use crate::error::AgentError;
use crate::llm::{ChatMessage, CompletionClient, CompletionRequest};

const REPLY_MAX_TOKENS: u32 = 1000;

pub struct ReplyGenerator {
    client: Arc<dyn CompletionClient>,
    model: String,
}

impl ReplyGenerator {
    pub fn new(client: Arc<dyn CompletionClient>, model: impl Into<String>) -> Self {
        Self { client, model: model.into() }
    }

    /// Generates one reply. Prior turns are replayed in original
    /// chronological order; the guest message is the final user turn.
    pub async fn generate(&self, context: &AutoReplyContext) -> Result<String, AgentError> {
        let mut messages: Vec<ChatMessage> =
            context.conversation_history.iter().map(ChatMessage::from_turn).collect();
        messages.push(ChatMessage::user(context.guest_message.clone()));

        let request = CompletionRequest {
            model: self.model.clone(),
            max_tokens: REPLY_MAX_TOKENS,
            system: Some(build_system_prompt(context)),
            messages,
        };

        let response = self.client.complete(request).await?;
        response
            .first_text()
            .map(str::to_string)
            .ok_or(AgentError::UnexpectedResponseShape)
    }
}

pub(crate) fn build_system_prompt(context: &AutoReplyContext) -> String {
    let mut prompt = String::from(
        "You are an AI assistant helping manage Airbnb guest communications.\n\n\
         Your role:\n\
         - Respond warmly and professionally to guest messages\n\
         - Provide helpful information about the property and local area\n\
         - Answer common questions about check-in, WiFi, amenities, etc.\n\
         - Be concise but friendly\n\
         - Use the guest's name when appropriate\n",
    );

    match &context.host_name {
        Some(host_name) => {
            prompt.push_str(&format!("- Sign off as {host_name}\n"));
        }
        None => {
            prompt.push_str("- Sign off as the host or property manager\n");
        }
    }

    prompt.push_str(&format!("\nGuest context:\nGuest name: {}\n", context.guest_name));
    if let Some(property_name) = &context.property_name {
        prompt.push_str(&format!("Property: {property_name}\n"));
    }
    if let Some(check_in_date) = &context.check_in_date {
        prompt.push_str(&format!("Check-in: {check_in_date}\n"));
    }
    if let Some(check_out_date) = &context.check_out_date {
        prompt.push_str(&format!("Check-out: {check_out_date}\n"));
    }

    prompt.push_str(
        "\nGuidelines:\n\
         - For urgent issues (emergencies, major problems), suggest they call the host directly\n\
         - For maintenance issues, acknowledge and say the host will address it\n\
         - For local recommendations, be specific and helpful\n\
         - Keep responses under 150 words unless more detail is clearly needed",
    );

    prompt
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use lana_core::domain::context::{AutoReplyContext, ConversationRole, ConversationTurn};

    use super::{build_system_prompt, ReplyGenerator};
    use crate::error::AgentError;
    use crate::llm::{ChatRole, LlmError};
    use crate::testing::{non_text_response, ScriptedClient};

    fn context_with_history() -> AutoReplyContext {
        AutoReplyContext {
            guest_name: "Maya".to_string(),
            guest_message: "What time is checkout?".to_string(),
            property_name: Some("Seaside Cottage".to_string()),
            check_in_date: Some("2026-09-01".to_string()),
            check_out_date: Some("2026-09-05".to_string()),
            conversation_history: vec![
                ConversationTurn {
                    role: ConversationRole::User,
                    content: "Hi, we just arrived!".to_string(),
                },
                ConversationTurn {
                    role: ConversationRole::Assistant,
                    content: "Welcome to Seaside Cottage!".to_string(),
                },
            ],
            host_name: Some("Dana".to_string()),
        }
    }

    #[tokio::test]
    async fn returns_first_text_block_verbatim() {
        let client = Arc::new(ScriptedClient::with_text("Checkout is at 11am. Safe travels!"));
        let generator = ReplyGenerator::new(client.clone(), "test-model");

        let reply = generator.generate(&context_with_history()).await.unwrap();
        assert_eq!(reply, "Checkout is at 11am. Safe travels!");
    }

    #[tokio::test]
    async fn history_precedes_current_message_in_order() {
        let client = Arc::new(ScriptedClient::with_text("ok"));
        let generator = ReplyGenerator::new(client.clone(), "test-model");
        generator.generate(&context_with_history()).await.unwrap();

        let requests = client.recorded_requests();
        let messages = &requests[0].messages;
        assert_eq!(messages.len(), 3);
        assert_eq!(messages[0].content, "Hi, we just arrived!");
        assert_eq!(messages[0].role, ChatRole::User);
        assert_eq!(messages[1].content, "Welcome to Seaside Cottage!");
        assert_eq!(messages[1].role, ChatRole::Assistant);
        assert_eq!(messages[2].content, "What time is checkout?");
        assert_eq!(messages[2].role, ChatRole::User);
        assert_eq!(requests[0].max_tokens, 1000);
    }

    #[tokio::test]
    async fn non_text_first_block_is_a_hard_error() {
        let client = Arc::new(ScriptedClient::new(vec![Ok(non_text_response())]));
        let generator = ReplyGenerator::new(client, "test-model");

        let error = generator.generate(&context_with_history()).await.err().unwrap();
        assert!(matches!(error, AgentError::UnexpectedResponseShape));
    }

    #[tokio::test]
    async fn transport_failure_propagates() {
        let client = Arc::new(ScriptedClient::new(vec![Err(LlmError::Transport(
            "timed out".to_string(),
        ))]));
        let generator = ReplyGenerator::new(client, "test-model");

        let error = generator.generate(&context_with_history()).await.err().unwrap();
        assert!(matches!(error, AgentError::Llm(LlmError::Transport(_))));
    }

    #[test]
    fn system_prompt_embeds_available_context() {
        let prompt = build_system_prompt(&context_with_history());
        assert!(prompt.contains("Guest name: Maya"));
        assert!(prompt.contains("Property: Seaside Cottage"));
        assert!(prompt.contains("Check-in: 2026-09-01"));
        assert!(prompt.contains("Check-out: 2026-09-05"));
        assert!(prompt.contains("Sign off as Dana"));
        assert!(prompt.contains("under 150 words"));
    }

    #[test]
    fn system_prompt_omits_absent_context_lines() {
        let context = AutoReplyContext::new("Ben", "hello");
        let prompt = build_system_prompt(&context);
        assert!(!prompt.contains("Property:"));
        assert!(!prompt.contains("Check-in:"));
        assert!(!prompt.contains("Check-out:"));
        assert!(prompt.contains("Sign off as the host or property manager"));
    }
}
