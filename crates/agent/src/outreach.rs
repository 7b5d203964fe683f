//! Proactive guest outreach drafting - stage-appropriate messages (booking
//! confirmation, pre-arrival, check-in day, mid-stay, checkout) composed for
//! host review before sending. Fails hard like the reply generator: a
//! guessed message is worse than no draft.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::AgentError;
use crate::llm::{ChatMessage, CompletionClient, CompletionRequest};

const DRAFT_MAX_TOKENS: u32 = 1024;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageDraftRequest {
    pub guest_name: String,
    pub guest_type: String,
    pub communication_stage: String,
    pub tone: String,
    pub special_context: Option<String>,
}

pub struct OutreachDrafter {
    client: Arc<dyn CompletionClient>,
    model: String,
}

impl OutreachDrafter {
    pub fn new(client: Arc<dyn CompletionClient>, model: impl Into<String>) -> Self {
        Self { client, model: model.into() }
    }

    pub async fn draft(&self, request: &MessageDraftRequest) -> Result<String, AgentError> {
        let completion = CompletionRequest {
            model: self.model.clone(),
            max_tokens: DRAFT_MAX_TOKENS,
            system: Some(DRAFT_SYSTEM_PROMPT.to_string()),
            messages: vec![ChatMessage::user(draft_prompt(request))],
        };

        let response = self.client.complete(completion).await?;
        response
            .first_text()
            .map(str::to_string)
            .ok_or(AgentError::UnexpectedResponseShape)
    }
}

const DRAFT_SYSTEM_PROMPT: &str =
    "You are an expert Airbnb host assistant specializing in creating personalized guest \
     messages that consistently result in 5-star reviews. Your messages should be:\n\
     - Warm, professional, and genuinely helpful\n\
     - Personalized based on guest type and context\n\
     - Proactive in addressing potential needs\n\
     - Include specific, actionable recommendations\n\
     - Maintain the specified tone throughout\n\
     - End with an invitation for questions or assistance\n\n\
     Always address the guest by name and make them feel welcomed and valued.";

fn draft_prompt(request: &MessageDraftRequest) -> String {
    let mut prompt = format!(
        "Create a {stage} message for {name}, a {guest_type} guest.\nUse a {tone} tone.\n",
        stage = request.communication_stage,
        name = request.guest_name,
        guest_type = request.guest_type,
        tone = request.tone,
    );
    if let Some(special_context) = &request.special_context {
        prompt.push_str(&format!("Additional context: {special_context}\n"));
    }
    prompt.push_str(&format!(
        "\nThe message should be appropriate for the {stage} stage of their stay and include \
         relevant information, recommendations, or assistance based on their guest type.\n\n\
         Keep the message concise but comprehensive, around 2-3 paragraphs.",
        stage = request.communication_stage,
    ));
    prompt
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::{MessageDraftRequest, OutreachDrafter};
    use crate::error::AgentError;
    use crate::testing::{non_text_response, ScriptedClient};

    fn request() -> MessageDraftRequest {
        MessageDraftRequest {
            guest_name: "Ben".to_string(),
            guest_type: "family".to_string(),
            communication_stage: "pre-arrival".to_string(),
            tone: "friendly".to_string(),
            special_context: Some("traveling with a toddler".to_string()),
        }
    }

    #[tokio::test]
    async fn draft_returns_generated_text() {
        let client = Arc::new(ScriptedClient::with_text("Hi Ben! We can't wait to host you."));
        let drafter = OutreachDrafter::new(client.clone(), "test-model");

        let draft = drafter.draft(&request()).await.unwrap();
        assert_eq!(draft, "Hi Ben! We can't wait to host you.");

        let requests = client.recorded_requests();
        let prompt = &requests[0].messages[0].content;
        assert!(prompt.contains("pre-arrival message for Ben"));
        assert!(prompt.contains("family guest"));
        assert!(prompt.contains("friendly tone"));
        assert!(prompt.contains("traveling with a toddler"));
        assert!(requests[0].system.as_deref().unwrap_or_default().contains("5-star reviews"));
    }

    #[tokio::test]
    async fn special_context_is_optional() {
        let client = Arc::new(ScriptedClient::with_text("draft"));
        let drafter = OutreachDrafter::new(client.clone(), "test-model");

        let mut no_context = request();
        no_context.special_context = None;
        drafter.draft(&no_context).await.unwrap();

        let requests = client.recorded_requests();
        assert!(!requests[0].messages[0].content.contains("Additional context"));
    }

    #[tokio::test]
    async fn non_text_response_is_a_hard_error() {
        let client = Arc::new(ScriptedClient::new(vec![Ok(non_text_response())]));
        let drafter = OutreachDrafter::new(client, "test-model");

        let error = drafter.draft(&request()).await.err().unwrap();
        assert!(matches!(error, AgentError::UnexpectedResponseShape));
    }
}
