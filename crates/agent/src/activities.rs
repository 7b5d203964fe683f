//! Local activity recommendations for guests. Fails soft: recommendations
//! are decorative, so any upstream or parse failure yields an empty list
//! rather than an error.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::classifier::strip_code_fences;
use crate::llm::{ChatMessage, CompletionClient, CompletionRequest};

const RECOMMEND_MAX_TOKENS: u32 = 2000;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityRecommendation {
    pub title: String,
    pub description: String,
    pub category: String,
}

pub struct ActivityRecommender {
    client: Arc<dyn CompletionClient>,
    model: String,
}

impl ActivityRecommender {
    pub fn new(client: Arc<dyn CompletionClient>, model: impl Into<String>) -> Self {
        Self { client, model: model.into() }
    }

    pub async fn recommend(
        &self,
        location: &str,
        guest_preferences: Option<&str>,
    ) -> Vec<ActivityRecommendation> {
        let request = CompletionRequest {
            model: self.model.clone(),
            max_tokens: RECOMMEND_MAX_TOKENS,
            system: None,
            messages: vec![ChatMessage::user(recommendation_prompt(location, guest_preferences))],
        };

        let response = match self.client.complete(request).await {
            Ok(response) => response,
            Err(error) => {
                warn!(
                    event_name = "agent.activities.degraded",
                    error = %error,
                    "activity recommendations unavailable; returning empty list"
                );
                return Vec::new();
            }
        };

        let Some(text) = response.first_text() else {
            warn!(
                event_name = "agent.activities.degraded",
                reason = "non_text_response",
                "activity recommendations unavailable; returning empty list"
            );
            return Vec::new();
        };

        match serde_json::from_str::<Vec<ActivityRecommendation>>(strip_code_fences(text)) {
            Ok(activities) => activities,
            Err(error) => {
                warn!(
                    event_name = "agent.activities.degraded",
                    error = %error,
                    "activity payload unparsable; returning empty list"
                );
                Vec::new()
            }
        }
    }
}

fn recommendation_prompt(location: &str, guest_preferences: Option<&str>) -> String {
    let mut prompt =
        format!("Generate 6 activity recommendations for guests staying in {location}.\n");
    if let Some(preferences) = guest_preferences {
        prompt.push_str(&format!("Guest preferences: {preferences}\n"));
    }
    prompt.push_str(
        "\nProvide diverse activities including:\n\
         - Local attractions\n\
         - Restaurants/dining\n\
         - Outdoor activities\n\
         - Cultural experiences\n\
         - Hidden gems\n\n\
         Return a JSON array with objects containing: title, description (2-3 sentences), \
         category.\n\n\
         Respond with ONLY the JSON array, no other text.",
    );
    prompt
}
