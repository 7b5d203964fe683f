//! Guest feedback sentiment analysis. Hard-failing: a misread sentiment
//! feeds host-facing insights, so an unparsable payload is an error rather
//! than a guess.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::classifier::strip_code_fences;
use crate::error::AgentError;
use crate::llm::{ChatMessage, CompletionClient, CompletionRequest};

const SENTIMENT_MAX_TOKENS: u32 = 1024;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

impl std::str::FromStr for Sentiment {
    type Err = ();

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "positive" => Ok(Self::Positive),
            "negative" => Ok(Self::Negative),
            "neutral" => Ok(Self::Neutral),
            _ => Err(()),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SentimentReport {
    pub sentiment: Sentiment,
    /// Model confidence clamped to `[0, 1]`.
    pub confidence: f32,
}

pub struct SentimentAnalyzer {
    client: Arc<dyn CompletionClient>,
    model: String,
}

const SENTIMENT_SYSTEM_PROMPT: &str =
    "You're a Customer Insights AI. Analyze guest feedback and output in JSON format with keys: \
     \"sentiment\" (positive/negative/neutral) and \"confidence\" (number, 0 through 1).";

impl SentimentAnalyzer {
    pub fn new(client: Arc<dyn CompletionClient>, model: impl Into<String>) -> Self {
        Self { client, model: model.into() }
    }

    pub async fn analyze(&self, message: &str) -> Result<SentimentReport, AgentError> {
        let request = CompletionRequest {
            model: self.model.clone(),
            max_tokens: SENTIMENT_MAX_TOKENS,
            system: Some(SENTIMENT_SYSTEM_PROMPT.to_string()),
            messages: vec![ChatMessage::user(message)],
        };

        let response = self.client.complete(request).await?;
        let text = response.first_text().ok_or(AgentError::UnexpectedResponseShape)?;
        parse_report(text)
    }
}

fn parse_report(text: &str) -> Result<SentimentReport, AgentError> {
    let payload = strip_code_fences(text);
    let value: serde_json::Value =
        serde_json::from_str(payload).map_err(|error| AgentError::MalformedPayload {
            detail: format!("sentiment payload is not JSON: {error}"),
        })?;

    let sentiment = value
        .get("sentiment")
        .and_then(|field| field.as_str())
        .and_then(|raw| raw.parse::<Sentiment>().ok())
        .ok_or_else(|| AgentError::MalformedPayload {
            detail: "sentiment field is missing or not positive/negative/neutral".to_string(),
        })?;

    let confidence = value
        .get("confidence")
        .and_then(|field| field.as_f64())
        .ok_or_else(|| AgentError::MalformedPayload {
            detail: "confidence field is missing or not a number".to_string(),
        })?;

    Ok(SentimentReport { sentiment, confidence: (confidence as f32).clamp(0.0, 1.0) })
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::{parse_report, Sentiment, SentimentAnalyzer};
    use crate::error::AgentError;
    use crate::testing::{non_text_response, ScriptedClient};

    #[tokio::test]
    async fn well_formed_report_is_returned() {
        let client = Arc::new(ScriptedClient::with_text(
            r#"{"sentiment":"positive","confidence":0.92}"#,
        ));
        let analyzer = SentimentAnalyzer::new(client, "test-model");

        let report = analyzer.analyze("We had a wonderful stay!").await.unwrap();
        assert_eq!(report.sentiment, Sentiment::Positive);
        assert!((report.confidence - 0.92).abs() < f32::EPSILON);
    }

    #[test]
    fn confidence_is_clamped_into_unit_interval() {
        let report = parse_report(r#"{"sentiment":"negative","confidence":3.5}"#).unwrap();
        assert_eq!(report.confidence, 1.0);

        let report = parse_report(r#"{"sentiment":"neutral","confidence":-0.2}"#).unwrap();
        assert_eq!(report.confidence, 0.0);
    }

    #[test]
    fn unknown_sentiment_is_a_hard_error() {
        let error = parse_report(r#"{"sentiment":"ecstatic","confidence":0.9}"#).err().unwrap();
        assert!(matches!(error, AgentError::MalformedPayload { .. }));
    }

    #[test]
    fn missing_confidence_is_a_hard_error() {
        let error = parse_report(r#"{"sentiment":"positive"}"#).err().unwrap();
        assert!(matches!(error, AgentError::MalformedPayload { .. }));
    }

    #[tokio::test]
    async fn non_text_response_is_a_hard_error() {
        let client = Arc::new(ScriptedClient::new(vec![Ok(non_text_response())]));
        let analyzer = SentimentAnalyzer::new(client, "test-model");

        let error = analyzer.analyze("meh").await.err().unwrap();
        assert!(matches!(error, AgentError::UnexpectedResponseShape));
    }
}
