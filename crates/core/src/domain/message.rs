use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

/// Classified purpose of an inbound guest message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IntentCategory {
    Question,
    Request,
    Complaint,
    Information,
    Greeting,
    Other,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    Low,
    Medium,
    High,
}

impl IntentCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Question => "question",
            Self::Request => "request",
            Self::Complaint => "complaint",
            Self::Information => "information",
            Self::Greeting => "greeting",
            Self::Other => "other",
        }
    }
}

impl Urgency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl std::str::FromStr for IntentCategory {
    type Err = DomainError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "question" => Ok(Self::Question),
            "request" => Ok(Self::Request),
            "complaint" => Ok(Self::Complaint),
            "information" => Ok(Self::Information),
            "greeting" => Ok(Self::Greeting),
            "other" => Ok(Self::Other),
            other => Err(DomainError::InvariantViolation(format!(
                "unknown intent category `{other}`"
            ))),
        }
    }
}

impl std::str::FromStr for Urgency {
    type Err = DomainError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            other => Err(DomainError::InvariantViolation(format!("unknown urgency `{other}`"))),
        }
    }
}

/// Structured classification of one inbound guest message.
///
/// Produced fresh per message and never persisted by this system. Immutable
/// once returned: downstream code reads it, nothing updates it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageIntent {
    pub category: IntentCategory,
    pub urgency: Urgency,
    pub requires_host_attention: bool,
    pub summary: String,
}

const FALLBACK_SUMMARY_CHARS: usize = 100;

impl MessageIntent {
    /// Fail-safe intent used whenever classification cannot be trusted.
    ///
    /// Marks the message as requiring host attention so an uncertain
    /// classification can never cause a silent auto-reply.
    pub fn conservative_fallback(message: &str) -> Self {
        Self {
            category: IntentCategory::Other,
            urgency: Urgency::Medium,
            requires_host_attention: true,
            summary: truncate_chars(message, FALLBACK_SUMMARY_CHARS),
        }
    }
}

/// Truncates to at most `limit` characters, respecting UTF-8 boundaries.
pub fn truncate_chars(text: &str, limit: usize) -> String {
    match text.char_indices().nth(limit) {
        Some((byte_index, _)) => text[..byte_index].to_string(),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::{truncate_chars, IntentCategory, MessageIntent, Urgency};

    #[test]
    fn categories_serialize_as_lowercase_wire_names() {
        let json = serde_json::to_string(&IntentCategory::Complaint).unwrap();
        assert_eq!(json, "\"complaint\"");
        let parsed: IntentCategory = serde_json::from_str("\"greeting\"").unwrap();
        assert_eq!(parsed, IntentCategory::Greeting);
    }

    #[test]
    fn urgency_parses_case_insensitively() {
        assert_eq!("HIGH".parse::<Urgency>().unwrap(), Urgency::High);
        assert_eq!(" medium ".parse::<Urgency>().unwrap(), Urgency::Medium);
        assert!("urgent".parse::<Urgency>().is_err());
    }

    #[test]
    fn fallback_is_conservative() {
        let intent = MessageIntent::conservative_fallback("where is the wifi password?");
        assert_eq!(intent.category, IntentCategory::Other);
        assert_eq!(intent.urgency, Urgency::Medium);
        assert!(intent.requires_host_attention);
        assert_eq!(intent.summary, "where is the wifi password?");
    }

    #[test]
    fn fallback_summary_caps_at_100_chars() {
        let message = "a".repeat(250);
        let intent = MessageIntent::conservative_fallback(&message);
        assert_eq!(intent.summary.chars().count(), 100);
    }

    #[test]
    fn truncation_respects_multibyte_boundaries() {
        let message = "é".repeat(150);
        let truncated = truncate_chars(&message, 100);
        assert_eq!(truncated.chars().count(), 100);
        assert!(truncated.chars().all(|c| c == 'é'));
    }

    #[test]
    fn intent_round_trips_through_json() {
        let intent = MessageIntent {
            category: IntentCategory::Question,
            urgency: Urgency::Low,
            requires_host_attention: false,
            summary: "guest asks about parking".to_string(),
        };
        let json = serde_json::to_string(&intent).unwrap();
        let parsed: MessageIntent = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, intent);
    }
}
