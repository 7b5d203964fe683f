use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use lana_core::domain::context::{ConversationRole, ConversationTurn};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

impl From<ConversationRole> for ChatRole {
    fn from(role: ConversationRole) -> Self {
        match role {
            ConversationRole::User => Self::User,
            ConversationRole::Assistant => Self::Assistant,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self { role: ChatRole::User, content: content.into() }
    }

    pub fn from_turn(turn: &ConversationTurn) -> Self {
        Self { role: turn.role.into(), content: turn.content.clone() }
    }
}

/// One completion call against the Messages API.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CompletionRequest {
    pub model: String,
    pub max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,
    pub messages: Vec<ChatMessage>,
}

/// Response content block. Only text blocks carry a usable payload; unknown
/// block types deserialize without failing the whole response.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentBlock {
    Text { text: String },
    #[serde(other)]
    Unsupported,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct CompletionResponse {
    #[serde(default)]
    pub content: Vec<ContentBlock>,
}

impl CompletionResponse {
    /// Text of the first content block, if that block is text-typed.
    ///
    /// The wire contract expects the text payload in the first block; a
    /// first block of any other type means the response shape cannot be
    /// trusted, so later text blocks are deliberately not consulted.
    pub fn first_text(&self) -> Option<&str> {
        match self.content.first() {
            Some(ContentBlock::Text { text }) => Some(text.as_str()),
            _ => None,
        }
    }
}

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("completion client misconfigured: {0}")]
    Misconfigured(String),
    #[error("completion transport failed: {0}")]
    Transport(String),
    #[error("completion API returned status {status}: {body}")]
    Api { status: u16, body: String },
    #[error("completion response could not be decoded: {0}")]
    Decode(String),
}

/// Stateless handle to the completion API. Implementations must be safe to
/// share across concurrent invocations; the services hold it behind an
/// `Arc<dyn CompletionClient>` so tests can inject scripted fakes.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, LlmError>;
}
