use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConversationRole {
    User,
    Assistant,
}

/// One prior turn in a guest conversation thread, oldest first.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationTurn {
    pub role: ConversationRole,
    pub content: String,
}

/// Read-only input for generating one auto-reply.
///
/// Constructed by the caller per request; the optional fields shape the
/// system prompt, the history is replayed in original chronological order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutoReplyContext {
    pub guest_name: String,
    pub guest_message: String,
    pub property_name: Option<String>,
    pub check_in_date: Option<String>,
    pub check_out_date: Option<String>,
    #[serde(default)]
    pub conversation_history: Vec<ConversationTurn>,
    pub host_name: Option<String>,
}

impl AutoReplyContext {
    pub fn new(guest_name: impl Into<String>, guest_message: impl Into<String>) -> Self {
        Self {
            guest_name: guest_name.into(),
            guest_message: guest_message.into(),
            ..Self::default()
        }
    }
}
