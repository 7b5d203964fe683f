use thiserror::Error;

use crate::llm::LlmError;

/// Failures surfaced by the hard-failing services (reply generation,
/// outreach drafting, sentiment analysis). The intent classifier never
/// returns these; it degrades to a fallback intent instead.
#[derive(Debug, Error)]
pub enum AgentError {
    #[error(transparent)]
    Llm(#[from] LlmError),
    #[error("unexpected completion response shape: first content block is not text")]
    UnexpectedResponseShape,
    #[error("completion payload could not be parsed: {detail}")]
    MalformedPayload { detail: String },
}
