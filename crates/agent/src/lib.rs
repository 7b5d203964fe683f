//! LLM-facing layer for Lana - classification, reply generation, and the
//! auto-reply pipeline.
//!
//! This crate is the only place that talks to the completion API:
//! - **Completion boundary** (`llm`, `anthropic`) - the `CompletionClient`
//!   trait and its Anthropic Messages API implementation
//! - **Intent Classifier** (`classifier`) - guest message → `MessageIntent`,
//!   degrading to a conservative fallback on any failure
//! - **Reply Generator** (`reply`) - context → guest-facing text, failing
//!   hard when the response cannot be trusted
//! - **Pipeline** (`pipeline`) - classify → gate → conditionally generate
//! - **Supplemental services** (`outreach`, `sentiment`, `activities`)
//!
//! # Error policy
//!
//! Two deliberate postures. Classification fails soft: an uncertain
//! classification becomes "route to the host", never an error. Generation
//! fails hard: there is no safe default free-text reply, so the caller
//! decides what to do. No retries anywhere; every upstream call is a single
//! attempt.

pub mod activities;
pub mod anthropic;
pub mod classifier;
pub mod error;
pub mod llm;
pub mod outreach;
pub mod pipeline;
pub mod reply;
pub mod sentiment;

#[cfg(test)]
pub(crate) mod testing;

pub use activities::{ActivityRecommendation, ActivityRecommender};
pub use anthropic::AnthropicClient;
pub use classifier::IntentClassifier;
pub use error::AgentError;
pub use llm::{
    ChatMessage, ChatRole, CompletionClient, CompletionRequest, CompletionResponse, ContentBlock,
    LlmError,
};
pub use outreach::{MessageDraftRequest, OutreachDrafter};
pub use pipeline::{AutoReplyPipeline, PipelineOutcome};
pub use reply::ReplyGenerator;
pub use sentiment::{Sentiment, SentimentAnalyzer, SentimentReport};
