//! Scripted completion client for tests. No network anywhere in the test
//! suite; every expected upstream exchange is queued ahead of time.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::llm::{
    CompletionClient, CompletionRequest, CompletionResponse, ContentBlock, LlmError,
};

pub(crate) struct ScriptedClient {
    script: Mutex<VecDeque<Result<CompletionResponse, LlmError>>>,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl ScriptedClient {
    pub(crate) fn new(script: Vec<Result<CompletionResponse, LlmError>>) -> Self {
        Self { script: Mutex::new(script.into()), requests: Mutex::new(Vec::new()) }
    }

    pub(crate) fn with_text(text: &str) -> Self {
        Self::new(vec![Ok(text_response(text))])
    }

    pub(crate) fn recorded_requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().expect("request log poisoned").clone()
    }
}

pub(crate) fn text_response(text: &str) -> CompletionResponse {
    CompletionResponse { content: vec![ContentBlock::Text { text: text.to_string() }] }
}

pub(crate) fn non_text_response() -> CompletionResponse {
    CompletionResponse { content: vec![ContentBlock::Unsupported] }
}

#[async_trait]
impl CompletionClient for ScriptedClient {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, LlmError> {
        self.requests.lock().expect("request log poisoned").push(request);
        self.script
            .lock()
            .expect("script poisoned")
            .pop_front()
            .unwrap_or_else(|| Err(LlmError::Transport("scripted client exhausted".to_string())))
    }
}
