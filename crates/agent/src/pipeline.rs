//! Auto-reply pipeline: classify → gate → conditionally generate.
//!
//! Stateless across invocations; concurrent guest messages share only the
//! completion client handle.

use std::sync::Arc;

use chrono::Timelike;
use tracing::{info, warn};
use uuid::Uuid;

use lana_core::domain::context::AutoReplyContext;
use lana_core::domain::message::MessageIntent;
use lana_core::domain::settings::HostAutoReplySettings;
use lana_core::gate::{self, GateDecision};

use crate::classifier::IntentClassifier;
use crate::error::AgentError;
use crate::llm::CompletionClient;
use crate::reply::ReplyGenerator;

pub struct AutoReplyPipeline {
    classifier: IntentClassifier,
    generator: ReplyGenerator,
}

/// Result of handling one inbound guest message. A deferred gate is a
/// successful outcome with `reply: None`; the reason code says why the
/// message went to the host instead.
#[derive(Clone, Debug)]
pub struct PipelineOutcome {
    pub correlation_id: String,
    pub intent: MessageIntent,
    pub decision: GateDecision,
    pub reply: Option<String>,
}

impl AutoReplyPipeline {
    pub fn new(client: Arc<dyn CompletionClient>, model: impl Into<String>) -> Self {
        let model = model.into();
        Self {
            classifier: IntentClassifier::new(client.clone(), model.clone()),
            generator: ReplyGenerator::new(client, model),
        }
    }

    /// Handles one message at the server's current local hour.
    pub async fn handle(
        &self,
        context: &AutoReplyContext,
        settings: &HostAutoReplySettings,
    ) -> Result<PipelineOutcome, AgentError> {
        self.handle_at(context, settings, chrono::Local::now().hour()).await
    }

    /// Handles one message at an explicit local hour (0-23). Split out so
    /// the schedule-dependent path is testable at any simulated time.
    pub async fn handle_at(
        &self,
        context: &AutoReplyContext,
        settings: &HostAutoReplySettings,
        current_hour: u32,
    ) -> Result<PipelineOutcome, AgentError> {
        let correlation_id = Uuid::new_v4().to_string();

        let intent = self.classifier.classify(&context.guest_message).await;
        info!(
            event_name = "agent.classify.completed",
            correlation_id = %correlation_id,
            category = intent.category.as_str(),
            urgency = intent.urgency.as_str(),
            requires_host_attention = intent.requires_host_attention,
            "guest message classified"
        );

        let decision = gate::evaluate(&intent, settings, current_hour);
        info!(
            event_name = "agent.gate.decision",
            correlation_id = %correlation_id,
            allowed = decision.allows(),
            reason_code = decision.reason_code().unwrap_or("allowed"),
            current_hour,
            "auto-reply gate evaluated"
        );

        let reply = if decision.allows() {
            match self.generator.generate(context).await {
                Ok(text) => {
                    info!(
                        event_name = "agent.reply.generated",
                        correlation_id = %correlation_id,
                        reply_chars = text.chars().count(),
                        "auto-reply generated"
                    );
                    Some(text)
                }
                Err(error) => {
                    warn!(
                        event_name = "agent.reply.failed",
                        correlation_id = %correlation_id,
                        error = %error,
                        "auto-reply generation failed; surfacing to caller"
                    );
                    return Err(error);
                }
            }
        } else {
            None
        };

        Ok(PipelineOutcome { correlation_id, intent, decision, reply })
    }
}
