//! Reply gate - decides whether a classified guest message may be answered
//! automatically or must be routed to the host.
//!
//! Pure policy: no I/O, no side effects. The current hour is an explicit
//! input so the gate is testable at any simulated time of day;
//! [`should_auto_reply`] is the convenience wrapper over the server's local
//! clock.

use chrono::Timelike;

use crate::domain::message::{IntentCategory, MessageIntent, Urgency};
use crate::domain::settings::HostAutoReplySettings;

/// Outcome of gating one message, with a machine-readable reason when the
/// message is routed to the host instead of auto-replied.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GateDecision {
    Allow,
    Defer { reason_code: &'static str },
}

impl GateDecision {
    pub fn allows(&self) -> bool {
        matches!(self, Self::Allow)
    }

    pub fn reason_code(&self) -> Option<&'static str> {
        match self {
            Self::Allow => None,
            Self::Defer { reason_code } => Some(reason_code),
        }
    }

    fn defer(reason_code: &'static str) -> Self {
        Self::Defer { reason_code }
    }
}

/// Evaluates the auto-reply policy at the given local hour (0-23).
///
/// Rule order, first match wins:
/// 1. auto-reply disabled: defer
/// 2. high urgency or complaint: defer (escalation always wins)
/// 3. inside business hours and category is question/greeting/information: allow
/// 4. outside business hours and category is request: allow
///    (acknowledgment-style after-hours reply)
/// 5. everything else: defer - in particular `other` never auto-replies
///    under any schedule
///
/// Business hours compare the hour component only, half-open
/// `[start, end)`. A window that cannot be parsed defers as well: when the
/// schedule is unreadable the safe answer is a human.
pub fn evaluate(
    intent: &MessageIntent,
    settings: &HostAutoReplySettings,
    current_hour: u32,
) -> GateDecision {
    debug_assert!(current_hour < 24, "current_hour must be a clock hour (0-23)");

    if !settings.auto_reply_enabled {
        return GateDecision::defer("auto_reply_disabled");
    }

    if intent.urgency == Urgency::High || intent.category == IntentCategory::Complaint {
        return GateDecision::defer("escalation_required");
    }

    let Ok(window) = settings.window() else {
        return GateDecision::defer("invalid_business_hours");
    };
    let in_business_hours = window.contains(current_hour);

    let routine = matches!(
        intent.category,
        IntentCategory::Question | IntentCategory::Greeting | IntentCategory::Information
    );
    if in_business_hours && routine {
        return GateDecision::Allow;
    }

    if !in_business_hours && intent.category == IntentCategory::Request {
        return GateDecision::Allow;
    }

    GateDecision::defer("default_deny")
}

/// Gate verdict at the server's current local hour.
pub fn should_auto_reply(intent: &MessageIntent, settings: &HostAutoReplySettings) -> bool {
    evaluate(intent, settings, chrono::Local::now().hour()).allows()
}

#[cfg(test)]
mod tests {
    use super::{evaluate, GateDecision};
    use crate::domain::message::{IntentCategory, MessageIntent, Urgency};
    use crate::domain::settings::HostAutoReplySettings;

    fn intent(category: IntentCategory, urgency: Urgency) -> MessageIntent {
        MessageIntent {
            category,
            urgency,
            requires_host_attention: false,
            summary: "test intent".to_string(),
        }
    }

    fn nine_to_nine(enabled: bool) -> HostAutoReplySettings {
        HostAutoReplySettings::new(enabled, "09:00", "21:00")
    }

    #[test]
    fn disabled_settings_defer_regardless_of_intent_or_hour() {
        let settings = nine_to_nine(false);
        for category in [
            IntentCategory::Question,
            IntentCategory::Request,
            IntentCategory::Greeting,
            IntentCategory::Information,
            IntentCategory::Complaint,
            IntentCategory::Other,
        ] {
            for hour in [0, 9, 14, 20, 23] {
                let decision = evaluate(&intent(category, Urgency::Low), &settings, hour);
                assert_eq!(decision.reason_code(), Some("auto_reply_disabled"));
            }
        }
    }

    #[test]
    fn high_urgency_always_escalates() {
        let settings = nine_to_nine(true);
        for category in [IntentCategory::Question, IntentCategory::Greeting, IntentCategory::Request]
        {
            for hour in [3, 14, 22] {
                let decision = evaluate(&intent(category, Urgency::High), &settings, hour);
                assert_eq!(decision.reason_code(), Some("escalation_required"));
            }
        }
    }

    #[test]
    fn complaints_always_escalate() {
        let settings = nine_to_nine(true);
        for urgency in [Urgency::Low, Urgency::Medium, Urgency::High] {
            for hour in [3, 14, 22] {
                let decision = evaluate(&intent(IntentCategory::Complaint, urgency), &settings, hour);
                assert_eq!(decision.reason_code(), Some("escalation_required"));
            }
        }
    }

    #[test]
    fn routine_categories_allowed_during_business_hours() {
        let settings = nine_to_nine(true);
        for category in
            [IntentCategory::Question, IntentCategory::Greeting, IntentCategory::Information]
        {
            assert_eq!(evaluate(&intent(category, Urgency::Low), &settings, 14), GateDecision::Allow);
        }
    }

    #[test]
    fn requests_acknowledged_after_hours_only() {
        let settings = nine_to_nine(true);
        let request = intent(IntentCategory::Request, Urgency::Low);
        assert_eq!(evaluate(&request, &settings, 23), GateDecision::Allow);
        assert_eq!(evaluate(&request, &settings, 14).reason_code(), Some("default_deny"));
    }

    #[test]
    fn routine_categories_defer_after_hours() {
        let settings = nine_to_nine(true);
        let question = intent(IntentCategory::Question, Urgency::Low);
        assert_eq!(evaluate(&question, &settings, 23).reason_code(), Some("default_deny"));
    }

    #[test]
    fn other_category_never_auto_replies() {
        let settings = nine_to_nine(true);
        let unclassified = intent(IntentCategory::Other, Urgency::Low);
        for hour in 0..24 {
            assert!(!evaluate(&unclassified, &settings, hour).allows(), "hour {hour}");
        }
    }

    #[test]
    fn window_boundaries_are_half_open() {
        let settings = nine_to_nine(true);
        let question = intent(IntentCategory::Question, Urgency::Low);
        assert!(evaluate(&question, &settings, 9).allows());
        assert!(evaluate(&question, &settings, 20).allows());
        assert!(!evaluate(&question, &settings, 21).allows());
    }

    #[test]
    fn unparsable_window_defers() {
        let settings = HostAutoReplySettings::new(true, "soonish", "21:00");
        let question = intent(IntentCategory::Question, Urgency::Low);
        assert_eq!(
            evaluate(&question, &settings, 14).reason_code(),
            Some("invalid_business_hours")
        );
    }

    #[test]
    #[should_panic(expected = "clock hour")]
    fn out_of_range_hour_is_rejected_in_debug_builds() {
        let settings = nine_to_nine(true);
        evaluate(&intent(IntentCategory::Request, Urgency::Low), &settings, 30);
    }

    #[test]
    fn midday_question_scenario_allows() {
        let decision =
            evaluate(&intent(IntentCategory::Question, Urgency::Low), &nine_to_nine(true), 14);
        assert_eq!(decision, GateDecision::Allow);
    }

    #[test]
    fn late_night_request_scenario_allows() {
        let decision =
            evaluate(&intent(IntentCategory::Request, Urgency::Low), &nine_to_nine(true), 23);
        assert_eq!(decision, GateDecision::Allow);
    }

    #[test]
    fn midday_urgent_complaint_scenario_defers() {
        let decision =
            evaluate(&intent(IntentCategory::Complaint, Urgency::High), &nine_to_nine(true), 14);
        assert!(!decision.allows());
    }
}
