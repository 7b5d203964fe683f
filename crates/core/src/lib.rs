//! Core domain logic for Lana - guest communication automation
//!
//! This crate holds everything that does not touch the network:
//! - Message intent model (`domain::message`) - category, urgency, attention flag
//! - Auto-reply inputs (`domain::context`, `domain::settings`)
//! - The reply gate (`gate`) - the pure policy deciding whether a guest
//!   message may be answered automatically or must be routed to the host
//! - Configuration loading and validation (`config`)
//! - Error taxonomy (`errors`)
//!
//! # Safety Principle
//!
//! The LLM never decides whether a message is auto-replied. Classification is
//! advisory input; the gate is a deterministic function of intent, host
//! settings, and the clock. When classification is uncertain the system
//! defaults to routing the message to a human.

pub mod config;
pub mod domain;
pub mod errors;
pub mod gate;

pub use domain::context::{AutoReplyContext, ConversationRole, ConversationTurn};
pub use domain::message::{IntentCategory, MessageIntent, Urgency};
pub use domain::settings::{BusinessHoursWindow, HostAutoReplySettings};
pub use errors::DomainError;
pub use gate::{GateDecision, evaluate, should_auto_reply};
