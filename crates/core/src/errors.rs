use thiserror::Error;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    #[error("invalid business hours value `{value}` (expected HH:MM with hour 0-23)")]
    InvalidBusinessHours { value: String },
    #[error("domain invariant violation: {0}")]
    InvariantViolation(String),
}
