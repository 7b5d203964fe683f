use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

/// Host-configured auto-reply policy inputs.
///
/// Owned by the host's account configuration; read-only here. The business
/// hours strings are `"HH:MM"` local time; only the hour component
/// participates in gating (minutes are ignored, and the window does not wrap
/// across midnight).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostAutoReplySettings {
    pub auto_reply_enabled: bool,
    pub business_hours_start: String,
    pub business_hours_end: String,
}

impl HostAutoReplySettings {
    pub fn new(
        auto_reply_enabled: bool,
        business_hours_start: impl Into<String>,
        business_hours_end: impl Into<String>,
    ) -> Self {
        Self {
            auto_reply_enabled,
            business_hours_start: business_hours_start.into(),
            business_hours_end: business_hours_end.into(),
        }
    }

    pub fn window(&self) -> Result<BusinessHoursWindow, DomainError> {
        Ok(BusinessHoursWindow {
            start_hour: parse_hour(&self.business_hours_start)?,
            end_hour: parse_hour(&self.business_hours_end)?,
        })
    }
}

/// Half-open `[start_hour, end_hour)` window over local clock hours.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BusinessHoursWindow {
    pub start_hour: u32,
    pub end_hour: u32,
}

impl BusinessHoursWindow {
    pub fn contains(&self, hour: u32) -> bool {
        hour >= self.start_hour && hour < self.end_hour
    }
}

fn parse_hour(value: &str) -> Result<u32, DomainError> {
    let hour_part = value.split(':').next().unwrap_or_default().trim();
    let hour = hour_part.parse::<u32>().map_err(|_| DomainError::InvalidBusinessHours {
        value: value.to_string(),
    })?;
    if hour > 23 {
        return Err(DomainError::InvalidBusinessHours { value: value.to_string() });
    }
    Ok(hour)
}
