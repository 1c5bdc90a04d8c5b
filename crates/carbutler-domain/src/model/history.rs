//! Service history entries

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Lifecycle state of a history entry
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceStatus {
    #[default]
    Scheduled,
    Completed,
}

impl ServiceStatus {
    pub fn label(&self) -> &'static str {
        match self {
            ServiceStatus::Scheduled => "SCHEDULED",
            ServiceStatus::Completed => "COMPLETED",
        }
    }
}

/// Immutable record of a scheduled service event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceHistoryEntry {
    /// Display name of the service (or free text)
    pub service: String,
    /// Appointment date and time
    pub scheduled_date: NaiveDateTime,
    /// Odometer reading when the appointment was made
    pub mileage: u32,
    #[serde(default)]
    pub status: ServiceStatus,
}

impl ServiceHistoryEntry {
    pub fn scheduled(service: impl Into<String>, scheduled_date: NaiveDateTime, mileage: u32) -> Self {
        Self {
            service: service.into(),
            scheduled_date,
            mileage,
            status: ServiceStatus::Scheduled,
        }
    }
}
