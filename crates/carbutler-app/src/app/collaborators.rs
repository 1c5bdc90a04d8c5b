//! Collaborator wiring
//!
//! Picks the calendar, email and OBD2 implementations named in the
//! configuration. This is the only place that knows about concrete types.

use tracing::debug;

use carbutler_domain::{CalendarService, EmailService, VehicleSensor};
use carbutler_infra::calendar::{IcsCalendar, MockCalendar};
use carbutler_infra::email::{MockEmailService, OutboxEmailService};
use carbutler_infra::obd::{MockObdReader, SnapshotObdReader};
use carbutler_types::Result;

use crate::config::{CalendarBackend, Config, EmailBackend, ObdBackend};

/// The external services a session works with
pub struct Collaborators {
    pub calendar: Box<dyn CalendarService>,
    pub email: Box<dyn EmailService>,
    pub sensor: Box<dyn VehicleSensor>,
}

impl Collaborators {
    /// Build the implementations selected by `config`
    pub fn from_config(config: &Config) -> Result<Self> {
        let calendar: Box<dyn CalendarService> = match config.calendar_backend {
            CalendarBackend::Mock => Box::new(MockCalendar),
            CalendarBackend::Ics => Box::new(IcsCalendar::new(config.calendar_path()?)),
        };

        let email: Box<dyn EmailService> = match config.email_backend {
            EmailBackend::Mock => Box::new(MockEmailService),
            EmailBackend::Outbox => Box::new(OutboxEmailService::new(
                config.outbox_dir()?,
                config.sender_email.clone(),
            )),
        };

        let sensor: Box<dyn VehicleSensor> = match config.obd_backend {
            ObdBackend::Mock => Box::new(MockObdReader),
            ObdBackend::Snapshot => Box::new(SnapshotObdReader::new(config.obd_snapshot_path()?)),
        };

        debug!(
            "Collaborators: calendar={} email={} obd={}",
            config.calendar_backend, config.email_backend, config.obd_backend
        );

        Ok(Self {
            calendar,
            email,
            sensor,
        })
    }

    /// All-mock collaborators
    pub fn mock() -> Self {
        Self {
            calendar: Box::new(MockCalendar),
            email: Box::new(MockEmailService),
            sensor: Box::new(MockObdReader),
        }
    }
}
