//! Capability traits for the collaborators the scheduler talks to
//!
//! Each trait has a mock and a real implementation in `carbutler-infra`;
//! which one is used is decided once at startup.

use chrono::NaiveDateTime;
use carbutler_types::Result;

/// Creates calendar events for service appointments
pub trait CalendarService {
    /// Create an event and return its identifier
    fn create_event(&self, title: &str, date: NaiveDateTime, duration_minutes: u32) -> Result<String>;
}

/// Sends notification emails
pub trait EmailService {
    /// Send a message; `Ok(())` means the message was accepted
    fn send_email(&self, to: &str, subject: &str, body: &str) -> Result<()>;
}

/// Odometer and battery reader (OBD2)
///
/// The two readings are independent; the caller decides whether to accept them.
pub trait VehicleSensor {
    fn read_mileage(&self) -> Result<u32>;

    fn read_battery_voltage(&self) -> Result<f64>;
}
