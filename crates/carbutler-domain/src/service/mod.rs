//! Domain services

pub mod appointment;
pub mod battery;
pub mod maintenance;
pub mod scheduler;

pub use appointment::{candidate_dates, is_candidate_date, APPOINTMENT_WINDOW_DAYS};
pub use battery::{is_low_voltage, BatteryHealth};
pub use maintenance::{evaluate, DueItem, Urgency};
pub use scheduler::{
    compose_request_email, CalendarStatus, NotificationStatus, ScheduleOutcome, ScheduleRequest,
    ServiceScheduler, APPOINTMENT_DURATION_MINUTES,
};
