//! Domain model types

pub mod history;
pub mod interval;
pub mod service_kind;
pub mod vehicle;

pub use history::{ServiceHistoryEntry, ServiceStatus};
pub use interval::{interval_for, MaintenanceInterval, MAINTENANCE_INTERVALS};
pub use service_kind::ServiceKind;
pub use vehicle::{format_miles, generate_vin, VehicleRecord, DEFAULT_BATTERY_VOLTAGE};
