//! Domain layer: vehicle records, maintenance rules and scheduling
//!
//! Everything in here is synchronous and free of I/O. Calendar, email,
//! OBD2 and persistence are reached only through the traits in [`ports`]
//! and [`repository`].

pub mod model;
pub mod ports;
pub mod repository;
pub mod service;

pub use model::*;
pub use ports::{CalendarService, EmailService, VehicleSensor};
pub use repository::VehicleRepository;
