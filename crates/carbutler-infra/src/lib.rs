//! Infrastructure layer
//!
//! File-backed persistence plus mock and real implementations of the
//! calendar, email and OBD2 collaborators.

pub mod calendar;
pub mod email;
pub mod obd;
pub mod persistence;
