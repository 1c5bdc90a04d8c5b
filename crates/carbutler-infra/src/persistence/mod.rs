//! Persistence implementations
//!
//! This module provides file-based implementations of the repository traits.

mod json_vehicle_repo;
mod vehicle_document;

pub use json_vehicle_repo::JsonVehicleRepository;
pub use vehicle_document::VehicleDocument;
