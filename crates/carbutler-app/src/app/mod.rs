//! Use cases

mod collaborators;
mod garage;

pub use collaborators::Collaborators;
pub use garage::{
    validate_year, Garage, MaintenanceReport, MileageUpdate, NewVehicle, ObdReading, MIN_MODEL_YEAR,
};
