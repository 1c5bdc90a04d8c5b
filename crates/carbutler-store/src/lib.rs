//! Vehicle store
//!
//! The in-memory collection of vehicles that the rest of the application
//! works against. It is loaded once from a [`VehicleRepository`] and written
//! back only when [`VehicleStore::save`] is called.

mod vehicles;

pub use vehicles::VehicleStore;
