//! Application service layer - use cases, config, collaborator wiring

pub mod app;
pub mod config;
pub mod repository;
