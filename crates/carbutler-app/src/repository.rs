//! Repository adapters for persistence layer

use std::path::PathBuf;

use carbutler_infra::persistence::JsonVehicleRepository;
use carbutler_store::VehicleStore;
use carbutler_types::Result;

use crate::config::Config;

/// Open the vehicle store in the configured data directory
pub fn open_vehicle_store(config: &Config) -> Result<VehicleStore> {
    open_vehicle_store_at(config.data_dir()?)
}

/// Open the vehicle store at a custom directory
pub fn open_vehicle_store_at(data_dir: PathBuf) -> Result<VehicleStore> {
    let repository = JsonVehicleRepository::open(data_dir)?;
    VehicleStore::open(Box::new(repository))
}
