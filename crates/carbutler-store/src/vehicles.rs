//! Vehicle store for tracked vehicles

use carbutler_domain::{VehicleRecord, VehicleRepository};
use carbutler_types::{Error, Result};
use tracing::{debug, info};

/// Collection of vehicle records with an explicit load/save lifecycle
pub struct VehicleStore {
    repository: Box<dyn VehicleRepository>,
    vehicles: Vec<VehicleRecord>,
}

impl VehicleStore {
    /// Load all vehicles from `repository`
    pub fn open(repository: Box<dyn VehicleRepository>) -> Result<Self> {
        let vehicles = repository.load()?;
        info!("Loaded {} vehicle(s)", vehicles.len());
        Ok(Self {
            repository,
            vehicles,
        })
    }

    /// Write the whole collection back, overwriting previous contents
    pub fn save(&self) -> Result<()> {
        self.repository.save(&self.vehicles)?;
        debug!("Saved {} vehicle(s)", self.vehicles.len());
        Ok(())
    }

    /// Add a vehicle and return its index
    pub fn add_vehicle(&mut self, vehicle: VehicleRecord) -> usize {
        info!("Adding vehicle {} ({})", vehicle, vehicle.vin);
        self.vehicles.push(vehicle);
        self.vehicles.len() - 1
    }

    /// Remove the vehicle at `index`
    pub fn remove(&mut self, index: usize) -> Option<VehicleRecord> {
        if index >= self.vehicles.len() {
            return None;
        }
        let removed = self.vehicles.remove(index);
        info!("Removed vehicle {} ({})", removed, removed.vin);
        Some(removed)
    }

    pub fn get(&self, index: usize) -> Option<&VehicleRecord> {
        self.vehicles.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut VehicleRecord> {
        self.vehicles.get_mut(index)
    }

    pub fn find_by_vin(&self, vin: &str) -> Option<&VehicleRecord> {
        self.vehicles.iter().find(|v| v.vin.eq_ignore_ascii_case(vin))
    }

    /// Resolve a user-supplied selector: a 1-based list number or a VIN
    pub fn resolve(&self, selector: &str) -> Result<usize> {
        let selector = selector.trim();
        if let Ok(number) = selector.parse::<usize>() {
            if (1..=self.vehicles.len()).contains(&number) {
                return Ok(number - 1);
            }
        }
        self.vehicles
            .iter()
            .position(|v| v.vin.eq_ignore_ascii_case(selector))
            .ok_or_else(|| Error::VehicleNotFound(selector.to_string()))
    }

    /// All vehicles in insertion order
    pub fn all_vehicles(&self) -> &[VehicleRecord] {
        &self.vehicles
    }

    pub fn count(&self) -> usize {
        self.vehicles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vehicles.is_empty()
    }
}
