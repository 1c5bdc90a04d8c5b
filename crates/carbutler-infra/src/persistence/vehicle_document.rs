//! On-disk representation of a vehicle
//!
//! Older files may omit the VIN, battery voltage, history or last-service
//! readings, so every one of those fields is optional here and filled in
//! when converting to a [`VehicleRecord`].

use serde::{Deserialize, Serialize};

use carbutler_domain::{
    generate_vin, ServiceHistoryEntry, ServiceKind, VehicleRecord, DEFAULT_BATTERY_VOLTAGE,
};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VehicleDocument {
    pub make: String,
    pub model: String,
    pub year: i32,
    pub mileage: u32,
    #[serde(default)]
    pub vin: Option<String>,
    #[serde(default)]
    pub battery_voltage: Option<f64>,
    #[serde(default)]
    pub maintenance_history: Vec<ServiceHistoryEntry>,
    #[serde(default)]
    pub last_oil_change: Option<u32>,
    #[serde(default)]
    pub last_tire_rotation: Option<u32>,
    #[serde(default)]
    pub last_air_filter: Option<u32>,
}

impl From<&VehicleRecord> for VehicleDocument {
    fn from(vehicle: &VehicleRecord) -> Self {
        Self {
            make: vehicle.make.clone(),
            model: vehicle.model.clone(),
            year: vehicle.year,
            mileage: vehicle.mileage,
            vin: Some(vehicle.vin.clone()),
            battery_voltage: Some(vehicle.battery_voltage),
            maintenance_history: vehicle.history().to_vec(),
            last_oil_change: Some(vehicle.last_oil_change),
            last_tire_rotation: Some(vehicle.last_tire_rotation),
            last_air_filter: Some(vehicle.last_air_filter),
        }
    }
}

impl From<VehicleDocument> for VehicleRecord {
    fn from(doc: VehicleDocument) -> Self {
        let vin = doc
            .vin
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(generate_vin);

        // `new` already seeds missing readings with the default backlogs
        let mut vehicle = VehicleRecord::new(doc.make, doc.model, doc.year, doc.mileage)
            .with_vin(vin)
            .with_battery_voltage(doc.battery_voltage.unwrap_or(DEFAULT_BATTERY_VOLTAGE))
            .with_history(doc.maintenance_history);

        let readings = [
            (ServiceKind::OilChange, doc.last_oil_change),
            (ServiceKind::TireRotation, doc.last_tire_rotation),
            (ServiceKind::AirFilter, doc.last_air_filter),
        ];
        for (kind, reading) in readings {
            if let Some(odometer) = reading {
                vehicle.set_last_service(kind, odometer);
            }
        }
        vehicle
    }
}
