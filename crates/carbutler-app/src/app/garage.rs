//! Garage Service - use cases over the vehicle store
//!
//! Every user action goes through here:
//! 1. Validate input at the boundary (year range, non-decreasing mileage,
//!    service currently due, date inside the booking window)
//! 2. Run the domain logic
//! 3. Save the store immediately after any mutation

use chrono::NaiveDateTime;
use serde::Serialize;
use tracing::{info, warn};

use carbutler_domain::service::{
    candidate_dates, evaluate, is_candidate_date, is_low_voltage, BatteryHealth, DueItem,
    ScheduleOutcome, ScheduleRequest, ServiceScheduler,
};
use carbutler_domain::{generate_vin, ServiceHistoryEntry, ServiceKind, VehicleRecord};
use carbutler_store::VehicleStore;
use carbutler_types::{Error, Result};

use super::collaborators::Collaborators;

/// Oldest model year accepted when adding a vehicle
pub const MIN_MODEL_YEAR: i32 = 1900;

/// Accept model years from 1900 up to next year's models
pub fn validate_year(year: i32, current_year: i32) -> Result<i32> {
    if (MIN_MODEL_YEAR..=current_year + 1).contains(&year) {
        Ok(year)
    } else {
        Err(Error::InvalidInput(format!(
            "year must be between {} and {}",
            MIN_MODEL_YEAR,
            current_year + 1
        )))
    }
}

fn validate_voltage(volts: f64) -> Result<f64> {
    if volts.is_finite() && volts > 0.0 && volts < 100.0 {
        Ok(volts)
    } else {
        Err(Error::InvalidInput(format!("implausible battery voltage: {}", volts)))
    }
}

/// Input for a new vehicle
#[derive(Debug, Clone)]
pub struct NewVehicle {
    pub make: String,
    pub model: String,
    pub year: i32,
    pub mileage: u32,
    pub vin: Option<String>,
}

/// Result of a mileage or battery update
#[derive(Debug, Clone, Serialize)]
pub struct MileageUpdate {
    pub previous_mileage: u32,
    pub mileage: u32,
    pub battery_voltage: f64,
    pub battery: BatteryHealth,
    /// Advisory only
    pub low_battery_warning: bool,
}

/// Values read from the OBD2 adapter; either may be missing
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ObdReading {
    pub mileage: Option<u32>,
    pub battery_voltage: Option<f64>,
}

/// Maintenance screen contents for one vehicle
#[derive(Debug, Clone, Serialize)]
pub struct MaintenanceReport {
    pub vehicle: String,
    pub vin: String,
    pub due_items: Vec<DueItem>,
    pub battery_voltage: f64,
    pub battery: BatteryHealth,
}

/// Use cases for one interactive or scripted session
pub struct Garage {
    store: VehicleStore,
    collaborators: Collaborators,
}

impl Garage {
    pub fn new(store: VehicleStore, collaborators: Collaborators) -> Self {
        Self {
            store,
            collaborators,
        }
    }

    pub fn vehicles(&self) -> &[VehicleRecord] {
        self.store.all_vehicles()
    }

    pub fn resolve(&self, selector: &str) -> Result<usize> {
        self.store.resolve(selector)
    }

    pub fn vehicle(&self, index: usize) -> Result<&VehicleRecord> {
        self.store
            .get(index)
            .ok_or_else(|| Error::VehicleNotFound(format!("#{}", index + 1)))
    }

    fn vehicle_mut(&mut self, index: usize) -> Result<&mut VehicleRecord> {
        self.store
            .get_mut(index)
            .ok_or_else(|| Error::VehicleNotFound(format!("#{}", index + 1)))
    }

    /// Add a vehicle and save. Returns its index.
    pub fn add_vehicle(&mut self, input: NewVehicle, current_year: i32) -> Result<usize> {
        let make = input.make.trim();
        let model = input.model.trim();
        if make.is_empty() || model.is_empty() {
            return Err(Error::InvalidInput("make and model are required".to_string()));
        }
        let year = validate_year(input.year, current_year)?;

        let mut vehicle = VehicleRecord::new(make, model, year, input.mileage);
        if let Some(vin) = input.vin.as_deref().map(str::trim).filter(|v| !v.is_empty()) {
            if self.store.find_by_vin(vin).is_some() {
                return Err(Error::InvalidInput(format!("a vehicle with VIN {} already exists", vin)));
            }
            vehicle = vehicle.with_vin(vin);
        } else {
            while self.store.find_by_vin(&vehicle.vin).is_some() {
                vehicle = vehicle.with_vin(generate_vin());
            }
        }

        let index = self.store.add_vehicle(vehicle);
        self.store.save()?;
        Ok(index)
    }

    /// Remove a vehicle and save
    pub fn remove_vehicle(&mut self, index: usize) -> Result<VehicleRecord> {
        let removed = self
            .store
            .remove(index)
            .ok_or_else(|| Error::VehicleNotFound(format!("#{}", index + 1)))?;
        self.store.save()?;
        Ok(removed)
    }

    /// Record a new odometer reading (and optionally battery voltage).
    ///
    /// Rejects readings lower than the current mileage.
    pub fn update_mileage(
        &mut self,
        index: usize,
        mileage: u32,
        battery_voltage: Option<f64>,
    ) -> Result<MileageUpdate> {
        let battery_voltage = battery_voltage.map(validate_voltage).transpose()?;
        let vehicle = self.vehicle_mut(index)?;
        let previous_mileage = vehicle.mileage;
        if mileage < previous_mileage {
            return Err(Error::MileageDecrease {
                current: previous_mileage,
                requested: mileage,
            });
        }

        vehicle.mileage = mileage;
        if let Some(volts) = battery_voltage {
            vehicle.battery_voltage = volts;
        }
        let update = MileageUpdate {
            previous_mileage,
            mileage,
            battery_voltage: vehicle.battery_voltage,
            battery: BatteryHealth::from_voltage(vehicle.battery_voltage),
            low_battery_warning: is_low_voltage(vehicle.battery_voltage),
        };
        info!("Mileage for {} updated {} -> {}", vehicle.vin, previous_mileage, mileage);
        if update.low_battery_warning {
            warn!(
                "Battery voltage low for {} ({}V)",
                vehicle.vin, update.battery_voltage
            );
        }

        self.store.save()?;
        Ok(update)
    }

    /// Take a reading from the OBD2 adapter without applying it
    pub fn read_obd(&self) -> Result<ObdReading> {
        let sensor = &self.collaborators.sensor;
        let mileage = sensor
            .read_mileage()
            .map_err(|e| warn!("OBD2 mileage read failed: {}", e))
            .ok();
        let battery_voltage = match sensor.read_battery_voltage() {
            Ok(volts) => Some(volts),
            Err(e) if mileage.is_none() => return Err(e),
            Err(e) => {
                warn!("OBD2 battery read failed: {}", e);
                None
            }
        };
        Ok(ObdReading {
            mileage,
            battery_voltage,
        })
    }

    /// Apply an accepted OBD2 reading
    pub fn apply_obd_reading(&mut self, index: usize, reading: ObdReading) -> Result<MileageUpdate> {
        let mileage = match reading.mileage {
            Some(mileage) => mileage,
            None => self.vehicle(index)?.mileage,
        };
        self.update_mileage(index, mileage, reading.battery_voltage)
    }

    /// Due items and battery state for a vehicle
    pub fn check(&self, index: usize) -> Result<MaintenanceReport> {
        let vehicle = self.vehicle(index)?;
        Ok(MaintenanceReport {
            vehicle: vehicle.to_string(),
            vin: vehicle.vin.clone(),
            due_items: evaluate(vehicle),
            battery_voltage: vehicle.battery_voltage,
            battery: BatteryHealth::from_voltage(vehicle.battery_voltage),
        })
    }

    /// Bookable dates relative to `now`
    pub fn candidate_dates(&self, now: NaiveDateTime) -> Vec<NaiveDateTime> {
        candidate_dates(now)
    }

    /// Schedule a due service on one of the candidate dates, then save.
    ///
    /// `request.service` may be a display name or a service key; it is
    /// normalised to the display name before recording.
    pub fn schedule(
        &mut self,
        index: usize,
        request: ScheduleRequest,
        now: NaiveDateTime,
    ) -> Result<ScheduleOutcome> {
        let vehicle = self.vehicle(index)?;
        let due = evaluate(vehicle);
        let item = ServiceKind::from_name(&request.service)
            .and_then(|kind| due.iter().find(|item| item.kind == kind))
            .ok_or_else(|| Error::ServiceNotDue(request.service.trim().to_string()))?;

        if !is_candidate_date(now, request.date) {
            return Err(Error::InvalidDate(format!(
                "{} is not a weekday in the next 7 days",
                request.date.format("%Y-%m-%d")
            )));
        }

        let request = ScheduleRequest {
            service: item.service_name().to_string(),
            ..request
        };

        let collaborators = &self.collaborators;
        let scheduler =
            ServiceScheduler::new(collaborators.calendar.as_ref(), collaborators.email.as_ref());
        let vehicle = self
            .store
            .get_mut(index)
            .ok_or_else(|| Error::VehicleNotFound(format!("#{}", index + 1)))?;
        let outcome = scheduler.schedule(vehicle, &request)?;

        self.store.save()?;
        Ok(outcome)
    }

    pub fn history(&self, index: usize) -> Result<&[ServiceHistoryEntry]> {
        Ok(self.vehicle(index)?.history())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_year() {
        assert!(validate_year(1900, 2026).is_ok());
        assert!(validate_year(2027, 2026).is_ok());
        assert!(matches!(validate_year(1899, 2026), Err(Error::InvalidInput(_))));
        assert!(matches!(validate_year(2028, 2026), Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_validate_voltage() {
        assert!(validate_voltage(12.6).is_ok());
        assert!(validate_voltage(0.0).is_err());
        assert!(validate_voltage(f64::NAN).is_err());
        assert!(validate_voltage(-3.0).is_err());
    }
}
