//! Vehicle record

use rand::Rng;
use serde::Serialize;

use super::history::ServiceHistoryEntry;
use super::service_kind::ServiceKind;

/// Battery voltage assumed for a new or legacy record
pub const DEFAULT_BATTERY_VOLTAGE: f64 = 12.6;

/// A tracked vehicle with its odometer state and service history
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VehicleRecord {
    pub make: String,
    pub model: String,
    pub year: i32,
    pub vin: String,
    /// Odometer reading in miles
    pub mileage: u32,
    /// Last measured battery voltage (V)
    pub battery_voltage: f64,
    pub last_oil_change: u32,
    pub last_tire_rotation: u32,
    pub last_air_filter: u32,
    /// Append-only, chronological
    #[serde(rename = "maintenance_history")]
    history: Vec<ServiceHistoryEntry>,
}

impl VehicleRecord {
    /// Create a record with a generated VIN.
    ///
    /// Last-service readings start at `mileage` minus each kind's
    /// [`ServiceKind::default_backlog`], saturating at zero.
    pub fn new(make: impl Into<String>, model: impl Into<String>, year: i32, mileage: u32) -> Self {
        let backlog = |kind: ServiceKind| mileage.saturating_sub(kind.default_backlog());
        Self {
            make: make.into(),
            model: model.into(),
            year,
            vin: generate_vin(),
            mileage,
            battery_voltage: DEFAULT_BATTERY_VOLTAGE,
            last_oil_change: backlog(ServiceKind::OilChange),
            last_tire_rotation: backlog(ServiceKind::TireRotation),
            last_air_filter: backlog(ServiceKind::AirFilter),
            history: Vec::new(),
        }
    }

    pub fn with_vin(mut self, vin: impl Into<String>) -> Self {
        self.vin = vin.into();
        self
    }

    pub fn with_battery_voltage(mut self, voltage: f64) -> Self {
        self.battery_voltage = voltage;
        self
    }

    pub fn with_last_service(mut self, kind: ServiceKind, odometer: u32) -> Self {
        self.set_last_service(kind, odometer);
        self
    }

    /// Restore previously persisted history
    pub fn with_history(mut self, history: Vec<ServiceHistoryEntry>) -> Self {
        self.history = history;
        self
    }

    pub fn last_service(&self, kind: ServiceKind) -> u32 {
        match kind {
            ServiceKind::OilChange => self.last_oil_change,
            ServiceKind::TireRotation => self.last_tire_rotation,
            ServiceKind::AirFilter => self.last_air_filter,
        }
    }

    pub fn set_last_service(&mut self, kind: ServiceKind, odometer: u32) {
        match kind {
            ServiceKind::OilChange => self.last_oil_change = odometer,
            ServiceKind::TireRotation => self.last_tire_rotation = odometer,
            ServiceKind::AirFilter => self.last_air_filter = odometer,
        }
    }

    pub fn history(&self) -> &[ServiceHistoryEntry] {
        &self.history
    }

    pub(crate) fn append_history(&mut self, entry: ServiceHistoryEntry) {
        self.history.push(entry);
    }
}

impl std::fmt::Display for VehicleRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {} {} ({} miles)",
            self.year,
            self.make,
            self.model,
            format_miles(self.mileage)
        )
    }
}

/// Placeholder VIN for vehicles added without one
pub fn generate_vin() -> String {
    let serial: u32 = rand::thread_rng().gen_range(10_000..=99_999);
    format!("MOCK{}", serial)
}

/// Format a mileage with thousands separators (`50000` -> `50,000`)
pub fn format_miles(miles: u32) -> String {
    let digits = miles.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_seeds_documented_backlogs() {
        let v = VehicleRecord::new("Toyota", "Camry", 2020, 50_000);
        assert_eq!(v.last_oil_change, 47_000);
        assert_eq!(v.last_tire_rotation, 46_000);
        assert_eq!(v.last_air_filter, 35_000);
        assert_eq!(v.battery_voltage, DEFAULT_BATTERY_VOLTAGE);
        assert!(v.history().is_empty());
    }

    #[test]
    fn test_new_backlog_saturates_at_zero() {
        let v = VehicleRecord::new("Honda", "Fit", 2023, 2_500);
        assert_eq!(v.last_oil_change, 0);
        assert_eq!(v.last_air_filter, 0);
        assert!(v.last_service(ServiceKind::TireRotation) <= v.mileage);
    }

    #[test]
    fn test_generated_vin_format() {
        let vin = generate_vin();
        assert!(vin.starts_with("MOCK"));
        assert_eq!(vin.len(), 9);
        assert!(vin[4..].chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn test_with_last_service() {
        let v = VehicleRecord::new("Ford", "Focus", 2015, 80_000)
            .with_vin("1FADP3F2XFL123456")
            .with_last_service(ServiceKind::AirFilter, 60_000);
        assert_eq!(v.vin, "1FADP3F2XFL123456");
        assert_eq!(v.last_service(ServiceKind::AirFilter), 60_000);
    }

    #[test]
    fn test_display() {
        let v = VehicleRecord::new("Toyota", "Camry", 2020, 50_000);
        assert_eq!(v.to_string(), "2020 Toyota Camry (50,000 miles)");
    }

    #[test]
    fn test_format_miles() {
        assert_eq!(format_miles(0), "0");
        assert_eq!(format_miles(999), "999");
        assert_eq!(format_miles(1_000), "1,000");
        assert_eq!(format_miles(123_456_789), "123,456,789");
    }
}
