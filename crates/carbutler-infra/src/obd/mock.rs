//! Mock OBD2 interface for demonstration

use rand::Rng;
use tracing::debug;

use carbutler_domain::VehicleSensor;
use carbutler_types::Result;

/// Simulated adapter returning random plausible readings
#[derive(Debug, Default)]
pub struct MockObdReader;

impl VehicleSensor for MockObdReader {
    fn read_mileage(&self) -> Result<u32> {
        let mileage = rand::thread_rng().gen_range(1_000..=100_000);
        debug!("[MOCK OBD2] mileage={}", mileage);
        Ok(mileage)
    }

    fn read_battery_voltage(&self) -> Result<f64> {
        let raw: f64 = rand::thread_rng().gen_range(11.5..=14.5);
        let voltage = (raw * 100.0).round() / 100.0;
        debug!("[MOCK OBD2] battery={}V", voltage);
        Ok(voltage)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_readings_in_range() {
        let reader = MockObdReader;
        for _ in 0..50 {
            let mileage = reader.read_mileage().unwrap();
            assert!((1_000..=100_000).contains(&mileage));

            let voltage = reader.read_battery_voltage().unwrap();
            assert!((11.5..=14.5).contains(&voltage));
            assert!(((voltage * 100.0).round() - voltage * 100.0).abs() < 1e-6);
        }
    }
}
