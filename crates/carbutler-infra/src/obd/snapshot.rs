//! Snapshot-file OBD2 reader
//!
//! Reads the latest values exported by an OBD2 logger as a small JSON
//! document, e.g. `{"mileage": 51234, "battery_voltage": 12.48}`. The file
//! is re-read on every call so a logger can keep overwriting it.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use carbutler_domain::VehicleSensor;
use carbutler_types::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObdSnapshot {
    #[serde(default)]
    pub mileage: Option<u32>,
    #[serde(default)]
    pub battery_voltage: Option<f64>,
}

pub struct SnapshotObdReader {
    path: PathBuf,
}

impl SnapshotObdReader {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_snapshot(&self) -> Result<ObdSnapshot> {
        let content = fs::read_to_string(&self.path).map_err(|e| {
            Error::Sensor(format!("cannot read {}: {}", self.path.display(), e))
        })?;
        serde_json::from_str(&content).map_err(|e| {
            Error::Sensor(format!("malformed snapshot {}: {}", self.path.display(), e))
        })
    }
}

impl VehicleSensor for SnapshotObdReader {
    fn read_mileage(&self) -> Result<u32> {
        self.read_snapshot()?
            .mileage
            .ok_or_else(|| Error::Sensor("snapshot has no mileage".to_string()))
    }

    fn read_battery_voltage(&self) -> Result<f64> {
        self.read_snapshot()?
            .battery_voltage
            .ok_or_else(|| Error::Sensor("snapshot has no battery_voltage".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_reads_both_values() {
        let temp_dir = tempdir().expect("Failed to create temp dir");
        let path = temp_dir.path().join("obd.json");
        fs::write(&path, r#"{"mileage": 51234, "battery_voltage": 12.48}"#).unwrap();

        let reader = SnapshotObdReader::new(path);
        assert_eq!(reader.read_mileage().unwrap(), 51_234);
        assert_eq!(reader.read_battery_voltage().unwrap(), 12.48);
    }

    #[test]
    fn test_readings_are_independent() {
        let temp_dir = tempdir().expect("Failed to create temp dir");
        let path = temp_dir.path().join("obd.json");
        fs::write(&path, r#"{"battery_voltage": 11.7}"#).unwrap();

        let reader = SnapshotObdReader::new(path);
        assert!(matches!(reader.read_mileage(), Err(Error::Sensor(_))));
        assert_eq!(reader.read_battery_voltage().unwrap(), 11.7);
    }

    #[test]
    fn test_missing_or_malformed_file() {
        let temp_dir = tempdir().expect("Failed to create temp dir");
        let reader = SnapshotObdReader::new(temp_dir.path().join("absent.json"));
        assert!(matches!(reader.read_mileage(), Err(Error::Sensor(_))));

        let path = temp_dir.path().join("bad.json");
        fs::write(&path, "mileage=5").unwrap();
        let reader = SnapshotObdReader::new(path);
        assert!(matches!(reader.read_battery_voltage(), Err(Error::Sensor(_))));
    }
}
