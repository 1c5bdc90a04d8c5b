//! Standard maintenance intervals in miles

use serde::{Deserialize, Serialize};

/// Recommended mileage window between two services of the same kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaintenanceInterval {
    pub min_miles: u32,
    pub max_miles: u32,
}

impl MaintenanceInterval {
    pub const fn new(min_miles: u32, max_miles: u32) -> Self {
        Self {
            min_miles,
            max_miles,
        }
    }
}

/// Interval table keyed by service key.
///
/// Only the first three entries are tracked per vehicle; the rest are
/// reference values shown to the user.
pub const MAINTENANCE_INTERVALS: [(&str, MaintenanceInterval); 6] = [
    ("oil_change", MaintenanceInterval::new(5_000, 7_500)),
    ("tire_rotation", MaintenanceInterval::new(5_000, 8_000)),
    ("air_filter", MaintenanceInterval::new(15_000, 30_000)),
    ("brake_inspection", MaintenanceInterval::new(20_000, 20_000)),
    ("coolant_flush", MaintenanceInterval::new(30_000, 30_000)),
    ("transmission_service", MaintenanceInterval::new(30_000, 60_000)),
];

/// Look up the interval for a service key
pub fn interval_for(key: &str) -> Option<MaintenanceInterval> {
    MAINTENANCE_INTERVALS
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, interval)| *interval)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_intervals() {
        assert_eq!(interval_for("oil_change").map(|i| i.max_miles), Some(7_500));
        assert_eq!(interval_for("tire_rotation").map(|i| i.max_miles), Some(8_000));
        assert_eq!(interval_for("air_filter").map(|i| i.max_miles), Some(30_000));
        assert_eq!(
            interval_for("transmission_service"),
            Some(MaintenanceInterval::new(30_000, 60_000))
        );
    }

    #[test]
    fn test_unknown_interval() {
        assert!(interval_for("wiper_blades").is_none());
    }

    #[test]
    fn test_min_never_exceeds_max() {
        for (key, interval) in MAINTENANCE_INTERVALS {
            assert!(interval.min_miles <= interval.max_miles, "{}", key);
        }
    }
}
