//! Battery health classification

use serde::{Deserialize, Serialize};

const GOOD_MIN_VOLTS: f64 = 12.4;
const FAIR_MIN_VOLTS: f64 = 12.0;

/// Qualitative battery state derived from resting voltage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BatteryHealth {
    Good,
    Fair,
    Poor,
}

impl BatteryHealth {
    pub fn from_voltage(volts: f64) -> Self {
        match volts {
            v if v >= GOOD_MIN_VOLTS => BatteryHealth::Good,
            v if v >= FAIR_MIN_VOLTS => BatteryHealth::Fair,
            _ => BatteryHealth::Poor,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            BatteryHealth::Good => "Good",
            BatteryHealth::Fair => "Fair",
            BatteryHealth::Poor => "Poor",
        }
    }

    /// Label with advice, as shown on the maintenance screen
    pub fn description(&self) -> &'static str {
        match self {
            BatteryHealth::Good => "Good",
            BatteryHealth::Fair => "Fair",
            BatteryHealth::Poor => "Poor - Consider replacement",
        }
    }
}

impl std::fmt::Display for BatteryHealth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Whether a reading should raise the low-battery advisory
pub fn is_low_voltage(volts: f64) -> bool {
    volts < FAIR_MIN_VOLTS
}
