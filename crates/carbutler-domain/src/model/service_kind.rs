//! Tracked service kinds

use serde::{Deserialize, Serialize};

use super::interval::{MaintenanceInterval, MAINTENANCE_INTERVALS};

/// A category of maintenance with its own interval and last-performed reading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceKind {
    OilChange,
    TireRotation,
    AirFilter,
}

impl ServiceKind {
    /// Evaluation order used by the maintenance evaluator
    pub const TRACKED: [ServiceKind; 3] = [
        ServiceKind::OilChange,
        ServiceKind::TireRotation,
        ServiceKind::AirFilter,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            ServiceKind::OilChange => "oil_change",
            ServiceKind::TireRotation => "tire_rotation",
            ServiceKind::AirFilter => "air_filter",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ServiceKind::OilChange => "Oil Change",
            ServiceKind::TireRotation => "Tire Rotation",
            ServiceKind::AirFilter => "Air Filter",
        }
    }

    /// Parse either the key (`oil_change`, `oil-change`) or the display name
    /// (`Oil Change`), ignoring case.
    pub fn from_name(name: &str) -> Option<Self> {
        let normalized = name.trim().to_lowercase().replace(['-', ' '], "_");
        Self::TRACKED
            .into_iter()
            .find(|kind| kind.key() == normalized)
    }

    pub fn interval(&self) -> MaintenanceInterval {
        // Tracked kinds occupy the first rows of the table, in order
        let row = match self {
            ServiceKind::OilChange => 0,
            ServiceKind::TireRotation => 1,
            ServiceKind::AirFilter => 2,
        };
        MAINTENANCE_INTERVALS[row].1
    }

    /// Miles subtracted from the current odometer when no last-service
    /// reading is known.
    pub fn default_backlog(&self) -> u32 {
        match self {
            ServiceKind::OilChange => 3_000,
            ServiceKind::TireRotation => 4_000,
            ServiceKind::AirFilter => 15_000,
        }
    }
}

impl std::fmt::Display for ServiceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}
