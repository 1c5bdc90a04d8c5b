//! Maintenance due evaluation
//!
//! Compares each tracked service's last-service odometer reading against the
//! maximum bound of its interval and classifies how close the vehicle is to
//! needing it. Services far from due are left out of the result entirely.

use serde::{Deserialize, Serialize};

use crate::model::{ServiceKind, VehicleRecord};

/// How close a service is to its due mileage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Urgency {
    Overdue,
    #[serde(rename = "DUE SOON")]
    DueSoon,
    Upcoming,
}

impl Urgency {
    pub fn label(&self) -> &'static str {
        match self {
            Urgency::Overdue => "OVERDUE",
            Urgency::DueSoon => "DUE SOON",
            Urgency::Upcoming => "UPCOMING",
        }
    }
}

impl std::fmt::Display for Urgency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A service that is overdue or approaching
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DueItem {
    pub kind: ServiceKind,
    /// Miles left before the interval's maximum bound; 0 once overdue
    pub miles_remaining: i64,
    pub urgency: Urgency,
    /// Miles driven since the last service of this kind
    pub miles_since_service: i64,
}

impl DueItem {
    pub fn service_name(&self) -> &'static str {
        self.kind.display_name()
    }

    /// Miles past the maximum bound (0 unless overdue)
    pub fn miles_overdue(&self) -> i64 {
        (self.miles_since_service - i64::from(self.kind.interval().max_miles)).max(0)
    }
}

/// Per-kind classification limits, as upper bounds on miles remaining
struct Thresholds {
    due_soon: Option<i64>,
    upcoming: i64,
}

fn thresholds(kind: ServiceKind) -> Thresholds {
    match kind {
        ServiceKind::OilChange | ServiceKind::TireRotation => Thresholds {
            due_soon: Some(500),
            upcoming: 1_000,
        },
        // Air filters have no DUE SOON tier
        ServiceKind::AirFilter => Thresholds {
            due_soon: None,
            upcoming: 2_000,
        },
    }
}

fn classify(kind: ServiceKind, miles_remaining: i64) -> Option<Urgency> {
    let limits = thresholds(kind);
    if miles_remaining <= 0 {
        return Some(Urgency::Overdue);
    }
    if limits.due_soon.is_some_and(|limit| miles_remaining <= limit) {
        return Some(Urgency::DueSoon);
    }
    if miles_remaining <= limits.upcoming {
        return Some(Urgency::Upcoming);
    }
    None
}

/// Evaluate which tracked services are due or approaching.
///
/// Items come back in the fixed order oil change, tire rotation, air filter.
pub fn evaluate(vehicle: &VehicleRecord) -> Vec<DueItem> {
    ServiceKind::TRACKED
        .into_iter()
        .filter_map(|kind| {
            let miles_since = i64::from(vehicle.mileage) - i64::from(vehicle.last_service(kind));
            let miles_remaining = i64::from(kind.interval().max_miles) - miles_since;
            classify(kind, miles_remaining).map(|urgency| DueItem {
                kind,
                miles_remaining: if urgency == Urgency::Overdue { 0 } else { miles_remaining },
                urgency,
                miles_since_service: miles_since,
            })
        })
        .collect()
}
