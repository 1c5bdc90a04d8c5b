//! Repository trait definitions for data persistence

use carbutler_types::Result;

use crate::model::VehicleRecord;

/// Persistence boundary for the whole vehicle collection
pub trait VehicleRepository {
    /// Load every stored vehicle.
    ///
    /// Missing or unreadable data yields an empty collection rather than an error.
    fn load(&self) -> Result<Vec<VehicleRecord>>;

    /// Overwrite stored data with `vehicles`
    fn save(&self, vehicles: &[VehicleRecord]) -> Result<()>;
}
