//! OBD2 readers

mod mock;
mod snapshot;

pub use mock::MockObdReader;
pub use snapshot::{ObdSnapshot, SnapshotObdReader};
