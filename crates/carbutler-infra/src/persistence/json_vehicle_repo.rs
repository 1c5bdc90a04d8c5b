//! File-based vehicle repository implementation

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use carbutler_domain::{VehicleRecord, VehicleRepository};
use carbutler_types::Result;

use super::vehicle_document::VehicleDocument;

/// File-based implementation of VehicleRepository
///
/// Stores all vehicles as a pretty-printed JSON array in `vehicles.json`.
pub struct JsonVehicleRepository {
    store_path: PathBuf,
}

impl JsonVehicleRepository {
    /// Open the repository in `store_dir`, creating the directory if needed
    pub fn open(store_dir: PathBuf) -> Result<Self> {
        fs::create_dir_all(&store_dir)?;
        let store_path = store_dir.join("vehicles.json");
        Ok(Self { store_path })
    }

    pub fn store_path(&self) -> &Path {
        &self.store_path
    }

    fn read_documents(&self) -> std::result::Result<Vec<VehicleDocument>, String> {
        let file = File::open(&self.store_path).map_err(|e| e.to_string())?;
        let reader = BufReader::new(file);
        serde_json::from_reader(reader).map_err(|e| e.to_string())
    }
}

impl VehicleRepository for JsonVehicleRepository {
    fn load(&self) -> Result<Vec<VehicleRecord>> {
        if !self.store_path.exists() {
            debug!("No vehicle file at {}", self.store_path.display());
            return Ok(Vec::new());
        }

        match self.read_documents() {
            Ok(documents) => Ok(documents.into_iter().map(VehicleRecord::from).collect()),
            Err(e) => {
                warn!(
                    "Error loading vehicles from {}: {}",
                    self.store_path.display(),
                    e
                );
                Ok(Vec::new())
            }
        }
    }

    fn save(&self, vehicles: &[VehicleRecord]) -> Result<()> {
        let documents: Vec<VehicleDocument> = vehicles.iter().map(VehicleDocument::from).collect();
        let file = File::create(&self.store_path)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, &documents)?;
        writer.flush()?;
        debug!(
            "Wrote {} vehicle(s) to {}",
            documents.len(),
            self.store_path.display()
        );
        Ok(())
    }
}
