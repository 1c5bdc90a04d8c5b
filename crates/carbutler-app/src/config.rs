//! Configuration management for carbutler
//!
//! Config stored at: ~/.config/carbutler/config.json

use std::path::{Path, PathBuf};

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use carbutler_types::{ConfigError, OutputFormat, Result};

/// Calendar implementation to use
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CalendarBackend {
    #[default]
    Mock,
    /// Append events to `<data_dir>/calendar.ics`
    Ics,
}

/// Email implementation to use
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmailBackend {
    #[default]
    Mock,
    /// Write `.eml` files to `<data_dir>/outbox`
    Outbox,
}

/// OBD2 reader implementation to use
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObdBackend {
    #[default]
    Mock,
    /// Read an OBD2 logger's JSON export
    Snapshot,
}

macro_rules! backend_display {
    ($($ty:ty),*) => {$(
        impl std::fmt::Display for $ty {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                match self.to_possible_value() {
                    Some(value) => f.write_str(value.get_name()),
                    None => write!(f, "{:?}", self),
                }
            }
        }
    )*};
}

backend_display!(CalendarBackend, EmailBackend, ObdBackend);

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Data directory override (vehicles.json, calendar.ics, outbox/)
    #[serde(default)]
    pub data_dir: Option<PathBuf>,

    #[serde(default)]
    pub calendar_backend: CalendarBackend,

    #[serde(default)]
    pub email_backend: EmailBackend,

    #[serde(default)]
    pub obd_backend: ObdBackend,

    /// Snapshot file for the snapshot OBD2 backend (default: `<data_dir>/obd.json`)
    #[serde(default)]
    pub obd_snapshot_path: Option<PathBuf>,

    /// Service provider address offered when scheduling
    #[serde(default)]
    pub default_email: Option<String>,

    /// From address for outgoing email
    #[serde(default = "default_sender_email")]
    pub sender_email: String,

    /// Default output format (json, table)
    #[serde(default = "default_output_format")]
    pub output_format: OutputFormat,
}

fn default_sender_email() -> String {
    "carbutler@localhost.localdomain".to_string()
}

fn default_output_format() -> OutputFormat {
    OutputFormat::Table
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: None,
            calendar_backend: CalendarBackend::default(),
            email_backend: EmailBackend::default(),
            obd_backend: ObdBackend::default(),
            obd_snapshot_path: None,
            default_email: None,
            sender_email: default_sender_email(),
            output_format: default_output_format(),
        }
    }
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or(ConfigError::NotFound)?
            .join("carbutler");
        Ok(config_dir)
    }

    /// Get the config file path
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.json"))
    }

    /// Get the data directory path
    pub fn data_dir(&self) -> Result<PathBuf> {
        if let Some(ref dir) = self.data_dir {
            return Ok(dir.clone());
        }

        let data_dir = dirs::data_dir()
            .ok_or(ConfigError::NotFound)?
            .join("carbutler");
        Ok(data_dir)
    }

    pub fn calendar_path(&self) -> Result<PathBuf> {
        Ok(self.data_dir()?.join("calendar.ics"))
    }

    pub fn outbox_dir(&self) -> Result<PathBuf> {
        Ok(self.data_dir()?.join("outbox"))
    }

    pub fn obd_snapshot_path(&self) -> Result<PathBuf> {
        if let Some(ref path) = self.obd_snapshot_path {
            return Ok(path.clone());
        }
        Ok(self.data_dir()?.join("obd.json"))
    }

    /// Use mock implementations for every collaborator
    pub fn with_mocks(mut self) -> Self {
        self.calendar_backend = CalendarBackend::Mock;
        self.email_backend = EmailBackend::Mock;
        self.obd_backend = ObdBackend::Mock;
        self
    }

    /// Load config from file, or create default
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = serde_json::from_str(&content)
                .map_err(|e| ConfigError::ParseError(format!("{}: {}", path.display(), e)))?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    /// Save config to file
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Ensure directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

impl std::fmt::Display for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "CarButler Configuration")?;
        writeln!(f, "=======================")?;
        writeln!(f)?;
        writeln!(
            f,
            "Data dir:       {}",
            self.data_dir()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|_| "(error)".to_string())
        )?;
        writeln!(f, "Calendar:       {}", self.calendar_backend)?;
        writeln!(f, "Email:          {}", self.email_backend)?;
        writeln!(f, "OBD2:           {}", self.obd_backend)?;
        if self.obd_backend == ObdBackend::Snapshot {
            writeln!(
                f,
                "OBD2 snapshot:  {}",
                self.obd_snapshot_path()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|_| "(error)".to_string())
            )?;
        }
        writeln!(
            f,
            "Default email:  {}",
            self.default_email.as_deref().unwrap_or("(none)")
        )?;
        writeln!(f, "Sender email:   {}", self.sender_email)?;
        writeln!(f, "Output format:  {}", self.output_format)?;

        if let Ok(path) = Self::config_path() {
            writeln!(f)?;
            writeln!(f, "Config file:    {}", path.display())?;
        }

        Ok(())
    }
}
