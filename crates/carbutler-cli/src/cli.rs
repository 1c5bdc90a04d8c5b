//! CLI definition using clap

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};

use carbutler_app::config::{CalendarBackend, EmailBackend, ObdBackend};
use carbutler_types::OutputFormat;

#[derive(Parser)]
#[command(name = "carbutler")]
#[command(version)]
#[command(about = "Personal vehicle maintenance tracker")]
#[command(long_about = "Tracks vehicles, tells you which services are due, and schedules \
appointments. Run without a subcommand for the interactive menu.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Data directory (vehicles.json, calendar.ics, outbox/). Uses config value if not specified.
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Output format (json, table). Uses config value if not specified.
    #[arg(long, short = 'f', global = true)]
    pub format: Option<OutputFormat>,

    /// Use mock calendar, email and OBD2 regardless of config
    #[arg(long, global = true)]
    pub mock: bool,

    /// Verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Add a vehicle
    Add {
        /// Manufacturer (e.g., Toyota)
        #[arg(long)]
        make: String,

        /// Model (e.g., Camry)
        #[arg(long)]
        model: String,

        /// Model year
        #[arg(long)]
        year: i32,

        /// Current odometer reading
        #[arg(long)]
        mileage: u32,

        /// VIN (a placeholder is generated if omitted)
        #[arg(long)]
        vin: Option<String>,
    },

    /// List vehicles
    List,

    /// Record a new odometer reading
    Mileage {
        /// Vehicle number (from `list`) or VIN
        vehicle: String,

        /// New odometer reading; must not be lower than the current one
        mileage: u32,

        /// Battery voltage measured at the same time
        #[arg(long)]
        battery: Option<f64>,
    },

    /// Read mileage and battery voltage from the OBD2 adapter
    Obd {
        /// Vehicle number (from `list`) or VIN
        vehicle: String,

        /// Only print the reading, don't apply it
        #[arg(long)]
        dry_run: bool,
    },

    /// Show maintenance due and battery state
    Check {
        /// Vehicle number (from `list`) or VIN
        vehicle: String,
    },

    /// Show dates available for booking
    Dates,

    /// Schedule a due service
    Schedule {
        /// Vehicle number (from `list`) or VIN
        vehicle: String,

        /// Service (e.g., "Oil Change" or oil_change)
        #[arg(long, short = 's')]
        service: String,

        /// Appointment date (YYYY-MM-DD), a weekday within the next 7 days
        #[arg(long, short = 'd')]
        date: NaiveDate,

        /// Email the service provider at this address (defaults to config default_email)
        #[arg(long)]
        email: Option<String>,

        /// Don't send any email, even if a default address is configured
        #[arg(long, conflicts_with = "email")]
        no_email: bool,
    },

    /// Show service history
    History {
        /// Vehicle number (from `list`) or VIN
        vehicle: String,
    },

    /// Remove a vehicle
    Remove {
        /// Vehicle number (from `list`) or VIN
        vehicle: String,
    },

    /// Manage configuration
    Config {
        /// Show current configuration
        #[arg(long)]
        show: bool,

        /// Set data directory
        #[arg(long)]
        set_data_dir: Option<PathBuf>,

        /// Set calendar backend
        #[arg(long)]
        set_calendar: Option<CalendarBackend>,

        /// Set email backend
        #[arg(long)]
        set_email: Option<EmailBackend>,

        /// Set OBD2 backend
        #[arg(long)]
        set_obd: Option<ObdBackend>,

        /// Set OBD2 snapshot file
        #[arg(long)]
        set_obd_snapshot: Option<PathBuf>,

        /// Set default service provider email
        #[arg(long)]
        set_default_email: Option<String>,

        /// Set sender address for outgoing email
        #[arg(long)]
        set_sender_email: Option<String>,

        /// Set default output format
        #[arg(long)]
        set_output: Option<OutputFormat>,

        /// Reset to defaults
        #[arg(long)]
        reset: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_no_subcommand_means_interactive() {
        let cli = Cli::try_parse_from(["carbutler", "--mock"]).unwrap();
        assert!(cli.command.is_none());
        assert!(cli.mock);
    }

    #[test]
    fn test_schedule_args() {
        let cli = Cli::try_parse_from([
            "carbutler",
            "schedule",
            "2",
            "--service",
            "Oil Change",
            "--date",
            "2026-10-19",
            "--format",
            "json",
        ])
        .unwrap();
        assert_eq!(cli.format, Some(OutputFormat::Json));
        match cli.command {
            Some(Commands::Schedule {
                vehicle,
                service,
                date,
                email,
                no_email,
            }) => {
                assert_eq!(vehicle, "2");
                assert_eq!(service, "Oil Change");
                assert_eq!(date, NaiveDate::from_ymd_opt(2026, 10, 19).unwrap());
                assert!(email.is_none());
                assert!(!no_email);
            }
            _ => panic!("expected schedule"),
        }
    }

    #[test]
    fn test_bad_date_rejected() {
        let result = Cli::try_parse_from([
            "carbutler", "schedule", "1", "-s", "oil_change", "-d", "next tuesday",
        ]);
        assert!(result.is_err());
    }
}
