//! Command handlers

use std::io::{self, Write};
use std::path::PathBuf;

use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike};
use tracing::debug;

use carbutler_app::app::{Collaborators, Garage, NewVehicle};
use carbutler_app::config::{CalendarBackend, Config, EmailBackend, ObdBackend};
use carbutler_app::repository::open_vehicle_store;
use carbutler_domain::service::{candidate_dates, ScheduleRequest};
use carbutler_types::{OutputFormat, Result};

use crate::cli::{Cli, Commands};
use crate::interactive;
use crate::output::{
    print_dates, print_history, print_mileage_update, print_obd_reading, print_report,
    print_schedule_outcome, print_vehicle_added, print_vehicles,
};

fn now() -> NaiveDateTime {
    chrono::Local::now().naive_local()
}

fn open_garage(config: &Config) -> Result<Garage> {
    let store = open_vehicle_store(config)?;
    let collaborators = Collaborators::from_config(config)?;
    Ok(Garage::new(store, collaborators))
}

/// Execute CLI command
pub fn execute(cli: Cli) -> Result<()> {
    // Load config
    let mut config = Config::load()?;

    // Override from CLI args
    if let Some(ref data_dir) = cli.data_dir {
        config.data_dir = Some(data_dir.clone());
    }
    if cli.mock {
        config = config.with_mocks();
    }
    let output_format = cli.format.unwrap_or(config.output_format);
    debug!("Data dir: {:?}, output: {}", config.data_dir()?, output_format);

    let Some(command) = cli.command else {
        let garage = open_garage(&config)?;
        return interactive::run(garage, config.default_email.clone());
    };

    match command {
        Commands::Add {
            make,
            model,
            year,
            mileage,
            vin,
        } => cmd_add(
            &config,
            output_format,
            NewVehicle {
                make,
                model,
                year,
                mileage,
                vin,
            },
        ),

        Commands::List => cmd_list(&config, output_format),

        Commands::Mileage {
            vehicle,
            mileage,
            battery,
        } => cmd_mileage(&config, output_format, &vehicle, mileage, battery),

        Commands::Obd { vehicle, dry_run } => cmd_obd(&config, output_format, &vehicle, dry_run),

        Commands::Check { vehicle } => cmd_check(&config, output_format, &vehicle),

        Commands::Dates => cmd_dates(output_format),

        Commands::Schedule {
            vehicle,
            service,
            date,
            email,
            no_email,
        } => {
            // Explicit address wins; otherwise fall back to config unless suppressed
            let notify = if no_email {
                None
            } else {
                email.or_else(|| config.default_email.clone())
            };
            cmd_schedule(&config, output_format, &vehicle, service, date, notify)
        }

        Commands::History { vehicle } => cmd_history(&config, output_format, &vehicle),

        Commands::Remove { vehicle } => cmd_remove(&config, &vehicle),

        Commands::Config {
            show,
            set_data_dir,
            set_calendar,
            set_email,
            set_obd,
            set_obd_snapshot,
            set_default_email,
            set_sender_email,
            set_output,
            reset,
        } => cmd_config(
            show,
            set_data_dir,
            set_calendar,
            set_email,
            set_obd,
            set_obd_snapshot,
            set_default_email,
            set_sender_email,
            set_output,
            reset,
        ),
    }
}

fn cmd_add(config: &Config, output_format: OutputFormat, input: NewVehicle) -> Result<()> {
    let mut garage = open_garage(config)?;
    let index = garage.add_vehicle(input, now().year())?;
    print_vehicle_added(&mut io::stdout(), output_format, garage.vehicle(index)?)
}

fn cmd_list(config: &Config, output_format: OutputFormat) -> Result<()> {
    let garage = open_garage(config)?;
    print_vehicles(&mut io::stdout(), output_format, garage.vehicles())
}

fn cmd_mileage(
    config: &Config,
    output_format: OutputFormat,
    selector: &str,
    mileage: u32,
    battery: Option<f64>,
) -> Result<()> {
    let mut garage = open_garage(config)?;
    let index = garage.resolve(selector)?;
    let update = garage.update_mileage(index, mileage, battery)?;
    print_mileage_update(&mut io::stdout(), output_format, garage.vehicle(index)?, &update)
}

fn cmd_obd(config: &Config, output_format: OutputFormat, selector: &str, dry_run: bool) -> Result<()> {
    let mut garage = open_garage(config)?;
    let index = garage.resolve(selector)?;
    let reading = garage.read_obd()?;

    if dry_run {
        return print_obd_reading(&mut io::stdout(), output_format, &reading);
    }

    let update = garage.apply_obd_reading(index, reading)?;
    let mut stdout = io::stdout();
    if output_format == OutputFormat::Table {
        print_obd_reading(&mut stdout, output_format, &reading)?;
        writeln!(stdout)?;
    }
    print_mileage_update(&mut stdout, output_format, garage.vehicle(index)?, &update)
}

fn cmd_check(config: &Config, output_format: OutputFormat, selector: &str) -> Result<()> {
    let garage = open_garage(config)?;
    let index = garage.resolve(selector)?;
    let report = garage.check(index)?;
    print_report(&mut io::stdout(), output_format, &report)
}

fn cmd_dates(output_format: OutputFormat) -> Result<()> {
    let dates = candidate_dates(now());
    let mut stdout = io::stdout();
    if output_format == OutputFormat::Table {
        writeln!(stdout, "📅 Available dates:")?;
    }
    print_dates(&mut stdout, output_format, &dates)
}

fn cmd_schedule(
    config: &Config,
    output_format: OutputFormat,
    selector: &str,
    service: String,
    date: NaiveDate,
    notify: Option<String>,
) -> Result<()> {
    let mut garage = open_garage(config)?;
    let index = garage.resolve(selector)?;

    // Appointments keep the current time of day, like the interactive picker
    let now = now();
    let time = now
        .time()
        .with_nanosecond(0)
        .unwrap_or_else(|| now.time());
    let mut request = ScheduleRequest::new(service, date.and_time(time));
    if let Some(to) = notify {
        request = request.with_notify(to);
    }

    let outcome = garage.schedule(index, request, now)?;
    print_schedule_outcome(&mut io::stdout(), output_format, &outcome)
}

fn cmd_history(config: &Config, output_format: OutputFormat, selector: &str) -> Result<()> {
    let garage = open_garage(config)?;
    let index = garage.resolve(selector)?;
    let vehicle = garage.vehicle(index)?;
    print_history(&mut io::stdout(), output_format, vehicle, vehicle.history())
}

fn cmd_remove(config: &Config, selector: &str) -> Result<()> {
    let mut garage = open_garage(config)?;
    let index = garage.resolve(selector)?;
    let removed = garage.remove_vehicle(index)?;
    println!("Removed {} (VIN {})", removed, removed.vin);
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn cmd_config(
    show: bool,
    set_data_dir: Option<PathBuf>,
    set_calendar: Option<CalendarBackend>,
    set_email: Option<EmailBackend>,
    set_obd: Option<ObdBackend>,
    set_obd_snapshot: Option<PathBuf>,
    set_default_email: Option<String>,
    set_sender_email: Option<String>,
    set_output: Option<OutputFormat>,
    reset: bool,
) -> Result<()> {
    if reset {
        let config = Config::default();
        config.save()?;
        println!("Configuration reset to defaults");
        println!("\n{}", config);
        return Ok(());
    }

    let mut config = Config::load()?;
    let mut modified = false;

    if let Some(data_dir) = set_data_dir {
        config.data_dir = Some(data_dir);
        modified = true;
    }

    if let Some(backend) = set_calendar {
        config.calendar_backend = backend;
        modified = true;
    }

    if let Some(backend) = set_email {
        config.email_backend = backend;
        modified = true;
    }

    if let Some(backend) = set_obd {
        config.obd_backend = backend;
        modified = true;
    }

    if let Some(path) = set_obd_snapshot {
        config.obd_snapshot_path = Some(path);
        modified = true;
    }

    if let Some(email) = set_default_email {
        // Empty string clears it
        config.default_email = Some(email).filter(|e| !e.trim().is_empty());
        modified = true;
    }

    if let Some(email) = set_sender_email {
        config.sender_email = email;
        modified = true;
    }

    if let Some(output_format) = set_output {
        config.output_format = output_format;
        modified = true;
    }

    if modified {
        config.save()?;
        println!("Configuration updated");
    }

    if show || !modified {
        println!("{}", config);
    }

    Ok(())
}
