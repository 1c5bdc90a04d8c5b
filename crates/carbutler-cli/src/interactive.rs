//! Interactive menu session
//!
//! Bad input is re-prompted; failures from the garage are shown and the
//! session returns to the main menu. End of input ends the session.

use std::io::{self, BufRead, Write};

use chrono::{Datelike, NaiveDateTime};

use carbutler_app::app::{validate_year, Garage, NewVehicle};
use carbutler_domain::format_miles;
use carbutler_domain::service::ScheduleRequest;
use carbutler_types::{OutputFormat, Result};

use crate::output::{
    print_dates, print_history, print_mileage_update, print_obd_reading, print_report,
    print_schedule_outcome, print_vehicles, status_icon,
};
use crate::prompt::Prompter;

const TABLE: OutputFormat = OutputFormat::Table;

enum Flow {
    Continue,
    Quit,
}

/// Run the menu on stdin/stdout
pub fn run(garage: Garage, default_email: Option<String>) -> Result<()> {
    let stdin = io::stdin();
    let prompter = Prompter::new(stdin.lock(), io::stdout());
    Session::new(garage, prompter, default_email, local_now).run()
}

fn local_now() -> NaiveDateTime {
    chrono::Local::now().naive_local()
}

pub struct Session<R, W> {
    garage: Garage,
    prompter: Prompter<R, W>,
    default_email: Option<String>,
    clock: fn() -> NaiveDateTime,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(
        garage: Garage,
        prompter: Prompter<R, W>,
        default_email: Option<String>,
        clock: fn() -> NaiveDateTime,
    ) -> Self {
        Self {
            garage,
            prompter,
            default_email,
            clock,
        }
    }

    #[cfg(test)]
    fn into_parts(self) -> (Garage, W) {
        (self.garage, self.prompter.into_output())
    }

    pub fn run(&mut self) -> Result<()> {
        writeln!(self.prompter.out(), "\n🚗 Welcome to CarButler!")?;
        while let Flow::Continue = self.main_menu()? {}
        writeln!(self.prompter.out(), "\n👋 Thank you for using CarButler!")?;
        Ok(())
    }

    fn main_menu(&mut self) -> Result<Flow> {
        let out = self.prompter.out();
        writeln!(out, "\n{}", "=".repeat(50))?;
        writeln!(out, "🚗 CarButler - Your Car Maintenance Assistant")?;
        writeln!(out, "{}", "=".repeat(50))?;

        let vehicles = self.garage.vehicles();
        if !vehicles.is_empty() {
            let out = self.prompter.out();
            writeln!(out, "\nActive Vehicles: {}", vehicles.len())?;
            if let [only] = vehicles {
                writeln!(out, "Current: {}", only)?;
            }
        }

        let out = self.prompter.out();
        writeln!(out, "\n📋 Main Menu:")?;
        writeln!(out, "1. Add Vehicle")?;
        writeln!(out, "2. Update Mileage")?;
        writeln!(out, "3. Check Maintenance")?;
        writeln!(out, "4. Schedule Service")?;
        writeln!(out, "5. View History")?;
        writeln!(out, "6. List Vehicles")?;
        writeln!(out, "7. Remove Vehicle")?;
        writeln!(out, "8. Exit")?;

        let Some(choice) = self.prompter.line("\nSelect option (1-8): ")? else {
            return Ok(Flow::Quit);
        };
        match choice.as_str() {
            "1" => self.add_vehicle(),
            "2" => self.update_mileage(),
            "3" => self.check_maintenance(),
            "4" => self.schedule_service(),
            "5" => self.view_history(),
            "6" => self.list_vehicles(),
            "7" => self.remove_vehicle(),
            "8" => Ok(Flow::Quit),
            _ => {
                writeln!(self.prompter.out(), "\n❌ Invalid option. Please try again.")?;
                self.pause()
            }
        }
    }

    fn pause(&mut self) -> Result<Flow> {
        Ok(match self.prompter.pause()? {
            Some(()) => Flow::Continue,
            None => Flow::Quit,
        })
    }

    /// Show a failed operation and go back to the menu
    fn failed(&mut self, err: impl std::fmt::Display) -> Result<Flow> {
        writeln!(self.prompter.out(), "\n❌ {}", err)?;
        self.pause()
    }

    fn required(&mut self, prompt: &str) -> Result<Option<String>> {
        loop {
            match self.prompter.line(prompt)? {
                None => return Ok(None),
                Some(answer) if answer.is_empty() => {
                    writeln!(self.prompter.out(), "This field is required.")?
                }
                Some(answer) => return Ok(Some(answer)),
            }
        }
    }

    /// `Some(None)` when there are no vehicles to pick from; `None` on EOF
    fn select_vehicle(&mut self) -> Result<Option<Option<usize>>> {
        let count = self.garage.vehicles().len();
        if count == 0 {
            writeln!(
                self.prompter.out(),
                "\n❌ No vehicles found. Please add a vehicle first."
            )?;
            return Ok(Some(None));
        }

        let out = self.prompter.out();
        writeln!(out, "\n🚗 Select Vehicle")?;
        writeln!(out, "{}", "-".repeat(40))?;
        for (i, vehicle) in self.garage.vehicles().iter().enumerate() {
            writeln!(self.prompter.out(), "{}. {}", i + 1, vehicle)?;
        }
        Ok(self
            .prompter
            .choose("\nSelect vehicle number: ", count)?
            .map(Some))
    }

    fn add_vehicle(&mut self) -> Result<Flow> {
        let out = self.prompter.out();
        writeln!(out, "\n🚗 Add New Vehicle")?;
        writeln!(out, "{}", "-".repeat(40))?;

        let Some(make) = self.required("Enter make (e.g., Toyota): ")? else {
            return Ok(Flow::Quit);
        };
        let Some(model) = self.required("Enter model (e.g., Camry): ")? else {
            return Ok(Flow::Quit);
        };
        let current_year = (self.clock)().year();
        let Some(year) = self.prompter.parse(
            "Enter year (e.g., 2020): ",
            "Please enter a valid year.",
            |year: &i32| {
                validate_year(*year, current_year)
                    .map(|_| ())
                    .map_err(|_| "Please enter a valid year.".to_string())
            },
        )?
        else {
            return Ok(Flow::Quit);
        };
        let Some(mileage) = self.prompter.parse(
            "Enter current mileage: ",
            "Please enter a valid number.",
            |_: &u32| Ok(()),
        )?
        else {
            return Ok(Flow::Quit);
        };

        let input = NewVehicle {
            make,
            model,
            year,
            mileage,
            vin: None,
        };
        match self.garage.add_vehicle(input, current_year) {
            Ok(index) => {
                let vehicle = self.garage.vehicle(index)?.to_string();
                writeln!(self.prompter.out(), "\n✅ Successfully added {}", vehicle)?;
                self.pause()
            }
            Err(e) => self.failed(e),
        }
    }

    fn update_mileage(&mut self) -> Result<Flow> {
        let index = match self.select_vehicle()? {
            None => return Ok(Flow::Quit),
            Some(None) => return self.pause(),
            Some(Some(index)) => index,
        };
        let vehicle = self.garage.vehicle(index)?.clone();

        let out = self.prompter.out();
        writeln!(out, "\n📏 Update Mileage for {}", vehicle)?;
        writeln!(out, "{}", "-".repeat(40))?;
        writeln!(out, "Current mileage: {} miles", format_miles(vehicle.mileage))?;

        let Some(use_obd) = self.prompter.confirm("\nUse OBD2 reader? (y/n) [n]: ")? else {
            return Ok(Flow::Quit);
        };
        if use_obd {
            writeln!(self.prompter.out(), "\n🔌 Reading from OBD2...")?;
            match self.garage.read_obd() {
                Ok(reading) => {
                    print_obd_reading(self.prompter.out(), TABLE, &reading)?;
                    let Some(accept) = self.prompter.confirm("\nAccept these readings? (y/n): ")?
                    else {
                        return Ok(Flow::Quit);
                    };
                    if !accept {
                        return self.pause();
                    }
                    match self.garage.apply_obd_reading(index, reading) {
                        Ok(update) => {
                            writeln!(self.prompter.out())?;
                            let updated = self.garage.vehicle(index)?;
                            print_mileage_update(self.prompter.out(), TABLE, updated, &update)?;
                            return self.pause();
                        }
                        Err(e) => writeln!(self.prompter.out(), "\n❌ {}", e)?,
                    }
                }
                Err(e) => writeln!(self.prompter.out(), "\n❌ {}", e)?,
            }
        }

        let current = vehicle.mileage;
        let Some(mileage) = self.prompter.parse(
            "Enter new mileage: ",
            "Please enter a valid number.",
            |mileage: &u32| {
                if *mileage >= current {
                    Ok(())
                } else {
                    Err("New mileage must not be lower than current mileage.".to_string())
                }
            },
        )?
        else {
            return Ok(Flow::Quit);
        };

        match self.garage.update_mileage(index, mileage, None) {
            Ok(update) => {
                writeln!(self.prompter.out())?;
                let updated = self.garage.vehicle(index)?;
                print_mileage_update(self.prompter.out(), TABLE, updated, &update)?;
                self.pause()
            }
            Err(e) => self.failed(e),
        }
    }

    fn check_maintenance(&mut self) -> Result<Flow> {
        let index = match self.select_vehicle()? {
            None => return Ok(Flow::Quit),
            Some(None) => return self.pause(),
            Some(Some(index)) => index,
        };
        let report = self.garage.check(index)?;
        writeln!(self.prompter.out())?;
        print_report(self.prompter.out(), TABLE, &report)?;
        self.pause()
    }

    fn schedule_service(&mut self) -> Result<Flow> {
        let index = match self.select_vehicle()? {
            None => return Ok(Flow::Quit),
            Some(None) => return self.pause(),
            Some(Some(index)) => index,
        };
        let report = self.garage.check(index)?;
        if report.due_items.is_empty() {
            writeln!(self.prompter.out(), "\n✅ No maintenance currently due!")?;
            return self.pause();
        }

        let out = self.prompter.out();
        writeln!(out, "\n📅 Schedule Service for {}", report.vehicle)?;
        writeln!(out, "{}", "-".repeat(40))?;
        writeln!(out, "Services due:")?;
        for (i, item) in report.due_items.iter().enumerate() {
            writeln!(
                self.prompter.out(),
                "{}. {} {}",
                i + 1,
                status_icon(item.urgency),
                item.service_name()
            )?;
        }
        let Some(choice) = self
            .prompter
            .choose("\nSelect service to schedule: ", report.due_items.len())?
        else {
            return Ok(Flow::Quit);
        };
        let service = report.due_items[choice].service_name();

        let now = (self.clock)();
        let dates = self.garage.candidate_dates(now);
        writeln!(self.prompter.out(), "\n📅 Available dates for {}:", service)?;
        print_dates(self.prompter.out(), TABLE, &dates)?;
        let Some(choice) = self.prompter.choose("\nSelect date: ", dates.len())? else {
            return Ok(Flow::Quit);
        };

        let mut request = ScheduleRequest::new(service, dates[choice]);
        let Some(send) = self
            .prompter
            .confirm("\nSend email to service provider? (y/n): ")?
        else {
            return Ok(Flow::Quit);
        };
        if send {
            let prompt = match &self.default_email {
                Some(default) => format!("Enter service provider email [{}]: ", default),
                None => "Enter service provider email: ".to_string(),
            };
            let Some(answer) = self.prompter.line(&prompt)? else {
                return Ok(Flow::Quit);
            };
            let address = if answer.is_empty() {
                self.default_email.clone().unwrap_or_default()
            } else {
                answer
            };
            request = request.with_notify(address);
        }

        match self.garage.schedule(index, request, now) {
            Ok(outcome) => {
                writeln!(self.prompter.out())?;
                print_schedule_outcome(self.prompter.out(), TABLE, &outcome)?;
                self.pause()
            }
            Err(e) => self.failed(e),
        }
    }

    fn view_history(&mut self) -> Result<Flow> {
        let index = match self.select_vehicle()? {
            None => return Ok(Flow::Quit),
            Some(None) => return self.pause(),
            Some(Some(index)) => index,
        };
        let vehicle = self.garage.vehicle(index)?;
        let history = vehicle.history();
        writeln!(self.prompter.out())?;
        print_history(self.prompter.out(), TABLE, vehicle, history)?;
        self.pause()
    }

    fn list_vehicles(&mut self) -> Result<Flow> {
        writeln!(self.prompter.out())?;
        print_vehicles(self.prompter.out(), TABLE, self.garage.vehicles())?;
        self.pause()
    }

    fn remove_vehicle(&mut self) -> Result<Flow> {
        let index = match self.select_vehicle()? {
            None => return Ok(Flow::Quit),
            Some(None) => return self.pause(),
            Some(Some(index)) => index,
        };
        let vehicle = self.garage.vehicle(index)?.to_string();
        let Some(confirmed) = self
            .prompter
            .confirm(&format!("Remove {} and its history? (y/n): ", vehicle))?
        else {
            return Ok(Flow::Quit);
        };
        if !confirmed {
            return Ok(Flow::Continue);
        }
        match self.garage.remove_vehicle(index) {
            Ok(removed) => {
                writeln!(self.prompter.out(), "\n✅ Removed {}", removed)?;
                self.pause()
            }
            Err(e) => self.failed(e),
        }
    }
}
