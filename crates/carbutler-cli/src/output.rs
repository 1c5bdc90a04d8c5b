//! Output formatting module
//!
//! Printers take the writer explicitly so the interactive session and the
//! subcommands share them.

use std::io::Write;

use chrono::NaiveDateTime;
use serde::Serialize;

use carbutler_app::app::{MaintenanceReport, MileageUpdate, ObdReading};
use carbutler_domain::service::{
    CalendarStatus, DueItem, NotificationStatus, ScheduleOutcome, Urgency,
};
use carbutler_domain::{format_miles, ServiceHistoryEntry, VehicleRecord};
use carbutler_types::{OutputFormat, Result};

/// Date format used wherever a day is shown to the user
pub const DAY_FORMAT: &str = "%A, %B %d, %Y";

fn print_json<W: Write, T: Serialize + ?Sized>(out: &mut W, value: &T) -> Result<()> {
    let content = serde_json::to_string_pretty(value)?;
    writeln!(out, "{}", content)?;
    Ok(())
}

fn miles(value: i64) -> String {
    format_miles(u32::try_from(value.max(0)).unwrap_or(u32::MAX))
}

pub fn status_icon(urgency: Urgency) -> &'static str {
    match urgency {
        Urgency::Overdue => "🔴",
        Urgency::DueSoon => "🟡",
        Urgency::Upcoming => "🟢",
    }
}

/// One line per due item, e.g. `🟡 Oil Change: Due in 200 miles`
pub fn due_line(item: &DueItem) -> String {
    match item.urgency {
        Urgency::Overdue => format!(
            "{} {}: OVERDUE ({} miles past due)",
            status_icon(item.urgency),
            item.service_name(),
            miles(item.miles_overdue())
        ),
        _ => format!(
            "{} {}: Due in {} miles",
            status_icon(item.urgency),
            item.service_name(),
            miles(item.miles_remaining)
        ),
    }
}

pub fn print_vehicles<W: Write>(
    out: &mut W,
    format: OutputFormat,
    vehicles: &[VehicleRecord],
) -> Result<()> {
    if format == OutputFormat::Json {
        return print_json(out, vehicles);
    }

    writeln!(out, "Vehicles")?;
    writeln!(out, "========")?;
    if vehicles.is_empty() {
        writeln!(out, "No vehicles found. Add one with: carbutler add")?;
        return Ok(());
    }

    writeln!(
        out,
        "{:>3}  {:<30} {:<17} {:>10} {:>8}",
        "#", "Vehicle", "VIN", "Mileage", "Battery"
    )?;
    writeln!(out, "{}", "-".repeat(72))?;
    for (i, vehicle) in vehicles.iter().enumerate() {
        let name = format!("{} {} {}", vehicle.year, vehicle.make, vehicle.model);
        // Truncate name if too long
        let name = if name.chars().count() > 30 {
            format!("{}...", name.chars().take(27).collect::<String>())
        } else {
            name
        };
        writeln!(
            out,
            "{:>3}  {:<30} {:<17} {:>10} {:>7.2}V",
            i + 1,
            name,
            vehicle.vin,
            format_miles(vehicle.mileage),
            vehicle.battery_voltage
        )?;
    }
    Ok(())
}

pub fn print_vehicle_added<W: Write>(
    out: &mut W,
    format: OutputFormat,
    vehicle: &VehicleRecord,
) -> Result<()> {
    if format == OutputFormat::Json {
        return print_json(out, vehicle);
    }
    writeln!(out, "✅ Successfully added {}", vehicle)?;
    writeln!(out, "   VIN: {}", vehicle.vin)?;
    Ok(())
}

pub fn print_report<W: Write>(
    out: &mut W,
    format: OutputFormat,
    report: &MaintenanceReport,
) -> Result<()> {
    if format == OutputFormat::Json {
        return print_json(out, report);
    }

    writeln!(out, "🔧 Maintenance Status for {}", report.vehicle)?;
    writeln!(out, "{}", "-".repeat(40))?;
    if report.due_items.is_empty() {
        writeln!(out, "✅ All maintenance up to date!")?;
    } else {
        for item in &report.due_items {
            writeln!(out, "{}", due_line(item))?;
        }
    }
    writeln!(out)?;
    writeln!(
        out,
        "🔋 Battery Status: {}V ({})",
        report.battery_voltage,
        report.battery.description()
    )?;
    Ok(())
}

pub fn print_mileage_update<W: Write>(
    out: &mut W,
    format: OutputFormat,
    vehicle: &VehicleRecord,
    update: &MileageUpdate,
) -> Result<()> {
    if format == OutputFormat::Json {
        return print_json(out, update);
    }

    writeln!(out, "✅ Mileage updated to {} miles", format_miles(update.mileage))?;
    if update.mileage > update.previous_mileage {
        writeln!(
            out,
            "   (+{} since last update)",
            format_miles(update.mileage - update.previous_mileage)
        )?;
    }
    if update.low_battery_warning {
        writeln!(
            out,
            "⚠️  Warning: Battery voltage low ({}V) on {}",
            update.battery_voltage, vehicle
        )?;
    }
    Ok(())
}

pub fn print_obd_reading<W: Write>(
    out: &mut W,
    format: OutputFormat,
    reading: &ObdReading,
) -> Result<()> {
    if format == OutputFormat::Json {
        return print_json(out, reading);
    }

    writeln!(out, "📊 OBD2 Data:")?;
    match reading.mileage {
        Some(miles) => writeln!(out, "   Mileage: {} miles", format_miles(miles))?,
        None => writeln!(out, "   Mileage: (unavailable)")?,
    }
    match reading.battery_voltage {
        Some(volts) => writeln!(out, "   Battery: {}V", volts)?,
        None => writeln!(out, "   Battery: (unavailable)")?,
    }
    Ok(())
}

#[derive(Serialize)]
struct DateRow {
    date: String,
    label: String,
}

pub fn print_dates<W: Write>(
    out: &mut W,
    format: OutputFormat,
    dates: &[NaiveDateTime],
) -> Result<()> {
    if format == OutputFormat::Json {
        let rows: Vec<DateRow> = dates
            .iter()
            .map(|d| DateRow {
                date: d.format("%Y-%m-%d").to_string(),
                label: d.format(DAY_FORMAT).to_string(),
            })
            .collect();
        return print_json(out, &rows);
    }

    for (i, date) in dates.iter().enumerate() {
        writeln!(out, "{}. {}", i + 1, date.format(DAY_FORMAT))?;
    }
    Ok(())
}

pub fn print_schedule_outcome<W: Write>(
    out: &mut W,
    format: OutputFormat,
    outcome: &ScheduleOutcome,
) -> Result<()> {
    if format == OutputFormat::Json {
        return print_json(out, outcome);
    }

    match &outcome.calendar {
        CalendarStatus::Created { event_id } => {
            writeln!(out, "✅ Calendar event created! (ID: {})", event_id)?
        }
        CalendarStatus::Failed { reason } => {
            writeln!(out, "❌ Calendar event could not be created: {}", reason)?
        }
    }
    match &outcome.notification {
        NotificationStatus::NotRequested => {}
        NotificationStatus::Sent { to } => {
            writeln!(out, "✅ Email sent successfully to {}!", to)?
        }
        NotificationStatus::Failed { to, reason } => {
            writeln!(out, "❌ Failed to send email to {}: {}", to, reason)?
        }
    }
    writeln!(
        out,
        "📋 {} scheduled for {}",
        outcome.entry.service,
        outcome.entry.scheduled_date.format(DAY_FORMAT)
    )?;
    Ok(())
}

pub fn print_history<W: Write>(
    out: &mut W,
    format: OutputFormat,
    vehicle: &VehicleRecord,
    history: &[ServiceHistoryEntry],
) -> Result<()> {
    if format == OutputFormat::Json {
        return print_json(out, history);
    }

    writeln!(out, "📊 Maintenance History for {}", vehicle)?;
    writeln!(out, "{}", "-".repeat(40))?;
    if history.is_empty() {
        writeln!(out, "No maintenance history recorded.")?;
        return Ok(());
    }
    for entry in history {
        writeln!(out)?;
        writeln!(out, "• {}", entry.service)?;
        writeln!(out, "  Date: {}", entry.scheduled_date.format("%Y-%m-%d %H:%M"))?;
        writeln!(out, "  Mileage: {}", format_miles(entry.mileage))?;
        writeln!(out, "  Status: {}", entry.status.label())?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use carbutler_domain::ServiceKind;
    use chrono::NaiveDate;

    #[test]
    fn test_due_line() {
        let soon = DueItem {
            kind: ServiceKind::OilChange,
            miles_remaining: 200,
            urgency: Urgency::DueSoon,
            miles_since_service: 7_300,
        };
        assert_eq!(due_line(&soon), "🟡 Oil Change: Due in 200 miles");

        let overdue = DueItem {
            kind: ServiceKind::TireRotation,
            miles_remaining: 0,
            urgency: Urgency::Overdue,
            miles_since_service: 9_250,
        };
        assert_eq!(
            due_line(&overdue),
            "🔴 Tire Rotation: OVERDUE (1,250 miles past due)"
        );
    }

    #[test]
    fn test_history_table() {
        let vehicle = VehicleRecord::new("Honda", "Civic", 2018, 80_000).with_vin("TESTVIN01");
        let date = NaiveDate::from_ymd_opt(2026, 10, 19)
            .unwrap()
            .and_hms_opt(9, 30, 0)
            .unwrap();
        let history = vec![ServiceHistoryEntry::scheduled("Oil Change", date, 80_000)];

        let mut out = Vec::new();
        print_history(&mut out, OutputFormat::Table, &vehicle, &history).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("• Oil Change"));
        assert!(text.contains("Date: 2026-10-19 09:30"));
        assert!(text.contains("Mileage: 80,000"));
        assert!(text.contains("Status: SCHEDULED"));
    }

    #[test]
    fn test_vehicles_json_is_an_array() {
        let vehicles = vec![VehicleRecord::new("Honda", "Civic", 2018, 80_000).with_vin("TESTVIN01")];
        let mut out = Vec::new();
        print_vehicles(&mut out, OutputFormat::Json, &vehicles).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value[0]["vin"], "TESTVIN01");
        assert_eq!(value[0]["mileage"], 80_000);
    }

    #[test]
    fn test_dates_table() {
        let monday = NaiveDate::from_ymd_opt(2026, 10, 19)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap();
        let mut out = Vec::new();
        print_dates(&mut out, OutputFormat::Table, &[monday]).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "1. Monday, October 19, 2026\n");
    }
}
