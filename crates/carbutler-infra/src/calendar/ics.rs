//! iCalendar file calendar
//!
//! Appends one `VEVENT` per appointment to a local `.ics` file that any
//! calendar application can subscribe to or import.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{Duration, NaiveDateTime, Utc};
use tracing::info;

use carbutler_domain::CalendarService;
use carbutler_types::{Error, Result};

const CALENDAR_HEADER: &str = "BEGIN:VCALENDAR\r\nVERSION:2.0\r\nPRODID:-//carbutler//EN\r\n";
const CALENDAR_FOOTER: &str = "END:VCALENDAR\r\n";
const ICS_TIME_FORMAT: &str = "%Y%m%dT%H%M%S";

/// Calendar backed by an iCalendar (RFC 5545) file
pub struct IcsCalendar {
    path: PathBuf,
}

impl IcsCalendar {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_calendar(&self) -> Result<String> {
        if !self.path.exists() {
            return Ok(CALENDAR_HEADER.to_string());
        }
        let content = fs::read_to_string(&self.path)?;
        let body = content.trim_end();
        match body.strip_suffix("END:VCALENDAR") {
            Some(open) => Ok(open.to_string()),
            None => Err(Error::Calendar(format!(
                "{} is not an iCalendar file",
                self.path.display()
            ))),
        }
    }
}

/// Escape TEXT values per RFC 5545 section 3.3.11
fn escape_text(value: &str) -> String {
    value
        .replace('\\', "\\\\")
        .replace(';', "\\;")
        .replace(',', "\\,")
        .replace('\n', "\\n")
}

impl CalendarService for IcsCalendar {
    fn create_event(&self, title: &str, date: NaiveDateTime, duration_minutes: u32) -> Result<String> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let event_id = uuid::Uuid::new_v4().to_string();
        let end = date + Duration::minutes(i64::from(duration_minutes));

        let mut calendar = self.read_calendar()?;
        if !calendar.ends_with('\n') {
            calendar.push_str("\r\n");
        }
        calendar.push_str("BEGIN:VEVENT\r\n");
        calendar.push_str(&format!("UID:{}@carbutler\r\n", event_id));
        calendar.push_str(&format!("DTSTAMP:{}Z\r\n", Utc::now().format(ICS_TIME_FORMAT)));
        calendar.push_str(&format!("DTSTART:{}\r\n", date.format(ICS_TIME_FORMAT)));
        calendar.push_str(&format!("DTEND:{}\r\n", end.format(ICS_TIME_FORMAT)));
        calendar.push_str(&format!("SUMMARY:{}\r\n", escape_text(title)));
        calendar.push_str("END:VEVENT\r\n");
        calendar.push_str(CALENDAR_FOOTER);

        fs::write(&self.path, calendar)?;
        info!("Added event {} to {}", event_id, self.path.display());
        Ok(event_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tempfile::tempdir;

    fn date() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 10, 20)
            .unwrap()
            .and_hms_opt(9, 30, 0)
            .unwrap()
    }

    #[test]
    fn test_creates_calendar_with_event() {
        let temp_dir = tempdir().expect("Failed to create temp dir");
        let calendar = IcsCalendar::new(temp_dir.path().join("calendar.ics"));

        let id = calendar
            .create_event("Oil Change - 2020 Toyota Camry (50,000 miles)", date(), 60)
            .unwrap();

        let content = fs::read_to_string(calendar.path()).unwrap();
        assert!(content.starts_with("BEGIN:VCALENDAR\r\n"));
        assert!(content.ends_with("END:VCALENDAR\r\n"));
        assert!(content.contains(&format!("UID:{}@carbutler", id)));
        assert!(content.contains("DTSTART:20261020T093000"));
        assert!(content.contains("DTEND:20261020T103000"));
        assert!(content.contains("SUMMARY:Oil Change - 2020 Toyota Camry (50\\,000 miles)"));
    }

    #[test]
    fn test_appends_to_existing_calendar() {
        let temp_dir = tempdir().expect("Failed to create temp dir");
        let calendar = IcsCalendar::new(temp_dir.path().join("calendar.ics"));

        let first = calendar.create_event("Oil Change", date(), 60).unwrap();
        let second = calendar.create_event("Tire Rotation", date(), 60).unwrap();
        assert_ne!(first, second);

        let content = fs::read_to_string(calendar.path()).unwrap();
        assert_eq!(content.matches("BEGIN:VCALENDAR").count(), 1);
        assert_eq!(content.matches("END:VCALENDAR").count(), 1);
        assert_eq!(content.matches("BEGIN:VEVENT").count(), 2);
    }

    #[test]
    fn test_rejects_foreign_file() {
        let temp_dir = tempdir().expect("Failed to create temp dir");
        let path = temp_dir.path().join("calendar.ics");
        fs::write(&path, "not a calendar").unwrap();

        let result = IcsCalendar::new(path).create_event("Oil Change", date(), 60);
        assert!(matches!(result, Err(Error::Calendar(_))));
    }

    #[test]
    fn test_escape_text() {
        assert_eq!(escape_text("a,b;c\\d\ne"), "a\\,b\\;c\\\\d\\ne");
    }
}
