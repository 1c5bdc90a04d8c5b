//! Service scheduling
//!
//! Turns a chosen service and appointment date into a calendar event, an
//! optional email to the service provider, and a history entry on the
//! vehicle. Calendar and email are best-effort: their failures are reported
//! in the [`ScheduleOutcome`] but never prevent the history entry from being
//! recorded. Nothing is retried or rolled back.

use chrono::NaiveDateTime;
use serde::Serialize;
use tracing::{debug, info, warn};

use carbutler_types::{Error, Result};

use crate::model::{format_miles, ServiceHistoryEntry, VehicleRecord};
use crate::ports::{CalendarService, EmailService};

/// Length of the calendar block reserved for an appointment
pub const APPOINTMENT_DURATION_MINUTES: u32 = 60;

/// What the user picked
#[derive(Debug, Clone)]
pub struct ScheduleRequest {
    /// Service display name (or free text)
    pub service: String,
    pub date: NaiveDateTime,
    /// Service provider address to notify, if any
    pub notify: Option<String>,
}

impl ScheduleRequest {
    pub fn new(service: impl Into<String>, date: NaiveDateTime) -> Self {
        Self {
            service: service.into(),
            date,
            notify: None,
        }
    }

    pub fn with_notify(mut self, to: impl Into<String>) -> Self {
        self.notify = Some(to.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CalendarStatus {
    Created { event_id: String },
    Failed { reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum NotificationStatus {
    NotRequested,
    Sent { to: String },
    Failed { to: String, reason: String },
}

/// Result of a scheduling call
#[derive(Debug, Clone, Serialize)]
pub struct ScheduleOutcome {
    /// The entry appended to the vehicle's history
    pub entry: ServiceHistoryEntry,
    pub calendar: CalendarStatus,
    pub notification: NotificationStatus,
}

/// Build the subject and body of the request sent to a service provider
pub fn compose_request_email(
    vehicle: &VehicleRecord,
    service: &str,
    date: NaiveDateTime,
) -> (String, String) {
    let subject = format!("Service Request: {} for {}", service, vehicle);
    let body = format!(
        "Dear Service Provider,\n\
         \n\
         I would like to schedule a {service} for my {vehicle}.\n\
         \n\
         Preferred Date: {date}\n\
         Current Mileage: {mileage} miles\n\
         \n\
         Please confirm availability.\n\
         \n\
         Thank you,\n\
         CarButler User\n",
        service = service,
        vehicle = vehicle,
        date = date.format("%A, %B %d, %Y"),
        mileage = format_miles(vehicle.mileage),
    );
    (subject, body)
}

/// Coordinates calendar and email collaborators with the vehicle history
pub struct ServiceScheduler<'a> {
    calendar: &'a dyn CalendarService,
    email: &'a dyn EmailService,
}

impl<'a> ServiceScheduler<'a> {
    pub fn new(calendar: &'a dyn CalendarService, email: &'a dyn EmailService) -> Self {
        Self { calendar, email }
    }

    /// Schedule `request.service` for `vehicle` and append a history entry.
    ///
    /// Fails only when no service was named; collaborator failures are
    /// reported in the outcome.
    pub fn schedule(
        &self,
        vehicle: &mut VehicleRecord,
        request: &ScheduleRequest,
    ) -> Result<ScheduleOutcome> {
        let service = request.service.trim();
        if service.is_empty() {
            return Err(Error::InvalidInput("no service selected".to_string()));
        }

        let title = format!("{} - {}", service, vehicle);
        let calendar = match self
            .calendar
            .create_event(&title, request.date, APPOINTMENT_DURATION_MINUTES)
        {
            Ok(event_id) => {
                info!("Calendar event created: {} ({})", title, event_id);
                CalendarStatus::Created { event_id }
            }
            Err(e) => {
                warn!("Calendar event creation failed: {}", e);
                CalendarStatus::Failed {
                    reason: e.to_string(),
                }
            }
        };

        let notification = match request.notify.as_deref().map(str::trim) {
            None | Some("") => NotificationStatus::NotRequested,
            Some(to) => {
                let (subject, body) = compose_request_email(vehicle, service, request.date);
                match self.email.send_email(to, &subject, &body) {
                    Ok(()) => {
                        info!("Service request emailed to {}", to);
                        NotificationStatus::Sent { to: to.to_string() }
                    }
                    Err(e) => {
                        warn!("Service request email to {} failed: {}", to, e);
                        NotificationStatus::Failed {
                            to: to.to_string(),
                            reason: e.to_string(),
                        }
                    }
                }
            }
        };

        let entry = ServiceHistoryEntry::scheduled(service, request.date, vehicle.mileage);
        vehicle.append_history(entry.clone());
        debug!(
            "History for {} now has {} entries",
            vehicle.vin,
            vehicle.history().len()
        );

        Ok(ScheduleOutcome {
            entry,
            calendar,
            notification,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ServiceStatus;
    use chrono::NaiveDate;
    use std::cell::RefCell;

    #[derive(Default)]
    struct RecordingCalendar {
        events: RefCell<Vec<(String, NaiveDateTime, u32)>>,
    }

    impl CalendarService for RecordingCalendar {
        fn create_event(&self, title: &str, date: NaiveDateTime, duration_minutes: u32) -> Result<String> {
            let mut events = self.events.borrow_mut();
            events.push((title.to_string(), date, duration_minutes));
            Ok(format!("evt_{}", events.len()))
        }
    }

    struct FailingCalendar;

    impl CalendarService for FailingCalendar {
        fn create_event(&self, _title: &str, _date: NaiveDateTime, _duration: u32) -> Result<String> {
            Err(Error::Calendar("calendar offline".to_string()))
        }
    }

    #[derive(Default)]
    struct RecordingEmail {
        sent: RefCell<Vec<(String, String, String)>>,
    }

    impl EmailService for RecordingEmail {
        fn send_email(&self, to: &str, subject: &str, body: &str) -> Result<()> {
            self.sent
                .borrow_mut()
                .push((to.to_string(), subject.to_string(), body.to_string()));
            Ok(())
        }
    }

    struct FailingEmail;

    impl EmailService for FailingEmail {
        fn send_email(&self, _to: &str, _subject: &str, _body: &str) -> Result<()> {
            Err(Error::Email("smtp unreachable".to_string()))
        }
    }

    fn camry() -> VehicleRecord {
        VehicleRecord::new("Toyota", "Camry", 2020, 50_000).with_vin("TEST00001")
    }

    fn date(day: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 10, day)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_schedule_appends_entry_and_creates_event() {
        let calendar = RecordingCalendar::default();
        let email = RecordingEmail::default();
        let scheduler = ServiceScheduler::new(&calendar, &email);
        let mut vehicle = camry();

        let outcome = scheduler
            .schedule(&mut vehicle, &ScheduleRequest::new("Oil Change", date(20)))
            .unwrap();

        assert_eq!(vehicle.history().len(), 1);
        assert_eq!(vehicle.history()[0], outcome.entry);
        assert_eq!(outcome.entry.status, ServiceStatus::Scheduled);
        assert_eq!(outcome.entry.mileage, 50_000);
        assert_eq!(
            outcome.calendar,
            CalendarStatus::Created {
                event_id: "evt_1".to_string()
            }
        );
        assert_eq!(outcome.notification, NotificationStatus::NotRequested);

        let events = calendar.events.borrow();
        assert_eq!(events[0].0, "Oil Change - 2020 Toyota Camry (50,000 miles)");
        assert_eq!(events[0].2, APPOINTMENT_DURATION_MINUTES);
        assert!(email.sent.borrow().is_empty());
    }

    #[test]
    fn test_email_failure_still_records_history() {
        let calendar = RecordingCalendar::default();
        let scheduler = ServiceScheduler::new(&calendar, &FailingEmail);
        let mut vehicle = camry();

        let request = ScheduleRequest::new("Oil Change", date(21)).with_notify("shop@example.com");
        let outcome = scheduler.schedule(&mut vehicle, &request).unwrap();

        assert_eq!(vehicle.history().len(), 1);
        assert_eq!(vehicle.history()[0].service, "Oil Change");
        assert_eq!(vehicle.history()[0].mileage, 50_000);
        assert_eq!(vehicle.history()[0].status, ServiceStatus::Scheduled);
        assert!(matches!(
            outcome.notification,
            NotificationStatus::Failed { ref to, .. } if to == "shop@example.com"
        ));
    }

    #[test]
    fn test_calendar_failure_still_records_history() {
        let email = RecordingEmail::default();
        let scheduler = ServiceScheduler::new(&FailingCalendar, &email);
        let mut vehicle = camry();

        let outcome = scheduler
            .schedule(&mut vehicle, &ScheduleRequest::new("Tire Rotation", date(22)))
            .unwrap();

        assert!(matches!(outcome.calendar, CalendarStatus::Failed { .. }));
        assert_eq!(vehicle.history().len(), 1);
    }

    #[test]
    fn test_email_sent_with_request_details() {
        let calendar = RecordingCalendar::default();
        let email = RecordingEmail::default();
        let scheduler = ServiceScheduler::new(&calendar, &email);
        let mut vehicle = camry();

        let request = ScheduleRequest::new("Air Filter", date(23)).with_notify("shop@example.com");
        let outcome = scheduler.schedule(&mut vehicle, &request).unwrap();

        assert_eq!(
            outcome.notification,
            NotificationStatus::Sent {
                to: "shop@example.com".to_string()
            }
        );
        let sent = email.sent.borrow();
        assert_eq!(sent[0].1, "Service Request: Air Filter for 2020 Toyota Camry (50,000 miles)");
        assert!(sent[0].2.contains("Preferred Date: Friday, October 23, 2026"));
        assert!(sent[0].2.contains("Current Mileage: 50,000 miles"));
    }

    #[test]
    fn test_blank_service_is_rejected_without_side_effects() {
        let calendar = RecordingCalendar::default();
        let email = RecordingEmail::default();
        let scheduler = ServiceScheduler::new(&calendar, &email);
        let mut vehicle = camry();

        let result = scheduler.schedule(&mut vehicle, &ScheduleRequest::new("  ", date(20)));

        assert!(matches!(result, Err(Error::InvalidInput(_))));
        assert!(vehicle.history().is_empty());
        assert!(calendar.events.borrow().is_empty());
    }

    #[test]
    fn test_history_is_append_only() {
        let calendar = RecordingCalendar::default();
        let email = RecordingEmail::default();
        let scheduler = ServiceScheduler::new(&calendar, &email);
        let mut vehicle = camry();

        scheduler
            .schedule(&mut vehicle, &ScheduleRequest::new("Oil Change", date(20)))
            .unwrap();
        let first = vehicle.history().to_vec();

        vehicle.mileage = 50_400;
        for day in [21, 22, 23] {
            scheduler
                .schedule(&mut vehicle, &ScheduleRequest::new("Tire Rotation", date(day)))
                .unwrap();
        }

        assert_eq!(vehicle.history().len(), 4);
        assert_eq!(vehicle.history()[0], first[0]);
        let days: Vec<_> = vehicle.history().iter().map(|e| e.scheduled_date).collect();
        assert_eq!(days, vec![date(20), date(21), date(22), date(23)]);
        assert_eq!(vehicle.history()[3].mileage, 50_400);
    }
}
