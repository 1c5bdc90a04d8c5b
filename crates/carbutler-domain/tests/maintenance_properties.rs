//! Property tests for maintenance evaluation and scheduling

use carbutler_domain::service::{evaluate, ScheduleRequest, ServiceScheduler, Urgency};
use carbutler_domain::{CalendarService, EmailService, ServiceKind, VehicleRecord};
use carbutler_types::Result;
use chrono::{NaiveDate, NaiveDateTime};
use proptest::prelude::*;

struct NullCalendar;

impl CalendarService for NullCalendar {
    fn create_event(&self, _title: &str, _date: NaiveDateTime, _duration: u32) -> Result<String> {
        Ok("evt".to_string())
    }
}

struct NullEmail;

impl EmailService for NullEmail {
    fn send_email(&self, _to: &str, _subject: &str, _body: &str) -> Result<()> {
        Ok(())
    }
}

fn vehicle_with_oil(mileage: u32, last_oil: u32) -> VehicleRecord {
    VehicleRecord::new("Mazda", "3", 2019, mileage)
        .with_vin("PROP00001")
        .with_last_service(ServiceKind::OilChange, last_oil)
        .with_last_service(ServiceKind::TireRotation, mileage)
        .with_last_service(ServiceKind::AirFilter, mileage)
}

fn oil_item(vehicle: &VehicleRecord) -> Option<Urgency> {
    evaluate(vehicle)
        .into_iter()
        .find(|i| i.kind == ServiceKind::OilChange)
        .map(|i| i.urgency)
}

proptest! {
    #[test]
    fn oil_overdue_past_max_interval(last_oil in 0u32..500_000, since in 7_500u32..200_000) {
        let vehicle = vehicle_with_oil(last_oil + since, last_oil);
        prop_assert_eq!(oil_item(&vehicle), Some(Urgency::Overdue));
    }

    #[test]
    fn oil_due_soon_in_last_500_miles(last_oil in 0u32..500_000, since in 7_000u32..7_500) {
        let vehicle = vehicle_with_oil(last_oil + since, last_oil);
        let item = evaluate(&vehicle).into_iter().next();
        prop_assert!(item.is_some());
        let item = item.unwrap();
        prop_assert_eq!(item.urgency, Urgency::DueSoon);
        prop_assert!(item.miles_remaining > 0 && item.miles_remaining <= 500);
    }

    #[test]
    fn evaluate_is_deterministic(
        mileage in 0u32..300_000,
        oil in 0u32..300_000,
        tire in 0u32..300_000,
        air in 0u32..300_000,
    ) {
        let vehicle = VehicleRecord::new("Kia", "Rio", 2018, mileage)
            .with_vin("PROP00002")
            .with_last_service(ServiceKind::OilChange, oil)
            .with_last_service(ServiceKind::TireRotation, tire)
            .with_last_service(ServiceKind::AirFilter, air);
        let first = evaluate(&vehicle);
        let second = evaluate(&vehicle);
        prop_assert_eq!(&first, &second);

        // Fixed order, no duplicates
        let kinds: Vec<_> = first.iter().map(|i| i.kind).collect();
        let mut expected: Vec<_> = ServiceKind::TRACKED.to_vec();
        expected.retain(|k| kinds.contains(k));
        prop_assert_eq!(kinds, expected);
    }

    #[test]
    fn schedule_n_times_appends_n_entries(n in 0usize..20) {
        let scheduler = ServiceScheduler::new(&NullCalendar, &NullEmail);
        let mut vehicle = vehicle_with_oil(50_000, 42_600);
        let base = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap().and_hms_opt(9, 0, 0).unwrap();

        scheduler
            .schedule(&mut vehicle, &ScheduleRequest::new("Oil Change", base))
            .unwrap();
        let before = vehicle.history().to_vec();

        for i in 0..n {
            let date = base + chrono::Duration::days(i as i64 + 1);
            scheduler
                .schedule(&mut vehicle, &ScheduleRequest::new("Oil Change", date))
                .unwrap();
        }

        prop_assert_eq!(vehicle.history().len(), before.len() + n);
        prop_assert_eq!(&vehicle.history()[..before.len()], &before[..]);
    }
}
