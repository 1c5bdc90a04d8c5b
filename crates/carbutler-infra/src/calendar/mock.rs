//! Mock calendar for demonstration

use chrono::NaiveDateTime;
use rand::Rng;
use tracing::info;

use carbutler_domain::CalendarService;
use carbutler_types::Result;

/// Pretends to create events and hands out random `mock_event_NNNN` ids
#[derive(Debug, Default)]
pub struct MockCalendar;

impl CalendarService for MockCalendar {
    fn create_event(&self, title: &str, date: NaiveDateTime, duration_minutes: u32) -> Result<String> {
        let event_id = format!("mock_event_{}", rand::thread_rng().gen_range(1000..=9999));
        info!(
            "[MOCK CALENDAR] {} at {} ({} min) -> {}",
            title, date, duration_minutes, event_id
        );
        Ok(event_id)
    }
}
