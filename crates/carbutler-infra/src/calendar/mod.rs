//! Calendar collaborators

mod ics;
mod mock;

pub use ics::IcsCalendar;
pub use mock::MockCalendar;
