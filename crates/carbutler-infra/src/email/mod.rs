//! Email collaborators

mod mock;
mod outbox;

pub use mock::MockEmailService;
pub use outbox::OutboxEmailService;
