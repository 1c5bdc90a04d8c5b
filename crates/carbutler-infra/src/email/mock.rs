//! Mock email service for demonstration

use tracing::info;

use carbutler_domain::EmailService;
use carbutler_types::Result;

const PREVIEW_CHARS: usize = 100;

/// Prints a short preview of each message to stderr instead of sending it
#[derive(Debug, Default)]
pub struct MockEmailService;

/// First `PREVIEW_CHARS` characters of a body, with an ellipsis
pub fn preview(body: &str) -> String {
    let head: String = body.chars().take(PREVIEW_CHARS).collect();
    format!("{}...", head)
}

impl EmailService for MockEmailService {
    fn send_email(&self, to: &str, subject: &str, body: &str) -> Result<()> {
        info!("[MOCK EMAIL] to={} subject={}", to, subject);
        eprintln!("\n[MOCK EMAIL] To: {}", to);
        eprintln!("Subject: {}", subject);
        eprintln!("Body: {}", preview(body));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preview_truncates_on_char_boundary() {
        let body = "é".repeat(150);
        let p = preview(&body);
        assert_eq!(p.chars().count(), PREVIEW_CHARS + 3);
        assert!(p.ends_with("..."));
    }

    #[test]
    fn test_mock_always_succeeds() {
        assert!(MockEmailService
            .send_email("shop@example.com", "Hi", "Body")
            .is_ok());
    }
}
