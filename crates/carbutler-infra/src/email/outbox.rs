//! Outbox email service
//!
//! Writes each message as an RFC 5322 `.eml` file into a pickup directory.
//! A local mail transfer agent (or the user's mail client) delivers them.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;
use tracing::info;

use carbutler_domain::EmailService;
use carbutler_types::{Error, Result};

pub struct OutboxEmailService {
    outbox_dir: PathBuf,
    from: String,
}

impl OutboxEmailService {
    pub fn new(outbox_dir: PathBuf, from: impl Into<String>) -> Self {
        Self {
            outbox_dir,
            from: from.into(),
        }
    }

    pub fn outbox_dir(&self) -> &Path {
        &self.outbox_dir
    }
}

fn is_plausible_address(address: &str) -> bool {
    match address.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && !address.chars().any(|c| c.is_whitespace() || c == '\r' || c == '\n')
        }
        None => false,
    }
}

impl EmailService for OutboxEmailService {
    fn send_email(&self, to: &str, subject: &str, body: &str) -> Result<()> {
        if !is_plausible_address(to) {
            return Err(Error::Email(format!("invalid recipient address: {}", to)));
        }
        fs::create_dir_all(&self.outbox_dir)?;

        let now = Utc::now();
        let message_id = uuid::Uuid::new_v4();
        let subject = subject.replace(['\r', '\n'], " ");
        let body = body.replace("\r\n", "\n").replace('\n', "\r\n");

        let message = format!(
            "From: {from}\r\n\
             To: {to}\r\n\
             Subject: {subject}\r\n\
             Date: {date}\r\n\
             Message-ID: <{id}@carbutler>\r\n\
             MIME-Version: 1.0\r\n\
             Content-Type: text/plain; charset=utf-8\r\n\
             \r\n\
             {body}",
            from = self.from,
            to = to,
            subject = subject,
            date = now.to_rfc2822(),
            id = message_id,
            body = body,
        );

        let file_name = format!("{}-{}.eml", now.format("%Y%m%dT%H%M%S"), message_id);
        let path = self.outbox_dir.join(file_name);
        fs::write(&path, message)?;
        info!("Queued email to {} at {}", to, path.display());
        Ok(())
    }
}
