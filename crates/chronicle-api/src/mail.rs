//! Outgoing mail
//!
//! Handlers build a [`MailMessage`] and hand it to a [`Mailer`]. The default
//! transport, [`LogMailer`], writes messages to the log; a real SMTP relay
//! plugs in behind the same trait.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

/// Mail delivery errors
#[derive(Debug, Error)]
pub enum MailError {
    #[error("Mail delivery failed: {0}")]
    Delivery(String),
}

/// A plain-text message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MailMessage {
    pub to: String,
    pub subject: String,
    pub body: String,
}

impl MailMessage {
    pub fn email_verification(to: &str, full_name: &str, link: &str) -> Self {
        Self {
            to: to.to_string(),
            subject: "Verify your Chronicle email".to_string(),
            body: format!(
                "Hi {full_name},\n\n\
                 Confirm your email address by opening the link below. \
                 It expires in one hour.\n\n{link}\n"
            ),
        }
    }

    pub fn password_reset(to: &str, link: &str) -> Self {
        Self {
            to: to.to_string(),
            subject: "Reset your Chronicle password".to_string(),
            body: format!(
                "Someone asked to reset the password for this account.\n\n\
                 Choose a new password here (valid for one hour):\n\n{link}\n\n\
                 If it wasn't you, ignore this email.\n"
            ),
        }
    }

    /// Sent to the super admin; the link clicked decides the granted role
    pub fn admin_approval_request(
        to: &str,
        applicant: &str,
        admin_link: &str,
        super_admin_link: &str,
    ) -> Self {
        Self {
            to: to.to_string(),
            subject: format!("Admin access requested by {applicant}"),
            body: format!(
                "{applicant} asked for access to the Chronicle back office.\n\n\
                 Approve as admin: {admin_link}\n\
                 Approve as super admin: {super_admin_link}\n\n\
                 Both links expire in one hour. Ignore this email to decline.\n"
            ),
        }
    }
}

/// Mail transport
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, message: MailMessage) -> Result<(), MailError>;
}

/// Transport that logs each message instead of delivering it
#[derive(Debug, Clone)]
pub struct LogMailer {
    from: String,
}

impl LogMailer {
    pub fn new(from: impl Into<String>) -> Self {
        Self { from: from.into() }
    }
}

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, message: MailMessage) -> Result<(), MailError> {
        info!(
            from = %self.from,
            to = %message.to,
            subject = %message.subject,
            body = %message.body,
            "Outgoing mail"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_approval_request_carries_both_links() {
        let message = MailMessage::admin_approval_request(
            "root@chronicle.test",
            "new@admin.com",
            "https://api/approve?token=a",
            "https://api/approve?token=b",
        );

        assert!(message.subject.contains("new@admin.com"));
        assert!(message
            .body
            .contains("Approve as admin: https://api/approve?token=a"));
        assert!(message
            .body
            .contains("Approve as super admin: https://api/approve?token=b"));
    }

    #[test]
    fn test_verification_message() {
        let message = MailMessage::email_verification("ada@x.com", "Ada", "https://link");
        assert_eq!(message.to, "ada@x.com");
        assert!(message.body.starts_with("Hi Ada,"));
        assert!(message.body.contains("https://link"));
    }

    #[test]
    fn test_log_mailer_accepts_messages() {
        let mailer = LogMailer::new("no-reply@chronicle.test");
        let message = MailMessage::password_reset("ada@x.com", "https://link");
        assert!(tokio_test::block_on(mailer.send(message)).is_ok());
    }
}
