use super::message::build_message;
use crate::{Email, Mailer, MailerError};
use async_trait::async_trait;
use lettre::Transport;
use lettre::transport::sendmail::SendmailTransport as LettreTransport;

/// Hands messages to the local `sendmail` binary.
#[derive(Debug, Clone)]
pub struct SendmailTransport {
    transport: LettreTransport,
}

impl SendmailTransport {
    pub fn new() -> Self {
        Self {
            transport: LettreTransport::new(),
        }
    }

    pub fn with_command<S: Into<String>>(command: S) -> Self {
        let command: String = command.into();
        Self {
            transport: LettreTransport::new_with_command(command),
        }
    }
}

impl Default for SendmailTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Mailer for SendmailTransport {
    async fn send_email(&self, email: Email) -> Result<(), MailerError> {
        let message = build_message(email)?;

        // lettre's SendmailTransport is sync
        let transport = self.transport.clone();
        tokio::task::spawn_blocking(move || transport.send(&message)).await??;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_invalid_email_fails_before_spawning_sendmail() {
        let transport = SendmailTransport::with_command("/nonexistent/sendmail");
        let email = Email {
            to: vec![],
            from: "security@example.com".to_string(),
            subject: "Locked".to_string(),
            text_body: Some("body".to_string()),
        };

        let result = transport.send_email(email).await;
        assert!(matches!(result, Err(MailerError::Builder(_))));
    }

    #[tokio::test]
    async fn test_missing_binary_is_reported() {
        let transport = SendmailTransport::with_command("/nonexistent/sendmail");
        let email = Email::builder()
            .from("security@example.com")
            .to("admin@example.com")
            .subject("Locked")
            .text_body("body")
            .build()
            .unwrap();

        let result = transport.send_email(email).await;
        assert!(matches!(result, Err(MailerError::Sendmail(_))));
    }
}
