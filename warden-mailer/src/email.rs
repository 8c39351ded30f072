use crate::MailerError;
use serde::{Deserialize, Serialize};

/// A message ready to be handed to a [`Mailer`](crate::Mailer) transport.
///
/// Addresses are kept as strings in RFC 5322 mailbox form (`addr@example.com` or
/// `Display Name <addr@example.com>`); they are parsed when the transport builds the
/// wire message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Email {
    pub to: Vec<String>,
    pub from: String,
    pub subject: String,
    pub text_body: Option<String>,
}

impl Email {
    pub fn builder() -> EmailBuilder {
        EmailBuilder::default()
    }

    pub fn validate(&self) -> Result<(), MailerError> {
        if self.to.is_empty() {
            return Err(MailerError::Builder(
                "At least one recipient is required".to_string(),
            ));
        }

        if self.to.iter().any(|to| to.trim().is_empty()) {
            return Err(MailerError::Builder(
                "Recipient address must not be blank".to_string(),
            ));
        }

        if self.from.trim().is_empty() {
            return Err(MailerError::Builder("From address is required".to_string()));
        }

        if self.subject.is_empty() {
            return Err(MailerError::Builder("Subject is required".to_string()));
        }

        if self.text_body.is_none() {
            return Err(MailerError::Builder("Text body is required".to_string()));
        }

        Ok(())
    }
}

/// Formats a mailbox as `Name <email>`, or the bare address when the name is blank.
pub fn format_mailbox(name: &str, email: &str) -> String {
    let name = name.trim();
    if name.is_empty() {
        email.trim().to_string()
    } else {
        format!("{} <{}>", name, email.trim())
    }
}

#[derive(Debug, Default)]
pub struct EmailBuilder {
    to: Vec<String>,
    from: Option<String>,
    subject: Option<String>,
    text_body: Option<String>,
}

impl EmailBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn to<S: Into<String>>(mut self, email: S) -> Self {
        self.to.push(email.into());
        self
    }

    pub fn to_multiple<I, S>(mut self, emails: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.to.extend(emails.into_iter().map(Into::into));
        self
    }

    pub fn from<S: Into<String>>(mut self, email: S) -> Self {
        self.from = Some(email.into());
        self
    }

    /// Sets the sender from a display name and address pair.
    pub fn from_mailbox(mut self, name: &str, email: &str) -> Self {
        self.from = Some(format_mailbox(name, email));
        self
    }

    pub fn subject<S: Into<String>>(mut self, subject: S) -> Self {
        self.subject = Some(subject.into());
        self
    }

    pub fn text_body<S: Into<String>>(mut self, text: S) -> Self {
        self.text_body = Some(text.into());
        self
    }

    pub fn build(self) -> Result<Email, MailerError> {
        let email = Email {
            to: self.to,
            from: self
                .from
                .ok_or_else(|| MailerError::Builder("From address is required".to_string()))?,
            subject: self
                .subject
                .ok_or_else(|| MailerError::Builder("Subject is required".to_string()))?,
            text_body: self.text_body,
        };

        email.validate()?;
        Ok(email)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_builder() {
        let email = Email::builder()
            .from("sender@example.com")
            .to("admin@example.com")
            .to("security@example.com")
            .subject("Account locked")
            .text_body("The account alice was locked")
            .build()
            .unwrap();

        assert_eq!(email.from, "sender@example.com");
        assert_eq!(email.to, vec!["admin@example.com", "security@example.com"]);
        assert_eq!(email.subject, "Account locked");
        assert_eq!(
            email.text_body.as_deref(),
            Some("The account alice was locked")
        );
    }

    #[test]
    fn test_email_requires_recipient() {
        let result = Email::builder()
            .from("sender@example.com")
            .subject("Test")
            .text_body("body")
            .build();

        assert!(matches!(result, Err(MailerError::Builder(_))));
    }

    #[test]
    fn test_email_rejects_blank_recipient() {
        let result = Email::builder()
            .from("sender@example.com")
            .to("  ")
            .subject("Test")
            .text_body("body")
            .build();

        assert!(result.is_err());
    }

    #[test]
    fn test_email_requires_body() {
        let result = Email::builder()
            .from("sender@example.com")
            .to("admin@example.com")
            .subject("Test")
            .build();

        assert!(result.is_err());
    }

    #[test]
    fn test_from_mailbox() {
        let email = Email::builder()
            .from_mailbox("Security Team", "security@example.com")
            .to_multiple(["admin@example.com"])
            .subject("Test")
            .text_body("body")
            .build()
            .unwrap();

        assert_eq!(email.from, "Security Team <security@example.com>");
    }

    #[test]
    fn test_format_mailbox_without_name() {
        assert_eq!(format_mailbox("", "a@example.com"), "a@example.com");
        assert_eq!(format_mailbox("   ", " a@example.com "), "a@example.com");
        assert_eq!(format_mailbox("Ops", "a@example.com"), "Ops <a@example.com>");
    }
}
