use async_trait::async_trait;

use super::NotificationMail;
use crate::error::NotificationError;

/// Delivers a rendered lockout notification.
#[async_trait]
pub trait LockoutNotifier: Send + Sync + 'static {
    async fn notify(&self, mail: &NotificationMail) -> Result<(), NotificationError>;
}

#[cfg(feature = "mailer")]
pub use self::mailer_impl::*;

#[cfg(feature = "mailer")]
mod mailer_impl {
    use super::*;
    use warden_mailer::prelude::*;

    /// Sends notifications through a `warden_mailer` transport as plain-text email.
    pub struct MailerNotifier<M: Mailer> {
        mailer: M,
    }

    impl<M: Mailer> MailerNotifier<M> {
        pub fn new(mailer: M) -> Self {
            Self { mailer }
        }
    }

    impl MailerNotifier<Box<dyn Mailer>> {
        /// Build the transport described by `MAILER_*` environment variables.
        ///
        /// Call from within a Tokio runtime when the variables select SMTP.
        pub fn from_env() -> Result<Self, NotificationError> {
            let config = MailerConfig::from_env()
                .map_err(|e| NotificationError::Transport(e.to_string()))?;
            Self::from_config(&config)
        }

        /// Call from within a Tokio runtime when `config` selects SMTP.
        pub fn from_config(config: &MailerConfig) -> Result<Self, NotificationError> {
            let transport = config
                .build_transport()
                .map_err(|e| NotificationError::Transport(e.to_string()))?;
            Ok(Self::new(transport))
        }
    }

    fn to_email(mail: &NotificationMail) -> Result<Email, MailerError> {
        Email::builder()
            .from_mailbox(&mail.from_name, &mail.from_email)
            .to_multiple(mail.to.iter().cloned())
            .subject(mail.subject.clone())
            .text_body(mail.body.clone())
            .build()
    }

    fn classify(error: MailerError) -> NotificationError {
        match error {
            MailerError::Builder(_) | MailerError::Address(_) | MailerError::Message(_) => {
                NotificationError::InvalidMessage(error.to_string())
            }
            other => NotificationError::Transport(other.to_string()),
        }
    }

    #[async_trait]
    impl<M: Mailer + 'static> LockoutNotifier for MailerNotifier<M> {
        async fn notify(&self, mail: &NotificationMail) -> Result<(), NotificationError> {
            let email = to_email(mail).map_err(classify)?;
            self.mailer.send_email(email).await.map_err(classify)
        }
    }

}
