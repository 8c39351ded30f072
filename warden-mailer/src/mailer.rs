use std::sync::Arc;

use crate::{Email, MailerError};
use async_trait::async_trait;

/// A transport capable of delivering an [`Email`].
///
/// Sending is fire-and-forget from the caller's point of view: a successful return only
/// means the transport accepted the message.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send_email(&self, email: Email) -> Result<(), MailerError>;
}

#[async_trait]
impl<T: Mailer + ?Sized> Mailer for Box<T> {
    async fn send_email(&self, email: Email) -> Result<(), MailerError> {
        (**self).send_email(email).await
    }
}

#[async_trait]
impl<T: Mailer + ?Sized> Mailer for Arc<T> {
    async fn send_email(&self, email: Email) -> Result<(), MailerError> {
        (**self).send_email(email).await
    }
}
