//! Mail delivery for warden lockout notifications.
//!
//! Provides the [`Email`] value type, the [`Mailer`] transport trait and three lettre-backed
//! transports: SMTP, sendmail and a file sink for development.
pub mod config;
pub mod email;
pub mod error;
pub mod mailer;
pub mod transports;

pub use config::{MailerConfig, TlsType, TransportConfig};
pub use email::{Email, EmailBuilder, format_mailbox};
pub use error::MailerError;
pub use mailer::Mailer;
pub use transports::{FileTransport, SendmailTransport, SmtpTransport, TlsConfig};

pub mod prelude {
    pub use crate::{
        Email, EmailBuilder, FileTransport, Mailer, MailerConfig, MailerError, SendmailTransport,
        SmtpTransport, TransportConfig,
    };
}
