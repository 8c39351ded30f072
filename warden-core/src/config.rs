//! Lockout configuration.
//!
//! A [`LockoutConfig`] is loaded once at startup, either deserialized from the application's
//! settings or read from `WARDEN_*` environment variables, and handed to the service by value.
//! Field names serialize in camelCase so existing settings documents
//! (`failedAttemptsThreshold`, `notificationMail.from.email`, ...) load unchanged.

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::ConfigError;

pub const ENV_THRESHOLD: &str = "WARDEN_FAILED_ATTEMPTS_THRESHOLD";
pub const ENV_NOTIFICATION_TO: &str = "WARDEN_NOTIFICATION_TO";
pub const ENV_NOTIFICATION_FROM_EMAIL: &str = "WARDEN_NOTIFICATION_FROM_EMAIL";
pub const ENV_NOTIFICATION_FROM_NAME: &str = "WARDEN_NOTIFICATION_FROM_NAME";
pub const ENV_NOTIFICATION_SUBJECT: &str = "WARDEN_NOTIFICATION_SUBJECT";
pub const ENV_NOTIFICATION_MESSAGE: &str = "WARDEN_NOTIFICATION_MESSAGE";

const DEFAULT_FROM_EMAIL: &str = "noreply@localhost";
const DEFAULT_FROM_NAME: &str = "Security Notification";
const DEFAULT_SUBJECT: &str = "Account {accountIdentifier} locked on {domain}";
const DEFAULT_MESSAGE: &str = "The account \"{accountIdentifier}\" on {domain} has been locked \
after {failedAttemptsThreshold} failed login attempts.\n\n\
Time: {time}\n\
IP address: {ip}\n\
User agent: {userAgent}\n";

/// Process-wide lockout settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LockoutConfig {
    /// Failed attempts at which the account is locked. `0` disables the feature.
    pub failed_attempts_threshold: u32,
    pub notification_mail: NotificationMailConfig,
}

/// Templates and recipients for the administrator notification.
///
/// `from.email`, `from.name`, `subject` and `message` are placeholder templates; see
/// [`NotificationRenderer`](crate::notification::NotificationRenderer).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NotificationMailConfig {
    /// Recipients. Accepts a single address or a list; empty disables notification.
    #[serde(deserialize_with = "deserialize_recipients")]
    pub to: Vec<String>,
    pub from: MailSender,
    pub subject: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MailSender {
    pub email: String,
    pub name: String,
}

impl Default for LockoutConfig {
    fn default() -> Self {
        Self {
            failed_attempts_threshold: 0,
            notification_mail: NotificationMailConfig::default(),
        }
    }
}

impl Default for NotificationMailConfig {
    fn default() -> Self {
        Self {
            to: Vec::new(),
            from: MailSender::default(),
            subject: DEFAULT_SUBJECT.to_string(),
            message: DEFAULT_MESSAGE.to_string(),
        }
    }
}

impl Default for MailSender {
    fn default() -> Self {
        Self {
            email: DEFAULT_FROM_EMAIL.to_string(),
            name: DEFAULT_FROM_NAME.to_string(),
        }
    }
}

impl LockoutConfig {
    /// A configuration with lockout turned off.
    pub fn disabled() -> Self {
        Self::default()
    }

    pub fn with_threshold(mut self, failed_attempts_threshold: u32) -> Self {
        self.failed_attempts_threshold = failed_attempts_threshold;
        self
    }

    pub fn with_recipients<I, S>(mut self, recipients: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.notification_mail.to = normalize_recipients(recipients.into_iter().map(Into::into));
        self
    }

    pub fn with_sender(mut self, email: impl Into<String>, name: impl Into<String>) -> Self {
        self.notification_mail.from = MailSender {
            email: email.into(),
            name: name.into(),
        };
        self
    }

    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.notification_mail.subject = subject.into();
        self
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.notification_mail.message = message.into();
        self
    }

    pub fn is_enabled(&self) -> bool {
        self.failed_attempts_threshold > 0
    }

    pub fn notification_enabled(&self) -> bool {
        !self.notification_mail.to.is_empty()
    }

    /// Load from `WARDEN_*` environment variables, falling back to defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load using an arbitrary key lookup. Unset keys keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(threshold) = lookup(ENV_THRESHOLD) {
            config.failed_attempts_threshold =
                threshold
                    .trim()
                    .parse()
                    .map_err(|_| ConfigError::InvalidValue {
                        key: ENV_THRESHOLD.to_string(),
                        value: threshold.clone(),
                    })?;
        }

        if let Some(to) = lookup(ENV_NOTIFICATION_TO) {
            config.notification_mail.to =
                normalize_recipients(to.split(',').map(str::to_string));
        }

        if let Some(email) = lookup(ENV_NOTIFICATION_FROM_EMAIL) {
            config.notification_mail.from.email = email;
        }

        if let Some(name) = lookup(ENV_NOTIFICATION_FROM_NAME) {
            config.notification_mail.from.name = name;
        }

        if let Some(subject) = lookup(ENV_NOTIFICATION_SUBJECT) {
            config.notification_mail.subject = subject;
        }

        if let Some(message) = lookup(ENV_NOTIFICATION_MESSAGE) {
            config.notification_mail.message = message;
        }

        Ok(config)
    }
}

fn normalize_recipients(recipients: impl Iterator<Item = String>) -> Vec<String> {
    recipients
        .map(|to| to.trim().to_string())
        .filter(|to| !to.is_empty())
        .collect()
}

fn deserialize_recipients<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Recipients {
        One(String),
        Many(Vec<String>),
    }

    let recipients = match Option::<Recipients>::deserialize(deserializer)? {
        Some(Recipients::One(to)) => vec![to],
        Some(Recipients::Many(to)) => to,
        None => Vec::new(),
    };

    Ok(normalize_recipients(recipients.into_iter()))
}
