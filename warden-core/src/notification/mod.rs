//! Administrator notification for locked accounts.
//!
//! A notification is built in three steps: collect a [`NotificationContext`], render the
//! configured templates into a [`NotificationMail`], and hand it to a [`LockoutNotifier`].

mod context;
mod mail;
mod notifier;
mod renderer;

pub use context::{NotificationContext, TIME_FORMAT};
pub use mail::NotificationMail;
pub use notifier::*;
pub use renderer::NotificationRenderer;

use serde::{Deserialize, Serialize};

/// Why a notification was not sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SkipReason {
    /// `notificationMail.to` is empty.
    NoRecipients,
    /// No notifier was configured on the service.
    NoNotifier,
}

/// Result of attempting to notify about a lock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum NotificationOutcome {
    Sent,
    Skipped(SkipReason),
    /// Delivery failed. The lock stands regardless.
    Failed(String),
}

impl NotificationOutcome {
    pub fn is_sent(&self) -> bool {
        matches!(self, NotificationOutcome::Sent)
    }
}
