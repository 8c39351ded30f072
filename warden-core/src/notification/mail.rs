use serde::{Deserialize, Serialize};

use super::{NotificationContext, NotificationRenderer};
use crate::config::NotificationMailConfig;

/// A fully rendered administrator notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationMail {
    pub from_email: String,
    pub from_name: String,
    pub to: Vec<String>,
    pub subject: String,
    pub body: String,
}

impl NotificationMail {
    /// Render the configured templates against `context`.
    ///
    /// Returns `None` without rendering anything when no recipients are configured.
    pub fn compose(config: &NotificationMailConfig, context: &NotificationContext) -> Option<Self> {
        if config.to.is_empty() {
            return None;
        }

        Some(Self {
            from_email: NotificationRenderer::render(&config.from.email, context),
            from_name: NotificationRenderer::render(&config.from.name, context),
            to: config.to.clone(),
            subject: NotificationRenderer::render(&config.subject, context),
            body: NotificationRenderer::render(&config.message, context),
        })
    }
}
