use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{AccountAuthState, RequestContext};

/// `YYYY-MM-DD HH:MM`, as substituted for `{time}`.
pub const TIME_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Values substituted into the notification templates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationContext {
    pub domain: String,
    pub ip: String,
    pub user_agent: String,
    pub account_identifier: String,
    pub failed_attempts_threshold: String,
    pub time: String,
}

impl NotificationContext {
    /// Collects the context for a lock applied at `locked_at`.
    ///
    /// Missing request values become `""` (host, user agent) or `"unknown"` (IP).
    pub fn new(
        account: &AccountAuthState,
        failed_attempts_threshold: u32,
        request: &RequestContext,
        locked_at: DateTime<Utc>,
    ) -> Self {
        Self {
            domain: request.host_or_default().to_string(),
            ip: request.client_ip_or_default().to_string(),
            user_agent: request.user_agent_or_default().to_string(),
            account_identifier: account.account_identifier.clone(),
            failed_attempts_threshold: failed_attempts_threshold.to_string(),
            time: locked_at.format(TIME_FORMAT).to_string(),
        }
    }

    /// Value for a placeholder name (without braces).
    pub fn value(&self, placeholder: &str) -> Option<&str> {
        match placeholder {
            "domain" => Some(&self.domain),
            "ip" => Some(&self.ip),
            "userAgent" => Some(&self.user_agent),
            "accountIdentifier" => Some(&self.account_identifier),
            "failedAttemptsThreshold" => Some(&self.failed_attempts_threshold),
            "time" => Some(&self.time),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_context_from_request() {
        let account = AccountAuthState::new("alice").with_failed_attempts(5);
        let request = RequestContext::new()
            .with_host("example.com")
            .with_client_ip("10.0.0.5")
            .with_user_agent("Mozilla/5.0");
        let locked_at = Utc.with_ymd_and_hms(2024, 1, 1, 10, 0, 59).unwrap();

        let context = NotificationContext::new(&account, 5, &request, locked_at);

        assert_eq!(context.domain, "example.com");
        assert_eq!(context.ip, "10.0.0.5");
        assert_eq!(context.user_agent, "Mozilla/5.0");
        assert_eq!(context.account_identifier, "alice");
        assert_eq!(context.failed_attempts_threshold, "5");
        assert_eq!(context.time, "2024-01-01 10:00");
    }

    #[test]
    fn test_context_defaults() {
        let account = AccountAuthState::new("bob");
        let context = NotificationContext::new(&account, 3, &RequestContext::new(), Utc::now());

        assert_eq!(context.domain, "");
        assert_eq!(context.ip, "unknown");
        assert_eq!(context.user_agent, "");
    }

    #[test]
    fn test_value_lookup() {
        let context = NotificationContext {
            ip: "10.0.0.5".to_string(),
            ..Default::default()
        };

        assert_eq!(context.value("ip"), Some("10.0.0.5"));
        assert_eq!(context.value("userAgent"), Some(""));
        assert_eq!(context.value("user"), None);
    }
}
