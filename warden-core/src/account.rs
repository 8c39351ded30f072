//! The authentication state of an account as seen by the lockout policy.
//!
//! The account store owns this record. The policy reads the failed-attempt counter and only
//! ever writes the expiration date.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Snapshot of an account's authentication counters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountAuthState {
    /// Identifier the account authenticates with (username, email, ...).
    pub account_identifier: String,
    /// Failed attempts recorded by the account store since the last success.
    pub failed_authentication_count: u32,
    /// When set and in the past, the account is expired and cannot authenticate.
    pub expiration_date: Option<DateTime<Utc>>,
}

impl AccountAuthState {
    pub fn new(account_identifier: impl Into<String>) -> Self {
        Self {
            account_identifier: account_identifier.into(),
            failed_authentication_count: 0,
            expiration_date: None,
        }
    }

    pub fn with_failed_attempts(mut self, count: u32) -> Self {
        self.failed_authentication_count = count;
        self
    }

    pub fn with_expiration_date(mut self, expiration_date: DateTime<Utc>) -> Self {
        self.expiration_date = Some(expiration_date);
        self
    }

    /// Whether the account has expired as of `now`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expiration_date.is_some_and(|expires| expires <= now)
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_new_account_is_clean() {
        let account = AccountAuthState::new("alice");
        assert_eq!(account.account_identifier, "alice");
        assert_eq!(account.failed_authentication_count, 0);
        assert!(account.expiration_date.is_none());
        assert!(!account.is_expired());
    }

    #[test]
    fn test_expiration() {
        let now = Utc::now();
        let past = AccountAuthState::new("alice").with_expiration_date(now - Duration::minutes(1));
        assert!(past.is_expired_at(now));

        let future = AccountAuthState::new("bob").with_expiration_date(now + Duration::days(1));
        assert!(!future.is_expired_at(now));

        let exact = AccountAuthState::new("carol").with_expiration_date(now);
        assert!(exact.is_expired_at(now));
    }
}
