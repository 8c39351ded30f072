//! # Warden
//!
//! Warden locks user accounts after too many failed login attempts and emails an
//! administrator when it does.
//!
//! It plugs into an existing authentication stack: the host application keeps owning its
//! accounts and their failed-attempt counters, and calls Warden right after every
//! authentication attempt has been recorded.
//!
//! - A threshold of `0` disables locking entirely
//! - Once the failed count reaches the threshold, the account's expiration date is set to
//!   now and a notification is rendered from configurable templates
//! - Mail failures are logged and reported, never undoing the lock
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use warden::{InMemoryAccountRepository, LockoutConfig, RequestContext, WardenBuilder};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let repository = Arc::new(InMemoryAccountRepository::new());
//!
//!     let warden = WardenBuilder::new()
//!         .with_repository(repository)
//!         .with_config(LockoutConfig::default().with_threshold(5).with_recipients(["admin@example.com"]))
//!         .build()
//!         .await?;
//!
//!     let request = RequestContext::new().with_client_ip("192.168.1.1");
//!     let outcome = warden.authentication_attempted("alice", &request).await?;
//!     println!("{:?}", outcome.decision);
//!     Ok(())
//! }
//! ```
use std::sync::Arc;

use warden_core::services::LockoutService;

mod builder;

pub use builder::{NoRepository, WardenBuilder, WardenBuilderError, WithRepository};

/// Re-export core types from warden_core
pub use warden_core::{
    AccountAuthState, AccountRepository, Decision, Event, EventBus, EventHandler,
    InMemoryAccountRepository, LockoutConfig, LockoutNotifier, LockoutOutcome,
    LockoutPolicyEvaluator, MailSender, NoActionReason, NotificationContext, NotificationMail,
    NotificationMailConfig, NotificationOutcome, NotificationRenderer, RequestContext,
    SkipReason,
};

#[cfg(feature = "mailer")]
pub use warden_core::MailerNotifier;

#[cfg(feature = "mailer")]
pub use warden_mailer::{MailerConfig, TransportConfig};

/// Errors that can occur when using Warden.
#[derive(Debug, thiserror::Error)]
pub enum WardenError {
    /// The account store failed or the account does not exist
    #[error("Storage error: {0}")]
    StorageError(String),
    /// Any other lockout error
    #[error("Lockout error: {0}")]
    LockoutError(String),
}

impl From<warden_core::Error> for WardenError {
    fn from(error: warden_core::Error) -> Self {
        match error {
            warden_core::Error::Storage(e) => WardenError::StorageError(e.to_string()),
            other => WardenError::LockoutError(other.to_string()),
        }
    }
}

/// The main entry point: applies the lockout policy after authentication attempts.
pub struct Warden<R: AccountRepository> {
    service: Arc<LockoutService<R>>,
}

impl<R: AccountRepository> Clone for Warden<R> {
    fn clone(&self) -> Self {
        Self {
            service: Arc::clone(&self.service),
        }
    }
}

impl<R: AccountRepository> Warden<R> {
    /// Create a Warden with no notifier and no event handlers.
    ///
    /// Use [`WardenBuilder`] to configure mail delivery.
    pub fn new(repository: Arc<R>, config: LockoutConfig) -> Self {
        Self {
            service: Arc::new(LockoutService::new(repository, config)),
        }
    }

    pub(crate) fn from_service(service: LockoutService<R>) -> Self {
        Self {
            service: Arc::new(service),
        }
    }

    /// Call after the account store has recorded an authentication attempt.
    ///
    /// # Arguments
    ///
    /// * `account_identifier` - The account that attempted to authenticate
    /// * `request` - Host, client IP and user agent of the triggering request
    pub async fn authentication_attempted(
        &self,
        account_identifier: &str,
        request: &RequestContext,
    ) -> Result<LockoutOutcome, WardenError> {
        Ok(self
            .service
            .handle_authentication_attempt(account_identifier, request)
            .await?)
    }

    /// Like [`authentication_attempted`](Self::authentication_attempted), for callers that
    /// already hold the updated account state.
    pub async fn authentication_attempted_with_state(
        &self,
        account: &AccountAuthState,
        request: &RequestContext,
    ) -> Result<LockoutOutcome, WardenError> {
        Ok(self.service.evaluate_snapshot(account, request).await?)
    }

    pub fn config(&self) -> &LockoutConfig {
        self.service.config()
    }

    pub fn is_enabled(&self) -> bool {
        self.service.is_enabled()
    }

    pub fn event_bus(&self) -> &EventBus {
        self.service.event_bus()
    }
}
