//! Account lockout service.
//!
//! This is the call site that runs after every authentication attempt. It reads the
//! account's failed-attempt counter, asks the [`LockoutPolicyEvaluator`] for a decision and,
//! when the threshold is reached, disables the account and notifies an administrator.
//!
//! # Example
//!
//! ```rust,ignore
//! use warden_core::services::LockoutService;
//! use warden_core::{LockoutConfig, RequestContext};
//!
//! let service = LockoutService::new(repository, LockoutConfig::from_env()?)
//!     .with_notifier(notifier);
//!
//! // After the account store has recorded the attempt:
//! let request = RequestContext::new()
//!     .with_host("example.com")
//!     .with_client_ip("192.168.1.1");
//! let outcome = service.handle_authentication_attempt("alice", &request).await?;
//! if outcome.decision.is_lock() {
//!     // The account is now expired
//! }
//! ```

use std::future::Future;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::{
    AccountAuthState, Error, LockoutConfig, RequestContext,
    error::StorageError,
    events::{Event, EventBus},
    notification::{
        LockoutNotifier, NotificationContext, NotificationMail, NotificationOutcome, SkipReason,
    },
    policy::{Decision, LockoutPolicyEvaluator, NoActionReason},
    repositories::AccountRepository,
};

/// What the service did for one authentication attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LockoutOutcome {
    pub decision: Decision,
    /// Present only when the account was locked.
    pub notification: Option<NotificationOutcome>,
}

impl LockoutOutcome {
    fn no_action(decision: Decision) -> Self {
        Self {
            decision,
            notification: None,
        }
    }
}

/// Service applying the lockout policy after authentication attempts.
///
/// # Thread Safety
///
/// The service can be shared across tasks. Evaluations for the same account identifier are
/// serialized, so the read-count, check-threshold and mark-locked sequence is atomic per
/// account. Different accounts are evaluated concurrently.
pub struct LockoutService<R: AccountRepository> {
    repository: Arc<R>,
    config: LockoutConfig,
    evaluator: LockoutPolicyEvaluator,
    notifier: Option<Arc<dyn LockoutNotifier>>,
    events: EventBus,
    account_locks: DashMap<String, Arc<Mutex<()>>>,
}

impl<R: AccountRepository> LockoutService<R> {
    /// Create a new LockoutService without a notifier.
    ///
    /// # Arguments
    ///
    /// * `repository` - The account store
    /// * `config` - Lockout configuration, loaded once at startup
    pub fn new(repository: Arc<R>, config: LockoutConfig) -> Self {
        Self {
            repository,
            evaluator: LockoutPolicyEvaluator::from_config(&config),
            config,
            notifier: None,
            events: EventBus::default(),
            account_locks: DashMap::new(),
        }
    }

    pub fn with_notifier(mut self, notifier: Arc<dyn LockoutNotifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    pub fn with_event_bus(mut self, events: EventBus) -> Self {
        self.events = events;
        self
    }

    pub fn config(&self) -> &LockoutConfig {
        &self.config
    }

    pub fn is_enabled(&self) -> bool {
        self.evaluator.is_enabled()
    }

    pub fn event_bus(&self) -> &EventBus {
        &self.events
    }

    /// Apply the policy after the account store has recorded an authentication attempt.
    ///
    /// The account state is read from the repository while holding the account's lock.
    /// If lockout is disabled this returns immediately without touching the repository.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the account does not exist or cannot be read or updated.
    /// Notification failures are never returned as errors; they are reported in
    /// [`LockoutOutcome::notification`].
    pub async fn handle_authentication_attempt(
        &self,
        account_identifier: &str,
        request: &RequestContext,
    ) -> Result<LockoutOutcome, Error> {
        if !self.is_enabled() {
            return Ok(LockoutOutcome::no_action(Decision::NoAction(
                NoActionReason::Disabled,
            )));
        }

        self.serialized(
            account_identifier,
            self.load_and_apply(account_identifier, request),
        )
        .await
    }

    /// Apply the policy to an account state the caller already holds.
    ///
    /// Use this when the authentication code path has the freshly updated account at hand.
    pub async fn evaluate_snapshot(
        &self,
        account: &AccountAuthState,
        request: &RequestContext,
    ) -> Result<LockoutOutcome, Error> {
        if !self.is_enabled() {
            return Ok(LockoutOutcome::no_action(
                self.evaluator.evaluate(account, Utc::now()),
            ));
        }

        self.serialized(&account.account_identifier, self.apply(account, request))
            .await
    }

    async fn load_and_apply(
        &self,
        account_identifier: &str,
        request: &RequestContext,
    ) -> Result<LockoutOutcome, Error> {
        let account = self
            .repository
            .get_auth_state(account_identifier)
            .await?
            .ok_or_else(|| StorageError::NotFound(account_identifier.to_string()))?;

        self.apply(&account, request).await
    }

    async fn apply(
        &self,
        account: &AccountAuthState,
        request: &RequestContext,
    ) -> Result<LockoutOutcome, Error> {
        let decision = self.evaluator.evaluate(account, Utc::now());

        let Decision::LockAndNotify { locked_at } = decision else {
            tracing::debug!(
                account_identifier = %account.account_identifier,
                failed_attempts = account.failed_authentication_count,
                threshold = self.evaluator.threshold(),
                "Failed attempts below lockout threshold"
            );
            return Ok(LockoutOutcome::no_action(decision));
        };

        self.repository
            .set_expiration_date(&account.account_identifier, locked_at)
            .await
            .inspect_err(|e| {
                tracing::error!(
                    account_identifier = %account.account_identifier,
                    error = %e,
                    "Failed to persist account lock"
                );
            })?;

        tracing::warn!(
            account_identifier = %account.account_identifier,
            failed_attempts = account.failed_authentication_count,
            threshold = self.evaluator.threshold(),
            ip_address = request.client_ip_or_default(),
            "Account locked after too many failed authentication attempts"
        );

        self.events.emit(&Event::AccountLocked {
            account_identifier: account.account_identifier.clone(),
            failed_attempts: account.failed_authentication_count,
            threshold: self.evaluator.threshold(),
            locked_at,
            ip_address: request.client_ip.clone(),
        })
        .await;

        let notification = self.notify(account, request, locked_at).await;

        Ok(LockoutOutcome {
            decision,
            notification: Some(notification),
        })
    }

    async fn notify(
        &self,
        account: &AccountAuthState,
        request: &RequestContext,
        locked_at: DateTime<Utc>,
    ) -> NotificationOutcome {
        if !self.config.notification_enabled() {
            tracing::info!(
                account_identifier = %account.account_identifier,
                "No notification recipients configured, skipping lockout notification"
            );
            return self.skipped(account, SkipReason::NoRecipients).await;
        }

        let Some(notifier) = &self.notifier else {
            tracing::info!(
                account_identifier = %account.account_identifier,
                "No notifier configured, skipping lockout notification"
            );
            return self.skipped(account, SkipReason::NoNotifier).await;
        };

        let context = NotificationContext::new(
            account,
            self.evaluator.threshold(),
            request,
            locked_at,
        );
        let Some(mail) = NotificationMail::compose(&self.config.notification_mail, &context)
        else {
            return self.skipped(account, SkipReason::NoRecipients).await;
        };

        match notifier.notify(&mail).await {
            Ok(()) => {
                tracing::info!(
                    account_identifier = %account.account_identifier,
                    recipients = mail.to.len(),
                    "Sent lockout notification"
                );
                self.events.emit(&Event::NotificationSent {
                    account_identifier: account.account_identifier.clone(),
                    recipients: mail.to,
                })
                .await;
                NotificationOutcome::Sent
            }
            Err(e) => {
                tracing::warn!(
                    account_identifier = %account.account_identifier,
                    error = %e,
                    "Failed to send lockout notification"
                );
                self.events.emit(&Event::NotificationFailed {
                    account_identifier: account.account_identifier.clone(),
                    error: e.to_string(),
                })
                .await;
                NotificationOutcome::Failed(e.to_string())
            }
        }
    }

    async fn skipped(&self, account: &AccountAuthState, reason: SkipReason) -> NotificationOutcome {
        self.events.emit(&Event::NotificationSkipped {
            account_identifier: account.account_identifier.clone(),
        })
        .await;
        NotificationOutcome::Skipped(reason)
    }

    /// Run `work` while holding the lock for `account_identifier`.
    async fn serialized<T>(&self, account_identifier: &str, work: impl Future<Output = T>) -> T {
        let lock = self
            .account_locks
            .entry(account_identifier.to_string())
            .or_default()
            .clone();

        let result = {
            let _guard = lock.lock().await;
            work.await
        };

        drop(lock);
        self.account_locks
            .remove_if(account_identifier, |_, lock| Arc::strong_count(lock) == 1);

        result
    }
}
