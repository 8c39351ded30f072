//! The lockout decision.
//!
//! [`LockoutPolicyEvaluator`] is a pure function of the account's failed-attempt count, the
//! configured threshold and the evaluation time. Persisting the lock and sending the
//! notification are left to the caller, see [`LockoutService`](crate::services::LockoutService).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{AccountAuthState, LockoutConfig};

/// Why an evaluation produced no action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NoActionReason {
    /// The threshold is `0`.
    Disabled,
    /// The account has fewer failed attempts than the threshold.
    BelowThreshold { failed_attempts: u32, threshold: u32 },
}

/// Outcome of evaluating one authentication attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Decision {
    NoAction(NoActionReason),
    /// Lock the account as of `locked_at` and notify the administrator.
    LockAndNotify { locked_at: DateTime<Utc> },
}

impl Decision {
    pub fn is_lock(&self) -> bool {
        matches!(self, Decision::LockAndNotify { .. })
    }

    pub fn locked_at(&self) -> Option<DateTime<Utc>> {
        match self {
            Decision::LockAndNotify { locked_at } => Some(*locked_at),
            Decision::NoAction(_) => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockoutPolicyEvaluator {
    threshold: u32,
}

impl LockoutPolicyEvaluator {
    pub fn new(failed_attempts_threshold: u32) -> Self {
        Self {
            threshold: failed_attempts_threshold,
        }
    }

    pub fn from_config(config: &LockoutConfig) -> Self {
        Self::new(config.failed_attempts_threshold)
    }

    pub fn threshold(&self) -> u32 {
        self.threshold
    }

    pub fn is_enabled(&self) -> bool {
        self.threshold > 0
    }

    /// Decide what to do after an authentication attempt, as of `now`.
    pub fn evaluate(&self, account: &AccountAuthState, now: DateTime<Utc>) -> Decision {
        if !self.is_enabled() {
            return Decision::NoAction(NoActionReason::Disabled);
        }

        if account.failed_authentication_count >= self.threshold {
            Decision::LockAndNotify { locked_at: now }
        } else {
            Decision::NoAction(NoActionReason::BelowThreshold {
                failed_attempts: account.failed_authentication_count,
                threshold: self.threshold,
            })
        }
    }
}
