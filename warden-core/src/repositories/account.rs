//! Repository trait for the account store consulted by the lockout policy.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::{AccountAuthState, Error};

/// Access to the external account store.
///
/// The store owns the failed-attempt counter: it is incremented on failed authentication
/// and reset on success before the lockout service is invoked. The service only reads it.
#[async_trait]
pub trait AccountRepository: Send + Sync + 'static {
    /// Load the authentication state for an account.
    ///
    /// Returns `None` if no account with this identifier exists.
    async fn get_auth_state(&self, account_identifier: &str)
    -> Result<Option<AccountAuthState>, Error>;

    /// Set the account's expiration date, disabling it from that instant.
    async fn set_expiration_date(
        &self,
        account_identifier: &str,
        expiration_date: DateTime<Utc>,
    ) -> Result<(), Error>;
}
