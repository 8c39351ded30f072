//! In-memory account store.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;

use crate::{AccountAuthState, Error, error::StorageError, repositories::AccountRepository};

/// A [`DashMap`]-backed account store, for tests and single-process deployments.
///
/// Besides the [`AccountRepository`] operations it models the counter lifecycle an account
/// store is expected to provide: failed attempts increment the counter, a successful
/// attempt resets it.
#[derive(Debug, Default)]
pub struct InMemoryAccountRepository {
    accounts: DashMap<String, AccountAuthState>,
}

impl InMemoryAccountRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace an account.
    pub fn insert(&self, account: AccountAuthState) {
        self.accounts
            .insert(account.account_identifier.clone(), account);
    }

    pub fn get(&self, account_identifier: &str) -> Option<AccountAuthState> {
        self.accounts
            .get(account_identifier)
            .map(|entry| entry.value().clone())
    }

    /// Record the outcome of an authentication attempt and return the updated state.
    pub fn record_authentication_attempt(
        &self,
        account_identifier: &str,
        succeeded: bool,
    ) -> Result<AccountAuthState, Error> {
        let mut account = self
            .accounts
            .get_mut(account_identifier)
            .ok_or_else(|| StorageError::NotFound(account_identifier.to_string()))?;

        if succeeded {
            account.failed_authentication_count = 0;
        } else {
            account.failed_authentication_count =
                account.failed_authentication_count.saturating_add(1);
        }

        Ok(account.clone())
    }
}

#[async_trait]
impl AccountRepository for InMemoryAccountRepository {
    async fn get_auth_state(
        &self,
        account_identifier: &str,
    ) -> Result<Option<AccountAuthState>, Error> {
        Ok(self.get(account_identifier))
    }

    async fn set_expiration_date(
        &self,
        account_identifier: &str,
        expiration_date: DateTime<Utc>,
    ) -> Result<(), Error> {
        let mut account = self
            .accounts
            .get_mut(account_identifier)
            .ok_or_else(|| StorageError::NotFound(account_identifier.to_string()))?;
        account.expiration_date = Some(expiration_date);
        Ok(())
    }
}
