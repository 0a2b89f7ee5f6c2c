//! In-process account store.
//!
//! Used when no `DATABASE_URL` is configured, and by the test suites. The
//! lock is held for a single call only, so two requests interleave between
//! calls exactly as they would against a database.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;
use tokio::sync::RwLock;

use super::{AccountStore, AtomicTransfer};
use crate::{error::AppError, models::account::Account};

#[derive(Debug, Default)]
pub struct MemoryAccountStore {
    accounts: RwLock<HashMap<String, Account>>,
}

impl MemoryAccountStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AccountStore for MemoryAccountStore {
    async fn list(&self) -> Result<Vec<Account>, AppError> {
        let accounts = self.accounts.read().await;
        let mut all: Vec<Account> = accounts.values().cloned().collect();
        all.sort_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then_with(|| a.account_number.cmp(&b.account_number))
        });
        Ok(all)
    }

    async fn get(&self, account_number: &str) -> Result<Option<Account>, AppError> {
        Ok(self.accounts.read().await.get(account_number).cloned())
    }

    async fn create(&self, account: Account) -> Result<Account, AppError> {
        let mut accounts = self.accounts.write().await;
        if accounts.contains_key(&account.account_number) {
            return Err(AppError::DuplicateAccount(account.account_number));
        }
        accounts.insert(account.account_number.clone(), account.clone());
        Ok(account)
    }

    async fn increment_balance(
        &self,
        account_number: &str,
        delta: Decimal,
    ) -> Result<u64, AppError> {
        let mut accounts = self.accounts.write().await;
        match accounts.get_mut(account_number) {
            Some(account) => {
                account.balance += delta;
                account.last_transaction = Some(Utc::now());
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn transfer_atomic(
        &self,
        from: &str,
        to: &str,
        amount: Decimal,
    ) -> Result<AtomicTransfer, AppError> {
        let mut accounts = self.accounts.write().await;

        let debit_ok = accounts
            .get(from)
            .is_some_and(|sender| sender.is_active() && sender.balance >= amount);
        if !debit_ok {
            return Ok(AtomicTransfer::InsufficientFunds);
        }
        let credit_ok = accounts.get(to).is_some_and(|receiver| receiver.is_active());
        if !credit_ok {
            return Ok(AtomicTransfer::CreditRejected);
        }

        let now = Utc::now();
        for (account_number, delta) in [(from, -amount), (to, amount)] {
            if let Some(account) = accounts.get_mut(account_number) {
                account.balance += delta;
                account.last_transaction = Some(now);
            }
        }
        Ok(AtomicTransfer::Applied)
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}
