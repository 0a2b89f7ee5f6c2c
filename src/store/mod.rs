//! Account persistence.
//!
//! Handlers and services only see the [`AccountStore`] trait; the concrete
//! store is picked at startup from configuration and shared as
//! `Arc<dyn AccountStore>`.

use std::sync::Arc;

use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::{error::AppError, models::account::Account};

pub mod memory;
pub mod postgres;

pub use memory::MemoryAccountStore;
pub use postgres::PgAccountStore;

pub type SharedStore = Arc<dyn AccountStore>;

/// Result of [`AccountStore::transfer_atomic`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AtomicTransfer {
    /// Both legs were applied.
    Applied,
    /// The sender was missing, not active, or short of funds when the debit ran.
    /// Nothing changed.
    InsufficientFunds,
    /// The receiver was missing or not active when the credit ran. Nothing changed.
    CreditRejected,
}

/// Key-value persistence for accounts, keyed by account number.
///
/// Every method is an independent operation. No method (other than
/// `transfer_atomic`) is atomic with any other call.
#[async_trait]
pub trait AccountStore: Send + Sync {
    /// All accounts in creation order.
    async fn list(&self) -> Result<Vec<Account>, AppError>;

    async fn get(&self, account_number: &str) -> Result<Option<Account>, AppError>;

    /// Insert a new account.
    ///
    /// # Errors
    ///
    /// `DuplicateAccount` if the account number is taken.
    async fn create(&self, account: Account) -> Result<Account, AppError>;

    /// Apply `balance += delta` and stamp `last_transaction`.
    ///
    /// Returns the number of records modified (0 or 1). Callers treat 0 as a
    /// missed update.
    async fn increment_balance(&self, account_number: &str, delta: Decimal)
    -> Result<u64, AppError>;

    /// Debit `from` and credit `to` as one unit.
    ///
    /// The debit only applies when `from` is active and holds at least
    /// `amount`; the credit only applies when `to` is active. If either leg is
    /// refused nothing is changed.
    async fn transfer_atomic(
        &self,
        from: &str,
        to: &str,
        amount: Decimal,
    ) -> Result<AtomicTransfer, AppError>;

    /// Connectivity check used by the health endpoint.
    async fn ping(&self) -> Result<(), AppError>;

    /// Short backend name reported by the health endpoint.
    fn backend(&self) -> &'static str;
}
