//! Account data models and API request/response types.
//!
//! This module defines:
//! - `Account`: Stored entity representing an account
//! - `AccountStatus`: Whether an account may take part in transfers
//! - `CreateAccountRequest`: Request body for creating accounts
//! - `AccountResponse`: Response body returned to clients

use std::fmt;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Represents an account record from the store.
///
/// # Database Table
///
/// Maps to the `accounts` table, keyed by the unique `account_number`.
///
/// # Balance Storage
///
/// Balances are `Decimal` currency units (NUMERIC in PostgreSQL), so
/// `10.50` stays exactly `10.50`. They are only ever changed through
/// the store's increment operation.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Account {
    /// Internal identifier, never exposed through the API
    pub id: Uuid,

    /// Public account number, unique and immutable after creation
    pub account_number: String,

    pub account_holder: String,

    pub email: String,

    /// Current balance. May go negative under concurrent transfers in
    /// compensating mode.
    pub balance: Decimal,

    /// Currency code (ISO 4217). Every account uses the configured code.
    pub currency: String,

    #[sqlx(try_from = "String")]
    pub status: AccountStatus,

    /// Time of the last debit or credit, `None` until the first one
    pub last_transaction: Option<DateTime<Utc>>,

    pub created_at: DateTime<Utc>,
}

impl Account {
    /// Build a new active account with a fresh internal id.
    pub fn new(
        account_number: impl Into<String>,
        account_holder: impl Into<String>,
        email: impl Into<String>,
        balance: Decimal,
        currency: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            account_number: account_number.into(),
            account_holder: account_holder.into(),
            email: email.into(),
            balance,
            currency: currency.into(),
            status: AccountStatus::Active,
            last_transaction: None,
            created_at: Utc::now(),
        }
    }

    pub fn with_status(mut self, status: AccountStatus) -> Self {
        self.status = status;
        self
    }

    pub fn is_active(&self) -> bool {
        self.status == AccountStatus::Active
    }
}

/// Lifecycle status of an account. Only `Active` accounts can send or
/// receive transfers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountStatus {
    Active,
    Inactive,
    Closed,
}

impl AccountStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountStatus::Active => "active",
            AccountStatus::Inactive => "inactive",
            AccountStatus::Closed => "closed",
        }
    }
}

impl fmt::Display for AccountStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for AccountStatus {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.as_str() {
            "active" => Ok(AccountStatus::Active),
            "inactive" => Ok(AccountStatus::Inactive),
            "closed" => Ok(AccountStatus::Closed),
            other => Err(format!("unknown account status: {other}")),
        }
    }
}

/// Request body for creating a new account.
///
/// # JSON Example
///
/// ```json
/// {
///   "accountNumber": "ACC005",
///   "accountHolder": "Eve Adams",
///   "email": "eve@example.com",
///   "initialBalance": 1000
/// }
/// ```
///
/// # Validation
///
/// - `accountNumber`, `accountHolder`, `email`: required, non-empty
/// - `initialBalance`: optional non-negative number, defaults to 0
///
/// Fields are optional here so that missing values produce our own
/// `Bad Request` message instead of a deserialization failure.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAccountRequest {
    pub account_number: Option<String>,
    pub account_holder: Option<String>,
    pub email: Option<String>,
    pub initial_balance: Option<serde_json::Value>,
}

/// Response body for account endpoints.
///
/// # JSON Example
///
/// ```json
/// {
///   "accountNumber": "ACC001",
///   "accountHolder": "Alice Johnson",
///   "email": "alice@example.com",
///   "balance": 5000.0,
///   "currency": "USD",
///   "status": "active",
///   "lastTransaction": null,
///   "createdAt": "2025-12-20T10:00:00Z"
/// }
/// ```
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountResponse {
    pub account_number: String,
    pub account_holder: String,
    pub email: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub balance: Decimal,
    pub currency: String,
    pub status: AccountStatus,
    pub last_transaction: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// Convert stored Account to API AccountResponse.
///
/// This transformation removes the internal `id` field.
impl From<Account> for AccountResponse {
    fn from(account: Account) -> Self {
        Self {
            account_number: account.account_number,
            account_holder: account.account_holder,
            email: account.email,
            balance: account.balance,
            currency: account.currency,
            status: account.status,
            last_transaction: account.last_transaction,
            created_at: account.created_at,
        }
    }
}

/// `GET /accounts` body.
#[derive(Debug, Serialize)]
pub struct AccountListResponse {
    pub message: String,
    pub count: usize,
    pub accounts: Vec<AccountResponse>,
}

/// Single-account body used by `GET /accounts/{accountNumber}` and `POST /accounts`.
#[derive(Debug, Serialize)]
pub struct AccountEnvelope {
    pub message: String,
    pub account: AccountResponse,
}
