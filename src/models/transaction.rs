//! Transaction request/response types.
//!
//! This module defines:
//! - Request bodies for deposit, withdraw and transfer
//! - `TransferRecord`: Result of a successful transfer
//! - `BalanceChange`: Result of a successful deposit or withdrawal
//!
//! Nothing here is persisted; transaction records only exist in responses.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// Request to deposit into or withdraw from one account.
///
/// # JSON Example
///
/// ```json
/// {
///   "accountNumber": "ACC001",
///   "amount": 250
/// }
/// ```
///
/// `amount` is kept as raw JSON so that non-numeric values can be rejected
/// with a proper `Bad Request` message.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AmountRequest {
    pub account_number: Option<String>,
    pub amount: Option<Value>,
}

/// Request to transfer money between accounts.
///
/// # JSON Example
///
/// ```json
/// {
///   "fromAccount": "ACC001",
///   "toAccount": "ACC002",
///   "amount": 500,
///   "description": "Rent share"
/// }
/// ```
///
/// # Atomicity
///
/// None by default: the debit and the credit are separate writes. See
/// `TransferMode::Atomic` for the single-unit alternative.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferRequest {
    pub from_account: Option<String>,
    pub to_account: Option<String>,
    pub amount: Option<Value>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TransactionKind {
    Deposit,
    Withdrawal,
    Transfer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TransactionStatus {
    Success,
}

/// Record returned for a completed transfer.
///
/// # JSON Example
///
/// ```json
/// {
///   "transactionId": "770e8400-e29b-41d4-a716-446655440002",
///   "type": "TRANSFER",
///   "fromAccount": "ACC001",
///   "toAccount": "ACC002",
///   "fromAccountHolder": "Alice Johnson",
///   "toAccountHolder": "Bob Smith",
///   "amount": 500.0,
///   "currency": "USD",
///   "description": "Transfer from ACC001 to ACC002",
///   "senderBalanceBefore": 5000.0,
///   "senderBalanceAfter": 4500.0,
///   "receiverBalanceBefore": 10000.0,
///   "receiverBalanceAfter": 10500.0,
///   "status": "SUCCESS",
///   "timestamp": "2025-12-21T16:00:00Z"
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferRecord {
    pub transaction_id: Uuid,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub from_account: String,
    pub to_account: String,
    pub from_account_holder: String,
    pub to_account_holder: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub currency: String,
    pub description: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub sender_balance_before: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub sender_balance_after: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub receiver_balance_before: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub receiver_balance_after: Decimal,
    pub status: TransactionStatus,
    pub timestamp: DateTime<Utc>,
}

/// Record returned for a completed deposit or withdrawal.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceChange {
    pub transaction_id: Uuid,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub account_number: String,
    pub account_holder: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub currency: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub previous_balance: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub new_balance: Decimal,
    pub timestamp: DateTime<Utc>,
}

/// `{ message, transaction }` body shared by deposit, withdraw and transfer.
#[derive(Debug, Serialize)]
pub struct TransactionEnvelope<T> {
    pub message: String,
    pub transaction: T,
}
