//! Transaction HTTP handlers.
//!
//! This module implements the money-moving endpoints:
//! - POST /deposit - Add money to an account
//! - POST /withdraw - Remove money from an account
//! - POST /transfer - Move money between accounts

use crate::{
    app::AppState,
    error::AppError,
    extract::ApiJson,
    models::transaction::{AmountRequest, BalanceChange, TransactionEnvelope, TransferRecord, TransferRequest},
    services::{account_service, transfer_service},
};
use axum::{Json, extract::State};

/// Deposit into an account.
///
/// # Request Body
///
/// ```json
/// { "accountNumber": "ACC001", "amount": 250 }
/// ```
///
/// # Response (200)
///
/// ```json
/// {
///   "message": "Deposit successful",
///   "transaction": {
///     "transactionId": "770e8400-...",
///     "type": "DEPOSIT",
///     "accountNumber": "ACC001",
///     "amount": 250.0,
///     "previousBalance": 5000.0,
///     "newBalance": 5250.0,
///     ...
///   }
/// }
/// ```
pub async fn deposit(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<AmountRequest>,
) -> Result<Json<TransactionEnvelope<BalanceChange>>, AppError> {
    let change = account_service::deposit(state.store.as_ref(), request).await?;

    Ok(Json(TransactionEnvelope {
        message: "Deposit successful".to_string(),
        transaction: change,
    }))
}

/// Withdraw from an account.
///
/// # Validation
///
/// - Account must exist
/// - Balance must cover the amount (400 `Insufficient Funds` otherwise)
pub async fn withdraw(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<AmountRequest>,
) -> Result<Json<TransactionEnvelope<BalanceChange>>, AppError> {
    let change = account_service::withdraw(state.store.as_ref(), request).await?;

    Ok(Json(TransactionEnvelope {
        message: "Withdrawal successful".to_string(),
        transaction: change,
    }))
}

/// Transfer money between accounts.
///
/// # Request Body
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
/// # Validation
///
/// - All of `fromAccount`, `toAccount`, `amount` present
/// - Amount is a positive number
/// - Accounts differ, both exist, both active
/// - Sender balance covers the amount
///
/// Database faults on this path are reported with their detail.
pub async fn transfer(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<TransferRequest>,
) -> Result<Json<TransactionEnvelope<TransferRecord>>, AppError> {
    let record = transfer_service::execute_transfer(state.store.as_ref(), state.transfer_mode, request)
        .await
        .map_err(AppError::with_detail)?;

    Ok(Json(TransactionEnvelope {
        message: "Transfer successful".to_string(),
        transaction: record,
    }))
}
