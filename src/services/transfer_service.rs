//! Transfer service - moving funds between two accounts.
//!
//! This service handles:
//! - Request validation (fail fast, before any write)
//! - The debit/credit sequence and its compensating credit
//! - The single-unit alternative selected by `TransferMode::Atomic`
//!
//! # Consistency
//!
//! In `Compensating` mode the debit and the credit are independent store
//! writes. There is no isolation between concurrent transfers touching the
//! same account: two transfers can both pass the balance check against the
//! same balance and overdraw the sender. If the credit is rejected, one
//! compensating credit is attempted; if that also fails the sender stays
//! short and the caller gets `CompensationFailed`.
//!
//! Repeating an identical request repeats the transfer.

use chrono::Utc;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::{
    config::TransferMode,
    error::AppError,
    models::{
        account::Account,
        transaction::{TransactionKind, TransactionStatus, TransferRecord, TransferRequest},
    },
    services::{
        account_service::find_account,
        validation::{positive_amount, present, present_value},
    },
    store::{AccountStore, AtomicTransfer},
};

/// A request that passed every validation step, with the reads it was checked against.
#[derive(Debug)]
struct ValidatedTransfer {
    sender: Account,
    receiver: Account,
    amount: Decimal,
    description: String,
}

/// Execute a transfer.
///
/// # Process
///
/// 1. Validate the request and both accounts
/// 2. Move the funds according to `mode`
/// 3. Re-read both accounts and build the transfer record
///
/// # Errors
///
/// - `InvalidRequest`: missing fields, non-positive amount, same account
/// - `AccountNotFound`: sender or receiver does not exist
/// - `AccountInactive`: sender or receiver is not active
/// - `InsufficientFunds`: sender balance below amount
/// - `TransactionFailed`: a store write modified nothing
/// - `CompensationFailed`: the credit and its compensation both failed
pub async fn execute_transfer(
    store: &dyn AccountStore,
    mode: TransferMode,
    request: TransferRequest,
) -> Result<TransferRecord, AppError> {
    let validated = validate(store, request).await?;
    let from = validated.sender.account_number.as_str();
    let to = validated.receiver.account_number.as_str();

    match mode {
        TransferMode::Compensating => move_funds(store, from, to, validated.amount).await?,
        TransferMode::Atomic => move_funds_atomically(store, from, to, validated.amount).await?,
    }

    let sender_after = find_account(store, from).await?;
    let receiver_after = find_account(store, to).await?;

    let record = TransferRecord {
        transaction_id: Uuid::new_v4(),
        kind: TransactionKind::Transfer,
        from_account: sender_after.account_number,
        to_account: receiver_after.account_number,
        from_account_holder: sender_after.account_holder,
        to_account_holder: receiver_after.account_holder,
        amount: validated.amount,
        currency: validated.sender.currency,
        description: validated.description,
        sender_balance_before: validated.sender.balance,
        sender_balance_after: sender_after.balance,
        receiver_balance_before: validated.receiver.balance,
        receiver_balance_after: receiver_after.balance,
        status: TransactionStatus::Success,
        timestamp: Utc::now(),
    };

    tracing::info!(
        transaction_id = %record.transaction_id,
        from = %record.from_account,
        to = %record.to_account,
        amount = %record.amount,
        "Transfer completed"
    );

    Ok(record)
}

async fn validate(store: &dyn AccountStore, request: TransferRequest) -> Result<ValidatedTransfer, AppError> {
    let (Some(from), Some(to), Some(amount)) = (
        present(request.from_account),
        present(request.to_account),
        present_value(request.amount),
    ) else {
        return Err(AppError::InvalidRequest(
            "fromAccount, toAccount and amount are required".to_string(),
        ));
    };

    let amount = positive_amount(&amount)?;

    if from == to {
        return Err(AppError::InvalidRequest(
            "Cannot transfer to the same account".to_string(),
        ));
    }

    let sender = store
        .get(&from)
        .await?
        .ok_or_else(|| AppError::AccountNotFound(format!("Sender account {from} not found")))?;
    let receiver = store
        .get(&to)
        .await?
        .ok_or_else(|| AppError::AccountNotFound(format!("Receiver account {to} not found")))?;

    if !sender.is_active() {
        return Err(AppError::AccountInactive(format!(
            "Sender account {from} is {}",
            sender.status
        )));
    }
    if !receiver.is_active() {
        return Err(AppError::AccountInactive(format!(
            "Receiver account {to} is {}",
            receiver.status
        )));
    }

    // Checked against this read only; the debit below does not re-check it.
    if sender.balance < amount {
        return Err(AppError::InsufficientFunds {
            available: sender.balance,
            requested: amount,
        });
    }

    let description = present(request.description).unwrap_or_else(|| format!("Transfer from {from} to {to}"));

    Ok(ValidatedTransfer {
        sender,
        receiver,
        amount,
        description,
    })
}

/// Debit, then credit, then compensate once if the credit modified nothing.
async fn move_funds(store: &dyn AccountStore, from: &str, to: &str, amount: Decimal) -> Result<(), AppError> {
    if store.increment_balance(from, -amount).await? == 0 {
        tracing::warn!("Debit of {} from {} modified no record", amount, from);
        return Err(AppError::TransactionFailed(
            "Failed to debit sender account".to_string(),
        ));
    }

    if store.increment_balance(to, amount).await? == 0 {
        tracing::warn!("Credit of {} to {} modified no record, reversing debit", amount, to);

        return match store.increment_balance(from, amount).await {
            Ok(modified) if modified > 0 => Err(AppError::TransactionFailed(
                "Failed to credit receiver account; the debit was reversed".to_string(),
            )),
            outcome => {
                tracing::error!(
                    account_number = %from,
                    %amount,
                    ?outcome,
                    "Compensating credit failed, sender balance needs manual correction"
                );
                Err(AppError::CompensationFailed {
                    account_number: from.to_string(),
                    amount,
                })
            }
        };
    }

    Ok(())
}

/// Conditional debit and credit as one store-level unit.
async fn move_funds_atomically(
    store: &dyn AccountStore,
    from: &str,
    to: &str,
    amount: Decimal,
) -> Result<(), AppError> {
    match store.transfer_atomic(from, to, amount).await? {
        AtomicTransfer::Applied => Ok(()),
        AtomicTransfer::InsufficientFunds => {
            // The sender changed between validation and the debit
            let sender = find_account(store, from).await?;
            tracing::warn!("Atomic debit of {} from {} refused", amount, from);
            if !sender.is_active() {
                return Err(AppError::AccountInactive(format!(
                    "Sender account {from} is {}",
                    sender.status
                )));
            }
            Err(AppError::InsufficientFunds {
                available: sender.balance,
                requested: amount,
            })
        }
        AtomicTransfer::CreditRejected => {
            tracing::warn!("Atomic credit of {} to {} refused", amount, to);
            Err(AppError::TransactionFailed(
                "Failed to credit receiver account; no funds were moved".to_string(),
            ))
        }
    }
}
