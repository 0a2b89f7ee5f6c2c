//! Account service - single-account operations.
//!
//! List, lookup, create, deposit and withdraw. None of these touch more than
//! one account, and deposit/withdraw are plain read-then-increment sequences
//! with no isolation from concurrent requests.

use chrono::Utc;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::{
    error::AppError,
    models::{
        account::{Account, AccountStatus, CreateAccountRequest},
        transaction::{AmountRequest, BalanceChange, TransactionKind},
    },
    services::validation::{opening_balance, positive_amount, present, present_value},
    store::AccountStore,
};

pub async fn list_accounts(store: &dyn AccountStore) -> Result<Vec<Account>, AppError> {
    store.list().await
}

/// Look up one account, mapping absence to `AccountNotFound`.
pub async fn find_account(store: &dyn AccountStore, account_number: &str) -> Result<Account, AppError> {
    store
        .get(account_number)
        .await?
        .ok_or_else(|| AppError::AccountNotFound(format!("Account {account_number} not found")))
}

/// Create a new active account.
///
/// # Errors
///
/// - `InvalidRequest`: a required field is missing or the opening balance is invalid
/// - `DuplicateAccount`: the account number is already taken
pub async fn create_account(
    store: &dyn AccountStore,
    request: CreateAccountRequest,
    currency: &str,
) -> Result<Account, AppError> {
    let (Some(account_number), Some(account_holder), Some(email)) = (
        present(request.account_number),
        present(request.account_holder),
        present(request.email),
    ) else {
        return Err(AppError::InvalidRequest(
            "accountNumber, accountHolder and email are required".to_string(),
        ));
    };
    let balance = opening_balance(request.initial_balance)?;

    if store.get(&account_number).await?.is_some() {
        return Err(AppError::DuplicateAccount(account_number));
    }

    let account = store
        .create(Account::new(account_number, account_holder, email, balance, currency))
        .await?;
    tracing::info!(account_number = %account.account_number, "Account created");

    Ok(account)
}

/// Add funds to an account.
pub async fn deposit(store: &dyn AccountStore, request: AmountRequest) -> Result<BalanceChange, AppError> {
    let (account_number, amount) = parse_amount_request(request)?;
    let account = find_account(store, &account_number).await?;

    if store.increment_balance(&account_number, amount).await? == 0 {
        return Err(AppError::TransactionFailed("Deposit could not be applied".to_string()));
    }

    let updated = find_account(store, &account_number).await?;
    tracing::info!(%account_number, %amount, "Deposit applied");

    Ok(balance_change(TransactionKind::Deposit, account, updated, amount))
}

/// Remove funds from an account.
///
/// The sufficiency check reads the balance before the decrement is issued,
/// so two concurrent withdrawals can both pass it.
pub async fn withdraw(store: &dyn AccountStore, request: AmountRequest) -> Result<BalanceChange, AppError> {
    let (account_number, amount) = parse_amount_request(request)?;
    let account = find_account(store, &account_number).await?;

    if account.balance < amount {
        return Err(AppError::InsufficientFunds {
            available: account.balance,
            requested: amount,
        });
    }

    if store.increment_balance(&account_number, -amount).await? == 0 {
        return Err(AppError::TransactionFailed("Withdrawal could not be applied".to_string()));
    }

    let updated = find_account(store, &account_number).await?;
    tracing::info!(%account_number, %amount, "Withdrawal applied");

    Ok(balance_change(TransactionKind::Withdrawal, account, updated, amount))
}

fn parse_amount_request(request: AmountRequest) -> Result<(String, Decimal), AppError> {
    let (Some(account_number), Some(amount)) =
        (present(request.account_number), present_value(request.amount))
    else {
        return Err(AppError::InvalidRequest(
            "accountNumber and amount are required".to_string(),
        ));
    };
    Ok((account_number, positive_amount(&amount)?))
}

fn balance_change(kind: TransactionKind, before: Account, after: Account, amount: Decimal) -> BalanceChange {
    BalanceChange {
        transaction_id: Uuid::new_v4(),
        kind,
        account_number: after.account_number,
        account_holder: after.account_holder,
        amount,
        currency: after.currency,
        previous_balance: before.balance,
        new_balance: after.balance,
        timestamp: Utc::now(),
    }
}

/// Insert the ACC001..ACC004 demo accounts.
///
/// Accounts that already exist are left untouched, so this is safe to run
/// on every startup. Returns the number of accounts inserted.
pub async fn seed_demo_accounts(store: &dyn AccountStore, currency: &str) -> Result<usize, AppError> {
    let demo = [
        ("ACC001", "Alice Johnson", "alice@example.com", 5_000, AccountStatus::Active),
        ("ACC002", "Bob Smith", "bob@example.com", 10_000, AccountStatus::Active),
        ("ACC003", "Carol White", "carol@example.com", 2_500, AccountStatus::Inactive),
        ("ACC004", "David Brown", "david@example.com", 500, AccountStatus::Active),
    ];

    let mut inserted = 0;
    for (number, holder, email, balance, status) in demo {
        let account = Account::new(number, holder, email, Decimal::from(balance), currency).with_status(status);
        match store.create(account).await {
            Ok(_) => inserted += 1,
            Err(AppError::DuplicateAccount(_)) => {
                tracing::debug!("Demo account {} already present", number);
            }
            Err(e) => return Err(e),
        }
    }

    Ok(inserted)
}
