//! Account management HTTP handlers.
//!
//! This module implements the account-related API endpoints:
//! - POST /accounts - Create new account
//! - GET /accounts/{account_number} - Get account by account number
//! - GET /accounts - List all accounts

use crate::{
    app::AppState,
    error::AppError,
    extract::ApiJson,
    models::account::{AccountEnvelope, AccountListResponse, AccountResponse, CreateAccountRequest},
    services::account_service,
};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

/// Create a new account.
///
/// # Endpoint
///
/// `POST /accounts`
///
/// # Request Body
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
/// # Response
///
/// - **Success (201 Created)**: `{ message, account }`
/// - **Error (400)**: Missing field or invalid initial balance
/// - **Error (409)**: Account number already exists
pub async fn create_account(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<CreateAccountRequest>,
) -> Result<(StatusCode, Json<AccountEnvelope>), AppError> {
    let account = account_service::create_account(state.store.as_ref(), request, &state.currency).await?;

    Ok((
        StatusCode::CREATED,
        Json(AccountEnvelope {
            message: "Account created successfully".to_string(),
            account: account.into(),
        }),
    ))
}

/// Get a specific account by account number.
///
/// # Response
///
/// - **Success (200 OK)**: `{ message, account }`
/// - **Error (404)**: No account with that number
pub async fn get_account(
    State(state): State<AppState>,
    Path(account_number): Path<String>,
) -> Result<Json<AccountEnvelope>, AppError> {
    let account = account_service::find_account(state.store.as_ref(), &account_number).await?;

    Ok(Json(AccountEnvelope {
        message: "Account retrieved successfully".to_string(),
        account: account.into(),
    }))
}

/// List all accounts.
///
/// # Response
///
/// ```json
/// {
///   "message": "Accounts retrieved successfully",
///   "count": 2,
///   "accounts": [ { "accountNumber": "ACC001", ... }, { "accountNumber": "ACC002", ... } ]
/// }
/// ```
///
/// Accounts are returned in creation order. Internal ids are never included.
pub async fn list_accounts(State(state): State<AppState>) -> Result<Json<AccountListResponse>, AppError> {
    let accounts: Vec<AccountResponse> = account_service::list_accounts(state.store.as_ref())
        .await?
        .into_iter()
        .map(Into::into)
        .collect();

    Ok(Json(AccountListResponse {
        message: "Accounts retrieved successfully".to_string(),
        count: accounts.len(),
        accounts,
    }))
}
