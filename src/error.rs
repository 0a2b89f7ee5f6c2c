//! Error types and HTTP error response handling.
//!
//! This module defines all application errors and how they are converted
//! into HTTP responses with appropriate status codes and JSON bodies.

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use rust_decimal::{Decimal, prelude::ToPrimitive};
use serde_json::{Map, Value, json};

/// Application-wide error type.
///
/// Each variant maps to an HTTP status code and a stable `error` label that
/// clients can match on.
///
/// # Error Categories
///
/// - **Validation Errors**: missing fields, bad amounts, same-account transfers
/// - **Resource Errors**: unknown accounts or routes, duplicate account numbers
/// - **Business Rule Errors**: inactive accounts, insufficient funds
/// - **Store Errors**: writes that modified nothing, database faults
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Database operation failed (e.g., connection error, query error).
    ///
    /// Returns HTTP 500 without exposing the underlying error.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Request body or parameters are invalid.
    ///
    /// Returns HTTP 400 Bad Request.
    /// The String contains details about what was invalid.
    #[error("{0}")]
    InvalidRequest(String),

    /// No account exists with the given account number.
    #[error("{0}")]
    AccountNotFound(String),

    /// Fallback for requests that match no route.
    #[error("The requested endpoint does not exist")]
    RouteNotFound,

    /// An account with this account number already exists.
    #[error("Account with number {0} already exists")]
    DuplicateAccount(String),

    /// Sender or receiver is not `active`.
    #[error("{0}")]
    AccountInactive(String),

    /// Requested amount exceeds the available balance.
    #[error("Insufficient funds: available {available}, requested {requested}")]
    InsufficientFunds {
        available: Decimal,
        requested: Decimal,
    },

    /// The store reported that a balance write modified no record.
    #[error("{0}")]
    TransactionFailed(String),

    /// The credit leg failed and the compensating credit to the sender also
    /// failed. The sender is short by `amount` until someone fixes it by hand.
    #[error("Transfer failed and the debit of {amount} from {account_number} could not be reversed")]
    CompensationFailed {
        account_number: String,
        amount: Decimal,
    },

    /// Unexpected fault. `detail` is echoed to the client when present.
    #[error("An unexpected error occurred")]
    Internal { detail: Option<String> },
}

impl AppError {
    /// Re-wraps a database fault so its detail is reported to the client.
    ///
    /// Used on the transfer path; everywhere else database errors stay opaque.
    pub fn with_detail(self) -> Self {
        match self {
            AppError::Database(e) => AppError::Internal {
                detail: Some(e.to_string()),
            },
            other => other,
        }
    }

    fn status_and_label(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::InvalidRequest(_) => (StatusCode::BAD_REQUEST, "Bad Request"),
            AppError::AccountNotFound(_) | AppError::RouteNotFound => {
                (StatusCode::NOT_FOUND, "Not Found")
            }
            AppError::DuplicateAccount(_) => (StatusCode::CONFLICT, "Conflict"),
            AppError::AccountInactive(_) => (StatusCode::BAD_REQUEST, "Account Inactive"),
            AppError::InsufficientFunds { .. } => (StatusCode::BAD_REQUEST, "Insufficient Funds"),
            AppError::TransactionFailed(_) | AppError::CompensationFailed { .. } => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Transaction Failed")
            }
            AppError::Database(_) | AppError::Internal { .. } => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
            }
        }
    }
}

/// Malformed JSON, wrong content type and similar body rejections become
/// ordinary `Bad Request` errors so clients always get a JSON body.
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::InvalidRequest(rejection.body_text())
    }
}

/// Monetary values go out as plain JSON numbers.
fn decimal_json(value: Decimal) -> Value {
    value.to_f64().map_or(Value::Null, |v| json!(v))
}

/// Convert AppError into an HTTP response.
///
/// # Response Format
///
/// All errors return JSON in this format:
/// ```json
/// {
///   "error": "Insufficient Funds",
///   "message": "Insufficient funds: available 500, requested 10000",
///   "availableBalance": 500.0,
///   "requestedAmount": 10000.0,
///   "shortfall": 9500.0
/// }
/// ```
///
/// Only `InsufficientFunds`, `CompensationFailed` and `Internal` add fields
/// beyond `error` and `message`.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, label) = self.status_and_label();

        let message = match &self {
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                "An internal error occurred".to_string()
            }
            other => other.to_string(),
        };

        let mut body = Map::new();
        body.insert("error".into(), json!(label));
        body.insert("message".into(), json!(message));

        match self {
            AppError::InsufficientFunds {
                available,
                requested,
            } => {
                body.insert("availableBalance".into(), decimal_json(available));
                body.insert("requestedAmount".into(), decimal_json(requested));
                body.insert("shortfall".into(), decimal_json(requested - available));
            }
            AppError::CompensationFailed {
                account_number,
                amount,
            } => {
                body.insert("requiresManualIntervention".into(), json!(true));
                body.insert("accountNumber".into(), json!(account_number));
                body.insert("amount".into(), decimal_json(amount));
            }
            AppError::Internal {
                detail: Some(detail),
            } => {
                body.insert("details".into(), json!(detail));
            }
            _ => {}
        }

        (status, Json(Value::Object(body))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    async fn body_of(error: AppError) -> (StatusCode, Value) {
        let response = error.into_response();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn insufficient_funds_reports_shortfall() {
        let (status, body) = body_of(AppError::InsufficientFunds {
            available: Decimal::from(500),
            requested: Decimal::from(10_000),
        })
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Insufficient Funds");
        assert_eq!(body["availableBalance"].as_f64(), Some(500.0));
        assert_eq!(body["requestedAmount"].as_f64(), Some(10_000.0));
        assert_eq!(body["shortfall"].as_f64(), Some(9_500.0));
    }

    #[tokio::test]
    async fn database_errors_hide_details_unless_rewrapped() {
        let (status, body) = body_of(AppError::Database(sqlx::Error::PoolTimedOut)).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Internal Server Error");
        assert!(body.get("details").is_none());

        let (_, body) = body_of(AppError::Database(sqlx::Error::PoolTimedOut).with_detail()).await;
        assert_eq!(body["error"], "Internal Server Error");
        assert!(body["details"].as_str().unwrap().contains("timed out"));
    }

    #[tokio::test]
    async fn compensation_failure_keeps_transaction_failed_label() {
        let (status, body) = body_of(AppError::CompensationFailed {
            account_number: "ACC001".into(),
            amount: Decimal::from(500),
        })
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Transaction Failed");
        assert_eq!(body["requiresManualIntervention"], true);
        assert_eq!(body["accountNumber"], "ACC001");
    }
}
