//! Request field checks shared by the account and transfer services.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde_json::Value;

use crate::error::AppError;

/// Treat empty and whitespace-only strings as absent.
pub fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Treat JSON `null` as absent.
pub fn present_value(value: Option<Value>) -> Option<Value> {
    value.filter(|v| !v.is_null())
}

/// Parse a JSON number into an exact decimal.
///
/// The number's own text form is parsed, so `0.1` stays `0.1` instead of
/// picking up binary floating-point noise. Strings, booleans and other
/// non-number values are rejected.
pub fn decimal_from_json(value: &Value) -> Option<Decimal> {
    let Value::Number(number) = value else {
        return None;
    };
    let text = number.to_string();
    Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .ok()
}

/// Amount for a deposit, withdrawal or transfer: a number strictly above zero.
pub fn positive_amount(value: &Value) -> Result<Decimal, AppError> {
    match decimal_from_json(value) {
        Some(amount) if amount > Decimal::ZERO => Ok(amount),
        _ => Err(AppError::InvalidRequest(
            "Amount must be a positive number".to_string(),
        )),
    }
}

/// Opening balance for a new account: zero when absent, otherwise a number >= 0.
pub fn opening_balance(value: Option<Value>) -> Result<Decimal, AppError> {
    let Some(value) = present_value(value) else {
        return Ok(Decimal::ZERO);
    };
    match decimal_from_json(&value) {
        Some(balance) if balance >= Decimal::ZERO => Ok(balance),
        _ => Err(AppError::InvalidRequest(
            "Initial balance must be a non-negative number".to_string(),
        )),
    }
}
