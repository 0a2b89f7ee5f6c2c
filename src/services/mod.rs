//! Business logic layer, independent of HTTP.

pub mod account_service;
pub mod transfer_service;
pub mod validation;
