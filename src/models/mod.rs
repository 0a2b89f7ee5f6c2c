//! Data models representing stored entities and API payloads.

/// Account entity and account endpoint payloads
pub mod account;
/// Deposit, withdraw and transfer payloads
pub mod transaction;
