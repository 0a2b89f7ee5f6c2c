//! Transfer Service
//!
//! A REST API for managing accounts and moving money between them:
//! account list/lookup/create, deposit, withdraw, and transfer.
//!
//! # Architecture
//!
//! - **Web Framework**: Axum (async HTTP server)
//! - **Storage**: `AccountStore` trait with PostgreSQL (sqlx) and in-memory implementations
//! - **Format**: JSON requests/responses, camelCase fields
//!
//! # Transfer modes
//!
//! By default a transfer is a debit followed by a separate credit, with one
//! compensating credit if the second write modifies nothing. Setting
//! `TRANSFER_MODE=atomic` makes the store apply a conditional debit and the
//! credit as one unit instead.

pub mod app;
pub mod config;
pub mod db;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod models;
pub mod services;
pub mod store;

pub use app::{AppState, create_router};
