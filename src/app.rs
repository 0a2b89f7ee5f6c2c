//! Router construction and shared application state.

use std::sync::Arc;

use axum::{
    Router,
    http::Method,
    routing::{get, post},
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{
    config::{Config, TransferMode},
    error::AppError,
    handlers,
    store::SharedStore,
};

/// State shared with every handler. Cheap to clone.
#[derive(Clone)]
pub struct AppState {
    pub store: SharedStore,
    pub transfer_mode: TransferMode,
    /// Currency code stamped on newly created accounts
    pub currency: Arc<str>,
}

impl AppState {
    pub fn new(store: SharedStore, config: &Config) -> Self {
        Self {
            store,
            transfer_mode: config.transfer_mode,
            currency: Arc::from(config.currency.as_str()),
        }
    }
}

/// Build the full router with all routes, CORS and request tracing.
///
/// | Method | Path                         |
/// |--------|------------------------------|
/// | GET    | `/health`                    |
/// | GET    | `/accounts`                  |
/// | POST   | `/accounts`                  |
/// | GET    | `/accounts/{account_number}` |
/// | POST   | `/deposit`                   |
/// | POST   | `/withdraw`                  |
/// | POST   | `/transfer`                  |
///
/// Anything else, including a known path with the wrong method, gets a JSON 404.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any);

    Router::new()
        .route("/health", get(handlers::health::health_check))
        .route(
            "/accounts",
            get(handlers::accounts::list_accounts).post(handlers::accounts::create_account),
        )
        .route(
            "/accounts/{account_number}",
            get(handlers::accounts::get_account),
        )
        .route("/deposit", post(handlers::transactions::deposit))
        .route("/withdraw", post(handlers::transactions::withdraw))
        .route("/transfer", post(handlers::transactions::transfer))
        .fallback(route_not_found)
        .method_not_allowed_fallback(route_not_found)
        .layer(cors)
        // Request/response spans for every call
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn route_not_found() -> AppError {
    AppError::RouteNotFound
}
