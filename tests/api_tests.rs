//! Router-level tests against the in-memory store.
//!
//! Run with: cargo test --test api_tests

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

use transfer_service::{
    AppState,
    config::{Config, TransferMode},
    create_router,
    services::account_service::seed_demo_accounts,
    store::MemoryAccountStore,
};

fn test_config(transfer_mode: TransferMode) -> Config {
    Config {
        database_url: None,
        server_port: 0,
        transfer_mode,
        currency: "USD".to_string(),
        seed_demo_accounts: true,
    }
}

/// Router over a fresh store holding ACC001 (5000), ACC002 (10000),
/// ACC003 (2500, inactive) and ACC004 (500).
async fn seeded_router_with_mode(transfer_mode: TransferMode) -> Router {
    let store = Arc::new(MemoryAccountStore::new());
    seed_demo_accounts(&*store, "USD").await.unwrap();
    create_router(AppState::new(store, &test_config(transfer_mode)))
}

async fn seeded_router() -> Router {
    seeded_router_with_mode(TransferMode::Compensating).await
}

async fn send(router: &Router, req: Request<Body>) -> (StatusCode, Value) {
    let resp = router.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

async fn get(router: &Router, path: &str) -> (StatusCode, Value) {
    let req = Request::builder().uri(path).body(Body::empty()).unwrap();
    send(router, req).await
}

async fn post_json(router: &Router, path: &str, body: Value) -> (StatusCode, Value) {
    let req = Request::builder()
        .method("POST")
        .uri(path)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(&body).unwrap()))
        .unwrap();
    send(router, req).await
}

async fn balance_of(router: &Router, account_number: &str) -> f64 {
    let (status, body) = get(router, &format!("/accounts/{account_number}")).await;
    assert_eq!(status, StatusCode::OK);
    body["account"]["balance"].as_f64().unwrap()
}

// -- accounts ------------------------------------------------------------

#[tokio::test]
async fn health_reports_memory_store() {
    let router = seeded_router().await;
    let (status, body) = get(&router, "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["store"], "memory");
}

#[tokio::test]
async fn list_accounts_returns_count_without_internal_ids() {
    let router = seeded_router().await;
    let (status, body) = get(&router, "/accounts").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 4);
    let accounts = body["accounts"].as_array().unwrap();
    assert_eq!(accounts.len(), 4);
    assert!(accounts.iter().all(|a| a.get("id").is_none()));
    assert!(accounts.iter().any(|a| a["accountNumber"] == "ACC003" && a["status"] == "inactive"));
}

#[tokio::test]
async fn get_unknown_account_is_not_found() {
    let router = seeded_router().await;
    let (status, body) = get(&router, "/accounts/ACC999").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Not Found");
    assert!(body["message"].as_str().unwrap().contains("ACC999"));
}

#[tokio::test]
async fn create_account_then_conflict_on_duplicate() {
    let router = seeded_router().await;
    let payload = json!({
        "accountNumber": "ACC005",
        "accountHolder": "Eve Adams",
        "email": "eve@example.com",
        "initialBalance": 1000
    });

    let (status, body) = post_json(&router, "/accounts", payload.clone()).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["account"]["accountNumber"], "ACC005");
    assert_eq!(body["account"]["balance"].as_f64(), Some(1000.0));
    assert_eq!(body["account"]["currency"], "USD");
    assert_eq!(body["account"]["status"], "active");

    let (status, body) = post_json(&router, "/accounts", payload).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "Conflict");
}

#[tokio::test]
async fn create_account_requires_fields() {
    let router = seeded_router().await;
    let (status, body) = post_json(&router, "/accounts", json!({ "accountNumber": "ACC006" })).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Bad Request");
}

#[tokio::test]
async fn create_account_defaults_initial_balance_to_zero() {
    let router = seeded_router().await;
    let (status, body) = post_json(
        &router,
        "/accounts",
        json!({ "accountNumber": "ACC007", "accountHolder": "Frank", "email": "frank@example.com" }),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["account"]["balance"].as_f64(), Some(0.0));
}

// -- deposit / withdraw --------------------------------------------------

#[tokio::test]
async fn deposit_then_withdraw() {
    let router = seeded_router().await;

    let (status, body) = post_json(&router, "/deposit", json!({ "accountNumber": "ACC004", "amount": 250 })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["transaction"]["type"], "DEPOSIT");
    assert_eq!(body["transaction"]["previousBalance"].as_f64(), Some(500.0));
    assert_eq!(body["transaction"]["newBalance"].as_f64(), Some(750.0));

    let (status, body) = post_json(&router, "/withdraw", json!({ "accountNumber": "ACC004", "amount": 50.5 })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["transaction"]["type"], "WITHDRAWAL");
    assert_eq!(body["transaction"]["newBalance"].as_f64(), Some(699.5));
}

#[tokio::test]
async fn deposit_validates_amount_and_account() {
    let router = seeded_router().await;

    let (status, _) = post_json(&router, "/deposit", json!({ "accountNumber": "ACC001", "amount": "ten" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = post_json(&router, "/deposit", json!({ "accountNumber": "ACC001" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = post_json(&router, "/deposit", json!({ "accountNumber": "ACC999", "amount": 10 })).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Not Found");
}

#[tokio::test]
async fn withdraw_reports_shortfall() {
    let router = seeded_router().await;
    let (status, body) = post_json(&router, "/withdraw", json!({ "accountNumber": "ACC004", "amount": 800 })).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Insufficient Funds");
    assert_eq!(body["availableBalance"].as_f64(), Some(500.0));
    assert_eq!(body["requestedAmount"].as_f64(), Some(800.0));
    assert_eq!(body["shortfall"].as_f64(), Some(300.0));
    assert_eq!(balance_of(&router, "ACC004").await, 500.0);
}

// -- transfer ------------------------------------------------------------

#[tokio::test]
async fn transfer_moves_funds_between_active_accounts() {
    let router = seeded_router().await;
    let (status, body) = post_json(
        &router,
        "/transfer",
        json!({ "fromAccount": "ACC001", "toAccount": "ACC002", "amount": 500 }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let tx = &body["transaction"];
    assert_eq!(tx["status"], "SUCCESS");
    assert_eq!(tx["type"], "TRANSFER");
    assert!(tx["transactionId"].as_str().is_some());
    assert_eq!(tx["senderBalanceBefore"].as_f64(), Some(5000.0));
    assert_eq!(tx["senderBalanceAfter"].as_f64(), Some(4500.0));
    assert_eq!(tx["receiverBalanceBefore"].as_f64(), Some(10000.0));
    assert_eq!(tx["receiverBalanceAfter"].as_f64(), Some(10500.0));

    assert_eq!(balance_of(&router, "ACC001").await, 4500.0);
    assert_eq!(balance_of(&router, "ACC002").await, 10500.0);
}

#[tokio::test]
async fn transfer_echoes_description() {
    let router = seeded_router().await;
    let (status, body) = post_json(
        &router,
        "/transfer",
        json!({ "fromAccount": "ACC002", "toAccount": "ACC004", "amount": 1, "description": "Coffee" }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["transaction"]["description"], "Coffee");
}

#[tokio::test]
async fn transfer_with_insufficient_funds_changes_nothing() {
    let router = seeded_router().await;
    let (status, body) = post_json(
        &router,
        "/transfer",
        json!({ "fromAccount": "ACC004", "toAccount": "ACC001", "amount": 10000 }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Insufficient Funds");
    assert_eq!(body["availableBalance"].as_f64(), Some(500.0));
    assert_eq!(body["shortfall"].as_f64(), Some(9500.0));
    assert_eq!(balance_of(&router, "ACC004").await, 500.0);
    assert_eq!(balance_of(&router, "ACC001").await, 5000.0);
}

#[tokio::test]
async fn transfer_from_unknown_account_does_not_touch_receiver() {
    let router = seeded_router().await;
    let (status, body) = post_json(
        &router,
        "/transfer",
        json!({ "fromAccount": "ACC999", "toAccount": "ACC001", "amount": 100 }),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Not Found");
    assert_eq!(balance_of(&router, "ACC001").await, 5000.0);

    let (_, body) = get(&router, "/accounts/ACC001").await;
    assert!(body["account"]["lastTransaction"].is_null());
}

#[tokio::test]
async fn transfer_to_same_account_is_rejected_regardless_of_balance() {
    let router = seeded_router().await;
    for amount in [1, 1_000_000] {
        let (status, body) = post_json(
            &router,
            "/transfer",
            json!({ "fromAccount": "ACC001", "toAccount": "ACC001", "amount": amount }),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Bad Request");
    }
}

#[tokio::test]
async fn transfer_rejects_bad_amounts_before_lookup() {
    let router = seeded_router().await;
    for amount in [json!(0), json!(-10), json!("500"), json!(null)] {
        let (status, body) = post_json(
            &router,
            "/transfer",
            json!({ "fromAccount": "NOPE1", "toAccount": "NOPE2", "amount": amount }),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "amount {amount}");
        assert_eq!(body["error"], "Bad Request");
    }
}

#[tokio::test]
async fn transfer_involving_inactive_account_is_rejected() {
    let router = seeded_router().await;

    let (status, body) = post_json(
        &router,
        "/transfer",
        json!({ "fromAccount": "ACC003", "toAccount": "ACC001", "amount": 10 }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Account Inactive");

    let (status, body) = post_json(
        &router,
        "/transfer",
        json!({ "fromAccount": "ACC001", "toAccount": "ACC003", "amount": 10 }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Account Inactive");
    assert_eq!(balance_of(&router, "ACC001").await, 5000.0);
}

#[tokio::test]
async fn resubmitted_transfer_is_applied_again() {
    let router = seeded_router().await;
    let payload = json!({ "fromAccount": "ACC001", "toAccount": "ACC002", "amount": 500 });

    let (first, _) = post_json(&router, "/transfer", payload.clone()).await;
    let (second, _) = post_json(&router, "/transfer", payload).await;

    assert_eq!(first, StatusCode::OK);
    assert_eq!(second, StatusCode::OK);
    assert_eq!(balance_of(&router, "ACC001").await, 4000.0);
    assert_eq!(balance_of(&router, "ACC002").await, 11000.0);
}

#[tokio::test]
async fn atomic_mode_produces_the_same_result_for_valid_transfers() {
    let router = seeded_router_with_mode(TransferMode::Atomic).await;
    let (status, body) = post_json(
        &router,
        "/transfer",
        json!({ "fromAccount": "ACC001", "toAccount": "ACC002", "amount": 500 }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["transaction"]["senderBalanceAfter"].as_f64(), Some(4500.0));
    assert_eq!(body["transaction"]["receiverBalanceAfter"].as_f64(), Some(10500.0));
}

// -- framework edges -----------------------------------------------------

#[tokio::test]
async fn unknown_route_returns_json_not_found() {
    let router = seeded_router().await;
    let (status, body) = get(&router, "/no/such/route").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Not Found");
    assert_eq!(body["message"], "The requested endpoint does not exist");
}

#[tokio::test]
async fn wrong_method_on_known_path_is_not_found() {
    let router = seeded_router().await;
    let (status, body) = get(&router, "/transfer").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Not Found");
}

#[tokio::test]
async fn malformed_json_is_a_bad_request() {
    let router = seeded_router().await;
    let req = Request::builder()
        .method("POST")
        .uri("/transfer")
        .header("content-type", "application/json")
        .body(Body::from("{ not json"))
        .unwrap();
    let (status, body) = send(&router, req).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Bad Request");
}
