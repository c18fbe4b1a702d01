//! Integration tests for the API server.

use std::sync::OnceLock;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use domain::{DonationPreference, OrchestrationOutcome, Reward};
use metrics_exporter_prometheus::PrometheusHandle;
use rust_decimal_macros::dec;
use serde_json::{Value, json};
use tower::ServiceExt;
use upstream::{DonationPreferences, Service, UpstreamError};

static METRICS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

fn get_metrics_handle() -> PrometheusHandle {
    METRICS_HANDLE
        .get_or_init(|| {
            metrics_exporter_prometheus::PrometheusBuilder::new()
                .install_recorder()
                .expect("failed to install Prometheus recorder")
        })
        .clone()
}

fn setup() -> (axum::Router, api::InMemoryServices) {
    let (state, services) = api::create_default_state();
    (api::create_app(state, get_metrics_handle()), services)
}

fn transfer(make_donation: bool) -> Value {
    json!({
        "customerId": "C1",
        "custAccountId": "A1",
        "receivingAccountId": "A2",
        "amount": 50,
        "category": "Transport",
        "makeDonation": make_donation
    })
}

async fn post_json(app: axum::Router, uri: &str, body: &Value) -> (StatusCode, Value) {
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(serde_json::to_string(body).unwrap()))
                .unwrap(),
        )
        .await
        .unwrap();
    read_json(response).await
}

async fn get_json(app: axum::Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    read_json(response).await
}

async fn read_json(response: axum::response::Response) -> (StatusCode, Value) {
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&body).unwrap())
}

#[tokio::test]
async fn test_health_check() {
    let (app, _) = setup();

    let (status, json) = get_json(app, "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "ok");
    assert_eq!(json["upstreams"], "in_memory");
}

#[tokio::test]
async fn test_process_transaction_scenario() {
    let (app, services) = setup();
    let upstreams = &services.upstreams;
    upstreams.transactions.push_transaction_id("T1");
    upstreams
        .scoring
        .set_outcome(OrchestrationOutcome::new(true, 10, dec!(5), None));
    upstreams
        .preferences
        .add_preference(DonationPreference::new("C1", Some("OceanCleanup".to_string())))
        .await
        .unwrap();

    let (status, json) = post_json(app, "/transactions/process", &transfer(true)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["success"], true);
    assert!(json["runId"].is_string());
    assert_eq!(json["transaction"]["transactionId"], "T1");
    assert_eq!(json["orchestration"]["pointsEarned"], 10);
    assert_eq!(json["donation"]["customerId"], "C1");
    assert_eq!(json["donation"]["amount"], 5.0);
    assert_eq!(json["donation"]["orgId"], "OceanCleanup");
    assert_eq!(json["loyalty"]["operation"], "INCREASE");
    assert_eq!(json["loyalty"]["pointsAfter"], 10);
    assert_eq!(json["warnings"], json!([]));
}

#[tokio::test]
async fn test_partial_failure_still_succeeds() {
    let (app, services) = setup();
    services
        .upstreams
        .scoring
        .set_failure(Some(UpstreamError::status_error(
            Service::Orchestration,
            503,
            "unavailable",
        )));

    let (status, json) = post_json(app, "/transactions/process", &transfer(true)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["success"], true);
    assert!(json["transaction"]["transactionId"].is_string());
    assert_eq!(json["orchestration"], Value::Null);
    assert_eq!(json["donation"], Value::Null);
    assert_eq!(json["loyalty"], Value::Null);
    assert_eq!(json["warnings"][0]["step"], "score");
    assert_eq!(services.upstreams.loyalty.update_count(), 0);
}

#[tokio::test]
async fn test_submit_failure_passes_upstream_status_through() {
    let (app, services) = setup();
    services
        .upstreams
        .transactions
        .set_failure(Some(UpstreamError::status_error(
            Service::TransactionProcessing,
            500,
            "ledger offline",
        )));

    let (status, json) = post_json(app, "/transactions/process", &transfer(true)).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["success"], false);
    assert_eq!(json["status"], 500);
    assert!(json["error"].as_str().unwrap().contains("ledger offline"));
    assert_eq!(services.upstreams.scoring.score_count(), 0);
    assert_eq!(services.upstreams.donations.add_count(), 0);
}

#[tokio::test]
async fn test_submit_timeout_is_bad_gateway() {
    let (app, services) = setup();
    services
        .upstreams
        .transactions
        .set_failure(Some(UpstreamError::Transport {
            service: Service::TransactionProcessing,
            message: "timed out".to_string(),
        }));

    let (status, json) = post_json(app, "/transactions/process", &transfer(false)).await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(json["success"], false);
    assert_eq!(json["status"], 502);
}

#[tokio::test]
async fn test_validation_errors_are_bad_requests() {
    let (app, services) = setup();
    let mut body = transfer(true);
    body["amount"] = json!("zero");

    let (status, json) = post_json(app, "/transactions/process", &body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["success"], false);
    assert_eq!(json["status"], 400);
    assert_eq!(services.upstreams.transactions.submit_count(), 0);
}

#[tokio::test]
async fn test_missing_category_is_bad_request() {
    let (app, _) = setup();
    let mut body = transfer(false);
    body.as_object_mut().unwrap().remove("category");

    let (status, json) = post_json(app, "/transactions/process", &body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].as_str().unwrap().contains("category"));
}

#[tokio::test]
async fn test_malformed_json_is_bad_request() {
    let (app, _) = setup();

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/transactions/process")
                .header("content-type", "application/json")
                .body(Body::from("{not json"))
                .unwrap(),
        )
        .await
        .unwrap();

    let (status, json) = read_json(response).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["success"], false);
    assert_eq!(json["status"], 400);
    assert!(json["error"].is_string());
}

#[tokio::test]
async fn test_mistyped_field_uses_validation_envelope() {
    let (app, services) = setup();
    let mut body = transfer(true);
    body["customerId"] = json!(["C1"]);

    let (status, json) = post_json(app, "/transactions/process", &body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["success"], false);
    assert_eq!(json["status"], 400);
    assert!(json["error"].as_str().unwrap().starts_with("Malformed request body"));
    assert_eq!(services.upstreams.transactions.submit_count(), 0);
}

#[tokio::test]
async fn test_null_donation_flag_is_accepted() {
    let (app, services) = setup();
    let mut body = transfer(true);
    body["makeDonation"] = Value::Null;

    let (status, json) = post_json(app, "/transactions/process", &body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["success"], true);
    assert_eq!(json["donation"], Value::Null);
    assert!(services.upstreams.donations.requests().is_empty());
}

#[tokio::test]
async fn test_category_labels_for_transaction_list() {
    let (app, services) = setup();
    services.upstreams.transactions.push_transaction_id("T5");

    let (status, _) = post_json(app.clone(), "/transactions/process", &transfer(false)).await;
    assert_eq!(status, StatusCode::OK);

    let (status, json) = get_json(app.clone(), "/transactions/categories?ids=T404,T5").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        json,
        json!([
            {"transactionId": "T404", "category": null},
            {"transactionId": "T5", "category": "Transport"}
        ])
    );

    let (status, _) = get_json(app, "/transactions/categories").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_category_lookup_returns_submitted_string() {
    let (app, services) = setup();
    services.upstreams.transactions.push_transaction_id("T7");
    let mut body = transfer(false);
    body["category"] = json!(" Transport ");

    let (status, _) = post_json(app.clone(), "/transactions/process", &body).await;
    assert_eq!(status, StatusCode::OK);

    let (status, json) = get_json(app, "/transactions/T7/category").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["category"], " Transport ");
}

#[tokio::test]
async fn test_category_lookup_after_processing() {
    let (app, services) = setup();
    services.upstreams.transactions.push_transaction_id("T9");

    let (status, _) = post_json(app.clone(), "/transactions/process", &transfer(false)).await;
    assert_eq!(status, StatusCode::OK);

    let (status, json) = get_json(app.clone(), "/transactions/T9/category").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["transactionId"], "T9");
    assert_eq!(json["category"], "Transport");

    let (status, _) = get_json(app, "/transactions/unknown/category").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_dashboard_refresh() {
    let (app, services) = setup();
    services.upstreams.accounts.set_balance("A1", dec!(980.50));
    services.upstreams.loyalty.set_balance("C1", 42);

    let (status, json) = get_json(app, "/customers/C1/dashboard?accountId=A1").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["balance"]["accountId"], "A1");
    assert_eq!(json["balance"]["balance"], 980.5);
    assert_eq!(json["points"], 42);
    assert_eq!(json["donations"], json!([]));
    assert_eq!(json["warnings"], json!([]));
}

#[tokio::test]
async fn test_dashboard_defaults_on_failure() {
    let (app, _) = setup();

    let (status, json) = get_json(app, "/customers/C1/dashboard?accountId=missing").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["balance"], Value::Null);
    assert_eq!(json["points"], 0);
    assert_eq!(json["warnings"][0]["step"], "load_balance");
}

#[tokio::test]
async fn test_dashboard_requires_account_id() {
    let (app, _) = setup();

    let (status, _) = get_json(app, "/customers/C1/dashboard").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_rewards_catalog_and_carbon_impact() {
    let (app, services) = setup();
    services.rewards.add_reward(Reward {
        id: "R1".to_string(),
        name: "Tree planting".to_string(),
        points_cost: 500,
    });

    let (status, json) = get_json(app.clone(), "/rewards").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json[0]["name"], "Tree planting");

    let (status, json) = get_json(app, "/customers/C1/carbon-impact").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, json!([]));
}

#[tokio::test]
async fn test_metrics_endpoint() {
    let (app, _) = setup();

    let (status, _) = post_json(app.clone(), "/transactions/process", &transfer(false)).await;
    assert_eq!(status, StatusCode::OK);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/metrics")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let text = String::from_utf8(body.to_vec()).unwrap();
    assert!(text.contains("transaction_workflows_total"));
}
