//! Integration tests for the HTTP execution adapter
//!
//! These tests spin up a real stub endpoint and verify the full flow:
//! compile → POST `{"query": ...}` → classify the answer.

#![cfg(feature = "http")]

use axum::{
    Json, Router,
    http::{HeaderMap, StatusCode, header},
    routing::post,
};
use serde_json::{Value, json};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use vqb::prelude::*;

// =============================================================================
// Stub endpoint
// =============================================================================

fn header_value(headers: &HeaderMap, name: header::HeaderName) -> Value {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(|v| json!(v))
        .unwrap_or(Value::Null)
}

async fn echo(headers: HeaderMap, Json(body): Json<Value>) -> Json<Value> {
    Json(json!({
        "data": {
            "echo": body["query"],
            "authorization": header_value(&headers, header::AUTHORIZATION),
            "contentType": header_value(&headers, header::CONTENT_TYPE),
        }
    }))
}

async fn slow_echo(headers: HeaderMap, Json(body): Json<Value>) -> Json<Value> {
    if body["query"].as_str().is_some_and(|q| q.contains("slow")) {
        tokio::time::sleep(Duration::from_millis(500)).await;
    }
    echo(headers, Json(body)).await
}

async fn query_errors() -> Json<Value> {
    Json(json!({
        "data": null,
        "errors": [{"message": "x"}, {"message": "vehicle not found"}]
    }))
}

async fn server_error() -> (StatusCode, &'static str) {
    (StatusCode::INTERNAL_SERVER_ERROR, "boom")
}

async fn not_json() -> &'static str {
    "<html>maintenance</html>"
}

/// Helper: start the stub endpoint and return its address
async fn start_stub_server() -> SocketAddr {
    let app = Router::new()
        .route("/echo", post(echo))
        .route("/slow", post(slow_echo))
        .route("/errors", post(query_errors))
        .route("/fail", post(server_error))
        .route("/html", post(not_json));

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    // Small delay to let the server start
    tokio::time::sleep(Duration::from_millis(50)).await;

    addr
}

fn executor(addr: SocketAddr, path: &str) -> QueryExecutor {
    QueryExecutor::http(ExecutorConfig::new(format!("http://{}{}", addr, path))).unwrap()
}

fn compiled_vehicle_query() -> String {
    let root = vqb::catalog::identity::vehicle();
    let mut params = ParameterValues::for_root(&root);
    params.set("tokenId", "21957");
    let selection: SelectionState = [("owner", true), ("definition.make", true)]
        .into_iter()
        .collect();
    compile(&root, &selection, &params)
}

// =============================================================================
// Round trip
// =============================================================================

#[tokio::test]
async fn test_round_trip_echoes_query_exactly() {
    let addr = start_stub_server().await;
    let executor = executor(addr, "/echo");
    let query = compiled_vehicle_query();

    let response = executor.execute(&query, None).await.unwrap();
    let data = response.data.unwrap();

    assert_eq!(data["echo"], json!(query));
    assert_eq!(data["contentType"], "application/json");
    assert!(data["authorization"].is_null());
}

#[tokio::test]
async fn test_placeholders_are_sent_verbatim() {
    let addr = start_stub_server().await;
    let executor = executor(addr, "/echo");
    let query = "query {\n  vehicle(tokenId: <tokenId>) {\n    owner\n  }\n}";

    let response = executor.execute(query, None).await.unwrap();
    assert_eq!(response.data.unwrap()["echo"], query);
}

#[tokio::test]
async fn test_bearer_token_header() {
    let addr = start_stub_server().await;
    let executor = executor(addr, "/echo");

    let response = executor.execute("query { a }", Some("abc.def")).await.unwrap();
    assert_eq!(response.data.unwrap()["authorization"], "Bearer abc.def");
}

// =============================================================================
// Error discrimination
// =============================================================================

#[tokio::test]
async fn test_errors_array_is_query_error() {
    let addr = start_stub_server().await;
    let err = executor(addr, "/errors")
        .execute("query { a }", None)
        .await
        .unwrap_err();

    assert_eq!(err.kind, ErrorKind::Query);
    assert_eq!(err.message, "x; vehicle not found");
    assert_eq!(err.status, Some(200));
}

#[tokio::test]
async fn test_http_500_is_transport_error() {
    let addr = start_stub_server().await;
    let err = executor(addr, "/fail")
        .execute("query { a }", None)
        .await
        .unwrap_err();

    assert_eq!(err.kind, ErrorKind::Transport);
    assert_eq!(err.status, Some(500));
    assert_eq!(err.message, "HTTP error 500: Internal Server Error");
}

#[tokio::test]
async fn test_unknown_route_is_transport_error() {
    let addr = start_stub_server().await;
    let err = executor(addr, "/missing")
        .execute("query { a }", None)
        .await
        .unwrap_err();

    assert_eq!(err.kind, ErrorKind::Transport);
    assert_eq!(err.status, Some(404));
}

#[tokio::test]
async fn test_non_json_body_is_transport_error() {
    let addr = start_stub_server().await;
    let err = executor(addr, "/html")
        .execute("query { a }", None)
        .await
        .unwrap_err();

    assert_eq!(err.kind, ErrorKind::Transport);
    assert!(err.message.starts_with("Invalid JSON response"));
}

#[tokio::test]
async fn test_connection_refused_is_transport_error() {
    // Bind then drop to get a port nobody listens on
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = executor(addr, "/echo")
        .execute("query { a }", None)
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Transport);
    assert!(err.status.is_none());
}

// =============================================================================
// Cancellation
// =============================================================================

#[tokio::test]
async fn test_second_request_aborts_first() {
    let addr = start_stub_server().await;
    let executor = Arc::new(executor(addr, "/slow"));

    let first = {
        let executor = executor.clone();
        tokio::spawn(async move { executor.execute("query { slow }", None).await })
    };
    tokio::time::sleep(Duration::from_millis(100)).await;

    let second = executor.execute("query { fast }", None).await.unwrap();
    assert_eq!(second.data.unwrap()["echo"], "query { fast }");

    let first = first.await.unwrap().unwrap_err();
    assert!(first.is_aborted());
    assert_eq!(first.error_code(), "ABORTED");
}
