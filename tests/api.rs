use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use chrono::{TimeZone, Utc};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tower::ServiceExt;

use twatair_token_api::services::{
    ClientTokenCache, Clock, HttpTokenEndpoint, ManualClock, SeededRandom, ServerCacheSettings,
    ServerTokenCache, TokenEndpoint,
};
use twatair_token_api::solana::client::create_http_client;
use twatair_token_api::{create_router, TokenInteractor, TokenInteractorImpl};

fn mock_mode_app(cors_origin: &str) -> (Router, Arc<ManualClock>) {
    let clock = Arc::new(ManualClock::new(Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap()));

    let cache = Arc::new(ServerTokenCache::new(
        None,
        clock.clone(),
        Box::new(SeededRandom::new(42)),
        ServerCacheSettings::default(),
    ));
    let interactor =
        Arc::new(TokenInteractorImpl::new(cache, clock.clone())) as Arc<dyn TokenInteractor>;

    (create_router(interactor, cors_origin), clock)
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, axum::http::HeaderMap, Vec<u8>) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();

    (status, headers, body.to_vec())
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

#[tokio::test]
async fn token_endpoint_serves_mock_data_without_credentials() {
    let (app, _) = mock_mode_app("*");

    let (status, headers, body) = send(&app, get("/api/token")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(headers[header::CONTENT_TYPE], "application/json");

    let json: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["success"], Value::Bool(true));
    assert_eq!(json["mock"], Value::Bool(true));
    assert!(json.get("cached").is_none());
    assert_eq!(json["token"]["symbol"], "$TWATAIR");
    assert_eq!(json["token"]["totalSupply"], 1_000_000_000u64);
    assert_eq!(json["token"]["circulatingSupply"], 690_000_000u64);
    assert!(json["token"]["price"].as_f64().unwrap() > 0.0);
    assert!(json["token"]["holders"].as_u64().is_some());
    assert!(json["timestamp"].as_i64().is_some());
}

#[tokio::test]
async fn repeated_requests_within_ttl_are_cached() {
    let (app, clock) = mock_mode_app("*");

    let (_, _, first) = send(&app, get("/api/token")).await;
    let (_, _, second) = send(&app, get("/api/token")).await;

    let first: Value = serde_json::from_slice(&first).unwrap();
    let second: Value = serde_json::from_slice(&second).unwrap();

    assert_eq!(second["cached"], Value::Bool(true));
    assert_eq!(first["token"], second["token"]);
    assert_eq!(first["timestamp"], second["timestamp"]);

    clock.advance(Duration::from_secs(61));

    let (_, _, third) = send(&app, get("/api/token")).await;
    let third: Value = serde_json::from_slice(&third).unwrap();
    assert!(third.get("cached").is_none());
    assert_ne!(first["timestamp"], third["timestamp"]);
}

#[tokio::test]
async fn preflight_returns_empty_ok_with_cors_headers() {
    let (app, _) = mock_mode_app("*");

    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/api/token")
        .header(header::ORIGIN, "https://twatair.example")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "GET")
        .body(Body::empty())
        .unwrap();

    let (status, headers, body) = send(&app, request).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.is_empty());
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    let methods = headers[header::ACCESS_CONTROL_ALLOW_METHODS].to_str().unwrap();
    assert!(methods.contains("GET"));
    assert!(methods.contains("OPTIONS"));
}

#[tokio::test]
async fn other_methods_are_rejected() {
    let (app, _) = mock_mode_app("*");

    for method in [Method::POST, Method::PUT, Method::DELETE, Method::PATCH] {
        let request = Request::builder()
            .method(method.clone())
            .uri("/api/token")
            .body(Body::empty())
            .unwrap();

        let (status, _, body) = send(&app, request).await;

        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED, "{}", method);
        let json: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"], "Method not allowed");
    }
}

#[tokio::test]
async fn head_is_rejected_without_touching_the_cache() {
    let (app, _) = mock_mode_app("*");

    let head = Request::builder()
        .method(Method::HEAD)
        .uri("/api/token")
        .body(Body::empty())
        .unwrap();
    let (status, _, _) = send(&app, head).await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);

    // HEAD did not fill the cache, so the first GET is a fresh build
    let (_, _, body) = send(&app, get("/api/token")).await;
    let json: Value = serde_json::from_slice(&body).unwrap();
    assert!(json.get("cached").is_none());
}

#[tokio::test]
async fn health_only_answers_get() {
    let (app, _) = mock_mode_app("*");

    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/health")
        .body(Body::empty())
        .unwrap();
    let (status, _, _) = send(&app, request).await;

    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn health_lists_endpoints() {
    let (app, _) = mock_mode_app("*");

    let (status, _, body) = send(&app, get("/api/health")).await;

    assert_eq!(status, StatusCode::OK);
    let json: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["status"], "ok");
    assert_eq!(json["version"], twatair_token_api::VERSION);
    assert_eq!(json["endpoints"]["token"], "/api/token");
    assert_eq!(json["endpoints"]["health"], "/api/health");
}

#[tokio::test]
async fn configured_origin_is_echoed() {
    let (app, _) = mock_mode_app("https://twatair.example");

    let request = Request::builder()
        .method(Method::GET)
        .uri("/api/token")
        .header(header::ORIGIN, "https://twatair.example")
        .body(Body::empty())
        .unwrap();

    let (status, headers, _) = send(&app, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        headers[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "https://twatair.example"
    );
}

async fn serve_in_background(app: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{}/api", address)
}

fn client_cache(base_url: &str) -> ClientTokenCache {
    let http_client = create_http_client(Duration::from_secs(5)).unwrap();
    let endpoint =
        Arc::new(HttpTokenEndpoint::new(http_client, base_url)) as Arc<dyn TokenEndpoint>;

    ClientTokenCache::new(
        endpoint,
        Arc::new(ManualClock::new(Utc::now())) as Arc<dyn Clock>,
        Box::new(SeededRandom::new(7)),
        Duration::from_secs(30),
    )
}

#[tokio::test]
async fn client_cache_reads_from_running_server() {
    let (app, _) = mock_mode_app("*");
    let base_url = serve_in_background(app).await;
    let cache = client_cache(&base_url);

    assert!(cache.check_api_health().await);

    let first = cache.fetch_snapshot().await;
    let second = cache.fetch_snapshot().await;

    assert!(first.is_mock);
    assert_eq!(first.symbol, "$TWATAIR");
    assert!(Arc::ptr_eq(&first, &second));
}

#[tokio::test]
async fn client_cache_falls_back_when_server_is_down() {
    // Grab a free port, then close it
    let address = {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        listener.local_addr().unwrap()
    };
    let cache = client_cache(&format!("http://{}/api", address));

    assert!(!cache.check_api_health().await);

    let snapshot = cache.fetch_snapshot().await;
    assert!(snapshot.is_mock);
    assert!(snapshot.price > 0.0);
    assert!(snapshot.price_change_24h.abs() <= 10.0);
}
