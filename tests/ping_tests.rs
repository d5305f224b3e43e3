//! End-to-end tests for the `/rest` ping endpoint.
//!
//! Most tests drive the router in-process with `tower::ServiceExt::oneshot`.
//! The concurrency test binds a real listener on an ephemeral port and hits it
//! with reqwest.
//!
//! Run with: cargo test --test ping_tests
use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use http_body_util::BodyExt;
use tower::ServiceExt;

use ping_rest::config::REQUEST_ID_HEADER;
use ping_rest::create_router;

async fn send(method: Method, uri: &str) -> axum::response::Response {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    create_router().oneshot(request).await.unwrap()
}

async fn body_string(response: axum::response::Response) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

#[tokio::test]
async fn get_rest_returns_ping() {
    let response = send(Method::GET, "/rest").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "text/plain; charset=utf-8"
    );
    assert_eq!(body_string(response).await, "ping");
}

#[tokio::test]
async fn get_rest_ignores_query_and_headers() {
    let request = Request::builder()
        .uri("/rest?verbose=true")
        .header(header::ACCEPT, "application/json")
        .header(header::AUTHORIZATION, "Bearer whatever")
        .body(Body::empty())
        .unwrap();
    let response = create_router().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_string(response).await, "ping");
}

#[tokio::test]
async fn get_rest_is_idempotent() {
    for _ in 0..5 {
        let response = send(Method::GET, "/rest").await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_string(response).await, "ping");
    }
}

#[tokio::test]
async fn ping_response_is_not_cacheable() {
    let response = send(Method::GET, "/rest").await;
    assert_eq!(response.headers()[header::CACHE_CONTROL], "no-cache");
}

#[tokio::test]
async fn ping_response_carries_request_id() {
    let response = send(Method::GET, "/rest").await;
    let id = response.headers()[REQUEST_ID_HEADER].to_str().unwrap();
    assert!(uuid::Uuid::parse_str(id).is_ok());
}

#[tokio::test]
async fn head_rest_has_empty_body() {
    let response = send(Method::HEAD, "/rest").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_string(response).await, "");
}

#[tokio::test]
async fn other_methods_are_not_allowed() {
    for method in [Method::POST, Method::PUT, Method::DELETE, Method::PATCH] {
        let response = send(method.clone(), "/rest").await;
        assert_eq!(
            response.status(),
            StatusCode::METHOD_NOT_ALLOWED,
            "{} /rest",
            method
        );
    }
}

#[tokio::test]
async fn other_paths_are_not_found() {
    for uri in ["/", "/ping", "/rest/extra", "/REST"] {
        let response = send(Method::GET, uri).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND, "GET {}", uri);
    }
}

#[tokio::test]
async fn concurrent_requests_over_tcp_all_return_ping() {
    const REQUESTS: usize = 32;

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, create_router()).await.unwrap();
    });

    let client = reqwest::Client::new();
    let url = format!("http://{}/rest", addr);

    let responses = futures::future::join_all((0..REQUESTS).map(|_| {
        let client = client.clone();
        let url = url.clone();
        async move {
            let response = client.get(&url).send().await.unwrap();
            let status = response.status();
            let request_id = response.headers()[REQUEST_ID_HEADER]
                .to_str()
                .unwrap()
                .to_string();
            let body = response.text().await.unwrap();
            (status, body, request_id)
        }
    }))
    .await;

    assert_eq!(responses.len(), REQUESTS);
    for (status, body, _) in &responses {
        assert_eq!(status.as_u16(), 200);
        assert_eq!(body, "ping");
    }

    let mut ids: Vec<_> = responses.iter().map(|(_, _, id)| id.clone()).collect();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), REQUESTS, "request ids must be unique per request");
}
