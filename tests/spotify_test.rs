use std::{
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
    time::Duration,
};

use axum::{
    Router,
    extract::State,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::any,
};
use reqwest::Client;
use serde_json::json;
use splinkcli::{
    error::SyncError,
    spotify::{RetryPolicy, auth::token_from_json, playlist::member_page, send},
    types::PlaylistTracksResponse,
};

/// Answers with `replies` in order, repeating the last one, and counts hits.
#[derive(Clone)]
struct Scripted {
    replies: Arc<Vec<(StatusCode, Option<&'static str>)>>,
    hits: Arc<AtomicUsize>,
}

async fn scripted_reply(State(script): State<Scripted>) -> Response {
    let hit = script.hits.fetch_add(1, Ordering::SeqCst);
    let (status, retry_after) = script.replies[hit.min(script.replies.len() - 1)];

    match retry_after {
        Some(secs) => (status, [(header::RETRY_AFTER, secs)], "{}").into_response(),
        None => (status, "{}").into_response(),
    }
}

/// Starts a local server for `replies` and returns its URL and hit counter.
async fn serve(replies: Vec<(StatusCode, Option<&'static str>)>) -> (String, Arc<AtomicUsize>) {
    let hits = Arc::new(AtomicUsize::new(0));
    let app = Router::new()
        .route("/tracks", any(scripted_reply))
        .with_state(Scripted {
            replies: Arc::new(replies),
            hits: Arc::clone(&hits),
        });

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{}/tracks", addr), hits)
}

fn fast_read_policy() -> RetryPolicy {
    RetryPolicy {
        bad_gateway_delay: Some(Duration::ZERO),
        ..RetryPolicy::READ
    }
}

#[tokio::test]
async fn test_send_waits_out_short_rate_limit() {
    let (url, hits) = serve(vec![
        (StatusCode::TOO_MANY_REQUESTS, Some("0")),
        (StatusCode::OK, None),
    ])
    .await;

    let response = send(Client::new().get(&url), RetryPolicy::READ).await.unwrap();

    assert_eq!(response.status(), reqwest::StatusCode::OK);
    assert_eq!(hits.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_send_gives_up_on_long_retry_after() {
    let (url, hits) = serve(vec![
        (StatusCode::TOO_MANY_REQUESTS, Some("500")),
        (StatusCode::OK, None),
    ])
    .await;

    let err = send(Client::new().get(&url), RetryPolicy::READ)
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(reqwest::StatusCode::TOO_MANY_REQUESTS));
    assert_eq!(hits.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_send_retries_bad_gateway_on_reads() {
    let (url, hits) = serve(vec![(StatusCode::BAD_GATEWAY, None), (StatusCode::OK, None)]).await;

    let response = send(Client::new().get(&url), fast_read_policy())
        .await
        .unwrap();

    assert_eq!(response.status(), reqwest::StatusCode::OK);
    assert_eq!(hits.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_send_stops_after_max_retries() {
    let (url, hits) = serve(vec![(StatusCode::BAD_GATEWAY, None)]).await;

    let err = send(Client::new().get(&url), fast_read_policy())
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(reqwest::StatusCode::BAD_GATEWAY));
    assert_eq!(hits.load(Ordering::SeqCst), RetryPolicy::READ.max_retries + 1);
}

#[tokio::test]
async fn test_send_never_repeats_write_on_bad_gateway() {
    let (url, hits) = serve(vec![(StatusCode::BAD_GATEWAY, None), (StatusCode::OK, None)]).await;

    let request = Client::new()
        .post(&url)
        .json(&json!({ "uris": ["spotify:track:4uLU6hMCjMI75M1A2tKUQC"] }));
    let err = send(request, RetryPolicy::WRITE).await.unwrap_err();

    assert_eq!(err.status(), Some(reqwest::StatusCode::BAD_GATEWAY));
    assert_eq!(hits.load(Ordering::SeqCst), 1);
}

#[test]
fn test_write_policy_only_differs_on_bad_gateway() {
    assert_eq!(RetryPolicy::WRITE.bad_gateway_delay, None);
    assert_eq!(RetryPolicy::WRITE.max_retries, RetryPolicy::READ.max_retries);
    assert_eq!(RetryPolicy::READ.max_retry_after, Duration::from_secs(120));
}

#[test]
fn test_member_page_counts_items_without_url() {
    let response: PlaylistTracksResponse = serde_json::from_value(json!({
        "items": [
            { "track": { "id": "a", "external_urls": { "spotify": "https://open.spotify.com/track/a" } } },
            { "track": null },
            { "track": { "id": null, "external_urls": {} } },
            { "track": { "id": "b", "external_urls": { "spotify": "https://open.spotify.com/track/b" } } }
        ],
        "total": 4
    }))
    .unwrap();

    let page = member_page(response);
    assert_eq!(page.returned, 4);
    assert_eq!(
        page.links,
        vec![
            "https://open.spotify.com/track/a".to_string(),
            "https://open.spotify.com/track/b".to_string()
        ]
    );
}

#[test]
fn test_member_page_empty() {
    let response: PlaylistTracksResponse = serde_json::from_value(json!({ "items": [] })).unwrap();
    let page = member_page(response);

    assert_eq!(page.returned, 0);
    assert!(page.links.is_empty());
}

#[test]
fn test_token_from_json() {
    let token = token_from_json(&json!({
        "access_token": "BQC123",
        "refresh_token": "AQD456",
        "scope": "playlist-modify-public",
        "expires_in": 3600
    }))
    .unwrap();

    assert_eq!(token.access_token, "BQC123");
    assert_eq!(token.refresh_token, "AQD456");
    assert_eq!(token.scope, "playlist-modify-public");
    assert_eq!(token.expires_in, 3600);
    assert!(token.obtained_at > 0);
}

#[test]
fn test_token_from_json_without_refresh_token() {
    let token = token_from_json(&json!({ "access_token": "BQC123" })).unwrap();

    assert!(token.refresh_token.is_empty());
    assert_eq!(token.expires_in, 3600);
}

#[test]
fn test_token_from_json_requires_access_token() {
    assert!(matches!(
        token_from_json(&json!({ "error": "invalid_grant" })),
        Err(SyncError::Auth(_))
    ));
}
