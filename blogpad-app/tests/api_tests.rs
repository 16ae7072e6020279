mod common;

use app::{ClientError, SessionEvent, TokenStore, session::drain_expired};
use common::{TOKEN_KEY, VALID_TOKEN, context, context_with_token, spawn_backend, unreachable_url};
use reqwest::StatusCode;
use shared::models::{PostId, PostInput};
use std::time::Duration;

const BANNER: Duration = Duration::from_millis(100);

#[tokio::test]
async fn sends_exact_bearer_header_on_every_request() {
    let (backend, url) = spawn_backend().await;
    let (ctx, _store) = context_with_token(&url, VALID_TOKEN, BANNER);

    let posts = ctx.posts.list().await.unwrap();
    assert_eq!(posts.len(), 3);
    ctx.posts.get(&PostId::Numeric(1)).await.unwrap();
    let updated = ctx
        .posts
        .update(&PostId::Numeric(1), &PostInput::new("Renamed", "New body"))
        .await
        .unwrap();
    assert_eq!(updated.title, "Renamed");
    ctx.posts.delete(&PostId::Numeric(2)).await.unwrap();

    let expected = Some(format!("Bearer {VALID_TOKEN}"));
    let headers = backend.authorization_headers();
    assert_eq!(headers.len(), 4);
    assert!(headers.iter().all(|header| *header == expected));
}

#[tokio::test]
async fn omits_authorization_without_token() {
    let (backend, url) = spawn_backend().await;
    let (ctx, _store) = context(&url, BANNER);

    ctx.posts.list().await.unwrap();
    ctx.posts.get(&PostId::Numeric(3)).await.unwrap();

    assert_eq!(backend.authorization_headers(), vec![None, None]);
}

#[tokio::test]
async fn non_success_status_carries_server_message() {
    let (_backend, url) = spawn_backend().await;
    let (ctx, _store) = context(&url, BANNER);

    let err = ctx.posts.get(&PostId::Numeric(999)).await.unwrap_err();

    assert_eq!(err.status(), Some(StatusCode::NOT_FOUND));
    assert_eq!(err.server_message(), Some("Post not found"));
}

#[tokio::test]
async fn error_without_json_body_has_no_message() {
    let (backend, url) = spawn_backend().await;
    let (ctx, _store) = context(&url, BANNER);
    backend.fail_next(StatusCode::SERVICE_UNAVAILABLE, None);

    let err = ctx.posts.list().await.unwrap_err();

    assert!(matches!(
        err,
        ClientError::Http { status, message: None } if status == StatusCode::SERVICE_UNAVAILABLE
    ));
}

#[tokio::test]
async fn unauthorized_announces_expiry_and_keeps_token() {
    let (_backend, url) = spawn_backend().await;
    let (ctx, store) = context_with_token(&url, "stale-token", BANNER);
    let mut events = ctx.client.events().subscribe();

    let err = ctx
        .posts
        .create(&PostInput::new("Title", "Body"))
        .await
        .unwrap_err();

    assert!(err.is_unauthorized());
    assert_eq!(err.server_message(), Some("Token expired"));
    assert_eq!(events.try_recv().unwrap(), SessionEvent::Expired);
    assert_eq!(store.read(TOKEN_KEY).unwrap().as_deref(), Some("stale-token"));
}

#[tokio::test]
async fn other_failures_do_not_announce_expiry() {
    let (backend, url) = spawn_backend().await;
    let (ctx, _store) = context(&url, BANNER);
    let mut events = ctx.client.events().subscribe();
    backend.fail_next(StatusCode::FORBIDDEN, Some("Forbidden"));

    ctx.posts.list().await.unwrap_err();

    assert!(!drain_expired(&mut events));
}

#[tokio::test]
async fn empty_success_body_decodes_as_null() {
    let (_backend, url) = spawn_backend().await;
    let (ctx, _store) = context_with_token(&url, VALID_TOKEN, BANNER);

    let body = ctx.posts.delete(&PostId::Numeric(3)).await.unwrap();

    assert!(body.is_null());
}

#[tokio::test]
async fn unreachable_backend_is_a_transport_error() {
    let (ctx, _store) = context(&unreachable_url(), BANNER);

    let err = ctx.posts.list().await.unwrap_err();

    assert!(matches!(err, ClientError::Transport(_)));
    assert_eq!(err.status(), None);
}
