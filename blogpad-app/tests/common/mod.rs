#![allow(dead_code)]

//! In-process blog backend for integration tests.

use app::{ApiClient, AppContext, MemoryTokenStore, Session, TokenStore};
use axum::{
    Json, Router,
    extract::{Path, Request, State},
    http::{HeaderMap, StatusCode, header::AUTHORIZATION},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde_json::{Value, json};
use std::{
    sync::{Arc, Mutex},
    time::Duration,
};
use tokio::net::TcpListener;
use url::Url;

pub const VALID_TOKEN: &str = "valid-token";
pub const PASSWORD: &str = "secret";
pub const TOKEN_KEY: &str = "token";

#[derive(Debug, Default)]
struct BackendState {
    posts: Vec<Value>,
    next_id: i64,
    authorization: Vec<Option<String>>,
    fail_next: Option<(StatusCode, Option<String>)>,
    delay: Duration,
}

/// Handle on the mock backend's state.
#[derive(Debug, Clone, Default)]
pub struct Backend {
    state: Arc<Mutex<BackendState>>,
}

impl Backend {
    /// Authorization header of every request seen so far, in order.
    pub fn authorization_headers(&self) -> Vec<Option<String>> {
        self.state.lock().unwrap().authorization.clone()
    }

    pub fn request_count(&self) -> usize {
        self.state.lock().unwrap().authorization.len()
    }

    /// Answer the next request with `status` and an optional message body.
    pub fn fail_next(&self, status: StatusCode, message: Option<&str>) {
        self.state.lock().unwrap().fail_next = Some((status, message.map(ToString::to_string)));
    }

    pub fn set_delay(&self, delay: Duration) {
        self.state.lock().unwrap().delay = delay;
    }

    pub fn post_ids(&self) -> Vec<i64> {
        self.state
            .lock()
            .unwrap()
            .posts
            .iter()
            .filter_map(|post| post["id"].as_i64())
            .collect()
    }
}

fn sample_post(id: i64, title: &str) -> Value {
    let status = if id % 2 == 0 { "draft" } else { "published" };
    json!({
        "id": id,
        "title": title,
        "content": format!("Body of {title}"),
        "status": status,
        "date": "2024-01-15",
        "author": "admin",
    })
}

/// Start a backend seeded with posts 1, 2 and 3 on an ephemeral port.
pub async fn spawn_backend() -> (Backend, Url) {
    let backend = Backend::default();
    {
        let mut state = backend.state.lock().unwrap();
        state.posts = vec![
            sample_post(1, "First post"),
            sample_post(2, "Second post"),
            sample_post(3, "Third post"),
        ];
        state.next_id = 4;
    }

    let app = Router::new()
        .route("/api/login", post(login))
        .route("/api/signup", post(signup))
        .route("/api/posts", get(list_posts).post(create_post))
        .route(
            "/api/posts/{id}",
            get(get_post).put(update_post).delete(delete_post),
        )
        .layer(middleware::from_fn_with_state(backend.clone(), record))
        .with_state(backend.clone());

    let url = serve(app).await;
    (backend, url)
}

/// Serve `app` on an ephemeral port, for backends that answer in shapes
/// the seeded one does not.
pub async fn serve(app: Router) -> Url {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    Url::parse(&format!("http://{addr}")).unwrap()
}

/// Context talking to `url` with a fresh in-memory store.
pub fn context(url: &Url, banner_timeout: Duration) -> (AppContext, Arc<MemoryTokenStore>) {
    let store = Arc::new(MemoryTokenStore::new());
    let session = Session::new(store.clone(), TOKEN_KEY);
    let client = ApiClient::new(url.clone(), session).unwrap();
    (AppContext::new(client, banner_timeout), store)
}

/// Context whose store already holds `token`.
pub fn context_with_token(
    url: &Url,
    token: &str,
    banner_timeout: Duration,
) -> (AppContext, Arc<MemoryTokenStore>) {
    let (ctx, store) = context(url, banner_timeout);
    store.write(TOKEN_KEY, token).unwrap();
    (ctx, store)
}

async fn record(State(backend): State<Backend>, request: Request, next: Next) -> Response {
    let (delay, fail) = {
        let mut state = backend.state.lock().unwrap();
        let header = request
            .headers()
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .map(ToString::to_string);
        state.authorization.push(header);
        (state.delay, state.fail_next.take())
    };

    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }

    match fail {
        Some((status, Some(message))) => (status, Json(json!({ "message": message }))).into_response(),
        Some((status, None)) => status.into_response(),
        None => next.run(request).await,
    }
}

fn authorized(headers: &HeaderMap) -> Result<(), Response> {
    let expected = format!("Bearer {VALID_TOKEN}");
    match headers.get(AUTHORIZATION).and_then(|value| value.to_str().ok()) {
        Some(value) if value == expected => Ok(()),
        _ => Err((
            StatusCode::UNAUTHORIZED,
            Json(json!({ "message": "Token expired" })),
        )
            .into_response()),
    }
}

fn not_found() -> Response {
    (StatusCode::NOT_FOUND, Json(json!({ "message": "Post not found" }))).into_response()
}

async fn login(Json(body): Json<Value>) -> Response {
    if body["password"] == PASSWORD {
        Json(json!({
            "token": VALID_TOKEN,
            "user": { "email": body["email"] },
        }))
        .into_response()
    } else {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "message": "Invalid email or password" })),
        )
            .into_response()
    }
}

async fn signup(Json(body): Json<Value>) -> Response {
    match body["username"].as_str() {
        Some("taken") => (
            StatusCode::CONFLICT,
            Json(json!({ "message": "Email already registered" })),
        )
            .into_response(),
        Some("notoken") => Json(json!({ "message": "Account created" })).into_response(),
        _ => Json(json!({
            "token": VALID_TOKEN,
            "user": { "username": body["username"], "email": body["email"] },
        }))
        .into_response(),
    }
}

async fn list_posts(State(backend): State<Backend>) -> Json<Value> {
    Json(Value::Array(backend.state.lock().unwrap().posts.clone()))
}

async fn get_post(State(backend): State<Backend>, Path(id): Path<i64>) -> Response {
    let state = backend.state.lock().unwrap();
    state
        .posts
        .iter()
        .find(|post| post["id"] == id)
        .map_or_else(not_found, |post| Json(post.clone()).into_response())
}

async fn create_post(
    State(backend): State<Backend>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    if let Err(response) = authorized(&headers) {
        return response;
    }
    let mut state = backend.state.lock().unwrap();
    let id = state.next_id;
    state.next_id += 1;
    let mut post = sample_post(id, body["title"].as_str().unwrap_or_default());
    post["content"] = body["content"].clone();
    post["status"] = json!("draft");
    state.posts.push(post.clone());
    (StatusCode::CREATED, Json(post)).into_response()
}

async fn update_post(
    State(backend): State<Backend>,
    Path(id): Path<i64>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    if let Err(response) = authorized(&headers) {
        return response;
    }
    let mut state = backend.state.lock().unwrap();
    let Some(post) = state.posts.iter_mut().find(|post| post["id"] == id) else {
        return not_found();
    };
    post["title"] = body["title"].clone();
    post["content"] = body["content"].clone();
    Json(post.clone()).into_response()
}

async fn delete_post(
    State(backend): State<Backend>,
    Path(id): Path<i64>,
    headers: HeaderMap,
) -> Response {
    if let Err(response) = authorized(&headers) {
        return response;
    }
    let mut state = backend.state.lock().unwrap();
    let before = state.posts.len();
    state.posts.retain(|post| post["id"] != id);
    if state.posts.len() == before {
        not_found()
    } else {
        StatusCode::NO_CONTENT.into_response()
    }
}

/// A local URL with nothing listening on it.
pub fn unreachable_url() -> Url {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    Url::parse(&format!("http://{addr}")).unwrap()
}
