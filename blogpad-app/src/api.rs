use reqwest::{Client, Method, StatusCode, header::CONTENT_TYPE};
use serde::{Serialize, de::DeserializeOwned};
use shared::models::ErrorResponse;
use tracing::{debug, error, warn};
use url::Url;

use crate::{
    error::{ClientError, ClientResult},
    session::{Session, SessionEvent, SessionEvents},
};

const USER_AGENT: &str = concat!("blogpad/", env!("CARGO_PKG_VERSION"));

/// HTTP wrapper for the blog backend.
///
/// Resolves relative paths against the configured base URL, attaches the
/// session token as a bearer credential, and turns non-2xx responses into
/// [`ClientError::Http`]. Every 401 is announced on [`SessionEvents`].
#[derive(Clone, Debug)]
pub struct ApiClient {
    base_url: Url,
    http: Client,
    session: Session,
    events: SessionEvents,
}

impl ApiClient {
    /// Create a client for `base_url` reading its token from `session`.
    ///
    /// # Errors
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(base_url: Url, session: Session) -> ClientResult<Self> {
        let http = Client::builder()
            .cookie_store(true)
            .user_agent(USER_AGENT)
            .build()
            .map_err(ClientError::Transport)?;

        Ok(Self {
            base_url,
            http,
            session,
            events: SessionEvents::new(),
        })
    }

    /// Base URL every request path is appended to.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Session whose token is sent as the bearer credential.
    #[must_use]
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Channel announcing session expiry on every 401.
    #[must_use]
    pub fn events(&self) -> &SessionEvents {
        &self.events
    }

    /// Paths are always appended to the base, so a caller cannot point a
    /// request (and the token) at another host.
    fn endpoint(&self, path: &str) -> ClientResult<Url> {
        let joined = format!(
            "{}/{}",
            self.base_url.as_str().trim_end_matches('/'),
            path.trim_start_matches('/')
        );
        Url::parse(&joined).map_err(|source| ClientError::InvalidUrl {
            url: joined,
            source,
        })
    }

    /// # Errors
    /// Returns an error on transport failure, non-2xx status, or an
    /// undecodable body.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        self.send::<(), T>(Method::GET, path, None).await
    }

    /// # Errors
    /// Returns an error on transport failure, non-2xx status, or an
    /// undecodable body.
    pub async fn post<B, T>(&self, path: &str, body: &B) -> ClientResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send(Method::POST, path, Some(body)).await
    }

    /// # Errors
    /// Returns an error on transport failure, non-2xx status, or an
    /// undecodable body.
    pub async fn put<B, T>(&self, path: &str, body: &B) -> ClientResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send(Method::PUT, path, Some(body)).await
    }

    /// # Errors
    /// Returns an error on transport failure, non-2xx status, or an
    /// undecodable body.
    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        self.send::<(), T>(Method::DELETE, path, None).await
    }

    async fn send<B, T>(&self, method: Method, path: &str, body: Option<&B>) -> ClientResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.endpoint(path)?;
        debug!(method = %method, path, "making request");

        let mut request = self
            .http
            .request(method.clone(), url)
            .header(CONTENT_TYPE, "application/json");
        if let Some(token) = self.session.token()? {
            request = request.bearer_auth(token);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = match request.send().await {
            Ok(response) => response,
            Err(err) => {
                error!(method = %method, path, error = %err, "request failed");
                return Err(ClientError::Transport(err));
            }
        };

        let status = response.status();
        debug!(method = %method, path, status = status.as_u16(), "received response");
        let bytes = response.bytes().await.map_err(ClientError::Transport)?;

        if !status.is_success() {
            let message = serde_json::from_slice::<ErrorResponse>(&bytes)
                .ok()
                .map(|body| body.message);
            warn!(
                method = %method,
                path,
                status = status.as_u16(),
                message = message.as_deref().unwrap_or_default(),
                "request rejected"
            );
            if status == StatusCode::UNAUTHORIZED {
                self.events.emit(SessionEvent::Expired);
            }
            return Err(ClientError::Http { status, message });
        }

        decode(&bytes)
    }
}

/// Empty bodies decode as JSON `null`. A body that is not JSON is offered
/// to `T` as a plain string before giving up.
fn decode<T: DeserializeOwned>(bytes: &[u8]) -> ClientResult<T> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return serde_json::from_value(serde_json::Value::Null).map_err(ClientError::Decode);
    }
    match serde_json::from_slice(bytes) {
        Ok(value) => Ok(value),
        Err(err) if err.is_syntax() || err.is_eof() => {
            let text = String::from_utf8_lossy(bytes).trim().to_string();
            serde_json::from_value(serde_json::Value::String(text))
                .map_err(|_| ClientError::Decode(err))
        }
        Err(err) => Err(ClientError::Decode(err)),
    }
}
