use shared::models::{AuthResponse, Credentials, SignupRequest};
use tracing::{error, info};

use crate::{api::ApiClient, error::ClientResult};

pub const SIGNUP_PATH: &str = "/api/signup";
pub const LOGIN_PATH: &str = "/api/login";

/// Account operations. Login and signup persist the issued token; logout
/// only forgets it locally.
#[derive(Clone, Debug)]
pub struct AuthService {
    client: ApiClient,
}

impl AuthService {
    #[must_use]
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Create an account. Stores the token when the backend issues one.
    ///
    /// # Errors
    /// Propagates request errors unchanged, or a storage error if the token
    /// cannot be saved.
    pub async fn signup(&self, request: &SignupRequest) -> ClientResult<AuthResponse> {
        let response: AuthResponse = self
            .client
            .post(SIGNUP_PATH, request)
            .await
            .inspect_err(|err| error!(error = %err, "signup failed"))?;
        self.persist_token(&response)?;
        Ok(response)
    }

    /// Authenticate and store the issued token.
    ///
    /// # Errors
    /// Propagates request errors unchanged, or a storage error if the token
    /// cannot be saved.
    pub async fn login(&self, credentials: &Credentials) -> ClientResult<AuthResponse> {
        let response: AuthResponse = self.client.post(LOGIN_PATH, credentials).await?;
        self.persist_token(&response)?;
        Ok(response)
    }

    /// Forget the session token. No request is made; calling it twice is fine.
    ///
    /// # Errors
    /// Returns a storage error if the token cannot be removed.
    pub fn logout(&self) -> ClientResult<()> {
        self.client.session().clear()?;
        info!("session token cleared");
        Ok(())
    }

    /// True iff a token is stored. Stale tokens still count until the
    /// backend rejects one.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.client.session().is_present()
    }

    fn persist_token(&self, response: &AuthResponse) -> ClientResult<()> {
        if let Some(token) = response.token.as_deref().filter(|token| !token.is_empty()) {
            self.client.session().store_token(token)?;
            info!("session token stored");
        }
        Ok(())
    }
}
