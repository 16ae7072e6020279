use shared::models::{AuthResponse, SignupRequest};
use std::sync::{Arc, Mutex};
use tracing::{debug, info};

use super::{Mounted, auth_failure_message, lock};
use crate::{
    context::AppContext,
    error::{ClientError, ClientResult},
    routes::Route,
};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignupState {
    pub username: String,
    pub email: String,
    pub error: Option<String>,
    pub loading: bool,
    pub redirect: Option<Route>,
}

#[derive(Debug, Default)]
struct SignupInner {
    request: SignupRequest,
    error: Option<String>,
    loading: bool,
    redirect: Option<Route>,
}

/// Controller for `/signup`.
///
/// Some backends create the account without issuing a token; the screen
/// still moves on to the dashboard, which then sends the user to log in.
#[derive(Debug, Clone)]
pub struct SignupPage {
    ctx: AppContext,
    inner: Arc<Mutex<SignupInner>>,
    mounted: Mounted,
}

impl SignupPage {
    #[must_use]
    pub fn new(ctx: AppContext) -> Self {
        Self {
            ctx,
            inner: Arc::default(),
            mounted: Mounted::new(),
        }
    }

    pub fn set_username(&self, username: impl Into<String>) {
        lock(&self.inner).request.username = username.into();
    }

    pub fn set_email(&self, email: impl Into<String>) {
        lock(&self.inner).request.email = email.into();
    }

    pub fn set_password(&self, password: impl Into<String>) {
        lock(&self.inner).request.password = password.into();
    }

    /// # Errors
    /// Missing fields, or the request error after recording its message.
    pub async fn submit(&self) -> ClientResult<AuthResponse> {
        let request = {
            let mut inner = lock(&self.inner);
            let request = &inner.request;
            if request.username.is_empty() || request.email.is_empty() || request.password.is_empty()
            {
                let message = "Username, email and password are required".to_string();
                inner.error = Some(message.clone());
                return Err(ClientError::Validation(message));
            }
            inner.loading = true;
            inner.error = None;
            inner.request.clone()
        };

        let result = self.ctx.auth.signup(&request).await;
        if !self.mounted.is_mounted() {
            debug!("signup screen unmounted, dropping result");
            return result;
        }

        let mut inner = lock(&self.inner);
        inner.loading = false;
        match &result {
            Ok(response) => {
                info!(
                    username = %request.username,
                    token_issued = response.token.is_some(),
                    "account created"
                );
                inner.redirect = Some(Route::Admin);
            }
            Err(err) => inner.error = Some(auth_failure_message(err, "Signup")),
        }
        result
    }

    #[must_use]
    pub fn state(&self) -> SignupState {
        let inner = lock(&self.inner);
        SignupState {
            username: inner.request.username.clone(),
            email: inner.request.email.clone(),
            error: inner.error.clone(),
            loading: inner.loading,
            redirect: inner.redirect.clone(),
        }
    }

    pub fn take_redirect(&self) -> Option<Route> {
        lock(&self.inner).redirect.take()
    }

    pub fn unmount(&self) {
        self.mounted.unmount();
    }
}
