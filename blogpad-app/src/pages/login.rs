use reqwest::StatusCode;
use shared::models::{AuthResponse, Credentials};
use std::sync::{Arc, Mutex};
use tracing::{debug, info};

use super::{Mounted, auth_failure_message, lock};
use crate::{
    context::AppContext,
    error::{ClientError, ClientResult},
    routes::Route,
};

pub const INVALID_CREDENTIALS: &str = "Invalid credentials";

/// What the sign-in screen shows. The password is never part of it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginState {
    pub email: String,
    pub error: Option<String>,
    pub loading: bool,
    pub can_submit: bool,
    pub redirect: Option<Route>,
}

#[derive(Debug, Default)]
struct LoginInner {
    credentials: Credentials,
    error: Option<String>,
    loading: bool,
    redirect: Option<Route>,
}

/// Controller for `/login`.
#[derive(Debug, Clone)]
pub struct LoginPage {
    ctx: AppContext,
    inner: Arc<Mutex<LoginInner>>,
    mounted: Mounted,
}

impl LoginPage {
    #[must_use]
    pub fn new(ctx: AppContext) -> Self {
        Self {
            ctx,
            inner: Arc::default(),
            mounted: Mounted::new(),
        }
    }

    pub fn set_email(&self, email: impl Into<String>) {
        lock(&self.inner).credentials.email = email.into();
    }

    pub fn set_password(&self, password: impl Into<String>) {
        lock(&self.inner).credentials.password = password.into();
    }

    /// Sign in with the entered credentials and go to the dashboard.
    ///
    /// # Errors
    /// Missing fields, or the request error after recording its message.
    pub async fn submit(&self) -> ClientResult<AuthResponse> {
        let credentials = {
            let mut inner = lock(&self.inner);
            if inner.credentials.email.is_empty() || inner.credentials.password.is_empty() {
                let message = "Email and password are required".to_string();
                inner.error = Some(message.clone());
                return Err(ClientError::Validation(message));
            }
            inner.loading = true;
            inner.error = None;
            inner.credentials.clone()
        };

        let result = self.ctx.auth.login(&credentials).await;
        if !self.mounted.is_mounted() {
            debug!("login screen unmounted, dropping result");
            return result;
        }

        let mut inner = lock(&self.inner);
        inner.loading = false;
        match &result {
            Ok(_) => {
                info!(email = %credentials.email, "signed in");
                inner.redirect = Some(Route::Admin);
            }
            Err(err) if err.status() == Some(StatusCode::UNAUTHORIZED) => {
                inner.error = Some(INVALID_CREDENTIALS.to_string());
            }
            Err(err) => inner.error = Some(auth_failure_message(err, "Login")),
        }
        result
    }

    #[must_use]
    pub fn state(&self) -> LoginState {
        let inner = lock(&self.inner);
        LoginState {
            email: inner.credentials.email.clone(),
            error: inner.error.clone(),
            loading: inner.loading,
            can_submit: !inner.credentials.email.is_empty()
                && !inner.credentials.password.is_empty()
                && !inner.loading,
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
