//! Screen controllers.
//!
//! Each controller is a cheap `Clone` handle over shared state. Actions are
//! async methods; front ends render from [`state`](AdminDashboard::state)
//! snapshots.

use std::sync::{
    Arc, Mutex, MutexGuard, PoisonError,
    atomic::{AtomicBool, Ordering},
};

pub mod admin_dashboard;
pub mod blog_list;
pub mod login;
pub mod signup;

pub use admin_dashboard::{AdminDashboard, DashboardState};
pub use blog_list::{BlogList, BlogListState};
pub use login::{LoginPage, LoginState};
pub use signup::{SignupPage, SignupState};

use crate::error::ClientError;

pub const FETCH_POSTS_FAILED: &str = "Failed to fetch posts. Please try again later.";
pub const CONNECTION_FAILED: &str = "Unable to connect to server";

/// Asks the user to confirm a destructive action.
pub trait Confirm {
    fn confirm(&self, prompt: &str) -> bool;
}

impl<F> Confirm for F
where
    F: Fn(&str) -> bool,
{
    fn confirm(&self, prompt: &str) -> bool {
        self(prompt)
    }
}

/// Set until the screen is torn down. Results that settle afterwards are
/// dropped.
#[derive(Debug, Clone)]
pub(crate) struct Mounted(Arc<AtomicBool>);

impl Mounted {
    pub(crate) fn new() -> Self {
        Self(Arc::new(AtomicBool::new(true)))
    }

    pub(crate) fn is_mounted(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    pub(crate) fn unmount(&self) {
        self.0.store(false, Ordering::Release);
    }
}

pub(crate) fn lock<T>(state: &Mutex<T>) -> MutexGuard<'_, T> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Message shown by the login and signup screens for a failed attempt.
pub(crate) fn auth_failure_message(err: &ClientError, action: &str) -> String {
    match err {
        ClientError::Transport(_) => CONNECTION_FAILED.to_string(),
        ClientError::Http { status, .. } => err
            .server_message()
            .map_or_else(|| format!("{action} failed: {status}"), ToString::to_string),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    #[test]
    fn test_closure_confirms() {
        let yes = |_: &str| true;
        let no = |prompt: &str| prompt.is_empty();
        assert!(yes.confirm("Delete?"));
        assert!(!no.confirm("Delete?"));
    }

    #[test]
    fn test_mounted_flag_is_shared_between_clones() {
        let mounted = Mounted::new();
        let view = mounted.clone();
        assert!(view.is_mounted());
        mounted.unmount();
        assert!(!view.is_mounted());
    }

    #[test]
    fn test_auth_failure_message_prefers_server_text() {
        let err = ClientError::Http {
            status: StatusCode::CONFLICT,
            message: Some("Email already registered".to_string()),
        };
        assert_eq!(auth_failure_message(&err, "Signup"), "Email already registered");

        let err = ClientError::Http {
            status: StatusCode::BAD_GATEWAY,
            message: None,
        };
        assert_eq!(
            auth_failure_message(&err, "Login"),
            "Login failed: 502 Bad Gateway"
        );
    }
}
