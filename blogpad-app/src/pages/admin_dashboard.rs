use shared::models::{Post, PostId, PostInput};
use std::sync::{Arc, Mutex};
use tokio::sync::broadcast;
use tracing::{debug, error, info, warn};

use super::{Confirm, FETCH_POSTS_FAILED, Mounted, lock};
use crate::{
    components::{Banner, PostForm},
    context::AppContext,
    error::ClientResult,
    routes::Route,
    session::{SessionEvent, drain_expired},
};

pub const POST_CREATED: &str = "Post created successfully!";
pub const CREATE_FAILED: &str = "Failed to create post. Please try again.";
pub const POST_DELETED: &str = "Post deleted successfully!";
pub const DELETE_FAILED: &str = "Failed to delete post. Please try again.";
pub const DELETE_PROMPT: &str = "Are you sure you want to delete this post?";

/// Snapshot of the dashboard for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardState {
    pub posts: Vec<Post>,
    pub loading: bool,
    pub error: Option<String>,
    pub success: Option<String>,
    pub is_submitting: bool,
    pub show_create_form: bool,
    pub redirect: Option<Route>,
}

#[derive(Debug)]
struct DashboardInner {
    posts: Vec<Post>,
    loading: bool,
    is_submitting: bool,
    show_create_form: bool,
    redirect: Option<Route>,
}

impl Default for DashboardInner {
    fn default() -> Self {
        Self {
            posts: Vec::new(),
            loading: true,
            is_submitting: false,
            show_create_form: false,
            redirect: None,
        }
    }
}

/// Controller for `/admin`: lists posts and creates or deletes them.
///
/// Any 401 seen while the dashboard is mounted sends it to the login screen,
/// whatever the server said.
#[derive(Debug, Clone)]
pub struct AdminDashboard {
    ctx: AppContext,
    inner: Arc<Mutex<DashboardInner>>,
    error: Banner,
    success: Banner,
    expired: Arc<Mutex<broadcast::Receiver<SessionEvent>>>,
    mounted: Mounted,
}

impl AdminDashboard {
    #[must_use]
    pub fn new(ctx: AppContext) -> Self {
        let expired = ctx.client.events().subscribe();
        Self {
            ctx,
            inner: Arc::default(),
            error: Banner::new(),
            success: Banner::new(),
            expired: Arc::new(Mutex::new(expired)),
            mounted: Mounted::new(),
        }
    }

    /// Redirects to login without a stored token, otherwise loads posts.
    pub async fn mount(&self) {
        if !self.ctx.auth.is_authenticated() {
            info!("no session token, redirecting to login");
            let mut inner = lock(&self.inner);
            inner.loading = false;
            inner.redirect = Some(Route::Login);
            return;
        }
        self.refresh().await;
    }

    pub async fn refresh(&self) {
        lock(&self.inner).loading = true;
        let result = self.ctx.posts.list().await;
        if !self.settle() {
            return;
        }

        let mut inner = lock(&self.inner);
        inner.loading = false;
        match result {
            Ok(posts) => {
                debug!(count = posts.len(), "dashboard posts loaded");
                inner.posts = posts;
            }
            Err(err) => {
                error!(error = %err, "failed to fetch posts");
                inner.posts.clear();
                drop(inner);
                self.error.show(FETCH_POSTS_FAILED);
            }
        }
    }

    pub fn open_create_form(&self) {
        lock(&self.inner).show_create_form = true;
    }

    pub fn close_create_form(&self) {
        lock(&self.inner).show_create_form = false;
    }

    /// Create a post and put it at the top of the list.
    ///
    /// # Errors
    /// Returns the request error after recording it for display.
    pub async fn create_post(&self, input: PostInput) -> ClientResult<Post> {
        lock(&self.inner).is_submitting = true;
        self.error.clear();

        let result = self.ctx.posts.create(&input).await;
        if !self.settle() {
            return result;
        }
        lock(&self.inner).is_submitting = false;

        match &result {
            Ok(post) => {
                info!(id = %post.id, "post created");
                {
                    let mut inner = lock(&self.inner);
                    inner.posts.insert(0, post.clone());
                    inner.show_create_form = false;
                }
                self.success.show_for(POST_CREATED, self.ctx.banner_timeout);
            }
            Err(err) => {
                error!(error = %err, "failed to create post");
                self.error.show(err.user_message(CREATE_FAILED));
            }
        }
        result
    }

    /// Submit `form` through [`create_post`](Self::create_post).
    ///
    /// # Errors
    /// Validation errors from the form, or the request error.
    pub async fn submit_form(&self, form: &mut PostForm) -> ClientResult<Post> {
        form.submit(|input| self.create_post(input)).await
    }

    /// Delete a post once the user agrees. Returns whether it was deleted.
    ///
    /// # Errors
    /// Returns the request error after recording it for display; the list is
    /// left as it was.
    pub async fn delete_post<C>(&self, id: &PostId, confirm: &C) -> ClientResult<bool>
    where
        C: Confirm + ?Sized,
    {
        if !confirm.confirm(DELETE_PROMPT) {
            debug!(%id, "delete declined");
            return Ok(false);
        }

        let result = self.ctx.posts.delete(id).await;
        if !self.settle() {
            return result.map(|_| true);
        }

        match result {
            Ok(_) => {
                info!(%id, "post deleted");
                lock(&self.inner).posts.retain(|post| &post.id != id);
                self.success.show_for(POST_DELETED, self.ctx.banner_timeout);
                Ok(true)
            }
            Err(err) => {
                error!(%id, error = %err, "failed to delete post");
                self.error
                    .show_for(err.user_message(DELETE_FAILED), self.ctx.banner_timeout);
                Err(err)
            }
        }
    }

    pub fn edit_post(&self, id: &PostId) {
        lock(&self.inner).redirect = Some(Route::EditPost { id: id.clone() });
    }

    #[must_use]
    pub fn state(&self) -> DashboardState {
        let inner = lock(&self.inner);
        DashboardState {
            posts: inner.posts.clone(),
            loading: inner.loading,
            error: self.error.message(),
            success: self.success.message(),
            is_submitting: inner.is_submitting,
            show_create_form: inner.show_create_form,
            redirect: inner.redirect.clone(),
        }
    }

    /// Take the pending navigation, if any.
    pub fn take_redirect(&self) -> Option<Route> {
        lock(&self.inner).redirect.take()
    }

    /// Stop banner timers and drop results that arrive later.
    pub fn unmount(&self) {
        self.mounted.unmount();
        self.error.cancel();
        self.success.cancel();
    }

    /// Whether a settled request should still touch the state. Also turns a
    /// session expiry into a redirect.
    fn settle(&self) -> bool {
        if !self.mounted.is_mounted() {
            debug!("dashboard unmounted, dropping result");
            return false;
        }
        if drain_expired(&mut lock(&self.expired)) {
            warn!("session expired, redirecting to login");
            lock(&self.inner).redirect = Some(Route::Login);
        }
        true
    }
}
