use shared::models::Post;
use std::sync::{Arc, Mutex};
use tracing::{debug, error};

use super::{FETCH_POSTS_FAILED, Mounted, lock};
use crate::context::AppContext;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlogListState {
    pub posts: Vec<Post>,
    pub loading: bool,
    pub error: Option<String>,
}

impl Default for BlogListState {
    fn default() -> Self {
        Self {
            posts: Vec::new(),
            loading: true,
            error: None,
        }
    }
}

/// Controller for the public listing at `/`.
#[derive(Debug, Clone)]
pub struct BlogList {
    ctx: AppContext,
    state: Arc<Mutex<BlogListState>>,
    mounted: Mounted,
}

impl BlogList {
    #[must_use]
    pub fn new(ctx: AppContext) -> Self {
        Self {
            ctx,
            state: Arc::default(),
            mounted: Mounted::new(),
        }
    }

    pub async fn mount(&self) {
        self.refresh().await;
    }

    /// Reload the listing. A failure leaves an empty list and an error.
    pub async fn refresh(&self) {
        lock(&self.state).loading = true;
        let result = self.ctx.posts.list().await;
        if !self.mounted.is_mounted() {
            debug!("blog list unmounted, dropping result");
            return;
        }

        let mut state = lock(&self.state);
        state.loading = false;
        match result {
            Ok(posts) => {
                state.posts = posts;
                state.error = None;
            }
            Err(err) => {
                error!(error = %err, "failed to fetch posts");
                state.posts.clear();
                state.error = Some(FETCH_POSTS_FAILED.to_string());
            }
        }
    }

    #[must_use]
    pub fn state(&self) -> BlogListState {
        lock(&self.state).clone()
    }

    pub fn unmount(&self) {
        self.mounted.unmount();
    }
}
