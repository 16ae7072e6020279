use shared::models::{Post, PostId, PostInput, PostListResponse};
use tracing::warn;

use crate::{api::ApiClient, error::ClientResult};

pub const POSTS_PATH: &str = "/api/posts";

/// CRUD pass-through for the posts resource. Ordering, filtering and
/// validation are the backend's business.
#[derive(Clone, Debug)]
pub struct PostService {
    client: ApiClient,
}

impl PostService {
    #[must_use]
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Entries that do not decode as posts are logged and skipped.
    ///
    /// # Errors
    /// Propagates request errors unchanged.
    pub async fn list(&self) -> ClientResult<Vec<Post>> {
        let body: PostListResponse = self.client.get(POSTS_PATH).await?;
        let (posts, rejected) = body.into_posts();
        for err in &rejected {
            warn!(error = %err, "skipping malformed post entry");
        }
        Ok(posts)
    }

    /// # Errors
    /// Propagates request errors unchanged.
    pub async fn get(&self, id: &PostId) -> ClientResult<Post> {
        self.client.get(&post_path(id)).await
    }

    /// # Errors
    /// Propagates request errors unchanged.
    pub async fn create(&self, input: &PostInput) -> ClientResult<Post> {
        self.client.post(POSTS_PATH, input).await
    }

    /// # Errors
    /// Propagates request errors unchanged.
    pub async fn update(&self, id: &PostId, input: &PostInput) -> ClientResult<Post> {
        self.client.put(&post_path(id), input).await
    }

    /// Returns whatever the backend sends back, often nothing.
    ///
    /// # Errors
    /// Propagates request errors unchanged.
    pub async fn delete(&self, id: &PostId) -> ClientResult<serde_json::Value> {
        self.client.delete(&post_path(id)).await
    }
}

fn post_path(id: &PostId) -> String {
    format!("{POSTS_PATH}/{id}")
}
