use shared::config::client::Config;
use std::{sync::Arc, time::Duration};

use crate::{
    api::ApiClient,
    error::ClientResult,
    services::{AuthService, PostService},
    session::Session,
    storage::TokenStore,
};

/// Everything a page controller needs, passed explicitly instead of living
/// in globals.
#[derive(Clone, Debug)]
pub struct AppContext {
    pub client: ApiClient,
    pub auth: AuthService,
    pub posts: PostService,
    pub banner_timeout: Duration,
}

impl AppContext {
    #[must_use]
    pub fn new(client: ApiClient, banner_timeout: Duration) -> Self {
        Self {
            auth: AuthService::new(client.clone()),
            posts: PostService::new(client.clone()),
            client,
            banner_timeout,
        }
    }

    /// Wire a context from configuration around the given token store.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built.
    pub fn from_config(config: &Config, store: Arc<dyn TokenStore>) -> ClientResult<Self> {
        let session = Session::new(store, config.session.token_key.clone());
        let client = ApiClient::new(config.api.base_url.clone(), session)?;
        Ok(Self::new(client, config.ui.banner_timeout()))
    }
}
