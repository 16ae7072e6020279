use anyhow::{Context, Result};
use app::{AppContext, FileTokenStore, TokenStore};
use shared::config::client::Config;
use std::{
    io::{self, Write},
    path::PathBuf,
    sync::Arc,
};
use tracing::debug;
use url::Url;

use crate::tracer;

pub mod admin;
pub mod completion;
pub mod config;
pub mod posts;
pub mod session;

/// Resolve configuration, start logging, and wire the app context around
/// the on-disk token store.
pub fn connect(config_path: Option<PathBuf>, server: Option<Url>) -> Result<(Config, AppContext)> {
    let config = Config::load_config(config_path, server).context("failed to load configuration")?;
    tracer::initialize_tracing(&config)?;

    let store_path = config.session.store_path();
    debug!(path = %store_path.display(), base_url = %config.api.base_url, "using session store");
    let store: Arc<dyn TokenStore> = Arc::new(FileTokenStore::new(store_path));
    let ctx = AppContext::from_config(&config, store).context("failed to build API client")?;
    Ok((config, ctx))
}

/// Print `message` and read one trimmed line from stdin.
pub fn prompt(message: &str) -> Result<String> {
    print!("{message}");
    io::stdout().flush().ok();
    let mut input = String::new();
    io::stdin()
        .read_line(&mut input)
        .context("failed to read from stdin")?;
    Ok(input.trim().to_string())
}
