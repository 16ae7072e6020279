#![cfg_attr(not(test), forbid(unsafe_code))]

//! Blogpad application core.
//!
//! Everything a front end needs to talk to the blog backend: the HTTP
//! wrapper with bearer-token handling, the auth and post services, and the
//! page controllers that own each screen's state.

pub mod api;
pub mod components;
pub mod context;
pub mod error;
pub mod pages;
pub mod routes;
pub mod services;
pub mod session;
pub mod storage;

pub use api::ApiClient;
pub use context::AppContext;
pub use error::{ClientError, ClientResult};
pub use reqwest::StatusCode;
pub use routes::Route;
pub use session::{Session, SessionEvent, SessionEvents};
pub use storage::{FileTokenStore, MemoryTokenStore, StorageError, TokenStore};
