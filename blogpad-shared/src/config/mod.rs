//! # Configuration
//!
//! Client configuration: backend endpoint, session storage, UI timing and
//! logging.

pub mod client;
