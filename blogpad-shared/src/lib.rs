#![cfg_attr(not(test), forbid(unsafe_code))]

//! Models and configuration shared by the Blogpad crates.

pub mod config;
pub mod models;
