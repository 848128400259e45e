#![deny(
    clippy::all,
    clippy::nursery,
    clippy::pedantic,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::correctness,
    clippy::suspicious,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(
    clippy::similar_names,
    clippy::missing_safety_doc,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc
)]

//! Startup configuration for the chat client.
//!
//! The config file is read once. A missing or malformed file is not fatal:
//! [`Config::load_or_default`] hands back an empty credential together with
//! the error so the interface can show a warning and keep running.

mod error;
mod schema;

pub use error::ConfigError;
pub use schema::{CONFIG_FILE_NAME, Config, LoadedConfig};
