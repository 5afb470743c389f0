//! Squirrel REST server
//!
//! A small asynchronous HTTP server exposing CRUD over a single collection
//! of squirrel records backed by SQLite, plus an unrelated file-backed
//! string list store:
//! - `dispatch` classifies every (method, path) pair before any I/O happens
//! - `handler` wires the classification to store calls and responses
//! - `http` owns response building and form decoding
//! - `store` owns all persistence
//! - `config` and `logger` carry startup configuration and logging

pub mod config;
pub mod dispatch;
pub mod handler;
pub mod http;
pub mod logger;
pub mod store;

/// Re-export commonly used types
pub use config::{AppState, Config};
pub use store::{Squirrel, SquirrelStore, StringListStore};
