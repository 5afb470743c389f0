//! Request classification module
//!
//! Pure classification of (method, path) pairs, evaluated before any I/O.
//! The handler layer consumes the decision and never re-inspects the path.

pub mod route;

// Re-export the classification surface
pub use route::{classify_path, resolve, Action, Decision, PathShape};
