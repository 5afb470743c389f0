// Runtime state shared across connections

use tokio::sync::Mutex;

use super::types::Config;
use crate::store::SquirrelStore;

/// Shared application state
///
/// Cloned into every connection task behind an `Arc`. The squirrel store
/// owns a single SQLite connection, so access is serialized by a mutex;
/// each request issues at most one mutating statement while holding it.
pub struct AppState {
    /// Static configuration loaded at startup
    pub config: Config,
    /// Squirrel record store
    pub squirrels: Mutex<SquirrelStore>,
}

impl AppState {
    pub fn new(config: Config, squirrels: SquirrelStore) -> Self {
        Self {
            config,
            squirrels: Mutex::new(squirrels),
        }
    }
}
