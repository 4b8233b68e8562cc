pub mod config;
pub mod errors;
pub mod memory;
pub mod response;
pub mod store;
pub mod types;
pub mod users;
pub mod validators;

use config::Settings;
use std::sync::Arc;

/// Shared application state, built once per cold start
pub struct AppState<S> {
    pub store: S,
    pub settings: Settings,
}

impl<S> AppState<S> {
    pub fn new(store: S, settings: Settings) -> Arc<Self> {
        Arc::new(Self { store, settings })
    }
}
