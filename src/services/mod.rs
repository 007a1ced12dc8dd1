use std::sync::Arc;

use crate::config::AppConfig;

pub mod qa;

/// Shared state injected into route handlers.
///
/// Credentials arrive with each request, so the state carries only
/// configuration; the completion client and QA service are built per
/// request around the supplied API key.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(config: Arc<AppConfig>) -> Self {
        Self { config }
    }
}
