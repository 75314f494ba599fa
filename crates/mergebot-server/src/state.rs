use std::sync::Arc;

use mergebot_core::Config;

use crate::orchestrator::Orchestrator;

/// Shared application state passed to all route handlers.
///
/// Collaborators are constructed once at startup and injected here — no
/// ambient singletons, so tests can assemble a state around substitutes.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub orchestrator: Arc<Orchestrator>,
}

impl AppState {
    pub fn new(config: Arc<Config>, orchestrator: Arc<Orchestrator>) -> Self {
        Self {
            config,
            orchestrator,
        }
    }
}
