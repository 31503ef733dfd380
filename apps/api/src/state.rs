use crate::config::Config;
use crate::search::session::SearchSession;

/// Shared application state injected into all route handlers via Axum extractors.
/// The knowledge base handle lives inside `session`; nothing is process-global.
#[derive(Clone)]
pub struct AppState {
    pub session: SearchSession,
    pub config: Config,
}
