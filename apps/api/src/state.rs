use std::sync::Arc;

use crate::config::Config;
use crate::session::store::SessionStore;
use crate::synthesis::synthesizer::Synthesizer;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// The only shared mutable structure in the service.
    pub store: Arc<SessionStore>,
    /// Pluggable preview builder. Default: LocalSynthesizer. Swap via
    /// ENABLE_REMOTE_SYNTHESIS env.
    pub synthesizer: Arc<dyn Synthesizer>,
    pub config: Config,
}
