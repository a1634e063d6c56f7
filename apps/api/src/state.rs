use std::sync::Arc;

use crate::artifacts::ArtifactStore;
use crate::config::Config;
use crate::llm_client::ModelGateway;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Model gateway. Production: `LlmClient`; tests substitute a stub.
    pub gateway: Arc<dyn ModelGateway>,
    pub artifacts: ArtifactStore,
    pub config: Config,
}
