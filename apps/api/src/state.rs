use std::sync::Arc;

use crate::llm_client::PromptDrafter;
use crate::store::ShotStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<ShotStore>,
    /// Pluggable drafting service. Production wires in `LlmClient`; tests
    /// swap in a stub so no handler test touches the network.
    pub drafter: Arc<dyn PromptDrafter>,
}
