use std::sync::Arc;

use crate::config::Config;
use crate::llm_client::LlmClient;
use crate::storage::Storage;

/// Shared application state injected into all route handlers via Axum extractors.
///
/// Storage is an injected trait object constructed once at process start —
/// no implicit singleton, so handlers can be tested against MemStorage.
#[derive(Clone)]
pub struct AppState {
    pub storage: Arc<dyn Storage>,
    pub llm: LlmClient,
    pub config: Config,
}
