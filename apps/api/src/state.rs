use std::sync::Arc;

use crate::config::Config;
use crate::llm_client::{Embedder, Extractor};
use crate::store::RecordStore;

/// Shared application state injected into all route handlers via Axum extractors.
/// Built once in `main`; cloning only bumps reference counts.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn RecordStore>,
    pub embedder: Arc<dyn Embedder>,
    pub extractor: Arc<dyn Extractor>,
    pub config: Arc<Config>,
}
