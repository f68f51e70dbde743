use std::sync::Arc;

use sqlx::PgPool;

use crate::llm_client::ModelGateway;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    /// Model gateway seam. Production wires in `AnthropicGateway`; tests
    /// substitute canned or failing stubs.
    pub gateway: Arc<dyn ModelGateway>,
}
