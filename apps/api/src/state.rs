use std::sync::Arc;

use sqlx::PgPool;

use crate::config::Config;
use crate::llm_client::TextGenerator;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    /// Generative model behind the `TextGenerator` seam — `GeminiClient` in
    /// production, scripted doubles in tests.
    pub llm: Arc<dyn TextGenerator>,
    /// Loaded configuration, kept for handlers that need runtime settings.
    #[allow(dead_code)]
    pub config: Config,
}
