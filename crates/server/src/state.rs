use crate::config::ServerConfig;
use crate::error::{ServerError, ServerResult};
use classify::{Classify, GeminiClassifier};
use feedbackd::{
    FeedbackPipeline, FeedbackStore, LogNotifier, MemoryFeedbackStore, Notifier, RateLimiter,
};
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct ServerState {
    /// Server configuration
    pub config: Arc<ServerConfig>,

    /// The ingestion pipeline (shared across requests)
    pub pipeline: Arc<FeedbackPipeline>,
}

impl ServerState {
    /// Create new server state with the in-memory store and log notifier.
    ///
    /// Production deployments swap in their own sinks via
    /// [`ServerState::with_sinks`]; the in-memory pair keeps the dev server
    /// and the test suite self-contained.
    pub fn new(config: ServerConfig) -> ServerResult<Self> {
        Self::with_sinks(
            config,
            Arc::new(MemoryFeedbackStore::new()),
            Arc::new(LogNotifier),
        )
    }

    /// Create new server state with explicit storage and notification sinks.
    pub fn with_sinks(
        config: ServerConfig,
        store: Arc<dyn FeedbackStore>,
        notifier: Arc<dyn Notifier>,
    ) -> ServerResult<Self> {
        let classifier: Option<Arc<dyn Classify>> = if config.classify.is_enabled() {
            let gemini = GeminiClassifier::new(config.classify.clone())
                .map_err(|e| ServerError::Config(e.to_string()))?;
            Some(Arc::new(gemini))
        } else {
            None
        };

        let pipeline = Arc::new(FeedbackPipeline::new(
            config.ingest.clone(),
            RateLimiter::from_config(&config.rate_limit),
            classifier,
            store,
            notifier,
        ));

        Ok(Self {
            config: Arc::new(config),
            pipeline,
        })
    }
}

/// Server metadata for health checks
#[derive(Debug, serde::Serialize)]
pub struct ServerMetadata {
    pub version: String,
    pub uptime_seconds: u64,
}
