//! Application state shared across all route handlers.

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Instant;

use carwise_chat::{ChatOrchestrator, ConversationStore};
use carwise_core::config::CarwiseConfig;

use crate::error::ApiError;

/// Shared application state.
///
/// All fields use `Arc` for cheap cloning across handler tasks. The
/// conversation store is the only mutable part and sits behind a `Mutex`.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<CarwiseConfig>,
    /// Dispatcher plus message validation; read-only.
    pub orchestrator: Arc<ChatOrchestrator>,
    /// Chat sessions for this process.
    pub store: Arc<Mutex<ConversationStore>>,
    /// Server start time for uptime calculation.
    pub start_time: Instant,
}

impl AppState {
    pub fn new(config: CarwiseConfig, orchestrator: ChatOrchestrator) -> Self {
        Self::with_store(config, orchestrator, ConversationStore::new())
    }

    /// Build state around an existing store, e.g. one the CLI already filled.
    pub fn with_store(
        config: CarwiseConfig,
        orchestrator: ChatOrchestrator,
        store: ConversationStore,
    ) -> Self {
        Self {
            config: Arc::new(config),
            orchestrator: Arc::new(orchestrator),
            store: Arc::new(Mutex::new(store)),
            start_time: Instant::now(),
        }
    }

    pub fn lock_store(&self) -> Result<MutexGuard<'_, ConversationStore>, ApiError> {
        self.store
            .lock()
            .map_err(|e| ApiError::Internal(format!("conversation store lock poisoned: {}", e)))
    }
}
