//! Server State
//!
//! Shared state accessible by all page handlers.

use std::sync::Arc;
use std::time::Instant;

use crate::api::Backend;
use crate::dashboard::{AppState, DashboardLoader};
use crate::page::{Document, SharedDocument};
use crate::prediction::PredictionHandler;

/// Shared state for all handlers
#[derive(Clone)]
pub struct ServerState {
    /// The live page every handler reads and writes
    pub page: SharedDocument,
    /// Dashboard data loader
    pub loader: Arc<DashboardLoader>,
    /// Prediction form handler
    pub predictor: Arc<PredictionHandler>,
    /// Backend, for readiness checks
    pub backend: Arc<dyn Backend>,
    /// Server start time for uptime tracking
    pub start_time: Instant,
}

impl ServerState {
    /// Wire the components around `page`
    pub fn new(backend: Arc<dyn Backend>, page: Document) -> Self {
        let app_state = Arc::new(AppState::new());
        Self {
            page: SharedDocument::new(page),
            loader: Arc::new(DashboardLoader::new(Arc::clone(&backend), app_state)),
            predictor: Arc::new(PredictionHandler::new(Arc::clone(&backend))),
            backend,
            start_time: Instant::now(),
        }
    }

    /// Get server uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }

    /// Run one dashboard load against the live page
    pub async fn refresh(&self) {
        let mut page = self.page.clone();
        self.loader.load(&mut page).await;
    }
}
