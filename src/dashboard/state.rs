//! Application State
//!
//! Holds the most recently loaded dashboard data. Written only by the
//! loader; read by the loader's own rendering continuation.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::RwLock;

use crate::api::DashboardData;

/// Shared application state
#[derive(Debug, Default)]
pub struct AppState {
    dashboard: RwLock<Option<DashboardData>>,
    connected: AtomicBool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of the current dashboard data, if a load has succeeded
    pub fn dashboard(&self) -> Option<DashboardData> {
        self.dashboard
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Replace the current data wholesale after a successful load
    pub fn replace_dashboard(&self, data: DashboardData) {
        *self
            .dashboard
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(data);
        self.connected.store(true, Ordering::SeqCst);
    }

    /// Forget the data after a failed load
    pub fn clear(&self) {
        *self
            .dashboard
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = None;
        self.connected.store(false, Ordering::SeqCst);
    }

    /// Whether the last load reached the backend successfully
    pub fn is_connected(&self) -> bool {
        self.connected.load(Ordering::SeqCst)
    }
}
