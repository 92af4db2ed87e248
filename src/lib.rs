//! # Toronto 311
//!
//! Analytics dashboard for Toronto 311 service requests: headline KPIs,
//! seven Plotly charts fed by a statistics backend, and a form that asks a
//! model whether a request will be completed.
//!
//! ## Modules
//!
//! - [`api`]: Wire types and the HTTP client for the backend
//! - [`dashboard`]: KPI bootstrapping, chart specs and the data loader
//! - [`prediction`]: Prediction form validation and submission
//! - [`page`]: The element model the components write into, and its HTML rendering
//! - [`server`]: Axum server for the live page
//! - [`config`]: TOML configuration with environment overrides
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use toronto311::api::BackendClient;
//! use toronto311::config::BackendConfig;
//! use toronto311::dashboard::{bootstrap, AppState, DashboardLoader};
//! use toronto311::page::{html, Document};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let backend = Arc::new(BackendClient::new(&BackendConfig::default())?);
//!     let loader = DashboardLoader::new(backend, Arc::new(AppState::new()));
//!
//!     let mut page = Document::dashboard();
//!     bootstrap(&mut page);
//!     loader.load(&mut page).await;
//!
//!     std::fs::write("dashboard.html", html::render_page(&page))?;
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod config;
pub mod dashboard;
pub mod page;
pub mod prediction;
pub mod server;

// Re-export top-level types for convenience
pub use api::{ApiError, ApiResult, Backend, BackendClient, DashboardData, PredictionResult};

pub use config::Config;

pub use dashboard::{AppState, DashboardLoader, DashboardStatus};

pub use page::{Document, Page, SharedDocument};

pub use prediction::{PredictionError, PredictionForm, PredictionHandler};

pub use server::{build_router, serve, ServerError, ServerState};
