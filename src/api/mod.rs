//! Dashboard Backend API
//!
//! Wire types and the client for the backend that serves precomputed
//! aggregates and model predictions.
//!
//! # Endpoints consumed
//!
//! - `GET /dashboard-data` - Aggregate statistics for the charts
//! - `POST /predict-completion` - Completion prediction for one request
//! - `GET /categorical-values` - Allowed values for the form fields
//! - `GET /health` - Backend readiness

pub mod client;
pub mod dto;
pub mod error;

pub use client::BackendClient;
pub use dto::{
    DashboardData, DashboardEnvelope, HealthStatus, Percentage, PredictionEnvelope,
    PredictionRequest, PredictionResult,
};
pub use error::{ApiError, ApiResult};

use async_trait::async_trait;

use crate::api::dto::CategoricalValuesEnvelope;

/// Default API base URL
pub const DEFAULT_API_BASE: &str = "http://localhost:5000/api";

/// The dashboard backend as seen by the page components
#[async_trait]
pub trait Backend: Send + Sync {
    /// Fetch the aggregate statistics envelope
    async fn dashboard_data(&self) -> ApiResult<DashboardEnvelope>;

    /// Submit one prediction form
    async fn predict_completion(&self, request: &PredictionRequest)
        -> ApiResult<PredictionEnvelope>;

    /// Fetch allowed values for the categorical form fields
    async fn categorical_values(&self) -> ApiResult<CategoricalValuesEnvelope>;

    /// Check backend readiness
    async fn health(&self) -> ApiResult<HealthStatus>;
}
