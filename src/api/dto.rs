//! Data Transfer Objects
//!
//! Request and response types exchanged with the dashboard backend.
//! These types are serialized/deserialized to/from JSON.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::api::error::ApiError;

/// Envelope status value marking a successful response
pub const STATUS_SUCCESS: &str = "success";

// ============================================
// DASHBOARD DTOs
// ============================================

/// GET /dashboard-data response envelope
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DashboardEnvelope {
    /// "success" or an error marker
    pub status: String,
    #[serde(default)]
    pub data: Option<DashboardData>,
    /// ISO-8601 generation time of the aggregates
    #[serde(default)]
    pub last_updated: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl DashboardEnvelope {
    /// Accept the envelope only when the backend reported success with data
    pub fn into_result(self) -> Result<(DashboardData, Option<String>), ApiError> {
        if self.status != STATUS_SUCCESS {
            return Err(ApiError::Rejected(
                self.message
                    .unwrap_or_else(|| "Failed to load data".to_string()),
            ));
        }

        match self.data {
            Some(data) => Ok((data, self.last_updated)),
            None => Err(ApiError::Rejected(
                "Dashboard response carried no data".to_string(),
            )),
        }
    }
}

/// Aggregate statistics grouped by chart topic; every group is optional
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct DashboardData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_series: Option<TimeSeries>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ward_distribution: Option<WardDistribution>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_distribution: Option<StatusDistribution>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_types: Option<ServiceTypes>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub division_distribution: Option<DivisionDistribution>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hourly_pattern: Option<HourlyPattern>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feature_importance: Option<FeatureImportance>,
}

/// Daily request counts
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct TimeSeries {
    pub dates: Vec<String>,
    pub counts: Vec<f64>,
}

/// Request counts per ward
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct WardDistribution {
    pub wards: Vec<String>,
    pub counts: Vec<f64>,
}

/// Request counts per status
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct StatusDistribution {
    pub statuses: Vec<String>,
    pub counts: Vec<f64>,
}

/// Request counts per service request type
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct ServiceTypes {
    pub types: Vec<String>,
    pub counts: Vec<f64>,
}

/// Request counts per division
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct DivisionDistribution {
    pub divisions: Vec<String>,
    pub counts: Vec<f64>,
}

/// Request counts per hour of day
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct HourlyPattern {
    pub hours: Vec<u32>,
    pub counts: Vec<f64>,
}

/// Model feature importance scores
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct FeatureImportance {
    pub features: Vec<String>,
    pub importance: Vec<f64>,
}

// ============================================
// PREDICTION DTOs
// ============================================

/// POST /predict-completion request body
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct PredictionRequest {
    pub service_type: String,
    pub ward: String,
    pub division: String,
    #[serde(default)]
    pub postal_code: String,
    #[serde(default)]
    pub time_of_day: String,
    #[serde(default)]
    pub day_of_week: String,
}

/// POST /predict-completion response envelope
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PredictionEnvelope {
    pub status: String,
    #[serde(default)]
    pub prediction: Option<PredictionResult>,
    #[serde(default)]
    pub message: Option<String>,
}

impl PredictionEnvelope {
    /// Accept the envelope only when the backend reported success with a prediction
    pub fn into_result(self) -> Result<PredictionResult, ApiError> {
        if self.status != STATUS_SUCCESS {
            return Err(ApiError::Rejected(
                self.message.unwrap_or_else(|| "Prediction failed".to_string()),
            ));
        }

        self.prediction.ok_or_else(|| {
            ApiError::Rejected("Prediction response carried no prediction".to_string())
        })
    }
}

/// Model output for one submitted form
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct PredictionResult {
    /// Completion probability in percent
    pub completion_probability: Percentage,
    /// Predicted outcome label, e.g. "Completed"
    pub prediction: String,
    /// Model confidence in percent
    pub confidence: Percentage,
    #[serde(default)]
    pub factors: Option<Vec<String>>,
}

/// A percentage as the backend sends it: a JSON number, or text already
/// formatted to one decimal place (`"72.0"`)
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum Percentage {
    Number(f64),
    Text(String),
}

impl Percentage {
    /// Numeric value, if the text form parses
    pub fn value(&self) -> Option<f64> {
        match self {
            Percentage::Number(n) => Some(*n),
            Percentage::Text(s) => s.trim().parse().ok(),
        }
    }
}

impl fmt::Display for Percentage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Percentage::Number(n) => write!(f, "{}", n),
            Percentage::Text(s) => f.write_str(s),
        }
    }
}

// ============================================
// SUPPORTING DTOs
// ============================================

/// GET /health response
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub chart_data_available: bool,
    #[serde(default)]
    pub ml_model_available: bool,
    #[serde(default)]
    pub message: Option<String>,
}

/// GET /categorical-values response envelope
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CategoricalValuesEnvelope {
    pub status: String,
    #[serde(default)]
    pub data: BTreeMap<String, Vec<String>>,
    #[serde(default)]
    pub message: Option<String>,
}

impl CategoricalValuesEnvelope {
    pub fn into_result(self) -> Result<BTreeMap<String, Vec<String>>, ApiError> {
        if self.status == STATUS_SUCCESS {
            Ok(self.data)
        } else {
            Err(ApiError::Rejected(
                self.message.unwrap_or_else(|| "Data not available".to_string()),
            ))
        }
    }
}

/// Error body the backend attaches to non-2xx responses
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorEnvelope {
    #[serde(default)]
    pub message: Option<String>,
}
