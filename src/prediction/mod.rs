//! Prediction Form Handler
//!
//! Reads the request form, validates the required fields, submits it to the
//! model endpoint and renders the result panel or the error dialog.

pub mod form;
pub mod handler;

pub use form::PredictionForm;
pub use handler::PredictionHandler;

use thiserror::Error;

use crate::api::ApiError;

/// Trigger label at rest
pub const PREDICT_LABEL: &str = "Predict Completion";

/// Trigger label while a prediction is in flight
pub const PREDICTING_LABEL: &str = "Predicting...";

/// Why a prediction produced no result
#[derive(Error, Debug)]
pub enum PredictionError {
    /// A required field was empty; the backend was not called
    #[error("Please fill in Service Type, Ward, and Division")]
    MissingFields,

    #[error("Prediction failed: {0}")]
    Api(#[from] ApiError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            PredictionError::MissingFields.to_string(),
            "Please fill in Service Type, Ward, and Division"
        );

        let err = PredictionError::from(ApiError::Rejected("Model not available".to_string()));
        assert_eq!(err.to_string(), "Prediction failed: Model not available");

        let err = PredictionError::from(ApiError::Http {
            status: 500,
            message: None,
        });
        assert_eq!(err.to_string(), "Prediction failed: HTTP error! status: 500");
    }
}
