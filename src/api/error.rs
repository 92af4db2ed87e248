//! API Error Types
//!
//! Errors raised while talking to the dashboard backend. Every variant is
//! recoverable: the loader turns them into placeholders and the prediction
//! handler turns them into an error dialog.

use thiserror::Error;

/// Backend API error types
#[derive(Error, Debug)]
pub enum ApiError {
    /// The request never produced a response (connection refused, DNS, timeout)
    #[error("Network error: {0}")]
    Network(#[source] reqwest::Error),

    /// The backend answered with a non-2xx status.
    ///
    /// Displays the `message` from the error body when the backend sent one,
    /// and `HTTP error! status: N` only when it did not.
    #[error("{}", http_message(.status, .message))]
    Http { status: u16, message: Option<String> },

    /// The response body was not the expected JSON shape
    #[error("Invalid response: {0}")]
    Decode(String),

    /// The envelope parsed but its status was not "success"
    #[error("{0}")]
    Rejected(String),

    /// The HTTP client could not be constructed
    #[error("HTTP client error: {0}")]
    Client(String),
}

fn http_message(status: &u16, message: &Option<String>) -> String {
    match message {
        Some(message) => message.clone(),
        None => format!("HTTP error! status: {}", status),
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            ApiError::Decode(e.to_string())
        } else {
            ApiError::Network(e)
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        ApiError::Decode(e.to_string())
    }
}

/// Result type for backend API calls
pub type ApiResult<T> = Result<T, ApiError>;
