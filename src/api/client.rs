//! Backend REST API Client
//!
//! HTTP client for the dashboard backend's REST API.

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;

use crate::api::dto::{
    CategoricalValuesEnvelope, DashboardEnvelope, ErrorEnvelope, HealthStatus,
    PredictionEnvelope, PredictionRequest,
};
use crate::api::error::{ApiError, ApiResult};
use crate::api::Backend;
use crate::config::BackendConfig;

/// Backend endpoint paths, relative to the configured base URL
pub mod endpoints {
    pub const DASHBOARD_DATA: &str = "/dashboard-data";
    pub const PREDICT_COMPLETION: &str = "/predict-completion";
    pub const CATEGORICAL_VALUES: &str = "/categorical-values";
    pub const HEALTH: &str = "/health";
}

/// reqwest-backed implementation of [`Backend`]
pub struct BackendClient {
    client: Client,
    base_url: String,
}

impl BackendClient {
    /// Create a new client with the given configuration
    pub fn new(config: &BackendConfig) -> ApiResult<Self> {
        let mut builder = Client::builder();
        if let Some(secs) = config.request_timeout_secs {
            builder = builder.timeout(std::time::Duration::from_secs(secs));
        }
        let client = builder
            .build()
            .map_err(|e| ApiError::Client(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.normalized_base_url().to_string(),
        })
    }

    /// Base URL the endpoints are resolved against
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        let url = self.url(path);
        tracing::debug!(url = %url, "GET");

        let response = self.client.get(&url).send().await?;
        decode(response).await
    }
}

/// Map a response to its JSON body, turning non-2xx into [`ApiError::Http`]
async fn decode<T: DeserializeOwned>(response: Response) -> ApiResult<T> {
    let status = response.status();

    if !status.is_success() {
        let text = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorEnvelope>(&text)
            .ok()
            .and_then(|body| body.message);
        return Err(ApiError::Http {
            status: status.as_u16(),
            message,
        });
    }

    let bytes = response.bytes().await?;
    Ok(serde_json::from_slice(&bytes)?)
}

#[async_trait]
impl Backend for BackendClient {
    async fn dashboard_data(&self) -> ApiResult<DashboardEnvelope> {
        self.get_json(endpoints::DASHBOARD_DATA).await
    }

    async fn predict_completion(
        &self,
        request: &PredictionRequest,
    ) -> ApiResult<PredictionEnvelope> {
        let url = self.url(endpoints::PREDICT_COMPLETION);
        tracing::debug!(url = %url, "POST");

        let response = self.client.post(&url).json(request).send().await?;
        decode(response).await
    }

    async fn categorical_values(&self) -> ApiResult<CategoricalValuesEnvelope> {
        self.get_json(endpoints::CATEGORICAL_VALUES).await
    }

    async fn health(&self) -> ApiResult<HealthStatus> {
        self.get_json(endpoints::HEALTH).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        http::StatusCode,
        routing::{get, post},
        Json, Router,
    };
    use serde_json::{json, Value};

    /// Spawn a stand-in backend on an ephemeral port and return its base URL
    async fn spawn_backend(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}/api", addr)
    }

    fn client_for(base_url: &str) -> BackendClient {
        BackendClient::new(&BackendConfig::new(base_url)).unwrap()
    }

    #[test]
    fn test_trailing_slash_is_trimmed() {
        let client = client_for("http://localhost:5000/api/");
        assert_eq!(client.base_url(), "http://localhost:5000/api");
        assert_eq!(
            client.url(endpoints::DASHBOARD_DATA),
            "http://localhost:5000/api/dashboard-data"
        );
    }

    #[tokio::test]
    async fn test_dashboard_data_success() {
        let router = Router::new().route(
            "/api/dashboard-data",
            get(|| async {
                Json(json!({
                    "status": "success",
                    "data": {"ward_distribution": {"wards": ["A", "B"], "counts": [10, 5]}},
                    "last_updated": "2025-01-15T09:30:00"
                }))
            }),
        );
        let client = client_for(&spawn_backend(router).await);

        let envelope = client.dashboard_data().await.unwrap();
        assert_eq!(envelope.status, "success");
        assert!(envelope.data.unwrap().ward_distribution.is_some());
    }

    #[tokio::test]
    async fn test_non_success_status_carries_backend_message() {
        let router = Router::new().route(
            "/api/predict-completion",
            post(|Json(body): Json<Value>| async move {
                assert_eq!(body["service_type"], "Pothole");
                (
                    StatusCode::BAD_REQUEST,
                    Json(json!({"status": "error", "message": "Missing required fields: ward"})),
                )
            }),
        );
        let client = client_for(&spawn_backend(router).await);

        let request = PredictionRequest {
            service_type: "Pothole".to_string(),
            ..Default::default()
        };
        let err = client.predict_completion(&request).await.unwrap_err();
        match err {
            ApiError::Http { status, message } => {
                assert_eq!(status, 400);
                assert_eq!(message.as_deref(), Some("Missing required fields: ward"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_non_json_body_is_decode_error() {
        let router = Router::new().route("/api/health", get(|| async { "<html>oops</html>" }));
        let client = client_for(&spawn_backend(router).await);

        let err = client.health().await.unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_network_error() {
        // Bind then drop to get a port nothing listens on
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = client_for(&format!("http://{}/api", addr));
        let err = client.dashboard_data().await.unwrap_err();
        assert!(matches!(err, ApiError::Network(_)));
    }
}
