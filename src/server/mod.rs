//! Dashboard Server
//!
//! Serves the live dashboard page, built with Axum.
//!
//! # Endpoints
//!
//! ## Page
//! - `GET /` - The dashboard as HTML
//! - `POST /predict` - Submit the prediction form
//! - `POST /refresh` - Reload dashboard data from the backend
//! - `POST /dismiss-error` - Close the error dialog
//!
//! ## Health
//! - `GET /health/live` - Liveness probe
//! - `GET /health/ready` - Readiness probe
//! - `GET /health` - Full health status
//!
//! # Example
//!
//! ```rust,ignore
//! use toronto311::api::BackendClient;
//! use toronto311::config::Config;
//! use toronto311::page::Document;
//! use toronto311::server::{serve, ServerState};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load_default();
//!     let backend = Arc::new(BackendClient::new(&config.backend)?);
//!
//!     let state = ServerState::new(backend, Document::dashboard());
//!     serve(state, &config.server).await?;
//!
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod routes;
pub mod state;

pub use error::{ServerError, ServerResult};
pub use state::ServerState;

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;

/// Build the router with all routes and middleware
pub fn build_router(state: ServerState) -> Router {
    let health_routes = Router::new()
        .route("/live", get(routes::health::liveness))
        .route("/ready", get(routes::health::readiness))
        .route("/", get(routes::health::full_health));

    let shared_state = Arc::new(state);

    Router::new()
        .route("/", get(routes::page::index))
        .route("/predict", post(routes::page::predict))
        .route("/refresh", post(routes::page::refresh))
        .route("/dismiss-error", post(routes::page::dismiss_error))
        .nest("/health", health_routes)
        .layer(TraceLayer::new_for_http())
        .with_state(shared_state)
}

/// Start the dashboard server
pub async fn serve(state: ServerState, config: &ServerConfig) -> ServerResult<()> {
    let router = build_router(state);

    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Toronto 311 dashboard listening on http://{}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ServerError::Internal(format!("Server error: {}", e)))?;

    tracing::info!("Dashboard server shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install signal handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::testing::FakeBackend;
    use crate::page::{ids, Content, Document, Page};
    use axum::{
        body::Body,
        http::{header, Request, StatusCode},
    };
    use serde_json::json;
    use tower::util::ServiceExt;

    fn create_test_state(backend: FakeBackend) -> (ServerState, Arc<FakeBackend>) {
        let backend = Arc::new(backend);
        let state = ServerState::new(backend.clone(), Document::dashboard());
        (state, backend)
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn post_form(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_string(response: axum::response::Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_health_live() {
        let (state, _) = create_test_state(FakeBackend::new());
        let response = build_router(state).oneshot(get("/health/live")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_health_ready_without_backend() {
        let (state, _) = create_test_state(FakeBackend::new());
        let response = build_router(state).oneshot(get("/health/ready")).await.unwrap();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

        let body: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(body["error"]["code"], "BACKEND_UNAVAILABLE");
        assert!(body["request_id"].is_string());
    }

    #[tokio::test]
    async fn test_full_health_reports_unhealthy() {
        let (state, _) = create_test_state(FakeBackend::new());
        let response = build_router(state).oneshot(get("/health")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(body["status"], "unhealthy");
        assert_eq!(body["dashboard_loaded"], false);
    }

    #[tokio::test]
    async fn test_index_renders_page() {
        let (state, _) = create_test_state(FakeBackend::new());
        let response = build_router(state).oneshot(get("/")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let html = body_string(response).await;
        assert!(html.contains("Toronto 311 Service Requests Dashboard"));
        assert!(html.contains(r#"id="predictButton""#));
    }

    #[tokio::test]
    async fn test_predict_with_missing_field_shows_error() {
        let (state, backend) = create_test_state(FakeBackend::new());
        let page = state.page.clone();

        let response = build_router(state)
            .oneshot(post_form("/predict", "service_type=Pothole&ward=&division=Roads"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[header::LOCATION], "/");
        assert_eq!(backend.prediction_calls(), 0);

        let doc = page.snapshot();
        assert_eq!(
            doc.text(ids::ERROR_MESSAGE),
            Some("Please fill in Service Type, Ward, and Division")
        );
        assert!(!doc.has_class(ids::ERROR_MODAL, ids::HIDDEN_CLASS));
    }

    #[tokio::test]
    async fn test_predict_renders_result() {
        let (state, backend) = create_test_state(FakeBackend::new().with_prediction(Ok(json!({
            "status": "success",
            "prediction": {
                "completion_probability": 72,
                "prediction": "Completed",
                "confidence": 65,
                "factors": ["Ward 1", "Pothole"]
            }
        }))));
        let page = state.page.clone();

        let response = build_router(state)
            .oneshot(post_form(
                "/predict",
                "service_type=Pothole&ward=Ward+1&division=Roads&postal_code=&time_of_day=&day_of_week=",
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(backend.prediction_calls(), 1);
        assert_eq!(backend.requests.lock().unwrap()[0].ward, "Ward 1");

        let doc = page.snapshot();
        assert_eq!(doc.text(ids::PROBABILITY_PERCENT), Some("72%"));
        assert_eq!(doc.value(ids::WARD_INPUT).as_deref(), Some("Ward 1"));
        assert!(!doc.is_disabled(ids::PREDICT_BUTTON));
    }

    #[tokio::test]
    async fn test_refresh_and_dismiss() {
        let (state, backend) = create_test_state(FakeBackend::new());
        let page = state.page.clone();
        let router = build_router(state);

        let response = router
            .clone()
            .oneshot(post_form("/refresh", ""))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            backend
                .dashboard_calls
                .load(std::sync::atomic::Ordering::SeqCst),
            1
        );
        assert!(matches!(
            page.snapshot().content(ids::WARD_CHART),
            Some(Content::Placeholder(_))
        ));

        page.clone().show_error("boom");
        let response = router
            .oneshot(post_form("/dismiss-error", ""))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert!(page.snapshot().has_class(ids::ERROR_MODAL, ids::HIDDEN_CLASS));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_predicts_send_their_own_form() {
        let (state, backend) = create_test_state(FakeBackend::new());
        let router = build_router(state);

        let tasks: Vec<_> = (0..100)
            .map(|i| {
                let router = router.clone();
                tokio::spawn(async move {
                    router
                        .oneshot(post_form(
                            "/predict",
                            &format!("service_type=Pothole&ward=W{}&division=Roads", i),
                        ))
                        .await
                        .unwrap()
                        .status()
                })
            })
            .collect();

        for task in tasks {
            assert_eq!(task.await.unwrap(), StatusCode::SEE_OTHER);
        }

        let sent = backend.requests.lock().unwrap();
        let wards: std::collections::BTreeSet<_> = sent.iter().map(|r| r.ward.clone()).collect();
        assert_eq!(sent.len(), 100);
        assert_eq!(wards.len(), 100);
        assert!(sent.iter().all(|r| r.service_type == "Pothole" && r.division == "Roads"));
    }
}
