//! Page Routes
//!
//! The browser sees a server-rendered page; each form on it posts here and is
//! redirected back to `/` once the component has updated the live page.
//!
//! - GET / - Current page as HTML
//! - POST /predict - Run the prediction handler with the submitted form
//! - POST /refresh - Run the dashboard loader
//! - POST /dismiss-error - Hide the error dialog

use axum::{
    extract::State,
    response::{Html, Redirect},
    Form,
};
use std::sync::Arc;

use crate::page::{html, Page};
use crate::prediction::PredictionForm;
use crate::server::state::ServerState;

/// GET /
pub async fn index(State(state): State<Arc<ServerState>>) -> Html<String> {
    Html(html::render_page(&state.page.snapshot()))
}

/// POST /predict
pub async fn predict(
    State(state): State<Arc<ServerState>>,
    Form(form): Form<PredictionForm>,
) -> Redirect {
    let mut page = state.page.clone();
    // Echo the inputs for display; the request is built from `form` itself
    form.fill(&mut page);

    // Success and failure both end up on the page
    let _ = state.predictor.predict_form(&mut page, &form).await;

    Redirect::to("/")
}

/// POST /refresh
pub async fn refresh(State(state): State<Arc<ServerState>>) -> Redirect {
    state.refresh().await;
    Redirect::to("/")
}

/// POST /dismiss-error
pub async fn dismiss_error(State(state): State<Arc<ServerState>>) -> Redirect {
    state.page.clone().hide_error();
    Redirect::to("/")
}
