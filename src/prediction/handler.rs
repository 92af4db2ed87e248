//! Submits the form and renders the outcome.

use std::sync::Arc;

use crate::api::{Backend, PredictionEnvelope, PredictionResult};
use crate::page::{ids, Page};
use crate::prediction::{PredictionError, PredictionForm, PREDICTING_LABEL, PREDICT_LABEL};

/// Handles one press of the predict trigger
pub struct PredictionHandler {
    backend: Arc<dyn Backend>,
}

impl PredictionHandler {
    pub fn new(backend: Arc<dyn Backend>) -> Self {
        Self { backend }
    }

    /// Validate the form on `page`, request a prediction and render it.
    ///
    /// Every failure ends in the error dialog. The trigger is disabled only
    /// while the request is in flight.
    pub async fn predict<P: Page + ?Sized>(
        &self,
        page: &mut P,
    ) -> Result<PredictionResult, PredictionError> {
        let form = PredictionForm::from_page(page);
        self.predict_form(page, &form).await
    }

    /// Like [`predict`](Self::predict), but the request is built from `form`
    /// rather than read back from the page's inputs
    pub async fn predict_form<P: Page + ?Sized>(
        &self,
        page: &mut P,
        form: &PredictionForm,
    ) -> Result<PredictionResult, PredictionError> {
        let request = match form.validate() {
            Ok(request) => request,
            Err(e) => {
                tracing::warn!("Prediction form incomplete");
                page.show_error(&e.to_string());
                return Err(e);
            }
        };

        tracing::info!(
            service_type = %request.service_type,
            ward = %request.ward,
            division = %request.division,
            "Requesting completion prediction"
        );

        page.batch(&mut |page| {
            page.set_disabled(ids::PREDICT_BUTTON, true);
            page.set_text(ids::PREDICT_BUTTON, None, PREDICTING_LABEL);
        });

        let outcome = self
            .backend
            .predict_completion(&request)
            .await
            .and_then(PredictionEnvelope::into_result)
            .map_err(PredictionError::from);

        match &outcome {
            Ok(result) => tracing::info!(
                probability = %result.completion_probability,
                prediction = %result.prediction,
                "Prediction received"
            ),
            Err(e) => tracing::error!(error = %e, "Prediction error"),
        }

        page.batch(&mut |page| {
            match &outcome {
                Ok(result) => display_prediction(page, result),
                Err(e) => page.show_error(&e.to_string()),
            }
            page.set_disabled(ids::PREDICT_BUTTON, false);
            page.set_text(ids::PREDICT_BUTTON, None, PREDICT_LABEL);
        });

        outcome
    }
}

/// Reveal the results panel and fill it from `result`
pub fn display_prediction<P: Page + ?Sized>(page: &mut P, result: &PredictionResult) {
    page.add_class(ids::PREDICTION_PLACEHOLDER, ids::HIDDEN_CLASS);
    page.remove_class(ids::PREDICTION_RESULTS, ids::HIDDEN_CLASS);

    page.set_text(
        ids::PROBABILITY_PERCENT,
        None,
        &format!("{}%", result.completion_probability),
    );
    page.set_text(ids::OUTCOME_VALUE, None, &result.prediction);
    page.set_text(ids::CONFIDENCE_VALUE, None, &format!("{}%", result.confidence));

    if let Some(factors) = &result.factors {
        page.replace_items(ids::INFLUENCING_FACTORS, factors);
    }
}
