//! Request form fields and their validation.

use serde::Deserialize;

use crate::api::PredictionRequest;
use crate::page::{ids, Page};
use crate::prediction::PredictionError;

/// The six form fields, as read from the page or submitted by a browser
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PredictionForm {
    pub service_type: String,
    pub ward: String,
    pub division: String,
    pub postal_code: String,
    pub time_of_day: String,
    pub day_of_week: String,
}

impl PredictionForm {
    /// Read the current input values; missing inputs read as empty
    pub fn from_page<P: Page + ?Sized>(page: &P) -> Self {
        let read = |id: &str| page.value(id).unwrap_or_default();
        Self {
            service_type: read(ids::SERVICE_TYPE_INPUT),
            ward: read(ids::WARD_INPUT),
            division: read(ids::DIVISION_INPUT),
            postal_code: read(ids::POSTAL_CODE_INPUT),
            time_of_day: read(ids::TIME_OF_DAY_INPUT),
            day_of_week: read(ids::DAY_OF_WEEK_INPUT),
        }
    }

    /// Type these values into the page's inputs
    pub fn fill<P: Page + ?Sized>(&self, page: &mut P) {
        page.set_value(ids::SERVICE_TYPE_INPUT, &self.service_type);
        page.set_value(ids::WARD_INPUT, &self.ward);
        page.set_value(ids::DIVISION_INPUT, &self.division);
        page.set_value(ids::POSTAL_CODE_INPUT, &self.postal_code);
        page.set_value(ids::TIME_OF_DAY_INPUT, &self.time_of_day);
        page.set_value(ids::DAY_OF_WEEK_INPUT, &self.day_of_week);
    }

    /// Trim every field and require service type, ward and division
    pub fn validate(&self) -> Result<PredictionRequest, PredictionError> {
        let request = PredictionRequest {
            service_type: self.service_type.trim().to_string(),
            ward: self.ward.trim().to_string(),
            division: self.division.trim().to_string(),
            postal_code: self.postal_code.trim().to_string(),
            time_of_day: self.time_of_day.trim().to_string(),
            day_of_week: self.day_of_week.trim().to_string(),
        };

        if request.service_type.is_empty() || request.ward.is_empty() || request.division.is_empty()
        {
            return Err(PredictionError::MissingFields);
        }

        Ok(request)
    }
}
