//! KPI Bootstrapper
//!
//! Writes the compiled-in headline figures into the page once its structure
//! exists. These values come from an offline analysis run, not the backend.

use chrono::{DateTime, Local, TimeZone};

use crate::dashboard::loader::{format_locale, DATA_STATUS_LOADED};
use crate::page::{ids, Page};

/// One compiled-in slot assignment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KpiSlot {
    pub element_id: &'static str,
    /// Child selector the text is scoped to, if any
    pub selector: Option<&'static str>,
    pub value: &'static str,
}

const fn card(element_id: &'static str, value: &'static str) -> KpiSlot {
    KpiSlot {
        element_id,
        selector: Some(ids::KPI_VALUE_SELECTOR),
        value,
    }
}

const fn plain(element_id: &'static str, value: &'static str) -> KpiSlot {
    KpiSlot {
        element_id,
        selector: None,
        value,
    }
}

/// Headline KPI cards
pub const KPI_CARDS: [KpiSlot; 4] = [
    card(ids::TOTAL_REQUESTS, "202,600"),
    card(ids::COMPLETION_RATE, "77.5"),
    card(ids::TOP_WARD, "Toronto Danforth"),
    card(ids::TOP_SERVICE_TYPE, "Sidewalk Snow Clearing"),
];

/// Model quality metrics
pub const MODEL_METRICS: [KpiSlot; 4] = [
    plain(ids::ML_ACCURACY, "84%"),
    plain(ids::ML_PRECISION, "82%"),
    plain(ids::ML_RECALL, "84%"),
    plain(ids::ML_F1_SCORE, "84%"),
];

/// Best-performing categories
pub const BEST_PERFORMERS: [KpiSlot; 3] = [
    plain(ids::BEST_SERVICE_TYPE, "Dealing With FireWorks"),
    plain(ids::BEST_WARD, "Etobicoke Centre(02) (85.3%)"),
    plain(ids::BEST_DIVISION, "Transportation Services(01) (86.2%)"),
];

/// Every compiled-in assignment, in write order
pub fn kpi_table() -> impl Iterator<Item = &'static KpiSlot> {
    KPI_CARDS
        .iter()
        .chain(MODEL_METRICS.iter())
        .chain(BEST_PERFORMERS.iter())
}

/// Write the KPI table and the initial status into the page
pub fn bootstrap<P: Page + ?Sized>(page: &mut P) {
    bootstrap_at(page, &Local::now());
}

/// [`bootstrap`] with an explicit "now" for the initial timestamp
pub fn bootstrap_at<P, Tz>(page: &mut P, now: &DateTime<Tz>)
where
    P: Page + ?Sized,
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    tracing::info!("Setting hardcoded KPI values");

    let mut written = 0;
    for slot in kpi_table() {
        if page.set_text(slot.element_id, slot.selector, slot.value) {
            written += 1;
        }
    }

    page.set_text(ids::DATA_STATUS, None, DATA_STATUS_LOADED);
    page.set_text(
        ids::LAST_UPDATED,
        None,
        &format!("Last updated: {}", format_locale(now)),
    );

    tracing::info!(written, "KPI values set");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::Document;
    use chrono::Utc;

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 15, 14, 5, 9).unwrap()
    }

    #[test]
    fn test_table_sizes() {
        assert_eq!(kpi_table().count(), 11);
        assert!(kpi_table().all(|slot| !slot.value.is_empty()));
    }

    #[test]
    fn test_bootstrap_fills_page() {
        let mut doc = Document::dashboard();
        bootstrap_at(&mut doc, &fixed_now());

        assert_eq!(
            doc.selected_text(ids::TOTAL_REQUESTS, ".kpi-value"),
            Some("202,600")
        );
        assert_eq!(
            doc.selected_text(ids::TOP_SERVICE_TYPE, ".kpi-value"),
            Some("Sidewalk Snow Clearing")
        );
        assert_eq!(doc.text(ids::ML_PRECISION), Some("82%"));
        assert_eq!(
            doc.text(ids::BEST_DIVISION),
            Some("Transportation Services(01) (86.2%)")
        );
        assert_eq!(doc.text(ids::DATA_STATUS), Some("Dashboard Loaded"));
        assert_eq!(
            doc.text(ids::LAST_UPDATED),
            Some("Last updated: 1/15/2025, 2:05:09 PM")
        );
    }

    #[test]
    fn test_bootstrap_tolerates_missing_elements() {
        let mut doc = Document::new();
        bootstrap_at(&mut doc, &fixed_now());
        assert_eq!(doc, Document::new());

        let mut doc = Document::dashboard();
        doc.remove(ids::TOP_WARD);
        doc.remove(ids::ML_RECALL);
        bootstrap_at(&mut doc, &fixed_now());
        assert_eq!(doc.text(ids::ML_ACCURACY), Some("84%"));
        assert!(doc.element(ids::TOP_WARD).is_none());
    }
}
