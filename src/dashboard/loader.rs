//! Dashboard Data Loader
//!
//! Fetches the aggregate statistics, reduces the outcome to a
//! [`DashboardStatus`], and applies it to the page. Each call re-derives the
//! whole dashboard from its own response; nothing is retried or cached.

use std::fmt::Display;
use std::sync::Arc;

use chrono::{DateTime, Local, NaiveDateTime, TimeZone};

use crate::api::{ApiResult, Backend, DashboardData, DashboardEnvelope};
use crate::dashboard::charts::{ChartRegion, Placeholder};
use crate::dashboard::state::AppState;
use crate::page::{ids, Page};

pub const DATA_STATUS_LOADED: &str = "Dashboard Loaded";
pub const DATA_STATUS_CONNECTED: &str = "Connected to Backend";
pub const DATA_STATUS_UNAVAILABLE: &str = "Backend Not Available";

const LOCALE_FORMAT: &str = "%-m/%-d/%Y, %-I:%M:%S %p";

/// Outcome of one dashboard load
#[derive(Debug, Clone, PartialEq)]
pub enum DashboardStatus {
    /// The backend answered with data
    Connected {
        data: DashboardData,
        last_updated: Option<String>,
    },
    /// Transport failure, non-2xx, malformed body or non-success status
    Unavailable { reason: String },
}

impl DashboardStatus {
    pub fn from_response(response: ApiResult<DashboardEnvelope>) -> Self {
        match response.and_then(DashboardEnvelope::into_result) {
            Ok((data, last_updated)) => DashboardStatus::Connected { data, last_updated },
            Err(e) => DashboardStatus::Unavailable {
                reason: e.to_string(),
            },
        }
    }

    pub fn is_connected(&self) -> bool {
        matches!(self, DashboardStatus::Connected { .. })
    }
}

/// Loads dashboard data into a page
pub struct DashboardLoader {
    backend: Arc<dyn Backend>,
    state: Arc<AppState>,
}

impl DashboardLoader {
    pub fn new(backend: Arc<dyn Backend>, state: Arc<AppState>) -> Self {
        Self { backend, state }
    }

    pub fn state(&self) -> &Arc<AppState> {
        &self.state
    }

    /// Fetch the dashboard data and render it, or the placeholders, into `page`
    pub async fn load<P: Page + ?Sized>(&self, page: &mut P) -> DashboardStatus {
        tracing::info!("Loading dashboard data from backend");
        page.add_class(ids::LOADING_OVERLAY, ids::ACTIVE_CLASS);

        let status = DashboardStatus::from_response(self.backend.dashboard_data().await);

        match &status {
            DashboardStatus::Connected { data, .. } => {
                tracing::info!("Dashboard data loaded from backend");
                self.state.replace_dashboard(data.clone());
            }
            DashboardStatus::Unavailable { reason } => {
                tracing::error!(reason = %reason, "Backend not available");
                self.state.clear();
            }
        }

        page.batch(&mut |page| {
            render_dashboard(page, &status);
            populate_search_lists(page, &self.state);
            page.remove_class(ids::LOADING_OVERLAY, ids::ACTIVE_CLASS);
        });

        status
    }
}

/// Apply a load outcome to the page using the local time zone
pub fn render_dashboard<P: Page + ?Sized>(page: &mut P, status: &DashboardStatus) {
    render_dashboard_in(page, status, &Local);
}

/// Apply a load outcome to the page.
///
/// Connected: every region whose group is present gets its chart; regions
/// without a group are left untouched. Unavailable: every region gets the
/// placeholder. Regions with no container are skipped either way.
pub fn render_dashboard_in<P, Tz>(page: &mut P, status: &DashboardStatus, tz: &Tz)
where
    P: Page + ?Sized,
    Tz: TimeZone,
    Tz::Offset: Display,
{
    match status {
        DashboardStatus::Connected { data, last_updated } => {
            for region in ChartRegion::ALL {
                let id = region.element_id();
                if !page.contains(id) {
                    tracing::error!(chart = id, "Chart container not found");
                    continue;
                }
                if let Some(spec) = region.plot(data) {
                    tracing::debug!(chart = id, "Rendering chart");
                    page.plot(id, &spec);
                }
            }

            page.set_text(ids::DATA_STATUS, None, DATA_STATUS_CONNECTED);
            if let Some(raw) = last_updated {
                page.set_text(
                    ids::LAST_UPDATED,
                    None,
                    &format!("Last updated: {}", format_last_updated(raw, tz)),
                );
            }
        }
        DashboardStatus::Unavailable { .. } => {
            tracing::info!("Showing chart placeholders");
            for region in ChartRegion::ALL {
                page.show_placeholder(region.element_id(), &Placeholder::BACKEND_UNAVAILABLE);
            }
            page.set_text(ids::DATA_STATUS, None, DATA_STATUS_UNAVAILABLE);
        }
    }
}

/// Fill the form's suggestion lists from the loaded data
pub fn populate_search_lists<P: Page + ?Sized>(page: &mut P, state: &AppState) {
    let Some(data) = state.dashboard() else {
        return;
    };

    if let Some(group) = &data.service_types {
        page.replace_options(ids::SERVICE_TYPE_LIST, &group.types);
    }
    if let Some(group) = &data.ward_distribution {
        page.replace_options(ids::WARD_LIST, &group.wards);
    }
    if let Some(group) = &data.division_distribution {
        page.replace_options(ids::DIVISION_LIST, &group.divisions);
    }
}

/// Locale-style date-time, e.g. `1/15/2025, 2:05:09 PM`
pub fn format_locale<Tz>(dt: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    dt.format(LOCALE_FORMAT).to_string()
}

/// Format the backend's ISO-8601 timestamp for display.
///
/// Offset-carrying values are shown in `tz`; naive values are shown as
/// written. Unparseable values are shown raw.
pub fn format_last_updated<Tz>(raw: &str, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return format_locale(&dt.with_timezone(tz));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return naive.format(LOCALE_FORMAT).to_string();
    }
    raw.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::testing::FakeBackend;
    use crate::api::ApiError;
    use crate::dashboard::plot::PlotSpec;
    use crate::page::{Content, Document, SharedDocument};
    use chrono::Utc;
    use serde_json::json;

    fn loader(backend: FakeBackend) -> DashboardLoader {
        DashboardLoader::new(Arc::new(backend), Arc::new(AppState::new()))
    }

    fn full_payload() -> serde_json::Value {
        json!({
            "status": "success",
            "last_updated": "2025-01-15T09:30:00",
            "data": {
                "time_series": {"dates": ["2025-01-14", "2025-01-15"], "counts": [410, 388]},
                "ward_distribution": {"wards": ["Ward 1", "Ward 2"], "counts": [10, 5]},
                "status_distribution": {"statuses": ["Completed", "Cancelled"], "counts": [80, 20]},
                "service_types": {"types": ["Pothole", "Graffiti"], "counts": [30, 12]},
                "division_distribution": {"divisions": ["Solid Waste", "Transportation"], "counts": [50, 40]},
                "hourly_pattern": {"hours": [0, 1], "counts": [2, 3]},
                "feature_importance": {"features": ["ward", "hour"], "importance": [0.6, 0.4]}
            }
        })
    }

    fn plotted(doc: &Document, id: &str) -> bool {
        matches!(doc.content(id), Some(Content::Plot(_)))
    }

    fn placeholder(doc: &Document, id: &str) -> bool {
        matches!(doc.content(id), Some(Content::Placeholder(_)))
    }

    #[tokio::test]
    async fn test_full_load_renders_everything() {
        let loader = loader(FakeBackend::new().with_dashboard(Ok(full_payload())));
        let mut doc = Document::dashboard();

        let status = loader.load(&mut doc).await;

        assert!(status.is_connected());
        for region in ChartRegion::ALL {
            assert!(plotted(&doc, region.element_id()), "{:?}", region);
        }
        assert_eq!(
            doc.content(ids::SERVICE_TYPE_LIST),
            Some(&Content::Options(vec!["Pothole".to_string(), "Graffiti".to_string()]))
        );
        assert_eq!(doc.text(ids::DATA_STATUS), Some(DATA_STATUS_CONNECTED));
        assert!(doc.text(ids::LAST_UPDATED).unwrap().starts_with("Last updated: 1/15/2025"));
        assert!(!doc.has_class(ids::LOADING_OVERLAY, ids::ACTIVE_CLASS));
        assert!(loader.state().is_connected());
        assert!(loader.state().dashboard().unwrap().hourly_pattern.is_some());
    }

    #[tokio::test]
    async fn test_ward_only_load() {
        let loader = loader(FakeBackend::new().with_dashboard(Ok(json!({
            "status": "success",
            "data": {"ward_distribution": {"wards": ["A", "B"], "counts": [10, 5]}},
            "last_updated": "2025-01-15T09:30:00"
        }))));
        let mut doc = Document::dashboard();

        loader.load(&mut doc).await;

        assert!(plotted(&doc, ids::WARD_CHART));
        for region in ChartRegion::ALL {
            if region != ChartRegion::Ward {
                assert_eq!(
                    doc.content(region.element_id()),
                    Some(&Content::Empty),
                    "{:?}",
                    region
                );
            }
        }
        assert_eq!(
            doc.content(ids::WARD_LIST),
            Some(&Content::Options(vec!["A".to_string(), "B".to_string()]))
        );
        assert_eq!(doc.content(ids::SERVICE_TYPE_LIST), Some(&Content::Empty));
        assert_eq!(doc.content(ids::DIVISION_LIST), Some(&Content::Empty));
    }

    #[tokio::test]
    async fn test_failures_show_placeholders_everywhere() {
        let failures = vec![
            Err(ApiError::Http {
                status: 500,
                message: Some("Dashboard data not available".to_string()),
            }),
            Ok(json!({"status": "error", "message": "Dashboard data not available"})),
            Ok(json!({"unexpected": true})),
            Err(ApiError::Decode("expected value".to_string())),
        ];

        for failure in failures {
            let loader = loader(FakeBackend::new().with_dashboard(failure));
            let mut doc = Document::dashboard();
            doc.set_text(ids::LAST_UPDATED, None, "Last updated: earlier");

            let status = loader.load(&mut doc).await;

            assert!(!status.is_connected());
            for region in ChartRegion::ALL {
                assert!(placeholder(&doc, region.element_id()), "{:?}", region);
            }
            assert_eq!(doc.text(ids::DATA_STATUS), Some(DATA_STATUS_UNAVAILABLE));
            assert_eq!(doc.text(ids::LAST_UPDATED), Some("Last updated: earlier"));
            assert!(!doc.has_class(ids::LOADING_OVERLAY, ids::ACTIVE_CLASS));
            assert!(!loader.state().is_connected());
        }
    }

    #[tokio::test]
    async fn test_failure_after_success_replaces_charts() {
        let loader = loader(
            FakeBackend::new()
                .with_dashboard(Ok(full_payload()))
                .with_dashboard(Err(ApiError::Http {
                    status: 502,
                    message: None,
                })),
        );
        let mut doc = Document::dashboard();

        loader.load(&mut doc).await;
        assert!(plotted(&doc, ids::STATUS_CHART));

        loader.load(&mut doc).await;
        for region in ChartRegion::ALL {
            assert!(placeholder(&doc, region.element_id()), "{:?}", region);
        }
        assert!(loader.state().dashboard().is_none());
    }

    #[tokio::test]
    async fn test_missing_container_is_skipped() {
        let loader = loader(FakeBackend::new().with_dashboard(Ok(full_payload())));
        let mut doc = Document::dashboard();
        doc.remove(ids::HOURLY_PATTERN_CHART);

        loader.load(&mut doc).await;

        assert!(doc.element(ids::HOURLY_PATTERN_CHART).is_none());
        assert!(plotted(&doc, ids::FEATURE_IMPORTANCE_CHART));
    }

    /// Wraps a document and records chart writes made outside a batch
    struct Recorder {
        doc: Document,
        in_batch: bool,
        unbatched: Vec<String>,
    }

    impl Recorder {
        fn note(&mut self, id: &str) {
            if !self.in_batch {
                self.unbatched.push(id.to_string());
            }
        }
    }

    impl Page for Recorder {
        fn contains(&self, id: &str) -> bool {
            self.doc.contains(id)
        }
        fn set_text(&mut self, id: &str, selector: Option<&str>, text: &str) -> bool {
            self.doc.set_text(id, selector, text)
        }
        fn add_class(&mut self, id: &str, class: &str) {
            self.doc.add_class(id, class)
        }
        fn remove_class(&mut self, id: &str, class: &str) {
            self.doc.remove_class(id, class)
        }
        fn value(&self, id: &str) -> Option<String> {
            self.doc.value(id)
        }
        fn set_value(&mut self, id: &str, value: &str) {
            self.doc.set_value(id, value)
        }
        fn set_disabled(&mut self, id: &str, disabled: bool) {
            self.doc.set_disabled(id, disabled)
        }
        fn replace_options(&mut self, id: &str, options: &[String]) {
            self.note(id);
            self.doc.replace_options(id, options)
        }
        fn replace_items(&mut self, id: &str, items: &[String]) {
            self.doc.replace_items(id, items)
        }
        fn plot(&mut self, id: &str, spec: &PlotSpec) {
            self.note(id);
            self.doc.plot(id, spec)
        }
        fn show_placeholder(&mut self, id: &str, placeholder: &Placeholder) {
            self.note(id);
            self.doc.show_placeholder(id, placeholder)
        }
        fn batch(&mut self, writes: &mut dyn FnMut(&mut dyn Page)) {
            self.in_batch = true;
            writes(self);
            self.in_batch = false;
        }
    }

    #[tokio::test]
    async fn test_render_applied_as_one_batch() {
        for response in [Ok(full_payload()), Err(ApiError::Http { status: 503, message: None })] {
            let loader = loader(FakeBackend::new().with_dashboard(response));
            let mut page = Recorder {
                doc: Document::dashboard(),
                in_batch: false,
                unbatched: Vec::new(),
            };

            loader.load(&mut page).await;

            assert!(page.unbatched.is_empty(), "{:?}", page.unbatched);
            assert!(!page.doc.has_class(ids::LOADING_OVERLAY, ids::ACTIVE_CLASS));
        }
    }

    #[tokio::test]
    async fn test_load_into_shared_document() {
        let loader = loader(FakeBackend::new().with_dashboard(Ok(full_payload())));
        let shared = SharedDocument::new(Document::dashboard());

        loader.load(&mut shared.clone()).await;

        let doc = shared.snapshot();
        for region in ChartRegion::ALL {
            assert!(plotted(&doc, region.element_id()), "{:?}", region);
        }
        assert_eq!(doc.text(ids::DATA_STATUS), Some(DATA_STATUS_CONNECTED));
    }

    #[test]
    fn test_render_is_idempotent() {
        let status = DashboardStatus::Unavailable {
            reason: "down".to_string(),
        };
        let mut once = Document::dashboard();
        render_dashboard_in(&mut once, &status, &Utc);
        let mut twice = once.clone();
        render_dashboard_in(&mut twice, &status, &Utc);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_format_last_updated() {
        assert_eq!(
            format_last_updated("2025-01-15T09:30:00.123456", &Utc),
            "1/15/2025, 9:30:00 AM"
        );
        assert_eq!(
            format_last_updated("2025-01-15T14:30:00-05:00", &Utc),
            "1/15/2025, 7:30:00 PM"
        );
        assert_eq!(format_last_updated("yesterday", &Utc), "yesterday");
    }
}
