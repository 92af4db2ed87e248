//! Chart Regions
//!
//! The seven chart regions of the dashboard and the mapping from each
//! statistic group to its Plotly specification.

use serde::Serialize;
use serde_json::Value;

use crate::api::DashboardData;
use crate::dashboard::plot::{palette, Axis, Layout, Margin, Orientation, PlotConfig, PlotSpec, Trace};
use crate::page::ids;

/// A chart region on the page, keyed by its container element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChartRegion {
    TimeSeries,
    Ward,
    Status,
    ServiceTypes,
    Division,
    HourlyPattern,
    FeatureImportance,
}

impl ChartRegion {
    /// All regions in page order
    pub const ALL: [ChartRegion; 7] = [
        ChartRegion::TimeSeries,
        ChartRegion::Ward,
        ChartRegion::Status,
        ChartRegion::ServiceTypes,
        ChartRegion::Division,
        ChartRegion::HourlyPattern,
        ChartRegion::FeatureImportance,
    ];

    /// Container element id
    pub fn element_id(&self) -> &'static str {
        match self {
            ChartRegion::TimeSeries => ids::TIME_SERIES_CHART,
            ChartRegion::Ward => ids::WARD_CHART,
            ChartRegion::Status => ids::STATUS_CHART,
            ChartRegion::ServiceTypes => ids::SERVICE_TYPES_CHART,
            ChartRegion::Division => ids::DIVISION_CHART,
            ChartRegion::HourlyPattern => ids::HOURLY_PATTERN_CHART,
            ChartRegion::FeatureImportance => ids::FEATURE_IMPORTANCE_CHART,
        }
    }

    /// Card heading shown above the chart
    pub fn title(&self) -> &'static str {
        match self {
            ChartRegion::TimeSeries => "Daily Request Volume",
            ChartRegion::Ward => "Requests by Ward",
            ChartRegion::Status => "Request Status",
            ChartRegion::ServiceTypes => "Top Service Types",
            ChartRegion::Division => "Requests by Division",
            ChartRegion::HourlyPattern => "Hourly Pattern",
            ChartRegion::FeatureImportance => "Model Feature Importance",
        }
    }

    /// Build the plot for this region, or `None` when its group is absent
    pub fn plot(&self, data: &DashboardData) -> Option<PlotSpec> {
        let spec = match self {
            ChartRegion::TimeSeries => {
                let group = data.time_series.as_ref()?;
                let (x, y) = pairs(self, &group.dates, &group.counts);
                line_chart(
                    Trace::lines_markers(x, y, palette::PRIMARY).named("Daily Requests"),
                    "Date",
                )
            }
            ChartRegion::Ward => {
                let group = data.ward_distribution.as_ref()?;
                let (labels, values) = pairs(self, &group.wards, &group.counts);
                horizontal_bar(
                    Trace::bar(values, labels, Orientation::Horizontal, palette::SECONDARY)
                        .named("Ward Requests"),
                    "Number of Requests",
                    180,
                )
            }
            ChartRegion::Status => {
                let group = data.status_distribution.as_ref()?;
                let (labels, values) = pairs(self, &group.statuses, &group.counts);
                pie_chart(Trace::pie(
                    labels,
                    values,
                    &[
                        palette::SUCCESS,
                        palette::ERROR,
                        palette::WARNING,
                        palette::PRIMARY,
                        palette::SECONDARY,
                    ],
                ))
            }
            ChartRegion::ServiceTypes => {
                let group = data.service_types.as_ref()?;
                let (labels, values) = pairs(self, &group.types, &group.counts);
                horizontal_bar(
                    Trace::bar(values, labels, Orientation::Horizontal, palette::PRIMARY)
                        .named("Service Types"),
                    "Number of Requests",
                    200,
                )
            }
            ChartRegion::Division => {
                let group = data.division_distribution.as_ref()?;
                let (labels, values) = pairs(self, &group.divisions, &group.counts);
                PlotSpec {
                    data: vec![
                        Trace::bar(labels, values, Orientation::Vertical, palette::SECONDARY)
                            .named("Division Requests"),
                    ],
                    layout: Layout::dark(11, Margin::new(20, 20, 120, 60))
                        .axes(Axis::category().tick_angle(-45), Axis::value("Number of Requests")),
                    config: PlotConfig::default(),
                }
            }
            ChartRegion::HourlyPattern => {
                let group = data.hourly_pattern.as_ref()?;
                let (x, y) = pairs(self, &group.hours, &group.counts);
                line_chart(
                    Trace::lines_markers(x, y, palette::PRIMARY).named("Hourly Pattern"),
                    "Hour of Day",
                )
            }
            ChartRegion::FeatureImportance => {
                let group = data.feature_importance.as_ref()?;
                let (labels, values) = pairs(self, &group.features, &group.importance);
                horizontal_bar(
                    Trace::bar(values, labels, Orientation::Horizontal, palette::SUCCESS)
                        .named("Feature Importance"),
                    "Importance Score",
                    180,
                )
            }
        };

        Some(spec)
    }
}

fn line_chart(trace: Trace, x_title: &str) -> PlotSpec {
    PlotSpec {
        data: vec![trace],
        layout: Layout::dark(12, Margin::new(20, 20, 60, 60))
            .axes(Axis::value(x_title), Axis::value("Number of Requests")),
        config: PlotConfig::default(),
    }
}

fn horizontal_bar(trace: Trace, x_title: &str, left_margin: u32) -> PlotSpec {
    PlotSpec {
        data: vec![trace],
        layout: Layout::dark(11, Margin::new(20, 20, 60, left_margin))
            .axes(Axis::value(x_title), Axis::category()),
        config: PlotConfig::default(),
    }
}

fn pie_chart(trace: Trace) -> PlotSpec {
    PlotSpec {
        data: vec![trace],
        layout: Layout::dark(12, Margin::new(20, 20, 20, 20)).vertical_legend(),
        config: PlotConfig::default(),
    }
}

/// Convert a parallel (labels, values) pair to JSON sequences of equal length
fn pairs<L: Serialize, V: Serialize>(
    region: &ChartRegion,
    labels: &[L],
    values: &[V],
) -> (Vec<Value>, Vec<Value>) {
    if labels.len() != values.len() {
        tracing::warn!(
            chart = region.element_id(),
            labels = labels.len(),
            values = values.len(),
            "Statistic group has mismatched lengths, truncating to the shorter"
        );
    }

    labels
        .iter()
        .zip(values)
        .map(|(label, value)| (to_json(label), to_json(value)))
        .unzip()
}

fn to_json<T: Serialize>(value: &T) -> Value {
    serde_json::to_value(value).unwrap_or(Value::Null)
}

/// Static content shown in a chart region when the backend is unavailable
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholder {
    pub icon: &'static str,
    pub title: &'static str,
    pub detail: &'static str,
    pub instruction: &'static str,
}

impl Placeholder {
    pub const BACKEND_UNAVAILABLE: Placeholder = Placeholder {
        icon: "📊",
        title: "Chart will appear here",
        detail: "Start your Flask backend to load Toronto 311 data",
        instruction: "Run: python backend/app.py",
    };
}
