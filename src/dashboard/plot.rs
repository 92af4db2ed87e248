//! Plot Specifications
//!
//! Serializable option objects for Plotly.js (`Plotly.newPlot(div, data,
//! layout, config)`). Only the fields the dashboard uses are modelled.

use serde::Serialize;
use serde_json::Value;

/// Dark dashboard palette
pub mod palette {
    pub const PRIMARY: &str = "#6366f1";
    pub const SECONDARY: &str = "#8b5cf6";
    pub const SUCCESS: &str = "#10b981";
    pub const WARNING: &str = "#f59e0b";
    pub const ERROR: &str = "#ef4444";
    pub const TEXT: &str = "#ffffff";
    pub const BACKGROUND: &str = "#0f0f23";
    pub const GRID: &str = "#374151";
}

/// Fixed chart height in pixels; width follows the container
pub const CHART_HEIGHT: u32 = 280;

/// A complete plot: traces, layout and display config
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlotSpec {
    pub data: Vec<Trace>,
    pub layout: Layout,
    pub config: PlotConfig,
}

/// Plotly trace types used by the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TraceType {
    Scatter,
    Bar,
    Pie,
}

/// Bar orientation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Orientation {
    #[serde(rename = "h")]
    Horizontal,
    #[serde(rename = "v")]
    Vertical,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trace {
    #[serde(rename = "type")]
    pub trace_type: TraceType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<Vec<Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<Vec<Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<Vec<Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub values: Option<Vec<Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub orientation: Option<Orientation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<Line>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marker: Option<Marker>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub textfont: Option<Font>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Trace {
    fn empty(trace_type: TraceType) -> Self {
        Self {
            trace_type,
            mode: None,
            x: None,
            y: None,
            labels: None,
            values: None,
            orientation: None,
            line: None,
            marker: None,
            textfont: None,
            name: None,
        }
    }

    /// Line chart with markers
    pub fn lines_markers(x: Vec<Value>, y: Vec<Value>, color: &str) -> Self {
        Self {
            mode: Some("lines+markers".to_string()),
            x: Some(x),
            y: Some(y),
            line: Some(Line {
                color: color.to_string(),
                width: 3,
            }),
            marker: Some(Marker::sized(color, 6)),
            ..Self::empty(TraceType::Scatter)
        }
    }

    /// Bar chart; for horizontal bars `x` carries the values and `y` the labels
    pub fn bar(x: Vec<Value>, y: Vec<Value>, orientation: Orientation, color: &str) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
            // Plotly defaults to vertical, so only horizontal is spelled out
            orientation: (orientation == Orientation::Horizontal).then_some(orientation),
            marker: Some(Marker::solid(color)),
            ..Self::empty(TraceType::Bar)
        }
    }

    /// Pie chart with one colour per slice, cycling through `colors`
    pub fn pie(labels: Vec<Value>, values: Vec<Value>, colors: &[&str]) -> Self {
        Self {
            labels: Some(labels),
            values: Some(values),
            marker: Some(Marker {
                color: None,
                colors: Some(colors.iter().map(|c| c.to_string()).collect()),
                size: None,
            }),
            textfont: Some(Font::color(palette::TEXT)),
            ..Self::empty(TraceType::Pie)
        }
    }

    pub fn named(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Line {
    pub color: String,
    pub width: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub colors: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u32>,
}

impl Marker {
    pub fn solid(color: &str) -> Self {
        Self {
            color: Some(color.to_string()),
            colors: None,
            size: None,
        }
    }

    pub fn sized(color: &str, size: u32) -> Self {
        Self {
            size: Some(size),
            ..Self::solid(color)
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Font {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u32>,
}

impl Font {
    pub fn color(color: &str) -> Self {
        Self {
            color: Some(color.to_string()),
            size: None,
        }
    }

    pub fn size(size: u32) -> Self {
        Self {
            color: None,
            size: Some(size),
        }
    }

    pub fn text(size: u32) -> Self {
        Self {
            color: Some(palette::TEXT.to_string()),
            size: Some(size),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Axis {
    pub title: String,
    pub color: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gridcolor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub titlefont: Option<Font>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tickfont: Option<Font>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tickangle: Option<i32>,
}

impl Axis {
    /// Value axis: titled, gridded
    pub fn value(title: &str) -> Self {
        Self {
            title: title.to_string(),
            color: palette::TEXT.to_string(),
            gridcolor: Some(palette::GRID.to_string()),
            titlefont: Some(Font::size(14)),
            tickfont: None,
            tickangle: None,
        }
    }

    /// Category axis with long labels: untitled, small ticks, no grid
    pub fn category() -> Self {
        Self {
            title: String::new(),
            color: palette::TEXT.to_string(),
            gridcolor: None,
            titlefont: None,
            tickfont: Some(Font::size(10)),
            tickangle: None,
        }
    }

    pub fn tick_angle(mut self, angle: i32) -> Self {
        self.tickangle = Some(angle);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Margin {
    pub t: u32,
    pub r: u32,
    pub b: u32,
    pub l: u32,
}

impl Margin {
    pub const fn new(t: u32, r: u32, b: u32, l: u32) -> Self {
        Self { t, r, b, l }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Legend {
    pub orientation: String,
    pub x: f64,
    pub y: f64,
    pub font: Font,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Layout {
    pub paper_bgcolor: String,
    pub plot_bgcolor: String,
    pub font: Font,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xaxis: Option<Axis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub yaxis: Option<Axis>,
    pub margin: Margin,
    pub autosize: bool,
    pub height: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub showlegend: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub legend: Option<Legend>,
}

impl Layout {
    /// Dark layout shared by every chart
    pub fn dark(font_size: u32, margin: Margin) -> Self {
        Self {
            paper_bgcolor: palette::BACKGROUND.to_string(),
            plot_bgcolor: palette::BACKGROUND.to_string(),
            font: Font::text(font_size),
            xaxis: None,
            yaxis: None,
            margin,
            autosize: true,
            height: CHART_HEIGHT,
            showlegend: None,
            legend: None,
        }
    }

    pub fn axes(mut self, xaxis: Axis, yaxis: Axis) -> Self {
        self.xaxis = Some(xaxis);
        self.yaxis = Some(yaxis);
        self
    }

    pub fn vertical_legend(mut self) -> Self {
        self.showlegend = Some(true);
        self.legend = Some(Legend {
            orientation: "v".to_string(),
            x: 1.02,
            y: 0.5,
            font: Font::size(11),
        });
        self
    }
}

/// Display config: responsive width, no mode bar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PlotConfig {
    pub responsive: bool,
    #[serde(rename = "displayModeBar")]
    pub display_mode_bar: bool,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            responsive: true,
            display_mode_bar: false,
        }
    }
}
