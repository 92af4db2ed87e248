//! Dashboard
//!
//! KPI bootstrapping, chart rendering and the data loader that drives them.

pub mod charts;
pub mod kpi;
pub mod loader;
pub mod plot;
pub mod state;

pub use charts::{ChartRegion, Placeholder};
pub use kpi::{bootstrap, bootstrap_at};
pub use loader::{render_dashboard, DashboardLoader, DashboardStatus};
pub use plot::PlotSpec;
pub use state::AppState;
