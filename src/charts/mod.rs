//! Charts module - Dashboard snapshot and chart rendering

mod dashboard;
mod plotter;
mod renderer;

pub use dashboard::{
    short_label, ChartKind, ChartLimits, ChartSeries, Dashboard, SeriesPoint, ValueKind,
};
pub use plotter::{chart_color, ChartPlotter};
pub use renderer::{RenderError, StaticChartRenderer};
