//! GUI module - User interface components

mod app;
mod chart_viewer;
mod control_panel;
mod table_view;

pub use app::FinesApp;
pub use chart_viewer::{summary_cards, ChartViewer};
pub use control_panel::{ControlPanel, ControlPanelAction};
pub use table_view::{cell_text, visible_columns, FinesTable};
