//! Fines Explorer - regulatory sanctions dashboard
//!
//! Loads a fines dataset, filters and sorts it, aggregates the current view
//! and renders it as a table, summary cards and bar charts.

pub mod charts;
pub mod config;
pub mod data;
pub mod export;
pub mod gui;
pub mod stats;
