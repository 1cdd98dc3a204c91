//! Chart Viewer Widget
//! Summary cards plus the dashboard charts, laid out as fixed-width cards that
//! wrap into as many columns as the available width allows.

use crate::charts::{chart_color, ChartPlotter, ChartSeries, Dashboard};
use crate::data::MoneyFormat;
use crate::stats::Summary;
use egui::{Color32, RichText};

/// Chart card configuration
const CHART_SPACING: f32 = 15.0;
const CHART_WIDTH: f32 = 620.0;
const PLOT_HEIGHT: f32 = 300.0;

/// (label, value) pairs for the headline cards.
pub fn summary_cards(summary: &Summary, money: &MoneyFormat) -> Vec<(&'static str, String)> {
    let optional = |v: Option<f64>| v.map(|v| money.format_rounded(v)).unwrap_or_else(|| "-".to_string());

    let mut cards = vec![
        ("Total fines", money.format(summary.total)),
        ("Records", money.group(summary.count as u64)),
        ("Companies", money.group(summary.companies as u64)),
        (
            "Largest fine",
            summary
                .max
                .map(|m| money.format(m))
                .unwrap_or_else(|| "-".to_string()),
        ),
        ("Mean fine", optional(summary.mean)),
        ("Median fine", optional(summary.median)),
    ];
    if summary.total_alt > 0.0 {
        cards.push(("Total UTA", money.format_units(summary.total_alt)));
    }
    cards
}

/// Scrollable dashboard area with responsive multi-column layout.
#[derive(Default)]
pub struct ChartViewer;

impl ChartViewer {
    pub fn new() -> Self {
        Self
    }

    /// Draw summary cards followed by every chart, redrawn in full each frame.
    pub fn show(&self, ui: &mut egui::Ui, dashboard: &Dashboard, money: &MoneyFormat) {
        Self::draw_summary(ui, &dashboard.summary, money);
        ui.add_space(CHART_SPACING);

        let avail_width = ui.available_width();
        let num_columns = ((avail_width / (CHART_WIDTH + CHART_SPACING)).floor() as usize).max(1);

        for row in dashboard.charts.chunks(num_columns) {
            ui.horizontal(|ui| {
                for series in row {
                    Self::draw_chart_card(ui, series, money);
                    ui.add_space(CHART_SPACING);
                }
            });
            ui.add_space(CHART_SPACING);
        }
    }

    fn draw_summary(ui: &mut egui::Ui, summary: &Summary, money: &MoneyFormat) {
        ui.horizontal_wrapped(|ui| {
            for (label, value) in summary_cards(summary, money) {
                egui::Frame::none()
                    .fill(ui.visuals().widgets.noninteractive.bg_fill)
                    .rounding(8.0)
                    .inner_margin(12.0)
                    .show(ui, |ui| {
                        ui.set_min_width(150.0);
                        ui.vertical(|ui| {
                            ui.label(RichText::new(label).size(11.0).color(Color32::GRAY));
                            ui.label(RichText::new(value).size(20.0).strong());
                        });
                    });
                ui.add_space(8.0);
            }
        });
    }

    /// Draw a single chart card with fixed width
    fn draw_chart_card(ui: &mut egui::Ui, series: &ChartSeries, money: &MoneyFormat) {
        let border_color = chart_color(series.kind);
        let card_width = CHART_WIDTH - 20.0;

        egui::Frame::none()
            .rounding(8.0)
            .stroke(egui::Stroke::new(2.0, border_color))
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .inner_margin(12.0)
            .show(ui, |ui| {
                ui.set_width(card_width);
                ui.vertical(|ui| {
                    ui.label(
                        RichText::new(series.kind.title())
                            .size(16.0)
                            .strong()
                            .color(border_color),
                    );
                    ui.add_space(8.0);
                    ChartPlotter::draw_series_chart(ui, series, money, PLOT_HEIGHT);
                });
            });
    }
}
