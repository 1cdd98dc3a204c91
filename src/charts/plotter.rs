//! Chart Plotter Module
//! Draws dashboard series as interactive bar charts using egui_plot.

use crate::charts::dashboard::{short_label, ChartKind, ChartSeries, ValueKind};
use crate::data::MoneyFormat;
use egui::{Color32, RichText};
use egui_plot::{Bar, BarChart, Plot};

/// Bar colors per chart.
pub fn chart_color(kind: ChartKind) -> Color32 {
    match kind {
        ChartKind::Category => Color32::from_rgb(59, 130, 246), // Blue
        ChartKind::Region => Color32::from_rgb(139, 92, 246),   // Purple
        ChartKind::Companies => Color32::from_rgb(245, 158, 11), // Amber
        ChartKind::Distribution => Color32::from_rgb(153, 102, 255), // Violet
        ChartKind::Timeline => Color32::from_rgb(16, 185, 129), // Green
    }
}

/// Creates bar chart visualizations using egui_plot.
pub struct ChartPlotter;

impl ChartPlotter {
    fn format_value(money: &MoneyFormat, kind: ValueKind, value: f64) -> String {
        match kind {
            ValueKind::Currency => money.format_rounded(value),
            ValueKind::Count => money.group(value.max(0.0).round() as u64),
        }
    }

    /// Draw one series. Horizontal charts list the largest bar at the top.
    pub fn draw_series_chart(
        ui: &mut egui::Ui,
        series: &ChartSeries,
        money: &MoneyFormat,
        height: f32,
    ) {
        if series.is_empty() {
            log::debug!("{}: nothing to plot", series.kind.title());
            ui.allocate_ui(egui::vec2(ui.available_width(), height), |ui| {
                ui.centered_and_justified(|ui| {
                    ui.label(RichText::new("No data").color(Color32::GRAY));
                });
            });
            return;
        }

        let horizontal = series.kind.is_horizontal();
        let n = series.points.len();
        let color = chart_color(series.kind);
        let value_kind = series.value_kind;

        // Bar position on the argument axis.
        let position = move |i: usize| -> f64 {
            if horizontal {
                (n - 1 - i) as f64
            } else {
                i as f64
            }
        };

        let bars: Vec<Bar> = series
            .points
            .iter()
            .enumerate()
            .map(|(i, point)| {
                Bar::new(position(i), point.value as f64)
                    .name(&point.label)
                    .width(0.7)
                    .fill(color)
            })
            .collect();

        let tooltip_money = money.clone();
        let mut chart = BarChart::new(bars)
            .color(color)
            .element_formatter(Box::new(move |bar, _chart| {
                format!(
                    "{}\n{}",
                    bar.name,
                    Self::format_value(&tooltip_money, value_kind, bar.value)
                )
            }));
        if horizontal {
            chart = chart.horizontal();
        }

        let labels: Vec<String> = series.points.iter().map(|p| short_label(&p.label)).collect();
        let label_for = move |value: f64| -> String {
            let rounded = value.round();
            if (value - rounded).abs() > 0.01 || rounded < 0.0 {
                return String::new();
            }
            let slot = rounded as usize;
            if slot >= n {
                return String::new();
            }
            let idx = if horizontal { n - 1 - slot } else { slot };
            labels[idx].clone()
        };

        let value_money = money.clone();
        let value_axis = move |value: f64| -> String {
            if value < 0.0 {
                String::new()
            } else {
                Self::format_value(&value_money, value_kind, value)
            }
        };

        let mut plot = Plot::new(format!("chart_{}", series.kind.file_stem()))
            .height(height)
            .allow_zoom(false)
            .allow_drag(false)
            .allow_scroll(false)
            .allow_boxed_zoom(false)
            .show_grid(false);

        plot = if horizontal {
            plot.include_x(0.0)
                .y_axis_formatter(move |mark, _range| label_for(mark.value))
                .x_axis_formatter(move |mark, _range| value_axis(mark.value))
        } else {
            plot.include_y(0.0)
                .x_axis_formatter(move |mark, _range| label_for(mark.value))
                .y_axis_formatter(move |mark, _range| value_axis(mark.value))
        };

        plot.show(ui, |plot_ui| {
            plot_ui.bar_chart(chart);
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_formatting_by_kind() {
        let money = MoneyFormat::default();
        assert_eq!(
            ChartPlotter::format_value(&money, ValueKind::Currency, 2_500_000.0),
            "$2.500.000"
        );
        assert_eq!(ChartPlotter::format_value(&money, ValueKind::Count, 1200.0), "1.200");
    }

    #[test]
    fn test_every_chart_has_distinct_color() {
        let kinds = [
            ChartKind::Category,
            ChartKind::Region,
            ChartKind::Companies,
            ChartKind::Distribution,
            ChartKind::Timeline,
        ];
        for (i, a) in kinds.iter().enumerate() {
            for b in &kinds[i + 1..] {
                assert_ne!(chart_color(*a), chart_color(*b));
            }
        }
    }
}
