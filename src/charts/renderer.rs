//! Static Chart Renderer
//! Draws dashboard series into an RGB pixel buffer with plotters and encodes PNG.
//!
//! Layout per image:
//! 1. Title centered at the top
//! 2. Bars with the value axis formatted as currency (or counts for the histogram)
//! 3. Category labels on the argument axis, truncated to 32 characters

use crate::charts::dashboard::{short_label, ChartKind, ChartSeries, ValueKind};
use crate::data::MoneyFormat;
use image::{DynamicImage, ImageFormat, RgbImage};
use plotters::prelude::*;
use std::io::Cursor;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Chart '{0}' has no data")]
    Empty(&'static str),
    #[error("Drawing failed: {0}")]
    Draw(String),
    #[error("Pixel buffer does not match {0}x{1}")]
    Buffer(u32, u32),
    #[error("PNG encoding failed: {0}")]
    Encode(#[from] image::ImageError),
}

fn rgb(kind: ChartKind) -> RGBColor {
    let c = crate::charts::chart_color(kind);
    RGBColor(c.r(), c.g(), c.b())
}

/// Renders chart series to PNG bytes without a window.
pub struct StaticChartRenderer;

impl StaticChartRenderer {
    /// Render one series to an in-memory PNG.
    pub fn render_png(
        series: &ChartSeries,
        money: &MoneyFormat,
        width: u32,
        height: u32,
    ) -> Result<Vec<u8>, RenderError> {
        if series.is_empty() {
            return Err(RenderError::Empty(series.kind.title()));
        }

        let mut buffer = vec![0u8; width as usize * height as usize * 3];
        Self::draw(series, money, &mut buffer, width, height)
            .map_err(|e| RenderError::Draw(e.to_string()))?;

        let img = RgbImage::from_raw(width, height, buffer)
            .ok_or(RenderError::Buffer(width, height))?;
        let mut png = Vec::new();
        DynamicImage::ImageRgb8(img).write_to(&mut Cursor::new(&mut png), ImageFormat::Png)?;
        Ok(png)
    }

    fn draw(
        series: &ChartSeries,
        money: &MoneyFormat,
        buffer: &mut [u8],
        width: u32,
        height: u32,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let root = BitMapBackend::with_buffer(buffer, (width, height)).into_drawing_area();
        root.fill(&WHITE)?;

        let n = series.points.len();
        let y_max = Self::axis_max(series.max_value());
        let labels: Vec<String> = series.points.iter().map(|p| short_label(&p.label)).collect();
        let value_kind = series.value_kind;
        let format_value = |v: &u64| match value_kind {
            ValueKind::Currency => money.format(*v),
            ValueKind::Count => money.group(*v),
        };
        let format_label = |v: &SegmentValue<usize>| match v {
            SegmentValue::CenterOf(i) | SegmentValue::Exact(i) => {
                labels.get(*i).cloned().unwrap_or_default()
            }
            SegmentValue::Last => String::new(),
        };

        let mut chart = ChartBuilder::on(&root)
            .caption(series.kind.title(), ("sans-serif", 26))
            .margin(20)
            .x_label_area_size(Self::label_area(&labels))
            .y_label_area_size(130)
            .build_cartesian_2d((0..n).into_segmented(), 0u64..y_max)?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_labels(n)
            .x_label_formatter(&format_label)
            .x_label_style(
                ("sans-serif", 13)
                    .into_font()
                    .transform(FontTransform::Rotate90),
            )
            .y_label_formatter(&format_value)
            .y_desc(match value_kind {
                ValueKind::Currency => "Total fines",
                ValueKind::Count => "Number of fines",
            })
            .draw()?;

        chart.draw_series(
            Histogram::vertical(&chart)
                .style(rgb(series.kind).filled())
                .margin(6)
                .data(series.points.iter().enumerate().map(|(i, p)| (i, p.value))),
        )?;

        root.present()?;
        Ok(())
    }

    /// Upper bound of the value axis: 10% headroom, never zero.
    pub fn axis_max(max_value: u64) -> u64 {
        (max_value + max_value / 10).max(1)
    }

    /// Height reserved under the bars for rotated labels.
    fn label_area(labels: &[String]) -> u32 {
        let longest = labels.iter().map(|l| l.chars().count()).max().unwrap_or(0) as u32;
        (longest * 8 + 20).clamp(40, 300)
    }
}
