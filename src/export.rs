//! Report Export Module
//! Writes the current view as CSV and every dashboard chart as a PNG.

use crate::charts::{Dashboard, RenderError, StaticChartRenderer};
use crate::data::{FineRecord, MoneyFormat};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// File name of the exported table.
pub const TABLE_FILE: &str = "fines.csv";

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Files produced by an export.
#[derive(Debug, Default)]
pub struct ExportSummary {
    pub table: PathBuf,
    pub charts: Vec<PathBuf>,
    /// Charts skipped because they were empty or failed to draw.
    pub skipped: Vec<(&'static str, String)>,
}

/// Writes report files into a directory.
pub struct ReportExporter;

impl ReportExporter {
    /// Export `records` and the charts of `dashboard` into `dir`.
    ///
    /// A chart that fails to render is logged and skipped; the others are still written.
    pub fn export(
        dir: &Path,
        records: &[&FineRecord],
        dashboard: &Dashboard,
        money: &MoneyFormat,
        size: (u32, u32),
    ) -> Result<ExportSummary, ExportError> {
        fs::create_dir_all(dir)?;

        let table = dir.join(TABLE_FILE);
        Self::write_table(&table, records, money)?;

        let mut summary = ExportSummary {
            table,
            ..Default::default()
        };

        for series in &dashboard.charts {
            let title = series.kind.title();
            match StaticChartRenderer::render_png(series, money, size.0, size.1) {
                Ok(png) => {
                    let path = dir.join(format!("{}.png", series.kind.file_stem()));
                    fs::write(&path, png)?;
                    summary.charts.push(path);
                }
                Err(RenderError::Empty(_)) => {
                    log::debug!("Skipping empty chart '{}'", title);
                    summary.skipped.push((title, "no data".to_string()));
                }
                Err(e) => {
                    log::warn!("Failed to render '{}': {}", title, e);
                    summary.skipped.push((title, e.to_string()));
                }
            }
        }

        log::info!(
            "Exported {} rows and {} charts to {}",
            records.len(),
            summary.charts.len(),
            dir.display()
        );
        Ok(summary)
    }

    /// Write the table as CSV. The first seven columns follow the input layout,
    /// so an export loads back; raw amounts trail them.
    pub fn write_table(
        path: &Path,
        records: &[&FineRecord],
        money: &MoneyFormat,
    ) -> Result<(), ExportError> {
        let mut writer = csv::Writer::from_path(path)?;
        writer.write_record([
            "id",
            "facility",
            "company",
            "category",
            "region",
            "fine",
            "date",
            "fine_clp",
            "fine_uta",
        ])?;

        for record in records {
            let display = money.format(record.fine);
            let raw = record.fine.to_string();
            let alt = record.fine_alt.map(|v| v.to_string()).unwrap_or_default();
            writer.write_record([
                record.id.as_str(),
                record.facility.as_str(),
                record.company.as_str(),
                record.category.as_str(),
                record.region.as_str(),
                display.as_str(),
                record.date.as_str(),
                raw.as_str(),
                alt.as_str(),
            ])?;
        }

        writer.flush()?;
        Ok(())
    }
}
