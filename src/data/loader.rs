//! Fine Data Loader Module
//! Reads the fines dataset from CSV text or from a pre-parsed JSON record array.

use crate::data::csv_line::split_csv_line;
use crate::data::money::{parse_fine, MoneyError};
use crate::data::FineRecord;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Columns expected before the date: id, facility, company, category, region, amount.
const MIN_COLUMNS: usize = 6;

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to parse JSON records: {0}")]
    Json(#[from] serde_json::Error),
}

/// Why a source row was left out of the dataset.
#[derive(Debug, Clone, PartialEq)]
pub enum RejectReason {
    MissingColumns(usize),
    BadAmount(MoneyError),
}

impl std::fmt::Display for RejectReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RejectReason::MissingColumns(n) => {
                write!(f, "expected at least {} columns, found {}", MIN_COLUMNS, n)
            }
            RejectReason::BadAmount(e) => write!(f, "{}", e),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RejectedRow {
    /// 1-based line number in the source (the header is line 1 for CSV).
    pub line: usize,
    pub reason: RejectReason,
}

/// Result of a load: the accepted records in source order plus rejected rows.
#[derive(Debug, Clone, Default)]
pub struct LoadedDataset {
    pub records: Vec<FineRecord>,
    pub rejected: Vec<RejectedRow>,
}

/// Record shape of the page-injected JSON source.
#[derive(Debug, Deserialize)]
struct JsonFine {
    #[serde(default)]
    id: Option<serde_json::Value>,
    #[serde(default, alias = "unidad_fiscalizable", alias = "instalacion")]
    facility: String,
    #[serde(alias = "company")]
    razon_social: String,
    #[serde(alias = "category")]
    categoria: String,
    #[serde(default)]
    region: String,
    multa_clp: f64,
    #[serde(default)]
    multa_uta: Option<f64>,
    #[serde(default, alias = "date")]
    fecha_termino: String,
}

/// Loads fine records from disk or from in-memory text.
pub struct FineLoader;

impl FineLoader {
    /// Load a dataset file. `.json` files are read as a record array, anything
    /// else as CSV.
    pub fn load_path(path: &Path) -> Result<LoadedDataset, LoaderError> {
        let text = fs::read_to_string(path).map_err(|source| LoaderError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let is_json = path
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case("json"))
            .unwrap_or(false);

        let dataset = if is_json {
            Self::parse_json(&text)?
        } else {
            Self::parse_csv(&text)
        };

        log::info!(
            "Loaded {} fines from {} ({} rejected)",
            dataset.records.len(),
            path.display(),
            dataset.rejected.len()
        );
        Ok(dataset)
    }

    /// Parse CSV text with a header row followed by one row per fine:
    /// `id,facility,company,category,region,amount,date`.
    pub fn parse_csv(text: &str) -> LoadedDataset {
        let mut dataset = LoadedDataset::default();

        for (idx, line) in text.trim().lines().enumerate().skip(1) {
            if line.trim().is_empty() {
                continue;
            }
            let line_no = idx + 1;

            match Self::parse_row(line) {
                Ok(record) => dataset.records.push(record),
                Err(reason) => {
                    log::warn!("Skipping line {}: {}", line_no, reason);
                    dataset.rejected.push(RejectedRow {
                        line: line_no,
                        reason,
                    });
                }
            }
        }

        dataset
    }

    fn parse_row(line: &str) -> Result<FineRecord, RejectReason> {
        let mut parts = split_csv_line(line);
        if parts.len() < MIN_COLUMNS {
            return Err(RejectReason::MissingColumns(parts.len()));
        }
        parts.resize(7, String::new());

        let fine = parse_fine(&parts[5]).map_err(RejectReason::BadAmount)?;
        let mut parts = parts.into_iter();
        let mut next = || parts.next().unwrap_or_default();

        let id = next();
        let facility = next();
        let company = next();
        let category = next();
        let region = next();
        let fine_formatted = next();
        let date = next();

        Ok(FineRecord {
            id,
            facility,
            company,
            category,
            region,
            fine,
            fine_formatted,
            fine_alt: None,
            date,
        })
    }

    /// Parse a JSON array of page-injected records (`razon_social`, `multa_clp`, ...).
    pub fn parse_json(text: &str) -> Result<LoadedDataset, LoaderError> {
        let rows: Vec<JsonFine> = serde_json::from_str(text)?;
        let mut dataset = LoadedDataset::default();

        for (idx, row) in rows.into_iter().enumerate() {
            let position = idx + 1;

            if !row.multa_clp.is_finite() || row.multa_clp < 0.0 {
                let reason =
                    RejectReason::BadAmount(MoneyError::Invalid(row.multa_clp.to_string()));
                log::warn!("Skipping record {}: {}", position, reason);
                dataset.rejected.push(RejectedRow {
                    line: position,
                    reason,
                });
                continue;
            }

            let id = match row.id {
                Some(serde_json::Value::String(s)) => s,
                Some(serde_json::Value::Null) | None => position.to_string(),
                Some(other) => other.to_string(),
            };
            let fine = row.multa_clp.round() as u64;

            dataset.records.push(FineRecord {
                id,
                facility: row.facility,
                company: row.razon_social,
                category: row.categoria,
                region: row.region,
                fine,
                fine_formatted: fine.to_string(),
                fine_alt: row.multa_uta,
                date: row.fecha_termino,
            });
        }

        Ok(dataset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "id,facility,company,category,region,fine,date\n\
        1,A,Co1,Mining,North,\"$1,000\",2020-01-01\n\
        2,B,Co2,Energy,South,\"$2,000\",2021-06-15\n";

    #[test]
    fn test_parse_csv_one_record_per_line() {
        let dataset = FineLoader::parse_csv(SAMPLE);
        assert_eq!(dataset.records.len(), 2);
        assert!(dataset.rejected.is_empty());

        let first = &dataset.records[0];
        assert_eq!(first.id, "1");
        assert_eq!(first.facility, "A");
        assert_eq!(first.company, "Co1");
        assert_eq!(first.category, "Mining");
        assert_eq!(first.region, "North");
        assert_eq!(first.fine, 1000);
        assert_eq!(first.fine_formatted, "$1,000");
        assert_eq!(first.date, "2020-01-01");
        assert_eq!(dataset.records[1].fine, 2000);
    }

    #[test]
    fn test_parse_csv_crlf_and_blank_lines() {
        let text = "id,facility,company,category,region,fine,date\r\n\
            1,A,Co1,Mining,North,$500,2020-01-01\r\n\
            \r\n\
            2,B,Co2,Energy,South,$700,2021-01-01\r\n";
        let dataset = FineLoader::parse_csv(text);
        assert_eq!(dataset.records.len(), 2);
        assert_eq!(dataset.records[1].date, "2021-01-01");
    }

    #[test]
    fn test_parse_csv_header_only() {
        let dataset = FineLoader::parse_csv("id,facility,company,category,region,fine,date\n");
        assert!(dataset.records.is_empty());
        assert!(dataset.rejected.is_empty());
        assert!(FineLoader::parse_csv("").records.is_empty());
    }

    #[test]
    fn test_parse_csv_rejects_bad_rows() {
        let text = "id,facility,company,category,region,fine,date\n\
            1,A,Co1,Mining,North,N/A,2020-01-01\n\
            2,B,Co2\n\
            3,C,Co3,Energy,South,$10,2022-03-01\n";
        let dataset = FineLoader::parse_csv(text);

        assert_eq!(dataset.records.len(), 1);
        assert_eq!(dataset.records[0].id, "3");
        assert_eq!(dataset.rejected.len(), 2);
        assert_eq!(dataset.rejected[0].line, 2);
        assert!(matches!(
            dataset.rejected[0].reason,
            RejectReason::BadAmount(MoneyError::Invalid(_))
        ));
        assert_eq!(dataset.rejected[1].line, 3);
        assert_eq!(dataset.rejected[1].reason, RejectReason::MissingColumns(3));
    }

    #[test]
    fn test_parse_csv_missing_date_is_empty() {
        let text = "h\n1,A,Co1,Mining,North,$10\n";
        let dataset = FineLoader::parse_csv(text);
        assert_eq!(dataset.records.len(), 1);
        assert_eq!(dataset.records[0].date, "");
    }

    #[test]
    fn test_parse_json_source() {
        let text = r#"[
            {"unidad_fiscalizable": "Planta 1", "razon_social": "Minera X", "categoria": "Minería",
             "region": "Región de Antofagasta", "multa_clp": 1500000.4, "multa_uta": 2.5,
             "fecha_termino": "2019-05-02"},
            {"id": 9, "facility": "Planta 2", "razon_social": "Energía Y", "categoria": "Energía",
             "region": "Región de Atacama", "multa_clp": 300}
        ]"#;
        let dataset = FineLoader::parse_json(text).unwrap();

        assert_eq!(dataset.records.len(), 2);
        let first = &dataset.records[0];
        assert_eq!(first.id, "1");
        assert_eq!(first.facility, "Planta 1");
        assert_eq!(first.company, "Minera X");
        assert_eq!(first.fine, 1_500_000);
        assert_eq!(first.fine_alt, Some(2.5));
        assert_eq!(first.year(), "2019");

        let second = &dataset.records[1];
        assert_eq!(second.id, "9");
        assert_eq!(second.fine_alt, None);
        assert_eq!(second.date, "");
    }

    #[test]
    fn test_parse_json_rejects_negative_amount() {
        let text = r#"[{"razon_social": "Z", "categoria": "C", "multa_clp": -1}]"#;
        let dataset = FineLoader::parse_json(text).unwrap();
        assert!(dataset.records.is_empty());
        assert_eq!(dataset.rejected.len(), 1);
    }

    #[test]
    fn test_parse_json_malformed() {
        assert!(matches!(
            FineLoader::parse_json("{not json"),
            Err(LoaderError::Json(_))
        ));
    }

    #[test]
    fn test_load_path_dispatches_on_extension() {
        let dir = std::env::temp_dir().join(format!("finescope-loader-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();

        let csv_path = dir.join("multas.csv");
        fs::write(&csv_path, SAMPLE).unwrap();
        assert_eq!(FineLoader::load_path(&csv_path).unwrap().records.len(), 2);

        let json_path = dir.join("multas.JSON");
        fs::write(
            &json_path,
            r#"[{"razon_social": "Z", "categoria": "C", "multa_clp": 5}]"#,
        )
        .unwrap();
        assert_eq!(FineLoader::load_path(&json_path).unwrap().records.len(), 1);

        let missing = dir.join("missing.csv");
        assert!(matches!(
            FineLoader::load_path(&missing),
            Err(LoaderError::Io { .. })
        ));

        fs::remove_dir_all(&dir).ok();
    }
}
