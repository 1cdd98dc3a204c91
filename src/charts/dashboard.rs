//! Dashboard snapshot: everything a renderer needs, computed from the current view.
//!
//! Renderers (the egui viewer, the PNG renderer) consume a [`Dashboard`] and never
//! see the dataset, so all derivation stays testable without a window.

use crate::data::{FineRecord, GroupKey};
use crate::stats::{FineAggregator, GroupTotal, Summary};

/// Longest label drawn before truncation.
pub const MAX_LABEL_CHARS: usize = 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChartKind {
    Category,
    Region,
    Companies,
    Distribution,
    Timeline,
}

impl ChartKind {
    pub fn title(&self) -> &'static str {
        match self {
            ChartKind::Category => "Fines by Category",
            ChartKind::Region => "Fines by Region",
            ChartKind::Companies => "Top Companies",
            ChartKind::Distribution => "Fine Size Distribution",
            ChartKind::Timeline => "Fines by Year",
        }
    }

    /// Base file name used when exporting the chart.
    pub fn file_stem(&self) -> &'static str {
        match self {
            ChartKind::Category => "fines_by_category",
            ChartKind::Region => "fines_by_region",
            ChartKind::Companies => "top_companies",
            ChartKind::Distribution => "fine_distribution",
            ChartKind::Timeline => "fines_by_year",
        }
    }

    /// Bars run left to right instead of bottom to top.
    pub fn is_horizontal(&self) -> bool {
        matches!(self, ChartKind::Region | ChartKind::Companies)
    }
}

/// What the bar values measure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Currency,
    Count,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SeriesPoint {
    pub label: String,
    pub value: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartSeries {
    pub kind: ChartKind,
    pub value_kind: ValueKind,
    pub points: Vec<SeriesPoint>,
}

impl ChartSeries {
    /// Nothing to draw: no points, or every bar is zero.
    pub fn is_empty(&self) -> bool {
        self.points.iter().all(|p| p.value == 0)
    }

    pub fn max_value(&self) -> u64 {
        self.points.iter().map(|p| p.value).max().unwrap_or(0)
    }

    fn from_totals(kind: ChartKind, totals: Vec<GroupTotal>) -> Self {
        Self {
            kind,
            value_kind: ValueKind::Currency,
            points: totals
                .into_iter()
                .map(|g| SeriesPoint {
                    label: g.key,
                    value: g.total,
                })
                .collect(),
        }
    }
}

/// Per-chart bar limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChartLimits {
    pub categories: usize,
    pub regions: usize,
    pub companies: usize,
}

impl Default for ChartLimits {
    fn default() -> Self {
        Self {
            categories: 15,
            regions: 10,
            companies: 10,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dashboard {
    pub summary: Summary,
    pub charts: Vec<ChartSeries>,
}

impl Dashboard {
    /// Recompute every aggregate over `records` (the filtered view).
    pub fn build(records: &[&FineRecord], limits: &ChartLimits) -> Self {
        let category = FineAggregator::top_n(
            FineAggregator::group_totals(records, GroupKey::Category),
            limits.categories,
        );
        let region = FineAggregator::top_n(
            FineAggregator::group_totals(records, GroupKey::Region),
            limits.regions,
        );
        let companies = FineAggregator::top_n(
            FineAggregator::group_totals(records, GroupKey::Company),
            limits.companies,
        );

        let distribution = ChartSeries {
            kind: ChartKind::Distribution,
            value_kind: ValueKind::Count,
            points: FineAggregator::histogram(records)
                .into_iter()
                .map(|b| SeriesPoint {
                    label: b.label,
                    value: b.count as u64,
                })
                .collect(),
        };

        Self {
            summary: FineAggregator::summary(records),
            charts: vec![
                ChartSeries::from_totals(ChartKind::Category, category),
                ChartSeries::from_totals(ChartKind::Region, region),
                ChartSeries::from_totals(ChartKind::Companies, companies),
                distribution,
                ChartSeries::from_totals(
                    ChartKind::Timeline,
                    FineAggregator::yearly_totals(records),
                ),
            ],
        }
    }

    pub fn chart(&self, kind: ChartKind) -> Option<&ChartSeries> {
        self.charts.iter().find(|c| c.kind == kind)
    }
}

/// Shorten `label` to [`MAX_LABEL_CHARS`] characters plus `...`.
pub fn short_label(label: &str) -> String {
    if label.chars().count() > MAX_LABEL_CHARS {
        let head: String = label.chars().take(MAX_LABEL_CHARS).collect();
        format!("{}...", head)
    } else {
        label.to_string()
    }
}
