//! Data Processor Module
//! Filtering, sorting and option-list extraction over fine records.

use crate::data::{FineRecord, GroupKey};
use std::cmp::Ordering;
use std::collections::BTreeSet;

/// Current search / selector constraints. Empty strings mean "no constraint".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    /// Case-insensitive substring matched against company and facility.
    pub search: String,
    pub category: String,
    pub region: String,
}

impl FilterState {
    pub fn is_empty(&self) -> bool {
        self.search.is_empty() && self.category.is_empty() && self.region.is_empty()
    }

    fn matcher(&self) -> Matcher<'_> {
        Matcher {
            needle: self.search.to_lowercase(),
            filter: self,
        }
    }
}

/// Filter with the search text lowered once per pass.
struct Matcher<'a> {
    needle: String,
    filter: &'a FilterState,
}

impl Matcher<'_> {
    fn matches(&self, record: &FineRecord) -> bool {
        let search_ok = self.needle.is_empty()
            || record.company.to_lowercase().contains(&self.needle)
            || record.facility.to_lowercase().contains(&self.needle);
        let category_ok =
            self.filter.category.is_empty() || record.category == self.filter.category;
        let region_ok = self.filter.region.is_empty() || record.region == self.filter.region;

        search_ok && category_ok && region_ok
    }
}

/// Table columns that can drive the sort order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortColumn {
    Id,
    Facility,
    Company,
    Category,
    Region,
    Fine,
    FineAlt,
    Date,
}

impl SortColumn {
    pub const ALL: [SortColumn; 8] = [
        SortColumn::Id,
        SortColumn::Facility,
        SortColumn::Company,
        SortColumn::Category,
        SortColumn::Region,
        SortColumn::Fine,
        SortColumn::FineAlt,
        SortColumn::Date,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            SortColumn::Id => "ID",
            SortColumn::Facility => "Facility",
            SortColumn::Company => "Company",
            SortColumn::Category => "Category",
            SortColumn::Region => "Region",
            SortColumn::Fine => "Fine",
            SortColumn::FineAlt => "Fine (UTA)",
            SortColumn::Date => "Date",
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, SortColumn::Fine | SortColumn::FineAlt)
    }

    /// Ascending comparison: numeric for amounts, case-insensitive text otherwise.
    pub fn compare(&self, a: &FineRecord, b: &FineRecord) -> Ordering {
        match self {
            SortColumn::Fine => a.fine.cmp(&b.fine),
            SortColumn::FineAlt => {
                let a = a.fine_alt.unwrap_or(f64::NEG_INFINITY);
                let b = b.fine_alt.unwrap_or(f64::NEG_INFINITY);
                a.total_cmp(&b)
            }
            _ => self.text(a).to_lowercase().cmp(&self.text(b).to_lowercase()),
        }
    }

    fn text<'a>(&self, record: &'a FineRecord) -> &'a str {
        match self {
            SortColumn::Id => &record.id,
            SortColumn::Facility => &record.facility,
            SortColumn::Company => &record.company,
            SortColumn::Category => &record.category,
            SortColumn::Region => &record.region,
            SortColumn::Date => &record.date,
            SortColumn::Fine | SortColumn::FineAlt => &record.fine_formatted,
        }
    }
}

/// Active sort column and direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortState {
    pub column: Option<SortColumn>,
    pub ascending: bool,
}

impl Default for SortState {
    fn default() -> Self {
        Self {
            column: None,
            ascending: true,
        }
    }
}

impl SortState {
    /// Header click: a new column sorts ascending, the same column flips direction.
    pub fn select(&mut self, column: SortColumn) {
        if self.column == Some(column) {
            self.ascending = !self.ascending;
        } else {
            self.column = Some(column);
            self.ascending = true;
        }
    }

    pub fn compare(&self, a: &FineRecord, b: &FineRecord) -> Ordering {
        let Some(column) = self.column else {
            return Ordering::Equal;
        };
        let ord = column.compare(a, b);
        if self.ascending {
            ord
        } else {
            ord.reverse()
        }
    }
}

/// Pure filter / sort operations over the loaded dataset.
pub struct DataProcessor;

impl DataProcessor {
    /// Positions of the records matching `filter`, in dataset order.
    pub fn matching_indices(records: &[FineRecord], filter: &FilterState) -> Vec<usize> {
        let matcher = filter.matcher();
        records
            .iter()
            .enumerate()
            .filter(|(_, record)| matcher.matches(record))
            .map(|(i, _)| i)
            .collect()
    }

    /// Records matching `filter`, in dataset order.
    ///
    /// Reference-returning form of [`Self::matching_indices`] for callers
    /// holding a plain slice; `ViewState` keeps positions instead.
    pub fn filter_records<'a>(records: &'a [FineRecord], filter: &FilterState) -> Vec<&'a FineRecord> {
        let matcher = filter.matcher();
        records.iter().filter(|record| matcher.matches(record)).collect()
    }

    /// Stable in-place sort of a record view.
    ///
    /// Same ordering as [`Self::sort_indices`], applied to references.
    pub fn sort_records(records: &mut [&FineRecord], column: SortColumn, ascending: bool) {
        let state = SortState {
            column: Some(column),
            ascending,
        };
        records.sort_by(|a, b| state.compare(a, b));
    }

    /// Stable in-place sort of positions into `records`.
    pub fn sort_indices(records: &[FineRecord], indices: &mut [usize], sort: &SortState) {
        if sort.column.is_none() {
            return;
        }
        indices.sort_by(|&a, &b| sort.compare(&records[a], &records[b]));
    }

    /// Sorted distinct values of a categorical field, for selector options.
    pub fn distinct_values(records: &[FineRecord], key: GroupKey) -> Vec<String> {
        records
            .iter()
            .map(|record| key.key_of(record))
            .filter(|value| !value.is_empty())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(str::to_string)
            .collect()
    }
}
