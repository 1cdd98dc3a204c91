//! View state: the loaded dataset plus the filter/sort cursor over it.

use crate::data::processor::{DataProcessor, FilterState, SortColumn, SortState};
use crate::data::{FineRecord, GroupKey};

/// Owns the full dataset and the derived filtered/sorted view.
///
/// The full dataset is never mutated; every filter or sort change recomputes
/// `visible` from scratch.
#[derive(Debug, Default)]
pub struct ViewState {
    records: Vec<FineRecord>,
    filter: FilterState,
    sort: SortState,
    visible: Vec<usize>,
    categories: Vec<String>,
    regions: Vec<String>,
}

impl ViewState {
    pub fn new(records: Vec<FineRecord>) -> Self {
        let categories = DataProcessor::distinct_values(&records, GroupKey::Category);
        let regions = DataProcessor::distinct_values(&records, GroupKey::Region);
        let visible = (0..records.len()).collect();

        Self {
            records,
            filter: FilterState::default(),
            sort: SortState::default(),
            visible,
            categories,
            regions,
        }
    }

    pub fn records(&self) -> &[FineRecord] {
        &self.records
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    pub fn sort(&self) -> SortState {
        self.sort
    }

    /// Category options for the selector, sorted.
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    /// Region options for the selector, sorted.
    pub fn regions(&self) -> &[String] {
        &self.regions
    }

    pub fn visible_len(&self) -> usize {
        self.visible.len()
    }

    /// Record at `row` of the current view.
    pub fn row(&self, row: usize) -> Option<&FineRecord> {
        self.visible.get(row).map(|&i| &self.records[i])
    }

    /// The filtered, sorted view.
    pub fn visible(&self) -> Vec<&FineRecord> {
        self.visible.iter().map(|&i| &self.records[i]).collect()
    }

    /// Replace the filter. Returns `true` when the view changed.
    pub fn set_filter(&mut self, filter: FilterState) -> bool {
        if filter == self.filter {
            return false;
        }
        self.filter = filter;
        self.refresh();
        true
    }

    /// Header click on `column`.
    pub fn sort_by(&mut self, column: SortColumn) {
        self.sort.select(column);
        DataProcessor::sort_indices(&self.records, &mut self.visible, &self.sort);
    }

    fn refresh(&mut self) {
        self.visible = DataProcessor::matching_indices(&self.records, &self.filter);
        DataProcessor::sort_indices(&self.records, &mut self.visible, &self.sort);
    }
}
