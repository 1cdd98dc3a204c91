//! Fine Aggregator Module
//! Grouped sums, magnitude histogram and headline metrics over a record view.

use crate::data::{FineRecord, GroupKey};
use statrs::statistics::{Data, Median, Statistics};
use std::collections::{BTreeMap, HashMap, HashSet};

/// Summed fines for one group key.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupTotal {
    pub key: String,
    pub total: u64,
    pub count: usize,
}

/// Half-open magnitude range `[lower, upper)`; `upper == None` is unbounded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BucketSpec {
    pub upper: Option<u64>,
    pub label: &'static str,
}

/// Fine size bins, ascending.
pub const FINE_BUCKETS: [BucketSpec; 7] = [
    BucketSpec { upper: Some(10_000_000), label: "<10M" },
    BucketSpec { upper: Some(50_000_000), label: "10M-50M" },
    BucketSpec { upper: Some(100_000_000), label: "50M-100M" },
    BucketSpec { upper: Some(500_000_000), label: "100M-500M" },
    BucketSpec { upper: Some(1_000_000_000), label: "500M-1B" },
    BucketSpec { upper: Some(5_000_000_000), label: "1B-5B" },
    BucketSpec { upper: None, label: ">5B" },
];

#[derive(Debug, Clone, PartialEq)]
pub struct HistogramBucket {
    pub label: String,
    pub count: usize,
}

/// Headline metrics for the summary cards.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Summary {
    pub total: u64,
    pub count: usize,
    pub companies: usize,
    pub max: Option<u64>,
    /// Sum of the alternate-unit amounts that are present.
    pub total_alt: f64,
    pub mean: Option<f64>,
    pub median: Option<f64>,
}

/// Stateless reductions over the current (filtered) view.
pub struct FineAggregator;

impl FineAggregator {
    /// Sum fines per key, largest total first. Ties keep key order.
    /// Sums saturate at `u64::MAX`.
    pub fn group_totals(records: &[&FineRecord], key: GroupKey) -> Vec<GroupTotal> {
        let mut sums: HashMap<&str, (u64, usize)> = HashMap::new();
        for record in records {
            let entry = sums.entry(key.key_of(record)).or_default();
            entry.0 = entry.0.saturating_add(record.fine);
            entry.1 += 1;
        }

        let mut totals: Vec<GroupTotal> = sums
            .into_iter()
            .map(|(key, (total, count))| GroupTotal {
                key: key.to_string(),
                total,
                count,
            })
            .collect();
        totals.sort_by(|a, b| b.total.cmp(&a.total).then_with(|| a.key.cmp(&b.key)));
        totals
    }

    /// Keep only the `n` largest groups.
    pub fn top_n(mut totals: Vec<GroupTotal>, n: usize) -> Vec<GroupTotal> {
        totals.truncate(n);
        totals
    }

    /// Per-year totals in chronological order.
    pub fn yearly_totals(records: &[&FineRecord]) -> Vec<GroupTotal> {
        let mut years: BTreeMap<&str, (u64, usize)> = BTreeMap::new();
        for record in records {
            let entry = years.entry(record.year()).or_default();
            entry.0 = entry.0.saturating_add(record.fine);
            entry.1 += 1;
        }

        years
            .into_iter()
            .map(|(year, (total, count))| GroupTotal {
                key: year.to_string(),
                total,
                count,
            })
            .collect()
    }

    /// Index of the first bucket whose upper bound exceeds `fine`.
    pub fn bucket_index(fine: u64) -> usize {
        FINE_BUCKETS
            .iter()
            .position(|bucket| bucket.upper.map_or(true, |upper| fine < upper))
            .unwrap_or(FINE_BUCKETS.len() - 1)
    }

    /// Count of fines per magnitude bucket.
    pub fn histogram(records: &[&FineRecord]) -> Vec<HistogramBucket> {
        let mut counts = [0usize; FINE_BUCKETS.len()];
        for record in records {
            counts[Self::bucket_index(record.fine)] += 1;
        }

        FINE_BUCKETS
            .iter()
            .zip(counts)
            .map(|(bucket, count)| HistogramBucket {
                label: bucket.label.to_string(),
                count,
            })
            .collect()
    }

    pub fn summary(records: &[&FineRecord]) -> Summary {
        if records.is_empty() {
            return Summary::default();
        }

        let companies: HashSet<&str> = records.iter().map(|r| r.company.as_str()).collect();
        let values: Vec<f64> = records.iter().map(|r| r.fine as f64).collect();
        let mean = values.iter().mean();
        let median = Data::new(values).median();

        Summary {
            total: records.iter().fold(0u64, |acc, r| acc.saturating_add(r.fine)),
            count: records.len(),
            companies: companies.len(),
            max: records.iter().map(|r| r.fine).max(),
            total_alt: records.iter().filter_map(|r| r.fine_alt).sum(),
            mean: Some(mean),
            median: Some(median),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::record::sample;

    fn two_rows() -> Vec<FineRecord> {
        vec![
            sample("1", "A", "Co1", "Mining", "North", 1000, "2020-01-01"),
            sample("2", "B", "Co2", "Energy", "South", 2000, "2021-06-15"),
        ]
    }

    fn many_rows() -> Vec<FineRecord> {
        vec![
            sample("1", "A", "Co1", "Mining", "North", 5_000_000, "2020-01-01"),
            sample("2", "B", "Co2", "Energy", "South", 10_000_000, "2020-03-01"),
            sample("3", "C", "Co1", "Mining", "South", 75_000_000, "2021-01-01"),
            sample("4", "D", "Co3", "Water", "East", 999_999_999, "2022-07-07"),
            sample("5", "E", "Co4", "Energy", "East", 6_000_000_000, "2022-08-08"),
            sample("6", "F", "Co2", "Water", "North", 0, "2019-12-31"),
        ]
    }

    #[test]
    fn test_two_row_example() {
        let data = two_rows();
        let view: Vec<&FineRecord> = data.iter().collect();

        let summary = FineAggregator::summary(&view);
        assert_eq!(summary.total, 3000);
        assert_eq!(summary.count, 2);
        assert_eq!(summary.companies, 2);
        assert_eq!(summary.max, Some(2000));
        assert_eq!(summary.mean, Some(1500.0));
        assert_eq!(summary.median, Some(1500.0));

        let categories = FineAggregator::group_totals(&view, GroupKey::Category);
        let bars: Vec<(&str, u64)> = categories.iter().map(|g| (g.key.as_str(), g.total)).collect();
        assert_eq!(bars, vec![("Energy", 2000), ("Mining", 1000)]);

        let years = FineAggregator::yearly_totals(&view);
        let years: Vec<(&str, u64)> = years.iter().map(|g| (g.key.as_str(), g.total)).collect();
        assert_eq!(years, vec![("2020", 1000), ("2021", 2000)]);
    }

    #[test]
    fn test_group_sums_add_up_to_total() {
        let data = many_rows();
        let view: Vec<&FineRecord> = data.iter().collect();
        let total = FineAggregator::summary(&view).total;

        for key in [GroupKey::Category, GroupKey::Region, GroupKey::Company, GroupKey::Year] {
            let sum: u64 = FineAggregator::group_totals(&view, key)
                .iter()
                .map(|g| g.total)
                .sum();
            assert_eq!(sum, total, "{:?}", key);
        }
    }

    #[test]
    fn test_group_totals_sorted_descending_with_top_n() {
        let data = many_rows();
        let view: Vec<&FineRecord> = data.iter().collect();
        let companies = FineAggregator::group_totals(&view, GroupKey::Company);

        assert!(companies.windows(2).all(|w| w[0].total >= w[1].total));
        assert_eq!(companies[0].key, "Co4");
        let co1 = companies.iter().find(|g| g.key == "Co1").unwrap();
        assert_eq!(co1.total, 80_000_000);
        assert_eq!(co1.count, 2);

        let top = FineAggregator::top_n(companies, 2);
        assert_eq!(top.len(), 2);
        assert_eq!(top[1].key, "Co3");
    }

    #[test]
    fn test_bucket_boundaries_are_half_open() {
        assert_eq!(FineAggregator::bucket_index(0), 0);
        assert_eq!(FineAggregator::bucket_index(9_999_999), 0);
        assert_eq!(FineAggregator::bucket_index(10_000_000), 1);
        assert_eq!(FineAggregator::bucket_index(499_999_999), 3);
        assert_eq!(FineAggregator::bucket_index(5_000_000_000), 6);
        assert_eq!(FineAggregator::bucket_index(u64::MAX), 6);
    }

    #[test]
    fn test_histogram_counts_every_record() {
        let data = many_rows();
        let view: Vec<&FineRecord> = data.iter().collect();
        let histogram = FineAggregator::histogram(&view);

        assert_eq!(histogram.len(), FINE_BUCKETS.len());
        assert_eq!(histogram.iter().map(|b| b.count).sum::<usize>(), view.len());
        let counts: Vec<usize> = histogram.iter().map(|b| b.count).collect();
        assert_eq!(counts, vec![2, 1, 1, 0, 1, 0, 1]);
        assert_eq!(histogram[6].label, ">5B");
    }

    #[test]
    fn test_empty_view() {
        let view: Vec<&FineRecord> = Vec::new();
        let summary = FineAggregator::summary(&view);
        assert_eq!(summary, Summary::default());
        assert_eq!(summary.max, None);
        assert!(FineAggregator::group_totals(&view, GroupKey::Region).is_empty());
        assert!(FineAggregator::histogram(&view).iter().all(|b| b.count == 0));
    }

    #[test]
    fn test_alt_total_skips_missing() {
        let mut data = two_rows();
        data[0].fine_alt = Some(1.5);
        let view: Vec<&FineRecord> = data.iter().collect();
        assert_eq!(FineAggregator::summary(&view).total_alt, 1.5);
    }

    #[test]
    fn test_huge_amounts_saturate() {
        let data = vec![
            sample("1", "A", "Co1", "Mining", "North", 10_000_000_000_000_000_000, "2020-01-01"),
            sample("2", "B", "Co2", "Mining", "North", 10_000_000_000_000_000_000, "2020-02-01"),
        ];
        let view: Vec<&FineRecord> = data.iter().collect();

        assert_eq!(FineAggregator::summary(&view).total, u64::MAX);
        assert_eq!(
            FineAggregator::group_totals(&view, GroupKey::Category)[0].total,
            u64::MAX
        );
        assert_eq!(FineAggregator::yearly_totals(&view)[0].total, u64::MAX);
    }
}
