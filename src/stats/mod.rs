//! Stats module - aggregates over the filtered view

mod aggregator;

pub use aggregator::{
    BucketSpec, FineAggregator, GroupTotal, HistogramBucket, Summary, FINE_BUCKETS,
};
