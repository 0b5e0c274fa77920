//! Monitoring-data reductions: core counts from CSV exports and site-pair
//! bandwidths from transfer-metric snapshots.

pub mod connections;
pub mod cores;

pub use connections::{
    merge_snapshot_files, merge_snapshots, reduce_file, reduce_to_max, snapshot_files_in, BandwidthSample,
    ConnectionSamples, DateOrder, MergeReport, ReduceReport, DEFAULT_BANDWIDTH_SCALE,
};
pub use cores::{extract_max_values, max_column_values};
