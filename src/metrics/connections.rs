//! Site-to-site transfer bandwidth.
//!
//! Rucio publishes transfer metrics as snapshots keyed by `"SRC:DST"` site
//! pairs. Two passes turn a series of snapshots into link capacities:
//!
//! 1. [`merge_snapshots`] collects every `mbps.dashb` sample per pair
//! 2. [`reduce_to_max`] takes the largest sample per pair, scales it and
//!    folds `A:B` and `B:A` into one entry

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use color_eyre::eyre::{Context, Result};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use serde_json::Number;

use crate::error::PrepError;
use crate::utils::{read_json, write_json};

/// Site name used by the metrics service when a site cannot be resolved
pub const UNKNOWN_SITE: &str = "UNKNOWN";

/// Converts dashboard throughput figures to simulated link bandwidth
pub const DEFAULT_BANDWIDTH_SCALE: f64 = 2.2595857275527105;

/// One throughput sample averaged over week/day/hour windows
///
/// Window values keep their JSON number form so merged files reproduce the
/// snapshot values exactly.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BandwidthSample {
    #[serde(rename = "1w", default, skip_serializing_if = "Option::is_none")]
    pub week: Option<Number>,
    #[serde(rename = "1d", default, skip_serializing_if = "Option::is_none")]
    pub day: Option<Number>,
    #[serde(rename = "1h", default, skip_serializing_if = "Option::is_none")]
    pub hour: Option<Number>,
    /// Any other fields are carried through untouched
    #[serde(flatten)]
    pub other: BTreeMap<String, serde_json::Value>,
}

impl BandwidthSample {
    /// Largest value across the three windows, if any is present
    pub fn max_value(&self) -> Option<f64> {
        [&self.week, &self.day, &self.hour]
            .into_iter()
            .flatten()
            .filter_map(Number::as_f64)
            .fold(None, |max: Option<f64>, v| Some(max.map_or(v, |m| m.max(v))))
    }
}

/// Snapshot record for one connection
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConnectionRecord {
    #[serde(default)]
    pub mbps: Option<Throughput>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Throughput {
    #[serde(default)]
    pub dashb: Option<BandwidthSample>,
}

/// A metrics snapshot: `"SRC:DST"` to record
pub type Snapshot = BTreeMap<String, ConnectionRecord>;

/// Merged samples: `"SRC:DST"` to every sample seen across snapshots
pub type ConnectionSamples = BTreeMap<String, Vec<BandwidthSample>>;

/// Split a `"SRC:DST"` key into its two site names
pub fn parse_connection(key: &str) -> Result<(&str, &str), PrepError> {
    let mut parts = key.split(':');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(src), Some(dst), None) if !src.is_empty() && !dst.is_empty() => Ok((src, dst)),
        _ => Err(PrepError::InvalidArgument(format!(
            "malformed connection key '{}' (expected SRC:DST)",
            key
        ))),
    }
}

/// `A:B` becomes `B:A`
pub fn inverse(connection: &str) -> Result<String, PrepError> {
    let (src, dst) = parse_connection(connection)?;
    Ok(format!("{}:{}", dst, src))
}

/// Outcome of merging a series of snapshots
#[derive(Debug, Default)]
pub struct MergeReport {
    pub connections: ConnectionSamples,
    /// Malformed keys that were skipped
    pub malformed: Vec<PrepError>,
}

impl MergeReport {
    fn log_summary(&self) {
        info!(
            "There were {} empty connections out of a total of {}",
            self.empty_connections(),
            self.connections.len()
        );
    }

    /// Connections seen in some snapshot but never with a sample
    pub fn empty_connections(&self) -> usize {
        self.connections.values().filter(|s| s.is_empty()).count()
    }
}

/// Fold one snapshot into the merged samples
///
/// Self-connections and pairs involving the unknown site are ignored. A
/// connection is registered even when the snapshot carries no sample for it.
pub fn merge_snapshot(report: &mut MergeReport, snapshot: &Snapshot) {
    for (connection, record) in snapshot {
        let (src, dst) = match parse_connection(connection) {
            Ok(pair) => pair,
            Err(err) => {
                warn!("{}", err);
                report.malformed.push(err);
                continue;
            }
        };
        if src == dst || src == UNKNOWN_SITE || dst == UNKNOWN_SITE {
            continue;
        }

        let samples = report.connections.entry(connection.clone()).or_default();

        let Some(mbps) = &record.mbps else {
            continue;
        };
        match &mbps.dashb {
            Some(sample) => samples.push(sample.clone()),
            None => warn!("no dashb info for connection {}", connection),
        }
    }
}

/// Merge snapshots in the given order
pub fn merge_snapshots<'a>(snapshots: impl IntoIterator<Item = &'a Snapshot>) -> MergeReport {
    let mut report = MergeReport::default();
    for snapshot in snapshots {
        merge_snapshot(&mut report, snapshot);
    }
    report.log_summary();
    report
}

/// Field order of the date in snapshot file names
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DateOrder {
    /// `dd.mm.yyyy`
    #[default]
    DayFirst,
    /// `mm.dd.yyyy`
    MonthFirst,
}

impl DateOrder {
    fn formats(self) -> [&'static str; 2] {
        match self {
            DateOrder::DayFirst => ["%d.%m.%Y", "%m.%d.%Y"],
            DateOrder::MonthFirst => ["%m.%d.%Y", "%d.%m.%Y"],
        }
    }
}

/// Date embedded in a snapshot file name such as `latest-14.02.2024.json`
///
/// The preferred order is tried first. A name that is only valid in the
/// other order (e.g. `01.23.2024` when day-first) falls back to it, so
/// ambiguous names like `01.10.2024` follow `order`.
pub fn snapshot_date(path: &Path, order: DateOrder) -> Option<NaiveDate> {
    let stem = path.file_stem()?.to_str()?;
    let date = stem.rsplit('-').next()?;
    order
        .formats()
        .into_iter()
        .find_map(|format| NaiveDate::parse_from_str(date, format).ok())
}

/// JSON snapshot files in a directory, oldest first
///
/// Files without a recognisable date sort after dated ones, by name. A
/// directory mixing both date orders cannot be sorted reliably; pass such
/// files explicitly in the wanted order instead.
pub fn snapshot_files_in(dir: &Path, order: DateOrder) -> Result<Vec<PathBuf>> {
    let entries = std::fs::read_dir(dir)
        .with_context(|| format!("Failed to read snapshot directory {}", dir.display()))?;

    let mut files = Vec::new();
    for entry in entries {
        let path = entry
            .with_context(|| format!("Failed to list {}", dir.display()))?
            .path();
        if path.extension().is_some_and(|ext| ext == "json") {
            files.push(path);
        }
    }

    files.sort_by(|a, b| {
        let (da, db) = (snapshot_date(a, order), snapshot_date(b, order));
        (da.is_none(), da, a.file_name()).cmp(&(db.is_none(), db, b.file_name()))
    });
    Ok(files)
}

/// Read snapshot files in order, merge them and write the result
pub fn merge_snapshot_files(paths: &[PathBuf], output_path: &Path) -> Result<MergeReport> {
    let mut report = MergeReport::default();
    for path in paths {
        info!("processing {}", path.display());
        let snapshot: Snapshot = read_json(path)?;
        merge_snapshot(&mut report, &snapshot);
    }
    report.log_summary();

    write_json(&report.connections, output_path)?;
    Ok(report)
}

/// Outcome of reducing merged samples to one value per site pair
#[derive(Debug, Default)]
pub struct ReduceReport {
    /// One entry per unordered pair
    pub reduced: BTreeMap<String, f64>,
    pub fastest: Option<(String, f64)>,
    pub slowest: Option<(String, f64)>,
    /// Connections with samples but no window value at all
    pub skipped: Vec<String>,
}

/// Reduce merged samples to the scaled maximum per unordered pair
///
/// For each directed connection the largest `1w`/`1d`/`1h` value across all
/// samples is scaled by `scale`. `A:B` and `B:A` then collapse onto the key
/// that sorts first, holding the larger of the two values.
pub fn reduce_to_max(connections: &ConnectionSamples, scale: f64) -> ReduceReport {
    let mut report = ReduceReport::default();
    let mut maxima: BTreeMap<&str, f64> = BTreeMap::new();

    for (connection, samples) in connections {
        if samples.is_empty() {
            continue;
        }
        if let Err(err) = parse_connection(connection) {
            warn!("{}", err);
            continue;
        }
        let highest = samples
            .iter()
            .filter_map(BandwidthSample::max_value)
            .reduce(f64::max);
        match highest {
            Some(value) => {
                maxima.insert(connection.as_str(), value * scale);
            }
            None => {
                warn!("no max value found for {}", connection);
                report.skipped.push(connection.clone());
            }
        }
    }

    for (&connection, &value) in &maxima {
        if report.fastest.as_ref().map_or(true, |(_, v)| value > *v) {
            report.fastest = Some((connection.to_string(), value));
        }
        if report.slowest.as_ref().map_or(true, |(_, v)| value < *v) {
            report.slowest = Some((connection.to_string(), value));
        }
    }

    for (&connection, &value) in &maxima {
        let Ok(inv) = inverse(connection) else {
            continue;
        };
        if report.reduced.contains_key(&inv) {
            continue;
        }
        let reverse = maxima.get(inv.as_str()).copied();
        let value = reverse.map_or(value, |r| value.max(r));
        report.reduced.insert(connection.to_string(), value);
    }

    if let Some((connection, value)) = &report.fastest {
        info!("fastest connection: {} ({})", connection, value);
    }
    if let Some((connection, value)) = &report.slowest {
        info!("slowest connection: {} ({})", connection, value);
    }
    info!(
        "total number of connections (inverse connections removed): {}",
        report.reduced.len()
    );

    report
}

/// Read merged samples, reduce them and write the per-pair maxima
pub fn reduce_file(input_path: &Path, output_path: &Path, scale: f64) -> Result<ReduceReport> {
    let connections: ConnectionSamples = read_json(input_path)?;
    let report = reduce_to_max(&connections, scale);
    write_json(&report.reduced, output_path)?;
    Ok(report)
}
