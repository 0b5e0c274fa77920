//! Core-count extraction from monitoring exports.
//!
//! A Grafana CSV export has one timestamped row per sample and one column
//! per queue. The number of cores available to a queue is taken as the
//! largest value ever recorded in its column.

use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

use color_eyre::eyre::{eyre, Context, Result};
use log::{debug, info};

use crate::utils::write_json;

/// Header of the timestamp column
pub const TIME_COLUMN: &str = "Time";

/// Strip a byte-order mark, whitespace and surrounding quotes from a header
fn clean_header(name: &str) -> String {
    name.trim_start_matches('\u{feff}')
        .trim()
        .trim_matches('"')
        .to_string()
}

/// Parse a cell holding a plain non-negative integer
fn parse_count(cell: &str) -> Option<u64> {
    if cell.is_empty() || !cell.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    cell.parse().ok()
}

/// Compute the per-column maximum over every timestamped row
///
/// Rows with an empty timestamp are ignored, as are cells that are not plain
/// integers. Columns without a single integer cell do not appear in the
/// result.
pub fn max_column_values<R: Read>(input: R) -> Result<BTreeMap<String, u64>> {
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(input);

    let headers: Vec<String> = reader
        .headers()
        .context("Failed to read CSV header")?
        .iter()
        .map(clean_header)
        .collect();

    let time_index = headers
        .iter()
        .position(|h| h == TIME_COLUMN)
        .ok_or_else(|| eyre!("CSV header has no '{}' column", TIME_COLUMN))?;

    let mut max_values: BTreeMap<String, u64> = BTreeMap::new();
    let mut rows = 0usize;

    for (idx, result) in reader.records().enumerate() {
        let row = result.with_context(|| format!("Failed to read row {}", idx + 1))?;

        let timestamp = row.get(time_index).unwrap_or("");
        if timestamp.is_empty() {
            continue;
        }
        rows += 1;

        for (i, cell) in row.iter().enumerate() {
            if i == time_index {
                continue;
            }
            let Some(column) = headers.get(i) else {
                continue;
            };
            if let Some(value) = parse_count(cell) {
                max_values
                    .entry(column.clone())
                    .and_modify(|max| *max = (*max).max(value))
                    .or_insert(value);
            }
        }
    }

    debug!("Scanned {} timestamped rows", rows);
    Ok(max_values)
}

/// Read a CSV export, extract column maxima and write them as JSON
pub fn extract_max_values(csv_path: &Path, output_path: &Path) -> Result<BTreeMap<String, u64>> {
    let file = std::fs::File::open(csv_path)
        .with_context(|| format!("Failed to open CSV file: {}", csv_path.display()))?;

    let max_values = max_column_values(file)?;

    for (column, value) in &max_values {
        debug!("Max value for {}: {}", column, value);
    }
    info!("Found maximum values for {} columns", max_values.len());

    write_json(&max_values, output_path)?;
    Ok(max_values)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_maxima() {
        let csv = "\"Time\",\"AGLT2\",\"BNL\"\n\
                   2024-06-01 00:00:00,100,2000\n\
                   2024-06-02 00:00:00,250,1500\n\
                   2024-06-03 00:00:00,175,\n";
        let max = max_column_values(csv.as_bytes()).unwrap();
        assert_eq!(max.get("AGLT2"), Some(&250));
        assert_eq!(max.get("BNL"), Some(&2000));
    }

    #[test]
    fn test_bom_prefixed_header() {
        let csv = "\u{feff}\"Time\",\"CERN\"\n2024-06-01,42\n";
        let max = max_column_values(csv.as_bytes()).unwrap();
        assert_eq!(max.get("CERN"), Some(&42));
        assert!(!max.contains_key("Time"));
    }

    #[test]
    fn test_non_integer_cells_ignored() {
        let csv = "Time,A,B,C\n\
                   t1,12.5,-3,n/a\n\
                   t2,7, 9,\n";
        let max = max_column_values(csv.as_bytes()).unwrap();
        assert_eq!(max.get("A"), Some(&7));
        assert_eq!(max.get("B"), None);
        assert_eq!(max.get("C"), None);
    }

    #[test]
    fn test_rows_without_timestamp_skipped() {
        let csv = "Time,A\n,999\nt1,5\n";
        let max = max_column_values(csv.as_bytes()).unwrap();
        assert_eq!(max.get("A"), Some(&5));
    }

    #[test]
    fn test_missing_time_column() {
        let csv = "Date,A\n2024,5\n";
        assert!(max_column_values(csv.as_bytes()).is_err());
    }
}
