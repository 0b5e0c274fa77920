//! Site capacity combiner.
//!
//! Joins core counts, core power and storage elements per queue and
//! computes the queue's total GFLOPS as
//! `trunc(corepower) * cores * scale_factor`.

use std::collections::BTreeMap;
use std::path::Path;

use color_eyre::eyre::Result;
use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::error::PrepError;
use crate::sites::lookups::{Rse, SiteLookups};
use crate::utils::write_json;

/// Scale factor applied to the corepower-based estimate
pub const DEFAULT_SCALE_FACTOR: u64 = 10;

/// Combined capacity record written for each queue
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteCapacity {
    #[serde(rename = "RSE")]
    pub rse: Rse,
    #[serde(rename = "GFLOPS")]
    pub gflops: u64,
}

/// Outcome of a combine pass
#[derive(Debug, Default)]
pub struct CombineReport {
    pub combined: BTreeMap<String, SiteCapacity>,
    /// Queues left out, each with the lookup that was missing
    pub skipped: Vec<PrepError>,
}

/// Combine the lookups for every queue in the RSE table
///
/// Queues missing any of the three values are logged and skipped.
pub fn combine_sites(lookups: &SiteLookups, scale_factor: u64) -> CombineReport {
    let mut report = CombineReport::default();

    for queue in lookups.queues() {
        match combine_queue(lookups, queue, scale_factor) {
            Ok(capacity) => {
                report.combined.insert(queue.to_string(), capacity);
            }
            Err(err) => {
                warn!("{}", err);
                report.skipped.push(err);
            }
        }
    }

    info!("combined info for {} queues", report.combined.len());
    report
}

fn combine_queue(lookups: &SiteLookups, queue: &str, scale_factor: u64) -> Result<SiteCapacity, PrepError> {
    let cores = lookups
        .cores(queue)
        .ok_or_else(|| PrepError::missing(queue, "number of CPUs"))?;
    let corepower = lookups
        .corepower(queue)
        .ok_or_else(|| PrepError::missing(queue, "GFLOPS"))?;
    let rse = lookups
        .rse(queue)
        .ok_or_else(|| PrepError::missing(queue, "RSE(s)"))?;

    if corepower < 0.0 || !corepower.is_finite() {
        return Err(PrepError::InvalidArgument(format!(
            "corepower {} for {} is not a valid measurement",
            corepower, queue
        )));
    }

    let gflops = (corepower.trunc() as u64)
        .saturating_mul(cores)
        .saturating_mul(scale_factor);

    Ok(SiteCapacity {
        rse: rse.clone(),
        gflops,
    })
}

/// Load the three lookup files, combine them and write the result
pub fn combine_files(
    cores_path: &Path,
    corepower_path: &Path,
    rse_path: &Path,
    output_path: &Path,
    scale_factor: u64,
) -> Result<CombineReport> {
    let lookups = SiteLookups::load(cores_path, corepower_path, rse_path)?;
    let report = combine_sites(&lookups, scale_factor);
    write_json(&report.combined, output_path)?;
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lookups() -> SiteLookups {
        SiteLookups {
            cores: serde_json::from_str(r#"{"AGLT2": 100, "BNL": 50, "CERN": 10, "ZERO": 8}"#).unwrap(),
            corepower: serde_json::from_str(
                r#"{"AGLT2": {"corepower": 11.8}, "BNL": {"corepower": 9.2}, "ZERO": {"corepower": 0}}"#,
            )
            .unwrap(),
            rses: serde_json::from_str(
                r#"{
                    "AGLT2": {"RSE": "AGLT2_DATADISK"},
                    "BNL": {"RSE": ["BNL_DATADISK", "BNL_SCRATCH"]},
                    "CERN": {"RSE": "CERN_DATADISK"},
                    "NOCORES": {"RSE": "X_DISK"},
                    "ZERO": {"RSE": "ZERO_DISK"}
                }"#,
            )
            .unwrap(),
        }
    }

    #[test]
    fn test_gflops_truncates_corepower() {
        let report = combine_sites(&lookups(), DEFAULT_SCALE_FACTOR);
        assert_eq!(report.combined["AGLT2"].gflops, 11 * 100 * 10);
        assert_eq!(report.combined["BNL"].gflops, 9 * 50 * 10);
        assert_eq!(
            report.combined["BNL"].rse,
            Rse::Many(vec!["BNL_DATADISK".to_string(), "BNL_SCRATCH".to_string()])
        );
    }

    #[test]
    fn test_missing_lookups_are_skipped() {
        let report = combine_sites(&lookups(), DEFAULT_SCALE_FACTOR);
        assert!(!report.combined.contains_key("CERN"));
        assert!(!report.combined.contains_key("NOCORES"));
        assert_eq!(report.skipped.len(), 2);
        assert!(report.skipped.iter().all(PrepError::is_missing_data));

        let messages: Vec<String> = report.skipped.iter().map(|e| e.to_string()).collect();
        assert!(messages.contains(&"GFLOPS unknown for CERN".to_string()));
        assert!(messages.contains(&"number of CPUs unknown for NOCORES".to_string()));
    }

    #[test]
    fn test_zero_corepower_is_kept() {
        let report = combine_sites(&lookups(), DEFAULT_SCALE_FACTOR);
        assert_eq!(report.combined["ZERO"].gflops, 0);
    }

    #[test]
    fn test_scale_factor_applied() {
        let report = combine_sites(&lookups(), 1);
        assert_eq!(report.combined["AGLT2"].gflops, 1100);
    }

    #[test]
    fn test_output_field_names() {
        let report = combine_sites(&lookups(), DEFAULT_SCALE_FACTOR);
        let json = serde_json::to_value(&report.combined["AGLT2"]).unwrap();
        assert_eq!(json, serde_json::json!({"RSE": "AGLT2_DATADISK", "GFLOPS": 11000}));
    }
}
