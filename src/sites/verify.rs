//! Combined capacity verification.
//!
//! Scans a combined capacity file and logs every queue lacking a GFLOPS
//! value or a storage element. Nothing here fails on missing data.

use std::collections::BTreeMap;
use std::path::Path;

use color_eyre::eyre::Result;
use log::{info, warn};
use serde::Deserialize;

use crate::sites::lookups::Rse;
use crate::utils::read_json;

/// Lenient view of a combined record
#[derive(Debug, Default, Deserialize)]
pub struct CapacityEntry {
    #[serde(rename = "GFLOPS", default)]
    pub gflops: Option<f64>,
    #[serde(rename = "RSE", default)]
    pub rse: Option<Rse>,
}

/// Result of a verification pass
#[derive(Debug, Default, PartialEq)]
pub struct VerifyReport {
    pub total: usize,
    pub missing_gflops: Vec<String>,
    pub missing_rse: Vec<String>,
}

impl VerifyReport {
    pub fn is_complete(&self) -> bool {
        self.missing_gflops.is_empty() && self.missing_rse.is_empty()
    }
}

/// Check every queue for populated GFLOPS and RSE fields
pub fn verify_capacities(queues: &BTreeMap<String, CapacityEntry>) -> VerifyReport {
    let mut report = VerifyReport {
        total: queues.len(),
        ..Default::default()
    };

    for (queue, entry) in queues {
        if entry.gflops.is_none() {
            warn!("GFLOPS unknown for {}", queue);
            report.missing_gflops.push(queue.clone());
        }

        let has_rse = entry.rse.as_ref().is_some_and(|rse| !rse.is_empty());
        if !has_rse {
            warn!("RSE(s) unknown for {}", queue);
            report.missing_rse.push(queue.clone());
        }
    }

    info!("verified {} queues", report.total);
    report
}

/// Load a combined capacity file and verify it
pub fn verify_file(path: &Path) -> Result<VerifyReport> {
    let queues: BTreeMap<String, CapacityEntry> = read_json(path)?;
    Ok(verify_capacities(&queues))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_complete_file() {
        let queues = serde_json::from_str(
            r#"{"A": {"RSE": "A_DISK", "GFLOPS": 1000}, "B": {"RSE": ["B_DISK"], "GFLOPS": 0}}"#,
        )
        .unwrap();
        let report = verify_capacities(&queues);
        assert_eq!(report.total, 2);
        assert!(report.is_complete());
    }

    #[test]
    fn test_missing_fields_are_reported() {
        let queues = serde_json::from_str(
            r#"{
                "A": {"RSE": "A_DISK"},
                "B": {"GFLOPS": 10},
                "C": {"RSE": "", "GFLOPS": null},
                "D": {"RSE": "D_DISK", "GFLOPS": 5}
            }"#,
        )
        .unwrap();
        let report = verify_capacities(&queues);
        assert_eq!(report.total, 4);
        assert_eq!(report.missing_gflops, vec!["A".to_string(), "C".to_string()]);
        assert_eq!(report.missing_rse, vec!["B".to_string(), "C".to_string()]);
        assert!(!report.is_complete());
    }
}
