//! Per-queue lookup tables.
//!
//! Three JSON files keyed by PanDA queue name feed the capacity combiner:
//!
//! - core counts: `{"AGLT2": 4096, ...}`
//! - core power: `{"AGLT2": {"corepower": 11.8, ...}, ...}`
//! - storage endpoints: `{"AGLT2": {"RSE": "AGLT2_DATADISK", ...}, ...}`
//!
//! Lookups return `Option`s. Only an absent key (or absent field) counts as
//! missing; a present zero is a real measurement.

use std::collections::BTreeMap;
use std::path::Path;

use color_eyre::eyre::Result;
use serde::{Deserialize, Serialize};

use crate::utils::read_json;

/// One or more Rucio storage elements serving a queue
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Rse {
    One(String),
    Many(Vec<String>),
}

impl Rse {
    /// True when no storage element name is present
    pub fn is_empty(&self) -> bool {
        match self {
            Rse::One(name) => name.trim().is_empty(),
            Rse::Many(names) => names.iter().all(|n| n.trim().is_empty()),
        }
    }
}

/// Core power record; other fields in the source file are ignored
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CorePowerEntry {
    #[serde(default)]
    pub corepower: Option<f64>,
}

/// Storage element record; other fields in the source file are ignored
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RseEntry {
    #[serde(rename = "RSE", default)]
    pub rse: Option<Rse>,
}

/// The three per-queue tables used to compute site capacity
#[derive(Debug, Default)]
pub struct SiteLookups {
    pub cores: BTreeMap<String, u64>,
    pub corepower: BTreeMap<String, CorePowerEntry>,
    pub rses: BTreeMap<String, RseEntry>,
}

impl SiteLookups {
    /// Load all three tables from JSON files
    pub fn load(cores_path: &Path, corepower_path: &Path, rse_path: &Path) -> Result<Self> {
        let lookups = Self {
            cores: read_json(cores_path)?,
            corepower: read_json(corepower_path)?,
            rses: read_json(rse_path)?,
        };
        log::info!(
            "Loaded {} core counts, {} corepower entries, {} RSE entries",
            lookups.cores.len(),
            lookups.corepower.len(),
            lookups.rses.len()
        );
        Ok(lookups)
    }

    /// Queues known to the RSE table, in sorted order
    pub fn queues(&self) -> impl Iterator<Item = &str> {
        self.rses.keys().map(String::as_str)
    }

    pub fn cores(&self, queue: &str) -> Option<u64> {
        self.cores.get(queue).copied()
    }

    pub fn corepower(&self, queue: &str) -> Option<f64> {
        self.corepower.get(queue).and_then(|entry| entry.corepower)
    }

    /// Storage element for a queue, if one is named
    pub fn rse(&self, queue: &str) -> Option<&Rse> {
        self.rses
            .get(queue)
            .and_then(|entry| entry.rse.as_ref())
            .filter(|rse| !rse.is_empty())
    }
}
