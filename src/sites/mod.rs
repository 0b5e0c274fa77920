//! Site capacity preparation.
//!
//! Builds the per-queue `{RSE, GFLOPS}` table used to size compute
//! services in the simulation, and checks it for gaps.

pub mod combine;
pub mod lookups;
pub mod verify;

pub use combine::{combine_files, combine_sites, CombineReport, SiteCapacity, DEFAULT_SCALE_FACTOR};
pub use lookups::{Rse, SiteLookups};
pub use verify::{verify_capacities, verify_file, VerifyReport};
