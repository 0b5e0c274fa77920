//! # WrenchPrep - Input preparation for WRENCH workflow simulations
//!
//! This library generates the platform description and the site capacity
//! tables consumed by a WRENCH/SimGrid workflow-scheduling simulation of
//! the ATLAS distributed computing grid.
//!
//! ## Overview
//!
//! Each tool reads one or more flat files (CSV or JSON), applies a fixed
//! sequence of joins, maxima or unit conversions, and writes a derived JSON
//! or XML file. Tools only communicate through the files they produce.
//!
//! ## Architecture
//!
//! - `platform`: SimGrid platform model, builder and XML serializer
//! - `config`: platform template (host speeds, disks, link) and validation
//! - `config_loader`: YAML template loading
//! - `sites`: per-queue lookups, capacity combiner and verifier
//! - `metrics`: core-count extraction and site-pair bandwidth reduction
//! - `workflow`: post-processing of WRENCH execution dumps
//! - `utils`: JSON file helpers and validation
//! - `error`: error taxonomy shared by the tools
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use std::path::Path;
//! use wrenchprep::config::PlatformTemplate;
//! use wrenchprep::platform::{build_platform, write_platform, XmlStyle};
//!
//! let platform = build_platform(10, &PlatformTemplate::default())?;
//! write_platform(&platform, &XmlStyle::default(), Path::new("platform.xml"))?;
//! # Ok::<(), color_eyre::Report>(())
//! ```
//!
//! ## Pipeline
//!
//! ```bash
//! platform-gen --filename platform.xml --nodes 10
//! site-prep max-cores --csv grafana-6months.csv --output number_of_cpus.json
//! site-prep combine --output queues-corepower_based.json
//! site-prep verify --input queues-corepower_based.json
//! site-prep merge-connections --data-dir data --output combined_connections.json
//! site-prep reduce-connections --input combined_connections.json --output max_connections.json
//! ```
//!
//! ## Error Handling
//!
//! File-level operations return `color_eyre::Result` with the failing path
//! in the error context. Domain failures are [`error::PrepError`] values;
//! missing lookup data is logged and skipped rather than aborting a run.

pub mod config;
pub mod config_loader;
pub mod error;
pub mod metrics;
pub mod platform;
pub mod sites;
pub mod utils;
pub mod workflow;
