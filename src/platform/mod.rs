//! # Platform Generation Module
//!
//! Produces the SimGrid platform description that a WRENCH simulation
//! loads at start-up. Generation is split in two passes:
//!
//! - `builder.rs`: assembles the in-memory [`Platform`] from a node count
//!   and a [`PlatformTemplate`](crate::config::PlatformTemplate)
//! - `xml.rs`: renders that document as indented XML
//!
//! ## Generated Topology
//!
//! For `N` nodes the zone holds `2N + 3` hosts (controller, `N` compute
//! hosts, `N` storage hosts, cloud head and cloud VM), one shared link and
//! `4N + 2` routes, all through that link.
//!
//! ## Example
//!
//! ```rust
//! use wrenchprep::config::PlatformTemplate;
//! use wrenchprep::platform::{build_platform, to_xml, XmlStyle};
//!
//! let platform = build_platform(2, &PlatformTemplate::default())?;
//! let xml = to_xml(&platform, &XmlStyle::default())?;
//! assert!(xml.contains("<host id=\"ComputeHost2\""));
//! # Ok::<(), color_eyre::Report>(())
//! ```

pub mod builder;
pub mod types;
pub mod xml;

pub use builder::{build_platform, build_routes};
pub use types::{Disk, Host, Link, Platform, Property, Route, Zone};
pub use xml::{to_xml, write_platform, XmlStyle};
