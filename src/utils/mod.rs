//! Shared utilities: JSON file IO and validation.

pub mod json;
pub mod validation;

pub use json::{read_json, write_json};
pub use validation::{validate_node_count, validate_platform};
