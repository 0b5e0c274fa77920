//! JSON file helpers shared by the preparation tools.

use std::fs::{self, File};
use std::io::BufReader;
use std::path::Path;

use color_eyre::eyre::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::PrepError;

/// Read and deserialize a JSON file
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let file = File::open(path).map_err(|source| PrepError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let value = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Failed to parse JSON from {}", path.display()))?;
    Ok(value)
}

/// Write a value as pretty-printed JSON (two-space indent)
pub fn write_json<T: Serialize>(value: &T, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize JSON")?;

    fs::write(path, json).map_err(|source| PrepError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    log::info!("writing dictionary to {}", path.display());
    Ok(())
}
