// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Result set export.
//!
//! This module writes the current search result to disk in YAML or JSON
//! format, using the same field names as the search service.

use crate::models::search_result::SearchResult;
use anyhow::{bail, Result};
use std::path::Path;

/// Export a search result to YAML format.
pub fn export_yaml(result: &SearchResult, path: &Path) -> Result<()> {
    let yaml = serde_yaml::to_string(result)?;
    std::fs::write(path, yaml)?;
    Ok(())
}

/// Export a search result to JSON format.
pub fn export_json(result: &SearchResult, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(result)?;
    std::fs::write(path, json)?;
    Ok(())
}

/// Export choosing the format from the file extension.
pub fn export(result: &SearchResult, path: &Path) -> Result<()> {
    match path.extension().and_then(|s| s.to_str()) {
        Some("yaml") | Some("yml") => export_yaml(result, path),
        Some("json") => export_json(result, path),
        other => bail!("Unsupported file extension: {:?}", other),
    }
}
