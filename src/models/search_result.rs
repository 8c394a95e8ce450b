// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Search response data structures.
//!
//! This module defines the payload returned by the `/search` endpoint:
//! an ordered list of frame paths and an index-aligned list of metadata.

use serde::{Deserialize, Serialize};

/// Descriptive record attached to one frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    pub video_folder: String,
    pub frame_number: i64,
    pub frame_idx: i64,
    pub pts_time: f64,
    /// Copy of the aligned frame path so the inspector is self-contained.
    #[serde(default)]
    pub frame_path: String,
}

/// One search response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    #[serde(default)]
    pub frame_paths: Vec<String>,
    #[serde(default)]
    pub metadata_list: Vec<Metadata>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SearchResult {
    /// Parse a JSON response body.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Whether `frame_paths` and `metadata_list` have the same length.
    pub fn is_aligned(&self) -> bool {
        self.frame_paths.len() == self.metadata_list.len()
    }
}

/// Build an aligned result for the given paths (tests only).
#[cfg(test)]
pub(crate) fn sample_result(paths: &[&str]) -> SearchResult {
    let metadata_list = paths
        .iter()
        .enumerate()
        .map(|(i, path)| Metadata {
            video_folder: format!("L01_V{:03}", i + 1),
            frame_number: i as i64,
            frame_idx: (i * 25) as i64,
            pts_time: i as f64 * 1.5,
            frame_path: path.to_string(),
        })
        .collect();

    SearchResult {
        frame_paths: paths.iter().map(|p| p.to_string()).collect(),
        metadata_list,
        error: None,
    }
}
