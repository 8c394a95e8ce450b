// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Result set store.
//!
//! Holds the last successful search response. The store is the single
//! source of truth for the grid; it is only ever replaced wholesale.

use super::search_result::{Metadata, SearchResult};

/// Owner of the current frame paths and their aligned metadata.
#[derive(Debug, Default)]
pub struct ResultSetStore {
    frame_paths: Vec<String>,
    metadata_list: Vec<Metadata>,
    generation: u64,
}

impl ResultSetStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole result set with a new response.
    ///
    /// Misaligned lists are truncated to the shorter length so every index
    /// keeps pointing at a matching path and metadata pair.
    pub fn replace(&mut self, result: SearchResult) {
        let aligned = result.is_aligned();
        let SearchResult {
            mut frame_paths,
            mut metadata_list,
            ..
        } = result;

        if !aligned {
            log::warn!(
                "Misaligned search result: {} frames, {} metadata entries",
                frame_paths.len(),
                metadata_list.len()
            );
            let len = frame_paths.len().min(metadata_list.len());
            frame_paths.truncate(len);
            metadata_list.truncate(len);
        }

        self.frame_paths = frame_paths;
        self.metadata_list = metadata_list;
        self.generation += 1;

        log::info!(
            "Result set replaced (generation {}): {} frames",
            self.generation,
            self.frame_paths.len()
        );
    }

    pub fn frame_paths(&self) -> &[String] {
        &self.frame_paths
    }

    pub fn frame_path(&self, index: usize) -> Option<&str> {
        self.frame_paths.get(index).map(String::as_str)
    }

    pub fn metadata(&self, index: usize) -> Option<&Metadata> {
        self.metadata_list.get(index)
    }

    pub fn len(&self) -> usize {
        self.frame_paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frame_paths.is_empty()
    }

    /// Owned copy of the frame list, taken when a viewer session opens.
    pub fn snapshot_frames(&self) -> Vec<String> {
        self.frame_paths.clone()
    }

    /// Number of replacements so far. Zero means no search has succeeded yet.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Rebuild a response from the stored lists (used for export).
    pub fn as_result(&self) -> SearchResult {
        SearchResult {
            frame_paths: self.frame_paths.clone(),
            metadata_list: self.metadata_list.clone(),
            error: None,
        }
    }
}
