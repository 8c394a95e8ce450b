// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! View-model for the results area.
//!
//! Everything the results area can show is described here as plain data.
//! The egui layer draws a `ResultsView` and reports clicks back as
//! `GridAction`s; it never builds markup or reads the store on its own.

use super::result_set::ResultSetStore;

/// Shown when a search succeeds with zero frames.
pub const NO_RESULTS_MESSAGE: &str = "No images found. Try a different query.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Info,
    Error,
}

/// One grid entry. Holds a reference into the store, not a copy of the metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridCell {
    pub index: usize,
    pub frame_path: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ResultsView {
    /// Nothing searched yet.
    Idle,
    Searching,
    Message { text: String, kind: MessageKind },
    /// Non-JSON response body, shown verbatim.
    Markup(String),
    Grid(Vec<GridCell>),
}

impl ResultsView {
    pub fn error(text: impl Into<String>) -> Self {
        ResultsView::Message {
            text: text.into(),
            kind: MessageKind::Error,
        }
    }

    pub fn cells(&self) -> &[GridCell] {
        match self {
            ResultsView::Grid(cells) => cells,
            _ => &[],
        }
    }
}

/// Interaction with a grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridAction {
    None,
    OpenFrame(usize),
    ShowInfo(usize),
}

/// Build the results view from the store, from scratch.
///
/// An empty store renders the informational no-results message rather than
/// an empty grid.
pub fn render(store: &ResultSetStore) -> ResultsView {
    if store.is_empty() {
        return ResultsView::Message {
            text: NO_RESULTS_MESSAGE.to_string(),
            kind: MessageKind::Info,
        };
    }

    let cells = store
        .frame_paths()
        .iter()
        .enumerate()
        .map(|(index, frame_path)| GridCell {
            index,
            frame_path: frame_path.clone(),
        })
        .collect();

    ResultsView::Grid(cells)
}
