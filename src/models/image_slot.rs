// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Per-image load state with a single placeholder fallback.
//!
//! A frame image that fails to load is swapped for the placeholder once.
//! If the placeholder fails too, the slot is marked broken and never
//! requests anything again.

use std::collections::{HashMap, HashSet};

/// Where a slot's pixels come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource {
    Primary(String),
    Placeholder(String),
}

impl ImageSource {
    pub fn location(&self) -> &str {
        match self {
            ImageSource::Primary(location) | ImageSource::Placeholder(location) => location,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlotState {
    Loading(ImageSource),
    Ready(ImageSource),
    Broken,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageSlot {
    state: SlotState,
    placeholder: String,
}

impl ImageSlot {
    /// Start loading `primary`, falling back to `placeholder` on failure.
    pub fn new(primary: impl Into<String>, placeholder: impl Into<String>) -> Self {
        Self {
            state: SlotState::Loading(ImageSource::Primary(primary.into())),
            placeholder: placeholder.into(),
        }
    }

    pub fn state(&self) -> &SlotState {
        &self.state
    }

    /// The location currently being loaded, if any.
    pub fn pending(&self) -> Option<&str> {
        match &self.state {
            SlotState::Loading(source) => Some(source.location()),
            _ => None,
        }
    }

    /// Mark the pending load as done. Ignored unless `location` is pending.
    pub fn loaded(&mut self, location: &str) -> bool {
        match &self.state {
            SlotState::Loading(source) if source.location() == location => {
                self.state = SlotState::Ready(source.clone());
                true
            }
            _ => false,
        }
    }

    /// Record a failed load of `location`.
    ///
    /// Returns the placeholder location to fetch next, or `None` once the
    /// slot has given up.
    pub fn failed(&mut self, location: &str) -> Option<String> {
        match &self.state {
            SlotState::Loading(ImageSource::Primary(primary)) if primary == location => {
                log::warn!("Failed to load image: {}, using placeholder", primary);
                self.state = SlotState::Loading(ImageSource::Placeholder(self.placeholder.clone()));
                Some(self.placeholder.clone())
            }
            SlotState::Loading(ImageSource::Placeholder(placeholder))
                if placeholder == location =>
            {
                log::warn!("Placeholder {} failed to load as well", placeholder);
                self.state = SlotState::Broken;
                None
            }
            _ => None,
        }
    }

    /// Whether the slot reached a final state.
    pub fn is_settled(&self) -> bool {
        !matches!(self.state, SlotState::Loading(_))
    }
}

/// Counts settled image loads against the expected total.
#[derive(Debug, Default)]
pub struct LoadTracker {
    expected: usize,
    settled: usize,
    reported: bool,
}

impl LoadTracker {
    pub fn new(expected: usize) -> Self {
        Self {
            expected,
            settled: 0,
            reported: expected == 0,
        }
    }

    /// Record one settled slot. Returns true exactly once, when the last
    /// expected slot settles.
    pub fn settle(&mut self) -> bool {
        self.settled = (self.settled + 1).min(self.expected);
        if !self.reported && self.settled == self.expected {
            self.reported = true;
            log::info!("All {} images settled", self.expected);
            return true;
        }
        false
    }

    pub fn progress(&self) -> (usize, usize) {
        (self.settled, self.expected)
    }
}

#[derive(Debug)]
struct Entry {
    slot: ImageSlot,
    tracked: bool,
}

/// All image slots of the current result set.
///
/// Loads are keyed by location, so a location shared by several slots
/// (typically the placeholder) is fetched once and its outcome is applied
/// to every slot waiting on it.
#[derive(Debug)]
pub struct SlotTable {
    placeholder: String,
    entries: HashMap<String, Entry>,
    in_flight: HashSet<String>,
    ready: HashSet<String>,
    failed: HashSet<String>,
    tracker: LoadTracker,
}

impl SlotTable {
    pub fn new(placeholder: impl Into<String>) -> Self {
        Self {
            placeholder: placeholder.into(),
            entries: HashMap::new(),
            in_flight: HashSet::new(),
            ready: HashSet::new(),
            failed: HashSet::new(),
            tracker: LoadTracker::new(0),
        }
    }

    /// Drop every slot and start one per frame. Returns locations to fetch.
    ///
    /// Fetches already in flight are not repeated; a loaded placeholder is
    /// kept.
    pub fn reset(&mut self, frames: &[String]) -> Vec<String> {
        self.entries.clear();
        self.failed.clear();
        let placeholder_ready = self.ready.contains(&self.placeholder);
        self.ready.clear();
        if placeholder_ready {
            self.ready.insert(self.placeholder.clone());
        }

        let mut tracked = 0;
        let mut fetch = Vec::new();
        for path in frames {
            if self.entries.contains_key(path) {
                continue;
            }
            tracked += 1;
            self.entries.insert(
                path.clone(),
                Entry {
                    slot: ImageSlot::new(path.clone(), self.placeholder.clone()),
                    tracked: true,
                },
            );
        }
        self.tracker = LoadTracker::new(tracked);

        for path in frames {
            fetch.extend(self.route(path));
        }
        fetch
    }

    /// Make sure a slot exists for `path` without counting it towards the
    /// current result set. Returns a location to fetch, if any.
    pub fn ensure(&mut self, path: &str) -> Option<String> {
        if !self.entries.contains_key(path) {
            self.entries.insert(
                path.to_string(),
                Entry {
                    slot: ImageSlot::new(path, self.placeholder.clone()),
                    tracked: false,
                },
            );
        }
        self.route(path)
    }

    /// Apply the outcome of fetching `location`. Returns follow-up fetches.
    ///
    /// Outcomes nobody waits for any more are not recorded, so a later
    /// result set fetches that location again.
    pub fn complete(&mut self, location: &str, ok: bool) -> Vec<String> {
        self.in_flight.remove(location);

        let waiting: Vec<String> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.slot.pending() == Some(location))
            .map(|(path, _)| path.clone())
            .collect();
        if waiting.is_empty() {
            return Vec::new();
        }

        if ok {
            self.ready.insert(location.to_string());
        } else {
            self.failed.insert(location.to_string());
        }

        waiting.iter().filter_map(|path| self.route(path)).collect()
    }

    /// Whether any slot is still waiting on `location`.
    pub fn is_awaited(&self, location: &str) -> bool {
        self.entries
            .values()
            .any(|entry| entry.slot.pending() == Some(location))
    }

    /// Advance one slot as far as known outcomes allow.
    fn route(&mut self, path: &str) -> Option<String> {
        loop {
            let entry = self.entries.get_mut(path)?;
            let location = entry.slot.pending()?.to_string();

            if self.ready.contains(&location) {
                entry.slot.loaded(&location);
            } else if self.failed.contains(&location) {
                entry.slot.failed(&location);
            } else if self.in_flight.insert(location.clone()) {
                return Some(location);
            } else {
                return None;
            }

            if entry.slot.is_settled() {
                if entry.tracked {
                    self.tracker.settle();
                }
                return None;
            }
        }
    }

    pub fn slot(&self, path: &str) -> Option<&ImageSlot> {
        self.entries.get(path).map(|entry| &entry.slot)
    }

    pub fn progress(&self) -> (usize, usize) {
        self.tracker.progress()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PLACEHOLDER: &str = "/static/placeholder.jpg";

    #[test]
    fn test_successful_load() {
        let mut slot = ImageSlot::new("a.jpg", PLACEHOLDER);
        assert_eq!(slot.pending(), Some("a.jpg"));
        assert!(slot.loaded("a.jpg"));
        assert_eq!(slot.state(), &SlotState::Ready(ImageSource::Primary("a.jpg".into())));
        assert!(slot.is_settled());
    }

    #[test]
    fn test_placeholder_substituted_once() {
        let mut slot = ImageSlot::new("a.jpg", PLACEHOLDER);

        assert_eq!(slot.failed("a.jpg"), Some(PLACEHOLDER.to_string()));
        assert_eq!(slot.pending(), Some(PLACEHOLDER));

        // The placeholder fails too: give up, no further request.
        assert_eq!(slot.failed(PLACEHOLDER), None);
        assert_eq!(slot.state(), &SlotState::Broken);

        // Late duplicate failures do not restart anything.
        assert_eq!(slot.failed(PLACEHOLDER), None);
        assert_eq!(slot.failed("a.jpg"), None);
        assert_eq!(slot.state(), &SlotState::Broken);
    }

    #[test]
    fn test_placeholder_success() {
        let mut slot = ImageSlot::new("a.jpg", PLACEHOLDER);
        slot.failed("a.jpg");
        assert!(slot.loaded(PLACEHOLDER));
        assert_eq!(
            slot.state(),
            &SlotState::Ready(ImageSource::Placeholder(PLACEHOLDER.into()))
        );
    }

    #[test]
    fn test_stale_completion_ignored() {
        let mut slot = ImageSlot::new("a.jpg", PLACEHOLDER);
        slot.failed("a.jpg");
        assert!(!slot.loaded("a.jpg"));
        assert_eq!(slot.pending(), Some(PLACEHOLDER));
    }

    #[test]
    fn test_tracker_reports_once() {
        let mut tracker = LoadTracker::new(2);
        assert!(!tracker.settle());
        assert!(tracker.settle());
        assert!(!tracker.settle());
        assert_eq!(tracker.progress(), (2, 2));
    }

    fn paths(paths: &[&str]) -> Vec<String> {
        paths.iter().map(|p| p.to_string()).collect()
    }

    #[test]
    fn test_table_fetches_each_frame_once() {
        let mut table = SlotTable::new(PLACEHOLDER);
        let fetch = table.reset(&paths(&["a", "b", "a"]));
        assert_eq!(fetch, paths(&["a", "b"]));
        assert_eq!(table.progress(), (0, 2));

        assert!(table.complete("a", true).is_empty());
        assert!(table.complete("b", true).is_empty());
        assert_eq!(table.progress(), (2, 2));
    }

    #[test]
    fn test_table_shares_placeholder_fetch() {
        let mut table = SlotTable::new(PLACEHOLDER);
        table.reset(&paths(&["a", "b"]));

        assert_eq!(table.complete("a", false), paths(&[PLACEHOLDER]));
        // Second failure waits on the placeholder already in flight.
        assert!(table.complete("b", false).is_empty());
        assert_eq!(table.slot("b").unwrap().pending(), Some(PLACEHOLDER));

        // Placeholder fails: both slots broken, nothing else fetched.
        assert!(table.complete(PLACEHOLDER, false).is_empty());
        assert_eq!(table.slot("a").unwrap().state(), &SlotState::Broken);
        assert_eq!(table.slot("b").unwrap().state(), &SlotState::Broken);
        assert_eq!(table.progress(), (2, 2));
    }

    #[test]
    fn test_table_known_placeholder_failure_settles_immediately() {
        let mut table = SlotTable::new(PLACEHOLDER);
        table.reset(&paths(&["a", "b"]));
        table.complete("a", false);
        table.complete(PLACEHOLDER, false);

        assert!(table.complete("b", false).is_empty());
        assert_eq!(table.slot("b").unwrap().state(), &SlotState::Broken);
    }

    #[test]
    fn test_table_reset_keeps_loaded_placeholder() {
        let mut table = SlotTable::new(PLACEHOLDER);
        table.reset(&paths(&["a"]));
        table.complete("a", false);
        table.complete(PLACEHOLDER, true);

        let fetch = table.reset(&paths(&["c"]));
        assert_eq!(fetch, paths(&["c"]));
        table.complete("c", false);
        assert_eq!(
            table.slot("c").unwrap().state(),
            &SlotState::Ready(ImageSource::Placeholder(PLACEHOLDER.into()))
        );
    }

    #[test]
    fn test_table_ensure_is_untracked() {
        let mut table = SlotTable::new(PLACEHOLDER);
        table.reset(&paths(&["a"]));
        table.complete("a", true);

        assert_eq!(table.ensure("a"), None);
        assert_eq!(table.ensure("z"), Some("z".to_string()));
        table.complete("z", true);
        assert_eq!(table.progress(), (1, 1));
    }

    #[test]
    fn test_table_stale_location_not_awaited() {
        let mut table = SlotTable::new(PLACEHOLDER);
        table.reset(&paths(&["a", "b"]));
        assert!(table.is_awaited("a"));

        // "a" is still in flight when the next result set arrives.
        table.reset(&paths(&["c"]));
        assert!(!table.is_awaited("a"));
        assert!(table.is_awaited("c"));

        assert!(table.complete("a", true).is_empty());
        assert_eq!(table.progress(), (0, 1));
        assert!(table.slot("a").is_none());

        // The stale outcome was not kept: "a" is fetched again when needed.
        assert_eq!(table.reset(&paths(&["a"])), paths(&["a"]));
    }

    #[test]
    fn test_table_placeholder_awaited_while_pending() {
        let mut table = SlotTable::new(PLACEHOLDER);
        table.reset(&paths(&["a"]));
        assert!(!table.is_awaited(PLACEHOLDER));

        table.complete("a", false);
        assert!(table.is_awaited(PLACEHOLDER));
        table.complete(PLACEHOLDER, true);
        assert!(!table.is_awaited(PLACEHOLDER));
    }
}
