// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Frame viewer navigation state machine.
//!
//! The navigator is either closed or showing one frame out of a frame list
//! captured when it was opened. It knows nothing about rendering; the UI
//! layer reads `current_frame()` and feeds back clicks and key presses.

use crate::util::listeners::{KeyListeners, ListenerId, NavKey};

/// Why a viewer session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseReason {
    /// The × button.
    Button,
    /// A click on the dimmed area outside the image.
    Background,
    Escape,
    /// Another `open` replaced this session.
    Replaced,
}

/// An open viewer session.
#[derive(Debug)]
struct Session {
    frames: Vec<String>,
    current: usize,
    listener: ListenerId,
}

#[derive(Debug, Default)]
pub struct ModalNavigator {
    session: Option<Session>,
}

impl ModalNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a session on `path` within `frames`.
    ///
    /// An already open session is closed first. A path missing from the list
    /// opens on the first frame. An empty list leaves the navigator closed and
    /// returns false.
    pub fn open(&mut self, path: &str, frames: Vec<String>, listeners: &mut KeyListeners) -> bool {
        self.close(CloseReason::Replaced, listeners);

        if frames.is_empty() {
            log::warn!("Refusing to open viewer for {} with an empty frame list", path);
            return false;
        }

        let current = match frames.iter().position(|frame| frame == path) {
            Some(index) => index,
            None => {
                log::warn!("Frame {} not in list of {}, showing first frame", path, frames.len());
                0
            }
        };

        let listener = listeners.attach();
        log::info!("Viewer opened at {}/{}: {}", current + 1, frames.len(), frames[current]);
        self.session = Some(Session {
            frames,
            current,
            listener,
        });
        true
    }

    /// Step forward. No-op on the last frame or when closed.
    pub fn next(&mut self) -> bool {
        self.step(1)
    }

    /// Step backward. No-op on the first frame or when closed.
    pub fn prev(&mut self) -> bool {
        self.step(-1)
    }

    fn step(&mut self, delta: isize) -> bool {
        let Some(session) = self.session.as_mut() else {
            return false;
        };
        let target = session.current as isize + delta;
        if target < 0 || target >= session.frames.len() as isize {
            return false;
        }
        session.current = target as usize;
        log::debug!("Viewer moved to frame {}", session.current);
        true
    }

    /// End the current session and detach its key listener.
    /// Returns false if nothing was open.
    pub fn close(&mut self, reason: CloseReason, listeners: &mut KeyListeners) -> bool {
        match self.session.take() {
            Some(session) => {
                listeners.detach(session.listener);
                log::info!("Viewer closed ({:?})", reason);
                true
            }
            None => false,
        }
    }

    /// Handle a key routed to `listener`. Keys for any other listener are ignored.
    pub fn on_key(
        &mut self,
        listener: ListenerId,
        key: NavKey,
        listeners: &mut KeyListeners,
    ) -> bool {
        let owns_listener = self
            .session
            .as_ref()
            .is_some_and(|session| session.listener == listener);
        if !owns_listener {
            return false;
        }

        match key {
            NavKey::ArrowLeft => self.prev(),
            NavKey::ArrowRight => self.next(),
            NavKey::Escape => self.close(CloseReason::Escape, listeners),
        }
    }

    pub fn is_open(&self) -> bool {
        self.session.is_some()
    }

    pub fn current_index(&self) -> Option<usize> {
        self.session.as_ref().map(|session| session.current)
    }

    pub fn current_frame(&self) -> Option<&str> {
        self.session
            .as_ref()
            .map(|session| session.frames[session.current].as_str())
    }

    /// Length of the captured frame list.
    pub fn frame_count(&self) -> usize {
        self.session.as_ref().map_or(0, |session| session.frames.len())
    }

    pub fn can_prev(&self) -> bool {
        self.session.as_ref().is_some_and(|session| session.current > 0)
    }

    pub fn can_next(&self) -> bool {
        self.session
            .as_ref()
            .is_some_and(|session| session.current + 1 < session.frames.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frames(paths: &[&str]) -> Vec<String> {
        paths.iter().map(|p| p.to_string()).collect()
    }

    #[test]
    fn test_open_next_clamps_at_end() {
        let mut listeners = KeyListeners::new();
        let mut nav = ModalNavigator::new();

        assert!(nav.open("b", frames(&["a", "b", "c"]), &mut listeners));
        assert_eq!(nav.current_index(), Some(1));

        assert!(nav.next());
        assert_eq!(nav.current_index(), Some(2));
        assert_eq!(nav.current_frame(), Some("c"));

        assert!(!nav.next());
        assert_eq!(nav.current_index(), Some(2));
    }

    #[test]
    fn test_prev_clamps_at_start() {
        let mut listeners = KeyListeners::new();
        let mut nav = ModalNavigator::new();
        nav.open("a", frames(&["a", "b"]), &mut listeners);

        assert!(!nav.prev());
        assert_eq!(nav.current_index(), Some(0));
        assert!(!nav.can_prev());
        assert!(nav.can_next());
    }

    #[test]
    fn test_missing_path_opens_on_first_frame() {
        let mut listeners = KeyListeners::new();
        let mut nav = ModalNavigator::new();

        assert!(nav.open("zzz", frames(&["a", "b"]), &mut listeners));
        assert_eq!(nav.current_index(), Some(0));
        assert_eq!(nav.current_frame(), Some("a"));
    }

    #[test]
    fn test_empty_list_stays_closed() {
        let mut listeners = KeyListeners::new();
        let mut nav = ModalNavigator::new();

        assert!(!nav.open("a", Vec::new(), &mut listeners));
        assert!(!nav.is_open());
        assert!(listeners.is_empty());
    }

    #[test]
    fn test_every_close_path_detaches_listener() {
        for reason in [CloseReason::Button, CloseReason::Background] {
            let mut listeners = KeyListeners::new();
            let mut nav = ModalNavigator::new();
            nav.open("a", frames(&["a"]), &mut listeners);

            assert!(nav.close(reason, &mut listeners));
            assert!(!nav.is_open());
            assert!(listeners.is_empty());
        }

        let mut listeners = KeyListeners::new();
        let mut nav = ModalNavigator::new();
        nav.open("a", frames(&["a"]), &mut listeners);
        let id = listeners.target().unwrap();

        assert!(nav.on_key(id, NavKey::Escape, &mut listeners));
        assert!(!nav.is_open());
        assert!(listeners.is_empty());
    }

    #[test]
    fn test_escape_after_close_has_no_effect() {
        let mut listeners = KeyListeners::new();
        let mut nav = ModalNavigator::new();
        nav.open("a", frames(&["a", "b"]), &mut listeners);
        let id = listeners.target().unwrap();
        nav.close(CloseReason::Button, &mut listeners);

        assert_eq!(listeners.target(), None);
        assert!(!nav.on_key(id, NavKey::Escape, &mut listeners));
        assert!(!nav.on_key(id, NavKey::ArrowRight, &mut listeners));
        assert!(!nav.is_open());
    }

    #[test]
    fn test_arrow_keys_navigate() {
        let mut listeners = KeyListeners::new();
        let mut nav = ModalNavigator::new();
        nav.open("b", frames(&["a", "b", "c"]), &mut listeners);
        let id = listeners.target().unwrap();

        nav.on_key(id, NavKey::ArrowLeft, &mut listeners);
        assert_eq!(nav.current_index(), Some(0));
        nav.on_key(id, NavKey::ArrowRight, &mut listeners);
        nav.on_key(id, NavKey::ArrowRight, &mut listeners);
        assert_eq!(nav.current_index(), Some(2));
    }

    #[test]
    fn test_reopen_replaces_session() {
        let mut listeners = KeyListeners::new();
        let mut nav = ModalNavigator::new();
        nav.open("a", frames(&["a", "b"]), &mut listeners);
        let old = listeners.target().unwrap();

        nav.open("x", frames(&["x"]), &mut listeners);

        assert_eq!(listeners.len(), 1);
        assert!(!listeners.is_attached(old));
        assert_eq!(nav.current_frame(), Some("x"));
        assert_eq!(nav.frame_count(), 1);
        assert!(!nav.next());
    }
}
