// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Window-wide keyboard listener registry.
//!
//! Overlays that react to the keyboard attach a listener when they open and
//! must detach it on every close path. Key presses are only routed while a
//! listener is attached.

/// Handle for an attached listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Keys the frame viewer reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavKey {
    ArrowLeft,
    ArrowRight,
    Escape,
}

#[derive(Debug, Default)]
pub struct KeyListeners {
    next_id: u64,
    attached: Vec<ListenerId>,
}

impl KeyListeners {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a new listener. It becomes the target for key presses.
    pub fn attach(&mut self) -> ListenerId {
        self.next_id += 1;
        let id = ListenerId(self.next_id);
        self.attached.push(id);
        log::debug!("Attached key listener {:?}", id);
        id
    }

    /// Detach a listener. Returns false if it was not attached.
    pub fn detach(&mut self, id: ListenerId) -> bool {
        let before = self.attached.len();
        self.attached.retain(|attached| *attached != id);
        let removed = self.attached.len() != before;
        if removed {
            log::debug!("Detached key listener {:?}", id);
        }
        removed
    }

    /// Most recently attached listener, which receives key presses.
    pub fn target(&self) -> Option<ListenerId> {
        self.attached.last().copied()
    }

    pub fn is_attached(&self, id: ListenerId) -> bool {
        self.attached.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.attached.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attached.is_empty()
    }
}
