// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Metadata inspector state.

use super::search_result::Metadata;

/// Panel showing one frame's metadata. Its visibility is independent of the
/// frame viewer; both may be open at once.
#[derive(Debug, Default)]
pub struct MetadataInspector {
    shown: Option<Metadata>,
}

impl MetadataInspector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Show `metadata`, replacing whatever was displayed.
    pub fn show(&mut self, metadata: Metadata) {
        log::info!(
            "Inspecting {} frame {} ({})",
            metadata.video_folder,
            metadata.frame_number,
            metadata.frame_path
        );
        self.shown = Some(metadata);
    }

    pub fn close(&mut self) {
        self.shown = None;
    }

    pub fn is_open(&self) -> bool {
        self.shown.is_some()
    }

    pub fn metadata(&self) -> Option<&Metadata> {
        self.shown.as_ref()
    }

    /// Label/value rows in display order.
    pub fn rows(&self) -> Vec<(&'static str, String)> {
        match &self.shown {
            Some(m) => vec![
                ("Folder Videos", m.video_folder.clone()),
                ("Frame Number", m.frame_number.to_string()),
                ("Frame IDX", m.frame_idx.to_string()),
                ("PTS Time", m.pts_time.to_string()),
            ],
            None => Vec::new(),
        }
    }

    /// Viewer session for the embedded image: the frame alone, so
    /// navigation inside it never moves.
    pub fn frame_session(&self) -> Option<(String, Vec<String>)> {
        self.shown
            .as_ref()
            .map(|m| (m.frame_path.clone(), vec![m.frame_path.clone()]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::navigator::ModalNavigator;
    use crate::models::search_result::sample_result;
    use crate::util::listeners::KeyListeners;

    #[test]
    fn test_show_and_close() {
        let result = sample_result(&["a", "b"]);
        let mut inspector = MetadataInspector::new();
        assert!(!inspector.is_open());
        assert!(inspector.rows().is_empty());

        inspector.show(result.metadata_list[1].clone());
        assert!(inspector.is_open());

        let rows = inspector.rows();
        assert_eq!(rows[0], ("Folder Videos", "L01_V002".to_string()));
        assert_eq!(rows[1], ("Frame Number", "1".to_string()));
        assert_eq!(rows[2], ("Frame IDX", "25".to_string()));
        assert_eq!(rows[3], ("PTS Time", "1.5".to_string()));

        inspector.close();
        assert!(!inspector.is_open());
    }

    #[test]
    fn test_frame_session_is_single_frame() {
        let result = sample_result(&["a", "b"]);
        let mut inspector = MetadataInspector::new();
        inspector.show(result.metadata_list[0].clone());

        let (path, frames) = inspector.frame_session().unwrap();
        assert_eq!(path, "a");
        assert_eq!(frames, vec!["a".to_string()]);

        let mut listeners = KeyListeners::new();
        let mut nav = ModalNavigator::new();
        nav.open(&path, frames, &mut listeners);
        assert!(!nav.next());
        assert!(!nav.prev());

        // Both stay open, layered.
        assert!(nav.is_open());
        assert!(inspector.is_open());
    }
}
