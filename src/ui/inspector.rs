// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Image information window.
//!
//! Shows the metadata of one frame together with the frame itself. The
//! embedded image opens the viewer on that single frame.

use super::frame_image;
use crate::io::media::FrameImages;
use crate::models::inspector::MetadataInspector;

/// Result of inspector interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InspectorAction {
    None,
    Close,
    OpenFrame,
}

const FRAME_SIZE: egui::Vec2 = egui::vec2(320.0, 180.0);

/// Display the inspector window when it has something to show.
pub fn show(
    ctx: &egui::Context,
    inspector: &MetadataInspector,
    images: &FrameImages,
) -> InspectorAction {
    let Some(metadata) = inspector.metadata() else {
        return InspectorAction::None;
    };

    let mut open = true;
    let mut action = InspectorAction::None;

    egui::Window::new("Image Information")
        .open(&mut open)
        .collapsible(false)
        .resizable(false)
        .default_width(FRAME_SIZE.x + 16.0)
        .show(ctx, |ui| {
            egui::Grid::new("metadata_grid")
                .num_columns(2)
                .spacing([12.0, 6.0])
                .show(ui, |ui| {
                    for (label, value) in inspector.rows() {
                        ui.label(egui::RichText::new(label).strong());
                        ui.label(value);
                        ui.end_row();
                    }
                });

            ui.separator();
            ui.label(egui::RichText::new("Frame:").strong());

            let response = frame_image::show(ui, images.view(&metadata.frame_path), FRAME_SIZE)
                .on_hover_text("Open in viewer");
            if response.clicked() {
                action = InspectorAction::OpenFrame;
            }
        });

    if !open {
        action = InspectorAction::Close;
    }
    action
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::search_result::sample_result;

    fn run_frames(
        ctx: &egui::Context,
        inspector: &MetadataInspector,
        images: &FrameImages,
        frames: Vec<Vec<egui::Event>>,
    ) -> Vec<InspectorAction> {
        let mut actions = Vec::new();
        for events in frames {
            let input = egui::RawInput {
                screen_rect: Some(egui::Rect::from_min_size(
                    egui::Pos2::ZERO,
                    egui::vec2(1280.0, 800.0),
                )),
                events,
                ..Default::default()
            };
            let _ = ctx.run(input, |ctx| actions.push(show(ctx, inspector, images)));
        }
        actions
    }

    fn click(pos: egui::Pos2) -> Vec<Vec<egui::Event>> {
        let button = |pressed| egui::Event::PointerButton {
            pos,
            button: egui::PointerButton::Primary,
            pressed,
            modifiers: Default::default(),
        };
        vec![
            vec![egui::Event::PointerMoved(pos)],
            vec![button(true)],
            vec![button(false)],
            vec![],
        ]
    }

    fn images() -> FrameImages {
        FrameImages::new("http://127.0.0.1:9", "/static/placeholder.jpg", None).unwrap()
    }

    #[test]
    fn test_closed_inspector_draws_nothing() {
        let ctx = egui::Context::default();
        let actions = run_frames(&ctx, &MetadataInspector::new(), &images(), vec![vec![]; 3]);
        assert!(actions.iter().all(|a| *a == InspectorAction::None));
    }

    #[test]
    fn test_clicking_frame_opens_viewer() {
        let mut inspector = MetadataInspector::new();
        inspector.show(sample_result(&["a.jpg"]).metadata_list.remove(0));
        let images = images();
        let ctx = egui::Context::default();

        // Lay the window out before clicking into it.
        let settle = run_frames(&ctx, &inspector, &images, vec![vec![]; 3]);
        assert!(settle.iter().all(|a| *a == InspectorAction::None));

        let window = ctx
            .memory(|mem| mem.area_rect(egui::Id::new("Image Information")))
            .expect("inspector window laid out");
        // The frame sits at the bottom left of the window.
        let target = egui::pos2(
            window.min.x + 8.0 + FRAME_SIZE.x / 2.0,
            window.max.y - 8.0 - FRAME_SIZE.y / 2.0,
        );

        let actions = run_frames(&ctx, &inspector, &images, click(target));
        assert!(actions.contains(&InspectorAction::OpenFrame), "{:?}", actions);
        assert!(!actions.contains(&InspectorAction::Close));
    }
}
