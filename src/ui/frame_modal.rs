// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Full-window frame viewer overlay.
//!
//! Covers the window with a dimmed backdrop, shows the navigator's current
//! frame, and offers previous/next arrows and a close button. A click on
//! the backdrop outside the image closes the viewer.

use super::frame_image;
use crate::io::media::FrameImages;
use crate::models::navigator::{CloseReason, ModalNavigator};

/// Result of viewer interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalAction {
    None,
    Prev,
    Next,
    Close(CloseReason),
}

/// Display the viewer if the navigator is open.
pub fn show(ctx: &egui::Context, navigator: &ModalNavigator, images: &FrameImages) -> ModalAction {
    let Some(frame) = navigator.current_frame() else {
        return ModalAction::None;
    };

    let screen = ctx.screen_rect();
    let mut action = ModalAction::None;

    egui::Area::new(egui::Id::new("frame_modal"))
        .order(egui::Order::Foreground)
        .fixed_pos(screen.min)
        .show(ctx, |ui| {
            // Backdrop first so everything drawn later sits on top of it for clicks.
            let (backdrop_rect, backdrop) =
                ui.allocate_exact_size(screen.size(), egui::Sense::click());
            ui.painter()
                .rect_filled(backdrop_rect, 0.0, egui::Color32::from_black_alpha(220));

            let bounds = backdrop_rect.shrink2(egui::vec2(80.0, 50.0));
            let image_rect = frame_image::paint(ui.painter(), images.view(frame), bounds);
            // Clicks on the image itself are swallowed.
            ui.interact(image_rect, egui::Id::new("frame_modal_image"), egui::Sense::click());

            if let (Some(index), count) = (navigator.current_index(), navigator.frame_count()) {
                ui.painter().text(
                    egui::pos2(backdrop_rect.center().x, backdrop_rect.max.y - 24.0),
                    egui::Align2::CENTER_CENTER,
                    format!("{} / {}", index + 1, count),
                    egui::FontId::proportional(14.0),
                    egui::Color32::from_gray(200),
                );
            }

            let arrow_size = egui::vec2(48.0, 64.0);
            let prev_rect = egui::Rect::from_center_size(
                egui::pos2(backdrop_rect.min.x + 40.0, backdrop_rect.center().y),
                arrow_size,
            );
            let next_rect = egui::Rect::from_center_size(
                egui::pos2(backdrop_rect.max.x - 40.0, backdrop_rect.center().y),
                arrow_size,
            );
            let close_rect = egui::Rect::from_center_size(
                egui::pos2(backdrop_rect.max.x - 32.0, backdrop_rect.min.y + 28.0),
                egui::vec2(40.0, 40.0),
            );

            // Arrows stay enabled at the ends of the list: a disabled widget
            // does not sense clicks and the backdrop would take them.
            if ui.put(prev_rect, nav_button("❮", navigator.can_prev())).clicked() {
                action = ModalAction::Prev;
            }
            if ui.put(next_rect, nav_button("❯", navigator.can_next())).clicked() {
                action = ModalAction::Next;
            }
            if ui.put(close_rect, nav_button("×", true)).clicked() {
                action = ModalAction::Close(CloseReason::Button);
            }

            if action == ModalAction::None && backdrop.clicked() {
                action = ModalAction::Close(CloseReason::Background);
            }
        });

    action
}

fn nav_button(label: &str, active: bool) -> egui::Button<'static> {
    let color = if active {
        egui::Color32::WHITE
    } else {
        egui::Color32::from_gray(90)
    };
    egui::Button::new(
        egui::RichText::new(label.to_string())
            .size(32.0)
            .color(color),
    )
    .frame(false)
}
