// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Drawing a single frame image into a fixed box.

use crate::io::media::FrameView;
use crate::util::geometry::{center_offset, fit_within};

/// Allocate `size`, draw the frame letterboxed inside it, and return the
/// click response for the whole box.
pub fn show(ui: &mut egui::Ui, view: FrameView<'_>, size: egui::Vec2) -> egui::Response {
    let (rect, response) = ui.allocate_exact_size(size, egui::Sense::click());
    paint(ui.painter(), view, rect);
    response.on_hover_cursor(egui::CursorIcon::PointingHand)
}

/// Paint the frame letterboxed inside `rect`. Returns the image rectangle.
pub fn paint(painter: &egui::Painter, view: FrameView<'_>, rect: egui::Rect) -> egui::Rect {
    match view {
        FrameView::Ready(texture) => {
            let [w, h] = texture.size();
            let (width, height) = fit_within((w as f32, h as f32), (rect.width(), rect.height()));
            let (dx, dy) = center_offset((width, height), (rect.width(), rect.height()));
            let image_rect = egui::Rect::from_min_size(
                rect.min + egui::vec2(dx, dy),
                egui::vec2(width, height),
            );
            painter.image(
                texture.id(),
                image_rect,
                egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                egui::Color32::WHITE,
            );
            image_rect
        }
        FrameView::Loading => {
            painter.rect_filled(rect, 4.0, egui::Color32::from_gray(40));
            painter.text(
                rect.center(),
                egui::Align2::CENTER_CENTER,
                "Loading...",
                egui::FontId::proportional(12.0),
                egui::Color32::from_gray(160),
            );
            rect
        }
        FrameView::Broken => {
            painter.rect_filled(rect, 4.0, egui::Color32::from_gray(30));
            painter.text(
                rect.center(),
                egui::Align2::CENTER_CENTER,
                "⚠ Image unavailable",
                egui::FontId::proportional(12.0),
                egui::Color32::from_rgb(200, 120, 80),
            );
            rect
        }
    }
}
