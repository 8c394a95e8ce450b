// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Results area.
//!
//! Draws a `ResultsView`: the thumbnail grid, a message, or a raw
//! response body. Clicks are reported back as a `GridAction`.

use super::frame_image;
use crate::io::media::FrameImages;
use crate::models::results_view::{GridAction, MessageKind, ResultsView};

const THUMBNAIL_SIZE: egui::Vec2 = egui::vec2(220.0, 124.0);

/// Display the results area and return the interaction, if any.
pub fn show(ui: &mut egui::Ui, view: &ResultsView, images: &FrameImages) -> GridAction {
    match view {
        ResultsView::Idle => {
            centered_label(ui, egui::RichText::new("Enter a query to search frames.").weak());
            GridAction::None
        }
        ResultsView::Searching => {
            ui.centered_and_justified(|ui| {
                ui.vertical_centered(|ui| {
                    ui.add_space(20.0);
                    ui.spinner();
                    ui.add_space(10.0);
                    ui.label(
                        egui::RichText::new("Searching...")
                            .size(16.0)
                            .color(egui::Color32::from_gray(200)),
                    );
                });
            });
            GridAction::None
        }
        ResultsView::Message { text, kind } => {
            let text = egui::RichText::new(text).size(16.0);
            let text = match kind {
                MessageKind::Info => text.color(egui::Color32::from_gray(200)),
                MessageKind::Error => text.color(egui::Color32::from_rgb(230, 90, 90)),
            };
            centered_label(ui, text);
            GridAction::None
        }
        ResultsView::Markup(body) => {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.label(egui::RichText::new(body).monospace());
            });
            GridAction::None
        }
        ResultsView::Grid(cells) => {
            let mut action = GridAction::None;
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    ui.horizontal_wrapped(|ui| {
                        ui.spacing_mut().item_spacing = egui::vec2(12.0, 12.0);
                        for cell in cells {
                            let cell_action = egui::Frame::group(ui.style())
                                .show(ui, |ui| {
                                    ui.vertical(|ui| {
                                        let response = frame_image::show(
                                            ui,
                                            images.view(&cell.frame_path),
                                            THUMBNAIL_SIZE,
                                        )
                                        .on_hover_text(&cell.frame_path);
                                        if response.clicked() {
                                            log::debug!("Frame clicked: {}", cell.frame_path);
                                            return GridAction::OpenFrame(cell.index);
                                        }
                                        if ui.button("Info").clicked() {
                                            return GridAction::ShowInfo(cell.index);
                                        }
                                        GridAction::None
                                    })
                                    .inner
                                })
                                .inner;
                            if cell_action != GridAction::None {
                                action = cell_action;
                            }
                        }
                    });
                });
            action
        }
    }
}

fn centered_label(ui: &mut egui::Ui, text: egui::RichText) {
    ui.centered_and_justified(|ui| {
        ui.label(text);
    });
}
