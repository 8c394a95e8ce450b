// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Search bar with the query field.
//!
//! Submitting happens on the Search button or on Enter in the text field.
//! Validation is left to the caller so both paths behave the same.

/// Display the search bar. Returns true when the user submits.
pub fn show(ui: &mut egui::Ui, query: &mut String, searching: bool) -> bool {
    let mut submit = false;

    ui.horizontal(|ui| {
        ui.spacing_mut().item_spacing.x = 8.0;

        ui.label("Query:");

        let response = ui.add(
            egui::TextEdit::singleline(query)
                .hint_text("Describe the frame you are looking for")
                .desired_width(480.0),
        );
        if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
            submit = true;
        }

        if ui.button("🔍 Search").clicked() {
            submit = true;
        }

        if searching {
            ui.separator();
            ui.spinner();
            ui.label(egui::RichText::new("Searching...").italics().weak());
        }
    });

    submit
}
