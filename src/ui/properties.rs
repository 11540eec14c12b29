// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Caption list panel.
//!
//! Lists every caption on the canvas with editors for its text and style.

use crate::models::overlay::TextOverlay;
use crate::ui::toolbar::style_controls;

/// Result of properties panel interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertiesAction {
    None,
    /// Text or style edited in place; the canvas needs redrawing.
    Changed,
    DeleteOverlay(u64),
    ClearAll,
}

/// Display the caption list.
pub fn show(ui: &mut egui::Ui, overlays: &mut [TextOverlay]) -> PropertiesAction {
    let mut action = PropertiesAction::None;

    ui.horizontal(|ui| {
        ui.heading("Text Elements");
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui
                .add_enabled(!overlays.is_empty(), egui::Button::new("Clear all"))
                .clicked()
            {
                action = PropertiesAction::ClearAll;
            }
        });
    });
    ui.separator();

    if overlays.is_empty() {
        ui.label(egui::RichText::new("No text added yet").weak());
        return action;
    }

    egui::ScrollArea::vertical().show(ui, |ui| {
        for overlay in overlays.iter_mut() {
            egui::Frame::group(ui.style()).show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.horizontal(|ui| {
                    let edited = ui
                        .add(egui::TextEdit::singleline(&mut overlay.text).desired_width(160.0))
                        .changed();
                    if edited {
                        action = PropertiesAction::Changed;
                    }
                    if ui.small_button("🗑").on_hover_text("Delete").clicked() {
                        action = PropertiesAction::DeleteOverlay(overlay.id);
                    }
                });
                if style_controls(ui, overlay.id, &mut overlay.style) && action == PropertiesAction::None {
                    action = PropertiesAction::Changed;
                }
            });
            ui.add_space(4.0);
        }
    });

    action
}
