// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Caption entry and default text style controls.
//!
//! The style chosen here is applied to captions added afterwards; the same
//! controls are reused per caption in the properties panel.

use crate::models::overlay::{Color, TextStyle, FONT_FAMILIES, FONT_SIZE_RANGE, STROKE_WIDTH_RANGE};

/// Result of toolbar interaction.
pub enum ToolbarAction {
    None,
    AddCaption(String),
}

/// Take the pending caption if it has any non-blank text. The text is
/// kept as typed and the input is cleared.
pub fn submit_caption(input: &mut String) -> Option<String> {
    if input.trim().is_empty() {
        return None;
    }
    Some(std::mem::take(input))
}

fn color_button(ui: &mut egui::Ui, color: &mut Color) -> bool {
    let mut rgb = color.to_array();
    let changed = ui.color_edit_button_srgb(&mut rgb).changed();
    if changed {
        *color = Color::from_array(rgb);
    }
    changed
}

/// Font, size, fill, stroke and outline width editors. Returns `true`
/// when anything changed.
pub fn style_controls(ui: &mut egui::Ui, id_salt: impl std::hash::Hash, style: &mut TextStyle) -> bool {
    let mut changed = false;

    ui.horizontal_wrapped(|ui| {
        egui::ComboBox::from_id_source(egui::Id::new(("font", &id_salt)))
            .selected_text(style.font_family.as_str())
            .show_ui(ui, |ui| {
                for family in FONT_FAMILIES {
                    changed |= ui
                        .selectable_value(&mut style.font_family, family.to_string(), family)
                        .changed();
                }
            });

        changed |= ui
            .add(egui::Slider::new(&mut style.font_size, FONT_SIZE_RANGE).suffix("px"))
            .changed();
    });

    ui.horizontal_wrapped(|ui| {
        ui.label("Fill");
        changed |= color_button(ui, &mut style.fill);
        ui.label("Stroke");
        changed |= color_button(ui, &mut style.stroke);
        changed |= ui
            .add(egui::Slider::new(&mut style.stroke_width, STROKE_WIDTH_RANGE).text("outline"))
            .changed();
    });

    changed
}

/// Display the caption entry row and the default style.
pub fn show(ui: &mut egui::Ui, caption_input: &mut String, default_style: &mut TextStyle) -> ToolbarAction {
    let mut action = ToolbarAction::None;

    ui.horizontal(|ui| {
        ui.spacing_mut().item_spacing.x = 8.0;
        ui.label("Caption:");

        let response = ui.add(
            egui::TextEdit::singleline(caption_input)
                .hint_text("Enter meme text")
                .desired_width(280.0),
        );
        let entered = response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));

        if ui.button("➕ Add Text").clicked() || entered {
            if let Some(text) = submit_caption(caption_input) {
                action = ToolbarAction::AddCaption(text);
            }
            if entered {
                response.request_focus();
            }
        }

        ui.separator();
        ui.label(egui::RichText::new("Drag captions on the canvas to move them").italics().weak());
    });

    ui.horizontal(|ui| {
        ui.label("New text style:");
        ui.vertical(|ui| {
            style_controls(ui, "default_style", default_style);
        });
    });

    action
}
