// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Caption suggestions panel.

use crate::models::overlay::{Point, TextStyle};
use crate::models::scene::Scene;
use crate::remote::suggestions::Suggestion;

/// Distance from the top edge to the top caption's baseline, on top of
/// the font size.
const TOP_MARGIN: f32 = 10.0;
const BOTTOM_MARGIN: f32 = 20.0;

/// Add a suggestion as two centered captions, one near each edge.
pub fn apply(scene: &mut Scene, suggestion: &Suggestion, style: &TextStyle) -> (u64, u64) {
    let x = scene.width as f32 / 2.0;
    let top = scene.add_overlay_at(
        suggestion.top.clone(),
        Point::new(x, style.font_size + TOP_MARGIN),
        style.clone(),
    );
    let bottom = scene.add_overlay_at(
        suggestion.bottom.clone(),
        Point::new(x, scene.height as f32 - BOTTOM_MARGIN),
        style.clone(),
    );
    (top, bottom)
}

/// What the user asked for this frame.
pub struct SuggestionsResponse {
    /// Request a new batch.
    pub generate: bool,
    /// Index of a clicked suggestion.
    pub apply: Option<usize>,
}

pub fn show(ui: &mut egui::Ui, suggestions: &[Suggestion], loading: bool) -> SuggestionsResponse {
    let mut response = SuggestionsResponse {
        generate: false,
        apply: None,
    };

    ui.heading("AI Suggestions");
    ui.separator();

    let label = if loading {
        "Generating AI Captions..."
    } else {
        "✨ Generate AI Suggestions"
    };
    ui.horizontal(|ui| {
        if ui.add_enabled(!loading, egui::Button::new(label)).clicked() {
            response.generate = true;
        }
        if loading {
            ui.spinner();
        }
    });

    for (index, suggestion) in suggestions.iter().enumerate() {
        let clicked = egui::Frame::group(ui.style())
            .show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.label(format!("Top: {}", suggestion.top));
                ui.label(format!("Bottom: {}", suggestion.bottom));
                ui.label(egui::RichText::new(suggestion.source.label()).small().weak());
            })
            .response
            .interact(egui::Sense::click())
            .on_hover_cursor(egui::CursorIcon::PointingHand)
            .clicked();
        if clicked {
            response.apply = Some(index);
        }
    }

    response
}
