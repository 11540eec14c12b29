// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Random meme panel.

use crate::remote::random_meme::{MemePlaceholder, RandomMeme};
use image::RgbaImage;
use std::borrow::Cow;

/// Longest side of the preview texture. The panel is far narrower.
const PREVIEW_MAX_SIDE: usize = 1024;

/// What the panel currently shows.
pub enum RandomMemeView {
    Empty,
    Loaded {
        title: String,
        texture: egui::TextureHandle,
    },
    Placeholder(MemePlaceholder),
}

pub enum RandomMemeAction {
    None,
    Next,
    Download,
}

/// Size that fits within `max_side` on both axes, keeping the aspect
/// ratio. Never upscales and never collapses a side to zero.
pub fn preview_size(width: u32, height: u32, max_side: u32) -> (u32, u32) {
    let longest = width.max(height);
    if longest <= max_side {
        return (width, height);
    }
    let scale = max_side as f64 / longest as f64;
    let fit = |side: u32| ((side as f64 * scale).round() as u32).clamp(1, max_side);
    (fit(width), fit(height))
}

/// Shrink `image` so the GPU can hold it as a texture.
pub fn preview_image(image: &RgbaImage, max_side: u32) -> Cow<'_, RgbaImage> {
    let (width, height) = preview_size(image.width(), image.height(), max_side);
    if (width, height) == image.dimensions() {
        Cow::Borrowed(image)
    } else {
        Cow::Owned(image::imageops::thumbnail(image, width, height))
    }
}

/// Turn a fetch result into something displayable.
pub fn view_for(ctx: &egui::Context, meme: &RandomMeme) -> RandomMemeView {
    match meme {
        RandomMeme::Loaded(loaded) => {
            let max_side = ctx.input(|i| i.max_texture_side).min(PREVIEW_MAX_SIDE);
            let preview = preview_image(&loaded.image, max_side as u32);
            let size = [preview.width() as usize, preview.height() as usize];
            let color_image = egui::ColorImage::from_rgba_unmultiplied(size, preview.as_raw());
            RandomMemeView::Loaded {
                title: loaded.title.clone(),
                texture: ctx.load_texture("random_meme", color_image, egui::TextureOptions::LINEAR),
            }
        }
        RandomMeme::Placeholder(placeholder) => RandomMemeView::Placeholder(*placeholder),
    }
}

fn placeholder_box(ui: &mut egui::Ui, text: &str) {
    let (rect, _) = ui.allocate_exact_size(egui::vec2(ui.available_width(), 180.0), egui::Sense::hover());
    let painter = ui.painter_at(rect);
    painter.rect_filled(rect, 4.0, egui::Color32::from_gray(0xe0));
    painter.text(
        rect.center(),
        egui::Align2::CENTER_CENTER,
        text,
        egui::FontId::proportional(16.0),
        egui::Color32::from_gray(0x60),
    );
}

pub fn show(ui: &mut egui::Ui, view: &RandomMemeView, loading: bool) -> RandomMemeAction {
    let mut action = RandomMemeAction::None;
    ui.heading("Random Meme");
    ui.separator();

    match view {
        RandomMemeView::Loaded { title, texture } => {
            ui.label(egui::RichText::new(title).strong());
            let size = texture.size_vec2();
            let scale = (ui.available_width() / size.x).min(1.0);
            ui.image((texture.id(), size * scale));
        }
        RandomMemeView::Placeholder(placeholder) => placeholder_box(ui, placeholder.caption()),
        RandomMemeView::Empty => placeholder_box(ui, "Click Next Meme"),
    }

    ui.horizontal(|ui| {
        let label = if loading { "Loading..." } else { "Next Meme" };
        if ui.add_enabled(!loading, egui::Button::new(label)).clicked() {
            action = RandomMemeAction::Next;
        }
        if ui.button("Download").clicked() {
            action = RandomMemeAction::Download;
        }
    });

    action
}
