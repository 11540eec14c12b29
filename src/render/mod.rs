// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Scene rendering.
//!
//! The whole scene is redrawn from scratch on every change. Drawing goes
//! through the [`Surface`] trait so the same render path feeds the
//! on-screen canvas, PNG export and tests.

pub mod fonts;
pub mod layout;
pub mod raster;
#[cfg(test)]
pub mod testing;

use crate::models::overlay::{Color, TextOverlay, TextStyle};
use crate::models::scene::{BackgroundImage, Scene};
use crate::util::geometry::{fit_image, DrawRect};

/// Message shown while no background image is loaded.
pub const PLACEHOLDER_MESSAGE: &str = "Select a template or upload an image";
const PLACEHOLDER_BACKGROUND: Color = Color::rgb(0xf8, 0xf9, 0xfa);
const PLACEHOLDER_TEXT: Color = Color::rgb(0x6c, 0x75, 0x7d);
const PLACEHOLDER_FONT_SIZE: f32 = 24.0;

/// Extra vertical space between wrapped caption lines.
pub const LINE_GAP: f32 = 10.0;
/// Captions wrap at the canvas width minus this margin.
pub const WRAP_MARGIN: f32 = 20.0;

/// A font family at a pixel size.
#[derive(Debug, Clone, PartialEq)]
pub struct FontSpec {
    pub family: String,
    pub size: f32,
}

impl FontSpec {
    pub fn new(family: impl Into<String>, size: f32) -> Self {
        Self {
            family: family.into(),
            size,
        }
    }
}

impl From<&TextStyle> for FontSpec {
    fn from(style: &TextStyle) -> Self {
        FontSpec::new(style.font_family.clone(), style.font_size)
    }
}

/// Measures rendered text width.
///
/// The font is an explicit argument so measurement always uses the font
/// that is about to be drawn.
pub trait TextMeasure {
    fn measure_text(&self, text: &str, font: &FontSpec) -> f32;
}

/// A raster target the scene can be drawn onto.
///
/// Text is drawn horizontally centered on `x` with `y` as the baseline.
pub trait Surface: TextMeasure {
    fn width(&self) -> u32;
    fn height(&self) -> u32;
    /// Reset every pixel to transparent.
    fn clear(&mut self);
    /// Paint every pixel with `color`.
    fn fill(&mut self, color: Color);
    fn draw_image(&mut self, image: &BackgroundImage, rect: DrawRect);
    fn stroke_text(&mut self, text: &str, font: &FontSpec, x: f32, y: f32, color: Color, width: f32);
    fn fill_text(&mut self, text: &str, font: &FontSpec, x: f32, y: f32, color: Color);
}

/// Redraw the entire scene onto `surface`.
pub fn render_scene<S: Surface + ?Sized>(scene: &Scene, surface: &mut S) {
    let Some(background) = &scene.background else {
        draw_placeholder(surface);
        return;
    };

    surface.clear();
    let rect = fit_image(
        background.width(),
        background.height(),
        surface.width(),
        surface.height(),
    );
    surface.draw_image(background, rect);

    let max_width = surface.width() as f32 - WRAP_MARGIN;
    for overlay in &scene.overlays {
        draw_overlay(surface, overlay, max_width);
    }
}

/// Fill the surface and show the "pick an image" prompt.
pub fn draw_placeholder<S: Surface + ?Sized>(surface: &mut S) {
    surface.fill(PLACEHOLDER_BACKGROUND);
    let font = FontSpec::new("Arial", PLACEHOLDER_FONT_SIZE);
    let x = surface.width() as f32 / 2.0;
    let y = surface.height() as f32 / 2.0;
    surface.fill_text(PLACEHOLDER_MESSAGE, &font, x, y, PLACEHOLDER_TEXT);
}

/// Draw one caption: outline first, then fill, one wrapped line at a time.
pub fn draw_overlay<S: Surface + ?Sized>(surface: &mut S, overlay: &TextOverlay, max_width: f32) {
    let style = &overlay.style;
    let font = FontSpec::from(style);
    let lines = layout::wrap_text(&*surface, &overlay.text, max_width, &font);

    let x = overlay.position.x;
    let mut y = overlay.position.y;
    for line in &lines {
        if style.has_outline() {
            surface.stroke_text(line, &font, x, y, style.stroke, style.stroke_width);
        }
        surface.fill_text(line, &font, x, y, style.fill);
        y += style.font_size + LINE_GAP;
    }
}
