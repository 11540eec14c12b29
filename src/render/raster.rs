// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Offscreen raster surface.
//!
//! Backed by a tiny-skia pixmap. Glyph outlines from the font book are
//! turned into paths so captions get a real stroked outline under the
//! fill, like an HTML canvas draws them.

use super::fonts::FontBook;
use super::{FontSpec, Surface, TextMeasure};
use crate::models::overlay::Color;
use crate::models::scene::BackgroundImage;
use crate::util::geometry::DrawRect;
use ab_glyph::{Font, FontArc, OutlineCurve};
use anyhow::{Context, Result};
use image::{Rgba, RgbaImage};
use tiny_skia::{
    ColorU8, FillRule, FilterQuality, LineJoin, Paint, Path, PathBuilder, Pixmap, PixmapPaint,
    Stroke, Transform,
};

/// Canvas default miter limit.
const MITER_LIMIT: f32 = 10.0;

pub struct RasterSurface {
    pixmap: Pixmap,
    fonts: FontBook,
    /// Premultiplied copy of the last background drawn, keyed by generation.
    image_cache: Option<(u64, Pixmap)>,
}

impl RasterSurface {
    pub fn new(width: u32, height: u32, fonts: FontBook) -> Result<Self> {
        let pixmap = Pixmap::new(width, height)
            .with_context(|| format!("invalid canvas size {}x{}", width, height))?;
        Ok(Self {
            pixmap,
            fonts,
            image_cache: None,
        })
    }

    /// Copy the current pixels out as straight-alpha RGBA.
    pub fn snapshot(&self) -> RgbaImage {
        let mut image = RgbaImage::new(self.pixmap.width(), self.pixmap.height());
        for (dst, src) in image.pixels_mut().zip(self.pixmap.pixels()) {
            let color = src.demultiply();
            *dst = Rgba([color.red(), color.green(), color.blue(), color.alpha()]);
        }
        image
    }

    fn cached_pixmap(&mut self, image: &BackgroundImage) -> Option<&Pixmap> {
        let stale = self
            .image_cache
            .as_ref()
            .map_or(true, |(generation, _)| *generation != image.generation());
        if stale {
            self.image_cache = pixmap_from_image(image.pixels()).map(|p| (image.generation(), p));
        }
        self.image_cache.as_ref().map(|(_, pixmap)| pixmap)
    }

    fn text_path(&self, text: &str, font: &FontSpec, center_x: f32, baseline: f32) -> Option<Path> {
        let face = self.fonts.font(&font.family)?;
        let width = advance_width(face, text, font.size);
        build_text_path(face, text, font.size, center_x - width / 2.0, baseline)
    }
}

impl TextMeasure for RasterSurface {
    fn measure_text(&self, text: &str, font: &FontSpec) -> f32 {
        self.fonts
            .font(&font.family)
            .map_or(0.0, |face| advance_width(face, text, font.size))
    }
}

impl Surface for RasterSurface {
    fn width(&self) -> u32 {
        self.pixmap.width()
    }

    fn height(&self) -> u32 {
        self.pixmap.height()
    }

    fn clear(&mut self) {
        self.pixmap.fill(tiny_skia::Color::TRANSPARENT);
    }

    fn fill(&mut self, color: Color) {
        self.pixmap
            .fill(tiny_skia::Color::from_rgba8(color.r, color.g, color.b, 255));
    }

    fn draw_image(&mut self, image: &BackgroundImage, rect: DrawRect) {
        let (src_width, src_height) = (image.width() as f32, image.height() as f32);
        let transform = Transform::from_row(
            rect.width / src_width,
            0.0,
            0.0,
            rect.height / src_height,
            rect.x,
            rect.y,
        );
        let paint = PixmapPaint {
            quality: FilterQuality::Bilinear,
            ..PixmapPaint::default()
        };

        // Take the cache out to draw from it while borrowing the target mutably.
        if self.cached_pixmap(image).is_none() {
            log::warn!("Background {} has no pixels to draw", image.label);
            return;
        }
        if let Some((generation, source)) = self.image_cache.take() {
            self.pixmap
                .draw_pixmap(0, 0, source.as_ref(), &paint, transform, None);
            self.image_cache = Some((generation, source));
        }
    }

    fn stroke_text(&mut self, text: &str, font: &FontSpec, x: f32, y: f32, color: Color, width: f32) {
        let Some(path) = self.text_path(text, font, x, y) else {
            return;
        };
        let stroke = Stroke {
            width,
            miter_limit: MITER_LIMIT,
            line_join: LineJoin::Miter,
            ..Stroke::default()
        };
        self.pixmap
            .stroke_path(&path, &paint_for(color), &stroke, Transform::identity(), None);
    }

    fn fill_text(&mut self, text: &str, font: &FontSpec, x: f32, y: f32, color: Color) {
        let Some(path) = self.text_path(text, font, x, y) else {
            return;
        };
        self.pixmap.fill_path(
            &path,
            &paint_for(color),
            FillRule::Winding,
            Transform::identity(),
            None,
        );
    }
}

fn paint_for(color: Color) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color_rgba8(color.r, color.g, color.b, 255);
    paint.anti_alias = true;
    paint
}

fn pixmap_from_image(image: &RgbaImage) -> Option<Pixmap> {
    let mut pixmap = Pixmap::new(image.width(), image.height())?;
    for (dst, src) in pixmap.pixels_mut().iter_mut().zip(image.pixels()) {
        let [r, g, b, a] = src.0;
        *dst = ColorU8::from_rgba(r, g, b, a).premultiply();
    }
    Some(pixmap)
}

/// Pixels per font unit at the given CSS pixel size.
fn unit_scale(face: &FontArc, size: f32) -> f32 {
    face.units_per_em().map_or(0.0, |upem| size / upem)
}

/// Sum of glyph advances plus kerning.
fn advance_width(face: &FontArc, text: &str, size: f32) -> f32 {
    let scale = unit_scale(face, size);
    let mut width = 0.0;
    let mut previous = None;
    for ch in text.chars().filter(|c| !c.is_control()) {
        let glyph = face.glyph_id(ch);
        if let Some(prev) = previous {
            width += face.kern_unscaled(prev, glyph) * scale;
        }
        width += face.h_advance_unscaled(glyph) * scale;
        previous = Some(glyph);
    }
    width
}

fn build_text_path(face: &FontArc, text: &str, size: f32, left: f32, baseline: f32) -> Option<Path> {
    let scale = unit_scale(face, size);
    let mut builder = PathBuilder::new();
    let mut pen_x = left;
    let mut previous = None;

    for ch in text.chars().filter(|c| !c.is_control()) {
        let glyph = face.glyph_id(ch);
        if let Some(prev) = previous {
            pen_x += face.kern_unscaled(prev, glyph) * scale;
        }
        if let Some(outline) = face.outline(glyph) {
            // Font units are y-up; canvas pixels are y-down from the baseline.
            let to_px = |p: ab_glyph::Point| (pen_x + p.x * scale, baseline - p.y * scale);
            let mut last_end: Option<ab_glyph::Point> = None;
            for curve in &outline.curves {
                let (start, end) = match curve {
                    OutlineCurve::Line(a, b) => (*a, *b),
                    OutlineCurve::Quad(a, _, b) => (*a, *b),
                    OutlineCurve::Cubic(a, _, _, b) => (*a, *b),
                };
                if last_end != Some(start) {
                    if last_end.is_some() {
                        builder.close();
                    }
                    let (x, y) = to_px(start);
                    builder.move_to(x, y);
                }
                match curve {
                    OutlineCurve::Line(_, b) => {
                        let (x, y) = to_px(*b);
                        builder.line_to(x, y);
                    }
                    OutlineCurve::Quad(_, c, b) => {
                        let (cx, cy) = to_px(*c);
                        let (x, y) = to_px(*b);
                        builder.quad_to(cx, cy, x, y);
                    }
                    OutlineCurve::Cubic(_, c1, c2, b) => {
                        let (c1x, c1y) = to_px(*c1);
                        let (c2x, c2y) = to_px(*c2);
                        let (x, y) = to_px(*b);
                        builder.cubic_to(c1x, c1y, c2x, c2y, x, y);
                    }
                }
                last_end = Some(end);
            }
            if last_end.is_some() {
                builder.close();
            }
        }
        pen_x += face.h_advance_unscaled(glyph) * scale;
        previous = Some(glyph);
    }

    builder.finish()
}
