// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Deterministic measurer and recording surface for tests.

use super::{FontSpec, Surface, TextMeasure};
use crate::models::overlay::Color;
use crate::models::scene::BackgroundImage;
use crate::util::geometry::DrawRect;

/// Every character is `em * font size` pixels wide.
pub struct FixedAdvance {
    em: f32,
}

impl FixedAdvance {
    pub fn new(em: f32) -> Self {
        Self { em }
    }
}

impl TextMeasure for FixedAdvance {
    fn measure_text(&self, text: &str, font: &FontSpec) -> f32 {
        text.chars().count() as f32 * font.size * self.em
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Clear,
    Fill(Color),
    Image { generation: u64, rect: DrawRect },
    Stroke { text: String, font: FontSpec, x: f32, y: f32, color: Color, width: f32 },
    Text { text: String, font: FontSpec, x: f32, y: f32, color: Color },
}

/// Surface that records draw calls instead of rasterizing.
pub struct RecordingSurface {
    width: u32,
    height: u32,
    measure: FixedAdvance,
    pub ops: Vec<DrawOp>,
}

impl RecordingSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            measure: FixedAdvance::new(0.5),
            ops: Vec::new(),
        }
    }

    pub fn texts(&self) -> Vec<&str> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl TextMeasure for RecordingSurface {
    fn measure_text(&self, text: &str, font: &FontSpec) -> f32 {
        self.measure.measure_text(text, font)
    }
}

impl Surface for RecordingSurface {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn clear(&mut self) {
        self.ops.push(DrawOp::Clear);
    }

    fn fill(&mut self, color: Color) {
        self.ops.push(DrawOp::Fill(color));
    }

    fn draw_image(&mut self, image: &BackgroundImage, rect: DrawRect) {
        self.ops.push(DrawOp::Image {
            generation: image.generation(),
            rect,
        });
    }

    fn stroke_text(&mut self, text: &str, font: &FontSpec, x: f32, y: f32, color: Color, width: f32) {
        self.ops.push(DrawOp::Stroke {
            text: text.to_string(),
            font: font.clone(),
            x,
            y,
            color,
            width,
        });
    }

    fn fill_text(&mut self, text: &str, font: &FontSpec, x: f32, y: f32, color: Color) {
        self.ops.push(DrawOp::Text {
            text: text.to_string(),
            font: font.clone(),
            x,
            y,
            color,
        });
    }
}
