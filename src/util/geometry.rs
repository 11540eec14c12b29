// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Geometric utility functions.
//!
//! This module provides the aspect-preserving image fit used by the scene
//! renderer and the mapping between on-screen positions and canvas pixels.

use crate::models::overlay::Point;

/// Destination rectangle for drawing an image into the canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// Fit an image into the canvas preserving aspect ratio, centered along
/// the padded axis (letterbox for wide images, pillarbox for tall ones).
pub fn fit_image(image_width: u32, image_height: u32, canvas_width: u32, canvas_height: u32) -> DrawRect {
    let canvas_w = canvas_width as f32;
    let canvas_h = canvas_height as f32;
    let canvas_aspect = canvas_w / canvas_h;
    let image_aspect = image_width as f32 / image_height as f32;

    if image_aspect > canvas_aspect {
        // Image is wider - fit to width
        let height = canvas_w / image_aspect;
        DrawRect {
            x: 0.0,
            y: (canvas_h - height) / 2.0,
            width: canvas_w,
            height,
        }
    } else {
        // Image is taller - fit to height
        let width = canvas_h * image_aspect;
        DrawRect {
            x: (canvas_w - width) / 2.0,
            y: 0.0,
            width,
            height: canvas_h,
        }
    }
}

/// Where the canvas currently sits on screen.
///
/// The canvas may be displayed shrunk to fit the window, so screen
/// distances are divided by `scale` to get canvas pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasViewport {
    pub origin: Point,
    pub scale: f32,
}

impl CanvasViewport {
    pub fn new(origin: Point, scale: f32) -> Self {
        Self { origin, scale }
    }

    /// Convert a screen position to canvas pixel coordinates.
    pub fn to_canvas(&self, screen: Point) -> Point {
        Point::new(
            (screen.x - self.origin.x) / self.scale,
            (screen.y - self.origin.y) / self.scale,
        )
    }
}

impl Default for CanvasViewport {
    fn default() -> Self {
        Self::new(Point::default(), 1.0)
    }
}
