// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Scene state management.
//!
//! The scene is the single document being edited: the current background
//! image, the ordered caption overlays on top of it, and the transient
//! drag state of an in-progress pointer gesture.

use super::overlay::{Point, TextOverlay, TextStyle, Vector};
use image::RgbaImage;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

static NEXT_IMAGE_GENERATION: AtomicU64 = AtomicU64::new(1);

/// A decoded background image. Never mutated once loaded; a new load
/// replaces it wholesale.
#[derive(Debug, Clone)]
pub struct BackgroundImage {
    generation: u64,
    pub label: String,
    pixels: Arc<RgbaImage>,
}

impl BackgroundImage {
    pub fn new(label: impl Into<String>, pixels: RgbaImage) -> Self {
        Self {
            generation: NEXT_IMAGE_GENERATION.fetch_add(1, Ordering::Relaxed),
            label: label.into(),
            pixels: Arc::new(pixels),
        }
    }

    /// Unique per decoded image; lets surfaces cache converted copies.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }
}

/// Active drag gesture: which overlay, and where it was grabbed relative
/// to its anchor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragState {
    pub overlay_id: u64,
    pub offset: Vector,
}

/// Complete editable document.
#[derive(Debug, Clone)]
pub struct Scene {
    pub width: u32,
    pub height: u32,
    pub background: Option<BackgroundImage>,
    /// Draw order; later entries are on top and win hit-tests.
    pub overlays: Vec<TextOverlay>,
    pub drag: Option<DragState>,
    next_overlay_id: u64,
}

impl Scene {
    /// Create an empty scene for a canvas of the given size.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            background: None,
            overlays: Vec::new(),
            drag: None,
            next_overlay_id: 1,
        }
    }

    /// Center of the canvas, where new captions are placed.
    pub fn center(&self) -> Point {
        Point::new(self.width as f32 / 2.0, self.height as f32 / 2.0)
    }

    /// Replace the background image. Overlays are kept.
    pub fn set_background(&mut self, image: BackgroundImage) {
        log::info!(
            "Background set to {} ({}x{})",
            image.label,
            image.width(),
            image.height()
        );
        self.background = Some(image);
    }

    /// Append a caption anchored at the canvas center.
    pub fn add_overlay(&mut self, text: impl Into<String>, style: TextStyle) -> u64 {
        let position = self.center();
        self.add_overlay_at(text, position, style)
    }

    /// Append a caption at an explicit anchor.
    pub fn add_overlay_at(
        &mut self,
        text: impl Into<String>,
        position: Point,
        style: TextStyle,
    ) -> u64 {
        let id = self.next_overlay_id;
        self.next_overlay_id += 1;
        self.overlays.push(TextOverlay::new(id, text, position, style));
        log::info!("Added caption {}, total: {}", id, self.overlays.len());
        id
    }

    /// Delete a caption. Ends the drag if it was the dragged one.
    pub fn remove_overlay(&mut self, id: u64) -> Option<TextOverlay> {
        let index = self.overlays.iter().position(|o| o.id == id)?;
        if self.drag.is_some_and(|d| d.overlay_id == id) {
            self.drag = None;
        }
        let removed = self.overlays.remove(index);
        log::info!("Deleted caption {}, total: {}", id, self.overlays.len());
        Some(removed)
    }

    /// Replace every caption, assigning fresh ids in order.
    pub fn replace_overlays(&mut self, overlays: Vec<TextOverlay>) {
        self.drag = None;
        self.overlays.clear();
        for overlay in overlays {
            self.add_overlay_at(overlay.text, overlay.position, overlay.style);
        }
    }

    /// Delete every caption. Ids keep counting up.
    pub fn clear_overlays(&mut self) {
        self.drag = None;
        self.overlays.clear();
        log::info!("Cleared all captions");
    }

    pub fn overlay(&self, id: u64) -> Option<&TextOverlay> {
        self.overlays.iter().find(|o| o.id == id)
    }

    pub fn overlay_mut(&mut self, id: u64) -> Option<&mut TextOverlay> {
        self.overlays.iter_mut().find(|o| o.id == id)
    }
}
