// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Caption layout serialization and deserialization.
//!
//! This module handles exporting and importing the caption list in YAML
//! and JSON formats so a set of captions can be reused on another image.

use crate::models::overlay::TextOverlay;
use crate::models::scene::Scene;
use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Captions plus the canvas size they were positioned for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaptionLayout {
    pub canvas_width: u32,
    pub canvas_height: u32,
    pub overlays: Vec<TextOverlay>,
}

impl CaptionLayout {
    pub fn from_scene(scene: &Scene) -> Self {
        Self {
            canvas_width: scene.width,
            canvas_height: scene.height,
            overlays: scene.overlays.clone(),
        }
    }
}

/// File format picked from a path's extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutFormat {
    Json,
    Yaml,
}

impl LayoutFormat {
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|s| s.to_str())
            .map(|s| s.to_ascii_lowercase());
        match extension.as_deref() {
            Some("json") => Ok(LayoutFormat::Json),
            Some("yaml") | Some("yml") => Ok(LayoutFormat::Yaml),
            other => bail!("Unsupported file extension: {:?}", other),
        }
    }
}

/// Export a caption layout, choosing the format from the extension.
pub fn export_layout(layout: &CaptionLayout, path: &Path) -> Result<()> {
    let contents = match LayoutFormat::from_path(path)? {
        LayoutFormat::Json => serde_json::to_string_pretty(layout)?,
        LayoutFormat::Yaml => serde_yaml::to_string(layout)?,
    };
    std::fs::write(path, contents)?;
    log::info!(
        "Exported {} captions to {}",
        layout.overlays.len(),
        path.display()
    );
    Ok(())
}

/// Import a caption layout, choosing the format from the extension.
pub fn import_layout(path: &Path) -> Result<CaptionLayout> {
    let format = LayoutFormat::from_path(path)?;
    let contents = std::fs::read_to_string(path)?;
    let layout: CaptionLayout = match format {
        LayoutFormat::Json => serde_json::from_str(&contents)?,
        LayoutFormat::Yaml => serde_yaml::from_str(&contents)?,
    };
    log::info!(
        "Imported {} captions from {}",
        layout.overlays.len(),
        path.display()
    );
    Ok(layout)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::overlay::{Color, Point, TextStyle};

    fn sample_scene() -> Scene {
        let mut scene = Scene::new(600, 400);
        scene.add_overlay("TOP TEXT", TextStyle::default());
        scene.add_overlay_at(
            "bottom text",
            Point::new(300.0, 380.0),
            TextStyle {
                font_family: "Comic Sans MS".to_string(),
                fill: Color::rgb(255, 0, 0),
                stroke_width: 0.0,
                ..TextStyle::default()
            },
        );
        scene
    }

    #[test]
    fn test_json_and_yaml_files() {
        let dir = tempfile::tempdir().unwrap();
        let layout = CaptionLayout::from_scene(&sample_scene());

        for name in ["captions.json", "captions.yaml", "captions.YML"] {
            let path = dir.path().join(name);
            export_layout(&layout, &path).unwrap();
            assert_eq!(import_layout(&path).unwrap(), layout);
        }
    }

    #[test]
    fn test_unknown_extension_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let layout = CaptionLayout::from_scene(&sample_scene());
        assert!(export_layout(&layout, &dir.path().join("captions.txt")).is_err());
        assert!(import_layout(&dir.path().join("captions")).is_err());
    }

    #[test]
    fn test_bad_color_fails_import() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        let json = r##"{
            "canvas_width": 10, "canvas_height": 10,
            "overlays": [{
                "id": 1, "text": "x", "position": {"x": 0.0, "y": 0.0},
                "style": {"font_family": "Arial", "font_size": 30.0,
                          "fill": "red", "stroke": "#000000", "stroke_width": 1.0}
            }]
        }"##;
        std::fs::write(&path, json).unwrap();
        assert!(import_layout(&path).is_err());
    }
}
