// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Caption overlay data structures.
//!
//! This module defines the positioned, styled text captions drawn on top
//! of the background image, along with the small value types they use.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A point in canvas pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Offset from `origin` to this point.
    pub fn offset_from(self, origin: Point) -> Vector {
        Vector {
            dx: self.x - origin.x,
            dy: self.y - origin.y,
        }
    }

    /// This point moved back by `offset`.
    pub fn minus(self, offset: Vector) -> Point {
        Point::new(self.x - offset.dx, self.y - offset.dy)
    }
}

/// A displacement between two points.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vector {
    pub dx: f32,
    pub dy: f32,
}

/// An opaque 8-bit RGB color, stored in files as `#rrggbb`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(0xff, 0xff, 0xff);
    pub const BLACK: Color = Color::rgb(0, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse a `#rrggbb` hex string (case-insensitive).
    pub fn from_hex(value: &str) -> Result<Self, ColorParseError> {
        let digits = value
            .strip_prefix('#')
            .ok_or_else(|| ColorParseError(value.to_string()))?;
        if digits.len() != 6 || !digits.is_ascii() {
            return Err(ColorParseError(value.to_string()));
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&digits[range], 16).map_err(|_| ColorParseError(value.to_string()))
        };
        Ok(Self::rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }

    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    pub fn to_array(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    pub fn from_array([r, g, b]: [u8; 3]) -> Self {
        Self::rgb(r, g, b)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl TryFrom<String> for Color {
    type Error = ColorParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Color::from_hex(&value)
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_hex()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid color `{0}`, expected #rrggbb")]
pub struct ColorParseError(String);

/// Font families offered in the style pickers.
pub const FONT_FAMILIES: [&str; 4] = ["Impact", "Arial", "Comic Sans MS", "Verdana"];

/// Allowed font size range in pixels.
pub const FONT_SIZE_RANGE: std::ops::RangeInclusive<f32> = 20.0..=80.0;

/// Allowed stroke width range in pixels.
pub const STROKE_WIDTH_RANGE: std::ops::RangeInclusive<f32> = 0.0..=10.0;

/// Visual style of a caption.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextStyle {
    pub font_family: String,
    /// Font size in pixels.
    pub font_size: f32,
    pub fill: Color,
    pub stroke: Color,
    /// Outline width in pixels; zero disables the outline.
    pub stroke_width: f32,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            font_family: FONT_FAMILIES[0].to_string(),
            font_size: 40.0,
            fill: Color::WHITE,
            stroke: Color::BLACK,
            stroke_width: 2.0,
        }
    }
}

impl TextStyle {
    pub fn has_outline(&self) -> bool {
        self.stroke_width > 0.0
    }
}

/// One user caption.
///
/// `position.x` is the horizontal center of the text and `position.y` the
/// baseline of its first line. Positions are unbounded; dragging a caption
/// off the canvas is allowed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextOverlay {
    pub id: u64,
    pub text: String,
    pub position: Point,
    pub style: TextStyle,
}

impl TextOverlay {
    pub fn new(id: u64, text: impl Into<String>, position: Point, style: TextStyle) -> Self {
        Self {
            id,
            text: text.into(),
            position,
            style,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_hex_roundtrip() {
        let color = Color::from_hex("#FF8000").unwrap();
        assert_eq!(color, Color::rgb(255, 128, 0));
        assert_eq!(color.to_hex(), "#ff8000");
    }

    #[test]
    fn test_color_rejects_malformed() {
        assert!(Color::from_hex("ff8000").is_err());
        assert!(Color::from_hex("#ff80").is_err());
        assert!(Color::from_hex("#gg0000").is_err());
        assert!(Color::from_hex("#ff800é").is_err());
    }

    #[test]
    fn test_style_serializes_colors_as_hex() {
        let json = serde_json::to_value(TextStyle::default()).unwrap();
        assert_eq!(json["fill"], "#ffffff");
        assert_eq!(json["stroke"], "#000000");
    }

    #[test]
    fn test_drag_offset_math() {
        let anchor = Point::new(100.0, 50.0);
        let grab = Point::new(110.0, 45.0);
        let offset = grab.offset_from(anchor);
        assert_eq!(offset, Vector { dx: 10.0, dy: -5.0 });
        assert_eq!(grab.minus(offset), anchor);
    }
}
