// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Mouse and touch input normalization.
//!
//! Raw events carry screen positions. Normalizing subtracts the canvas
//! origin and undoes the display scale so the controller only ever sees
//! canvas pixels, regardless of which device produced the event.

use crate::models::overlay::Point;
use crate::util::geometry::CanvasViewport;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MousePhase {
    Down,
    Move,
    Up,
    Leave,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchPhase {
    Start,
    Move,
    End,
    Cancel,
}

/// An input event as delivered by the windowing layer.
#[derive(Debug, Clone, PartialEq)]
pub enum RawPointerEvent {
    Mouse { phase: MousePhase, client: Point },
    /// `touches` lists the active touch points; only the first is used.
    Touch { phase: TouchPhase, touches: Vec<Point> },
}

/// Device-independent pointer event in canvas pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Press(Point),
    Move(Point),
    /// Pointer released or left the canvas.
    Release,
}

impl RawPointerEvent {
    /// Translate to canvas coordinates. Touch start/move events without
    /// any active touch produce nothing.
    pub fn normalize(&self, viewport: &CanvasViewport) -> Option<PointerEvent> {
        match self {
            RawPointerEvent::Mouse { phase, client } => {
                let point = viewport.to_canvas(*client);
                Some(match phase {
                    MousePhase::Down => PointerEvent::Press(point),
                    MousePhase::Move => PointerEvent::Move(point),
                    MousePhase::Up | MousePhase::Leave => PointerEvent::Release,
                })
            }
            RawPointerEvent::Touch { phase, touches } => match phase {
                TouchPhase::End | TouchPhase::Cancel => Some(PointerEvent::Release),
                TouchPhase::Start | TouchPhase::Move => {
                    let point = viewport.to_canvas(*touches.first()?);
                    Some(if *phase == TouchPhase::Start {
                        PointerEvent::Press(point)
                    } else {
                        PointerEvent::Move(point)
                    })
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewport() -> CanvasViewport {
        CanvasViewport::new(Point::new(100.0, 50.0), 1.0)
    }

    #[test]
    fn test_mouse_subtracts_canvas_origin() {
        let event = RawPointerEvent::Mouse {
            phase: MousePhase::Down,
            client: Point::new(130.0, 70.0),
        };
        assert_eq!(
            event.normalize(&viewport()),
            Some(PointerEvent::Press(Point::new(30.0, 20.0)))
        );
    }

    #[test]
    fn test_scaled_canvas() {
        let viewport = CanvasViewport::new(Point::new(0.0, 0.0), 0.5);
        let event = RawPointerEvent::Mouse {
            phase: MousePhase::Move,
            client: Point::new(100.0, 40.0),
        };
        assert_eq!(
            event.normalize(&viewport),
            Some(PointerEvent::Move(Point::new(200.0, 80.0)))
        );
    }

    #[test]
    fn test_touch_uses_first_touch() {
        let event = RawPointerEvent::Touch {
            phase: TouchPhase::Move,
            touches: vec![Point::new(110.0, 60.0), Point::new(400.0, 400.0)],
        };
        assert_eq!(
            event.normalize(&viewport()),
            Some(PointerEvent::Move(Point::new(10.0, 10.0)))
        );
    }

    #[test]
    fn test_touch_without_touches_is_ignored() {
        let event = RawPointerEvent::Touch {
            phase: TouchPhase::Start,
            touches: Vec::new(),
        };
        assert_eq!(event.normalize(&viewport()), None);
    }

    #[test]
    fn test_every_end_phase_releases() {
        let ends = [
            RawPointerEvent::Mouse { phase: MousePhase::Up, client: Point::default() },
            RawPointerEvent::Mouse { phase: MousePhase::Leave, client: Point::default() },
            RawPointerEvent::Touch { phase: TouchPhase::End, touches: Vec::new() },
            RawPointerEvent::Touch { phase: TouchPhase::Cancel, touches: Vec::new() },
        ];
        for event in ends {
            assert_eq!(event.normalize(&viewport()), Some(PointerEvent::Release));
        }
    }
}
