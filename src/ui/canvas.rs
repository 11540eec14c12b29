// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! The meme canvas.
//!
//! Shows the rendered surface as a texture, shrunk to fit the panel when
//! needed, and turns egui pointer and touch events into
//! [`RawPointerEvent`]s for the interaction controller.

use crate::interaction::pointer::{MousePhase, RawPointerEvent, TouchPhase};
use crate::models::overlay::Point;
use crate::util::geometry::CanvasViewport;

/// Pointer state carried between frames.
#[derive(Debug, Default)]
pub struct CanvasInput {
    /// The touch that drives dragging; other fingers are ignored.
    primary_touch: Option<egui::TouchId>,
}

/// What the canvas produced this frame.
pub struct CanvasOutput {
    pub viewport: CanvasViewport,
    pub events: Vec<RawPointerEvent>,
}

/// Where the canvas sits on screen this frame.
pub struct CanvasArea<'a> {
    pub rect: egui::Rect,
    /// Whether another layer, such as an open menu, is on top at a point.
    pub covered: &'a dyn Fn(egui::Pos2) -> bool,
}

impl CanvasArea<'_> {
    /// Presses and touches only start on visible parts of the canvas.
    fn accepts(&self, pos: egui::Pos2) -> bool {
        self.rect.contains(pos) && !(self.covered)(pos)
    }
}

fn point(pos: egui::Pos2) -> Point {
    Point::new(pos.x, pos.y)
}

/// Largest size no bigger than the canvas itself that fits `available`.
pub fn display_scale(canvas_size: (u32, u32), available: egui::Vec2) -> f32 {
    let (width, height) = canvas_size;
    let scale_x = available.x / width.max(1) as f32;
    let scale_y = available.y / height.max(1) as f32;
    scale_x.min(scale_y).clamp(0.05, 1.0)
}

impl CanvasInput {
    /// Translate one egui event, given where the canvas sits on screen.
    pub fn translate(&mut self, event: &egui::Event, area: &CanvasArea<'_>) -> Option<RawPointerEvent> {
        match event {
            egui::Event::PointerButton {
                pos,
                button: egui::PointerButton::Primary,
                pressed,
                ..
            } => {
                if *pressed {
                    // Presses outside the canvas belong to other widgets
                    area.accepts(*pos).then(|| RawPointerEvent::Mouse {
                        phase: MousePhase::Down,
                        client: point(*pos),
                    })
                } else {
                    Some(RawPointerEvent::Mouse {
                        phase: MousePhase::Up,
                        client: point(*pos),
                    })
                }
            }
            egui::Event::PointerMoved(pos) => {
                let phase = if area.rect.contains(*pos) {
                    MousePhase::Move
                } else {
                    MousePhase::Leave
                };
                Some(RawPointerEvent::Mouse {
                    phase,
                    client: point(*pos),
                })
            }
            egui::Event::PointerGone => Some(RawPointerEvent::Mouse {
                phase: MousePhase::Leave,
                client: Point::default(),
            }),
            egui::Event::Touch { id, phase, pos, .. } => self.translate_touch(*id, *phase, *pos, area),
            _ => None,
        }
    }

    fn translate_touch(
        &mut self,
        id: egui::TouchId,
        phase: egui::TouchPhase,
        pos: egui::Pos2,
        area: &CanvasArea<'_>,
    ) -> Option<RawPointerEvent> {
        match phase {
            egui::TouchPhase::Start => {
                if self.primary_touch.is_some() || !area.accepts(pos) {
                    return None;
                }
                self.primary_touch = Some(id);
                Some(RawPointerEvent::Touch {
                    phase: TouchPhase::Start,
                    touches: vec![point(pos)],
                })
            }
            egui::TouchPhase::Move => (self.primary_touch == Some(id)).then(|| RawPointerEvent::Touch {
                phase: TouchPhase::Move,
                touches: vec![point(pos)],
            }),
            egui::TouchPhase::End | egui::TouchPhase::Cancel => {
                if self.primary_touch != Some(id) {
                    return None;
                }
                self.primary_touch = None;
                let phase = if phase == egui::TouchPhase::End {
                    TouchPhase::End
                } else {
                    TouchPhase::Cancel
                };
                Some(RawPointerEvent::Touch {
                    phase,
                    touches: Vec::new(),
                })
            }
        }
    }
}

/// Display the canvas texture and collect pointer input over it.
pub fn show(
    ui: &mut egui::Ui,
    texture: Option<&egui::TextureHandle>,
    canvas_size: (u32, u32),
    dragging: bool,
    input: &mut CanvasInput,
) -> CanvasOutput {
    ui.style_mut().visuals.extreme_bg_color = egui::Color32::from_gray(40);

    let scale = display_scale(canvas_size, ui.available_size());
    let display = egui::vec2(canvas_size.0 as f32 * scale, canvas_size.1 as f32 * scale);

    let mut rect = egui::Rect::NOTHING;
    ui.centered_and_justified(|ui| {
        let (allocated, response) = ui.allocate_exact_size(display, egui::Sense::drag());
        rect = allocated;
        let painter = ui.painter_at(allocated);
        painter.rect_filled(allocated, 0.0, egui::Color32::WHITE);
        if let Some(texture) = texture {
            painter.image(
                texture.id(),
                allocated,
                egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                egui::Color32::WHITE,
            );
        }
        if dragging {
            ui.ctx().set_cursor_icon(egui::CursorIcon::Grabbing);
        } else if response.hovered() {
            ui.ctx().set_cursor_icon(egui::CursorIcon::Move);
        }
    });

    let layer = ui.layer_id();
    let ctx = ui.ctx().clone();
    let covered = move |pos: egui::Pos2| ctx.layer_id_at(pos).is_some_and(|top| top != layer);
    let area = CanvasArea { rect, covered: &covered };

    // Copied out so the context is not locked while `covered` queries it
    let raw_events = ui.input(|i| i.events.clone());
    let events = raw_events
        .iter()
        .filter_map(|event| input.translate(event, &area))
        .collect();

    CanvasOutput {
        viewport: CanvasViewport::new(point(rect.min), scale),
        events,
    }
}
