// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Caption selection and dragging.
//!
//! Hit boxes use the width of the unwrapped caption text and a height of
//! one font size above the first baseline. For captions that wrap onto
//! several lines the clickable area therefore differs from what is drawn.

use super::pointer::{PointerEvent, RawPointerEvent};
use crate::models::overlay::{Point, TextOverlay};
use crate::models::scene::{DragState, Scene};
use crate::render::{FontSpec, TextMeasure};
use crate::util::geometry::CanvasViewport;

/// Whether `point` lies inside the overlay's hit box (edges inclusive).
pub fn overlay_contains<M: TextMeasure + ?Sized>(
    measure: &M,
    overlay: &TextOverlay,
    point: Point,
) -> bool {
    let font = FontSpec::from(&overlay.style);
    let half_width = measure.measure_text(&overlay.text, &font) / 2.0;
    let anchor = overlay.position;

    point.x >= anchor.x - half_width
        && point.x <= anchor.x + half_width
        && point.y >= anchor.y - overlay.style.font_size
        && point.y <= anchor.y
}

/// Find the top-most overlay under `point`.
pub fn hit_test<M: TextMeasure + ?Sized>(scene: &Scene, measure: &M, point: Point) -> Option<u64> {
    scene
        .overlays
        .iter()
        .rev()
        .find(|overlay| overlay_contains(measure, overlay, point))
        .map(|overlay| overlay.id)
}

/// Start dragging `overlay_id`, remembering where it was grabbed so it
/// does not jump to the pointer.
pub fn begin_drag(scene: &mut Scene, overlay_id: u64, point: Point) -> bool {
    let Some(offset) = scene
        .overlay(overlay_id)
        .map(|overlay| point.offset_from(overlay.position))
    else {
        return false;
    };
    scene.drag = Some(DragState { overlay_id, offset });
    log::info!("Started dragging caption {}", overlay_id);
    true
}

/// Move the dragged overlay so it keeps its grab offset from `point`.
/// Returns whether anything moved.
pub fn update_drag(scene: &mut Scene, point: Point) -> bool {
    let Some(drag) = scene.drag else {
        return false;
    };
    match scene.overlay_mut(drag.overlay_id) {
        Some(overlay) => {
            overlay.position = point.minus(drag.offset);
            true
        }
        None => false,
    }
}

/// Stop any drag. Safe to call when nothing is being dragged.
pub fn end_drag(scene: &mut Scene) -> bool {
    match scene.drag.take() {
        Some(drag) => {
            log::info!("Stopped dragging caption {}", drag.overlay_id);
            true
        }
        None => false,
    }
}

/// Turns raw canvas input into scene mutations.
#[derive(Debug, Default)]
pub struct InteractionController {
    viewport: CanvasViewport,
}

impl InteractionController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record where the canvas is drawn this frame.
    pub fn set_viewport(&mut self, viewport: CanvasViewport) {
        self.viewport = viewport;
    }

    /// Apply one input event. Returns `true` when the scene needs a redraw.
    pub fn handle<M: TextMeasure + ?Sized>(
        &mut self,
        scene: &mut Scene,
        measure: &M,
        event: &RawPointerEvent,
    ) -> bool {
        match event.normalize(&self.viewport) {
            Some(PointerEvent::Press(point)) => {
                // A press on empty canvas leaves any current drag alone.
                if let Some(id) = hit_test(scene, measure, point) {
                    begin_drag(scene, id, point);
                }
                false
            }
            Some(PointerEvent::Move(point)) => update_drag(scene, point),
            Some(PointerEvent::Release) => {
                end_drag(scene);
                false
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interaction::pointer::{MousePhase, TouchPhase};
    use crate::models::overlay::TextStyle;
    use crate::render::testing::FixedAdvance;

    // 10px per char at the default 40px size gives 4 chars = 40px
    fn measure() -> FixedAdvance {
        FixedAdvance::new(0.25)
    }

    fn scene_with(texts: &[(&str, Point)]) -> Scene {
        let mut scene = Scene::new(500, 500);
        for (text, position) in texts {
            scene.add_overlay_at(*text, *position, TextStyle::default());
        }
        scene
    }

    fn mouse(phase: MousePhase, x: f32, y: f32) -> RawPointerEvent {
        RawPointerEvent::Mouse {
            phase,
            client: Point::new(x, y),
        }
    }

    #[test]
    fn test_hit_box_edges_are_inclusive() {
        let scene = scene_with(&[("abcd", Point::new(100.0, 100.0))]);
        let id = scene.overlays[0].id;

        assert_eq!(hit_test(&scene, &measure(), Point::new(80.0, 60.0)), Some(id));
        assert_eq!(hit_test(&scene, &measure(), Point::new(120.0, 100.0)), Some(id));
        assert_eq!(hit_test(&scene, &measure(), Point::new(120.5, 100.0)), None);
        assert_eq!(hit_test(&scene, &measure(), Point::new(100.0, 100.5)), None);
        assert_eq!(hit_test(&scene, &measure(), Point::new(100.0, 59.5)), None);
    }

    #[test]
    fn test_topmost_overlay_wins() {
        let scene = scene_with(&[
            ("abcd", Point::new(100.0, 100.0)),
            ("efgh", Point::new(110.0, 90.0)),
        ]);
        let later = scene.overlays[1].id;
        assert_eq!(hit_test(&scene, &measure(), Point::new(105.0, 80.0)), Some(later));
    }

    #[test]
    fn test_hit_box_uses_unwrapped_width() {
        // 60 chars = 600px, wider than the 480px wrap width of a 500px canvas
        let text = "a".repeat(60);
        let scene = scene_with(&[(text.as_str(), Point::new(250.0, 100.0))]);
        assert!(hit_test(&scene, &measure(), Point::new(-40.0, 90.0)).is_some());
    }

    #[test]
    fn test_drag_preserves_grab_offset() {
        let mut scene = scene_with(&[("abcd", Point::new(100.0, 100.0))]);
        let id = scene.overlays[0].id;
        let before = scene.overlays[0].position;

        let p = Point::new(110.0, 90.0);
        let q = Point::new(210.0, 45.0);
        assert!(begin_drag(&mut scene, id, p));
        assert!(update_drag(&mut scene, q));

        let after = scene.overlay(id).unwrap().position;
        assert_eq!(after, Point::new(before.x + (q.x - p.x), before.y + (q.y - p.y)));
    }

    #[test]
    fn test_update_after_end_is_noop() {
        let mut scene = scene_with(&[("abcd", Point::new(100.0, 100.0))]);
        let id = scene.overlays[0].id;

        begin_drag(&mut scene, id, Point::new(100.0, 90.0));
        assert!(end_drag(&mut scene));
        assert!(!end_drag(&mut scene));
        assert!(!update_drag(&mut scene, Point::new(300.0, 300.0)));
        assert_eq!(scene.overlay(id).unwrap().position, Point::new(100.0, 100.0));
    }

    #[test]
    fn test_dragging_never_reorders() {
        let mut scene = scene_with(&[
            ("abcd", Point::new(100.0, 100.0)),
            ("efgh", Point::new(300.0, 300.0)),
        ]);
        let order: Vec<u64> = scene.overlays.iter().map(|o| o.id).collect();

        begin_drag(&mut scene, order[0], Point::new(100.0, 90.0));
        update_drag(&mut scene, Point::new(310.0, 290.0));
        end_drag(&mut scene);

        let after: Vec<u64> = scene.overlays.iter().map(|o| o.id).collect();
        assert_eq!(order, after);
    }

    #[test]
    fn test_controller_mouse_gesture() {
        let mut scene = scene_with(&[("abcd", Point::new(100.0, 100.0))]);
        let id = scene.overlays[0].id;
        let mut controller = InteractionController::new();
        controller.set_viewport(CanvasViewport::new(Point::new(20.0, 10.0), 1.0));

        assert!(!controller.handle(&mut scene, &measure(), &mouse(MousePhase::Down, 125.0, 105.0)));
        assert!(scene.drag.is_some());
        assert!(controller.handle(&mut scene, &measure(), &mouse(MousePhase::Move, 145.0, 125.0)));
        assert_eq!(scene.overlay(id).unwrap().position, Point::new(120.0, 120.0));

        controller.handle(&mut scene, &measure(), &mouse(MousePhase::Leave, 0.0, 0.0));
        assert!(scene.drag.is_none());
        assert!(!controller.handle(&mut scene, &measure(), &mouse(MousePhase::Move, 400.0, 400.0)));
        assert_eq!(scene.overlay(id).unwrap().position, Point::new(120.0, 120.0));
    }

    #[test]
    fn test_controller_touch_gesture() {
        let mut scene = scene_with(&[("abcd", Point::new(100.0, 100.0))]);
        let id = scene.overlays[0].id;
        let mut controller = InteractionController::new();

        let touch = |phase, x, y| RawPointerEvent::Touch {
            phase,
            touches: vec![Point::new(x, y)],
        };
        controller.handle(&mut scene, &measure(), &touch(TouchPhase::Start, 100.0, 95.0));
        controller.handle(&mut scene, &measure(), &touch(TouchPhase::Move, 50.0, 45.0));
        controller.handle(&mut scene, &measure(), &touch(TouchPhase::End, 0.0, 0.0));

        assert_eq!(scene.overlay(id).unwrap().position, Point::new(50.0, 50.0));
        assert!(scene.drag.is_none());
    }

    #[test]
    fn test_press_on_empty_canvas_keeps_drag() {
        let mut scene = scene_with(&[("abcd", Point::new(100.0, 100.0))]);
        let id = scene.overlays[0].id;
        begin_drag(&mut scene, id, Point::new(100.0, 90.0));

        let mut controller = InteractionController::new();
        controller.handle(&mut scene, &measure(), &mouse(MousePhase::Down, 400.0, 400.0));
        assert_eq!(scene.drag.map(|d| d.overlay_id), Some(id));
    }
}
