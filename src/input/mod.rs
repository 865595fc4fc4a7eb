// ── Input mapper ──────────────────────────────────────────────────────────────
//
// Stateless translation of raw backend events into semantic scene events.
// Pointer events are resolved through the camera inverse and hex inverse so
// the caller receives axial coordinates, never pixels.

use glam::Vec2;

pub use crate::backend::{KeyCode, MouseButton};
use crate::backend::{EventSource, RawInput};
use crate::scene::Scene;

/// A semantic input event, ready for game logic.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum SceneEvent {
    Quit,
    /// Left button down on the hex at `(q, r)`.
    PrimaryClick { q: i32, r: i32 },
    /// Right button down on the hex at `(q, r)`.
    SecondaryClick { q: i32, r: i32 },
    /// Pointer motion over the hex at `(q, r)` — emitted on every motion
    /// event, not throttled.
    Hover { q: i32, r: i32 },
    /// Physical key press (auto-repeat filtered out).
    KeyDown(KeyCode),
    KeyUp(KeyCode),
}

/// Resolve a screen position to the axial hex under it.
fn hex_under(scene: &Scene, x: f32, y: f32) -> (i32, i32) {
    let world = scene
        .camera()
        .screen_to_world(Vec2::new(x, y), scene.window_size());
    scene.grid().pixel_to_axial(world)
}

/// Map one raw event.  Returns `None` for events with no semantic meaning
/// (unbound mouse buttons, key auto-repeats).
pub fn map_raw_event(scene: &Scene, raw: RawInput) -> Option<SceneEvent> {
    match raw {
        RawInput::Quit => Some(SceneEvent::Quit),

        RawInput::ButtonDown { button, x, y } => {
            let (q, r) = hex_under(scene, x, y);
            match button {
                MouseButton::Left => Some(SceneEvent::PrimaryClick { q, r }),
                MouseButton::Right => Some(SceneEvent::SecondaryClick { q, r }),
                _ => None,
            }
        }

        RawInput::CursorMoved { x, y } => {
            let (q, r) = hex_under(scene, x, y);
            Some(SceneEvent::Hover { q, r })
        }

        RawInput::KeyDown { key, repeat } => {
            if repeat { None } else { Some(SceneEvent::KeyDown(key)) }
        }

        RawInput::KeyUp { key } => Some(SceneEvent::KeyUp(key)),
    }
}

/// Drain `source` until the first mappable event, and return it.  `None`
/// means the queue is exhausted — callers poll repeatedly per frame, typical
/// event-pump style.
pub fn poll_event<S: EventSource>(scene: &Scene, source: &mut S) -> Option<SceneEvent> {
    while let Some(raw) = source.poll_raw_event() {
        if let Some(ev) = map_raw_event(scene, raw) {
            return Some(ev);
        }
    }
    None
}
