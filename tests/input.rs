use std::collections::VecDeque;

use hexscene::backend::{KeyCode, MouseButton, RawInput};
use hexscene::input::{SceneEvent, map_raw_event, poll_event};
use hexscene::scene::Scene;

fn scene() -> Scene {
    let mut s = Scene::new(1280.0, 800.0);
    s.set_grid(20, 28, 22.0, true);
    s
}

#[test]
fn test_quit_maps_directly() {
    let s = scene();
    assert_eq!(map_raw_event(&s, RawInput::Quit), Some(SceneEvent::Quit));
}

#[test]
fn test_click_resolves_to_hex_under_cursor() {
    let s = scene();
    // Identity camera: screen coordinates are world coordinates.
    let p = s.grid().axial_to_pixel(7, 3);
    let ev = map_raw_event(
        &s,
        RawInput::ButtonDown { button: MouseButton::Left, x: p.x, y: p.y },
    );
    assert_eq!(ev, Some(SceneEvent::PrimaryClick { q: 7, r: 3 }));
}

#[test]
fn test_right_click_is_secondary() {
    let s = scene();
    let p = s.grid().axial_to_pixel(0, 0);
    let ev = map_raw_event(
        &s,
        RawInput::ButtonDown { button: MouseButton::Right, x: p.x, y: p.y },
    );
    assert_eq!(ev, Some(SceneEvent::SecondaryClick { q: 0, r: 0 }));
}

#[test]
fn test_click_respects_camera_transform() {
    let mut s = scene();
    s.set_camera(130.0, -75.0, 1.6);
    let screen = s
        .camera()
        .world_to_screen(s.grid().axial_to_pixel(4, -1), s.window_size());
    let ev = map_raw_event(
        &s,
        RawInput::ButtonDown { button: MouseButton::Left, x: screen.x, y: screen.y },
    );
    assert_eq!(ev, Some(SceneEvent::PrimaryClick { q: 4, r: -1 }));
}

#[test]
fn test_hover_emits_axial_coordinates() {
    let s = scene();
    let p = s.grid().axial_to_pixel(12, -5);
    let ev = map_raw_event(&s, RawInput::CursorMoved { x: p.x, y: p.y });
    assert_eq!(ev, Some(SceneEvent::Hover { q: 12, r: -5 }));
}

#[test]
fn test_auto_repeat_keys_filtered() {
    let s = scene();
    assert_eq!(
        map_raw_event(&s, RawInput::KeyDown { key: KeyCode::KeyW, repeat: true }),
        None
    );
    assert_eq!(
        map_raw_event(&s, RawInput::KeyDown { key: KeyCode::KeyW, repeat: false }),
        Some(SceneEvent::KeyDown(KeyCode::KeyW))
    );
    assert_eq!(
        map_raw_event(&s, RawInput::KeyUp { key: KeyCode::KeyW }),
        Some(SceneEvent::KeyUp(KeyCode::KeyW))
    );
}

#[test]
fn test_unbound_button_is_skipped() {
    let s = scene();
    let ev = map_raw_event(
        &s,
        RawInput::ButtonDown { button: MouseButton::Middle, x: 100.0, y: 100.0 },
    );
    assert_eq!(ev, None);
}

#[test]
fn test_poll_drains_past_unmappable_events() {
    let s = scene();
    let mut queue: VecDeque<RawInput> = VecDeque::new();
    queue.push_back(RawInput::ButtonDown { button: MouseButton::Middle, x: 0.0, y: 0.0 });
    queue.push_back(RawInput::KeyDown { key: KeyCode::KeyA, repeat: true });
    queue.push_back(RawInput::Quit);

    // One poll skips both non-events and lands on the quit.
    assert_eq!(poll_event(&s, &mut queue), Some(SceneEvent::Quit));
    assert_eq!(poll_event(&s, &mut queue), None);
    assert!(queue.is_empty());
}

#[test]
fn test_poll_returns_events_in_order() {
    let s = scene();
    let p = s.grid().axial_to_pixel(1, 1);
    let mut queue: VecDeque<RawInput> = VecDeque::new();
    queue.push_back(RawInput::CursorMoved { x: p.x, y: p.y });
    queue.push_back(RawInput::ButtonDown { button: MouseButton::Left, x: p.x, y: p.y });
    queue.push_back(RawInput::KeyDown { key: KeyCode::Escape, repeat: false });

    assert_eq!(poll_event(&s, &mut queue), Some(SceneEvent::Hover { q: 1, r: 1 }));
    assert_eq!(poll_event(&s, &mut queue), Some(SceneEvent::PrimaryClick { q: 1, r: 1 }));
    assert_eq!(poll_event(&s, &mut queue), Some(SceneEvent::KeyDown(KeyCode::Escape)));
    assert_eq!(poll_event(&s, &mut queue), None);
}

#[test]
fn test_poll_empty_queue() {
    let s = scene();
    let mut queue: VecDeque<RawInput> = VecDeque::new();
    assert_eq!(poll_event(&s, &mut queue), None);
}
