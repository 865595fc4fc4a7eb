mod common;

use common::RecordingBackend;
use glam::Vec2;
use hexscene::backend::{Color, ImageSource, TextureHandle};
use hexscene::scene::{DebugLabel, HexInstance, MAX_TEXTURE_SLOTS, Scene, Tile};

fn scene() -> Scene {
    let mut s = Scene::new(1280.0, 800.0);
    s.set_grid(20, 28, 22.0, true);
    s
}

// ── Buffer exclusivity ──────────────────────────────────────────────────────

#[test]
fn test_set_tiles_clears_instances() {
    let mut s = scene();
    s.set_instances(&[HexInstance { q: 0, r: 0, color: Color::WHITE }]);
    assert_eq!(s.instances().len(), 1);

    s.set_tiles(&[Tile::at(1, 1), Tile::at(2, 2)]);
    assert!(s.instances().is_empty());
    assert_eq!(s.tiles().len(), 2);
}

#[test]
fn test_set_instances_clears_tiles_and_labels() {
    let mut s = scene();
    s.set_tiles(&[Tile::at(0, 0)]);
    s.set_debug_labels(&[DebugLabel::new(0, 0, "0,0")]);

    s.set_instances(&[HexInstance { q: 3, r: -1, color: Color::BLACK }]);
    assert!(s.tiles().is_empty());
    assert!(s.labels().is_empty());
    assert_eq!(s.instances().len(), 1);
}

#[test]
fn test_set_tiles_keeps_labels() {
    let mut s = scene();
    s.set_debug_labels(&[DebugLabel::new(4, 4, "4,4")]);
    s.set_tiles(&[Tile::at(4, 4)]);
    assert_eq!(s.labels().len(), 1);
}

#[test]
fn test_clear_tiles_leaves_everything_else() {
    let mut s = scene();
    s.set_tiles(&[Tile::at(0, 0), Tile::at(1, 0)]);
    s.set_debug_labels(&[DebugLabel::new(0, 0, "x")]);

    s.clear_tiles();
    assert!(s.tiles().is_empty());
    assert_eq!(s.labels().len(), 1);
}

#[test]
fn test_set_buffers_are_full_replace() {
    let mut s = scene();
    s.set_tiles(&[Tile::at(0, 0), Tile::at(1, 0), Tile::at(2, 0)]);
    s.set_tiles(&[Tile::at(9, 9)]);
    assert_eq!(s.tiles().len(), 1);
    assert_eq!((s.tiles()[0].q, s.tiles()[0].r), (9, 9));
}

// ── Labels ──────────────────────────────────────────────────────────────────

#[test]
fn test_label_truncated_at_sixteen_bytes() {
    let mut s = scene();
    s.set_debug_labels(&[DebugLabel::new(0, 0, "12345678901234567890")]);
    assert_eq!(s.labels()[0].text, "1234567890123456");
}

#[test]
fn test_label_truncation_respects_char_boundary() {
    // 15 ASCII bytes then a 2-byte char straddling the 16-byte limit: the
    // whole char is dropped rather than splitting it.
    let mut s = scene();
    s.set_debug_labels(&[DebugLabel::new(0, 0, "123456789012345é")]);
    assert_eq!(s.labels()[0].text, "123456789012345");
}

#[test]
fn test_short_label_unmodified() {
    let mut s = scene();
    s.set_debug_labels(&[DebugLabel::new(2, -3, "2,-3")]);
    assert_eq!(s.labels()[0].text, "2,-3");
}

// ── Grid origin ─────────────────────────────────────────────────────────────

#[test]
fn test_grid_origin_centers_extent() {
    // 28 cols: grid_w = 1.5·27·22 + 44 = 935 → origin.x = (1280−935)/2 + 22.
    // 20 rows: grid_h = √3·22·20.5 + 22 ≈ 803.155 → origin.y ≈ 20.4224.
    let s = scene();
    let origin = s.grid().origin();
    assert!((origin.x - 194.5).abs() < 1e-3, "origin.x={}", origin.x);
    assert!((origin.y - 20.4224).abs() < 1e-2, "origin.y={}", origin.y);
}

#[test]
fn test_window_resize_recomputes_origin() {
    let mut s = scene();
    let before = s.grid().origin();
    s.set_window_size(1920.0, 1080.0);
    let after = s.grid().origin();
    assert!((after.x - before.x - 320.0).abs() < 1e-3);
    assert!((after.y - before.y - 140.0).abs() < 1e-3);
}

#[test]
fn test_grid_round_trip_through_origin() {
    let s = scene();
    for &(q, r) in &[(0, 0), (5, 3), (27, -13), (-4, 9)] {
        let p = s.grid().axial_to_pixel(q, r);
        assert_eq!(s.grid().pixel_to_axial(p), (q, r));
    }
}

// ── Texture slots ───────────────────────────────────────────────────────────

#[test]
fn test_load_and_query_texture() {
    let mut s = scene();
    let mut backend = RecordingBackend::new();
    backend.decode_result = Some((48, 32));

    assert!(s.load_texture(3, ImageSource::Bytes(&[]), &mut backend));
    assert_eq!(s.query_texture(3), Some((48, 32)));
    assert_eq!(s.query_texture(4), None);
}

#[test]
fn test_reload_releases_previous_handle() {
    let mut s = scene();
    let mut backend = RecordingBackend::new();

    s.load_texture(0, ImageSource::Bytes(&[]), &mut backend);
    s.load_texture(0, ImageSource::Bytes(&[]), &mut backend);
    assert_eq!(backend.released, vec![TextureHandle(1)]);
    assert_eq!(s.query_texture(0), Some((64, 64)));
}

#[test]
fn test_failed_load_empties_slot() {
    let mut s = scene();
    let mut backend = RecordingBackend::new();
    s.load_texture(7, ImageSource::Bytes(&[]), &mut backend);

    // The old image is released before the decode is attempted, so a failed
    // reload leaves the slot empty rather than stale.
    backend.decode_result = None;
    assert!(!s.load_texture(7, ImageSource::Bytes(&[]), &mut backend));
    assert_eq!(s.query_texture(7), None);
    assert_eq!(backend.released, vec![TextureHandle(1)]);
}

#[test]
fn test_out_of_range_slot_is_noop_failure() {
    let mut s = scene();
    let mut backend = RecordingBackend::new();

    assert!(!s.load_texture(MAX_TEXTURE_SLOTS, ImageSource::Bytes(&[]), &mut backend));
    assert_eq!(backend.decode_calls, 0);

    s.unload_texture(MAX_TEXTURE_SLOTS, &mut backend);
    assert!(backend.released.is_empty());
    assert_eq!(s.query_texture(MAX_TEXTURE_SLOTS), None);
}

#[test]
fn test_unload_texture_releases_and_clears() {
    let mut s = scene();
    let mut backend = RecordingBackend::new();
    s.load_texture(5, ImageSource::Bytes(&[]), &mut backend);

    s.unload_texture(5, &mut backend);
    assert_eq!(backend.released, vec![TextureHandle(1)]);
    assert_eq!(s.query_texture(5), None);

    // Second unload of an empty slot releases nothing.
    s.unload_texture(5, &mut backend);
    assert_eq!(backend.released.len(), 1);
}

#[test]
fn test_clear_textures_releases_every_slot() {
    let mut s = scene();
    let mut backend = RecordingBackend::new();
    for slot in [0, 17, 63] {
        s.load_texture(slot, ImageSource::Bytes(&[]), &mut backend);
    }

    s.clear_textures(&mut backend);
    assert_eq!(backend.released.len(), 3);
    for slot in [0, 17, 63] {
        assert_eq!(s.query_texture(slot), None);
    }
}

#[test]
fn test_textures_survive_buffer_swaps() {
    let mut s = scene();
    let mut backend = RecordingBackend::new();
    s.load_texture(2, ImageSource::Bytes(&[]), &mut backend);

    s.set_instances(&[HexInstance { q: 0, r: 0, color: Color::WHITE }]);
    s.set_tiles(&[Tile::at(0, 0)]);
    assert_eq!(s.query_texture(2), Some((64, 64)));
}

// ── Tile defaults ───────────────────────────────────────────────────────────

#[test]
fn test_tile_at_defaults() {
    let tile = Tile::at(3, -2);
    assert_eq!((tile.q, tile.r), (3, -2));
    assert_eq!(tile.terrain_tex, None);
    assert_eq!(tile.unit_tex, None);
    assert_eq!(tile.terrain_scale, 1.0);
    assert_eq!(tile.unit_scale, 0.7);
    assert_eq!(tile.overlay.a, 0);
    assert_eq!(tile.offset, Vec2::ZERO);
}
