// ── Tile compositor & frame driver ────────────────────────────────────────────
//
// Turns scene state into an ordered sequence of backend draw calls, one frame
// at a time: clear → tiles (terrain, overlay, unit per tile) or color-only
// instances → debug labels → present.  All decisions about *what* to draw for
// a tile live here; the backend only rasterizes.

use glam::Vec2;

use crate::backend::{Color, DrawBackend, Rect};
use crate::font;
use crate::geometry::{hex_corners, hex_height, hex_width};
use crate::scene::{DebugLabel, HexInstance, Scene, Tile};

/// Solid hex color drawn when a tile's terrain slot is empty or invalid.
pub const FALLBACK_TERRAIN: Color = Color::rgba(70, 90, 110, 255);

/// Hex outline color (semi-transparent black).
pub const OUTLINE_COLOR: Color = Color::rgba(0, 0, 0, 200);

/// Debug label pixel color.
pub const LABEL_COLOR: Color = Color::rgba(230, 230, 230, 255);

pub const DEFAULT_TERRAIN_SCALE: f32 = 1.0;
pub const DEFAULT_UNIT_SCALE: f32 = 0.7;

// Fit-to-bounds tuning constants.  Baked into the original behavior with no
// stated rationale; changing them changes visible sprite placement, so they
// stay put.
const HEIGHT_UNDERSHOOT: f32 = 0.92;
const HEIGHT_CORRECTION: f32 = 1.02;
const MIN_SPRITE_SCALE: f32 = 0.01;

// ── Fit-to-bounds ─────────────────────────────────────────────────────────────

/// Per-layer scale multiplier resolution: non-positive input falls back to the
/// layer default, tiny positives are clamped away from zero-size output.
#[inline]
pub fn effective_scale(requested: f32, default: f32) -> f32 {
    if requested > 0.0 { requested.max(MIN_SPRITE_SCALE) } else { default }
}

/// Size a sprite's destination rectangle inside the hex bounding box
/// `(target_w, target_h)`, preserving the natural aspect ratio.
///
/// Width-first: scale natural width to target width.  If the resulting
/// height undershoots 92% of the target height, up-scale uniformly until
/// height reaches 102% of target — short-and-wide art is corrected to fill
/// the hex at the cost of minor width overflow.  The multiplier applies
/// after the fit.  Without natural dimensions the rectangle is simply the
/// target bounds times the multiplier.
pub fn fit_to_bounds(
    natural: Option<(u32, u32)>,
    target_w: f32,
    target_h: f32,
    multiplier: f32,
) -> (f32, f32) {
    match natural {
        Some((nw, nh)) if nw > 0 && nh > 0 => {
            let scale = target_w / nw as f32;
            let mut w = target_w;
            let mut h = nh as f32 * scale;
            if h < HEIGHT_UNDERSHOOT * target_h {
                let correction = HEIGHT_CORRECTION * target_h / h;
                w *= correction;
                h *= correction;
            }
            (w * multiplier, h * multiplier)
        }
        _ => (target_w * multiplier, target_h * multiplier),
    }
}

// ── Hex primitives ────────────────────────────────────────────────────────────

/// Filled hex with outline — the shared shape for fallbacks, overlays, and
/// color-only instances.
fn draw_hex<B: DrawBackend>(backend: &mut B, center: Vec2, radius: f32, fill: Color) {
    let corners = hex_corners(center, radius);
    backend.draw_filled_polygon(&corners, fill);
    for i in 0..6 {
        backend.draw_line(corners[i], corners[(i + 1) % 6], OUTLINE_COLOR);
    }
}

// ── Per-item composition ──────────────────────────────────────────────────────

/// Compose one tile, in fixed layer order: terrain (or fallback hex),
/// overlay tint (alpha-gated, always the true hex shape), unit sprite (or
/// nothing).
pub fn compose_tile<B: DrawBackend>(scene: &Scene, tile: &Tile, backend: &mut B) {
    let world = scene.grid().axial_to_pixel(tile.q, tile.r) + tile.offset;
    let center = scene.camera().world_to_screen(world, scene.window_size());
    let radius = scene.grid().size * scene.camera().effective_zoom();
    let target_w = hex_width(radius);
    let target_h = hex_height(radius);

    // Terrain layer: textured rect, or a solid fallback hex.
    match scene.resolve_texture(tile.terrain_tex) {
        Some((handle, nat_w, nat_h)) => {
            let scale = effective_scale(tile.terrain_scale, DEFAULT_TERRAIN_SCALE);
            let (w, h) = fit_to_bounds(Some((nat_w, nat_h)), target_w, target_h, scale);
            backend.draw_textured_rect(handle, Rect::centered(center, w, h));
        }
        None => draw_hex(backend, center, radius, FALLBACK_TERRAIN),
    }

    // Overlay tint above whatever the terrain pass produced.
    if tile.overlay.a > 0 {
        draw_hex(backend, center, radius, tile.overlay);
    }

    // Unit layer: no fallback shape, unlike terrain.
    if let Some((handle, nat_w, nat_h)) = scene.resolve_texture(tile.unit_tex) {
        let scale = effective_scale(tile.unit_scale, DEFAULT_UNIT_SCALE);
        let (w, h) = fit_to_bounds(Some((nat_w, nat_h)), target_w, target_h, scale);
        backend.draw_textured_rect(handle, Rect::centered(center, w, h));
    }
}

/// Color-only instance mode: one solid hex per instance, no layering and no
/// texture lookups at all.
pub fn compose_instance<B: DrawBackend>(scene: &Scene, inst: &HexInstance, backend: &mut B) {
    let world = scene.grid().axial_to_pixel(inst.q, inst.r);
    let center = scene.camera().world_to_screen(world, scene.window_size());
    let radius = scene.grid().size * scene.camera().effective_zoom();
    draw_hex(backend, center, radius, inst.color);
}

/// One debug label, centred on its hex.  Cell size tracks the on-screen hex
/// radius so labels stay inside the hex at any zoom.
pub fn compose_label<B: DrawBackend>(scene: &Scene, label: &DebugLabel, backend: &mut B) {
    let world = scene.grid().axial_to_pixel(label.q, label.r);
    let center = scene.camera().world_to_screen(world, scene.window_size());
    let radius = scene.grid().size * scene.camera().effective_zoom();
    let cell = (radius / 8.0).max(1.0);
    font::draw_text_centered(backend, center, cell, &label.text, LABEL_COLOR);
}

// ── Frame driver ──────────────────────────────────────────────────────────────

/// Compose one full frame from the current scene snapshot.
///
/// Tiles take precedence over instances — the buffers are mutually exclusive
/// by `Scene`'s set semantics, so at most one branch has content.  Labels are
/// drawn above everything, then the frame is presented.
pub fn render_frame<B: DrawBackend>(scene: &Scene, backend: &mut B) {
    backend.clear(scene.clear_color());

    if !scene.tiles().is_empty() {
        for tile in scene.tiles() {
            compose_tile(scene, tile, backend);
        }
    } else {
        for inst in scene.instances() {
            compose_instance(scene, inst, backend);
        }
    }

    for label in scene.labels() {
        compose_label(scene, label, backend);
    }

    backend.present_frame();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effective_scale_defaults() {
        assert_eq!(effective_scale(0.0, 1.0), 1.0);
        assert_eq!(effective_scale(-2.5, 0.7), 0.7);
        assert_eq!(effective_scale(1.3, 1.0), 1.3);
        // Tiny positive values clamp instead of falling back.
        assert_eq!(effective_scale(0.001, 1.0), 0.01);
    }

    #[test]
    fn test_fit_without_natural_dims() {
        let (w, h) = fit_to_bounds(None, 100.0, 50.0, 0.5);
        assert_eq!((w, h), (50.0, 25.0));
    }

    #[test]
    fn test_fit_correction_triggers_below_threshold() {
        // Square target, wide texture: post-width-scale height = 25 < 0.92·100,
        // so the sprite is up-scaled until height = 1.02·100.
        let (w, h) = fit_to_bounds(Some((200, 50)), 100.0, 100.0, 1.0);
        assert!((h - 102.0).abs() < 1e-3, "h={h}");
        assert!((w - 408.0).abs() < 1e-2, "w={w}");
    }

    #[test]
    fn test_fit_no_correction_above_threshold() {
        // Height lands at exactly 0.92·target → not strictly below, no bump.
        let (w, h) = fit_to_bounds(Some((100, 92)), 100.0, 100.0, 1.0);
        assert!((w - 100.0).abs() < 1e-3);
        assert!((h - 92.0).abs() < 1e-3);
    }
}
