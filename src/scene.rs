// ── Scene state ───────────────────────────────────────────────────────────────
//
// Owns the grid configuration, camera, and the four independently-replaceable
// buffers (hex instances, tiles, debug labels, texture slots).  All buffers
// use full-replace semantics: a "set" call builds the new buffer off to the
// side and swaps it in, so frame composition always reads a self-consistent
// snapshot without locking.  Single-threaded by contract.

use glam::Vec2;

use crate::backend::{Color, DrawBackend, ImageSource, TextureHandle};
use crate::camera::Camera;
use crate::geometry;

/// Fixed capacity of the texture slot table.
pub const MAX_TEXTURE_SLOTS: usize = 64;

/// Debug label text is bounded; longer input is truncated on set.
pub const MAX_LABEL_LEN: usize = 16;

/// Default frame clear color (dark slate).
pub const DEFAULT_CLEAR_COLOR: Color = Color::rgba(12, 12, 16, 255);

// ── Grid configuration ────────────────────────────────────────────────────────

/// Logical grid extent plus the derived pixel origin of axial (0, 0).
///
/// `rows`/`cols` are used only for origin centering — coordinates outside the
/// extent are perfectly valid everywhere else.  Flat-top is the only
/// supported orientation.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct GridConfig {
    pub rows: i32,
    pub cols: i32,
    /// Hex radius in world pixels.
    pub size: f32,
    pub flat_top: bool,
    origin: Vec2,
}

impl GridConfig {
    fn new() -> Self {
        Self { rows: 0, cols: 0, size: 0.0, flat_top: true, origin: Vec2::ZERO }
    }

    /// Pixel offset of axial (0, 0), derived from grid extent and window size.
    pub fn origin(&self) -> Vec2 {
        self.origin
    }

    /// Center the configured extent in the window.  An oversized grid ends up
    /// origin-centered (negative margins split evenly) rather than clamped,
    /// so geometry never overflows into NaN/inf territory.
    fn recompute_origin(&mut self, window: Vec2) {
        let grid_w = 1.5 * (self.cols - 1) as f32 * self.size + 2.0 * self.size;
        let grid_h = geometry::SQRT3 * self.size * (self.rows as f32 + 0.5) + self.size;
        self.origin = Vec2::new(
            (window.x - grid_w) * 0.5 + self.size,
            (window.y - grid_h) * 0.5 + self.size,
        );
    }

    /// World-pixel center of the hex at axial `(q, r)`, origin applied.
    pub fn axial_to_pixel(&self, q: i32, r: i32) -> Vec2 {
        geometry::axial_to_pixel(q, r, self.size) + self.origin
    }

    /// Hex containing the world-pixel point `p`, origin removed first.
    pub fn pixel_to_axial(&self, p: Vec2) -> (i32, i32) {
        geometry::pixel_to_axial(p.x - self.origin.x, p.y - self.origin.y, self.size)
    }
}

// ── Buffer records ────────────────────────────────────────────────────────────

/// A flat color-only hex at axial `(q, r)`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct HexInstance {
    pub q: i32,
    pub r: i32,
    pub color: Color,
}

/// A textured tile: optional terrain and unit sprites, an alpha-gated overlay
/// tint, per-sprite scale multipliers, and a pixel offset applied after grid
/// placement but before the camera transform.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Tile {
    pub q: i32,
    pub r: i32,
    /// Terrain texture slot, validated against the slot table at draw time.
    pub terrain_tex: Option<usize>,
    /// Unit sprite slot; empty/invalid means the layer is skipped entirely.
    pub unit_tex: Option<usize>,
    /// Terrain sprite scale multiplier; non-positive falls back to 1.0.
    pub terrain_scale: f32,
    /// Unit sprite scale multiplier; non-positive falls back to 0.7.
    pub unit_scale: f32,
    /// Overlay tint drawn above terrain; alpha 0 means "no overlay".
    pub overlay: Color,
    /// Pixel-space nudge applied to the hex center before the camera.
    pub offset: Vec2,
}

impl Tile {
    pub fn at(q: i32, r: i32) -> Self {
        Self {
            q,
            r,
            terrain_tex: None,
            unit_tex: None,
            terrain_scale: 1.0,
            unit_scale: 0.7,
            overlay: Color::TRANSPARENT,
            offset: Vec2::ZERO,
        }
    }
}

/// Short text pinned to a hex, rendered as a row of 3×5 glyphs.
#[derive(Clone, Debug, PartialEq)]
pub struct DebugLabel {
    pub q: i32,
    pub r: i32,
    pub text: String,
}

impl DebugLabel {
    pub fn new(q: i32, r: i32, text: impl Into<String>) -> Self {
        Self { q, r, text: text.into() }
    }
}

/// One occupied texture slot: the backend-owned handle plus natural size.
#[derive(Copy, Clone, Debug)]
struct TextureSlot {
    handle: TextureHandle,
    width: u32,
    height: u32,
}

// ── Scene ─────────────────────────────────────────────────────────────────────

/// The complete logical state read by the frame driver: grid, camera, clear
/// color, and the four buffers.  One `Scene` per window; instantiate as many
/// as you need (tests run several side by side).
pub struct Scene {
    grid: GridConfig,
    camera: Camera,
    window: Vec2,
    clear_color: Color,
    instances: Vec<HexInstance>,
    tiles: Vec<Tile>,
    labels: Vec<DebugLabel>,
    textures: [Option<TextureSlot>; MAX_TEXTURE_SLOTS],
}

impl Scene {
    pub fn new(window_w: f32, window_h: f32) -> Self {
        Self {
            grid: GridConfig::new(),
            camera: Camera::new(),
            window: Vec2::new(window_w, window_h),
            clear_color: DEFAULT_CLEAR_COLOR,
            instances: Vec::new(),
            tiles: Vec::new(),
            labels: Vec::new(),
            textures: [const { None }; MAX_TEXTURE_SLOTS],
        }
    }

    // ── Accessors ──────────────────────────────────────────────────────────

    pub fn grid(&self) -> &GridConfig {
        &self.grid
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn window_size(&self) -> Vec2 {
        self.window
    }

    pub fn clear_color(&self) -> Color {
        self.clear_color
    }

    pub fn instances(&self) -> &[HexInstance] {
        &self.instances
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn labels(&self) -> &[DebugLabel] {
        &self.labels
    }

    // ── Grid / camera / window ─────────────────────────────────────────────

    /// Replace the grid configuration and recompute the origin.  Accepts any
    /// numeric input; a non-positive size yields degenerate but defined
    /// geometry (caller's responsibility to avoid).
    pub fn set_grid(&mut self, rows: i32, cols: i32, size: f32, flat_top: bool) {
        self.grid.rows = rows;
        self.grid.cols = cols;
        self.grid.size = size;
        self.grid.flat_top = flat_top;
        self.grid.recompute_origin(self.window);
    }

    /// Update the window dimensions; the grid origin tracks them.
    pub fn set_window_size(&mut self, w: f32, h: f32) {
        self.window = Vec2::new(w, h);
        self.grid.recompute_origin(self.window);
    }

    /// Replace the camera.  Zoom is floored at `camera::MIN_ZOOM`.
    pub fn set_camera(&mut self, offset_x: f32, offset_y: f32, zoom: f32) {
        self.camera.set(offset_x, offset_y, zoom);
    }

    pub fn set_clear_color(&mut self, color: Color) {
        self.clear_color = color;
    }

    // ── Buffers (full-replace) ─────────────────────────────────────────────
    //
    // Exactly one of {instances, tiles} is active at a time: setting either
    // clears the other.  Setting instances additionally clears labels.  The
    // renderer never draws both kinds in the same frame.

    /// Replace the color-only instance buffer.  Clears tiles and labels.
    pub fn set_instances(&mut self, instances: &[HexInstance]) {
        self.tiles.clear();
        self.labels.clear();
        self.instances = instances.to_vec();
    }

    /// Replace the tile buffer.  Clears instances.
    pub fn set_tiles(&mut self, tiles: &[Tile]) {
        self.instances.clear();
        self.tiles = tiles.to_vec();
    }

    /// Drop all tiles (equivalent to `set_tiles(&[])` minus the instance
    /// clear, matching the standalone clear of the original API).
    pub fn clear_tiles(&mut self) {
        self.tiles.clear();
    }

    /// Replace the debug label buffer.  Text longer than `MAX_LABEL_LEN`
    /// bytes is truncated at a char boundary.
    pub fn set_debug_labels(&mut self, labels: &[DebugLabel]) {
        self.labels = labels
            .iter()
            .map(|l| {
                let mut text = l.text.clone();
                if text.len() > MAX_LABEL_LEN {
                    let mut cut = MAX_LABEL_LEN;
                    while !text.is_char_boundary(cut) {
                        cut -= 1;
                    }
                    text.truncate(cut);
                }
                DebugLabel { q: l.q, r: l.r, text }
            })
            .collect();
    }

    // ── Texture slots ──────────────────────────────────────────────────────

    /// Decode an image into `slot`, replacing (and releasing) any previous
    /// content first.  On decode failure the slot is guaranteed empty — never
    /// stale — and `false` is returned.  Out-of-range slots are a no-op
    /// failure.
    pub fn load_texture<B: DrawBackend>(
        &mut self,
        slot: usize,
        source: ImageSource<'_>,
        backend: &mut B,
    ) -> bool {
        if slot >= MAX_TEXTURE_SLOTS {
            return false;
        }
        // Release-before-replace: repeated failed loads cannot leak.
        self.unload_texture(slot, backend);
        match backend.decode_image(source) {
            Some((handle, width, height)) => {
                self.textures[slot] = Some(TextureSlot { handle, width, height });
                true
            }
            None => false,
        }
    }

    /// Release the image in `slot` (if any) and zero the metadata.
    pub fn unload_texture<B: DrawBackend>(&mut self, slot: usize, backend: &mut B) {
        if slot >= MAX_TEXTURE_SLOTS {
            return;
        }
        if let Some(old) = self.textures[slot].take() {
            backend.release_image(old.handle);
        }
    }

    /// Release every occupied slot.
    pub fn clear_textures<B: DrawBackend>(&mut self, backend: &mut B) {
        for slot in 0..MAX_TEXTURE_SLOTS {
            self.unload_texture(slot, backend);
        }
    }

    /// Natural pixel dimensions of the image in `slot`, if loaded.
    pub fn query_texture(&self, slot: usize) -> Option<(u32, u32)> {
        self.textures
            .get(slot)?
            .as_ref()
            .map(|t| (t.width, t.height))
    }

    /// Resolve a tile's texture reference at draw time: `None` for an absent
    /// reference, an out-of-range index, or an empty slot.
    pub(crate) fn resolve_texture(
        &self,
        index: Option<usize>,
    ) -> Option<(TextureHandle, u32, u32)> {
        self.textures
            .get(index?)?
            .as_ref()
            .map(|t| (t.handle, t.width, t.height))
    }
}
