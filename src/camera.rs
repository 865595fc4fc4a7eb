// ── Camera ────────────────────────────────────────────────────────────────────
//
// World↔screen mapping: translate by the pan offset, then scale about the
// window center.  Used when emitting draw positions and, inverted, when
// resolving pointer events back into world space.

use glam::Vec2;

/// Zoom floor applied in both transform directions.  Keeps the inverse
/// transform away from a division blow-up when callers request zero or
/// negative zoom.
pub const MIN_ZOOM: f32 = 0.05;

/// 2D camera: pan offset in world pixels plus a zoom scalar.
///
/// Zoom scales around the *window center*, not the world origin, so panning
/// and zooming compose as: translate by `offset`, then scale about the screen
/// center.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Camera {
    /// World-pixel pan offset added before the zoom scale.
    pub offset: Vec2,
    /// Zoom scalar (1.0 = 1:1).  Stored pre-floored by `set`; the transforms
    /// floor again so a direct field write cannot produce a degenerate
    /// inverse.
    pub zoom: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}

impl Camera {
    pub fn new() -> Self {
        Self { offset: Vec2::ZERO, zoom: 1.0 }
    }

    /// Replace the pan offset and zoom.  Zoom is silently floored at
    /// `MIN_ZOOM`; requesting 0 or a negative value behaves like 0.05.
    pub fn set(&mut self, offset_x: f32, offset_y: f32, zoom: f32) {
        self.offset = Vec2::new(offset_x, offset_y);
        self.zoom = zoom.max(MIN_ZOOM);
    }

    /// Zoom with the floor applied — what the transforms actually use.
    #[inline]
    pub fn effective_zoom(&self) -> f32 {
        self.zoom.max(MIN_ZOOM)
    }

    /// World-pixel point → screen-pixel point for a window of `window` size.
    ///
    /// Per axis: `s = ((w + offset) - center) * zoom + center` where
    /// `center = window_dim / 2`.
    pub fn world_to_screen(&self, world: Vec2, window: Vec2) -> Vec2 {
        let z = self.effective_zoom();
        let center = window * 0.5;
        (world + self.offset - center) * z + center
    }

    /// Exact algebraic inverse of `world_to_screen`; used for input
    /// resolution only.
    pub fn screen_to_world(&self, screen: Vec2, window: Vec2) -> Vec2 {
        let z = self.effective_zoom();
        let center = window * 0.5;
        (screen - center) / z + center - self.offset
    }
}
