// ── Backend capability boundary ───────────────────────────────────────────────
//
// Everything the scene core needs from the outside world is expressed here:
// a small draw/decode capability set (`DrawBackend`) and a raw input source
// (`EventSource`).  The scene model itself never touches a window, a GPU, or
// an image codec directly — `renderer::WgpuRenderer` provides the real
// implementation and tests substitute recording fakes.

use std::collections::VecDeque;
use std::path::Path;

use glam::Vec2;

pub use winit::event::MouseButton;
pub use winit::keyboard::KeyCode;

// ── Color ─────────────────────────────────────────────────────────────────────

/// RGBA color with 8-bit channels, matching the wire shape handed across the
/// embedding boundary.  Alpha 0 is used as "absent" for overlay tints.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const TRANSPARENT: Self = Self::rgba(0, 0, 0, 0);

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Channels as normalised floats for vertex upload.
    pub fn to_f32(self) -> [f32; 4] {
        [
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
            self.a as f32 / 255.0,
        ]
    }
}

// ── Rect ──────────────────────────────────────────────────────────────────────

/// Axis-aligned destination rectangle in screen pixels (top-left origin).
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Rectangle of size `w × h` centred on `center`.
    pub fn centered(center: Vec2, w: f32, h: f32) -> Self {
        Self {
            x: center.x - w * 0.5,
            y: center.y - h * 0.5,
            w,
            h,
        }
    }
}

// ── Textures ──────────────────────────────────────────────────────────────────

/// Opaque handle to a decoded image owned by the backend.  Handles are only
/// valid until `release_image`; the scene's slot table is the sole holder.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct TextureHandle(pub u32);

/// Where image bytes come from for a texture load.
#[derive(Copy, Clone, Debug)]
pub enum ImageSource<'a> {
    Path(&'a Path),
    Bytes(&'a [u8]),
}

// ── Raw input ─────────────────────────────────────────────────────────────────

/// One raw event as delivered by the OS / windowing collaborator, before the
/// input mapper resolves it into a semantic `SceneEvent`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum RawInput {
    Quit,
    ButtonDown { button: MouseButton, x: f32, y: f32 },
    CursorMoved { x: f32, y: f32 },
    KeyDown { key: KeyCode, repeat: bool },
    KeyUp { key: KeyCode },
}

// ── Traits ────────────────────────────────────────────────────────────────────

/// Rasterization + image-decode capabilities consumed by the frame driver and
/// the texture slot table.
///
/// Draw calls are honoured in submission order within a frame; a frame is
/// `clear` → draws → `present_frame`.  Composition never reads pixels back.
pub trait DrawBackend {
    /// Decode an image and take ownership of the pixels.  Returns the handle
    /// plus natural `(width, height)`, or `None` on decode failure.
    fn decode_image(&mut self, source: ImageSource<'_>) -> Option<(TextureHandle, u32, u32)>;

    /// Release a previously decoded image.  Unknown handles are a no-op.
    fn release_image(&mut self, handle: TextureHandle);

    fn clear(&mut self, color: Color);
    fn draw_filled_polygon(&mut self, points: &[Vec2], fill: Color);
    fn draw_line(&mut self, p0: Vec2, p1: Vec2, color: Color);
    fn draw_textured_rect(&mut self, texture: TextureHandle, dest: Rect);
    fn present_frame(&mut self);
}

/// Source of raw input events.  `None` means the queue is exhausted for now.
pub trait EventSource {
    fn poll_raw_event(&mut self) -> Option<RawInput>;
}

impl EventSource for VecDeque<RawInput> {
    fn poll_raw_event(&mut self) -> Option<RawInput> {
        self.pop_front()
    }
}
