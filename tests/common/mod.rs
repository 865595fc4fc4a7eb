// Recording fake for `DrawBackend`: captures every call in order so tests can
// assert on layering and texture traffic without a GPU.
#![allow(dead_code)] // each test binary uses a different slice of this

use glam::Vec2;
use hexscene::backend::{Color, DrawBackend, ImageSource, Rect, TextureHandle};

#[derive(Clone, Debug, PartialEq)]
pub enum DrawCall {
    Clear(Color),
    Polygon { points: Vec<Vec2>, fill: Color },
    Line { p0: Vec2, p1: Vec2, color: Color },
    TexRect { texture: TextureHandle, dest: Rect },
    Present,
}

pub struct RecordingBackend {
    pub calls: Vec<DrawCall>,
    /// Dimensions the next `decode_image` reports, or `None` to fail decodes.
    pub decode_result: Option<(u32, u32)>,
    pub decode_calls: u32,
    pub released: Vec<TextureHandle>,
    next_handle: u32,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self {
            calls: Vec::new(),
            decode_result: Some((64, 64)),
            decode_calls: 0,
            released: Vec::new(),
            next_handle: 1,
        }
    }

    pub fn polygons(&self) -> impl Iterator<Item = (&[Vec2], Color)> {
        self.calls.iter().filter_map(|c| match c {
            DrawCall::Polygon { points, fill } => Some((points.as_slice(), *fill)),
            _ => None,
        })
    }

    pub fn tex_rects(&self) -> impl Iterator<Item = (TextureHandle, Rect)> + '_ {
        self.calls.iter().filter_map(|c| match c {
            DrawCall::TexRect { texture, dest } => Some((*texture, *dest)),
            _ => None,
        })
    }
}

impl DrawBackend for RecordingBackend {
    fn decode_image(&mut self, _source: ImageSource<'_>) -> Option<(TextureHandle, u32, u32)> {
        self.decode_calls += 1;
        let (w, h) = self.decode_result?;
        let handle = TextureHandle(self.next_handle);
        self.next_handle += 1;
        Some((handle, w, h))
    }

    fn release_image(&mut self, handle: TextureHandle) {
        self.released.push(handle);
    }

    fn clear(&mut self, color: Color) {
        self.calls.push(DrawCall::Clear(color));
    }

    fn draw_filled_polygon(&mut self, points: &[Vec2], fill: Color) {
        self.calls.push(DrawCall::Polygon { points: points.to_vec(), fill });
    }

    fn draw_line(&mut self, p0: Vec2, p1: Vec2, color: Color) {
        self.calls.push(DrawCall::Line { p0, p1, color });
    }

    fn draw_textured_rect(&mut self, texture: TextureHandle, dest: Rect) {
        self.calls.push(DrawCall::TexRect { texture, dest });
    }

    fn present_frame(&mut self) {
        self.calls.push(DrawCall::Present);
    }
}
