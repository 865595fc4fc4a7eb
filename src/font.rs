// ── Debug label font ──────────────────────────────────────────────────────────
//
// Fixed 3×5 bitmap glyphs, enough for axial coordinate labels ("-3,12" etc.).
// Each glyph is five rows of three bits, MSB = left column.  On-pixels are
// rasterized through `draw_filled_polygon` so any backend can render labels
// without a text capability.

use glam::Vec2;

use crate::backend::{Color, DrawBackend};

pub const GLYPH_W: u32 = 3;
pub const GLYPH_H: u32 = 5;
/// Horizontal advance between glyphs, in cells (3 px glyph + 1 px gap).
pub const GLYPH_ADVANCE: u32 = 4;

/// Bit rows for a supported character, or `None` for anything else
/// (unsupported characters still advance the pen).
pub fn glyph(ch: char) -> Option<[u8; 5]> {
    let rows = match ch {
        '0' => [0b111, 0b101, 0b101, 0b101, 0b111],
        '1' => [0b010, 0b110, 0b010, 0b010, 0b111],
        '2' => [0b111, 0b001, 0b111, 0b100, 0b111],
        '3' => [0b111, 0b001, 0b011, 0b001, 0b111],
        '4' => [0b101, 0b101, 0b111, 0b001, 0b001],
        '5' => [0b111, 0b100, 0b111, 0b001, 0b111],
        '6' => [0b111, 0b100, 0b111, 0b101, 0b111],
        '7' => [0b111, 0b001, 0b010, 0b010, 0b010],
        '8' => [0b111, 0b101, 0b111, 0b101, 0b111],
        '9' => [0b111, 0b101, 0b111, 0b001, 0b111],
        '-' => [0b000, 0b000, 0b111, 0b000, 0b000],
        '+' => [0b000, 0b010, 0b111, 0b010, 0b000],
        ',' => [0b000, 0b000, 0b000, 0b010, 0b100],
        '.' => [0b000, 0b000, 0b000, 0b000, 0b010],
        ':' => [0b000, 0b010, 0b000, 0b010, 0b000],
        '(' => [0b001, 0b010, 0b010, 0b010, 0b001],
        ')' => [0b100, 0b010, 0b010, 0b010, 0b100],
        '/' => [0b001, 0b001, 0b010, 0b100, 0b100],
        _ => return None,
    };
    Some(rows)
}

/// Width of `text` in cells (including inter-glyph gaps, excluding the
/// trailing one).  Zero for empty text.
pub fn text_width_cells(text: &str) -> u32 {
    let n = text.chars().count() as u32;
    if n == 0 { 0 } else { n * GLYPH_ADVANCE - 1 }
}

/// Draw `text` centred on `center`, one `cell × cell` pixel quad per on-bit.
pub fn draw_text_centered<B: DrawBackend>(
    backend: &mut B,
    center: Vec2,
    cell: f32,
    text: &str,
    color: Color,
) {
    let cols = text_width_cells(text);
    if cols == 0 {
        return;
    }
    let top_left = center - Vec2::new(cols as f32 * cell, GLYPH_H as f32 * cell) * 0.5;

    for (i, ch) in text.chars().enumerate() {
        let Some(rows) = glyph(ch) else { continue };
        let glyph_x = top_left.x + (i as u32 * GLYPH_ADVANCE) as f32 * cell;
        for (row, bits) in rows.iter().enumerate() {
            for col in 0..GLYPH_W {
                if bits >> (GLYPH_W - 1 - col) & 1 == 0 {
                    continue;
                }
                let x = glyph_x + col as f32 * cell;
                let y = top_left.y + row as f32 * cell;
                let quad = [
                    Vec2::new(x, y),
                    Vec2::new(x + cell, y),
                    Vec2::new(x + cell, y + cell),
                    Vec2::new(x, y + cell),
                ];
                backend.draw_filled_polygon(&quad, color);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digits_have_glyphs() {
        for ch in '0'..='9' {
            assert!(glyph(ch).is_some(), "missing glyph for {ch}");
        }
        assert!(glyph('-').is_some());
        assert!(glyph(',').is_some());
    }

    #[test]
    fn test_unknown_char_has_no_glyph() {
        assert!(glyph('q').is_none());
        assert!(glyph(' ').is_none());
    }

    #[test]
    fn test_text_width() {
        assert_eq!(text_width_cells(""), 0);
        assert_eq!(text_width_cells("7"), 3);
        assert_eq!(text_width_cells("-12"), 11);
    }
}
