// =============================================================================
// GEOMETRY.RS — Axial hex math (flat-top orientation)
//
// Pure coordinate functions for the hex grid:
// - Axial (q, r) → pixel centers and the exact inverse
// - Cube rounding (snapping fractional cube coords to the nearest valid hex)
// - Hex corner generation for polygon fills
//
// Reference: https://www.redblobgames.com/grids/hex-grids/
// =============================================================================

use glam::Vec2;

/// √3 as f32 — the vertical spacing constant for flat-top hexes.
pub const SQRT3: f32 = 1.732_050_8;

/// Pixel center of the hex at axial `(q, r)` for a flat-top grid with the
/// given radius.  The grid origin is NOT applied here; callers add it
/// (see `GridConfig::axial_to_pixel`).
#[inline]
pub fn axial_to_pixel(q: i32, r: i32, size: f32) -> Vec2 {
    Vec2::new(
        size * 1.5 * q as f32,
        size * (SQRT3 * 0.5 * q as f32 + SQRT3 * r as f32),
    )
}

/// Inverse of `axial_to_pixel`: the hex containing pixel `(px, py)`.
///
/// Converts into fractional axial coordinates algebraically, lifts them to
/// cube space (x + y + z = 0), and snaps with `cube_round`.
pub fn pixel_to_axial(px: f32, py: f32, size: f32) -> (i32, i32) {
    let qf = (2.0 / 3.0) * px / size;
    let rf = (-1.0 / 3.0) * px / size + (1.0 / SQRT3) * py / size;

    // Axial (qf, rf) → cube (x, y, z): x = q, z = r, y closes the sum.
    let xf = qf;
    let zf = rf;
    let yf = -xf - zf;
    cube_round(xf, yf, zf)
}

/// Round fractional cube coordinates to the nearest hex, restoring the
/// x + y + z = 0 invariant exactly.
///
/// Each component is rounded independently, then the component with the
/// largest rounding error is recomputed from the other two.  The comparison
/// order is load-bearing: x is corrected only when its error is strictly
/// greatest, y only when strictly above z, otherwise z.  Points on shared
/// edges and vertices resolve according to this precedence, so hit-testing
/// at cell boundaries depends on it staying put.
///
/// Returns axial `(q, r)` = cube `(x, z)`.
pub fn cube_round(x: f32, y: f32, z: f32) -> (i32, i32) {
    let mut rx = x.round() as i32;
    let ry = y.round() as i32;
    let mut rz = z.round() as i32;

    let x_diff = (rx as f32 - x).abs();
    let y_diff = (ry as f32 - y).abs();
    let z_diff = (rz as f32 - z).abs();

    if x_diff > y_diff && x_diff > z_diff {
        rx = -ry - rz;
    } else if y_diff > z_diff {
        // ry would be recomputed here, but axial output never reads y.
    } else {
        rz = -rx - ry;
    }

    (rx, rz)
}

/// The six corners of a flat-top hex centred at `center`, starting at angle 0°
/// (rightmost corner) and stepping 60° around.
pub fn hex_corners(center: Vec2, size: f32) -> [Vec2; 6] {
    let mut out = [Vec2::ZERO; 6];
    for (i, corner) in out.iter_mut().enumerate() {
        let angle = std::f32::consts::PI / 180.0 * (60.0 * i as f32);
        *corner = center + Vec2::new(size * angle.cos(), size * angle.sin());
    }
    out
}

/// On-screen bounding-box width of a flat-top hex.
#[inline]
pub fn hex_width(size: f32) -> f32 {
    2.0 * size
}

/// On-screen bounding-box height of a flat-top hex.
#[inline]
pub fn hex_height(size: f32) -> f32 {
    SQRT3 * size
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_axial_to_pixel_origin() {
        let p = axial_to_pixel(0, 0, 22.0);
        assert_eq!(p, Vec2::ZERO);
    }

    #[test]
    fn test_axial_to_pixel_neighbors() {
        // q step moves 1.5·size right and √3/2·size down.
        let p = axial_to_pixel(1, 0, 10.0);
        assert!((p.x - 15.0).abs() < 1e-4);
        assert!((p.y - SQRT3 * 5.0).abs() < 1e-4);

        // r step moves √3·size straight down.
        let p = axial_to_pixel(0, 1, 10.0);
        assert!(p.x.abs() < 1e-4);
        assert!((p.y - SQRT3 * 10.0).abs() < 1e-4);
    }

    #[test]
    fn test_round_trip_small_range() {
        for q in -50..=50 {
            for r in -50..=50 {
                let p = axial_to_pixel(q, r, 22.0);
                assert_eq!(pixel_to_axial(p.x, p.y, 22.0), (q, r), "q={q} r={r}");
            }
        }
    }

    #[test]
    fn test_cube_round_exact_integers() {
        assert_eq!(cube_round(2.0, -3.0, 1.0), (2, 1));
        assert_eq!(cube_round(0.0, 0.0, 0.0), (0, 0));
    }

    #[test]
    fn test_hex_corners_flat_top() {
        let c = hex_corners(Vec2::ZERO, 10.0);
        // First corner sits at angle 0° — directly right of center.
        assert!((c[0].x - 10.0).abs() < 1e-4);
        assert!(c[0].y.abs() < 1e-4);
        // Fourth corner is directly left.
        assert!((c[3].x + 10.0).abs() < 1e-4);
        assert!(c[3].y.abs() < 1e-3);
    }
}
