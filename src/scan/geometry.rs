//! Fitted-square to pixel-space rectangle mapping.
//!
//! The engine describes a located symbol as a homogeneous 3×3 transform from
//! the unit fitted square to raw image coordinates (row-vector convention,
//! as in the engine's own matrix routines). Mapping the `(0,0)` and `(1,1)`
//! corners through it and rescaling by the pre-decode shrink factor yields
//! the symbol's bounding rectangle in original-resolution pixels.

use crate::engine::ffi::DmtxMatrix3;

// Matches the engine's near-zero guard for the perspective divide.
const ALMOST_ZERO: f64 = 1e-6;

/// Axis-aligned rectangle in original (pre-shrink) pixel coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rect {
    pub left: i32,
    pub top: i32,
    pub width: i32,
    pub height: i32,
}

/// Maps `(x, y)` through a homogeneous row-vector transform. A degenerate
/// divisor leaves the point unchanged, as the engine's multiply does.
fn transform(m: &DmtxMatrix3, x: f64, y: f64) -> (f64, f64) {
    let w = x * m[0][2] + y * m[1][2] + m[2][2];
    if w.abs() <= ALMOST_ZERO {
        return (x, y);
    }
    let tx = (x * m[0][0] + y * m[1][0] + m[2][0]) / w;
    let ty = (x * m[0][1] + y * m[1][1] + m[2][1]) / w;
    (tx, ty)
}

fn round_scaled(value: f64, shrink: f64) -> i32 {
    (value * shrink + 0.5).floor() as i32
}

/// Computes the pixel-space bounding rectangle of a region from its fit→raw
/// transform, rescaled by the shrink factor applied before decoding.
pub(crate) fn region_rect(fit2raw: &DmtxMatrix3, shrink: usize) -> Rect {
    let (x0, y0) = transform(fit2raw, 0.0, 0.0);
    let (x1, y1) = transform(fit2raw, 1.0, 1.0);
    let s = shrink as f64;
    let left = round_scaled(x0, s);
    let top = round_scaled(y0, s);
    let right = round_scaled(x1, s);
    let bottom = round_scaled(y1, s);
    Rect {
        left,
        top,
        width: right - left,
        height: bottom - top,
    }
}

#[cfg(test)]
mod tests {
    use super::{region_rect, Rect};

    #[test]
    fn affine_transform_maps_unit_square_to_rect() {
        // Scales the unit square by (96, 95) and shifts it to (5, 6).
        let m = [[96.0, 0.0, 0.0], [0.0, 95.0, 0.0], [5.0, 6.0, 1.0]];
        assert_eq!(
            region_rect(&m, 1),
            Rect {
                left: 5,
                top: 6,
                width: 96,
                height: 95,
            }
        );
    }

    #[test]
    fn shrink_rescales_to_original_resolution() {
        let m = [[50.0, 0.0, 0.0], [0.0, 40.0, 0.0], [10.0, 20.0, 1.0]];
        let rect = region_rect(&m, 2);
        assert_eq!(
            rect,
            Rect {
                left: 20,
                top: 40,
                width: 100,
                height: 80,
            }
        );
    }

    #[test]
    fn perspective_divide_is_applied() {
        // Constant homogeneous weight of 2 halves every coordinate.
        let m = [[96.0, 0.0, 0.0], [0.0, 96.0, 0.0], [0.0, 0.0, 2.0]];
        let rect = region_rect(&m, 1);
        assert_eq!(
            rect,
            Rect {
                left: 0,
                top: 0,
                width: 48,
                height: 48,
            }
        );
    }

    #[test]
    fn rounding_is_nearest_integer() {
        let m = [[10.4, 0.0, 0.0], [0.0, 10.6, 0.0], [0.3, 0.7, 1.0]];
        let rect = region_rect(&m, 1);
        assert_eq!(rect.left, 0);
        assert_eq!(rect.top, 1);
        // (10.7, 11.3) rounds to (11, 11).
        assert_eq!(rect.width, 11);
        assert_eq!(rect.height, 10);
    }

    #[test]
    fn degenerate_weight_leaves_corners_unscaled() {
        let m = [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 0.0]];
        let rect = region_rect(&m, 1);
        assert_eq!(
            rect,
            Rect {
                left: 0,
                top: 0,
                width: 1,
                height: 1,
            }
        );
    }
}
