//! Output-to-source coordinate mapping.
//!
//! Each axis is stretched by a power of the *other* axis' offset from the
//! center:
//!
//! ```text
//! scale_x = 1 + strength * |offset.y| ^ exponent
//! scale_y = 1 + strength * |offset.x| ^ exponent
//! ```
//!
//! Points on the horizontal center line therefore keep their x position,
//! while rows far from the center get pushed outwards, which bends straight
//! lines into the pincushioned look of a curved CRT tube.

use lw_core::{Point2f, Vec2f};
use serde::{Deserialize, Serialize};

pub const DEFAULT_STRENGTH: f32 = 0.8;
pub const DEFAULT_EXPONENT: f32 = 2.5;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WarpParams {
    pub strength: f32,
    pub exponent: f32,
}

impl Default for WarpParams {
    fn default() -> Self {
        Self {
            strength: DEFAULT_STRENGTH,
            exponent: DEFAULT_EXPONENT,
        }
    }
}

/// Result of mapping one output coordinate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Warp {
    /// Source coordinate inside the closed unit square.
    Inside(Point2f),
    Outside,
}

/// Per-axis stretch for `offset`, with the axes swapped.
pub fn axis_scales(offset: Vec2f, params: &WarpParams) -> Vec2f {
    // abs before powf: a fractional exponent is NaN for negative bases.
    let lifted = offset.abs().powf(params.exponent);
    let v = lifted.yx();
    Vec2f::new(1.0 + params.strength * v.x, 1.0 + params.strength * v.y)
}

/// Maps an output coordinate to the source coordinate it reads from.
pub fn warp_coord(coord: Point2f, params: &WarpParams) -> Point2f {
    let offset = coord - Point2f::CENTER;
    Point2f::CENTER + offset.mul_elem(axis_scales(offset, params))
}

/// Like [`warp_coord`], classifying the result against the unit square.
pub fn classify(coord: Point2f, params: &WarpParams) -> Warp {
    let src = warp_coord(coord, params);
    if src.in_unit_square() {
        Warp::Inside(src)
    } else {
        Warp::Outside
    }
}
