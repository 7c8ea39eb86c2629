//! Opt-in CRT shading applied on top of the distortion.
//!
//! Both terms are off unless explicitly configured. They are evaluated in
//! output space and only touch pixels that sampled the source; border pixels
//! stay the plain border color.

use lw_core::{Point2f, Rgba};
use serde::{Deserialize, Serialize};

/// Horizontal dark bands.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Scanlines {
    /// Number of bright/dark line pairs across the output height.
    pub lines: f32,
    /// Fraction of brightness removed on dark lines, in `[0, 1]`.
    pub darken: f32,
}

impl Default for Scanlines {
    fn default() -> Self {
        Self {
            lines: 240.0,
            darken: 0.25,
        }
    }
}

/// Diagonal red/green/blue banding.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Fringe {
    /// Number of full R, G, B band cycles per unit of `x + y`.
    pub period: f32,
    /// Gain on the selected channel, in `[0, 2]`; the other two lose half of it.
    pub amount: f32,
}

impl Default for Fringe {
    fn default() -> Self {
        Self {
            period: 320.0,
            amount: 0.1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CrtExtras {
    #[serde(default)]
    pub scanlines: Option<Scanlines>,
    #[serde(default)]
    pub fringe: Option<Fringe>,
}

impl CrtExtras {
    pub fn is_enabled(&self) -> bool {
        self.scanlines.is_some() || self.fringe.is_some()
    }

    /// Applies every enabled term to the RGB channels of `color`.
    pub fn shade(&self, coord: Point2f, color: Rgba) -> Rgba {
        let mut out = color;
        if let Some(s) = &self.scanlines {
            out = s.shade(coord, out);
        }
        if let Some(f) = &self.fringe {
            out = f.shade(coord, out);
        }
        out
    }
}

impl Scanlines {
    pub fn shade(&self, coord: Point2f, color: Rgba) -> Rgba {
        if fract(coord.y * self.lines) >= 0.5 {
            let k = 1.0 - self.darken;
            color.scale_rgb(k, k, k)
        } else {
            color
        }
    }
}

impl Fringe {
    pub fn shade(&self, coord: Point2f, color: Rgba) -> Rgba {
        let phase = fract((coord.x + coord.y) * self.period);
        let boost = 1.0 + self.amount;
        let cut = 1.0 - 0.5 * self.amount;
        match (phase * 3.0) as u32 {
            0 => color.scale_rgb(boost, cut, cut),
            1 => color.scale_rgb(cut, boost, cut),
            _ => color.scale_rgb(cut, cut, boost),
        }
    }
}

/// `x - floor(x)`, always in `[0, 1)` for finite input.
fn fract(x: f32) -> f32 {
    x - x.floor()
}
