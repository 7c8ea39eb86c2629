//! Cross-axis barrel distortion, the curved-screen look of a CRT tube.
//!
//! For an output coordinate `coord` in `[0, 1] x [0, 1]`:
//!
//! 1. `offset = coord - (0.5, 0.5)`
//! 2. `scale = (1 + 0.8 * |offset.y| ^ 2.5, 1 + 0.8 * |offset.x| ^ 2.5)`
//! 3. `source = (0.5, 0.5) + offset * scale`
//! 4. if `source` leaves the closed unit square the pixel is opaque black,
//!    otherwise the source is sampled there and alpha is forced to 1.
//!
//! The x stretch depends on the y offset and vice versa. That swap is what
//! makes straight edges bow outwards towards the corners.
//!
//! [`BarrelDistortion::shade`] is the per-pixel function and is pure.
//! [`render()`] and [`render_into`] evaluate it over a whole target with rayon;
//! [`render_into_serial`] does the same on the calling thread.
//!
//! Scanline darkening and diagonal color fringing are available through
//! [`CrtExtras`] but stay disabled unless configured.

mod config;
mod effect;
mod error;
mod extras;
mod render;
pub mod warp;

pub use config::DistortionConfig;
pub use effect::{BarrelDistortion, PostEffect};
pub use error::ConfigError;
pub use extras::{CrtExtras, Fringe, Scanlines};
pub use render::{pixel_center, render, render_into, render_into_serial};
pub use warp::{Warp, WarpParams, axis_scales, classify, warp_coord};
