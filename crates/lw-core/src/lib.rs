//! Image and texture primitives for lens-warp.
//!
//! ## Image Views and Stride
//! Images use element stride (not byte stride). `stride` is the distance, in
//! elements, between adjacent row starts and may be greater than `width`.
//! Mutable views can hand out their rows to rayon as disjoint slices.
//!
//! ## Texture Coordinates
//! A [`Sampler`] is addressed with normalized coordinates, `(0, 0)` being the
//! top-left corner of the image and `(1, 1)` the bottom-right corner.
//! [`Texture`] maps them to pixel-center coordinates (`u * width - 0.5`), so
//! integer pixel coordinates refer to texel centers. Nearest filtering rounds
//! to the closest texel; bilinear uses the floor-based 2x2 neighborhood.
//!
//! ## Address Modes
//! Texel indices outside the image are resolved by [`AddressMode`]: clamp to
//! edge, repeat, mirrored repeat, or a constant border texel.

mod address;
mod color;
mod error;
mod geom;
mod image;
mod sample;
mod texture;

pub use address::{AddressMode, wrap_index};
pub use color::Rgba;
pub use error::Error;
pub use geom::{Point2f, Vec2f};
pub use image::{Image, ImageView, ImageViewMut};
pub use sample::{Texel, sample_bilinear, sample_nearest};
pub use texture::{FilterMode, Sampler, Texture};
