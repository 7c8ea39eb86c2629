use core::ops::{Add, Mul};

use crate::address::{AddressMode, wrap_index};
use crate::image::ImageView;

/// A texel value that can be linearly blended.
pub trait Texel: Copy + Add<Output = Self> + Mul<f32, Output = Self> {}

impl<T: Copy + Add<Output = T> + Mul<f32, Output = T>> Texel for T {}

/// Coordinates are pinned to `[-2^24, 2^24]` before indexing. Within that
/// range `floor` is exact and `index + 1` cannot overflow.
const COORD_LIMIT: f32 = 16_777_216.0;

/// Nearest-texel lookup in pixel-center coordinates.
///
/// Returns `None` only for an empty image with a non-border address mode.
/// Non-finite coordinates read the border texel under `ClampToBorder`;
/// otherwise infinities pin to the far edge and NaN to texel 0.
pub fn sample_nearest<T: Copy>(
    img: &ImageView<'_, T>,
    x: f32,
    y: f32,
    address: &AddressMode<T>,
) -> Option<T> {
    if let Some(c) = non_finite_border(x, y, address) {
        return Some(c);
    }
    let (x, y) = (pin(x), pin(y));
    fetch(img, x.round() as isize, y.round() as isize, address)
}

/// Floor-based 2x2 bilinear interpolation in pixel-center coordinates.
///
/// Returns `None` only for an empty image with a non-border address mode.
/// Non-finite coordinates resolve as in [`sample_nearest`].
pub fn sample_bilinear<T: Texel>(
    img: &ImageView<'_, T>,
    x: f32,
    y: f32,
    address: &AddressMode<T>,
) -> Option<T> {
    if let Some(c) = non_finite_border(x, y, address) {
        return Some(c);
    }
    let (x, y) = (pin(x), pin(y));
    let x0 = x.floor();
    let y0 = y.floor();
    let dx = x - x0;
    let dy = y - y0;

    let (xi, yi) = (x0 as isize, y0 as isize);
    let p00 = fetch(img, xi, yi, address)?;
    let p10 = fetch(img, xi + 1, yi, address)?;
    let p01 = fetch(img, xi, yi + 1, address)?;
    let p11 = fetch(img, xi + 1, yi + 1, address)?;

    let top = p00 * (1.0 - dx) + p10 * dx;
    let bottom = p01 * (1.0 - dx) + p11 * dx;
    Some(top * (1.0 - dy) + bottom * dy)
}

fn non_finite_border<T: Copy>(x: f32, y: f32, address: &AddressMode<T>) -> Option<T> {
    match address {
        AddressMode::ClampToBorder(c) if !(x.is_finite() && y.is_finite()) => Some(*c),
        _ => None,
    }
}

fn pin(v: f32) -> f32 {
    if v.is_nan() {
        0.0
    } else {
        v.clamp(-COORD_LIMIT, COORD_LIMIT)
    }
}

fn fetch<T: Copy>(
    img: &ImageView<'_, T>,
    x: isize,
    y: isize,
    address: &AddressMode<T>,
) -> Option<T> {
    let mapped = wrap_index(x, img.width(), address).zip(wrap_index(y, img.height(), address));
    match (mapped, address) {
        // SAFETY: `wrap_index` only returns indices in `[0, len)`.
        (Some((xi, yi)), _) => Some(unsafe { *img.get_unchecked(xi, yi) }),
        (None, AddressMode::ClampToBorder(c)) => Some(*c),
        (None, _) => None,
    }
}
