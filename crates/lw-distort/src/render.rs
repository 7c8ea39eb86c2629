//! CPU evaluation of [`BarrelDistortion`] over a whole target.
//!
//! Output pixel `(x, y)` of a `w x h` target is shaded at the normalized
//! pixel center `((x + 0.5) / w, (y + 0.5) / h)`. Every pixel is independent:
//! the parallel path splits the target into rows and shares the sampler
//! read-only, so it produces exactly the same bits as the serial path.

use std::time::Instant;

use lw_core::{Image, ImageViewMut, Point2f, Rgba, Sampler};
use rayon::prelude::*;
use tracing::debug;

use crate::effect::BarrelDistortion;

/// Shades every pixel of `dst` in parallel.
pub fn render_into<S>(effect: &BarrelDistortion, src: &S, dst: &mut ImageViewMut<'_, Rgba>)
where
    S: Sampler + Sync + ?Sized,
{
    if dst.is_empty() {
        return;
    }
    let (w, h) = (dst.width(), dst.height());
    let start = Instant::now();

    dst.par_rows_mut().for_each(|(y, row)| shade_row(effect, src, row, y, w, h));

    debug!(
        width = w,
        height = h,
        elapsed_ms = start.elapsed().as_secs_f64() * 1e3,
        "rendered distortion (parallel)"
    );
}

/// Single-threaded counterpart of [`render_into`].
pub fn render_into_serial<S>(
    effect: &BarrelDistortion,
    src: &S,
    dst: &mut ImageViewMut<'_, Rgba>,
) where
    S: Sampler + ?Sized,
{
    if dst.is_empty() {
        return;
    }
    let (w, h) = (dst.width(), dst.height());
    let start = Instant::now();

    for y in 0..h {
        shade_row(effect, src, dst.row_mut(y), y, w, h);
    }

    debug!(
        width = w,
        height = h,
        elapsed_ms = start.elapsed().as_secs_f64() * 1e3,
        "rendered distortion (serial)"
    );
}

/// Allocates a `width x height` target and renders into it in parallel.
pub fn render<S>(effect: &BarrelDistortion, src: &S, width: usize, height: usize) -> Image<Rgba>
where
    S: Sampler + Sync + ?Sized,
{
    let mut out = Image::new_fill(width, height, effect.border());
    render_into(effect, src, &mut out.as_view_mut());
    out
}

/// Normalized center of pixel `(x, y)` in a `w x h` target.
#[inline]
pub fn pixel_center(x: usize, y: usize, w: usize, h: usize) -> Point2f {
    Point2f::new((x as f32 + 0.5) / w as f32, (y as f32 + 0.5) / h as f32)
}

fn shade_row<S>(
    effect: &BarrelDistortion,
    src: &S,
    row: &mut [Rgba],
    y: usize,
    w: usize,
    h: usize,
) where
    S: Sampler + ?Sized,
{
    for (x, px) in row.iter_mut().enumerate() {
        *px = effect.shade(pixel_center(x, y, w, h), src);
    }
}

#[cfg(test)]
mod tests {
    use lw_core::{Image, ImageViewMut, Point2f, Rgba, Texture};

    use super::{pixel_center, render, render_into, render_into_serial};
    use crate::effect::BarrelDistortion;
    use crate::extras::{CrtExtras, Fringe, Scanlines};

    fn gradient(uv: Point2f) -> Rgba {
        Rgba::new(uv.x, uv.y, 1.0 - uv.x * uv.y, 0.0)
    }

    fn bits(img: &Image<Rgba>) -> Vec<[u32; 4]> {
        img.data()
            .iter()
            .map(|c| [c.r.to_bits(), c.g.to_bits(), c.b.to_bits(), c.a.to_bits()])
            .collect()
    }

    #[test]
    fn pixel_centers_are_normalized() {
        assert_eq!(pixel_center(0, 0, 4, 2), Point2f::new(0.125, 0.25));
        assert_eq!(pixel_center(3, 1, 4, 2), Point2f::new(0.875, 0.75));
    }

    #[test]
    fn parallel_matches_serial_bit_for_bit() {
        let fx = BarrelDistortion::new().with_extras(CrtExtras {
            scanlines: Some(Scanlines::default()),
            fringe: Some(Fringe::default()),
        });

        let par = render(&fx, &gradient, 97, 61);

        let mut serial = Image::new_fill(97, 61, Rgba::TRANSPARENT);
        render_into_serial(&fx, &gradient, &mut serial.as_view_mut());

        assert_eq!(bits(&par), bits(&serial));
    }

    #[test]
    fn corners_are_border_and_center_is_sampled() {
        let fx = BarrelDistortion::new();
        let out = render(&fx, &gradient, 64, 48);
        let view = out.as_view();

        for (x, y) in [(0, 0), (63, 0), (0, 47), (63, 47)] {
            assert_eq!(view.get(x, y), Some(&Rgba::OPAQUE_BLACK), "({x}, {y})");
        }
        let center = view.get(32, 24).expect("in bounds");
        assert_eq!(center.a, 1.0);
        assert!(center.b > 0.0);
    }

    #[test]
    fn output_is_mirror_symmetric_for_symmetric_source() {
        let src = Image::from_fn(16, 16, |x, y| {
            let d = (2 * x as i32 - 15).abs() + (2 * y as i32 - 15).abs();
            let v = d as f32 / 30.0;
            Rgba::new(v, v, v, 1.0)
        });
        let tex = Texture::new(src.as_view()).expect("non-empty");
        let out = render(&BarrelDistortion::new(), &tex, 16, 16);
        let view = out.as_view();

        for y in 0..16 {
            for x in 0..16 {
                let a = view.get(x, y).expect("in bounds");
                let b = view.get(15 - x, y).expect("in bounds");
                let c = view.get(x, 15 - y).expect("in bounds");
                assert!((a.r - b.r).abs() < 1e-5, "({x}, {y})");
                assert!((a.r - c.r).abs() < 1e-5, "({x}, {y})");
            }
        }
    }

    #[test]
    fn renders_into_padded_target_without_touching_padding() {
        let sentinel = Rgba::new(9.0, 9.0, 9.0, 9.0);
        let mut buf = vec![sentinel; 6 * 4];
        let mut dst = ImageViewMut::from_slice_mut(5, 4, 6, &mut buf).expect("valid target");

        render_into(&BarrelDistortion::new(), &gradient, &mut dst);

        for y in 0..4 {
            assert_eq!(buf[y * 6 + 5], sentinel, "padding of row {y}");
            assert_ne!(buf[y * 6 + 2], sentinel, "pixel of row {y}");
        }
    }

    #[test]
    fn zero_sized_targets_are_no_ops() {
        let out = render(&BarrelDistortion::new(), &gradient, 0, 7);
        assert!(out.is_empty());

        let mut empty = Image::new_fill(3, 0, Rgba::TRANSPARENT);
        render_into_serial(&BarrelDistortion::new(), &gradient, &mut empty.as_view_mut());
        assert!(empty.data().is_empty());
    }
}
