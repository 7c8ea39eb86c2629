use serde::{Deserialize, Serialize};

use crate::Error;
use crate::address::AddressMode;
use crate::color::Rgba;
use crate::geom::Point2f;
use crate::image::ImageView;
use crate::sample::{sample_bilinear, sample_nearest};

/// A read-only color source addressed in normalized `[0, 1] x [0, 1]` space.
///
/// Implementations must be pure: the same `uv` always yields the same color.
pub trait Sampler {
    fn sample(&self, uv: Point2f) -> Rgba;
}

impl<F> Sampler for F
where
    F: Fn(Point2f) -> Rgba,
{
    fn sample(&self, uv: Point2f) -> Rgba {
        self(uv)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterMode {
    Nearest,
    #[default]
    Bilinear,
}

/// An RGBA image bound to a filter and an address mode.
#[derive(Debug, Clone, Copy)]
pub struct Texture<'a> {
    image: ImageView<'a, Rgba>,
    filter: FilterMode,
    address: AddressMode<Rgba>,
}

impl<'a> Texture<'a> {
    /// Bilinear, clamp-to-edge texture over `image`.
    pub fn new(image: ImageView<'a, Rgba>) -> Result<Self, Error> {
        if image.is_empty() {
            return Err(Error::EmptyImage);
        }
        Ok(Self {
            image,
            filter: FilterMode::default(),
            address: AddressMode::default(),
        })
    }

    pub fn with_filter(mut self, filter: FilterMode) -> Self {
        self.filter = filter;
        self
    }

    pub fn with_address(mut self, address: AddressMode<Rgba>) -> Self {
        self.address = address;
        self
    }

    pub fn filter(&self) -> FilterMode {
        self.filter
    }

    pub fn width(&self) -> usize {
        self.image.width()
    }

    pub fn height(&self) -> usize {
        self.image.height()
    }
}

impl Sampler for Texture<'_> {
    fn sample(&self, uv: Point2f) -> Rgba {
        let x = uv.x * self.image.width() as f32 - 0.5;
        let y = uv.y * self.image.height() as f32 - 0.5;
        let texel = match self.filter {
            FilterMode::Nearest => sample_nearest(&self.image, x, y, &self.address),
            FilterMode::Bilinear => sample_bilinear(&self.image, x, y, &self.address),
        };
        // Non-empty by construction, so every address mode resolves.
        texel.unwrap_or(Rgba::TRANSPARENT)
    }
}

#[cfg(test)]
mod tests {
    use super::{FilterMode, Sampler, Texture};
    use crate::address::AddressMode;
    use crate::color::Rgba;
    use crate::geom::Point2f;
    use crate::image::Image;
    use crate::Error;

    fn gray(v: f32) -> Rgba {
        Rgba::new(v, v, v, 1.0)
    }

    fn ramp_3x3() -> Image<Rgba> {
        Image::from_fn(3, 3, |x, y| gray((3 * y + x) as f32 / 8.0))
    }

    #[test]
    fn empty_image_is_rejected() {
        let img = Image::from_vec(0, 2, Vec::<Rgba>::new()).expect("empty image");
        assert_eq!(Texture::new(img.as_view()).expect_err("empty"), Error::EmptyImage);
    }

    #[test]
    fn center_uv_hits_center_texel_exactly() {
        let img = ramp_3x3();
        for filter in [FilterMode::Nearest, FilterMode::Bilinear] {
            let tex = Texture::new(img.as_view())
                .expect("non-empty")
                .with_filter(filter);
            assert_eq!(tex.sample(Point2f::CENTER), gray(4.0 / 8.0), "{filter:?}");
        }
    }

    #[test]
    fn unit_square_corners_read_edge_texels() {
        let img = ramp_3x3();
        let tex = Texture::new(img.as_view()).expect("non-empty");

        assert_eq!(tex.sample(Point2f::new(0.0, 0.0)), gray(0.0));
        assert_eq!(tex.sample(Point2f::new(1.0, 1.0)), gray(1.0));
        assert_eq!(tex.sample(Point2f::new(1.0, 0.0)), gray(2.0 / 8.0));
    }

    #[test]
    fn nearest_and_bilinear_differ_between_texels() {
        let img = Image::from_vec(2, 1, vec![gray(0.0), gray(1.0)]).expect("valid image");
        let uv = Point2f::new(0.5, 0.5);

        let tex = Texture::new(img.as_view()).expect("non-empty");
        assert_eq!(tex.filter(), FilterMode::Bilinear);
        assert!((tex.sample(uv).r - 0.5).abs() < 1e-6);

        let nearest = tex.with_filter(FilterMode::Nearest).sample(uv);
        assert_eq!(nearest, gray(1.0));
    }

    #[test]
    fn border_address_mode_applies_outside_unit_square() {
        let img = Image::new_fill(2, 2, gray(1.0));
        let tex = Texture::new(img.as_view())
            .expect("non-empty")
            .with_filter(FilterMode::Nearest)
            .with_address(AddressMode::ClampToBorder(Rgba::TRANSPARENT));

        assert_eq!(tex.sample(Point2f::new(-0.5, 0.5)), Rgba::TRANSPARENT);
        assert_eq!(tex.sample(Point2f::new(0.25, 0.75)), gray(1.0));
    }

    #[test]
    fn closures_are_samplers() {
        let checker = |uv: Point2f| if uv.x < 0.5 { gray(0.0) } else { gray(1.0) };
        assert_eq!(checker.sample(Point2f::new(0.75, 0.1)), gray(1.0));
    }

    #[test]
    fn non_finite_uv_never_panics() {
        let img = ramp_3x3();
        let border = Rgba::new(0.0, 0.0, 1.0, 1.0);
        let modes = [
            AddressMode::ClampToEdge,
            AddressMode::Repeat,
            AddressMode::MirrorRepeat,
            AddressMode::ClampToBorder(border),
        ];
        let uvs = [
            Point2f::new(f32::INFINITY, 0.5),
            Point2f::new(0.5, f32::NEG_INFINITY),
            Point2f::new(f32::NAN, 0.5),
            Point2f::new(f32::NAN, f32::INFINITY),
            Point2f::new(1e20, -1e20),
        ];

        for filter in [FilterMode::Nearest, FilterMode::Bilinear] {
            for address in modes {
                let tex = Texture::new(img.as_view())
                    .expect("non-empty")
                    .with_filter(filter)
                    .with_address(address);
                for uv in uvs {
                    let c = tex.sample(uv);
                    assert!(
                        [c.r, c.g, c.b, c.a].iter().all(|v| v.is_finite()),
                        "{filter:?} {address:?} {uv:?}"
                    );
                }
            }
        }

        let tex = Texture::new(img.as_view())
            .expect("non-empty")
            .with_address(AddressMode::ClampToBorder(border));
        assert_eq!(tex.sample(Point2f::new(f32::INFINITY, 0.5)), border);
        assert_eq!(tex.sample(Point2f::new(0.5, f32::NAN)), border);

        let edge = Texture::new(img.as_view()).expect("non-empty");
        assert_eq!(edge.sample(Point2f::new(f32::INFINITY, 0.0)), gray(2.0 / 8.0));
    }
}
