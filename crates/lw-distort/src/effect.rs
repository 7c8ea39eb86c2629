use lw_core::{Error, FilterMode, Image, ImageView, Point2f, Rgba, Sampler, Texture};

use crate::config::DistortionConfig;
use crate::error::ConfigError;
use crate::extras::CrtExtras;
use crate::render::render;
use crate::warp::{Warp, WarpParams, classify};

/// A whole-image post-processing pass.
///
/// `apply` returns a new image of the same size; the source is left as is.
pub trait PostEffect {
    fn apply(&self, src: &ImageView<'_, Rgba>) -> Result<Image<Rgba>, Error>;
}

/// CRT-style barrel distortion with a constant border outside the tube.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarrelDistortion {
    params: WarpParams,
    border: Rgba,
    filter: FilterMode,
    extras: CrtExtras,
}

impl BarrelDistortion {
    /// The reference effect: strength 0.8, exponent 2.5, opaque black
    /// border, no extras.
    pub fn new() -> Self {
        Self::from_config(&DistortionConfig::default())
    }

    /// Builds the effect after validating `cfg`.
    pub fn try_from_config(cfg: &DistortionConfig) -> Result<Self, ConfigError> {
        cfg.validate()?;
        Ok(Self::from_config(cfg))
    }

    fn from_config(cfg: &DistortionConfig) -> Self {
        Self {
            params: cfg.warp_params(),
            border: cfg.border,
            filter: cfg.filter,
            extras: cfg.extras(),
        }
    }

    pub fn with_extras(mut self, extras: CrtExtras) -> Self {
        self.extras = extras;
        self
    }

    pub fn params(&self) -> &WarpParams {
        &self.params
    }

    pub fn border(&self) -> Rgba {
        self.border
    }

    pub fn filter(&self) -> FilterMode {
        self.filter
    }

    /// Color of the output pixel at normalized `coord`.
    ///
    /// `src` is only read when the warped coordinate lies in the closed
    /// unit square; otherwise the border color is returned. Sampled colors
    /// always leave with alpha 1.
    #[inline]
    pub fn shade<S: Sampler + ?Sized>(&self, coord: Point2f, src: &S) -> Rgba {
        match classify(coord, &self.params) {
            Warp::Outside => self.border,
            Warp::Inside(uv) => {
                let color = src.sample(uv);
                self.extras.shade(coord, color).with_alpha(1.0)
            }
        }
    }
}

impl Default for BarrelDistortion {
    fn default() -> Self {
        Self::new()
    }
}

impl PostEffect for BarrelDistortion {
    fn apply(&self, src: &ImageView<'_, Rgba>) -> Result<Image<Rgba>, Error> {
        if src.is_empty() {
            return Ok(Image::from_fn(src.width(), src.height(), |_, _| self.border));
        }
        let texture = Texture::new(*src)?.with_filter(self.filter);
        Ok(render(self, &texture, src.width(), src.height()))
    }
}
