use lw_core::{FilterMode, Rgba};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::extras::{CrtExtras, Fringe, Scanlines};
use crate::warp::{DEFAULT_EXPONENT, DEFAULT_STRENGTH, WarpParams};

/// Serializable settings for [`BarrelDistortion`](crate::BarrelDistortion).
///
/// Every field is optional in JSON; `{}` yields the reference effect:
/// strength 0.8, exponent 2.5, opaque black border, bilinear filtering and
/// no CRT extras.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DistortionConfig {
    pub strength: f32,
    pub exponent: f32,
    pub border: Rgba,
    pub filter: FilterMode,
    pub scanlines: Option<Scanlines>,
    pub fringe: Option<Fringe>,
}

impl Default for DistortionConfig {
    fn default() -> Self {
        Self {
            strength: DEFAULT_STRENGTH,
            exponent: DEFAULT_EXPONENT,
            border: Rgba::OPAQUE_BLACK,
            filter: FilterMode::Bilinear,
            scanlines: None,
            fringe: None,
        }
    }
}

impl DistortionConfig {
    pub fn warp_params(&self) -> WarpParams {
        WarpParams {
            strength: self.strength,
            exponent: self.exponent,
        }
    }

    pub fn extras(&self) -> CrtExtras {
        CrtExtras {
            scanlines: self.scanlines,
            fringe: self.fringe,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        non_negative("strength", self.strength)?;
        non_negative("exponent", self.exponent)?;
        if let Some(s) = &self.scanlines {
            positive("scanlines.lines", s.lines)?;
            in_range("scanlines.darken", s.darken, 0.0, 1.0)?;
        }
        if let Some(f) = &self.fringe {
            positive("fringe.period", f.period)?;
            in_range("fringe.amount", f.amount, 0.0, 2.0)?;
        }
        Ok(())
    }
}

fn non_negative(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidParam { name, value })
    }
}

fn positive(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NonPositivePeriod { name, value })
    }
}

/// Keeps scaled color channels non-negative.
fn in_range(name: &'static str, value: f32, min: f32, max: f32) -> Result<(), ConfigError> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange {
            name,
            value,
            min,
            max,
        })
    }
}
