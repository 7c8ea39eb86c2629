use core::fmt;

/// Rejected [`DistortionConfig`](crate::DistortionConfig) values.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// A parameter must be finite and `>= 0`.
    InvalidParam { name: &'static str, value: f32 },
    /// A period or line count must be finite and `> 0`.
    NonPositivePeriod { name: &'static str, value: f32 },
    /// A shading amount must lie in `[min, max]`.
    OutOfRange {
        name: &'static str,
        value: f32,
        min: f32,
        max: f32,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidParam { name, value } => {
                write!(f, "{name} must be finite and non-negative, got {value}")
            }
            Self::NonPositivePeriod { name, value } => {
                write!(f, "{name} must be finite and positive, got {value}")
            }
            Self::OutOfRange {
                name,
                value,
                min,
                max,
            } => write!(f, "{name} must be in [{min}, {max}], got {value}"),
        }
    }
}

impl std::error::Error for ConfigError {}
