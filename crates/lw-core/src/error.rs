use core::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    SizeMismatch { expected: usize, actual: usize },
    OutOfBounds,
    InvalidStride,
    EmptyImage,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SizeMismatch { expected, actual } => {
                write!(f, "buffer size mismatch: expected {expected} elements, got {actual}")
            }
            Self::OutOfBounds => write!(f, "region exceeds image bounds"),
            Self::InvalidStride => write!(f, "row stride is smaller than image width"),
            Self::EmptyImage => write!(f, "cannot sample an image with zero width or height"),
        }
    }
}

impl std::error::Error for Error {}
