//! Error type shared by all fallible image operations.

use crate::image_size::ImageSize;
use crate::pixel::{BinaryOp, PixelId};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ImageError {
    #[error("pixel ({x}, {y}) is outside image of size {size}")]
    OutOfBounds { x: usize, y: usize, size: ImageSize },

    #[error("image sizes differ: {left} vs {right}")]
    SizeMismatch { left: ImageSize, right: ImageSize },

    /// Inputs do not occupy the same physical space.
    #[error("image geometries differ")]
    GeometryMismatch,

    #[error("pixel types differ: {left} vs {right}")]
    PixelTypeMismatch { left: PixelId, right: PixelId },

    /// Operator not defined for the pixel type, e.g. bitwise ops on floats.
    #[error("operator {op} is not supported for pixel type {pixel_id}")]
    UnsupportedPixelType { op: String, pixel_id: PixelId },

    #[error("invalid geometry: {0}")]
    InvalidGeometry(String),

    #[error("buffer shape error: {0}")]
    Shape(#[from] ndarray::ShapeError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("image codec error: {0}")]
    Codec(#[from] image::ImageError),

    #[error("header error: {0}")]
    Header(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ImageError>;

impl ImageError {
    pub(crate) fn unsupported(op: BinaryOp, pixel_id: PixelId) -> Self {
        ImageError::UnsupportedPixelType {
            op: op.to_string(),
            pixel_id,
        }
    }
}
