//! Physical placement of an image: origin and pixel spacing.
//!
//! Pixel `(x, y)` is centred at `origin + (x * spacing[0], y * spacing[1])`.
//! Images only combine elementwise when they occupy the same physical space.

use crate::error::{ImageError, Result};
use crate::image_size::ImageSize;
use serde::{Deserialize, Serialize};

/// Origin and spacing of a 2-D image, in physical units (usually mm).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Geometry {
    pub origin: [f64; 2],
    pub spacing: [f64; 2],
}

impl Default for Geometry {
    fn default() -> Self {
        Self {
            origin: [0.0, 0.0],
            spacing: [1.0, 1.0],
        }
    }
}

impl Geometry {
    /// Create a geometry, rejecting non-positive or non-finite spacing.
    pub fn new(origin: [f64; 2], spacing: [f64; 2]) -> Result<Self> {
        if spacing.iter().any(|s| !s.is_finite() || *s <= 0.0) {
            return Err(ImageError::InvalidGeometry(format!(
                "spacing must be strictly positive, got {spacing:?}"
            )));
        }
        if origin.iter().any(|o| !o.is_finite()) {
            return Err(ImageError::InvalidGeometry(format!(
                "origin must be finite, got {origin:?}"
            )));
        }
        Ok(Self { origin, spacing })
    }

    /// Physical position of the centre of pixel `(x, y)`.
    pub fn index_to_physical(&self, x: usize, y: usize) -> [f64; 2] {
        [
            self.origin[0] + x as f64 * self.spacing[0],
            self.origin[1] + y as f64 * self.spacing[1],
        ]
    }

    /// Nearest pixel to a physical point, if it falls inside `size`.
    pub fn physical_to_index(&self, point: [f64; 2], size: ImageSize) -> Option<(usize, usize)> {
        let fx = ((point[0] - self.origin[0]) / self.spacing[0]).round();
        let fy = ((point[1] - self.origin[1]) / self.spacing[1]).round();
        if !fx.is_finite() || !fy.is_finite() || fx < 0.0 || fy < 0.0 {
            return None;
        }
        let (x, y) = (fx as usize, fy as usize);
        size.contains(x, y).then_some((x, y))
    }

    /// Compare origin and spacing component-wise within `tolerance`.
    pub fn approx_eq(&self, other: &Geometry, tolerance: f64) -> bool {
        self.origin
            .iter()
            .chain(self.spacing.iter())
            .zip(other.origin.iter().chain(other.spacing.iter()))
            .all(|(a, b)| (a - b).abs() <= tolerance)
    }
}
