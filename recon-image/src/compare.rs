//! Tolerance-based comparison of two images.
//!
//! Used by tests to check an image against a baseline. A tolerance of zero
//! requires exact pixel equality; a positive tolerance bounds the RMS
//! difference. After each comparison [`ImageCompare::message`] describes the
//! outcome.

use crate::image::Image;
use crate::pixel::Pixel;

/// Compares images against a baseline and keeps a message about the last
/// comparison.
#[derive(Debug, Clone, Default)]
pub struct ImageCompare {
    tolerance: f64,
    message: String,
    last_rms: Option<f64>,
}

impl ImageCompare {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// Description of the last comparison; empty if it passed.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// RMS difference of the last comparison of equally sized images.
    pub fn last_rms(&self) -> Option<f64> {
        self.last_rms
    }

    /// Whether `image` matches `baseline` within the tolerance.
    pub fn compare<T: Pixel>(&mut self, image: &Image<T>, baseline: &Image<T>) -> bool {
        self.message.clear();
        self.last_rms = None;

        if image.size() != baseline.size() {
            self.message = format!(
                "Image size {} does not match baseline size {}",
                image.size(),
                baseline.size()
            );
            log::warn!("{}", self.message);
            return false;
        }

        let (sum_sq, max_abs) = image
            .iter()
            .zip(baseline.iter())
            .map(|(a, b)| (a.to_f64() - b.to_f64()).abs())
            .fold((0.0, 0.0f64), |(sum_sq, max_abs), d| {
                (sum_sq + d * d, max_abs.max(d))
            });
        let rms = if image.is_empty() {
            0.0
        } else {
            (sum_sq / image.len() as f64).sqrt()
        };
        self.last_rms = Some(rms);

        // NaN differences never match; `f64::max` would skip them
        let passed = if rms.is_nan() {
            false
        } else if self.tolerance == 0.0 {
            max_abs == 0.0
        } else {
            rms <= self.tolerance
        };

        if !passed {
            self.message = format!(
                "RMS difference {rms} (max {max_abs}) exceeds tolerance {}",
                self.tolerance
            );
            log::warn!("{}", self.message);
        }
        passed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image_size::ImageSize;
    use approx::assert_relative_eq;

    #[test]
    fn test_exact_match() {
        let a = Image::<i32>::new(4, 4);
        let mut compare = ImageCompare::new();
        assert!(compare.compare(&a, &a.clone()));
        assert!(compare.message().is_empty());
        assert_eq!(compare.last_rms(), Some(0.0));
    }

    #[test]
    fn test_single_pixel_difference() {
        let a = Image::<f32>::new(2, 2);
        let mut b = a.clone();
        b[(1, 1)] = 2.0;

        let mut exact = ImageCompare::new();
        assert!(!exact.compare(&a, &b));
        assert!(exact.message().contains("exceeds tolerance"));
        assert_relative_eq!(exact.last_rms().unwrap(), 1.0);

        let mut loose = ImageCompare::new().with_tolerance(1.0);
        assert!(loose.compare(&a, &b));

        let mut tight = ImageCompare::new().with_tolerance(0.5);
        assert_eq!(tight.tolerance(), 0.5);
        assert!(!tight.compare(&a, &b));
    }

    #[test]
    fn test_nan_pixel_never_matches() {
        let baseline = Image::<f32>::new(2, 2);
        let mut image = baseline.clone();
        image[(0, 1)] = f32::NAN;

        let mut exact = ImageCompare::new();
        assert!(!exact.compare(&image, &baseline));
        assert!(exact.last_rms().unwrap().is_nan());

        let mut loose = ImageCompare::new().with_tolerance(1.0);
        assert!(!loose.compare(&image, &baseline));
        assert!(!loose.message().is_empty());
    }

    #[test]
    fn test_size_mismatch() {
        let a = Image::<u8>::new(2, 2);
        let b = Image::<u8>::filled(ImageSize::from_width_height(3, 2), 0);
        let mut compare = ImageCompare::new().with_tolerance(10.0);
        assert!(!compare.compare(&a, &b));
        assert_eq!(
            compare.message(),
            "Image size 2x2 does not match baseline size 3x2"
        );
        assert_eq!(compare.last_rms(), None);
    }

    #[test]
    fn test_message_cleared_on_success() {
        let a = Image::<i16>::new(1, 1);
        let b = Image::filled(a.size(), 1i16);
        let mut compare = ImageCompare::new();
        assert!(!compare.compare(&a, &b));
        assert!(compare.compare(&a, &a));
        assert!(compare.message().is_empty());
    }
}
