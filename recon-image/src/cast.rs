//! Pixel type conversion.

use crate::image::Image;
use crate::pixel::Pixel;

impl<T: Pixel> Image<T> {
    /// Convert every pixel to type `U`, keeping size and geometry.
    ///
    /// Values outside the range of `U` saturate at its bounds; floats are
    /// truncated toward zero when cast to an integer type.
    pub fn cast<U: Pixel>(&self) -> Image<U> {
        log::debug!(
            "casting {} image from {} to {}",
            self.size(),
            T::ID,
            U::ID
        );
        self.map(|v| U::from_value(v.to_value()))
    }
}

#[cfg(test)]
mod tests {
    use crate::geometry::Geometry;
    use crate::image::Image;
    use crate::image_size::ImageSize;

    #[test]
    fn test_float_to_integer_truncates_and_saturates() {
        let image = Image::from_vec(
            ImageSize::from_width_height(4, 1),
            vec![1.9f32, -1.9, 300.0, -300.0],
        )
        .unwrap();

        let signed: Image<i8> = image.cast();
        assert_eq!(signed.iter().copied().collect::<Vec<_>>(), vec![1, -1, 127, -128]);

        let unsigned: Image<u8> = image.cast();
        assert_eq!(unsigned.iter().copied().collect::<Vec<_>>(), vec![1, 0, 255, 0]);
    }

    #[test]
    fn test_wide_integers_keep_precision() {
        let big = (1i64 << 60) + 1;
        let image = Image::filled(ImageSize::from_width_height(1, 1), big);
        let unsigned: Image<u64> = image.cast();
        assert_eq!(unsigned[(0, 0)], big as u64);
    }

    #[test]
    fn test_cast_keeps_geometry() {
        let geometry = Geometry::new([1.0, 2.0], [0.1, 0.2]).unwrap();
        let image = Image::<u16>::new(3, 2).with_geometry(geometry);
        let converted: Image<f64> = image.cast();
        assert_eq!(converted.size(), image.size());
        assert_eq!(converted.geometry(), &geometry);
    }
}
