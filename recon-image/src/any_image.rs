//! Runtime-typed images.
//!
//! [`AnyImage`] holds an [`Image<T>`] whose pixel type is chosen at runtime
//! from a [`PixelId`], e.g. when the type comes from a file or a header.
//! Operations that need two images require matching pixel types; there is no
//! implicit promotion.
//!
//! ```
//! use recon_image::{AnyImage, BinaryOp, PixelId, PixelValue};
//!
//! let mut image = AnyImage::new(10, 10, PixelId::Int32);
//! image.set_pixel(9, 9, PixelValue::Int(3)).unwrap();
//! let doubled = image.binary(&image, BinaryOp::Add).unwrap();
//! assert_eq!(doubled.sum(), 6.0);
//! assert_eq!(doubled.len(), 100);
//! ```

use crate::error::{ImageError, Result};
use crate::geometry::Geometry;
use crate::image::Image;
use crate::image_size::ImageSize;
use crate::pixel::{BinaryOp, Pixel, PixelId, PixelValue};
use std::any::Any;

macro_rules! any_image {
    ($($variant:ident($t:ty)),+ $(,)?) => {
        /// An image whose pixel type is only known at runtime.
        #[derive(Debug, Clone, PartialEq)]
        pub enum AnyImage {
            $($variant(Image<$t>),)+
        }

        $(
            impl From<Image<$t>> for AnyImage {
                fn from(image: Image<$t>) -> Self {
                    AnyImage::$variant(image)
                }
            }
        )+

        impl AnyImage {
            /// Zero-filled image of `width × height` pixels of type `pixel_id`.
            pub fn new(width: usize, height: usize, pixel_id: PixelId) -> Self {
                log::debug!("creating {width}x{height} image of {pixel_id}");
                match pixel_id {
                    $(PixelId::$variant => AnyImage::$variant(Image::new(width, height)),)+
                }
            }

            pub fn pixel_id(&self) -> PixelId {
                match self {
                    $(AnyImage::$variant(_) => PixelId::$variant,)+
                }
            }

            pub fn size(&self) -> ImageSize {
                match self {
                    $(AnyImage::$variant(image) => image.size(),)+
                }
            }

            pub fn geometry(&self) -> &Geometry {
                match self {
                    $(AnyImage::$variant(image) => image.geometry(),)+
                }
            }

            pub fn set_geometry(&mut self, geometry: Geometry) {
                match self {
                    $(AnyImage::$variant(image) => image.set_geometry(geometry),)+
                }
            }

            /// Total number of pixels.
            pub fn len(&self) -> usize {
                match self {
                    $(AnyImage::$variant(image) => image.len(),)+
                }
            }

            pub fn is_empty(&self) -> bool {
                self.len() == 0
            }

            pub fn sum(&self) -> f64 {
                match self {
                    $(AnyImage::$variant(image) => image.sum(),)+
                }
            }

            /// Smallest and largest pixel as `f64`.
            pub fn min_max(&self) -> Option<(f64, f64)> {
                match self {
                    $(AnyImage::$variant(image) => image
                        .min_max()
                        .map(|(lo, hi)| (lo.to_f64(), hi.to_f64())),)+
                }
            }

            pub fn get_pixel(&self, x: usize, y: usize) -> Result<PixelValue> {
                match self {
                    $(AnyImage::$variant(image) => image.get_pixel(x, y).map(Pixel::to_value),)+
                }
            }

            /// Write pixel `(x, y)`, converting `value` to the image's pixel
            /// type with saturation.
            pub fn set_pixel(&mut self, x: usize, y: usize, value: PixelValue) -> Result<()> {
                match self {
                    $(AnyImage::$variant(image) => {
                        image.set_pixel(x, y, <$t as Pixel>::from_value(value))
                    })+
                }
            }

            /// Copy of the image with `f64` pixels, e.g. for statistics or
            /// display.
            pub fn to_float64(&self) -> Image<f64> {
                match self {
                    $(AnyImage::$variant(image) => image.cast(),)+
                }
            }

            /// Convert to another pixel type.
            pub fn cast(&self, pixel_id: PixelId) -> AnyImage {
                match self {
                    $(AnyImage::$variant(image) => cast_image(image, pixel_id),)+
                }
            }

            /// Elementwise `self op rhs`; both images must share pixel type,
            /// size and geometry.
            pub fn binary(&self, rhs: &AnyImage, op: BinaryOp) -> Result<AnyImage> {
                match (self, rhs) {
                    $((AnyImage::$variant(a), AnyImage::$variant(b)) => {
                        a.try_binary(b, op).map(AnyImage::$variant)
                    })+
                    _ => Err(ImageError::PixelTypeMismatch {
                        left: self.pixel_id(),
                        right: rhs.pixel_id(),
                    }),
                }
            }

            /// Elementwise `self op scalar`.
            pub fn binary_scalar(&self, scalar: PixelValue, op: BinaryOp) -> Result<AnyImage> {
                match self {
                    $(AnyImage::$variant(image) => image
                        .try_binary_scalar(<$t as Pixel>::from_value(scalar), op)
                        .map(AnyImage::$variant),)+
                }
            }

            /// Elementwise `scalar op self`.
            pub fn scalar_binary(&self, scalar: PixelValue, op: BinaryOp) -> Result<AnyImage> {
                match self {
                    $(AnyImage::$variant(image) => image
                        .try_scalar_binary(<$t as Pixel>::from_value(scalar), op)
                        .map(AnyImage::$variant),)+
                }
            }

            /// In-place `self op= rhs`.
            pub fn binary_assign(&mut self, rhs: &AnyImage, op: BinaryOp) -> Result<()> {
                *self = self.binary(rhs, op)?;
                Ok(())
            }

            /// Bitwise complement; integer pixel types only.
            pub fn complement(&self) -> Result<AnyImage> {
                match self {
                    $(AnyImage::$variant(image) => image.try_complement().map(AnyImage::$variant),)+
                }
            }

            /// Borrow the typed image if its pixel type is `T`.
            pub fn downcast_ref<T: Pixel>(&self) -> Option<&Image<T>> {
                match self {
                    $(AnyImage::$variant(image) => (image as &dyn Any).downcast_ref::<Image<T>>(),)+
                }
            }

            pub fn downcast_mut<T: Pixel>(&mut self) -> Option<&mut Image<T>> {
                match self {
                    $(AnyImage::$variant(image) => (image as &mut dyn Any).downcast_mut::<Image<T>>(),)+
                }
            }
        }
    };
}

any_image!(
    UInt8(u8),
    Int8(i8),
    UInt16(u16),
    Int16(i16),
    UInt32(u32),
    Int32(i32),
    UInt64(u64),
    Int64(i64),
    Float32(f32),
    Float64(f64),
);

fn cast_image<T: Pixel>(image: &Image<T>, pixel_id: PixelId) -> AnyImage {
    match pixel_id {
        PixelId::UInt8 => AnyImage::UInt8(image.cast()),
        PixelId::Int8 => AnyImage::Int8(image.cast()),
        PixelId::UInt16 => AnyImage::UInt16(image.cast()),
        PixelId::Int16 => AnyImage::Int16(image.cast()),
        PixelId::UInt32 => AnyImage::UInt32(image.cast()),
        PixelId::Int32 => AnyImage::Int32(image.cast()),
        PixelId::UInt64 => AnyImage::UInt64(image.cast()),
        PixelId::Int64 => AnyImage::Int64(image.cast()),
        PixelId::Float32 => AnyImage::Float32(image.cast()),
        PixelId::Float64 => AnyImage::Float64(image.cast()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_for_every_pixel_id() {
        for pixel_id in PixelId::ALL {
            let image = AnyImage::new(3, 4, pixel_id);
            assert_eq!(image.pixel_id(), pixel_id);
            assert_eq!(image.size(), ImageSize::from_width_height(3, 4));
            assert_eq!(image.len(), 12);
            assert_eq!(image.sum(), 0.0);
        }
    }

    #[test]
    fn test_pixel_access_converts_values() {
        let mut image = AnyImage::new(2, 2, PixelId::UInt8);
        image.set_pixel(1, 0, PixelValue::Int(-4)).unwrap();
        image.set_pixel(0, 1, PixelValue::Float(12.7)).unwrap();
        image.set_pixel(1, 1, PixelValue::UInt(1000)).unwrap();

        assert_eq!(image.get_pixel(1, 0).unwrap(), PixelValue::UInt(0));
        assert_eq!(image.get_pixel(0, 1).unwrap(), PixelValue::UInt(12));
        assert_eq!(image.get_pixel(1, 1).unwrap(), PixelValue::UInt(255));
        assert!(image.get_pixel(2, 0).is_err());
    }

    #[test]
    fn test_binary_requires_matching_pixel_types() {
        let a = AnyImage::new(2, 2, PixelId::Int32);
        let b = AnyImage::new(2, 2, PixelId::Float32);
        let err = a.binary(&b, BinaryOp::Add).unwrap_err();
        assert!(matches!(
            err,
            ImageError::PixelTypeMismatch {
                left: PixelId::Int32,
                right: PixelId::Float32
            }
        ));

        let c = b.cast(PixelId::Int32);
        assert!(a.binary(&c, BinaryOp::Add).is_ok());
    }

    #[test]
    fn test_bitwise_rejected_for_float_images() {
        let image = AnyImage::new(2, 2, PixelId::Float64);
        assert!(matches!(
            image.binary(&image, BinaryOp::And),
            Err(ImageError::UnsupportedPixelType { .. })
        ));
        assert!(image.complement().is_err());

        let ints = AnyImage::new(2, 2, PixelId::Int16);
        let flipped = ints.complement().unwrap();
        assert_eq!(flipped.sum(), -4.0);
    }

    #[test]
    fn test_scalar_forms() {
        let mut image = AnyImage::new(2, 1, PixelId::Int32);
        image.set_pixel(0, 0, PixelValue::Int(8)).unwrap();

        let halved = image.binary_scalar(PixelValue::Int(2), BinaryOp::Divide).unwrap();
        assert_eq!(halved.get_pixel(0, 0).unwrap(), PixelValue::Int(4));

        let reflected = image
            .scalar_binary(PixelValue::Int(16), BinaryOp::FloorDivide)
            .unwrap();
        assert_eq!(reflected.get_pixel(0, 0).unwrap(), PixelValue::Int(2));
        assert_eq!(reflected.get_pixel(1, 0).unwrap(), PixelValue::Int(i32::MAX as i64));
    }

    #[test]
    fn test_binary_assign() {
        let mut image = AnyImage::new(2, 2, PixelId::Float32);
        let ones = image
            .binary_scalar(PixelValue::Float(1.0), BinaryOp::Add)
            .unwrap();
        image.binary_assign(&ones, BinaryOp::Subtract).unwrap();
        assert_eq!(image.sum(), -4.0);
        assert_eq!(image.min_max(), Some((-1.0, -1.0)));
    }

    #[test]
    fn test_downcast() {
        let mut image = AnyImage::from(Image::<i32>::new(2, 2));
        assert!(image.downcast_ref::<f32>().is_none());
        image.downcast_mut::<i32>().unwrap()[(1, 1)] = 5;
        assert_eq!(image.downcast_ref::<i32>().unwrap()[[1, 1]], 5);
    }
}
