//! Reading and writing images.
//!
//! Pixel data goes through the `image` crate as grayscale PNG; physical
//! metadata that PNG cannot carry is stored in a JSON [`ImageHeader`]
//! sidecar.
//!
//! # Coordinate System
//! Image crate pixel `(x, y)` maps directly to [`Image`] pixel `(x, y)`.

use crate::any_image::AnyImage;
use crate::error::{ImageError, Result};
use crate::geometry::Geometry;
use crate::image::Image;
use crate::image_size::ImageSize;
use crate::pixel::{Pixel, PixelId};
use image::{DynamicImage, GrayImage, ImageBuffer, Luma};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

/// Linearly rescale pixel values from `[min, max]` to `[0, 255]`.
///
/// A constant image maps to all zeros.
pub fn normalize_to_gray<T: Pixel>(image: &Image<T>) -> GrayImage {
    let (lo, hi) = image
        .min_max()
        .map(|(lo, hi)| (lo.to_f64(), hi.to_f64()))
        .unwrap_or((0.0, 0.0));
    let range = hi - lo;

    GrayImage::from_fn(image.width() as u32, image.height() as u32, |x, y| {
        let value = image[(x as usize, y as usize)].to_f64();
        let scaled = if range > 0.0 {
            ((value - lo) / range * 255.0).round()
        } else {
            0.0
        };
        Luma([scaled as u8])
    })
}

/// Normalize `image` to 8 bits and write it as PNG.
pub fn save_normalized_png<T: Pixel>(image: &Image<T>, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    log::debug!("writing normalized {} image to {}", image.size(), path.display());
    normalize_to_gray(image).save(path)?;
    Ok(())
}

/// Write an 8-bit image without rescaling.
pub fn save_gray8(image: &Image<u8>, path: impl AsRef<Path>) -> Result<()> {
    let buffer = GrayImage::from_raw(
        image.width() as u32,
        image.height() as u32,
        image.iter().copied().collect(),
    )
    .ok_or_else(|| ImageError::InvalidGeometry("pixel buffer does not match size".into()))?;
    buffer.save(path.as_ref())?;
    Ok(())
}

/// Write a 16-bit image without rescaling.
pub fn save_gray16(image: &Image<u16>, path: impl AsRef<Path>) -> Result<()> {
    let buffer: ImageBuffer<Luma<u16>, Vec<u16>> = ImageBuffer::from_raw(
        image.width() as u32,
        image.height() as u32,
        image.iter().copied().collect(),
    )
    .ok_or_else(|| ImageError::InvalidGeometry("pixel buffer does not match size".into()))?;
    buffer.save(path.as_ref())?;
    Ok(())
}

/// Read a grayscale image.
///
/// 16-bit grayscale files load as [`PixelId::UInt16`]; everything else is
/// converted to 8-bit luma and loads as [`PixelId::UInt8`].
pub fn read_gray(path: impl AsRef<Path>) -> Result<AnyImage> {
    let path = path.as_ref();
    let decoded = image::open(path)?;
    log::debug!(
        "read {}x{} {:?} image from {}",
        decoded.width(),
        decoded.height(),
        decoded.color(),
        path.display()
    );

    let image = match decoded {
        DynamicImage::ImageLuma16(buffer) => {
            let size = ImageSize::from_width_height(buffer.width() as usize, buffer.height() as usize);
            AnyImage::UInt16(Image::from_vec(size, buffer.into_raw())?)
        }
        other => {
            let buffer = other.to_luma8();
            let size = ImageSize::from_width_height(buffer.width() as usize, buffer.height() as usize);
            AnyImage::UInt8(Image::from_vec(size, buffer.into_raw())?)
        }
    };
    Ok(image)
}

/// Size, pixel type and geometry of an image, stored as a JSON sidecar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageHeader {
    pub size: ImageSize,
    pub pixel_id: PixelId,
    #[serde(default)]
    pub geometry: Geometry,
}

impl ImageHeader {
    pub fn from_image(image: &AnyImage) -> Self {
        Self {
            size: image.size(),
            pixel_id: image.pixel_id(),
            geometry: *image.geometry(),
        }
    }

    /// Zero-filled image described by this header.
    pub fn create_image(&self) -> AnyImage {
        let mut image = AnyImage::new(self.size.width, self.size.height, self.pixel_id);
        image.set_geometry(self.geometry);
        image
    }

    /// Attach this header's geometry to `image`, which must have the same
    /// size. The pixel type is converted if it differs.
    pub fn apply(&self, image: AnyImage) -> Result<AnyImage> {
        if image.size() != self.size {
            return Err(ImageError::SizeMismatch {
                left: image.size(),
                right: self.size,
            });
        }
        let mut image = if image.pixel_id() == self.pixel_id {
            image
        } else {
            image.cast(self.pixel_id)
        };
        image.set_geometry(self.geometry);
        Ok(image)
    }

    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let writer = BufWriter::new(File::create(path.as_ref())?);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let reader = BufReader::new(File::open(path.as_ref())?);
        let header: ImageHeader = serde_json::from_reader(reader)?;
        // re-validate spacing, which serde does not check
        Geometry::new(header.geometry.origin, header.geometry.spacing)?;
        Ok(header)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_normalize_stretches_range() {
        let image = Image::from_vec(ImageSize::from_width_height(3, 1), vec![-10i32, 0, 10]).unwrap();
        let gray = normalize_to_gray(&image);
        assert_eq!(gray.get_pixel(0, 0).0[0], 0);
        assert_eq!(gray.get_pixel(1, 0).0[0], 128);
        assert_eq!(gray.get_pixel(2, 0).0[0], 255);
    }

    #[test]
    fn test_normalize_constant_image() {
        let image = Image::filled(ImageSize::from_width_height(2, 2), 7.5f32);
        let gray = normalize_to_gray(&image);
        assert!(gray.pixels().all(|p| p.0[0] == 0));
    }

    #[test]
    fn test_gray8_roundtrip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("ramp.png");
        let image = Image::from_shape_fn(ImageSize::from_width_height(5, 3), |x, y| (x * 10 + y) as u8);

        save_gray8(&image, &path).unwrap();
        let loaded = read_gray(&path).unwrap();
        assert_eq!(loaded.pixel_id(), PixelId::UInt8);
        assert_eq!(loaded.downcast_ref::<u8>(), Some(&image));
    }

    #[test]
    fn test_gray16_roundtrip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("deep.png");
        let image = Image::from_shape_fn(ImageSize::from_width_height(4, 4), |x, y| (x * 4000 + y) as u16);

        save_gray16(&image, &path).unwrap();
        let loaded = read_gray(&path).unwrap();
        assert_eq!(loaded.pixel_id(), PixelId::UInt16);
        assert_eq!(loaded.downcast_ref::<u16>().unwrap()[(3, 2)], 12002);
    }

    #[test]
    fn test_save_normalized_png() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("normalized.png");
        let image = Image::from_vec(ImageSize::from_width_height(2, 1), vec![100i64, 200]).unwrap();

        save_normalized_png(&image, &path).unwrap();
        let loaded = read_gray(&path).unwrap();
        assert_eq!(loaded.min_max(), Some((0.0, 255.0)));
    }

    #[test]
    fn test_read_missing_file() {
        let dir = tempdir().unwrap();
        assert!(read_gray(dir.path().join("absent.png")).is_err());
    }

    #[test]
    fn test_header_roundtrip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("header.json");
        let header = ImageHeader {
            size: ImageSize::from_width_height(10, 10),
            pixel_id: PixelId::Int32,
            geometry: Geometry::new([-5.0, -5.0], [0.5, 0.5]).unwrap(),
        };

        header.save_to_file(&path).unwrap();
        let loaded = ImageHeader::load_from_file(&path).unwrap();
        assert_eq!(loaded, header);

        let image = loaded.create_image();
        assert_eq!(image.pixel_id(), PixelId::Int32);
        assert_eq!(image.len(), 100);
        assert_eq!(image.geometry(), &header.geometry);
    }

    #[test]
    fn test_header_rejects_invalid_spacing() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(
            &path,
            r#"{"size":{"width":2,"height":2},"pixel_id":"UInt8","geometry":{"origin":[0.0,0.0],"spacing":[0.0,1.0]}}"#,
        )
        .unwrap();
        assert!(matches!(
            ImageHeader::load_from_file(&path),
            Err(ImageError::InvalidGeometry(_))
        ));
    }

    #[test]
    fn test_header_apply() {
        let header = ImageHeader {
            size: ImageSize::from_width_height(2, 2),
            pixel_id: PixelId::Float32,
            geometry: Geometry::new([1.0, 1.0], [2.0, 2.0]).unwrap(),
        };
        let applied = header.apply(AnyImage::new(2, 2, PixelId::UInt8)).unwrap();
        assert_eq!(applied.pixel_id(), PixelId::Float32);
        assert_eq!(applied.geometry(), &header.geometry);

        assert!(matches!(
            header.apply(AnyImage::new(3, 2, PixelId::Float32)),
            Err(ImageError::SizeMismatch { .. })
        ));
    }
}
