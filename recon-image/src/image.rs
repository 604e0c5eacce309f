//! Owned 2-D pixel image.
//!
//! [`Image<T>`] wraps an `ndarray::Array2<T>` of shape `(height, width)` in
//! row-major order together with its physical [`Geometry`]. Coordinates are
//! always given as `(x, y)`: column first, then row. The array is indexed
//! `[[y, x]]` internally; callers never see that order.
//!
//! Pixels can be read and written through [`Image::get_pixel`] /
//! [`Image::set_pixel`] (bounds-checked, returning `Result`) or by indexing
//! with either a tuple or a two-element array:
//!
//! ```
//! use recon_image::Image;
//!
//! let mut image = Image::<i32>::new(10, 10);
//! image[(0, 0)] = 1;
//! image[[0, 1]] = 2;
//! image.set_pixel(9, 9, 3).unwrap();
//!
//! assert_eq!(image.get_pixel(0, 1).unwrap(), 2);
//! assert_eq!(image.sum(), 6.0);
//! assert_eq!(image.iter().sum::<i32>(), 6);
//! assert_eq!(image.len(), 100);
//! ```

use crate::error::{ImageError, Result};
use crate::geometry::Geometry;
use crate::image_size::ImageSize;
use crate::pixel::{Pixel, PixelId};
use ndarray::{Array2, Zip};
use std::ops::{Index, IndexMut};

/// A fixed-size 2-D grid of pixels of scalar type `T`.
#[derive(Debug, Clone, PartialEq)]
pub struct Image<T: Pixel> {
    data: Array2<T>,
    geometry: Geometry,
}

impl<T: Pixel> Image<T> {
    /// Zero-filled image of `width × height` pixels.
    pub fn new(width: usize, height: usize) -> Self {
        Self::filled(ImageSize::from_width_height(width, height), T::default())
    }

    /// Image of the given size with every pixel set to `value`.
    pub fn filled(size: ImageSize, value: T) -> Self {
        Self {
            data: Array2::from_elem(size.shape(), value),
            geometry: Geometry::default(),
        }
    }

    /// Wrap an existing `(height, width)` array.
    pub fn from_array(data: Array2<T>) -> Self {
        Self {
            data,
            geometry: Geometry::default(),
        }
    }

    /// Build an image by evaluating `f(x, y)` for every pixel.
    pub fn from_shape_fn<F>(size: ImageSize, mut f: F) -> Self
    where
        F: FnMut(usize, usize) -> T,
    {
        Self::from_array(Array2::from_shape_fn(size.shape(), |(y, x)| f(x, y)))
    }

    /// Row-major pixel buffer of length `width * height`.
    pub fn from_vec(size: ImageSize, pixels: Vec<T>) -> Result<Self> {
        Ok(Self::from_array(Array2::from_shape_vec(size.shape(), pixels)?))
    }

    pub fn width(&self) -> usize {
        self.data.ncols()
    }

    pub fn height(&self) -> usize {
        self.data.nrows()
    }

    pub fn size(&self) -> ImageSize {
        ImageSize::from_width_height(self.width(), self.height())
    }

    pub fn pixel_id(&self) -> PixelId {
        T::ID
    }

    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    pub fn set_geometry(&mut self, geometry: Geometry) {
        self.geometry = geometry;
    }

    /// Builder-style variant of [`Image::set_geometry`].
    pub fn with_geometry(mut self, geometry: Geometry) -> Self {
        self.geometry = geometry;
        self
    }

    /// Read pixel `(x, y)`.
    pub fn get_pixel(&self, x: usize, y: usize) -> Result<T> {
        self.check_bounds(x, y)?;
        Ok(self.data[[y, x]])
    }

    /// Write pixel `(x, y)`.
    pub fn set_pixel(&mut self, x: usize, y: usize, value: T) -> Result<()> {
        self.check_bounds(x, y)?;
        self.data[[y, x]] = value;
        Ok(())
    }

    fn check_bounds(&self, x: usize, y: usize) -> Result<()> {
        let size = self.size();
        if size.contains(x, y) {
            Ok(())
        } else {
            Err(ImageError::OutOfBounds { x, y, size })
        }
    }

    /// Total number of pixels, `width * height`.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Sum of all pixel values, accumulated in `f64`.
    pub fn sum(&self) -> f64 {
        self.data.iter().map(|v| v.to_f64()).sum()
    }

    /// Mean pixel value, `None` for an empty image.
    pub fn mean(&self) -> Option<f64> {
        (!self.is_empty()).then(|| self.sum() / self.len() as f64)
    }

    /// Smallest and largest pixel, `None` for an empty image.
    pub fn min_max(&self) -> Option<(T, T)> {
        let mut iter = self.data.iter().copied();
        let first = iter.next()?;
        Some(iter.fold((first, first), |(lo, hi), v| {
            (
                if v < lo { v } else { lo },
                if v > hi { v } else { hi },
            )
        }))
    }

    /// Pixels in row-major order.
    pub fn iter(&self) -> ndarray::iter::Iter<'_, T, ndarray::Ix2> {
        self.data.iter()
    }

    pub fn fill(&mut self, value: T) {
        self.data.fill(value);
    }

    /// Underlying `(height, width)` array.
    pub fn as_array(&self) -> &Array2<T> {
        &self.data
    }

    pub fn into_array(self) -> Array2<T> {
        self.data
    }

    /// New image with `f` applied to every pixel; geometry is kept.
    pub fn map<U, F>(&self, f: F) -> Image<U>
    where
        U: Pixel,
        F: FnMut(T) -> U,
    {
        Image {
            data: self.data.mapv(f),
            geometry: self.geometry,
        }
    }

    /// Apply `f` to every pixel in place.
    pub fn apply<F>(&mut self, f: F)
    where
        F: FnMut(T) -> T,
    {
        self.data.mapv_inplace(f);
    }

    /// New image from `f(self[p], rhs[p])` for every pixel `p`.
    ///
    /// # Panics
    /// If the two images differ in size.
    pub fn zip_map<F>(&self, rhs: &Image<T>, mut f: F) -> Image<T>
    where
        F: FnMut(T, T) -> T,
    {
        self.assert_same_size(rhs);
        Image {
            data: Zip::from(&self.data)
                .and(&rhs.data)
                .map_collect(|&a, &b| f(a, b)),
            geometry: self.geometry,
        }
    }

    /// In-place `self[p] = f(self[p], rhs[p])`.
    ///
    /// # Panics
    /// If the two images differ in size.
    pub fn zip_apply<F>(&mut self, rhs: &Image<T>, mut f: F)
    where
        F: FnMut(T, T) -> T,
    {
        self.assert_same_size(rhs);
        Zip::from(&mut self.data)
            .and(&rhs.data)
            .for_each(|a, &b| *a = f(*a, b));
    }

    fn assert_same_size(&self, rhs: &Image<T>) {
        assert!(
            self.size() == rhs.size(),
            "image sizes differ: {} vs {}",
            self.size(),
            rhs.size()
        );
    }

    /// Verify `rhs` has the same size and occupies the same physical space.
    pub fn check_compatible(&self, rhs: &Image<T>) -> Result<()> {
        if self.size() != rhs.size() {
            return Err(ImageError::SizeMismatch {
                left: self.size(),
                right: rhs.size(),
            });
        }
        if !self.geometry.approx_eq(&rhs.geometry, GEOMETRY_TOLERANCE) {
            return Err(ImageError::GeometryMismatch);
        }
        Ok(())
    }
}

/// Tolerance on origin and spacing when checking two images are aligned.
pub const GEOMETRY_TOLERANCE: f64 = 1e-6;

impl<T: Pixel> Index<(usize, usize)> for Image<T> {
    type Output = T;

    fn index(&self, (x, y): (usize, usize)) -> &T {
        &self.data[[y, x]]
    }
}

impl<T: Pixel> IndexMut<(usize, usize)> for Image<T> {
    fn index_mut(&mut self, (x, y): (usize, usize)) -> &mut T {
        &mut self.data[[y, x]]
    }
}

impl<T: Pixel> Index<[usize; 2]> for Image<T> {
    type Output = T;

    fn index(&self, [x, y]: [usize; 2]) -> &T {
        &self.data[[y, x]]
    }
}

impl<T: Pixel> IndexMut<[usize; 2]> for Image<T> {
    fn index_mut(&mut self, [x, y]: [usize; 2]) -> &mut T {
        &mut self.data[[y, x]]
    }
}

impl<'a, T: Pixel> IntoIterator for &'a Image<T> {
    type Item = &'a T;
    type IntoIter = ndarray::iter::Iter<'a, T, ndarray::Ix2>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.iter()
    }
}
