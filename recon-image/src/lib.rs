//! Typed 2-D pixel images for reconstruction tooling.
//!
//! The central type is [`Image<T>`], a fixed-size grid of scalar pixels with
//! elementwise operators (see [`ops`]), coordinate access, length and sum.
//! [`AnyImage`] is its runtime-typed counterpart, selected by [`PixelId`].
//!
//! ```
//! use recon_image::Image;
//!
//! let image = Image::<i32>::new(10, 10);
//! let shifted = 1 + &image * 3;
//! assert_eq!(shifted.sum(), 100.0);
//! ```

pub mod any_image;
pub mod cast;
pub mod compare;
pub mod error;
pub mod geometry;
pub mod image;
pub mod image_size;
pub mod io;
pub mod ops;
pub mod pixel;

pub use any_image::AnyImage;
pub use compare::ImageCompare;
pub use error::{ImageError, Result};
pub use geometry::Geometry;
pub use image::Image;
pub use image_size::ImageSize;
pub use io::ImageHeader;
pub use pixel::{BinaryOp, IntegerPixel, Pixel, PixelId, PixelValue};
