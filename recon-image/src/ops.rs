//! Operator overloading for [`Image`].
//!
//! All operators work pixel by pixel with the semantics of [`Pixel`]:
//!
//! | form              | example                  |
//! |-------------------|--------------------------|
//! | image ∘ image     | `&a + &b`, `a - &b`      |
//! | image ∘ scalar    | `&a * 2`, `a / 3`        |
//! | scalar ∘ image    | `1 - &a`, `10 / a`       |
//! | in place          | `a += &b`, `a *= 2`      |
//! | unary complement  | `!&a` (integers only)    |
//!
//! Bitwise `& | ^ !` are implemented only for [`IntegerPixel`] types. Rust has
//! no floor-division operator, so it is provided as the methods
//! [`Image::floor_div`], [`Image::floor_div_scalar`],
//! [`Image::scalar_floor_div`] and their `_assign` forms.
//!
//! Image ∘ image operators panic when sizes differ, as ndarray does for
//! incompatible shapes. [`Image::try_binary`] is the checked alternative and
//! also verifies the images share a geometry.

use crate::error::{ImageError, Result};
use crate::image::Image;
use crate::pixel::{BinaryOp, IntegerPixel, Pixel};
use std::ops::{
    Add, AddAssign, BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, Div,
    DivAssign, Mul, MulAssign, Not, Sub, SubAssign,
};

impl<T: Pixel> Image<T> {
    /// Checked elementwise `self op rhs`.
    ///
    /// Fails when the images differ in size or geometry, or when `op` is not
    /// defined for the pixel type.
    pub fn try_binary(&self, rhs: &Image<T>, op: BinaryOp) -> Result<Image<T>> {
        self.check_compatible(rhs)?;
        let f = T::binary_fn(op).ok_or_else(|| ImageError::unsupported(op, T::ID))?;
        Ok(self.zip_map(rhs, f))
    }

    /// Checked elementwise `self op scalar`.
    pub fn try_binary_scalar(&self, scalar: T, op: BinaryOp) -> Result<Image<T>> {
        let f = T::binary_fn(op).ok_or_else(|| ImageError::unsupported(op, T::ID))?;
        Ok(self.map(|v| f(v, scalar)))
    }

    /// Checked elementwise `scalar op self` (reflected form).
    pub fn try_scalar_binary(&self, scalar: T, op: BinaryOp) -> Result<Image<T>> {
        let f = T::binary_fn(op).ok_or_else(|| ImageError::unsupported(op, T::ID))?;
        Ok(self.map(|v| f(scalar, v)))
    }

    /// Checked bitwise complement.
    pub fn try_complement(&self) -> Result<Image<T>> {
        let f = T::complement_fn().ok_or_else(|| ImageError::UnsupportedPixelType {
            op: "~".to_string(),
            pixel_id: T::ID,
        })?;
        Ok(self.map(f))
    }

    /// Elementwise floor division `self // rhs`.
    ///
    /// # Panics
    /// If the two images differ in size.
    pub fn floor_div(&self, rhs: &Image<T>) -> Image<T> {
        self.zip_map(rhs, T::pixel_floor_div)
    }

    /// `self // scalar`
    pub fn floor_div_scalar(&self, scalar: T) -> Image<T> {
        self.map(|v| v.pixel_floor_div(scalar))
    }

    /// Reflected floor division `scalar // self`.
    pub fn scalar_floor_div(&self, scalar: T) -> Image<T> {
        self.map(|v| scalar.pixel_floor_div(v))
    }

    /// `self //= rhs`
    pub fn floor_div_assign(&mut self, rhs: &Image<T>) {
        self.zip_apply(rhs, T::pixel_floor_div);
    }

    /// `self //= scalar`
    pub fn floor_div_assign_scalar(&mut self, scalar: T) {
        self.apply(|v| v.pixel_floor_div(scalar));
    }
}

// Image ∘ image for every combination of owned and borrowed operands, plus
// the compound assignment forms.
macro_rules! impl_image_op {
    ($bound:ident, $op:ident, $method:ident, $op_assign:ident, $method_assign:ident, $pixel_fn:ident) => {
        impl<T: $bound> $op<&Image<T>> for &Image<T> {
            type Output = Image<T>;

            fn $method(self, rhs: &Image<T>) -> Image<T> {
                self.zip_map(rhs, T::$pixel_fn)
            }
        }

        impl<T: $bound> $op<&Image<T>> for Image<T> {
            type Output = Image<T>;

            fn $method(mut self, rhs: &Image<T>) -> Image<T> {
                self.zip_apply(rhs, T::$pixel_fn);
                self
            }
        }

        impl<T: $bound> $op<Image<T>> for &Image<T> {
            type Output = Image<T>;

            fn $method(self, rhs: Image<T>) -> Image<T> {
                self.zip_map(&rhs, T::$pixel_fn)
            }
        }

        impl<T: $bound> $op<Image<T>> for Image<T> {
            type Output = Image<T>;

            fn $method(mut self, rhs: Image<T>) -> Image<T> {
                self.zip_apply(&rhs, T::$pixel_fn);
                self
            }
        }

        impl<T: $bound> $op_assign<&Image<T>> for Image<T> {
            fn $method_assign(&mut self, rhs: &Image<T>) {
                self.zip_apply(rhs, T::$pixel_fn);
            }
        }

        impl<T: $bound> $op_assign<Image<T>> for Image<T> {
            fn $method_assign(&mut self, rhs: Image<T>) {
                self.zip_apply(&rhs, T::$pixel_fn);
            }
        }
    };
}

// Image ∘ scalar, scalar ∘ image and image ∘= scalar. Scalars are concrete
// types so the reflected impls satisfy the orphan rules.
macro_rules! impl_scalar_op {
    ($bound:ident, $op:ident, $method:ident, $op_assign:ident, $method_assign:ident, $pixel_fn:ident; $($t:ty),+) => {$(
        impl $op<$t> for &Image<$t> {
            type Output = Image<$t>;

            fn $method(self, rhs: $t) -> Image<$t> {
                self.map(|v| <$t as $bound>::$pixel_fn(v, rhs))
            }
        }

        impl $op<$t> for Image<$t> {
            type Output = Image<$t>;

            fn $method(mut self, rhs: $t) -> Image<$t> {
                self.apply(|v| <$t as $bound>::$pixel_fn(v, rhs));
                self
            }
        }

        impl $op<&Image<$t>> for $t {
            type Output = Image<$t>;

            fn $method(self, rhs: &Image<$t>) -> Image<$t> {
                rhs.map(|v| <$t as $bound>::$pixel_fn(self, v))
            }
        }

        impl $op<Image<$t>> for $t {
            type Output = Image<$t>;

            fn $method(self, mut rhs: Image<$t>) -> Image<$t> {
                rhs.apply(|v| <$t as $bound>::$pixel_fn(self, v));
                rhs
            }
        }

        impl $op_assign<$t> for Image<$t> {
            fn $method_assign(&mut self, rhs: $t) {
                self.apply(|v| <$t as $bound>::$pixel_fn(v, rhs));
            }
        }
    )+};
}

impl_image_op!(Pixel, Add, add, AddAssign, add_assign, pixel_add);
impl_image_op!(Pixel, Sub, sub, SubAssign, sub_assign, pixel_sub);
impl_image_op!(Pixel, Mul, mul, MulAssign, mul_assign, pixel_mul);
impl_image_op!(Pixel, Div, div, DivAssign, div_assign, pixel_div);
impl_image_op!(IntegerPixel, BitAnd, bitand, BitAndAssign, bitand_assign, pixel_and);
impl_image_op!(IntegerPixel, BitOr, bitor, BitOrAssign, bitor_assign, pixel_or);
impl_image_op!(IntegerPixel, BitXor, bitxor, BitXorAssign, bitxor_assign, pixel_xor);

impl_scalar_op!(Pixel, Add, add, AddAssign, add_assign, pixel_add; u8, i8, u16, i16, u32, i32, u64, i64, f32, f64);
impl_scalar_op!(Pixel, Sub, sub, SubAssign, sub_assign, pixel_sub; u8, i8, u16, i16, u32, i32, u64, i64, f32, f64);
impl_scalar_op!(Pixel, Mul, mul, MulAssign, mul_assign, pixel_mul; u8, i8, u16, i16, u32, i32, u64, i64, f32, f64);
impl_scalar_op!(Pixel, Div, div, DivAssign, div_assign, pixel_div; u8, i8, u16, i16, u32, i32, u64, i64, f32, f64);
impl_scalar_op!(IntegerPixel, BitAnd, bitand, BitAndAssign, bitand_assign, pixel_and; u8, i8, u16, i16, u32, i32, u64, i64);
impl_scalar_op!(IntegerPixel, BitOr, bitor, BitOrAssign, bitor_assign, pixel_or; u8, i8, u16, i16, u32, i32, u64, i64);
impl_scalar_op!(IntegerPixel, BitXor, bitxor, BitXorAssign, bitxor_assign, pixel_xor; u8, i8, u16, i16, u32, i32, u64, i64);

impl<T: IntegerPixel> Not for &Image<T> {
    type Output = Image<T>;

    fn not(self) -> Image<T> {
        self.map(T::pixel_not)
    }
}

impl<T: IntegerPixel> Not for Image<T> {
    type Output = Image<T>;

    fn not(mut self) -> Image<T> {
        self.apply(T::pixel_not);
        self
    }
}
