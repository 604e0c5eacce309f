//! Pixel scalar types and their elementwise arithmetic.
//!
//! Every image stores one scalar type per pixel, identified at runtime by
//! [`PixelId`] and at compile time by the [`Pixel`] trait. The trait fixes
//! the arithmetic semantics shared by all image operators:
//!
//! - addition, subtraction and multiplication wrap on integer overflow
//! - division by a zero pixel yields the maximum value of the pixel type
//! - floor division rounds the quotient toward negative infinity
//!
//! Bitwise operators are only available on integer pixel types, which
//! additionally implement [`IntegerPixel`].

use num_traits::NumCast;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Runtime identifier of a pixel scalar type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PixelId {
    UInt8,
    Int8,
    UInt16,
    Int16,
    UInt32,
    Int32,
    UInt64,
    Int64,
    Float32,
    Float64,
}

impl PixelId {
    /// All supported pixel types, narrowest integers first.
    pub const ALL: [PixelId; 10] = [
        PixelId::UInt8,
        PixelId::Int8,
        PixelId::UInt16,
        PixelId::Int16,
        PixelId::UInt32,
        PixelId::Int32,
        PixelId::UInt64,
        PixelId::Int64,
        PixelId::Float32,
        PixelId::Float64,
    ];

    /// Human readable name, e.g. "32-bit signed integer".
    pub fn name(&self) -> &'static str {
        match self {
            PixelId::UInt8 => "8-bit unsigned integer",
            PixelId::Int8 => "8-bit signed integer",
            PixelId::UInt16 => "16-bit unsigned integer",
            PixelId::Int16 => "16-bit signed integer",
            PixelId::UInt32 => "32-bit unsigned integer",
            PixelId::Int32 => "32-bit signed integer",
            PixelId::UInt64 => "64-bit unsigned integer",
            PixelId::Int64 => "64-bit signed integer",
            PixelId::Float32 => "32-bit float",
            PixelId::Float64 => "64-bit float",
        }
    }

    /// Storage size of one pixel in bytes.
    pub fn size_of(&self) -> usize {
        match self {
            PixelId::UInt8 | PixelId::Int8 => 1,
            PixelId::UInt16 | PixelId::Int16 => 2,
            PixelId::UInt32 | PixelId::Int32 | PixelId::Float32 => 4,
            PixelId::UInt64 | PixelId::Int64 | PixelId::Float64 => 8,
        }
    }

    pub fn is_integer(&self) -> bool {
        !matches!(self, PixelId::Float32 | PixelId::Float64)
    }

    pub fn is_signed(&self) -> bool {
        !matches!(
            self,
            PixelId::UInt8 | PixelId::UInt16 | PixelId::UInt32 | PixelId::UInt64
        )
    }
}

impl fmt::Display for PixelId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Elementwise binary operations available on images.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    Add,
    Subtract,
    Multiply,
    Divide,
    FloorDivide,
    And,
    Or,
    Xor,
}

impl BinaryOp {
    /// Operator symbol as written in expressions.
    pub fn symbol(&self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Subtract => "-",
            BinaryOp::Multiply => "*",
            BinaryOp::Divide => "/",
            BinaryOp::FloorDivide => "//",
            BinaryOp::And => "&",
            BinaryOp::Or => "|",
            BinaryOp::Xor => "^",
        }
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// A single pixel value of unknown scalar type.
///
/// Used at the runtime-typed boundary ([`crate::AnyImage`]) where the pixel
/// type is only known as a [`PixelId`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PixelValue {
    Int(i64),
    UInt(u64),
    Float(f64),
}

impl PixelValue {
    pub fn as_f64(&self) -> f64 {
        match *self {
            PixelValue::Int(v) => v as f64,
            PixelValue::UInt(v) => v as f64,
            PixelValue::Float(v) => v,
        }
    }
}

impl From<i32> for PixelValue {
    fn from(v: i32) -> Self {
        PixelValue::Int(v as i64)
    }
}

impl From<i64> for PixelValue {
    fn from(v: i64) -> Self {
        PixelValue::Int(v)
    }
}

impl From<u64> for PixelValue {
    fn from(v: u64) -> Self {
        PixelValue::UInt(v)
    }
}

impl From<f64> for PixelValue {
    fn from(v: f64) -> Self {
        PixelValue::Float(v)
    }
}

impl fmt::Display for PixelValue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            PixelValue::Int(v) => write!(f, "{v}"),
            PixelValue::UInt(v) => write!(f, "{v}"),
            PixelValue::Float(v) => write!(f, "{v}"),
        }
    }
}

/// Scalar type storable in an image.
pub trait Pixel:
    Copy + PartialEq + PartialOrd + Default + fmt::Debug + fmt::Display + Send + Sync + 'static
{
    /// Runtime identifier of this pixel type.
    const ID: PixelId;

    fn max_value() -> Self;

    fn pixel_add(self, rhs: Self) -> Self;
    fn pixel_sub(self, rhs: Self) -> Self;
    fn pixel_mul(self, rhs: Self) -> Self;

    /// Division; a zero divisor yields [`Pixel::max_value`].
    fn pixel_div(self, rhs: Self) -> Self;

    /// Quotient rounded toward negative infinity; a zero divisor yields
    /// [`Pixel::max_value`].
    fn pixel_floor_div(self, rhs: Self) -> Self;

    fn to_value(self) -> PixelValue;

    /// Converts with saturation at the type bounds. Floats are truncated
    /// toward zero when converted to integers and NaN becomes zero.
    fn from_value(value: PixelValue) -> Self;

    fn to_f64(self) -> f64;

    /// Elementwise function implementing `op`, or `None` when the pixel type
    /// does not support it.
    fn binary_fn(op: BinaryOp) -> Option<fn(Self, Self) -> Self> {
        match op {
            BinaryOp::Add => Some(Self::pixel_add),
            BinaryOp::Subtract => Some(Self::pixel_sub),
            BinaryOp::Multiply => Some(Self::pixel_mul),
            BinaryOp::Divide => Some(Self::pixel_div),
            BinaryOp::FloorDivide => Some(Self::pixel_floor_div),
            BinaryOp::And | BinaryOp::Or | BinaryOp::Xor => None,
        }
    }

    /// Bitwise complement, or `None` for non-integer pixel types.
    fn complement_fn() -> Option<fn(Self) -> Self> {
        None
    }
}

/// Integer pixel types, which additionally support bitwise operators.
pub trait IntegerPixel: Pixel {
    fn pixel_and(self, rhs: Self) -> Self;
    fn pixel_or(self, rhs: Self) -> Self;
    fn pixel_xor(self, rhs: Self) -> Self;
    fn pixel_not(self) -> Self;
}

// Shared by signed and unsigned integers; `$floor_div` differs between them.
macro_rules! impl_integer_pixel {
    ($t:ty, $id:ident, |$a:ident, $b:ident| $floor_div:expr) => {
        impl Pixel for $t {
            const ID: PixelId = PixelId::$id;

            fn max_value() -> Self {
                <$t>::MAX
            }

            fn pixel_add(self, rhs: Self) -> Self {
                self.wrapping_add(rhs)
            }

            fn pixel_sub(self, rhs: Self) -> Self {
                self.wrapping_sub(rhs)
            }

            fn pixel_mul(self, rhs: Self) -> Self {
                self.wrapping_mul(rhs)
            }

            fn pixel_div(self, rhs: Self) -> Self {
                if rhs == 0 {
                    <Self as Pixel>::max_value()
                } else {
                    self.wrapping_div(rhs)
                }
            }

            fn pixel_floor_div(self, rhs: Self) -> Self {
                if rhs == 0 {
                    return <Self as Pixel>::max_value();
                }
                let ($a, $b) = (self, rhs);
                $floor_div
            }

            fn to_value(self) -> PixelValue {
                if <$t>::MIN == 0 {
                    PixelValue::UInt(self as u64)
                } else {
                    PixelValue::Int(self as i64)
                }
            }

            fn from_value(value: PixelValue) -> Self {
                match value {
                    PixelValue::Int(v) => <$t as NumCast>::from(v).unwrap_or(if v < 0 {
                        <$t>::MIN
                    } else {
                        <$t>::MAX
                    }),
                    PixelValue::UInt(v) => <$t as NumCast>::from(v).unwrap_or(<$t>::MAX),
                    // `as` saturates and maps NaN to zero
                    PixelValue::Float(v) => v as $t,
                }
            }

            fn to_f64(self) -> f64 {
                self as f64
            }

            fn binary_fn(op: BinaryOp) -> Option<fn(Self, Self) -> Self> {
                match op {
                    BinaryOp::Add => Some(Self::pixel_add),
                    BinaryOp::Subtract => Some(Self::pixel_sub),
                    BinaryOp::Multiply => Some(Self::pixel_mul),
                    BinaryOp::Divide => Some(Self::pixel_div),
                    BinaryOp::FloorDivide => Some(Self::pixel_floor_div),
                    BinaryOp::And => Some(Self::pixel_and),
                    BinaryOp::Or => Some(Self::pixel_or),
                    BinaryOp::Xor => Some(Self::pixel_xor),
                }
            }

            fn complement_fn() -> Option<fn(Self) -> Self> {
                Some(Self::pixel_not)
            }
        }

        impl IntegerPixel for $t {
            fn pixel_and(self, rhs: Self) -> Self {
                self & rhs
            }

            fn pixel_or(self, rhs: Self) -> Self {
                self | rhs
            }

            fn pixel_xor(self, rhs: Self) -> Self {
                self ^ rhs
            }

            fn pixel_not(self) -> Self {
                !self
            }
        }
    };
}

macro_rules! impl_signed_pixel {
    ($($t:ty => $id:ident),+ $(,)?) => {$(
        impl_integer_pixel!($t, $id, |a, b| {
            let q = a.wrapping_div(b);
            if a.wrapping_rem(b) != 0 && ((a < 0) != (b < 0)) {
                q.wrapping_sub(1)
            } else {
                q
            }
        });
    )+};
}

macro_rules! impl_unsigned_pixel {
    ($($t:ty => $id:ident),+ $(,)?) => {$(
        impl_integer_pixel!($t, $id, |a, b| a / b);
    )+};
}

macro_rules! impl_float_pixel {
    ($($t:ty => $id:ident),+ $(,)?) => {$(
        impl Pixel for $t {
            const ID: PixelId = PixelId::$id;

            fn max_value() -> Self {
                <$t>::MAX
            }

            fn pixel_add(self, rhs: Self) -> Self {
                self + rhs
            }

            fn pixel_sub(self, rhs: Self) -> Self {
                self - rhs
            }

            fn pixel_mul(self, rhs: Self) -> Self {
                self * rhs
            }

            fn pixel_div(self, rhs: Self) -> Self {
                if rhs == 0.0 {
                    <Self as Pixel>::max_value()
                } else {
                    self / rhs
                }
            }

            fn pixel_floor_div(self, rhs: Self) -> Self {
                if rhs == 0.0 {
                    <Self as Pixel>::max_value()
                } else {
                    (self / rhs).floor()
                }
            }

            fn to_value(self) -> PixelValue {
                PixelValue::Float(self as f64)
            }

            fn from_value(value: PixelValue) -> Self {
                match value {
                    PixelValue::Int(v) => v as $t,
                    PixelValue::UInt(v) => v as $t,
                    PixelValue::Float(v) => v as $t,
                }
            }

            fn to_f64(self) -> f64 {
                self as f64
            }
        }
    )+};
}

impl_unsigned_pixel!(u8 => UInt8, u16 => UInt16, u32 => UInt32, u64 => UInt64);
impl_signed_pixel!(i8 => Int8, i16 => Int16, i32 => Int32, i64 => Int64);
impl_float_pixel!(f32 => Float32, f64 => Float64);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_arithmetic_wraps() {
        assert_eq!(i32::MAX.pixel_add(1), i32::MIN);
        assert_eq!(0u8.pixel_sub(1), 255);
        assert_eq!(200u8.pixel_mul(2), 144);
    }

    #[test]
    fn test_division_by_zero_yields_max() {
        assert_eq!(<i8 as Pixel>::max_value(), i8::MAX);
        assert_eq!(<f32 as Pixel>::max_value(), f32::MAX);
        assert_eq!(0i32.pixel_div(0), i32::MAX);
        assert_eq!(7u16.pixel_floor_div(0), u16::MAX);
        assert_eq!(1.0f32.pixel_div(0.0), f32::MAX);
        assert_eq!((-3.0f64).pixel_floor_div(0.0), f64::MAX);
    }

    #[test]
    fn test_floor_division_rounds_down() {
        assert_eq!(7i32.pixel_floor_div(2), 3);
        assert_eq!((-7i32).pixel_floor_div(2), -4);
        assert_eq!(7i32.pixel_floor_div(-2), -4);
        assert_eq!((-7i32).pixel_floor_div(-2), 3);
        assert_eq!((-6i32).pixel_floor_div(2), -3);
        assert_eq!(7u8.pixel_floor_div(2), 3);
        assert_eq!((-7.0f64).pixel_floor_div(2.0), -4.0);
        // truncating division differs for negative quotients
        assert_eq!((-7i32).pixel_div(2), -3);
    }

    #[test]
    fn test_min_divided_by_minus_one_wraps() {
        assert_eq!(i32::MIN.pixel_div(-1), i32::MIN);
        assert_eq!(i32::MIN.pixel_floor_div(-1), i32::MIN);
    }

    #[test]
    fn test_from_value_saturates() {
        assert_eq!(u8::from_value(PixelValue::Int(-5)), 0);
        assert_eq!(u8::from_value(PixelValue::Int(300)), 255);
        assert_eq!(i8::from_value(PixelValue::UInt(1000)), 127);
        assert_eq!(i32::from_value(PixelValue::Float(2.9)), 2);
        assert_eq!(i32::from_value(PixelValue::Float(-2.9)), -2);
        assert_eq!(u16::from_value(PixelValue::Float(f64::NAN)), 0);
        assert_eq!(i64::from_value(PixelValue::Int(i64::MAX)), i64::MAX);
    }

    #[test]
    fn test_to_value_signedness() {
        assert_eq!(5u32.to_value(), PixelValue::UInt(5));
        assert_eq!((-5i16).to_value(), PixelValue::Int(-5));
        assert_eq!(1.5f32.to_value(), PixelValue::Float(1.5));
    }

    #[test]
    fn test_bitwise_only_on_integers() {
        assert!(f32::binary_fn(BinaryOp::And).is_none());
        assert!(f64::complement_fn().is_none());
        let xor = i32::binary_fn(BinaryOp::Xor).unwrap();
        assert_eq!(xor(0b1100, 0b1010), 0b0110);
        let not = u8::complement_fn().unwrap();
        assert_eq!(not(0), 255);
    }

    #[test]
    fn test_pixel_id_properties() {
        assert_eq!(i32::ID, PixelId::Int32);
        assert_eq!(PixelId::Int32.to_string(), "32-bit signed integer");
        assert_eq!(PixelId::Float64.size_of(), 8);
        assert!(PixelId::UInt8.is_integer());
        assert!(!PixelId::UInt8.is_signed());
        assert!(PixelId::Float32.is_signed());
        assert!(!PixelId::Float32.is_integer());
    }
}
