//! Cell value traits
//!
//! [`RasterElement`] bounds everything a [`Raster`](super::Raster) can hold.
//! [`ClassLabel`] narrows it to the integer types usable as categorical
//! labels (hashable, totally ordered).

use num_traits::{NumCast, Zero};
use std::fmt::{Debug, Display};
use std::hash::Hash;
use std::str::FromStr;

/// Trait for types that can be stored in a raster cell.
pub trait RasterElement:
    Copy + Debug + Display + FromStr + PartialOrd + NumCast + Zero + Send + Sync + 'static
{
    /// No-data value used when a raster does not declare one
    fn default_nodata() -> Self;

    /// Check if this value represents no-data
    fn is_nodata(&self, nodata: Option<Self>) -> bool;

    /// Whether this type is a floating point type
    fn is_float() -> bool;

    /// Convert self to f64
    fn to_f64(self) -> Option<f64> {
        NumCast::from(self)
    }
}

/// Integer cell types that can act as class labels.
///
/// Labels must hash and compare exactly, which rules out floats.
pub trait ClassLabel: RasterElement + Eq + Ord + Hash {}

macro_rules! impl_label_element {
    ($($t:ty),*) => {$(
        impl RasterElement for $t {
            fn default_nodata() -> Self {
                <$t>::MIN
            }

            fn is_nodata(&self, nodata: Option<Self>) -> bool {
                nodata == Some(*self)
            }

            fn is_float() -> bool {
                false
            }
        }

        impl ClassLabel for $t {}
    )*};
}

macro_rules! impl_float_element {
    ($($t:ty),*) => {$(
        impl RasterElement for $t {
            fn default_nodata() -> Self {
                <$t>::NAN
            }

            fn is_nodata(&self, nodata: Option<Self>) -> bool {
                if self.is_nan() {
                    return true;
                }
                match nodata {
                    Some(nd) => (self - nd).abs() < <$t>::EPSILON * 100.0,
                    None => false,
                }
            }

            fn is_float() -> bool {
                true
            }
        }
    )*};
}

impl_label_element!(i8, i16, i32, i64, u8, u16, u32, u64);
impl_float_element!(f32, f64);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_nodata_needs_declared_value() {
        assert!(!(-9999i32).is_nodata(None));
        assert!((-9999i32).is_nodata(Some(-9999)));
        assert_eq!(i32::default_nodata(), i32::MIN);
    }

    #[test]
    fn test_float_nan_is_always_nodata() {
        assert!(f64::NAN.is_nodata(None));
        assert!((-9999.0f64).is_nodata(Some(-9999.0)));
        assert!(!1.0f64.is_nodata(Some(-9999.0)));
    }
}
