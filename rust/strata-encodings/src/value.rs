use std::{cmp::Ordering, fmt::Debug};

use num_traits::{AsPrimitive, NumCast};
use strata_format::NullSentinel;

use crate::stats::StatValue;

/// Element type that can be stored in a chunk and summarized by chunk statistics.
///
/// Implemented for the closed set of storage types: `i8`, `i16`, `i32`, `i64`,
/// `f32` and `f64`. Booleans and decimals are stored through the integer types.
pub trait ChunkValue:
    NullSentinel
    + Copy
    + PartialEq
    + Debug
    + Default
    + bytemuck::Pod
    + NumCast
    + AsPrimitive<i64>
    + AsPrimitive<f64>
    + Send
    + Sync
    + 'static
{
    const SIZE: usize;
    const IS_FLOAT: bool;

    /// Largest value of the type (`+inf` for floats), used as the initial running minimum.
    const MAX_VALUE: Self;

    /// Lowest value of the type (`-inf` for floats), used as the initial running maximum.
    const LOWEST: Self;

    /// Lowest value that is not the null sentinel.
    const LOWEST_NON_NULL: Self;

    /// Total order over the values of the type.
    ///
    /// Integers use their natural order. Floats use IEEE `totalOrder`, which places
    /// `-0.0` before `0.0`, so min/max folding is deterministic down to the bit pattern.
    fn value_cmp(&self, other: &Self) -> Ordering;

    fn is_nan(&self) -> bool {
        false
    }

    /// Converts `value`, saturating at `LOWEST_NON_NULL` and `MAX_VALUE`.
    fn from_i64(value: i64) -> Self {
        let saturated = if value < 0 {
            Self::LOWEST_NON_NULL
        } else {
            Self::MAX_VALUE
        };
        non_null_bound(num_traits::cast(value).unwrap_or(saturated))
    }

    /// Converts `value`, saturating like [`from_i64`](Self::from_i64).
    /// Returns `None` for NaN.
    fn from_f64(value: f64) -> Option<Self> {
        if value.is_nan() {
            return None;
        }
        let saturated = if value < 0.0 {
            Self::LOWEST_NON_NULL
        } else {
            Self::MAX_VALUE
        };
        Some(non_null_bound(num_traits::cast(value).unwrap_or(saturated)))
    }

    #[inline]
    fn to_i64(self) -> i64 {
        AsPrimitive::<i64>::as_(self)
    }

    fn to_stat_value(self) -> StatValue;

    /// Converts a tagged statistics value of any kind into `Self`.
    ///
    /// Returns `None` if the value lies outside the range of `Self`, or is a NaN
    /// converted to an integer type.
    fn from_stat_value(value: StatValue) -> Option<Self> {
        match value {
            StatValue::Int8(v) => num_traits::cast(v),
            StatValue::Int16(v) => num_traits::cast(v),
            StatValue::Int32(v) => num_traits::cast(v),
            StatValue::Int64(v) => num_traits::cast(v),
            StatValue::Float32(v) => num_traits::cast(v),
            StatValue::Float64(v) => num_traits::cast(v),
        }
    }

    /// Reads one value from the start of `src` (native byte order, any alignment).
    #[inline]
    fn read_from(src: &[u8]) -> Self {
        bytemuck::pod_read_unaligned(&src[..Self::SIZE])
    }
}

/// Keeps a saturated integer bound off the null sentinel.
#[inline]
fn non_null_bound<T: ChunkValue>(value: T) -> T {
    if !T::IS_FLOAT && value.is_null() {
        T::LOWEST_NON_NULL
    } else {
        value
    }
}

macro_rules! impl_int_chunk_value {
    ($T:ty, $variant:ident) => {
        impl ChunkValue for $T {
            const SIZE: usize = std::mem::size_of::<$T>();
            const IS_FLOAT: bool = false;
            const MAX_VALUE: $T = <$T>::MAX;
            const LOWEST: $T = <$T>::MIN;
            const LOWEST_NON_NULL: $T = <$T>::MIN + 1;

            #[inline]
            fn value_cmp(&self, other: &Self) -> Ordering {
                self.cmp(other)
            }

            fn to_stat_value(self) -> StatValue {
                StatValue::$variant(self)
            }
        }
    };
}

macro_rules! impl_float_chunk_value {
    ($T:ty, $variant:ident) => {
        impl ChunkValue for $T {
            const SIZE: usize = std::mem::size_of::<$T>();
            const IS_FLOAT: bool = true;
            const MAX_VALUE: $T = <$T>::INFINITY;
            const LOWEST: $T = <$T>::NEG_INFINITY;
            const LOWEST_NON_NULL: $T = <$T>::NEG_INFINITY;

            #[inline]
            fn value_cmp(&self, other: &Self) -> Ordering {
                self.total_cmp(other)
            }

            #[inline]
            fn is_nan(&self) -> bool {
                <$T>::is_nan(*self)
            }

            fn to_stat_value(self) -> StatValue {
                StatValue::$variant(self)
            }
        }
    };
}

impl_int_chunk_value!(i8, Int8);
impl_int_chunk_value!(i16, Int16);
impl_int_chunk_value!(i32, Int32);
impl_int_chunk_value!(i64, Int64);
impl_float_chunk_value!(f32, Float32);
impl_float_chunk_value!(f64, Float64);
