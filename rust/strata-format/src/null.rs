//! Null sentinels: reserved in-band values that stand for "no value".
//!
//! Integral kinds reserve their minimum representable value. Floating point kinds
//! reserve the smallest positive normal value, matched by bit pattern so that
//! the check is not affected by float comparison rules.

/// A storage type with a reserved null value.
pub trait NullSentinel: Copy {
    /// The reserved "no value" marker.
    const NULL: Self;

    /// Returns `true` if `self` is the null sentinel.
    fn is_null(&self) -> bool;
}

macro_rules! impl_int_null_sentinel {
    ($T:ty) => {
        impl NullSentinel for $T {
            const NULL: $T = <$T>::MIN;

            #[inline]
            fn is_null(&self) -> bool {
                *self == Self::NULL
            }
        }
    };
}

impl_int_null_sentinel!(i8);
impl_int_null_sentinel!(i16);
impl_int_null_sentinel!(i32);
impl_int_null_sentinel!(i64);

impl NullSentinel for f32 {
    const NULL: f32 = f32::MIN_POSITIVE;

    #[inline]
    fn is_null(&self) -> bool {
        self.to_bits() == Self::NULL.to_bits()
    }
}

impl NullSentinel for f64 {
    const NULL: f64 = f64::MIN_POSITIVE;

    #[inline]
    fn is_null(&self) -> bool {
        self.to_bits() == Self::NULL.to_bits()
    }
}
