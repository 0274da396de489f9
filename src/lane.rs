//! Lane element types supported by this crate.

use std::fmt::Debug;

mod private {
    pub trait Sealed {}
}

/// Types that can occupy one lane of a 128-bit vector.
///
/// This trait is sealed as the set of lane types is fixed by the target's
/// instruction set.
pub trait Lane: Copy + Debug + Default + PartialEq + private::Sealed + 'static {
    /// Size of one lane in bytes.
    const SIZE: usize;

    /// Read a lane from little-endian bytes. `bytes` must hold at least
    /// [`Lane::SIZE`] bytes.
    #[doc(hidden)]
    fn read(bytes: &[u8]) -> Self;

    /// Write a lane as little-endian bytes.
    #[doc(hidden)]
    fn write(self, bytes: &mut [u8]);
}

/// Lane types with a numeric interpretation, used by ramp construction.
pub trait NumLane: Lane {
    /// Return `self + i`, wrapping for integers. For floats the sum is exact
    /// while `i` is exactly representable.
    #[doc(hidden)]
    fn add_index(self, i: usize) -> Self;
}

macro_rules! impl_int_lane {
    ($t:ty) => {
        impl private::Sealed for $t {}

        impl Lane for $t {
            const SIZE: usize = std::mem::size_of::<$t>();

            #[inline]
            fn read(bytes: &[u8]) -> Self {
                let mut buf = [0u8; std::mem::size_of::<$t>()];
                buf.copy_from_slice(&bytes[..Self::SIZE]);
                <$t>::from_le_bytes(buf)
            }

            #[inline]
            fn write(self, bytes: &mut [u8]) {
                bytes[..Self::SIZE].copy_from_slice(&self.to_le_bytes());
            }
        }

        impl NumLane for $t {
            #[inline]
            fn add_index(self, i: usize) -> Self {
                self.wrapping_add(i as $t)
            }
        }
    };
}

macro_rules! impl_float_lane {
    ($t:ty) => {
        impl private::Sealed for $t {}

        impl Lane for $t {
            const SIZE: usize = std::mem::size_of::<$t>();

            #[inline]
            fn read(bytes: &[u8]) -> Self {
                let mut buf = [0u8; std::mem::size_of::<$t>()];
                buf.copy_from_slice(&bytes[..Self::SIZE]);
                <$t>::from_le_bytes(buf)
            }

            #[inline]
            fn write(self, bytes: &mut [u8]) {
                bytes[..Self::SIZE].copy_from_slice(&self.to_le_bytes());
            }
        }

        impl NumLane for $t {
            #[inline]
            fn add_index(self, i: usize) -> Self {
                self + i as $t
            }
        }
    };
}

impl_int_lane!(u8);
impl_int_lane!(i8);
impl_int_lane!(u16);
impl_int_lane!(i16);
impl_int_lane!(u32);
impl_int_lane!(i32);
impl_int_lane!(u64);
impl_int_lane!(i64);
impl_float_lane!(f32);
impl_float_lane!(f64);

impl private::Sealed for crate::half::F16 {}

impl Lane for crate::half::F16 {
    const SIZE: usize = 2;

    #[inline]
    fn read(bytes: &[u8]) -> Self {
        Self::from_bits(u16::read(bytes))
    }

    #[inline]
    fn write(self, bytes: &mut [u8]) {
        self.to_bits().write(bytes)
    }
}

impl private::Sealed for crate::half::Bf16 {}

impl Lane for crate::half::Bf16 {
    const SIZE: usize = 2;

    #[inline]
    fn read(bytes: &[u8]) -> Self {
        Self::from_bits(u16::read(bytes))
    }

    #[inline]
    fn write(self, bytes: &mut [u8]) {
        self.to_bits().write(bytes)
    }
}
