//! Vector, mask and tag types.

use std::fmt;
use std::marker::PhantomData;

use crate::arch::v128::{self, V128};
use crate::lane::{Lane, NumLane};

/// Zero-sized descriptor of a vector shape: element type `T` and logical
/// lane count `N`.
///
/// Construction and memory operations hang off this tag, and generic code
/// passes it around to pick the right overload, so it carries no runtime
/// state at all. `N` must be a power of two and `N * size_of::<T>()` must
/// fit in the 128-bit register; violations fail to compile.
pub struct Desc<T, const N: usize>(PhantomData<T>);

impl<T, const N: usize> Clone for Desc<T, N> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T, const N: usize> Copy for Desc<T, N> {}

impl<T: Lane, const N: usize> Default for Desc<T, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Lane, const N: usize> Desc<T, N> {
    /// Number of logical lanes.
    pub const LANES: usize = N;

    /// Number of defined bytes, `N * size_of::<T>()`.
    pub const BYTES: usize = N * T::SIZE;

    pub const fn new() -> Self {
        const {
            assert!(N.is_power_of_two(), "lane count must be a power of two");
            assert!(
                N * T::SIZE <= 16,
                "lane count exceeds the 128-bit register"
            );
        }
        Desc(PhantomData)
    }

    /// Vector with all lanes zero.
    #[inline]
    pub fn zero(self) -> Vec128<T, N> {
        Vec128::new(V128::ZERO)
    }

    /// Vector with unspecified contents.
    #[inline]
    pub fn undefined(self) -> Vec128<T, N> {
        self.zero()
    }

    /// Broadcast `value` to every lane. Lanes at index `N` and above may or
    /// may not hold the value.
    #[inline]
    pub fn set(self, value: T) -> Vec128<T, N> {
        Vec128::new(v128::splat(value))
    }

    /// Lane `i` holds `first + i`. Integer lanes wrap; float ramps are exact
    /// while representable.
    #[inline]
    pub fn iota(self, first: T) -> Vec128<T, N>
    where
        T: NumLane,
    {
        let mut bytes = [0u8; 16];
        for i in 0..N {
            first.add_index(i).write(&mut bytes[i * T::SIZE..]);
        }
        Vec128::new(V128::from_bytes(bytes))
    }

    /// Reinterpret the bits of `v` as a vector of `T` without changing them.
    ///
    /// The defined byte ranges of source and destination must agree, which
    /// is checked at compile time.
    #[inline]
    pub fn bit_cast<F: Lane, const FN: usize>(self, v: Vec128<F, FN>) -> Vec128<T, N> {
        const {
            assert!(
                N * T::SIZE == FN * F::SIZE,
                "bit_cast requires identical byte widths"
            );
        }
        Vec128::new(v.raw)
    }
}

/// SIMD vector of `N` lanes of `T` backed by one 128-bit register.
///
/// Bytes at offsets `>= N * size_of::<T>()` are undefined unless an
/// operation documents otherwise. Operations never read caller memory
/// beyond the defined range, but may compute arbitrary values in the
/// undefined lanes.
pub struct Vec128<T, const N: usize> {
    pub(crate) raw: V128,
    marker: PhantomData<T>,
}

impl<T, const N: usize> Clone for Vec128<T, N> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T, const N: usize> Copy for Vec128<T, N> {}

impl<T: Lane, const N: usize> Vec128<T, N> {
    #[inline]
    pub(crate) fn new(raw: V128) -> Self {
        Vec128 {
            raw,
            marker: PhantomData,
        }
    }

    /// Build a vector from an array of lanes. Undefined lanes are zeroed.
    #[inline]
    pub fn from_array(lanes: [T; N]) -> Self {
        let mut bytes = [0u8; 16];
        for i in 0..N {
            lanes[i].write(&mut bytes[i * T::SIZE..]);
        }
        Self::new(V128::from_bytes(bytes))
    }

    /// Copy the logical lanes out to an array.
    #[inline]
    pub fn to_array(self) -> [T; N] {
        std::array::from_fn(|i| T::read(&self.raw.to_bytes()[i * T::SIZE..]))
    }

    /// Return lane 0.
    #[inline]
    pub fn get_lane(self) -> T {
        v128::extract_lane::<T>(self.raw, 0)
    }

    /// Return lane `i`. Checked in debug builds only.
    #[inline]
    pub fn extract_lane(self, i: usize) -> T {
        debug_assert!(i < N);
        v128::extract_lane::<T>(self.raw, i)
    }

    /// Return a copy with lane `i` replaced. Checked in debug builds only.
    #[inline]
    pub fn insert_lane(self, i: usize, value: T) -> Self {
        debug_assert!(i < N);
        Self::new(v128::replace_lane::<T>(self.raw, i, value))
    }
}

impl<T: Lane, const N: usize> fmt::Debug for Vec128<T, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.to_array()).finish()
    }
}

/// Mask with the same shape as a [`Vec128`]: each lane is all-ones (true)
/// or all-zeros (false). No other bit pattern is a legal mask value.
pub struct Mask128<T, const N: usize> {
    pub(crate) raw: V128,
    marker: PhantomData<T>,
}

impl<T, const N: usize> Clone for Mask128<T, N> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T, const N: usize> Copy for Mask128<T, N> {}

impl<T: Lane, const N: usize> Mask128<T, N> {
    #[inline]
    pub(crate) fn new(raw: V128) -> Self {
        Mask128 {
            raw,
            marker: PhantomData,
        }
    }

    /// Build a mask from per-lane booleans. Undefined lanes are false.
    #[inline]
    pub fn from_array(lanes: [bool; N]) -> Self {
        let mut bytes = [0u8; 16];
        for i in 0..N {
            if lanes[i] {
                for b in &mut bytes[i * T::SIZE..(i + 1) * T::SIZE] {
                    *b = 0xFF;
                }
            }
        }
        Self::new(V128::from_bytes(bytes))
    }

    /// Copy the logical lanes out as booleans.
    #[inline]
    pub fn to_array(self) -> [bool; N] {
        let bytes = self.raw.to_bytes();
        std::array::from_fn(|i| bytes[i * T::SIZE] != 0)
    }

    /// Reinterpret as a mask over another lane type of the same width.
    #[inline]
    pub fn rebind<U: Lane>(self) -> Mask128<U, N> {
        const {
            assert!(U::SIZE == T::SIZE, "mask rebind requires equal lane sizes");
        }
        Mask128::new(self.raw)
    }

    /// All-ones lanes become true lanes of a vector; the reverse of
    /// [`Mask128::from_vec`].
    #[inline]
    pub fn to_vec(self) -> Vec128<T, N> {
        Vec128::new(self.raw)
    }

    /// Treat a vector whose lanes are all-ones or all-zeros as a mask.
    #[inline]
    pub fn from_vec(v: Vec128<T, N>) -> Self {
        Self::new(v.raw)
    }
}

impl<T: Lane, const N: usize> fmt::Debug for Mask128<T, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.to_array()).finish()
    }
}

/// Byte-level gather permutation for [`Vec128::table_lookup_lanes`], built
/// once by [`Desc::indices_from_vec`] and reusable across lookups.
pub struct Indices128<T, const N: usize> {
    pub(crate) raw: V128,
    marker: PhantomData<T>,
}

impl<T, const N: usize> Clone for Indices128<T, N> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T, const N: usize> Copy for Indices128<T, N> {}

impl<T: Lane, const N: usize> Indices128<T, N> {
    #[inline]
    pub(crate) fn new(raw: V128) -> Self {
        Indices128 {
            raw,
            marker: PhantomData,
        }
    }
}

impl<T: Lane, const N: usize> fmt::Debug for Indices128<T, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Indices128({:?})", self.raw.to_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::{Desc, Mask128, Vec128};

    #[test]
    fn test_array_round_trip() {
        let v = Vec128::<i32, 4>::from_array([1, -2, 3, -4]);
        assert_eq!(v.to_array(), [1, -2, 3, -4]);
        let p = Vec128::<u16, 4>::from_array([5, 6, 7, 8]);
        assert_eq!(p.to_array(), [5, 6, 7, 8]);
    }

    #[test]
    fn test_set_and_iota() {
        let d = Desc::<u8, 16>::new();
        assert_eq!(d.set(7).to_array(), [7; 16]);
        let d = Desc::<i32, 4>::new();
        assert_eq!(d.iota(5).to_array(), [5, 6, 7, 8]);
        let d = Desc::<f32, 4>::new();
        assert_eq!(d.iota(1.5).to_array(), [1.5, 2.5, 3.5, 4.5]);
        // Integer iota wraps rather than overflowing.
        let d = Desc::<u8, 16>::new();
        assert_eq!(d.iota(250).to_array()[..8], [250, 251, 252, 253, 254, 255, 0, 1]);
    }

    #[test]
    fn test_bit_cast_preserves_bits() {
        let d = Desc::<u32, 4>::new();
        let v = Vec128::<f32, 4>::from_array([1.0, -1.0, 0.0, 2.0]);
        let bits = d.bit_cast(v);
        assert_eq!(bits.to_array()[0], 0x3F80_0000);
        assert_eq!(bits.to_array()[1], 0xBF80_0000);
    }

    #[test]
    fn test_mask_round_trip() {
        let m = Mask128::<i16, 8>::from_array([true, false, true, true, false, false, true, false]);
        assert_eq!(
            m.to_array(),
            [true, false, true, true, false, false, true, false]
        );
    }

    #[test]
    fn test_lane_accessors() {
        let v = Vec128::<u64, 2>::from_array([10, 20]);
        assert_eq!(v.get_lane(), 10);
        assert_eq!(v.extract_lane(1), 20);
        assert_eq!(v.insert_lane(0, 99).to_array(), [99, 20]);
    }
}
