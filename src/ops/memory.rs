//! Loads and stores.
//!
//! All slice-based operations touch exactly `N * size_of::<T>()` bytes of
//! caller memory. Partial vectors never read or write past lane `N - 1`,
//! which is what makes them usable on slice tails.

use crate::arch::v128::V128;
use crate::lane::Lane;
use crate::vec::{Desc, Mask128, Vec128};

impl<T: Lane, const N: usize> Desc<T, N> {
    /// Load `N` lanes from the front of `data`.
    ///
    /// Panics if `data` has fewer than `N` elements. Lanes at index `N` and
    /// above are undefined.
    #[inline]
    pub fn load(self, data: &[T]) -> Vec128<T, N> {
        assert!(data.len() >= N);
        let mut bytes = [0u8; 16];
        for i in 0..N {
            data[i].write(&mut bytes[i * T::SIZE..]);
        }
        Vec128::new(V128::from_bytes(bytes))
    }

    /// Store the `N` logical lanes of `v` to the front of `out`.
    ///
    /// Panics if `out` has fewer than `N` elements. Elements past `N` are
    /// untouched.
    #[inline]
    pub fn store(self, v: Vec128<T, N>, out: &mut [T]) {
        assert!(out.len() >= N);
        let bytes = v.raw.to_bytes();
        for i in 0..N {
            out[i] = T::read(&bytes[i * T::SIZE..]);
        }
    }

    /// Load `N` lanes and zero those where `m` is false.
    ///
    /// All `N` elements of `data` are read regardless of the mask; only the
    /// resulting lanes are masked.
    #[inline]
    pub fn masked_load(self, m: Mask128<T, N>, data: &[T]) -> Vec128<T, N> {
        m.if_then_else_zero(self.load(data))
    }

    /// Store only the lanes of `v` where `m` is true; other elements of
    /// `out` keep their previous value.
    #[inline]
    pub fn blended_store(self, v: Vec128<T, N>, m: Mask128<T, N>, out: &mut [T]) {
        assert!(out.len() >= N);
        let bytes = v.raw.to_bytes();
        let mask = m.raw.to_bytes();
        for i in 0..N {
            if mask[i * T::SIZE] != 0 {
                out[i] = T::read(&bytes[i * T::SIZE..]);
            }
        }
    }

    /// Gather `base[index[i]]` for each lane. Indices are read as signed
    /// lane-sized integers; negative or out-of-range indices panic via the
    /// slice bound check.
    #[inline]
    pub fn gather_index<I: Lane>(self, base: &[T], index: Vec128<I, N>) -> Vec128<T, N> {
        const {
            assert!(I::SIZE == T::SIZE, "index lanes must match data lanes in size");
            assert!(T::SIZE == 4 || T::SIZE == 8, "gather supports 4- and 8-byte lanes");
        }
        let idx = index.raw.to_bytes();
        let mut bytes = [0u8; 16];
        for i in 0..N {
            let j = lane_index::<I>(&idx, i);
            base[j].write(&mut bytes[i * T::SIZE..]);
        }
        Vec128::new(V128::from_bytes(bytes))
    }

    /// Scatter lane `i` of `v` to `base[index[i]]`. Same index rules as
    /// [`Desc::gather_index`]. Lanes are written in ascending order, so on
    /// duplicate indices the highest lane wins.
    #[inline]
    pub fn scatter_index<I: Lane>(self, v: Vec128<T, N>, base: &mut [T], index: Vec128<I, N>) {
        const {
            assert!(I::SIZE == T::SIZE, "index lanes must match data lanes in size");
            assert!(T::SIZE == 4 || T::SIZE == 8, "scatter supports 4- and 8-byte lanes");
        }
        let idx = index.raw.to_bytes();
        let bytes = v.raw.to_bytes();
        for i in 0..N {
            let j = lane_index::<I>(&idx, i);
            base[j] = T::read(&bytes[i * T::SIZE..]);
        }
    }

    /// [`Desc::gather_index`] with byte offsets instead of element indices.
    /// Each offset must be a non-negative multiple of the lane size.
    #[inline]
    pub fn gather_offset<I: Lane>(self, base: &[T], offset: Vec128<I, N>) -> Vec128<T, N> {
        const {
            assert!(I::SIZE == T::SIZE, "offset lanes must match data lanes in size");
            assert!(T::SIZE == 4 || T::SIZE == 8, "gather supports 4- and 8-byte lanes");
        }
        let off = offset.raw.to_bytes();
        let mut bytes = [0u8; 16];
        for i in 0..N {
            let j = lane_offset::<I>(&off, i, T::SIZE);
            base[j].write(&mut bytes[i * T::SIZE..]);
        }
        Vec128::new(V128::from_bytes(bytes))
    }

    /// [`Desc::scatter_index`] with byte offsets instead of element indices.
    #[inline]
    pub fn scatter_offset<I: Lane>(self, v: Vec128<T, N>, base: &mut [T], offset: Vec128<I, N>) {
        const {
            assert!(I::SIZE == T::SIZE, "offset lanes must match data lanes in size");
            assert!(T::SIZE == 4 || T::SIZE == 8, "scatter supports 4- and 8-byte lanes");
        }
        let off = offset.raw.to_bytes();
        let bytes = v.raw.to_bytes();
        for i in 0..N {
            let j = lane_offset::<I>(&off, i, T::SIZE);
            base[j] = T::read(&bytes[i * T::SIZE..]);
        }
    }
}

// As `lane_index` but for byte offsets, converted to an element index.
#[inline]
fn lane_offset<I: Lane>(bytes: &[u8; 16], i: usize, size: usize) -> usize {
    let off = lane_index::<I>(bytes, i);
    debug_assert!(off % size == 0, "offset is not lane aligned");
    off / size
}

// Read lane `i` of an index register as a non-negative usize.
#[inline]
fn lane_index<I: Lane>(bytes: &[u8; 16], i: usize) -> usize {
    let mut value: u64 = 0;
    for b in 0..I::SIZE {
        value |= (bytes[i * I::SIZE + b] as u64) << (8 * b);
    }
    // Sign-extend so a negative index fails the range check below instead
    // of wrapping into a huge offset that might still be in bounds.
    let shift = 64 - 8 * I::SIZE as u32;
    let signed = ((value << shift) as i64) >> shift;
    debug_assert!(signed >= 0);
    signed as usize
}

#[cfg(test)]
mod tests {
    use crate::vec::{Desc, Mask128, Vec128};

    #[test]
    fn test_load_store_partial() {
        let d = Desc::<i32, 2>::new();
        let data = [10, 20, 30, 40];
        let v = d.load(&data);
        assert_eq!(v.to_array(), [10, 20]);

        let mut out = [0i32; 4];
        d.store(v, &mut out);
        // Elements past N are untouched.
        assert_eq!(out, [10, 20, 0, 0]);
    }

    #[test]
    fn test_masked_load() {
        let d = Desc::<u16, 8>::new();
        let data: Vec<u16> = (1..=8).collect();
        let m = Mask128::from_array([true, true, false, true, false, false, true, false]);
        let v = d.masked_load(m, &data);
        assert_eq!(v.to_array(), [1, 2, 0, 4, 0, 0, 7, 0]);
    }

    #[test]
    fn test_blended_store() {
        let d = Desc::<i32, 4>::new();
        let v = Vec128::from_array([1, 2, 3, 4]);
        let m = Mask128::from_array([true, false, false, true]);
        let mut out = [9i32; 4];
        d.blended_store(v, m, &mut out);
        assert_eq!(out, [1, 9, 9, 4]);
    }

    #[test]
    fn test_gather_scatter() {
        let d = Desc::<f32, 4>::new();
        let base = [0.0f32, 1.0, 2.0, 3.0, 4.0, 5.0];
        let idx = Vec128::<i32, 4>::from_array([5, 0, 3, 3]);
        let v = d.gather_index(&base, idx);
        assert_eq!(v.to_array(), [5.0, 0.0, 3.0, 3.0]);

        let d = Desc::<u64, 2>::new();
        let mut base = [0u64; 4];
        let idx = Vec128::<i64, 2>::from_array([2, 0]);
        d.scatter_index(Vec128::from_array([7, 8]), &mut base, idx);
        assert_eq!(base, [8, 0, 7, 0]);
    }

    #[test]
    fn test_gather_scatter_offset() {
        let d = Desc::<u32, 4>::new();
        let base = [10u32, 11, 12, 13];
        let off = Vec128::<u32, 4>::from_array([12, 0, 4, 4]);
        assert_eq!(d.gather_offset(&base, off).to_array(), [13, 10, 11, 11]);

        let mut out = [0u32; 4];
        d.scatter_offset(Vec128::from_array([1, 2, 3, 4]), &mut out, off);
        assert_eq!(out, [2, 4, 0, 1]);
    }
}
