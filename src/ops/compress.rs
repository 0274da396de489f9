//! Mask-driven stable partition.
//!
//! The packed mask bits index a permutation table that holds, for every
//! possible bit pattern, the byte gather realizing that partition; applying
//! it is a single byte shuffle. The tables are enumerated at compile time,
//! one entry per pattern. Lane width 1 is not supported (its table would
//! need 65536 entries and the byte shuffle could not distinguish source
//! lanes); everything wider is a true partition: surviving lanes keep
//! their relative order.

use crate::arch::v128::{self, V128};
use crate::lane::Lane;
use crate::vec::{Desc, Mask128, Vec128};

// Byte gather moving lanes whose bit matches the first pass to the front,
// the rest after them, both in ascending lane order.
const fn partition_indices(bits: u64, size: usize, lanes: usize, false_first: bool) -> [u8; 16] {
    let mut p = [0u8; 16];
    let mut out = 0;
    let mut pass = 0;
    while pass < 2 {
        let want = (pass == 0) != false_first;
        let mut lane = 0;
        while lane < lanes {
            if (((bits >> lane) & 1) != 0) == want {
                let mut b = 0;
                while b < size {
                    p[out * size + b] = (lane * size + b) as u8;
                    b += 1;
                }
                out += 1;
            }
            lane += 1;
        }
        pass += 1;
    }
    p
}

const fn build_table<const ENTRIES: usize>(
    size: usize,
    lanes: usize,
    false_first: bool,
) -> [[u8; 16]; ENTRIES] {
    let mut table = [[0u8; 16]; ENTRIES];
    let mut bits = 0;
    while bits < ENTRIES {
        table[bits] = partition_indices(bits as u64, size, lanes, false_first);
        bits += 1;
    }
    table
}

static IDX_16X8: [[u8; 16]; 256] = build_table(2, 8, false);
static IDX_16X8_NOT: [[u8; 16]; 256] = build_table(2, 8, true);
static IDX_32X4: [[u8; 16]; 16] = build_table(4, 4, false);
static IDX_32X4_NOT: [[u8; 16]; 16] = build_table(4, 4, true);
static IDX_64X2: [[u8; 16]; 4] = build_table(8, 2, false);
static IDX_64X2_NOT: [[u8; 16]; 4] = build_table(8, 2, true);

#[inline]
fn pattern_for(size: usize, bits: usize, false_first: bool) -> [u8; 16] {
    match (size, false_first) {
        (2, false) => IDX_16X8[bits],
        (2, true) => IDX_16X8_NOT[bits],
        (4, false) => IDX_32X4[bits],
        (4, true) => IDX_32X4_NOT[bits],
        (8, false) => IDX_64X2[bits],
        (8, true) => IDX_64X2_NOT[bits],
        _ => unreachable!(),
    }
}

impl<T: Lane, const N: usize> Vec128<T, N> {
    /// Move the lanes where `m` is true to the front, preserving their
    /// relative order; the remaining lanes hold the false-lane values in
    /// order, but callers should treat them as unspecified.
    #[inline]
    pub fn compress(self, m: Mask128<T, N>) -> Self {
        const {
            assert!(T::SIZE > 1, "compress is unsupported for 1-byte lanes");
        }
        if N == 1 {
            return self;
        }
        let pattern = pattern_for(T::SIZE, m.to_bits() as usize, false);
        Self::new(v128::i8x16_swizzle(self.raw, V128::from_bytes(pattern)))
    }

    /// Move the lanes where `m` is false to the front; the complement of
    /// [`Vec128::compress`].
    #[inline]
    pub fn compress_not(self, m: Mask128<T, N>) -> Self {
        const {
            assert!(T::SIZE > 1, "compress is unsupported for 1-byte lanes");
        }
        if N == 1 {
            return self;
        }
        if N * T::SIZE < 16 {
            // The table covers the full register; for partial vectors the
            // inverted mask (clamped to N bits) gives the right order.
            return self.compress(!m);
        }
        let pattern = pattern_for(T::SIZE, m.to_bits() as usize, true);
        Self::new(v128::i8x16_swizzle(self.raw, V128::from_bytes(pattern)))
    }
}

impl<T: Lane, const N: usize> Desc<T, N> {
    /// Whether [`Vec128::compress`] keeps the relative order of both the
    /// true and the false lanes, so that it is a stable partition rather
    /// than merely a gather of the true lanes. Holds for every supported
    /// lane width; generic callers over lane types can branch on it.
    pub const COMPRESS_IS_PARTITION: bool = T::SIZE > 1;

    /// Compress `v` by `m`, store all `N` lanes to `out` and return the
    /// number of meaningful (true) lanes. `out` must hold `N` elements;
    /// elements past the returned count receive unspecified values.
    #[inline]
    pub fn compress_store(self, v: Vec128<T, N>, m: Mask128<T, N>, out: &mut [T]) -> usize {
        self.store(v.compress(m), out);
        m.count_true()
    }

    /// Compress `v` by `m` and store only the surviving lanes; elements of
    /// `out` past the returned count keep their previous value.
    #[inline]
    pub fn compress_blended_store(
        self,
        v: Vec128<T, N>,
        m: Mask128<T, N>,
        out: &mut [T],
    ) -> usize {
        let count = m.count_true();
        self.blended_store(v.compress(m), self.first_n(count), out);
        count
    }

    /// Compress by packed mask bits instead of a mask value.
    #[inline]
    pub fn compress_bits(self, v: Vec128<T, N>, bits: &[u8]) -> Vec128<T, N> {
        v.compress(self.load_mask_bits(bits))
    }

    /// [`Desc::compress_store`] driven by packed mask bits.
    #[inline]
    pub fn compress_bits_store(self, v: Vec128<T, N>, bits: &[u8], out: &mut [T]) -> usize {
        self.compress_store(v, self.load_mask_bits(bits), out)
    }
}

#[cfg(test)]
mod tests {
    use crate::vec::{Desc, Mask128, Vec128};

    #[test]
    fn test_compress_i32() {
        let v = Vec128::<i32, 4>::from_array([1, 2, 3, 4]);
        let m = Mask128::from_array([true, false, true, false]);
        assert_eq!(v.compress(m).to_array()[..2], [1, 3]);
        assert_eq!(v.compress_not(m).to_array()[..2], [2, 4]);
    }

    #[test]
    fn test_compress_is_stable_partition() {
        let lanes: [u16; 8] = [10, 11, 12, 13, 14, 15, 16, 17];
        let v = Vec128::<u16, 8>::from_array(lanes);
        for bits in 0..256u32 {
            let bools: [bool; 8] = std::array::from_fn(|i| bits & (1 << i) != 0);
            let m = Mask128::from_array(bools);
            let out = v.compress(m).to_array();
            let expected: Vec<u16> = (0..8).filter(|&i| bools[i]).map(|i| lanes[i]).collect();
            assert_eq!(&out[..expected.len()], &expected[..], "bits {bits:#b}");
        }
    }

    #[test]
    fn test_compress_u64() {
        let v = Vec128::<u64, 2>::from_array([100, 200]);
        let m = Mask128::from_array([false, true]);
        assert_eq!(v.compress(m).to_array()[0], 200);
        assert_eq!(v.compress_not(m).to_array()[0], 100);
    }

    #[test]
    fn test_compress_partial() {
        // Two logical lanes of four; the undefined upper half must not
        // leak into the survivors.
        let v = Vec128::<i32, 2>::from_array([5, 6]);
        let m = Mask128::from_array([false, true]);
        assert_eq!(v.compress(m).to_array()[0], 6);
        assert_eq!(v.compress_not(m).to_array()[0], 5);
    }

    #[test]
    fn test_compress_store_and_bits() {
        let d = Desc::<i32, 4>::new();
        let v = Vec128::from_array([1, 2, 3, 4]);
        let m = Mask128::from_array([false, true, true, false]);
        let mut out = [0i32; 4];
        assert_eq!(d.compress_store(v, m, &mut out), 2);
        assert_eq!(out[..2], [2, 3]);

        let bits = [0b0110u8];
        assert_eq!(d.compress_bits(v, &bits).to_array()[..2], [2, 3]);
        let mut out = [0i32; 4];
        assert_eq!(d.compress_bits_store(v, &bits, &mut out), 2);
        assert_eq!(out[..2], [2, 3]);
    }

    #[test]
    fn test_compress_blended_store_leaves_tail() {
        let d = Desc::<u16, 8>::new();
        let v = Vec128::from_array([1, 2, 3, 4, 5, 6, 7, 8]);
        let m = Mask128::from_array([true, false, true, false, false, true, false, false]);
        let mut out = [99u16; 8];
        assert_eq!(d.compress_blended_store(v, m, &mut out), 3);
        assert_eq!(out, [1, 3, 6, 99, 99, 99, 99, 99]);
    }

    #[test]
    fn test_compress_partition_order() {
        assert!(Desc::<u16, 8>::COMPRESS_IS_PARTITION);
        assert!(Desc::<f64, 2>::COMPRESS_IS_PARTITION);
        assert!(!Desc::<u8, 16>::COMPRESS_IS_PARTITION);

        // compress_not is the same permutation read from the other end, so
        // both halves of the partition stay in lane order.
        let v = Vec128::<i32, 4>::from_array([1, 2, 3, 4]);
        let m = Mask128::from_array([false, true, true, false]);
        assert_eq!(v.compress(m).to_array(), [2, 3, 1, 4]);
        assert_eq!(v.compress_not(m).to_array(), [1, 4, 2, 3]);
    }
}
