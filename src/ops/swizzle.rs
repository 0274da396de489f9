//! Byte and lane permutations.
//!
//! The hardware permute takes a compile-time byte pattern, so every
//! operation here reduces to choosing the right pattern: patterns are
//! produced by `const fn` generators evaluated in inline `const` blocks,
//! one per lane width and count. The only runtime-index path is the byte
//! swizzle behind [`Vec128::table_lookup_bytes`].

use crate::arch::v128::{self, V128};
use crate::lane::Lane;
use crate::vec::{Desc, Indices128, Vec128};

const fn shl_bytes_pattern(k: usize) -> [u8; 16] {
    let mut p = [0u8; 16];
    let mut i = 0;
    while i < 16 {
        // Index 16 selects from the all-zero second operand.
        p[i] = if i < k { 16 } else { (i - k) as u8 };
        i += 1;
    }
    p
}

const fn shr_bytes_pattern(k: usize) -> [u8; 16] {
    let mut p = [0u8; 16];
    let mut i = 0;
    while i < 16 {
        p[i] = if i + k < 16 { (i + k) as u8 } else { 16 };
        i += 1;
    }
    p
}

const fn combine_shr_pattern(k: usize) -> [u8; 16] {
    let mut p = [0u8; 16];
    let mut i = 0;
    while i < 16 {
        // Bytes [k, k+16) of the hi:lo concatenation; lo is operand a,
        // hi is operand b at indices 16..32.
        p[i] = (k + i) as u8;
        i += 1;
    }
    p
}

const fn broadcast_pattern(lane: usize, size: usize) -> [u8; 16] {
    let mut p = [0u8; 16];
    let mut i = 0;
    while i < 16 {
        p[i] = (lane * size + i % size) as u8;
        i += 1;
    }
    p
}

// Alternate lanes of a and b starting at lane `base` of each.
const fn interleave_pattern(size: usize, base: usize) -> [u8; 16] {
    let mut p = [0u8; 16];
    let mut i = 0;
    while i < 16 {
        let out_lane = i / size;
        let src_lane = base + out_lane / 2;
        let from_b = out_lane % 2 == 1;
        p[i] = (src_lane * size + i % size + if from_b { 16 } else { 0 }) as u8;
        i += 1;
    }
    p
}

// Concatenate one half of lo (bottom of result) with one half of hi.
const fn concat_pattern(half_bytes: usize, lo_upper: bool, hi_upper: bool) -> [u8; 16] {
    let mut p = [0u8; 16];
    let mut i = 0;
    while i < 2 * half_bytes {
        p[i] = if i < half_bytes {
            (i + if lo_upper { half_bytes } else { 0 }) as u8
        } else {
            (i - half_bytes + if hi_upper { half_bytes } else { 0 } + 16) as u8
        };
        i += 1;
    }
    p
}

// Even- or odd-indexed lanes of lo, then of hi.
const fn concat_half_lanes_pattern(size: usize, n: usize, odd: bool) -> [u8; 16] {
    let mut p = [0u8; 16];
    let mut out = 0;
    while out < n {
        let src_lane = 2 * (out % (n / 2)) + if odd { 1 } else { 0 };
        let from_hi = if out < n / 2 { 0 } else { 16 };
        let mut b = 0;
        while b < size {
            p[out * size + b] = (src_lane * size + b + from_hi) as u8;
            b += 1;
        }
        out += 1;
    }
    p
}

// Replicate the even or odd lane of each pair into both pair positions.
const fn dup_pattern(size: usize, odd: bool) -> [u8; 16] {
    let mut p = [0u8; 16];
    let mut i = 0;
    while i < 16 {
        let out_lane = i / size;
        let src_lane = (out_lane & !1) + if odd { 1 } else { 0 };
        p[i] = (src_lane * size + i % size) as u8;
        i += 1;
    }
    p
}

// All-ones bytes in odd lanes, zero in even lanes.
const fn odd_lanes_mask(size: usize) -> [u8; 16] {
    let mut m = [0u8; 16];
    let mut i = 0;
    while i < 16 {
        if (i / size) % 2 == 1 {
            m[i] = 0xFF;
        }
        i += 1;
    }
    m
}

// Keep the low `keep` bytes, zero everything above them.
const fn zero_upper_pattern(keep: usize) -> [u8; 16] {
    let mut p = [0u8; 16];
    let mut i = 0;
    while i < 16 {
        p[i] = if i < keep { i as u8 } else { 16 };
        i += 1;
    }
    p
}

// Reverse lanes within groups of `group`, over the first `n` lanes.
const fn reverse_pattern(size: usize, n: usize, group: usize) -> [u8; 16] {
    let mut p = [0u8; 16];
    let mut out = 0;
    while out < n {
        let src_lane = (out / group) * group + (group - 1 - out % group);
        let mut b = 0;
        while b < size {
            p[out * size + b] = (src_lane * size + b) as u8;
            b += 1;
        }
        out += 1;
    }
    p
}

impl<T: Lane, const N: usize> Vec128<T, N> {
    /// For each byte of `idx`, pick that byte of `self`; indices `>= 16`
    /// yield zero. The result has the shape of the index vector.
    #[inline]
    pub fn table_lookup_bytes<I: Lane, const M: usize>(self, idx: Vec128<I, M>) -> Vec128<I, M> {
        Vec128::new(v128::i8x16_swizzle(self.raw, idx.raw))
    }

    /// Shift the whole register left by `K` bytes, filling with zero.
    #[inline]
    pub fn shift_left_bytes<const K: usize>(self) -> Self {
        const {
            assert!(K <= 16, "byte shift exceeds the register");
        }
        Self::new(v128::i8x16_shuffle(
            self.raw,
            V128::ZERO,
            const { shl_bytes_pattern(K) },
        ))
    }

    /// Shift the whole register right by `K` bytes, filling with zero.
    #[inline]
    pub fn shift_right_bytes<const K: usize>(self) -> Self {
        const {
            assert!(K <= 16, "byte shift exceeds the register");
        }
        Self::new(v128::i8x16_shuffle(
            self.raw,
            V128::ZERO,
            const { shr_bytes_pattern(K) },
        ))
    }

    /// [`Vec128::shift_left_bytes`] in units of whole lanes.
    #[inline]
    pub fn shift_left_lanes<const K: usize>(self) -> Self {
        const {
            assert!(K <= N, "lane shift exceeds the vector");
        }
        Self::new(v128::i8x16_shuffle(
            self.raw,
            V128::ZERO,
            const { shl_bytes_pattern(K * T::SIZE) },
        ))
    }

    /// [`Vec128::shift_right_bytes`] in units of whole lanes.
    #[inline]
    pub fn shift_right_lanes<const K: usize>(self) -> Self {
        const {
            assert!(K <= N, "lane shift exceeds the vector");
        }
        Self::new(v128::i8x16_shuffle(
            self.raw,
            V128::ZERO,
            const { shr_bytes_pattern(K * T::SIZE) },
        ))
    }

    /// Replicate lane `LANE` into every lane.
    #[inline]
    pub fn broadcast<const LANE: usize>(self) -> Self {
        const {
            assert!(LANE < N, "broadcast source lane out of range");
        }
        Self::new(v128::i8x16_shuffle(
            self.raw,
            self.raw,
            const { broadcast_pattern(LANE, T::SIZE) },
        ))
    }

    /// Alternate the lanes of the lower halves: `a0 b0 a1 b1 ...`.
    #[inline]
    pub fn interleave_lower(self, rhs: Self) -> Self {
        Self::new(v128::i8x16_shuffle(
            self.raw,
            rhs.raw,
            const { interleave_pattern(T::SIZE, 0) },
        ))
    }

    /// Alternate the lanes of the upper halves of the `N` logical lanes.
    #[inline]
    pub fn interleave_upper(self, rhs: Self) -> Self {
        const {
            assert!(N >= 2, "interleave_upper needs at least two lanes");
        }
        Self::new(v128::i8x16_shuffle(
            self.raw,
            rhs.raw,
            const { interleave_pattern(T::SIZE, N / 2) },
        ))
    }

    /// Odd lanes from `self`, even lanes from `rhs`.
    #[inline]
    pub fn odd_even(self, rhs: Self) -> Self {
        let mask = V128::from_bytes(const { odd_lanes_mask(T::SIZE) });
        Self::new(v128::v128_bitselect(self.raw, rhs.raw, mask))
    }

    /// Replicate the even lane of each adjacent pair into both positions.
    #[inline]
    pub fn dup_even(self) -> Self {
        Self::new(v128::i8x16_shuffle(
            self.raw,
            self.raw,
            const { dup_pattern(T::SIZE, false) },
        ))
    }

    /// Replicate the odd lane of each adjacent pair into both positions.
    #[inline]
    pub fn dup_odd(self) -> Self {
        Self::new(v128::i8x16_shuffle(
            self.raw,
            self.raw,
            const { dup_pattern(T::SIZE, true) },
        ))
    }

    /// [`Vec128::table_lookup_bytes`] where index bytes with the high bit
    /// set select zero. The swizzle already zeroes every index `>= 16`, so
    /// the two share one implementation.
    #[inline]
    pub fn table_lookup_bytes_or0<I: Lane, const M: usize>(
        self,
        idx: Vec128<I, M>,
    ) -> Vec128<I, M> {
        self.table_lookup_bytes(idx)
    }

    /// Gather whole lanes through a prebuilt byte permutation.
    #[inline]
    pub fn table_lookup_lanes(self, idx: Indices128<T, N>) -> Self {
        Self::new(v128::i8x16_swizzle(self.raw, idx.raw))
    }
}

impl<T: Lane, const N: usize> Desc<T, N> {
    /// Bytes `[K, K + 16)` of the 256-bit concatenation `hi:lo`.
    #[inline]
    pub fn combine_shift_right_bytes<const K: usize>(
        self,
        hi: Vec128<T, N>,
        lo: Vec128<T, N>,
    ) -> Vec128<T, N> {
        const {
            assert!(K < 16, "funnel shift count must be below 16 bytes");
        }
        Vec128::new(v128::i8x16_shuffle(
            lo.raw,
            hi.raw,
            const { combine_shr_pattern(K) },
        ))
    }

    /// Lower half of `lo`, then lower half of `hi`.
    #[inline]
    pub fn concat_lower_lower(self, hi: Vec128<T, N>, lo: Vec128<T, N>) -> Vec128<T, N> {
        Vec128::new(v128::i8x16_shuffle(
            lo.raw,
            hi.raw,
            const { concat_pattern(N * T::SIZE / 2, false, false) },
        ))
    }

    /// Upper half of `lo`, then upper half of `hi`.
    #[inline]
    pub fn concat_upper_upper(self, hi: Vec128<T, N>, lo: Vec128<T, N>) -> Vec128<T, N> {
        Vec128::new(v128::i8x16_shuffle(
            lo.raw,
            hi.raw,
            const { concat_pattern(N * T::SIZE / 2, true, true) },
        ))
    }

    /// Upper half of `lo`, then lower half of `hi` (the inner halves).
    #[inline]
    pub fn concat_lower_upper(self, hi: Vec128<T, N>, lo: Vec128<T, N>) -> Vec128<T, N> {
        Vec128::new(v128::i8x16_shuffle(
            lo.raw,
            hi.raw,
            const { concat_pattern(N * T::SIZE / 2, true, false) },
        ))
    }

    /// Lower half of `lo`, then upper half of `hi` (the outer halves).
    #[inline]
    pub fn concat_upper_lower(self, hi: Vec128<T, N>, lo: Vec128<T, N>) -> Vec128<T, N> {
        Vec128::new(v128::i8x16_shuffle(
            lo.raw,
            hi.raw,
            const { concat_pattern(N * T::SIZE / 2, false, true) },
        ))
    }

    /// Even-indexed lanes of `lo`, then even-indexed lanes of `hi`.
    #[inline]
    pub fn concat_even(self, hi: Vec128<T, N>, lo: Vec128<T, N>) -> Vec128<T, N> {
        const {
            assert!(N >= 2, "concat_even needs at least two lanes");
        }
        Vec128::new(v128::i8x16_shuffle(
            lo.raw,
            hi.raw,
            const { concat_half_lanes_pattern(T::SIZE, N, false) },
        ))
    }

    /// Odd-indexed lanes of `lo`, then odd-indexed lanes of `hi`.
    #[inline]
    pub fn concat_odd(self, hi: Vec128<T, N>, lo: Vec128<T, N>) -> Vec128<T, N> {
        const {
            assert!(N >= 2, "concat_odd needs at least two lanes");
        }
        Vec128::new(v128::i8x16_shuffle(
            lo.raw,
            hi.raw,
            const { concat_half_lanes_pattern(T::SIZE, N, true) },
        ))
    }

    /// Reverse all `N` logical lanes.
    #[inline]
    pub fn reverse(self, v: Vec128<T, N>) -> Vec128<T, N> {
        Vec128::new(v128::i8x16_shuffle(
            v.raw,
            v.raw,
            const { reverse_pattern(T::SIZE, N, N) },
        ))
    }

    /// Swap the lanes of each adjacent pair.
    #[inline]
    pub fn reverse2(self, v: Vec128<T, N>) -> Vec128<T, N> {
        if N < 2 {
            panic!("reverse2 requires at least two lanes");
        }
        Vec128::new(v128::i8x16_shuffle(
            v.raw,
            v.raw,
            const { reverse_pattern(T::SIZE, N, 2) },
        ))
    }

    /// Reverse lanes within each group of four.
    #[inline]
    pub fn reverse4(self, v: Vec128<T, N>) -> Vec128<T, N> {
        if T::SIZE == 8 || N < 4 {
            panic!("reverse4 requires groups of four lanes");
        }
        Vec128::new(v128::i8x16_shuffle(
            v.raw,
            v.raw,
            const { reverse_pattern(T::SIZE, N, 4) },
        ))
    }

    /// Reverse lanes within each group of eight.
    #[inline]
    pub fn reverse8(self, v: Vec128<T, N>) -> Vec128<T, N> {
        if T::SIZE > 2 || N < 8 {
            panic!("reverse8 requires groups of eight lanes");
        }
        Vec128::new(v128::i8x16_shuffle(
            v.raw,
            v.raw,
            const { reverse_pattern(T::SIZE, N, 8) },
        ))
    }

    /// Interleave the lower-half lanes of `a` and `b` and view each
    /// resulting pair as one lane of the doubled width.
    #[inline]
    pub fn zip_lower<F: Lane, const M: usize>(
        self,
        a: Vec128<F, M>,
        b: Vec128<F, M>,
    ) -> Vec128<T, N> {
        const {
            assert!(T::SIZE == 2 * F::SIZE, "zip doubles the lane width");
            assert!(M == 2 * N, "zip halves the lane count");
        }
        Vec128::new(a.interleave_lower(b).raw)
    }

    /// As [`Desc::zip_lower`] for the upper-half lanes.
    #[inline]
    pub fn zip_upper<F: Lane, const M: usize>(
        self,
        a: Vec128<F, M>,
        b: Vec128<F, M>,
    ) -> Vec128<T, N> {
        const {
            assert!(T::SIZE == 2 * F::SIZE, "zip doubles the lane width");
            assert!(M == 2 * N, "zip halves the lane count");
        }
        Vec128::new(a.interleave_upper(b).raw)
    }

    /// The low `N` lanes of a vector twice as long. The register is
    /// unchanged; only the logical lane count shrinks.
    #[inline]
    pub fn lower_half<const M: usize>(self, v: Vec128<T, M>) -> Vec128<T, N> {
        const {
            assert!(M == 2 * N, "lower_half halves the lane count");
        }
        Vec128::new(v.raw)
    }

    /// The high `N` lanes of a vector twice as long, moved to the bottom.
    #[inline]
    pub fn upper_half<const M: usize>(self, v: Vec128<T, M>) -> Vec128<T, N> {
        const {
            assert!(M == 2 * N, "upper_half halves the lane count");
        }
        Vec128::new(v128::i8x16_shuffle(
            v.raw,
            V128::ZERO,
            const { shr_bytes_pattern(N * T::SIZE) },
        ))
    }

    /// Concatenate two half-length vectors: lanes of `lo`, then lanes of
    /// `hi`.
    #[inline]
    pub fn combine<const M: usize>(self, hi: Vec128<T, M>, lo: Vec128<T, M>) -> Vec128<T, N> {
        const {
            assert!(N == 2 * M, "combine doubles the lane count");
        }
        Vec128::new(v128::i8x16_shuffle(
            lo.raw,
            hi.raw,
            const { concat_pattern(M * T::SIZE, false, false) },
        ))
    }

    /// Widen a half-length vector: its lanes at the bottom, zero above.
    #[inline]
    pub fn zero_extend_vector<const M: usize>(self, lo: Vec128<T, M>) -> Vec128<T, N> {
        const {
            assert!(N == 2 * M, "zero_extend_vector doubles the lane count");
        }
        Vec128::new(v128::i8x16_shuffle(
            lo.raw,
            V128::ZERO,
            const { zero_upper_pattern(M * T::SIZE) },
        ))
    }

    /// Expand a vector of lane indices into the byte permutation used by
    /// [`Vec128::table_lookup_lanes`]. Indices must lie in `[0, N)`;
    /// checked in debug builds only.
    #[inline]
    pub fn indices_from_vec<I: Lane>(self, v: Vec128<I, N>) -> Indices128<T, N> {
        const {
            assert!(I::SIZE == T::SIZE, "index lanes must match data lanes in size");
        }
        let src = v.raw.to_bytes();
        let mut bytes = [0u8; 16];
        for i in 0..N {
            let mut lane = 0u64;
            for b in 0..T::SIZE {
                lane |= (src[i * T::SIZE + b] as u64) << (8 * b);
            }
            debug_assert!((lane as usize) < N, "lane index out of range");
            for b in 0..T::SIZE {
                bytes[i * T::SIZE + b] = (lane as usize * T::SIZE + b) as u8;
            }
        }
        Indices128::new(V128::from_bytes(bytes))
    }
}

#[cfg(test)]
mod tests {
    use crate::vec::{Desc, Vec128};

    #[test]
    fn test_table_lookup_bytes_zero_fills() {
        let v = Vec128::<u8, 16>::from_array(std::array::from_fn(|i| 10 + i as u8));
        let idx = Vec128::<u8, 16>::from_array([15, 0, 1, 200, 16, 31, 7, 7, 0, 0, 0, 0, 0, 0, 0, 0]);
        let out = v.table_lookup_bytes(idx);
        assert_eq!(out.to_array()[..8], [25, 10, 11, 0, 0, 0, 17, 17]);
    }

    #[test]
    fn test_byte_shifts() {
        let v = Vec128::<u8, 16>::from_array(std::array::from_fn(|i| 1 + i as u8));
        assert_eq!(v.shift_left_bytes::<2>().to_array()[..4], [0, 0, 1, 2]);
        assert_eq!(v.shift_right_bytes::<14>().to_array(), {
            let mut a = [0u8; 16];
            a[0] = 15;
            a[1] = 16;
            a
        });
        let v = Vec128::<u32, 4>::from_array([1, 2, 3, 4]);
        assert_eq!(v.shift_left_lanes::<1>().to_array(), [0, 1, 2, 3]);
        assert_eq!(v.shift_right_lanes::<2>().to_array()[..2], [3, 4]);
    }

    #[test]
    fn test_combine_shift_right_bytes() {
        let d = Desc::<u8, 16>::new();
        let lo = Vec128::<u8, 16>::from_array(std::array::from_fn(|i| i as u8));
        let hi = Vec128::<u8, 16>::from_array(std::array::from_fn(|i| 100 + i as u8));
        let out = d.combine_shift_right_bytes::<4>(hi, lo);
        assert_eq!(out.to_array()[..4], [4, 5, 6, 7]);
        assert_eq!(out.to_array()[12..], [100, 101, 102, 103]);
    }

    #[test]
    fn test_broadcast() {
        let v = Vec128::<i32, 4>::from_array([7, 8, 9, 10]);
        assert_eq!(v.broadcast::<2>().to_array(), [9; 4]);
        let v = Vec128::<u16, 8>::from_array([1, 2, 3, 4, 5, 6, 7, 8]);
        assert_eq!(v.broadcast::<7>().to_array(), [8; 8]);
    }

    #[test]
    fn test_interleave() {
        let a = Vec128::<u32, 4>::from_array([0, 1, 2, 3]);
        let b = Vec128::<u32, 4>::from_array([10, 11, 12, 13]);
        assert_eq!(a.interleave_lower(b).to_array(), [0, 10, 1, 11]);
        assert_eq!(a.interleave_upper(b).to_array(), [2, 12, 3, 13]);
        // Partial vector: upper half of the two logical lanes.
        let a = Vec128::<u32, 2>::from_array([0, 1]);
        let b = Vec128::<u32, 2>::from_array([10, 11]);
        assert_eq!(a.interleave_upper(b).to_array(), [1, 11]);
    }

    #[test]
    fn test_concat_halves() {
        let d = Desc::<u32, 4>::new();
        let lo = Vec128::from_array([0, 1, 2, 3]);
        let hi = Vec128::from_array([10, 11, 12, 13]);
        assert_eq!(d.concat_lower_lower(hi, lo).to_array(), [0, 1, 10, 11]);
        assert_eq!(d.concat_upper_upper(hi, lo).to_array(), [2, 3, 12, 13]);
        assert_eq!(d.concat_lower_upper(hi, lo).to_array(), [2, 3, 10, 11]);
        assert_eq!(d.concat_upper_lower(hi, lo).to_array(), [0, 1, 12, 13]);
    }

    #[test]
    fn test_concat_even_odd() {
        let d = Desc::<u16, 8>::new();
        let lo = Vec128::from_array([0, 1, 2, 3, 4, 5, 6, 7]);
        let hi = Vec128::from_array([10, 11, 12, 13, 14, 15, 16, 17]);
        assert_eq!(
            d.concat_even(hi, lo).to_array(),
            [0, 2, 4, 6, 10, 12, 14, 16]
        );
        assert_eq!(
            d.concat_odd(hi, lo).to_array(),
            [1, 3, 5, 7, 11, 13, 15, 17]
        );
    }

    #[test]
    fn test_dup_and_odd_even() {
        let v = Vec128::<u32, 4>::from_array([0, 1, 2, 3]);
        assert_eq!(v.dup_even().to_array(), [0, 0, 2, 2]);
        assert_eq!(v.dup_odd().to_array(), [1, 1, 3, 3]);
        let a = Vec128::<u32, 4>::from_array([100, 101, 102, 103]);
        assert_eq!(a.odd_even(v).to_array(), [0, 101, 2, 103]);
    }

    #[test]
    fn test_reverse_family() {
        let d = Desc::<u16, 8>::new();
        let v = Vec128::from_array([0, 1, 2, 3, 4, 5, 6, 7]);
        assert_eq!(d.reverse(v).to_array(), [7, 6, 5, 4, 3, 2, 1, 0]);
        assert_eq!(d.reverse2(v).to_array(), [1, 0, 3, 2, 5, 4, 7, 6]);
        assert_eq!(d.reverse4(v).to_array(), [3, 2, 1, 0, 7, 6, 5, 4]);
        assert_eq!(d.reverse8(v).to_array(), [7, 6, 5, 4, 3, 2, 1, 0]);
        // Partial vector reversal only touches the logical lanes.
        let d = Desc::<u32, 2>::new();
        let v = Vec128::from_array([5, 6]);
        assert_eq!(d.reverse(v).to_array(), [6, 5]);
    }

    #[test]
    #[should_panic]
    fn test_reverse8_rejects_wide_lanes() {
        let d = Desc::<u32, 4>::new();
        let _ = d.reverse8(Vec128::from_array([0, 1, 2, 3]));
    }

    #[test]
    #[should_panic]
    fn test_reverse4_rejects_u64() {
        let d = Desc::<u64, 2>::new();
        let _ = d.reverse4(Vec128::from_array([0, 1]));
    }

    #[test]
    fn test_zip() {
        let d = Desc::<u16, 8>::new();
        let a = Vec128::<u8, 16>::from_array(std::array::from_fn(|i| i as u8));
        let b = Vec128::<u8, 16>::from_array(std::array::from_fn(|i| 0x10 + i as u8));
        assert_eq!(
            d.zip_lower(a, b).to_array(),
            [0x1000, 0x1101, 0x1202, 0x1303, 0x1404, 0x1505, 0x1606, 0x1707]
        );
        assert_eq!(d.zip_upper(a, b).to_array()[0], 0x1808);
    }

    #[test]
    fn test_halves_and_combine() {
        let d4 = Desc::<u32, 4>::new();
        let d2 = Desc::<u32, 2>::new();
        let v = Vec128::<u32, 4>::from_array([1, 2, 3, 4]);
        let lo = d2.lower_half(v);
        let hi = d2.upper_half(v);
        assert_eq!(lo.to_array(), [1, 2]);
        assert_eq!(hi.to_array(), [3, 4]);
        assert_eq!(d4.combine(hi, lo).to_array(), [1, 2, 3, 4]);
        assert_eq!(d4.combine(lo, hi).to_array(), [3, 4, 1, 2]);
        // lower_half leaves the source bytes above lane 1 in place;
        // zero_extend_vector must clear them.
        assert_eq!(d4.zero_extend_vector(lo).to_array(), [1, 2, 0, 0]);
    }

    #[test]
    fn test_table_lookup_lanes() {
        let d = Desc::<u32, 4>::new();
        let v = Vec128::from_array([40, 41, 42, 43]);
        let idx = d.indices_from_vec(Vec128::<u32, 4>::from_array([3, 0, 0, 2]));
        assert_eq!(v.table_lookup_lanes(idx).to_array(), [43, 40, 40, 42]);
    }
}
