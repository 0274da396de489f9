//! Mask algebra, selection and mask <-> bits conversion.
//!
//! Counting and bit-extraction must neutralize the undefined lanes of
//! partial masks before applying full-width primitives, otherwise garbage
//! beyond lane `N - 1` leaks into the result. Every function here that
//! produces bits masks them down to the low `N` accordingly.

use std::ops::{BitAnd, BitOr, BitXor, Not};

use crate::arch::v128::{self, V128};
use crate::lane::Lane;
use crate::vec::{Desc, Mask128, Vec128};

impl<T: Lane, const N: usize> Not for Mask128<T, N> {
    type Output = Self;

    #[inline]
    fn not(self) -> Self {
        Self::new(v128::v128_not(self.raw))
    }
}

impl<T: Lane, const N: usize> BitAnd for Mask128<T, N> {
    type Output = Self;

    #[inline]
    fn bitand(self, rhs: Self) -> Self {
        Self::new(v128::v128_and(self.raw, rhs.raw))
    }
}

impl<T: Lane, const N: usize> BitOr for Mask128<T, N> {
    type Output = Self;

    #[inline]
    fn bitor(self, rhs: Self) -> Self {
        Self::new(v128::v128_or(self.raw, rhs.raw))
    }
}

impl<T: Lane, const N: usize> BitXor for Mask128<T, N> {
    type Output = Self;

    #[inline]
    fn bitxor(self, rhs: Self) -> Self {
        Self::new(v128::v128_xor(self.raw, rhs.raw))
    }
}

impl<T: Lane, const N: usize> Mask128<T, N> {
    /// `self & !rhs`.
    #[inline]
    pub fn and_not(self, rhs: Self) -> Self {
        Self::new(v128::v128_andnot(self.raw, rhs.raw))
    }

    /// `!(self | rhs)`: true only where both masks are false.
    #[inline]
    pub fn exclusive_neither(self, rhs: Self) -> Self {
        Self::new(v128::v128_not(v128::v128_or(self.raw, rhs.raw)))
    }

    /// Lanes of `yes` where true, lanes of `no` where false.
    #[inline]
    pub fn if_then_else(self, yes: Vec128<T, N>, no: Vec128<T, N>) -> Vec128<T, N> {
        Vec128::new(v128::v128_bitselect(yes.raw, no.raw, self.raw))
    }

    /// Lanes of `yes` where true, zero where false.
    #[inline]
    pub fn if_then_else_zero(self, yes: Vec128<T, N>) -> Vec128<T, N> {
        Vec128::new(v128::v128_and(yes.raw, self.raw))
    }

    /// Zero where true, lanes of `no` where false.
    #[inline]
    pub fn if_then_zero_else(self, no: Vec128<T, N>) -> Vec128<T, N> {
        Vec128::new(v128::v128_andnot(no.raw, self.raw))
    }

    /// Pack the logical lanes into an integer: bit `i` is lane `i`.
    ///
    /// Bits at index `N` and above are zero.
    #[inline]
    pub fn to_bits(self) -> u64 {
        let bits = match T::SIZE {
            1 => bits_from_byte_lanes(self.raw, N),
            2 => {
                // Collapse each 16-bit lane to one byte, then gather as for
                // byte lanes.
                let narrowed = v128::i8x16_narrow_i16x8(self.raw, V128::ZERO);
                bits_from_byte_lanes(narrowed, N)
            }
            4 => {
                let lanes = self.raw.lanes::<u32, 4>();
                let mut bits = 0u64;
                for i in 0..4 {
                    bits |= lanes[i] as u64 & (1 << i);
                }
                bits
            }
            8 => {
                let lanes = self.raw.lanes::<u64, 2>();
                (lanes[0] & 1) | (lanes[1] & 2)
            }
            _ => unreachable!(),
        };
        if N * T::SIZE == 16 {
            bits
        } else {
            bits & ((1 << N) - 1)
        }
    }

    /// Number of true logical lanes.
    #[inline]
    pub fn count_true(self) -> usize {
        self.to_bits().count_ones() as usize
    }

    /// True if every logical lane is true.
    #[inline]
    pub fn all_true(self) -> bool {
        self.to_bits() == (1 << N) - 1
    }

    /// True if every logical lane is false.
    #[inline]
    pub fn all_false(self) -> bool {
        self.to_bits() == 0
    }

    /// Index of the first true lane, if any.
    #[inline]
    pub fn find_first_true(self) -> Option<usize> {
        let bits = self.to_bits();
        if bits == 0 {
            None
        } else {
            Some(bits.trailing_zeros() as usize)
        }
    }

    /// Index of the first true lane of a mask known to have one.
    /// Checked in debug builds only.
    #[inline]
    pub fn find_known_first_true(self) -> usize {
        let bits = self.to_bits();
        debug_assert!(bits != 0);
        bits.trailing_zeros() as usize
    }
}

// Gather the top bit of each of the low `n` bytes into bits 0..n. The
// multiply walks a doubling pattern so byte i lands in output bit i; it is
// only correct for 0x00/0xFF bytes, hence the pre-mask of undefined bytes.
fn bits_from_byte_lanes(v: V128, n: usize) -> u64 {
    const MAGIC: u64 = 0x103070F1F3F80;
    let lanes = v.lanes::<u64, 2>();
    let mut lo = lanes[0];
    if n < 8 {
        lo &= (1 << (n * 8)) - 1;
    }
    let mut bits = lo.wrapping_mul(MAGIC) >> 56;
    if n == 16 {
        bits |= (lanes[1].wrapping_mul(MAGIC) >> 48) & 0xFF00;
    }
    bits
}

// Byte indices replicating bit-integer byte 0 to lanes 0..8 and byte 1 to
// lanes 8..16.
const REP8: [u8; 16] = [0, 0, 0, 0, 0, 0, 0, 0, 1, 1, 1, 1, 1, 1, 1, 1];

impl<T: Lane, const N: usize> Desc<T, N> {
    /// Rebuild a mask from packed bits: lane `i` is true iff bit `i` is
    /// set. Inverse of [`Mask128::to_bits`]. Bits at index `N` and above
    /// are ignored.
    #[inline]
    pub fn load_mask_bits(self, bits: &[u8]) -> Mask128<T, N> {
        let mut value = 0u64;
        for (i, &b) in bits[..N.div_ceil(8)].iter().enumerate() {
            value |= (b as u64) << (8 * i);
        }
        self.mask_from_bits(value)
    }

    /// As [`Desc::load_mask_bits`] but from an integer.
    #[inline]
    pub fn mask_from_bits(self, bits: u64) -> Mask128<T, N> {
        let raw = match T::SIZE {
            1 => {
                // Spread the two bit-bytes across the register, then test
                // each lane's designated bit.
                let spread = v128::i8x16_swizzle(
                    v128::splat::<u16>(bits as u16),
                    V128::from_bytes(REP8),
                );
                let bit = V128::from_lanes::<u8, 16>([
                    1, 2, 4, 8, 16, 32, 64, 128, 1, 2, 4, 8, 16, 32, 64, 128,
                ]);
                v128::i8x16_eq(v128::v128_and(spread, bit), bit)
            }
            2 => {
                let spread = v128::splat::<u16>(bits as u16);
                let bit = V128::from_lanes::<u16, 8>([1, 2, 4, 8, 16, 32, 64, 128]);
                v128::i16x8_eq(v128::v128_and(spread, bit), bit)
            }
            4 => {
                let spread = v128::splat::<u32>(bits as u32);
                let bit = V128::from_lanes::<u32, 4>([1, 2, 4, 8]);
                v128::i32x4_eq(v128::v128_and(spread, bit), bit)
            }
            8 => {
                let spread = v128::splat::<u64>(bits);
                let bit = V128::from_lanes::<u64, 2>([1, 2]);
                v128::i64x2_eq(v128::v128_and(spread, bit), bit)
            }
            _ => unreachable!(),
        };
        Mask128::new(raw)
    }

    /// Write the packed bits of `m` to `out` and return the number of
    /// bytes written, `ceil(N / 8)`.
    #[inline]
    pub fn store_mask_bits(self, m: Mask128<T, N>, out: &mut [u8]) -> usize {
        let bits = m.to_bits();
        let bytes = N.div_ceil(8);
        for i in 0..bytes {
            out[i] = (bits >> (8 * i)) as u8;
        }
        bytes
    }

    /// Mask with lanes `[0, n)` true and the rest false. `n` past the lane
    /// count saturates.
    #[inline]
    pub fn first_n(self, n: usize) -> Mask128<T, N> {
        let mut bytes = [0u8; 16];
        let true_bytes = n.min(N) * T::SIZE;
        for b in &mut bytes[..true_bytes] {
            *b = 0xFF;
        }
        Mask128::new(V128::from_bytes(bytes))
    }
}

macro_rules! impl_if_negative {
    ($t:ty, $shr_s:path, $lane_bits:expr) => {
        impl<const N: usize> Vec128<$t, N> {
            /// Lanes of `yes` where the sign bit of `self` is set
            /// (including `-0.0` for floats), lanes of `no` otherwise.
            #[inline]
            pub fn if_negative_then_else(self, yes: Self, no: Self) -> Self {
                let sign_fill = $shr_s(self.raw, $lane_bits - 1);
                Vec128::new(v128::v128_bitselect(yes.raw, no.raw, sign_fill))
            }
        }
    };
}

impl_if_negative!(i16, v128::i16x8_shr_s, 16);
impl_if_negative!(i32, v128::i32x4_shr_s, 32);
impl_if_negative!(i64, v128::i64x2_shr_s, 64);
impl_if_negative!(f32, v128::i32x4_shr_s, 32);
impl_if_negative!(f64, v128::i64x2_shr_s, 64);

impl<const N: usize> Vec128<i8, N> {
    /// Lanes of `yes` where `self` is negative, lanes of `no` otherwise.
    #[inline]
    pub fn if_negative_then_else(self, yes: Self, no: Self) -> Self {
        // No 8-bit arithmetic shift; a signed compare against zero produces
        // the sign fill.
        let sign_fill = v128::i8x16_lt_s(self.raw, V128::ZERO);
        Vec128::new(v128::v128_bitselect(yes.raw, no.raw, sign_fill))
    }
}

/// Bit-level select: bits of `yes` where the corresponding bit of `mask`
/// is set, bits of `no` elsewhere. Unlike [`Mask128::if_then_else`] the
/// mask is an arbitrary vector, not restricted to all-ones/all-zeros lanes.
#[inline]
pub fn if_vec_then_else<T: Lane, const N: usize>(
    mask: Vec128<T, N>,
    yes: Vec128<T, N>,
    no: Vec128<T, N>,
) -> Vec128<T, N> {
    Vec128::new(v128::v128_bitselect(yes.raw, no.raw, mask.raw))
}

#[cfg(test)]
mod tests {
    use crate::arch::v128::V128;
    use crate::vec::{Desc, Mask128, Vec128};

    fn mask_from_bools<T: crate::Lane, const N: usize>(bools: [bool; N]) -> Mask128<T, N> {
        Mask128::from_array(bools)
    }

    #[test]
    fn test_to_bits_all_widths() {
        let m = mask_from_bools::<u8, 16>(std::array::from_fn(|i| i % 3 == 0));
        assert_eq!(m.to_bits(), 0b1001_0010_0100_1001);
        let m = mask_from_bools::<u16, 8>([true, false, false, true, true, false, false, true]);
        assert_eq!(m.to_bits(), 0b1001_1001);
        let m = mask_from_bools::<u32, 4>([false, true, true, false]);
        assert_eq!(m.to_bits(), 0b0110);
        let m = mask_from_bools::<u64, 2>([false, true]);
        assert_eq!(m.to_bits(), 0b10);
    }

    #[test]
    fn test_bits_ignore_undefined_lanes() {
        // Poison the bytes beyond the logical lanes; counts must not move.
        let poisoned = Mask128::<u8, 4>::new(V128::from_bytes([
            0xFF, 0, 0xFF, 0, 0xAB, 0xCD, 0x5A, 0xFF, 0xFF, 0xFF, 1, 2, 3, 4, 5, 6,
        ]));
        assert_eq!(poisoned.to_bits(), 0b0101);
        assert_eq!(poisoned.count_true(), 2);
        assert!(!poisoned.all_true());
        assert!(!poisoned.all_false());

        let poisoned = Mask128::<u32, 2>::new(V128::from_bytes([
            0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0x12, 0x34, 0x56, 0x78, 0xFF, 0xFF,
            0xFF, 0xFF,
        ]));
        assert_eq!(poisoned.to_bits(), 0b11);
        assert!(poisoned.all_true());
    }

    #[test]
    fn test_mask_bits_round_trip() {
        let d = Desc::<i16, 8>::new();
        let m = mask_from_bools::<i16, 8>([true, true, false, false, true, false, true, true]);
        let mut buf = [0u8; 2];
        assert_eq!(d.store_mask_bits(m, &mut buf), 1);
        let back = d.load_mask_bits(&buf);
        assert_eq!(back.to_array(), m.to_array());

        let d = Desc::<u8, 16>::new();
        let m = mask_from_bools::<u8, 16>(std::array::from_fn(|i| i % 2 == 1));
        let mut buf = [0u8; 2];
        assert_eq!(d.store_mask_bits(m, &mut buf), 2);
        assert_eq!(buf, [0xAA, 0xAA]);
        assert_eq!(d.load_mask_bits(&buf).to_array(), m.to_array());
    }

    #[test]
    fn test_first_n() {
        let d = Desc::<i32, 4>::new();
        assert_eq!(d.first_n(0).to_array(), [false; 4]);
        assert_eq!(d.first_n(2).to_array(), [true, true, false, false]);
        assert_eq!(d.first_n(9).to_array(), [true; 4]);
    }

    #[test]
    fn test_find_first_true() {
        let m = mask_from_bools::<i32, 4>([false, false, true, true]);
        assert_eq!(m.find_first_true(), Some(2));
        assert_eq!(m.find_known_first_true(), 2);
        let none = mask_from_bools::<i32, 4>([false; 4]);
        assert_eq!(none.find_first_true(), None);
    }

    #[test]
    fn test_if_then_else() {
        let m = mask_from_bools::<i32, 4>([true, false, true, false]);
        let yes = Vec128::from_array([1, 2, 3, 4]);
        let no = Vec128::from_array([-1, -2, -3, -4]);
        assert_eq!(m.if_then_else(yes, no).to_array(), [1, -2, 3, -4]);
        assert_eq!(m.if_then_else_zero(yes).to_array(), [1, 0, 3, 0]);
        assert_eq!(m.if_then_zero_else(no).to_array(), [0, -2, 0, -4]);
    }

    #[test]
    fn test_if_negative_then_else() {
        let v = Vec128::<i32, 4>::from_array([-5, 0, 7, i32::MIN]);
        let yes = Vec128::from_array([1, 2, 3, 4]);
        let no = Vec128::from_array([-1, -2, -3, -4]);
        assert_eq!(v.if_negative_then_else(yes, no).to_array(), [1, -2, -3, 4]);

        // Sign bit alone decides, so -0.0 counts as negative.
        let v = Vec128::<f32, 4>::from_array([-0.0, 0.0, -1.5, 2.0]);
        let yes = Vec128::from_array([1.0; 4]);
        let no = Vec128::from_array([9.0; 4]);
        assert_eq!(
            v.if_negative_then_else(yes, no).to_array(),
            [1.0, 9.0, 1.0, 9.0]
        );

        let v = Vec128::<i8, 16>::from_array(std::array::from_fn(|i| i as i8 - 8));
        let yes = Vec128::from_array([1i8; 16]);
        let no = Vec128::from_array([0i8; 16]);
        let out = v.if_negative_then_else(yes, no).to_array();
        assert_eq!(out, std::array::from_fn(|i| (i < 8) as i8));
    }

    #[test]
    fn test_mask_logic() {
        let a = mask_from_bools::<u8, 16>(std::array::from_fn(|i| i < 8));
        let b = mask_from_bools::<u8, 16>(std::array::from_fn(|i| i % 2 == 0));
        assert_eq!((a & b).count_true(), 4);
        assert_eq!((a | b).count_true(), 12);
        assert_eq!((a ^ b).count_true(), 8);
        assert_eq!(a.and_not(b).count_true(), 4);
        assert_eq!((!a).count_true(), 8);
        assert_eq!(a.exclusive_neither(b).count_true(), 4);
    }
}
