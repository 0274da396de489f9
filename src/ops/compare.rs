//! Lane-wise comparisons.
//!
//! Every comparison yields a [`Mask128`] whose lanes are all-ones or
//! all-zeros. The target has no unsigned 64-bit ordering, so it is
//! synthesized from two 32-bit comparisons with a high-word tie-break.

use crate::arch::v128::{self, V128};
use crate::vec::{Mask128, Vec128};

macro_rules! impl_cmp {
    ($t:ty, $eq:path, $ne:path, $lt:path, $gt:path, $le:path, $ge:path) => {
        impl<const N: usize> Vec128<$t, N> {
            #[inline]
            pub fn eq(self, rhs: Self) -> Mask128<$t, N> {
                Mask128::new($eq(self.raw, rhs.raw))
            }

            #[inline]
            pub fn ne(self, rhs: Self) -> Mask128<$t, N> {
                Mask128::new($ne(self.raw, rhs.raw))
            }

            #[inline]
            pub fn lt(self, rhs: Self) -> Mask128<$t, N> {
                Mask128::new($lt(self.raw, rhs.raw))
            }

            #[inline]
            pub fn gt(self, rhs: Self) -> Mask128<$t, N> {
                Mask128::new($gt(self.raw, rhs.raw))
            }

            #[inline]
            pub fn le(self, rhs: Self) -> Mask128<$t, N> {
                Mask128::new($le(self.raw, rhs.raw))
            }

            #[inline]
            pub fn ge(self, rhs: Self) -> Mask128<$t, N> {
                Mask128::new($ge(self.raw, rhs.raw))
            }
        }
    };
}

impl_cmp!(
    u8,
    v128::i8x16_eq,
    v128::i8x16_ne,
    v128::u8x16_lt_u,
    v128::u8x16_gt_u,
    v128::u8x16_le_u,
    v128::u8x16_ge_u
);
impl_cmp!(
    i8,
    v128::i8x16_eq,
    v128::i8x16_ne,
    v128::i8x16_lt_s,
    v128::i8x16_gt_s,
    v128::i8x16_le_s,
    v128::i8x16_ge_s
);
impl_cmp!(
    u16,
    v128::i16x8_eq,
    v128::i16x8_ne,
    v128::u16x8_lt_u,
    v128::u16x8_gt_u,
    v128::u16x8_le_u,
    v128::u16x8_ge_u
);
impl_cmp!(
    i16,
    v128::i16x8_eq,
    v128::i16x8_ne,
    v128::i16x8_lt_s,
    v128::i16x8_gt_s,
    v128::i16x8_le_s,
    v128::i16x8_ge_s
);
impl_cmp!(
    u32,
    v128::i32x4_eq,
    v128::i32x4_ne,
    v128::u32x4_lt_u,
    v128::u32x4_gt_u,
    v128::u32x4_le_u,
    v128::u32x4_ge_u
);
impl_cmp!(
    i32,
    v128::i32x4_eq,
    v128::i32x4_ne,
    v128::i32x4_lt_s,
    v128::i32x4_gt_s,
    v128::i32x4_le_s,
    v128::i32x4_ge_s
);
impl_cmp!(
    i64,
    v128::i64x2_eq,
    v128::i64x2_ne,
    v128::i64x2_lt_s,
    v128::i64x2_gt_s,
    v128::i64x2_le_s,
    v128::i64x2_ge_s
);
impl_cmp!(
    f32,
    v128::f32x4_eq,
    v128::f32x4_ne,
    v128::f32x4_lt,
    v128::f32x4_gt,
    v128::f32x4_le,
    v128::f32x4_ge
);
impl_cmp!(
    f64,
    v128::f64x2_eq,
    v128::f64x2_ne,
    v128::f64x2_lt,
    v128::f64x2_gt,
    v128::f64x2_le,
    v128::f64x2_ge
);

// Replicate the even (low) or odd (high) 32-bit word of each 64-bit half
// into both word positions.
const DUP_EVEN_32: [u8; 16] = [0, 1, 2, 3, 0, 1, 2, 3, 8, 9, 10, 11, 8, 9, 10, 11];
const DUP_ODD_32: [u8; 16] = [4, 5, 6, 7, 4, 5, 6, 7, 12, 13, 14, 15, 12, 13, 14, 15];

// Unsigned 64-bit a < b from 32-bit compares: the high words decide unless
// they are equal, in which case the low words do.
#[inline]
fn lt_u64(a: V128, b: V128) -> V128 {
    let lt_words = v128::u32x4_lt_u(a, b);
    let eq_words = v128::i32x4_eq(a, b);
    let lt_low = v128::i8x16_shuffle(lt_words, lt_words, DUP_EVEN_32);
    let decided = v128::v128_bitselect(lt_low, lt_words, eq_words);
    v128::i8x16_shuffle(decided, decided, DUP_ODD_32)
}

impl<const N: usize> Vec128<u64, N> {
    #[inline]
    pub fn eq(self, rhs: Self) -> Mask128<u64, N> {
        Mask128::new(v128::i64x2_eq(self.raw, rhs.raw))
    }

    #[inline]
    pub fn ne(self, rhs: Self) -> Mask128<u64, N> {
        Mask128::new(v128::i64x2_ne(self.raw, rhs.raw))
    }

    #[inline]
    pub fn lt(self, rhs: Self) -> Mask128<u64, N> {
        Mask128::new(lt_u64(self.raw, rhs.raw))
    }

    #[inline]
    pub fn gt(self, rhs: Self) -> Mask128<u64, N> {
        Mask128::new(lt_u64(rhs.raw, self.raw))
    }

    #[inline]
    pub fn le(self, rhs: Self) -> Mask128<u64, N> {
        Mask128::new(v128::v128_not(lt_u64(rhs.raw, self.raw)))
    }

    #[inline]
    pub fn ge(self, rhs: Self) -> Mask128<u64, N> {
        Mask128::new(v128::v128_not(lt_u64(self.raw, rhs.raw)))
    }
}

macro_rules! impl_test_bit {
    ($t:ty, $eq:path) => {
        impl<const N: usize> Vec128<$t, N> {
            /// True where all bits of `bit` are set in the lane. `bit` is
            /// expected to hold a single power of two per lane.
            #[inline]
            pub fn test_bit(self, bit: Self) -> Mask128<$t, N> {
                Mask128::new($eq(v128::v128_and(self.raw, bit.raw), bit.raw))
            }
        }
    };
}

impl_test_bit!(u8, v128::i8x16_eq);
impl_test_bit!(i8, v128::i8x16_eq);
impl_test_bit!(u16, v128::i16x8_eq);
impl_test_bit!(i16, v128::i16x8_eq);
impl_test_bit!(u32, v128::i32x4_eq);
impl_test_bit!(i32, v128::i32x4_eq);
impl_test_bit!(u64, v128::i64x2_eq);
impl_test_bit!(i64, v128::i64x2_eq);

#[cfg(test)]
mod tests {
    use crate::vec::Vec128;

    #[test]
    fn test_ordering_exclusive() {
        let a = Vec128::<i32, 4>::from_array([1, 5, -3, 0]);
        let b = Vec128::<i32, 4>::from_array([2, 5, -4, 0]);
        let lt = a.lt(b).to_array();
        let eq = a.eq(b).to_array();
        let gt = a.gt(b).to_array();
        for i in 0..4 {
            assert_eq!(
                [lt[i], eq[i], gt[i]].iter().filter(|&&x| x).count(),
                1,
                "lane {i}"
            );
        }
    }

    #[test]
    fn test_u64_ordering_tie_break() {
        // Same high word, differing low word.
        let a = Vec128::<u64, 2>::from_array([0x1_0000_0005, 0xFFFF_FFFF_0000_0000]);
        let b = Vec128::<u64, 2>::from_array([0x1_0000_0009, 0x0000_0001_FFFF_FFFF]);
        assert_eq!(a.lt(b).to_array(), [true, false]);
        assert_eq!(a.gt(b).to_array(), [false, true]);
        assert_eq!(a.le(b).to_array(), [true, false]);
        assert_eq!(a.ge(b).to_array(), [false, true]);
        // Values above i64::MAX must still order as unsigned.
        let a = Vec128::<u64, 2>::from_array([u64::MAX, 1]);
        let b = Vec128::<u64, 2>::from_array([1, u64::MAX]);
        assert_eq!(a.lt(b).to_array(), [false, true]);
    }

    #[test]
    fn test_nan_compares_false() {
        let nan = Vec128::<f32, 4>::from_array([f32::NAN; 4]);
        let x = Vec128::<f32, 4>::from_array([0.0; 4]);
        assert_eq!(nan.eq(nan).to_array(), [false; 4]);
        assert_eq!(nan.lt(x).to_array(), [false; 4]);
        assert_eq!(nan.ge(x).to_array(), [false; 4]);
        assert_eq!(nan.ne(nan).to_array(), [true; 4]);
    }

    #[test]
    fn test_test_bit() {
        let v = Vec128::<u16, 8>::from_array([0b1010; 8]);
        let bit = Vec128::<u16, 8>::from_array([1, 2, 4, 8, 16, 2, 8, 1]);
        assert_eq!(
            v.test_bit(bit).to_array(),
            [false, true, false, true, false, true, true, false]
        );
    }
}
