//! Integer arithmetic, logic and shifts.
//!
//! The native layer has no 8-bit shifts, no 64-bit integer min/max and only
//! scalar shift counts, so those operations are synthesized here: 8-bit
//! shifts run at 16-bit width and mask off the bits that crossed a lane
//! boundary, per-lane shift counts are decomposed bit by bit into a ladder
//! of constant shifts, and the 64-bit cases go through scalar lanes.

use std::ops::{Add, BitAnd, BitOr, BitXor, Div, Mul, Neg, Not, Sub};

use crate::arch::v128::{self, V128};
use crate::lane::Lane;
use crate::vec::{Desc, Vec128};

macro_rules! impl_add_sub {
    ($t:ty, $add:path, $sub:path) => {
        impl<const N: usize> Add for Vec128<$t, N> {
            type Output = Self;

            #[inline]
            fn add(self, rhs: Self) -> Self {
                Self::new($add(self.raw, rhs.raw))
            }
        }

        impl<const N: usize> Sub for Vec128<$t, N> {
            type Output = Self;

            #[inline]
            fn sub(self, rhs: Self) -> Self {
                Self::new($sub(self.raw, rhs.raw))
            }
        }
    };
}

impl_add_sub!(u8, v128::i8x16_add, v128::i8x16_sub);
impl_add_sub!(i8, v128::i8x16_add, v128::i8x16_sub);
impl_add_sub!(u16, v128::i16x8_add, v128::i16x8_sub);
impl_add_sub!(i16, v128::i16x8_add, v128::i16x8_sub);
impl_add_sub!(u32, v128::i32x4_add, v128::i32x4_sub);
impl_add_sub!(i32, v128::i32x4_add, v128::i32x4_sub);
impl_add_sub!(u64, v128::i64x2_add, v128::i64x2_sub);
impl_add_sub!(i64, v128::i64x2_add, v128::i64x2_sub);
impl_add_sub!(f32, v128::f32x4_add, v128::f32x4_sub);
impl_add_sub!(f64, v128::f64x2_add, v128::f64x2_sub);

macro_rules! impl_mul {
    ($t:ty, $mul:path) => {
        impl<const N: usize> Mul for Vec128<$t, N> {
            type Output = Self;

            #[inline]
            fn mul(self, rhs: Self) -> Self {
                Self::new($mul(self.raw, rhs.raw))
            }
        }
    };
}

// No 8-bit lane multiply exists.
impl_mul!(u16, v128::i16x8_mul);
impl_mul!(i16, v128::i16x8_mul);
impl_mul!(u32, v128::i32x4_mul);
impl_mul!(i32, v128::i32x4_mul);
impl_mul!(u64, v128::i64x2_mul);
impl_mul!(i64, v128::i64x2_mul);
impl_mul!(f32, v128::f32x4_mul);
impl_mul!(f64, v128::f64x2_mul);

macro_rules! impl_div {
    ($t:ty, $div:path) => {
        impl<const N: usize> Div for Vec128<$t, N> {
            type Output = Self;

            #[inline]
            fn div(self, rhs: Self) -> Self {
                Self::new($div(self.raw, rhs.raw))
            }
        }
    };
}

impl_div!(f32, v128::f32x4_div);
impl_div!(f64, v128::f64x2_div);

macro_rules! impl_neg_abs {
    ($t:ty, $neg:path, $abs:path) => {
        impl<const N: usize> Neg for Vec128<$t, N> {
            type Output = Self;

            #[inline]
            fn neg(self) -> Self {
                Self::new($neg(self.raw))
            }
        }

        impl<const N: usize> Vec128<$t, N> {
            /// Lane-wise absolute value. The minimum value maps to itself.
            #[inline]
            pub fn abs(self) -> Self {
                Self::new($abs(self.raw))
            }
        }
    };
}

impl_neg_abs!(i8, v128::i8x16_neg, v128::i8x16_abs);
impl_neg_abs!(i16, v128::i16x8_neg, v128::i16x8_abs);
impl_neg_abs!(i32, v128::i32x4_neg, v128::i32x4_abs);
impl_neg_abs!(i64, v128::i64x2_neg, v128::i64x2_abs);

impl<T: Lane, const N: usize> Not for Vec128<T, N> {
    type Output = Self;

    #[inline]
    fn not(self) -> Self {
        Self::new(v128::v128_not(self.raw))
    }
}

impl<T: Lane, const N: usize> BitAnd for Vec128<T, N> {
    type Output = Self;

    #[inline]
    fn bitand(self, rhs: Self) -> Self {
        Self::new(v128::v128_and(self.raw, rhs.raw))
    }
}

impl<T: Lane, const N: usize> BitOr for Vec128<T, N> {
    type Output = Self;

    #[inline]
    fn bitor(self, rhs: Self) -> Self {
        Self::new(v128::v128_or(self.raw, rhs.raw))
    }
}

impl<T: Lane, const N: usize> BitXor for Vec128<T, N> {
    type Output = Self;

    #[inline]
    fn bitxor(self, rhs: Self) -> Self {
        Self::new(v128::v128_xor(self.raw, rhs.raw))
    }
}

impl<T: Lane, const N: usize> Vec128<T, N> {
    /// `self & !rhs`.
    #[inline]
    pub fn and_not(self, rhs: Self) -> Self {
        Self::new(v128::v128_andnot(self.raw, rhs.raw))
    }

    /// `self | b | c`.
    #[inline]
    pub fn or3(self, b: Self, c: Self) -> Self {
        self | (b | c)
    }

    /// `self ^ b ^ c`.
    #[inline]
    pub fn xor3(self, b: Self, c: Self) -> Self {
        self ^ (b ^ c)
    }

    /// `self | (a & b)`.
    #[inline]
    pub fn or_and(self, a: Self, b: Self) -> Self {
        Self::new(v128::v128_or(self.raw, v128::v128_and(a.raw, b.raw)))
    }
}

macro_rules! impl_sat {
    ($t:ty, $adds:path, $subs:path) => {
        impl<const N: usize> Vec128<$t, N> {
            /// Lane-wise add, clamped to the lane type's range.
            #[inline]
            pub fn saturating_add(self, rhs: Self) -> Self {
                Self::new($adds(self.raw, rhs.raw))
            }

            /// Lane-wise subtract, clamped to the lane type's range.
            #[inline]
            pub fn saturating_sub(self, rhs: Self) -> Self {
                Self::new($subs(self.raw, rhs.raw))
            }
        }
    };
}

impl_sat!(u8, v128::u8x16_add_sat, v128::u8x16_sub_sat);
impl_sat!(i8, v128::i8x16_add_sat, v128::i8x16_sub_sat);
impl_sat!(u16, v128::u16x8_add_sat, v128::u16x8_sub_sat);
impl_sat!(i16, v128::i16x8_add_sat, v128::i16x8_sub_sat);

macro_rules! impl_avg {
    ($t:ty, $avg:path) => {
        impl<const N: usize> Vec128<$t, N> {
            /// `(a + b + 1) >> 1` without overflow.
            #[inline]
            pub fn average_round(self, rhs: Self) -> Self {
                Self::new($avg(self.raw, rhs.raw))
            }
        }
    };
}

impl_avg!(u8, v128::u8x16_avgr);
impl_avg!(u16, v128::u16x8_avgr);

macro_rules! impl_int_min_max {
    ($t:ty, $min:path, $max:path) => {
        impl<const N: usize> Vec128<$t, N> {
            #[inline]
            pub fn min(self, rhs: Self) -> Self {
                Self::new($min(self.raw, rhs.raw))
            }

            #[inline]
            pub fn max(self, rhs: Self) -> Self {
                Self::new($max(self.raw, rhs.raw))
            }
        }
    };
}

impl_int_min_max!(u8, v128::u8x16_min, v128::u8x16_max);
impl_int_min_max!(i8, v128::i8x16_min, v128::i8x16_max);
impl_int_min_max!(u16, v128::u16x8_min, v128::u16x8_max);
impl_int_min_max!(i16, v128::i16x8_min, v128::i16x8_max);
impl_int_min_max!(u32, v128::u32x4_min, v128::u32x4_max);
impl_int_min_max!(i32, v128::i32x4_min, v128::i32x4_max);

// 64-bit lanes have no native min/max; go through scalars.
macro_rules! impl_min_max_64 {
    ($t:ty) => {
        impl<const N: usize> Vec128<$t, N> {
            #[inline]
            pub fn min(self, rhs: Self) -> Self {
                let a = self.raw.lanes::<$t, 2>();
                let b = rhs.raw.lanes::<$t, 2>();
                Self::new(V128::from_lanes([a[0].min(b[0]), a[1].min(b[1])]))
            }

            #[inline]
            pub fn max(self, rhs: Self) -> Self {
                let a = self.raw.lanes::<$t, 2>();
                let b = rhs.raw.lanes::<$t, 2>();
                Self::new(V128::from_lanes([a[0].max(b[0]), a[1].max(b[1])]))
            }
        }
    };
}

impl_min_max_64!(u64);
impl_min_max_64!(i64);

// Shifts for 16/32/64-bit lanes map straight onto native scalar-count
// shifts. The compile-time count is validated against the lane width.
macro_rules! impl_shifts {
    ($t:ty, $bits:expr, $shl:path, $shr:path) => {
        impl<const N: usize> Vec128<$t, N> {
            /// Shift every lane left by the compile-time count `K`.
            #[inline]
            pub fn shift_left<const K: usize>(self) -> Self {
                const {
                    assert!(K < $bits, "shift count exceeds lane width");
                }
                Self::new($shl(self.raw, K as u32))
            }

            /// Shift every lane right by the compile-time count `K`.
            /// Arithmetic for signed lanes, logical for unsigned.
            #[inline]
            pub fn shift_right<const K: usize>(self) -> Self {
                const {
                    assert!(K < $bits, "shift count exceeds lane width");
                }
                Self::new($shr(self.raw, K as u32))
            }

            /// Shift every lane left by the same runtime count, which must
            /// be below the lane width.
            #[inline]
            pub fn shift_left_same(self, count: u32) -> Self {
                debug_assert!(count < $bits);
                Self::new($shl(self.raw, count))
            }

            /// Shift every lane right by the same runtime count, which must
            /// be below the lane width.
            #[inline]
            pub fn shift_right_same(self, count: u32) -> Self {
                debug_assert!(count < $bits);
                Self::new($shr(self.raw, count))
            }

            /// Rotate every lane right by the compile-time count `K`.
            #[inline]
            pub fn rotate_right<const K: usize>(self) -> Self {
                const {
                    assert!(K < $bits, "rotate count exceeds lane width");
                }
                // K = 0 would need an undefined full-width left shift.
                if K == 0 {
                    self
                } else {
                    let down = Self::new($shr(self.raw, K as u32));
                    let up = Self::new($shl(self.raw, $bits - K as u32));
                    down | up
                }
            }
        }
    };
}

impl_shifts!(u16, 16, v128::i16x8_shl, v128::i16x8_shr_u);
impl_shifts!(i16, 16, v128::i16x8_shl, v128::i16x8_shr_s);
impl_shifts!(u32, 32, v128::i32x4_shl, v128::i32x4_shr_u);
impl_shifts!(i32, 32, v128::i32x4_shl, v128::i32x4_shr_s);
impl_shifts!(u64, 64, v128::i64x2_shl, v128::i64x2_shr_u);
impl_shifts!(i64, 64, v128::i64x2_shl, v128::i64x2_shr_s);

// 8-bit shifts run at 16-bit width and mask off the bits that crossed the
// lane boundary.
#[inline]
fn shl8(v: V128, count: u32) -> V128 {
    debug_assert!(count < 8);
    let shifted = v128::i16x8_shl(v, count);
    v128::v128_and(shifted, v128::splat::<u8>(((0xFFu32 << count) & 0xFF) as u8))
}

#[inline]
fn shr8_u(v: V128, count: u32) -> V128 {
    debug_assert!(count < 8);
    let shifted = v128::i16x8_shr_u(v, count);
    v128::v128_and(shifted, v128::splat::<u8>((0xFFu32 >> count) as u8))
}

// Unsigned synthesis on the bit pattern, then (x ^ m) - m flips the copies
// of the sign bit back into a sign fill.
#[inline]
fn shr8_s(v: V128, count: u32) -> V128 {
    let shifted = shr8_u(v, count);
    let sign_fill = v128::splat::<u8>(0x80u8 >> count);
    v128::i8x16_sub(v128::v128_xor(shifted, sign_fill), sign_fill)
}

macro_rules! impl_shifts_8 {
    ($t:ty, $shr:path) => {
        impl<const N: usize> Vec128<$t, N> {
            /// Shift every lane left by the compile-time count `K`.
            #[inline]
            pub fn shift_left<const K: usize>(self) -> Self {
                const {
                    assert!(K < 8, "shift count exceeds lane width");
                }
                // Adding avoids the widen-and-mask sequence.
                if K == 1 {
                    self + self
                } else {
                    Self::new(shl8(self.raw, K as u32))
                }
            }

            /// Shift every lane right by the compile-time count `K`.
            /// Arithmetic for signed lanes, logical for unsigned.
            #[inline]
            pub fn shift_right<const K: usize>(self) -> Self {
                const {
                    assert!(K < 8, "shift count exceeds lane width");
                }
                Self::new($shr(self.raw, K as u32))
            }

            /// Shift every lane left by the same runtime count, which must
            /// be below 8.
            #[inline]
            pub fn shift_left_same(self, count: u32) -> Self {
                Self::new(shl8(self.raw, count))
            }

            /// Shift every lane right by the same runtime count, which must
            /// be below 8.
            #[inline]
            pub fn shift_right_same(self, count: u32) -> Self {
                Self::new($shr(self.raw, count))
            }

            /// Rotate every lane right by the compile-time count `K`.
            #[inline]
            pub fn rotate_right<const K: usize>(self) -> Self {
                const {
                    assert!(K < 8, "rotate count exceeds lane width");
                }
                if K == 0 {
                    self
                } else {
                    let down = Self::new($shr(self.raw, K as u32));
                    let up = Self::new(shl8(self.raw, 8 - K as u32));
                    down | up
                }
            }
        }
    };
}

impl_shifts_8!(u8, shr8_u);
impl_shifts_8!(i8, shr8_s);

// Per-lane shift counts are applied bit by bit: a calibrated left shift
// parks the highest used count bit in the sign position, each ladder step
// tests it via arithmetic shift and conditionally applies a constant
// power-of-two shift, then advances to the next bit.
#[inline]
fn var_shift_16(v: V128, counts: V128, op: fn(V128, u32) -> V128) -> V128 {
    let mut out = v;
    let mut bits = v128::i16x8_shl(counts, 12);
    for k in [8u32, 4, 2, 1] {
        let taken = v128::i16x8_shr_s(bits, 15);
        out = v128::v128_bitselect(op(out, k), out, taken);
        bits = v128::i16x8_shl(bits, 1);
    }
    out
}

#[inline]
fn var_shift_32(v: V128, counts: V128, op: fn(V128, u32) -> V128) -> V128 {
    let mut out = v;
    let mut bits = v128::i32x4_shl(counts, 27);
    for k in [16u32, 8, 4, 2, 1] {
        let taken = v128::i32x4_shr_s(bits, 31);
        out = v128::v128_bitselect(op(out, k), out, taken);
        bits = v128::i32x4_shl(bits, 1);
    }
    out
}

macro_rules! impl_var_shift {
    ($t:ty, $ladder:path, $shl:path, $shr:path) => {
        impl<const N: usize> Vec128<$t, N> {
            /// Shift each lane left by the count in the matching lane of
            /// `counts`. Counts must be below the lane width.
            #[inline]
            pub fn shl(self, counts: Self) -> Self {
                Self::new($ladder(self.raw, counts.raw, $shl))
            }

            /// Shift each lane right by the count in the matching lane of
            /// `counts`. Arithmetic for signed lanes, logical for unsigned.
            #[inline]
            pub fn shr(self, counts: Self) -> Self {
                Self::new($ladder(self.raw, counts.raw, $shr))
            }
        }
    };
}

impl_var_shift!(u16, var_shift_16, v128::i16x8_shl, v128::i16x8_shr_u);
impl_var_shift!(i16, var_shift_16, v128::i16x8_shl, v128::i16x8_shr_s);
impl_var_shift!(u32, var_shift_32, v128::i32x4_shl, v128::i32x4_shr_u);
impl_var_shift!(i32, var_shift_32, v128::i32x4_shl, v128::i32x4_shr_s);

// 64-bit lanes: no ladder pays off for two lanes, use scalars.
macro_rules! impl_var_shift_64 {
    ($t:ty) => {
        impl<const N: usize> Vec128<$t, N> {
            /// Shift each lane left by the count in the matching lane of
            /// `counts`. Counts must be below 64.
            #[inline]
            pub fn shl(self, counts: Self) -> Self {
                let v = self.raw.lanes::<$t, 2>();
                let c = counts.raw.lanes::<u64, 2>();
                Self::new(V128::from_lanes([
                    v[0] << (c[0] & 63),
                    v[1] << (c[1] & 63),
                ]))
            }

            /// Shift each lane right by the count in the matching lane of
            /// `counts`. Arithmetic for signed lanes, logical for unsigned.
            #[inline]
            pub fn shr(self, counts: Self) -> Self {
                let v = self.raw.lanes::<$t, 2>();
                let c = counts.raw.lanes::<u64, 2>();
                Self::new(V128::from_lanes([
                    v[0] >> (c[0] & 63),
                    v[1] >> (c[1] & 63),
                ]))
            }
        }
    };
}

impl_var_shift_64!(u64);
impl_var_shift_64!(i64);

// High halves of 16x16 -> 32 products, gathered back into 16-bit lanes.
const MUL_HIGH_PATTERN: [u8; 16] = [
    2, 3, 6, 7, 10, 11, 14, 15, 18, 19, 22, 23, 26, 27, 30, 31,
];

macro_rules! impl_mul_high {
    ($t:ty, $lo:path, $hi:path) => {
        impl<const N: usize> Vec128<$t, N> {
            /// Upper 16 bits of the 32-bit product of each lane pair.
            #[inline]
            pub fn mul_high(self, rhs: Self) -> Self {
                let lo = $lo(self.raw, rhs.raw);
                let hi = $hi(self.raw, rhs.raw);
                Self::new(v128::i8x16_shuffle(lo, hi, MUL_HIGH_PATTERN))
            }
        }
    };
}

impl_mul_high!(i16, v128::i32x4_extmul_low_i16x8, v128::i32x4_extmul_high_i16x8);
impl_mul_high!(u16, v128::u32x4_extmul_low_u16x8, v128::u32x4_extmul_high_u16x8);

macro_rules! impl_mul_even_odd_32 {
    ($wide:ty, $narrow:ty) => {
        impl<const N: usize> Desc<$wide, N> {
            /// Full-width products of the even-indexed lanes of `a` and `b`.
            #[inline]
            pub fn mul_even<const M: usize>(
                self,
                a: Vec128<$narrow, M>,
                b: Vec128<$narrow, M>,
            ) -> Vec128<$wide, N> {
                const {
                    assert!(M == 2 * N, "product lanes must be half as many");
                }
                let a = a.raw.lanes::<$narrow, 4>();
                let b = b.raw.lanes::<$narrow, 4>();
                Vec128::new(V128::from_lanes([
                    a[0] as $wide * b[0] as $wide,
                    a[2] as $wide * b[2] as $wide,
                ]))
            }

            /// Full-width products of the odd-indexed lanes of `a` and `b`.
            #[inline]
            pub fn mul_odd<const M: usize>(
                self,
                a: Vec128<$narrow, M>,
                b: Vec128<$narrow, M>,
            ) -> Vec128<$wide, N> {
                const {
                    assert!(M == 2 * N, "product lanes must be half as many");
                }
                let a = a.raw.lanes::<$narrow, 4>();
                let b = b.raw.lanes::<$narrow, 4>();
                Vec128::new(V128::from_lanes([
                    a[1] as $wide * b[1] as $wide,
                    a[3] as $wide * b[3] as $wide,
                ]))
            }
        }
    };
}

impl_mul_even_odd_32!(i64, i32);
impl_mul_even_odd_32!(u64, u32);

impl Vec128<u64, 2> {
    /// 128-bit product of lane 0 of each operand: lane 0 holds the low
    /// 64 bits, lane 1 the high 64 bits.
    #[inline]
    pub fn mul_even(self, rhs: Self) -> Self {
        let a = self.raw.lanes::<u64, 2>();
        let b = rhs.raw.lanes::<u64, 2>();
        let wide = a[0] as u128 * b[0] as u128;
        Self::new(V128::from_lanes([wide as u64, (wide >> 64) as u64]))
    }

    /// 128-bit product of lane 1 of each operand, laid out as in
    /// [`mul_even`](Self::mul_even).
    #[inline]
    pub fn mul_odd(self, rhs: Self) -> Self {
        let a = self.raw.lanes::<u64, 2>();
        let b = rhs.raw.lanes::<u64, 2>();
        let wide = a[1] as u128 * b[1] as u128;
        Self::new(V128::from_lanes([wide as u64, (wide >> 64) as u64]))
    }
}

macro_rules! impl_broadcast_sign_bit {
    ($t:ty, $shr:path, $bits:expr) => {
        impl<const N: usize> Vec128<$t, N> {
            /// Every bit of each lane becomes a copy of that lane's sign
            /// bit.
            #[inline]
            pub fn broadcast_sign_bit(self) -> Self {
                Self::new($shr(self.raw, $bits - 1))
            }
        }
    };
}

impl_broadcast_sign_bit!(i16, v128::i16x8_shr_s, 16);
impl_broadcast_sign_bit!(i32, v128::i32x4_shr_s, 32);
impl_broadcast_sign_bit!(i64, v128::i64x2_shr_s, 64);

impl<const N: usize> Vec128<i8, N> {
    /// Every bit of each lane becomes a copy of that lane's sign bit.
    #[inline]
    pub fn broadcast_sign_bit(self) -> Self {
        // No 8-bit arithmetic shift; a signed compare against zero produces
        // the same fill.
        Self::new(v128::i8x16_lt_s(self.raw, V128::ZERO))
    }
}

#[cfg(test)]
mod tests {
    use crate::vec::Vec128;

    #[test]
    fn test_saturating_add_u8() {
        let a = Vec128::<u8, 16>::from_array([250; 16]);
        let b = Vec128::<u8, 16>::from_array([10; 16]);
        assert_eq!(a.saturating_add(b).to_array(), [255; 16]);
        assert_eq!((a + b).to_array(), [4; 16]);
    }

    #[test]
    fn test_three_operand_logic() {
        let a = Vec128::<u32, 4>::from_array([0b0001; 4]);
        let b = Vec128::<u32, 4>::from_array([0b0010; 4]);
        let c = Vec128::<u32, 4>::from_array([0b0110; 4]);
        assert_eq!(a.or3(b, c).to_array(), [0b0111; 4]);
        assert_eq!(a.xor3(b, c).to_array(), [0b0101; 4]);
        assert_eq!(a.or_and(b, c).to_array(), [0b0011; 4]);
    }

    #[test]
    fn test_shift_right_i8_is_arithmetic() {
        let v = Vec128::<i8, 16>::from_array([-2; 16]);
        assert_eq!(v.shift_right::<1>().to_array(), [-1; 16]);
        let v = Vec128::<i8, 16>::from_array([-128, 127, -1, 64, 0, -3, 5, -100, 1, 2, 3, 4, 5, 6, 7, 8]);
        let expected: [i8; 16] = std::array::from_fn(|i| v.to_array()[i] >> 2);
        assert_eq!(v.shift_right::<2>().to_array(), expected);
    }

    #[test]
    fn test_shift_left_u8_masks_cross_lane_bits() {
        let v = Vec128::<u8, 16>::from_array([0xFF; 16]);
        assert_eq!(v.shift_left::<3>().to_array(), [0xF8; 16]);
        assert_eq!(v.shift_left::<1>().to_array(), [0xFE; 16]);
        assert_eq!(v.shift_right::<3>().to_array(), [0x1F; 16]);
    }

    #[test]
    fn test_variable_shift_ladders() {
        let v = Vec128::<u16, 8>::from_array([1; 8]);
        let counts = Vec128::from_array([0, 1, 2, 5, 8, 11, 14, 15]);
        assert_eq!(
            v.shl(counts).to_array(),
            [1, 2, 4, 32, 256, 2048, 16384, 32768]
        );
        let v = Vec128::<i32, 4>::from_array([-64, -64, i32::MIN, 48]);
        let counts = Vec128::from_array([0, 3, 31, 2]);
        assert_eq!(v.shr(counts).to_array(), [-64, -8, -1, 12]);
    }

    #[test]
    fn test_variable_shift_64_scalar_path() {
        let v = Vec128::<u64, 2>::from_array([1, u64::MAX]);
        let counts = Vec128::from_array([63, 4]);
        assert_eq!(v.shl(counts).to_array(), [1 << 63, u64::MAX << 4]);
        assert_eq!(v.shr(counts).to_array(), [0, u64::MAX >> 4]);
    }

    #[test]
    fn test_rotate_round_trip() {
        let v = Vec128::<u32, 4>::from_array([0xDEAD_BEEF, 1, 0x8000_0000, 7]);
        assert_eq!(
            v.rotate_right::<5>().rotate_right::<27>().to_array(),
            v.to_array()
        );
        assert_eq!(v.rotate_right::<0>().to_array(), v.to_array());
        let b = Vec128::<u8, 16>::from_array([0x81; 16]);
        assert_eq!(b.rotate_right::<1>().to_array(), [0xC0; 16]);
    }

    #[test]
    fn test_min_max_64() {
        let a = Vec128::<i64, 2>::from_array([-5, 9]);
        let b = Vec128::<i64, 2>::from_array([3, -9]);
        assert_eq!(a.min(b).to_array(), [-5, -9]);
        assert_eq!(a.max(b).to_array(), [3, 9]);
        let a = Vec128::<u64, 2>::from_array([u64::MAX, 1]);
        let b = Vec128::<u64, 2>::from_array([0, 2]);
        assert_eq!(a.min(b).to_array(), [0, 1]);
        assert_eq!(a.max(b).to_array(), [u64::MAX, 2]);
    }

    #[test]
    fn test_mul_high() {
        let a = Vec128::<u16, 8>::from_array([0xFFFF; 8]);
        let b = Vec128::<u16, 8>::from_array([0xFFFF; 8]);
        // 0xFFFF * 0xFFFF = 0xFFFE0001.
        assert_eq!(a.mul_high(b).to_array(), [0xFFFE; 8]);
        let a = Vec128::<i16, 8>::from_array([-32768; 8]);
        let b = Vec128::<i16, 8>::from_array([2; 8]);
        assert_eq!(a.mul_high(b).to_array(), [-1; 8]);
    }

    #[test]
    fn test_mul_even_u64_keeps_full_precision() {
        let a = Vec128::<u64, 2>::from_array([u64::MAX, 0]);
        let b = Vec128::<u64, 2>::from_array([u64::MAX, 0]);
        // (2^64 - 1)^2 = 2^128 - 2^65 + 1.
        assert_eq!(a.mul_even(b).to_array(), [1, u64::MAX - 1]);
    }

    #[test]
    fn test_broadcast_sign_bit() {
        let v = Vec128::<i8, 16>::from_array([-1, 0, -128, 127, 1, -2, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0]);
        assert_eq!(
            v.broadcast_sign_bit().to_array()[..6],
            [-1, 0, -1, 0, 0, -1]
        );
        let v = Vec128::<i32, 4>::from_array([i32::MIN, -1, 0, 5]);
        assert_eq!(v.broadcast_sign_bit().to_array(), [-1, -1, 0, 0]);
    }
}
