//! Float-only operations.
//!
//! Min/Max absorb NaN: `min(NaN, x) == x` and `max(NaN, x) == x`, while a
//! NaN in the second operand propagates. This comes from the operand order
//! fed to the native pseudo-min/max, which return their second operand when
//! either input is NaN, and generic callers rely on the direction.

use crate::arch::v128;
use crate::vec::{Mask128, Vec128};

macro_rules! impl_float {
    (
        $t:ty, $bits:ty,
        $sqrt:path, $abs:path, $neg:path,
        $pmin:path, $pmax:path,
        $ceil:path, $floor:path, $trunc:path, $nearest:path,
        $lt:path, $eq:path, $ne:path,
        $shr_s:path, $lane_bits:expr
    ) => {
        impl<const N: usize> Vec128<$t, N> {
            /// Lane-wise minimum; NaN in `self` is replaced by the `rhs`
            /// lane, NaN in `rhs` wins.
            #[inline]
            pub fn min(self, rhs: Self) -> Self {
                Self::new($pmin(rhs.raw, self.raw))
            }

            /// Lane-wise maximum; NaN in `self` is replaced by the `rhs`
            /// lane, NaN in `rhs` wins.
            #[inline]
            pub fn max(self, rhs: Self) -> Self {
                Self::new($pmax(rhs.raw, self.raw))
            }

            #[inline]
            pub fn sqrt(self) -> Self {
                Self::new($sqrt(self.raw))
            }

            #[inline]
            pub fn abs(self) -> Self {
                Self::new($abs(self.raw))
            }

            /// `|self - rhs|`.
            #[inline]
            pub fn abs_diff(self, rhs: Self) -> Self {
                (self - rhs).abs()
            }

            /// `self * mul + add` with ordinary per-operation rounding.
            #[inline]
            pub fn mul_add(self, mul: Self, add: Self) -> Self {
                self * mul + add
            }

            /// `add - self * mul`.
            #[inline]
            pub fn neg_mul_add(self, mul: Self, add: Self) -> Self {
                add - self * mul
            }

            /// `self * mul - sub`.
            #[inline]
            pub fn mul_sub(self, mul: Self, sub: Self) -> Self {
                self * mul - sub
            }

            /// `-(self * mul) - sub`.
            #[inline]
            pub fn neg_mul_sub(self, mul: Self, sub: Self) -> Self {
                Self::new($neg((self * mul + sub).raw))
            }

            /// `1 / self`. No fast approximation exists on this target, so
            /// this is a full-precision division.
            #[inline]
            pub fn approximate_reciprocal(self) -> Self {
                let one = Vec128::new(v128::splat::<$t>(1.0));
                one / self
            }

            /// `1 / sqrt(self)`, also at full precision.
            #[inline]
            pub fn approximate_reciprocal_sqrt(self) -> Self {
                let one = Vec128::new(v128::splat::<$t>(1.0));
                one / self.sqrt()
            }

            /// Round to the nearest integral value, ties to even.
            #[inline]
            pub fn round(self) -> Self {
                Self::new($nearest(self.raw))
            }

            /// Round toward positive infinity.
            #[inline]
            pub fn ceil(self) -> Self {
                Self::new($ceil(self.raw))
            }

            /// Round toward negative infinity.
            #[inline]
            pub fn floor(self) -> Self {
                Self::new($floor(self.raw))
            }

            /// Round toward zero.
            #[inline]
            pub fn trunc(self) -> Self {
                Self::new($trunc(self.raw))
            }

            #[inline]
            pub fn is_nan(self) -> Mask128<$t, N> {
                Mask128::new($ne(self.raw, self.raw))
            }

            #[inline]
            pub fn is_inf(self) -> Mask128<$t, N> {
                let inf = v128::splat::<$t>(<$t>::INFINITY);
                Mask128::new($eq($abs(self.raw), inf))
            }

            #[inline]
            pub fn is_finite(self) -> Mask128<$t, N> {
                Mask128::new($lt($abs(self.raw), v128::splat::<$t>(<$t>::INFINITY)))
            }

            /// Magnitude of `self` with the sign of `sign`.
            #[inline]
            pub fn copy_sign(self, sign: Self) -> Self {
                let sign_bit = v128::splat::<$bits>(1 << ($lane_bits - 1));
                Self::new(v128::v128_bitselect(sign.raw, self.raw, sign_bit))
            }

            /// [`copy_sign`](Self::copy_sign) for a `self` already known to
            /// be non-negative: the sign bit is ORed in rather than
            /// selected.
            #[inline]
            pub fn copy_sign_to_abs(self, sign: Self) -> Self {
                let sign_bit = v128::splat::<$bits>(1 << ($lane_bits - 1));
                Self::new(v128::v128_or(
                    self.raw,
                    v128::v128_and(sign.raw, sign_bit),
                ))
            }

            /// Replace negative lanes (including -0.0) with +0.0.
            #[inline]
            pub fn zero_if_negative(self) -> Self {
                let sign_fill = $shr_s(self.raw, $lane_bits - 1);
                Self::new(v128::v128_andnot(self.raw, sign_fill))
            }
        }
    };
}

impl_float!(
    f32, u32,
    v128::f32x4_sqrt, v128::f32x4_abs, v128::f32x4_neg,
    v128::f32x4_pmin, v128::f32x4_pmax,
    v128::f32x4_ceil, v128::f32x4_floor, v128::f32x4_trunc, v128::f32x4_nearest,
    v128::f32x4_lt, v128::f32x4_eq, v128::f32x4_ne,
    v128::i32x4_shr_s, 32
);
impl_float!(
    f64, u64,
    v128::f64x2_sqrt, v128::f64x2_abs, v128::f64x2_neg,
    v128::f64x2_pmin, v128::f64x2_pmax,
    v128::f64x2_ceil, v128::f64x2_floor, v128::f64x2_trunc, v128::f64x2_nearest,
    v128::f64x2_lt, v128::f64x2_eq, v128::f64x2_ne,
    v128::i64x2_shr_s, 64
);

macro_rules! impl_float_neg {
    ($t:ty, $neg:path) => {
        impl<const N: usize> std::ops::Neg for Vec128<$t, N> {
            type Output = Self;

            #[inline]
            fn neg(self) -> Self {
                Self::new($neg(self.raw))
            }
        }
    };
}

impl_float_neg!(f32, v128::f32x4_neg);
impl_float_neg!(f64, v128::f64x2_neg);
