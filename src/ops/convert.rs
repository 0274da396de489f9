//! Lane type conversions.
//!
//! Each conversion is a trait on the destination [`Desc`] so call sites
//! name the target type explicitly: `d_i16.promote_to(v_i8)`. The logical
//! lane count is preserved; promotions read the low half of the source
//! register, demotions write the low half of the destination.
//!
//! Half-float conversions are manual bit manipulation, not a native
//! instruction, so the results are identical on every host; the scalar
//! codecs in [`crate::half`] mirror them exactly.

use crate::arch::v128::{self, V128};
use crate::half::{Bf16, F16};
use crate::lane::Lane;
use crate::vec::{Desc, Vec128};

/// Widening conversion (sign- or zero-extend, or int/float upgrade).
pub trait Promote<V> {
    type Out;

    fn promote_to(self, v: V) -> Self::Out;
}

/// Narrowing conversion with range saturation (or float encode).
pub trait Demote<V> {
    type Out;

    fn demote_to(self, v: V) -> Self::Out;
}

/// Same-width int/float conversion; float to int truncates toward zero
/// and saturates, NaN becomes zero.
pub trait ConvertTo<V> {
    type Out;

    fn convert_to(self, v: V) -> Self::Out;
}

/// Bit-level narrowing: keep the low bytes of each lane, no range check.
pub trait TruncateTo<V> {
    type Out;

    fn truncate_to(self, v: V) -> Self::Out;
}

macro_rules! impl_promote {
    ($wide:ty, $narrow:ty, |$v:ident| $body:expr) => {
        impl<const N: usize> Promote<Vec128<$narrow, N>> for Desc<$wide, N> {
            type Out = Vec128<$wide, N>;

            #[inline]
            fn promote_to(self, v: Vec128<$narrow, N>) -> Vec128<$wide, N> {
                let $v = v.raw;
                Vec128::new($body)
            }
        }
    };
}

impl_promote!(i16, i8, |v| v128::i16x8_extend_low_i8x16(v));
impl_promote!(u16, u8, |v| v128::u16x8_extend_low_u8x16(v));
impl_promote!(i16, u8, |v| v128::u16x8_extend_low_u8x16(v));
impl_promote!(i32, i16, |v| v128::i32x4_extend_low_i16x8(v));
impl_promote!(u32, u16, |v| v128::u32x4_extend_low_u16x8(v));
impl_promote!(i32, u16, |v| v128::u32x4_extend_low_u16x8(v));
impl_promote!(i64, i32, |v| v128::i64x2_extend_low_i32x4(v));
impl_promote!(u64, u32, |v| v128::u64x2_extend_low_u32x4(v));
impl_promote!(i64, u32, |v| v128::u64x2_extend_low_u32x4(v));
impl_promote!(i32, i8, |v| v128::i32x4_extend_low_i16x8(
    v128::i16x8_extend_low_i8x16(v)
));
impl_promote!(u32, u8, |v| v128::u32x4_extend_low_u16x8(
    v128::u16x8_extend_low_u8x16(v)
));
impl_promote!(f64, f32, |v| v128::f64x2_promote_low_f32x4(v));
impl_promote!(f64, i32, |v| v128::f64x2_convert_low_i32x4_s(v));
impl_promote!(f32, F16, |v| promote_f16_bits(v));
impl_promote!(f32, Bf16, |v| {
    // bf16 is the upper half of an f32, so widen and shift back up.
    v128::i32x4_shl(v128::u32x4_extend_low_u16x8(v), 16)
});

// Decode IEEE binary16 held in the low four 16-bit lanes into f32 lanes.
fn promote_f16_bits(raw: V128) -> V128 {
    let du = Desc::<u32, 4>::new();
    let bits16 = Vec128::<u32, 4>::new(v128::u32x4_extend_low_u16x8(raw));
    let sign = bits16.shift_right::<15>();
    let biased_exp = bits16.shift_right::<10>() & du.set(0x1F);
    let mantissa = bits16 & du.set(0x3FF);

    // Subnormals have no implicit leading bit; the mantissa counts units
    // of 2^-24, so convert it as an integer and scale.
    let scaled = Vec128::<f32, 4>::new(v128::f32x4_convert_u32x4(mantissa.raw))
        * Vec128::new(v128::splat(1.0f32 / 16384.0 / 1024.0));
    let subnormal = du.bit_cast(scaled);

    let rebiased = biased_exp + du.set(127 - 15);
    let normal = rebiased.shift_left::<23>() | mantissa.shift_left::<13>();

    let magnitude = biased_exp.eq(du.zero()).if_then_else(subnormal, normal);
    (magnitude | sign.shift_left::<31>()).raw
}

// Encode f32 lanes as IEEE binary16 bit patterns in the low four 16-bit
// lanes. Mantissa bits are truncated; exponents below -24 flush to +0 and
// [-24, -14) produce a subnormal.
fn demote_to_f16_bits(raw: V128) -> V128 {
    let du = Desc::<u32, 4>::new();
    let di = Desc::<i32, 4>::new();
    let bits32 = Vec128::<u32, 4>::new(raw);
    let sign = bits32.shift_right::<31>();
    let biased_exp32 = bits32.shift_right::<23>() & du.set(0xFF);
    let mantissa32 = bits32 & du.set(0x7F_FFFF);

    let exp = (di.bit_cast(biased_exp32) - di.set(127)).min(di.set(15));
    let tiny = exp.lt(di.set(-24));
    let is_subnormal = exp.lt(di.set(-14));

    // sub_exp is in [1, 10] where is_subnormal holds; other lanes compute
    // garbage here that the select below discards.
    let sub_exp = du.bit_cast(di.set(-14) - exp);
    let leading = du.set(1).shl(du.set(10) - sub_exp);
    let sub_m = leading + du.bit_cast(mantissa32).shr(du.set(13) + sub_exp);

    let biased_exp16 = du.bit_cast(exp + di.set(15));
    let normal = biased_exp16.shift_left::<10>() | mantissa32.shift_right::<13>();

    let bits16 = is_subnormal.rebind::<u32>().if_then_else(sub_m, normal);
    let signed = bits16 | sign.shift_left::<15>();
    // The flush to zero drops the sign as well.
    let flushed = tiny.rebind::<u32>().if_then_zero_else(signed);
    v128::u16x8_narrow_i32x4(flushed.raw, flushed.raw)
}

macro_rules! impl_demote {
    ($narrow:ty, $wide:ty, |$v:ident| $body:expr) => {
        impl<const N: usize> Demote<Vec128<$wide, N>> for Desc<$narrow, N> {
            type Out = Vec128<$narrow, N>;

            #[inline]
            fn demote_to(self, v: Vec128<$wide, N>) -> Vec128<$narrow, N> {
                let $v = v.raw;
                Vec128::new($body)
            }
        }
    };
}

impl_demote!(i8, i16, |v| v128::i8x16_narrow_i16x8(v, v));
impl_demote!(u8, i16, |v| v128::u8x16_narrow_i16x8(v, v));
impl_demote!(i16, i32, |v| v128::i16x8_narrow_i32x4(v, v));
impl_demote!(u16, i32, |v| v128::u16x8_narrow_i32x4(v, v));
impl_demote!(i8, i32, |v| {
    let w = v128::i16x8_narrow_i32x4(v, v);
    v128::i8x16_narrow_i16x8(w, w)
});
impl_demote!(u8, i32, |v| {
    let w = v128::i16x8_narrow_i32x4(v, v);
    v128::u8x16_narrow_i16x8(w, w)
});
impl_demote!(u8, u16, |v| {
    // The narrow instruction reads signed lanes; clamp first so values
    // above i16::MAX cannot alias negative.
    let clamped = v128::u16x8_min(v, v128::splat::<u16>(0xFF));
    v128::u8x16_narrow_i16x8(clamped, clamped)
});
impl_demote!(u16, u32, |v| {
    let clamped = v128::u32x4_min(v, v128::splat::<u32>(0xFFFF));
    v128::u16x8_narrow_i32x4(clamped, clamped)
});
impl_demote!(f32, f64, |v| v128::f32x4_demote_f64x2_zero(v));
impl_demote!(i32, f64, |v| v128::i32x4_trunc_sat_f64x2_s_zero(v));
impl_demote!(F16, f32, |v| demote_to_f16_bits(v));
impl_demote!(Bf16, f32, |v| {
    let shifted = v128::i32x4_shr_u(v, 16);
    v128::u16x8_narrow_i32x4(shifted, shifted)
});

macro_rules! impl_convert {
    ($dst:ty, $src:ty, |$v:ident| $body:expr) => {
        impl<const N: usize> ConvertTo<Vec128<$src, N>> for Desc<$dst, N> {
            type Out = Vec128<$dst, N>;

            #[inline]
            fn convert_to(self, v: Vec128<$src, N>) -> Vec128<$dst, N> {
                let $v = v.raw;
                Vec128::new($body)
            }
        }
    };
}

impl_convert!(i32, f32, |v| v128::i32x4_trunc_sat_f32x4_s(v));
impl_convert!(u32, f32, |v| v128::u32x4_trunc_sat_f32x4(v));
impl_convert!(f32, i32, |v| v128::f32x4_convert_i32x4_s(v));
impl_convert!(f32, u32, |v| v128::f32x4_convert_u32x4(v));

// No native 64-bit float/int conversion; scalar lanes. Rust `as` casts
// already truncate toward zero, saturate and map NaN to zero.
impl_convert!(i64, f64, |v| {
    let x = v.lanes::<f64, 2>();
    V128::from_lanes([x[0] as i64, x[1] as i64])
});
impl_convert!(u64, f64, |v| {
    let x = v.lanes::<f64, 2>();
    V128::from_lanes([x[0] as u64, x[1] as u64])
});
impl_convert!(f64, i64, |v| {
    let x = v.lanes::<i64, 2>();
    V128::from_lanes([x[0] as f64, x[1] as f64])
});
impl_convert!(f64, u64, |v| {
    let x = v.lanes::<u64, 2>();
    V128::from_lanes([x[0] as f64, x[1] as f64])
});

impl<const N: usize> Vec128<f32, N> {
    /// Round to the nearest integer, ties to even, then convert with
    /// saturation.
    #[inline]
    pub fn nearest_int(self) -> Vec128<i32, N> {
        Vec128::new(v128::i32x4_trunc_sat_f32x4_s(v128::f32x4_nearest(
            self.raw,
        )))
    }
}

// Keep the low `to` bytes of each `from`-byte lane, packed into the low
// half of the register.
const fn truncate_pattern(from: usize, to: usize) -> [u8; 16] {
    let mut p = [0u8; 16];
    let mut i = 0;
    while i < 16 {
        let lane = i / to;
        let idx = lane * from + i % to;
        p[i] = if idx < 16 { idx as u8 } else { 16 };
        i += 1;
    }
    p
}

macro_rules! impl_truncate {
    ($narrow:ty, $wide:ty) => {
        impl<const N: usize> TruncateTo<Vec128<$wide, N>> for Desc<$narrow, N> {
            type Out = Vec128<$narrow, N>;

            #[inline]
            fn truncate_to(self, v: Vec128<$wide, N>) -> Vec128<$narrow, N> {
                Vec128::new(v128::i8x16_shuffle(
                    v.raw,
                    V128::ZERO,
                    const { truncate_pattern(<$wide as Lane>::SIZE, <$narrow as Lane>::SIZE) },
                ))
            }
        }
    };
}

impl_truncate!(u32, u64);
impl_truncate!(u16, u64);
impl_truncate!(u8, u64);
impl_truncate!(u16, u32);
impl_truncate!(u8, u32);
impl_truncate!(u8, u16);
