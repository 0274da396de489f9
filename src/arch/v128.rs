//! The 128-bit register and its native operation set.
//!
//! Operations are written as index loops over fixed-size lane arrays, which
//! the optimizer turns into vector instructions on any host with 128-bit
//! SIMD. The set of functions is deliberately restricted; see the module
//! docs in [`crate::arch`].

use std::array;

use crate::lane::Lane;

/// Raw 128-bit register.
#[derive(Copy, Clone)]
#[repr(C, align(16))]
pub struct V128([u8; 16]);

impl V128 {
    pub const ZERO: V128 = V128([0u8; 16]);

    #[inline]
    pub fn from_bytes(bytes: [u8; 16]) -> Self {
        V128(bytes)
    }

    #[inline]
    pub fn to_bytes(self) -> [u8; 16] {
        self.0
    }

    /// View the register as `N` lanes of `T`. `N * T::SIZE` must be 16.
    #[inline]
    pub(crate) fn lanes<T: Lane, const N: usize>(self) -> [T; N] {
        debug_assert_eq!(N * T::SIZE, 16);
        array::from_fn(|i| T::read(&self.0[i * T::SIZE..]))
    }

    /// Build a register from `N` lanes of `T`. `N * T::SIZE` must be 16.
    #[inline]
    pub(crate) fn from_lanes<T: Lane, const N: usize>(lanes: [T; N]) -> Self {
        debug_assert_eq!(N * T::SIZE, 16);
        let mut bytes = [0u8; 16];
        for i in 0..N {
            lanes[i].write(&mut bytes[i * T::SIZE..]);
        }
        V128(bytes)
    }
}

/// Broadcast a value to every lane.
#[inline]
pub fn splat<T: Lane>(value: T) -> V128 {
    let mut bytes = [0u8; 16];
    let mut i = 0;
    while i + T::SIZE <= 16 {
        value.write(&mut bytes[i..]);
        i += T::SIZE;
    }
    V128(bytes)
}

/// Read lane `i`.
#[inline]
pub fn extract_lane<T: Lane>(v: V128, i: usize) -> T {
    debug_assert!((i + 1) * T::SIZE <= 16);
    T::read(&v.0[i * T::SIZE..])
}

/// Overwrite lane `i`.
#[inline]
pub fn replace_lane<T: Lane>(v: V128, i: usize, value: T) -> V128 {
    debug_assert!((i + 1) * T::SIZE <= 16);
    let mut bytes = v.0;
    value.write(&mut bytes[i * T::SIZE..]);
    V128(bytes)
}

/// Concatenate `a` (indices 0..16) and `b` (indices 16..32) and gather bytes
/// according to the compile-time `pattern`.
#[inline]
pub fn i8x16_shuffle(a: V128, b: V128, pattern: [u8; 16]) -> V128 {
    let (a, b) = (a.0, b.0);
    V128(array::from_fn(|i| {
        let idx = pattern[i] as usize;
        debug_assert!(idx < 32);
        if idx < 16 {
            a[idx]
        } else {
            b[idx - 16]
        }
    }))
}

/// Gather bytes of `v` by a runtime index vector. Indices `>= 16` produce
/// zero.
#[inline]
pub fn i8x16_swizzle(v: V128, idx: V128) -> V128 {
    let v = v.0;
    V128(array::from_fn(|i| {
        let j = idx.0[i] as usize;
        if j < 16 {
            v[j]
        } else {
            0
        }
    }))
}

macro_rules! binary {
    ($name:ident, $t:ty, $n:expr, $f:expr) => {
        #[inline]
        pub fn $name(a: V128, b: V128) -> V128 {
            let (a, b) = (a.lanes::<$t, $n>(), b.lanes::<$t, $n>());
            V128::from_lanes(array::from_fn::<$t, $n, _>(|i| ($f)(a[i], b[i])))
        }
    };
}

macro_rules! unary {
    ($name:ident, $t:ty, $n:expr, $f:expr) => {
        #[inline]
        pub fn $name(v: V128) -> V128 {
            let v = v.lanes::<$t, $n>();
            V128::from_lanes(array::from_fn::<$t, $n, _>(|i| ($f)(v[i])))
        }
    };
}

// Comparisons fill a lane with ones if the condition holds, else zeros.
macro_rules! cmp {
    ($name:ident, $t:ty, $m:ty, $n:expr, $f:expr) => {
        #[inline]
        pub fn $name(a: V128, b: V128) -> V128 {
            let (a, b) = (a.lanes::<$t, $n>(), b.lanes::<$t, $n>());
            V128::from_lanes(array::from_fn::<$m, $n, _>(|i| {
                if ($f)(a[i], b[i]) {
                    !0
                } else {
                    0
                }
            }))
        }
    };
}

// Shift counts are taken modulo the lane width, as on the target.
macro_rules! shift {
    ($name:ident, $t:ty, $n:expr, $f:expr) => {
        #[inline]
        pub fn $name(v: V128, count: u32) -> V128 {
            let v = v.lanes::<$t, $n>();
            V128::from_lanes(array::from_fn::<$t, $n, _>(|i| ($f)(v[i], count)))
        }
    };
}

// Widen the low or high half to double-width lanes.
macro_rules! extend {
    ($name:ident, $src:ty, $dst:ty, $n:expr, $off:expr) => {
        #[inline]
        pub fn $name(v: V128) -> V128 {
            let src = v.lanes::<$src, { 2 * $n }>();
            V128::from_lanes(array::from_fn::<$dst, $n, _>(|i| src[i + $off] as $dst))
        }
    };
}

// Widening multiply of the low or high half.
macro_rules! extmul {
    ($name:ident, $src:ty, $dst:ty, $n:expr, $off:expr) => {
        #[inline]
        pub fn $name(a: V128, b: V128) -> V128 {
            let a = a.lanes::<$src, { 2 * $n }>();
            let b = b.lanes::<$src, { 2 * $n }>();
            V128::from_lanes(array::from_fn::<$dst, $n, _>(|i| {
                (a[i + $off] as $dst) * (b[i + $off] as $dst)
            }))
        }
    };
}

// Saturating narrow: `a` provides the low output lanes, `b` the high ones.
macro_rules! narrow {
    ($name:ident, $src:ty, $dst:ty, $half:expr, $lo:expr, $hi:expr) => {
        #[inline]
        pub fn $name(a: V128, b: V128) -> V128 {
            let a = a.lanes::<$src, $half>();
            let b = b.lanes::<$src, $half>();
            V128::from_lanes(array::from_fn::<$dst, { 2 * $half }, _>(|i| {
                let x = if i < $half { a[i] } else { b[i - $half] };
                x.clamp($lo, $hi) as $dst
            }))
        }
    };
}

macro_rules! all_true {
    ($name:ident, $t:ty, $n:expr) => {
        #[inline]
        pub fn $name(v: V128) -> bool {
            v.lanes::<$t, $n>().iter().all(|&x| x != 0)
        }
    };
}

// Integer add/sub/mul (sign-agnostic two's complement).
binary!(i8x16_add, u8, 16, |a: u8, b: u8| a.wrapping_add(b));
binary!(i16x8_add, u16, 8, |a: u16, b: u16| a.wrapping_add(b));
binary!(i32x4_add, u32, 4, |a: u32, b: u32| a.wrapping_add(b));
binary!(i64x2_add, u64, 2, |a: u64, b: u64| a.wrapping_add(b));
binary!(i8x16_sub, u8, 16, |a: u8, b: u8| a.wrapping_sub(b));
binary!(i16x8_sub, u16, 8, |a: u16, b: u16| a.wrapping_sub(b));
binary!(i32x4_sub, u32, 4, |a: u32, b: u32| a.wrapping_sub(b));
binary!(i64x2_sub, u64, 2, |a: u64, b: u64| a.wrapping_sub(b));
binary!(i16x8_mul, u16, 8, |a: u16, b: u16| a.wrapping_mul(b));
binary!(i32x4_mul, u32, 4, |a: u32, b: u32| a.wrapping_mul(b));
binary!(i64x2_mul, u64, 2, |a: u64, b: u64| a.wrapping_mul(b));

unary!(i8x16_neg, i8, 16, |x: i8| x.wrapping_neg());
unary!(i16x8_neg, i16, 8, |x: i16| x.wrapping_neg());
unary!(i32x4_neg, i32, 4, |x: i32| x.wrapping_neg());
unary!(i64x2_neg, i64, 2, |x: i64| x.wrapping_neg());
unary!(i8x16_abs, i8, 16, |x: i8| x.wrapping_abs());
unary!(i16x8_abs, i16, 8, |x: i16| x.wrapping_abs());
unary!(i32x4_abs, i32, 4, |x: i32| x.wrapping_abs());
unary!(i64x2_abs, i64, 2, |x: i64| x.wrapping_abs());

// Saturating arithmetic exists only at 8 and 16 bits.
binary!(i8x16_add_sat, i8, 16, |a: i8, b: i8| a.saturating_add(b));
binary!(u8x16_add_sat, u8, 16, |a: u8, b: u8| a.saturating_add(b));
binary!(i16x8_add_sat, i16, 8, |a: i16, b: i16| a.saturating_add(b));
binary!(u16x8_add_sat, u16, 8, |a: u16, b: u16| a.saturating_add(b));
binary!(i8x16_sub_sat, i8, 16, |a: i8, b: i8| a.saturating_sub(b));
binary!(u8x16_sub_sat, u8, 16, |a: u8, b: u8| a.saturating_sub(b));
binary!(i16x8_sub_sat, i16, 8, |a: i16, b: i16| a.saturating_sub(b));
binary!(u16x8_sub_sat, u16, 8, |a: u16, b: u16| a.saturating_sub(b));

binary!(u8x16_avgr, u8, 16, |a: u8, b: u8| {
    ((a as u16 + b as u16 + 1) >> 1) as u8
});
binary!(u16x8_avgr, u16, 8, |a: u16, b: u16| {
    ((a as u32 + b as u32 + 1) >> 1) as u16
});

// Min/max stop at 32-bit lanes; 64-bit is synthesized by callers.
binary!(i8x16_min, i8, 16, |a: i8, b: i8| a.min(b));
binary!(u8x16_min, u8, 16, |a: u8, b: u8| a.min(b));
binary!(i16x8_min, i16, 8, |a: i16, b: i16| a.min(b));
binary!(u16x8_min, u16, 8, |a: u16, b: u16| a.min(b));
binary!(i32x4_min, i32, 4, |a: i32, b: i32| a.min(b));
binary!(u32x4_min, u32, 4, |a: u32, b: u32| a.min(b));
binary!(i8x16_max, i8, 16, |a: i8, b: i8| a.max(b));
binary!(u8x16_max, u8, 16, |a: u8, b: u8| a.max(b));
binary!(i16x8_max, i16, 8, |a: i16, b: i16| a.max(b));
binary!(u16x8_max, u16, 8, |a: u16, b: u16| a.max(b));
binary!(i32x4_max, i32, 4, |a: i32, b: i32| a.max(b));
binary!(u32x4_max, u32, 4, |a: u32, b: u32| a.max(b));

// Shifts take a scalar count; there is no 8-bit lane shift.
shift!(i16x8_shl, u16, 8, |x: u16, c: u32| x << (c & 15));
shift!(i16x8_shr_s, i16, 8, |x: i16, c: u32| x >> (c & 15));
shift!(i16x8_shr_u, u16, 8, |x: u16, c: u32| x >> (c & 15));
shift!(i32x4_shl, u32, 4, |x: u32, c: u32| x << (c & 31));
shift!(i32x4_shr_s, i32, 4, |x: i32, c: u32| x >> (c & 31));
shift!(i32x4_shr_u, u32, 4, |x: u32, c: u32| x >> (c & 31));
shift!(i64x2_shl, u64, 2, |x: u64, c: u32| x << (c & 63));
shift!(i64x2_shr_s, i64, 2, |x: i64, c: u32| x >> (c & 63));
shift!(i64x2_shr_u, u64, 2, |x: u64, c: u32| x >> (c & 63));

cmp!(i8x16_eq, u8, u8, 16, |a, b| a == b);
cmp!(i16x8_eq, u16, u16, 8, |a, b| a == b);
cmp!(i32x4_eq, u32, u32, 4, |a, b| a == b);
cmp!(i64x2_eq, u64, u64, 2, |a, b| a == b);
cmp!(i8x16_ne, u8, u8, 16, |a, b| a != b);
cmp!(i16x8_ne, u16, u16, 8, |a, b| a != b);
cmp!(i32x4_ne, u32, u32, 4, |a, b| a != b);
cmp!(i64x2_ne, u64, u64, 2, |a, b| a != b);

cmp!(i8x16_lt_s, i8, u8, 16, |a, b| a < b);
cmp!(i16x8_lt_s, i16, u16, 8, |a, b| a < b);
cmp!(i32x4_lt_s, i32, u32, 4, |a, b| a < b);
cmp!(i64x2_lt_s, i64, u64, 2, |a, b| a < b);
cmp!(i8x16_gt_s, i8, u8, 16, |a, b| a > b);
cmp!(i16x8_gt_s, i16, u16, 8, |a, b| a > b);
cmp!(i32x4_gt_s, i32, u32, 4, |a, b| a > b);
cmp!(i64x2_gt_s, i64, u64, 2, |a, b| a > b);
cmp!(i8x16_le_s, i8, u8, 16, |a, b| a <= b);
cmp!(i16x8_le_s, i16, u16, 8, |a, b| a <= b);
cmp!(i32x4_le_s, i32, u32, 4, |a, b| a <= b);
cmp!(i64x2_le_s, i64, u64, 2, |a, b| a <= b);
cmp!(i8x16_ge_s, i8, u8, 16, |a, b| a >= b);
cmp!(i16x8_ge_s, i16, u16, 8, |a, b| a >= b);
cmp!(i32x4_ge_s, i32, u32, 4, |a, b| a >= b);
cmp!(i64x2_ge_s, i64, u64, 2, |a, b| a >= b);

// No unsigned 64-bit comparison on the target.
cmp!(u8x16_lt_u, u8, u8, 16, |a, b| a < b);
cmp!(u16x8_lt_u, u16, u16, 8, |a, b| a < b);
cmp!(u32x4_lt_u, u32, u32, 4, |a, b| a < b);
cmp!(u8x16_gt_u, u8, u8, 16, |a, b| a > b);
cmp!(u16x8_gt_u, u16, u16, 8, |a, b| a > b);
cmp!(u32x4_gt_u, u32, u32, 4, |a, b| a > b);
cmp!(u8x16_le_u, u8, u8, 16, |a, b| a <= b);
cmp!(u16x8_le_u, u16, u16, 8, |a, b| a <= b);
cmp!(u32x4_le_u, u32, u32, 4, |a, b| a <= b);
cmp!(u8x16_ge_u, u8, u8, 16, |a, b| a >= b);
cmp!(u16x8_ge_u, u16, u16, 8, |a, b| a >= b);
cmp!(u32x4_ge_u, u32, u32, 4, |a, b| a >= b);

binary!(f32x4_add, f32, 4, |a: f32, b: f32| a + b);
binary!(f32x4_sub, f32, 4, |a: f32, b: f32| a - b);
binary!(f32x4_mul, f32, 4, |a: f32, b: f32| a * b);
binary!(f32x4_div, f32, 4, |a: f32, b: f32| a / b);
unary!(f32x4_sqrt, f32, 4, |x: f32| x.sqrt());
unary!(f32x4_abs, f32, 4, |x: f32| f32::from_bits(
    x.to_bits() & 0x7FFF_FFFF
));
unary!(f32x4_neg, f32, 4, |x: f32| f32::from_bits(
    x.to_bits() ^ 0x8000_0000
));
// Pseudo-min/max: return the second operand if either is NaN.
binary!(f32x4_pmin, f32, 4, |a: f32, b: f32| if b < a { b } else { a });
binary!(f32x4_pmax, f32, 4, |a: f32, b: f32| if a < b { b } else { a });
unary!(f32x4_ceil, f32, 4, |x: f32| x.ceil());
unary!(f32x4_floor, f32, 4, |x: f32| x.floor());
unary!(f32x4_trunc, f32, 4, |x: f32| x.trunc());
unary!(f32x4_nearest, f32, 4, |x: f32| x.round_ties_even());
cmp!(f32x4_eq, f32, u32, 4, |a, b| a == b);
cmp!(f32x4_ne, f32, u32, 4, |a, b| a != b);
cmp!(f32x4_lt, f32, u32, 4, |a, b| a < b);
cmp!(f32x4_le, f32, u32, 4, |a, b| a <= b);
cmp!(f32x4_gt, f32, u32, 4, |a, b| a > b);
cmp!(f32x4_ge, f32, u32, 4, |a, b| a >= b);

binary!(f64x2_add, f64, 2, |a: f64, b: f64| a + b);
binary!(f64x2_sub, f64, 2, |a: f64, b: f64| a - b);
binary!(f64x2_mul, f64, 2, |a: f64, b: f64| a * b);
binary!(f64x2_div, f64, 2, |a: f64, b: f64| a / b);
unary!(f64x2_sqrt, f64, 2, |x: f64| x.sqrt());
unary!(f64x2_abs, f64, 2, |x: f64| f64::from_bits(
    x.to_bits() & 0x7FFF_FFFF_FFFF_FFFF
));
unary!(f64x2_neg, f64, 2, |x: f64| f64::from_bits(
    x.to_bits() ^ 0x8000_0000_0000_0000
));
binary!(f64x2_pmin, f64, 2, |a: f64, b: f64| if b < a { b } else { a });
binary!(f64x2_pmax, f64, 2, |a: f64, b: f64| if a < b { b } else { a });
unary!(f64x2_ceil, f64, 2, |x: f64| x.ceil());
unary!(f64x2_floor, f64, 2, |x: f64| x.floor());
unary!(f64x2_trunc, f64, 2, |x: f64| x.trunc());
unary!(f64x2_nearest, f64, 2, |x: f64| x.round_ties_even());
cmp!(f64x2_eq, f64, u64, 2, |a, b| a == b);
cmp!(f64x2_ne, f64, u64, 2, |a, b| a != b);
cmp!(f64x2_lt, f64, u64, 2, |a, b| a < b);
cmp!(f64x2_le, f64, u64, 2, |a, b| a <= b);
cmp!(f64x2_gt, f64, u64, 2, |a, b| a > b);
cmp!(f64x2_ge, f64, u64, 2, |a, b| a >= b);

extend!(i16x8_extend_low_i8x16, i8, i16, 8, 0);
extend!(i16x8_extend_high_i8x16, i8, i16, 8, 8);
extend!(u16x8_extend_low_u8x16, u8, u16, 8, 0);
extend!(u16x8_extend_high_u8x16, u8, u16, 8, 8);
extend!(i32x4_extend_low_i16x8, i16, i32, 4, 0);
extend!(i32x4_extend_high_i16x8, i16, i32, 4, 4);
extend!(u32x4_extend_low_u16x8, u16, u32, 4, 0);
extend!(u32x4_extend_high_u16x8, u16, u32, 4, 4);
extend!(i64x2_extend_low_i32x4, i32, i64, 2, 0);
extend!(i64x2_extend_high_i32x4, i32, i64, 2, 2);
extend!(u64x2_extend_low_u32x4, u32, u64, 2, 0);
extend!(u64x2_extend_high_u32x4, u32, u64, 2, 2);

extmul!(i32x4_extmul_low_i16x8, i16, i32, 4, 0);
extmul!(i32x4_extmul_high_i16x8, i16, i32, 4, 4);
extmul!(u32x4_extmul_low_u16x8, u16, u32, 4, 0);
extmul!(u32x4_extmul_high_u16x8, u16, u32, 4, 4);

narrow!(i8x16_narrow_i16x8, i16, i8, 8, -128, 127);
narrow!(u8x16_narrow_i16x8, i16, u8, 8, 0, 255);
narrow!(i16x8_narrow_i32x4, i32, i16, 4, -32768, 32767);
narrow!(u16x8_narrow_i32x4, i32, u16, 4, 0, 65535);

// Conversions round toward zero and saturate; NaN converts to zero.
#[inline]
pub fn f32x4_convert_i32x4_s(v: V128) -> V128 {
    let v = v.lanes::<i32, 4>();
    V128::from_lanes(array::from_fn::<f32, 4, _>(|i| v[i] as f32))
}
#[inline]
pub fn f32x4_convert_u32x4(v: V128) -> V128 {
    let v = v.lanes::<u32, 4>();
    V128::from_lanes(array::from_fn::<f32, 4, _>(|i| v[i] as f32))
}
#[inline]
pub fn i32x4_trunc_sat_f32x4_s(v: V128) -> V128 {
    let v = v.lanes::<f32, 4>();
    V128::from_lanes(array::from_fn::<i32, 4, _>(|i| v[i] as i32))
}
#[inline]
pub fn u32x4_trunc_sat_f32x4(v: V128) -> V128 {
    let v = v.lanes::<f32, 4>();
    V128::from_lanes(array::from_fn::<u32, 4, _>(|i| v[i] as u32))
}
#[inline]
pub fn f64x2_convert_low_i32x4_s(v: V128) -> V128 {
    let v = v.lanes::<i32, 4>();
    V128::from_lanes([v[0] as f64, v[1] as f64])
}
#[inline]
pub fn f64x2_promote_low_f32x4(v: V128) -> V128 {
    let v = v.lanes::<f32, 4>();
    V128::from_lanes([v[0] as f64, v[1] as f64])
}
#[inline]
pub fn f32x4_demote_f64x2_zero(v: V128) -> V128 {
    let v = v.lanes::<f64, 2>();
    V128::from_lanes([v[0] as f32, v[1] as f32, 0.0, 0.0])
}
#[inline]
pub fn i32x4_trunc_sat_f64x2_s_zero(v: V128) -> V128 {
    let v = v.lanes::<f64, 2>();
    V128::from_lanes([v[0] as i32, v[1] as i32, 0, 0])
}

#[inline]
pub fn v128_and(a: V128, b: V128) -> V128 {
    V128(array::from_fn(|i| a.0[i] & b.0[i]))
}

#[inline]
pub fn v128_or(a: V128, b: V128) -> V128 {
    V128(array::from_fn(|i| a.0[i] | b.0[i]))
}

#[inline]
pub fn v128_xor(a: V128, b: V128) -> V128 {
    V128(array::from_fn(|i| a.0[i] ^ b.0[i]))
}

#[inline]
pub fn v128_not(v: V128) -> V128 {
    V128(array::from_fn(|i| !v.0[i]))
}

/// `a & !b`.
#[inline]
pub fn v128_andnot(a: V128, b: V128) -> V128 {
    V128(array::from_fn(|i| a.0[i] & !b.0[i]))
}

/// Select bits of `a` where `mask` is set, bits of `b` elsewhere.
#[inline]
pub fn v128_bitselect(a: V128, b: V128, mask: V128) -> V128 {
    V128(array::from_fn(|i| (a.0[i] & mask.0[i]) | (b.0[i] & !mask.0[i])))
}

#[inline]
pub fn v128_any_true(v: V128) -> bool {
    v.0.iter().any(|&x| x != 0)
}

all_true!(i8x16_all_true, u8, 16);
all_true!(i16x8_all_true, u16, 8);
all_true!(i32x4_all_true, u32, 4);
all_true!(i64x2_all_true, u64, 2);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lane_round_trip() {
        let v = V128::from_lanes::<u32, 4>([1, 2, 3, 4]);
        assert_eq!(v.lanes::<u32, 4>(), [1, 2, 3, 4]);
        let b = v.to_bytes();
        assert_eq!(b[0], 1);
        assert_eq!(b[4], 2);
    }

    #[test]
    fn test_pmin_pmax_nan_direction() {
        let nan = splat::<f32>(f32::NAN);
        let x = splat::<f32>(3.0);
        // pmin(b, a) with a = NaN yields b.
        assert_eq!(f32x4_pmin(x, nan).lanes::<f32, 4>(), [3.0; 4]);
        // pmin(b, a) with b = NaN yields a's NaN.
        assert!(f32x4_pmin(nan, x).lanes::<f32, 4>()[0].is_nan());
    }

    #[test]
    fn test_narrow_saturates() {
        let v = V128::from_lanes::<i16, 8>([300, -300, 127, -128, 0, 1, -1, 255]);
        let n = i8x16_narrow_i16x8(v, v);
        assert_eq!(
            n.lanes::<i8, 16>()[..8],
            [127, -128, 127, -128, 0, 1, -1, 127]
        );
        let u = u8x16_narrow_i16x8(v, v);
        assert_eq!(u.lanes::<u8, 16>()[..8], [255, 0, 127, 0, 0, 1, 0, 255]);
    }

    #[test]
    fn test_trunc_sat() {
        let v = V128::from_lanes::<f32, 4>([1.9, -2.9, 3.0e9, f32::NAN]);
        assert_eq!(
            i32x4_trunc_sat_f32x4_s(v).lanes::<i32, 4>(),
            [1, -2, i32::MAX, 0]
        );
    }

    #[test]
    fn test_shuffle_selects_from_both_inputs() {
        let a = V128::from_bytes(std::array::from_fn(|i| i as u8));
        let b = V128::from_bytes(std::array::from_fn(|i| 100 + i as u8));
        let mut pattern = [0u8; 16];
        pattern[0] = 5;
        pattern[1] = 16;
        let out = i8x16_shuffle(a, b, pattern);
        assert_eq!(out.to_bytes()[0], 5);
        assert_eq!(out.to_bytes()[1], 100);
    }
}
