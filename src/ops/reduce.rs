//! Butterfly reductions.
//!
//! Each reduction combines lanes pairwise through shuffles, `log2(N)`
//! steps, and broadcasts the final value to every logical lane. 16-bit
//! lanes have no useful shuffle ladder of their own; they are split into
//! even/odd 32-bit halves, reduced at 32 bits and re-interleaved.

use crate::arch::v128::{self, V128};
use crate::vec::{Desc, Vec128};

// Swap the 64-bit halves.
const SHUF_1032: [u8; 16] = [8, 9, 10, 11, 12, 13, 14, 15, 0, 1, 2, 3, 4, 5, 6, 7];
// Rotate 32-bit lanes down by one.
const SHUF_0321: [u8; 16] = [4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 0, 1, 2, 3];
// Swap adjacent 32-bit lanes.
const SHUF_2301: [u8; 16] = [4, 5, 6, 7, 0, 1, 2, 3, 12, 13, 14, 15, 8, 9, 10, 11];

#[inline]
fn shuffle(v: V128, pattern: [u8; 16]) -> V128 {
    v128::i8x16_shuffle(v, v, pattern)
}

#[inline]
fn reduce_32(v: V128, n: usize, comb: fn(V128, V128) -> V128) -> V128 {
    match n {
        1 => v,
        2 => comb(v, shuffle(v, SHUF_2301)),
        4 => {
            let x = comb(v, shuffle(v, SHUF_1032));
            comb(x, shuffle(x, SHUF_0321))
        }
        _ => unreachable!(),
    }
}

#[inline]
fn reduce_64(v: V128, n: usize, comb: fn(V128, V128) -> V128) -> V128 {
    if n == 2 {
        comb(v, shuffle(v, SHUF_1032))
    } else {
        v
    }
}

macro_rules! impl_reduce_32 {
    ($t:ty, $add:path, $min:path, $max:path) => {
        impl<const N: usize> Desc<$t, N> {
            /// Sum of the logical lanes, broadcast to every lane.
            #[inline]
            pub fn sum_of_lanes(self, v: Vec128<$t, N>) -> Vec128<$t, N> {
                Vec128::new(reduce_32(v.raw, N, $add))
            }

            /// Minimum of the logical lanes, broadcast to every lane.
            #[inline]
            pub fn min_of_lanes(self, v: Vec128<$t, N>) -> Vec128<$t, N> {
                Vec128::new(reduce_32(v.raw, N, $min))
            }

            /// Maximum of the logical lanes, broadcast to every lane.
            #[inline]
            pub fn max_of_lanes(self, v: Vec128<$t, N>) -> Vec128<$t, N> {
                Vec128::new(reduce_32(v.raw, N, $max))
            }
        }
    };
}

impl_reduce_32!(u32, v128::i32x4_add, v128::u32x4_min, v128::u32x4_max);
impl_reduce_32!(i32, v128::i32x4_add, v128::i32x4_min, v128::i32x4_max);
impl_reduce_32!(f32, v128::f32x4_add, v128::f32x4_pmin, v128::f32x4_pmax);

macro_rules! impl_reduce_64 {
    ($t:ty, $add:path, $comb_min:expr, $comb_max:expr) => {
        impl<const N: usize> Desc<$t, N> {
            /// Sum of the logical lanes, broadcast to every lane.
            #[inline]
            pub fn sum_of_lanes(self, v: Vec128<$t, N>) -> Vec128<$t, N> {
                Vec128::new(reduce_64(v.raw, N, $add))
            }

            /// Minimum of the logical lanes, broadcast to every lane.
            #[inline]
            pub fn min_of_lanes(self, v: Vec128<$t, N>) -> Vec128<$t, N> {
                Vec128::new(reduce_64(v.raw, N, $comb_min))
            }

            /// Maximum of the logical lanes, broadcast to every lane.
            #[inline]
            pub fn max_of_lanes(self, v: Vec128<$t, N>) -> Vec128<$t, N> {
                Vec128::new(reduce_64(v.raw, N, $comb_max))
            }
        }
    };
}

// 64-bit integer min/max has no native form; the combiner reuses the
// scalar synthesis.
fn min_i64(a: V128, b: V128) -> V128 {
    let (a, b) = (a.lanes::<i64, 2>(), b.lanes::<i64, 2>());
    V128::from_lanes([a[0].min(b[0]), a[1].min(b[1])])
}

fn max_i64(a: V128, b: V128) -> V128 {
    let (a, b) = (a.lanes::<i64, 2>(), b.lanes::<i64, 2>());
    V128::from_lanes([a[0].max(b[0]), a[1].max(b[1])])
}

fn min_u64(a: V128, b: V128) -> V128 {
    let (a, b) = (a.lanes::<u64, 2>(), b.lanes::<u64, 2>());
    V128::from_lanes([a[0].min(b[0]), a[1].min(b[1])])
}

fn max_u64(a: V128, b: V128) -> V128 {
    let (a, b) = (a.lanes::<u64, 2>(), b.lanes::<u64, 2>());
    V128::from_lanes([a[0].max(b[0]), a[1].max(b[1])])
}

impl_reduce_64!(u64, v128::i64x2_add, min_u64, max_u64);
impl_reduce_64!(i64, v128::i64x2_add, min_i64, max_i64);
impl_reduce_64!(f64, v128::f64x2_add, v128::f64x2_pmin, v128::f64x2_pmax);

// Split 16-bit lanes into even/odd 32-bit halves, seed the reduction with
// their combination, finish at 32 bits, then write the low 16 bits of the
// result into both halves of every 32-bit lane.
#[inline]
fn reduce_16(
    v: V128,
    n: usize,
    split: fn(V128) -> (V128, V128),
    comb: fn(V128, V128) -> V128,
) -> V128 {
    let (even, odd) = split(v);
    let seed = comb(even, odd);
    let reduced = reduce_32(seed, n / 2, comb);
    let low16 = v128::v128_and(reduced, v128::splat::<u32>(0xFFFF));
    v128::v128_or(low16, v128::i32x4_shl(reduced, 16))
}

fn split_u16(v: V128) -> (V128, V128) {
    let even = v128::v128_and(v, v128::splat::<u32>(0xFFFF));
    let odd = v128::i32x4_shr_u(v, 16);
    (even, odd)
}

fn split_i16(v: V128) -> (V128, V128) {
    let even = v128::i32x4_shr_s(v128::i32x4_shl(v, 16), 16);
    let odd = v128::i32x4_shr_s(v, 16);
    (even, odd)
}

macro_rules! impl_reduce_16 {
    ($t:ty, $split:path, $add:path, $min:path, $max:path) => {
        impl<const N: usize> Desc<$t, N> {
            /// Sum of the logical lanes, broadcast to every lane.
            #[inline]
            pub fn sum_of_lanes(self, v: Vec128<$t, N>) -> Vec128<$t, N> {
                const {
                    assert!(N >= 2, "16-bit reductions need at least two lanes");
                }
                Vec128::new(reduce_16(v.raw, N, $split, $add))
            }

            /// Minimum of the logical lanes, broadcast to every lane.
            #[inline]
            pub fn min_of_lanes(self, v: Vec128<$t, N>) -> Vec128<$t, N> {
                const {
                    assert!(N >= 2, "16-bit reductions need at least two lanes");
                }
                Vec128::new(reduce_16(v.raw, N, $split, $min))
            }

            /// Maximum of the logical lanes, broadcast to every lane.
            #[inline]
            pub fn max_of_lanes(self, v: Vec128<$t, N>) -> Vec128<$t, N> {
                const {
                    assert!(N >= 2, "16-bit reductions need at least two lanes");
                }
                Vec128::new(reduce_16(v.raw, N, $split, $max))
            }
        }
    };
}

impl_reduce_16!(u16, split_u16, v128::i32x4_add, v128::u32x4_min, v128::u32x4_max);
impl_reduce_16!(i16, split_i16, v128::i32x4_add, v128::i32x4_min, v128::i32x4_max);
