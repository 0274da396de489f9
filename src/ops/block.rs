//! Comparisons of a full register viewed as one 128-bit integer.
//!
//! Lane 0 is the low half and lane 1 the high half. The tie-break mirrors
//! the synthesized unsigned 64-bit compare: the high half decides unless
//! equal, then the low half does, and the decision is broadcast to both
//! lanes so the result is usable as an ordinary two-lane mask.

use crate::vec::{Desc, Mask128, Vec128};

type V = Vec128<u64, 2>;
type M = Mask128<u64, 2>;

/// Whole-register unsigned `a < b`.
#[inline]
pub fn lt128(_d: Desc<u64, 2>, a: V, b: V) -> M {
    let eq_halves = a.eq(b).to_vec();
    let lt_halves = a.lt(b).to_vec();
    let lt_low = lt_halves.dup_even();
    let decided = crate::ops::if_vec_then_else(eq_halves, lt_low, lt_halves);
    Mask128::from_vec(decided.dup_odd())
}

/// Whole-register `a == b`.
#[inline]
pub fn eq128(d: Desc<u64, 2>, a: V, b: V) -> M {
    let eq_halves = a.eq(b).to_vec();
    Mask128::from_vec(d.reverse2(eq_halves) & eq_halves)
}

/// Whole-register `a != b`.
#[inline]
pub fn ne128(d: Desc<u64, 2>, a: V, b: V) -> M {
    let ne_halves = a.ne(b).to_vec();
    Mask128::from_vec(d.reverse2(ne_halves) | ne_halves)
}

/// `a < b` considering only the upper 64-bit lane as the key.
#[inline]
pub fn lt128_upper(_d: Desc<u64, 2>, a: V, b: V) -> M {
    let lt_halves = a.lt(b).to_vec();
    Mask128::from_vec(lt_halves.interleave_upper(lt_halves))
}

/// `a == b` considering only the upper 64-bit lane as the key.
#[inline]
pub fn eq128_upper(_d: Desc<u64, 2>, a: V, b: V) -> M {
    let eq_halves = a.eq(b).to_vec();
    Mask128::from_vec(eq_halves.interleave_upper(eq_halves))
}

/// `a != b` considering only the upper 64-bit lane as the key.
#[inline]
pub fn ne128_upper(_d: Desc<u64, 2>, a: V, b: V) -> M {
    let ne_halves = a.ne(b).to_vec();
    Mask128::from_vec(ne_halves.interleave_upper(ne_halves))
}

/// The smaller of `a` and `b` as 128-bit unsigned integers.
#[inline]
pub fn min128(d: Desc<u64, 2>, a: V, b: V) -> V {
    lt128(d, a, b).if_then_else(a, b)
}

/// The larger of `a` and `b` as 128-bit unsigned integers.
#[inline]
pub fn max128(d: Desc<u64, 2>, a: V, b: V) -> V {
    lt128(d, b, a).if_then_else(a, b)
}

/// [`min128`] keyed on the upper lane only; the loser's low lane comes
/// along with its key.
#[inline]
pub fn min128_upper(d: Desc<u64, 2>, a: V, b: V) -> V {
    lt128_upper(d, a, b).if_then_else(a, b)
}

/// [`max128`] keyed on the upper lane only.
#[inline]
pub fn max128_upper(d: Desc<u64, 2>, a: V, b: V) -> V {
    lt128_upper(d, b, a).if_then_else(a, b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vec::{Desc, Vec128};

    fn v(lo: u64, hi: u64) -> Vec128<u64, 2> {
        Vec128::from_array([lo, hi])
    }

    #[test]
    fn test_lt128_tie_break() {
        let d = Desc::<u64, 2>::new();
        // High halves differ.
        assert_eq!(lt128(d, v(u64::MAX, 1), v(0, 2)).to_array(), [true, true]);
        assert_eq!(lt128(d, v(0, 2), v(u64::MAX, 1)).to_array(), [false, false]);
        // High halves equal, low halves decide.
        assert_eq!(lt128(d, v(3, 7), v(4, 7)).to_array(), [true, true]);
        assert_eq!(lt128(d, v(4, 7), v(3, 7)).to_array(), [false, false]);
        assert_eq!(lt128(d, v(4, 7), v(4, 7)).to_array(), [false, false]);
    }

    #[test]
    fn test_eq_ne_128() {
        let d = Desc::<u64, 2>::new();
        assert_eq!(eq128(d, v(1, 2), v(1, 2)).to_array(), [true, true]);
        assert_eq!(eq128(d, v(1, 2), v(1, 3)).to_array(), [false, false]);
        assert_eq!(eq128(d, v(0, 2), v(1, 2)).to_array(), [false, false]);
        assert_eq!(ne128(d, v(1, 2), v(1, 2)).to_array(), [false, false]);
        assert_eq!(ne128(d, v(0, 2), v(1, 2)).to_array(), [true, true]);
    }

    #[test]
    fn test_upper_variants_ignore_low() {
        let d = Desc::<u64, 2>::new();
        assert_eq!(lt128_upper(d, v(9, 1), v(0, 2)).to_array(), [true, true]);
        assert_eq!(lt128_upper(d, v(9, 2), v(0, 2)).to_array(), [false, false]);
        assert_eq!(eq128_upper(d, v(9, 2), v(0, 2)).to_array(), [true, true]);
        assert_eq!(ne128_upper(d, v(9, 2), v(0, 2)).to_array(), [false, false]);
    }

    #[test]
    fn test_min_max_128() {
        let d = Desc::<u64, 2>::new();
        let a = v(u64::MAX, 1);
        let b = v(0, 2);
        assert_eq!(min128(d, a, b).to_array(), a.to_array());
        assert_eq!(max128(d, a, b).to_array(), b.to_array());
        // Upper-keyed: the whole loser travels with its key.
        assert_eq!(min128_upper(d, a, b).to_array(), a.to_array());
        assert_eq!(max128_upper(d, a, b).to_array(), b.to_array());
    }
}
