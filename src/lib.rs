//! Portable 128-bit SIMD library.
//!
//! simd128 exposes a fixed-width, 128-bit SIMD register through safe, typed
//! wrappers. Operations are defined once against a portable instruction set
//! modeled on [WebAssembly SIMD](https://webassembly.github.io/spec/core/syntax/instructions.html#vector-instructions)
//! and implemented with autovectorization-friendly array code, so the same
//! source compiles everywhere and maps to SSE, Neon or Wasm SIMD under an
//! optimizing build.
//!
//! The design is inspired by Google's
//! [Highway](https://github.com/google/highway) library for C++.
//!
//! ## Lanes and partial vectors
//!
//! A vector type [`Vec128<T, N>`](Vec128) always occupies 16 bytes but is
//! *logically* `N` lanes of `T`, where `N * size_of::<T>()` may be less than
//! 16. Bytes past the logical lanes hold unspecified values. Every operation
//! guarantees correct results in the logical lanes regardless of what those
//! trailing bytes contain, and operations that summarize a vector (packed
//! mask bits, lane counts, reductions, compaction) never let them influence
//! the result. Loads and stores touch exactly `N` elements of memory.
//!
//! The lane type and count travel in a zero-sized descriptor,
//! [`Desc<T, N>`](Desc), which is the entry point for construction, memory
//! transfer and the operations that need a target shape.
//!
//! ## Example
//!
//! ```
//! use simd128::Desc;
//!
//! let d = Desc::<f32, 4>::new();
//! let a = d.load(&[1.0, 2.0, 3.0, 4.0]);
//! let b = d.set(10.0);
//! let mut out = [0.0; 4];
//! d.store(a * b, &mut out);
//! assert_eq!(out, [10.0, 20.0, 30.0, 40.0]);
//! ```

mod arch;
pub mod half;
mod lane;
pub mod ops;
mod vec;

pub use half::{Bf16, F16};
pub use lane::{Lane, NumLane};
pub use vec::{Desc, Indices128, Mask128, Vec128};

/// Assert that two vectors or masks have equal logical lanes.
///
/// Compares via `to_array`, so unspecified trailing bytes of partial
/// vectors are ignored.
#[macro_export]
macro_rules! assert_simd_eq {
    ($a:expr, $b:expr $(,)?) => {
        assert_eq!($a.to_array(), $b.to_array())
    };
}

/// Assert that two vectors or masks differ in at least one logical lane.
#[macro_export]
macro_rules! assert_simd_ne {
    ($a:expr, $b:expr $(,)?) => {
        assert_ne!($a.to_array(), $b.to_array())
    };
}

#[cfg(test)]
mod tests {
    use crate::{Desc, Vec128};

    #[test]
    fn test_assert_simd_eq() {
        let d = Desc::<i32, 4>::new();
        assert_simd_eq!(d.iota(1) + d.iota(1), d.set(2) * d.iota(1));
        assert_simd_ne!(d.iota(0), d.iota(1));
    }

    #[test]
    fn test_partial_vector_round_trip() {
        let d = Desc::<u16, 4>::new();
        let v: Vec128<u16, 4> = d.load(&[5, 6, 7, 8]);
        let mut out = [0u16; 4];
        d.store(v, &mut out);
        assert_eq!(out, [5, 6, 7, 8]);
    }
}
