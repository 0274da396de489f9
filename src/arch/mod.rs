//! Native instruction layer.
//!
//! Everything above this module is built from the fixed set of operations
//! exposed here, which mirrors the modeled 128-bit target: shuffles take
//! compile-time byte patterns, shifts take a scalar count, saturating
//! arithmetic exists only at 8/16 bits, there are no 8-bit shifts, no 64-bit
//! integer min/max and no unsigned 64-bit comparison. The portable layer
//! synthesizes the missing operations from these.

pub(crate) mod v128;

pub use v128::V128;
