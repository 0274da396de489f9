//! Operations on [`Vec128`] and [`Mask128`].
//!
//! Most operations are inherent methods on the vector and mask types,
//! generated per lane type so each one lowers to the narrow native
//! instruction set. Conversions between lane types are traits on the
//! destination [`Desc`] so the target type is named explicitly at the call
//! site.
//!
//! [`Vec128`]: crate::Vec128
//! [`Mask128`]: crate::Mask128
//! [`Desc`]: crate::Desc

mod arith;
mod block;
mod compare;
mod compress;
mod convert;
mod float;
mod mask;
mod memory;
mod reduce;
mod swizzle;

pub use block::{
    eq128, eq128_upper, lt128, lt128_upper, max128, max128_upper, min128, min128_upper, ne128,
    ne128_upper,
};
pub use convert::{ConvertTo, Demote, Promote, TruncateTo};
pub use mask::if_vec_then_else;
