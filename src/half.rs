//! Half-width float storage types.
//!
//! [`F16`] and [`Bf16`] are storage-only lane types: the target has no
//! half-precision arithmetic, so vectors of these types exist to be loaded,
//! stored and promoted to `f32`. The scalar codecs here use the same bit
//! manipulation as the vector promote/demote paths so both agree exactly.

use std::fmt;

/// IEEE 754 binary16 bit pattern.
#[derive(Copy, Clone, Default, PartialEq)]
pub struct F16(u16);

impl F16 {
    #[inline]
    pub const fn from_bits(bits: u16) -> Self {
        F16(bits)
    }

    #[inline]
    pub const fn to_bits(self) -> u16 {
        self.0
    }

    /// Convert from `f32`, truncating excess mantissa bits.
    ///
    /// Exponents below -24 flush to +0; exponents in [-24, -14) produce a
    /// subnormal. Matches the vector demote path bit-for-bit.
    #[inline]
    pub fn from_f32(x: f32) -> Self {
        let bits32 = x.to_bits();
        let sign = bits32 >> 31;
        let biased_exp32 = (bits32 >> 23) & 0xFF;
        let mantissa32 = bits32 & 0x7F_FFFF;

        let exp = (biased_exp32 as i32 - 127).min(15);
        if exp < -24 {
            return F16(0);
        }

        let (biased_exp16, mantissa16) = if exp < -14 {
            let sub_exp = (-14 - exp) as u32; // [1, 11)
            let sub_m = (1 << (10 - sub_exp)) + (mantissa32 >> (13 + sub_exp));
            (0, sub_m)
        } else {
            ((exp + 15) as u32, mantissa32 >> 13)
        };
        F16(((sign << 15) | (biased_exp16 << 10) | mantissa16) as u16)
    }

    /// Convert to `f32`. This is exact for every bit pattern.
    #[inline]
    pub fn to_f32(self) -> f32 {
        let bits16 = self.0 as u32;
        let sign = bits16 >> 15;
        let biased_exp = (bits16 >> 10) & 0x1F;
        let mantissa = bits16 & 0x3FF;

        let magnitude = if biased_exp == 0 {
            // Subnormal: the mantissa counts units of 2^-24.
            (mantissa as f32 * (1.0 / 16384.0 / 1024.0)).to_bits()
        } else {
            ((biased_exp + (127 - 15)) << 23) | (mantissa << 13)
        };
        f32::from_bits((sign << 31) | magnitude)
    }
}

impl fmt::Debug for F16 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "F16({:#06x})", self.0)
    }
}

/// Brain-float bit pattern: the upper 16 bits of an `f32`.
#[derive(Copy, Clone, Default, PartialEq)]
pub struct Bf16(u16);

impl Bf16 {
    #[inline]
    pub const fn from_bits(bits: u16) -> Self {
        Bf16(bits)
    }

    #[inline]
    pub const fn to_bits(self) -> u16 {
        self.0
    }

    /// Convert from `f32` by truncation (round toward zero).
    #[inline]
    pub fn from_f32(x: f32) -> Self {
        Bf16((x.to_bits() >> 16) as u16)
    }

    #[inline]
    pub fn to_f32(self) -> f32 {
        f32::from_bits((self.0 as u32) << 16)
    }
}

impl fmt::Debug for Bf16 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Bf16({:#06x})", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::{Bf16, F16};

    #[test]
    fn test_f16_round_trip_of_exact_values() {
        for x in [0.0f32, 1.0, -1.0, 0.5, 2.0, 65504.0, -0.25] {
            assert_eq!(F16::from_f32(x).to_f32(), x);
        }
        assert_eq!(F16::from_f32(1.0).to_bits(), 0x3C00);
    }

    #[test]
    fn test_f16_subnormals() {
        // Smallest f16 subnormal is 2^-24.
        let tiny = F16::from_bits(1);
        assert_eq!(tiny.to_f32(), f32::powi(2.0, -24));
        assert_eq!(F16::from_f32(f32::powi(2.0, -24)).to_bits(), 1);
        // Below 2^-24 flushes to +0.
        assert_eq!(F16::from_f32(f32::powi(2.0, -26)).to_bits(), 0);
    }

    #[test]
    fn test_f16_truncates_mantissa() {
        // 1 + 2^-11 is not representable; truncation drops the low bit.
        let x = 1.0 + f32::powi(2.0, -11);
        assert_eq!(F16::from_f32(x).to_bits(), 0x3C00);
    }

    #[test]
    fn test_bf16_round_trip() {
        for x in [0.0f32, 1.0, -2.5, 3.0e38] {
            assert_eq!(Bf16::from_f32(x).to_f32(), x);
        }
        assert_eq!(Bf16::from_f32(1.0).to_bits(), 0x3F80);
    }
}
