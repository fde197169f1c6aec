// DIFFICULTY TARGETS
// Compact ("nBits") encoding of 256-bit proof-of-work targets.
//
// SAFETY INVARIANTS:
// 1. Decoding rejects negative and overflowing compact values
// 2. A hash meets a target iff its little-endian integer value is <= the target
// 3. Encoding truncates toward zero, so decode(encode(t)) <= t

use crate::error::CryptoError;
use crate::hash::Hash256;
use num_bigint::BigUint;
use std::fmt;

const SIGN_BIT: u32 = 0x0080_0000;
const MANTISSA_MASK: u32 = 0x007f_ffff;

/// A decoded 256-bit proof-of-work target.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Target(BigUint);

impl Target {
    /// Decode a compact `bits` value.
    pub fn from_compact(bits: u32) -> Result<Self, CryptoError> {
        let size = bits >> 24;
        let mut word = bits & MANTISSA_MASK;

        let value = if size <= 3 {
            word >>= 8 * (3 - size);
            BigUint::from(word)
        } else {
            BigUint::from(word) << (8 * (size - 3)) as usize
        };

        if word != 0 && bits & SIGN_BIT != 0 {
            return Err(CryptoError::NegativeTarget(bits));
        }
        let overflow = word != 0
            && (size > 34 || (word > 0xff && size > 33) || (word > 0xffff && size > 32));
        if overflow {
            return Err(CryptoError::TargetOverflow(bits));
        }

        Ok(Target(value))
    }

    /// A target equal to the integer value of `limit` (e.g. a network PoW limit).
    pub fn from_hash(limit: &Hash256) -> Self {
        Target(limit.to_biguint())
    }

    /// Encode into compact form, truncating the mantissa to 23 bits.
    pub fn to_compact(&self) -> u32 {
        let mut size = ((self.0.bits() + 7) / 8) as u32;
        let mut compact: u32 = if size <= 3 {
            let low = self.0.iter_u64_digits().next().unwrap_or(0);
            (low << (8 * (3 - size))) as u32
        } else {
            let shifted = &self.0 >> (8 * (size - 3)) as usize;
            shifted.iter_u64_digits().next().unwrap_or(0) as u32
        };

        // Keep the sign bit clear by moving one byte into the exponent.
        if compact & SIGN_BIT != 0 {
            compact >>= 8;
            size += 1;
        }
        compact | (size << 24)
    }

    /// Whether `hash` satisfies this target.
    pub fn is_met_by(&self, hash: &Hash256) -> bool {
        hash.to_biguint() <= self.0
    }

    pub fn as_biguint(&self) -> &BigUint {
        &self.0
    }
}

impl fmt::Debug for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Target({:064x})", self.0)
    }
}
