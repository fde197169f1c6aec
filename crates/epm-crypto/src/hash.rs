// CONSENSUS HASH PRIMITIVES
// 256-bit hashes in the node's canonical byte order.
//
// SAFETY INVARIANTS:
// 1. Bytes are stored little-endian (wire order); hex is displayed byte-reversed
// 2. Parsing a displayed hex string and displaying it again is lossless
// 3. The integer value of a hash is its little-endian interpretation

use crate::error::CryptoError;
use num_bigint::BigUint;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sha2::{Digest, Sha256};
use std::fmt;
use std::str::FromStr;

/// A 256-bit hash (block hash, txid, Merkle root, PoW limit).
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Hash256([u8; 32]);

impl Hash256 {
    /// The null hash (all zero bytes).
    pub const ZERO: Hash256 = Hash256([0u8; 32]);

    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Hash256(bytes)
    }

    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    pub fn is_null(&self) -> bool {
        self.0.iter().all(|b| *b == 0)
    }

    /// Parse a displayed (big-endian) hex literal at compile time.
    ///
    /// Accepts an optional `0x` prefix and fewer than 64 digits, which are
    /// right-aligned. Used for compiled-in constants so that a malformed
    /// literal fails the build instead of the node.
    pub const fn from_hex_const(s: &str) -> Hash256 {
        let bytes = s.as_bytes();
        let mut start = 0;
        if bytes.len() >= 2 && bytes[0] == b'0' && (bytes[1] == b'x' || bytes[1] == b'X') {
            start = 2;
        }
        let digits = bytes.len() - start;
        if digits > 64 {
            panic!("hash literal longer than 64 hex digits");
        }

        let pad = 64 - digits;
        let mut out = [0u8; 32];
        let mut i = 0;
        while i < digits {
            let c = bytes[start + i];
            let nibble = match c {
                b'0'..=b'9' => c - b'0',
                b'a'..=b'f' => c - b'a' + 10,
                b'A'..=b'F' => c - b'A' + 10,
                _ => panic!("invalid hex digit in hash literal"),
            };
            let pos = pad + i;
            let byte = 31 - pos / 2;
            if pos % 2 == 0 {
                out[byte] |= nibble << 4;
            } else {
                out[byte] |= nibble;
            }
            i += 1;
        }
        Hash256(out)
    }

    /// Parse a displayed (big-endian) hex string.
    pub fn from_hex(s: &str) -> Result<Self, CryptoError> {
        let trimmed = s.trim();
        let digits = trimmed
            .strip_prefix("0x")
            .or_else(|| trimmed.strip_prefix("0X"))
            .unwrap_or(trimmed);

        if digits.len() > 64 {
            return Err(CryptoError::InvalidLength {
                expected: 64,
                got: digits.len(),
            });
        }

        let padded = format!("{:0>64}", digits);
        let decoded = hex::decode(&padded).map_err(|e| CryptoError::InvalidHex(e.to_string()))?;

        let mut out = [0u8; 32];
        out.copy_from_slice(&decoded);
        out.reverse();
        Ok(Hash256(out))
    }

    /// Hex in display order (most significant byte first).
    pub fn to_hex(&self) -> String {
        let mut display = self.0;
        display.reverse();
        hex::encode(display)
    }

    /// The hash as an unsigned 256-bit integer.
    pub fn to_biguint(&self) -> BigUint {
        BigUint::from_bytes_le(&self.0)
    }
}

/// Decode a hex literal into a fixed-size byte array at compile time.
///
/// The literal must contain exactly `2 * N` hex digits.
pub const fn hex_array<const N: usize>(s: &str) -> [u8; N] {
    let bytes = s.as_bytes();
    if bytes.len() != 2 * N {
        panic!("hex literal has the wrong length");
    }
    let mut out = [0u8; N];
    let mut i = 0;
    while i < 2 * N {
        let c = bytes[i];
        let nibble = match c {
            b'0'..=b'9' => c - b'0',
            b'a'..=b'f' => c - b'a' + 10,
            b'A'..=b'F' => c - b'A' + 10,
            _ => panic!("invalid hex digit in literal"),
        };
        if i % 2 == 0 {
            out[i / 2] = nibble << 4;
        } else {
            out[i / 2] |= nibble;
        }
        i += 1;
    }
    out
}

/// Double SHA-256, the transaction id and Merkle node hash.
pub fn sha256d(data: &[u8]) -> Hash256 {
    let first = Sha256::digest(data);
    let second = Sha256::digest(first);
    let mut out = [0u8; 32];
    out.copy_from_slice(&second);
    Hash256(out)
}

impl fmt::Display for Hash256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for Hash256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Hash256({})", self.to_hex())
    }
}

impl FromStr for Hash256 {
    type Err = CryptoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Hash256::from_hex(s)
    }
}

impl Serialize for Hash256 {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Hash256 {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Hash256::from_hex(&s).map_err(serde::de::Error::custom)
    }
}
