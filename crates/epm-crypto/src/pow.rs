// PROOF-OF-WORK HASHER SEAM
// The header hash used for proof-of-work is supplied by the node. The
// registry only needs "80 header bytes in, 256-bit hash out".

use crate::hash::{sha256d, Hash256};

/// Serialized block header length in bytes.
pub const HEADER_SIZE: usize = 80;

/// Computes the proof-of-work hash of a serialized block header.
///
/// Implementations must be pure: the same bytes always hash to the same value.
pub trait PowHasher: Send + Sync {
    fn pow_hash(&self, header: &[u8; HEADER_SIZE]) -> Hash256;

    /// Short name for logs.
    fn name(&self) -> &'static str;
}

/// Double SHA-256 header hashing.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sha256dHasher;

impl PowHasher for Sha256dHasher {
    fn pow_hash(&self, header: &[u8; HEADER_SIZE]) -> Hash256 {
        sha256d(header)
    }

    fn name(&self) -> &'static str {
        "sha256d"
    }
}

impl<T: PowHasher + ?Sized> PowHasher for &T {
    fn pow_hash(&self, header: &[u8; HEADER_SIZE]) -> Hash256 {
        (**self).pow_hash(header)
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}
