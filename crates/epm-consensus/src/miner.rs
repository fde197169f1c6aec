// GENESIS PROOF-OF-WORK SEARCH
// Nonce search for genesis blocks that are not recorded ahead of time.
//
// SAFETY CONSTRAINTS:
// 1. Only returns a block whose hash is <= the target
// 2. Nonces are tried in ascending order from 0, so the result is deterministic
// 3. Exhausting the nonce space is a fatal configuration error, never a retry
// 4. Runs only while a network profile is being built, never on received blocks

use crate::error::ConsensusError;
use epm_core::{build_devnet_genesis, Amount, Block};
use epm_crypto::{Hash256, PowHasher, Target};
use log::{debug, info};
use std::ops::Range;

/// Find the first nonce in `0..u32::MAX` whose header hash meets `target`.
pub fn mine<H: PowHasher + ?Sized>(
    candidate: &Block,
    target: &Target,
    hasher: &H,
) -> Result<Block, ConsensusError> {
    search_nonces(candidate, target, hasher, 0..u32::MAX)
}

/// Mine the derived genesis of a named devnet on top of `parent`, whose
/// header hash is `parent_hash`.
///
/// The candidate is timestamped one second after the parent and reuses the
/// parent's difficulty bits; its target is the compact value of those bits.
pub fn mine_devnet_genesis<H: PowHasher + ?Sized>(
    parent: &Block,
    parent_hash: Hash256,
    devnet_name: &str,
    reward: Amount,
    hasher: &H,
) -> Result<Block, ConsensusError> {
    let candidate = build_devnet_genesis(
        parent_hash,
        devnet_name,
        parent.time() + 1,
        0,
        parent.header.bits,
        reward,
    );
    let target = Target::from_compact(candidate.header.bits)?;

    debug!(
        "Mining devnet genesis '{}' on parent {} with {}",
        devnet_name,
        parent_hash,
        hasher.name()
    );
    search_nonces(&candidate, &target, hasher, 0..u32::MAX).map_err(|e| match e {
        ConsensusError::GenesisUnreachable { .. } => ConsensusError::GenesisUnreachable {
            context: format!("devnet {}", devnet_name),
        },
        other => other,
    })
}

fn search_nonces<H: PowHasher + ?Sized>(
    candidate: &Block,
    target: &Target,
    hasher: &H,
    nonces: Range<u32>,
) -> Result<Block, ConsensusError> {
    let mut header = candidate.header;
    let first = nonces.start;

    for nonce in nonces {
        header.nonce = nonce;
        let hash: Hash256 = header.hash(hasher);
        if target.is_met_by(&hash) {
            info!(
                "Genesis mined: nonce={}, attempts={}, hash={}",
                nonce,
                u64::from(nonce - first) + 1,
                hash
            );
            return Ok(candidate.with_nonce(nonce));
        }
    }

    Err(ConsensusError::GenesisUnreachable {
        context: format!("bits {:#010x}", candidate.header.bits),
    })
}
