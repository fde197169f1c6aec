// BLOCKS
// Header layout and hashing for blocks built by this crate.
//
// SAFETY INVARIANTS:
// 1. The header serializes to exactly 80 bytes, little-endian fields
// 2. The proof-of-work hash is delegated to the injected PowHasher
// 3. merkle_root always matches the transactions it was computed from

use crate::merkle::merkle_root;
use crate::transaction::Transaction;
use epm_crypto::{Hash256, PowHasher, HEADER_SIZE};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockHeader {
    pub version: i32,
    pub prev_block_hash: Hash256,
    pub merkle_root: Hash256,
    pub time: u32,
    pub bits: u32,
    pub nonce: u32,
}

impl BlockHeader {
    /// The 80-byte wire form fed to the proof-of-work hasher.
    pub fn serialize(&self) -> [u8; HEADER_SIZE] {
        let mut out = [0u8; HEADER_SIZE];
        out[0..4].copy_from_slice(&self.version.to_le_bytes());
        out[4..36].copy_from_slice(self.prev_block_hash.as_bytes());
        out[36..68].copy_from_slice(self.merkle_root.as_bytes());
        out[68..72].copy_from_slice(&self.time.to_le_bytes());
        out[72..76].copy_from_slice(&self.bits.to_le_bytes());
        out[76..80].copy_from_slice(&self.nonce.to_le_bytes());
        out
    }

    pub fn hash<H: PowHasher + ?Sized>(&self, hasher: &H) -> Hash256 {
        hasher.pow_hash(&self.serialize())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    pub header: BlockHeader,
    pub transactions: Vec<Transaction>,
}

impl Block {
    /// Assemble a block, deriving the Merkle root from `transactions`.
    pub fn new(
        version: i32,
        prev_block_hash: Hash256,
        time: u32,
        bits: u32,
        nonce: u32,
        transactions: Vec<Transaction>,
    ) -> Self {
        let merkle_root = Block::compute_merkle_root(&transactions);
        Block {
            header: BlockHeader {
                version,
                prev_block_hash,
                merkle_root,
                time,
                bits,
                nonce,
            },
            transactions,
        }
    }

    pub fn compute_merkle_root(transactions: &[Transaction]) -> Hash256 {
        let txids: Vec<Hash256> = transactions.iter().map(Transaction::txid).collect();
        merkle_root(&txids)
    }

    pub fn hash<H: PowHasher + ?Sized>(&self, hasher: &H) -> Hash256 {
        self.header.hash(hasher)
    }

    pub fn merkle_root(&self) -> Hash256 {
        self.header.merkle_root
    }

    pub fn time(&self) -> u32 {
        self.header.time
    }

    /// Same block with a different nonce; the Merkle root is unaffected.
    pub fn with_nonce(&self, nonce: u32) -> Self {
        let mut block = self.clone();
        block.header.nonce = nonce;
        block
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::script::Script;
    use epm_crypto::Sha256dHasher;

    fn sample_header() -> BlockHeader {
        BlockHeader {
            version: 1,
            prev_block_hash: Hash256::ZERO,
            merkle_root: Hash256::from_hex_const("0x01"),
            time: 0x0102_0304,
            bits: 0x1e0f_fff0,
            nonce: 0xaabb_ccdd,
        }
    }

    #[test]
    fn test_header_layout() {
        let bytes = sample_header().serialize();
        assert_eq!(&bytes[0..4], &[1, 0, 0, 0]);
        assert_eq!(bytes[36], 1);
        assert_eq!(&bytes[68..72], &[4, 3, 2, 1]);
        assert_eq!(&bytes[72..76], &[0xf0, 0xff, 0x0f, 0x1e]);
        assert_eq!(&bytes[76..80], &[0xdd, 0xcc, 0xbb, 0xaa]);
    }

    #[test]
    fn test_new_derives_merkle_root() {
        let tx = Transaction::coinbase(Script::new().push_int(1), 0, Script::new());
        let block = Block::new(4, Hash256::ZERO, 10, 0x207f_ffff, 0, vec![tx.clone()]);
        assert_eq!(block.merkle_root(), tx.txid());
    }

    #[test]
    fn test_nonce_changes_hash_not_root() {
        let tx = Transaction::coinbase(Script::new().push_int(1), 0, Script::new());
        let block = Block::new(4, Hash256::ZERO, 10, 0x207f_ffff, 0, vec![tx]);
        let bumped = block.with_nonce(1);
        assert_eq!(block.merkle_root(), bumped.merkle_root());
        assert_ne!(block.hash(&Sha256dHasher), bumped.hash(&Sha256dHasher));
    }
}
