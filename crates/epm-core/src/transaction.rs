// TRANSACTIONS
// Version-1 transaction layout, sufficient for coinbase transactions.
//
// SAFETY INVARIANTS:
// 1. Serialization is the exact wire format hashed by every validating node
// 2. A txid is the double SHA-256 of that serialization

use crate::script::Script;
use epm_crypto::{sha256d, Hash256};
use serde::{Deserialize, Serialize};

/// Amount in base units.
pub type Amount = i64;

/// Base units per coin.
pub const COIN: Amount = 100_000_000;

/// Reference to a previous transaction output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutPoint {
    pub txid: Hash256,
    pub vout: u32,
}

impl OutPoint {
    /// The null prevout carried by coinbase inputs.
    pub fn null() -> Self {
        OutPoint {
            txid: Hash256::ZERO,
            vout: u32::MAX,
        }
    }

    pub fn is_null(&self) -> bool {
        self.txid.is_null() && self.vout == u32::MAX
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxIn {
    pub prevout: OutPoint,
    pub script_sig: Script,
    pub sequence: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxOut {
    pub value: Amount,
    pub script_pubkey: Script,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub version: i32,
    pub inputs: Vec<TxIn>,
    pub outputs: Vec<TxOut>,
    pub lock_time: u32,
}

impl Transaction {
    /// A coinbase paying `reward` to `script_pubkey` with `script_sig` as payload.
    pub fn coinbase(script_sig: Script, reward: Amount, script_pubkey: Script) -> Self {
        Transaction {
            version: 1,
            inputs: vec![TxIn {
                prevout: OutPoint::null(),
                script_sig,
                sequence: u32::MAX,
            }],
            outputs: vec![TxOut {
                value: reward,
                script_pubkey,
            }],
            lock_time: 0,
        }
    }

    pub fn is_coinbase(&self) -> bool {
        self.inputs.len() == 1 && self.inputs[0].prevout.is_null()
    }

    /// Wire serialization.
    pub fn serialize(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(256);
        out.extend_from_slice(&self.version.to_le_bytes());

        write_compact_size(&mut out, self.inputs.len() as u64);
        for input in &self.inputs {
            out.extend_from_slice(input.prevout.txid.as_bytes());
            out.extend_from_slice(&input.prevout.vout.to_le_bytes());
            write_compact_size(&mut out, input.script_sig.len() as u64);
            out.extend_from_slice(input.script_sig.as_bytes());
            out.extend_from_slice(&input.sequence.to_le_bytes());
        }

        write_compact_size(&mut out, self.outputs.len() as u64);
        for output in &self.outputs {
            out.extend_from_slice(&output.value.to_le_bytes());
            write_compact_size(&mut out, output.script_pubkey.len() as u64);
            out.extend_from_slice(output.script_pubkey.as_bytes());
        }

        out.extend_from_slice(&self.lock_time.to_le_bytes());
        out
    }

    pub fn txid(&self) -> Hash256 {
        sha256d(&self.serialize())
    }
}

/// CompactSize length prefix.
pub fn write_compact_size(out: &mut Vec<u8>, n: u64) {
    match n {
        0..=0xfc => out.push(n as u8),
        0xfd..=0xffff => {
            out.push(0xfd);
            out.extend_from_slice(&(n as u16).to_le_bytes());
        }
        0x1_0000..=0xffff_ffff => {
            out.push(0xfe);
            out.extend_from_slice(&(n as u32).to_le_bytes());
        }
        _ => {
            out.push(0xff);
            out.extend_from_slice(&n.to_le_bytes());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::script::opcodes::OP_RETURN;

    #[test]
    fn test_coinbase_shape() {
        let tx = Transaction::coinbase(
            Script::new().push_int(1),
            50 * COIN,
            Script::new().push_opcode(OP_RETURN),
        );
        assert!(tx.is_coinbase());
        assert_eq!(tx.version, 1);
        assert_eq!(tx.inputs[0].sequence, u32::MAX);
        assert_eq!(tx.outputs[0].value, 5_000_000_000);
    }

    #[test]
    fn test_serialization_layout() {
        let tx = Transaction::coinbase(Script::from_bytes(vec![0x51]), 0, Script::from_bytes(vec![0x6a]));
        let bytes = tx.serialize();
        // version + count + prevout + script + sequence + count + value + script + locktime
        assert_eq!(bytes.len(), 4 + 1 + 36 + 2 + 4 + 1 + 8 + 2 + 4);
        assert_eq!(&bytes[..5], &[1, 0, 0, 0, 1]);
        assert_eq!(&bytes[37..41], &[0xff, 0xff, 0xff, 0xff]);
        assert_eq!(&bytes[bytes.len() - 4..], &[0, 0, 0, 0]);
    }

    #[test]
    fn test_compact_size_boundaries() {
        let mut out = Vec::new();
        write_compact_size(&mut out, 0xfc);
        assert_eq!(out, vec![0xfc]);

        out.clear();
        write_compact_size(&mut out, 0xfd);
        assert_eq!(out, vec![0xfd, 0xfd, 0x00]);

        out.clear();
        write_compact_size(&mut out, 0x1_0000);
        assert_eq!(out, vec![0xfe, 0x00, 0x00, 0x01, 0x00]);
    }
}
