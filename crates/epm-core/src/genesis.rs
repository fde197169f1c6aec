// GENESIS CONSTRUCTION
// Deterministic founding blocks for every network.
//
// SAFETY INVARIANTS:
// 1. Identical inputs always produce an identical block (no clocks, no randomness)
// 2. The block carries exactly one coinbase transaction
// 3. The Merkle root is the coinbase txid
// 4. The coinbase output cannot be spent: it never existed in the UTXO set

use crate::block::Block;
use crate::script::{opcodes::*, Script};
use crate::transaction::{Amount, Transaction};
use epm_crypto::{hex_array, Hash256};
use log::debug;
use serde::{Deserialize, Serialize};

/// The fixed number pushed first in a genesis coinbase (`0x1d00ffff`).
pub const GENESIS_COINBASE_BITS: i64 = 486_604_799;

/// Header version of every derived devnet genesis.
pub const DEVNET_GENESIS_VERSION: i32 = 4;

const MAINNET_COINBASE_MESSAGE: &str = "Study reveals lights on fishnets save turtles,dolphins";
const MAINNET_COINBASE_PUBKEY: [u8; 65] = hex_array(
    "0411345e927d2d3aba81541e23b271f5a9013f2c240fb9bd4b1c14234993639293846cfc74152d293a3bf7ba74592f5f358127cb062a621d3b153089d0b5bb84e5",
);

const TESTNET_COINBASE_MESSAGE: &str =
    "Wired 09/Jan/2014 The Grand Experiment Goes Live: Overstock.com Is Now Accepting Bitcoins";
const TESTNET_COINBASE_PUBKEY: [u8; 65] = hex_array(
    "040184710fa689ad5023690c80f3a49c8f13f8d45b8c857fbcbc8bc4a8e4d3eb4b10f4d4604fa08dce601aaf0f470216fe1b51850b4acf21b179c45070ac7b03a9",
);

/// Header fields and reward recorded for a network's genesis block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenesisTemplate {
    pub time: u32,
    pub nonce: u32,
    pub bits: u32,
    pub version: i32,
    pub reward: Amount,
}

/// Which of the two historical coinbase payloads a genesis carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GenesisCoinbase {
    Mainnet,
    Testnet,
}

impl GenesisCoinbase {
    pub fn message(&self) -> &'static str {
        match self {
            GenesisCoinbase::Mainnet => MAINNET_COINBASE_MESSAGE,
            GenesisCoinbase::Testnet => TESTNET_COINBASE_MESSAGE,
        }
    }

    /// Pay-to-pubkey output script.
    pub fn output_script(&self) -> Script {
        let pubkey: &[u8] = match self {
            GenesisCoinbase::Mainnet => &MAINNET_COINBASE_PUBKEY,
            GenesisCoinbase::Testnet => &TESTNET_COINBASE_PUBKEY,
        };
        Script::new().push_slice(pubkey).push_opcode(OP_CHECKSIG)
    }
}

/// Build a stand-alone genesis block paying `template.reward` to `output_script`
/// with `message` embedded in the coinbase.
pub fn build_genesis(message: &str, output_script: Script, template: &GenesisTemplate) -> Block {
    debug_assert!(!message.is_empty(), "genesis message must not be empty");

    let script_sig = Script::new()
        .push_int(GENESIS_COINBASE_BITS)
        .push_num(4)
        .push_slice(message.as_bytes());
    let coinbase = Transaction::coinbase(script_sig, template.reward, output_script);

    Block::new(
        template.version,
        Hash256::ZERO,
        template.time,
        template.bits,
        template.nonce,
        vec![coinbase],
    )
}

/// Build a genesis block with one of the historical coinbase payloads.
pub fn build_standard_genesis(coinbase: GenesisCoinbase, template: &GenesisTemplate) -> Block {
    let block = build_genesis(coinbase.message(), coinbase.output_script(), template);
    debug!(
        "Built {:?} genesis: time={}, nonce={}, bits={:#010x}, merkle={}",
        coinbase,
        template.time,
        template.nonce,
        template.bits,
        block.merkle_root()
    );
    block
}

/// Build a derived devnet genesis that chains from `prev_block_hash`.
///
/// The coinbase carries the BIP34 height (1) and the devnet name, and pays
/// to an `OP_RETURN` output.
pub fn build_devnet_genesis(
    prev_block_hash: Hash256,
    devnet_name: &str,
    time: u32,
    nonce: u32,
    bits: u32,
    reward: Amount,
) -> Block {
    debug_assert!(!devnet_name.is_empty(), "devnet name must not be empty");

    let script_sig = Script::new().push_int(1).push_slice(devnet_name.as_bytes());
    let coinbase = Transaction::coinbase(script_sig, reward, Script::new().push_opcode(OP_RETURN));

    Block::new(
        DEVNET_GENESIS_VERSION,
        prev_block_hash,
        time,
        bits,
        nonce,
        vec![coinbase],
    )
}
