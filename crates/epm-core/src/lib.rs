// === Core Data Structures ===
pub mod block;
pub mod merkle;
pub mod script;
pub mod transaction;

// === Genesis Construction ===
pub mod genesis;

// === Re-exports for broader ecosystem access ===
pub use block::{Block, BlockHeader};
pub use genesis::{build_devnet_genesis, build_genesis, build_standard_genesis, GenesisCoinbase, GenesisTemplate};
pub use merkle::merkle_root;
pub use script::Script;
pub use transaction::{Amount, OutPoint, Transaction, TxIn, TxOut, COIN};
