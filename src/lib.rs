// EPM consensus configuration registry.
//
// Re-exports the workspace crates under one name for node binaries:
// hashing primitives, genesis construction, consensus descriptors and the
// per-network parameter registry.

pub use epm_chainparams as chainparams;
pub use epm_consensus as consensus;
pub use epm_core as primitives;
pub use epm_crypto as crypto;

pub use epm_chainparams::{Network, NetworkProfile, ParameterRegistry, RegistryConfig, RegistryError};
pub use epm_crypto::{Hash256, PowHasher, Sha256dHasher};
