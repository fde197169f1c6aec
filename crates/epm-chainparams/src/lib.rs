// === Network Selection ===
pub mod settings;
pub mod network;
pub mod registry;

// === Profiles ===
pub mod networks;
pub mod profile;

// === Test-Network Overrides ===
pub mod overrides;

pub mod error;

// === Re-exports for broader ecosystem access ===
pub use settings::RegistryConfig;
pub use error::RegistryError;
pub use network::Network;
pub use networks::{build_profile, BuildOptions};
pub use overrides::{DevnetOverrides, RegtestOverrides};
pub use profile::{Base58Prefixes, ChainTxData, Checkpoint, DnsSeed, NetworkFlags, NetworkProfile, PoolLimits};
pub use registry::ParameterRegistry;
