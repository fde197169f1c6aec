use epm_consensus::ConsensusError;
use epm_crypto::Hash256;
use thiserror::Error;

use crate::network::Network;

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("unknown network '{0}' (expected main, test, dev or regtest)")]
    UnknownNetwork(String),

    #[error("genesis for {network} could not be mined")]
    GenesisUnreachable {
        network: Network,
        #[source]
        source: ConsensusError,
    },

    #[error("{network} genesis {field} mismatch: expected {expected}, built {actual}")]
    GenesisMismatch {
        network: Network,
        field: &'static str,
        expected: Hash256,
        actual: Hash256,
    },

    #[error("invalid {network} parameters")]
    InvalidParameters {
        network: Network,
        #[source]
        source: ConsensusError,
    },

    #[error("invalid {network} profile: {reason}")]
    InvalidProfile { network: Network, reason: String },

    #[error("no network selected")]
    NotSelected,

    #[error("network already selected: {0}")]
    AlreadySelected(Network),

    #[error("{handle} overrides require the {handle} network to be selected")]
    OverrideNotPermitted {
        handle: Network,
        selected: Option<Network>,
    },

    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),
}

impl RegistryError {
    /// Attach a network to a consensus-layer failure.
    pub(crate) fn consensus(network: Network, source: ConsensusError) -> Self {
        match source {
            ConsensusError::GenesisUnreachable { .. } => RegistryError::GenesisUnreachable { network, source },
            source => RegistryError::InvalidParameters { network, source },
        }
    }
}
