use epm_crypto::CryptoError;
use thiserror::Error;

use crate::deployments::DeploymentPos;
use crate::llmq::LlmqType;

#[derive(Debug, Error)]
pub enum ConsensusError {
    #[error("genesis target unreachable: nonce space exhausted for {context}")]
    GenesisUnreachable { context: String },

    #[error("quorum type {0} is not registered on this network")]
    UnregisteredQuorum(LlmqType),

    #[error("invalid quorum parameters for {llmq_type}: {reason}")]
    InvalidQuorumParams { llmq_type: LlmqType, reason: String },

    #[error("invalid deployment {id}: {reason}")]
    InvalidDeployment { id: DeploymentPos, reason: String },

    #[error("invalid consensus rules: {0}")]
    InvalidRules(String),

    #[error("invalid difficulty bits: {0}")]
    InvalidBits(#[from] CryptoError),
}
