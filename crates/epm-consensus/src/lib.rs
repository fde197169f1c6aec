pub mod deployments;
pub mod error;
pub mod llmq;
pub mod miner;
pub mod params;

pub use deployments::{
    DeploymentDescriptor, DeploymentPos, DeploymentTable, StartTime, Timeout, MAX_VERSION_BITS_DEPLOYMENTS,
    VERSIONBITS_NUM_BITS,
};
pub use error::ConsensusError;
pub use llmq::{LlmqType, QuorumParams, QuorumSet, LLMQ_400_60, LLMQ_400_85, LLMQ_50_60, LLMQ_5_60};
pub use miner::{mine, mine_devnet_genesis};
pub use params::{ConsensusRules, NEVER_HEIGHT, NEVER_TIME};
