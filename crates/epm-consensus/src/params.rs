// CONSENSUS RULE CONSTANTS
// Per-network heights, limits and timing that block validation reads.

use crate::error::ConsensusError;
use epm_core::Amount;
use epm_crypto::Hash256;
use serde::{Deserialize, Serialize};

/// A height no chain reaches; used for disabled features.
pub const NEVER_HEIGHT: u32 = 400_000;

/// A timestamp no chain reaches (2099-01-01).
pub const NEVER_TIME: i64 = 4_070_908_800;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsensusRules {
    pub subsidy_halving_interval: u32,

    // Masternode payments
    pub masternode_payments_start_block: u32,
    pub masternode_payments_increase_block: u32,
    pub masternode_payments_increase_period: u32,
    pub masternode_minimum_confirmations: u32,
    pub masternode_collateral: Amount,

    // InstantSend
    pub instant_send_confirmations_required: u32,
    pub instant_send_keep_lock: u32,
    pub instant_send_sigs_required: u32,
    pub instant_send_sigs_total: u32,

    // Budget and governance
    pub budget_payments_start_block: u32,
    pub budget_payments_cycle_blocks: u32,
    pub budget_payments_window_blocks: u32,
    pub superblock_start_block: u32,
    pub superblock_start_hash: Hash256,
    pub superblock_cycle: u32,
    pub governance_min_quorum: u32,
    pub governance_filter_elements: u32,

    /// One-off premine paid at `generation_height`.
    pub generation_amount: Amount,
    pub generation_height: u32,

    // Fork heights
    pub bip34_height: u32,
    pub bip34_hash: Hash256,
    pub bip65_height: u32,
    pub bip66_height: u32,
    pub dip0001_height: u32,
    pub dip0003_height: u32,
    pub dip0003_enforcement_height: u32,
    pub dip0003_enforcement_hash: Hash256,

    // Proof of work / proof of stake
    pub pow_limit: Hash256,
    pub pos_limit: Hash256,
    pub last_pow_block: u32,
    pub pow_target_timespan: u32,
    pub pow_target_spacing: u32,
    pub pos_target_timespan: u32,
    pub pos_target_spacing: u32,
    pub minimum_stake_value: Amount,
    pub stake_min_age: u32,
    pub stake_max_age: u32,
    pub modifier_interval: u32,
    pub pow_allow_min_difficulty_blocks: bool,
    pub pow_no_retargeting: bool,
    pub pow_kgw_height: u32,
    pub pow_dgw_height: u32,

    pub minimum_chain_work: Hash256,
    pub default_assume_valid: Hash256,

    // Devnet tuning, adjustable at startup
    pub minimum_difficulty_blocks: u32,
    pub high_subsidy_blocks: u32,
    pub high_subsidy_factor: u32,
}

impl ConsensusRules {
    /// Expected number of blocks per difficulty adjustment period.
    pub fn difficulty_adjustment_interval(&self) -> u32 {
        self.pow_target_timespan / self.pow_target_spacing
    }

    pub fn validate(&self) -> Result<(), ConsensusError> {
        if self.pow_target_spacing == 0 || self.pos_target_spacing == 0 {
            return Err(ConsensusError::InvalidRules("target spacing is zero".to_string()));
        }
        if self.pow_target_timespan < self.pow_target_spacing {
            return Err(ConsensusError::InvalidRules(format!(
                "timespan {} shorter than spacing {}",
                self.pow_target_timespan, self.pow_target_spacing
            )));
        }
        if self.dip0003_enforcement_height < self.dip0003_height {
            return Err(ConsensusError::InvalidRules(format!(
                "DIP0003 enforced at {} before activation at {}",
                self.dip0003_enforcement_height, self.dip0003_height
            )));
        }
        if self.high_subsidy_factor == 0 {
            return Err(ConsensusError::InvalidRules("high subsidy factor is zero".to_string()));
        }
        Ok(())
    }
}
