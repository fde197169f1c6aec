// TEST-NETWORK OVERRIDES
// Mutable handles onto the selected regtest or devnet profile.
//
// SAFETY INVARIANTS:
// 1. A handle only exists while its network is the selected one
// 2. Handles borrow the registry mutably, so no reader can observe a half-applied change
// 3. A rejected change leaves the profile exactly as it was

use crate::error::RegistryError;
use crate::network::Network;
use crate::profile::NetworkProfile;
use epm_consensus::{DeploymentPos, LlmqType, StartTime, Timeout};
use log::info;

/// Regtest-only parameter changes used by test setup code.
pub struct RegtestOverrides<'a> {
    profile: &'a mut NetworkProfile,
}

impl<'a> RegtestOverrides<'a> {
    pub(crate) fn new(profile: &'a mut NetworkProfile) -> Self {
        debug_assert_eq!(profile.network, Network::Regtest);
        RegtestOverrides { profile }
    }

    /// Force a deployment's signaling period. `None` keeps the current window or threshold.
    pub fn update_deployment(
        &mut self,
        id: DeploymentPos,
        start: StartTime,
        timeout: Timeout,
        window_size: Option<u32>,
        threshold: Option<u32>,
    ) -> Result<(), RegistryError> {
        self.profile
            .deployments
            .set_timing(id, start, timeout, window_size, threshold)
            .map_err(|e| RegistryError::consensus(Network::Regtest, e))?;
        info!("Regtest deployment {} overridden: {:?}..{:?}", id, start, timeout);
        Ok(())
    }

    pub fn update_dip3(&mut self, activation_height: u32, enforcement_height: u32) -> Result<(), RegistryError> {
        let mut rules = self.profile.consensus.clone();
        rules.dip0003_height = activation_height;
        rules.dip0003_enforcement_height = enforcement_height;
        rules
            .validate()
            .map_err(|e| RegistryError::consensus(Network::Regtest, e))?;

        self.profile.consensus = rules;
        info!(
            "Regtest DIP0003 overridden: activation={}, enforcement={}",
            activation_height, enforcement_height
        );
        Ok(())
    }

    pub fn update_budget(
        &mut self,
        masternode_payments_start_block: u32,
        budget_payments_start_block: u32,
        superblock_start_block: u32,
    ) {
        let rules = &mut self.profile.consensus;
        rules.masternode_payments_start_block = masternode_payments_start_block;
        rules.budget_payments_start_block = budget_payments_start_block;
        rules.superblock_start_block = superblock_start_block;
        info!(
            "Regtest budget overridden: masternode payments={}, budget={}, superblocks={}",
            masternode_payments_start_block, budget_payments_start_block, superblock_start_block
        );
    }
}

/// Devnet-only parameter changes applied at startup.
pub struct DevnetOverrides<'a> {
    profile: &'a mut NetworkProfile,
}

impl<'a> DevnetOverrides<'a> {
    pub(crate) fn new(profile: &'a mut NetworkProfile) -> Self {
        debug_assert_eq!(profile.network, Network::Dev);
        DevnetOverrides { profile }
    }

    pub fn update_subsidy_and_difficulty(
        &mut self,
        minimum_difficulty_blocks: u32,
        high_subsidy_blocks: u32,
        high_subsidy_factor: u32,
    ) -> Result<(), RegistryError> {
        let mut rules = self.profile.consensus.clone();
        rules.minimum_difficulty_blocks = minimum_difficulty_blocks;
        rules.high_subsidy_blocks = high_subsidy_blocks;
        rules.high_subsidy_factor = high_subsidy_factor;
        rules
            .validate()
            .map_err(|e| RegistryError::consensus(Network::Dev, e))?;

        self.profile.consensus = rules;
        info!(
            "Devnet subsidy/difficulty overridden: min difficulty blocks={}, high subsidy blocks={}, factor={}",
            minimum_difficulty_blocks, high_subsidy_blocks, high_subsidy_factor
        );
        Ok(())
    }

    /// Switch chain locks to another registered quorum type.
    pub fn update_llmq_chain_locks(&mut self, llmq_type: LlmqType) -> Result<(), RegistryError> {
        self.profile
            .quorums
            .set_chain_locks(llmq_type)
            .map_err(|e| RegistryError::consensus(Network::Dev, e))?;
        info!("Devnet chain locks now use {}", llmq_type);
        Ok(())
    }
}
