use super::{build_recorded_genesis, BuildOptions, TEST_CHAIN_GENESIS, TEST_PREFIXES};
use crate::error::RegistryError;
use crate::network::Network;
use crate::profile::{ChainTxData, Checkpoint, NetworkFlags, NetworkProfile, PoolLimits};
use epm_consensus::{
    ConsensusError, ConsensusRules, DeploymentDescriptor, DeploymentPos, DeploymentTable, LlmqType, QuorumSet,
    StartTime, Timeout,
};
use epm_core::COIN;
use epm_crypto::{hex_array, Hash256, PowHasher};

const DEPLOYMENT_TIMEOUT: i64 = 999_999_999_999;

fn consensus_rules() -> ConsensusRules {
    ConsensusRules {
        subsidy_halving_interval: 150,
        masternode_payments_start_block: 240,
        masternode_payments_increase_block: 350,
        masternode_payments_increase_period: 10,
        masternode_minimum_confirmations: 1,
        masternode_collateral: 500_000 * COIN,
        instant_send_confirmations_required: 2,
        instant_send_keep_lock: 6,
        instant_send_sigs_required: 3,
        instant_send_sigs_total: 5,
        budget_payments_start_block: 1000,
        budget_payments_cycle_blocks: 50,
        budget_payments_window_blocks: 10,
        superblock_start_block: 1500,
        superblock_start_hash: Hash256::ZERO,
        superblock_cycle: 10,
        governance_min_quorum: 1,
        governance_filter_elements: 100,
        generation_amount: 0,
        generation_height: 0,
        // Far in the future so version 1 blocks stay valid in tests.
        bip34_height: 100_000_000,
        bip34_hash: Hash256::ZERO,
        bip65_height: 1351,
        bip66_height: 1251,
        dip0001_height: 2000,
        dip0003_height: 432,
        dip0003_enforcement_height: 500,
        dip0003_enforcement_hash: Hash256::ZERO,
        pow_limit: Hash256::from_hex_const("7fffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff"),
        pos_limit: Hash256::from_hex_const("007ffff000000000000000000000000000000000000000000000000000000000"),
        last_pow_block: 100,
        pow_target_timespan: 24 * 60 * 60,
        pow_target_spacing: 150,
        pos_target_timespan: 24 * 60 * 60,
        pos_target_spacing: 150,
        minimum_stake_value: 0,
        stake_min_age: 10 * 60,
        stake_max_age: 60 * 60 * 24 * 30,
        modifier_interval: 60 * 20,
        pow_allow_min_difficulty_blocks: true,
        pow_no_retargeting: true,
        pow_kgw_height: 15_200,
        pow_dgw_height: 34_140,
        minimum_chain_work: Hash256::ZERO,
        default_assume_valid: Hash256::ZERO,
        minimum_difficulty_blocks: 0,
        high_subsidy_blocks: 0,
        high_subsidy_factor: 1,
    }
}

pub(super) fn build(hasher: &dyn PowHasher, options: &BuildOptions) -> Result<NetworkProfile, RegistryError> {
    let network = Network::Regtest;
    let wrap = |e: ConsensusError| RegistryError::consensus(network, e);

    let (genesis, genesis_hash) = build_recorded_genesis(network, &TEST_CHAIN_GENESIS, hasher, options)?;
    let deployments = DeploymentPos::ALL.map(|id| {
        DeploymentDescriptor::new(id, id.default_bit(), StartTime::At(0), Timeout::At(DEPLOYMENT_TIMEOUT))
    });
    // Faster than normal: 75% of 144 blocks.
    let deployments = DeploymentTable::new(deployments, 144, 108).map_err(wrap)?;
    let quorums = QuorumSet::new(
        &[LlmqType::Llmq5_60, LlmqType::Llmq50_60],
        LlmqType::Llmq5_60,
        LlmqType::Llmq5_60,
    )
    .map_err(wrap)?;

    Ok(NetworkProfile {
        network,
        devnet_name: None,
        genesis,
        genesis_hash,
        devnet_genesis: None,
        devnet_genesis_hash: None,
        consensus: consensus_rules(),
        deployments,
        quorums,
        message_start: hex_array("fcc1b7dc"),
        alert_pubkey: Vec::new(),
        default_port: 19994,
        prune_after_height: 1000,
        seeds: Vec::new(),
        base58_prefixes: TEST_PREFIXES,
        ext_coin_type: 1,
        checkpoints: vec![Checkpoint {
            height: 0,
            hash: TEST_CHAIN_GENESIS.hash,
        }],
        chain_tx_data: ChainTxData {
            time: 0,
            tx_count: 0,
            tx_rate: 0.0,
        },
        flags: NetworkFlags {
            mining_requires_peers: false,
            default_consistency_checks: true,
            require_standard: false,
            require_routable_external_ip: false,
            mine_blocks_on_demand: true,
            allow_multiple_addresses_from_group: true,
            allow_multiple_ports: true,
            bip9_check_masternodes_upgraded: false,
        },
        pool: PoolLimits {
            min_participants: 0,
            max_participants: 0,
            fulfilled_request_expire_time: 5 * 60,
        },
        spork_addresses: vec!["yj949n1UH6fDhw6HtVE5VMj2iSTaSWBMcW".to_string()],
        min_spork_keys: 1,
    })
}
