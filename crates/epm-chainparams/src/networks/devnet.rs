use super::{
    alert_key, build_recorded_genesis, BuildOptions, TEST_CHAIN_ALERT_KEY, TEST_CHAIN_GENESIS, TEST_PREFIXES,
};
use crate::error::RegistryError;
use crate::network::Network;
use crate::profile::{ChainTxData, Checkpoint, NetworkFlags, NetworkProfile, PoolLimits};
use epm_consensus::{
    mine_devnet_genesis, ConsensusError, ConsensusRules, DeploymentDescriptor, DeploymentPos, DeploymentTable,
    LlmqType, QuorumSet, StartTime, Timeout,
};
use epm_core::COIN;
use epm_crypto::{hex_array, Hash256, PowHasher};
use log::info;

fn consensus_rules() -> ConsensusRules {
    ConsensusRules {
        subsidy_halving_interval: 210_240,
        // Below the increase block, which is all that matters here.
        masternode_payments_start_block: 4010,
        masternode_payments_increase_block: 4030,
        masternode_payments_increase_period: 10,
        masternode_minimum_confirmations: 1,
        masternode_collateral: 500_000 * COIN,
        instant_send_confirmations_required: 2,
        instant_send_keep_lock: 6,
        instant_send_sigs_required: 6,
        instant_send_sigs_total: 10,
        budget_payments_start_block: 4100,
        budget_payments_cycle_blocks: 50,
        budget_payments_window_blocks: 10,
        // Must stay above the budget payments start.
        superblock_start_block: 4200,
        superblock_start_hash: Hash256::ZERO,
        superblock_cycle: 24,
        governance_min_quorum: 1,
        governance_filter_elements: 500,
        generation_amount: 0,
        generation_height: 0,
        bip34_height: 1,
        bip34_hash: Hash256::ZERO,
        bip65_height: 1,
        bip66_height: 1,
        dip0001_height: 2,
        dip0003_height: 2,
        dip0003_enforcement_height: 2,
        dip0003_enforcement_hash: Hash256::ZERO,
        pow_limit: Hash256::from_hex_const("7fffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff"),
        pos_limit: Hash256::from_hex_const("007ffff000000000000000000000000000000000000000000000000000000000"),
        last_pow_block: 100,
        pow_target_timespan: 24 * 60 * 60,
        pow_target_spacing: 150,
        pos_target_timespan: 24 * 60 * 60,
        pos_target_spacing: 150,
        minimum_stake_value: 10_000 * COIN,
        stake_min_age: 10 * 60,
        stake_max_age: 60 * 60 * 24 * 30,
        modifier_interval: 60 * 20,
        pow_allow_min_difficulty_blocks: true,
        pow_no_retargeting: false,
        // KGW height >= DGW height means KGW is never used.
        pow_kgw_height: 4001,
        pow_dgw_height: 4001,
        minimum_chain_work: Hash256::ZERO,
        default_assume_valid: Hash256::ZERO,
        minimum_difficulty_blocks: 0,
        high_subsidy_blocks: 0,
        high_subsidy_factor: 1,
    }
}

fn deployments() -> [DeploymentDescriptor; 6] {
    let timed = |id: DeploymentPos, start: i64, timeout: i64| {
        DeploymentDescriptor::new(id, id.default_bit(), StartTime::At(start), Timeout::At(timeout))
    };
    [
        timed(DeploymentPos::TestDummy, 1_199_145_601, 1_230_767_999),
        timed(DeploymentPos::Csv, 1_506_556_800, 1_538_092_800),
        timed(DeploymentPos::Dip0001, 1_505_692_800, 1_537_228_800).with_window(100, 50),
        timed(DeploymentPos::Bip147, 1_517_792_400, 1_549_328_400).with_window(100, 50),
        timed(DeploymentPos::Dip0003, 1_535_752_800, 1_567_288_800).with_window(100, 50),
        timed(DeploymentPos::Dip0008, 1_553_126_400, 1_584_748_800).with_window(100, 50),
    ]
}

pub(super) fn build(hasher: &dyn PowHasher, options: &BuildOptions) -> Result<NetworkProfile, RegistryError> {
    let network = Network::Dev;
    let wrap = |e: ConsensusError| RegistryError::consensus(network, e);
    let devnet_name = options.full_devnet_name();

    let (genesis, genesis_hash) = build_recorded_genesis(network, &TEST_CHAIN_GENESIS, hasher, options)?;
    let devnet_genesis =
        mine_devnet_genesis(&genesis, genesis_hash, &devnet_name, 50 * COIN, hasher).map_err(wrap)?;
    let devnet_genesis_hash = devnet_genesis.hash(hasher);
    info!(
        "Devnet '{}' genesis: nonce={}, hash={}",
        devnet_name, devnet_genesis.header.nonce, devnet_genesis_hash
    );

    let deployments = DeploymentTable::new(deployments(), 2016, 1512).map_err(wrap)?;
    let quorums = QuorumSet::new(
        &[LlmqType::Llmq50_60, LlmqType::Llmq400_60, LlmqType::Llmq400_85],
        LlmqType::Llmq50_60,
        LlmqType::Llmq50_60,
    )
    .map_err(wrap)?;

    Ok(NetworkProfile {
        network,
        devnet_name: Some(devnet_name),
        genesis,
        genesis_hash,
        chain_tx_data: ChainTxData {
            time: i64::from(devnet_genesis.time()),
            // Both genesis coinbases.
            tx_count: 2,
            tx_rate: 0.01,
        },
        devnet_genesis: Some(devnet_genesis),
        devnet_genesis_hash: Some(devnet_genesis_hash),
        consensus: consensus_rules(),
        deployments,
        quorums,
        message_start: hex_array("e2caffce"),
        alert_pubkey: alert_key(network, TEST_CHAIN_ALERT_KEY)?,
        default_port: 19999,
        prune_after_height: 1000,
        seeds: Vec::new(),
        base58_prefixes: TEST_PREFIXES,
        ext_coin_type: 1,
        checkpoints: vec![
            Checkpoint {
                height: 0,
                hash: genesis_hash,
            },
            Checkpoint {
                height: 1,
                hash: devnet_genesis_hash,
            },
        ],
        flags: NetworkFlags {
            mining_requires_peers: true,
            default_consistency_checks: false,
            require_standard: false,
            require_routable_external_ip: false,
            mine_blocks_on_demand: false,
            allow_multiple_addresses_from_group: true,
            allow_multiple_ports: true,
            // A fresh devnet has no masternodes to check.
            bip9_check_masternodes_upgraded: false,
        },
        pool: PoolLimits {
            min_participants: 3,
            max_participants: 5,
            fulfilled_request_expire_time: 5 * 60,
        },
        spork_addresses: vec!["yjPtiKh2uwk3bDutTEA2q9mCtXyiZRWn55".to_string()],
        min_spork_keys: 1,
    })
}
