use super::{alert_key, TEST_CHAIN_ALERT_KEY, TEST_PREFIXES};
use crate::error::RegistryError;
use crate::network::Network;
use crate::profile::{ChainTxData, Checkpoint, NetworkFlags, NetworkProfile, PoolLimits};
use epm_consensus::{
    mine, ConsensusError, ConsensusRules, DeploymentDescriptor, DeploymentPos, DeploymentTable, LlmqType, QuorumSet,
    StartTime, Timeout, NEVER_HEIGHT, NEVER_TIME,
};
use epm_core::{build_standard_genesis, GenesisCoinbase, GenesisTemplate, COIN};
use epm_crypto::{hex_array, Hash256, PowHasher, Target};
use log::info;

/// Testnet has no recorded nonce; its genesis is mined against the PoW limit.
const GENESIS_TEMPLATE: GenesisTemplate = GenesisTemplate {
    time: 1_573_325_000,
    nonce: 0,
    bits: 0x1f00_ffff,
    version: 1,
    reward: 0,
};

const POW_LIMIT: Hash256 =
    Hash256::from_hex_const("0000fffff0000000000000000000000000000000000000000000000000000000");

const DEPLOYMENT_START: i64 = 1_573_325_000;

fn consensus_rules() -> ConsensusRules {
    let generation_height = 80;
    let dip0003_height = 75;
    ConsensusRules {
        subsidy_halving_interval: NEVER_HEIGHT,
        masternode_payments_start_block: 50,
        masternode_payments_increase_block: NEVER_HEIGHT,
        masternode_payments_increase_period: NEVER_HEIGHT,
        masternode_minimum_confirmations: 15,
        masternode_collateral: 1000 * COIN,
        instant_send_confirmations_required: 2,
        instant_send_keep_lock: 6,
        instant_send_sigs_required: 2,
        instant_send_sigs_total: 4,
        budget_payments_start_block: 50,
        budget_payments_cycle_blocks: 50,
        budget_payments_window_blocks: 100,
        superblock_start_block: 100,
        superblock_start_hash: Hash256::ZERO,
        superblock_cycle: 24,
        governance_min_quorum: 1,
        governance_filter_elements: 500,
        generation_amount: 700_000_000 * COIN,
        generation_height,
        bip34_height: 1,
        bip34_hash: Hash256::ZERO,
        bip65_height: 0,
        bip66_height: 0,
        dip0001_height: 1,
        dip0003_height,
        dip0003_enforcement_height: generation_height + 50,
        dip0003_enforcement_hash: Hash256::ZERO,
        pow_limit: POW_LIMIT,
        pos_limit: Hash256::from_hex_const("007ffff000000000000000000000000000000000000000000000000000000000"),
        last_pow_block: dip0003_height,
        pow_target_timespan: 60,
        pow_target_spacing: 60,
        pos_target_timespan: 60,
        pos_target_spacing: 60,
        minimum_stake_value: 100 * COIN,
        stake_min_age: 10 * 60,
        stake_max_age: 60 * 60 * 24 * 30,
        modifier_interval: 60 * 20,
        pow_allow_min_difficulty_blocks: false,
        pow_no_retargeting: false,
        pow_kgw_height: NEVER_HEIGHT,
        pow_dgw_height: NEVER_HEIGHT,
        minimum_chain_work: Hash256::ZERO,
        default_assume_valid: Hash256::ZERO,
        minimum_difficulty_blocks: 0,
        high_subsidy_blocks: 0,
        high_subsidy_factor: 1,
    }
}

fn deployments() -> [DeploymentDescriptor; 6] {
    let signaled = |id: DeploymentPos| {
        DeploymentDescriptor::new(id, id.default_bit(), StartTime::At(DEPLOYMENT_START), Timeout::At(NEVER_TIME))
    };
    let always = |id: DeploymentPos| {
        DeploymentDescriptor::new(id, id.default_bit(), StartTime::AlwaysActive, Timeout::NoTimeout)
            .with_window(1000, 250)
    };
    [
        signaled(DeploymentPos::TestDummy),
        signaled(DeploymentPos::Csv),
        signaled(DeploymentPos::Dip0001).with_window(100, 50),
        signaled(DeploymentPos::Bip147).with_window(100, 50),
        always(DeploymentPos::Dip0003),
        always(DeploymentPos::Dip0008),
    ]
}

pub(super) fn build(hasher: &dyn PowHasher) -> Result<NetworkProfile, RegistryError> {
    let network = Network::Test;
    let wrap = |e: ConsensusError| RegistryError::consensus(network, e);

    let candidate = build_standard_genesis(GenesisCoinbase::Testnet, &GENESIS_TEMPLATE);
    let genesis = mine(&candidate, &Target::from_hash(&POW_LIMIT), hasher).map_err(wrap)?;
    let genesis_hash = genesis.hash(hasher);
    info!(
        "Testnet genesis: nonce={}, hash={}, merkle={}",
        genesis.header.nonce,
        genesis_hash,
        genesis.merkle_root()
    );

    let deployments = DeploymentTable::new(deployments(), 2016, 1512).map_err(wrap)?;
    let quorums =
        QuorumSet::new(&[LlmqType::Llmq5_60], LlmqType::Llmq5_60, LlmqType::Llmq5_60).map_err(wrap)?;

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
        message_start: hex_array("22446688"),
        alert_pubkey: alert_key(network, TEST_CHAIN_ALERT_KEY)?,
        default_port: 29999,
        prune_after_height: 1000,
        seeds: Vec::new(),
        base58_prefixes: TEST_PREFIXES,
        ext_coin_type: 1,
        checkpoints: vec![Checkpoint {
            height: 0,
            hash: genesis_hash,
        }],
        chain_tx_data: ChainTxData {
            time: 1_567_342_000,
            tx_count: 1,
            tx_rate: 1.0,
        },
        flags: NetworkFlags {
            mining_requires_peers: true,
            default_consistency_checks: false,
            require_standard: true,
            require_routable_external_ip: false,
            mine_blocks_on_demand: false,
            allow_multiple_addresses_from_group: true,
            allow_multiple_ports: true,
            bip9_check_masternodes_upgraded: true,
        },
        pool: PoolLimits {
            min_participants: 3,
            max_participants: 5,
            fulfilled_request_expire_time: 5 * 60,
        },
        spork_addresses: vec!["yTpFjxs3Rtwe7MXfC1i5XACz2K5UYi2GpL".to_string()],
        min_spork_keys: 1,
    })
}
