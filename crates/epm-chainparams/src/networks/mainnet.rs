use super::{alert_key, build_recorded_genesis, BuildOptions, RecordedGenesis, MAIN_PREFIXES};
use crate::error::RegistryError;
use crate::network::Network;
use crate::profile::{ChainTxData, Checkpoint, DnsSeed, NetworkFlags, NetworkProfile, PoolLimits};
use epm_consensus::{
    ConsensusError, ConsensusRules, DeploymentDescriptor, DeploymentPos, DeploymentTable, LlmqType, QuorumSet, StartTime,
    Timeout, NEVER_HEIGHT, NEVER_TIME,
};
use epm_core::{GenesisCoinbase, GenesisTemplate, COIN};
use epm_crypto::{hex_array, Hash256, PowHasher};

const GENESIS: RecordedGenesis = RecordedGenesis {
    coinbase: GenesisCoinbase::Mainnet,
    template: GenesisTemplate {
        time: 1_575_878_400,
        nonce: 427_681,
        bits: 0x1e0f_fff0,
        version: 1,
        reward: 50 * COIN,
    },
    hash: Hash256::from_hex_const("0x0000052da0bf041f23e726a1e2a2e18970b6e92ec87318d15ca61935c340be45"),
    merkle_root: Hash256::from_hex_const("0xa84706ecbb981aae7a4f701cb0fb93c4536971a13ee9fcea9c2e6a3ba89b32f8"),
};

const DEPLOYMENT_START: i64 = 1_575_370_800;
const DIP_START: i64 = 1_575_370_810;

const CHECKPOINTS: [(u32, Hash256); 9] = [
    (0, GENESIS.hash),
    (1, Hash256::from_hex_const("0x000000c47f69e764c87202daafcadacf341e378dda22768f0d8b231c7ba4b86f")),
    (77, Hash256::from_hex_const("0x00000417612d76cc7f2f43d75f9f00f5a81be8c8e0ad39f9d6dcb2f92a6588bb")),
    (1451, Hash256::from_hex_const("0x631ae9dbe12a5da57b680aa5ad95221d1598d2b7f0d78cc0ab8fe87b67cc9611")),
    (2134, Hash256::from_hex_const("0xe64f1850596d911edf22086ee7e3eaf492e89dcd097ec1e8fa86598f70a578ee")),
    (2979, Hash256::from_hex_const("0x1eac497e868577e99279d1681edcdef34889277c9a2d3674f11cf5092ff50d74")),
    (3663, Hash256::from_hex_const("0xefa73709611d28ccab18213fd8bac31a678ad434afa49b825243c32636754845")),
    (4305, Hash256::from_hex_const("0x9a7d39f8b07734e7005147f77b4f80b06c4c0cc1a28c925e99c5865badbcf51d")),
    (5019, Hash256::from_hex_const("0x625a57347143d422a9bd762aa55a6efaa7a6b181278625281ebbbe04d9195cf5")),
];

const SEEDS: [&str; 11] = [
    "178.63.174.59",
    "62.210.188.7",
    "95.216.19.167",
    "144.76.2.67",
    "5.9.40.169",
    "95.216.17.97",
    "85.10.193.18",
    "95.216.0.167",
    "38.103.128.98",
    "148.251.245.229",
    "5.9.110.248",
];

const ALERT_KEY: &str = "048403aa4b7052cfca5740f8a11c7390880f2ea482c9119e5a0c3fcd9ec176a295502acd665709f8abd00963667317ba5b6dd47f16a507011649922d99af1647eb";

fn consensus_rules() -> ConsensusRules {
    let generation_height = 250;
    let dip0003_height = 201;
    ConsensusRules {
        subsidy_halving_interval: NEVER_HEIGHT,
        masternode_payments_start_block: 500,
        masternode_payments_increase_block: NEVER_HEIGHT,
        masternode_payments_increase_period: NEVER_HEIGHT,
        masternode_minimum_confirmations: 15,
        masternode_collateral: 1300 * COIN,
        instant_send_confirmations_required: 6,
        instant_send_keep_lock: 24,
        instant_send_sigs_required: 6,
        instant_send_sigs_total: 10,
        budget_payments_start_block: NEVER_HEIGHT,
        budget_payments_cycle_blocks: NEVER_HEIGHT,
        budget_payments_window_blocks: NEVER_HEIGHT,
        superblock_start_block: NEVER_HEIGHT,
        superblock_start_hash: Hash256::ZERO,
        superblock_cycle: NEVER_HEIGHT,
        governance_min_quorum: 10,
        governance_filter_elements: 20_000,
        generation_amount: 50 * COIN,
        generation_height,
        bip34_height: 1,
        bip34_hash: Hash256::ZERO,
        bip65_height: 619_382,
        bip66_height: 3,
        dip0001_height: 2,
        dip0003_height,
        dip0003_enforcement_height: generation_height + 50,
        dip0003_enforcement_hash: Hash256::ZERO,
        pow_limit: Hash256::from_hex_const("00000fffffffffffffffffffffffffffffffffffffffffffffffffffffffffff"),
        pos_limit: Hash256::from_hex_const("0007ffff00000000000000000000000000000000000000000000000000000000"),
        last_pow_block: dip0003_height - 1,
        pow_target_timespan: 24 * 60 * 60,
        pow_target_spacing: 60,
        pos_target_timespan: 24 * 60 * 60,
        pos_target_spacing: 60,
        minimum_stake_value: 100 * COIN,
        stake_min_age: 60 * 60,
        stake_max_age: 60 * 60 * 24 * 30,
        modifier_interval: 60 * 20,
        pow_allow_min_difficulty_blocks: false,
        pow_no_retargeting: false,
        pow_kgw_height: 20,
        pow_dgw_height: 60,
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
    let dip = |id: DeploymentPos| {
        DeploymentDescriptor::new(id, id.default_bit(), StartTime::At(DIP_START), Timeout::NoTimeout)
    };
    [
        signaled(DeploymentPos::TestDummy),
        signaled(DeploymentPos::Csv),
        signaled(DeploymentPos::Dip0001).with_window(100, 50),
        signaled(DeploymentPos::Bip147).with_window(100, 50),
        dip(DeploymentPos::Dip0003).with_window(2000, 1000),
        dip(DeploymentPos::Dip0008).with_window(3000, 1500),
    ]
}

pub(super) fn build(hasher: &dyn PowHasher, options: &BuildOptions) -> Result<NetworkProfile, RegistryError> {
    let network = Network::Main;
    let wrap = |e: ConsensusError| RegistryError::consensus(network, e);

    let (genesis, genesis_hash) = build_recorded_genesis(network, &GENESIS, hasher, options)?;
    let deployments = DeploymentTable::new(deployments(), 2016, 1916).map_err(wrap)?;
    let quorums = QuorumSet::new(
        &[LlmqType::Llmq50_60, LlmqType::Llmq400_60, LlmqType::Llmq400_85],
        LlmqType::Llmq400_60,
        LlmqType::Llmq50_60,
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
        message_start: hex_array("bac3e97d"),
        alert_pubkey: alert_key(network, ALERT_KEY)?,
        default_port: 1505,
        prune_after_height: 2_000_000,
        seeds: SEEDS.iter().map(|ip| DnsSeed::new(ip, ip)).collect(),
        base58_prefixes: MAIN_PREFIXES,
        ext_coin_type: 5,
        checkpoints: CHECKPOINTS
            .iter()
            .map(|(height, hash)| Checkpoint { height: *height, hash: *hash })
            .collect(),
        chain_tx_data: ChainTxData {
            time: 1_576_214_371,
            tx_count: 16_813,
            tx_rate: 0.1,
        },
        flags: NetworkFlags {
            mining_requires_peers: true,
            default_consistency_checks: false,
            require_standard: true,
            require_routable_external_ip: true,
            mine_blocks_on_demand: false,
            allow_multiple_addresses_from_group: false,
            allow_multiple_ports: false,
            bip9_check_masternodes_upgraded: true,
        },
        pool: PoolLimits {
            min_participants: 3,
            max_participants: 5,
            fulfilled_request_expire_time: 60 * 60,
        },
        spork_addresses: vec!["PBNaM8CXc6agNpXPw5KFmxf3sCEFVx1o44".to_string()],
        min_spork_keys: 1,
    })
}
