// Integration tests for the four built-in network profiles.

mod common;

use common::{registry, registry_with, KnownHeaderHasher};
use epm_chainparams::{build_profile, BuildOptions, Network, NetworkProfile, RegistryError};
use epm_consensus::{DeploymentPos, LlmqType, StartTime, Timeout, VERSIONBITS_NUM_BITS};
use epm_core::COIN;
use epm_crypto::{Hash256, Sha256dHasher, Target};

fn profile(network: Network) -> NetworkProfile {
    registry().profile_for(network).unwrap()
}

#[test]
fn test_main_genesis_regression() {
    let main = profile(Network::Main);
    assert_eq!(
        main.genesis_hash().to_hex(),
        "0000052da0bf041f23e726a1e2a2e18970b6e92ec87318d15ca61935c340be45"
    );
    assert_eq!(
        main.genesis().merkle_root().to_hex(),
        "a84706ecbb981aae7a4f701cb0fb93c4536971a13ee9fcea9c2e6a3ba89b32f8"
    );
    assert_eq!(main.genesis().header.nonce, 427_681);
    assert_eq!(main.genesis().transactions[0].outputs[0].value, 50 * COIN);
}

#[test]
fn test_dev_and_regtest_share_genesis() {
    let dev = profile(Network::Dev);
    let regtest = profile(Network::Regtest);
    assert_eq!(dev.genesis_hash(), regtest.genesis_hash());
    assert_eq!(
        regtest.genesis_hash().to_hex(),
        "000008ca1832a4baf228eb1553c03d3a2c8e02399550dd6ea8d65cec3ef23d2e"
    );
    assert_eq!(
        regtest.genesis().merkle_root().to_hex(),
        "e0028eb9648db56b1ac77cf090b99048a8007e2bb64b68f092c03c7f56a662c7"
    );
}

#[test]
fn test_testnet_genesis_is_mined_to_pow_limit() {
    let test = profile(Network::Test);
    let limit = Target::from_hash(&test.consensus().pow_limit);
    assert!(limit.is_met_by(&test.genesis_hash()));
    assert_eq!(test.genesis().header.time, 1_573_325_000);
    assert_eq!(test.genesis().header.bits, 0x1f00_ffff);
    assert_eq!(test.genesis().transactions[0].outputs[0].value, 0);
    // First qualifying nonce under double SHA-256.
    assert_eq!(test.genesis().header.nonce, 48_330);
}

#[test]
fn test_checkpoints_start_at_genesis_and_increase() {
    for network in Network::ALL {
        let p = profile(network);
        let checkpoints = p.checkpoints();
        assert_eq!(checkpoints[0].height, 0, "{}", network);
        assert_eq!(checkpoints[0].hash, p.genesis_hash(), "{}", network);
        assert!(checkpoints.windows(2).all(|w| w[0].height < w[1].height), "{}", network);
        assert_eq!(p.checkpoint_at(0), Some(p.genesis_hash()));
    }
}

#[test]
fn test_main_checkpoint_lookup() {
    let main = profile(Network::Main);
    assert_eq!(main.checkpoints().len(), 9);
    assert_eq!(
        main.checkpoint_at(5019).unwrap().to_hex(),
        "625a57347143d422a9bd762aa55a6efaa7a6b181278625281ebbbe04d9195cf5"
    );
    assert_eq!(main.checkpoint_at(5020), None);
}

#[test]
fn test_deployment_invariants_hold_everywhere() {
    for network in Network::ALL {
        let p = profile(network);
        let table = p.deployments();
        for id in DeploymentPos::ALL {
            let d = table.get(id);
            assert_eq!(d.id, id);
            assert!(d.bit < VERSIONBITS_NUM_BITS, "{} {}", network, id);
            assert!(table.threshold(id) <= table.window_size(id), "{} {}", network, id);
            assert!(table.window_size(id) > 0);
        }
        assert!(table.validate().is_ok());
    }
}

#[test]
fn test_main_deployment_windows() {
    let main = profile(Network::Main);
    let table = main.deployments();
    assert_eq!(table.miner_confirmation_window(), 2016);
    assert_eq!(table.rule_change_activation_threshold(), 1916);
    assert_eq!(table.window_size(DeploymentPos::Csv), 2016);
    assert_eq!(table.window_size(DeploymentPos::Dip0001), 100);
    assert_eq!(table.threshold(DeploymentPos::Dip0003), 1000);
    assert_eq!(table.threshold(DeploymentPos::Dip0008), 1500);
    assert_eq!(table.get(DeploymentPos::Dip0003).timeout, Timeout::NoTimeout);
}

#[test]
fn test_testnet_masternode_deployments_always_active() {
    let test = profile(Network::Test);
    let table = test.deployments();
    for id in [DeploymentPos::Dip0003, DeploymentPos::Dip0008] {
        assert_eq!(table.get(id).start, StartTime::AlwaysActive);
        assert_eq!(table.window_size(id), 1000);
    }
    assert!(matches!(table.get(DeploymentPos::Csv).start, StartTime::At(_)));
}

#[test]
fn test_quorum_roles_resolve() {
    let expected = [
        (Network::Main, LlmqType::Llmq400_60, LlmqType::Llmq50_60),
        (Network::Test, LlmqType::Llmq5_60, LlmqType::Llmq5_60),
        (Network::Dev, LlmqType::Llmq50_60, LlmqType::Llmq50_60),
        (Network::Regtest, LlmqType::Llmq5_60, LlmqType::Llmq5_60),
    ];
    for (network, chain_locks, instant_send) in expected {
        let p = profile(network);
        assert_eq!(p.chain_locks_quorum().map(|q| q.llmq_type), Some(chain_locks), "{}", network);
        assert_eq!(p.instant_send_quorum().map(|q| q.llmq_type), Some(instant_send), "{}", network);
        for quorum in p.quorums().iter() {
            assert!(quorum.threshold <= quorum.size);
            assert!(quorum.min_size <= quorum.size);
            assert!(quorum.signing_active_quorum_count > 0);
        }
    }
}

#[test]
fn test_network_identity_constants() {
    let ports: Vec<u16> = Network::ALL.iter().map(|n| profile(*n).default_port()).collect();
    assert_eq!(ports, vec![1505, 29999, 19999, 19994]);

    let main = profile(Network::Main);
    assert_eq!(main.message_start(), [0xba, 0xc3, 0xe9, 0x7d]);
    assert_eq!(main.base58_prefixes().pubkey_address, 55);
    assert_eq!(main.ext_coin_type(), 5);
    assert_eq!(main.alert_pubkey().len(), 65);
    assert!(main.seeds().iter().all(|seed| seed.socket_addr(1505).is_some()));

    let regtest = profile(Network::Regtest);
    assert!(regtest.alert_pubkey().is_empty());
    assert!(regtest.flags().mine_blocks_on_demand);
    assert!(regtest.seeds().is_empty());
    assert_eq!(regtest.devnet_name(), None);
}

#[test]
fn test_devnet_genesis_is_deterministic_and_meets_target() {
    let options = BuildOptions {
        devnet_name: Some("alpha".to_string()),
        ..Default::default()
    };
    let first = registry_with(options.clone()).profile_for(Network::Dev).unwrap();
    let second = registry_with(options).profile_for(Network::Dev).unwrap();

    assert_eq!(first.devnet_name(), Some("devnet-alpha"));
    assert_eq!(first.devnet_genesis_hash(), second.devnet_genesis_hash());

    let devnet_genesis = first.devnet_genesis().unwrap();
    let hash = first.devnet_genesis_hash().unwrap();
    assert_eq!(devnet_genesis.header.prev_block_hash, first.genesis_hash());
    assert_eq!(devnet_genesis.header.time, first.genesis().header.time + 1);
    assert!(Target::from_compact(devnet_genesis.header.bits).unwrap().is_met_by(&hash));
    assert_eq!(first.checkpoint_at(1), Some(hash));
}

#[test]
fn test_devnet_name_changes_devnet_genesis() {
    let named = |name: &str| {
        registry_with(BuildOptions {
            devnet_name: Some(name.to_string()),
            ..Default::default()
        })
        .profile_for(Network::Dev)
        .unwrap()
    };
    let alpha = named("alpha");
    let beta = named("beta");
    assert_eq!(alpha.genesis_hash(), beta.genesis_hash());
    assert_ne!(alpha.devnet_genesis().unwrap().merkle_root(), beta.devnet_genesis().unwrap().merkle_root());
}

#[test]
fn test_plain_sha256d_rejects_recorded_genesis() {
    let result = build_profile(Network::Main, &Sha256dHasher, &BuildOptions::default());
    match result {
        Err(RegistryError::GenesisMismatch { network, field, expected, .. }) => {
            assert_eq!(network, Network::Main);
            assert_eq!(field, "hash");
            assert_eq!(
                expected,
                Hash256::from_hex("0000052da0bf041f23e726a1e2a2e18970b6e92ec87318d15ca61935c340be45").unwrap()
            );
        }
        other => panic!("expected genesis mismatch, got {:?}", other.map(|p| p.network())),
    }
}

#[test]
fn test_profiles_serialize() {
    let hasher = KnownHeaderHasher::new();
    let p = build_profile(Network::Regtest, &hasher, &BuildOptions::default()).unwrap();
    let json = serde_json::to_value(&p).unwrap();
    assert_eq!(json["network"], "regtest");
    assert_eq!(json["message_start"], "fcc1b7dc");
    assert_eq!(json["default_port"], 19994);
}
