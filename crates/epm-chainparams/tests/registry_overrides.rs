// Registry selection and the regtest/devnet override handles.

mod common;

use common::registry;
use epm_chainparams::{Network, RegistryError};
use epm_consensus::{ConsensusError, DeploymentPos, LlmqType, StartTime, Timeout};
use proptest::prelude::*;

#[test]
fn test_select_bogus_network() {
    let mut registry = registry();
    assert!(matches!(registry.current(), Err(RegistryError::NotSelected)));
    assert!(matches!(registry.select("bogus"), Err(RegistryError::UnknownNetwork(_))));
    assert!(matches!(registry.current(), Err(RegistryError::NotSelected)));
}

#[test]
fn test_select_every_network() {
    for network in Network::ALL {
        let mut registry = registry();
        let selected = registry.select(network.as_str()).unwrap();
        assert_eq!(selected.network(), network);
        assert_eq!(registry.current().unwrap().network(), network);
    }
}

#[test]
fn test_regtest_dip3_override_is_isolated() {
    let mut registry = registry();
    registry.select("regtest").unwrap();
    let before = registry.current().unwrap().clone();

    registry.regtest_overrides().unwrap().update_dip3(10, 20).unwrap();

    let after = registry.current().unwrap();
    assert_eq!(after.consensus().dip0003_height, 10);
    assert_eq!(after.consensus().dip0003_enforcement_height, 20);

    let mut expected = before.consensus().clone();
    expected.dip0003_height = 10;
    expected.dip0003_enforcement_height = 20;
    assert_eq!(after.consensus(), &expected);
    assert_eq!(after.deployments(), before.deployments());
    assert_eq!(after.quorums(), before.quorums());
    assert_eq!(after.checkpoints(), before.checkpoints());

    // Fresh profiles for other networks never see the change.
    let main = registry.profile_for(Network::Main).unwrap();
    assert_eq!(main.consensus().dip0003_height, 201);
    let fresh_regtest = registry.profile_for(Network::Regtest).unwrap();
    assert_eq!(fresh_regtest.consensus().dip0003_height, 432);
}

#[test]
fn test_regtest_dip3_rejects_enforcement_before_activation() {
    let mut registry = registry();
    registry.select("regtest").unwrap();
    let before = registry.current().unwrap().consensus().clone();

    let result = registry.regtest_overrides().unwrap().update_dip3(20, 10);
    assert!(matches!(
        result,
        Err(RegistryError::InvalidParameters {
            network: Network::Regtest,
            source: ConsensusError::InvalidRules(_)
        })
    ));
    assert_eq!(registry.current().unwrap().consensus(), &before);
}

#[test]
fn test_regtest_budget_override() {
    let mut registry = registry();
    registry.select("regtest").unwrap();
    registry.regtest_overrides().unwrap().update_budget(10, 20, 30);

    let rules = registry.current().unwrap().consensus();
    assert_eq!(rules.masternode_payments_start_block, 10);
    assert_eq!(rules.budget_payments_start_block, 20);
    assert_eq!(rules.superblock_start_block, 30);
}

#[test]
fn test_overrides_refused_on_main() {
    let mut registry = registry();
    registry.select("main").unwrap();
    assert!(matches!(
        registry.regtest_overrides(),
        Err(RegistryError::OverrideNotPermitted {
            handle: Network::Regtest,
            selected: Some(Network::Main)
        })
    ));
    assert!(matches!(
        registry.devnet_overrides(),
        Err(RegistryError::OverrideNotPermitted { handle: Network::Dev, .. })
    ));
}

#[test]
fn test_devnet_chain_locks_override() {
    let mut registry = registry();
    registry.select("dev").unwrap();

    registry
        .devnet_overrides()
        .unwrap()
        .update_llmq_chain_locks(LlmqType::Llmq400_60)
        .unwrap();
    let profile = registry.current().unwrap();
    assert_eq!(profile.quorums().chain_locks(), LlmqType::Llmq400_60);
    assert_eq!(profile.quorums().instant_send(), LlmqType::Llmq50_60);

    // Llmq5_60 is not registered on devnets.
    let result = registry.devnet_overrides().unwrap().update_llmq_chain_locks(LlmqType::Llmq5_60);
    assert!(matches!(
        result,
        Err(RegistryError::InvalidParameters {
            source: ConsensusError::UnregisteredQuorum(LlmqType::Llmq5_60),
            ..
        })
    ));
    assert_eq!(registry.current().unwrap().quorums().chain_locks(), LlmqType::Llmq400_60);
}

#[test]
fn test_devnet_subsidy_override() {
    let mut registry = registry();
    registry.select("dev").unwrap();

    registry
        .devnet_overrides()
        .unwrap()
        .update_subsidy_and_difficulty(1000, 500, 10)
        .unwrap();
    let rules = registry.current().unwrap().consensus();
    assert_eq!(rules.minimum_difficulty_blocks, 1000);
    assert_eq!(rules.high_subsidy_blocks, 500);
    assert_eq!(rules.high_subsidy_factor, 10);

    assert!(registry
        .devnet_overrides()
        .unwrap()
        .update_subsidy_and_difficulty(0, 0, 0)
        .is_err());
    assert_eq!(registry.current().unwrap().consensus().high_subsidy_factor, 10);
}

fn any_deployment() -> impl Strategy<Value = DeploymentPos> {
    prop::sample::select(DeploymentPos::ALL.to_vec())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn prop_regtest_deployment_override_is_isolated(
        id in any_deployment(),
        start in 0i64..2_000_000_000,
        length in 1i64..1_000_000,
        window in 1u32..1000,
    ) {
        let mut registry = registry();
        registry.select("regtest").unwrap();
        let before = registry.current().unwrap().clone();
        let threshold = window / 2;

        registry
            .regtest_overrides()
            .unwrap()
            .update_deployment(id, StartTime::At(start), Timeout::At(start + length), Some(window), Some(threshold))
            .unwrap();

        let after = registry.current().unwrap();
        prop_assert_eq!(after.deployments().window_size(id), window);
        prop_assert_eq!(after.deployments().threshold(id), threshold);
        for other in DeploymentPos::ALL.iter().filter(|other| **other != id) {
            prop_assert_eq!(after.deployments().get(*other), before.deployments().get(*other));
        }
        prop_assert_eq!(after.consensus(), before.consensus());
        prop_assert_eq!(after.quorums(), before.quorums());
    }
}
