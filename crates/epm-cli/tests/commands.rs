// End-to-end runs of the epm-params commands through the library entry point.

use clap::Parser;
use epm_cli::{run, Cli};

fn run_args(args: &[&str]) -> anyhow::Result<serde_json::Value> {
    let cli = Cli::try_parse_from(std::iter::once("epm-params").chain(args.iter().copied())).unwrap();
    run(&cli)
}

#[test]
fn test_checkpoints_regtest() {
    let output = run_args(&["--trust-recorded-genesis", "checkpoints", "regtest"]).unwrap();
    let checkpoints = output.as_array().unwrap();
    assert_eq!(checkpoints.len(), 1);
    assert_eq!(checkpoints[0]["height"], 0);
    assert_eq!(
        checkpoints[0]["hash"],
        "000008ca1832a4baf228eb1553c03d3a2c8e02399550dd6ea8d65cec3ef23d2e"
    );
}

#[test]
fn test_deployments_report_effective_windows() {
    let output = run_args(&["deployments", "main", "--trust-recorded-genesis"]).unwrap();
    assert_eq!(output["miner_confirmation_window"], 2016);
    let deployments = output["deployments"].as_array().unwrap();
    assert_eq!(deployments.len(), 6);
    let csv = deployments.iter().find(|d| d["name"] == "csv").unwrap();
    assert_eq!(csv["window_size"], 2016);
    assert_eq!(csv["threshold"], 1916);
}

#[test]
fn test_quorums_regtest() {
    let output = run_args(&["--trust-recorded-genesis", "quorums", "regtest"]).unwrap();
    assert_eq!(output["chain_locks"], "llmq_5_60");
    assert_eq!(output["quorums"].as_array().unwrap().len(), 2);
}

#[test]
fn test_show_devnet_uses_name_flag() {
    let output = run_args(&["--trust-recorded-genesis", "--devnet-name", "beta", "show", "devnet"]).unwrap();
    assert_eq!(output["network"], "dev");
    assert_eq!(output["devnet_name"], "devnet-beta");
    assert_eq!(output["checkpoints"].as_array().unwrap().len(), 2);
}

#[test]
fn test_untrusted_main_explains_mismatch() {
    let err = run_args(&["show", "main"]).unwrap_err();
    assert!(format!("{:#}", err).contains("--trust-recorded-genesis"));
}

#[test]
fn test_unknown_network_fails() {
    assert!(run_args(&["--trust-recorded-genesis", "show", "bogus"]).is_err());
}

#[test]
fn test_verify_all_networks() {
    let output = run_args(&["--trust-recorded-genesis", "verify"]).unwrap();
    let networks: Vec<&str> = output
        .as_array()
        .unwrap()
        .iter()
        .map(|n| n["network"].as_str().unwrap())
        .collect();
    assert_eq!(networks, vec!["main", "test", "dev", "regtest"]);
    assert_eq!(output[1]["genesis_nonce"], 48_330);
}
