// PARAMETER INSPECTION COMMANDS
// Command-line surface over the parameter registry. Every command renders
// JSON so output can be diffed between builds.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use epm_chainparams::{Network, NetworkProfile, ParameterRegistry, RegistryConfig, RegistryError};
use epm_crypto::{Hash256, Sha256dHasher};
use serde::Serialize;
use serde_json::{json, Value};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "epm-params")]
#[command(about = "EPM network parameter registry", long_about = None)]
pub struct Cli {
    /// Configuration file (defaults to ./epm-params.toml when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Devnet name suffix; the chain is called devnet-<name>
    #[arg(long, global = true)]
    pub devnet_name: Option<String>,

    /// Adopt recorded genesis hashes instead of re-hashing with sha256d
    #[arg(long, global = true)]
    pub trust_recorded_genesis: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the full profile of a network
    Show { network: Option<String> },

    /// Print the versionbits deployments of a network
    Deployments { network: Option<String> },

    /// Print the quorum descriptors and signing selections of a network
    Quorums { network: Option<String> },

    /// Print the checkpoints of a network
    Checkpoints { network: Option<String> },

    /// Build and validate every network profile
    Verify,
}

/// Summary line for one network in `verify` output.
#[derive(Debug, Serialize)]
pub struct VerifiedNetwork {
    pub network: Network,
    pub genesis_hash: Hash256,
    pub genesis_nonce: u32,
    pub devnet_genesis_hash: Option<Hash256>,
    pub checkpoints: usize,
}

impl Cli {
    /// Layer command-line flags over file and environment configuration.
    pub fn resolve_config(&self) -> Result<RegistryConfig> {
        let mut config = RegistryConfig::load(self.config.as_deref()).context("loading registry configuration")?;
        if let Some(name) = &self.devnet_name {
            config.devnet_name = Some(name.clone());
        }
        if self.trust_recorded_genesis {
            config.trust_recorded_genesis = true;
        }
        Ok(config)
    }
}

#[derive(Clone, Copy)]
enum View {
    Profile,
    Deployments,
    Quorums,
    Checkpoints,
}

/// Execute a parsed command and return its JSON output.
pub fn run(cli: &Cli) -> Result<Value> {
    let mut config = cli.resolve_config()?;

    let (view, network) = match &cli.command {
        Commands::Show { network } => (View::Profile, network),
        Commands::Deployments { network } => (View::Deployments, network),
        Commands::Quorums { network } => (View::Quorums, network),
        Commands::Checkpoints { network } => (View::Checkpoints, network),
        Commands::Verify => return verify(&config),
    };
    if let Some(name) = network {
        config.network = name.parse()?;
    }

    let registry = ParameterRegistry::from_config(&config, Arc::new(Sha256dHasher)).map_err(explain)?;
    let profile = registry.current()?;
    info!("Rendering {} profile", profile.network());

    let output = match view {
        View::Profile => serde_json::to_value(profile)?,
        View::Deployments => deployments(profile),
        View::Quorums => quorums(profile)?,
        View::Checkpoints => serde_json::to_value(profile.checkpoints())?,
    };
    Ok(output)
}

fn verify(config: &RegistryConfig) -> Result<Value> {
    let registry = ParameterRegistry::new(Arc::new(Sha256dHasher), config.build_options());
    let mut verified = Vec::with_capacity(Network::ALL.len());

    for network in Network::ALL {
        let profile = registry
            .profile_for(network)
            .map_err(explain)
            .with_context(|| format!("verifying {} profile", network))?;
        info!("{} profile OK: genesis {}", network, profile.genesis_hash());
        verified.push(VerifiedNetwork {
            network,
            genesis_hash: profile.genesis_hash(),
            genesis_nonce: profile.genesis().header.nonce,
            devnet_genesis_hash: profile.devnet_genesis_hash(),
            checkpoints: profile.checkpoints().len(),
        });
    }
    Ok(serde_json::to_value(verified)?)
}

fn deployments(profile: &NetworkProfile) -> Value {
    let table = profile.deployments();
    let entries: Vec<Value> = table
        .iter()
        .map(|d| {
            json!({
                "name": d.id.name(),
                "bit": d.bit,
                "start": d.start,
                "timeout": d.timeout,
                "window_size": table.window_size(d.id),
                "threshold": table.threshold(d.id),
            })
        })
        .collect();
    json!({
        "miner_confirmation_window": table.miner_confirmation_window(),
        "rule_change_activation_threshold": table.rule_change_activation_threshold(),
        "deployments": entries,
    })
}

fn quorums(profile: &NetworkProfile) -> Result<Value> {
    let quorums = profile.quorums();
    Ok(json!({
        "chain_locks": quorums.chain_locks().to_string(),
        "instant_send": quorums.instant_send().to_string(),
        "quorums": serde_json::to_value(quorums.iter().collect::<Vec<_>>())?,
    }))
}

/// Point at the trust flag when the bundled hasher cannot reproduce a recorded genesis.
fn explain(err: RegistryError) -> anyhow::Error {
    match err {
        RegistryError::GenesisMismatch { field: "hash", network, .. } => {
            warn!("{} genesis hash differs under sha256d", network);
            anyhow::Error::new(err).context(
                "the bundled sha256d hasher cannot reproduce the consensus genesis hash; \
                 rerun with --trust-recorded-genesis or EPM_TRUST_RECORDED_GENESIS=true",
            )
        }
        other => other.into(),
    }
}
