// NETWORK PROFILE
// Every consensus and network constant for one network.
//
// SAFETY INVARIANTS:
// 1. Built once per network by a pure construction function; read-only afterwards
// 2. Checkpoint heights strictly increase and checkpoint 0 is the genesis hash
// 3. Deployment, quorum and rule invariants hold whenever validate() returns Ok
// 4. Mutation is only reachable through the regtest/devnet override handles

use crate::error::RegistryError;
use crate::network::Network;
use epm_consensus::{ConsensusRules, DeploymentTable, QuorumParams, QuorumSet};
use epm_core::Block;
use epm_crypto::Hash256;
use serde::Serialize;
use std::net::{IpAddr, SocketAddr};

/// Address and extended-key version bytes consumed by the base58 encoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Base58Prefixes {
    pub pubkey_address: u8,
    pub script_address: u8,
    pub secret_key: u8,
    #[serde(with = "hex::serde")]
    pub ext_public_key: [u8; 4],
    #[serde(with = "hex::serde")]
    pub ext_secret_key: [u8; 4],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Checkpoint {
    pub height: u32,
    pub hash: Hash256,
}

/// A bootstrap peer source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DnsSeed {
    pub name: String,
    pub host: String,
}

impl DnsSeed {
    pub fn new(name: &str, host: &str) -> Self {
        DnsSeed {
            name: name.trim().to_string(),
            host: host.trim().to_string(),
        }
    }

    /// The seed as a fixed address when its host is a literal IP.
    pub fn socket_addr(&self, port: u16) -> Option<SocketAddr> {
        self.host.parse::<IpAddr>().ok().map(|ip| SocketAddr::new(ip, port))
    }
}

/// Transaction-rate snapshot for sync progress estimates. Never used for consensus.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChainTxData {
    pub time: i64,
    pub tx_count: u64,
    pub tx_rate: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NetworkFlags {
    pub mining_requires_peers: bool,
    pub default_consistency_checks: bool,
    pub require_standard: bool,
    pub require_routable_external_ip: bool,
    pub mine_blocks_on_demand: bool,
    pub allow_multiple_addresses_from_group: bool,
    pub allow_multiple_ports: bool,
    pub bip9_check_masternodes_upgraded: bool,
}

/// Mixing pool and request bookkeeping limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PoolLimits {
    pub min_participants: u32,
    pub max_participants: u32,
    /// Seconds before a fulfilled network request may be repeated.
    pub fulfilled_request_expire_time: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NetworkProfile {
    pub(crate) network: Network,
    pub(crate) devnet_name: Option<String>,

    pub(crate) genesis: Block,
    pub(crate) genesis_hash: Hash256,
    pub(crate) devnet_genesis: Option<Block>,
    pub(crate) devnet_genesis_hash: Option<Hash256>,

    pub(crate) consensus: ConsensusRules,
    pub(crate) deployments: DeploymentTable,
    pub(crate) quorums: QuorumSet,

    #[serde(with = "hex::serde")]
    pub(crate) message_start: [u8; 4],
    #[serde(with = "hex::serde")]
    pub(crate) alert_pubkey: Vec<u8>,
    pub(crate) default_port: u16,
    pub(crate) prune_after_height: u64,
    pub(crate) seeds: Vec<DnsSeed>,
    pub(crate) base58_prefixes: Base58Prefixes,
    pub(crate) ext_coin_type: u32,
    pub(crate) checkpoints: Vec<Checkpoint>,
    pub(crate) chain_tx_data: ChainTxData,
    pub(crate) flags: NetworkFlags,
    pub(crate) pool: PoolLimits,
    pub(crate) spork_addresses: Vec<String>,
    pub(crate) min_spork_keys: u32,
}

impl NetworkProfile {
    pub fn network(&self) -> Network {
        self.network
    }

    /// Full devnet name (`devnet` or `devnet-<name>`); `None` off devnet.
    pub fn devnet_name(&self) -> Option<&str> {
        self.devnet_name.as_deref()
    }

    pub fn genesis(&self) -> &Block {
        &self.genesis
    }

    pub fn genesis_hash(&self) -> Hash256 {
        self.genesis_hash
    }

    /// The mined block that chains a devnet off the shared genesis.
    pub fn devnet_genesis(&self) -> Option<&Block> {
        self.devnet_genesis.as_ref()
    }

    pub fn devnet_genesis_hash(&self) -> Option<Hash256> {
        self.devnet_genesis_hash
    }

    pub fn consensus(&self) -> &ConsensusRules {
        &self.consensus
    }

    pub fn deployments(&self) -> &DeploymentTable {
        &self.deployments
    }

    pub fn quorums(&self) -> &QuorumSet {
        &self.quorums
    }

    pub fn chain_locks_quorum(&self) -> Option<&QuorumParams> {
        self.quorums.get(self.quorums.chain_locks())
    }

    pub fn instant_send_quorum(&self) -> Option<&QuorumParams> {
        self.quorums.get(self.quorums.instant_send())
    }

    pub fn message_start(&self) -> [u8; 4] {
        self.message_start
    }

    pub fn alert_pubkey(&self) -> &[u8] {
        &self.alert_pubkey
    }

    pub fn default_port(&self) -> u16 {
        self.default_port
    }

    pub fn prune_after_height(&self) -> u64 {
        self.prune_after_height
    }

    pub fn seeds(&self) -> &[DnsSeed] {
        &self.seeds
    }

    pub fn base58_prefixes(&self) -> &Base58Prefixes {
        &self.base58_prefixes
    }

    /// BIP44 coin type.
    pub fn ext_coin_type(&self) -> u32 {
        self.ext_coin_type
    }

    pub fn checkpoints(&self) -> &[Checkpoint] {
        &self.checkpoints
    }

    /// Expected hash at `height`, if it is checkpointed.
    pub fn checkpoint_at(&self, height: u32) -> Option<Hash256> {
        self.checkpoints
            .binary_search_by_key(&height, |c| c.height)
            .ok()
            .map(|i| self.checkpoints[i].hash)
    }

    pub fn chain_tx_data(&self) -> &ChainTxData {
        &self.chain_tx_data
    }

    pub fn flags(&self) -> &NetworkFlags {
        &self.flags
    }

    pub fn pool(&self) -> &PoolLimits {
        &self.pool
    }

    pub fn spork_addresses(&self) -> &[String] {
        &self.spork_addresses
    }

    pub fn min_spork_keys(&self) -> u32 {
        self.min_spork_keys
    }

    /// Check every cross-field invariant of the profile.
    pub fn validate(&self) -> Result<(), RegistryError> {
        let network = self.network;
        let invalid = |reason: String| RegistryError::InvalidProfile { network, reason };

        self.consensus
            .validate()
            .map_err(|e| RegistryError::consensus(network, e))?;
        self.deployments
            .validate()
            .map_err(|e| RegistryError::consensus(network, e))?;
        self.quorums
            .validate()
            .map_err(|e| RegistryError::consensus(network, e))?;

        match self.checkpoints.first() {
            Some(first) if first.height == 0 && first.hash == self.genesis_hash => {}
            Some(first) => {
                return Err(invalid(format!(
                    "checkpoint {} ({}) is not the genesis block {}",
                    first.height, first.hash, self.genesis_hash
                )))
            }
            None => return Err(invalid("no checkpoints".to_string())),
        }
        if let Some(pair) = self.checkpoints.windows(2).find(|w| w[0].height >= w[1].height) {
            return Err(invalid(format!(
                "checkpoint heights not increasing at {} -> {}",
                pair[0].height, pair[1].height
            )));
        }

        match (&self.devnet_genesis, self.devnet_genesis_hash) {
            (Some(block), Some(hash)) => {
                if block.header.prev_block_hash != self.genesis_hash {
                    return Err(invalid("devnet genesis does not build on genesis".to_string()));
                }
                if self.checkpoint_at(1) != Some(hash) {
                    return Err(invalid("checkpoint 1 is not the devnet genesis".to_string()));
                }
            }
            (None, None) => {}
            _ => return Err(invalid("devnet genesis recorded without its hash".to_string())),
        }

        if self.pool.min_participants > self.pool.max_participants {
            return Err(invalid(format!(
                "pool minimum {} exceeds maximum {}",
                self.pool.min_participants, self.pool.max_participants
            )));
        }
        if self.chain_tx_data.tx_rate < 0.0 {
            return Err(invalid("negative transaction rate".to_string()));
        }
        Ok(())
    }
}
