// NETWORK DEFINITIONS
// One pure construction function per network, plus shared genesis handling.

mod devnet;
mod mainnet;
mod regtest;
mod testnet;

use crate::error::RegistryError;
use crate::network::Network;
use crate::profile::{Base58Prefixes, NetworkProfile};
use epm_core::{build_standard_genesis, Block, GenesisCoinbase, GenesisTemplate};
use epm_crypto::{Hash256, PowHasher};
use log::{debug, warn};

/// Caller choices that shape how profiles are built.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildOptions {
    /// Suffix for the devnet name; the chain is called `devnet-<name>`.
    pub devnet_name: Option<String>,
    /// Adopt recorded genesis hashes instead of re-hashing the header.
    pub trust_recorded_genesis: bool,
}

impl BuildOptions {
    pub fn full_devnet_name(&self) -> String {
        match self.devnet_name.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => format!("devnet-{}", name),
            _ => "devnet".to_string(),
        }
    }
}

/// Build and validate the profile for `network`.
pub fn build_profile(
    network: Network,
    hasher: &dyn PowHasher,
    options: &BuildOptions,
) -> Result<NetworkProfile, RegistryError> {
    debug!("Building {} profile with {} hasher", network, hasher.name());
    let profile = match network {
        Network::Main => mainnet::build(hasher, options)?,
        Network::Test => testnet::build(hasher)?,
        Network::Dev => devnet::build(hasher, options)?,
        Network::Regtest => regtest::build(hasher, options)?,
    };
    profile.validate()?;
    Ok(profile)
}

/// A genesis block whose hash and Merkle root were fixed when the network launched.
pub(crate) struct RecordedGenesis {
    pub coinbase: GenesisCoinbase,
    pub template: GenesisTemplate,
    pub hash: Hash256,
    pub merkle_root: Hash256,
}

/// Rebuild a recorded genesis and check it against its constants.
///
/// The Merkle root is always checked. The header hash is checked with `hasher`
/// unless the caller trusts the recorded value.
pub(crate) fn build_recorded_genesis(
    network: Network,
    recorded: &RecordedGenesis,
    hasher: &dyn PowHasher,
    options: &BuildOptions,
) -> Result<(Block, Hash256), RegistryError> {
    let block = build_standard_genesis(recorded.coinbase, &recorded.template);

    if block.merkle_root() != recorded.merkle_root {
        return Err(RegistryError::GenesisMismatch {
            network,
            field: "merkle root",
            expected: recorded.merkle_root,
            actual: block.merkle_root(),
        });
    }

    if options.trust_recorded_genesis {
        warn!(
            "Trusting recorded {} genesis hash {} without re-hashing",
            network, recorded.hash
        );
        return Ok((block, recorded.hash));
    }

    let hash = block.hash(hasher);
    if hash != recorded.hash {
        return Err(RegistryError::GenesisMismatch {
            network,
            field: "hash",
            expected: recorded.hash,
            actual: hash,
        });
    }
    Ok((block, hash))
}

pub(crate) const MAIN_PREFIXES: Base58Prefixes = Base58Prefixes {
    pubkey_address: 55,
    script_address: 10,
    secret_key: 204,
    ext_public_key: [0x04, 0x88, 0xB2, 0x1E],
    ext_secret_key: [0x04, 0x88, 0xAD, 0xE4],
};

/// Shared by test, dev and regtest (tpub / tprv).
pub(crate) const TEST_PREFIXES: Base58Prefixes = Base58Prefixes {
    pubkey_address: 140,
    script_address: 19,
    secret_key: 239,
    ext_public_key: [0x04, 0x35, 0x87, 0xCF],
    ext_secret_key: [0x04, 0x35, 0x83, 0x94],
};

/// Genesis shared by devnets and regtest.
pub(crate) const TEST_CHAIN_GENESIS: RecordedGenesis = RecordedGenesis {
    coinbase: GenesisCoinbase::Testnet,
    template: GenesisTemplate {
        time: 1_417_713_337,
        nonce: 1_096_447,
        bits: 0x207f_ffff,
        version: 1,
        reward: 50 * epm_core::COIN,
    },
    hash: Hash256::from_hex_const("0x000008ca1832a4baf228eb1553c03d3a2c8e02399550dd6ea8d65cec3ef23d2e"),
    merkle_root: Hash256::from_hex_const("0xe0028eb9648db56b1ac77cf090b99048a8007e2bb64b68f092c03c7f56a662c7"),
};

pub(crate) const TEST_CHAIN_ALERT_KEY: &str = "04517d8a699cb43d3938d7b24faaff7cda448ca4ea267723ba614784de661949bf632d6304316b244646dea079735b9a6fc4af804efb4752075b9fe2245e14e412";

/// Decode a compiled-in hex key.
pub(crate) fn alert_key(network: Network, key: &str) -> Result<Vec<u8>, RegistryError> {
    hex::decode(key).map_err(|e| RegistryError::InvalidProfile {
        network,
        reason: format!("alert key: {}", e),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use epm_crypto::Sha256dHasher;

    #[test]
    fn test_devnet_names() {
        assert_eq!(BuildOptions::default().full_devnet_name(), "devnet");
        let named = BuildOptions {
            devnet_name: Some("alpha".to_string()),
            ..Default::default()
        };
        assert_eq!(named.full_devnet_name(), "devnet-alpha");
        let blank = BuildOptions {
            devnet_name: Some("  ".to_string()),
            ..Default::default()
        };
        assert_eq!(blank.full_devnet_name(), "devnet");
    }

    #[test]
    fn test_untrusted_hash_is_checked() {
        // sha256d is not the consensus hash, so the recorded hash cannot match.
        let result = build_recorded_genesis(
            Network::Regtest,
            &TEST_CHAIN_GENESIS,
            &Sha256dHasher,
            &BuildOptions::default(),
        );
        assert!(matches!(
            result,
            Err(RegistryError::GenesisMismatch { field: "hash", .. })
        ));
    }

    #[test]
    fn test_trusted_hash_still_checks_merkle_root() {
        let trusted = BuildOptions {
            trust_recorded_genesis: true,
            ..Default::default()
        };
        let (block, hash) =
            build_recorded_genesis(Network::Regtest, &TEST_CHAIN_GENESIS, &Sha256dHasher, &trusted).unwrap();
        assert_eq!(hash, TEST_CHAIN_GENESIS.hash);
        assert_eq!(block.merkle_root(), TEST_CHAIN_GENESIS.merkle_root);

        let wrong = RecordedGenesis {
            coinbase: GenesisCoinbase::Mainnet,
            ..TEST_CHAIN_GENESIS
        };
        assert!(matches!(
            build_recorded_genesis(Network::Regtest, &wrong, &Sha256dHasher, &trusted),
            Err(RegistryError::GenesisMismatch { field: "merkle root", .. })
        ));
    }

    #[test]
    fn test_alert_key_decodes() {
        assert_eq!(alert_key(Network::Test, TEST_CHAIN_ALERT_KEY).unwrap().len(), 65);
        assert!(alert_key(Network::Test, "zz").is_err());
    }
}
