// Shared fixtures for the registry integration tests.

#![allow(dead_code)]

use epm_chainparams::{BuildOptions, ParameterRegistry};
use epm_crypto::{sha256d, Hash256, PowHasher, HEADER_SIZE};
use std::collections::HashMap;
use std::sync::Arc;

const MAIN_GENESIS_HEADER: &str = "010000000000000000000000000000000000000000000000000000000000000000000000f8329ba83b6a2e9ceafce93ea1716953c493fbb01c704f7aae1a98bbec0647a800ffed5df0ff0f1ea1860600";
const MAIN_GENESIS_HASH: &str = "0000052da0bf041f23e726a1e2a2e18970b6e92ec87318d15ca61935c340be45";

const TEST_CHAIN_GENESIS_HEADER: &str = "010000000000000000000000000000000000000000000000000000000000000000000000c762a6567f3cc092f0684bb62b7e00a84890b990f07cc71a6bb58d64b98e02e0b9968054ffff7f20ffba1000";
const TEST_CHAIN_GENESIS_HASH: &str = "000008ca1832a4baf228eb1553c03d3a2c8e02399550dd6ea8d65cec3ef23d2e";

/// Answers with the consensus hash for the recorded genesis headers and
/// falls back to double SHA-256 for everything else.
pub struct KnownHeaderHasher {
    known: HashMap<[u8; HEADER_SIZE], Hash256>,
}

impl KnownHeaderHasher {
    pub fn new() -> Self {
        let known = [
            (MAIN_GENESIS_HEADER, MAIN_GENESIS_HASH),
            (TEST_CHAIN_GENESIS_HEADER, TEST_CHAIN_GENESIS_HASH),
        ]
        .into_iter()
        .map(|(header, hash)| {
            let header: [u8; HEADER_SIZE] = hex::decode(header).unwrap().try_into().unwrap();
            (header, Hash256::from_hex(hash).unwrap())
        })
        .collect();
        KnownHeaderHasher { known }
    }
}

impl PowHasher for KnownHeaderHasher {
    fn pow_hash(&self, header: &[u8; HEADER_SIZE]) -> Hash256 {
        self.known.get(header).copied().unwrap_or_else(|| sha256d(header))
    }

    fn name(&self) -> &'static str {
        "known-header"
    }
}

pub fn registry() -> ParameterRegistry {
    ParameterRegistry::new(Arc::new(KnownHeaderHasher::new()), BuildOptions::default())
}

pub fn registry_with(options: BuildOptions) -> ParameterRegistry {
    ParameterRegistry::new(Arc::new(KnownHeaderHasher::new()), options)
}
