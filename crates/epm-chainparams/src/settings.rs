// REGISTRY CONFIGURATION
// Startup choices for the parameter registry, layered from defaults,
// an optional `epm-params` file and `EPM_*` environment variables.
//
// SAFETY INVARIANTS:
// 1. Later layers win: defaults < file < environment
// 2. An unknown network name is a load error, never a silent fallback to main

use crate::error::RegistryError;
use crate::network::Network;
use crate::networks::BuildOptions;
use config::{Config, Environment, File};
use log::debug;
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RegistryConfig {
    pub network: Network,
    #[serde(default)]
    pub devnet_name: Option<String>,
    #[serde(default)]
    pub trust_recorded_genesis: bool,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        RegistryConfig {
            network: Network::Main,
            devnet_name: None,
            trust_recorded_genesis: false,
        }
    }
}

impl RegistryConfig {
    /// Load configuration. With no `path`, `epm-params.{toml,json,yaml}` in the
    /// working directory is used if present.
    pub fn load(path: Option<&Path>) -> Result<Self, RegistryError> {
        let file = match path {
            Some(path) => File::from(path).required(true),
            None => File::with_name("epm-params").required(false),
        };

        let loaded: RegistryConfig = Config::builder()
            .set_default("network", "main")?
            .set_default("trust_recorded_genesis", false)?
            .add_source(file)
            .add_source(Environment::with_prefix("EPM"))
            .build()?
            .try_deserialize()?;

        debug!("Loaded registry configuration: {:?}", loaded);
        Ok(loaded)
    }

    pub fn build_options(&self) -> BuildOptions {
        BuildOptions {
            devnet_name: self.devnet_name.clone(),
            trust_recorded_genesis: self.trust_recorded_genesis,
        }
    }
}
