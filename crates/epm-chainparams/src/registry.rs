// PARAMETER REGISTRY
// Owns the single network profile a process runs against.
//
// SAFETY INVARIANTS:
// 1. Unselected -> select -> Selected(profile); there is no way back
// 2. select succeeds at most once per registry
// 3. current() never hands out a profile that failed validation
// 4. Override handles are only issued for the selected regtest or devnet profile
//
// The registry is a plain owned value, created at startup and passed to the
// subsystems that need consensus parameters.

use crate::settings::RegistryConfig;
use crate::error::RegistryError;
use crate::network::Network;
use crate::networks::{build_profile, BuildOptions};
use crate::overrides::{DevnetOverrides, RegtestOverrides};
use crate::profile::NetworkProfile;
use epm_crypto::{PowHasher, Sha256dHasher};
use log::info;
use std::sync::Arc;

pub struct ParameterRegistry {
    hasher: Arc<dyn PowHasher>,
    options: BuildOptions,
    active: Option<NetworkProfile>,
}

impl ParameterRegistry {
    /// A registry that hashes headers with `hasher` and nothing selected yet.
    pub fn new(hasher: Arc<dyn PowHasher>, options: BuildOptions) -> Self {
        ParameterRegistry {
            hasher,
            options,
            active: None,
        }
    }

    /// A registry using double SHA-256 and the default build options.
    pub fn with_sha256d() -> Self {
        Self::new(Arc::new(Sha256dHasher), BuildOptions::default())
    }

    /// Build a registry from loaded configuration and select its network.
    pub fn from_config(config: &RegistryConfig, hasher: Arc<dyn PowHasher>) -> Result<Self, RegistryError> {
        let mut registry = Self::new(hasher, config.build_options());
        registry.select_network(config.network)?;
        Ok(registry)
    }

    /// Select the process network by name.
    pub fn select(&mut self, network: &str) -> Result<&NetworkProfile, RegistryError> {
        let network: Network = network.parse()?;
        self.select_network(network)
    }

    /// Build, validate and activate the profile for `network`.
    ///
    /// For dev this mines the devnet genesis first.
    pub fn select_network(&mut self, network: Network) -> Result<&NetworkProfile, RegistryError> {
        if let Some(active) = &self.active {
            return Err(RegistryError::AlreadySelected(active.network()));
        }

        let profile = build_profile(network, self.hasher.as_ref(), &self.options)?;
        info!(
            "Selected {} network: genesis={}, port={}, {} checkpoints",
            network,
            profile.genesis_hash(),
            profile.default_port(),
            profile.checkpoints().len()
        );
        Ok(&*self.active.insert(profile))
    }

    /// The active profile.
    pub fn current(&self) -> Result<&NetworkProfile, RegistryError> {
        self.active.as_ref().ok_or(RegistryError::NotSelected)
    }

    pub fn is_selected(&self) -> bool {
        self.active.is_some()
    }

    /// Build any network's profile without activating it.
    pub fn profile_for(&self, network: Network) -> Result<NetworkProfile, RegistryError> {
        build_profile(network, self.hasher.as_ref(), &self.options)
    }

    pub fn hasher(&self) -> &dyn PowHasher {
        self.hasher.as_ref()
    }

    pub fn options(&self) -> &BuildOptions {
        &self.options
    }

    /// Mutable access to the selected regtest profile.
    pub fn regtest_overrides(&mut self) -> Result<RegtestOverrides<'_>, RegistryError> {
        let profile = self.override_target(Network::Regtest)?;
        Ok(RegtestOverrides::new(profile))
    }

    /// Mutable access to the selected devnet profile.
    pub fn devnet_overrides(&mut self) -> Result<DevnetOverrides<'_>, RegistryError> {
        let profile = self.override_target(Network::Dev)?;
        Ok(DevnetOverrides::new(profile))
    }

    fn override_target(&mut self, handle: Network) -> Result<&mut NetworkProfile, RegistryError> {
        match self.active.as_mut() {
            Some(profile) if profile.network() == handle => Ok(profile),
            other => Err(RegistryError::OverrideNotPermitted {
                handle,
                selected: other.map(|p| p.network()),
            }),
        }
    }
}
