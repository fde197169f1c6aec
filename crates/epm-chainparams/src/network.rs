use crate::error::RegistryError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The closed set of networks a node can join.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    #[serde(alias = "mainnet")]
    Main,
    #[serde(alias = "testnet")]
    Test,
    #[serde(alias = "devnet")]
    Dev,
    Regtest,
}

impl Network {
    pub const ALL: [Network; 4] = [Network::Main, Network::Test, Network::Dev, Network::Regtest];

    pub fn as_str(&self) -> &'static str {
        match self {
            Network::Main => "main",
            Network::Test => "test",
            Network::Dev => "dev",
            Network::Regtest => "regtest",
        }
    }

    /// Networks whose parameters may be changed by test harnesses.
    pub fn allows_overrides(&self) -> bool {
        matches!(self, Network::Dev | Network::Regtest)
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Network {
    type Err = RegistryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "main" | "mainnet" => Ok(Network::Main),
            "test" | "testnet" => Ok(Network::Test),
            "dev" | "devnet" => Ok(Network::Dev),
            "regtest" => Ok(Network::Regtest),
            _ => Err(RegistryError::UnknownNetwork(s.to_string())),
        }
    }
}
