use std::{env, fmt, fs, path::Path, str::FromStr};

use alloy::primitives::Address;
use serde::{Deserialize, Serialize};

use crate::registry::{ContractRegistry, TownsContract};

pub const NETWORK_ENV: &str = "TOWNS_NETWORK";
pub const RPC_URL_ENV: &str = "TOWNS_RPC_URL";
pub const ARCHITECT_ADDRESS_ENV: &str = "TOWNS_ARCHITECT_ADDRESS";
pub const WALLET_LINK_ADDRESS_ENV: &str = "TOWNS_WALLET_LINK_ADDRESS";
pub const DELEGATION_ADDRESS_ENV: &str = "TOWNS_DELEGATION_ADDRESS";
pub const STREAM_REGISTRY_ADDRESS_ENV: &str = "TOWNS_STREAM_REGISTRY_ADDRESS";

/// Chains the Towns contracts are deployed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Network {
    Localhost,
    BaseGoerli,
    Goerli,
    Sepolia,
    Base,
}

impl Network {
    pub fn chain_id(&self) -> u64 {
        match self {
            Network::Localhost => 31337,
            Network::BaseGoerli => 84531,
            Network::Goerli => 5,
            Network::Sepolia => 11155111,
            Network::Base => 8453,
        }
    }

    pub fn from_chain_id(chain_id: u64) -> Option<Self> {
        [
            Network::Localhost,
            Network::BaseGoerli,
            Network::Goerli,
            Network::Sepolia,
            Network::Base,
        ]
        .into_iter()
        .find(|n| n.chain_id() == chain_id)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Network::Localhost => "localhost",
            Network::BaseGoerli => "base_goerli",
            Network::Goerli => "goerli",
            Network::Sepolia => "sepolia",
            Network::Base => "base",
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Network {
    type Err = eyre::Report;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('-', "_").as_str() {
            "localhost" | "local" | "anvil" => Ok(Network::Localhost),
            "base_goerli" => Ok(Network::BaseGoerli),
            "goerli" => Ok(Network::Goerli),
            "sepolia" => Ok(Network::Sepolia),
            "base" => Ok(Network::Base),
            other => Err(eyre::eyre!("unknown network: {other}")),
        }
    }
}

/// Deployed addresses of the contracts the clients talk to.
///
/// Town-scoped facets (channels, entitlements, pausable) are not listed here:
/// they live at each town's own address, resolved through the architect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressConfig {
    pub town_architect: Address,
    pub wallet_link: Address,
    pub delegation: Address,
    pub stream_registry: Address,
}

impl ContractRegistry for AddressConfig {
    fn address(&self, contract: TownsContract) -> Address {
        match contract {
            TownsContract::Architect => self.town_architect,
            TownsContract::WalletLink => self.wallet_link,
            TownsContract::Delegation => self.delegation,
            TownsContract::StreamRegistry => self.stream_registry,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TownsConfig {
    pub network: Network,
    pub rpc_url: String,
    pub addresses: AddressConfig,
}

impl TownsConfig {
    /// Loads a config from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> eyre::Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)
            .map_err(|e| eyre::eyre!("failed to read config {}: {e}", path.display()))?;
        let config: TownsConfig = serde_json::from_str(&raw)?;
        Ok(config)
    }

    /// Builds a config from `TOWNS_*` environment variables.
    ///
    /// The network defaults to localhost; the RPC URL and every address are
    /// required.
    pub fn from_env() -> eyre::Result<Self> {
        let network = match env::var(NETWORK_ENV) {
            Ok(n) => n.parse()?,
            Err(_) => Network::Localhost,
        };
        let rpc_url = required_env(RPC_URL_ENV)?;

        Ok(TownsConfig {
            network,
            rpc_url,
            addresses: AddressConfig {
                town_architect: required_env(ARCHITECT_ADDRESS_ENV)?.parse()?,
                wallet_link: required_env(WALLET_LINK_ADDRESS_ENV)?.parse()?,
                delegation: required_env(DELEGATION_ADDRESS_ENV)?.parse()?,
                stream_registry: required_env(STREAM_REGISTRY_ADDRESS_ENV)?.parse()?,
            },
        })
    }

    /// Replaces any address or the RPC URL with its environment override when
    /// one is set.
    pub fn with_env_overrides(mut self) -> eyre::Result<Self> {
        if let Ok(n) = env::var(NETWORK_ENV) {
            self.network = n.parse()?;
        }
        if let Ok(url) = env::var(RPC_URL_ENV) {
            self.rpc_url = url;
        }

        let overrides = [
            (ARCHITECT_ADDRESS_ENV, &mut self.addresses.town_architect),
            (WALLET_LINK_ADDRESS_ENV, &mut self.addresses.wallet_link),
            (DELEGATION_ADDRESS_ENV, &mut self.addresses.delegation),
            (STREAM_REGISTRY_ADDRESS_ENV, &mut self.addresses.stream_registry),
        ];
        for (key, slot) in overrides {
            if let Ok(value) = env::var(key) {
                *slot = value
                    .parse()
                    .map_err(|e| eyre::eyre!("invalid address in {key}: {e}"))?;
            }
        }

        Ok(self)
    }
}

fn required_env(key: &str) -> eyre::Result<String> {
    env::var(key).map_err(|_| eyre::eyre!("missing environment variable {key}"))
}
