use alloy::{
    primitives::Address,
    providers::Provider as _,
    rpc::types::{Log, TransactionReceipt},
    signers::local::PrivateKeySigner,
};
use clients::{
    architect::ArchitectClient, delegation::DelegationClient, erc20::Erc20Client,
    stream_registry::StreamRegistryClient, town::TownClient, wallet_link::WalletLinkClient,
};
use config::{AddressConfig, Network, TownsConfig};
use contracts::towns_architect::TownsArchitect::TownCreated;
use registry::{ContractRegistry, TownsContract};
use tracing::{info, warn};
use types::{PublicProvider, WalletProvider};

pub mod clients;
pub mod config;
pub mod contracts;
pub mod dbtestutils;
pub mod errors;
pub mod events;
pub mod registry;
pub mod sol_types;
pub mod types;
pub mod utils;

/// Every Towns client for one signer, sharing a single connection.
#[derive(Clone)]
pub struct TownsClient {
    pub wallet_provider: WalletProvider,
    pub public_provider: PublicProvider,

    pub address: Address,
    pub addresses: AddressConfig,

    pub architect: ArchitectClient,
    pub towns: TownClient,
    pub wallet_link: WalletLinkClient,
    pub delegation: DelegationClient,
    pub stream_registry: StreamRegistryClient,
    pub erc20: Erc20Client,
}

impl TownsClient {
    pub async fn new(
        signer: PrivateKeySigner,
        rpc_url: impl ToString + Clone,
        addresses: AddressConfig,
    ) -> eyre::Result<Self> {
        let wallet_provider = utils::get_wallet_provider(signer.clone(), rpc_url.clone()).await?;
        let public_provider = utils::get_public_provider(rpc_url.clone()).await?;

        let architect = ArchitectClient::with_provider(
            signer.clone(),
            wallet_provider.clone(),
            addresses.town_architect,
        );
        let wallet_link = WalletLinkClient::with_provider(
            signer.clone(),
            wallet_provider.clone(),
            addresses.wallet_link,
        );

        Ok(TownsClient {
            address: signer.address(),
            addresses,

            towns: TownClient::new(wallet_provider.clone(), architect.clone(), wallet_link.clone()),
            delegation: DelegationClient::with_provider(wallet_provider.clone(), addresses.delegation),
            stream_registry: StreamRegistryClient::with_provider(
                wallet_provider.clone(),
                addresses.stream_registry,
            ),
            erc20: Erc20Client::with_provider(signer, wallet_provider.clone()),
            architect,
            wallet_link,

            wallet_provider,
            public_provider,
        })
    }

    /// Connects using a loaded config. A node reporting a different chain
    /// than the configured network is logged, not rejected.
    pub async fn from_config(signer: PrivateKeySigner, config: &TownsConfig) -> eyre::Result<Self> {
        let client = Self::new(signer, config.rpc_url.clone(), config.addresses).await?;

        let chain_id = client.public_provider.get_chain_id().await?;
        if chain_id != config.network.chain_id() {
            warn!(
                configured = %config.network,
                chain_id,
                actual = ?Network::from_chain_id(chain_id),
                "rpc chain id does not match configured network"
            );
        }
        info!(network = %config.network, address = %client.address, "connected");

        Ok(client)
    }

    pub fn get_town_created_event(receipt: &TransactionReceipt) -> eyre::Result<Log<TownCreated>> {
        ArchitectClient::get_town_created_event(receipt)
    }

    /// Waits for the next `TownCreated` event from `creator`.
    pub async fn wait_for_town_created(
        &self,
        creator: Address,
        from_block: Option<u64>,
    ) -> eyre::Result<Log<TownCreated>> {
        self.architect.wait_for_town_created(creator, from_block).await
    }
}

impl ContractRegistry for TownsClient {
    fn address(&self, contract: TownsContract) -> Address {
        self.addresses.address(contract)
    }
}
