use std::{collections::HashMap, sync::Arc};

use alloy::{
    primitives::{Address, U256},
    rpc::types::TransactionReceipt,
};
use futures::future::try_join_all;
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::{
    clients::{architect::ArchitectClient, wallet_link::WalletLinkClient},
    contracts::{
        TownsChannels, TownsEntitlements, TownsPausable,
        towns_channels::{IChannelBase::Channel, TownsChannels::TownsChannelsErrors},
        towns_entitlements::{
            IEntitlementsBase::Entitlement, TownsEntitlements::TownsEntitlementsErrors,
        },
    },
    errors::{call_failed, for_method},
    types::{Permission, WalletProvider},
};

/// Per-town operations.
///
/// Towns are addressed by their network id. The id is resolved to the town
/// contract through the architect once and cached; the channel,
/// entitlement and pausable facets all live at that address.
#[derive(Clone)]
pub struct TownClient {
    wallet_provider: WalletProvider,
    architect: ArchitectClient,
    wallet_link: WalletLinkClient,

    towns: Arc<RwLock<HashMap<String, Address>>>,
}

impl TownClient {
    pub fn new(
        wallet_provider: WalletProvider,
        architect: ArchitectClient,
        wallet_link: WalletLinkClient,
    ) -> Self {
        TownClient {
            wallet_provider,
            architect,
            wallet_link,
            towns: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// The town contract for `town_id`. Fails for ids the architect does not
    /// know.
    pub async fn town_address(&self, town_id: &str) -> eyre::Result<Address> {
        if let Some(address) = self.towns.read().await.get(town_id) {
            return Ok(*address);
        }

        let address = self.architect.get_town_by_id(town_id).await?;
        if address.is_zero() {
            eyre::bail!("town {town_id} not found");
        }

        debug!(town_id, %address, "resolved town");
        self.towns.write().await.insert(town_id.to_string(), address);
        Ok(address)
    }

    /// Drops the cached address for `town_id`.
    pub async fn invalidate(&self, town_id: &str) {
        self.towns.write().await.remove(town_id);
    }

    pub async fn get_channels(&self, town_id: &str) -> eyre::Result<Vec<Channel>> {
        let contract = TownsChannels::new(self.town_address(town_id).await?, &self.wallet_provider);
        let channels = contract
            .getChannels()
            .call()
            .await
            .map_err(for_method::<TownsChannelsErrors>("getChannels"))?;
        Ok(channels)
    }

    pub async fn get_channel(&self, town_id: &str, channel_id: &str) -> eyre::Result<Channel> {
        let contract = TownsChannels::new(self.town_address(town_id).await?, &self.wallet_provider);
        let channel = contract
            .getChannel(channel_id.to_string())
            .call()
            .await
            .map_err(for_method::<TownsChannelsErrors>("getChannel"))?;
        Ok(channel)
    }

    pub async fn create_channel(
        &self,
        town_id: &str,
        channel_id: &str,
        metadata: &str,
        role_ids: Vec<U256>,
    ) -> eyre::Result<TransactionReceipt> {
        let contract = TownsChannels::new(self.town_address(town_id).await?, &self.wallet_provider);
        info!(town_id, channel_id, "creating channel");

        let receipt = contract
            .createChannel(channel_id.to_string(), metadata.to_string(), role_ids)
            .send()
            .await
            .map_err(for_method::<TownsChannelsErrors>("createChannel"))?
            .get_receipt()
            .await?;
        Ok(receipt)
    }

    pub async fn update_channel(
        &self,
        town_id: &str,
        channel_id: &str,
        metadata: &str,
        disabled: bool,
    ) -> eyre::Result<TransactionReceipt> {
        let contract = TownsChannels::new(self.town_address(town_id).await?, &self.wallet_provider);
        let receipt = contract
            .updateChannel(channel_id.to_string(), metadata.to_string(), disabled)
            .send()
            .await
            .map_err(for_method::<TownsChannelsErrors>("updateChannel"))?
            .get_receipt()
            .await?;
        Ok(receipt)
    }

    pub async fn remove_channel(
        &self,
        town_id: &str,
        channel_id: &str,
    ) -> eyre::Result<TransactionReceipt> {
        let contract = TownsChannels::new(self.town_address(town_id).await?, &self.wallet_provider);
        let receipt = contract
            .removeChannel(channel_id.to_string())
            .send()
            .await
            .map_err(for_method::<TownsChannelsErrors>("removeChannel"))?
            .get_receipt()
            .await?;
        Ok(receipt)
    }

    pub async fn add_role_to_channel(
        &self,
        town_id: &str,
        channel_id: &str,
        role_id: U256,
    ) -> eyre::Result<TransactionReceipt> {
        let contract = TownsChannels::new(self.town_address(town_id).await?, &self.wallet_provider);
        let receipt = contract
            .addRoleToChannel(channel_id.to_string(), role_id)
            .send()
            .await
            .map_err(for_method::<TownsChannelsErrors>("addRoleToChannel"))?
            .get_receipt()
            .await?;
        Ok(receipt)
    }

    pub async fn remove_role_from_channel(
        &self,
        town_id: &str,
        channel_id: &str,
        role_id: U256,
    ) -> eyre::Result<TransactionReceipt> {
        let contract = TownsChannels::new(self.town_address(town_id).await?, &self.wallet_provider);
        let receipt = contract
            .removeRoleFromChannel(channel_id.to_string(), role_id)
            .send()
            .await
            .map_err(for_method::<TownsChannelsErrors>("removeRoleFromChannel"))?
            .get_receipt()
            .await?;
        Ok(receipt)
    }

    pub async fn get_entitlements(&self, town_id: &str) -> eyre::Result<Vec<Entitlement>> {
        let contract =
            TownsEntitlements::new(self.town_address(town_id).await?, &self.wallet_provider);
        let entitlements = contract
            .getEntitlements()
            .call()
            .await
            .map_err(for_method::<TownsEntitlementsErrors>("getEntitlements"))?;
        Ok(entitlements)
    }

    pub async fn add_entitlement(
        &self,
        town_id: &str,
        entitlement: Address,
    ) -> eyre::Result<TransactionReceipt> {
        let contract =
            TownsEntitlements::new(self.town_address(town_id).await?, &self.wallet_provider);
        let receipt = contract
            .addEntitlement(entitlement)
            .send()
            .await
            .map_err(for_method::<TownsEntitlementsErrors>("addEntitlement"))?
            .get_receipt()
            .await?;
        Ok(receipt)
    }

    pub async fn remove_entitlement(
        &self,
        town_id: &str,
        entitlement: Address,
    ) -> eyre::Result<TransactionReceipt> {
        let contract =
            TownsEntitlements::new(self.town_address(town_id).await?, &self.wallet_provider);
        let receipt = contract
            .removeEntitlement(entitlement)
            .send()
            .await
            .map_err(for_method::<TownsEntitlementsErrors>("removeEntitlement"))?
            .get_receipt()
            .await?;
        Ok(receipt)
    }

    pub async fn is_entitled_to_town(
        &self,
        town_id: &str,
        user: Address,
        permission: Permission,
    ) -> eyre::Result<bool> {
        let contract =
            TownsEntitlements::new(self.town_address(town_id).await?, &self.wallet_provider);
        let entitled = contract
            .isEntitledToTown(user, permission.to_string())
            .call()
            .await
            .map_err(for_method::<TownsEntitlementsErrors>("isEntitledToTown"))?;
        Ok(entitled)
    }

    pub async fn is_entitled_to_channel(
        &self,
        town_id: &str,
        channel_id: &str,
        user: Address,
        permission: Permission,
    ) -> eyre::Result<bool> {
        let contract =
            TownsEntitlements::new(self.town_address(town_id).await?, &self.wallet_provider);
        let entitled = contract
            .isEntitledToChannel(channel_id.to_string(), user, permission.to_string())
            .call()
            .await
            .map_err(for_method::<TownsEntitlementsErrors>("isEntitledToChannel"))?;
        Ok(entitled)
    }

    /// Checks the channel permission for `root_key` and every wallet linked
    /// to it. Passes when any of them is entitled.
    pub async fn is_entitled_to_channel_any(
        &self,
        town_id: &str,
        channel_id: &str,
        root_key: Address,
        permission: Permission,
    ) -> eyre::Result<bool> {
        // warm the cache so the fan-out below shares one lookup
        self.town_address(town_id).await?;

        let wallets = self.wallet_link.linked_wallets(root_key).await?;
        debug!(town_id, channel_id, %root_key, wallets = wallets.len(), %permission, "checking linked wallets");

        let results = try_join_all(
            wallets
                .into_iter()
                .map(|wallet| self.is_entitled_to_channel(town_id, channel_id, wallet, permission)),
        )
        .await?;

        Ok(results.into_iter().any(|entitled| entitled))
    }

    pub async fn is_town_disabled(&self, town_id: &str) -> eyre::Result<bool> {
        let contract = TownsPausable::new(self.town_address(town_id).await?, &self.wallet_provider);
        let paused = contract
            .paused()
            .call()
            .await
            .map_err(call_failed("paused"))?;
        Ok(paused)
    }

    pub async fn is_channel_disabled(&self, town_id: &str, channel_id: &str) -> eyre::Result<bool> {
        Ok(self.get_channel(town_id, channel_id).await?.disabled)
    }
}
