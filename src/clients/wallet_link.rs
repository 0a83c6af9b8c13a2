use alloy::{
    primitives::Address,
    rpc::types::TransactionReceipt,
    signers::local::PrivateKeySigner,
};
use itertools::Itertools as _;
use tracing::debug;

use crate::{
    contracts::{
        TownsWalletLink,
        towns_wallet_link::{
            IWalletLinkBase::WalletLinkInfo,
            TownsWalletLink::{LinkForAll, TownsWalletLinkErrors},
        },
    },
    errors::for_method,
    events::{EventFilter, EventIterator, filter_events},
    types::WalletProvider,
    utils,
};

/// Client for the root key to wallet link registry.
#[derive(Clone)]
pub struct WalletLinkClient {
    signer: PrivateKeySigner,
    wallet_provider: WalletProvider,

    pub address: Address,
}

impl WalletLinkClient {
    pub async fn new(
        signer: PrivateKeySigner,
        rpc_url: impl ToString + Clone,
        address: Address,
    ) -> eyre::Result<Self> {
        let wallet_provider = utils::get_wallet_provider(signer.clone(), rpc_url).await?;

        Ok(WalletLinkClient {
            signer,
            wallet_provider,
            address,
        })
    }

    pub(crate) fn with_provider(
        signer: PrivateKeySigner,
        wallet_provider: WalletProvider,
        address: Address,
    ) -> Self {
        WalletLinkClient {
            signer,
            wallet_provider,
            address,
        }
    }

    /// Links the signer's wallet to `root_key` (or unlinks it when `value`
    /// is false).
    pub async fn link_for_all(
        &self,
        root_key: Address,
        value: bool,
    ) -> eyre::Result<TransactionReceipt> {
        let contract = TownsWalletLink::new(self.address, &self.wallet_provider);
        debug!(wallet = %self.signer.address(), %root_key, value, "linkForAll");

        let receipt = contract
            .linkForAll(root_key, value)
            .send()
            .await
            .map_err(for_method::<TownsWalletLinkErrors>("linkForAll"))?
            .get_receipt()
            .await?;
        Ok(receipt)
    }

    pub async fn revoke_link(&self, root_key: Address) -> eyre::Result<TransactionReceipt> {
        let contract = TownsWalletLink::new(self.address, &self.wallet_provider);
        let receipt = contract
            .revokeLink(root_key)
            .send()
            .await
            .map_err(for_method::<TownsWalletLinkErrors>("revokeLink"))?
            .get_receipt()
            .await?;
        Ok(receipt)
    }

    pub async fn revoke_all_links(&self) -> eyre::Result<TransactionReceipt> {
        let contract = TownsWalletLink::new(self.address, &self.wallet_provider);
        let receipt = contract
            .revokeAllLinks()
            .send()
            .await
            .map_err(for_method::<TownsWalletLinkErrors>("revokeAllLinks"))?
            .get_receipt()
            .await?;
        Ok(receipt)
    }

    pub async fn check_link_for_all(
        &self,
        root_key: Address,
        wallet: Address,
    ) -> eyre::Result<bool> {
        let contract = TownsWalletLink::new(self.address, &self.wallet_provider);
        let linked = contract
            .checkLinkForAll(root_key, wallet)
            .call()
            .await
            .map_err(for_method::<TownsWalletLinkErrors>("checkLinkForAll"))?;
        Ok(linked)
    }

    pub async fn get_links_by_root_key(
        &self,
        root_key: Address,
    ) -> eyre::Result<Vec<WalletLinkInfo>> {
        let contract = TownsWalletLink::new(self.address, &self.wallet_provider);
        let links = contract
            .getLinksByRootKey(root_key)
            .call()
            .await
            .map_err(for_method::<TownsWalletLinkErrors>("getLinksByRootKey"))?;
        Ok(links)
    }

    /// Root keys the wallet is linked to.
    pub async fn get_links_for_all(&self, wallet: Address) -> eyre::Result<Vec<Address>> {
        let contract = TownsWalletLink::new(self.address, &self.wallet_provider);
        let root_keys = contract
            .getLinksForAll(wallet)
            .call()
            .await
            .map_err(for_method::<TownsWalletLinkErrors>("getLinksForAll"))?;
        Ok(root_keys)
    }

    /// The root key followed by every wallet linked to it.
    pub async fn linked_wallets(&self, root_key: Address) -> eyre::Result<Vec<Address>> {
        let links = self.get_links_by_root_key(root_key).await?;
        Ok(linked_wallet_set(root_key, &links))
    }

    pub async fn link_events(&self, range: EventFilter) -> eyre::Result<EventIterator<LinkForAll>> {
        let filter = range.to_filter::<LinkForAll>(self.address);
        filter_events(&self.wallet_provider, &filter).await
    }
}

pub(crate) fn linked_wallet_set(root_key: Address, links: &[WalletLinkInfo]) -> Vec<Address> {
    std::iter::once(root_key)
        .chain(links.iter().map(|link| link.wallet))
        .unique()
        .collect()
}
