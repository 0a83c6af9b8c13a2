use alloy::{
    primitives::{Address, U256},
    providers::Provider as _,
    rpc::types::{Log, TransactionReceipt},
    signers::local::PrivateKeySigner,
};
use tracing::{debug, info};

use crate::{
    contracts::{
        TownsArchitect, TownsPausable,
        towns_architect::{
            ITownArchitectBase,
            TownsArchitect::{TownCreated, TownsArchitectErrors},
        },
    },
    errors::{call_failed, for_method},
    events::{self, EventFilter, EventIterator},
    types::WalletProvider,
    utils,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArchitectImplementations {
    pub town_token: Address,
    pub user_entitlement: Address,
    pub token_entitlement: Address,
}

/// Client for the town factory.
#[derive(Clone)]
pub struct ArchitectClient {
    signer: PrivateKeySigner,
    wallet_provider: WalletProvider,

    pub address: Address,
}

impl ArchitectClient {
    pub async fn new(
        signer: PrivateKeySigner,
        rpc_url: impl ToString + Clone,
        address: Address,
    ) -> eyre::Result<Self> {
        let wallet_provider = utils::get_wallet_provider(signer.clone(), rpc_url).await?;

        Ok(ArchitectClient {
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
        ArchitectClient {
            signer,
            wallet_provider,
            address,
        }
    }

    /// Creates a town. The new town's address is in the receipt's
    /// `TownCreated` event, see [`Self::get_town_created_event`].
    pub async fn create_town(
        &self,
        town_info: ITownArchitectBase::TownInfo,
    ) -> eyre::Result<TransactionReceipt> {
        let contract = TownsArchitect::new(self.address, &self.wallet_provider);
        info!(town_id = %town_info.id, creator = %self.signer.address(), "creating town");

        let receipt = contract
            .createTown(town_info)
            .send()
            .await
            .map_err(for_method::<TownsArchitectErrors>("createTown"))?
            .get_receipt()
            .await?;

        Ok(receipt)
    }

    /// The address a town with this id and membership would be deployed to.
    pub async fn compute_town(
        &self,
        town_id: impl Into<String>,
        membership: ITownArchitectBase::Membership,
    ) -> eyre::Result<Address> {
        let contract = TownsArchitect::new(self.address, &self.wallet_provider);
        let town = contract
            .computeTown(town_id.into(), membership)
            .call()
            .await
            .map_err(for_method::<TownsArchitectErrors>("computeTown"))?;
        Ok(town)
    }

    /// Resolves a town network id to its address. Unknown ids resolve to the
    /// zero address.
    pub async fn get_town_by_id(&self, town_id: impl Into<String>) -> eyre::Result<Address> {
        let contract = TownsArchitect::new(self.address, &self.wallet_provider);
        let town = contract
            .getTownById(town_id.into())
            .call()
            .await
            .map_err(for_method::<TownsArchitectErrors>("getTownById"))?;
        Ok(town)
    }

    pub async fn get_token_id_by_town_id(&self, town_id: impl Into<String>) -> eyre::Result<U256> {
        let contract = TownsArchitect::new(self.address, &self.wallet_provider);
        let token_id = contract
            .getTokenIdByTownId(town_id.into())
            .call()
            .await
            .map_err(for_method::<TownsArchitectErrors>("getTokenIdByTownId"))?;
        Ok(token_id)
    }

    pub async fn get_implementations(&self) -> eyre::Result<ArchitectImplementations> {
        let contract = TownsArchitect::new(self.address, &self.wallet_provider);
        let implementations = contract
            .getTownArchitectImplementations()
            .call()
            .await
            .map_err(for_method::<TownsArchitectErrors>("getTownArchitectImplementations"))?;

        Ok(ArchitectImplementations {
            town_token: implementations.townToken,
            user_entitlement: implementations.userEntitlementImplementation,
            token_entitlement: implementations.tokenEntitlementImplementation,
        })
    }

    pub async fn set_implementations(
        &self,
        implementations: ArchitectImplementations,
    ) -> eyre::Result<TransactionReceipt> {
        let contract = TownsArchitect::new(self.address, &self.wallet_provider);
        let receipt = contract
            .setTownArchitectImplementations(
                implementations.town_token,
                implementations.user_entitlement,
                implementations.token_entitlement,
            )
            .send()
            .await
            .map_err(for_method::<TownsArchitectErrors>("setTownArchitectImplementations"))?
            .get_receipt()
            .await?;
        Ok(receipt)
    }

    /// Requires town creators to hold `quantity` of `token`.
    pub async fn gate_by_token(
        &self,
        token: Address,
        quantity: U256,
    ) -> eyre::Result<TransactionReceipt> {
        let contract = TownsArchitect::new(self.address, &self.wallet_provider);
        let receipt = contract
            .gateByToken(token, quantity)
            .send()
            .await
            .map_err(for_method::<TownsArchitectErrors>("gateByToken"))?
            .get_receipt()
            .await?;
        Ok(receipt)
    }

    pub async fn ungate_by_token(&self, token: Address) -> eyre::Result<TransactionReceipt> {
        let contract = TownsArchitect::new(self.address, &self.wallet_provider);
        let receipt = contract
            .ungateByToken(token)
            .send()
            .await
            .map_err(for_method::<TownsArchitectErrors>("ungateByToken"))?
            .get_receipt()
            .await?;
        Ok(receipt)
    }

    pub async fn is_token_gated(&self, token: Address) -> eyre::Result<bool> {
        let contract = TownsArchitect::new(self.address, &self.wallet_provider);
        let gated = contract
            .isTokenGated(token)
            .call()
            .await
            .map_err(for_method::<TownsArchitectErrors>("isTokenGated"))?;
        Ok(gated)
    }

    /// Whether town creation is paused on the factory.
    pub async fn is_paused(&self) -> eyre::Result<bool> {
        let contract = TownsPausable::new(self.address, &self.wallet_provider);
        let paused = contract
            .paused()
            .call()
            .await
            .map_err(call_failed("paused"))?;
        Ok(paused)
    }

    pub fn get_town_created_event(receipt: &TransactionReceipt) -> eyre::Result<Log<TownCreated>> {
        events::first_event_in_receipt::<TownCreated>(receipt)
    }

    /// Historical `TownCreated` events, optionally for one creator.
    pub async fn town_created_events(
        &self,
        creator: Option<Address>,
        range: EventFilter,
    ) -> eyre::Result<EventIterator<TownCreated>> {
        let mut filter = range.to_filter::<TownCreated>(self.address);
        if let Some(creator) = creator {
            filter = filter.topic1(creator.into_word());
        }
        events::filter_events(&self.wallet_provider, &filter).await
    }

    /// Waits for the next town created by `creator`, looking back to
    /// `from_block` first.
    pub async fn wait_for_town_created(
        &self,
        creator: Address,
        from_block: Option<u64>,
    ) -> eyre::Result<Log<TownCreated>> {
        let from_block = match from_block {
            Some(block) => block,
            None => self.wallet_provider.get_block_number().await?,
        };
        let filter = EventFilter::from_block(from_block)
            .to_filter::<TownCreated>(self.address)
            .topic1(creator.into_word());

        let mut iter = events::watch_events::<TownCreated, _>(&self.wallet_provider, &filter).await?;
        debug!(%creator, from_block, "waiting for TownCreated");

        match iter.next().await {
            Some(event) => event,
            None => Err(eyre::eyre!("No TownCreated event found")),
        }
    }
}
