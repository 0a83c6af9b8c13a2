use alloy::{
    primitives::Address,
    rpc::types::TransactionReceipt,
    signers::local::PrivateKeySigner,
};

use crate::{
    contracts::{
        TownsDelegation,
        towns_delegation::{
            IDelegationBase::DelegationInfo, TownsDelegation::TownsDelegationErrors,
        },
    },
    errors::for_method,
    types::WalletProvider,
    utils,
};

/// Client for the vault to delegate registry.
#[derive(Clone)]
pub struct DelegationClient {
    wallet_provider: WalletProvider,

    pub address: Address,
}

impl DelegationClient {
    pub async fn new(
        signer: PrivateKeySigner,
        rpc_url: impl ToString + Clone,
        address: Address,
    ) -> eyre::Result<Self> {
        let wallet_provider = utils::get_wallet_provider(signer, rpc_url).await?;

        Ok(DelegationClient {
            wallet_provider,
            address,
        })
    }

    pub(crate) fn with_provider(wallet_provider: WalletProvider, address: Address) -> Self {
        DelegationClient {
            wallet_provider,
            address,
        }
    }

    /// Delegates all of the signer's (the vault's) rights to `delegate`, or
    /// withdraws the delegation when `value` is false.
    pub async fn delegate_for_all(
        &self,
        delegate: Address,
        value: bool,
    ) -> eyre::Result<TransactionReceipt> {
        let contract = TownsDelegation::new(self.address, &self.wallet_provider);
        let receipt = contract
            .delegateForAll(delegate, value)
            .send()
            .await
            .map_err(for_method::<TownsDelegationErrors>("delegateForAll"))?
            .get_receipt()
            .await?;
        Ok(receipt)
    }

    pub async fn revoke_delegate(&self, delegate: Address) -> eyre::Result<TransactionReceipt> {
        let contract = TownsDelegation::new(self.address, &self.wallet_provider);
        let receipt = contract
            .revokeDelegate(delegate)
            .send()
            .await
            .map_err(for_method::<TownsDelegationErrors>("revokeDelegate"))?
            .get_receipt()
            .await?;
        Ok(receipt)
    }

    pub async fn revoke_all_delegates(&self) -> eyre::Result<TransactionReceipt> {
        let contract = TownsDelegation::new(self.address, &self.wallet_provider);
        let receipt = contract
            .revokeAllDelegates()
            .send()
            .await
            .map_err(for_method::<TownsDelegationErrors>("revokeAllDelegates"))?
            .get_receipt()
            .await?;
        Ok(receipt)
    }

    pub async fn check_delegate_for_all(
        &self,
        delegate: Address,
        vault: Address,
    ) -> eyre::Result<bool> {
        let contract = TownsDelegation::new(self.address, &self.wallet_provider);
        let delegated = contract
            .checkDelegateForAll(delegate, vault)
            .call()
            .await
            .map_err(for_method::<TownsDelegationErrors>("checkDelegateForAll"))?;
        Ok(delegated)
    }

    pub async fn get_delegates_for_all(&self, vault: Address) -> eyre::Result<Vec<Address>> {
        let contract = TownsDelegation::new(self.address, &self.wallet_provider);
        let delegates = contract
            .getDelegatesForAll(vault)
            .call()
            .await
            .map_err(for_method::<TownsDelegationErrors>("getDelegatesForAll"))?;
        Ok(delegates)
    }

    pub async fn get_delegations_by_delegate(
        &self,
        delegate: Address,
    ) -> eyre::Result<Vec<DelegationInfo>> {
        let contract = TownsDelegation::new(self.address, &self.wallet_provider);
        let delegations = contract
            .getDelegationsByDelegate(delegate)
            .call()
            .await
            .map_err(for_method::<TownsDelegationErrors>("getDelegationsByDelegate"))?;
        Ok(delegations)
    }
}
