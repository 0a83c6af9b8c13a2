use alloy::{
    primitives::{Address, U256},
    rpc::types::TransactionReceipt,
    signers::local::PrivateKeySigner,
};
use tracing::debug;

use crate::{
    contracts::{MockErc20, deploy::mock_erc20::MockErc20::MockErc20Errors},
    errors::for_method,
    events::{EventFilter, EventIterator, filter_events},
    types::WalletProvider,
    utils,
};

/// Name, symbol and decimals of an ERC20 token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenMetadata {
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
}

/// Client for ERC20 tokens used by membership fees and token gates.
///
/// Calls go through the `MockErc20` binding, whose ERC20 surface is the
/// standard one, so any compliant token works. `mint` only succeeds on the
/// mock.
#[derive(Clone)]
pub struct Erc20Client {
    signer: PrivateKeySigner,
    wallet_provider: WalletProvider,
}

impl Erc20Client {
    pub async fn new(
        signer: PrivateKeySigner,
        rpc_url: impl ToString + Clone,
    ) -> eyre::Result<Self> {
        let wallet_provider = utils::get_wallet_provider(signer.clone(), rpc_url).await?;

        Ok(Erc20Client {
            signer,
            wallet_provider,
        })
    }

    pub(crate) fn with_provider(signer: PrivateKeySigner, wallet_provider: WalletProvider) -> Self {
        Erc20Client {
            signer,
            wallet_provider,
        }
    }

    pub fn address(&self) -> Address {
        self.signer.address()
    }

    pub async fn metadata(&self, token: Address) -> eyre::Result<TokenMetadata> {
        let contract = MockErc20::new(token, &self.wallet_provider);

        let (name, symbol, decimals) = tokio::try_join!(
            async { Ok::<_, eyre::Error>(contract.name().call().await?) },
            async { Ok(contract.symbol().call().await?) },
            async { Ok(contract.decimals().call().await?) },
        )?;

        Ok(TokenMetadata {
            name,
            symbol,
            decimals,
        })
    }

    pub async fn balance_of(&self, token: Address, account: Address) -> eyre::Result<U256> {
        let contract = MockErc20::new(token, &self.wallet_provider);
        let balance = contract
            .balanceOf(account)
            .call()
            .await
            .map_err(for_method::<MockErc20Errors>("balanceOf"))?;
        Ok(balance)
    }

    pub async fn allowance(&self, token: Address, spender: Address) -> eyre::Result<U256> {
        let contract = MockErc20::new(token, &self.wallet_provider);
        let allowance = contract
            .allowance(self.signer.address(), spender)
            .call()
            .await
            .map_err(for_method::<MockErc20Errors>("allowance"))?;
        Ok(allowance)
    }

    pub async fn approve(
        &self,
        token: Address,
        spender: Address,
        amount: U256,
    ) -> eyre::Result<TransactionReceipt> {
        let contract = MockErc20::new(token, &self.wallet_provider);
        let receipt = contract
            .approve(spender, amount)
            .send()
            .await
            .map_err(for_method::<MockErc20Errors>("approve"))?
            .get_receipt()
            .await?;
        Ok(receipt)
    }

    /// Approves `amount` only when the current allowance does not already
    /// cover it.
    pub async fn approve_if_less(
        &self,
        token: Address,
        spender: Address,
        amount: U256,
    ) -> eyre::Result<Option<TransactionReceipt>> {
        let current_allowance = self.allowance(token, spender).await?;

        if current_allowance >= amount {
            debug!(%token, %spender, %current_allowance, "allowance already sufficient");
            return Ok(None);
        }

        let receipt = self.approve(token, spender, amount).await?;
        Ok(Some(receipt))
    }

    pub async fn transfer(
        &self,
        token: Address,
        to: Address,
        amount: U256,
    ) -> eyre::Result<TransactionReceipt> {
        let contract = MockErc20::new(token, &self.wallet_provider);
        let receipt = contract
            .transfer(to, amount)
            .send()
            .await
            .map_err(for_method::<MockErc20Errors>("transfer"))?
            .get_receipt()
            .await?;
        Ok(receipt)
    }

    pub async fn transfer_from(
        &self,
        token: Address,
        from: Address,
        to: Address,
        amount: U256,
    ) -> eyre::Result<TransactionReceipt> {
        let contract = MockErc20::new(token, &self.wallet_provider);
        let receipt = contract
            .transferFrom(from, to, amount)
            .send()
            .await
            .map_err(for_method::<MockErc20Errors>("transferFrom"))?
            .get_receipt()
            .await?;
        Ok(receipt)
    }

    /// Mints tokens on a `MockErc20`.
    pub async fn mint(
        &self,
        token: Address,
        account: Address,
        amount: U256,
    ) -> eyre::Result<TransactionReceipt> {
        let contract = MockErc20::new(token, &self.wallet_provider);
        let receipt = contract
            .mint(account, amount)
            .send()
            .await
            .map_err(for_method::<MockErc20Errors>("mint"))?
            .get_receipt()
            .await?;
        Ok(receipt)
    }

    /// Historical `Transfer` events, optionally restricted to a sender and/or
    /// recipient.
    pub async fn transfer_events(
        &self,
        token: Address,
        from: Option<Address>,
        to: Option<Address>,
        range: EventFilter,
    ) -> eyre::Result<EventIterator<MockErc20::Transfer>> {
        let mut filter = range.to_filter::<MockErc20::Transfer>(token);
        if let Some(from) = from {
            filter = filter.topic1(from.into_word());
        }
        if let Some(to) = to {
            filter = filter.topic2(to.into_word());
        }
        filter_events(&self.wallet_provider, &filter).await
    }
}
