use alloy::{
    network::{EthereumWallet, TxSigner},
    node_bindings::{Anvil, AnvilInstance},
    primitives::{Address, Signature, U256},
    providers::{ProviderBuilder, WsConnect},
    signers::local::PrivateKeySigner,
};
use tracing::debug;

use crate::{
    clients::erc20::Erc20Client,
    contracts::MockErc20,
    types::{PublicProvider, WalletProvider},
};

pub async fn get_wallet_provider<T: TxSigner<Signature> + Sync + Send + 'static>(
    private_key: T,
    rpc_url: impl ToString,
) -> eyre::Result<WalletProvider> {
    let wallet = EthereumWallet::from(private_key);
    let ws = WsConnect::new(rpc_url.to_string());

    let provider = ProviderBuilder::new().wallet(wallet).connect_ws(ws).await?;

    Ok(provider)
}

pub async fn get_public_provider(rpc_url: impl ToString) -> eyre::Result<PublicProvider> {
    let ws = WsConnect::new(rpc_url.to_string());

    let provider = ProviderBuilder::new().connect_ws(ws).await?;

    Ok(provider)
}

/// Spawns anvil and deploys two mock ERC20 tokens, funding alice and bob
/// from the deployer.
pub async fn setup_test_environment() -> eyre::Result<TestContext> {
    let anvil = Anvil::new().try_spawn()?;

    let god: PrivateKeySigner = anvil.keys()[0].clone().into();
    let alice: PrivateKeySigner = anvil.keys()[1].clone().into();
    let bob: PrivateKeySigner = anvil.keys()[2].clone().into();

    let god_provider = get_wallet_provider(god.clone(), anvil.ws_endpoint()).await?;

    let token_a = MockErc20::deploy(&god_provider, "Mock Erc20".into(), "TK1".into()).await?;
    let token_b = MockErc20::deploy(&god_provider, "Mock Erc20".into(), "TK2".into()).await?;
    debug!(token_a = %token_a.address(), token_b = %token_b.address(), "deployed mock tokens");

    let starting_balance = U256::from(1_000_000u64);
    for token in [&token_a, &token_b] {
        for holder in [alice.address(), bob.address()] {
            token
                .mint(holder, starting_balance)
                .send()
                .await?
                .get_receipt()
                .await?;
        }
    }

    let mock_addresses = MockAddresses {
        erc20_a: *token_a.address(),
        erc20_b: *token_b.address(),
    };

    let alice_erc20 = Erc20Client::new(alice.clone(), anvil.ws_endpoint()).await?;
    let bob_erc20 = Erc20Client::new(bob.clone(), anvil.ws_endpoint()).await?;

    Ok(TestContext {
        alice,
        bob,
        god,
        god_provider,
        alice_erc20,
        bob_erc20,
        starting_balance,
        mock_addresses,
        anvil,
    })
}

pub struct TestContext {
    pub anvil: AnvilInstance,
    pub alice: PrivateKeySigner,
    pub bob: PrivateKeySigner,
    pub god: PrivateKeySigner,
    pub god_provider: WalletProvider,
    pub alice_erc20: Erc20Client,
    pub bob_erc20: Erc20Client,
    pub starting_balance: U256,
    pub mock_addresses: MockAddresses,
}

pub struct MockAddresses {
    pub erc20_a: Address,
    pub erc20_b: Address,
}
