pub mod architect;
pub mod delegation;
pub mod erc20;
pub mod stream_registry;
pub mod town;
pub mod wallet_link;
