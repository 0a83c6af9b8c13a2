use alloy::primitives::Address;

/// Contracts with a network-wide address. Town facets are resolved per town
/// and are not part of the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TownsContract {
    /// Town factory: creates towns and maps network ids to town addresses
    Architect,
    /// Root key to wallet links
    WalletLink,
    /// Vault to delegate registry
    Delegation,
    /// Stream to node placement registry
    StreamRegistry,
}

impl TownsContract {
    pub const ALL: [TownsContract; 4] = [
        TownsContract::Architect,
        TownsContract::WalletLink,
        TownsContract::Delegation,
        TownsContract::StreamRegistry,
    ];
}

/// Anything that knows where the network-wide contracts are deployed.
pub trait ContractRegistry {
    fn address(&self, contract: TownsContract) -> Address;

    /// All registered addresses, in [`TownsContract::ALL`] order.
    fn addresses(&self) -> Vec<(TownsContract, Address)> {
        TownsContract::ALL
            .into_iter()
            .map(|c| (c, self.address(c)))
            .collect()
    }
}
