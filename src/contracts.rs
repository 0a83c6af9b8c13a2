//! Bindings generated from the Towns contract ABIs.
//!
//! Every contract lives in its own module: the ABIs share library struct
//! names (`ITownArchitectBase`, `IMembershipBase`, ...) whose layouts differ
//! between contract versions.

pub mod towns_architect {
    use alloy::sol;

    sol!(
        #[allow(missing_docs)]
        #[sol(rpc)]
        #[derive(Debug)]
        TownsArchitect,
        "src/contracts/TownsArchitect.json"
    );
}

pub mod towns_channels {
    use alloy::sol;

    sol!(
        #[allow(missing_docs)]
        #[sol(rpc)]
        #[derive(Debug)]
        TownsChannels,
        "src/contracts/TownsChannels.json"
    );
}

pub mod towns_entitlements {
    use alloy::sol;

    sol!(
        #[allow(missing_docs)]
        #[sol(rpc)]
        #[derive(Debug)]
        TownsEntitlements,
        "src/contracts/TownsEntitlements.json"
    );
}

pub mod towns_pausable {
    use alloy::sol;

    sol!(
        #[allow(missing_docs)]
        #[sol(rpc)]
        #[derive(Debug)]
        TownsPausable,
        "src/contracts/TownsPausable.json"
    );
}

pub mod towns_wallet_link {
    use alloy::sol;

    sol!(
        #[allow(missing_docs)]
        #[sol(rpc)]
        #[derive(Debug)]
        TownsWalletLink,
        "src/contracts/TownsWalletLink.json"
    );
}

pub mod towns_delegation {
    use alloy::sol;

    sol!(
        #[allow(missing_docs)]
        #[sol(rpc)]
        #[derive(Debug)]
        TownsDelegation,
        "src/contracts/TownsDelegation.json"
    );
}

pub mod towns_stream_registry {
    use alloy::sol;

    sol!(
        #[allow(missing_docs)]
        #[sol(rpc)]
        #[derive(Debug)]
        TownsStreamRegistry,
        "src/contracts/TownsStreamRegistry.json"
    );
}

/// Pre-town space contracts, still deployed on goerli and sepolia. Both
/// networks share one ABI.
pub mod space {
    use alloy::sol;

    sol!(
        #[allow(missing_docs)]
        #[sol(rpc)]
        #[derive(Debug)]
        Space,
        "src/contracts/Space.json"
    );
}

/// Factory for [`space::Space`] contracts.
pub mod space_factory {
    use alloy::sol;

    sol!(
        #[allow(missing_docs)]
        #[sol(rpc)]
        #[derive(Debug)]
        SpaceFactory,
        "src/contracts/SpaceFactory.json"
    );
}

/// Development deployment of the town factory. Its membership settings carry
/// a `freeAllocation` field and it exposes `isTown` / `getTokenIdByTown`.
pub mod dev {
    pub mod town_architect {
        use alloy::sol;

        sol!(
            #[allow(missing_docs)]
            #[sol(rpc)]
            #[derive(Debug)]
            TownArchitect,
            "src/contracts/DevTownArchitect.json"
        );
    }
}

/// Contracts deployed by local test environments.
pub mod deploy {
    pub mod mock_erc20 {
        use alloy::sol;

        sol!(
            #[allow(missing_docs)]
            #[sol(rpc)]
            #[derive(Debug)]
            MockErc20,
            "src/contracts/MockErc20.json"
        );
    }
}

pub use deploy::mock_erc20::MockErc20;
pub use space::Space;
pub use space_factory::SpaceFactory;
pub use towns_architect::TownsArchitect;
pub use towns_channels::TownsChannels;
pub use towns_delegation::TownsDelegation;
pub use towns_entitlements::TownsEntitlements;
pub use towns_pausable::TownsPausable;
pub use towns_stream_registry::TownsStreamRegistry;
pub use towns_wallet_link::TownsWalletLink;
