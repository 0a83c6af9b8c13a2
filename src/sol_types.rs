use alloy::primitives::{Address, U256};

use crate::contracts::{dev::town_architect as dev, towns_architect as v3};

impl v3::ITokenEntitlement::ExternalToken {
    /// Requires holding at least `quantity` of any token of the contract.
    pub fn fungible(contract_address: Address, quantity: U256) -> Self {
        Self {
            contractAddress: contract_address,
            quantity,
            isSingleToken: false,
            tokenIds: vec![],
        }
    }

    /// Requires holding one of the listed token ids.
    pub fn single(contract_address: Address, token_ids: Vec<U256>) -> Self {
        Self {
            contractAddress: contract_address,
            quantity: U256::from(1),
            isSingleToken: true,
            tokenIds: token_ids,
        }
    }
}

impl v3::ITownArchitectBase::MembershipRequirements {
    pub fn everyone() -> Self {
        Self {
            everyone: true,
            tokens: vec![],
            users: vec![],
        }
    }

    pub fn users(users: Vec<Address>) -> Self {
        Self {
            everyone: false,
            tokens: vec![],
            users,
        }
    }

    pub fn token_gated(tokens: Vec<v3::ITokenEntitlement::ExternalToken>) -> Self {
        Self {
            everyone: false,
            tokens,
            users: vec![],
        }
    }
}

impl v3::ITownArchitectBase::TownInfo {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        membership: v3::ITownArchitectBase::Membership,
        channel: v3::ITownArchitectBase::ChannelInfo,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            uri: String::new(),
            membership,
            channel,
        }
    }
}

// The dev factory shares every struct layout with v3 except the membership
// settings, which gain `freeAllocation` and rename `limit` to `maxSupply`.

impl From<v3::IMembershipBase::MembershipInfo> for dev::IMembershipBase::MembershipInfo {
    fn from(info: v3::IMembershipBase::MembershipInfo) -> Self {
        Self {
            name: info.name,
            symbol: info.symbol,
            price: info.price,
            maxSupply: info.limit,
            duration: info.duration,
            currency: info.currency,
            feeRecipient: info.feeRecipient,
            freeAllocation: U256::ZERO,
        }
    }
}

impl From<v3::ITokenEntitlement::ExternalToken> for dev::ITokenEntitlement::ExternalToken {
    fn from(token: v3::ITokenEntitlement::ExternalToken) -> Self {
        Self {
            contractAddress: token.contractAddress,
            quantity: token.quantity,
            isSingleToken: token.isSingleToken,
            tokenIds: token.tokenIds,
        }
    }
}

impl From<v3::ITownArchitectBase::MembershipRequirements>
    for dev::ITownArchitectBase::MembershipRequirements
{
    fn from(req: v3::ITownArchitectBase::MembershipRequirements) -> Self {
        Self {
            everyone: req.everyone,
            tokens: req.tokens.into_iter().map(Into::into).collect(),
            users: req.users,
        }
    }
}

impl From<v3::ITownArchitectBase::Membership> for dev::ITownArchitectBase::Membership {
    fn from(membership: v3::ITownArchitectBase::Membership) -> Self {
        Self {
            settings: membership.settings.into(),
            requirements: membership.requirements.into(),
            permissions: membership.permissions,
        }
    }
}

impl From<v3::ITownArchitectBase::ChannelInfo> for dev::ITownArchitectBase::ChannelInfo {
    fn from(channel: v3::ITownArchitectBase::ChannelInfo) -> Self {
        Self {
            id: channel.id,
            metadata: channel.metadata,
        }
    }
}

impl From<v3::ITownArchitectBase::TownInfo> for dev::ITownArchitectBase::TownInfo {
    fn from(info: v3::ITownArchitectBase::TownInfo) -> Self {
        Self {
            id: info.id,
            name: info.name,
            uri: info.uri,
            membership: info.membership.into(),
            channel: info.channel.into(),
        }
    }
}
