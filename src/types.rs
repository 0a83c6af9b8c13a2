use std::{fmt, str::FromStr};

use alloy::{
    network::EthereumWallet,
    providers::{
        Identity, RootProvider,
        fillers::{
            BlobGasFiller, ChainIdFiller, FillProvider, GasFiller, JoinFill, NonceFiller,
            WalletFiller,
        },
    },
};
use serde::{Deserialize, Serialize};

pub type WalletProvider = FillProvider<
    JoinFill<
        JoinFill<
            Identity,
            JoinFill<GasFiller, JoinFill<BlobGasFiller, JoinFill<NonceFiller, ChainIdFiller>>>,
        >,
        WalletFiller<EthereumWallet>,
    >,
    RootProvider,
>;

pub type PublicProvider = FillProvider<
    JoinFill<
        Identity,
        JoinFill<GasFiller, JoinFill<BlobGasFiller, JoinFill<NonceFiller, ChainIdFiller>>>,
    >,
    RootProvider,
>;

/// Permission names understood by the entitlement modules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Permission {
    Read,
    Write,
    Invite,
    Redact,
    Ban,
    PinMessage,
    AddRemoveChannels,
    ModifyTownSettings,
    React,
    Owner,
}

impl Permission {
    pub const ALL: [Permission; 10] = [
        Permission::Read,
        Permission::Write,
        Permission::Invite,
        Permission::Redact,
        Permission::Ban,
        Permission::PinMessage,
        Permission::AddRemoveChannels,
        Permission::ModifyTownSettings,
        Permission::React,
        Permission::Owner,
    ];

    /// The string passed to `isEntitledToTown` / `isEntitledToChannel`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Permission::Read => "Read",
            Permission::Write => "Write",
            Permission::Invite => "Invite",
            Permission::Redact => "Redact",
            Permission::Ban => "Ban",
            Permission::PinMessage => "PinMessage",
            Permission::AddRemoveChannels => "AddRemoveChannels",
            Permission::ModifyTownSettings => "ModifyTownSettings",
            Permission::React => "React",
            Permission::Owner => "Owner",
        }
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Permission {
    type Err = eyre::Report;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Permission::ALL
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| eyre::eyre!("unknown permission: {s}"))
    }
}
