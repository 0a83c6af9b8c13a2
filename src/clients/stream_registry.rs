use alloy::{
    primitives::Address, rpc::types::TransactionReceipt, signers::local::PrivateKeySigner,
};

use crate::{contracts::TownsStreamRegistry, errors::call_failed, types::WalletProvider, utils};

/// Client for the registry mapping streams to the nodes that host them.
/// Stream ids are passed as their hashes.
#[derive(Clone)]
pub struct StreamRegistryClient {
    wallet_provider: WalletProvider,

    pub address: Address,
}

impl StreamRegistryClient {
    pub async fn new(
        signer: PrivateKeySigner,
        rpc_url: impl ToString + Clone,
        address: Address,
    ) -> eyre::Result<Self> {
        let wallet_provider = utils::get_wallet_provider(signer, rpc_url).await?;

        Ok(StreamRegistryClient {
            wallet_provider,
            address,
        })
    }

    pub(crate) fn with_provider(wallet_provider: WalletProvider, address: Address) -> Self {
        StreamRegistryClient {
            wallet_provider,
            address,
        }
    }

    pub async fn add_node_to_stream(
        &self,
        stream_id_hash: impl Into<String>,
        node_id: impl Into<String>,
    ) -> eyre::Result<TransactionReceipt> {
        let contract = TownsStreamRegistry::new(self.address, &self.wallet_provider);
        let receipt = contract
            .addNodeToStream(stream_id_hash.into(), node_id.into())
            .send()
            .await
            .map_err(call_failed("addNodeToStream"))?
            .get_receipt()
            .await?;
        Ok(receipt)
    }

    pub async fn add_nodes_to_stream(
        &self,
        stream_id_hash: impl Into<String>,
        node_ids: Vec<String>,
    ) -> eyre::Result<TransactionReceipt> {
        let contract = TownsStreamRegistry::new(self.address, &self.wallet_provider);
        let receipt = contract
            .addNodesToStream(stream_id_hash.into(), node_ids)
            .send()
            .await
            .map_err(call_failed("addNodesToStream"))?
            .get_receipt()
            .await?;
        Ok(receipt)
    }

    pub async fn remove_node_from_stream(
        &self,
        stream_id_hash: impl Into<String>,
        node_id: impl Into<String>,
    ) -> eyre::Result<TransactionReceipt> {
        let contract = TownsStreamRegistry::new(self.address, &self.wallet_provider);
        let receipt = contract
            .removeNodeFromStream(stream_id_hash.into(), node_id.into())
            .send()
            .await
            .map_err(call_failed("removeNodeFromStream"))?
            .get_receipt()
            .await?;
        Ok(receipt)
    }

    pub async fn get_stream_nodes(
        &self,
        stream_id_hash: impl Into<String>,
    ) -> eyre::Result<Vec<String>> {
        let contract = TownsStreamRegistry::new(self.address, &self.wallet_provider);
        let nodes = contract
            .getStreamNodes(stream_id_hash.into())
            .call()
            .await
            .map_err(call_failed("getStreamNodes"))?;
        Ok(nodes)
    }

    /// Whether `node_id` is registered for the stream.
    pub async fn value_exists(
        &self,
        stream_id_hash: impl Into<String>,
        node_id: impl Into<String>,
    ) -> eyre::Result<bool> {
        let contract = TownsStreamRegistry::new(self.address, &self.wallet_provider);
        let exists = contract
            .valueExists(stream_id_hash.into(), node_id.into())
            .call()
            .await
            .map_err(call_failed("valueExists"))?;
        Ok(exists)
    }
}
