use std::sync::Arc;

use async_trait::async_trait;
use did_resolver::did_doc::schema::did_doc::DidDocument;
use ethers::{
    contract::{Contract, ContractCall},
    providers::Middleware,
    types::Address,
};

use super::{
    config::DidRegistrySettings,
    contracts::{self, send_transaction, SignerClient},
    fees::{FeeEstimate, LedgerOperation},
    DidRegistry,
};
use crate::{
    error::{DidPolygonError, DidPolygonResult},
    utils::polygon_address_from_did,
};

/// DID registry contract client bound to one signing key.
#[derive(Debug)]
pub struct PolygonDidRegistry {
    client: Arc<SignerClient>,
    contract: Contract<SignerClient>,
}

impl PolygonDidRegistry {
    pub(crate) async fn connect(
        settings: DidRegistrySettings<'_>,
        signing_key: k256::ecdsa::SigningKey,
    ) -> DidPolygonResult<Self> {
        let client = contracts::signer_client(settings.rpc_url, signing_key).await?;
        let address = contracts::contract_address(settings.did_contract_address)?;
        Ok(Self::new(client, address))
    }

    pub(crate) fn new(client: Arc<SignerClient>, contract_address: Address) -> Self {
        let contract = contracts::did_registry(contract_address, client.clone());
        Self { client, contract }
    }

    pub(crate) fn client(&self) -> Arc<SignerClient> {
        self.client.clone()
    }

    fn document_call(
        &self,
        function: &str,
        did: &str,
        did_document: &DidDocument,
    ) -> DidPolygonResult<ContractCall<SignerClient, ()>> {
        let address = polygon_address_from_did(did)?;
        let document = serde_json::to_string(did_document)?;
        self.contract
            .method::<_, ()>(function, (address, document))
            .map_err(DidPolygonError::ledger)
    }

    fn resource_call(
        &self,
        did: &str,
        resource_id: &str,
        resource: &str,
    ) -> DidPolygonResult<ContractCall<SignerClient, ()>> {
        let address = polygon_address_from_did(did)?;
        self.contract
            .method::<_, ()>(
                "addResource",
                (address, resource_id.to_string(), resource.to_string()),
            )
            .map_err(DidPolygonError::ledger)
    }

    /// Stores `resource` under `resource_id` next to the DID document.
    pub async fn add_resource(
        &self,
        did: &str,
        resource_id: &str,
        resource: &str,
    ) -> DidPolygonResult<String> {
        send_transaction(self.resource_call(did, resource_id, resource)?).await
    }

    pub async fn get_resource(&self, did: &str, resource_id: &str) -> DidPolygonResult<Option<String>> {
        let address = polygon_address_from_did(did)?;
        let resource: String = self
            .contract
            .method::<_, String>("getResource", (address, resource_id.to_string()))
            .map_err(DidPolygonError::ledger)?
            .call()
            .await
            .map_err(DidPolygonError::ledger)?;
        Ok(Some(resource).filter(|resource| !resource.is_empty()))
    }

    pub(crate) async fn estimate_gas(
        &self,
        operation: LedgerOperation,
        did: &str,
        did_document: &DidDocument,
    ) -> DidPolygonResult<ethers::types::U256> {
        let call = match operation {
            LedgerOperation::Create => self.document_call("createDID", did, did_document)?,
            LedgerOperation::Update | LedgerOperation::Deactivate => {
                self.document_call("updateDIDDoc", did, did_document)?
            }
            LedgerOperation::AddResource => {
                let resource = serde_json::to_string(did_document)?;
                return self
                    .estimate_resource_gas(did, &uuid::Uuid::new_v4().to_string(), &resource)
                    .await;
            }
            LedgerOperation::CreateSchema => {
                return Err(DidPolygonError::UnsupportedOperation(format!(
                    "{operation} is not a DID registry operation"
                )))
            }
        };
        call.estimate_gas().await.map_err(DidPolygonError::ledger)
    }

    pub(crate) async fn estimate_resource_gas(
        &self,
        did: &str,
        resource_id: &str,
        resource: &str,
    ) -> DidPolygonResult<ethers::types::U256> {
        self.resource_call(did, resource_id, resource)?
            .estimate_gas()
            .await
            .map_err(DidPolygonError::ledger)
    }

    /// Quotes `operation` without submitting it.
    pub async fn estimate_fee(
        &self,
        operation: LedgerOperation,
        did: &str,
        did_document: &DidDocument,
    ) -> DidPolygonResult<FeeEstimate> {
        let gas_limit = self.estimate_gas(operation, did, did_document).await?;
        let gas_price = self
            .client
            .get_gas_price()
            .await
            .map_err(DidPolygonError::ledger)?;
        Ok(FeeEstimate::new(gas_limit, gas_price))
    }
}

#[async_trait]
impl DidRegistry for PolygonDidRegistry {
    async fn create(&self, did: &str, did_document: &DidDocument) -> DidPolygonResult<String> {
        send_transaction(self.document_call("createDID", did, did_document)?).await
    }

    async fn update(&self, did: &str, did_document: &DidDocument) -> DidPolygonResult<String> {
        send_transaction(self.document_call("updateDIDDoc", did, did_document)?).await
    }
}
