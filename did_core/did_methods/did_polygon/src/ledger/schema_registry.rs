use chrono::Utc;
use ethers::{
    contract::{Contract, ContractCall},
    providers::Middleware,
};
use k256::ecdsa::SigningKey;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use uuid::Uuid;

use super::{
    config::SchemaRegistrySettings,
    contracts::{self, send_transaction, SignerClient},
    did_registry::PolygonDidRegistry,
    fees::{FeeEstimate, LedgerOperation},
};
use crate::{
    error::{DidPolygonError, DidPolygonResult},
    utils::polygon_address_from_did,
};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CreateSchemaOptions {
    pub did: String,
    pub schema_name: String,
    pub schema: Value,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SchemaCreated {
    pub schema_id: String,
    pub schema_txn_hash: String,
    pub resource_txn_hash: String,
    pub schema: Value,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct FileServerUpload<'a> {
    schema_id: &'a str,
    schema: &'a Value,
}

/// Schema manager contract client plus the file server mirror, bound to one signing key.
#[derive(Debug)]
pub struct PolygonSchemaRegistry {
    did_registry: PolygonDidRegistry,
    contract: Contract<SignerClient>,
    server_url: String,
    file_server_token: String,
    http: reqwest::Client,
}

impl PolygonSchemaRegistry {
    pub(crate) async fn connect(
        settings: SchemaRegistrySettings<'_>,
        signing_key: SigningKey,
    ) -> DidPolygonResult<Self> {
        let did_registry = PolygonDidRegistry::connect(settings.did_registry, signing_key).await?;
        let address = contracts::contract_address(settings.schema_manager_contract_address)?;
        let contract = contracts::schema_manager(address, did_registry.client());
        Ok(Self {
            did_registry,
            contract,
            server_url: settings.server_url.trim_end_matches('/').to_string(),
            file_server_token: settings.file_server_token.to_string(),
            http: reqwest::Client::new(),
        })
    }

    fn schema_call(
        &self,
        did: &str,
        schema_id: &str,
        resource: &str,
    ) -> DidPolygonResult<ContractCall<SignerClient, ()>> {
        let address = polygon_address_from_did(did)?;
        self.contract
            .method::<_, ()>(
                "createSchema",
                (address, schema_id.to_string(), resource.to_string()),
            )
            .map_err(DidPolygonError::ledger)
    }

    /// Writes the schema to the schema manager, links it as a DID resource and mirrors it to
    /// the file server.
    pub async fn create_schema(&self, options: &CreateSchemaOptions) -> DidPolygonResult<SchemaCreated> {
        let schema_id = Uuid::new_v4().to_string();
        let resource = schema_resource(&options.did, &schema_id, &options.schema_name, &options.schema);
        let resource_json = serde_json::to_string(&resource)?;

        let schema_txn_hash =
            send_transaction(self.schema_call(&options.did, &schema_id, &resource_json)?).await?;
        debug!("Schema {schema_id} written in transaction {schema_txn_hash}");
        let resource_txn_hash = self
            .did_registry
            .add_resource(&options.did, &schema_id, &resource_json)
            .await?;
        debug!("Schema {schema_id} linked to {} in transaction {resource_txn_hash}", options.did);

        self.upload(&schema_id, &resource).await?;
        info!("Schema {schema_id} uploaded to file server");

        Ok(SchemaCreated {
            schema_id,
            schema_txn_hash,
            resource_txn_hash,
            schema: resource,
        })
    }

    async fn upload(&self, schema_id: &str, schema: &Value) -> DidPolygonResult<()> {
        self.http
            .post(format!("{}/schemas", self.server_url))
            .bearer_auth(&self.file_server_token)
            .json(&FileServerUpload { schema_id, schema })
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }

    pub async fn get_schema_by_id(&self, did: &str, schema_id: &str) -> DidPolygonResult<Option<Value>> {
        let address = polygon_address_from_did(did)?;
        let schema: String = self
            .contract
            .method::<_, String>("getSchemaById", (address, schema_id.to_string()))
            .map_err(DidPolygonError::ledger)?
            .call()
            .await
            .map_err(DidPolygonError::ledger)?;
        if schema.is_empty() {
            return Ok(None);
        }
        Ok(Some(serde_json::from_str(&schema)?))
    }

    /// Quotes a schema write. `createSchema` covers both the schema manager write and the
    /// resource link on the DID registry.
    pub async fn estimate_fee(
        &self,
        operation: LedgerOperation,
        did: &str,
        schema: &Value,
    ) -> DidPolygonResult<FeeEstimate> {
        let schema_id = Uuid::new_v4().to_string();
        let resource = serde_json::to_string(&schema_resource(did, &schema_id, "fee estimate", schema))?;
        let gas_limit = match operation {
            LedgerOperation::CreateSchema => {
                let schema_gas = self
                    .schema_call(did, &schema_id, &resource)?
                    .estimate_gas()
                    .await
                    .map_err(DidPolygonError::ledger)?;
                let resource_gas = self
                    .did_registry
                    .estimate_resource_gas(did, &schema_id, &resource)
                    .await?;
                schema_gas.saturating_add(resource_gas)
            }
            LedgerOperation::AddResource => {
                self.did_registry
                    .estimate_resource_gas(did, &schema_id, &resource)
                    .await?
            }
            other => {
                return Err(DidPolygonError::UnsupportedOperation(format!(
                    "{other} is not a schema operation"
                )))
            }
        };
        let gas_price = self
            .did_registry
            .client()
            .get_gas_price()
            .await
            .map_err(DidPolygonError::ledger)?;
        Ok(FeeEstimate::new(gas_limit, gas_price))
    }
}

fn schema_resource(did: &str, schema_id: &str, schema_name: &str, schema: &Value) -> Value {
    json!({
        "type": "https://w3c-ccg.github.io/vc-json-schemas/",
        "id": schema_id,
        "name": schema_name,
        "author": did,
        "authored": Utc::now().to_rfc3339(),
        "schema": schema,
    })
}
