use std::sync::{Arc, PoisonError, RwLock};

use agent_wallet::wallet::{base_wallet::BaseWallet, did_record::DidRepository};
use async_trait::async_trait;
use ethers::{
    providers::Middleware,
    types::{Address, U256},
};
use k256::ecdsa::SigningKey;
use log::{error, info};
use public_key::{Key, KeyType};
use serde_json::{json, Value};

use super::{
    config::PolygonLedgerConfig,
    contracts,
    did_registry::PolygonDidRegistry,
    fees::{DidOperationOptions, FeeEstimate, SchemaOperationOptions},
    schema_registry::{CreateSchemaOptions, PolygonSchemaRegistry, SchemaCreated},
    DidDocumentReader, DidRegistry, PolygonLedger,
};
use crate::{
    error::{DidPolygonError, DidPolygonResult},
    keys::{public_key_from_did, signing_key},
    utils::{build_did, polygon_address_from_did, secp256k1_did_doc, MAINNET},
    POLYGON_METHOD,
};

/// Entry point to the DID registry and schema manager contracts.
#[derive(Debug, Default)]
pub struct PolygonLedgerService {
    config: RwLock<PolygonLedgerConfig>,
}

impl PolygonLedgerService {
    pub fn new(config: PolygonLedgerConfig) -> Self {
        Self {
            config: RwLock::new(config),
        }
    }

    pub fn config(&self) -> PolygonLedgerConfig {
        self.config
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn update_config(&self, config: PolygonLedgerConfig) {
        *self.config.write().unwrap_or_else(PoisonError::into_inner) = config;
    }

    pub async fn create_did_registry_instance(
        &self,
        signing_key: SigningKey,
    ) -> DidPolygonResult<PolygonDidRegistry> {
        let config = self.config();
        PolygonDidRegistry::connect(config.did_registry_settings()?, signing_key).await
    }

    pub async fn create_schema_registry_instance(
        &self,
        signing_key: SigningKey,
    ) -> DidPolygonResult<PolygonSchemaRegistry> {
        let config = self.config();
        PolygonSchemaRegistry::connect(config.schema_registry_settings()?, signing_key).await
    }

    async fn schema_registry_for_did(
        &self,
        wallet: &Arc<dyn BaseWallet>,
        did: &str,
    ) -> DidPolygonResult<PolygonSchemaRegistry> {
        let config = self.config();
        let settings = config.schema_registry_settings().map_err(|err| {
            error!("Schema registry config not found");
            err
        })?;
        let did_repository = DidRepository::new(wallet.clone());
        let key = public_key_from_did(&did_repository, did).await?;
        let signing_key = signing_key(wallet.as_ref(), &key).await?;
        PolygonSchemaRegistry::connect(settings, signing_key).await
    }

    pub async fn create_schema(
        &self,
        wallet: &Arc<dyn BaseWallet>,
        options: CreateSchemaOptions,
    ) -> DidPolygonResult<SchemaCreated> {
        info!("Creating schema on ledger: {}", options.did);
        let schema_registry = self.schema_registry_for_did(wallet, &options.did).await?;
        let created = schema_registry.create_schema(&options).await.map_err(|err| {
            error!(
                "Schema creation failed for did: {} and schema: {}, error: {err}",
                options.did, options.schema_name
            );
            err
        })?;
        info!("Published schema on ledger: {}", options.did);
        Ok(created)
    }

    pub async fn get_schema_by_did_and_schema_id(
        &self,
        wallet: &Arc<dyn BaseWallet>,
        did: &str,
        schema_id: &str,
    ) -> DidPolygonResult<Value> {
        info!("Getting schema from ledger: {did} and schemaId: {schema_id}");
        let schema_registry = self.schema_registry_for_did(wallet, did).await?;
        let schema = schema_registry
            .get_schema_by_id(did, schema_id)
            .await?
            .ok_or_else(|| {
                error!("Schema not found for did: {did} and schemaId: {schema_id}");
                DidPolygonError::SchemaNotFound {
                    did: did.to_string(),
                    schema_id: schema_id.to_string(),
                }
            })?;
        info!("Got schema from ledger: {did} and schemaId: {schema_id}");
        Ok(schema)
    }

    pub async fn estimate_fee_for_did_operation(
        &self,
        options: DidOperationOptions,
    ) -> DidPolygonResult<FeeEstimate> {
        let (signing_key, key, did) = ephemeral_identity()?;
        let did_registry = self.create_did_registry_instance(signing_key).await?;
        let did_document = secp256k1_did_doc(&did, &key, None);
        did_registry
            .estimate_fee(options.operation, &did, &did_document)
            .await
    }

    pub async fn estimate_fee_for_schema_operation(
        &self,
        options: SchemaOperationOptions,
    ) -> DidPolygonResult<FeeEstimate> {
        let (signing_key, _, did) = ephemeral_identity()?;
        let schema_registry = self.create_schema_registry_instance(signing_key).await?;
        let sample_schema = json!({ "name": "string", "age": "number" });
        schema_registry
            .estimate_fee(options.operation, &did, &sample_schema)
            .await
    }

    pub async fn get_balance(&self, address: Address) -> DidPolygonResult<U256> {
        let config = self.config();
        let settings = config.did_registry_settings()?;
        contracts::provider(settings.rpc_url)?
            .get_balance(address, None)
            .await
            .map_err(DidPolygonError::ledger)
    }
}

/// Throwaway keypair and DID no wallet holds, used for dry-run quotes.
fn ephemeral_identity() -> DidPolygonResult<(SigningKey, Key, String)> {
    let signing_key = SigningKey::random(&mut rand::rngs::OsRng);
    let public_key = signing_key.verifying_key().to_encoded_point(true);
    let key = Key::new(public_key.as_bytes().to_vec(), KeyType::K256)?;
    let did = build_did(POLYGON_METHOD, MAINNET, &key.hex())?;
    Ok((signing_key, key, did))
}

#[async_trait]
impl DidDocumentReader for PolygonLedgerService {
    async fn get_did_document(&self, did: &str) -> DidPolygonResult<Option<String>> {
        let config = self.config();
        let settings = config.did_registry_settings()?;
        let address = polygon_address_from_did(did)?;
        let provider = Arc::new(contracts::provider(settings.rpc_url)?);
        let contract = contracts::did_registry(
            contracts::contract_address(settings.did_contract_address)?,
            provider,
        );
        let (document, _resources): (String, Vec<String>) = contract
            .method::<_, (String, Vec<String>)>("getDIDDoc", address)
            .map_err(DidPolygonError::ledger)?
            .call()
            .await
            .map_err(DidPolygonError::ledger)?;
        Ok(Some(document).filter(|document| !document.is_empty()))
    }
}

#[async_trait]
impl PolygonLedger for PolygonLedgerService {
    async fn get_balance(&self, address: Address) -> DidPolygonResult<U256> {
        PolygonLedgerService::get_balance(self, address).await
    }

    async fn create_did_registry_instance(
        &self,
        signing_key: SigningKey,
    ) -> DidPolygonResult<Box<dyn DidRegistry>> {
        let did_registry =
            PolygonLedgerService::create_did_registry_instance(self, signing_key).await?;
        Ok(Box::new(did_registry))
    }
}
