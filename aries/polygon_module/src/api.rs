use std::sync::Arc;

use agent_wallet::wallet::base_wallet::BaseWallet;
use did_polygon::ledger::{
    fees::{DidOperationOptions, FeeEstimate, SchemaOperationOptions},
    schema_registry::{CreateSchemaOptions, SchemaCreated},
    service::PolygonLedgerService,
};
use serde_json::Value;

use crate::error::PolygonModuleResult;

/// Schema and fee operations of the polygon module, bound to the wallet it was registered with.
#[derive(Debug, Clone)]
pub struct PolygonApi {
    ledger_service: Arc<PolygonLedgerService>,
    wallet: Arc<dyn BaseWallet>,
}

impl PolygonApi {
    pub fn new(ledger_service: Arc<PolygonLedgerService>, wallet: Arc<dyn BaseWallet>) -> Self {
        Self {
            ledger_service,
            wallet,
        }
    }

    pub async fn create_schema(
        &self,
        options: CreateSchemaOptions,
    ) -> PolygonModuleResult<SchemaCreated> {
        Ok(self
            .ledger_service
            .create_schema(&self.wallet, options)
            .await?)
    }

    pub async fn get_schema_by_id(&self, did: &str, schema_id: &str) -> PolygonModuleResult<Value> {
        Ok(self
            .ledger_service
            .get_schema_by_did_and_schema_id(&self.wallet, did, schema_id)
            .await?)
    }

    pub async fn estimate_fee_for_did_operation(
        &self,
        options: DidOperationOptions,
    ) -> PolygonModuleResult<FeeEstimate> {
        Ok(self
            .ledger_service
            .estimate_fee_for_did_operation(options)
            .await?)
    }

    pub async fn estimate_fee_for_schema_operation(
        &self,
        options: SchemaOperationOptions,
    ) -> PolygonModuleResult<FeeEstimate> {
        Ok(self
            .ledger_service
            .estimate_fee_for_schema_operation(options)
            .await?)
    }
}
