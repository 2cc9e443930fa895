use did_polygon::ledger::config::PolygonLedgerConfig;
use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;

use crate::error::PolygonModuleResult;

/// Host-facing configuration of the polygon module. Schema operations need the three optional
/// schema registry fields; DID operations only need the RPC endpoint and registry contract.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, TypedBuilder)]
#[serde(rename_all = "camelCase")]
pub struct PolygonModuleConfig {
    #[builder(setter(into))]
    rpc_url: String,
    #[builder(setter(into))]
    did_contract_address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[builder(default, setter(strip_option, into))]
    schema_manager_contract_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[builder(default, setter(strip_option, into))]
    server_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[builder(default, setter(strip_option, into))]
    file_server_token: Option<String>,
}

impl PolygonModuleConfig {
    pub fn from_json_str(json: &str) -> PolygonModuleResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn rpc_url(&self) -> &str {
        &self.rpc_url
    }

    pub fn did_contract_address(&self) -> &str {
        &self.did_contract_address
    }

    pub fn schema_manager_contract_address(&self) -> Option<&str> {
        self.schema_manager_contract_address.as_deref()
    }

    pub fn server_url(&self) -> Option<&str> {
        self.server_url.as_deref()
    }

    pub fn file_server_token(&self) -> Option<&str> {
        self.file_server_token.as_deref()
    }

    pub fn ledger_config(&self) -> PolygonLedgerConfig {
        PolygonLedgerConfig::builder()
            .rpc_url(self.rpc_url.clone())
            .did_contract_address(self.did_contract_address.clone())
            .build()
            .with_schema_registry(
                self.schema_manager_contract_address.clone(),
                self.server_url.clone(),
                self.file_server_token.clone(),
            )
    }
}

impl From<&PolygonModuleConfig> for PolygonLedgerConfig {
    fn from(config: &PolygonModuleConfig) -> Self {
        config.ledger_config()
    }
}
