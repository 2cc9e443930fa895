use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;

use crate::error::{DidPolygonError, DidPolygonResult};

/// Network settings the ledger facade reads on every operation. Replaced as a whole through
/// [`super::service::PolygonLedgerService::update_config`].
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, TypedBuilder)]
#[serde(rename_all = "camelCase")]
#[builder(field_defaults(default, setter(strip_option, into)))]
pub struct PolygonLedgerConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    rpc_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    did_contract_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    schema_manager_contract_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    server_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    file_server_token: Option<String>,
}

impl PolygonLedgerConfig {
    pub fn rpc_url(&self) -> Option<&str> {
        self.rpc_url.as_deref()
    }

    pub fn did_contract_address(&self) -> Option<&str> {
        self.did_contract_address.as_deref()
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

    /// Replaces the schema manager settings, leaving the DID registry settings untouched.
    pub fn with_schema_registry(
        self,
        schema_manager_contract_address: Option<String>,
        server_url: Option<String>,
        file_server_token: Option<String>,
    ) -> Self {
        Self {
            schema_manager_contract_address,
            server_url,
            file_server_token,
            ..self
        }
    }

    pub(crate) fn did_registry_settings(&self) -> DidPolygonResult<DidRegistrySettings<'_>> {
        match (non_empty(&self.rpc_url), non_empty(&self.did_contract_address)) {
            (Some(rpc_url), Some(did_contract_address)) => Ok(DidRegistrySettings {
                rpc_url,
                did_contract_address,
            }),
            _ => Err(DidPolygonError::LedgerConfigNotFound),
        }
    }

    pub(crate) fn schema_registry_settings(&self) -> DidPolygonResult<SchemaRegistrySettings<'_>> {
        let did_registry = self
            .did_registry_settings()
            .map_err(|_| DidPolygonError::SchemaRegistryNotConfigured)?;
        match (
            non_empty(&self.schema_manager_contract_address),
            non_empty(&self.server_url),
            non_empty(&self.file_server_token),
        ) {
            (Some(schema_manager_contract_address), Some(server_url), Some(file_server_token)) => {
                Ok(SchemaRegistrySettings {
                    did_registry,
                    schema_manager_contract_address,
                    server_url,
                    file_server_token,
                })
            }
            _ => Err(DidPolygonError::SchemaRegistryNotConfigured),
        }
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|value| !value.is_empty())
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct DidRegistrySettings<'a> {
    pub rpc_url: &'a str,
    pub did_contract_address: &'a str,
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct SchemaRegistrySettings<'a> {
    pub did_registry: DidRegistrySettings<'a>,
    pub schema_manager_contract_address: &'a str,
    pub server_url: &'a str,
    pub file_server_token: &'a str,
}
