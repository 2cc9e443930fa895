use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::utils::OneOrList;

pub const LINKED_DOMAINS: &str = "LinkedDomains";

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Default)]
#[serde(default)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    id: String,
    #[serde(rename = "type")]
    service_type: OneOrList<String>,
    service_endpoint: Value,
    #[serde(flatten)]
    #[serde(skip_serializing_if = "HashMap::is_empty")]
    extra: HashMap<String, Value>,
}

impl Service {
    pub fn new(
        id: String,
        service_endpoint: Value,
        service_type: OneOrList<String>,
        extra: HashMap<String, Value>,
    ) -> Service {
        Service {
            id,
            service_type,
            service_endpoint,
            extra,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn service_type(&self) -> &OneOrList<String> {
        &self.service_type
    }

    pub fn contains_service_type(&self, tested_service_type: &str) -> bool {
        self.service_type.iter().any(|t| t == tested_service_type)
    }

    pub fn service_endpoint(&self) -> &Value {
        &self.service_endpoint
    }

    pub fn extra_field(&self, key: &str) -> Option<&Value> {
        self.extra.get(key)
    }

    /// A service is well formed when it carries an id, at least one type and an endpoint.
    pub fn is_complete(&self) -> bool {
        let endpoint_present = match &self.service_endpoint {
            Value::Null => false,
            Value::String(s) => !s.is_empty(),
            _ => true,
        };
        !self.id.is_empty() && !self.service_type.is_empty() && endpoint_present
    }
}
