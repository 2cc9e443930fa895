use std::fmt::Display;

use did_resolver::did_doc::schema::did_doc::DidDocument;
use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;

use crate::utils::MAINNET;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum PolygonNetwork {
    #[default]
    Mainnet,
    Testnet,
}

impl PolygonNetwork {
    pub fn as_str(&self) -> &'static str {
        match self {
            PolygonNetwork::Mainnet => MAINNET,
            PolygonNetwork::Testnet => "testnet",
        }
    }
}

impl Display for PolygonNetwork {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, TypedBuilder)]
pub struct PolygonDidCreateOptions {
    #[builder(default)]
    network: PolygonNetwork,
    #[builder(default, setter(strip_option, into))]
    endpoint: Option<String>,
    #[builder(setter(into))]
    private_key: Vec<u8>,
}

impl PolygonDidCreateOptions {
    pub fn network(&self) -> PolygonNetwork {
        self.network
    }

    pub fn endpoint(&self) -> Option<&str> {
        self.endpoint.as_deref()
    }

    pub fn private_key(&self) -> &[u8] {
        &self.private_key
    }
}

#[derive(Clone, TypedBuilder)]
pub struct PolygonDidUpdateOptions {
    #[builder(setter(into))]
    did: String,
    did_document: DidDocument,
    #[builder(default, setter(strip_option, into))]
    private_key: Option<Vec<u8>>,
}

impl PolygonDidUpdateOptions {
    pub fn did(&self) -> &str {
        &self.did
    }

    pub fn did_document(&self) -> &DidDocument {
        &self.did_document
    }

    pub fn private_key(&self) -> Option<&[u8]> {
        self.private_key.as_deref()
    }

    pub(crate) fn into_parts(self) -> (String, DidDocument, Option<Vec<u8>>) {
        (self.did, self.did_document, self.private_key)
    }
}

#[derive(Debug, Clone, TypedBuilder)]
pub struct PolygonDidDeactivateOptions {
    #[builder(setter(into))]
    did: String,
}

impl PolygonDidDeactivateOptions {
    pub fn did(&self) -> &str {
        &self.did
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn network_defaults_to_mainnet() {
        let options = PolygonDidCreateOptions::builder()
            .private_key(vec![1u8; 32])
            .build();
        assert_eq!(options.network(), PolygonNetwork::Mainnet);
        assert_eq!(options.endpoint(), None);
        assert_eq!(PolygonNetwork::Testnet.to_string(), "testnet");
    }

    #[test]
    fn network_deserializes_lowercase() {
        let network: PolygonNetwork = serde_json::from_str(r#""testnet""#).unwrap();
        assert_eq!(network, PolygonNetwork::Testnet);
    }
}
