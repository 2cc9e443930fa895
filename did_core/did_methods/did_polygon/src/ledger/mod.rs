pub mod config;
mod contracts;
pub mod did_registry;
pub mod fees;
pub mod schema_registry;
pub mod service;

use async_trait::async_trait;
use did_resolver::did_doc::schema::did_doc::DidDocument;
use ethers::types::{Address, U256};
use k256::ecdsa::SigningKey;

use crate::error::DidPolygonResult;

/// Read side of the DID registry contract.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DidDocumentReader: Send + Sync {
    /// Raw JSON document stored for `did`, or `None` when the registry holds nothing for it.
    async fn get_did_document(&self, did: &str) -> DidPolygonResult<Option<String>>;
}

/// Write side of the DID registry contract, bound to one signing key.
#[async_trait]
pub trait DidRegistry: Send + Sync {
    /// Returns the transaction hash.
    async fn create(&self, did: &str, did_document: &DidDocument) -> DidPolygonResult<String>;

    /// Returns the transaction hash.
    async fn update(&self, did: &str, did_document: &DidDocument) -> DidPolygonResult<String>;
}

#[async_trait]
pub trait PolygonLedger: DidDocumentReader {
    async fn get_balance(&self, address: Address) -> DidPolygonResult<U256>;

    async fn create_did_registry_instance(
        &self,
        signing_key: SigningKey,
    ) -> DidPolygonResult<Box<dyn DidRegistry>>;
}
