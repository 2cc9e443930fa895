use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc, Mutex,
    },
};

use async_trait::async_trait;
use did_polygon::{
    error::{DidPolygonError, DidPolygonResult},
    ledger::{DidDocumentReader, DidRegistry, PolygonLedger},
    utils::polygon_address_from_did,
};
use did_resolver::did_doc::schema::did_doc::DidDocument;
use ethers::types::{Address, U256};
use k256::ecdsa::SigningKey;

pub const PRIVATE_KEY_TWO: [u8; 32] = {
    let mut key = [0u8; 32];
    key[31] = 2;
    key
};

type Documents = Arc<Mutex<HashMap<Address, String>>>;

/// In-process stand-in for the DID registry contract.
pub struct FakeLedger {
    documents: Documents,
    balance: Mutex<U256>,
    writes: Arc<AtomicUsize>,
}

impl FakeLedger {
    pub fn with_balance(balance: u64) -> Arc<Self> {
        Arc::new(Self {
            documents: Arc::default(),
            balance: Mutex::new(U256::from(balance)),
            writes: Arc::default(),
        })
    }

    pub fn publish(&self, did: &str, document: &DidDocument) {
        let address = polygon_address_from_did(did).unwrap();
        self.documents
            .lock()
            .unwrap()
            .insert(address, serde_json::to_string(document).unwrap());
    }

    pub fn stored_document(&self, did: &str) -> Option<DidDocument> {
        let address = polygon_address_from_did(did).unwrap();
        self.documents
            .lock()
            .unwrap()
            .get(&address)
            .map(|document| serde_json::from_str(document).unwrap())
    }

    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DidDocumentReader for FakeLedger {
    async fn get_did_document(&self, did: &str) -> DidPolygonResult<Option<String>> {
        let address = polygon_address_from_did(did)?;
        Ok(self.documents.lock().unwrap().get(&address).cloned())
    }
}

#[async_trait]
impl PolygonLedger for FakeLedger {
    async fn get_balance(&self, _address: Address) -> DidPolygonResult<U256> {
        Ok(*self.balance.lock().unwrap())
    }

    async fn create_did_registry_instance(
        &self,
        _signing_key: SigningKey,
    ) -> DidPolygonResult<Box<dyn DidRegistry>> {
        Ok(Box::new(FakeDidRegistry {
            documents: self.documents.clone(),
            writes: self.writes.clone(),
        }))
    }
}

struct FakeDidRegistry {
    documents: Documents,
    writes: Arc<AtomicUsize>,
}

impl FakeDidRegistry {
    fn write(&self, did: &str, did_document: &DidDocument, must_exist: bool) -> DidPolygonResult<String> {
        let address = polygon_address_from_did(did)?;
        let mut documents = self.documents.lock().unwrap();
        if documents.contains_key(&address) != must_exist {
            return Err(DidPolygonError::LedgerError(format!(
                "execution reverted for {did}"
            )));
        }
        documents.insert(address, serde_json::to_string(did_document)?);
        let nonce = self.writes.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(format!("0x{nonce:064x}"))
    }
}

#[async_trait]
impl DidRegistry for FakeDidRegistry {
    async fn create(&self, did: &str, did_document: &DidDocument) -> DidPolygonResult<String> {
        self.write(did, did_document, false)
    }

    async fn update(&self, did: &str, did_document: &DidDocument) -> DidPolygonResult<String> {
        self.write(did, did_document, true)
    }
}
