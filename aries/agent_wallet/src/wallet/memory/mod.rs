//! Process-local wallet. Keys and records live only as long as the value itself.

use std::collections::HashMap;

use async_trait::async_trait;
use k256::ecdsa::{
    signature::{Signer, Verifier},
    Signature, SigningKey, VerifyingKey,
};
use public_key::{Key, KeyType};
use tokio::sync::RwLock;

use super::{
    base_wallet::{
        record::Record, record_category::RecordCategory, BaseWallet, KeyWallet, RecordWallet,
    },
    record_tags::RecordTags,
};
use crate::errors::error::{WalletError, WalletResult};

struct StoredKey {
    key_type: KeyType,
    secret: Vec<u8>,
}

#[derive(Default)]
pub struct InMemoryWallet {
    keys: RwLock<HashMap<String, StoredKey>>,
    records: RwLock<HashMap<(RecordCategory, String), Record>>,
}

impl std::fmt::Debug for InMemoryWallet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryWallet").finish_non_exhaustive()
    }
}

impl InMemoryWallet {
    pub fn new() -> Self {
        Self::default()
    }
}

fn k256_signing_key(secret: Option<&[u8]>) -> WalletResult<SigningKey> {
    match secret {
        Some(bytes) => Ok(SigningKey::from_slice(bytes)?),
        None => Ok(SigningKey::random(&mut rand::rngs::OsRng)),
    }
}

fn unsupported(key_type: KeyType) -> WalletError {
    WalletError::Unimplemented(format!("key type {key_type} is not supported"))
}

impl BaseWallet for InMemoryWallet {}

#[async_trait]
impl KeyWallet for InMemoryWallet {
    async fn create_key(&self, key_type: KeyType, secret: Option<&[u8]>) -> WalletResult<Key> {
        let (public, secret) = match key_type {
            KeyType::K256 => {
                let signing_key = k256_signing_key(secret)?;
                let public = signing_key
                    .verifying_key()
                    .to_encoded_point(true)
                    .as_bytes()
                    .to_vec();
                (public, signing_key.to_bytes().to_vec())
            }
            other => return Err(unsupported(other)),
        };
        let key = Key::new(public, key_type)?;
        // re-importing the same secret is idempotent
        self.keys
            .write()
            .await
            .insert(key.base58(), StoredKey { key_type, secret });
        log::debug!("Stored {} key {}", key_type, key.base58());
        Ok(key)
    }

    async fn key_count(&self) -> WalletResult<usize> {
        Ok(self.keys.read().await.len())
    }

    async fn export_secret(&self, key: &Key) -> WalletResult<Vec<u8>> {
        self.keys
            .read()
            .await
            .get(&key.base58())
            .map(|stored| stored.secret.clone())
            .ok_or_else(|| WalletError::KeyNotFound(key.base58()))
    }

    async fn sign(&self, key: &Key, msg: &[u8]) -> WalletResult<Vec<u8>> {
        let keys = self.keys.read().await;
        let stored = keys
            .get(&key.base58())
            .ok_or_else(|| WalletError::KeyNotFound(key.base58()))?;
        match stored.key_type {
            KeyType::K256 => {
                let signing_key = SigningKey::from_slice(&stored.secret)?;
                let signature: Signature = signing_key.sign(msg);
                Ok(signature.to_bytes().to_vec())
            }
            other => Err(unsupported(other)),
        }
    }

    async fn verify(&self, key: &Key, msg: &[u8], signature: &[u8]) -> WalletResult<bool> {
        match key.key_type() {
            KeyType::K256 => {
                let verifying_key = VerifyingKey::from_sec1_bytes(key.key())?;
                let Ok(signature) = Signature::from_slice(signature) else {
                    return Ok(false);
                };
                Ok(verifying_key.verify(msg, &signature).is_ok())
            }
            other => Err(unsupported(*other)),
        }
    }
}

#[async_trait]
impl RecordWallet for InMemoryWallet {
    async fn add_record(&self, record: Record) -> WalletResult<()> {
        let mut records = self.records.write().await;
        let id = (*record.category(), record.name().to_string());
        if records.contains_key(&id) {
            return Err(WalletError::DuplicateRecord(format!(
                "category: {}, name: {}",
                id.0, id.1
            )));
        }
        records.insert(id, record);
        Ok(())
    }

    async fn get_record(&self, category: RecordCategory, name: &str) -> WalletResult<Record> {
        self.records
            .read()
            .await
            .get(&(category, name.to_string()))
            .cloned()
            .ok_or_else(|| WalletError::record_not_found(category, name))
    }

    async fn update_record_value(
        &self,
        category: RecordCategory,
        name: &str,
        new_value: &str,
    ) -> WalletResult<()> {
        let mut records = self.records.write().await;
        let record = records
            .get_mut(&(category, name.to_string()))
            .ok_or_else(|| WalletError::record_not_found(category, name))?;
        record.set_value(new_value);
        Ok(())
    }

    async fn update_record_tags(
        &self,
        category: RecordCategory,
        name: &str,
        new_tags: RecordTags,
    ) -> WalletResult<()> {
        let mut records = self.records.write().await;
        let record = records
            .get_mut(&(category, name.to_string()))
            .ok_or_else(|| WalletError::record_not_found(category, name))?;
        record.set_tags(new_tags);
        Ok(())
    }

    async fn delete_record(&self, category: RecordCategory, name: &str) -> WalletResult<()> {
        self.records
            .write()
            .await
            .remove(&(category, name.to_string()))
            .map(|_| ())
            .ok_or_else(|| WalletError::record_not_found(category, name))
    }

    async fn search_record(
        &self,
        category: RecordCategory,
        filter: Option<RecordTags>,
    ) -> WalletResult<Vec<Record>> {
        let filter = filter.unwrap_or_default();
        let mut found: Vec<Record> = self
            .records
            .read()
            .await
            .values()
            .filter(|record| record.category() == &category && record.tags().matches(&filter))
            .cloned()
            .collect();
        found.sort_by(|a, b| a.name().cmp(b.name()));
        Ok(found)
    }
}
