use agent_wallet::{
    errors::error::{WalletError, WalletResult},
    wallet::{
        base_wallet::{
            key_wallet::KeyWallet, record::Record, record_category::RecordCategory,
            record_wallet::RecordWallet, BaseWallet,
        },
        record_tags::RecordTags,
    },
};
use async_trait::async_trait;
use public_key::{Key, KeyType};

use crate::mockdata::keys::PUBLIC_KEY_ONE_BASE58;

/// Wallet that holds no secrets. Keys it hands out cannot be exported, so anything that needs
/// raw secp256k1 material fails against it.
#[derive(Debug)]
pub struct MockWallet;

impl BaseWallet for MockWallet {}

#[async_trait]
#[allow(unused_variables)]
impl KeyWallet for MockWallet {
    async fn create_key(&self, key_type: KeyType, secret: Option<&[u8]>) -> WalletResult<Key> {
        Ok(Key::from_base58(PUBLIC_KEY_ONE_BASE58, KeyType::K256)?)
    }

    async fn key_count(&self) -> WalletResult<usize> {
        Ok(0)
    }

    async fn sign(&self, key: &Key, msg: &[u8]) -> WalletResult<Vec<u8>> {
        Ok(vec![0u8; 64])
    }

    async fn verify(&self, key: &Key, msg: &[u8], signature: &[u8]) -> WalletResult<bool> {
        Ok(true)
    }
}

#[async_trait]
#[allow(unused_variables)]
impl RecordWallet for MockWallet {
    async fn add_record(&self, record: Record) -> WalletResult<()> {
        Ok(())
    }

    async fn get_record(&self, category: RecordCategory, name: &str) -> WalletResult<Record> {
        Err(WalletError::record_not_found(category, name))
    }

    async fn update_record_value(
        &self,
        category: RecordCategory,
        name: &str,
        new_value: &str,
    ) -> WalletResult<()> {
        Ok(())
    }

    async fn update_record_tags(
        &self,
        category: RecordCategory,
        name: &str,
        new_tags: RecordTags,
    ) -> WalletResult<()> {
        Ok(())
    }

    async fn delete_record(&self, category: RecordCategory, name: &str) -> WalletResult<()> {
        Ok(())
    }

    async fn search_record(
        &self,
        category: RecordCategory,
        filter: Option<RecordTags>,
    ) -> WalletResult<Vec<Record>> {
        Ok(vec![])
    }
}
