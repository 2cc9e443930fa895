use std::sync::Arc;

use async_trait::async_trait;
use public_key::{Key, KeyType};

pub use self::{key_wallet::KeyWallet, record_wallet::RecordWallet};
use crate::{
    errors::error::WalletResult,
    wallet::{base_wallet::record::Record, record_tags::RecordTags},
};

pub mod key_wallet;
pub mod record;
pub mod record_category;
pub mod record_wallet;

use record_category::RecordCategory;

pub trait BaseWallet: RecordWallet + KeyWallet + Send + Sync + std::fmt::Debug {}

#[async_trait]
impl KeyWallet for Arc<dyn BaseWallet> {
    async fn create_key(&self, key_type: KeyType, secret: Option<&[u8]>) -> WalletResult<Key> {
        self.as_ref().create_key(key_type, secret).await
    }

    async fn key_count(&self) -> WalletResult<usize> {
        self.as_ref().key_count().await
    }

    async fn export_secret(&self, key: &Key) -> WalletResult<Vec<u8>> {
        self.as_ref().export_secret(key).await
    }

    async fn sign(&self, key: &Key, msg: &[u8]) -> WalletResult<Vec<u8>> {
        self.as_ref().sign(key, msg).await
    }

    async fn verify(&self, key: &Key, msg: &[u8], signature: &[u8]) -> WalletResult<bool> {
        self.as_ref().verify(key, msg, signature).await
    }
}

#[async_trait]
impl RecordWallet for Arc<dyn BaseWallet> {
    async fn add_record(&self, record: Record) -> WalletResult<()> {
        self.as_ref().add_record(record).await
    }

    async fn get_record(&self, category: RecordCategory, name: &str) -> WalletResult<Record> {
        self.as_ref().get_record(category, name).await
    }

    async fn update_record_value(
        &self,
        category: RecordCategory,
        name: &str,
        new_value: &str,
    ) -> WalletResult<()> {
        self.as_ref()
            .update_record_value(category, name, new_value)
            .await
    }

    async fn update_record_tags(
        &self,
        category: RecordCategory,
        name: &str,
        new_tags: RecordTags,
    ) -> WalletResult<()> {
        self.as_ref()
            .update_record_tags(category, name, new_tags)
            .await
    }

    async fn delete_record(&self, category: RecordCategory, name: &str) -> WalletResult<()> {
        self.as_ref().delete_record(category, name).await
    }

    async fn search_record(
        &self,
        category: RecordCategory,
        filter: Option<RecordTags>,
    ) -> WalletResult<Vec<Record>> {
        self.as_ref().search_record(category, filter).await
    }
}

impl BaseWallet for Arc<dyn BaseWallet> {}
