use async_trait::async_trait;

use super::{record::Record, record_category::RecordCategory};
use crate::{errors::error::WalletResult, wallet::record_tags::RecordTags};

#[async_trait]
pub trait RecordWallet {
    async fn add_record(&self, record: Record) -> WalletResult<()>;

    async fn get_record(&self, category: RecordCategory, name: &str) -> WalletResult<Record>;

    async fn update_record_value(
        &self,
        category: RecordCategory,
        name: &str,
        new_value: &str,
    ) -> WalletResult<()>;

    async fn update_record_tags(
        &self,
        category: RecordCategory,
        name: &str,
        new_tags: RecordTags,
    ) -> WalletResult<()>;

    async fn delete_record(&self, category: RecordCategory, name: &str) -> WalletResult<()>;

    /// Records of `category` whose tags contain every tag of `filter`.
    async fn search_record(
        &self,
        category: RecordCategory,
        filter: Option<RecordTags>,
    ) -> WalletResult<Vec<Record>>;
}
