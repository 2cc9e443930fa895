//! DIDs this agent created or learned about, persisted in the record store.

use std::{fmt::Display, sync::Arc};

use chrono::{DateTime, Utc};
use did_doc::schema::did_doc::DidDocument;
use serde::{Deserialize, Serialize};

use super::{
    base_wallet::{record::Record, record_category::RecordCategory, BaseWallet},
    record_tags::RecordTags,
};
use crate::errors::error::WalletResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DidRecordRole {
    Created,
    Received,
}

impl Display for DidRecordRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DidRecordRole::Created => write!(f, "created"),
            DidRecordRole::Received => write!(f, "received"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DidRecord {
    id: String,
    did: String,
    role: DidRecordRole,
    #[serde(skip_serializing_if = "Option::is_none")]
    did_document: Option<DidDocument>,
    created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    updated_at: Option<DateTime<Utc>>,
}

impl DidRecord {
    pub fn new(did: String, role: DidRecordRole, did_document: Option<DidDocument>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            did,
            role,
            did_document,
            created_at: Utc::now(),
            updated_at: None,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn did(&self) -> &str {
        &self.did
    }

    pub fn role(&self) -> DidRecordRole {
        self.role
    }

    pub fn did_document(&self) -> Option<&DidDocument> {
        self.did_document.as_ref()
    }

    pub fn set_did_document(&mut self, did_document: DidDocument) {
        self.did_document = Some(did_document);
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at
    }

    /// `polygon` for `did:polygon:...`
    pub fn method(&self) -> Option<&str> {
        self.did.split(':').nth(1)
    }

    fn tags(&self) -> RecordTags {
        let mut tags = RecordTags::new(vec![
            ("did".to_string(), self.did.clone()),
            ("role".to_string(), self.role.to_string()),
        ]);
        if let Some(method) = self.method() {
            tags.add(("method".to_string(), method.to_string()));
        }
        tags
    }
}

#[derive(Debug, Clone)]
pub struct DidRepository {
    wallet: Arc<dyn BaseWallet>,
}

impl DidRepository {
    pub fn new(wallet: Arc<dyn BaseWallet>) -> Self {
        Self { wallet }
    }

    pub async fn save(&self, record: &DidRecord) -> WalletResult<()> {
        log::debug!("Saving {} DID record for {}", record.role, record.did);
        let record = Record::builder()
            .category(RecordCategory::Did)
            .name(record.id.clone())
            .value(serde_json::to_string(record)?)
            .tags(record.tags())
            .build();
        self.wallet.add_record(record).await
    }

    /// Persists the record, stamping `updated_at`.
    pub async fn update(&self, mut record: DidRecord) -> WalletResult<DidRecord> {
        record.updated_at = Some(Utc::now());
        self.wallet
            .update_record_value(
                RecordCategory::Did,
                &record.id,
                &serde_json::to_string(&record)?,
            )
            .await?;
        self.wallet
            .update_record_tags(RecordCategory::Did, &record.id, record.tags())
            .await?;
        Ok(record)
    }

    pub async fn find_created_did(&self, did: &str) -> WalletResult<Option<DidRecord>> {
        let filter = RecordTags::new(vec![
            ("did".to_string(), did.to_string()),
            ("role".to_string(), DidRecordRole::Created.to_string()),
        ]);
        let records = self
            .wallet
            .search_record(RecordCategory::Did, Some(filter))
            .await?;
        records
            .first()
            .map(|record| -> WalletResult<DidRecord> {
                Ok(serde_json::from_str(record.value())?)
            })
            .transpose()
    }

    pub async fn get_created_dids(&self, method: Option<&str>) -> WalletResult<Vec<DidRecord>> {
        let mut tags = vec![("role".to_string(), DidRecordRole::Created.to_string())];
        if let Some(method) = method {
            tags.push(("method".to_string(), method.to_string()));
        }
        self.wallet
            .search_record(RecordCategory::Did, Some(RecordTags::new(tags)))
            .await?
            .iter()
            .map(|record| -> WalletResult<DidRecord> {
                Ok(serde_json::from_str(record.value())?)
            })
            .collect()
    }
}
