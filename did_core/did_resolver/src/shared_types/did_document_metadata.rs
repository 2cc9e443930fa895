use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Default)]
#[serde(default)]
#[serde(rename_all = "camelCase")]
pub struct DidDocumentMetadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    created: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    updated: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    deactivated: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    version_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    canonical_id: Option<String>,
}

impl DidDocumentMetadata {
    pub fn builder() -> DidDocumentMetadataBuilder {
        DidDocumentMetadataBuilder::default()
    }

    pub fn created(&self) -> Option<DateTime<Utc>> {
        self.created
    }

    pub fn updated(&self) -> Option<DateTime<Utc>> {
        self.updated
    }

    pub fn deactivated(&self) -> Option<bool> {
        self.deactivated
    }

    pub fn version_id(&self) -> Option<&String> {
        self.version_id.as_ref()
    }

    pub fn canonical_id(&self) -> Option<&String> {
        self.canonical_id.as_ref()
    }
}

#[derive(Default)]
pub struct DidDocumentMetadataBuilder {
    created: Option<DateTime<Utc>>,
    updated: Option<DateTime<Utc>>,
    deactivated: Option<bool>,
    version_id: Option<String>,
    canonical_id: Option<String>,
}

impl DidDocumentMetadataBuilder {
    pub fn created(mut self, created: DateTime<Utc>) -> Self {
        self.created = Some(created);
        self
    }

    pub fn updated(mut self, updated: DateTime<Utc>) -> Self {
        self.updated = Some(updated);
        self
    }

    pub fn deactivated(mut self, deactivated: bool) -> Self {
        self.deactivated = Some(deactivated);
        self
    }

    pub fn version_id(mut self, version_id: String) -> Self {
        self.version_id = Some(version_id);
        self
    }

    pub fn canonical_id(mut self, canonical_id: String) -> Self {
        self.canonical_id = Some(canonical_id);
        self
    }

    pub fn build(self) -> DidDocumentMetadata {
        DidDocumentMetadata {
            created: self.created,
            updated: self.updated,
            deactivated: self.deactivated,
            version_id: self.version_id,
            canonical_id: self.canonical_id,
        }
    }
}
