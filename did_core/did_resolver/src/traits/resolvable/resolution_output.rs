use did_doc::schema::did_doc::DidDocument;
use serde::{Deserialize, Serialize};

use super::{resolution_error::DidResolutionError, resolution_metadata::DidResolutionMetadata};
use crate::shared_types::did_document_metadata::DidDocumentMetadata;

/// `did_document` is `None` when resolution failed; the reason is then carried in the
/// resolution metadata.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DidResolutionOutput {
    did_document: Option<DidDocument>,
    did_resolution_metadata: DidResolutionMetadata,
    did_document_metadata: DidDocumentMetadata,
}

impl DidResolutionOutput {
    pub fn builder(did_document: DidDocument) -> DidResolutionOutputBuilder {
        DidResolutionOutputBuilder {
            did_document: Some(did_document),
            did_resolution_metadata: None,
            did_document_metadata: None,
        }
    }

    pub fn failed(error: DidResolutionError, message: String) -> Self {
        DidResolutionOutput {
            did_document: None,
            did_resolution_metadata: DidResolutionMetadata::builder()
                .error(error)
                .message(message)
                .build(),
            did_document_metadata: DidDocumentMetadata::default(),
        }
    }

    pub fn did_document(&self) -> Option<&DidDocument> {
        self.did_document.as_ref()
    }

    pub fn did_resolution_metadata(&self) -> &DidResolutionMetadata {
        &self.did_resolution_metadata
    }

    pub fn did_document_metadata(&self) -> &DidDocumentMetadata {
        &self.did_document_metadata
    }

    pub fn is_deactivated(&self) -> bool {
        self.did_document_metadata.deactivated().unwrap_or(false)
    }
}

pub struct DidResolutionOutputBuilder {
    did_document: Option<DidDocument>,
    did_resolution_metadata: Option<DidResolutionMetadata>,
    did_document_metadata: Option<DidDocumentMetadata>,
}

impl DidResolutionOutputBuilder {
    pub fn did_resolution_metadata(
        mut self,
        did_resolution_metadata: DidResolutionMetadata,
    ) -> Self {
        self.did_resolution_metadata = Some(did_resolution_metadata);
        self
    }

    pub fn did_document_metadata(mut self, did_document_metadata: DidDocumentMetadata) -> Self {
        self.did_document_metadata = Some(did_document_metadata);
        self
    }

    pub fn build(self) -> DidResolutionOutput {
        DidResolutionOutput {
            did_document: self.did_document,
            did_resolution_metadata: self.did_resolution_metadata.unwrap_or_default(),
            did_document_metadata: self.did_document_metadata.unwrap_or_default(),
        }
    }
}
