use did_resolver::{
    did_doc::schema::did_doc::DidDocument,
    shared_types::did_document_metadata::DidDocumentMetadata,
};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum DidOperationState {
    Finished,
    Failed,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DidState {
    state: DidOperationState,
    #[serde(skip_serializing_if = "Option::is_none")]
    did: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    did_document: Option<DidDocument>,
    #[serde(skip_serializing_if = "Option::is_none")]
    reason: Option<String>,
}

impl DidState {
    pub fn state(&self) -> DidOperationState {
        self.state
    }

    pub fn did(&self) -> Option<&str> {
        self.did.as_deref()
    }

    pub fn did_document(&self) -> Option<&DidDocument> {
        self.did_document.as_ref()
    }

    pub fn reason(&self) -> Option<&str> {
        self.reason.as_deref()
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Default)]
#[serde(default)]
#[serde(rename_all = "camelCase")]
pub struct DidRegistrationMetadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    txn: Option<String>,
}

impl DidRegistrationMetadata {
    pub fn txn(&self) -> Option<&str> {
        self.txn.as_deref()
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DidRegistrationOutput {
    did_document_metadata: DidDocumentMetadata,
    did_registration_metadata: DidRegistrationMetadata,
    did_state: DidState,
}

impl DidRegistrationOutput {
    pub fn finished(did: String, did_document: DidDocument, txn: Option<String>) -> Self {
        Self {
            did_document_metadata: DidDocumentMetadata::default(),
            did_registration_metadata: DidRegistrationMetadata { txn },
            did_state: DidState {
                state: DidOperationState::Finished,
                did: Some(did),
                did_document: Some(did_document),
                reason: None,
            },
        }
    }

    pub fn failed(reason: impl Into<String>) -> Self {
        Self {
            did_document_metadata: DidDocumentMetadata::default(),
            did_registration_metadata: DidRegistrationMetadata::default(),
            did_state: DidState {
                state: DidOperationState::Failed,
                did: None,
                did_document: None,
                reason: Some(reason.into()),
            },
        }
    }

    pub fn with_did_document_metadata(mut self, metadata: DidDocumentMetadata) -> Self {
        self.did_document_metadata = metadata;
        self
    }

    pub fn did_document_metadata(&self) -> &DidDocumentMetadata {
        &self.did_document_metadata
    }

    pub fn did_registration_metadata(&self) -> &DidRegistrationMetadata {
        &self.did_registration_metadata
    }

    pub fn did_state(&self) -> &DidState {
        &self.did_state
    }

    pub fn is_finished(&self) -> bool {
        self.did_state.state == DidOperationState::Finished
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn failed_envelope_shape() {
        let output = DidRegistrationOutput::failed("Did not found");
        assert!(!output.is_finished());
        assert_eq!(
            serde_json::to_value(&output).unwrap(),
            json!({
                "didDocumentMetadata": {},
                "didRegistrationMetadata": {},
                "didState": { "state": "failed", "reason": "Did not found" }
            })
        );
    }

    #[test]
    fn finished_envelope_carries_txn_and_deactivation() {
        let did = "did:polygon:0x7E5F4552091A69125d5DfCb7b8C2659029395Bdf".to_string();
        let output = DidRegistrationOutput::finished(
            did.clone(),
            DidDocument::builder(did.clone()).build(),
            Some("0xabc".to_string()),
        )
        .with_did_document_metadata(DidDocumentMetadata::builder().deactivated(true).build());

        let value = serde_json::to_value(&output).unwrap();
        assert_eq!(value["didState"]["state"], "finished");
        assert_eq!(value["didState"]["did"], did.as_str());
        assert_eq!(value["didRegistrationMetadata"]["txn"], "0xabc");
        assert_eq!(value["didDocumentMetadata"]["deactivated"], true);
        assert_eq!(output.did_registration_metadata().txn(), Some("0xabc"));
    }
}
