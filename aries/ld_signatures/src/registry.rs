use std::{fmt, sync::Arc};

use did_resolver::did_doc::schema::verification_method::VerificationMethodType;
use public_key::KeyType;

use crate::{
    error::{LdSignatureError, LdSignatureResult},
    suite::JwsLinkedDataSignature,
};

/// A registered suite together with the key material it can work with.
#[derive(Clone)]
pub struct SignatureSuiteEntry {
    suite: Arc<dyn JwsLinkedDataSignature>,
    verification_method_types: Vec<VerificationMethodType>,
    key_types: Vec<KeyType>,
}

impl SignatureSuiteEntry {
    pub fn new(
        suite: Arc<dyn JwsLinkedDataSignature>,
        verification_method_types: Vec<VerificationMethodType>,
        key_types: Vec<KeyType>,
    ) -> Self {
        Self {
            suite,
            verification_method_types,
            key_types,
        }
    }

    pub fn suite(&self) -> &Arc<dyn JwsLinkedDataSignature> {
        &self.suite
    }

    pub fn proof_type(&self) -> &str {
        self.suite.proof_type()
    }

    pub fn verification_method_types(&self) -> &[VerificationMethodType] {
        &self.verification_method_types
    }

    pub fn key_types(&self) -> &[KeyType] {
        &self.key_types
    }
}

impl fmt::Debug for SignatureSuiteEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignatureSuiteEntry")
            .field("proof_type", &self.proof_type())
            .field("verification_method_types", &self.verification_method_types)
            .field("key_types", &self.key_types)
            .finish()
    }
}

#[derive(Default, Clone, Debug)]
pub struct SignatureSuiteRegistry {
    entries: Vec<SignatureSuiteEntry>,
}

impl SignatureSuiteRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a suite; a later registration for the same proof type replaces the earlier one.
    pub fn register(&mut self, entry: SignatureSuiteEntry) {
        self.entries
            .retain(|existing| existing.proof_type() != entry.proof_type());
        self.entries.push(entry);
    }

    pub fn supported_proof_types(&self) -> Vec<String> {
        self.entries
            .iter()
            .map(|entry| entry.proof_type().to_string())
            .collect()
    }

    pub fn get_by_proof_type(&self, proof_type: &str) -> LdSignatureResult<&SignatureSuiteEntry> {
        self.entries
            .iter()
            .find(|entry| entry.proof_type() == proof_type)
            .ok_or_else(|| LdSignatureError::UnsupportedProofType(proof_type.to_string()))
    }

    pub fn get_by_verification_method_type(
        &self,
        verification_method_type: &VerificationMethodType,
    ) -> Option<&SignatureSuiteEntry> {
        self.entries.iter().find(|entry| {
            entry
                .verification_method_types
                .contains(verification_method_type)
        })
    }

    pub fn get_by_key_type(&self, key_type: KeyType) -> Option<&SignatureSuiteEntry> {
        self.entries
            .iter()
            .find(|entry| entry.key_types.contains(&key_type))
    }
}
