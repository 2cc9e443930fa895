use std::sync::Arc;

use agent_wallet::wallet::base_wallet::BaseWallet;
use did_resolver::{
    did_doc::schema::{
        context::CREDENTIALS_V1,
        did_doc::DidDocument,
        verification_method::{VerificationMethodKind, VerificationMethodType},
    },
    traits::resolvable::resolution_options::DidResolutionOptions,
};
use did_resolver_registry::ResolverRegistry;
use public_key::{Key, KeyType};
use serde::Serialize;
use serde_json::Value;
use typed_builder::TypedBuilder;

use crate::{
    error::{LdSignatureError, LdSignatureResult},
    jsonld::{includes_context, one_or_many, CONTEXT},
    proof::{Proof, ASSERTION_METHOD, AUTHENTICATION},
    registry::{SignatureSuiteEntry, SignatureSuiteRegistry},
};

const VERIFIABLE_CREDENTIAL: &str = "VerifiableCredential";
const VERIFIABLE_PRESENTATION: &str = "VerifiablePresentation";

#[derive(Debug, Clone, TypedBuilder)]
pub struct SignCredentialOptions {
    credential: Value,
    #[builder(setter(into))]
    proof_type: String,
    #[builder(setter(into))]
    verification_method: String,
    #[builder(default = ASSERTION_METHOD.to_string(), setter(into))]
    proof_purpose: String,
}

#[derive(Debug, Clone, TypedBuilder)]
pub struct SignPresentationOptions {
    presentation: Value,
    #[builder(setter(into))]
    proof_type: String,
    #[builder(setter(into))]
    verification_method: String,
    #[builder(setter(into))]
    challenge: String,
    #[builder(default, setter(strip_option, into))]
    domain: Option<String>,
}

#[derive(Debug, Clone, Default, TypedBuilder)]
pub struct VerifyPresentationOptions {
    #[builder(default, setter(strip_option, into))]
    challenge: Option<String>,
    #[builder(default, setter(strip_option, into))]
    domain: Option<String>,
}

/// Outcome of verifying a credential or presentation. Presentations carry one nested result per
/// embedded credential.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationResult {
    pub is_valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub validations: Vec<VerificationResult>,
}

impl VerificationResult {
    fn from_outcome(outcome: LdSignatureResult<()>) -> Self {
        Self {
            is_valid: outcome.is_ok(),
            error: outcome.err().map(|err| err.to_string()),
            validations: Vec::new(),
        }
    }
}

struct ProofExpectations<'a> {
    purpose: &'a str,
    challenge: Option<&'a str>,
    domain: Option<&'a str>,
}

struct DereferencedMethod {
    json: Value,
    key: Key,
    did_document: DidDocument,
}

/// Signs and verifies W3C credentials and presentations with the registered signature suites,
/// dereferencing verification methods through the resolver registry.
#[derive(Clone)]
pub struct W3cJsonLdCredentialService {
    suite_registry: Arc<SignatureSuiteRegistry>,
    resolver_registry: Arc<ResolverRegistry>,
}

impl W3cJsonLdCredentialService {
    pub fn new(
        suite_registry: Arc<SignatureSuiteRegistry>,
        resolver_registry: Arc<ResolverRegistry>,
    ) -> Self {
        Self {
            suite_registry,
            resolver_registry,
        }
    }

    pub fn key_types_by_proof_type(&self, proof_type: &str) -> LdSignatureResult<Vec<KeyType>> {
        Ok(self
            .suite_registry
            .get_by_proof_type(proof_type)?
            .key_types()
            .to_vec())
    }

    pub fn verification_method_types_by_proof_type(
        &self,
        proof_type: &str,
    ) -> LdSignatureResult<Vec<VerificationMethodType>> {
        Ok(self
            .suite_registry
            .get_by_proof_type(proof_type)?
            .verification_method_types()
            .to_vec())
    }

    pub async fn sign_credential(
        &self,
        wallet: &dyn BaseWallet,
        options: SignCredentialOptions,
    ) -> LdSignatureResult<Value> {
        validate_credential(&options.credential)?;
        let proof = Proof::builder()
            .proof_type(options.proof_type)
            .verification_method(options.verification_method)
            .proof_purpose(options.proof_purpose)
            .build();
        self.sign(wallet, options.credential, proof).await
    }

    pub async fn verify_credential(&self, credential: &Value) -> VerificationResult {
        let expectations = ProofExpectations {
            purpose: ASSERTION_METHOD,
            challenge: None,
            domain: None,
        };
        let outcome = match validate_credential(credential) {
            Ok(()) => self.verify(credential, &expectations).await,
            Err(err) => Err(err),
        };
        if let Err(err) = &outcome {
            log::warn!("Credential verification failed: {err}");
        }
        VerificationResult::from_outcome(outcome)
    }

    pub async fn sign_presentation(
        &self,
        wallet: &dyn BaseWallet,
        options: SignPresentationOptions,
    ) -> LdSignatureResult<Value> {
        validate_presentation(&options.presentation)?;
        let proof = Proof::builder()
            .proof_type(options.proof_type)
            .verification_method(options.verification_method)
            .proof_purpose(AUTHENTICATION)
            .challenge(options.challenge)
            .domain(options.domain)
            .build();
        self.sign(wallet, options.presentation, proof).await
    }

    /// Verifies the presentation proof and every embedded credential.
    pub async fn verify_presentation(
        &self,
        presentation: &Value,
        options: &VerifyPresentationOptions,
    ) -> VerificationResult {
        let expectations = ProofExpectations {
            purpose: AUTHENTICATION,
            challenge: options.challenge.as_deref(),
            domain: options.domain.as_deref(),
        };
        let outcome = match validate_presentation(presentation) {
            Ok(()) => self.verify(presentation, &expectations).await,
            Err(err) => Err(err),
        };
        if let Err(err) = &outcome {
            log::warn!("Presentation verification failed: {err}");
        }

        let mut validations = Vec::new();
        for credential in one_or_many(presentation, "verifiableCredential") {
            validations.push(self.verify_credential(credential).await);
        }

        let mut result = VerificationResult::from_outcome(outcome);
        result.is_valid &= validations.iter().all(|r| r.is_valid);
        result.validations = validations;
        result
    }

    async fn sign(
        &self,
        wallet: &dyn BaseWallet,
        mut document: Value,
        mut proof: Proof,
    ) -> LdSignatureResult<Value> {
        if document.get("proof").is_some() {
            return Err(LdSignatureError::InvalidDocument(
                "document already contains a proof".to_string(),
            ));
        }
        let entry = self.suite_registry.get_by_proof_type(proof.proof_type())?;
        let suite = entry.suite();
        suite.ensure_suite_context(&mut document, true)?;

        let method = self
            .dereference_verification_method(entry, proof.verification_method())
            .await?;
        suite.assert_verification_method(&method.json)?;

        let verify_data = suite.create_verify_data(&document, &proof)?;
        proof.set_jws(suite.sign(wallet, &method.key, &verify_data).await?);
        log::debug!(
            "Signed document with {} using {}",
            proof.proof_type(),
            proof.verification_method()
        );

        let object = document.as_object_mut().ok_or_else(|| {
            LdSignatureError::InvalidDocument("document must be a JSON object".to_string())
        })?;
        object.insert("proof".to_string(), serde_json::to_value(proof)?);
        Ok(document)
    }

    async fn verify(
        &self,
        document: &Value,
        expectations: &ProofExpectations<'_>,
    ) -> LdSignatureResult<()> {
        let proof = match document.get("proof") {
            Some(Value::Array(_)) => {
                return Err(LdSignatureError::InvalidProof(
                    "documents with multiple proofs are not supported".to_string(),
                ))
            }
            Some(proof) => serde_json::from_value::<Proof>(proof.clone())?,
            None => {
                return Err(LdSignatureError::InvalidProof(
                    "document has no proof".to_string(),
                ))
            }
        };
        check_expectations(&proof, expectations)?;
        let jws = proof
            .jws()
            .ok_or_else(|| LdSignatureError::InvalidProof("proof has no jws".to_string()))?;

        let entry = self.suite_registry.get_by_proof_type(proof.proof_type())?;
        let suite = entry.suite();
        suite.ensure_suite_context(&mut document.clone(), false)?;

        let method = self
            .dereference_verification_method(entry, proof.verification_method())
            .await?;
        suite.assert_verification_method(&method.json)?;
        if !is_authorized(
            &method.did_document,
            proof.proof_purpose(),
            proof.verification_method(),
        ) {
            return Err(LdSignatureError::InvalidProof(format!(
                "verification method {} is not authorized for proof purpose {}",
                proof.verification_method(),
                proof.proof_purpose()
            )));
        }

        let verify_data = suite.create_verify_data(document, &proof)?;
        if !suite.verify(&method.key, &verify_data, jws).await? {
            return Err(LdSignatureError::InvalidProof(
                "signature verification failed".to_string(),
            ));
        }
        Ok(())
    }

    /// Resolves the controlling DID and returns the method with the document's `@context`
    /// attached, which suites inspect when asserting the method.
    async fn dereference_verification_method(
        &self,
        entry: &SignatureSuiteEntry,
        verification_method_id: &str,
    ) -> LdSignatureResult<DereferencedMethod> {
        let not_found = |reason: String| LdSignatureError::VerificationMethodNotFound {
            id: verification_method_id.to_string(),
            reason,
        };
        let did = verification_method_id
            .split_once('#')
            .map_or(verification_method_id, |(did, _)| did);

        let output = self
            .resolver_registry
            .resolve(did, &DidResolutionOptions::default())
            .await
            .map_err(|err| not_found(err.to_string()))?;
        let did_document = output.did_document().cloned().ok_or_else(|| {
            not_found(
                output
                    .did_resolution_metadata()
                    .message()
                    .cloned()
                    .unwrap_or_else(|| format!("unable to resolve {did}")),
            )
        })?;

        let verification_method = did_document
            .dereference_key(verification_method_id)
            .ok_or_else(|| not_found("not present in the DID document".to_string()))?;
        let key = verification_method.public_key()?;
        if !entry.key_types().is_empty() && !entry.key_types().contains(key.key_type()) {
            return Err(LdSignatureError::InvalidVerificationMethod(format!(
                "key type {} cannot be used with {}",
                key.key_type(),
                entry.proof_type()
            )));
        }

        let mut json = serde_json::to_value(verification_method)?;
        if let Some(object) = json.as_object_mut() {
            object.insert(
                CONTEXT.to_string(),
                serde_json::to_value(did_document.context())?,
            );
        }
        Ok(DereferencedMethod {
            json,
            key,
            did_document,
        })
    }
}

fn check_expectations(proof: &Proof, expectations: &ProofExpectations<'_>) -> LdSignatureResult<()> {
    if proof.proof_purpose() != expectations.purpose {
        return Err(LdSignatureError::InvalidProof(format!(
            "expected proof purpose {}, found {}",
            expectations.purpose,
            proof.proof_purpose()
        )));
    }
    if expectations.challenge.is_some() && proof.challenge() != expectations.challenge {
        return Err(LdSignatureError::InvalidProof(
            "the proof's challenge does not match the expected challenge".to_string(),
        ));
    }
    if expectations.domain.is_some() && proof.domain() != expectations.domain {
        return Err(LdSignatureError::InvalidProof(
            "the proof's domain does not match the expected domain".to_string(),
        ));
    }
    Ok(())
}

fn is_authorized(did_document: &DidDocument, proof_purpose: &str, verification_method: &str) -> bool {
    let relationship: &[VerificationMethodKind] = match proof_purpose {
        ASSERTION_METHOD => did_document.assertion_method(),
        AUTHENTICATION => did_document.authentication(),
        "capabilityInvocation" => did_document.capability_invocation(),
        "capabilityDelegation" => did_document.capability_delegation(),
        "keyAgreement" => did_document.key_agreement(),
        _ => return false,
    };
    let fragment = verification_method.rsplit_once('#').map(|(_, fragment)| fragment);
    relationship.iter().any(|kind| {
        let id = kind.id();
        id == verification_method || (id.starts_with('#') && Some(&id[1..]) == fragment)
    })
}

fn has_type(document: &Value, expected: &str) -> bool {
    one_or_many(document, "type")
        .iter()
        .any(|value| value.as_str() == Some(expected))
}

fn validate_common(document: &Value, kind: &str, expected_type: &str) -> LdSignatureResult<()> {
    if !document.is_object() {
        return Err(LdSignatureError::InvalidDocument(format!(
            "{kind} must be a JSON object"
        )));
    }
    if !includes_context(document, CREDENTIALS_V1) {
        return Err(LdSignatureError::InvalidDocument(format!(
            "{kind} @context must include {CREDENTIALS_V1}"
        )));
    }
    if !has_type(document, expected_type) {
        return Err(LdSignatureError::InvalidDocument(format!(
            "{kind} type must include {expected_type}"
        )));
    }
    Ok(())
}

fn validate_credential(credential: &Value) -> LdSignatureResult<()> {
    validate_common(credential, "credential", VERIFIABLE_CREDENTIAL)?;
    let issuer = match credential.get("issuer") {
        Some(Value::String(issuer)) => Some(issuer.as_str()),
        Some(issuer) => issuer.get("id").and_then(Value::as_str),
        None => None,
    };
    if issuer.map_or(true, str::is_empty) {
        return Err(LdSignatureError::InvalidDocument(
            "credential must have an issuer".to_string(),
        ));
    }
    if credential.get("credentialSubject").is_none() {
        return Err(LdSignatureError::InvalidDocument(
            "credential must have a credentialSubject".to_string(),
        ));
    }
    Ok(())
}

fn validate_presentation(presentation: &Value) -> LdSignatureResult<()> {
    validate_common(presentation, "presentation", VERIFIABLE_PRESENTATION)
}

#[cfg(test)]
mod tests {
    use agent_wallet::wallet::{base_wallet::KeyWallet, memory::InMemoryWallet};
    use async_trait::async_trait;
    use did_resolver::{
        did_doc::schema::{context, verification_method::VerificationMethod},
        error::GenericError,
        traits::resolvable::{resolution_output::DidResolutionOutput, DidResolvable},
    };
    use serde_json::json;
    use test_utils::mockdata::{
        credentials::{unsigned_credential, unsigned_presentation},
        keys::signing_private_key,
    };

    use super::*;
    use crate::{
        registry::SignatureSuiteEntry,
        suite::test_suite::{TestSuite, PROOF_TYPE},
    };

    const ISSUER: &str = "did:example:issuer";
    const KEY_ID: &str = "did:example:issuer#key-1";

    struct StaticResolver(DidDocument);

    #[async_trait]
    impl DidResolvable for StaticResolver {
        fn supported_methods(&self) -> Vec<String> {
            vec!["example".to_string()]
        }

        async fn resolve(
            &self,
            _did: &str,
            _options: &DidResolutionOptions,
        ) -> Result<DidResolutionOutput, GenericError> {
            Ok(DidResolutionOutput::builder(self.0.clone()).build())
        }
    }

    async fn setup() -> (InMemoryWallet, W3cJsonLdCredentialService) {
        let wallet = InMemoryWallet::new();
        let key = wallet
            .create_key(KeyType::K256, Some(&signing_private_key()))
            .await
            .unwrap();
        let did_document = DidDocument::builder(ISSUER.to_string())
            .add_context(context::SECP256K1_2019_V1.to_string())
            .add_verification_method(
                VerificationMethod::builder(
                    KEY_ID.to_string(),
                    ISSUER.to_string(),
                    VerificationMethodType::EcdsaSecp256k1VerificationKey2019,
                )
                .add_public_key_base58(key.base58())
                .build(),
            )
            .add_assertion_method_reference(KEY_ID.to_string())
            .add_authentication_reference(KEY_ID.to_string())
            .build();

        let mut resolver_registry = ResolverRegistry::new();
        resolver_registry.register(Arc::new(StaticResolver(did_document)));
        let mut suite_registry = SignatureSuiteRegistry::new();
        suite_registry.register(SignatureSuiteEntry::new(
            Arc::new(TestSuite),
            vec![VerificationMethodType::EcdsaSecp256k1VerificationKey2019],
            vec![KeyType::K256],
        ));
        let service =
            W3cJsonLdCredentialService::new(Arc::new(suite_registry), Arc::new(resolver_registry));
        (wallet, service)
    }

    async fn signed_credential(
        wallet: &InMemoryWallet,
        service: &W3cJsonLdCredentialService,
    ) -> Value {
        let options = SignCredentialOptions::builder()
            .credential(unsigned_credential(ISSUER))
            .proof_type(PROOF_TYPE)
            .verification_method(KEY_ID)
            .build();
        service.sign_credential(wallet, options).await.unwrap()
    }

    #[tokio::test]
    async fn signed_credential_verifies_until_tampered() {
        let (wallet, service) = setup().await;
        let credential = signed_credential(&wallet, &service).await;

        assert_eq!(credential["proof"]["proofPurpose"], json!(ASSERTION_METHOD));
        assert!(includes_context(&credential, context::SECP256K1_2019_V1));
        let result = service.verify_credential(&credential).await;
        assert!(result.is_valid, "{:?}", result.error);

        let mut tampered = credential.clone();
        tampered["credentialSubject"]["degree"]["name"] = json!("Master of Science");
        let result = service.verify_credential(&tampered).await;
        assert!(!result.is_valid);
        assert_eq!(
            result.error.as_deref(),
            Some("Invalid proof: signature verification failed")
        );
    }

    #[tokio::test]
    async fn signing_twice_is_rejected() {
        let (wallet, service) = setup().await;
        let credential = signed_credential(&wallet, &service).await;
        let options = SignCredentialOptions::builder()
            .credential(credential)
            .proof_type(PROOF_TYPE)
            .verification_method(KEY_ID)
            .build();
        assert!(service.sign_credential(&wallet, options).await.is_err());
    }

    #[tokio::test]
    async fn unknown_proof_type_and_method_fail_to_sign() {
        let (wallet, service) = setup().await;
        let options = SignCredentialOptions::builder()
            .credential(unsigned_credential(ISSUER))
            .proof_type("Ed25519Signature2018")
            .verification_method(KEY_ID)
            .build();
        assert!(matches!(
            service.sign_credential(&wallet, options).await,
            Err(LdSignatureError::UnsupportedProofType(_))
        ));

        let options = SignCredentialOptions::builder()
            .credential(unsigned_credential(ISSUER))
            .proof_type(PROOF_TYPE)
            .verification_method("did:example:issuer#key-9")
            .build();
        assert!(matches!(
            service.sign_credential(&wallet, options).await,
            Err(LdSignatureError::VerificationMethodNotFound { .. })
        ));
    }

    #[tokio::test]
    async fn presentation_checks_challenge_and_embedded_credentials() {
        let (wallet, service) = setup().await;
        let credential = signed_credential(&wallet, &service).await;
        let options = SignPresentationOptions::builder()
            .presentation(unsigned_presentation(ISSUER, vec![credential]))
            .proof_type(PROOF_TYPE)
            .verification_method(KEY_ID)
            .challenge("7bf32d0b")
            .build();
        let presentation = service.sign_presentation(&wallet, options).await.unwrap();

        let expected = VerifyPresentationOptions::builder().challenge("7bf32d0b").build();
        let result = service.verify_presentation(&presentation, &expected).await;
        assert!(result.is_valid, "{:?}", result);
        assert_eq!(result.validations.len(), 1);

        let wrong = VerifyPresentationOptions::builder().challenge("other").build();
        assert!(!service.verify_presentation(&presentation, &wrong).await.is_valid);
    }

    #[test]
    fn exposes_suite_key_material() {
        let service = W3cJsonLdCredentialService::new(
            Arc::new({
                let mut registry = SignatureSuiteRegistry::new();
                registry.register(SignatureSuiteEntry::new(
                    Arc::new(TestSuite),
                    vec![VerificationMethodType::EcdsaSecp256k1VerificationKey2019],
                    vec![KeyType::K256],
                ));
                registry
            }),
            Arc::new(ResolverRegistry::new()),
        );
        assert_eq!(service.key_types_by_proof_type(PROOF_TYPE).unwrap(), vec![KeyType::K256]);
        assert_eq!(
            service
                .verification_method_types_by_proof_type(PROOF_TYPE)
                .unwrap(),
            vec![VerificationMethodType::EcdsaSecp256k1VerificationKey2019]
        );
        assert!(service.key_types_by_proof_type("unknown").is_err());
    }

    #[test]
    fn validates_credential_shape() {
        validate_credential(&unsigned_credential("did:example:123")).unwrap();

        let mut missing_issuer = unsigned_credential("did:example:123");
        missing_issuer.as_object_mut().unwrap().remove("issuer");
        assert!(validate_credential(&missing_issuer).is_err());

        let mut object_issuer = unsigned_credential("did:example:123");
        object_issuer["issuer"] = json!({ "id": "did:example:123", "name": "Example" });
        validate_credential(&object_issuer).unwrap();

        let mut wrong_type = unsigned_credential("did:example:123");
        wrong_type["type"] = json!("Other");
        assert!(validate_credential(&wrong_type).is_err());

        assert!(validate_credential(&json!({ "type": "VerifiableCredential" })).is_err());
    }

    #[test]
    fn authorization_matches_absolute_and_relative_references() {
        let did_document: DidDocument = serde_json::from_value(json!({
            "@context": ["https://www.w3.org/ns/did/v1"],
            "id": "did:example:123",
            "authentication": ["#key-1"],
            "assertionMethod": ["did:example:123#key-2"]
        }))
        .unwrap();

        assert!(is_authorized(&did_document, AUTHENTICATION, "did:example:123#key-1"));
        assert!(is_authorized(&did_document, ASSERTION_METHOD, "did:example:123#key-2"));
        assert!(!is_authorized(&did_document, ASSERTION_METHOD, "did:example:123#key-1"));
        assert!(!is_authorized(&did_document, "unknownPurpose", "did:example:123#key-1"));
    }

    #[test]
    fn expectations_check_purpose_challenge_and_domain() {
        let proof = Proof::builder()
            .proof_type("TestSecp256k1Signature")
            .verification_method("did:example:123#key-1")
            .proof_purpose(AUTHENTICATION)
            .challenge("abc")
            .build();
        let expect = |purpose, challenge, domain| ProofExpectations {
            purpose,
            challenge,
            domain,
        };

        check_expectations(&proof, &expect(AUTHENTICATION, Some("abc"), None)).unwrap();
        check_expectations(&proof, &expect(AUTHENTICATION, None, None)).unwrap();
        assert!(check_expectations(&proof, &expect(ASSERTION_METHOD, None, None)).is_err());
        assert!(check_expectations(&proof, &expect(AUTHENTICATION, Some("xyz"), None)).is_err());
        assert!(
            check_expectations(&proof, &expect(AUTHENTICATION, None, Some("example.com")))
                .is_err()
        );
    }
}
