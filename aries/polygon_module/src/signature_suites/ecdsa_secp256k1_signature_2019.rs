use did_resolver::did_doc::schema::context::{CREDENTIALS_V1, SECP256K1_2019_V1, SECURITY_V2};
use k256::ecdsa::{signature::Verifier, Signature, VerifyingKey};
use ld_signatures::{
    error::{LdSignatureError, LdSignatureResult},
    jsonld::{add_context, includes_context},
    suite::{is_revoked, JwsLinkedDataSignature},
};
use public_key::Key;
use serde_json::Value;

pub const ECDSA_SECP256K1_SIGNATURE_2019: &str = "EcdsaSecp256k1Signature2019";
const ECDSA_SECP256K1_VERIFICATION_KEY_2019: &str = "EcdsaSecp256k1VerificationKey2019";

/// Linked data proofs over secp256k1 keys, as detached ES256K JWS.
#[derive(Debug, Default, Clone, Copy)]
pub struct EcdsaSecp256k1Signature2019;

impl EcdsaSecp256k1Signature2019 {
    pub fn new() -> Self {
        Self
    }
}

// secp256k1-2019/v1 clashes with credentials/v1 and with security/v2; either of those alone
// is enough for this suite.
fn includes_compatible_context(document: &Value) -> bool {
    let has_secp256k1 = includes_context(document, SECP256K1_2019_V1);
    let has_credentials = includes_context(document, CREDENTIALS_V1);
    let has_security_v2 = includes_context(document, SECURITY_V2);

    if has_secp256k1 && (has_credentials || has_security_v2) {
        return false;
    }
    has_secp256k1 || has_credentials || has_security_v2
}

fn is_secp256k1_2019_key(verification_method: &Value) -> bool {
    match verification_method.get("type") {
        Some(Value::String(method_type)) => method_type == ECDSA_SECP256K1_VERIFICATION_KEY_2019,
        Some(Value::Array(types)) => types
            .iter()
            .any(|t| t.as_str() == Some(ECDSA_SECP256K1_VERIFICATION_KEY_2019)),
        _ => false,
    }
}

fn first_type(verification_method: &Value) -> String {
    match verification_method.get("type") {
        Some(Value::String(method_type)) => method_type.clone(),
        Some(Value::Array(types)) => types
            .first()
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
        _ => "undefined".to_string(),
    }
}

impl JwsLinkedDataSignature for EcdsaSecp256k1Signature2019 {
    fn proof_type(&self) -> &str {
        ECDSA_SECP256K1_SIGNATURE_2019
    }

    fn algorithm(&self) -> &str {
        "EcDSA"
    }

    fn jws_algorithm(&self) -> &str {
        "ES256K"
    }

    fn context_url(&self) -> &str {
        SECP256K1_2019_V1
    }

    fn required_key_type(&self) -> &str {
        ECDSA_SECP256K1_VERIFICATION_KEY_2019
    }

    fn assert_verification_method(&self, verification_method: &Value) -> LdSignatureResult<()> {
        if !includes_compatible_context(verification_method) {
            return Err(LdSignatureError::IncompatibleContext(format!(
                "The '@context' of the verification method (key) MUST contain the context url \
                 \"{}\".",
                self.context_url()
            )));
        }

        if !is_secp256k1_2019_key(verification_method) {
            return Err(LdSignatureError::InvalidVerificationMethod(format!(
                "Unsupported verification method type '{}'. Verification method type MUST be \
                 '{ECDSA_SECP256K1_VERIFICATION_KEY_2019}'.",
                first_type(verification_method)
            )));
        }
        if !includes_context(verification_method, SECP256K1_2019_V1) {
            return Err(LdSignatureError::InvalidVerificationMethod(format!(
                "For verification method type '{ECDSA_SECP256K1_VERIFICATION_KEY_2019}' the \
                 '@context' MUST contain the context url \"{SECP256K1_2019_V1}\"."
            )));
        }

        if is_revoked(verification_method) {
            return Err(LdSignatureError::VerificationMethodRevoked);
        }
        Ok(())
    }

    fn ensure_suite_context(
        &self,
        document: &mut Value,
        add_suite_context: bool,
    ) -> LdSignatureResult<()> {
        if includes_compatible_context(document) || includes_context(document, self.context_url())
        {
            return Ok(());
        }
        if !add_suite_context {
            return Err(LdSignatureError::MissingSuiteContext(format!(
                "The document to be signed must contain this suite's @context, \"{}\".",
                self.context_url()
            )));
        }
        add_context(document, self.context_url())
    }

    fn verify_signature(
        &self,
        key: &Key,
        message: &[u8],
        signature: &[u8],
    ) -> LdSignatureResult<bool> {
        let verifying_key = VerifyingKey::from_sec1_bytes(key.key()).map_err(|err| {
            LdSignatureError::InvalidVerificationMethod(format!(
                "not a secp256k1 public key: {err}"
            ))
        })?;
        let Ok(signature) = Signature::from_slice(signature) else {
            log::debug!("Malformed ES256K signature of {} bytes", signature.len());
            return Ok(false);
        };
        Ok(verifying_key.verify(message, &signature).is_ok())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    const DID_V1: &str = "https://www.w3.org/ns/did/v1";

    fn verification_method(context: Value) -> Value {
        json!({
            "@context": context,
            "id": "did:polygon:testnet:0x7E5F4552091A69125d5DfCb7b8C2659029395Bdf#key-1",
            "type": ECDSA_SECP256K1_VERIFICATION_KEY_2019,
            "controller": "did:polygon:testnet:0x7E5F4552091A69125d5DfCb7b8C2659029395Bdf",
            "publicKeyBase58": "jesTu2BpszP8DKSoi1R5G6ggjHrsrVnboLdx6V47vkoR"
        })
    }

    #[test]
    fn compatible_context_rules() {
        let doc = |contexts: &[&str]| json!({ "@context": contexts });
        assert!(includes_compatible_context(&doc(&[SECP256K1_2019_V1])));
        assert!(includes_compatible_context(&doc(&[CREDENTIALS_V1])));
        assert!(includes_compatible_context(&doc(&[SECURITY_V2])));
        assert!(includes_compatible_context(&doc(&[CREDENTIALS_V1, SECURITY_V2])));
        assert!(!includes_compatible_context(&doc(&[SECP256K1_2019_V1, CREDENTIALS_V1])));
        assert!(!includes_compatible_context(&doc(&[SECP256K1_2019_V1, SECURITY_V2])));
        assert!(!includes_compatible_context(&doc(&[DID_V1])));
    }

    #[test]
    fn accepts_polygon_verification_method() {
        EcdsaSecp256k1Signature2019
            .assert_verification_method(&verification_method(json!([DID_V1, SECP256K1_2019_V1])))
            .unwrap();
    }

    #[test]
    fn rejects_incompatible_context() {
        let err = EcdsaSecp256k1Signature2019
            .assert_verification_method(&verification_method(json!([DID_V1])))
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "The '@context' of the verification method (key) MUST contain the context url \
             \"https://w3id.org/security/suites/secp256k1-2019/v1\"."
        );
    }

    #[test]
    fn rejects_other_key_types() {
        let mut method = verification_method(json!([DID_V1, SECP256K1_2019_V1]));
        method["type"] = json!("Ed25519VerificationKey2018");
        let err = EcdsaSecp256k1Signature2019
            .assert_verification_method(&method)
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Unsupported verification method type 'Ed25519VerificationKey2018'. Verification \
             method type MUST be 'EcdsaSecp256k1VerificationKey2019'."
        );
    }

    #[test]
    fn secp256k1_key_needs_secp256k1_context() {
        let err = EcdsaSecp256k1Signature2019
            .assert_verification_method(&verification_method(json!([SECURITY_V2])))
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "For verification method type 'EcdsaSecp256k1VerificationKey2019' the '@context' \
             MUST contain the context url \"https://w3id.org/security/suites/secp256k1-2019/v1\"."
        );
    }

    #[test]
    fn rejects_revoked_method() {
        let mut method = verification_method(json!([SECP256K1_2019_V1]));
        method["revoked"] = json!("2024-01-01T00:00:00Z");
        assert!(matches!(
            EcdsaSecp256k1Signature2019.assert_verification_method(&method),
            Err(LdSignatureError::VerificationMethodRevoked)
        ));
    }

    #[test]
    fn ensure_suite_context_accepts_credentials_context() {
        let mut credential = json!({ "@context": [CREDENTIALS_V1] });
        EcdsaSecp256k1Signature2019
            .ensure_suite_context(&mut credential, false)
            .unwrap();
        assert_eq!(credential["@context"], json!([CREDENTIALS_V1]));
    }

    #[test]
    fn ensure_suite_context_adds_or_fails() {
        let mut document = json!({ "@context": [DID_V1] });
        assert!(EcdsaSecp256k1Signature2019
            .ensure_suite_context(&mut document, false)
            .is_err());
        EcdsaSecp256k1Signature2019
            .ensure_suite_context(&mut document, true)
            .unwrap();
        assert_eq!(document["@context"], json!([DID_V1, SECP256K1_2019_V1]));
    }

    #[test]
    fn identity() {
        let suite = EcdsaSecp256k1Signature2019::new();
        assert_eq!(suite.proof_type(), "EcdsaSecp256k1Signature2019");
        assert_eq!(suite.algorithm(), "EcDSA");
        assert_eq!(suite.jws_algorithm(), "ES256K");
        assert_eq!(suite.required_key_type(), "EcdsaSecp256k1VerificationKey2019");
    }
}
