use agent_wallet::wallet::base_wallet::BaseWallet;
use async_trait::async_trait;
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use public_key::Key;
use serde_json::{json, Value};
use sha2::{Digest, Sha256};

use crate::{
    error::{LdSignatureError, LdSignatureResult},
    jsonld::{add_context, canonicalize, includes_context},
    proof::Proof,
};

/// Signature suite producing detached, unencoded-payload JWS proofs (RFC 7797).
///
/// Implementors describe themselves and verify raw signatures; hashing, JWS framing and
/// verification method checks come from the provided methods and may be overridden.
#[async_trait]
pub trait JwsLinkedDataSignature: Send + Sync {
    /// Value of the proof's `type`.
    fn proof_type(&self) -> &str;

    /// Algorithm name the suite advertises, e.g. `EcDSA`.
    fn algorithm(&self) -> &str;

    /// JWS `alg` header value.
    fn jws_algorithm(&self) -> &str;

    fn context_url(&self) -> &str;

    /// Verification method `type` this suite accepts.
    fn required_key_type(&self) -> &str;

    /// Checks a dereferenced verification method before it is used.
    fn assert_verification_method(&self, verification_method: &Value) -> LdSignatureResult<()> {
        let method_type = verification_method.get("type").and_then(Value::as_str);
        if method_type != Some(self.required_key_type()) {
            return Err(LdSignatureError::InvalidVerificationMethod(format!(
                "Unsupported verification method type '{}'. Verification method type MUST be \
                 '{}'.",
                method_type.unwrap_or_default(),
                self.required_key_type()
            )));
        }
        if is_revoked(verification_method) {
            return Err(LdSignatureError::VerificationMethodRevoked);
        }
        Ok(())
    }

    /// Makes sure the document carries the suite context, adding it when allowed.
    fn ensure_suite_context(
        &self,
        document: &mut Value,
        add_suite_context: bool,
    ) -> LdSignatureResult<()> {
        if includes_context(document, self.context_url()) {
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

    /// `sha256(canonical proof options) || sha256(canonical document without proof)`.
    fn create_verify_data(&self, document: &Value, proof: &Proof) -> LdSignatureResult<Vec<u8>> {
        let proof_options = serde_json::to_value(proof.options())?;
        let mut document = document.clone();
        if let Some(object) = document.as_object_mut() {
            object.remove("proof");
        }

        let mut verify_data = Sha256::digest(canonicalize(&proof_options)?).to_vec();
        verify_data.extend(Sha256::digest(canonicalize(&document)?));
        Ok(verify_data)
    }

    async fn sign(
        &self,
        wallet: &dyn BaseWallet,
        key: &Key,
        verify_data: &[u8],
    ) -> LdSignatureResult<String> {
        let header = encoded_header(self.jws_algorithm())?;
        let signature = wallet
            .sign(key, &signing_input(&header, verify_data))
            .await?;
        Ok(format!("{header}..{}", URL_SAFE_NO_PAD.encode(signature)))
    }

    /// Verifies a detached JWS over `verify_data`.
    async fn verify(&self, key: &Key, verify_data: &[u8], jws: &str) -> LdSignatureResult<bool> {
        let (header, signature) = split_detached_jws(jws)?;
        let decoded: Value = serde_json::from_slice(&URL_SAFE_NO_PAD.decode(header)?)?;
        if decoded.get("alg").and_then(Value::as_str) != Some(self.jws_algorithm()) {
            return Err(LdSignatureError::InvalidJws(format!(
                "expected alg {}",
                self.jws_algorithm()
            )));
        }
        if decoded.get("b64") != Some(&Value::Bool(false)) {
            return Err(LdSignatureError::InvalidJws(
                "only unencoded payloads are supported".to_string(),
            ));
        }
        let signature = URL_SAFE_NO_PAD.decode(signature)?;
        self.verify_signature(key, &signing_input(header, verify_data), &signature)
    }

    fn verify_signature(
        &self,
        key: &Key,
        message: &[u8],
        signature: &[u8],
    ) -> LdSignatureResult<bool>;
}

/// A verification method carrying a `revoked` member is revoked, whatever its value.
pub fn is_revoked(verification_method: &Value) -> bool {
    verification_method.get("revoked").is_some()
}

fn encoded_header(algorithm: &str) -> LdSignatureResult<String> {
    let header = json!({ "alg": algorithm, "b64": false, "crit": ["b64"] });
    Ok(URL_SAFE_NO_PAD.encode(serde_json::to_vec(&header)?))
}

fn signing_input(header: &str, verify_data: &[u8]) -> Vec<u8> {
    let mut input = Vec::with_capacity(header.len() + 1 + verify_data.len());
    input.extend_from_slice(header.as_bytes());
    input.push(b'.');
    input.extend_from_slice(verify_data);
    input
}

fn split_detached_jws(jws: &str) -> LdSignatureResult<(&str, &str)> {
    match jws.split('.').collect::<Vec<_>>()[..] {
        [header, "", signature] if !header.is_empty() && !signature.is_empty() => {
            Ok((header, signature))
        }
        _ => Err(LdSignatureError::InvalidJws(
            "expected a detached JWS of the form <header>..<signature>".to_string(),
        )),
    }
}
