mod verification_method_kind;
mod verification_method_type;

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use public_key::{Key, KeyType};
use serde::{Deserialize, Serialize};
use serde_json::Value;
pub use verification_method_kind::VerificationMethodKind;
pub use verification_method_type::VerificationMethodType;

use crate::error::DidDocumentBuilderError;

/// A verification method. Fields default when absent so that incomplete methods can be
/// deserialized and reported on rather than rejected outright.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Default)]
#[serde(default)]
#[serde(rename_all = "camelCase")]
pub struct VerificationMethod {
    id: String,
    controller: String,
    #[serde(rename = "type")]
    verification_method_type: VerificationMethodType,
    #[serde(skip_serializing_if = "Option::is_none")]
    public_key_base58: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    public_key_multibase: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    public_key_hex: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    public_key_jwk: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    revoked: Option<Value>,
}

impl VerificationMethod {
    pub fn builder(
        id: String,
        controller: String,
        verification_method_type: VerificationMethodType,
    ) -> VerificationMethodBuilder {
        VerificationMethodBuilder {
            method: VerificationMethod {
                id,
                controller,
                verification_method_type,
                ..Default::default()
            },
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn controller(&self) -> &str {
        &self.controller
    }

    pub fn verification_method_type(&self) -> &VerificationMethodType {
        &self.verification_method_type
    }

    pub fn public_key_base58(&self) -> Option<&str> {
        self.public_key_base58.as_deref()
    }

    pub fn public_key_multibase(&self) -> Option<&str> {
        self.public_key_multibase.as_deref()
    }

    pub fn public_key_hex(&self) -> Option<&str> {
        self.public_key_hex.as_deref()
    }

    pub fn public_key_jwk(&self) -> Option<&Value> {
        self.public_key_jwk.as_ref()
    }

    pub fn has_public_key(&self) -> bool {
        self.public_key_base58.is_some()
            || self.public_key_multibase.is_some()
            || self.public_key_hex.is_some()
            || self.public_key_jwk.is_some()
    }

    /// Any `revoked` value marks the method revoked.
    pub fn is_revoked(&self) -> bool {
        self.revoked.is_some()
    }

    pub fn key_decoded(&self) -> Result<Vec<u8>, DidDocumentBuilderError> {
        if let Some(base58) = &self.public_key_base58 {
            return Ok(bs58::decode(base58).into_vec()?);
        }
        if let Some(multibase) = &self.public_key_multibase {
            let (_, bytes) = multibase::decode(multibase)?;
            return Ok(bytes);
        }
        if let Some(hex) = &self.public_key_hex {
            return Ok(hex::decode(hex.trim_start_matches("0x"))?);
        }
        if let Some(jwk) = &self.public_key_jwk {
            return decode_ec_jwk(jwk);
        }
        Err(DidDocumentBuilderError::MissingField("publicKey"))
    }

    pub fn public_key(&self) -> Result<Key, DidDocumentBuilderError> {
        let key_type = KeyType::try_from(&self.verification_method_type)?;
        Ok(Key::new(self.key_decoded()?, key_type)?)
    }
}

// Uncompressed SEC1 point from an EC JWK's affine coordinates.
fn decode_ec_jwk(jwk: &Value) -> Result<Vec<u8>, DidDocumentBuilderError> {
    let coordinate = |name: &'static str| -> Result<Vec<u8>, DidDocumentBuilderError> {
        let encoded = jwk
            .get(name)
            .and_then(Value::as_str)
            .ok_or(DidDocumentBuilderError::MissingField(name))?;
        Ok(URL_SAFE_NO_PAD.decode(encoded)?)
    };
    let mut point = vec![0x04];
    point.extend(coordinate("x")?);
    point.extend(coordinate("y")?);
    Ok(point)
}

#[derive(Debug, Clone)]
pub struct VerificationMethodBuilder {
    method: VerificationMethod,
}

impl VerificationMethodBuilder {
    pub fn add_public_key_base58(mut self, public_key_base58: String) -> Self {
        self.method.public_key_base58 = Some(public_key_base58);
        self
    }

    pub fn add_public_key_multibase(mut self, public_key_multibase: String) -> Self {
        self.method.public_key_multibase = Some(public_key_multibase);
        self
    }

    pub fn add_public_key_hex(mut self, public_key_hex: String) -> Self {
        self.method.public_key_hex = Some(public_key_hex);
        self
    }

    pub fn add_public_key_jwk(mut self, public_key_jwk: Value) -> Self {
        self.method.public_key_jwk = Some(public_key_jwk);
        self
    }

    pub fn build(self) -> VerificationMethod {
        self.method
    }
}
