use std::{fmt::Display, str::FromStr};

use public_key::KeyType;
use serde::{Deserialize, Serialize};

use crate::error::DidDocumentBuilderError;

/// Verification method types; anything unrecognised is carried verbatim in `Other`.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Hash)]
#[serde(from = "String", into = "String")]
pub enum VerificationMethodType {
    /// https://w3id.org/security/suites/jws-2020/v1
    JsonWebKey2020,
    /// https://w3id.org/security/suites/secp256k1-2019/v1
    EcdsaSecp256k1VerificationKey2019,
    EcdsaSecp256k1RecoveryMethod2020,
    /// https://w3id.org/security/suites/ed25519-2018/v1
    Ed25519VerificationKey2018,
    Ed25519VerificationKey2020,
    /// https://ns.did.ai/suites/x25519-2019/v1/
    X25519KeyAgreementKey2019,
    X25519KeyAgreementKey2020,
    /// https://w3id.org/security/multikey/v1
    Multikey,
    Other(String),
}

impl VerificationMethodType {
    pub fn as_str(&self) -> &str {
        match self {
            VerificationMethodType::JsonWebKey2020 => "JsonWebKey2020",
            VerificationMethodType::EcdsaSecp256k1VerificationKey2019 => {
                "EcdsaSecp256k1VerificationKey2019"
            }
            VerificationMethodType::EcdsaSecp256k1RecoveryMethod2020 => {
                "EcdsaSecp256k1RecoveryMethod2020"
            }
            VerificationMethodType::Ed25519VerificationKey2018 => "Ed25519VerificationKey2018",
            VerificationMethodType::Ed25519VerificationKey2020 => "Ed25519VerificationKey2020",
            VerificationMethodType::X25519KeyAgreementKey2019 => "X25519KeyAgreementKey2019",
            VerificationMethodType::X25519KeyAgreementKey2020 => "X25519KeyAgreementKey2020",
            VerificationMethodType::Multikey => "Multikey",
            VerificationMethodType::Other(other) => other,
        }
    }
}

impl Default for VerificationMethodType {
    fn default() -> Self {
        VerificationMethodType::Other(String::new())
    }
}

impl From<String> for VerificationMethodType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "JsonWebKey2020" => VerificationMethodType::JsonWebKey2020,
            "EcdsaSecp256k1VerificationKey2019" => {
                VerificationMethodType::EcdsaSecp256k1VerificationKey2019
            }
            "EcdsaSecp256k1RecoveryMethod2020" => {
                VerificationMethodType::EcdsaSecp256k1RecoveryMethod2020
            }
            "Ed25519VerificationKey2018" => VerificationMethodType::Ed25519VerificationKey2018,
            "Ed25519VerificationKey2020" => VerificationMethodType::Ed25519VerificationKey2020,
            "X25519KeyAgreementKey2019" => VerificationMethodType::X25519KeyAgreementKey2019,
            "X25519KeyAgreementKey2020" => VerificationMethodType::X25519KeyAgreementKey2020,
            "Multikey" => VerificationMethodType::Multikey,
            _ => VerificationMethodType::Other(value),
        }
    }
}

impl From<VerificationMethodType> for String {
    fn from(value: VerificationMethodType) -> Self {
        value.as_str().to_string()
    }
}

impl FromStr for VerificationMethodType {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(s.to_string().into())
    }
}

impl Display for VerificationMethodType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl TryFrom<&VerificationMethodType> for KeyType {
    type Error = DidDocumentBuilderError;

    fn try_from(value: &VerificationMethodType) -> Result<Self, Self::Error> {
        match value {
            VerificationMethodType::EcdsaSecp256k1VerificationKey2019
            | VerificationMethodType::EcdsaSecp256k1RecoveryMethod2020 => Ok(KeyType::K256),
            VerificationMethodType::Ed25519VerificationKey2018
            | VerificationMethodType::Ed25519VerificationKey2020 => Ok(KeyType::Ed25519),
            VerificationMethodType::X25519KeyAgreementKey2019
            | VerificationMethodType::X25519KeyAgreementKey2020 => Ok(KeyType::X25519),
            _ => Err(DidDocumentBuilderError::UnsupportedVerificationMethodType(
                value.clone(),
            )),
        }
    }
}
