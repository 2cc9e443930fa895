use thiserror::Error;

use crate::schema::verification_method::VerificationMethodType;

#[derive(Debug, Error)]
pub enum DidDocumentBuilderError {
    #[error("Missing field: {0}")]
    MissingField(&'static str),
    #[error("Unsupported verification method type: {0}")]
    UnsupportedVerificationMethodType(VerificationMethodType),
    #[error("Failed to decode public key: {0}")]
    KeyDecodingError(String),
    #[error("Public key error: {0}")]
    PublicKeyError(#[from] public_key::PublicKeyError),
    #[error("Serde JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl From<bs58::decode::Error> for DidDocumentBuilderError {
    fn from(error: bs58::decode::Error) -> Self {
        Self::KeyDecodingError(format!("Failed to decode base58: {error}"))
    }
}

impl From<hex::FromHexError> for DidDocumentBuilderError {
    fn from(error: hex::FromHexError) -> Self {
        Self::KeyDecodingError(format!("Failed to decode hex value: {error}"))
    }
}

impl From<base64::DecodeError> for DidDocumentBuilderError {
    fn from(error: base64::DecodeError) -> Self {
        Self::KeyDecodingError(format!("Failed to decode base64: {error}"))
    }
}

impl From<multibase::Error> for DidDocumentBuilderError {
    fn from(error: multibase::Error) -> Self {
        Self::KeyDecodingError(format!("Failed to decode multibase value: {error}"))
    }
}
