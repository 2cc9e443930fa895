use agent_wallet::errors::error::WalletError;
use did_resolver::did_doc::error::DidDocumentBuilderError;
use public_key::PublicKeyError;
use thiserror::Error;

pub type LdSignatureResult<T> = Result<T, LdSignatureError>;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LdSignatureError {
    #[error("No signature suite registered for proof type {0}")]
    UnsupportedProofType(String),
    /// The verification method's `@context` does not fit the suite.
    #[error("{0}")]
    IncompatibleContext(String),
    #[error("{0}")]
    InvalidVerificationMethod(String),
    #[error("The verification method has been revoked.")]
    VerificationMethodRevoked,
    #[error("Unable to dereference verification method {id}: {reason}")]
    VerificationMethodNotFound { id: String, reason: String },
    #[error("{0}")]
    MissingSuiteContext(String),
    #[error("Invalid document: {0}")]
    InvalidDocument(String),
    #[error("Invalid proof: {0}")]
    InvalidProof(String),
    #[error("Invalid JWS: {0}")]
    InvalidJws(String),
    #[error("Wallet error: {0}")]
    WalletError(#[from] WalletError),
    #[error("Public key error: {0}")]
    PublicKeyError(#[from] PublicKeyError),
    #[error("DID document error: {0}")]
    DidDocumentError(#[from] DidDocumentBuilderError),
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("Base64 decoding error: {0}")]
    Base64Error(#[from] base64::DecodeError),
    #[error(transparent)]
    Other(#[from] Box<dyn std::error::Error + Send + Sync + 'static>),
}
