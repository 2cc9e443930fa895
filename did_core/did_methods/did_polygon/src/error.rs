use agent_wallet::errors::error::WalletError;
use thiserror::Error;

pub type DidPolygonResult<T> = Result<T, DidPolygonError>;

#[derive(Error, Debug)]
#[non_exhaustive]
pub enum DidPolygonError {
    #[error("Invalid DID: {0}")]
    InvalidDid(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Invalid public key: {0}")]
    InvalidPublicKey(String),
    #[error("Invalid private key provided")]
    InvalidPrivateKey,
    #[error("Ledger config not found")]
    LedgerConfigNotFound,
    #[error("Schema registry not configured. Please check your configuration")]
    SchemaRegistryNotConfigured,
    #[error("DidRecord not found")]
    DidRecordNotFound(String),
    #[error("VerificationMethod not found cannot get public key")]
    VerificationMethodNotFound(String),
    #[error("Public Key not found in wallet")]
    PublicKeyNotFound(String),
    #[error("Incorrect wallet type: {0}")]
    IncorrectWalletType(String),
    #[error("Key not found in wallet")]
    KeyNotFound(String),
    #[error("Schema creation failed for did: {did} and schema: {schema_name}")]
    SchemaCreationFailed { did: String, schema_name: String },
    #[error("Schema not found for did: {did} and schemaId: {schema_id}")]
    SchemaNotFound { did: String, schema_id: String },
    #[error("Unsupported operation: {0}")]
    UnsupportedOperation(String),
    #[error("Ledger error: {0}")]
    LedgerError(String),
    #[error("File server error: {0}")]
    FileServerError(#[from] reqwest::Error),
    #[error("Wallet error: {0}")]
    WalletError(WalletError),
    #[error("Public key error: {0}")]
    PublicKeyError(#[from] public_key::PublicKeyError),
    #[error("Serde error: {0}")]
    SerdeError(#[from] serde_json::Error),
    #[error(transparent)]
    Other(#[from] Box<dyn std::error::Error + Send + Sync + 'static>),
}

impl DidPolygonError {
    pub fn ledger(err: impl std::fmt::Display) -> Self {
        Self::LedgerError(err.to_string())
    }
}

impl From<WalletError> for DidPolygonError {
    fn from(error: WalletError) -> Self {
        match error {
            WalletError::Unimplemented(reason) => DidPolygonError::IncorrectWalletType(format!(
                "Polygon module needs a wallet that can export secp256k1 keys ({reason})"
            )),
            WalletError::KeyNotFound(key) => DidPolygonError::KeyNotFound(key),
            other => DidPolygonError::WalletError(other),
        }
    }
}
