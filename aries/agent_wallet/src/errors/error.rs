use std::fmt;

use thiserror::Error as ThisError;

use crate::wallet::base_wallet::record_category::RecordCategory;

pub type WalletResult<T> = Result<T, WalletError>;

pub struct NotFoundInfo(Option<(RecordCategory, String)>);

impl NotFoundInfo {
    pub fn new(category: RecordCategory, name: &str) -> Self {
        Self(Some((category, name.to_string())))
    }

    pub fn new_without_details() -> Self {
        Self(None)
    }
}

impl fmt::Debug for NotFoundInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.0 {
            None => write!(f, "no details provided"),
            Some(payload) => write!(f, "category: {}, name: {}", payload.0, payload.1),
        }
    }
}

impl fmt::Display for NotFoundInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

#[derive(Debug, ThisError)]
pub enum WalletError {
    #[error("Duplicate record error: {0}")]
    DuplicateRecord(String),
    #[error("Could not find record in wallet: {0}")]
    RecordNotFound(NotFoundInfo),
    #[error("Could not find key in wallet: {0}")]
    KeyNotFound(String),
    #[error("Unknown record category: {0}")]
    UnknownRecordCategory(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("Public key error: {0}")]
    PublicKeyError(#[from] public_key::PublicKeyError),
    #[error("Crypto error: {0}")]
    CryptoError(#[from] k256::ecdsa::Error),
    #[error("Unimplemented: {0}")]
    Unimplemented(String),
    #[error("Unknown error: {0}")]
    Unknown(Box<dyn std::error::Error + Send + Sync>),
}

impl WalletError {
    pub fn unknown_error(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Unknown(Box::new(err))
    }

    pub fn record_not_found(category: RecordCategory, name: &str) -> Self {
        Self::RecordNotFound(NotFoundInfo::new(category, name))
    }
}
