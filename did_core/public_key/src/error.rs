use thiserror::Error;

use crate::KeyType;

#[derive(Debug, Error)]
pub enum PublicKeyError {
    #[error("Base 58 decoding error")]
    Base58DecodingError(#[from] bs58::decode::Error),
    #[error("Hex decoding error")]
    HexDecodingError(#[from] hex::FromHexError),
    #[error("Unsupported key type: {0}")]
    UnsupportedKeyType(String),
    #[error("Invalid KeyType {0}, expected KeyType: {1}")]
    InvalidKeyType(KeyType, KeyType),
    #[error("Invalid key length {0} for key type {1}")]
    InvalidKeyLength(usize, KeyType),
}
