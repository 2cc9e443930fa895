use std::fmt::Display;

use serde::{Deserialize, Serialize};

use super::KeyType;
use crate::error::PublicKeyError;

/// Represents raw public key data along with information about the key type
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Key {
    key_type: KeyType,
    key: Vec<u8>,
}

impl Key {
    pub fn new(key: Vec<u8>, key_type: KeyType) -> Result<Self, PublicKeyError> {
        if !key_type.public_key_lengths().contains(&key.len()) {
            return Err(PublicKeyError::InvalidKeyLength(key.len(), key_type));
        }
        Ok(Self { key_type, key })
    }

    pub fn key_type(&self) -> &KeyType {
        &self.key_type
    }

    pub fn validate_key_type(&self, key_type: KeyType) -> Result<&Self, PublicKeyError> {
        if self.key_type() != &key_type {
            return Err(PublicKeyError::InvalidKeyType(
                self.key_type().to_owned(),
                key_type,
            ));
        }
        Ok(self)
    }

    pub fn key(&self) -> &[u8] {
        self.key.as_ref()
    }

    pub fn base58(&self) -> String {
        bs58::encode(&self.key).into_string()
    }

    pub fn hex(&self) -> String {
        hex::encode(&self.key)
    }

    pub fn from_base58(base58: &str, key_type: KeyType) -> Result<Self, PublicKeyError> {
        let decoded_bytes = bs58::decode(base58).into_vec()?;
        Self::new(decoded_bytes, key_type)
    }

    pub fn from_hex(hex: &str, key_type: KeyType) -> Result<Self, PublicKeyError> {
        let decoded_bytes = hex::decode(hex.trim_start_matches("0x"))?;
        Self::new(decoded_bytes, key_type)
    }
}

impl Display for Key {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.base58())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // compressed secp256k1 public key of private key 0x01
    const K256_COMPRESSED_HEX: &str =
        "0279be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798";

    #[test]
    fn new_key_test() {
        let key_bytes = hex::decode(K256_COMPRESSED_HEX).unwrap();
        let key = Key::new(key_bytes.clone(), KeyType::K256).unwrap();
        assert_eq!(key.key_type(), &KeyType::K256);
        assert_eq!(key.key(), key_bytes.as_slice());
    }

    #[test]
    fn rejects_wrong_length() {
        let err = Key::new(vec![1u8; 20], KeyType::K256).unwrap_err();
        assert!(matches!(err, PublicKeyError::InvalidKeyLength(20, KeyType::K256)));
    }

    #[test]
    fn base58_and_hex_are_consistent() {
        let key = Key::from_hex(K256_COMPRESSED_HEX, KeyType::K256).unwrap();
        let from_base58 = Key::from_base58(&key.base58(), KeyType::K256).unwrap();
        assert_eq!(key, from_base58);
        assert_eq!(from_base58.hex(), K256_COMPRESSED_HEX);
        assert_eq!(key.to_string(), key.base58());
    }

    #[test]
    fn validate_key_type_test() {
        let key = Key::from_hex(K256_COMPRESSED_HEX, KeyType::K256).unwrap();
        assert!(key.validate_key_type(KeyType::K256).is_ok());
        assert!(key.validate_key_type(KeyType::P256).is_err());
    }
}
