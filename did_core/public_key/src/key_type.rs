use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::PublicKeyError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyType {
    Ed25519,
    X25519,
    P256,
    /// secp256k1, the curve behind EVM accounts
    K256,
}

impl KeyType {
    pub fn supports_signing(&self) -> bool {
        matches!(self, KeyType::Ed25519 | KeyType::P256 | KeyType::K256)
    }

    pub fn supports_encrypting(&self) -> bool {
        matches!(self, KeyType::X25519)
    }

    /// Accepted public key lengths in bytes. secp256k1 keys may be SEC1 compressed or
    /// uncompressed.
    pub fn public_key_lengths(&self) -> &'static [usize] {
        match self {
            KeyType::Ed25519 | KeyType::X25519 => &[32],
            KeyType::P256 | KeyType::K256 => &[33, 65],
        }
    }

    pub fn private_key_length(&self) -> usize {
        32
    }
}

impl Display for KeyType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KeyType::Ed25519 => write!(f, "ed25519"),
            KeyType::X25519 => write!(f, "x25519"),
            KeyType::P256 => write!(f, "p256"),
            KeyType::K256 => write!(f, "k256"),
        }
    }
}

impl FromStr for KeyType {
    type Err = PublicKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ed25519" => Ok(KeyType::Ed25519),
            "x25519" => Ok(KeyType::X25519),
            "p256" => Ok(KeyType::P256),
            "k256" => Ok(KeyType::K256),
            other => Err(PublicKeyError::UnsupportedKeyType(other.to_string())),
        }
    }
}
