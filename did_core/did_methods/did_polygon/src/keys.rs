use agent_wallet::wallet::{base_wallet::BaseWallet, did_record::DidRepository};
use k256::ecdsa::SigningKey;
use public_key::{Key, KeyType};

use crate::error::{DidPolygonError, DidPolygonResult};

/// Public key of a locally created DID, taken from the first verification method of the
/// stored document.
pub async fn public_key_from_did(
    did_repository: &DidRepository,
    did: &str,
) -> DidPolygonResult<Key> {
    let did_record = did_repository
        .find_created_did(did)
        .await?
        .ok_or_else(|| DidPolygonError::DidRecordNotFound(did.to_string()))?;
    let verification_method = did_record
        .did_document()
        .and_then(|doc| doc.verification_method().first())
        .ok_or_else(|| DidPolygonError::VerificationMethodNotFound(did.to_string()))?;
    let public_key_base58 = verification_method
        .public_key_base58()
        .ok_or_else(|| DidPolygonError::PublicKeyNotFound(did.to_string()))?;
    Ok(Key::from_base58(public_key_base58, KeyType::K256)?)
}

/// Re-derives the secp256k1 signing key for `key` from the material the wallet stores.
pub async fn signing_key(wallet: &dyn BaseWallet, key: &Key) -> DidPolygonResult<SigningKey> {
    key.validate_key_type(KeyType::K256)?;
    let secret = wallet.export_secret(key).await?;
    parse_private_key(&secret)
}

/// Checks that `secret` is a usable secp256k1 private key.
pub fn parse_private_key(secret: &[u8]) -> DidPolygonResult<SigningKey> {
    SigningKey::from_slice(secret).map_err(|_| DidPolygonError::InvalidPrivateKey)
}
