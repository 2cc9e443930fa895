use async_trait::async_trait;
use public_key::{Key, KeyType};

use crate::errors::error::{WalletError, WalletResult};

#[async_trait]
pub trait KeyWallet {
    /// Stores a keypair and returns its public half. A fresh secret is generated when none is
    /// given; otherwise the supplied secret is imported.
    async fn create_key(&self, key_type: KeyType, secret: Option<&[u8]>) -> WalletResult<Key>;

    async fn key_count(&self) -> WalletResult<usize>;

    /// Raw secret material for `key`. Wallets backed by non-exportable storage keep the default.
    async fn export_secret(&self, key: &Key) -> WalletResult<Vec<u8>> {
        Err(WalletError::Unimplemented(format!(
            "secret export is not supported by this wallet (key {})",
            key.base58()
        )))
    }

    async fn sign(&self, key: &Key, msg: &[u8]) -> WalletResult<Vec<u8>>;

    async fn verify(&self, key: &Key, msg: &[u8], signature: &[u8]) -> WalletResult<bool>;
}
