use thiserror::Error;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum DidResolverRegistryError {
    #[error("Invalid DID: {0}")]
    InvalidDid(String),
    #[error("Unsupported DID method: {0}")]
    UnsupportedMethod(String),
}
