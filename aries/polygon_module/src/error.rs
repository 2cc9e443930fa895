use did_polygon::error::DidPolygonError;
use ld_signatures::error::LdSignatureError;
use thiserror::Error;

pub type PolygonModuleResult<T> = Result<T, PolygonModuleError>;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum PolygonModuleError {
    #[error("Invalid polygon module configuration: {0}")]
    InvalidConfig(#[from] serde_json::Error),
    #[error(transparent)]
    Ledger(#[from] DidPolygonError),
    #[error(transparent)]
    Signature(#[from] LdSignatureError),
}
