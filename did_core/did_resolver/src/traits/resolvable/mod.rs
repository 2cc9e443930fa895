pub mod resolution_error;
pub mod resolution_metadata;
pub mod resolution_options;
pub mod resolution_output;

use async_trait::async_trait;

use self::{resolution_options::DidResolutionOptions, resolution_output::DidResolutionOutput};
use crate::error::GenericError;

#[async_trait]
pub trait DidResolvable: Send + Sync {
    /// DID methods this resolver answers for, without the `did:` prefix.
    fn supported_methods(&self) -> Vec<String>;

    fn allows_caching(&self) -> bool {
        false
    }

    async fn resolve(
        &self,
        did: &str,
        options: &DidResolutionOptions,
    ) -> Result<DidResolutionOutput, GenericError>;
}
