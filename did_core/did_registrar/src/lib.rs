pub mod registration_output;

use async_trait::async_trait;

use self::registration_output::DidRegistrationOutput;

/// Writes DIDs to a verifiable data registry. Outcomes, including failures, are reported in the
/// returned envelope rather than as errors.
#[async_trait]
pub trait DidRegistrar: Send + Sync {
    type CreateOptions: Send + Sync;
    type UpdateOptions: Send + Sync;
    type DeactivateOptions: Send + Sync;

    fn supported_methods(&self) -> Vec<String>;

    async fn create(&self, options: Self::CreateOptions) -> DidRegistrationOutput;

    async fn update(&self, options: Self::UpdateOptions) -> DidRegistrationOutput;

    async fn deactivate(&self, options: Self::DeactivateOptions) -> DidRegistrationOutput;
}
