use serde::{Deserialize, Serialize};

use super::VerificationMethod;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(untagged)]
#[allow(clippy::large_enum_variant)]
pub enum VerificationMethodKind {
    Resolved(VerificationMethod),
    Resolvable(String),
}

impl VerificationMethodKind {
    /// Id of the embedded method, or the reference itself.
    pub fn id(&self) -> &str {
        match self {
            VerificationMethodKind::Resolved(vm) => vm.id(),
            VerificationMethodKind::Resolvable(reference) => reference,
        }
    }
}
