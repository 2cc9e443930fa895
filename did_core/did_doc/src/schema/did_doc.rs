use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{
    context,
    service::Service,
    utils::OneOrList,
    verification_method::{VerificationMethod, VerificationMethodKind},
};

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Default)]
#[serde(default)]
#[serde(rename_all = "camelCase")]
pub struct DidDocument {
    #[serde(rename = "@context")]
    #[serde(skip_serializing_if = "OneOrList::is_empty")]
    context: OneOrList<String>,
    id: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    also_known_as: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    controller: Option<OneOrList<String>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    verification_method: Vec<VerificationMethod>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    authentication: Vec<VerificationMethodKind>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    assertion_method: Vec<VerificationMethodKind>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    key_agreement: Vec<VerificationMethodKind>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    capability_invocation: Vec<VerificationMethodKind>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    capability_delegation: Vec<VerificationMethodKind>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    service: Vec<Service>,
    #[serde(skip_serializing_if = "HashMap::is_empty")]
    #[serde(flatten)]
    extra: HashMap<String, Value>,
}

impl DidDocument {
    pub fn builder(id: String) -> DidDocumentBuilder {
        DidDocumentBuilder::new(id)
    }

    pub fn context(&self) -> &OneOrList<String> {
        &self.context
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn also_known_as(&self) -> &[String] {
        self.also_known_as.as_ref()
    }

    pub fn controller(&self) -> Option<&OneOrList<String>> {
        self.controller.as_ref()
    }

    pub fn verification_method(&self) -> &[VerificationMethod] {
        self.verification_method.as_ref()
    }

    pub fn authentication(&self) -> &[VerificationMethodKind] {
        self.authentication.as_ref()
    }

    pub fn assertion_method(&self) -> &[VerificationMethodKind] {
        self.assertion_method.as_ref()
    }

    pub fn key_agreement(&self) -> &[VerificationMethodKind] {
        self.key_agreement.as_ref()
    }

    pub fn capability_invocation(&self) -> &[VerificationMethodKind] {
        self.capability_invocation.as_ref()
    }

    pub fn capability_delegation(&self) -> &[VerificationMethodKind] {
        self.capability_delegation.as_ref()
    }

    pub fn service(&self) -> &[Service] {
        self.service.as_ref()
    }

    pub fn extra_field(&self, key: &str) -> Option<&Value> {
        self.extra.get(key)
    }

    /// Finds a verification method by absolute id, or by fragment for relative references.
    pub fn dereference_key(&self, reference: &str) -> Option<&VerificationMethod> {
        let fragment = |id: &str| id.rsplit_once('#').map(|(_, f)| f.to_string());
        let wanted = fragment(reference);
        self.verification_method
            .iter()
            .chain(self.embedded_methods())
            .find(|vm| vm.id() == reference || (wanted.is_some() && fragment(vm.id()) == wanted))
    }

    fn embedded_methods(&self) -> impl Iterator<Item = &VerificationMethod> {
        self.authentication
            .iter()
            .chain(self.assertion_method.iter())
            .chain(self.key_agreement.iter())
            .chain(self.capability_invocation.iter())
            .chain(self.capability_delegation.iter())
            .filter_map(|kind| match kind {
                VerificationMethodKind::Resolved(vm) => Some(vm),
                VerificationMethodKind::Resolvable(_) => None,
            })
    }
}

#[derive(Default, Debug)]
pub struct DidDocumentBuilder {
    context: Vec<String>,
    id: String,
    also_known_as: Vec<String>,
    controller: Vec<String>,
    verification_method: Vec<VerificationMethod>,
    authentication: Vec<VerificationMethodKind>,
    assertion_method: Vec<VerificationMethodKind>,
    key_agreement: Vec<VerificationMethodKind>,
    capability_invocation: Vec<VerificationMethodKind>,
    capability_delegation: Vec<VerificationMethodKind>,
    service: Vec<Service>,
    extra: HashMap<String, Value>,
}

impl DidDocumentBuilder {
    /// Starts a document carrying the DID v1 context.
    pub fn new(id: String) -> Self {
        Self {
            context: vec![context::DID_V1.to_string()],
            id,
            ..Default::default()
        }
    }

    pub fn add_context(mut self, context: String) -> Self {
        if !self.context.contains(&context) {
            self.context.push(context);
        }
        self
    }

    pub fn add_also_known_as(mut self, also_known_as: String) -> Self {
        self.also_known_as.push(also_known_as);
        self
    }

    pub fn add_controller(mut self, controller: String) -> Self {
        self.controller.push(controller);
        self
    }

    pub fn add_verification_method(mut self, verification_method: VerificationMethod) -> Self {
        self.verification_method.push(verification_method);
        self
    }

    pub fn add_authentication_reference(mut self, reference: String) -> Self {
        self.authentication
            .push(VerificationMethodKind::Resolvable(reference));
        self
    }

    pub fn add_assertion_method_reference(mut self, reference: String) -> Self {
        self.assertion_method
            .push(VerificationMethodKind::Resolvable(reference));
        self
    }

    pub fn add_key_agreement_reference(mut self, reference: String) -> Self {
        self.key_agreement
            .push(VerificationMethodKind::Resolvable(reference));
        self
    }

    pub fn add_capability_invocation_reference(mut self, reference: String) -> Self {
        self.capability_invocation
            .push(VerificationMethodKind::Resolvable(reference));
        self
    }

    pub fn add_capability_delegation_reference(mut self, reference: String) -> Self {
        self.capability_delegation
            .push(VerificationMethodKind::Resolvable(reference));
        self
    }

    pub fn add_service(mut self, service: Service) -> Self {
        self.service.push(service);
        self
    }

    pub fn add_extra_field(mut self, key: String, value: Value) -> Self {
        self.extra.insert(key, value);
        self
    }

    pub fn build(self) -> DidDocument {
        let controller = if self.controller.is_empty() {
            None
        } else {
            Some(OneOrList::from(self.controller))
        };
        DidDocument {
            context: OneOrList::from(self.context),
            id: self.id,
            also_known_as: self.also_known_as,
            controller,
            verification_method: self.verification_method,
            authentication: self.authentication,
            assertion_method: self.assertion_method,
            key_agreement: self.key_agreement,
            capability_invocation: self.capability_invocation,
            capability_delegation: self.capability_delegation,
            service: self.service,
            extra: self.extra,
        }
    }
}

impl From<DidDocument> for DidDocumentBuilder {
    fn from(did_document: DidDocument) -> Self {
        let controller = did_document
            .controller
            .map(|c| c.iter().cloned().collect())
            .unwrap_or_default();

        Self {
            context: did_document.context.iter().cloned().collect(),
            id: did_document.id,
            also_known_as: did_document.also_known_as,
            controller,
            verification_method: did_document.verification_method,
            authentication: did_document.authentication,
            assertion_method: did_document.assertion_method,
            key_agreement: did_document.key_agreement,
            capability_invocation: did_document.capability_invocation,
            capability_delegation: did_document.capability_delegation,
            service: did_document.service,
            extra: did_document.extra,
        }
    }
}
