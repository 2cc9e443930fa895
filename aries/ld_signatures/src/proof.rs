use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;

pub const ASSERTION_METHOD: &str = "assertionMethod";
pub const AUTHENTICATION: &str = "authentication";

/// A linked data proof as embedded under a document's `proof` property.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, TypedBuilder)]
#[serde(rename_all = "camelCase")]
pub struct Proof {
    #[serde(rename = "type")]
    #[builder(setter(into))]
    proof_type: String,
    #[builder(default = now(), setter(into))]
    created: String,
    #[builder(setter(into))]
    verification_method: String,
    #[builder(setter(into))]
    proof_purpose: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[builder(default, setter(strip_option, into))]
    challenge: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[builder(default, setter(into))]
    domain: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[builder(default)]
    jws: Option<String>,
}

fn now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
}

impl Proof {
    pub fn proof_type(&self) -> &str {
        &self.proof_type
    }

    pub fn created(&self) -> &str {
        &self.created
    }

    pub fn verification_method(&self) -> &str {
        &self.verification_method
    }

    pub fn proof_purpose(&self) -> &str {
        &self.proof_purpose
    }

    pub fn challenge(&self) -> Option<&str> {
        self.challenge.as_deref()
    }

    pub fn domain(&self) -> Option<&str> {
        self.domain.as_deref()
    }

    pub fn jws(&self) -> Option<&str> {
        self.jws.as_deref()
    }

    pub fn set_jws(&mut self, jws: String) {
        self.jws = Some(jws);
    }

    /// The proof minus its signature, as covered by the signature.
    pub fn options(&self) -> Proof {
        Proof {
            jws: None,
            ..self.clone()
        }
    }
}
