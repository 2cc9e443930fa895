//! Construction and validation of `did:polygon` identifiers and documents.

use did_resolver::did_doc::schema::{
    context,
    did_doc::DidDocument,
    service::{Service, LINKED_DOMAINS},
    utils::OneOrList,
    verification_method::{VerificationMethod, VerificationMethodType},
};
use ethers::{
    types::Address,
    utils::{public_key_to_address, to_checksum},
};
use k256::ecdsa::VerifyingKey;
use once_cell::sync::Lazy;
use public_key::Key;
use regex::Regex;
use serde_json::Value;

use crate::error::{DidPolygonError, DidPolygonResult};

static POLYGON_DID_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^did:polygon(:testnet)?:0x[0-9a-fA-F]{40}$")
        .expect("polygon DID pattern is a valid regex")
});

pub const MAINNET: &str = "mainnet";

/// Builds `did:<method>:<address>` for mainnet and `did:<method>:<network>:<address>`
/// otherwise. `public_key_hex` is a compressed or uncompressed SEC1 secp256k1 key.
pub fn build_did(method: &str, network: &str, public_key_hex: &str) -> DidPolygonResult<String> {
    let address = to_checksum(&address_from_public_key_hex(public_key_hex)?, None);
    Ok(if network == MAINNET {
        format!("did:{method}:{address}")
    } else {
        format!("did:{method}:{network}:{address}")
    })
}

fn address_from_public_key_hex(public_key_hex: &str) -> DidPolygonResult<Address> {
    let bytes = hex::decode(public_key_hex.trim_start_matches("0x"))
        .map_err(|err| DidPolygonError::InvalidPublicKey(err.to_string()))?;
    let verifying_key = VerifyingKey::from_sec1_bytes(&bytes)
        .map_err(|err| DidPolygonError::InvalidPublicKey(err.to_string()))?;
    Ok(public_key_to_address(&verifying_key))
}

pub fn is_valid_polygon_did(did: &str) -> bool {
    POLYGON_DID_REGEX.is_match(did)
}

/// The account address a DID is keyed under in the registry contract.
pub fn polygon_address_from_did(did: &str) -> DidPolygonResult<Address> {
    if !is_valid_polygon_did(did) {
        return Err(DidPolygonError::InvalidDid(did.to_string()));
    }
    did.rsplit(':')
        .next()
        .and_then(|address| address.parse().ok())
        .ok_or_else(|| DidPolygonError::InvalidDid(did.to_string()))
}

/// Returns `None` when the document is acceptable for the registry, otherwise the reason of
/// the first failing check.
pub fn validate_spec_compliant_payload(did_document: &DidDocument) -> Option<String> {
    if did_document.id().is_empty() {
        return Some("id is required".to_string());
    }
    if !did_document.id().starts_with("did:polygon:") {
        return Some("id must be a did:polygon identifier".to_string());
    }
    if did_document.verification_method().is_empty() {
        return Some("verificationMethod must be not be empty".to_string());
    }
    let invalid_method = did_document.verification_method().iter().any(|vm| {
        vm.verification_method_type() != &VerificationMethodType::EcdsaSecp256k1VerificationKey2019
            || !vm.has_public_key()
            || vm.controller().is_empty()
            || vm.id().is_empty()
    });
    if invalid_method {
        return Some("verificationMethod is Invalid".to_string());
    }
    if did_document.service().iter().any(|service| !service.is_complete()) {
        return Some("service is Invalid".to_string());
    }
    None
}

pub fn secp256k1_verification_method(id: String, controller: String, key: &Key) -> VerificationMethod {
    VerificationMethod::builder(
        id,
        controller,
        VerificationMethodType::EcdsaSecp256k1VerificationKey2019,
    )
    .add_public_key_base58(key.base58())
    .build()
}

/// Document for a newly created DID: one secp256k1 method `#key-1` referenced from every
/// relationship the key type allows, plus an optional `LinkedDomains` service.
pub fn secp256k1_did_doc(did: &str, key: &Key, service_endpoint: Option<&str>) -> DidDocument {
    let key_id = format!("{did}#key-1");
    let mut builder = DidDocument::builder(did.to_string())
        .add_context(context::SECP256K1_2019_V1.to_string())
        .add_verification_method(secp256k1_verification_method(
            key_id.clone(),
            did.to_string(),
            key,
        ));

    if let Some(endpoint) = service_endpoint {
        builder = builder.add_service(Service::new(
            format!("{did}#linked-domain"),
            Value::String(endpoint.to_string()),
            OneOrList::One(LINKED_DOMAINS.to_string()),
            Default::default(),
        ));
    }

    if key.key_type().supports_signing() {
        builder = builder
            .add_authentication_reference(key_id.clone())
            .add_assertion_method_reference(key_id.clone())
            .add_capability_delegation_reference(key_id.clone())
            .add_capability_invocation_reference(key_id.clone());
    }
    if key.key_type().supports_encrypting() {
        builder = builder.add_key_agreement_reference(key_id);
    }

    builder.build()
}
