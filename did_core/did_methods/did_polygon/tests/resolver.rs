mod common;

use std::sync::Arc;

use common::FakeLedger;
use did_polygon::{resolution::PolygonDidResolver, utils::secp256k1_did_doc};
use did_resolver::traits::resolvable::{
    resolution_error::DidResolutionError, resolution_options::DidResolutionOptions,
};
use did_resolver_registry::ResolverRegistry;
use public_key::{Key, KeyType};
use test_utils::{
    logger::init_logger,
    mockdata::keys::{PUBLIC_KEY_ONE_BASE58, TESTNET_DID_ONE},
};

fn registry(ledger: Arc<FakeLedger>) -> ResolverRegistry {
    let mut registry = ResolverRegistry::new();
    registry.register(Arc::new(PolygonDidResolver::<_, FakeLedger>::new(ledger)));
    registry
}

#[tokio::test]
async fn resolves_published_document_through_registry() {
    init_logger();
    let ledger = FakeLedger::with_balance(0);
    let key = Key::from_base58(PUBLIC_KEY_ONE_BASE58, KeyType::K256).unwrap();
    let document = secp256k1_did_doc(TESTNET_DID_ONE, &key, None);
    ledger.publish(TESTNET_DID_ONE, &document);

    let output = registry(ledger)
        .resolve(TESTNET_DID_ONE, &DidResolutionOptions::default())
        .await
        .unwrap();

    let resolved = output.did_document().unwrap();
    assert_eq!(resolved.id(), document.id());
    assert_eq!(resolved.verification_method(), document.verification_method());
    assert_eq!(resolved.authentication(), document.authentication());
    assert_eq!(resolved.assertion_method(), document.assertion_method());
    assert!(!output.is_deactivated());
}

#[tokio::test]
async fn unknown_did_resolves_to_not_found() {
    init_logger();
    let output = registry(FakeLedger::with_balance(0))
        .resolve(TESTNET_DID_ONE, &DidResolutionOptions::default())
        .await
        .unwrap();

    assert!(output.did_document().is_none());
    assert_eq!(
        output.did_resolution_metadata().error(),
        Some(&DidResolutionError::NotFound)
    );
}

#[tokio::test]
async fn malformed_did_is_an_error() {
    init_logger();
    let err = registry(FakeLedger::with_balance(0))
        .resolve(
            "did:polygon:testnet:0x7E5F4552091A69125d5DfCb7b8C2659029395",
            &DidResolutionOptions::default(),
        )
        .await
        .unwrap_err();
    assert!(err.to_string().starts_with("Invalid DID"));
}
