mod common;

use std::sync::Arc;

use agent_wallet::wallet::{
    base_wallet::{BaseWallet, KeyWallet},
    did_record::{DidRecordRole, DidRepository},
    memory::InMemoryWallet,
};
use common::{FakeLedger, PRIVATE_KEY_TWO};
use did_polygon::{
    registration::{
        options::{
            PolygonDidCreateOptions, PolygonDidDeactivateOptions, PolygonDidUpdateOptions,
            PolygonNetwork,
        },
        PolygonDidRegistrar,
    },
    utils::secp256k1_did_doc,
};
use did_registrar::{registration_output::DidOperationState, DidRegistrar};
use did_resolver::did_doc::schema::did_doc::{DidDocument, DidDocumentBuilder};
use public_key::{Key, KeyType};
use test_utils::{
    logger::init_logger,
    mock_wallet::MockWallet,
    mockdata::keys::{
        private_key_one, ADDRESS_ONE, MAINNET_DID_ONE, PUBLIC_KEY_ONE_BASE58, TESTNET_DID_ONE,
    },
};

struct Harness {
    ledger: Arc<FakeLedger>,
    wallet: Arc<dyn BaseWallet>,
    registrar: PolygonDidRegistrar<FakeLedger>,
}

fn harness(balance: u64) -> Harness {
    init_logger();
    let ledger = FakeLedger::with_balance(balance);
    let wallet: Arc<dyn BaseWallet> = Arc::new(InMemoryWallet::new());
    let registrar = PolygonDidRegistrar::new(ledger.clone(), wallet.clone());
    Harness {
        ledger,
        wallet,
        registrar,
    }
}

fn create_options() -> PolygonDidCreateOptions {
    PolygonDidCreateOptions::builder()
        .network(PolygonNetwork::Testnet)
        .endpoint("https://example.com")
        .private_key(private_key_one())
        .build()
}

async fn created_document(harness: &Harness) -> DidDocument {
    let output = harness.registrar.create(create_options()).await;
    assert!(output.is_finished(), "{:?}", output.did_state().reason());
    output.did_state().did_document().unwrap().clone()
}

#[tokio::test]
async fn create_publishes_document_and_saves_record() {
    let harness = harness(1_000);
    let output = harness.registrar.create(create_options()).await;

    assert_eq!(output.did_state().state(), DidOperationState::Finished);
    assert_eq!(output.did_state().did(), Some(TESTNET_DID_ONE));
    let txn = output.did_registration_metadata().txn().unwrap();
    assert!(txn.starts_with("0x"));

    let document = output.did_state().did_document().unwrap();
    let verification_method = &document.verification_method()[0];
    assert_eq!(verification_method.id(), format!("{TESTNET_DID_ONE}#key-1"));
    assert_eq!(verification_method.public_key_base58(), Some(PUBLIC_KEY_ONE_BASE58));
    assert_eq!(document.authentication().len(), 1);
    assert!(document.key_agreement().is_empty());
    assert_eq!(document.service()[0].id(), format!("{TESTNET_DID_ONE}#linked-domain"));

    assert_eq!(harness.ledger.stored_document(TESTNET_DID_ONE).as_ref(), Some(document));

    let did_repository = DidRepository::new(harness.wallet.clone());
    let did_record = did_repository
        .find_created_did(TESTNET_DID_ONE)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(did_record.role(), DidRecordRole::Created);
    assert_eq!(did_record.did_document(), Some(document));
}

#[tokio::test]
async fn create_without_balance_fails_before_writing() {
    let harness = harness(0);
    let output = harness.registrar.create(create_options()).await;

    assert_eq!(output.did_state().state(), DidOperationState::Failed);
    assert_eq!(output.did_state().reason(), Some("Insufficient balance in wallet"));
    assert_eq!(harness.ledger.write_count(), 0);
    assert_eq!(harness.wallet.key_count().await.unwrap(), 0);
}

#[tokio::test]
async fn create_rejects_invalid_private_key() {
    let harness = harness(1_000);
    let options = PolygonDidCreateOptions::builder()
        .private_key(vec![0u8; 32])
        .build();
    let output = harness.registrar.create(options).await;
    assert_eq!(output.did_state().reason(), Some("Invalid private key provided"));
}

#[tokio::test]
async fn create_on_mainnet_omits_network() {
    let harness = harness(1_000);
    let options = PolygonDidCreateOptions::builder()
        .private_key(private_key_one())
        .build();
    let output = harness.registrar.create(options).await;

    assert_eq!(output.did_state().did(), Some(MAINNET_DID_ONE));
    assert!(MAINNET_DID_ONE.ends_with(ADDRESS_ONE));
    let document = output.did_state().did_document().unwrap();
    assert!(document.service().is_empty());
}

#[tokio::test]
async fn create_with_wallet_without_secret_export_fails() {
    init_logger();
    let ledger = FakeLedger::with_balance(1_000);
    let registrar = PolygonDidRegistrar::new(ledger.clone(), Arc::new(MockWallet));

    let output = registrar.create(create_options()).await;
    assert_eq!(output.did_state().state(), DidOperationState::Failed);
    assert!(output
        .did_state()
        .reason()
        .unwrap()
        .starts_with("unknownError: Incorrect wallet type: "));
    assert_eq!(ledger.write_count(), 0);
}

#[tokio::test]
async fn create_twice_reports_unknown_error() {
    let harness = harness(1_000);
    created_document(&harness).await;

    let output = harness.registrar.create(create_options()).await;
    assert_eq!(output.did_state().state(), DidOperationState::Failed);
    assert!(output
        .did_state()
        .reason()
        .unwrap()
        .starts_with("unknownError: "));
}

#[tokio::test]
async fn update_appends_new_key() {
    let harness = harness(1_000);
    let document = created_document(&harness).await;

    let options = PolygonDidUpdateOptions::builder()
        .did(TESTNET_DID_ONE)
        .did_document(document)
        .private_key(PRIVATE_KEY_TWO.to_vec())
        .build();
    let output = harness.registrar.update(options).await;

    assert!(output.is_finished(), "{:?}", output.did_state().reason());
    assert!(output.did_registration_metadata().txn().is_some());
    let updated = output.did_state().did_document().unwrap();
    assert_eq!(updated.verification_method().len(), 2);
    assert_eq!(
        updated.verification_method()[1].id(),
        format!("{TESTNET_DID_ONE}#key-2")
    );
    assert_eq!(harness.ledger.stored_document(TESTNET_DID_ONE).as_ref(), Some(updated));

    let did_record = DidRepository::new(harness.wallet.clone())
        .find_created_did(TESTNET_DID_ONE)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(did_record.did_document(), Some(updated));
    assert!(did_record.updated_at().is_some());
}

#[tokio::test]
async fn update_rejects_did_other_than_document_id() {
    let harness = harness(1_000);
    let document = created_document(&harness).await;
    let writes = harness.ledger.write_count();

    let options = PolygonDidUpdateOptions::builder()
        .did("did:polygon:testnet:0x2B5AD5c4795c026514f8317c7a215E218DcCD6cF")
        .did_document(document.clone())
        .private_key(PRIVATE_KEY_TWO.to_vec())
        .build();
    let output = harness.registrar.update(options).await;

    assert_eq!(output.did_state().state(), DidOperationState::Failed);
    assert_eq!(
        output.did_state().reason(),
        Some("did does not match the id of the DID document")
    );
    assert_eq!(harness.ledger.write_count(), writes);
    assert_eq!(harness.ledger.stored_document(TESTNET_DID_ONE), Some(document));
}

#[tokio::test]
async fn update_returns_validation_reason() {
    let harness = harness(1_000);
    let document = DidDocument::builder("did:example:123".to_string()).build();
    let options = PolygonDidUpdateOptions::builder()
        .did("did:example:123")
        .did_document(document)
        .build();

    let output = harness.registrar.update(options).await;
    assert_eq!(
        output.did_state().reason(),
        Some("id must be a did:polygon identifier")
    );
}

#[tokio::test]
async fn update_of_unknown_did_fails() {
    let harness = harness(1_000);
    let key = Key::from_base58(PUBLIC_KEY_ONE_BASE58, KeyType::K256).unwrap();
    let options = PolygonDidUpdateOptions::builder()
        .did(TESTNET_DID_ONE)
        .did_document(secp256k1_did_doc(TESTNET_DID_ONE, &key, None))
        .build();

    let output = harness.registrar.update(options).await;
    assert_eq!(output.did_state().reason(), Some("Did not found"));
}

#[tokio::test]
async fn update_without_local_record_fails() {
    let harness = harness(1_000);
    let key = Key::from_base58(PUBLIC_KEY_ONE_BASE58, KeyType::K256).unwrap();
    let document = secp256k1_did_doc(TESTNET_DID_ONE, &key, None);
    harness.ledger.publish(TESTNET_DID_ONE, &document);

    let options = PolygonDidUpdateOptions::builder()
        .did(TESTNET_DID_ONE)
        .did_document(document)
        .build();
    let output = harness.registrar.update(options).await;
    assert_eq!(output.did_state().reason(), Some("DidRecord not found in wallet"));
}

#[tokio::test]
async fn update_rejects_invalid_new_private_key() {
    let harness = harness(1_000);
    let document = created_document(&harness).await;

    let options = PolygonDidUpdateOptions::builder()
        .did(TESTNET_DID_ONE)
        .did_document(document)
        .private_key(vec![0xffu8; 32])
        .build();
    let output = harness.registrar.update(options).await;
    assert_eq!(output.did_state().reason(), Some("Invalid private key provided"));
}

#[tokio::test]
async fn update_keeps_supplied_document_fields() {
    let harness = harness(1_000);
    let document = created_document(&harness).await;
    let document = DidDocumentBuilder::from(document)
        .add_also_known_as("https://example.com/alice".to_string())
        .build();

    let options = PolygonDidUpdateOptions::builder()
        .did(TESTNET_DID_ONE)
        .did_document(document.clone())
        .build();
    let output = harness.registrar.update(options).await;
    assert_eq!(output.did_state().did_document(), Some(&document));
}

#[tokio::test]
async fn deactivate_empties_document_and_blocks_updates() {
    let harness = harness(1_000);
    let document = created_document(&harness).await;

    let deactivate = PolygonDidDeactivateOptions::builder()
        .did(TESTNET_DID_ONE)
        .build();
    let output = harness.registrar.deactivate(deactivate.clone()).await;
    assert!(output.is_finished(), "{:?}", output.did_state().reason());
    assert_eq!(output.did_document_metadata().deactivated(), Some(true));
    assert!(output.did_registration_metadata().txn().is_some());

    let stored = harness.ledger.stored_document(TESTNET_DID_ONE).unwrap();
    assert!(stored.verification_method().is_empty());
    assert_eq!(stored.id(), TESTNET_DID_ONE);

    let update = PolygonDidUpdateOptions::builder()
        .did(TESTNET_DID_ONE)
        .did_document(document)
        .build();
    let output = harness.registrar.update(update).await;
    assert_eq!(output.did_state().reason(), Some("Did not found"));

    let output = harness.registrar.deactivate(deactivate).await;
    assert_eq!(output.did_state().reason(), Some("Did not found"));
}

#[tokio::test]
async fn deactivate_of_unknown_did_fails() {
    let harness = harness(1_000);
    let output = harness
        .registrar
        .deactivate(
            PolygonDidDeactivateOptions::builder()
                .did(TESTNET_DID_ONE)
                .build(),
        )
        .await;
    assert_eq!(output.did_state().state(), DidOperationState::Failed);
    assert_eq!(output.did_state().reason(), Some("Did not found"));
}

#[test]
fn registrar_supports_polygon() {
    let harness = harness(0);
    assert_eq!(harness.registrar.supported_methods(), vec!["polygon".to_string()]);
}
