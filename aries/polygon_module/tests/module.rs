use std::sync::Arc;

use agent_wallet::wallet::{base_wallet::BaseWallet, memory::InMemoryWallet};
use did_polygon::{
    error::DidPolygonError,
    ledger::fees::{LedgerOperation, SchemaOperationOptions},
    ledger::schema_registry::CreateSchemaOptions,
};
use did_registrar::DidRegistrar;
use did_resolver::did_doc::schema::verification_method::VerificationMethodType;
use did_resolver_registry::ResolverRegistry;
use ld_signatures::{
    credential_service::W3cJsonLdCredentialService, registry::SignatureSuiteRegistry,
};
use polygon_module::{
    error::PolygonModuleError, signature_suites::ECDSA_SECP256K1_SIGNATURE_2019,
    PolygonModule, PolygonModuleConfig,
};
use public_key::KeyType;
use serde_json::json;
use test_utils::{logger::init_logger, mockdata::keys::TESTNET_DID_ONE};

const DID_CONTRACT: &str = "0x12513116875BB3E4F098Ce74624739Ee51bAf023";
const SCHEMA_CONTRACT: &str = "0x67e8223D80aEcb337FE8D90dD41845A0DA31B4b0";

fn did_only_config() -> PolygonModuleConfig {
    PolygonModuleConfig::builder()
        .rpc_url("http://localhost:8545")
        .did_contract_address(DID_CONTRACT)
        .build()
}

fn full_config() -> PolygonModuleConfig {
    PolygonModuleConfig::builder()
        .rpc_url("http://localhost:8545")
        .did_contract_address(DID_CONTRACT)
        .schema_manager_contract_address(SCHEMA_CONTRACT)
        .server_url("https://files.example.com")
        .file_server_token("token")
        .build()
}

fn wallet() -> Arc<dyn BaseWallet> {
    Arc::new(InMemoryWallet::new())
}

#[test]
fn register_exposes_resolver_and_signature_suite() {
    init_logger();
    let module = PolygonModule::new(did_only_config());
    let mut resolver_registry = ResolverRegistry::new();
    let mut suite_registry = SignatureSuiteRegistry::new();

    let components = module.register(wallet(), &mut resolver_registry, &mut suite_registry);

    assert_eq!(resolver_registry.supported_methods(), vec!["polygon".to_string()]);
    assert_eq!(
        suite_registry.supported_proof_types(),
        vec![ECDSA_SECP256K1_SIGNATURE_2019.to_string()]
    );
    assert!(suite_registry.get_by_key_type(KeyType::K256).is_some());
    assert_eq!(components.registrar.supported_methods(), vec!["polygon".to_string()]);

    let service =
        W3cJsonLdCredentialService::new(Arc::new(suite_registry), Arc::new(resolver_registry));
    assert_eq!(
        service
            .key_types_by_proof_type(ECDSA_SECP256K1_SIGNATURE_2019)
            .unwrap(),
        vec![KeyType::K256]
    );
    assert_eq!(
        service
            .verification_method_types_by_proof_type(ECDSA_SECP256K1_SIGNATURE_2019)
            .unwrap(),
        vec![VerificationMethodType::EcdsaSecp256k1VerificationKey2019]
    );
}

#[test]
fn update_config_reaches_registered_components() {
    init_logger();
    let mut module = PolygonModule::new(did_only_config());
    let components = module.register(
        wallet(),
        &mut ResolverRegistry::new(),
        &mut SignatureSuiteRegistry::new(),
    );
    assert_eq!(components.ledger_service.config().server_url(), None);

    module.update_config(full_config());

    assert_eq!(module.config(), &full_config());
    assert_eq!(
        components.ledger_service.config().server_url(),
        Some("https://files.example.com")
    );
    assert_eq!(
        module.ledger_service().config().schema_manager_contract_address(),
        Some(SCHEMA_CONTRACT)
    );
}

#[tokio::test]
async fn schema_operations_need_schema_registry_config() {
    init_logger();
    let module = PolygonModule::new(did_only_config());
    let components = module.register(
        wallet(),
        &mut ResolverRegistry::new(),
        &mut SignatureSuiteRegistry::new(),
    );

    let err = components
        .api
        .create_schema(CreateSchemaOptions {
            did: TESTNET_DID_ONE.to_string(),
            schema_name: "PassportSchema".to_string(),
            schema: json!({ "name": "string" }),
        })
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        PolygonModuleError::Ledger(DidPolygonError::SchemaRegistryNotConfigured)
    ));

    let err = components
        .api
        .estimate_fee_for_schema_operation(SchemaOperationOptions {
            operation: LedgerOperation::CreateSchema,
        })
        .await
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "Schema registry not configured. Please check your configuration"
    );
}

#[tokio::test]
async fn schema_lookup_needs_local_did_record() {
    init_logger();
    let module = PolygonModule::new(full_config());
    let components = module.register(
        wallet(),
        &mut ResolverRegistry::new(),
        &mut SignatureSuiteRegistry::new(),
    );

    let err = components
        .api
        .get_schema_by_id(TESTNET_DID_ONE, "a1b2c3")
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        PolygonModuleError::Ledger(DidPolygonError::DidRecordNotFound(_))
    ));
}
