use std::sync::Arc;

use agent_wallet::wallet::base_wallet::BaseWallet;
use did_polygon::{
    ledger::service::PolygonLedgerService,
    registration::PolygonDidRegistrar,
    resolution::PolygonDidResolver,
};
use did_resolver::did_doc::schema::verification_method::VerificationMethodType;
use did_resolver_registry::ResolverRegistry;
use ld_signatures::registry::{SignatureSuiteEntry, SignatureSuiteRegistry};
use public_key::KeyType;

use crate::{
    api::PolygonApi, config::PolygonModuleConfig,
    signature_suites::EcdsaSecp256k1Signature2019,
};

pub type PolygonResolver = PolygonDidResolver<Arc<PolygonLedgerService>, PolygonLedgerService>;
pub type PolygonRegistrar = PolygonDidRegistrar<PolygonLedgerService>;

/// Everything the module wires up for one wallet.
pub struct PolygonComponents {
    pub ledger_service: Arc<PolygonLedgerService>,
    pub api: PolygonApi,
    pub resolver: Arc<PolygonResolver>,
    pub registrar: PolygonRegistrar,
}

/// Composition root of the did:polygon support. One ledger service is shared by every
/// component the module hands out, so [`PolygonModule::update_config`] reaches all of them.
#[derive(Debug)]
pub struct PolygonModule {
    config: PolygonModuleConfig,
    ledger_service: Arc<PolygonLedgerService>,
}

impl PolygonModule {
    pub fn new(config: PolygonModuleConfig) -> Self {
        let ledger_service = Arc::new(PolygonLedgerService::new(config.ledger_config()));
        Self {
            config,
            ledger_service,
        }
    }

    pub fn config(&self) -> &PolygonModuleConfig {
        &self.config
    }

    pub fn ledger_service(&self) -> Arc<PolygonLedgerService> {
        self.ledger_service.clone()
    }

    /// Registers the `polygon` resolver and the `EcdsaSecp256k1Signature2019` suite, and builds
    /// the API and registrar for `wallet`.
    pub fn register(
        &self,
        wallet: Arc<dyn BaseWallet>,
        resolver_registry: &mut ResolverRegistry,
        suite_registry: &mut SignatureSuiteRegistry,
    ) -> PolygonComponents {
        let resolver = Arc::new(PolygonResolver::new(self.ledger_service.clone()));
        resolver_registry.register(resolver.clone());
        suite_registry.register(signature_suite_entry());
        log::info!("Registered did:polygon resolver and EcdsaSecp256k1Signature2019 suite");

        PolygonComponents {
            ledger_service: self.ledger_service.clone(),
            api: PolygonApi::new(self.ledger_service.clone(), wallet.clone()),
            resolver,
            registrar: PolygonRegistrar::new(self.ledger_service.clone(), wallet),
        }
    }

    pub fn update_config(&mut self, config: PolygonModuleConfig) {
        self.ledger_service.update_config(config.ledger_config());
        self.config = config;
    }
}

pub fn signature_suite_entry() -> SignatureSuiteEntry {
    SignatureSuiteEntry::new(
        Arc::new(EcdsaSecp256k1Signature2019::new()),
        vec![VerificationMethodType::EcdsaSecp256k1VerificationKey2019],
        vec![KeyType::K256],
    )
}
