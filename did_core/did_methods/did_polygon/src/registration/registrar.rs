use std::sync::Arc;

use agent_wallet::wallet::{
    base_wallet::{BaseWallet, KeyWallet},
    did_record::{DidRecord, DidRecordRole, DidRepository},
};
use async_trait::async_trait;
use did_registrar::{registration_output::DidRegistrationOutput, DidRegistrar};
use did_resolver::{
    did_doc::schema::did_doc::{DidDocument, DidDocumentBuilder},
    shared_types::did_document_metadata::DidDocumentMetadata,
    traits::resolvable::{resolution_options::DidResolutionOptions, DidResolvable},
};
use ethers::utils::secret_key_to_address;
use log::{error, info, warn};
use public_key::KeyType;

use super::options::{PolygonDidCreateOptions, PolygonDidDeactivateOptions, PolygonDidUpdateOptions};
use crate::{
    error::DidPolygonResult,
    keys::{self, parse_private_key, public_key_from_did},
    ledger::PolygonLedger,
    resolution::PolygonDidResolver,
    utils::{build_did, secp256k1_did_doc, secp256k1_verification_method, validate_spec_compliant_payload},
    POLYGON_METHOD,
};

const INSUFFICIENT_BALANCE: &str = "Insufficient balance in wallet";
const INVALID_PRIVATE_KEY: &str = "Invalid private key provided";
const DID_NOT_FOUND: &str = "Did not found";
const DID_RECORD_NOT_FOUND: &str = "DidRecord not found in wallet";
const DID_MISMATCH: &str = "did does not match the id of the DID document";

fn unknown_error(err: impl std::fmt::Display) -> DidRegistrationOutput {
    DidRegistrationOutput::failed(format!("unknownError: {err}"))
}

/// Creates, updates and deactivates `did:polygon` DIDs. Keys are imported into `wallet` and
/// created DIDs are tracked as local DID records.
pub struct PolygonDidRegistrar<L: PolygonLedger> {
    ledger: Arc<L>,
    wallet: Arc<dyn BaseWallet>,
    did_repository: DidRepository,
    resolver: PolygonDidResolver<Arc<L>, L>,
}

impl<L: PolygonLedger> PolygonDidRegistrar<L> {
    pub fn new(ledger: Arc<L>, wallet: Arc<dyn BaseWallet>) -> Self {
        Self {
            resolver: PolygonDidResolver::new(ledger.clone()),
            did_repository: DidRepository::new(wallet.clone()),
            ledger,
            wallet,
        }
    }

    /// True when `did` resolves to a document that is not deactivated.
    async fn is_active(&self, did: &str) -> bool {
        match self.resolver.resolve(did, &DidResolutionOptions::default()).await {
            Ok(output) => output.did_document().is_some() && !output.is_deactivated(),
            Err(err) => {
                warn!("Unable to resolve {did}: {err}");
                false
            }
        }
    }

    async fn signing_key_for_did(&self, did: &str) -> DidPolygonResult<k256::ecdsa::SigningKey> {
        let key = public_key_from_did(&self.did_repository, did).await?;
        keys::signing_key(self.wallet.as_ref(), &key).await
    }

    async fn create_did(
        &self,
        options: &PolygonDidCreateOptions,
        account_key: &k256::ecdsa::SigningKey,
    ) -> DidPolygonResult<DidRegistrationOutput> {
        let balance = self
            .ledger
            .get_balance(secret_key_to_address(account_key))
            .await?;
        if balance.is_zero() {
            return Ok(DidRegistrationOutput::failed(INSUFFICIENT_BALANCE));
        }

        let key = self
            .wallet
            .create_key(KeyType::K256, Some(options.private_key()))
            .await?;
        let did = build_did(POLYGON_METHOD, options.network().as_str(), &key.hex())?;
        info!("Creating DID on ledger: {did}");

        let signing_key = keys::signing_key(self.wallet.as_ref(), &key).await?;
        let did_registry = self.ledger.create_did_registry_instance(signing_key).await?;
        let did_document = secp256k1_did_doc(&did, &key, options.endpoint());
        let txn = did_registry.create(&did, &did_document).await?;
        info!("Published did on ledger: {did}");

        let did_record = DidRecord::new(
            did.clone(),
            DidRecordRole::Created,
            Some(did_document.clone()),
        );
        info!("Saving DID record to wallet: {did}");
        self.did_repository.save(&did_record).await?;

        Ok(DidRegistrationOutput::finished(did, did_document, Some(txn)))
    }

    async fn update_did(
        &self,
        options: PolygonDidUpdateOptions,
    ) -> DidPolygonResult<DidRegistrationOutput> {
        let (did, mut did_document, private_key) = options.into_parts();
        let document_id = did_document.id().to_string();
        if did != document_id {
            warn!("Rejecting update of {document_id} requested for {did}");
            return Ok(DidRegistrationOutput::failed(DID_MISMATCH));
        }

        if !self.is_active(&document_id).await {
            return Ok(DidRegistrationOutput::failed(DID_NOT_FOUND));
        }
        let Some(mut did_record) = self.did_repository.find_created_did(&document_id).await? else {
            return Ok(DidRegistrationOutput::failed(DID_RECORD_NOT_FOUND));
        };

        if let Some(private_key) = private_key {
            if parse_private_key(&private_key).is_err() {
                return Ok(DidRegistrationOutput::failed(INVALID_PRIVATE_KEY));
            }
            let key = self
                .wallet
                .create_key(KeyType::K256, Some(&private_key))
                .await?;
            let key_index = did_document.verification_method().len() + 1;
            let verification_method = secp256k1_verification_method(
                format!("{document_id}#key-{key_index}"),
                document_id.clone(),
                &key,
            );
            did_document = DidDocumentBuilder::from(did_document)
                .add_verification_method(verification_method)
                .build();
        }

        let signing_key = self.signing_key_for_did(&document_id).await?;
        let did_registry = self.ledger.create_did_registry_instance(signing_key).await?;
        let txn = did_registry.update(&document_id, &did_document).await?;
        info!("Updated did on ledger: {document_id}");

        did_record.set_did_document(did_document.clone());
        self.did_repository.update(did_record).await?;

        Ok(DidRegistrationOutput::finished(document_id, did_document, Some(txn)))
    }

    async fn deactivate_did(&self, did: &str) -> DidPolygonResult<DidRegistrationOutput> {
        if !self.is_active(did).await {
            return Ok(DidRegistrationOutput::failed(DID_NOT_FOUND));
        }
        let Some(did_record) = self.did_repository.find_created_did(did).await? else {
            return Ok(DidRegistrationOutput::failed(DID_NOT_FOUND));
        };

        let signing_key = self.signing_key_for_did(did).await?;
        let did_registry = self.ledger.create_did_registry_instance(signing_key).await?;
        let deactivated_document = DidDocument::builder(did.to_string()).build();
        let txn = did_registry.update(did, &deactivated_document).await?;
        info!("Deactivated did on ledger: {did}");

        self.did_repository.update(did_record).await?;

        Ok(
            DidRegistrationOutput::finished(did.to_string(), deactivated_document, Some(txn))
                .with_did_document_metadata(DidDocumentMetadata::builder().deactivated(true).build()),
        )
    }
}

#[async_trait]
impl<L: PolygonLedger + 'static> DidRegistrar for PolygonDidRegistrar<L> {
    type CreateOptions = PolygonDidCreateOptions;
    type UpdateOptions = PolygonDidUpdateOptions;
    type DeactivateOptions = PolygonDidDeactivateOptions;

    fn supported_methods(&self) -> Vec<String> {
        vec![POLYGON_METHOD.to_string()]
    }

    async fn create(&self, options: Self::CreateOptions) -> DidRegistrationOutput {
        let Ok(account_key) = parse_private_key(options.private_key()) else {
            return DidRegistrationOutput::failed(INVALID_PRIVATE_KEY);
        };
        self.create_did(&options, &account_key)
            .await
            .unwrap_or_else(|err| {
                error!("Error registering DID: {err}");
                unknown_error(err)
            })
    }

    async fn update(&self, options: Self::UpdateOptions) -> DidRegistrationOutput {
        if let Some(reason) = validate_spec_compliant_payload(options.did_document()) {
            return DidRegistrationOutput::failed(reason);
        }
        self.update_did(options).await.unwrap_or_else(|err| {
            error!("Error updating DID: {err}");
            unknown_error(err)
        })
    }

    async fn deactivate(&self, options: Self::DeactivateOptions) -> DidRegistrationOutput {
        self.deactivate_did(options.did()).await.unwrap_or_else(|err| {
            error!("Error deactivating DID {}: {err}", options.did());
            unknown_error(err)
        })
    }
}
