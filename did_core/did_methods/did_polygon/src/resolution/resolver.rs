use std::{borrow::Borrow, marker::PhantomData};

use async_trait::async_trait;
use did_resolver::{
    did_doc::schema::did_doc::DidDocument,
    error::GenericError,
    shared_types::{did_document_metadata::DidDocumentMetadata, media_type::MediaType},
    traits::resolvable::{
        resolution_error::DidResolutionError, resolution_metadata::DidResolutionMetadata,
        resolution_options::DidResolutionOptions, resolution_output::DidResolutionOutput,
        DidResolvable,
    },
};
use log::{debug, warn};

use crate::{
    error::{DidPolygonError, DidPolygonResult},
    ledger::DidDocumentReader,
    utils::is_valid_polygon_did,
    POLYGON_METHOD,
};

pub struct PolygonDidResolver<T, R>
where
    T: Borrow<R> + Sync + Send,
    R: DidDocumentReader,
{
    ledger: T,
    _marker: PhantomData<R>,
}

impl<T, R> PolygonDidResolver<T, R>
where
    T: Borrow<R> + Sync + Send,
    R: DidDocumentReader,
{
    pub fn new(ledger: T) -> Self {
        PolygonDidResolver {
            ledger,
            _marker: PhantomData,
        }
    }

    async fn read_did_document(&self, did: &str) -> DidPolygonResult<DidResolutionOutput> {
        let document = self
            .ledger
            .borrow()
            .get_did_document(did)
            .await?
            .ok_or_else(|| DidPolygonError::NotFound(format!("no DID document stored for {did}")))?;
        let did_document: DidDocument = serde_json::from_str(&document)?;

        let mut resolution_metadata =
            DidResolutionMetadata::builder().content_type(MediaType::DidJsonLd.to_string());
        let mut document_metadata = DidDocumentMetadata::builder();
        if did_document.verification_method().is_empty() {
            debug!("DID document of {did} has no verification methods, reporting it deactivated");
            resolution_metadata = resolution_metadata
                .message("DID document has no verification methods and is deactivated".to_string());
            document_metadata = document_metadata.deactivated(true);
        }

        Ok(DidResolutionOutput::builder(did_document)
            .did_resolution_metadata(resolution_metadata.build())
            .did_document_metadata(document_metadata.build())
            .build())
    }
}

#[async_trait]
impl<T, R> DidResolvable for PolygonDidResolver<T, R>
where
    T: Borrow<R> + Sync + Send,
    R: DidDocumentReader,
{
    fn supported_methods(&self) -> Vec<String> {
        vec![POLYGON_METHOD.to_string()]
    }

    fn allows_caching(&self) -> bool {
        true
    }

    async fn resolve(
        &self,
        did: &str,
        _options: &DidResolutionOptions,
    ) -> Result<DidResolutionOutput, GenericError> {
        if !is_valid_polygon_did(did) {
            return Err(Box::new(DidPolygonError::InvalidDid(did.to_string())));
        }
        match self.read_did_document(did).await {
            Ok(output) => Ok(output),
            Err(err) => {
                warn!("Failed to resolve {did}: {err}");
                Ok(DidResolutionOutput::failed(
                    DidResolutionError::NotFound,
                    format!("resolver_error: Unable to resolve did '{did}': {err}"),
                ))
            }
        }
    }
}
