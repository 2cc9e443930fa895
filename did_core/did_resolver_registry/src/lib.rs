pub mod error;

use std::{collections::HashMap, sync::Arc};

use did_resolver::{
    error::GenericError,
    traits::resolvable::{
        resolution_options::DidResolutionOptions, resolution_output::DidResolutionOutput,
        DidResolvable,
    },
};
use error::DidResolverRegistryError;

pub type GenericResolver = dyn DidResolvable;

/// Dispatches resolution to the resolver registered for the DID's method.
#[derive(Default, Clone)]
pub struct ResolverRegistry {
    resolvers: HashMap<String, Arc<GenericResolver>>,
}

impl ResolverRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_resolver(&mut self, method: String, resolver: Arc<GenericResolver>) {
        self.resolvers.insert(method, resolver);
    }

    /// Registers the resolver under every method it reports as supported.
    pub fn register(&mut self, resolver: Arc<GenericResolver>) {
        for method in resolver.supported_methods() {
            self.register_resolver(method, resolver.clone());
        }
    }

    pub fn unregister_resolver(&mut self, method: &str) {
        self.resolvers.remove(method);
    }

    pub fn resolver(&self, method: &str) -> Option<Arc<GenericResolver>> {
        self.resolvers.get(method).cloned()
    }

    pub fn supported_methods(&self) -> Vec<String> {
        let mut methods: Vec<String> = self.resolvers.keys().cloned().collect();
        methods.sort();
        methods
    }

    pub async fn resolve(
        &self,
        did: &str,
        options: &DidResolutionOptions,
    ) -> Result<DidResolutionOutput, GenericError> {
        let method = did_method(did)?;
        log::debug!("Resolving {did} with the resolver registered for '{method}'");
        match self.resolvers.get(method) {
            Some(resolver) => resolver.resolve(did, options).await,
            None => Err(Box::new(DidResolverRegistryError::UnsupportedMethod(
                method.to_string(),
            ))),
        }
    }
}

fn did_method(did: &str) -> Result<&str, DidResolverRegistryError> {
    let mut parts = did.splitn(3, ':');
    match (parts.next(), parts.next(), parts.next()) {
        (Some("did"), Some(method), Some(id)) if !method.is_empty() && !id.is_empty() => {
            Ok(method)
        }
        _ => Err(DidResolverRegistryError::InvalidDid(did.to_string())),
    }
}
