pub mod credential_service;
pub mod error;
pub mod jsonld;
pub mod proof;
pub mod registry;
pub mod suite;
