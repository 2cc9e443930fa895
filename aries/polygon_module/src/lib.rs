pub mod api;
pub mod config;
pub mod error;
pub mod module;
pub mod signature_suites;

pub use api::PolygonApi;
pub use config::PolygonModuleConfig;
pub use module::{PolygonComponents, PolygonModule};
