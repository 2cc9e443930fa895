pub mod error;
pub mod keys;
pub mod ledger;
pub mod registration;
pub mod resolution;
pub mod utils;

pub const POLYGON_METHOD: &str = "polygon";
