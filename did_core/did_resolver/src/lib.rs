pub mod error;
pub mod shared_types;
pub mod traits;

pub extern crate did_doc;
