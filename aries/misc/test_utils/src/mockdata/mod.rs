pub mod credentials;
pub mod keys;
