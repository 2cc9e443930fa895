pub mod errors;
pub mod wallet;
