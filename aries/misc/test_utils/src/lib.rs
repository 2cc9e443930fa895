pub mod errors;
pub mod logger;
pub mod mock_wallet;
pub mod mockdata;
