pub mod base_wallet;
pub mod did_record;
pub mod memory;
pub mod record_tags;
