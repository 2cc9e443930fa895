//! Key and DID fixtures. Key one is the secp256k1 scalar `1`, so its address is well known.

pub const PRIVATE_KEY_ONE_HEX: &str =
    "0000000000000000000000000000000000000000000000000000000000000001";
pub const PUBLIC_KEY_ONE_BASE58: &str = "jesTu2BpszP8DKSoi1R5G6ggjHrsrVnboLdx6V47vkoR";
pub const ADDRESS_ONE: &str = "0x7E5F4552091A69125d5DfCb7b8C2659029395Bdf";
pub const TESTNET_DID_ONE: &str = "did:polygon:testnet:0x7E5F4552091A69125d5DfCb7b8C2659029395Bdf";
pub const MAINNET_DID_ONE: &str = "did:polygon:0x7E5F4552091A69125d5DfCb7b8C2659029395Bdf";

/// Issuer key used by the credential signing fixtures.
pub const SIGNING_PRIVATE_KEY_HEX: &str =
    "5a4a2c79f4bceb4976dde41897b2607e01e6b74a42bc854a7a20059cfa99a095";

pub fn private_key_one() -> Vec<u8> {
    decode(PRIVATE_KEY_ONE_HEX)
}

pub fn signing_private_key() -> Vec<u8> {
    decode(SIGNING_PRIVATE_KEY_HEX)
}

fn decode(key: &str) -> Vec<u8> {
    hex::decode(key).expect("fixture keys are valid hex")
}
