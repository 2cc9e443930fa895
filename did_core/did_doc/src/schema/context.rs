//! Well-known JSON-LD context URLs.

pub const DID_V1: &str = "https://www.w3.org/ns/did/v1";
pub const SECURITY_V2: &str = "https://w3id.org/security/v2";
pub const SECP256K1_2019_V1: &str = "https://w3id.org/security/suites/secp256k1-2019/v1";
pub const CREDENTIALS_V1: &str = "https://www.w3.org/2018/credentials/v1";
