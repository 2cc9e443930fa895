mod ecdsa_secp256k1_signature_2019;

pub use ecdsa_secp256k1_signature_2019::{
    EcdsaSecp256k1Signature2019, ECDSA_SECP256K1_SIGNATURE_2019,
};
