use serde_json::{json, Value};

pub const CREDENTIALS_V1: &str = "https://www.w3.org/2018/credentials/v1";

pub fn unsigned_credential(issuer: &str) -> Value {
    json!({
        "@context": [CREDENTIALS_V1, "https://www.w3.org/2018/credentials/examples/v1"],
        "type": ["VerifiableCredential", "UniversityDegreeCredential"],
        "issuer": issuer,
        "issuanceDate": "2024-01-01T00:00:00Z",
        "credentialSubject": {
            "id": "did:example:ebfeb1f712ebc6f1c276e12ec21",
            "degree": {
                "type": "BachelorDegree",
                "name": "Bachelor of Science and Arts"
            }
        }
    })
}

pub fn unsigned_presentation(holder: &str, credentials: Vec<Value>) -> Value {
    json!({
        "@context": [CREDENTIALS_V1],
        "type": ["VerifiablePresentation"],
        "holder": holder,
        "verifiableCredential": credentials
    })
}
