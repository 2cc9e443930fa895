use std::fmt::Display;

use ethers::{types::U256, utils::format_ether};
use serde::{Deserialize, Serialize, Serializer};

/// Ledger writes a fee quote can be requested for.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum LedgerOperation {
    Create,
    Update,
    Deactivate,
    AddResource,
    CreateSchema,
}

impl Display for LedgerOperation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            LedgerOperation::Create => "create",
            LedgerOperation::Update => "update",
            LedgerOperation::Deactivate => "deactivate",
            LedgerOperation::AddResource => "addResource",
            LedgerOperation::CreateSchema => "createSchema",
        };
        f.write_str(name)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DidOperationOptions {
    pub operation: LedgerOperation,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SchemaOperationOptions {
    pub operation: LedgerOperation,
}

/// Dry-run cost of a ledger write. Amounts serialize as decimal strings, `totalFee` in ether.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FeeEstimate {
    #[serde(serialize_with = "decimal")]
    gas_limit: U256,
    #[serde(serialize_with = "decimal")]
    gas_price: U256,
    #[serde(serialize_with = "decimal")]
    total_fee_wei: U256,
    total_fee: String,
}

impl FeeEstimate {
    pub fn new(gas_limit: U256, gas_price: U256) -> Self {
        let total_fee_wei = gas_limit.saturating_mul(gas_price);
        Self {
            gas_limit,
            gas_price,
            total_fee_wei,
            total_fee: format_ether(total_fee_wei),
        }
    }

    pub fn gas_limit(&self) -> U256 {
        self.gas_limit
    }

    pub fn gas_price(&self) -> U256 {
        self.gas_price
    }

    pub fn total_fee_wei(&self) -> U256 {
        self.total_fee_wei
    }

    pub fn total_fee(&self) -> &str {
        &self.total_fee
    }
}

fn decimal<S: Serializer>(value: &U256, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(value)
}
