use std::{
    fmt::{self, Display},
    str::FromStr,
};

use serde::{Deserialize, Serialize};

use crate::errors::error::WalletError;

const DID: &str = "Did";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RecordCategory {
    #[default]
    Did,
}

impl FromStr for RecordCategory {
    type Err = WalletError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            DID => Ok(RecordCategory::Did),
            _ => Err(WalletError::UnknownRecordCategory(s.into())),
        }
    }
}

impl Display for RecordCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            RecordCategory::Did => DID,
        };

        write!(f, "{}", value)
    }
}
