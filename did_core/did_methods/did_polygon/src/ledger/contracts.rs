use std::{str::FromStr, sync::Arc};

use ethers::{
    abi::{parse_abi, Abi},
    contract::{Contract, ContractCall},
    middleware::SignerMiddleware,
    providers::{Http, Middleware, Provider},
    signers::LocalWallet,
    types::{Address, TransactionReceipt, H256, U64},
};
use k256::ecdsa::SigningKey;
use once_cell::sync::Lazy;

use crate::error::{DidPolygonError, DidPolygonResult};

pub(crate) type SignerClient = SignerMiddleware<Provider<Http>, LocalWallet>;

pub(crate) static DID_REGISTRY_ABI: Lazy<Abi> = Lazy::new(|| {
    parse_abi(&[
        "function createDID(address id, string doc)",
        "function updateDIDDoc(address id, string doc)",
        "function getDIDDoc(address id) view returns (string, string[])",
        "function addResource(address id, string resourceId, string resource)",
        "function getResource(address id, string resourceId) view returns (string)",
    ])
    .expect("DID registry ABI is well formed")
});

pub(crate) static SCHEMA_MANAGER_ABI: Lazy<Abi> = Lazy::new(|| {
    parse_abi(&[
        "function createSchema(address id, string schemaId, string schema)",
        "function getSchemaById(address id, string schemaId) view returns (string)",
    ])
    .expect("schema manager ABI is well formed")
});

pub(crate) fn contract_address(address: &str) -> DidPolygonResult<Address> {
    Address::from_str(address)
        .map_err(|err| DidPolygonError::LedgerError(format!("Invalid contract address {address}: {err}")))
}

pub(crate) fn provider(rpc_url: &str) -> DidPolygonResult<Provider<Http>> {
    Provider::<Http>::try_from(rpc_url).map_err(DidPolygonError::ledger)
}

pub(crate) async fn signer_client(
    rpc_url: &str,
    signing_key: SigningKey,
) -> DidPolygonResult<Arc<SignerClient>> {
    let client = SignerMiddleware::new_with_provider_chain(
        provider(rpc_url)?,
        LocalWallet::from(signing_key),
    )
    .await
    .map_err(DidPolygonError::ledger)?;
    Ok(Arc::new(client))
}

pub(crate) fn did_registry<M: Middleware>(
    address: Address,
    client: Arc<M>,
) -> Contract<M> {
    Contract::new(address, DID_REGISTRY_ABI.clone(), client)
}

pub(crate) fn schema_manager<M: Middleware>(
    address: Address,
    client: Arc<M>,
) -> Contract<M> {
    Contract::new(address, SCHEMA_MANAGER_ABI.clone(), client)
}

/// Submits a state-changing call and waits for it to be mined. Returns the transaction hash.
pub(crate) async fn send_transaction(call: ContractCall<SignerClient, ()>) -> DidPolygonResult<String> {
    let pending = call.send().await.map_err(DidPolygonError::ledger)?;
    let txn_hash = pending.tx_hash();
    let receipt = pending.await.map_err(DidPolygonError::ledger)?;
    confirmed_transaction(txn_hash, receipt)
}

/// A mined transaction only counts when its receipt reports success.
fn confirmed_transaction(
    txn_hash: H256,
    receipt: Option<TransactionReceipt>,
) -> DidPolygonResult<String> {
    let receipt = receipt
        .ok_or_else(|| DidPolygonError::LedgerError(format!("Transaction {txn_hash:#x} was dropped")))?;
    if receipt.status != Some(U64::one()) {
        return Err(DidPolygonError::LedgerError(format!(
            "Transaction {txn_hash:#x} reverted"
        )));
    }
    Ok(format!("{txn_hash:#x}"))
}
