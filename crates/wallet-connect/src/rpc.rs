//! Typed wrappers around the wallet RPC methods the connector uses.

use alloy_primitives::U256;
use chain_eth::chains::EvmChain;
use chain_eth::error::EthError;
use chain_eth::transaction::{self, NativeTransfer, TransactionReceipt};
use serde_json::{json, Value};
use thiserror::Error;

use crate::error::ProviderRpcError;
use crate::provider::WalletProvider;

/// Failure of a single RPC round trip.
#[derive(Debug, Error)]
pub enum RpcError {
    #[error(transparent)]
    Provider(#[from] ProviderRpcError),

    #[error("unexpected response to {method}: {reason}")]
    Decode { method: &'static str, reason: String },
}

impl RpcError {
    fn decode(method: &'static str, err: EthError) -> Self {
        RpcError::Decode {
            method,
            reason: err.to_string(),
        }
    }

    /// The wallet's own error, if the wallet produced this failure.
    pub fn provider_error(&self) -> Option<&ProviderRpcError> {
        match self {
            RpcError::Provider(e) => Some(e),
            RpcError::Decode { .. } => None,
        }
    }
}

/// `eth_requestAccounts`: prompts the user to grant account access.
pub async fn request_accounts<P: WalletProvider>(provider: &P) -> Result<Vec<String>, RpcError> {
    const METHOD: &str = "eth_requestAccounts";
    let value = provider.request(METHOD, json!([])).await?;
    serde_json::from_value(value).map_err(|e| RpcError::Decode {
        method: METHOD,
        reason: e.to_string(),
    })
}

/// `eth_chainId`: the network the wallet is currently on.
pub async fn chain_id<P: WalletProvider>(provider: &P) -> Result<u64, RpcError> {
    const METHOD: &str = "eth_chainId";
    let value = provider.request(METHOD, json!([])).await?;
    let quantity = as_str(METHOD, &value)?;
    transaction::parse_quantity(quantity).map_err(|e| RpcError::decode(METHOD, e))
}

/// `wallet_switchEthereumChain` (EIP-3326).
pub async fn switch_chain<P: WalletProvider>(
    provider: &P,
    chain: &EvmChain,
) -> Result<(), RpcError> {
    provider
        .request(
            "wallet_switchEthereumChain",
            json!([{ "chainId": chain.hex_chain_id() }]),
        )
        .await?;
    Ok(())
}

/// `wallet_addEthereumChain` (EIP-3085) with the full network descriptor.
pub async fn add_chain<P: WalletProvider>(provider: &P, chain: &EvmChain) -> Result<(), RpcError> {
    provider
        .request("wallet_addEthereumChain", json!([chain.add_chain_parameters()]))
        .await?;
    Ok(())
}

/// `eth_getBalance` at the latest block, in wei.
pub async fn get_balance<P: WalletProvider>(provider: &P, address: &str) -> Result<U256, RpcError> {
    const METHOD: &str = "eth_getBalance";
    let value = provider.request(METHOD, json!([address, "latest"])).await?;
    let quantity = as_str(METHOD, &value)?;
    transaction::parse_quantity_u256(quantity).map_err(|e| RpcError::decode(METHOD, e))
}

/// `eth_sendTransaction`: the wallet signs and broadcasts, returning the hash.
pub async fn send_transaction<P: WalletProvider>(
    provider: &P,
    transfer: &NativeTransfer,
) -> Result<String, RpcError> {
    const METHOD: &str = "eth_sendTransaction";
    let value = provider.request(METHOD, transfer.to_rpc_params()).await?;
    let hash = as_str(METHOD, &value)?;
    transaction::validate_tx_hash(hash).map_err(|e| RpcError::decode(METHOD, e))?;
    Ok(hash.to_string())
}

/// `eth_getTransactionReceipt`: `None` while the transaction is pending.
pub async fn get_transaction_receipt<P: WalletProvider>(
    provider: &P,
    tx_hash: &str,
) -> Result<Option<TransactionReceipt>, RpcError> {
    const METHOD: &str = "eth_getTransactionReceipt";
    let value = provider.request(METHOD, json!([tx_hash])).await?;
    TransactionReceipt::from_rpc(&value).map_err(|e| RpcError::decode(METHOD, e))
}

fn as_str<'a>(method: &'static str, value: &'a Value) -> Result<&'a str, RpcError> {
    value.as_str().ok_or_else(|| RpcError::Decode {
        method,
        reason: format!("expected a string, got {value}"),
    })
}
