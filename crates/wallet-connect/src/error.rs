use serde::{Deserialize, Serialize};
use thiserror::Error;

/// EIP-1193 code for a request the user declined in the wallet.
pub const USER_REJECTED_REQUEST: i64 = 4001;

/// EIP-1193 / EIP-3326 code for a chain the wallet does not know about.
pub const UNRECOGNIZED_CHAIN: i64 = 4902;

/// Error object returned by a wallet provider for a failed request.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{message} (code {code})")]
pub struct ProviderRpcError {
    #[serde(default)]
    pub code: i64,
    #[serde(default)]
    pub message: String,
}

impl ProviderRpcError {
    pub fn new(code: i64, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn is_user_rejection(&self) -> bool {
        self.code == USER_REJECTED_REQUEST
    }

    pub fn is_unrecognized_chain(&self) -> bool {
        self.code == UNRECOGNIZED_CHAIN
    }
}

/// Failures surfaced by the wallet connector.
///
/// Every variant is recoverable: the caller shows the message and the user may
/// retry the action that triggered it.
#[derive(Debug, Error)]
pub enum ConnectorError {
    #[error("no injected wallet provider found, please install MetaMask")]
    ProviderUnavailable,

    #[error("wallet connection rejected: {0}")]
    ConnectionRejected(String),

    #[error("wallet is not connected")]
    NotConnected,

    #[error("wrong network: {0}")]
    NetworkMismatch(String),

    #[error("failed to add {network} network: {reason}")]
    NetworkAddFailed { network: String, reason: String },

    #[error("invalid recipient address: {0}")]
    InvalidRecipient(String),

    #[error("invalid amount: {0}")]
    InvalidAmount(String),

    #[error("transaction rejected: {0}")]
    TransactionRejected(String),

    #[error("{0}")]
    TransactionFailed(String),

    #[error("failed to fetch data: {0}")]
    DataFetchFailed(String),
}
