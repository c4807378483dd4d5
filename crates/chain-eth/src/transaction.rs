use alloy_primitives::U256;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::address::validate_address;
use crate::error::EthError;

/// A native-currency value transfer, shaped for `eth_sendTransaction`.
///
/// Gas, nonce and fees are left to the wallet that signs it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NativeTransfer {
    /// Sender address as a 0x-prefixed hex string.
    pub from: String,
    /// Recipient address as a 0x-prefixed hex string.
    pub to: String,
    /// Transfer value in wei.
    pub value: U256,
}

/// Outcome of a mined transaction as reported by `eth_getTransactionReceipt`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionReceipt {
    pub transaction_hash: String,
    pub block_number: Option<u64>,
    /// `Some(true)` on success, `Some(false)` when reverted, `None` for
    /// pre-Byzantium receipts that carry no status.
    pub status: Option<bool>,
}

/// Builds a native transfer after validating both addresses.
pub fn build_native_transfer(
    from: &str,
    to: &str,
    value_wei: U256,
) -> Result<NativeTransfer, EthError> {
    ensure_address(from)?;
    ensure_address(to)?;

    Ok(NativeTransfer {
        from: from.to_string(),
        to: to.to_string(),
        value: value_wei,
    })
}

impl NativeTransfer {
    /// The `params` array for `eth_sendTransaction`.
    pub fn to_rpc_params(&self) -> Value {
        json!([{
            "from": self.from,
            "to": self.to,
            "value": format!("0x{:x}", self.value),
        }])
    }
}

impl TransactionReceipt {
    /// Decodes a JSON-RPC receipt. `null` means the transaction is not mined
    /// yet and yields `Ok(None)`.
    pub fn from_rpc(value: &Value) -> Result<Option<Self>, EthError> {
        if value.is_null() {
            return Ok(None);
        }

        let raw: RpcReceipt = serde_json::from_value(value.clone())
            .map_err(|e| EthError::DecodingError(format!("malformed receipt: {e}")))?;

        let block_number = raw.block_number.as_deref().map(parse_quantity).transpose()?;
        let status = raw
            .status
            .as_deref()
            .map(parse_quantity)
            .transpose()?
            .map(|s| s == 1);

        Ok(Some(Self {
            transaction_hash: raw.transaction_hash,
            block_number,
            status,
        }))
    }

    /// `true` unless the receipt explicitly reports a revert.
    pub fn succeeded(&self) -> bool {
        self.status != Some(false)
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RpcReceipt {
    transaction_hash: String,
    #[serde(default)]
    block_number: Option<String>,
    #[serde(default)]
    status: Option<String>,
}

// ---------------------------------------------------------------------------
// Quantity helpers
// ---------------------------------------------------------------------------

/// Parses a JSON-RPC hex quantity (`"0x1a"`) into a `u64`.
pub fn parse_quantity(quantity: &str) -> Result<u64, EthError> {
    let digits = quantity_digits(quantity)?;
    u64::from_str_radix(digits, 16)
        .map_err(|e| EthError::DecodingError(format!("invalid quantity '{quantity}': {e}")))
}

/// Parses a JSON-RPC hex quantity into a `U256` (balances, values).
pub fn parse_quantity_u256(quantity: &str) -> Result<U256, EthError> {
    let digits = quantity_digits(quantity)?;
    U256::from_str_radix(digits, 16)
        .map_err(|e| EthError::DecodingError(format!("invalid quantity '{quantity}': {e}")))
}

/// Checks that a transaction hash is a 0x-prefixed 32-byte hex string.
pub fn validate_tx_hash(hash: &str) -> Result<(), EthError> {
    let digits = hash
        .strip_prefix("0x")
        .ok_or_else(|| EthError::DecodingError(format!("transaction hash '{hash}' lacks 0x")))?;
    let bytes = hex::decode(digits)
        .map_err(|e| EthError::DecodingError(format!("invalid transaction hash: {e}")))?;
    if bytes.len() != 32 {
        return Err(EthError::DecodingError(format!(
            "expected 32-byte transaction hash, got {} bytes",
            bytes.len()
        )));
    }
    Ok(())
}

fn quantity_digits(quantity: &str) -> Result<&str, EthError> {
    let digits = quantity
        .strip_prefix("0x")
        .ok_or_else(|| EthError::DecodingError(format!("quantity '{quantity}' lacks 0x")))?;
    if digits.is_empty() {
        return Err(EthError::DecodingError("empty quantity".into()));
    }
    Ok(digits)
}

fn ensure_address(address: &str) -> Result<(), EthError> {
    match validate_address(address)? {
        true => Ok(()),
        false => Err(EthError::InvalidAddress(format!("bad EIP-55 checksum: {address}"))),
    }
}
