use alloy_primitives::utils::Unit;
use alloy_primitives::U256;
use chain_eth::address;
use chain_eth::error::EthError;
use chain_eth::transaction::TransactionReceipt;
use chain_eth::units;

use crate::error::ConnectorError;

/// A native-currency transfer as entered in the send form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransferRequest {
    pub recipient_address: String,
    /// Decimal amount in the chain's base currency, e.g. `"0.5"`.
    pub amount_native: String,
}

impl TransferRequest {
    pub fn new(recipient_address: impl Into<String>, amount_native: impl Into<String>) -> Self {
        Self {
            recipient_address: recipient_address.into(),
            amount_native: amount_native.into(),
        }
    }

    /// Checks the recipient and amount and returns the amount in the smallest
    /// unit. Touches nothing outside this request.
    pub fn validate(&self, decimals: u8) -> Result<U256, ConnectorError> {
        if !address::is_valid_address(&self.recipient_address) {
            return Err(ConnectorError::InvalidRecipient(self.recipient_address.clone()));
        }

        let value = units::parse_units(&self.amount_native, decimals).map_err(|e| match e {
            EthError::InvalidAmount(reason) => ConnectorError::InvalidAmount(reason),
            other => ConnectorError::InvalidAmount(other.to_string()),
        })?;

        if value.is_zero() {
            return Err(ConnectorError::InvalidAmount(
                "amount must be greater than zero".into(),
            ));
        }

        Ok(value)
    }
}

/// A confirmed transfer, kept only long enough to tell the user about it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferOutcome {
    pub amount: String,
    pub recipient: String,
    pub symbol: &'static str,
    pub receipt: TransactionReceipt,
}

impl TransferOutcome {
    pub fn message(&self) -> String {
        format!(
            "Successfully sent {} {} to {}",
            self.amount, self.symbol, self.recipient
        )
    }
}

/// Native balance of the connected address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NativeBalance {
    pub wei: U256,
    pub unit: Unit,
    pub symbol: &'static str,
}

impl NativeBalance {
    /// Full-precision amount, e.g. `"1.25"`.
    pub fn formatted(&self) -> String {
        units::format_units(self.wei, self.unit)
    }

    /// Four-decimal label shown on the wallet card, e.g. `"1.2500 ETH"`.
    pub fn label(&self) -> String {
        format!(
            "{} {}",
            units::format_units_fixed(self.wei, self.unit, 4),
            self.symbol
        )
    }
}
