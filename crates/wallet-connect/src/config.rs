use std::time::Duration;

use chain_eth::chains::{self, EvmChain};
use serde::Deserialize;
use thiserror::Error;

/// Default interval between `eth_getTransactionReceipt` polls.
pub const DEFAULT_RECEIPT_POLL_INTERVAL_MS: u64 = 4_000;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("unsupported chain: {0}")]
    UnsupportedChain(u64),

    #[error("receipt poll interval must be greater than zero")]
    ZeroPollInterval,
}

#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct RawConfig {
    chain_id: u64,
    receipt_poll_interval_ms: u64,
}

impl Default for RawConfig {
    fn default() -> Self {
        Self {
            chain_id: chains::SEPOLIA.chain_id,
            receipt_poll_interval_ms: DEFAULT_RECEIPT_POLL_INTERVAL_MS,
        }
    }
}

/// Connector settings. The target network is fixed for the connector's
/// lifetime.
#[derive(Debug, Clone)]
pub struct ConnectorConfig {
    network: &'static EvmChain,
    receipt_poll_interval: Duration,
}

impl Default for ConnectorConfig {
    fn default() -> Self {
        Self {
            network: &chains::SEPOLIA,
            receipt_poll_interval: Duration::from_millis(DEFAULT_RECEIPT_POLL_INTERVAL_MS),
        }
    }
}

impl ConnectorConfig {
    /// Targets the network registered under `chain_id`.
    pub fn for_chain(chain_id: u64) -> Result<Self, ConfigError> {
        let network = chains::get_chain(chain_id).ok_or(ConfigError::UnsupportedChain(chain_id))?;
        Ok(Self {
            network,
            ..Self::default()
        })
    }

    /// Reads `{"chain_id": .., "receipt_poll_interval_ms": ..}`; both keys are
    /// optional and default to Sepolia and 4 seconds.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let raw: RawConfig = serde_json::from_str(json)?;
        if raw.receipt_poll_interval_ms == 0 {
            return Err(ConfigError::ZeroPollInterval);
        }
        Ok(Self::for_chain(raw.chain_id)?
            .with_receipt_poll_interval(Duration::from_millis(raw.receipt_poll_interval_ms)))
    }

    pub fn with_receipt_poll_interval(mut self, interval: Duration) -> Self {
        self.receipt_poll_interval = interval;
        self
    }

    pub fn network(&self) -> &'static EvmChain {
        self.network
    }

    pub fn receipt_poll_interval(&self) -> Duration {
        self.receipt_poll_interval
    }
}
