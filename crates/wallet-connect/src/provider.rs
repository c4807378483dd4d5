//! The wallet provider seam.
//!
//! A provider is whatever the host injects into the page (MetaMask's
//! `window.ethereum`, or a scripted stand-in in tests). It speaks EIP-1193:
//! a single `request` entry point plus event notifications.

use std::time::Duration;

use chain_eth::transaction::parse_quantity;
use futures::channel::mpsc::UnboundedSender;
use serde_json::Value;

use crate::error::ProviderRpcError;

/// Notification pushed by the provider outside of any request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderEvent {
    /// `accountsChanged`: the accounts the page may use, most relevant first.
    AccountsChanged(Vec<String>),
    /// `chainChanged`: the wallet switched its active network.
    ChainChanged(u64),
}

impl ProviderEvent {
    /// Decodes an `accountsChanged` payload. `None` unless it is a list of
    /// address strings.
    pub fn accounts_changed(payload: Value) -> Option<Self> {
        serde_json::from_value(payload).ok().map(Self::AccountsChanged)
    }

    /// Decodes a `chainChanged` payload, a hex chain id.
    pub fn chain_changed(payload: &Value) -> Option<Self> {
        let chain_id = parse_quantity(payload.as_str()?).ok()?;
        Some(Self::ChainChanged(chain_id))
    }
}

/// Sending half handed to the provider when subscribing.
pub type EventSink = UnboundedSender<ProviderEvent>;

/// Handle identifying one registered listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(pub u64);

/// An injected EIP-1193 wallet provider.
///
/// Futures returned by the async methods are not required to be `Send`:
/// browser providers live on the page's single event loop.
#[allow(async_fn_in_trait)]
pub trait WalletProvider {
    /// Issues a JSON-RPC request to the wallet.
    async fn request(&self, method: &str, params: Value) -> Result<Value, ProviderRpcError>;

    /// Registers `sink` for `accountsChanged` and `chainChanged` notifications.
    fn subscribe(&self, sink: EventSink) -> ListenerId;

    /// Removes exactly the listener registered under `id`.
    fn unsubscribe(&self, id: ListenerId);

    /// Suspends for `duration`; used between receipt polls.
    async fn delay(&self, duration: Duration);
}
