//! Scripted in-memory wallet provider shared by the integration tests.

#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::{HashMap, VecDeque};
use std::rc::Rc;
use std::time::Duration;

use serde_json::{json, Value};
use wallet_connect::{
    ConnectorConfig, EventSink, ListenerId, ProviderEvent, ProviderRpcError, WalletConnector,
    WalletProvider,
};

pub const WALLET: &str = "0x5aaeb6053f3e94c9b9a09f33669435e7ef1beaed";
pub const RECIPIENT: &str = "0xfB6916095ca1df60bB79Ce92cE3Ea74c37c5d359";
pub const TX_HASH: &str = "0x88df016429689c079f3b2f6ad39fa052532c56795b733da78a91ebe6a713944b";
pub const SEPOLIA_HEX: &str = "0xaa36a7";

#[derive(Default)]
struct State {
    calls: RefCell<Vec<(String, Value)>>,
    responses: RefCell<HashMap<String, VecDeque<Result<Value, ProviderRpcError>>>>,
    listeners: RefCell<HashMap<u64, EventSink>>,
    removed: RefCell<Vec<u64>>,
    next_id: Cell<u64>,
    delays: Cell<usize>,
}

/// Cloneable handle: the test keeps one clone while the connector owns another.
#[derive(Clone, Default)]
pub struct ScriptedProvider {
    state: Rc<State>,
}

impl ScriptedProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// A wallet that grants `WALLET` and already sits on Sepolia.
    pub fn on_sepolia() -> Self {
        let provider = Self::new();
        provider
            .respond("eth_requestAccounts", json!([WALLET]))
            .respond("eth_chainId", json!(SEPOLIA_HEX));
        provider
    }

    /// Queues a successful response for the next call to `method`.
    pub fn respond(&self, method: &str, result: Value) -> &Self {
        self.push(method, Ok(result))
    }

    /// Queues a provider error for the next call to `method`.
    pub fn fail(&self, method: &str, code: i64, message: &str) -> &Self {
        self.push(method, Err(ProviderRpcError::new(code, message)))
    }

    fn push(&self, method: &str, result: Result<Value, ProviderRpcError>) -> &Self {
        self.state
            .responses
            .borrow_mut()
            .entry(method.to_string())
            .or_default()
            .push_back(result);
        self
    }

    pub fn methods(&self) -> Vec<String> {
        self.state.calls.borrow().iter().map(|(m, _)| m.clone()).collect()
    }

    pub fn count(&self, method: &str) -> usize {
        self.state.calls.borrow().iter().filter(|(m, _)| m == method).count()
    }

    pub fn params(&self, method: &str) -> Vec<Value> {
        self.state
            .calls
            .borrow()
            .iter()
            .filter(|(m, _)| m == method)
            .map(|(_, p)| p.clone())
            .collect()
    }

    pub fn clear_calls(&self) {
        self.state.calls.borrow_mut().clear();
    }

    /// Pushes a notification to every registered listener.
    pub fn emit(&self, event: ProviderEvent) {
        for sink in self.state.listeners.borrow().values() {
            let _ = sink.unbounded_send(event.clone());
        }
    }

    pub fn listener_count(&self) -> usize {
        self.state.listeners.borrow().len()
    }

    pub fn removed_listeners(&self) -> Vec<u64> {
        self.state.removed.borrow().clone()
    }

    pub fn delays(&self) -> usize {
        self.state.delays.get()
    }
}

impl WalletProvider for ScriptedProvider {
    async fn request(&self, method: &str, params: Value) -> Result<Value, ProviderRpcError> {
        self.state
            .calls
            .borrow_mut()
            .push((method.to_string(), params));
        self.state
            .responses
            .borrow_mut()
            .get_mut(method)
            .and_then(|queue| queue.pop_front())
            .unwrap_or_else(|| Err(ProviderRpcError::new(-32601, format!("{method} not scripted"))))
    }

    fn subscribe(&self, sink: EventSink) -> ListenerId {
        let id = self.state.next_id.get();
        self.state.next_id.set(id + 1);
        self.state.listeners.borrow_mut().insert(id, sink);
        ListenerId(id)
    }

    fn unsubscribe(&self, id: ListenerId) {
        self.state.listeners.borrow_mut().remove(&id.0);
        self.state.removed.borrow_mut().push(id.0);
    }

    async fn delay(&self, _duration: Duration) {
        self.state.delays.set(self.state.delays.get() + 1);
    }
}

pub fn connector(provider: &ScriptedProvider) -> WalletConnector<ScriptedProvider> {
    WalletConnector::new(ConnectorConfig::default(), Some(provider.clone()))
}

pub fn mined_receipt(status: &str) -> Value {
    json!({
        "transactionHash": TX_HASH,
        "blockNumber": "0x5b8d80",
        "status": status,
    })
}
