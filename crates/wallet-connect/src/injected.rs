//! Binding to the wallet extension injected as `window.ethereum`.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::time::Duration;

use serde::Serialize;
use serde_json::Value;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use crate::error::ProviderRpcError;
use crate::provider::{EventSink, ListenerId, ProviderEvent, WalletProvider};

/// JSON-RPC "internal error", used when the wallet throws something that is
/// not an EIP-1193 error object.
const INTERNAL_ERROR: i64 = -32603;

#[wasm_bindgen(inline_js = "
export function hasEthereum() {
    return typeof window !== 'undefined' && typeof window.ethereum !== 'undefined';
}

export async function ethereumRequest(method, params) {
    return await window.ethereum.request({ method, params });
}

export function ethereumOn(event, handler) {
    window.ethereum.on(event, handler);
}

export function ethereumRemoveListener(event, handler) {
    window.ethereum.removeListener(event, handler);
}
")]
extern "C" {
    #[wasm_bindgen(js_name = hasEthereum)]
    fn has_ethereum() -> bool;

    #[wasm_bindgen(js_name = ethereumRequest, catch)]
    async fn ethereum_request(method: &str, params: JsValue) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(js_name = ethereumOn)]
    fn ethereum_on(event: &str, handler: &js_sys::Function);

    #[wasm_bindgen(js_name = ethereumRemoveListener)]
    fn ethereum_remove_listener(event: &str, handler: &js_sys::Function);
}

/// Sets up panic reporting and routes `log` output to the browser console.
pub fn init_console_logging() {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::default());
}

struct Listener {
    accounts: Closure<dyn FnMut(JsValue)>,
    chain: Closure<dyn FnMut(JsValue)>,
}

/// The page's injected EIP-1193 provider (MetaMask and compatibles).
pub struct InjectedProvider {
    listeners: RefCell<HashMap<u64, Listener>>,
    next_id: Cell<u64>,
}

impl InjectedProvider {
    /// Returns the provider if the page has one injected.
    pub fn detect() -> Option<Self> {
        if !has_ethereum() {
            log::warn!("window.ethereum not found");
            return None;
        }
        Some(Self {
            listeners: RefCell::new(HashMap::new()),
            next_id: Cell::new(0),
        })
    }
}

impl WalletProvider for InjectedProvider {
    async fn request(&self, method: &str, params: Value) -> Result<Value, ProviderRpcError> {
        let js_params = params
            .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
            .map_err(|e| ProviderRpcError::new(INTERNAL_ERROR, e.to_string()))?;

        match ethereum_request(method, js_params).await {
            Ok(result) => serde_wasm_bindgen::from_value(result)
                .map_err(|e| ProviderRpcError::new(INTERNAL_ERROR, e.to_string())),
            Err(thrown) => Err(to_rpc_error(thrown)),
        }
    }

    fn subscribe(&self, sink: EventSink) -> ListenerId {
        let accounts_sink = sink.clone();
        let accounts = Closure::<dyn FnMut(JsValue)>::new(move |value: JsValue| {
            match js_to_json(value).and_then(ProviderEvent::accounts_changed) {
                Some(event) => {
                    let _ = accounts_sink.unbounded_send(event);
                }
                None => log::warn!("ignoring malformed accountsChanged payload"),
            }
        });

        let chain = Closure::<dyn FnMut(JsValue)>::new(move |value: JsValue| {
            match js_to_json(value).as_ref().and_then(ProviderEvent::chain_changed) {
                Some(event) => {
                    let _ = sink.unbounded_send(event);
                }
                None => log::warn!("ignoring malformed chainChanged payload"),
            }
        });

        ethereum_on("accountsChanged", accounts.as_ref().unchecked_ref());
        ethereum_on("chainChanged", chain.as_ref().unchecked_ref());

        let id = self.next_id.get();
        self.next_id.set(id + 1);
        self.listeners.borrow_mut().insert(id, Listener { accounts, chain });
        ListenerId(id)
    }

    fn unsubscribe(&self, id: ListenerId) {
        let Some(listener) = self.listeners.borrow_mut().remove(&id.0) else {
            return;
        };
        ethereum_remove_listener("accountsChanged", listener.accounts.as_ref().unchecked_ref());
        ethereum_remove_listener("chainChanged", listener.chain.as_ref().unchecked_ref());
    }

    async fn delay(&self, duration: Duration) {
        gloo_timers::future::sleep(duration).await;
    }
}

fn to_rpc_error(thrown: JsValue) -> ProviderRpcError {
    if let Ok(err) = serde_wasm_bindgen::from_value::<ProviderRpcError>(thrown.clone()) {
        if err.code != 0 || !err.message.is_empty() {
            return err;
        }
    }
    let message = thrown
        .as_string()
        .unwrap_or_else(|| "wallet request failed".to_string());
    ProviderRpcError::new(INTERNAL_ERROR, message)
}

fn js_to_json(value: JsValue) -> Option<Value> {
    serde_wasm_bindgen::from_value(value).ok()
}
