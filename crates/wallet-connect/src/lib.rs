//! Wallet connector for a browser dashboard.
//!
//! Connects to an injected EIP-1193 wallet, keeps it on one target network,
//! tracks the session through provider notifications, reads the native
//! balance and submits native-currency transfers.
//!
//! ```text
//! WalletPanel ──> WalletConnector ──> rpc ──> WalletProvider (window.ethereum)
//!                      │                          │
//!                      └── ProviderSubscription <─┘ accountsChanged / chainChanged
//! ```

pub mod config;
pub mod connector;
pub mod error;
pub mod panel;
pub mod provider;
pub mod rpc;
pub mod session;
pub mod subscription;
pub mod transfer;

#[cfg(feature = "wasm")]
pub mod injected;

pub use config::{ConfigError, ConnectorConfig};
pub use connector::WalletConnector;
pub use error::{ConnectorError, ProviderRpcError};
pub use panel::{Banner, WalletPanel};
pub use provider::{EventSink, ListenerId, ProviderEvent, WalletProvider};
pub use session::WalletSession;
pub use subscription::ProviderSubscription;
pub use transfer::{NativeBalance, TransferOutcome, TransferRequest};

#[cfg(feature = "wasm")]
pub use injected::{init_console_logging, InjectedProvider};
