//! The wallet connector: account access, network selection, event handling,
//! balance lookup and native transfers against one injected provider.

use std::rc::Rc;

use chain_eth::chains::EvmChain;
use chain_eth::transaction::{build_native_transfer, TransactionReceipt};
use chain_eth::units;
use log::{debug, info, warn};

use crate::config::ConnectorConfig;
use crate::error::{ConnectorError, ProviderRpcError};
use crate::provider::{ProviderEvent, WalletProvider};
use crate::rpc::{self, RpcError};
use crate::session::WalletSession;
use crate::subscription::ProviderSubscription;
use crate::transfer::{NativeBalance, TransferOutcome, TransferRequest};

pub struct WalletConnector<P: WalletProvider> {
    config: ConnectorConfig,
    provider: Option<Rc<P>>,
    session: WalletSession,
    subscription: Option<ProviderSubscription<P>>,
}

impl<P: WalletProvider> WalletConnector<P> {
    /// `provider` is `None` when the page has no injected wallet.
    pub fn new(config: ConnectorConfig, provider: Option<P>) -> Self {
        Self {
            config,
            provider: provider.map(Rc::new),
            session: WalletSession::default(),
            subscription: None,
        }
    }

    pub fn session(&self) -> &WalletSession {
        &self.session
    }

    pub fn network(&self) -> &'static EvmChain {
        self.config.network()
    }

    pub fn has_provider(&self) -> bool {
        self.provider.is_some()
    }

    pub fn is_mounted(&self) -> bool {
        self.subscription.is_some()
    }

    /// Starts listening for provider notifications. Returns `false` when
    /// there is no provider to listen to. Mounting twice keeps the first
    /// subscription.
    pub fn mount(&mut self) -> bool {
        let Some(provider) = &self.provider else {
            return false;
        };
        if self.subscription.is_none() {
            self.subscription = Some(ProviderSubscription::new(Rc::clone(provider)));
        }
        true
    }

    /// Stops listening; the provider listener is removed.
    pub fn unmount(&mut self) {
        self.subscription = None;
    }

    /// Requests account access and puts the wallet on the target network.
    ///
    /// On failure the session is left unconnected.
    pub async fn connect(&mut self) -> Result<WalletSession, ConnectorError> {
        match self.establish().await {
            Ok(session) => {
                info!(
                    "wallet connected: {} on {}",
                    session.address(),
                    self.network().name
                );
                self.session = session.clone();
                Ok(session)
            }
            Err(err) => {
                warn!("wallet connection failed: {err}");
                self.session.clear();
                Err(err)
            }
        }
    }

    /// Forgets the session locally. Wallet permissions are not revoked.
    pub fn disconnect(&mut self) {
        debug!("wallet disconnected");
        self.session.clear();
    }

    /// Folds a provider notification into the session.
    pub fn apply_event(&mut self, event: &ProviderEvent) {
        match event {
            ProviderEvent::AccountsChanged(accounts) => {
                debug!("accountsChanged: {} account(s)", accounts.len());
                self.session.apply_accounts(accounts);
            }
            ProviderEvent::ChainChanged(chain_id) => {
                debug!("chainChanged: {chain_id}");
                self.session.apply_chain(*chain_id, self.network().chain_id);
            }
        }
    }

    /// Waits for the next provider notification and applies it. `None` when
    /// not mounted or the provider closed the channel.
    pub async fn next_event(&mut self) -> Option<ProviderEvent> {
        let event = self.subscription.as_mut()?.next().await?;
        self.apply_event(&event);
        Some(event)
    }

    /// Applies every notification that is already queued and returns them.
    pub fn drain_events(&mut self) -> Vec<ProviderEvent> {
        let mut applied = Vec::new();
        while let Some(event) = self.subscription.as_mut().and_then(|s| s.try_next()) {
            self.apply_event(&event);
            applied.push(event);
        }
        applied
    }

    /// Native balance of the session address on the target network.
    pub async fn balance(&self) -> Result<NativeBalance, ConnectorError> {
        let provider = self.provider()?;
        if self.session.address().is_empty() {
            return Err(ConnectorError::NotConnected);
        }

        let wei = rpc::get_balance(provider, self.session.address())
            .await
            .map_err(|e| ConnectorError::DataFetchFailed(e.to_string()))?;

        let network = self.network();
        let unit = units::unit(network.decimals)
            .map_err(|e| ConnectorError::DataFetchFailed(e.to_string()))?;
        Ok(NativeBalance {
            wei,
            unit,
            symbol: network.symbol,
        })
    }

    /// Sends `request.amount_native` of the native currency and waits until
    /// the transaction is mined.
    ///
    /// Input is validated before the provider is contacted. Two waits follow:
    /// submission, then the mined receipt.
    pub async fn send_native(
        &self,
        request: &TransferRequest,
    ) -> Result<TransferOutcome, ConnectorError> {
        let network = self.network();
        let value = request.validate(network.decimals)?;

        let provider = self.provider()?;
        if !self.session.is_connected() {
            return Err(ConnectorError::NotConnected);
        }

        let transfer =
            build_native_transfer(self.session.address(), &request.recipient_address, value)
                .map_err(|e| ConnectorError::TransactionFailed(e.to_string()))?;

        let tx_hash = rpc::send_transaction(provider, &transfer)
            .await
            .map_err(transaction_error)?;
        info!("submitted transfer {tx_hash}, waiting to be mined");

        let receipt = self.wait_for_receipt(provider, &tx_hash).await?;
        if !receipt.succeeded() {
            warn!("transfer {tx_hash} reverted");
            return Err(ConnectorError::TransactionFailed(format!(
                "transaction {tx_hash} reverted"
            )));
        }

        info!("transfer {tx_hash} mined: {}", network.transaction_url(&tx_hash));
        Ok(TransferOutcome {
            amount: request.amount_native.clone(),
            recipient: request.recipient_address.clone(),
            symbol: network.symbol,
            receipt,
        })
    }

    async fn establish(&self) -> Result<WalletSession, ConnectorError> {
        let provider = self.provider()?;

        let accounts = rpc::request_accounts(provider)
            .await
            .map_err(|e| ConnectorError::ConnectionRejected(e.to_string()))?;
        let address = accounts
            .into_iter()
            .next()
            .filter(|a| !a.is_empty())
            .ok_or_else(|| {
                ConnectorError::ConnectionRejected("wallet returned no accounts".into())
            })?;

        self.ensure_network(provider).await?;

        Ok(WalletSession::connected(address, self.network().chain_id))
    }

    /// Switches to the target network, registering it first when the wallet
    /// reports it as unrecognized. No other switch failure is special-cased.
    async fn ensure_network(&self, provider: &P) -> Result<(), ConnectorError> {
        let target = self.network();

        let active = rpc::chain_id(provider).await.map_err(|e| {
            ConnectorError::NetworkMismatch(format!("could not read active chain: {e}"))
        })?;
        if active == target.chain_id {
            return Ok(());
        }

        debug!("wallet on chain {active}, switching to {}", target.chain_id);
        match rpc::switch_chain(provider, target).await {
            Ok(()) => Ok(()),
            Err(err) if unrecognized_chain(&err) => {
                info!("{} unknown to wallet, adding it", target.name);
                rpc::add_chain(provider, target)
                    .await
                    .map_err(|e| ConnectorError::NetworkAddFailed {
                        network: target.name.to_string(),
                        reason: e.to_string(),
                    })?;
                rpc::switch_chain(provider, target)
                    .await
                    .map_err(|e| network_mismatch(target, e))
            }
            Err(err) => Err(network_mismatch(target, err)),
        }
    }

    async fn wait_for_receipt(
        &self,
        provider: &P,
        tx_hash: &str,
    ) -> Result<TransactionReceipt, ConnectorError> {
        loop {
            let receipt = rpc::get_transaction_receipt(provider, tx_hash)
                .await
                .map_err(transaction_error)?;
            match receipt {
                Some(receipt) => return Ok(receipt),
                None => provider.delay(self.config.receipt_poll_interval()).await,
            }
        }
    }

    fn provider(&self) -> Result<&P, ConnectorError> {
        self.provider.as_deref().ok_or(ConnectorError::ProviderUnavailable)
    }
}

fn unrecognized_chain(err: &RpcError) -> bool {
    err.provider_error().is_some_and(ProviderRpcError::is_unrecognized_chain)
}

fn network_mismatch(target: &EvmChain, err: RpcError) -> ConnectorError {
    ConnectorError::NetworkMismatch(format!("could not switch to {}: {err}", target.name))
}

fn transaction_error(err: RpcError) -> ConnectorError {
    match err {
        RpcError::Provider(e) if e.is_user_rejection() => {
            ConnectorError::TransactionRejected(e.message)
        }
        RpcError::Provider(e) if e.message.is_empty() => ConnectorError::TransactionFailed(format!(
            "failed to send transaction (code {})",
            e.code
        )),
        RpcError::Provider(e) => ConnectorError::TransactionFailed(e.message),
        other => ConnectorError::TransactionFailed(other.to_string()),
    }
}
