//! State behind the wallet card on the dashboard: the connect/disconnect
//! control, the send form and the status banners.

use chain_eth::address::shorten_address;
use log::{error, warn};

use crate::connector::WalletConnector;
use crate::error::ConnectorError;
use crate::provider::{ProviderEvent, WalletProvider};
use crate::transfer::{NativeBalance, TransferRequest};

/// One message shown above the wallet card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Banner {
    Error(String),
    Success(String),
}

pub struct WalletPanel<P: WalletProvider> {
    connector: WalletConnector<P>,
    banner: Option<Banner>,
    loading: bool,
    send_form: Option<TransferRequest>,
    balance: Option<NativeBalance>,
}

impl<P: WalletProvider> WalletPanel<P> {
    /// Wraps `connector` and subscribes to provider notifications.
    pub fn mount(mut connector: WalletConnector<P>) -> Self {
        if !connector.mount() {
            warn!("no wallet provider, account and network changes will not be tracked");
        }
        Self {
            connector,
            banner: None,
            loading: false,
            send_form: None,
            balance: None,
        }
    }

    /// Tears down the provider subscription and hands the connector back.
    pub fn unmount(mut self) -> WalletConnector<P> {
        self.connector.unmount();
        self.connector
    }

    pub fn connector(&self) -> &WalletConnector<P> {
        &self.connector
    }

    pub fn banner(&self) -> Option<&Banner> {
        self.banner.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn send_form(&self) -> Option<&TransferRequest> {
        self.send_form.as_ref()
    }

    pub fn is_connected(&self) -> bool {
        self.connector.session().is_connected()
    }

    /// Shortened session address, empty when there is none.
    pub fn address_label(&self) -> String {
        shorten_address(self.connector.session().address())
    }

    /// Balance line of the card; zero until a lookup succeeded.
    pub fn balance_label(&self) -> String {
        match &self.balance {
            Some(balance) => balance.label(),
            None => format!("0.0000 {}", self.connector.network().symbol),
        }
    }

    pub async fn connect(&mut self) {
        self.loading = true;
        match self.connector.connect().await {
            Ok(_) => {
                self.banner = None;
                self.refresh_balance().await;
            }
            Err(err) => self.show_error(err),
        }
        self.loading = false;
    }

    pub fn disconnect(&mut self) {
        self.connector.disconnect();
        self.send_form = None;
        self.balance = None;
    }

    pub fn open_send_form(&mut self) {
        if self.send_form.is_none() {
            self.send_form = Some(TransferRequest::default());
        }
    }

    pub fn cancel_send_form(&mut self) {
        self.send_form = None;
    }

    pub fn set_recipient(&mut self, recipient: impl Into<String>) {
        if let Some(form) = &mut self.send_form {
            form.recipient_address = recipient.into();
        }
    }

    pub fn set_amount(&mut self, amount: impl Into<String>) {
        if let Some(form) = &mut self.send_form {
            form.amount_native = amount.into();
        }
    }

    /// Submits the send form. On success the form closes and the success
    /// banner names amount and recipient; on failure the form stays filled
    /// in so the user can correct it.
    pub async fn submit_transfer(&mut self) {
        let Some(request) = self.send_form.clone() else {
            return;
        };

        self.banner = None;
        self.loading = true;
        match self.connector.send_native(&request).await {
            Ok(outcome) => {
                self.send_form = None;
                if let Err(err) = self.load_balance().await {
                    warn!("balance lookup after transfer failed: {err}");
                }
                self.banner = Some(Banner::Success(outcome.message()));
            }
            Err(err) => self.show_error(err),
        }
        self.loading = false;
    }

    /// Re-reads the balance. A failed lookup keeps the card at zero and
    /// shows the error banner.
    pub async fn refresh_balance(&mut self) {
        if let Err(err) = self.load_balance().await {
            self.show_error(err);
        }
    }

    async fn load_balance(&mut self) -> Result<(), ConnectorError> {
        self.balance = None;
        self.balance = Some(self.connector.balance().await?);
        Ok(())
    }

    /// Waits for one provider notification and updates the card.
    pub async fn next_event(&mut self) -> Option<ProviderEvent> {
        let event = self.connector.next_event().await?;
        self.after_event(&event).await;
        Some(event)
    }

    /// Handles every notification already queued.
    pub async fn process_pending_events(&mut self) -> usize {
        let events = self.connector.drain_events();
        for event in &events {
            self.after_event(event).await;
        }
        events.len()
    }

    async fn after_event(&mut self, event: &ProviderEvent) {
        match event {
            ProviderEvent::AccountsChanged(accounts) if accounts.is_empty() => {
                self.send_form = None;
                self.balance = None;
            }
            ProviderEvent::AccountsChanged(_) => self.refresh_balance().await,
            ProviderEvent::ChainChanged(_) => {}
        }
    }

    fn show_error(&mut self, err: ConnectorError) {
        error!("{err}");
        self.banner = Some(Banner::Error(err.to_string()));
    }
}
