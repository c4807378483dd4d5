use std::rc::Rc;

use futures::channel::mpsc::{self, UnboundedReceiver};
use futures::{FutureExt, StreamExt};

use crate::provider::{ListenerId, ProviderEvent, WalletProvider};

/// A live registration for provider notifications.
///
/// Created when the connector mounts; dropping it deregisters the listener it
/// registered, so remounting never stacks duplicate handlers.
pub struct ProviderSubscription<P: WalletProvider> {
    provider: Rc<P>,
    id: ListenerId,
    events: UnboundedReceiver<ProviderEvent>,
}

impl<P: WalletProvider> ProviderSubscription<P> {
    pub fn new(provider: Rc<P>) -> Self {
        let (sink, events) = mpsc::unbounded();
        let id = provider.subscribe(sink);
        log::debug!("subscribed to wallet events as listener {}", id.0);
        Self { provider, id, events }
    }

    /// Waits for the next notification. `None` once the provider dropped
    /// its end of the channel.
    pub async fn next(&mut self) -> Option<ProviderEvent> {
        self.events.next().await
    }

    /// Returns a notification that is already queued, without waiting.
    pub fn try_next(&mut self) -> Option<ProviderEvent> {
        self.events.next().now_or_never().flatten()
    }
}

impl<P: WalletProvider> Drop for ProviderSubscription<P> {
    fn drop(&mut self) {
        self.provider.unsubscribe(self.id);
        log::debug!("unsubscribed wallet listener {}", self.id.0);
    }
}
