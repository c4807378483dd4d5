use serde::Serialize;

/// What the page knows about the connected wallet.
///
/// `is_connected` is only ever true while `address` is non-empty and the
/// last chain observed from the provider is the target chain.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct WalletSession {
    address: String,
    is_connected: bool,
    chain_id: Option<u64>,
}

impl WalletSession {
    /// A session for `address` on `chain_id`, connected.
    pub fn connected(address: impl Into<String>, chain_id: u64) -> Self {
        let address = address.into();
        Self {
            is_connected: !address.is_empty(),
            address,
            chain_id: Some(chain_id),
        }
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn is_connected(&self) -> bool {
        self.is_connected
    }

    pub fn chain_id(&self) -> Option<u64> {
        self.chain_id
    }

    /// Forgets everything; the state a fresh page starts in.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Applies an `accountsChanged` notification. An empty list clears the
    /// session; otherwise the first account becomes the address.
    pub fn apply_accounts(&mut self, accounts: &[String]) {
        match accounts.first() {
            Some(first) if !first.is_empty() => self.address = first.clone(),
            _ => self.clear(),
        }
    }

    /// Applies a `chainChanged` notification. Leaving the target chain drops
    /// the connection flag but keeps the address.
    pub fn apply_chain(&mut self, chain_id: u64, target_chain_id: u64) {
        self.chain_id = Some(chain_id);
        if chain_id != target_chain_id {
            self.is_connected = false;
        }
    }
}
