use serde::Serialize;

/// Definition of an EVM-compatible blockchain network.
#[derive(Debug, Clone, Serialize)]
pub struct EvmChain {
    pub chain_id: u64,
    pub name: &'static str,
    /// Name of the native currency as registered with a wallet.
    pub currency_name: &'static str,
    /// Currency symbol as registered with a wallet.
    pub currency_symbol: &'static str,
    /// Currency symbol shown next to amounts.
    pub symbol: &'static str,
    pub decimals: u8,
    pub rpc_url: &'static str,
    pub explorer_url: &'static str,
    pub is_testnet: bool,
}

/// Ethereum Mainnet (chain ID 1).
pub const ETHEREUM: EvmChain = EvmChain {
    chain_id: 1,
    name: "Ethereum",
    currency_name: "Ether",
    currency_symbol: "ETH",
    symbol: "ETH",
    decimals: 18,
    rpc_url: "https://eth.llamarpc.com",
    explorer_url: "https://etherscan.io",
    is_testnet: false,
};

/// Polygon PoS (chain ID 137).
pub const POLYGON: EvmChain = EvmChain {
    chain_id: 137,
    name: "Polygon",
    currency_name: "MATIC",
    currency_symbol: "MATIC",
    symbol: "MATIC",
    decimals: 18,
    rpc_url: "https://polygon-rpc.com",
    explorer_url: "https://polygonscan.com",
    is_testnet: false,
};

/// Arbitrum One (chain ID 42161).
pub const ARBITRUM: EvmChain = EvmChain {
    chain_id: 42161,
    name: "Arbitrum One",
    currency_name: "Ether",
    currency_symbol: "ETH",
    symbol: "ETH",
    decimals: 18,
    rpc_url: "https://arb1.arbitrum.io/rpc",
    explorer_url: "https://arbiscan.io",
    is_testnet: false,
};

/// Base (chain ID 8453).
pub const BASE: EvmChain = EvmChain {
    chain_id: 8453,
    name: "Base",
    currency_name: "Ether",
    currency_symbol: "ETH",
    symbol: "ETH",
    decimals: 18,
    rpc_url: "https://mainnet.base.org",
    explorer_url: "https://basescan.org",
    is_testnet: false,
};

/// Optimism (chain ID 10).
pub const OPTIMISM: EvmChain = EvmChain {
    chain_id: 10,
    name: "Optimism",
    currency_name: "Ether",
    currency_symbol: "ETH",
    symbol: "ETH",
    decimals: 18,
    rpc_url: "https://mainnet.optimism.io",
    explorer_url: "https://optimistic.etherscan.io",
    is_testnet: false,
};

/// Sepolia Testnet (chain ID 11155111). Default connector target.
pub const SEPOLIA: EvmChain = EvmChain {
    chain_id: 11155111,
    name: "Sepolia Test Network",
    currency_name: "SepoliaETH",
    currency_symbol: "SepoliaETH",
    symbol: "ETH",
    decimals: 18,
    rpc_url: "https://rpc.sepolia.org",
    explorer_url: "https://sepolia.etherscan.io",
    is_testnet: true,
};

/// Polygon Amoy Testnet (chain ID 80002).
pub const POLYGON_AMOY: EvmChain = EvmChain {
    chain_id: 80002,
    name: "Polygon Amoy",
    currency_name: "MATIC",
    currency_symbol: "MATIC",
    symbol: "MATIC",
    decimals: 18,
    rpc_url: "https://rpc-amoy.polygon.technology",
    explorer_url: "https://amoy.polygonscan.com",
    is_testnet: true,
};

/// All networks a connector can be configured to target.
const ALL_CHAINS: &[&EvmChain] = &[
    &ETHEREUM,
    &POLYGON,
    &ARBITRUM,
    &BASE,
    &OPTIMISM,
    &SEPOLIA,
    &POLYGON_AMOY,
];

/// Returns the chain definition for a given chain ID, or `None` if unsupported.
pub fn get_chain(chain_id: u64) -> Option<&'static EvmChain> {
    ALL_CHAINS
        .iter()
        .find(|c| c.chain_id == chain_id)
        .copied()
}

/// Returns all supported EVM chain definitions.
pub fn supported_chains() -> Vec<&'static EvmChain> {
    ALL_CHAINS.to_vec()
}

/// Formats a chain id the way wallet RPC methods expect it (`0x`-prefixed,
/// lowercase, no leading zeros).
pub fn hex_chain_id(chain_id: u64) -> String {
    format!("0x{chain_id:x}")
}

/// Native currency block of an EIP-3085 `wallet_addEthereumChain` request.
#[derive(Debug, Clone, Serialize)]
pub struct NativeCurrency<'a> {
    pub name: &'a str,
    pub symbol: &'a str,
    pub decimals: u8,
}

/// EIP-3085 `wallet_addEthereumChain` parameter object.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddChainParameters<'a> {
    pub chain_id: String,
    pub chain_name: &'a str,
    pub native_currency: NativeCurrency<'a>,
    pub rpc_urls: Vec<&'a str>,
    pub block_explorer_urls: Vec<&'a str>,
}

impl EvmChain {
    /// The chain id in wallet RPC form, e.g. `0xaa36a7` for Sepolia.
    pub fn hex_chain_id(&self) -> String {
        hex_chain_id(self.chain_id)
    }

    /// Builds the full descriptor a wallet needs to register this network.
    pub fn add_chain_parameters(&self) -> AddChainParameters<'_> {
        AddChainParameters {
            chain_id: self.hex_chain_id(),
            chain_name: self.name,
            native_currency: NativeCurrency {
                name: self.currency_name,
                symbol: self.currency_symbol,
                decimals: self.decimals,
            },
            rpc_urls: vec![self.rpc_url],
            block_explorer_urls: vec![self.explorer_url],
        }
    }

    /// Explorer page for a transaction hash.
    pub fn transaction_url(&self, tx_hash: &str) -> String {
        format!("{}/tx/{}", self.explorer_url, tx_hash)
    }
}
