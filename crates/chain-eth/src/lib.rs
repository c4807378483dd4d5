//! Ethereum/EVM primitives for the wallet connector.
//!
//! This crate provides:
//! - EVM network descriptors and the `wallet_addEthereumChain` payload
//! - Address validation with EIP-55 checksums
//! - Decimal <-> smallest-unit (wei) conversion
//! - Native transfer requests and receipt decoding for JSON-RPC

pub mod address;
pub mod chains;
pub mod error;
pub mod transaction;
pub mod units;
