use serde::{Deserialize, Serialize};
use txargs_eth::{B256, U256};

/// Block object returned by `eth_getBlockByNumber`, limited to the header
/// fields consumed while populating transaction arguments.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Block {
    /// Hash of the block. None when it's a pending block.
    pub hash: Option<B256>,
    /// hash of the parent block.
    pub parent_hash: B256,
    /// the block number. None when it's a pending block.
    #[serde(default, with = "alloy_serde::quantity::opt")]
    pub number: Option<u64>,
    /// the unix timestamp for when the block was collated
    #[serde(with = "alloy_serde::quantity")]
    pub timestamp: u64,
    /// the maximum gas allowed in this block
    #[serde(with = "alloy_serde::quantity")]
    pub gas_limit: u64,
    /// the total used gas by all transactions in this block
    #[serde(with = "alloy_serde::quantity")]
    pub gas_used: u64,
    /// base fee per gas. None before the London hardfork.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_fee_per_gas: Option<U256>,
    /// Hashes of the block's transactions
    #[serde(default)]
    pub transactions: Vec<B256>,
}
