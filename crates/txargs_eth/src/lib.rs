#![warn(missing_docs)]

//! Ethereum types
//!
//! Ethereum primitives, wire encoding helpers and transaction envelopes as
//! needed by the `txargs` RPC argument types.

/// Hex encoding helpers for the Ethereum JSON-RPC wire format
pub mod serde;
/// Ethereum transaction types
pub mod transaction;

pub use alloy_eips::{
    BlockId, BlockNumberOrTag,
    eip2930::{AccessList, AccessListItem},
    eip7702::{Authorization, SignedAuthorization},
};
pub use alloy_primitives::{Address, B256, Bytes, ChainId, TxKind, U256, address, b256, bytes};
