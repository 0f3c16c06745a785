#![warn(missing_docs)]

//! Ethereum JSON-RPC transaction arguments
//!
//! Wire types for the transaction objects accepted by `eth_call`,
//! `eth_estimateGas` and `eth_sendTransaction`, and the logic that populates
//! the fields a client left unset by querying a [`ChainReader`].

/// Types for Ethereum JSON-RPC blocks
pub mod block;
/// Input type for `eth_call` and `eth_estimateGas`
mod call_request;
mod codec;
mod conversion;
mod populate;
mod reader;
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
/// Input type for `eth_sendTransaction`
mod transaction_args;

pub use self::{
    block::Block,
    call_request::CallRequest,
    codec::CodecError,
    conversion::ConversionError,
    populate::{PopulateConfig, PopulateError},
    reader::ChainReader,
    transaction_args::TransactionArgs,
};
