use auto_impl::auto_impl;
use txargs_eth::{Address, BlockId, BlockNumberOrTag, U256};

use crate::{Block, CallRequest};

/// Trait for reading the chain state needed to populate transaction
/// arguments.
///
/// Implementations may be backed by local state, a remote JSON-RPC endpoint or
/// a cache. Every call is synchronous; retries and timeouts are the
/// implementation's concern.
#[auto_impl(&, Box, Arc)]
pub trait ChainReader {
    /// The reader's error type
    type Error;

    /// Retrieves the chain ID.
    fn chain_id(&self) -> Result<u64, Self::Error>;

    /// Retrieves the suggested gas price for legacy transactions.
    fn gas_price(&self) -> Result<U256, Self::Error>;

    /// Retrieves the suggested max priority fee per gas.
    fn max_priority_fee_per_gas(&self) -> Result<U256, Self::Error>;

    /// Estimates the gas needed to execute the provided call at the provided
    /// block.
    fn estimate_gas(&self, request: CallRequest, block: BlockId) -> Result<U256, Self::Error>;

    /// Retrieves the number of transactions sent from the provided address at
    /// the provided block.
    fn transaction_count(&self, address: Address, block: BlockId) -> Result<U256, Self::Error>;

    /// Retrieves the block with the provided number, if it exists.
    fn block_by_number(
        &self,
        number: BlockNumberOrTag,
        full_transactions: bool,
    ) -> Result<Option<Block>, Self::Error>;
}
