//! Utilities for testing code that populates transaction arguments.

use parking_lot::Mutex;
use txargs_eth::{Address, B256, BlockId, BlockNumberOrTag, U256};

use crate::{Block, CallRequest, ChainReader};

/// A method of [`ChainReader`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReaderMethod {
    /// [`ChainReader::chain_id`]
    ChainId,
    /// [`ChainReader::gas_price`]
    GasPrice,
    /// [`ChainReader::max_priority_fee_per_gas`]
    MaxPriorityFeePerGas,
    /// [`ChainReader::estimate_gas`]
    EstimateGas,
    /// [`ChainReader::transaction_count`]
    TransactionCount,
    /// [`ChainReader::block_by_number`]
    BlockByNumber,
}

/// A recorded call to a [`MockChainReader`], including its arguments.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ReaderCall {
    /// [`ChainReader::chain_id`]
    ChainId,
    /// [`ChainReader::gas_price`]
    GasPrice,
    /// [`ChainReader::max_priority_fee_per_gas`]
    MaxPriorityFeePerGas,
    /// [`ChainReader::estimate_gas`]
    EstimateGas {
        /// The request to estimate
        request: CallRequest,
        /// The block to estimate at
        block: BlockId,
    },
    /// [`ChainReader::transaction_count`]
    TransactionCount {
        /// The queried address
        address: Address,
        /// The block to query at
        block: BlockId,
    },
    /// [`ChainReader::block_by_number`]
    BlockByNumber {
        /// The queried block
        number: BlockNumberOrTag,
        /// Whether full transactions were requested
        full_transactions: bool,
    },
}

impl ReaderCall {
    /// Returns the method that was called.
    pub fn method(&self) -> ReaderMethod {
        match self {
            ReaderCall::ChainId => ReaderMethod::ChainId,
            ReaderCall::GasPrice => ReaderMethod::GasPrice,
            ReaderCall::MaxPriorityFeePerGas => ReaderMethod::MaxPriorityFeePerGas,
            ReaderCall::EstimateGas { .. } => ReaderMethod::EstimateGas,
            ReaderCall::TransactionCount { .. } => ReaderMethod::TransactionCount,
            ReaderCall::BlockByNumber { .. } => ReaderMethod::BlockByNumber,
        }
    }
}

/// Error returned by a [`MockChainReader`] for a method that was configured to
/// fail.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[error("Mock chain reader failed on {0:?}")]
pub struct MockReaderError(pub ReaderMethod);

/// A [`ChainReader`] that returns fixed values and records every call.
///
/// The default instance returns chain ID 18, gas price 28, max priority fee
/// 30, gas estimate 38, transaction count 48 and base fee 58.
#[derive(Debug)]
pub struct MockChainReader {
    chain_id: u64,
    gas_price: U256,
    max_priority_fee_per_gas: U256,
    gas_estimate: U256,
    transaction_count: U256,
    base_fee_per_gas: Option<U256>,
    failing_method: Option<ReaderMethod>,
    calls: Mutex<Vec<ReaderCall>>,
}

impl MockChainReader {
    /// Sets the returned chain ID.
    pub fn with_chain_id(mut self, chain_id: u64) -> Self {
        self.chain_id = chain_id;
        self
    }

    /// Sets the returned gas price.
    pub fn with_gas_price(mut self, gas_price: U256) -> Self {
        self.gas_price = gas_price;
        self
    }

    /// Sets the returned max priority fee per gas.
    pub fn with_max_priority_fee_per_gas(mut self, max_priority_fee_per_gas: U256) -> Self {
        self.max_priority_fee_per_gas = max_priority_fee_per_gas;
        self
    }

    /// Sets the returned gas estimate.
    pub fn with_gas_estimate(mut self, gas_estimate: U256) -> Self {
        self.gas_estimate = gas_estimate;
        self
    }

    /// Sets the returned transaction count.
    pub fn with_transaction_count(mut self, transaction_count: U256) -> Self {
        self.transaction_count = transaction_count;
        self
    }

    /// Sets the base fee of the returned block. `None` simulates a block
    /// before the London hardfork.
    pub fn with_base_fee_per_gas(mut self, base_fee_per_gas: Option<U256>) -> Self {
        self.base_fee_per_gas = base_fee_per_gas;
        self
    }

    /// Makes the provided method return a [`MockReaderError`].
    pub fn failing_on(mut self, method: ReaderMethod) -> Self {
        self.failing_method = Some(method);
        self
    }

    /// Returns all calls made so far, in order.
    pub fn calls(&self) -> Vec<ReaderCall> {
        self.calls.lock().clone()
    }

    fn record(&self, call: ReaderCall) -> Result<(), MockReaderError> {
        let method = call.method();
        self.calls.lock().push(call);

        if self.failing_method == Some(method) {
            Err(MockReaderError(method))
        } else {
            Ok(())
        }
    }
}

impl Default for MockChainReader {
    fn default() -> Self {
        Self {
            chain_id: 18,
            gas_price: U256::from(28u64),
            max_priority_fee_per_gas: U256::from(30u64),
            gas_estimate: U256::from(38u64),
            transaction_count: U256::from(48u64),
            base_fee_per_gas: Some(U256::from(58u64)),
            failing_method: None,
            calls: Mutex::new(Vec::new()),
        }
    }
}

impl ChainReader for MockChainReader {
    type Error = MockReaderError;

    fn chain_id(&self) -> Result<u64, Self::Error> {
        self.record(ReaderCall::ChainId)?;
        Ok(self.chain_id)
    }

    fn gas_price(&self) -> Result<U256, Self::Error> {
        self.record(ReaderCall::GasPrice)?;
        Ok(self.gas_price)
    }

    fn max_priority_fee_per_gas(&self) -> Result<U256, Self::Error> {
        self.record(ReaderCall::MaxPriorityFeePerGas)?;
        Ok(self.max_priority_fee_per_gas)
    }

    fn estimate_gas(&self, request: CallRequest, block: BlockId) -> Result<U256, Self::Error> {
        self.record(ReaderCall::EstimateGas { request, block })?;
        Ok(self.gas_estimate)
    }

    fn transaction_count(&self, address: Address, block: BlockId) -> Result<U256, Self::Error> {
        self.record(ReaderCall::TransactionCount { address, block })?;
        Ok(self.transaction_count)
    }

    fn block_by_number(
        &self,
        number: BlockNumberOrTag,
        full_transactions: bool,
    ) -> Result<Option<Block>, Self::Error> {
        self.record(ReaderCall::BlockByNumber {
            number,
            full_transactions,
        })?;

        Ok(Some(Block {
            hash: Some(B256::ZERO),
            number: number.as_number(),
            base_fee_per_gas: self.base_fee_per_gas,
            ..Block::default()
        }))
    }
}
