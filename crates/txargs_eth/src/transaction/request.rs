use alloy_primitives::{Address, Bytes, TxKind, U256};

use super::TransactionType;
use crate::{AccessListItem, SignedAuthorization};

/// A legacy transaction, optionally replay-protected by an
/// [EIP-155](https://eips.ethereum.org/EIPS/eip-155) chain ID.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Legacy {
    pub nonce: u64,
    pub gas_price: U256,
    pub gas_limit: u64,
    pub kind: TxKind,
    pub value: U256,
    pub input: Bytes,
    pub chain_id: Option<u64>,
}

/// An [EIP-2930](https://eips.ethereum.org/EIPS/eip-2930) transaction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Eip2930 {
    pub chain_id: u64,
    pub nonce: u64,
    pub gas_price: U256,
    pub gas_limit: u64,
    pub kind: TxKind,
    pub value: U256,
    pub input: Bytes,
    pub access_list: Vec<AccessListItem>,
}

/// An [EIP-1559](https://eips.ethereum.org/EIPS/eip-1559) transaction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Eip1559 {
    pub chain_id: u64,
    pub nonce: u64,
    pub max_priority_fee_per_gas: U256,
    pub max_fee_per_gas: U256,
    pub gas_limit: u64,
    pub kind: TxKind,
    pub value: U256,
    pub input: Bytes,
    pub access_list: Vec<AccessListItem>,
}

/// An [EIP-7702](https://eips.ethereum.org/EIPS/eip-7702) transaction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Eip7702 {
    pub chain_id: u64,
    pub nonce: u64,
    pub max_priority_fee_per_gas: U256,
    pub max_fee_per_gas: U256,
    pub gas_limit: u64,
    // Set code transactions cannot create contracts.
    pub to: Address,
    pub value: U256,
    pub input: Bytes,
    pub access_list: Vec<AccessListItem>,
    pub authorization_list: Vec<SignedAuthorization>,
}

/// Container type for the supported transaction requests
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Request {
    /// A legacy transaction request
    Legacy(Legacy),
    /// An EIP-2930 transaction request
    Eip2930(Eip2930),
    /// An EIP-1559 transaction request
    Eip1559(Eip1559),
    /// An EIP-7702 transaction request
    Eip7702(Eip7702),
}

impl Request {
    /// Retrieves the instance's chain ID.
    pub fn chain_id(&self) -> Option<u64> {
        match self {
            Request::Legacy(transaction) => transaction.chain_id,
            Request::Eip2930(transaction) => Some(transaction.chain_id),
            Request::Eip1559(transaction) => Some(transaction.chain_id),
            Request::Eip7702(transaction) => Some(transaction.chain_id),
        }
    }

    /// Retrieves the instance's gas limit.
    pub fn gas_limit(&self) -> u64 {
        match self {
            Request::Legacy(transaction) => transaction.gas_limit,
            Request::Eip2930(transaction) => transaction.gas_limit,
            Request::Eip1559(transaction) => transaction.gas_limit,
            Request::Eip7702(transaction) => transaction.gas_limit,
        }
    }

    /// Retrieves the instance's nonce.
    pub fn nonce(&self) -> u64 {
        match self {
            Request::Legacy(transaction) => transaction.nonce,
            Request::Eip2930(transaction) => transaction.nonce,
            Request::Eip1559(transaction) => transaction.nonce,
            Request::Eip7702(transaction) => transaction.nonce,
        }
    }

    /// Retrieves the instance's transaction type.
    pub fn transaction_type(&self) -> TransactionType {
        match self {
            Request::Legacy(_) => TransactionType::Legacy,
            Request::Eip2930(_) => TransactionType::Eip2930,
            Request::Eip1559(_) => TransactionType::Eip1559,
            Request::Eip7702(_) => TransactionType::Eip7702,
        }
    }
}

impl From<Legacy> for Request {
    fn from(transaction: Legacy) -> Self {
        Self::Legacy(transaction)
    }
}

impl From<Eip2930> for Request {
    fn from(transaction: Eip2930) -> Self {
        Self::Eip2930(transaction)
    }
}

impl From<Eip1559> for Request {
    fn from(transaction: Eip1559) -> Self {
        Self::Eip1559(transaction)
    }
}

impl From<Eip7702> for Request {
    fn from(transaction: Eip7702) -> Self {
        Self::Eip7702(transaction)
    }
}
