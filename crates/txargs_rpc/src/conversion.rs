use txargs_eth::{
    AccessList, AccessListItem, Address, TxKind, U256,
    transaction::{self, TransactionType, UnknownTransactionType},
};

use crate::TransactionArgs;

/// Error that occurs when converting transaction arguments into a typed
/// transaction request.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum ConversionError {
    /// A field required by the transaction type is unset.
    #[error("Missing field '{0}'")]
    MissingField(&'static str),
    /// The transaction type tag is not supported.
    #[error(transparent)]
    UnsupportedType(#[from] UnknownTransactionType),
    /// The chain ID does not fit 64 bits.
    #[error("Chain ID {0} exceeds 64 bits")]
    ChainIdOverflow(U256),
    /// An authorization list was provided for a transaction type that uses
    /// `gasPrice`.
    #[error("Transaction type {0:?} does not support an authorization list")]
    UnexpectedAuthorizationList(TransactionType),
}

impl TransactionArgs {
    /// Constructs transaction arguments from a typed transaction request and
    /// its sender.
    pub fn from_transaction(from: Address, request: &transaction::Request) -> Self {
        let args = Self {
            from: Some(from),
            transaction_type: Some(request.transaction_type().into()),
            ..Self::default()
        };

        match request {
            transaction::Request::Legacy(request) => Self {
                to: request.kind.to().copied(),
                gas: Some(request.gas_limit),
                gas_price: Some(request.gas_price),
                value: Some(request.value),
                nonce: Some(request.nonce),
                data: Some(request.input.clone()),
                chain_id: request.chain_id.map(U256::from),
                ..args
            },
            transaction::Request::Eip2930(request) => Self {
                to: request.kind.to().copied(),
                gas: Some(request.gas_limit),
                gas_price: Some(request.gas_price),
                value: Some(request.value),
                nonce: Some(request.nonce),
                data: Some(request.input.clone()),
                access_list: Some(AccessList(request.access_list.clone())),
                chain_id: Some(U256::from(request.chain_id)),
                ..args
            },
            transaction::Request::Eip1559(request) => Self {
                to: request.kind.to().copied(),
                gas: Some(request.gas_limit),
                max_fee_per_gas: Some(request.max_fee_per_gas),
                max_priority_fee_per_gas: Some(request.max_priority_fee_per_gas),
                value: Some(request.value),
                nonce: Some(request.nonce),
                data: Some(request.input.clone()),
                access_list: Some(AccessList(request.access_list.clone())),
                chain_id: Some(U256::from(request.chain_id)),
                ..args
            },
            transaction::Request::Eip7702(request) => Self {
                to: Some(request.to),
                gas: Some(request.gas_limit),
                max_fee_per_gas: Some(request.max_fee_per_gas),
                max_priority_fee_per_gas: Some(request.max_priority_fee_per_gas),
                value: Some(request.value),
                nonce: Some(request.nonce),
                data: Some(request.input.clone()),
                access_list: Some(AccessList(request.access_list.clone())),
                authorization_list: Some(request.authorization_list.clone()),
                chain_id: Some(U256::from(request.chain_id)),
                ..args
            },
        }
    }

    /// Converts populated transaction arguments into the typed transaction
    /// request selected by `type`.
    ///
    /// A legacy `type` with an access list yields an EIP-2930 request and a
    /// dynamic fee `type` with an authorization list yields an EIP-7702
    /// request. An unset `value` or payload defaults to zero or empty,
    /// respectively.
    pub fn to_transaction_request(&self) -> Result<transaction::Request, ConversionError> {
        let transaction_type = self
            .transaction_type
            .ok_or(ConversionError::MissingField("type"))?;

        let nonce = self.nonce.ok_or(ConversionError::MissingField("nonce"))?;
        let gas_limit = self.gas.ok_or(ConversionError::MissingField("gas"))?;
        let value = self.value.unwrap_or(U256::ZERO);
        let input = self.data.clone().unwrap_or_default();
        let kind = self.to.map_or(TxKind::Create, TxKind::Call);

        let transaction_type = TransactionType::try_from(transaction_type)?;
        let request = match transaction_type {
            TransactionType::Legacy | TransactionType::Eip2930
                if self.authorization_list.is_some() =>
            {
                return Err(ConversionError::UnexpectedAuthorizationList(transaction_type));
            }
            TransactionType::Legacy if self.access_list.is_none() => {
                transaction::request::Legacy {
                    nonce,
                    gas_price: self.required_gas_price()?,
                    gas_limit,
                    kind,
                    value,
                    input,
                    chain_id: self.chain_id.map(checked_chain_id).transpose()?,
                }
                .into()
            }
            TransactionType::Legacy | TransactionType::Eip2930 => transaction::request::Eip2930 {
                chain_id: self.required_chain_id()?,
                nonce,
                gas_price: self.required_gas_price()?,
                gas_limit,
                kind,
                value,
                input,
                access_list: self.access_list_items(),
            }
            .into(),
            TransactionType::Eip1559 if self.authorization_list.is_none() => {
                transaction::request::Eip1559 {
                    chain_id: self.required_chain_id()?,
                    nonce,
                    max_priority_fee_per_gas: self.required_max_priority_fee_per_gas()?,
                    max_fee_per_gas: self.required_max_fee_per_gas()?,
                    gas_limit,
                    kind,
                    value,
                    input,
                    access_list: self.access_list_items(),
                }
                .into()
            }
            TransactionType::Eip1559 | TransactionType::Eip7702 => transaction::request::Eip7702 {
                chain_id: self.required_chain_id()?,
                nonce,
                max_priority_fee_per_gas: self.required_max_priority_fee_per_gas()?,
                max_fee_per_gas: self.required_max_fee_per_gas()?,
                gas_limit,
                to: self.to.ok_or(ConversionError::MissingField("to"))?,
                value,
                input,
                access_list: self.access_list_items(),
                authorization_list: self.authorization_list.clone().unwrap_or_default(),
            }
            .into(),
        };

        Ok(request)
    }

    fn access_list_items(&self) -> Vec<AccessListItem> {
        self.access_list
            .as_ref()
            .map_or_else(Vec::new, |access_list| access_list.0.clone())
    }

    fn required_gas_price(&self) -> Result<U256, ConversionError> {
        self.gas_price
            .ok_or(ConversionError::MissingField("gasPrice"))
    }

    fn required_max_fee_per_gas(&self) -> Result<U256, ConversionError> {
        self.max_fee_per_gas
            .ok_or(ConversionError::MissingField("maxFeePerGas"))
    }

    fn required_max_priority_fee_per_gas(&self) -> Result<U256, ConversionError> {
        self.max_priority_fee_per_gas
            .ok_or(ConversionError::MissingField("maxPriorityFeePerGas"))
    }

    fn required_chain_id(&self) -> Result<u64, ConversionError> {
        self.chain_id
            .ok_or(ConversionError::MissingField("chainId"))
            .and_then(checked_chain_id)
    }
}

fn checked_chain_id(chain_id: U256) -> Result<u64, ConversionError> {
    u64::try_from(chain_id).map_err(|_error| ConversionError::ChainIdOverflow(chain_id))
}
