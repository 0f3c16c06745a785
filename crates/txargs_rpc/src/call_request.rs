use serde::{Deserialize, Deserializer, Serialize};
use txargs_eth::{
    AccessList, Address, Bytes, SignedAuthorization, U256,
    serde::{bytes, quantity},
};

use crate::codec::{CodecError, DecodedArgs, WireArgs, deserialize_args};

/// For specifying input to methods requiring a transaction object, like
/// `eth_call` and `eth_estimateGas`
///
/// The `type` field is accepted as a decimal or hexadecimal string but always
/// serialized as a hex quantity.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CallRequest {
    /// the address from which the transaction should be sent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<Address>,
    /// the address to which the transaction should be sent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<Address>,
    /// gas
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "quantity::serialize_opt_u64"
    )]
    pub gas: Option<u64>,
    /// gas price
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "quantity::serialize_opt"
    )]
    pub gas_price: Option<U256>,
    /// max base fee per gas sender is willing to pay
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "quantity::serialize_opt"
    )]
    pub max_fee_per_gas: Option<U256>,
    /// miner tip
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "quantity::serialize_opt"
    )]
    pub max_priority_fee_per_gas: Option<U256>,
    /// transaction value
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "quantity::serialize_opt"
    )]
    pub value: Option<U256>,
    /// nonce
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "quantity::serialize_opt_u64"
    )]
    pub nonce: Option<u64>,
    /// transaction data
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "bytes::serialize_opt"
    )]
    pub data: Option<Bytes>,
    /// transaction data; takes precedence over `data`
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "bytes::serialize_opt"
    )]
    pub input: Option<Bytes>,
    /// warm storage access pre-payment
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_list: Option<AccessList>,
    /// EIP-7702 authorizations
    #[serde(skip_serializing_if = "Option::is_none")]
    pub authorization_list: Option<Vec<SignedAuthorization>>,
    /// chain ID
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "quantity::serialize_opt"
    )]
    pub chain_id: Option<U256>,
    /// EIP-2718 type
    #[serde(
        rename = "type",
        skip_serializing_if = "Option::is_none",
        serialize_with = "quantity::serialize_opt_u64"
    )]
    pub transaction_type: Option<u64>,
}

impl CallRequest {
    /// Decodes a call request from JSON.
    pub fn decode(json: &[u8]) -> Result<Self, CodecError> {
        let mut request = Self::default();
        request.merge_json(json)?;
        Ok(request)
    }

    /// Overwrites the fields that are present in the provided JSON object,
    /// leaving all other fields untouched.
    ///
    /// Nothing is overwritten if decoding fails.
    pub fn merge_json(&mut self, json: &[u8]) -> Result<(), CodecError> {
        let decoded = WireArgs::from_json(json)?;
        self.merge(decoded);
        Ok(())
    }

    /// Encodes the call request as JSON.
    pub fn encode(&self) -> Result<Vec<u8>, CodecError> {
        serde_json::to_vec(self).map_err(CodecError::from)
    }

    /// Retrieves the transaction's input, preferring `input` over `data`.
    pub fn input(&self) -> Option<&Bytes> {
        self.input.as_ref().or(self.data.as_ref())
    }

    fn merge(&mut self, decoded: DecodedArgs) {
        if let Some(from) = decoded.from {
            self.from = Some(from);
        }
        if let Some(to) = decoded.to {
            self.to = Some(to);
        }
        if let Some(gas) = decoded.gas {
            self.gas = Some(gas);
        }
        if let Some(gas_price) = decoded.gas_price {
            self.gas_price = Some(gas_price);
        }
        if let Some(max_fee_per_gas) = decoded.max_fee_per_gas {
            self.max_fee_per_gas = Some(max_fee_per_gas);
        }
        if let Some(max_priority_fee_per_gas) = decoded.max_priority_fee_per_gas {
            self.max_priority_fee_per_gas = Some(max_priority_fee_per_gas);
        }
        if let Some(value) = decoded.value {
            self.value = Some(value);
        }
        if let Some(nonce) = decoded.nonce {
            self.nonce = Some(nonce);
        }
        if let Some(Some(data)) = decoded.data {
            self.data = Some(data);
        }
        if let Some(Some(input)) = decoded.input {
            self.input = Some(input);
        }
        if let Some(access_list) = decoded.access_list {
            self.access_list = Some(access_list);
        }
        if let Some(authorization_list) = decoded.authorization_list {
            self.authorization_list = Some(authorization_list);
        }
        if let Some(chain_id) = decoded.chain_id {
            self.chain_id = Some(chain_id);
        }
        if let Some(transaction_type) = decoded.transaction_type {
            self.transaction_type = Some(transaction_type);
        }
    }
}

impl<'de> Deserialize<'de> for CallRequest {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let decoded = deserialize_args(deserializer)?;

        let mut request = Self::default();
        request.merge(decoded);
        Ok(request)
    }
}
