use serde::{Deserialize, Deserializer, Serialize};
use txargs_eth::{
    AccessList, Address, Bytes, SignedAuthorization, U256,
    serde::{bytes, quantity},
};

use crate::{
    CallRequest,
    codec::{CodecError, DecodedArgs, WireArgs, deserialize_args},
};

/// Represents the transaction object of `eth_sendTransaction` and
/// `eth_signTransaction`.
///
/// Clients may leave most fields unset; [`TransactionArgs::populate`] fills
/// them in. The payload is always serialized under the `data` key, with an
/// empty or missing payload serialized as `null`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionArgs {
    /// from address
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<Address>,
    /// to address
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<Address>,
    /// gas
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "quantity::serialize_opt_u64"
    )]
    pub gas: Option<u64>,
    /// legacy, gas Price
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
    /// value of th tx in wei
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "quantity::serialize_opt"
    )]
    pub value: Option<U256>,
    /// Transaction nonce
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "quantity::serialize_opt_u64"
    )]
    pub nonce: Option<u64>,
    /// Any additional data sent. Decoded from either `input` or `data`, with
    /// `input` taking precedence.
    #[serde(serialize_with = "bytes::serialize_nullable")]
    pub data: Option<Bytes>,
    /// warm storage access pre-payment
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_list: Option<AccessList>,
    /// Authorizations are used to temporarily set the code of its signer to
    /// the code referenced by `address`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub authorization_list: Option<Vec<SignedAuthorization>>,
    /// Chain ID
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

impl TransactionArgs {
    /// Decodes transaction arguments from JSON.
    pub fn decode(json: &[u8]) -> Result<Self, CodecError> {
        let mut args = Self::default();
        args.merge_json(json)?;
        Ok(args)
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

    /// Encodes the transaction arguments as JSON.
    pub fn encode(&self) -> Result<Vec<u8>, CodecError> {
        serde_json::to_vec(self).map_err(CodecError::from)
    }

    /// Converts the arguments into a request for `eth_call` or
    /// `eth_estimateGas`.
    pub fn to_call_request(&self) -> CallRequest {
        CallRequest {
            from: self.from,
            to: self.to,
            gas: self.gas,
            gas_price: self.gas_price,
            max_fee_per_gas: self.max_fee_per_gas,
            max_priority_fee_per_gas: self.max_priority_fee_per_gas,
            value: self.value,
            nonce: self.nonce,
            data: None,
            input: self.data.clone(),
            access_list: self.access_list.clone(),
            authorization_list: self.authorization_list.clone(),
            chain_id: self.chain_id,
            transaction_type: self.transaction_type,
        }
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
        // An explicit `null` is how an empty payload is serialized. It never
        // replaces an existing payload.
        match (decoded.input, decoded.data) {
            (Some(Some(input)), _) => self.data = Some(input),
            (_, Some(Some(data))) => self.data = Some(data),
            (Some(None), None) | (None | Some(None), Some(None)) => {
                self.data.get_or_insert_with(Bytes::new);
            }
            (None, None) => {}
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

impl<'de> Deserialize<'de> for TransactionArgs {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let decoded = deserialize_args(deserializer)?;

        let mut args = Self::default();
        args.merge(decoded);
        Ok(args)
    }
}
