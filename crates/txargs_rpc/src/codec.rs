//! Decoding of the JSON object shared by [`crate::CallRequest`] and
//! [`crate::TransactionArgs`].
//!
//! Quantities are first deserialized as raw strings and only then parsed, so
//! that malformed input is reported with the offending field and a precise
//! error kind instead of a generic serde message.

use serde::{Deserialize, Deserializer};
use serde_json::Value;
use txargs_eth::{
    AccessList, Address, Bytes, SignedAuthorization, U256,
    serde::{BytesError, QuantityError, TypeStringError, bytes, parse_type_string, quantity},
};

/// Error that occurs when decoding or encoding transaction arguments.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// The `type` field is not a decimal or hexadecimal integer string.
    #[error("Invalid transaction type string '{value}': {source}")]
    InvalidTypeString {
        /// The provided type string
        value: String,
        /// The underlying parse error
        source: TypeStringError,
    },
    /// A JSON syntax or structural error.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    /// A byte sequence field is not a valid `0x`-prefixed hex string.
    #[error("Malformed byte string in field '{field}': {source}")]
    MalformedByteString {
        /// Name of the field
        field: &'static str,
        /// The underlying parse error
        source: BytesError,
    },
    /// A numeric field is not a valid hex quantity.
    #[error("Malformed quantity in field '{field}': {source}")]
    MalformedQuantity {
        /// Name of the field
        field: &'static str,
        /// The underlying parse error
        source: QuantityError,
    },
}

/// Distinguishes a field that is absent from one that is explicitly `null`.
#[allow(clippy::option_option)]
fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// The JSON object as provided by the client, with quantities still in their
/// raw JSON form.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
#[allow(clippy::option_option)]
pub(crate) struct WireArgs {
    from: Option<Address>,
    to: Option<Address>,
    gas: Option<Value>,
    gas_price: Option<Value>,
    max_fee_per_gas: Option<Value>,
    max_priority_fee_per_gas: Option<Value>,
    value: Option<Value>,
    nonce: Option<Value>,
    #[serde(default, deserialize_with = "nullable")]
    data: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    input: Option<Option<String>>,
    access_list: Option<AccessList>,
    authorization_list: Option<Vec<SignedAuthorization>>,
    chain_id: Option<Value>,
    #[serde(rename = "type")]
    transaction_type: Option<String>,
}

/// Fields that were present and non-`null` in the decoded JSON object.
///
/// `data` and `input` additionally record an explicit `null` as
/// `Some(None)`.
#[derive(Debug, Default)]
#[allow(clippy::option_option)]
pub(crate) struct DecodedArgs {
    pub from: Option<Address>,
    pub to: Option<Address>,
    pub gas: Option<u64>,
    pub gas_price: Option<U256>,
    pub max_fee_per_gas: Option<U256>,
    pub max_priority_fee_per_gas: Option<U256>,
    pub value: Option<U256>,
    pub nonce: Option<u64>,
    pub data: Option<Option<Bytes>>,
    pub input: Option<Option<Bytes>>,
    pub access_list: Option<AccessList>,
    pub authorization_list: Option<Vec<SignedAuthorization>>,
    pub chain_id: Option<U256>,
    pub transaction_type: Option<u64>,
}

fn parse_quantity<T>(
    field: &'static str,
    value: Option<&Value>,
    parse: impl FnOnce(&str) -> Result<T, QuantityError>,
) -> Result<Option<T>, CodecError> {
    value
        .map(|value| {
            value
                .as_str()
                .ok_or(QuantityError::NotAString)
                .and_then(parse)
                .map_err(|source| CodecError::MalformedQuantity { field, source })
        })
        .transpose()
}

fn parse_u64(field: &'static str, value: Option<&Value>) -> Result<Option<u64>, CodecError> {
    parse_quantity(field, value, quantity::parse_u64)
}

fn parse_u256(field: &'static str, value: Option<&Value>) -> Result<Option<U256>, CodecError> {
    parse_quantity(field, value, quantity::parse)
}

#[allow(clippy::option_option)]
fn parse_bytes(
    field: &'static str,
    text: Option<Option<&str>>,
) -> Result<Option<Option<Bytes>>, CodecError> {
    text.map(|text| {
        text.map(|text| {
            bytes::parse(text).map_err(|source| CodecError::MalformedByteString { field, source })
        })
        .transpose()
    })
    .transpose()
}

fn parse_type(text: Option<&str>) -> Result<Option<u64>, CodecError> {
    text.map(|text| {
        parse_type_string(text).map_err(|source| CodecError::InvalidTypeString {
            value: text.to_owned(),
            source,
        })
    })
    .transpose()
}

impl WireArgs {
    /// Parses the textual fields.
    pub fn decode(self) -> Result<DecodedArgs, CodecError> {
        Ok(DecodedArgs {
            gas: parse_u64("gas", self.gas.as_ref())?,
            gas_price: parse_u256("gasPrice", self.gas_price.as_ref())?,
            max_fee_per_gas: parse_u256("maxFeePerGas", self.max_fee_per_gas.as_ref())?,
            max_priority_fee_per_gas: parse_u256(
                "maxPriorityFeePerGas",
                self.max_priority_fee_per_gas.as_ref(),
            )?,
            value: parse_u256("value", self.value.as_ref())?,
            nonce: parse_u64("nonce", self.nonce.as_ref())?,
            data: parse_bytes("data", self.data.as_ref().map(Option::as_deref))?,
            input: parse_bytes("input", self.input.as_ref().map(Option::as_deref))?,
            chain_id: parse_u256("chainId", self.chain_id.as_ref())?,
            transaction_type: parse_type(self.transaction_type.as_deref())?,
            from: self.from,
            to: self.to,
            access_list: self.access_list,
            authorization_list: self.authorization_list,
        })
    }

    /// Deserializes and parses a JSON object.
    pub fn from_json(json: &[u8]) -> Result<DecodedArgs, CodecError> {
        let wire: Self = serde_json::from_slice(json)?;
        wire.decode()
    }
}

/// Deserializes and parses a JSON object through a serde [`Deserializer`].
pub(crate) fn deserialize_args<'de, D>(deserializer: D) -> Result<DecodedArgs, D::Error>
where
    D: Deserializer<'de>,
{
    WireArgs::deserialize(deserializer)?
        .decode()
        .map_err(serde::de::Error::custom)
}
