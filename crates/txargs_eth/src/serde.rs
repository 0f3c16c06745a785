//! Helper utilities for encoding values in the Ethereum JSON-RPC format.
//!
//! Quantities are `0x`-prefixed, lowercase, minimal-digit hexadecimal strings
//! and byte sequences are `0x`-prefixed hexadecimal strings. Both are used by
//! serde's `serialize_with` on the RPC argument types.

use std::num::ParseIntError;

/// Error that occurs when parsing a hex quantity.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum QuantityError {
    /// The quantity has no digits after the `0x` prefix.
    #[error("hex string \"0x\"")]
    Empty,
    /// A digit is not a hexadecimal character.
    #[error("invalid hex string")]
    InvalidDigit,
    /// The quantity has superfluous leading zero digits.
    #[error("hex number with leading zero digits")]
    LeadingZero,
    /// The quantity is missing the `0x` prefix.
    #[error("hex string without 0x prefix")]
    MissingPrefix,
    /// The quantity is not a JSON string.
    #[error("non-string quantity")]
    NotAString,
    /// The quantity does not fit the target type.
    #[error("hex number > {bits} bits")]
    Overflow {
        /// Width of the target type
        bits: u32,
    },
}

/// Error that occurs when parsing a hex byte string.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum BytesError {
    /// The byte string contains an invalid character or has an odd length.
    #[error(transparent)]
    Hex(#[from] hex::FromHexError),
    /// The byte string is missing the `0x` prefix.
    #[error("hex string without 0x prefix")]
    MissingPrefix,
}

/// Error that occurs when parsing a transaction type string.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TypeStringError {
    /// The digits are not a valid unsigned integer.
    #[error(transparent)]
    Integer(#[from] ParseIntError),
    /// The type string starts with a sign.
    #[error("signed transaction type")]
    Signed,
}

fn strip_hex_prefix(text: &str) -> Option<&str> {
    text.strip_prefix("0x").or_else(|| text.strip_prefix("0X"))
}

/// Functions for (de)serializing numeric quantities.
pub mod quantity {
    use alloy_primitives::U256;
    use serde::Serializer;

    use super::{QuantityError, strip_hex_prefix};

    /// Maximum number of hex digits of a 64-bit quantity.
    const U64_DIGITS: usize = 16;
    /// Maximum number of hex digits of a 256-bit quantity.
    const U256_DIGITS: usize = 64;

    /// Encodes a 64-bit quantity.
    pub fn encode_u64(value: u64) -> String {
        format!("{value:#x}")
    }

    /// Encodes a 256-bit quantity.
    pub fn encode(value: &U256) -> String {
        if value.is_zero() {
            String::from("0x0")
        } else {
            format!("{value:#x}")
        }
    }

    fn digits(text: &str) -> Result<&str, QuantityError> {
        let digits = strip_hex_prefix(text).ok_or(QuantityError::MissingPrefix)?;
        if digits.is_empty() {
            return Err(QuantityError::Empty);
        }
        if !digits.bytes().all(|byte| byte.is_ascii_hexdigit()) {
            return Err(QuantityError::InvalidDigit);
        }
        if digits.len() > 1 && digits.starts_with('0') {
            return Err(QuantityError::LeadingZero);
        }
        Ok(digits)
    }

    /// Parses a 64-bit quantity.
    pub fn parse_u64(text: &str) -> Result<u64, QuantityError> {
        let digits = digits(text)?;
        if digits.len() > U64_DIGITS {
            return Err(QuantityError::Overflow { bits: u64::BITS });
        }
        u64::from_str_radix(digits, 16).map_err(|_error| QuantityError::InvalidDigit)
    }

    /// Parses a 256-bit quantity.
    pub fn parse(text: &str) -> Result<U256, QuantityError> {
        let digits = digits(text)?;
        if digits.len() > U256_DIGITS {
            return Err(QuantityError::Overflow { bits: 256 });
        }
        U256::from_str_radix(digits, 16).map_err(|_error| QuantityError::InvalidDigit)
    }

    /// Serializes an optional 64-bit quantity. `None` is serialized as
    /// `null`; combine with `skip_serializing_if` to omit it instead.
    pub fn serialize_opt_u64<S>(value: &Option<u64>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(value) => serializer.serialize_str(&encode_u64(*value)),
            None => serializer.serialize_none(),
        }
    }

    /// Serializes an optional 256-bit quantity. `None` is serialized as
    /// `null`; combine with `skip_serializing_if` to omit it instead.
    pub fn serialize_opt<S>(value: &Option<U256>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(value) => serializer.serialize_str(&encode(value)),
            None => serializer.serialize_none(),
        }
    }
}

/// Functions for (de)serializing byte sequences.
pub mod bytes {
    use alloy_primitives::Bytes;
    use serde::Serializer;

    use super::{BytesError, strip_hex_prefix};

    /// Encodes a byte sequence. The empty sequence encodes as `0x`.
    pub fn encode(bytes: &[u8]) -> String {
        hex::encode_prefixed(bytes)
    }

    /// Parses a `0x`-prefixed byte sequence.
    pub fn parse(text: &str) -> Result<Bytes, BytesError> {
        let digits = strip_hex_prefix(text).ok_or(BytesError::MissingPrefix)?;
        // Exactly one prefix is allowed.
        if let Some((index, c)) = digits.char_indices().find(|(_, c)| !c.is_ascii_hexdigit()) {
            return Err(hex::FromHexError::InvalidHexCharacter { c, index }.into());
        }

        let bytes = hex::decode(digits)?;
        Ok(Bytes::from(bytes))
    }

    /// Serializes an optional byte sequence, where `None` is serialized as
    /// `null`.
    pub fn serialize_opt<S>(value: &Option<Bytes>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(bytes) => serializer.serialize_str(&encode(bytes)),
            None => serializer.serialize_none(),
        }
    }

    /// Serializes an optional byte sequence, where both `None` and the empty
    /// sequence are serialized as `null`.
    pub fn serialize_nullable<S>(value: &Option<Bytes>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(bytes) if !bytes.is_empty() => serializer.serialize_str(&encode(bytes)),
            _ => serializer.serialize_none(),
        }
    }
}

/// Parses a transaction type provided as a decimal or `0x`-prefixed
/// hexadecimal string.
pub fn parse_type_string(text: &str) -> Result<u64, TypeStringError> {
    let (digits, radix) = strip_hex_prefix(text).map_or((text, 10), |digits| (digits, 16));
    if digits.starts_with(['+', '-']) {
        return Err(TypeStringError::Signed);
    }

    u64::from_str_radix(digits, radix).map_err(TypeStringError::from)
}

#[cfg(test)]
mod tests {
    use alloy_primitives::U256;

    use super::*;

    #[test]
    fn quantity_encoding_is_minimal() {
        assert_eq!(quantity::encode_u64(0), "0x0");
        assert_eq!(quantity::encode_u64(0x26), "0x26");
        assert_eq!(quantity::encode(&U256::ZERO), "0x0");
        assert_eq!(quantity::encode(&U256::from(146u64)), "0x92");
        assert_eq!(quantity::encode(&U256::MAX), format!("0x{}", "f".repeat(64)));
    }

    #[test]
    fn quantity_parsing() {
        assert_eq!(quantity::parse_u64("0x0"), Ok(0));
        assert_eq!(quantity::parse_u64("0xAbC"), Ok(0xabc));
        assert_eq!(quantity::parse_u64("0Xff"), Ok(0xff));
        assert_eq!(quantity::parse_u64("0xffffffffffffffff"), Ok(u64::MAX));
        assert_eq!(quantity::parse("0x92"), Ok(U256::from(146u64)));
    }

    #[test]
    fn malformed_quantities() {
        assert_eq!(quantity::parse_u64("26"), Err(QuantityError::MissingPrefix));
        assert_eq!(quantity::parse_u64("0x"), Err(QuantityError::Empty));
        assert_eq!(quantity::parse_u64("0x01"), Err(QuantityError::LeadingZero));
        assert_eq!(quantity::parse_u64("0x00"), Err(QuantityError::LeadingZero));
        assert_eq!(quantity::parse_u64("0xzz"), Err(QuantityError::InvalidDigit));
        assert_eq!(quantity::parse_u64("0x-1"), Err(QuantityError::InvalidDigit));
        assert_eq!(
            quantity::parse_u64("0x10000000000000000"),
            Err(QuantityError::Overflow { bits: 64 })
        );
        assert_eq!(
            quantity::parse(&format!("0x1{}", "0".repeat(64))),
            Err(QuantityError::Overflow { bits: 256 })
        );
    }

    #[test]
    fn byte_strings() -> anyhow::Result<()> {
        assert_eq!(bytes::encode(&[]), "0x");
        assert_eq!(bytes::encode(&[0x8b, 0x13, 0x29, 0xe0]), "0x8b1329e0");

        assert!(bytes::parse("0x")?.is_empty());
        let parsed = bytes::parse("0x8B1329e0")?;
        assert_eq!(&parsed[..], &[0x8b, 0x13, 0x29, 0xe0]);

        assert_eq!(bytes::parse("8b1329e0"), Err(BytesError::MissingPrefix));
        assert!(matches!(bytes::parse("0x123"), Err(BytesError::Hex(_))));
        assert!(matches!(bytes::parse("0xgg"), Err(BytesError::Hex(_))));
        assert_eq!(
            bytes::parse("0x0x12"),
            Err(BytesError::Hex(hex::FromHexError::InvalidHexCharacter { c: 'x', index: 1 }))
        );
        assert!(matches!(bytes::parse("0X0x12"), Err(BytesError::Hex(_))));

        Ok(())
    }

    #[test]
    fn type_strings() {
        assert_eq!(parse_type_string("2"), Ok(2));
        assert_eq!(parse_type_string("0x2"), Ok(2));
        assert_eq!(parse_type_string("0x04"), Ok(4));
        assert_eq!(parse_type_string("10"), Ok(10));

        assert!(parse_type_string("").is_err());
        assert!(parse_type_string("0x").is_err());
        assert!(parse_type_string("two").is_err());
        assert_eq!(parse_type_string("-1"), Err(TypeStringError::Signed));
        assert_eq!(parse_type_string("+2"), Err(TypeStringError::Signed));
        assert_eq!(parse_type_string("0x+2"), Err(TypeStringError::Signed));
        assert_eq!(parse_type_string("0X-2"), Err(TypeStringError::Signed));
    }
}
