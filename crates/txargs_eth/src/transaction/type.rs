/// The type of transaction, as defined by [EIP-2718](https://eips.ethereum.org/EIPS/eip-2718).
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum TransactionType {
    /// Legacy transaction
    Legacy = 0,
    /// EIP-2930 access list transaction
    Eip2930 = 1,
    /// EIP-1559 dynamic fee transaction
    Eip1559 = 2,
    /// EIP-7702 set code transaction
    Eip7702 = 4,
}

impl From<TransactionType> for u8 {
    fn from(transaction_type: TransactionType) -> u8 {
        transaction_type as u8
    }
}

impl From<TransactionType> for u64 {
    fn from(transaction_type: TransactionType) -> u64 {
        u64::from(u8::from(transaction_type))
    }
}

/// Error that occurs when a transaction type tag is not supported.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[error("Unsupported transaction type: {0}")]
pub struct UnknownTransactionType(pub u64);

impl TryFrom<u64> for TransactionType {
    type Error = UnknownTransactionType;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Legacy),
            1 => Ok(Self::Eip2930),
            2 => Ok(Self::Eip1559),
            4 => Ok(Self::Eip7702),
            _ => Err(UnknownTransactionType(value)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transaction_type_tags() {
        for transaction_type in [
            TransactionType::Legacy,
            TransactionType::Eip2930,
            TransactionType::Eip1559,
            TransactionType::Eip7702,
        ] {
            assert_eq!(
                TransactionType::try_from(u64::from(transaction_type)),
                Ok(transaction_type)
            );
        }

        assert_eq!(
            TransactionType::try_from(3),
            Err(UnknownTransactionType(3))
        );
    }
}
