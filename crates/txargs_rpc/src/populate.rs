use txargs_eth::{BlockId, BlockNumberOrTag, Bytes, U256, transaction::TransactionType};

use crate::{ChainReader, TransactionArgs};

/// Configuration for populating transaction arguments.
#[derive(Clone, Debug, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PopulateConfig {
    /// The block at which the gas limit is estimated.
    pub estimate_gas_block: BlockId,
    /// The block at which the sender's nonce is read.
    pub nonce_block: BlockId,
    /// The block whose base fee seeds the default max fee per gas.
    pub base_fee_block: BlockNumberOrTag,
}

impl Default for PopulateConfig {
    fn default() -> Self {
        Self {
            estimate_gas_block: BlockId::latest(),
            nonce_block: BlockId::pending(),
            base_fee_block: BlockNumberOrTag::Latest,
        }
    }
}

/// Error that occurs when populating transaction arguments.
#[derive(Debug, thiserror::Error)]
pub enum PopulateError<ReaderErrorT> {
    /// Both legacy and dynamic fee fields were provided.
    #[error(
        "Cannot specify both gasPrice and maxFeePerGas or maxPriorityFeePerGas; the fee models are mutually exclusive"
    )]
    AmbiguousFeeModel,
    /// The max fee per gas derived from the base fee is out of range.
    #[error(
        "Cannot derive maxFeePerGas from baseFeePerGas {base_fee_per_gas} and maxPriorityFeePerGas {max_priority_fee_per_gas}"
    )]
    InvalidFeeValue {
        /// The base fee per gas of the queried block
        base_fee_per_gas: U256,
        /// The resolved max priority fee per gas
        max_priority_fee_per_gas: U256,
    },
    /// The queried block does not exist or has no base fee.
    #[error("Block {0:?} has no baseFeePerGas")]
    MissingBaseFee(BlockNumberOrTag),
    /// The nonce cannot be determined without a sender.
    #[error("Missing 'from' address; it is required to determine the transaction nonce")]
    MissingSender,
    /// The reader returned a quantity that does not fit the field.
    #[error("The chain reader returned {value} for {field}, which exceeds 64 bits")]
    QuantityOverflow {
        /// Name of the field
        field: &'static str,
        /// The returned value
        value: U256,
    },
    /// An error that occurred while reading the chain state.
    #[error(transparent)]
    Reader(ReaderErrorT),
}

enum FeeModel {
    Legacy,
    DynamicFee,
}

fn to_u64<ReaderErrorT>(
    field: &'static str,
    value: U256,
) -> Result<u64, PopulateError<ReaderErrorT>> {
    u64::try_from(value).map_err(|_error| PopulateError::QuantityOverflow { field, value })
}

impl TransactionArgs {
    /// Populates all unset fields using the default [`PopulateConfig`].
    ///
    /// See [`TransactionArgs::populate_with`].
    pub fn populate<ReaderT: ChainReader + ?Sized>(
        &mut self,
        reader: &ReaderT,
    ) -> Result<(), PopulateError<ReaderT::Error>> {
        self.populate_with(reader, &PopulateConfig::default())
    }

    /// Populates all unset fields, querying the reader for chain state.
    ///
    /// The transaction type is derived from the fee fields: `gasPrice`
    /// selects a legacy transaction, anything else a dynamic fee transaction
    /// whose missing fee fields are filled from the reader. Fields provided
    /// by the client are never overwritten, except `type`.
    ///
    /// The arguments are only modified if all fields were populated
    /// successfully.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip_all))]
    pub fn populate_with<ReaderT: ChainReader + ?Sized>(
        &mut self,
        reader: &ReaderT,
        config: &PopulateConfig,
    ) -> Result<(), PopulateError<ReaderT::Error>> {
        let fee_model = self.fee_model()?;
        if self.nonce.is_none() && self.from.is_none() {
            return Err(PopulateError::MissingSender);
        }

        let mut populated = self.clone();
        match fee_model {
            FeeModel::Legacy => {
                populated.transaction_type = Some(TransactionType::Legacy.into());
            }
            FeeModel::DynamicFee => {
                populated.transaction_type = Some(TransactionType::Eip1559.into());
                populated.populate_dynamic_fees(reader, config)?;
            }
        }

        // Estimation includes the resolved fee fields.
        if populated.gas.is_none() {
            log::trace!("Estimating gas at block {:?}", config.estimate_gas_block);
            let estimate = reader
                .estimate_gas(populated.to_call_request(), config.estimate_gas_block)
                .map_err(PopulateError::Reader)?;

            let gas = to_u64("gas", estimate)?;
            log::debug!("Defaulting gas to {gas}");
            populated.gas = Some(gas);
        }

        if populated.nonce.is_none() {
            let Some(from) = populated.from else {
                return Err(PopulateError::MissingSender);
            };

            log::trace!("Retrieving transaction count of {from} at block {:?}", config.nonce_block);
            let count = reader
                .transaction_count(from, config.nonce_block)
                .map_err(PopulateError::Reader)?;

            let nonce = to_u64("nonce", count)?;
            log::debug!("Defaulting nonce to {nonce}");
            populated.nonce = Some(nonce);
        }

        if populated.chain_id.is_none() {
            let chain_id = reader.chain_id().map_err(PopulateError::Reader)?;
            log::debug!("Defaulting chainId to {chain_id}");
            populated.chain_id = Some(U256::from(chain_id));
        }

        populated.value.get_or_insert(U256::ZERO);
        populated.data.get_or_insert_with(Bytes::new);

        *self = populated;
        Ok(())
    }

    fn fee_model<ReaderErrorT>(&self) -> Result<FeeModel, PopulateError<ReaderErrorT>> {
        let has_dynamic_fee =
            self.max_fee_per_gas.is_some() || self.max_priority_fee_per_gas.is_some();

        match (self.gas_price.is_some(), has_dynamic_fee) {
            (true, true) => Err(PopulateError::AmbiguousFeeModel),
            (true, false) => Ok(FeeModel::Legacy),
            (false, _) => Ok(FeeModel::DynamicFee),
        }
    }

    fn populate_dynamic_fees<ReaderT: ChainReader + ?Sized>(
        &mut self,
        reader: &ReaderT,
        config: &PopulateConfig,
    ) -> Result<(), PopulateError<ReaderT::Error>> {
        let max_priority_fee_per_gas = if let Some(fee) = self.max_priority_fee_per_gas {
            fee
        } else {
            let fee = reader
                .max_priority_fee_per_gas()
                .map_err(PopulateError::Reader)?;

            log::debug!("Defaulting maxPriorityFeePerGas to {fee}");
            self.max_priority_fee_per_gas = Some(fee);
            fee
        };

        if let Some(max_fee_per_gas) = self.max_fee_per_gas {
            if max_priority_fee_per_gas > max_fee_per_gas {
                log::warn!(
                    "maxPriorityFeePerGas ({max_priority_fee_per_gas}) exceeds maxFeePerGas ({max_fee_per_gas})"
                );
            }
            return Ok(());
        }

        log::trace!("Retrieving base fee of block {:?}", config.base_fee_block);
        let base_fee_per_gas = reader
            .block_by_number(config.base_fee_block, false)
            .map_err(PopulateError::Reader)?
            .and_then(|block| block.base_fee_per_gas)
            .ok_or(PopulateError::MissingBaseFee(config.base_fee_block))?;

        let max_fee_per_gas = base_fee_per_gas
            .checked_mul(U256::from(2))
            .and_then(|doubled| doubled.checked_add(max_priority_fee_per_gas))
            .ok_or(PopulateError::InvalidFeeValue {
                base_fee_per_gas,
                max_priority_fee_per_gas,
            })?;

        log::debug!("Defaulting maxFeePerGas to {max_fee_per_gas}");
        self.max_fee_per_gas = Some(max_fee_per_gas);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use assert_json_diff::assert_json_eq;
    use serde_json::json;
    use txargs_eth::Address;

    use super::*;
    use crate::test_utils::{MockChainReader, MockReaderError, ReaderCall, ReaderMethod};

    fn sender_and_receiver() -> TransactionArgs {
        TransactionArgs {
            from: Some(Address::ZERO),
            to: Some(Address::ZERO),
            ..TransactionArgs::default()
        }
    }

    fn populate_to_json(mut args: TransactionArgs) -> anyhow::Result<serde_json::Value> {
        args.populate(&MockChainReader::default())?;
        Ok(serde_json::to_value(&args)?)
    }

    #[test]
    fn empty_args_require_sender() {
        let reader = MockChainReader::default();
        let mut args = TransactionArgs::default();

        let error = args.populate(&reader).expect_err("sender is missing");

        assert!(matches!(error, PopulateError::MissingSender));
        assert_eq!(args, TransactionArgs::default());
        assert!(reader.calls().is_empty());
    }

    #[test]
    fn fills_all_fields_as_dynamic_fee_transaction() -> anyhow::Result<()> {
        let populated = populate_to_json(sender_and_receiver())?;

        assert_json_eq!(
            populated,
            json!({
                "from": "0x0000000000000000000000000000000000000000",
                "to": "0x0000000000000000000000000000000000000000",
                "gas": "0x26",
                "maxFeePerGas": "0x92",
                "maxPriorityFeePerGas": "0x1e",
                "value": "0x0",
                "nonce": "0x30",
                "data": null,
                "chainId": "0x12",
                "type": "0x2",
            })
        );

        Ok(())
    }

    #[test]
    fn legacy_gas_price_selects_legacy_type() -> anyhow::Result<()> {
        let populated = populate_to_json(TransactionArgs {
            gas_price: Some(U256::from(33u64)),
            ..sender_and_receiver()
        })?;

        assert_json_eq!(
            populated,
            json!({
                "from": "0x0000000000000000000000000000000000000000",
                "to": "0x0000000000000000000000000000000000000000",
                "gas": "0x26",
                "gasPrice": "0x21",
                "value": "0x0",
                "nonce": "0x30",
                "data": null,
                "chainId": "0x12",
                "type": "0x0",
            })
        );

        Ok(())
    }

    #[test]
    fn provided_dynamic_fees_are_kept() -> anyhow::Result<()> {
        let populated = populate_to_json(TransactionArgs {
            max_fee_per_gas: Some(U256::from(44u64)),
            max_priority_fee_per_gas: Some(U256::from(22u64)),
            ..sender_and_receiver()
        })?;

        assert_eq!(populated["maxFeePerGas"], "0x2c");
        assert_eq!(populated["maxPriorityFeePerGas"], "0x16");
        assert_eq!(populated["type"], "0x2");

        Ok(())
    }

    #[test]
    fn missing_priority_fee_is_suggested() -> anyhow::Result<()> {
        let reader = MockChainReader::default();
        let mut args = TransactionArgs {
            max_fee_per_gas: Some(U256::from(44u64)),
            ..sender_and_receiver()
        };

        args.populate(&reader)?;

        assert_eq!(args.max_fee_per_gas, Some(U256::from(44u64)));
        assert_eq!(args.max_priority_fee_per_gas, Some(U256::from(30u64)));
        assert!(
            !reader
                .calls()
                .iter()
                .any(|call| call.method() == ReaderMethod::BlockByNumber)
        );

        Ok(())
    }

    #[test]
    fn missing_max_fee_uses_provided_priority_fee() -> anyhow::Result<()> {
        let reader = MockChainReader::default();
        let mut args = TransactionArgs {
            max_priority_fee_per_gas: Some(U256::from(22u64)),
            ..sender_and_receiver()
        };

        args.populate(&reader)?;

        // 2 * 58 + 22
        assert_eq!(args.max_fee_per_gas, Some(U256::from(138u64)));
        assert_eq!(args.max_priority_fee_per_gas, Some(U256::from(22u64)));
        assert!(
            !reader
                .calls()
                .iter()
                .any(|call| call.method() == ReaderMethod::MaxPriorityFeePerGas)
        );

        Ok(())
    }

    #[test]
    fn both_fee_models_are_rejected() {
        let reader = MockChainReader::default();
        let mut args = TransactionArgs {
            gas_price: Some(U256::from(33u64)),
            max_fee_per_gas: Some(U256::from(44u64)),
            ..sender_and_receiver()
        };
        let original = args.clone();

        let error = args.populate(&reader).expect_err("fee models are mixed");

        assert!(matches!(error, PopulateError::AmbiguousFeeModel));
        assert_eq!(args, original);
        assert!(reader.calls().is_empty());
    }

    #[test]
    fn gas_price_with_priority_fee_is_rejected() {
        let mut args = TransactionArgs {
            gas_price: Some(U256::from(33u64)),
            max_priority_fee_per_gas: Some(U256::from(1u64)),
            ..sender_and_receiver()
        };

        let error = args
            .populate(&MockChainReader::default())
            .expect_err("fee models are mixed");

        assert!(matches!(error, PopulateError::AmbiguousFeeModel));
    }

    #[test]
    fn client_type_is_replaced() -> anyhow::Result<()> {
        let mut args = TransactionArgs {
            gas_price: Some(U256::from(33u64)),
            transaction_type: Some(2),
            ..sender_and_receiver()
        };

        args.populate(&MockChainReader::default())?;

        assert_eq!(args.transaction_type, Some(0));

        Ok(())
    }

    #[test]
    fn reader_is_queried_in_order() -> anyhow::Result<()> {
        let reader = MockChainReader::default();
        let mut args = sender_and_receiver();

        args.populate(&reader)?;

        let methods: Vec<_> = reader.calls().iter().map(ReaderCall::method).collect();
        assert_eq!(
            methods,
            vec![
                ReaderMethod::MaxPriorityFeePerGas,
                ReaderMethod::BlockByNumber,
                ReaderMethod::EstimateGas,
                ReaderMethod::TransactionCount,
                ReaderMethod::ChainId,
            ]
        );

        Ok(())
    }

    #[test]
    fn estimation_includes_resolved_fees() -> anyhow::Result<()> {
        let reader = MockChainReader::default();
        let mut args = sender_and_receiver();

        args.populate(&reader)?;

        let estimate = reader
            .calls()
            .into_iter()
            .find_map(|call| match call {
                ReaderCall::EstimateGas { request, block } => Some((request, block)),
                _ => None,
            })
            .expect("gas was estimated");

        assert_eq!(estimate.0.max_fee_per_gas, Some(U256::from(146u64)));
        assert_eq!(estimate.0.max_priority_fee_per_gas, Some(U256::from(30u64)));
        assert_eq!(estimate.0.transaction_type, Some(2));
        assert_eq!(estimate.0.gas, None);
        assert_eq!(estimate.1, BlockId::latest());

        Ok(())
    }

    #[test]
    fn provided_fields_skip_reader() -> anyhow::Result<()> {
        let reader = MockChainReader::default();
        let mut args = TransactionArgs {
            gas: Some(21_000),
            gas_price: Some(U256::from(33u64)),
            nonce: Some(5),
            chain_id: Some(U256::from(1u64)),
            value: Some(U256::from(10u64)),
            data: Some(Bytes::from_static(&[0x01])),
            ..TransactionArgs::default()
        };

        args.populate(&reader)?;

        assert!(reader.calls().is_empty());
        assert_eq!(args.gas, Some(21_000));
        assert_eq!(args.nonce, Some(5));
        assert_eq!(args.chain_id, Some(U256::from(1u64)));
        assert_eq!(args.value, Some(U256::from(10u64)));
        assert_eq!(args.data, Some(Bytes::from_static(&[0x01])));

        Ok(())
    }

    #[test]
    fn reader_errors_are_propagated() {
        let reader = MockChainReader::default().failing_on(ReaderMethod::TransactionCount);
        let mut args = sender_and_receiver();

        let error = args.populate(&reader).expect_err("reader fails");

        assert!(matches!(
            error,
            PopulateError::Reader(MockReaderError(ReaderMethod::TransactionCount))
        ));
        assert_eq!(args, sender_and_receiver());
    }

    #[test]
    fn missing_base_fee() {
        let reader = MockChainReader::default().with_base_fee_per_gas(None);
        let mut args = sender_and_receiver();

        let error = args.populate(&reader).expect_err("pre-London block");

        assert!(matches!(
            error,
            PopulateError::MissingBaseFee(BlockNumberOrTag::Latest)
        ));
    }

    #[test]
    fn overflowing_max_fee_is_invalid() {
        let reader = MockChainReader::default().with_base_fee_per_gas(Some(U256::MAX));
        let mut args = sender_and_receiver();

        let error = args.populate(&reader).expect_err("2 * base fee overflows");

        assert!(matches!(
            error,
            PopulateError::InvalidFeeValue { base_fee_per_gas, .. } if base_fee_per_gas == U256::MAX
        ));
    }

    #[test]
    fn overflowing_gas_estimate() {
        let reader =
            MockChainReader::default().with_gas_estimate(U256::from(u64::MAX) + U256::from(1));
        let mut args = sender_and_receiver();

        let error = args.populate(&reader).expect_err("estimate exceeds 64 bits");

        assert!(matches!(
            error,
            PopulateError::QuantityOverflow { field: "gas", .. }
        ));
    }

    #[test]
    fn configured_blocks_are_queried() -> anyhow::Result<()> {
        let reader = MockChainReader::default();
        let config = PopulateConfig {
            estimate_gas_block: BlockId::number(100),
            nonce_block: BlockId::latest(),
            base_fee_block: BlockNumberOrTag::Number(100),
        };

        let mut args = sender_and_receiver();
        args.populate_with(&reader, &config)?;

        let calls = reader.calls();
        assert!(calls.contains(&ReaderCall::BlockByNumber {
            number: BlockNumberOrTag::Number(100),
            full_transactions: false,
        }));
        assert!(calls.contains(&ReaderCall::TransactionCount {
            address: Address::ZERO,
            block: BlockId::latest(),
        }));

        Ok(())
    }

    #[test]
    fn reader_can_be_a_trait_object() -> anyhow::Result<()> {
        let reader: Box<dyn ChainReader<Error = MockReaderError>> =
            Box::new(MockChainReader::default());
        let mut args = sender_and_receiver();

        args.populate(&reader)?;

        assert_eq!(args.gas, Some(0x26));

        Ok(())
    }
}
