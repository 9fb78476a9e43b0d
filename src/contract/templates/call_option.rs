//! Call option: the buyer may purchase the locked value for `strike_price`
//! units of `strike_currency` until `block_height`, after which the seller
//! can reclaim it.

use crate::contract::errors::ContractError;
use crate::contract::instance::InstanceScript;
use crate::contract::param::{
    ContractArg, Param, ParamType, decode_amount, decode_asset, decode_integer, decode_public_key,
};
use crate::contract::template::ContractTemplate;
use crate::types::fixed::{AssetId, PublicKey};

pub const CALL_OPTION_BODY: [u8; 44] = [
    0x55, 0x7a, 0x64, 0x20, 0x00, 0x00, 0x00, 0x54, 0x7a, 0xcd, 0xa0, 0x69,
    0x54, 0x7a, 0x54, 0x7a, 0xae, 0x7c, 0xac, 0x69, 0x00, 0x7c, 0x7b, 0x51,
    0x54, 0x7a, 0xc1, 0x63, 0x2c, 0x00, 0x00, 0x00, 0x54, 0x7a, 0xcd, 0x9f,
    0x69, 0x00, 0xc3, 0xc2, 0x51, 0x56, 0x7a, 0xc1,
];

const PARAMS: [Param; 5] = [
    Param::new("strikePrice", ParamType::Amount),
    Param::new("strikeCurrency", ParamType::Asset),
    Param::new("seller", ParamType::Program),
    Param::new("buyerKey", ParamType::PublicKey),
    Param::new("blockHeight", ParamType::Integer),
];

pub static CALL_OPTION: ContractTemplate = ContractTemplate {
    name: "CallOption",
    body: &CALL_OPTION_BODY,
    params: &PARAMS,
    quorum: false,
};

pub fn pay_to_call_option(
    strike_price: u64,
    strike_currency: AssetId,
    seller: &[u8],
    buyer_key: PublicKey,
    block_height: i64,
) -> Result<InstanceScript, ContractError> {
    CALL_OPTION.instantiate(&[
        ContractArg::amount(PARAMS[0].name, strike_price)?,
        strike_currency.into(),
        seller.into(),
        buyer_key.into(),
        block_height.into(),
    ])
}

/// Returns the raw argument payloads of a call option instance.
pub fn parse_pay_to_call_option(script: &[u8]) -> Result<Vec<Vec<u8>>, ContractError> {
    CALL_OPTION.parse(script)
}

/// Typed arguments of a call option.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CallOptionArgs {
    pub strike_price: u64,
    pub strike_currency: AssetId,
    pub seller: Vec<u8>,
    pub buyer_key: PublicKey,
    pub block_height: i64,
}

impl CallOptionArgs {
    pub fn pay_to(&self) -> Result<InstanceScript, ContractError> {
        pay_to_call_option(
            self.strike_price,
            self.strike_currency,
            &self.seller,
            self.buyer_key,
            self.block_height,
        )
    }

    pub fn parse(script: &[u8]) -> Result<Self, ContractError> {
        let args = parse_pay_to_call_option(script)?;
        let [strike_price, strike_currency, seller, buyer_key, block_height] =
            <[Vec<u8>; 5]>::try_from(args).map_err(|args| ContractError::ArgumentCount {
                got: args.len(),
                want: PARAMS.len(),
            })?;

        Ok(Self {
            strike_price: decode_amount(&PARAMS[0], &strike_price)?,
            strike_currency: decode_asset(&PARAMS[1], &strike_currency)?,
            seller,
            buyer_key: decode_public_key(&PARAMS[3], &buyer_key)?,
            block_height: decode_integer(&PARAMS[4], &block_height)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::test_utils::utils::{asset_id, public_key, seller_program};

    fn sample() -> CallOptionArgs {
        CallOptionArgs {
            strike_price: 1_000,
            strike_currency: asset_id(1),
            seller: seller_program(),
            buyer_key: public_key(2),
            block_height: 123_456,
        }
    }

    #[test]
    fn typed_round_trip() {
        let args = sample();
        let script = args.pay_to().unwrap();
        assert_eq!(CallOptionArgs::parse(&script).unwrap(), args);
    }

    #[test]
    fn raw_payloads_are_in_declared_order() {
        let script = sample().pay_to().unwrap();
        let raw = parse_pay_to_call_option(&script).unwrap();
        assert_eq!(raw.len(), 5);
        assert_eq!(raw[0], vec![0xe8, 0x03]);
        assert_eq!(raw[1], asset_id(1).0.to_vec());
        assert_eq!(raw[2], seller_program());
        assert_eq!(raw[3], public_key(2).0.to_vec());
        assert_eq!(raw[4], vec![0x40, 0xe2, 0x01]);
    }

    #[test]
    fn strike_price_above_i64_max_is_rejected() {
        let err = pay_to_call_option(
            u64::MAX,
            asset_id(1),
            &seller_program(),
            public_key(2),
            1,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            ContractError::InvalidArgument {
                name: "strikePrice",
                ..
            }
        ));
    }

    #[test]
    fn negative_block_height_round_trips() {
        let args = CallOptionArgs {
            block_height: -5,
            ..sample()
        };
        assert_eq!(CallOptionArgs::parse(&args.pay_to().unwrap()).unwrap(), args);
    }

    #[test]
    fn body_ends_with_checkoutput() {
        assert_eq!(CALL_OPTION_BODY.last(), Some(&0xc1));
        assert_eq!(CALL_OPTION.arg_count(), 5);
        assert!(!CALL_OPTION.quorum);
    }
}
