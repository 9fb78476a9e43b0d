//! Price changer: a sell offer for the locked value at `ask_amount` of
//! `ask_asset`, which the seller may re-price or cancel by signing with
//! `seller_key`.
//!
//! This is the quorum template: its instance pushes the body before
//! `DEPTH OVER`.

use crate::contract::errors::ContractError;
use crate::contract::instance::InstanceScript;
use crate::contract::param::{
    ContractArg, Param, ParamType, decode_amount, decode_asset, decode_public_key,
};
use crate::contract::template::ContractTemplate;
use crate::types::fixed::{AssetId, PublicKey};

pub const PRICE_CHANGER_BODY: [u8; 58] = [
    0x55, 0x7a, 0x64, 0x32, 0x00, 0x00, 0x00, 0x55, 0x7a, 0x54, 0x79, 0xae,
    0x7c, 0xac, 0x69, 0x00, 0xc3, 0xc2, 0x51, 0x00, 0x59, 0x7a, 0x89, 0x58,
    0x7a, 0x89, 0x58, 0x7a, 0x89, 0x58, 0x7a, 0x89, 0x55, 0x7a, 0x89, 0x02,
    0x74, 0x78, 0x7e, 0x00, 0x89, 0x01, 0xc0, 0x7e, 0xc1, 0x63, 0x3a, 0x00,
    0x00, 0x00, 0x00, 0x7b, 0x53, 0x7a, 0x51, 0x56, 0x7a, 0xc1,
];

const PARAMS: [Param; 4] = [
    Param::new("askAmount", ParamType::Amount),
    Param::new("askAsset", ParamType::Asset),
    Param::new("sellerKey", ParamType::PublicKey),
    Param::new("sellerProg", ParamType::Program),
];

pub static PRICE_CHANGER: ContractTemplate = ContractTemplate {
    name: "PriceChanger",
    body: &PRICE_CHANGER_BODY,
    params: &PARAMS,
    quorum: true,
};

pub fn pay_to_price_changer(
    ask_amount: u64,
    ask_asset: AssetId,
    seller_key: PublicKey,
    seller_prog: &[u8],
) -> Result<InstanceScript, ContractError> {
    PRICE_CHANGER.instantiate(&[
        ContractArg::amount(PARAMS[0].name, ask_amount)?,
        ask_asset.into(),
        seller_key.into(),
        seller_prog.into(),
    ])
}

/// Returns the raw argument payloads of a price changer instance.
pub fn parse_pay_to_price_changer(script: &[u8]) -> Result<Vec<Vec<u8>>, ContractError> {
    PRICE_CHANGER.parse(script)
}

/// Typed arguments of a price changer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PriceChangerArgs {
    pub ask_amount: u64,
    pub ask_asset: AssetId,
    pub seller_key: PublicKey,
    pub seller_prog: Vec<u8>,
}

impl PriceChangerArgs {
    pub fn pay_to(&self) -> Result<InstanceScript, ContractError> {
        pay_to_price_changer(
            self.ask_amount,
            self.ask_asset,
            self.seller_key,
            &self.seller_prog,
        )
    }

    pub fn parse(script: &[u8]) -> Result<Self, ContractError> {
        let args = parse_pay_to_price_changer(script)?;
        let [ask_amount, ask_asset, seller_key, seller_prog] = <[Vec<u8>; 4]>::try_from(args)
            .map_err(|args| ContractError::ArgumentCount {
                got: args.len(),
                want: PARAMS.len(),
            })?;

        Ok(Self {
            ask_amount: decode_amount(&PARAMS[0], &ask_amount)?,
            ask_asset: decode_asset(&PARAMS[1], &ask_asset)?,
            seller_key: decode_public_key(&PARAMS[2], &seller_key)?,
            seller_prog,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contract::template::identify;
    use crate::utils::test_utils::utils::{asset_id, public_key, seller_program};

    fn sample() -> PriceChangerArgs {
        PriceChangerArgs {
            ask_amount: 250,
            ask_asset: asset_id(3),
            seller_key: public_key(4),
            seller_prog: seller_program(),
        }
    }

    #[test]
    fn typed_round_trip() {
        let args = sample();
        let script = args.pay_to().unwrap();
        assert_eq!(PriceChangerArgs::parse(&script).unwrap(), args);
    }

    #[test]
    fn epilogue_follows_the_body_push() {
        let script = sample().pay_to().unwrap();
        assert!(script.ends_with(&[0x74, 0x78, 0x00, 0xc0]));
        let body_push_start = script.len() - 4 - PRICE_CHANGER_BODY.len() - 1;
        assert_eq!(script[body_push_start], PRICE_CHANGER_BODY.len() as u8);
    }

    #[test]
    fn identified_as_price_changer() {
        let script = sample().pay_to().unwrap();
        let (template, args) = identify(&script).unwrap();
        assert_eq!(template.name, "PriceChanger");
        assert_eq!(args.len(), 4);
    }

    #[test]
    fn short_key_fails_typed_parse() {
        // Raw instantiation skips the typed view, so a 31-byte key only
        // surfaces when reading it back as a PublicKey.
        let script = crate::contract::instantiate::instantiate(
            &PRICE_CHANGER_BODY,
            &[
                Param::new("askAmount", ParamType::Amount),
                Param::new("askAsset", ParamType::Asset),
                Param::new("sellerKey", ParamType::Program),
                Param::new("sellerProg", ParamType::Program),
            ],
            true,
            &[
                ContractArg::Integer(1),
                asset_id(3).into(),
                ContractArg::Bytes(vec![4; 31]),
                ContractArg::Bytes(Vec::new()),
            ],
        )
        .unwrap();
        assert_eq!(parse_pay_to_price_changer(&script).unwrap().len(), 4);
        assert!(matches!(
            PriceChangerArgs::parse(&script),
            Err(ContractError::MalformedArgument {
                name: "sellerKey",
                ..
            })
        ));
    }
}
