//! Loan collateral: the borrower repays `amount_loaned` of `asset_loaned` to
//! the lender before `block_height` to recover the collateral, otherwise the
//! lender may claim it.

use crate::contract::errors::ContractError;
use crate::contract::instance::InstanceScript;
use crate::contract::param::{
    ContractArg, Param, ParamType, decode_amount, decode_asset, decode_integer,
};
use crate::contract::template::ContractTemplate;
use crate::types::fixed::AssetId;

pub const LOAN_COLLATERAL_BODY: [u8; 38] = [
    0x55, 0x7a, 0x64, 0x1b, 0x00, 0x00, 0x00, 0x00, 0x7b, 0x7b, 0x51, 0x55,
    0x7a, 0xc1, 0x69, 0x51, 0xc3, 0xc2, 0x51, 0x55, 0x7a, 0xc1, 0x63, 0x26,
    0x00, 0x00, 0x00, 0x7b, 0xcd, 0x9f, 0x69, 0x00, 0xc3, 0xc2, 0x51, 0x56,
    0x7a, 0xc1,
];

const PARAMS: [Param; 5] = [
    Param::new("assetLoaned", ParamType::Asset),
    Param::new("amountLoaned", ParamType::Amount),
    Param::new("blockHeight", ParamType::Integer),
    Param::new("lender", ParamType::Program),
    Param::new("borrower", ParamType::Program),
];

pub static LOAN_COLLATERAL: ContractTemplate = ContractTemplate {
    name: "LoanCollateral",
    body: &LOAN_COLLATERAL_BODY,
    params: &PARAMS,
    quorum: false,
};

pub fn pay_to_loan_collateral(
    asset_loaned: AssetId,
    amount_loaned: u64,
    block_height: i64,
    lender: &[u8],
    borrower: &[u8],
) -> Result<InstanceScript, ContractError> {
    LOAN_COLLATERAL.instantiate(&[
        asset_loaned.into(),
        ContractArg::amount(PARAMS[1].name, amount_loaned)?,
        block_height.into(),
        lender.into(),
        borrower.into(),
    ])
}

/// Returns the raw argument payloads of a loan collateral instance.
pub fn parse_pay_to_loan_collateral(script: &[u8]) -> Result<Vec<Vec<u8>>, ContractError> {
    LOAN_COLLATERAL.parse(script)
}

/// Typed arguments of a loan collateral.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoanCollateralArgs {
    pub asset_loaned: AssetId,
    pub amount_loaned: u64,
    pub block_height: i64,
    pub lender: Vec<u8>,
    pub borrower: Vec<u8>,
}

impl LoanCollateralArgs {
    pub fn pay_to(&self) -> Result<InstanceScript, ContractError> {
        pay_to_loan_collateral(
            self.asset_loaned,
            self.amount_loaned,
            self.block_height,
            &self.lender,
            &self.borrower,
        )
    }

    pub fn parse(script: &[u8]) -> Result<Self, ContractError> {
        let args = parse_pay_to_loan_collateral(script)?;
        let [asset_loaned, amount_loaned, block_height, lender, borrower] =
            <[Vec<u8>; 5]>::try_from(args).map_err(|args| ContractError::ArgumentCount {
                got: args.len(),
                want: PARAMS.len(),
            })?;

        Ok(Self {
            asset_loaned: decode_asset(&PARAMS[0], &asset_loaned)?,
            amount_loaned: decode_amount(&PARAMS[1], &amount_loaned)?,
            block_height: decode_integer(&PARAMS[2], &block_height)?,
            lender,
            borrower,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::test_utils::utils::{asset_id, seller_program};

    fn sample() -> LoanCollateralArgs {
        LoanCollateralArgs {
            asset_loaned: asset_id(7),
            amount_loaned: 16,
            block_height: 0,
            lender: seller_program(),
            borrower: vec![0x51],
        }
    }

    #[test]
    fn typed_round_trip() {
        let args = sample();
        let script = args.pay_to().unwrap();
        assert_eq!(LoanCollateralArgs::parse(&script).unwrap(), args);
    }

    #[test]
    fn small_integers_decode_from_their_opcodes() {
        let script = sample().pay_to().unwrap();
        // 16 and 0 are pushed as OP_16 and OP_0.
        assert_eq!(script[33], 0x60);
        assert_eq!(script[34], 0x00);
        let raw = parse_pay_to_loan_collateral(&script).unwrap();
        assert_eq!(raw[1], vec![16]);
        assert!(raw[2].is_empty());
    }

    #[test]
    fn empty_programs_are_accepted() {
        let args = LoanCollateralArgs {
            lender: Vec::new(),
            borrower: Vec::new(),
            ..sample()
        };
        assert_eq!(
            LoanCollateralArgs::parse(&args.pay_to().unwrap()).unwrap(),
            args
        );
    }

    #[test]
    fn short_asset_is_rejected_at_encode_time() {
        let err = LOAN_COLLATERAL
            .instantiate(&[
                ContractArg::Bytes(vec![0; 31]),
                ContractArg::Integer(1),
                ContractArg::Integer(1),
                ContractArg::Bytes(Vec::new()),
                ContractArg::Bytes(Vec::new()),
            ])
            .unwrap_err();
        assert!(matches!(
            err,
            ContractError::InvalidArgument {
                name: "assetLoaned",
                ..
            }
        ));
    }
}
