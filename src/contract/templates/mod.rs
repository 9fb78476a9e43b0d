//! The compiled templates shipped with the crate.
//!
//! Each module exposes the template descriptor, `pay_to_*`/`parse_pay_to_*`
//! helpers over raw arguments and a typed `*Args` view.

pub mod call_option;
pub mod loan_collateral;
pub mod price_changer;

pub use call_option::{CALL_OPTION, CallOptionArgs, parse_pay_to_call_option, pay_to_call_option};
pub use loan_collateral::{
    LOAN_COLLATERAL, LoanCollateralArgs, parse_pay_to_loan_collateral, pay_to_loan_collateral,
};
pub use price_changer::{
    PRICE_CHANGER, PriceChangerArgs, parse_pay_to_price_changer, pay_to_price_changer,
};
