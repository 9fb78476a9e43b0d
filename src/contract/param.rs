//! Declared template parameters and the arguments that fill them.

use crate::contract::errors::ContractError;
use crate::types::fixed::{AssetId, PublicKey};
use crate::virtual_machine::instruction::as_int64;
use std::fmt;

/// Semantic type of a template parameter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ParamType {
    Amount,
    Asset,
    Boolean,
    Hash,
    Integer,
    Program,
    PublicKey,
    Signature,
    String,
}

/// How an argument is pushed onto the stack.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ArgKind {
    /// Minimal-length signed integer.
    Integer,
    /// Verbatim byte string.
    Bytes,
}

impl ArgKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            ArgKind::Integer => "integer",
            ArgKind::Bytes => "bytes",
        }
    }
}

impl ParamType {
    pub const fn as_str(self) -> &'static str {
        match self {
            ParamType::Amount => "Amount",
            ParamType::Asset => "Asset",
            ParamType::Boolean => "Boolean",
            ParamType::Hash => "Hash",
            ParamType::Integer => "Integer",
            ParamType::Program => "Program",
            ParamType::PublicKey => "PublicKey",
            ParamType::Signature => "Signature",
            ParamType::String => "String",
        }
    }

    pub const fn arg_kind(self) -> ArgKind {
        match self {
            ParamType::Amount | ParamType::Boolean | ParamType::Integer => ArgKind::Integer,
            _ => ArgKind::Bytes,
        }
    }

    /// Required byte length for fixed-size types.
    pub const fn fixed_len(self) -> Option<usize> {
        match self {
            ParamType::Asset => Some(AssetId::LEN),
            ParamType::PublicKey => Some(PublicKey::LEN),
            ParamType::Hash => Some(crate::types::hash::HASH_LEN),
            _ => None,
        }
    }
}

impl fmt::Display for ParamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named, typed template parameter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Param {
    pub name: &'static str,
    pub ty: ParamType,
}

impl Param {
    pub const fn new(name: &'static str, ty: ParamType) -> Self {
        Self { name, ty }
    }

    /// Checks that `arg` can fill this parameter at position `index`.
    pub fn check(&self, index: usize, arg: &ContractArg) -> Result<(), ContractError> {
        if arg.kind() != self.ty.arg_kind() {
            return Err(ContractError::TypeMismatch {
                index,
                name: self.name,
                want: self.ty.arg_kind().as_str(),
            });
        }

        match (self.ty, arg) {
            (ParamType::Amount, ContractArg::Integer(n)) if *n < 0 => {
                Err(self.invalid(format!("negative amount {n}")))
            }
            (ParamType::Boolean, ContractArg::Integer(n)) if !matches!(*n, 0 | 1) => {
                Err(self.invalid(format!("boolean must be 0 or 1, got {n}")))
            }
            (ty, ContractArg::Bytes(bytes)) => match ty.fixed_len() {
                Some(len) if bytes.len() != len => Err(self.invalid(format!(
                    "{ty} must be {len} bytes, got {}",
                    bytes.len()
                ))),
                _ => Ok(()),
            },
            _ => Ok(()),
        }
    }

    fn invalid(&self, reason: String) -> ContractError {
        ContractError::InvalidArgument {
            name: self.name,
            reason,
        }
    }

    fn malformed(&self, reason: String) -> ContractError {
        ContractError::MalformedArgument {
            name: self.name,
            reason,
        }
    }
}

impl fmt::Display for Param {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.ty)
    }
}

/// A value supplied for a template parameter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ContractArg {
    /// Value for Amount, Boolean and Integer parameters.
    Integer(i64),
    /// Value for every byte-string parameter.
    Bytes(Vec<u8>),
}

impl ContractArg {
    pub fn boolean(value: bool) -> Self {
        ContractArg::Integer(value as i64)
    }

    /// Converts an unsigned amount, rejecting values the VM cannot represent.
    pub fn amount(name: &'static str, value: u64) -> Result<Self, ContractError> {
        i64::try_from(value)
            .map(ContractArg::Integer)
            .map_err(|_| ContractError::InvalidArgument {
                name,
                reason: format!("amount {value} exceeds {}", i64::MAX),
            })
    }

    pub fn kind(&self) -> ArgKind {
        match self {
            ContractArg::Integer(_) => ArgKind::Integer,
            ContractArg::Bytes(_) => ArgKind::Bytes,
        }
    }

    /// Parses a textual argument for `param`: decimal for Amount and Integer,
    /// `true`/`false` for Boolean, hex (optionally `0x`-prefixed) otherwise.
    pub fn parse(param: &Param, text: &str) -> Result<Self, ContractError> {
        let arg = match param.ty {
            ParamType::Boolean => match text {
                "true" | "1" => ContractArg::boolean(true),
                "false" | "0" => ContractArg::boolean(false),
                _ => return Err(param.invalid(format!("expected true or false, got {text:?}"))),
            },
            ParamType::Amount => {
                let value = text
                    .parse::<u64>()
                    .map_err(|e| param.invalid(format!("{text:?}: {e}")))?;
                ContractArg::amount(param.name, value)?
            }
            ParamType::Integer => ContractArg::Integer(
                text.parse::<i64>()
                    .map_err(|e| param.invalid(format!("{text:?}: {e}")))?,
            ),
            _ => {
                let digits = text.strip_prefix("0x").unwrap_or(text);
                ContractArg::Bytes(
                    hex::decode(digits).map_err(|e| param.invalid(format!("{text:?}: {e}")))?,
                )
            }
        };
        Ok(arg)
    }
}

impl From<i64> for ContractArg {
    fn from(n: i64) -> Self {
        ContractArg::Integer(n)
    }
}

impl From<bool> for ContractArg {
    fn from(value: bool) -> Self {
        ContractArg::boolean(value)
    }
}

impl From<Vec<u8>> for ContractArg {
    fn from(bytes: Vec<u8>) -> Self {
        ContractArg::Bytes(bytes)
    }
}

impl From<&[u8]> for ContractArg {
    fn from(bytes: &[u8]) -> Self {
        ContractArg::Bytes(bytes.to_vec())
    }
}

impl From<AssetId> for ContractArg {
    fn from(asset: AssetId) -> Self {
        ContractArg::Bytes(asset.0.to_vec())
    }
}

impl From<PublicKey> for ContractArg {
    fn from(key: PublicKey) -> Self {
        ContractArg::Bytes(key.0.to_vec())
    }
}

// Readers for decoded argument payloads.

pub fn decode_integer(param: &Param, data: &[u8]) -> Result<i64, ContractError> {
    as_int64(data).map_err(|e| param.malformed(e.to_string()))
}

pub fn decode_amount(param: &Param, data: &[u8]) -> Result<u64, ContractError> {
    let n = decode_integer(param, data)?;
    u64::try_from(n).map_err(|_| param.malformed(format!("negative amount {n}")))
}

pub fn decode_asset(param: &Param, data: &[u8]) -> Result<AssetId, ContractError> {
    AssetId::from_slice(data).ok_or_else(|| {
        param.malformed(format!("asset must be {} bytes, got {}", AssetId::LEN, data.len()))
    })
}

pub fn decode_public_key(param: &Param, data: &[u8]) -> Result<PublicKey, ContractError> {
    PublicKey::from_slice(data).ok_or_else(|| {
        param.malformed(format!(
            "public key must be {} bytes, got {}",
            PublicKey::LEN,
            data.len()
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const AMOUNT: Param = Param::new("amount", ParamType::Amount);
    const FLAG: Param = Param::new("flag", ParamType::Boolean);
    const ASSET: Param = Param::new("asset", ParamType::Asset);
    const PROG: Param = Param::new("prog", ParamType::Program);

    #[test]
    fn kinds_follow_parameter_types() {
        assert_eq!(ParamType::Amount.arg_kind(), ArgKind::Integer);
        assert_eq!(ParamType::Boolean.arg_kind(), ArgKind::Integer);
        assert_eq!(ParamType::Integer.arg_kind(), ArgKind::Integer);
        assert_eq!(ParamType::Program.arg_kind(), ArgKind::Bytes);
        assert_eq!(ParamType::Signature.arg_kind(), ArgKind::Bytes);
        assert_eq!(ParamType::Asset.fixed_len(), Some(32));
        assert_eq!(ParamType::String.fixed_len(), None);
    }

    #[test]
    fn check_rejects_wrong_kind() {
        assert_eq!(
            PROG.check(3, &ContractArg::Integer(1)),
            Err(ContractError::TypeMismatch {
                index: 3,
                name: "prog",
                want: "bytes"
            })
        );
        assert!(matches!(
            AMOUNT.check(0, &ContractArg::Bytes(vec![1])),
            Err(ContractError::TypeMismatch { want: "integer", .. })
        ));
    }

    #[test]
    fn check_enforces_value_ranges() {
        assert!(AMOUNT.check(0, &ContractArg::Integer(0)).is_ok());
        assert!(matches!(
            AMOUNT.check(0, &ContractArg::Integer(-1)),
            Err(ContractError::InvalidArgument { name: "amount", .. })
        ));
        assert!(FLAG.check(0, &ContractArg::Integer(1)).is_ok());
        assert!(FLAG.check(0, &ContractArg::Integer(2)).is_err());
        assert!(ASSET.check(0, &ContractArg::Bytes(vec![0; 32])).is_ok());
        assert!(ASSET.check(0, &ContractArg::Bytes(vec![0; 31])).is_err());
        assert!(PROG.check(0, &ContractArg::Bytes(Vec::new())).is_ok());
    }

    #[test]
    fn amount_above_i64_max_is_rejected() {
        assert_eq!(
            ContractArg::amount("amount", i64::MAX as u64).unwrap(),
            ContractArg::Integer(i64::MAX)
        );
        assert!(ContractArg::amount("amount", i64::MAX as u64 + 1).is_err());
    }

    #[test]
    fn parses_textual_arguments() {
        assert_eq!(
            ContractArg::parse(&AMOUNT, "100").unwrap(),
            ContractArg::Integer(100)
        );
        assert!(ContractArg::parse(&AMOUNT, "-1").is_err());
        assert_eq!(
            ContractArg::parse(&FLAG, "true").unwrap(),
            ContractArg::Integer(1)
        );
        assert_eq!(
            ContractArg::parse(&PROG, "0x00aa").unwrap(),
            ContractArg::Bytes(vec![0x00, 0xaa])
        );
        assert_eq!(
            ContractArg::parse(&PROG, "ff").unwrap(),
            ContractArg::Bytes(vec![0xff])
        );
        assert!(ContractArg::parse(&PROG, "zz").is_err());
    }

    #[test]
    fn decoders_reinterpret_payloads() {
        assert_eq!(decode_amount(&AMOUNT, &[0x64]).unwrap(), 100);
        assert!(matches!(
            decode_amount(&AMOUNT, &[0xff; 8]),
            Err(ContractError::MalformedArgument { name: "amount", .. })
        ));
        assert!(decode_integer(&AMOUNT, &[0; 9]).is_err());
        assert_eq!(decode_asset(&ASSET, &[9; 32]).unwrap(), AssetId([9; 32]));
        assert!(decode_public_key(&ASSET, &[9; 33]).is_err());
    }
}
