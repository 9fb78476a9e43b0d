//! Instance script assembly.
//!
//! An instance is the argument pushes followed by a fixed epilogue that
//! re-executes the body as a nested predicate:
//!
//! ```text
//! non-quorum: <args...> DEPTH <body> 0 CHECKPREDICATE
//! quorum:     <args...> <body> DEPTH OVER 0 CHECKPREDICATE
//! ```

use crate::contract::errors::ContractError;
use crate::contract::param::{ContractArg, Param};
use crate::virtual_machine::builder::Builder;
use crate::virtual_machine::isa::{OP_CHECKPREDICATE, OP_DEPTH, OP_OVER};

/// Builds the instance script for `body` filled with `args`.
///
/// Every argument is checked against its parameter before any byte is
/// emitted. Arguments are pushed in declared order.
pub fn instantiate(
    body: &[u8],
    params: &[Param],
    quorum: bool,
    args: &[ContractArg],
) -> Result<Vec<u8>, ContractError> {
    if args.len() != params.len() {
        return Err(ContractError::ArgumentCount {
            got: args.len(),
            want: params.len(),
        });
    }
    for (index, (param, arg)) in params.iter().zip(args).enumerate() {
        param.check(index, arg)?;
    }

    let mut builder = Builder::new();
    for arg in args {
        match arg {
            ContractArg::Integer(n) => {
                builder.add_int64(*n);
            }
            ContractArg::Bytes(bytes) => {
                builder.add_data(bytes).map_err(ContractError::Encoding)?;
            }
        }
    }

    if quorum {
        builder.add_data(body).map_err(ContractError::Encoding)?;
        builder.add_op(OP_DEPTH).add_op(OP_OVER);
    } else {
        builder.add_op(OP_DEPTH);
        builder.add_data(body).map_err(ContractError::Encoding)?;
    }
    builder.add_int64(0).add_op(OP_CHECKPREDICATE);

    Ok(builder.build())
}
