use contract_templates_derive::Error;

/// Errors raised while building or disassembling scripts.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VMError {
    /// A pushdata or jump instruction runs past the end of the program.
    #[error(
        "unexpected end of program: instruction at offset {offset} needs {needed} byte(s), {available} available"
    )]
    UnexpectedEndOfProgram {
        offset: usize,
        needed: usize,
        available: usize,
    },
    /// Integer payload longer than the 8 bytes an `i64` can hold.
    #[error("bad integer value: {len} byte(s) exceed the 8-byte limit")]
    BadValue { len: usize },
    /// Pushdata payload longer than `PUSHDATA4` can describe.
    #[error("pushdata of {len} byte(s) exceeds the maximum of {max}")]
    DataTooLarge { len: usize, max: usize },
}
