use crate::virtual_machine::errors::VMError;
use crate::virtual_machine::isa::Opcode;
use contract_templates_derive::Error;

/// Broad classification of a [`ContractError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The script does not have the shape of an instance of the template.
    Structural,
    /// The arguments cannot be encoded into an instance script.
    Encoding,
}

/// Errors raised while encoding or decoding template instances.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContractError {
    /// The script ran out of instructions, or has the wrong number of them.
    #[error("program too short: expected {expected} instruction(s) from index {index}, found {found}")]
    ProgramTooShort {
        index: usize,
        expected: usize,
        found: usize,
    },
    /// A non-pushdata instruction sits where an argument or body push belongs.
    #[error("too few arguments: instruction {index} is {opcode}, not a pushdata")]
    TooFewArguments { index: usize, opcode: Opcode },
    /// The epilogue does not match the fixed shape.
    #[error("wrong program format: instruction {index} expected {expected}, found {found}")]
    WrongProgramFormat {
        index: usize,
        expected: String,
        found: String,
    },
    /// The pushed body is not the body of the template.
    #[error("body bytes do not match {template}")]
    BodyMismatch { template: &'static str },
    /// The zero marker after the body is not a valid integer.
    #[error("bad value at instruction {index}: {source}")]
    BadValue {
        index: usize,
        #[source]
        source: VMError,
    },
    #[error("wrong number of arguments: got {got}, want {want}")]
    ArgumentCount { got: usize, want: usize },
    /// An argument's kind does not match its parameter.
    #[error("type mismatch for argument {index} ({name}): want {want}")]
    TypeMismatch {
        index: usize,
        name: &'static str,
        want: &'static str,
    },
    /// An argument value is out of range for its parameter type.
    #[error("invalid argument {name}: {reason}")]
    InvalidArgument { name: &'static str, reason: String },
    /// A decoded argument cannot be read as its parameter type.
    #[error("malformed argument {name}: {reason}")]
    MalformedArgument { name: &'static str, reason: String },
    #[error("disassembly failed: {0}")]
    Disassembly(#[source] VMError),
    #[error("encoding failed: {0}")]
    Encoding(#[source] VMError),
}

impl ContractError {
    /// Returns whether the error came from decoding a script or from encoding one.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ContractError::ProgramTooShort { .. }
            | ContractError::TooFewArguments { .. }
            | ContractError::WrongProgramFormat { .. }
            | ContractError::BodyMismatch { .. }
            | ContractError::BadValue { .. }
            | ContractError::MalformedArgument { .. }
            | ContractError::Disassembly(_) => ErrorKind::Structural,
            ContractError::ArgumentCount { .. }
            | ContractError::TypeMismatch { .. }
            | ContractError::InvalidArgument { .. }
            | ContractError::Encoding(_) => ErrorKind::Encoding,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::virtual_machine::isa::OP_DEPTH;
    use std::error::Error;

    #[test]
    fn messages_carry_the_failure_class() {
        let err = ContractError::ProgramTooShort {
            index: 5,
            expected: 4,
            found: 2,
        };
        assert!(err.to_string().starts_with("program too short"));

        let err = ContractError::TooFewArguments {
            index: 1,
            opcode: OP_DEPTH,
        };
        assert_eq!(
            err.to_string(),
            "too few arguments: instruction 1 is DEPTH, not a pushdata"
        );

        let err = ContractError::BodyMismatch {
            template: "CallOption",
        };
        assert_eq!(err.to_string(), "body bytes do not match CallOption");
    }

    #[test]
    fn encode_and_decode_argument_failures_read_differently() {
        let invalid = ContractError::InvalidArgument {
            name: "askAmount",
            reason: "negative amount -1".to_string(),
        };
        let malformed = ContractError::MalformedArgument {
            name: "askAmount",
            reason: "negative amount -1".to_string(),
        };
        assert_eq!(
            invalid.to_string(),
            "invalid argument askAmount: negative amount -1"
        );
        assert_eq!(
            malformed.to_string(),
            "malformed argument askAmount: negative amount -1"
        );
    }

    #[test]
    fn wrapped_vm_errors_are_exposed_as_source() {
        let err = ContractError::Disassembly(VMError::BadValue { len: 9 });
        assert!(err.source().is_some());
        let err = ContractError::BadValue {
            index: 7,
            source: VMError::BadValue { len: 9 },
        };
        assert!(err.source().is_some());
        assert!(ContractError::ArgumentCount { got: 1, want: 2 }.source().is_none());
    }

    #[test]
    fn kinds() {
        assert_eq!(
            ContractError::Encoding(VMError::DataTooLarge { len: 1, max: 0 }).kind(),
            ErrorKind::Encoding
        );
        assert_eq!(
            ContractError::BodyMismatch { template: "X" }.kind(),
            ErrorKind::Structural
        );
        assert_eq!(
            ContractError::MalformedArgument {
                name: "x",
                reason: String::new()
            }
            .kind(),
            ErrorKind::Structural
        );
    }
}
