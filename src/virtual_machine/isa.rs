//! Opcode table of the stack VM.
//!
//! The [`for_each_opcode!`](crate::for_each_opcode) macro holds the canonical
//! named opcodes and invokes a callback macro for code generation, so the
//! constants, mnemonic display and the static table check all derive from one
//! list.
//!
//! # Byte ranges
//!
//! - `0x00`: `FALSE`, pushes an empty byte string
//! - `0x01..=0x4b`: `DATA_n`, pushes the next `n` bytes
//! - `0x4c..=0x4e`: `PUSHDATA1/2/4`, length-prefixed pushes (little-endian length)
//! - `0x4f`: `1NEGATE`
//! - `0x51..=0x60`: small integers `1` through `16`
//! - `JUMP`/`JUMPIF`: followed by a 4-byte little-endian address
//! - unassigned bytes are valid no-ops rendered as `NOPxNN`

use std::fmt;

/// A single VM opcode byte.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Opcode(pub u8);

/// Invokes a callback macro with the complete named opcode list.
#[macro_export]
macro_rules! for_each_opcode {
    ($callback:ident) => {
        $callback! {
            // =========================
            // Pushdata
            // =========================
            /// FALSE ; push an empty byte string
            OP_0 = 0x00, "FALSE",
            /// PUSHDATA1 len:u8 data ; push `len` bytes
            OP_PUSHDATA1 = 0x4c, "PUSHDATA1",
            /// PUSHDATA2 len:u16 data ; push `len` bytes
            OP_PUSHDATA2 = 0x4d, "PUSHDATA2",
            /// PUSHDATA4 len:u32 data ; push `len` bytes
            OP_PUSHDATA4 = 0x4e, "PUSHDATA4",
            /// 1NEGATE ; push the integer -1
            OP_1NEGATE = 0x4f, "1NEGATE",
            // =========================
            // Control flow
            // =========================
            OP_NOP = 0x61, "NOP",
            /// JUMP addr:u32 ; continue at `addr`
            OP_JUMP = 0x63, "JUMP",
            /// JUMPIF addr:u32 ; pop a value, continue at `addr` if it is true
            OP_JUMPIF = 0x64, "JUMPIF",
            OP_VERIFY = 0x69, "VERIFY",
            OP_FAIL = 0x6a, "FAIL",
            /// CHECKPREDICATE ; run the popped program against the popped stack depth
            OP_CHECKPREDICATE = 0xc0, "CHECKPREDICATE",
            // =========================
            // Stack
            // =========================
            OP_TOALTSTACK = 0x6b, "TOALTSTACK",
            OP_FROMALTSTACK = 0x6c, "FROMALTSTACK",
            OP_2DROP = 0x6d, "2DROP",
            OP_2DUP = 0x6e, "2DUP",
            OP_3DUP = 0x6f, "3DUP",
            OP_2OVER = 0x70, "2OVER",
            OP_2ROT = 0x71, "2ROT",
            OP_2SWAP = 0x72, "2SWAP",
            OP_IFDUP = 0x73, "IFDUP",
            /// DEPTH ; push the current stack depth
            OP_DEPTH = 0x74, "DEPTH",
            OP_DROP = 0x75, "DROP",
            OP_DUP = 0x76, "DUP",
            OP_NIP = 0x77, "NIP",
            /// OVER ; duplicate the item below the top
            OP_OVER = 0x78, "OVER",
            OP_PICK = 0x79, "PICK",
            OP_ROLL = 0x7a, "ROLL",
            OP_ROT = 0x7b, "ROT",
            OP_SWAP = 0x7c, "SWAP",
            OP_TUCK = 0x7d, "TUCK",
            // =========================
            // Splice
            // =========================
            OP_CAT = 0x7e, "CAT",
            OP_SUBSTR = 0x7f, "SUBSTR",
            OP_LEFT = 0x80, "LEFT",
            OP_RIGHT = 0x81, "RIGHT",
            OP_SIZE = 0x82, "SIZE",
            /// CATPUSHDATA ; append the top item to the one below as a pushdata
            OP_CATPUSHDATA = 0x89, "CATPUSHDATA",
            // =========================
            // Bitwise
            // =========================
            OP_INVERT = 0x83, "INVERT",
            OP_AND = 0x84, "AND",
            OP_OR = 0x85, "OR",
            OP_XOR = 0x86, "XOR",
            OP_EQUAL = 0x87, "EQUAL",
            OP_EQUALVERIFY = 0x88, "EQUALVERIFY",
            // =========================
            // Numeric
            // =========================
            OP_1ADD = 0x8b, "1ADD",
            OP_1SUB = 0x8c, "1SUB",
            OP_2MUL = 0x8d, "2MUL",
            OP_2DIV = 0x8e, "2DIV",
            OP_NEGATE = 0x8f, "NEGATE",
            OP_ABS = 0x90, "ABS",
            OP_NOT = 0x91, "NOT",
            OP_0NOTEQUAL = 0x92, "0NOTEQUAL",
            OP_ADD = 0x93, "ADD",
            OP_SUB = 0x94, "SUB",
            OP_MUL = 0x95, "MUL",
            OP_DIV = 0x96, "DIV",
            OP_MOD = 0x97, "MOD",
            OP_LSHIFT = 0x98, "LSHIFT",
            OP_RSHIFT = 0x99, "RSHIFT",
            OP_BOOLAND = 0x9a, "BOOLAND",
            OP_BOOLOR = 0x9b, "BOOLOR",
            OP_NUMEQUAL = 0x9c, "NUMEQUAL",
            OP_NUMEQUALVERIFY = 0x9d, "NUMEQUALVERIFY",
            OP_NUMNOTEQUAL = 0x9e, "NUMNOTEQUAL",
            OP_LESSTHAN = 0x9f, "LESSTHAN",
            OP_GREATERTHAN = 0xa0, "GREATERTHAN",
            OP_LESSTHANOREQUAL = 0xa1, "LESSTHANOREQUAL",
            OP_GREATERTHANOREQUAL = 0xa2, "GREATERTHANOREQUAL",
            OP_MIN = 0xa3, "MIN",
            OP_MAX = 0xa4, "MAX",
            OP_WITHIN = 0xa5, "WITHIN",
            // =========================
            // Crypto
            // =========================
            OP_SHA256 = 0xa8, "SHA256",
            OP_SHA3 = 0xaa, "SHA3",
            OP_HASH160 = 0xab, "HASH160",
            OP_CHECKSIG = 0xac, "CHECKSIG",
            OP_CHECKMULTISIG = 0xad, "CHECKMULTISIG",
            OP_TXSIGHASH = 0xae, "TXSIGHASH",
            // =========================
            // Introspection
            // =========================
            OP_CHECKOUTPUT = 0xc1, "CHECKOUTPUT",
            OP_ASSET = 0xc2, "ASSET",
            OP_AMOUNT = 0xc3, "AMOUNT",
            OP_PROGRAM = 0xc4, "PROGRAM",
            OP_INDEX = 0xc9, "INDEX",
            OP_ENTRYID = 0xca, "ENTRYID",
            OP_OUTPUTID = 0xcb, "OUTPUTID",
            OP_BLOCKHEIGHT = 0xcd, "BLOCKHEIGHT",
        }
    };
}

macro_rules! define_opcodes {
    (
        $(
            $(#[$doc:meta])*
            $name:ident = $opcode:expr, $mnemonic:literal
        ),* $(,)?
    ) => {
        $(
            $(#[$doc])*
            pub const $name: Opcode = Opcode($opcode);
        )*

        impl Opcode {
            /// Mnemonic of a named opcode; `None` for the data-length and
            /// small-integer ranges and for unassigned bytes.
            pub const fn named_mnemonic(self) -> Option<&'static str> {
                match self.0 {
                    $( $opcode => Some($mnemonic), )*
                    _ => None,
                }
            }
        }
    };
}

for_each_opcode!(define_opcodes);

pub const OP_DATA_1: Opcode = Opcode(0x01);
pub const OP_DATA_75: Opcode = Opcode(0x4b);
pub const OP_1: Opcode = Opcode(0x51);
pub const OP_16: Opcode = Opcode(0x60);

impl Opcode {
    /// Returns true for `DATA_1..=DATA_75`, whose byte value is the payload length.
    pub const fn is_data_len(self) -> bool {
        self.0 >= OP_DATA_1.0 && self.0 <= OP_DATA_75.0
    }

    /// Returns `n` for the small-integer opcodes `1..=16`.
    pub const fn small_int(self) -> Option<u8> {
        if self.0 >= OP_1.0 && self.0 <= OP_16.0 {
            Some(self.0 - OP_1.0 + 1)
        } else {
            None
        }
    }

    /// Returns true if executing this opcode only pushes a literal.
    pub const fn is_pushdata(self) -> bool {
        self.0 == OP_0.0
            || self.is_data_len()
            || self.0 == OP_PUSHDATA1.0
            || self.0 == OP_PUSHDATA2.0
            || self.0 == OP_PUSHDATA4.0
            || self.0 == OP_1NEGATE.0
            || self.small_int().is_some()
    }

    /// Returns true for opcodes followed by a 4-byte address.
    pub const fn is_jump(self) -> bool {
        self.0 == OP_JUMP.0 || self.0 == OP_JUMPIF.0
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(mnemonic) = self.named_mnemonic() {
            return f.write_str(mnemonic);
        }
        if self.is_data_len() {
            return write!(f, "DATA_{}", self.0);
        }
        match self.small_int() {
            Some(n) => write!(f, "{}", n),
            None => write!(f, "NOPx{:02x}", self.0),
        }
    }
}
