//! Script assembly from opcodes and literals.
//!
//! Literals are always pushed in their shortest form:
//! - empty byte strings as `FALSE`
//! - 1-75 bytes behind a single `DATA_n` byte
//! - longer payloads behind `PUSHDATA1`, `PUSHDATA2` or `PUSHDATA4`
//! - integers 1-16 as the small-integer opcodes, everything else as the
//!   little-endian bytes of the value with trailing zero bytes trimmed

use crate::virtual_machine::errors::VMError;
use crate::virtual_machine::isa::{OP_0, OP_1, OP_PUSHDATA1, OP_PUSHDATA2, OP_PUSHDATA4, Opcode};

/// Largest payload a single pushdata can carry.
pub const MAX_PUSHDATA_LEN: usize = u32::MAX as usize;

/// Longest payload encoded with a single `DATA_n` opcode.
const MAX_DIRECT_PUSH: usize = 75;

/// Incremental script builder.
#[derive(Clone, Debug, Default)]
pub struct Builder {
    program: Vec<u8>,
}

impl Builder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a bare opcode.
    pub fn add_op(&mut self, op: Opcode) -> &mut Self {
        self.program.push(op.0);
        self
    }

    /// Appends a minimal pushdata of `data`.
    pub fn add_data(&mut self, data: &[u8]) -> Result<&mut Self, VMError> {
        self.program.extend_from_slice(&pushdata_prefix(data.len())?);
        self.program.extend_from_slice(data);
        Ok(self)
    }

    /// Appends a minimal push of the integer `n`.
    pub fn add_int64(&mut self, n: i64) -> &mut Self {
        self.program.extend_from_slice(&pushdata_int64(n));
        self
    }

    /// Returns the assembled script.
    pub fn build(self) -> Vec<u8> {
        self.program
    }
}

/// Returns the opcode and length bytes that precede a payload of `len` bytes.
pub fn pushdata_prefix(len: usize) -> Result<Vec<u8>, VMError> {
    let Ok(len32) = u32::try_from(len) else {
        return Err(VMError::DataTooLarge {
            len,
            max: MAX_PUSHDATA_LEN,
        });
    };

    let prefix = match len {
        0 => vec![OP_0.0],
        1..=MAX_DIRECT_PUSH => vec![len as u8],
        _ if len32 <= u8::MAX as u32 => vec![OP_PUSHDATA1.0, len as u8],
        _ if len32 <= u16::MAX as u32 => {
            let mut prefix = vec![OP_PUSHDATA2.0];
            prefix.extend_from_slice(&(len32 as u16).to_le_bytes());
            prefix
        }
        _ => {
            let mut prefix = vec![OP_PUSHDATA4.0];
            prefix.extend_from_slice(&len32.to_le_bytes());
            prefix
        }
    };
    Ok(prefix)
}

/// Returns the shortest instruction pushing the integer `n`.
pub fn pushdata_int64(n: i64) -> Vec<u8> {
    match n {
        0 => vec![OP_0.0],
        1..=16 => vec![OP_1.0 + (n as u8) - 1],
        // At most 8 bytes, always within a direct push.
        _ => {
            let bytes = int64_bytes(n);
            let mut out = Vec::with_capacity(1 + bytes.len());
            out.push(bytes.len() as u8);
            out.extend_from_slice(&bytes);
            out
        }
    }
}

/// Little-endian two's-complement bytes of `n` with trailing zero bytes trimmed.
///
/// Zero encodes as the empty string; negative values always take 8 bytes.
pub fn int64_bytes(n: i64) -> Vec<u8> {
    let mut bytes = n.to_le_bytes().to_vec();
    while bytes.last() == Some(&0) {
        bytes.pop();
    }
    bytes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::virtual_machine::instruction::{as_int64, parse_program};
    use crate::virtual_machine::isa::{OP_CHECKPREDICATE, OP_DEPTH};

    #[test]
    fn prefix_boundaries() {
        assert_eq!(pushdata_prefix(0).unwrap(), vec![0x00]);
        assert_eq!(pushdata_prefix(1).unwrap(), vec![0x01]);
        assert_eq!(pushdata_prefix(75).unwrap(), vec![0x4b]);
        assert_eq!(pushdata_prefix(76).unwrap(), vec![0x4c, 76]);
        assert_eq!(pushdata_prefix(255).unwrap(), vec![0x4c, 0xff]);
        assert_eq!(pushdata_prefix(256).unwrap(), vec![0x4d, 0x00, 0x01]);
        assert_eq!(pushdata_prefix(65_535).unwrap(), vec![0x4d, 0xff, 0xff]);
        assert_eq!(
            pushdata_prefix(65_536).unwrap(),
            vec![0x4e, 0x00, 0x00, 0x01, 0x00]
        );
    }

    #[cfg(target_pointer_width = "64")]
    #[test]
    fn prefix_rejects_payloads_beyond_pushdata4() {
        let len = MAX_PUSHDATA_LEN + 1;
        assert_eq!(
            pushdata_prefix(len),
            Err(VMError::DataTooLarge {
                len,
                max: MAX_PUSHDATA_LEN
            })
        );
    }

    #[test]
    fn small_integers_use_dedicated_opcodes() {
        assert_eq!(pushdata_int64(0), vec![0x00]);
        assert_eq!(pushdata_int64(1), vec![0x51]);
        assert_eq!(pushdata_int64(16), vec![0x60]);
        assert_eq!(pushdata_int64(17), vec![0x01, 0x11]);
    }

    #[test]
    fn integer_bytes_are_trimmed() {
        assert_eq!(int64_bytes(0), Vec::<u8>::new());
        assert_eq!(int64_bytes(100), vec![0x64]);
        assert_eq!(int64_bytes(256), vec![0x00, 0x01]);
        assert_eq!(int64_bytes(500_000), vec![0x20, 0xa1, 0x07]);
        assert_eq!(int64_bytes(-1), vec![0xff; 8]);
        assert_eq!(int64_bytes(i64::MIN).len(), 8);
    }

    #[test]
    fn pushed_integers_decode_to_their_value() {
        for n in [0, 1, 16, 17, 255, 256, 500_000, -1, -256, i64::MAX, i64::MIN] {
            let insts = parse_program(&pushdata_int64(n)).unwrap();
            assert_eq!(insts.len(), 1);
            assert!(insts[0].is_pushdata());
            assert_eq!(as_int64(&insts[0].data).unwrap(), n, "{n}");
            assert_eq!(insts[0].data, int64_bytes(n), "{n}");
        }
    }

    #[test]
    fn builder_concatenates_in_order() {
        let mut builder = Builder::new();
        builder.add_int64(5);
        builder.add_data(&[0xaa; 3]).unwrap().add_op(OP_DEPTH);
        builder.add_data(&[]).unwrap();
        builder.add_op(OP_CHECKPREDICATE);
        assert_eq!(
            builder.build(),
            vec![0x55, 0x03, 0xaa, 0xaa, 0xaa, 0x74, 0x00, 0xc0]
        );
    }

    #[test]
    fn long_payload_survives_disassembly() {
        let data = vec![0x5a; 300];
        let mut builder = Builder::new();
        builder.add_data(&data).unwrap();
        let program = builder.build();
        assert_eq!(&program[..3], &[0x4d, 0x2c, 0x01]);
        let insts = parse_program(&program).unwrap();
        assert_eq!(insts.len(), 1);
        assert_eq!(insts[0].data, data);
    }
}
