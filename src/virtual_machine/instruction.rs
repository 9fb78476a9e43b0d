//! Script disassembly.
//!
//! [`parse_program`] splits a raw script into [`Instruction`]s. Every byte is a
//! valid opcode; only a pushdata or jump whose operand runs past the end of the
//! script is rejected.

use crate::virtual_machine::builder::int64_bytes;
use crate::virtual_machine::errors::VMError;
use crate::virtual_machine::isa::{OP_1NEGATE, OP_PUSHDATA1, OP_PUSHDATA2, OP_PUSHDATA4, Opcode};
use std::fmt;

/// Width of the address operand following `JUMP` and `JUMPIF`.
const JUMP_ADDR_LEN: usize = 4;

/// A decoded instruction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Instruction {
    pub opcode: Opcode,
    /// Encoded length in bytes, opcode included.
    pub len: usize,
    /// Pushed literal for pushdata opcodes, address bytes for jumps, empty otherwise.
    pub data: Vec<u8>,
}

impl Instruction {
    /// Returns true if this instruction only pushes `data` onto the stack.
    pub fn is_pushdata(&self) -> bool {
        self.opcode.is_pushdata()
    }

    /// Decodes the payload as a script integer.
    pub fn as_int64(&self) -> Result<i64, VMError> {
        as_int64(&self.data)
    }

    /// Returns the target address of a `JUMP`/`JUMPIF`.
    pub fn jump_target(&self) -> Option<u32> {
        if !self.opcode.is_jump() {
            return None;
        }
        let addr: [u8; JUMP_ADDR_LEN] = self.data.as_slice().try_into().ok()?;
        Some(u32::from_le_bytes(addr))
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(n) = self.opcode.small_int() {
            return write!(f, "{}", n);
        }
        if let Some(target) = self.jump_target() {
            return write!(f, "{}:{}", self.opcode, target);
        }
        if self.opcode == OP_1NEGATE {
            return f.write_str("-1");
        }
        if self.is_pushdata() {
            if self.data.is_empty() {
                return f.write_str("0");
            }
            return write!(f, "0x{}", hex::encode(&self.data));
        }
        write!(f, "{}", self.opcode)
    }
}

/// Decodes a script integer: little-endian two's complement, at most 8 bytes,
/// missing high bytes read as zero.
pub fn as_int64(data: &[u8]) -> Result<i64, VMError> {
    if data.len() > 8 {
        return Err(VMError::BadValue { len: data.len() });
    }
    let mut padded = [0u8; 8];
    padded[..data.len()].copy_from_slice(data);
    Ok(i64::from_le_bytes(padded))
}

/// Decodes the instruction starting at `pc`.
pub fn parse_op(program: &[u8], pc: usize) -> Result<Instruction, VMError> {
    let Some(&byte) = program.get(pc) else {
        return Err(VMError::UnexpectedEndOfProgram {
            offset: pc,
            needed: 1,
            available: 0,
        });
    };
    let opcode = Opcode(byte);

    let (prefix_len, payload_len) = match opcode {
        op if op.is_data_len() => (0, op.0 as usize),
        OP_PUSHDATA1 => (1, read_length(program, pc, 1)?),
        OP_PUSHDATA2 => (2, read_length(program, pc, 2)?),
        OP_PUSHDATA4 => (4, read_length(program, pc, 4)?),
        op if op.is_jump() => (0, JUMP_ADDR_LEN),
        op => {
            let data = match op.small_int() {
                Some(n) => vec![n],
                None if op == OP_1NEGATE => int64_bytes(-1),
                None => Vec::new(),
            };
            return Ok(Instruction {
                opcode,
                len: 1,
                data,
            });
        }
    };

    let start = pc + 1 + prefix_len;
    let data = start
        .checked_add(payload_len)
        .and_then(|end| program.get(start..end))
        .ok_or(VMError::UnexpectedEndOfProgram {
            offset: pc,
            needed: (1 + prefix_len).saturating_add(payload_len),
            available: program.len() - pc,
        })?;

    Ok(Instruction {
        opcode,
        len: 1 + prefix_len + payload_len,
        data: data.to_vec(),
    })
}

/// Reads the little-endian length operand of a `PUSHDATA1/2/4` at `pc`.
fn read_length(program: &[u8], pc: usize, width: usize) -> Result<usize, VMError> {
    let bytes = program
        .get(pc + 1..pc + 1 + width)
        .ok_or(VMError::UnexpectedEndOfProgram {
            offset: pc,
            needed: 1 + width,
            available: program.len() - pc,
        })?;
    let mut buf = [0u8; 4];
    buf[..width].copy_from_slice(bytes);
    Ok(u32::from_le_bytes(buf) as usize)
}

/// Splits a script into its instructions.
pub fn parse_program(program: &[u8]) -> Result<Vec<Instruction>, VMError> {
    let mut out = Vec::new();
    let mut pc = 0;
    while pc < program.len() {
        let inst = parse_op(program, pc)?;
        pc += inst.len;
        out.push(inst);
    }
    Ok(out)
}

/// Renders a script as space-separated assembly text.
pub fn disassemble(program: &[u8]) -> Result<String, VMError> {
    let parts: Vec<String> = parse_program(program)?
        .iter()
        .map(Instruction::to_string)
        .collect();
    Ok(parts.join(" "))
}
