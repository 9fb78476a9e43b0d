//! Script layer of the stack VM.
//!
//! Instance scripts are plain instruction streams: no header, no framing.
//! This module knows just enough of the VM to build and take apart such
//! streams; it never executes them.
//!
//! # Modules
//!
//! - [`builder`]: Minimal pushdata/integer encoding and script assembly
//! - [`errors`]: Script encoding and disassembly errors
//! - [`instruction`]: Disassembly into [`instruction::Instruction`]s and integer decoding
//! - [`isa`]: Opcode table and mnemonic lookups

pub mod builder;
pub mod errors;
pub mod instruction;
pub mod isa;
#[cfg(test)]
mod isa_static_check;
