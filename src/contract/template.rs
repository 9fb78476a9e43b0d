//! Template descriptors and the generic instance encoder/decoder.
//!
//! A template is fully described by its compiled body, its declared
//! parameters and its quorum flag. Decoding walks the disassembled script once,
//! front to back:
//!
//! 1. one pushdata per declared parameter
//! 2. quorum templates only: the body push
//! 3. exactly four epilogue instructions, each checked in place

use crate::contract::errors::ContractError;
use crate::contract::instance::InstanceScript;
use crate::contract::instantiate::instantiate;
use crate::contract::param::{ContractArg, Param};
use crate::contract::templates::{CALL_OPTION, LOAN_COLLATERAL, PRICE_CHANGER};
use crate::types::hash::Hash;
use crate::virtual_machine::instruction::{Instruction, parse_program};
use crate::virtual_machine::isa::{OP_CHECKPREDICATE, OP_DEPTH, OP_OVER, Opcode};
use crate::{debug, warn};
use std::vec;

/// Number of instructions following the argument pushes (and, for quorum
/// templates, the body push).
const EPILOGUE_LEN: usize = 4;

/// A compiled contract template.
#[derive(Debug, PartialEq, Eq)]
pub struct ContractTemplate {
    pub name: &'static str,
    pub body: &'static [u8],
    pub params: &'static [Param],
    /// Quorum templates push the body before `DEPTH OVER`.
    pub quorum: bool,
}

/// Every registered template, in lookup order.
pub static TEMPLATES: [&ContractTemplate; 3] = [&CALL_OPTION, &LOAN_COLLATERAL, &PRICE_CHANGER];

pub fn templates() -> &'static [&'static ContractTemplate] {
    &TEMPLATES
}

/// Looks a template up by name.
pub fn find(name: &str) -> Option<&'static ContractTemplate> {
    TEMPLATES.iter().copied().find(|t| t.name == name)
}

/// Returns the first template that accepts `script`, with its decoded arguments.
pub fn identify(script: &[u8]) -> Option<(&'static ContractTemplate, Vec<Vec<u8>>)> {
    TEMPLATES.iter().copied().find_map(|template| match template.parse(script) {
        Ok(args) => Some((template, args)),
        Err(e) => {
            debug!("{} rejected script: {}", template.name, e);
            None
        }
    })
}

impl ContractTemplate {
    pub fn arg_count(&self) -> usize {
        self.params.len()
    }

    pub fn body_hash(&self) -> Hash {
        Hash::digest(self.body)
    }

    /// Builds an instance of the template.
    pub fn instantiate(&self, args: &[ContractArg]) -> Result<InstanceScript, ContractError> {
        let script = instantiate(self.body, self.params, self.quorum, args)?;
        debug!("instantiated {} ({} bytes)", self.name, script.len());
        Ok(InstanceScript::from(script))
    }

    /// Recovers the raw argument payloads, in declared order, from an instance
    /// of the template.
    pub fn parse(&self, script: &[u8]) -> Result<Vec<Vec<u8>>, ContractError> {
        let insts = parse_program(script).map_err(ContractError::Disassembly)?;
        let mut cursor = Cursor::new(insts);

        let mut args = Vec::with_capacity(self.arg_count());
        for _ in 0..self.arg_count() {
            args.push(cursor.pushdata()?.data);
        }

        if self.quorum {
            let body = cursor.pushdata()?;
            self.check_body(&body)?;
        }

        let remaining = cursor.remaining();
        if remaining != EPILOGUE_LEN {
            return Err(ContractError::ProgramTooShort {
                index: cursor.index,
                expected: EPILOGUE_LEN,
                found: remaining,
            });
        }

        cursor.expect_op(OP_DEPTH)?;
        if self.quorum {
            cursor.expect_op(OP_OVER)?;
        } else {
            let (_, body) = cursor.expect_pushdata()?;
            self.check_body(&body)?;
        }
        let (index, zero) = cursor.expect_pushdata()?;
        let value = zero
            .as_int64()
            .map_err(|source| ContractError::BadValue { index, source })?;
        if value != 0 {
            return Err(ContractError::WrongProgramFormat {
                index,
                expected: "0".to_string(),
                found: value.to_string(),
            });
        }
        cursor.expect_op(OP_CHECKPREDICATE)?;

        Ok(args)
    }

    fn check_body(&self, body: &Instruction) -> Result<(), ContractError> {
        if body.data != self.body {
            warn!(
                "body mismatch for {}: got {} byte(s), want {}",
                self.name,
                body.data.len(),
                self.body.len()
            );
            return Err(ContractError::BodyMismatch {
                template: self.name,
            });
        }
        Ok(())
    }
}

/// Single-pass reader over a disassembled script.
struct Cursor {
    insts: vec::IntoIter<Instruction>,
    /// Index of the next instruction.
    index: usize,
}

impl Cursor {
    fn new(insts: Vec<Instruction>) -> Self {
        Self {
            insts: insts.into_iter(),
            index: 0,
        }
    }

    fn remaining(&self) -> usize {
        self.insts.len()
    }

    fn advance(&mut self) -> Option<(usize, Instruction)> {
        let inst = self.insts.next()?;
        let index = self.index;
        self.index += 1;
        Some((index, inst))
    }

    /// Takes an argument or body push.
    fn pushdata(&mut self) -> Result<Instruction, ContractError> {
        let (index, inst) = self.take()?;
        if !inst.is_pushdata() {
            return Err(ContractError::TooFewArguments {
                index,
                opcode: inst.opcode,
            });
        }
        Ok(inst)
    }

    /// Takes an epilogue opcode.
    fn expect_op(&mut self, op: Opcode) -> Result<(), ContractError> {
        let (index, inst) = self.take()?;
        if inst.opcode != op {
            return Err(ContractError::WrongProgramFormat {
                index,
                expected: op.to_string(),
                found: inst.opcode.to_string(),
            });
        }
        Ok(())
    }

    /// Takes an epilogue push.
    fn expect_pushdata(&mut self) -> Result<(usize, Instruction), ContractError> {
        let (index, inst) = self.take()?;
        if !inst.is_pushdata() {
            return Err(ContractError::WrongProgramFormat {
                index,
                expected: "pushdata".to_string(),
                found: inst.opcode.to_string(),
            });
        }
        Ok((index, inst))
    }

    fn take(&mut self) -> Result<(usize, Instruction), ContractError> {
        let index = self.index;
        self.advance().ok_or(ContractError::ProgramTooShort {
            index,
            expected: 1,
            found: 0,
        })
    }
}
