use crate::contract::errors::ContractError;
use crate::types::hash::Hash;
use crate::virtual_machine::instruction::disassemble;
use std::fmt;
use std::ops::Deref;

/// Locking script of a template instance.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Default)]
pub struct InstanceScript(Vec<u8>);

impl InstanceScript {
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }

    /// SHA3-256 of the script bytes.
    pub fn hash(&self) -> Hash {
        Hash::digest(&self.0)
    }

    /// Renders the script as assembly text.
    pub fn disassemble(&self) -> Result<String, ContractError> {
        disassemble(&self.0).map_err(ContractError::Disassembly)
    }
}

impl From<Vec<u8>> for InstanceScript {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

impl Deref for InstanceScript {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        &self.0
    }
}

impl AsRef<[u8]> for InstanceScript {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for InstanceScript {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(&self.0))
    }
}
