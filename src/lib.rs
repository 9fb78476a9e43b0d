//! Contract template library.
//!
//! Encodes typed contract arguments into instance scripts for a stack VM and
//! decodes them back with full structural validation.

pub mod contract;
pub mod types;
pub mod utils;
pub mod virtual_machine;
