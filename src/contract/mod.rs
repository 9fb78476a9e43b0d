//! Contract template instances.
//!
//! An instance script locks value under a compiled template by pushing the
//! template's arguments ahead of its body:
//!
//! ```text
//! <arg 1> ... <arg n> DEPTH <body> 0 CHECKPREDICATE
//! ```
//!
//! - [`template::ContractTemplate`]: body, declared parameters, quorum flag
//! - [`instantiate::instantiate`]: the generic encoder
//! - [`template::ContractTemplate::parse`]: the generic validating decoder
//! - [`templates`]: the shipped templates with typed helpers
//! - [`template::identify`]: finds which template produced a script

pub mod errors;
pub mod instance;
pub mod instantiate;
pub mod param;
pub mod template;
pub mod templates;
