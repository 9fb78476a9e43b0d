//! Fixed-size value types used by the template APIs.
//!
//! - `Hash`: SHA3-256 digests of scripts and template bodies
//! - `AssetId`, `PublicKey`: 32-byte identifiers passed as contract arguments

pub mod fixed;
pub mod hash;
