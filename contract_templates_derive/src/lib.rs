//! Derive macros for the contract template crate.
//!
//! Provides:
//! - `#[derive(Error)]` - `Display`, `std::error::Error` and `source()` for error enums

mod error;

use proc_macro::TokenStream;

/// Implements `Display` and `Error` from `#[error("...")]` messages.
///
/// A field tagged `#[source]` is returned from `Error::source`.
#[proc_macro_derive(Error, attributes(error, source))]
pub fn derive_error(input: TokenStream) -> TokenStream {
    error::derive_error(input)
}
