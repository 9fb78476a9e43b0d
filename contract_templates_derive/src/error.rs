//! Derive macro for error types.
//!
//! Generates `std::fmt::Display`, `std::error::Error` and, when a field is
//! tagged `#[source]`, `Error::source`.
//!
//! # Usage
//!
//! ```ignore
//! use contract_templates_derive::Error;
//!
//! #[derive(Debug, Error)]
//! pub enum ScriptError {
//!     #[error("program too short")]
//!     ProgramTooShort,
//!
//!     #[error("bad opcode 0x{0:02x}")]
//!     BadOpcode(u8),
//!
//!     #[error("wrong program format at instruction {index}")]
//!     WrongFormat { index: usize, detail: String },
//!
//!     #[error("disassembly failed: {0}")]
//!     Disassembly(#[source] VMError),
//! }
//! ```
//!
//! Messages may reference any subset of the fields: `{0}`, `{1}` for tuple
//! fields or `{field_name}` for named fields, with optional format specs.
//! Fields the message does not mention are not bound.

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::{ToTokens, format_ident, quote};
use std::collections::HashSet;
use syn::{Attribute, Data, DeriveInput, Fields, LitStr, parse_macro_input};

/// A single displayable shape: one enum variant, or the struct itself.
struct Shape<'a> {
    /// Pattern path used in match arms (`Self::Variant` or `Self`).
    path: TokenStream2,
    fields: &'a Fields,
    message: String,
}

pub fn derive_error(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match expand_error_derive(&input) {
        Ok(tokens) => TokenStream::from(tokens),
        Err(err) => err.to_compile_error().into(),
    }
}

fn expand_error_derive(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let shapes = match &input.data {
        Data::Enum(data_enum) => data_enum
            .variants
            .iter()
            .map(|variant| {
                let ident = &variant.ident;
                Ok(Shape {
                    path: quote!(Self::#ident),
                    fields: &variant.fields,
                    message: error_message(
                        &variant.attrs,
                        ident,
                        &format!("variant `{}`", ident),
                    )?,
                })
            })
            .collect::<syn::Result<Vec<_>>>()?,
        Data::Struct(data_struct) => vec![Shape {
            path: quote!(Self),
            fields: &data_struct.fields,
            message: error_message(&input.attrs, name, &format!("type `{}`", name))?,
        }],
        Data::Union(_) => {
            return Err(syn::Error::new_spanned(
                input,
                "Error derive does not support unions",
            ));
        }
    };

    let display_arms: Vec<_> = shapes.iter().map(display_arm).collect();
    let source_arms: Vec<_> = shapes.iter().filter_map(source_arm).collect();

    let source_fn = if source_arms.is_empty() {
        quote! {}
    } else {
        quote! {
            #[allow(unreachable_patterns)]
            fn source(&self) -> ::std::option::Option<&(dyn ::std::error::Error + 'static)> {
                match self {
                    #(#source_arms)*
                    _ => ::std::option::Option::None,
                }
            }
        }
    };

    Ok(quote! {
        impl #impl_generics ::std::fmt::Display for #name #ty_generics #where_clause {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                match self {
                    #(#display_arms)*
                }
            }
        }

        impl #impl_generics ::std::error::Error for #name #ty_generics #where_clause {
            #source_fn
        }
    })
}

/// Builds the `Display` match arm for one shape, binding only the fields
/// its message references.
fn display_arm(shape: &Shape<'_>) -> TokenStream2 {
    let path = &shape.path;
    let used = referenced_args(&shape.message);

    match shape.fields {
        Fields::Unit => {
            let message = &shape.message;
            quote! {
                #path => write!(f, #message),
            }
        }
        Fields::Unnamed(fields) => {
            let message = convert_positional_to_named(&shape.message, fields.unnamed.len());
            let mut bindings = Vec::with_capacity(fields.unnamed.len());
            let mut args = Vec::new();
            for i in 0..fields.unnamed.len() {
                if used.contains(&i.to_string()) {
                    let ident = format_ident!("f{}", i);
                    bindings.push(quote!(#ident));
                    args.push(quote!(#ident = #ident));
                } else {
                    bindings.push(quote!(_));
                }
            }
            quote! {
                #path(#(#bindings),*) => write!(f, #message #(, #args)*),
            }
        }
        Fields::Named(fields) => {
            let message = &shape.message;
            let idents: Vec<_> = fields
                .named
                .iter()
                .filter_map(|field| field.ident.as_ref())
                .filter(|ident| used.contains(&ident.to_string()))
                .collect();
            quote! {
                #path { #(#idents,)* .. } => write!(f, #message #(, #idents = #idents)*),
            }
        }
    }
}

/// Builds the `Error::source` match arm for a shape with a `#[source]` field.
fn source_arm(shape: &Shape<'_>) -> Option<TokenStream2> {
    let path = &shape.path;

    match shape.fields {
        Fields::Unit => None,
        Fields::Unnamed(fields) => {
            let index = fields
                .unnamed
                .iter()
                .position(|field| is_source(&field.attrs))?;
            let bindings = (0..fields.unnamed.len()).map(|i| {
                if i == index {
                    quote!(source)
                } else {
                    quote!(_)
                }
            });
            Some(quote! {
                #path(#(#bindings),*) => ::std::option::Option::Some(
                    source as &(dyn ::std::error::Error + 'static)
                ),
            })
        }
        Fields::Named(fields) => {
            let ident = fields
                .named
                .iter()
                .find(|field| is_source(&field.attrs))?
                .ident
                .as_ref()?;
            Some(quote! {
                #path { #ident: source, .. } => ::std::option::Option::Some(
                    source as &(dyn ::std::error::Error + 'static)
                ),
            })
        }
    }
}

fn is_source(attrs: &[Attribute]) -> bool {
    attrs.iter().any(|attr| attr.path().is_ident("source"))
}

/// Extracts the display message from an `#[error("...")]` attribute.
fn error_message<T: ToTokens>(
    attrs: &[Attribute],
    target: &T,
    target_desc: &str,
) -> syn::Result<String> {
    let attr = attrs
        .iter()
        .find(|attr| attr.path().is_ident("error"))
        .ok_or_else(|| {
            syn::Error::new_spanned(
                target,
                format!(
                    "missing #[error(\"...\")] attribute on {}; every error must declare a display message",
                    target_desc
                ),
            )
        })?;

    attr.parse_args::<LitStr>()
        .map(|lit| lit.value())
        .map_err(|_| {
            syn::Error::new_spanned(
                &attr.meta,
                "invalid #[error] attribute: expected a string literal like #[error(\"program too short\")]",
            )
        })
}

/// Collects the argument names a format string refers to (`0`, `index`, ...).
fn referenced_args(format_str: &str) -> HashSet<String> {
    let mut out = HashSet::new();
    let mut chars = format_str.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '{' if chars.peek() == Some(&'{') => {
                chars.next();
            }
            '{' => {
                let spec: String = chars.by_ref().take_while(|c| *c != '}').collect();
                let name = spec.split(':').next().unwrap_or_default().trim();
                if !name.is_empty() {
                    out.insert(name.to_string());
                }
            }
            _ => {}
        }
    }

    out
}

/// Converts positional format args `{0}`, `{1:x}` to named args `{f0}`, `{f1:x}`.
fn convert_positional_to_named(format_str: &str, field_count: usize) -> String {
    let mut result = format_str.to_string();
    for i in (0..field_count).rev() {
        result = result
            .replace(&format!("{{{}}}", i), &format!("{{f{}}}", i))
            .replace(&format!("{{{}:", i), &format!("{{f{}:", i));
    }
    result
}
