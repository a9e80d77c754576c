#![forbid(unsafe_code)]
//! Shared vocabulary for the vmodc compiler.
//!
//! This crate is the single source of truth for the closed VCC type
//! vocabulary and the identifier grammar. It is intentionally dependency-free
//! and side-effect-free so the parser, the emitters, and external tooling all
//! agree on the same tables.
//!
//! ## Notes
//! - Lookup via [`vocab::from_str`] is **case-sensitive**; `INT` is a type
//!   token, `int` is not.
//! - Enforcement of the surrounding syntax (brace lists, argument grammar)
//!   lives in `vmodc_syntax`, not here.

pub mod ident;
pub mod vocab;

pub use ident::is_legal_ident;
pub use vocab::TypeId;
