#![forbid(unsafe_code)]
//! vmodc - compiler for VMOD interface descriptions.
//!
//! Reads a `vmod.vcc` interface description and produces:
//! - `<prefix>.h` - prototypes for the implementation
//! - `<prefix>.c` - glue structures, the serialized self-description and the
//!   versioned data record consumed by the runtime loader
//! - `vmod_<name>.rst` / `vmod_<name>.man.rst` - extracted documentation
//!
//! The frontend (cursor, stanza parser, semantic model) lives in
//! `vmodc_syntax`; the type vocabulary in `vmodc_core`. This crate owns the
//! emitters and the CLI shell.
//!
//! ## Panic Policy
//!
//! This codebase follows explicit error handling:
//!
//! - **Production code**: Use `Result` with `?` / `map_err`. The `cli`
//!   module enforces `#![deny(clippy::unwrap_used)]`.
//! - **Test code**: `.unwrap()` and `.expect()` are acceptable in tests.
//! - **True invariants**: If a panic represents a compiler bug, use
//!   `.expect("INVARIANT: reason")` with a clear explanation.

pub mod backend;
pub mod cli;

pub use backend::{Artifacts, emit_all, random_file_id};
pub use vmodc_syntax::{ModuleModel, VccError, parse};
