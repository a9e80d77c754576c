#![forbid(unsafe_code)]
//! Frontend for the vmodc compiler: cursor, stanza parser, semantic model,
//! diagnostics.
//!
//! This crate turns a `.vcc` interface description into a [`model::ModuleModel`]
//! — an ordered list of typed stanzas plus the frozen enum-literal registry —
//! which the emitters in the `vmodc` crate consume read-only.
//!
//! ## Notes
//! - This crate is intentionally "syntax + model only": it never renders
//!   artifacts and never touches the filesystem.
//! - The type vocabulary and identifier grammar come from `vmodc_core`.
//!
//! ## Examples
//! ```rust
//! let src = "$Module demo 3 \"Demo module\"\n\n$Function INT add(INT a, INT b=1)\n";
//! let model = vmodc_syntax::parse(src, true).unwrap();
//! assert_eq!(model.name, "demo");
//! assert_eq!(model.contents.len(), 2);
//! ```

pub mod args;
pub mod cursor;
pub mod diagnostics;
pub mod model;
pub mod proto;
pub mod types;

pub use args::Argument;
pub use diagnostics::{Severity, VccError};
pub use model::{ModuleModel, Stanza, parse};
pub use proto::{ProtoKind, Prototype};
pub use types::{SymbolRegistry, TypeDescriptor};
