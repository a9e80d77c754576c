//! Type Resolver: map type tokens to semantic descriptors.

use std::collections::BTreeSet;

use vmodc_core::vocab::{self, TypeId};

use crate::cursor::Cursor;
use crate::diagnostics::VccError;

/// A resolved type occurrence.
///
/// `enum_spec` is present iff the category is [`TypeId::Enum`]; the literals
/// keep their declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDescriptor {
    pub id: TypeId,
    pub enum_spec: Option<Vec<String>>,
}

impl TypeDescriptor {
    pub fn plain(id: TypeId) -> Self {
        Self {
            id,
            enum_spec: None,
        }
    }

    /// The C type for emitted declarations.
    pub fn native(&self) -> &'static str {
        self.id.native_type()
    }

    /// Long documentation form: `ENUM {a, b, c}` for enumerations, the VCL
    /// name otherwise.
    pub fn vcl(&self) -> String {
        match &self.enum_spec {
            Some(lits) => format!("{} {{{}}}", self.id.as_str(), lits.join(", ")),
            None => self.id.vcl_name().to_string(),
        }
    }

    /// Short documentation form: just the VCL name.
    pub fn synopsis(&self) -> &'static str {
        self.id.vcl_name()
    }
}

/// The set of enumeration literals referenced anywhere in one module.
///
/// Populated by the Type Resolver while parsing, frozen afterwards, and read
/// by every emitter. Iteration is sorted, so cross-cutting declarations are
/// emitted once in a stable order no matter how many stanzas reference them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SymbolRegistry {
    literals: BTreeSet<String>,
}

impl SymbolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, literal: &str) {
        self.literals.insert(literal.to_string());
    }

    pub fn is_empty(&self) -> bool {
        self.literals.is_empty()
    }

    /// Sorted iteration over the registered literals.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.literals.iter().map(String::as_str)
    }
}

/// Resolve one type token at the cursor.
///
/// Consumes the token (and, for `ENUM`, the following brace-delimited literal
/// list) and leaves the cursor after any trailing whitespace. Every enum
/// literal is registered in `registry`.
///
/// ## Errors
/// - [`VccError::UnknownType`] if the token is not in the vocabulary.
/// - [`VccError::MalformedStanza`] if an `ENUM` is not followed by `{...}`.
pub fn resolve_type(
    cur: &mut Cursor<'_>,
    registry: &mut SymbolRegistry,
) -> Result<TypeDescriptor, VccError> {
    let token = cur.take_type_token();
    let Some(id) = vocab::from_str(token) else {
        return Err(VccError::UnknownType {
            token: token.to_string(),
            line: cur.line(),
        });
    };
    cur.skip_ws();

    if id != TypeId::Enum {
        return Ok(TypeDescriptor::plain(id));
    }

    if !cur.eat('{') {
        return Err(VccError::MalformedStanza {
            context: "ENUM".into(),
            detail: "expected a {...} literal list".into(),
            line: cur.line(),
        });
    }
    let Some(body) = cur.take_until('}') else {
        return Err(VccError::MalformedStanza {
            context: "ENUM".into(),
            detail: "unterminated literal list".into(),
            line: cur.line(),
        });
    };
    cur.skip_ws();

    let mut spec = Vec::new();
    for literal in body.split(',') {
        let literal = literal.trim();
        registry.insert(literal);
        spec.push(literal.to_string());
    }
    Ok(TypeDescriptor {
        id: TypeId::Enum,
        enum_spec: Some(spec),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolve(text: &str) -> (Result<TypeDescriptor, VccError>, SymbolRegistry, String) {
        let mut cur = Cursor::new(text, 1);
        let mut reg = SymbolRegistry::new();
        let r = resolve_type(&mut cur, &mut reg);
        (r, reg, cur.rest().to_string())
    }

    #[test]
    fn plain_type() {
        let (r, _, rest) = resolve("DURATION d");
        assert_eq!(r.unwrap().id, TypeId::Duration);
        assert_eq!(rest, "d");
    }

    #[test]
    fn unknown_type_is_rejected() {
        let (r, _, _) = resolve("FLOAT x");
        assert!(matches!(r, Err(VccError::UnknownType { token, .. }) if token == "FLOAT"));
    }

    #[test]
    fn enum_collects_literals_in_order() {
        let (r, reg, rest) = resolve("ENUM { one, two , three } e");
        let d = r.unwrap();
        assert_eq!(
            d.enum_spec.as_deref(),
            Some(&["one".to_string(), "two".into(), "three".into()][..])
        );
        assert_eq!(rest, "e");
        // Registry iteration is sorted, not declaration-ordered.
        assert_eq!(reg.iter().collect::<Vec<_>>(), vec!["one", "three", "two"]);
    }

    #[test]
    fn enum_requires_brace_list() {
        let (r, _, _) = resolve("ENUM e");
        assert!(matches!(r, Err(VccError::MalformedStanza { .. })));
    }

    #[test]
    fn enum_vcl_rendering() {
        let (r, _, _) = resolve("ENUM {a, b}");
        assert_eq!(r.unwrap().vcl(), "ENUM {a, b}");
    }

    #[test]
    fn string_list_folds_in_docs() {
        let d = TypeDescriptor::plain(TypeId::StringList);
        assert_eq!(d.vcl(), "STRING");
        assert_eq!(d.synopsis(), "STRING");
        assert_eq!(d.native(), "const char *, ...");
    }
}
