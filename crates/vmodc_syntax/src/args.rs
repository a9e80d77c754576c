//! Argument Parser: one `Type [name] [= default]` clause at a time.

use vmodc_core::vocab::TypeId;

use crate::cursor::Cursor;
use crate::diagnostics::VccError;
use crate::types::{SymbolRegistry, TypeDescriptor, resolve_type};

/// One parsed argument of a prototype.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Argument {
    pub ty: TypeDescriptor,
    pub name: Option<String>,
    /// Default value text; for quoted defaults this is the unquoted content.
    pub default: Option<String>,
    /// The quote character of a quoted default, kept so documentation can
    /// render the value the way it was written.
    pub quote: Option<char>,
}

impl Argument {
    fn bare(ty: TypeDescriptor) -> Self {
        Self {
            ty,
            name: None,
            default: None,
            quote: None,
        }
    }
}

/// Parse one argument at the cursor.
///
/// The cursor must be inside an argument list with the surrounding
/// parentheses already stripped; parsing stops before the `,` separating the
/// next argument (the caller consumes it).
///
/// ## Errors
/// - type resolution errors (see [`resolve_type`])
/// - [`VccError::UnbalancedQuote`] for an unterminated quoted default
/// - [`VccError::InvalidEnumDefault`] when an ENUM default is not in the
///   declared literal set (fatal in every mode)
pub fn parse_argument(
    cur: &mut Cursor<'_>,
    registry: &mut SymbolRegistry,
) -> Result<Argument, VccError> {
    let ty = resolve_type(cur, registry)?;
    if cur.is_empty() || cur.peek() == Some(',') {
        return Ok(Argument::bare(ty));
    }

    // A '=' before the next ',' means a default follows the name.
    let rest = cur.rest();
    let comma = rest.find(',').unwrap_or(rest.len());
    let eq = rest.find('=').filter(|&i| i < comma);

    let Some(eq) = eq else {
        let name = rest[..comma].trim_end().to_string();
        cur.advance(comma);
        return Ok(Argument {
            name: Some(name),
            ..Argument::bare(ty)
        });
    };

    let name = rest[..eq].trim_end().to_string();
    cur.advance(eq + 1);
    cur.skip_ws();

    let (default, quote) = match cur.peek() {
        Some(q @ ('"' | '\'')) => (scan_quoted(cur, q)?, Some(q)),
        _ => (cur.take_to_comma().trim_end().to_string(), None),
    };

    if ty.id == TypeId::Enum {
        let known = ty
            .enum_spec
            .as_ref()
            .is_some_and(|spec| spec.iter().any(|l| l == &default));
        if !known {
            return Err(VccError::InvalidEnumDefault {
                value: default,
                line: cur.line(),
            });
        }
    }

    Ok(Argument {
        ty,
        name: Some(name),
        default: Some(default),
        quote,
    })
}

/// Scan a quoted default value: consume through the matching unescaped
/// closing quote and return the unquoted content. Only a backslash-escaped
/// occurrence of the same quote character is unescaped; other escapes are
/// kept verbatim.
fn scan_quoted(cur: &mut Cursor<'_>, q: char) -> Result<String, VccError> {
    debug_assert_eq!(cur.peek(), Some(q));
    let body = &cur.rest()[q.len_utf8()..];

    let mut out = String::new();
    let mut escaped = false;
    for (i, c) in body.char_indices() {
        if escaped {
            if c != q {
                out.push('\\');
            }
            out.push(c);
            escaped = false;
        } else if c == '\\' {
            escaped = true;
        } else if c == q {
            cur.advance(q.len_utf8() + i + q.len_utf8());
            return Ok(out);
        } else {
            out.push(c);
        }
    }
    Err(VccError::UnbalancedQuote { line: cur.line() })
}
