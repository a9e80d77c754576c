//! Prototype Builder: callable signatures derived from stanza directives.

use std::collections::HashSet;

use vmodc_core::ident::is_legal_ident;
use vmodc_core::vocab::TypeId;

use crate::args::{Argument, parse_argument};
use crate::cursor::Cursor;
use crate::diagnostics::VccError;
use crate::types::{SymbolRegistry, TypeDescriptor};

/// What a prototype belongs to; drives naming and signature rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProtoKind {
    Function,
    Object,
    /// A method; `object` is the owning object's base name.
    Method { object: String },
}

/// A callable signature: optional return type, base name, ordered arguments.
///
/// The return type is absent only for the synthetic destructor, which is
/// pure void. Argument lists are built fresh per prototype and never shared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prototype {
    pub kind: ProtoKind,
    pub retval: Option<TypeDescriptor>,
    /// The name as written; methods keep the `object.method` form.
    pub bname: String,
    pub args: Vec<Argument>,
}

impl Prototype {
    /// Parse `[<rtype>] <name>(<args>)` from a directive remainder.
    ///
    /// `with_retval` is false for `$Object` directives, whose prototypes are
    /// implicitly void.
    pub fn parse(
        text: &str,
        kind: ProtoKind,
        with_retval: bool,
        registry: &mut SymbolRegistry,
        line: usize,
    ) -> Result<Self, VccError> {
        let mut cur = Cursor::new(text, line);
        cur.skip_ws();

        let retval = if with_retval {
            Some(crate::types::resolve_type(&mut cur, registry)?)
        } else {
            Some(TypeDescriptor::plain(TypeId::Void))
        };

        let Some(head) = cur.take_until('(') else {
            return Err(VccError::MalformedStanza {
                context: format!("${}", kind.keyword()),
                detail: "expected a '(' argument list".into(),
                line: cur.line(),
            });
        };
        let bname = head.trim().to_string();

        let mut proto = Self {
            kind,
            retval,
            bname,
            args: Vec::new(),
        };
        if !is_legal_ident(&proto.cname()) {
            return Err(VccError::IllegalIdentifier {
                context: format!("{}()", proto.bname),
                name: proto.bname.clone(),
                line: cur.line(),
            });
        }

        let inner = cur.rest().trim_end();
        let Some(inner) = inner.strip_suffix(')') else {
            return Err(VccError::MalformedStanza {
                context: format!("${}", proto.kind.keyword()),
                detail: "unterminated argument list".into(),
                line: cur.line(),
            });
        };
        proto.parse_args(inner, registry, line)?;
        Ok(proto)
    }

    fn parse_args(
        &mut self,
        inner: &str,
        registry: &mut SymbolRegistry,
        line: usize,
    ) -> Result<(), VccError> {
        let mut cur = Cursor::new(inner, line);
        cur.skip_ws();
        let mut names: HashSet<String> = HashSet::new();

        while !cur.is_empty() {
            let arg = parse_argument(&mut cur, registry)?;
            if let Some(name) = &arg.name {
                if !is_legal_ident(name) {
                    return Err(VccError::IllegalIdentifier {
                        context: format!("{}()", self.bname),
                        name: name.clone(),
                        line: cur.line(),
                    });
                }
                if !names.insert(name.clone()) {
                    return Err(VccError::DuplicateArgumentName {
                        func: self.bname.clone(),
                        name: name.clone(),
                        line: cur.line(),
                    });
                }
            }
            self.args.push(arg);
            cur.skip_ws();
            if cur.is_empty() {
                break;
            }
            if !cur.eat(',') {
                return Err(VccError::MalformedStanza {
                    context: format!("${}", self.kind.keyword()),
                    detail: "expected ',' between arguments".into(),
                    line: cur.line(),
                });
            }
            cur.skip_ws();
        }
        Ok(())
    }

    /// Canonical name: the base name with dots replaced by underscores.
    pub fn cname(&self) -> String {
        self.bname.replace('.', "_")
    }

    /// Fully-qualified emission name: symbol prefix + canonical name.
    pub fn qualified(&self, sympfx: &str) -> String {
        format!("{sympfx}{}", self.cname())
    }

    /// For methods, the name after the `object.` qualifier.
    pub fn method_leaf(&self) -> &str {
        match self.bname.split_once('.') {
            Some((_, leaf)) => leaf,
            None => &self.bname,
        }
    }

    /// The native return type (`VCL_VOID` for the retval-less destructor).
    pub fn c_ret(&self) -> &'static str {
        self.retval
            .as_ref()
            .map(TypeDescriptor::native)
            .unwrap_or("VCL_VOID")
    }

    /// Render the VCL-level call signature used in documentation.
    ///
    /// The short form shows types only; the long form adds names and
    /// defaults. Private-context arguments are omitted from both. Long
    /// signatures over 68 columns wrap one argument per line with doubled
    /// prefix indentation.
    pub fn vcl_signature(&self, short: bool, pfx: &str) -> String {
        let pfx = match &self.kind {
            ProtoKind::Method { .. } => format!("{pfx}{pfx}"),
            _ => pfx.to_string(),
        };
        let mut s = pfx.clone();
        match &self.kind {
            ProtoKind::Object => {
                s.push_str(&format!("new x{} = {}(", self.bname, self.bname));
            }
            ProtoKind::Method { .. } => {
                s.push_str(&format!("x{}(", self.bname));
            }
            ProtoKind::Function => {
                if let Some(rv) = &self.retval {
                    s.push_str(&rv.vcl());
                    s.push(' ');
                }
                s.push_str(&format!("{}(", self.bname));
            }
        }

        let mut parts = Vec::new();
        for arg in &self.args {
            if arg.ty.id.is_private() {
                continue;
            }
            let mut t = if short {
                arg.ty.synopsis().to_string()
            } else {
                arg.ty.vcl()
            };
            if !short {
                if let Some(name) = &arg.name {
                    t.push(' ');
                    t.push_str(name);
                }
                if let Some(default) = &arg.default {
                    t.push('=');
                    match arg.quote {
                        Some(q) => t.push_str(&format!("{q}{default}{q}")),
                        None => t.push_str(default),
                    }
                }
            }
            parts.push(t);
        }

        let joined = parts.join(",@");
        if s.len() + joined.len() > 68 && !short {
            let cont = format!("\n{pfx}{pfx}");
            s.push_str(&cont);
            s.push_str(&joined.replace('@', &cont));
            s.push('\n');
            s.push_str(&pfx);
            s.push(')');
        } else {
            s.push_str(&joined.replace('@', " "));
            s.push(')');
        }
        s
    }
}

impl ProtoKind {
    fn keyword(&self) -> &'static str {
        match self {
            ProtoKind::Function => "Function",
            ProtoKind::Object => "Object",
            ProtoKind::Method { .. } => "Method",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_fn(text: &str) -> Result<Prototype, VccError> {
        let mut reg = SymbolRegistry::new();
        Prototype::parse(text, ProtoKind::Function, true, &mut reg, 1)
    }

    #[test]
    fn simple_function() {
        let p = parse_fn("INT add(INT a, INT b=1)").unwrap();
        assert_eq!(p.bname, "add");
        assert_eq!(p.cname(), "add");
        assert_eq!(p.qualified("vmod_"), "vmod_add");
        assert_eq!(p.args.len(), 2);
        assert_eq!(p.args[1].default.as_deref(), Some("1"));
    }

    #[test]
    fn no_arguments() {
        let p = parse_fn("TIME now()").unwrap();
        assert!(p.args.is_empty());
        assert_eq!(p.c_ret(), "VCL_TIME");
    }

    #[test]
    fn missing_paren_is_structural() {
        let r = parse_fn("INT add");
        assert!(matches!(r, Err(VccError::MalformedStanza { .. })));
    }

    #[test]
    fn illegal_name_rejected() {
        let r = parse_fn("INT add-one()");
        assert!(matches!(r, Err(VccError::IllegalIdentifier { name, .. }) if name == "add-one"));
    }

    #[test]
    fn duplicate_argument_rejected() {
        let r = parse_fn("VOID f(INT a, STRING a)");
        assert!(matches!(
            r,
            Err(VccError::DuplicateArgumentName { name, .. }) if name == "a"
        ));
    }

    #[test]
    fn illegal_argument_name_rejected() {
        let r = parse_fn("VOID f(INT a-b)");
        assert!(matches!(r, Err(VccError::IllegalIdentifier { .. })));
    }

    #[test]
    fn method_names_qualify() {
        let mut reg = SymbolRegistry::new();
        let p = Prototype::parse(
            "INT counter.get()",
            ProtoKind::Method {
                object: "counter".into(),
            },
            true,
            &mut reg,
            1,
        )
        .unwrap();
        assert_eq!(p.cname(), "counter_get");
        assert_eq!(p.method_leaf(), "get");
        assert_eq!(p.qualified("vmod_"), "vmod_counter_get");
    }

    #[test]
    fn signature_long_and_short() {
        let p = parse_fn("INT add(INT a, INT b=1)").unwrap();
        insta::assert_snapshot!(p.vcl_signature(false, ""), @"INT add(INT a, INT b=1)");
        insta::assert_snapshot!(p.vcl_signature(true, ""), @"INT add(INT, INT)");
    }

    #[test]
    fn signature_hides_private_context() {
        let p = parse_fn("STRING peek(PRIV_TASK, STRING key)").unwrap();
        assert_eq!(p.vcl_signature(false, ""), "STRING peek(STRING key)");
        assert_eq!(p.vcl_signature(true, ""), "STRING peek(STRING)");
    }

    #[test]
    fn signature_quotes_string_defaults() {
        let p = parse_fn("VOID greet(STRING who=\"world\")").unwrap();
        assert_eq!(p.vcl_signature(false, ""), "VOID greet(STRING who=\"world\")");
    }

    #[test]
    fn long_signature_wraps_per_argument() {
        let p = parse_fn(
            "STRING join(STRING first_part, STRING second_part, STRING third_part, STRING fourth_part)",
        )
        .unwrap();
        let s = p.vcl_signature(false, "   ");
        let mut lines = s.lines();
        assert_eq!(lines.next(), Some("   STRING join("));
        assert_eq!(lines.next(), Some("      STRING first_part,"));
        assert_eq!(lines.next(), Some("      STRING second_part,"));
        assert_eq!(lines.next(), Some("      STRING third_part,"));
        assert_eq!(lines.next(), Some("      STRING fourth_part"));
        assert_eq!(lines.next(), Some("   )"));
        assert_eq!(lines.next(), None);
    }
}
