//! Stanza Dispatcher and semantic model.
//!
//! The input splits into stanzas at line-leading `$` markers. Each stanza is
//! classified by its keyword against a closed set and parsed into one arm of
//! the [`Stanza`] sum type; emitters dispatch over it with exhaustive
//! matches, so adding a stanza kind is a compile-time-checked change.
//!
//! Construction order enforces the structural rules: the first stanza must
//! be `$Module`, and a `$Method` attaches to the most recently declared
//! `$Object`.

use vmodc_core::ident::is_legal_ident;
use vmodc_core::vocab::TypeId;

use crate::diagnostics::VccError;
use crate::proto::{ProtoKind, Prototype};
use crate::types::{SymbolRegistry, TypeDescriptor};

/// Default symbol prefix, overridable with `$Prefix`.
pub const DEFAULT_SYMPFX: &str = "vmod_";

/// JSON description schema version.
pub const SCHEMA_VERSION: &str = "1.0";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Stanza {
    Module(ModuleStanza),
    Prefix(PrefixStanza),
    Abi(AbiStanza),
    Event(EventStanza),
    Function(FunctionStanza),
    Object(ObjectStanza),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleStanza {
    pub name: String,
    pub mansection: String,
    pub description: String,
    pub doc: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrefixStanza {
    pub prefix: String,
    pub doc: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AbiStanza {
    pub strict: bool,
    pub doc: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventStanza {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionStanza {
    pub proto: Prototype,
    pub doc: Vec<String>,
}

/// An object stanza owns its methods and the two synthetic prototypes.
///
/// The constructor re-uses the declared argument list (freshly cloned, never
/// shared); the destructor takes no arguments and has no declared return
/// type. The extra native-convention arguments (context, instance handle,
/// instance name) are appended by the emitters, not stored here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectStanza {
    pub proto: Prototype,
    pub init: Prototype,
    pub fini: Prototype,
    pub methods: Vec<MethodStanza>,
    pub doc: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodStanza {
    pub proto: Prototype,
    pub doc: Vec<String>,
}

/// The fully parsed, immutable module description.
///
/// Owns every stanza and the frozen [`SymbolRegistry`]; emitters only borrow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleModel {
    pub name: String,
    pub mansection: String,
    pub description: String,
    /// Text before the first stanza marker, reproduced in documentation.
    pub copyright: String,
    /// Symbol prefix including the trailing underscore (default `vmod_`).
    pub sympfx: String,
    /// ABI contract: strict (default) pins the runtime version fields to 0.
    pub strict_abi: bool,
    pub contents: Vec<Stanza>,
    pub registry: SymbolRegistry,
    /// Non-fatal diagnostics gathered during parsing (lenient mode only).
    pub warnings: Vec<VccError>,
}

impl ModuleModel {
    /// The callback struct name, `Vmod_<module>_Func`.
    pub fn func_struct(&self) -> String {
        format!("Vmod_{}_Func", self.name)
    }

    /// The instance struct name for an object, `struct <pfx><module>_<obj>`.
    pub fn obj_struct(&self, obj: &ObjectStanza) -> String {
        format!("struct {}{}_{}", self.sympfx, self.name, obj.proto.bname)
    }
}

/// Parse a complete `.vcc` input into a [`ModuleModel`].
///
/// Model construction either fully succeeds or fails with the first fatal
/// error; emission never sees a partial model. `strict` upgrades the
/// recoverable diagnostics (see [`VccError::severity`]) to fatal.
pub fn parse(source: &str, strict: bool) -> Result<ModuleModel, VccError> {
    Parser::new(strict).run(source)
}

struct Parser {
    strict: bool,
    sympfx: String,
    strict_abi: bool,
    module: Option<ModuleStanza>,
    contents: Vec<Stanza>,
    registry: SymbolRegistry,
    warnings: Vec<VccError>,
}

impl Parser {
    fn new(strict: bool) -> Self {
        Self {
            strict,
            sympfx: DEFAULT_SYMPFX.to_string(),
            strict_abi: true,
            module: None,
            contents: Vec::new(),
            registry: SymbolRegistry::new(),
            warnings: Vec::new(),
        }
    }

    fn run(mut self, source: &str) -> Result<ModuleModel, VccError> {
        let (copyright, stanzas) = split_stanzas(source);

        for raw in &stanzas {
            self.stanza(raw)?;
        }

        let Some(module) = self.module.take() else {
            return Err(VccError::MissingModule { line: 1 });
        };
        tracing::debug!(
            module = %module.name,
            stanzas = self.contents.len(),
            enums = self.registry.iter().count(),
            "model construction complete"
        );
        Ok(ModuleModel {
            name: module.name.clone(),
            mansection: module.mansection.clone(),
            description: module.description.clone(),
            copyright: copyright.to_string(),
            sympfx: self.sympfx,
            strict_abi: self.strict_abi,
            contents: self.contents,
            registry: self.registry,
            warnings: self.warnings,
        })
    }

    fn stanza(&mut self, raw: &RawStanza<'_>) -> Result<(), VccError> {
        let line = raw.line;
        let keyword = raw.keyword;

        // Everything after the first stanza marker requires $Module first.
        if self.module.is_none() && keyword != "Module" {
            return Err(VccError::MissingModule { line });
        }

        match keyword {
            "Module" => self.module_stanza(raw),
            "Prefix" => self.prefix_stanza(raw),
            "ABI" => self.abi_stanza(raw),
            "Event" => self.event_stanza(raw),
            "Function" => self.function_stanza(raw),
            "Object" => self.object_stanza(raw),
            "Method" => self.method_stanza(raw),
            _ => Err(VccError::UnknownStanza {
                keyword: keyword.to_string(),
                line,
            }),
        }
    }

    fn module_stanza(&mut self, raw: &RawStanza<'_>) -> Result<(), VccError> {
        if self.module.is_some() {
            return Err(VccError::MalformedStanza {
                context: "$Module".into(),
                detail: "duplicate $Module stanza".into(),
                line: raw.line,
            });
        }
        let mut parts = raw.remainder.splitn(3, ' ');
        let (Some(name), Some(mansection), Some(description)) =
            (parts.next(), parts.next(), parts.next())
        else {
            return Err(VccError::MalformedStanza {
                context: "$Module".into(),
                detail: "expected <name> <section> <description>".into(),
                line: raw.line,
            });
        };
        if !is_legal_ident(name) {
            return Err(VccError::IllegalIdentifier {
                context: "$Module".into(),
                name: name.to_string(),
                line: raw.line,
            });
        }
        let stanza = ModuleStanza {
            name: name.to_string(),
            mansection: mansection.to_string(),
            description: description.to_string(),
            doc: raw.doc.clone(),
        };
        self.module = Some(stanza.clone());
        self.contents.push(Stanza::Module(stanza));
        Ok(())
    }

    fn prefix_stanza(&mut self, raw: &RawStanza<'_>) -> Result<(), VccError> {
        let sym = raw.remainder.as_str();
        if !is_legal_ident(sym) {
            return Err(VccError::IllegalIdentifier {
                context: "$Prefix".into(),
                name: sym.to_string(),
                line: raw.line,
            });
        }
        self.sympfx = format!("{sym}_");
        self.contents.push(Stanza::Prefix(PrefixStanza {
            prefix: self.sympfx.clone(),
            doc: raw.doc.clone(),
        }));
        Ok(())
    }

    fn abi_stanza(&mut self, raw: &RawStanza<'_>) -> Result<(), VccError> {
        // Case-sensitive; anything but the two literals is fatal in every mode.
        self.strict_abi = match raw.remainder.as_str() {
            "strict" => true,
            "vrt" => false,
            other => {
                return Err(VccError::InvalidAbi {
                    value: other.to_string(),
                    line: raw.line,
                });
            }
        };
        self.contents.push(Stanza::Abi(AbiStanza {
            strict: self.strict_abi,
            doc: raw.doc.clone(),
        }));
        Ok(())
    }

    fn event_stanza(&mut self, raw: &RawStanza<'_>) -> Result<(), VccError> {
        let name = raw.remainder.as_str();
        if !is_legal_ident(name) {
            return Err(VccError::IllegalIdentifier {
                context: "$Event".into(),
                name: name.to_string(),
                line: raw.line,
            });
        }
        if !raw.doc.is_empty() {
            let err = VccError::EventWithDocs {
                name: name.to_string(),
                line: raw.line,
            };
            if self.strict {
                return Err(err);
            }
            self.warnings.push(err);
        }
        self.contents.push(Stanza::Event(EventStanza {
            name: name.to_string(),
        }));
        Ok(())
    }

    fn function_stanza(&mut self, raw: &RawStanza<'_>) -> Result<(), VccError> {
        let proto = Prototype::parse(
            &raw.remainder,
            ProtoKind::Function,
            true,
            &mut self.registry,
            raw.line,
        )?;
        self.contents.push(Stanza::Function(FunctionStanza {
            proto,
            doc: raw.doc.clone(),
        }));
        Ok(())
    }

    fn object_stanza(&mut self, raw: &RawStanza<'_>) -> Result<(), VccError> {
        let proto = Prototype::parse(
            &raw.remainder,
            ProtoKind::Object,
            false,
            &mut self.registry,
            raw.line,
        )?;

        let init = Prototype {
            kind: ProtoKind::Function,
            retval: Some(TypeDescriptor::plain(TypeId::Void)),
            bname: format!("{}__init", proto.bname),
            args: proto.args.clone(),
        };
        let fini = Prototype {
            kind: ProtoKind::Function,
            retval: None,
            bname: format!("{}__fini", proto.bname),
            args: Vec::new(),
        };

        self.contents.push(Stanza::Object(ObjectStanza {
            proto,
            init,
            fini,
            methods: Vec::new(),
            doc: raw.doc.clone(),
        }));
        Ok(())
    }

    fn method_stanza(&mut self, raw: &RawStanza<'_>) -> Result<(), VccError> {
        let obj_name = match self.contents.last() {
            Some(Stanza::Object(object)) => object.proto.bname.clone(),
            _ => return Err(VccError::MethodWithoutObject { line: raw.line }),
        };

        let proto = Prototype::parse(
            &raw.remainder,
            ProtoKind::Method {
                object: obj_name.clone(),
            },
            true,
            &mut self.registry,
            raw.line,
        )?;
        let qualifies = proto
            .bname
            .strip_prefix(obj_name.as_str())
            .is_some_and(|rest| rest.starts_with('.'));
        if !qualifies {
            return Err(VccError::MalformedStanza {
                context: "$Method".into(),
                detail: format!("method must be qualified by the preceding object '{obj_name}'"),
                line: raw.line,
            });
        }
        if let Some(Stanza::Object(object)) = self.contents.last_mut() {
            object.methods.push(MethodStanza {
                proto,
                doc: raw.doc.clone(),
            });
        }
        Ok(())
    }
}

/// One raw stanza block: keyword, whitespace-normalized remainder, trimmed
/// documentation lines, and the 1-based line of the `$` marker.
struct RawStanza<'a> {
    keyword: &'a str,
    remainder: String,
    doc: Vec<String>,
    line: usize,
}

/// Split the input into the copyright header and raw stanza blocks.
fn split_stanzas(source: &str) -> (&str, Vec<RawStanza<'_>>) {
    let mut marks: Vec<usize> = Vec::new();
    if source.starts_with('$') {
        marks.push(0);
    }
    for (i, _) in source.match_indices("\n$") {
        marks.push(i + 1);
    }

    let header_end = marks.first().copied().unwrap_or(source.len());
    let copyright = source[..header_end].trim();

    let mut stanzas = Vec::new();
    let mut line = 1 + source[..header_end].matches('\n').count();
    for (idx, &start) in marks.iter().enumerate() {
        let end = marks.get(idx + 1).copied().unwrap_or(source.len());
        let block = &source[start + 1..end]; // past the '$'

        // The directive runs to the first blank line; the rest is the doc
        // block, trimmed of blank lines at both ends. A directive may span
        // multiple physical lines.
        let (directive, doc_text) = match block.find("\n\n") {
            Some(i) => (&block[..i + 1], &block[i + 1..]),
            None => (block, ""),
        };
        let mut words = directive.split_whitespace();
        let keyword = words.next().unwrap_or("");
        let remainder = words.collect::<Vec<_>>().join(" ");

        let mut doc: Vec<String> = doc_text.split('\n').map(str::to_string).collect();
        while doc.first().is_some_and(|l| l.is_empty()) {
            doc.remove(0);
        }
        while doc.last().is_some_and(|l| l.is_empty()) {
            doc.pop();
        }

        stanzas.push(RawStanza {
            keyword,
            remainder,
            doc,
            line,
        });
        line += block.matches('\n').count();
    }
    (copyright, stanzas)
}
