//! The closed VCC type vocabulary.
//!
//! Every type token that may appear in a `.vcc` interface description is
//! listed here, together with the C type it maps to in emitted glue code.
//! The table is closed: the parser rejects anything not in it.
//!
//! ## Notes
//! - `ENUM` is the only category that carries a per-use literal set; the set
//!   itself lives on the parsed descriptor, not in this registry.
//! - The four `PRIV_*` categories are *private-context* arguments: they are
//!   part of the native calling convention but never shown in VCL-level
//!   documentation signatures.
//!
//! ## Examples
//! ```rust
//! use vmodc_core::vocab::{self, TypeId};
//!
//! assert_eq!(vocab::from_str("INT"), Some(TypeId::Int));
//! assert_eq!(TypeId::Int.native_type(), "VCL_INT");
//! assert!(TypeId::PrivTask.is_private());
//! ```

/// Stable identifier for every VCC type token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeId {
    Acl,
    Backend,
    Blob,
    Body,
    Bool,
    Bytes,
    Duration,
    Enum,
    Header,
    Http,
    Int,
    Ip,
    Probe,
    Real,
    Stevedore,
    Strands,
    String,
    StringList,
    Time,
    Void,

    // Private-context arguments (opaque per-scope state handles)
    PrivCall,
    PrivVcl,
    PrivTask,
    PrivTop,
}

/// One row of the vocabulary table.
#[derive(Debug, Clone, Copy)]
pub struct TypeInfo {
    pub id: TypeId,
    /// Canonical spelling in `.vcc` input.
    pub token: &'static str,
    /// The C type used in emitted declarations.
    pub native: &'static str,
}

/// The vocabulary table, in canonical (alphabetical) order.
pub const TYPES: &[TypeInfo] = &[
    TypeInfo { id: TypeId::Acl, token: "ACL", native: "VCL_ACL" },
    TypeInfo { id: TypeId::Backend, token: "BACKEND", native: "VCL_BACKEND" },
    TypeInfo { id: TypeId::Blob, token: "BLOB", native: "VCL_BLOB" },
    TypeInfo { id: TypeId::Body, token: "BODY", native: "VCL_BODY" },
    TypeInfo { id: TypeId::Bool, token: "BOOL", native: "VCL_BOOL" },
    TypeInfo { id: TypeId::Bytes, token: "BYTES", native: "VCL_BYTES" },
    TypeInfo { id: TypeId::Duration, token: "DURATION", native: "VCL_DURATION" },
    TypeInfo { id: TypeId::Enum, token: "ENUM", native: "VCL_ENUM" },
    TypeInfo { id: TypeId::Header, token: "HEADER", native: "VCL_HEADER" },
    TypeInfo { id: TypeId::Http, token: "HTTP", native: "VCL_HTTP" },
    TypeInfo { id: TypeId::Int, token: "INT", native: "VCL_INT" },
    TypeInfo { id: TypeId::Ip, token: "IP", native: "VCL_IP" },
    TypeInfo { id: TypeId::PrivCall, token: "PRIV_CALL", native: "struct vmod_priv *" },
    TypeInfo { id: TypeId::PrivTask, token: "PRIV_TASK", native: "struct vmod_priv *" },
    TypeInfo { id: TypeId::PrivTop, token: "PRIV_TOP", native: "struct vmod_priv *" },
    TypeInfo { id: TypeId::PrivVcl, token: "PRIV_VCL", native: "struct vmod_priv *" },
    TypeInfo { id: TypeId::Probe, token: "PROBE", native: "VCL_PROBE" },
    TypeInfo { id: TypeId::Real, token: "REAL", native: "VCL_REAL" },
    TypeInfo { id: TypeId::Stevedore, token: "STEVEDORE", native: "VCL_STEVEDORE" },
    TypeInfo { id: TypeId::Strands, token: "STRANDS", native: "VCL_STRANDS" },
    TypeInfo { id: TypeId::String, token: "STRING", native: "VCL_STRING" },
    TypeInfo { id: TypeId::StringList, token: "STRING_LIST", native: "const char *, ..." },
    TypeInfo { id: TypeId::Time, token: "TIME", native: "VCL_TIME" },
    TypeInfo { id: TypeId::Void, token: "VOID", native: "VCL_VOID" },
];

/// Look up a type token (case-sensitive).
pub fn from_str(token: &str) -> Option<TypeId> {
    TYPES.iter().find(|t| t.token == token).map(|t| t.id)
}

impl TypeId {
    /// Canonical `.vcc` spelling of this type.
    pub fn as_str(self) -> &'static str {
        self.info().token
    }

    /// The C type emitted for this category.
    pub fn native_type(self) -> &'static str {
        self.info().native
    }

    /// Private-context arguments are hidden from documentation signatures.
    pub fn is_private(self) -> bool {
        matches!(
            self,
            TypeId::PrivCall | TypeId::PrivVcl | TypeId::PrivTask | TypeId::PrivTop
        )
    }

    /// The VCL-level spelling used in documentation: `STRING_LIST` is
    /// presented as `STRING`, everything else as itself.
    pub fn vcl_name(self) -> &'static str {
        match self {
            TypeId::StringList => "STRING",
            other => other.as_str(),
        }
    }

    fn info(self) -> &'static TypeInfo {
        // TYPES is total over TypeId; the guardrail test below keeps it so.
        TYPES
            .iter()
            .find(|t| t.id == self)
            .expect("INVARIANT: every TypeId has a TYPES row")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_is_case_sensitive() {
        assert_eq!(from_str("INT"), Some(TypeId::Int));
        assert_eq!(from_str("int"), None);
        assert_eq!(from_str("Int"), None);
    }

    #[test]
    fn unknown_tokens_miss() {
        assert_eq!(from_str(""), None);
        assert_eq!(from_str("FLOAT"), None);
        assert_eq!(from_str("STRING_LIS"), None);
    }

    #[test]
    fn every_id_has_a_row() {
        for row in TYPES {
            assert_eq!(from_str(row.token), Some(row.id));
            assert_eq!(row.id.as_str(), row.token);
        }
    }

    #[test]
    fn native_mapping() {
        assert_eq!(TypeId::Int.native_type(), "VCL_INT");
        assert_eq!(TypeId::StringList.native_type(), "const char *, ...");
        assert_eq!(TypeId::PrivVcl.native_type(), "struct vmod_priv *");
    }

    #[test]
    fn private_classification() {
        assert!(TypeId::PrivCall.is_private());
        assert!(TypeId::PrivTop.is_private());
        assert!(!TypeId::String.is_private());
        assert!(!TypeId::Enum.is_private());
    }

    #[test]
    fn vcl_name_folds_string_list() {
        assert_eq!(TypeId::StringList.vcl_name(), "STRING");
        assert_eq!(TypeId::Duration.vcl_name(), "DURATION");
    }
}
