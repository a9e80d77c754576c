//! Identifier grammar for emitted symbols.
//!
//! Module, function, object, method and argument names all end up as parts
//! of C identifiers, so the accepted grammar is exactly `[A-Za-z0-9_]+`.

/// Check a name against the identifier grammar `[A-Za-z0-9_]+`.
///
/// The empty string is rejected.
pub fn is_legal_ident(name: &str) -> bool {
    !name.is_empty() && name.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'_')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_ascii_words() {
        assert!(is_legal_ident("add"));
        assert!(is_legal_ident("counter__init"));
        assert!(is_legal_ident("X9_"));
        assert!(is_legal_ident("_"));
    }

    #[test]
    fn rejects_everything_else() {
        assert!(!is_legal_ident(""));
        assert!(!is_legal_ident("a.b"));
        assert!(!is_legal_ident("a-b"));
        assert!(!is_legal_ident("a b"));
        assert!(!is_legal_ident("café"));
        assert!(!is_legal_ident("a("));
    }
}
