//! Low-level text helpers shared by the emitters.
//!
//! Wrapping and column alignment here define the byte-exact layout of the
//! generated files; the emitters never do their own arithmetic.

/// Width budget for wrapped C prototype lines.
pub const PROTO_WIDTH: usize = 64;

/// Column the callback-struct pointer names are aligned to (tab stops of 8).
pub const CSTRUCT_ALIGN: usize = 40;

/// Wrap a C-prototype-like string into lines within `width` columns.
///
/// Each break lands just after the last comma inside the budget, falling
/// back to the opening parenthesis; continuation lines are indented four
/// columns. A segment with no break point inside the budget is left long
/// rather than split mid-token.
pub fn lwrap_lines(s: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut s = s.to_string();
    let mut prefix = "";
    while s.len() > width {
        let head = &s[..width];
        let y = match head.rfind(',').or_else(|| head.rfind('(')) {
            Some(y) => y,
            None => break,
        };
        lines.push(format!("{prefix}{}", &s[..y + 1]));
        s = s[y + 1..].trim_start().to_string();
        prefix = "    ";
    }
    if !s.is_empty() {
        lines.push(format!("{prefix}{s}"));
    }
    lines
}

/// [`lwrap_lines`] at the prototype width, joined with a trailing newline.
pub fn lwrap(s: &str) -> String {
    let mut out = lwrap_lines(s, PROTO_WIDTH).join("\n");
    out.push('\n');
    out
}

/// Length of `s` with tabs expanded at 8-column stops.
fn expanded_len(s: &str) -> usize {
    let mut n = 0;
    for c in s.chars() {
        if c == '\t' {
            n = (n / 8 + 1) * 8;
        } else {
            n += 1;
        }
    }
    n
}

/// Pad `s` with tabs until it reaches `column` when tab-expanded.
pub fn tab_pad(mut s: String, column: usize) -> String {
    while expanded_len(&s) < column {
        s.push('\t');
    }
    s
}

/// The machine-generated warning banner, in C comment form.
pub fn c_file_warning() -> String {
    file_warning("/*", " *", " */")
}

/// The machine-generated warning banner, in RST comment form.
pub fn rst_file_warning() -> String {
    file_warning("..", "..", "..")
}

fn file_warning(open: &str, mid: &str, close: &str) -> String {
    format!(
        "{open}\n{mid} NB:  This file is machine generated, DO NOT EDIT!\n{mid}\n{mid} Edit vmod.vcc and run make instead\n{close}\n\n"
    )
}

/// An RST section heading: optional overline, the text, optional underline.
pub fn rst_hdr(s: &str, below: Option<char>, above: Option<char>) -> String {
    let mut out = String::new();
    if let Some(c) = above {
        out.push_str(&c.to_string().repeat(s.chars().count()));
        out.push('\n');
    }
    out.push_str(s);
    out.push('\n');
    if let Some(c) = below {
        out.push_str(&c.to_string().repeat(s.chars().count()));
        out.push('\n');
    }
    out
}
