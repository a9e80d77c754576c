//! Reference documentation artifact (RST), full and man-page variants.
//!
//! Both variants walk the model in order; the man variant only drops the
//! CONTENTS index. Events produce no documentation at all.

use vmodc_syntax::model::{
    FunctionStanza, MethodStanza, ModuleModel, ModuleStanza, ObjectStanza, Stanza,
};
use vmodc_syntax::proto::Prototype;

use super::text::{rst_file_warning, rst_hdr};

/// Render the documentation for `model`; `man` selects the condensed
/// man-page variant.
pub fn emit(model: &ModuleModel, man: bool) -> String {
    let mut out = rst_file_warning();
    out.push_str(".. role:: ref(emphasis)\n\n");

    for stanza in &model.contents {
        match stanza {
            Stanza::Module(s) => module_stanza(&mut out, model, s, man),
            Stanza::Prefix(p) => plain_doc(&mut out, &p.doc),
            Stanza::Abi(a) => plain_doc(&mut out, &a.doc),
            Stanza::Event(_) => {}
            Stanza::Function(f) => function_stanza(&mut out, f),
            Stanza::Object(o) => object_stanza(&mut out, o),
        }
    }

    if !model.copyright.is_empty() {
        copyright(&mut out, &model.copyright);
    }
    out
}

fn label(out: &mut String, lbl: &str) {
    out.push_str(&format!(".. _{lbl}:\n\n"));
}

fn module_stanza(out: &mut String, model: &ModuleModel, s: &ModuleStanza, man: bool) {
    label(out, &format!("vmod_{}({})", s.name, s.mansection));

    out.push_str(&rst_hdr(
        &format!("{}{}", model.sympfx, s.name),
        Some('='),
        Some('='),
    ));
    out.push('\n');
    out.push_str(&rst_hdr(&s.description, Some('-'), Some('-')));
    out.push('\n');
    out.push_str(&format!(":Manual section: {}\n", s.mansection));
    out.push('\n');
    out.push_str(&rst_hdr("SYNOPSIS", Some('='), None));
    out.push('\n');
    out.push_str("\n::\n\n");
    out.push_str(&format!("   import {} [from \"path\"] ;\n", s.name));
    out.push_str("   \n");
    for stanza in &model.contents {
        match stanza {
            Stanza::Function(f) => synopsis(out, &f.proto),
            Stanza::Object(o) => {
                synopsis(out, &o.proto);
                for method in &o.methods {
                    synopsis(out, &method.proto);
                }
            }
            _ => {}
        }
    }
    out.push('\n');

    // Wrapper spacing, then the module's own doc block.
    out.push('\n');
    out.push_str(&s.doc.join("\n"));
    out.push('\n');
    out.push('\n');
    if !man {
        contents_index(out, model);
    }
    out.push('\n');
}

fn synopsis(out: &mut String, proto: &Prototype) {
    out.push_str(&proto.vcl_signature(true, "   "));
    out.push('\n');
    out.push_str("  \n");
}

/// Sorted CONTENTS index of `:ref:` links (full variant only).
fn contents_index(out: &mut String, model: &ModuleModel) {
    out.push_str(&rst_hdr("CONTENTS", Some('='), None));
    out.push('\n');

    let mut entries: Vec<(String, String)> = Vec::new();
    for stanza in model.contents.iter().skip(1) {
        match stanza {
            Stanza::Function(f) => {
                let lbl = format!("func_{}", f.proto.bname);
                entries.push((strip_kind(&lbl), lbl));
            }
            Stanza::Object(o) => {
                let lbl = format!("obj_{}", o.proto.bname);
                entries.push((strip_kind(&lbl), lbl));
                for method in &o.methods {
                    let lbl = format!("func_{}", method.proto.bname);
                    entries.push((strip_kind(&lbl), lbl));
                }
            }
            _ => {}
        }
    }
    entries.sort();
    for (_, lbl) in &entries {
        out.push_str(&format!("* :ref:`{lbl}`\n"));
    }
    out.push('\n');
}

fn strip_kind(lbl: &str) -> String {
    lbl.split_once('_').map(|(_, rest)| rest).unwrap_or(lbl).to_string()
}

fn function_stanza(out: &mut String, f: &FunctionStanza) {
    label(out, &format!("func_{}", f.proto.bname));
    proto_heading(out, &f.proto);
    out.push('\n');
    out.push_str(&f.doc.join("\n"));
    out.push('\n');
    out.push('\n');
    out.push('\n');
}

fn object_stanza(out: &mut String, o: &ObjectStanza) {
    label(out, &format!("obj_{}", o.proto.bname));
    proto_heading(out, &o.proto);

    out.push('\n');
    out.push_str(&o.doc.join("\n"));
    out.push_str("\n\n");
    for method in &o.methods {
        method_stanza(out, method);
    }
    out.push_str("\n\n\n");
}

fn method_stanza(out: &mut String, m: &MethodStanza) {
    label(out, &format!("func_{}", m.proto.bname));
    proto_heading(out, &m.proto);
    out.push('\n');
    out.push_str(&m.doc.join("\n"));
    out.push('\n');
    out.push('\n');
    out.push('\n');
}

/// A prototype heading: the long signature when it fits, otherwise the
/// short form (or `name(...)`) with the long form in a literal block.
fn proto_heading(out: &mut String, proto: &Prototype) {
    let long = proto.vcl_signature(false, "");
    if long.len() < 60 {
        out.push_str(&rst_hdr(&long, Some('-'), None));
        return;
    }
    let mut short = proto.vcl_signature(true, "");
    if short.len() > 60 {
        short = format!("{}(...)", proto.bname);
    }
    out.push_str(&rst_hdr(&short, Some('-'), None));
    out.push_str("\n::\n\n");
    out.push_str(&proto.vcl_signature(false, "   "));
    out.push('\n');
}

fn plain_doc(out: &mut String, doc: &[String]) {
    out.push('\n');
    out.push_str(&doc.join("\n"));
    out.push_str("\n\n\n");
}

fn copyright(out: &mut String, text: &str) {
    out.push_str(&rst_hdr("COPYRIGHT", Some('='), None));
    out.push_str("\n::\n\n");
    let mut body = text.replace("\n#", "\n ");
    if let Some(rest) = body.strip_prefix("#\n") {
        body = rest.to_string();
    }
    if let Some(rest) = body.strip_prefix("#-\n") {
        body = rest.to_string();
    }
    out.push_str(&body);
    out.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;

    const SRC: &str = "\
# Copyright (c) demo authors

$Module demo 3 \"Demo module\"

Top level documentation.

$Function INT add(INT a, INT b=1)

Add two numbers.

$Object counter(INT start=0)

A counter.

$Method INT counter.get()

Read the counter.
";

    fn render(man: bool) -> String {
        emit(&vmodc_syntax::parse(SRC, true).unwrap(), man)
    }

    #[test]
    fn title_synopsis_and_section() {
        let r = render(false);
        assert!(r.starts_with("..\n.. NB:  This file is machine generated, DO NOT EDIT!\n"));
        assert!(r.contains(".. role:: ref(emphasis)\n"));
        assert!(r.contains("=========\nvmod_demo\n=========\n"));
        assert!(r.contains(":Manual section: 3\n"));
        assert!(r.contains("SYNOPSIS\n========\n"));
        assert!(r.contains("   import demo [from \"path\"] ;\n"));
    }

    #[test]
    fn synopsis_lists_short_signatures() {
        let r = render(false);
        assert!(r.contains("   INT add(INT, INT)\n"));
        assert!(r.contains("   new xcounter = counter(INT)\n"));
        // Method synopsis doubles the prefix.
        assert!(r.contains("      xcounter.get()\n"));
    }

    #[test]
    fn headings_use_long_signatures() {
        let r = render(false);
        assert!(r.contains(".. _func_add:\n\nINT add(INT a, INT b=1)\n-----------------------\n"));
        assert!(r.contains(".. _obj_counter:\n\nnew xcounter = counter(INT start=0)\n"));
        assert!(r.contains(".. _func_counter.get:\n\nxcounter.get()\n"));
    }

    #[test]
    fn doc_blocks_are_reproduced() {
        let r = render(false);
        assert!(r.contains("Top level documentation.\n"));
        assert!(r.contains("Add two numbers.\n"));
        assert!(r.contains("A counter.\n"));
        assert!(r.contains("Read the counter.\n"));
    }

    #[test]
    fn contents_index_sorted_and_full_only() {
        let full = render(false);
        assert!(full.contains("CONTENTS\n========\n"));
        let add = full.find("* :ref:`func_add`\n").unwrap();
        let counter = full.find("* :ref:`obj_counter`\n").unwrap();
        let get = full.find("* :ref:`func_counter.get`\n").unwrap();
        assert!(add < counter && counter < get);

        let man = render(true);
        assert!(!man.contains("CONTENTS"));
        // Everything else is shared with the full variant.
        assert!(man.contains("INT add(INT a, INT b=1)\n"));
    }

    #[test]
    fn copyright_reproduced_in_literal_block() {
        let r = render(false);
        assert!(r.contains("COPYRIGHT\n=========\n"));
        assert!(r.contains("::\n\n# Copyright (c) demo authors\n"));
    }

    #[test]
    fn long_heading_falls_back_to_short_form() {
        let src = "\
$Module demo 3 d

$Function STRING join(STRING first_part, STRING second_part, STRING third_part)
";
        let r = emit(&vmodc_syntax::parse(src, true).unwrap(), false);
        assert!(r.contains("STRING join(STRING, STRING, STRING)\n"));
        assert!(r.contains("\n::\n\n"));
        // The long form wraps one argument per line in the literal block.
        assert!(r.contains("   STRING join(\n"));
        assert!(r.contains("      STRING first_part,\n"));
        assert!(r.contains("      STRING third_part\n   )\n"));
    }

    #[test]
    fn events_emit_no_documentation() {
        let src = "$Module demo 3 d\n\n$Event ev\n";
        let r = emit(&vmodc_syntax::parse(src, true).unwrap(), false);
        assert!(!r.contains("ev"));
    }
}
