//! Glue source artifact: typedefs, callback struct, initializer, the
//! embedded prototype text, the serialized JSON description and the
//! versioned self-description record.
//!
//! The typedef/struct text is rendered once into an in-memory buffer and
//! used twice: written into the source and embedded verbatim as the
//! `Vmod_Proto` string literal. The struct field sequence, the initializer
//! entry sequence and the JSON function list all walk the model in the same
//! order; a mismatch between them is an ABI break.

use vmodc_syntax::model::{ModuleModel, Stanza};

use super::cdecl::{c_fn, obj_decls};
use super::json;
use super::text::{CSTRUCT_ALIGN, c_file_warning, tab_pad};

/// Render the `<prefix>.c` contents. `prefix` names the companion header;
/// `file_id` is the per-build identifier embedded in the data record.
pub fn emit(model: &ModuleModel, prefix: &str, file_id: &str) -> String {
    let mut out = c_file_warning();
    out.push_str("#include \"config.h\"\n");
    out.push_str("#include <stdio.h>\n");
    for include in ["vdef", "vrt", prefix, "vmod_abi"] {
        out.push_str(&format!("#include \"{include}.h\"\n"));
    }
    out.push('\n');

    for literal in model.registry.iter() {
        out.push_str(&format!(
            "VCL_ENUM {}enum_{literal} = \"{literal}\";\n",
            model.sympfx
        ));
    }
    out.push('\n');

    // Declaration text, built once, used for the source and for Vmod_Proto.
    let mut proto_buf = String::new();
    for stanza in &model.contents {
        if let Stanza::Object(o) = stanza {
            let decls = obj_decls(model, o, false);
            out.push_str(&decls);
            proto_buf.push_str(&decls);
        }
    }
    proto_buf.push_str("/* Functions */\n");
    for stanza in &model.contents {
        if let Stanza::Function(f) = stanza {
            let decl = c_fn(model, &f.proto, &["VRT_CTX"], false);
            out.push_str(&decl);
            proto_buf.push_str(&decl);
        }
    }

    let csn = model.func_struct();
    let layout = cstruct(model, &format!("struct {csn}"));
    out.push_str(&layout);
    proto_buf.push_str(&layout);

    out.push_str(&format!("\n/*lint -esym(754, {csn}::*) */\n"));
    out.push_str(&cstruct_init(model, &format!("struct {csn}")));

    out.push_str("\nstatic const char Vmod_Proto[] =\n");
    for line in proto_buf.lines() {
        out.push_str(&format!("\t\"{}\\n\"\n", line.trim_end()));
    }
    out.push_str(&format!("\t\"static struct {csn} {csn};\";\n"));

    out.push_str(&json_blob(model));
    out.push_str(&api(model, file_id));
    out
}

/// The callback struct definition: one function-pointer field per callable
/// in model order, then one pointer per sorted enum literal.
fn cstruct(model: &ModuleModel, csn: &str) -> String {
    let mut out = format!("\n{csn} {{\n");
    for stanza in &model.contents {
        match stanza {
            Stanza::Module(_) | Stanza::Prefix(_) | Stanza::Abi(_) => {}
            Stanza::Event(_) => out.push_str("\tvmod_event_f\t\t\t*_event;\n"),
            Stanza::Function(f) => out.push_str(&field(model, &f.proto.cname())),
            Stanza::Object(o) => {
                out.push_str(&field(model, &o.init.cname()));
                out.push_str(&field(model, &o.fini.cname()));
                for method in &o.methods {
                    out.push_str(&field(model, &method.proto.cname()));
                }
            }
        }
    }
    out.push('\n');
    for literal in model.registry.iter() {
        out.push_str(&format!("\tVCL_ENUM\t\t\t*enum_{literal};\n"));
    }
    out.push_str("};\n");
    out
}

fn field(model: &ModuleModel, cname: &str) -> String {
    let lhs = tab_pad(format!("\ttd_{}_{cname}", model.name), CSTRUCT_ALIGN);
    format!("{lhs}*{cname};\n")
}

/// The static initializer, entry-for-entry parallel to [`cstruct`].
fn cstruct_init(model: &ModuleModel, csn: &str) -> String {
    let mut out = format!("\nstatic const {csn} Vmod_Func = {{\n");
    for stanza in &model.contents {
        match stanza {
            Stanza::Module(_) | Stanza::Prefix(_) | Stanza::Abi(_) => {}
            Stanza::Event(e) => out.push_str(&format!("\t{},\n", e.name)),
            Stanza::Function(f) => {
                out.push_str(&format!("\t{},\n", f.proto.qualified(&model.sympfx)));
            }
            Stanza::Object(o) => {
                out.push_str(&format!("\t{},\n", o.init.qualified(&model.sympfx)));
                out.push_str(&format!("\t{},\n", o.fini.qualified(&model.sympfx)));
                for method in &o.methods {
                    out.push_str(&format!("\t{},\n", method.proto.qualified(&model.sympfx)));
                }
                out.push('\n');
            }
        }
    }
    out.push('\n');
    for literal in model.registry.iter() {
        out.push_str(&format!("\t&{}enum_{literal},\n", model.sympfx));
    }
    out.push_str("};\n");
    out
}

/// The JSON description as a NUL-terminated byte array plus a pretty-printed
/// comment copy (lines truncated at 72 columns).
fn json_blob(model: &ModuleModel) -> String {
    let description = json::description(model);
    let compact = description.to_string();
    let mut bytes = compact.into_bytes();
    bytes.push(0);

    let mut out = format!("\nstatic const char Vmod_Json[{}] = {{\n", bytes.len());
    let mut line = String::from("\t");
    for b in &bytes {
        line.push_str(&format!("{b},"));
        if line.len() >= 69 {
            out.push_str(&line);
            out.push('\n');
            line = String::from("\t");
        }
    }
    if line.len() > 1 {
        out.push_str(&line[..line.len() - 1]);
    }
    out.push_str("\n};\n\n");

    let pretty = serde_json::to_string_pretty(&description)
        .unwrap_or_else(|_| String::new());
    for line in pretty.split('\n') {
        let commented = format!("// {line}");
        if commented.len() > 72 {
            out.push_str(&commented[..72]);
            out.push_str("[...]\n");
        } else {
            out.push_str(&commented);
            out.push('\n');
        }
    }
    out.push('\n');
    out
}

/// The versioned self-description record consumed by the runtime loader.
fn api(model: &ModuleModel, file_id: &str) -> String {
    let mut out = String::new();
    for code in [714, 759, 765] {
        out.push_str(&format!(
            "\n/*lint -esym({code}, Vmod_{}_Data) */\n",
            model.name
        ));
    }
    out.push_str(&format!(
        "\nextern const struct vmod_data Vmod_{}_Data;\n",
        model.name
    ));
    out.push_str(&format!(
        "\nconst struct vmod_data Vmod_{}_Data = {{\n",
        model.name
    ));
    if model.strict_abi {
        out.push_str("\t.vrt_major =\t0,\n");
        out.push_str("\t.vrt_minor =\t0,\n");
    } else {
        out.push_str("\t.vrt_major =\tVRT_MAJOR_VERSION,\n");
        out.push_str("\t.vrt_minor =\tVRT_MINOR_VERSION,\n");
    }
    out.push_str(&format!("\t.name =\t\t\"{}\",\n", model.name));
    out.push_str("\t.func =\t\t&Vmod_Func,\n");
    out.push_str("\t.func_len =\tsizeof(Vmod_Func),\n");
    out.push_str("\t.proto =\tVmod_Proto,\n");
    out.push_str("\t.json =\t\tVmod_Json,\n");
    out.push_str("\t.abi =\t\tVMOD_ABI_Version,\n");
    out.push_str(&format!("\t.file_id =\t\"{file_id}\",\n"));
    out.push_str("};\n");
    out
}
