//! Header artifact: public declarations for the module implementation.

use vmodc_syntax::model::{ModuleModel, Stanza};

use super::cdecl::{c_fn, obj_decls};
use super::text::c_file_warning;

/// Render the `<prefix>.h` contents.
///
/// The guards insist the two base headers were included first; the file
/// itself only declares, never defines.
pub fn emit(model: &ModuleModel) -> String {
    let mut out = c_file_warning();
    out.push_str("#ifndef VDEF_H_INCLUDED\n");
    out.push_str("#  error \"Include vdef.h first\"\n");
    out.push_str("#endif\n");
    out.push_str("#ifndef VRT_H_INCLUDED\n");
    out.push_str("#  error \"Include vrt.h first\"\n");
    out.push_str("#endif\n\n");

    for literal in model.registry.iter() {
        out.push_str(&format!(
            "extern VCL_ENUM {}enum_{literal};\n",
            model.sympfx
        ));
    }
    out.push('\n');

    for stanza in &model.contents {
        match stanza {
            Stanza::Module(_) | Stanza::Prefix(_) | Stanza::Abi(_) => {}
            Stanza::Event(e) => {
                out.push_str(&format!("vmod_event_f {};\n", e.name));
            }
            Stanza::Function(f) => {
                out.push_str(&c_fn(model, &f.proto, &["VRT_CTX"], true));
            }
            Stanza::Object(o) => {
                out.push_str(&obj_decls(model, o, true));
            }
        }
    }
    out
}
