//! C declaration rendering for prototypes.
//!
//! The same renderer produces both forms of every callable: the public
//! declaration for the header (`<ret> <pfx><name>(...)`) and the typedef for
//! the glue source (`typedef <ret> td_<module>_<name>(...)`). Keeping them in
//! one place is what makes the header, the struct layout and the embedded
//! prototype text agree by construction.

use vmodc_syntax::model::{ModuleModel, ObjectStanza};
use vmodc_syntax::proto::Prototype;

use super::text::lwrap;

/// Render one prototype as a C declaration (`header` form) or a typedef.
///
/// `extra` is the native calling-convention arguments prepended before the
/// user-declared ones (context pointer, instance handles).
pub fn c_fn(model: &ModuleModel, proto: &Prototype, extra: &[&str], header: bool) -> String {
    let mut s = String::new();
    let name = if header {
        proto.qualified(&model.sympfx)
    } else {
        s.push_str("typedef ");
        format!("td_{}_{}", model.name, proto.cname())
    };
    s.push_str(&format!("{} {}({});", proto.c_ret(), name, c_args(proto, extra)));
    lwrap(&s)
}

fn c_args(proto: &Prototype, extra: &[&str]) -> String {
    let mut parts: Vec<String> = extra.iter().map(|s| s.to_string()).collect();
    for arg in &proto.args {
        parts.push(arg.ty.native().to_string());
    }
    parts.join(", ")
}

/// Render an object's full declaration block: the opaque instance struct,
/// constructor, destructor, and every method.
pub fn obj_decls(model: &ModuleModel, obj: &ObjectStanza, header: bool) -> String {
    let sn = model.obj_struct(obj);
    let instance = sn.strip_prefix("struct ").unwrap_or(&sn);

    let mut out = format!("struct {instance};\n");
    let handle = format!("struct {instance} **");
    out.push_str(&c_fn(
        model,
        &obj.init,
        &["VRT_CTX", &handle, "const char *"],
        header,
    ));
    out.push_str(&c_fn(model, &obj.fini, &[&handle], header));
    let instance_arg = format!("struct {instance} *");
    for method in &obj.methods {
        out.push_str(&c_fn(
            model,
            &method.proto,
            &["VRT_CTX", &instance_arg],
            header,
        ));
    }
    out.push('\n');
    out
}
