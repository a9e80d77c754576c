//! JSON self-description of the module.
//!
//! The encoding is nested arrays, consumed positionally by the runtime
//! loader: a `["$VMOD", <schema-version>]` header, then one entry per
//! event/function/object stanza in model order. Type tuples are
//! `[category, name?, default?, enum-literals?]` with trailing absent fields
//! omitted (not null-padded); an absent field before a present one stays as
//! an explicit null so positions are preserved.

use serde_json::{Value, json};

use vmodc_syntax::Argument;
use vmodc_syntax::model::{ModuleModel, SCHEMA_VERSION, Stanza};
use vmodc_syntax::proto::Prototype;

/// Build the full description for `model`.
pub fn description(model: &ModuleModel) -> Value {
    let mut top = vec![json!(["$VMOD", SCHEMA_VERSION])];
    for stanza in &model.contents {
        match stanza {
            Stanza::Module(_) | Stanza::Prefix(_) | Stanza::Abi(_) => {}
            Stanza::Event(_) => {
                top.push(json!(["$EVENT", format!("{}._event", model.func_struct())]));
            }
            Stanza::Function(f) => {
                top.push(json!([
                    "$FUNC",
                    f.proto.bname,
                    signature(&f.proto, &cfunc(model, &f.proto)),
                ]));
            }
            Stanza::Object(o) => {
                let mut entry = vec![
                    json!("$OBJ"),
                    json!(o.proto.bname),
                    json!(model.obj_struct(o)),
                ];
                entry.push(json!(["$INIT", signature(&o.init, &cfunc(model, &o.init))]));
                entry.push(json!(["$FINI", signature(&o.fini, &cfunc(model, &o.fini))]));
                for method in &o.methods {
                    entry.push(json!([
                        "$METHOD",
                        method.proto.method_leaf(),
                        signature(&method.proto, &cfunc(model, &method.proto)),
                    ]));
                }
                top.push(Value::Array(entry));
            }
        }
    }
    Value::Array(top)
}

/// The struct-member reference a JSON entry points at.
fn cfunc(model: &ModuleModel, proto: &Prototype) -> String {
    format!("{}.{}", model.func_struct(), proto.cname())
}

/// `[<ret-tuple>, <cfunc>, <arg-tuple>...]`
fn signature(proto: &Prototype, cfunc: &str) -> Value {
    let mut sig = vec![ret_tuple(proto)];
    sig.push(json!(cfunc));
    for arg in &proto.args {
        sig.push(arg_tuple(arg));
    }
    Value::Array(sig)
}

fn ret_tuple(proto: &Prototype) -> Value {
    match &proto.retval {
        Some(rv) => {
            let spec = rv
                .enum_spec
                .as_ref()
                .map(|s| json!(s))
                .unwrap_or(Value::Null);
            trim_trailing(vec![json!(rv.id.as_str()), Value::Null, Value::Null, spec])
        }
        // The synthetic destructor is pure void.
        None => json!(["VOID"]),
    }
}

fn arg_tuple(arg: &Argument) -> Value {
    let name = arg.name.as_ref().map(|n| json!(n)).unwrap_or(Value::Null);
    let default = arg
        .default
        .as_ref()
        .map(|d| json!(d))
        .unwrap_or(Value::Null);
    let spec = arg
        .ty
        .enum_spec
        .as_ref()
        .map(|s| json!(s))
        .unwrap_or(Value::Null);
    trim_trailing(vec![json!(arg.ty.id.as_str()), name, default, spec])
}

fn trim_trailing(mut tuple: Vec<Value>) -> Value {
    while tuple.last().is_some_and(Value::is_null) {
        tuple.pop();
    }
    Value::Array(tuple)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn describe(src: &str) -> Value {
        description(&vmodc_syntax::parse(src, true).unwrap())
    }

    #[test]
    fn header_entry_carries_schema_version() {
        let d = describe("$Module demo 3 d\n");
        assert_eq!(d[0], json!(["$VMOD", "1.0"]));
        assert_eq!(d.as_array().unwrap().len(), 1);
    }

    #[test]
    fn function_entry_shape() {
        let d = describe("$Module demo 3 d\n\n$Function INT add(INT a, INT b=1)\n");
        assert_eq!(
            d[1],
            json!([
                "$FUNC",
                "add",
                [["INT"], "Vmod_demo_Func.add", ["INT", "a"], ["INT", "b", "1"]]
            ])
        );
    }

    #[test]
    fn event_entry_shape() {
        let d = describe("$Module demo 3 d\n\n$Event ev\n");
        assert_eq!(d[1], json!(["$EVENT", "Vmod_demo_Func._event"]));
    }

    #[test]
    fn object_entry_shape() {
        let d = describe(
            "$Module demo 3 d\n\n$Object counter(INT start=0)\n\n$Method INT counter.get()\n",
        );
        assert_eq!(
            d[1],
            json!([
                "$OBJ",
                "counter",
                "struct vmod_demo_counter",
                [
                    "$INIT",
                    [
                        ["VOID"],
                        "Vmod_demo_Func.counter__init",
                        ["INT", "start", "0"]
                    ]
                ],
                ["$FINI", [["VOID"], "Vmod_demo_Func.counter__fini"]],
                ["$METHOD", "get", [["INT"], "Vmod_demo_Func.counter_get"]]
            ])
        );
    }

    #[test]
    fn enum_tuple_keeps_positional_null() {
        let d = describe("$Module demo 3 d\n\n$Function VOID f(ENUM {a, b} e)\n");
        assert_eq!(
            d[1][2][2],
            json!(["ENUM", "e", Value::Null, ["a", "b"]])
        );
    }

    #[test]
    fn enum_default_fills_the_gap() {
        let d = describe("$Module demo 3 d\n\n$Function VOID f(ENUM {a, b} e=b)\n");
        assert_eq!(d[1][2][2], json!(["ENUM", "e", "b", ["a", "b"]]));
    }

    #[test]
    fn unnamed_argument_is_a_bare_tuple() {
        let d = describe("$Module demo 3 d\n\n$Function VOID f(PRIV_TASK)\n");
        assert_eq!(d[1][2][2], json!(["PRIV_TASK"]));
    }
}
