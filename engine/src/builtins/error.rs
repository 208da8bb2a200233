//! `Error` and its six native subtypes. Each shares the same call/
//! construct behavior — wrap the first argument as a `message` — and
//! differs only in which prototype (and so which `native_error_prototypes`
//! slot built by [`crate::context::ContextBuilder::build`]) it targets.

use crate::builtins::install_method;
use crate::context::Context;
use crate::error::JsResult;
use crate::object::{JsObject, ObjectKind};
use crate::realm::NativeErrorKindKey;
use crate::value::JsValue;

pub fn init(context: &mut Context) {
    let function_prototype = context.intrinsics().function_prototype.clone();
    let error_prototype = context.intrinsics().error_prototype.clone();
    let closure = context.realm().global_env();

    install_method(&error_prototype, "toString", 0, to_string, &function_prototype, &closure);
    error_prototype.create_hidden_property("name", JsValue::from("Error"));
    error_prototype.create_hidden_property("message", JsValue::from(""));

    crate::builtins::install_constructor(context, "Error", 1, call_error, construct_error, &error_prototype);

    for (name, key) in [
        ("TypeError", NativeErrorKindKey::Type),
        ("RangeError", NativeErrorKindKey::Range),
        ("ReferenceError", NativeErrorKindKey::Reference),
        ("SyntaxError", NativeErrorKindKey::Syntax),
        ("EvalError", NativeErrorKindKey::Eval),
        ("URIError", NativeErrorKindKey::Uri),
    ] {
        install_subtype(context, name, key, &error_prototype);
    }
}

fn install_subtype(context: &mut Context, name: &'static str, key: NativeErrorKindKey, error_prototype: &JsObject) {
    let Some(proto) = context.intrinsics().native_error_prototypes.get(&key).cloned() else {
        return;
    };
    let function_prototype = context.intrinsics().function_prototype.clone();
    let closure = context.realm().global_env();
    install_method(&proto, "toString", 0, to_string, &function_prototype, &closure);
    proto.create_hidden_property("name", JsValue::from(name));
    proto.create_hidden_property("message", JsValue::from(""));
    proto.set_prototype(Some(error_prototype.clone()));
    crate::builtins::install_constructor(context, name, 1, call_error, construct_error, &proto);
}

fn build(proto: JsObject, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
    let obj = JsObject::new(Some(proto), ObjectKind::Error);
    if let Some(v) = args.first() {
        if !matches!(v, JsValue::Undefined) {
            let message = v.to_js_string(context)?;
            obj.create_hidden_property("message", JsValue::from(message));
        }
    }
    Ok(JsValue::Object(obj))
}

fn call_error(_this: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
    let proto = context.intrinsics().error_prototype.clone();
    build(proto, args, context)
}

fn construct_error(new_target: &JsObject, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
    let proto = new_target
        .get(&"prototype".into(), &JsValue::Object(new_target.clone()), context)?
        .as_object()
        .cloned()
        .unwrap_or_else(|| context.intrinsics().error_prototype.clone());
    build(proto, args, context)
}

fn to_string(this: &JsValue, _args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
    let obj = this.to_object(context)?;
    let name = obj.get(&"name".into(), this, context)?.to_js_string(context)?.to_string();
    let message = obj.get(&"message".into(), this, context)?.to_js_string(context)?.to_string();
    let text = if message.is_empty() { name } else { format!("{name}: {message}") };
    Ok(JsValue::from(crate::string::JsString::new(text)))
}

#[cfg(test)]
mod tests;
