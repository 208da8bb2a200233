//! `Boolean`, whose entire contribution is wrapper-object identity and
//! the two prototype methods that unwrap it again.

use crate::builtins::install_method;
use crate::context::Context;
use crate::error::JsResult;
use crate::object::JsObject;
use crate::value::JsValue;

pub fn init(context: &mut Context) {
    let function_prototype = context.intrinsics().function_prototype.clone();
    let boolean_prototype = context.intrinsics().boolean_prototype.clone();
    let closure = context.realm().global_env();

    install_method(&boolean_prototype, "toString", 0, to_string, &function_prototype, &closure);
    install_method(&boolean_prototype, "valueOf", 0, value_of, &function_prototype, &closure);

    crate::builtins::install_constructor(context, "Boolean", 1, call, construct, &boolean_prototype);
}

fn call(_this: &JsValue, args: &[JsValue], _context: &mut Context) -> JsResult<JsValue> {
    Ok(JsValue::from(args.first().is_some_and(JsValue::to_boolean)))
}

fn construct(_new_target: &JsObject, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
    let b = args.first().is_some_and(JsValue::to_boolean);
    Ok(JsValue::Object(context.new_boolean_object(b)))
}

fn unwrap(this: &JsValue) -> JsResult<bool> {
    match this {
        JsValue::Boolean(b) => Ok(*b),
        JsValue::Object(o) => o.with_kind(|k| match k {
            crate::object::ObjectKind::Boolean(b) => Ok(*b),
            _ => Err(crate::error::JsNativeError::typ().with_message("not a Boolean").into()),
        }),
        _ => Err(crate::error::JsNativeError::typ().with_message("not a Boolean").into()),
    }
}

fn to_string(this: &JsValue, _args: &[JsValue], _context: &mut Context) -> JsResult<JsValue> {
    Ok(JsValue::from(if unwrap(this)? { "true" } else { "false" }))
}

fn value_of(this: &JsValue, _args: &[JsValue], _context: &mut Context) -> JsResult<JsValue> {
    Ok(JsValue::from(unwrap(this)?))
}

#[cfg(test)]
mod tests;
