//! The remaining global bindings that don't belong to any one
//! constructor: `globalThis`, `NaN`, `Infinity`, `undefined`, and the
//! `parseInt`/`parseFloat`/`isNaN`/`isFinite` quartet ECMA-262 hangs
//! off the global object in addition to `Number`.

use crate::builtins::install_method;
use crate::context::Context;
use crate::value::JsValue;

pub fn init(context: &mut Context) {
    let global = context.realm().global_object();
    global.create_hidden_property("globalThis", JsValue::Object(global.clone()));
    global.create_hidden_property("NaN", JsValue::from(f64::NAN));
    global.create_hidden_property("Infinity", JsValue::from(f64::INFINITY));
    global.create_hidden_property("undefined", JsValue::undefined());

    let function_prototype = context.intrinsics().function_prototype.clone();
    let closure = context.realm().global_env();
    install_method(&global, "parseInt", 2, super::number::parse_int, &function_prototype, &closure);
    install_method(&global, "parseFloat", 1, super::number::parse_float, &function_prototype, &closure);
    install_method(&global, "isNaN", 1, is_nan, &function_prototype, &closure);
    install_method(&global, "isFinite", 1, is_finite, &function_prototype, &closure);
}

fn is_nan(_this: &JsValue, args: &[JsValue], context: &mut Context) -> crate::error::JsResult<JsValue> {
    let n = args.first().cloned().unwrap_or(JsValue::undefined()).to_number(context)?;
    Ok(JsValue::from(n.is_nan()))
}

fn is_finite(_this: &JsValue, args: &[JsValue], context: &mut Context) -> crate::error::JsResult<JsValue> {
    let n = args.first().cloned().unwrap_or(JsValue::undefined()).to_number(context)?;
    Ok(JsValue::from(n.is_finite()))
}

#[cfg(test)]
mod tests;
