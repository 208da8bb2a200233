//! `Function.prototype.call`/`apply`/`bind`/`toString`. There is no
//! constructor exposed here — building a function from source text
//! (the `Function` constructor) is out of scope.

use crate::builtins::install_method;
use crate::context::Context;
use crate::error::{JsNativeError, JsResult};
use crate::function::{call_object, new_bound_function};
use crate::object::{JsObject, ObjectKind};
use crate::value::JsValue;

pub fn init(context: &mut Context) {
    let function_prototype = context.intrinsics().function_prototype.clone();
    let closure = context.realm().global_env();

    install_method(&function_prototype, "call", 1, call, &function_prototype, &closure);
    install_method(&function_prototype, "apply", 2, apply, &function_prototype, &closure);
    install_method(&function_prototype, "bind", 1, bind, &function_prototype, &closure);
    install_method(&function_prototype, "toString", 0, to_string, &function_prototype, &closure);
}

fn callable(this: &JsValue) -> JsResult<&JsObject> {
    this.as_object()
        .filter(|o| o.is_callable())
        .ok_or_else(|| JsNativeError::typ().with_message("not a function").into())
}

fn call(this: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
    let f = callable(this)?;
    let bound_this = args.first().cloned().unwrap_or(JsValue::undefined());
    call_object(f, &bound_this, args.get(1..).unwrap_or(&[]), context)
}

fn apply(this: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
    let f = callable(this)?;
    let bound_this = args.first().cloned().unwrap_or(JsValue::undefined());
    let arg_list = match args.get(1) {
        Some(v) if !v.is_nullish() => array_like_to_vec(v, context)?,
        _ => Vec::new(),
    };
    call_object(f, &bound_this, &arg_list, context)
}

fn array_like_to_vec(value: &JsValue, context: &mut Context) -> JsResult<Vec<JsValue>> {
    let obj = value.to_object(context)?;
    let length = obj.get(&"length".into(), value, context)?.to_number(context)? as usize;
    let mut out = Vec::with_capacity(length);
    for i in 0..length {
        out.push(obj.get(&i.to_string().as_str().into(), value, context)?);
    }
    Ok(out)
}

/// `Function.prototype.bind` (§20.2.3.2): wraps `target` in a bound
/// function object carrying `[[BoundTargetFunction]]`/`[[BoundThis]]`/
/// `[[BoundArguments]]` as native Rust state
/// ([`crate::function::new_bound_function`]) rather than script-visible
/// properties — the call site's `this` is whatever the caller passed,
/// not the bound function's own identity, so it has nowhere else to
/// recover its target from.
fn bind(this: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
    let target = callable(this)?.clone();
    let bound_this = args.first().cloned().unwrap_or(JsValue::undefined());
    let leading_args = args.get(1..).unwrap_or(&[]).to_vec();

    let function_prototype = context.intrinsics().function_prototype.clone();
    let closure = context.realm().global_env();
    let bound = new_bound_function(target, bound_this, leading_args, Some(function_prototype), closure);
    Ok(JsValue::Object(bound))
}

fn to_string(this: &JsValue, _args: &[JsValue], _context: &mut Context) -> JsResult<JsValue> {
    let name = this
        .as_object()
        .and_then(|o| o.with_kind(|k| if let ObjectKind::Function(d) = k { Some(d.name.clone()) } else { None }))
        .map(|n| n.to_string())
        .unwrap_or_default();
    Ok(JsValue::from(crate::string::JsString::new(format!("function {name}() {{ [native code] }}"))))
}

#[cfg(test)]
mod tests;
