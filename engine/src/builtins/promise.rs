//! `Promise`: the executor-based constructor, `then`/`catch`/`finally`,
//! and the `resolve`/`reject` statics (§27.2). `Promise.all`/`race`/
//! `allSettled`/`any` are outline-scope only and not implemented here —
//! see `DESIGN.md`.

use crate::builtins::install_method;
use crate::context::Context;
use crate::error::{JsNativeError, JsResult};
use crate::function::{call_from_value, new_promise_finally_function};
use crate::object::{JsObject, ObjectKind};
use crate::promise;
use crate::value::JsValue;

pub fn init(context: &mut Context) {
    let function_prototype = context.intrinsics().function_prototype.clone();
    let promise_prototype = context.intrinsics().promise_prototype.clone();
    let closure = context.realm().global_env();

    install_method(&promise_prototype, "then", 2, then, &function_prototype, &closure);
    install_method(&promise_prototype, "catch", 1, catch, &function_prototype, &closure);
    install_method(&promise_prototype, "finally", 1, finally, &function_prototype, &closure);

    let ctor = crate::builtins::install_constructor(context, "Promise", 1, call_promise, construct_promise, &promise_prototype);
    install_method(&ctor, "resolve", 1, resolve_static, &function_prototype, &closure);
    install_method(&ctor, "reject", 1, reject_static, &function_prototype, &closure);
}

fn call_promise(_this: &JsValue, _args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
    Err(JsNativeError::typ().with_message("Promise constructor cannot be invoked without 'new'").into())
}

/// `new Promise(executor)` (§27.2.3.1): builds a fresh capability, runs
/// `executor` with its resolve/reject pair, and rejects the promise if
/// the executor itself throws.
fn construct_promise(new_target: &JsObject, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
    let executor = args.first().cloned().unwrap_or(JsValue::undefined());
    if !executor.as_object().is_some_and(JsObject::is_callable) {
        return Err(JsNativeError::typ().with_message("Promise resolver is not a function").into());
    }
    let (obj, resolve, reject) = promise::new_promise_capability(context);
    let proto = new_target
        .get(&"prototype".into(), &JsValue::Object(new_target.clone()), context)?
        .as_object()
        .cloned()
        .unwrap_or_else(|| context.intrinsics().promise_prototype.clone());
    obj.set_prototype(Some(proto));
    if let Err(e) = call_from_value(&executor, &JsValue::undefined(), &[resolve, reject.clone()], context) {
        let reason = e.into_value(context);
        promise::reject_promise(&obj, reason, context);
    }
    Ok(JsValue::Object(obj))
}

fn as_promise(this: &JsValue) -> JsResult<&JsObject> {
    this.as_object()
        .filter(|o| o.with_kind(|k| matches!(k, ObjectKind::Promise(_))))
        .ok_or_else(|| JsNativeError::typ().with_message("not a promise").into())
}

fn callable_arg(value: Option<&JsValue>) -> Option<JsValue> {
    value.filter(|v| v.as_object().is_some_and(JsObject::is_callable)).cloned()
}

/// `Promise.prototype.then` (§27.2.5.4).
fn then(this: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
    let p = as_promise(this)?;
    let on_fulfilled = callable_arg(args.first());
    let on_rejected = callable_arg(args.get(1));
    let derived = promise::new_promise(context);
    promise::perform_promise_then(p, on_fulfilled, on_rejected, derived.clone(), context);
    Ok(JsValue::Object(derived))
}

/// `Promise.prototype.catch` (§27.2.5.1): `then(undefined, onRejected)`.
fn catch(this: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
    let on_rejected = args.first().cloned().unwrap_or(JsValue::undefined());
    then(this, &[JsValue::undefined(), on_rejected], context)
}

/// `Promise.prototype.finally` (§27.2.5.3), without the thenable-return
/// chaining a finally handler's own return value can trigger — a
/// declared simplification.
fn finally(this: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
    let p = as_promise(this)?;
    let handler = callable_arg(args.first());
    let function_prototype = context.intrinsics().function_prototype.clone();
    let closure = context.realm().global_env();
    let (on_fulfilled, on_rejected) = match handler {
        Some(h) => (
            Some(JsValue::Object(new_promise_finally_function(h.clone(), false, Some(function_prototype.clone()), closure.clone()))),
            Some(JsValue::Object(new_promise_finally_function(h, true, Some(function_prototype), closure))),
        ),
        None => (None, None),
    };
    let derived = promise::new_promise(context);
    promise::perform_promise_then(p, on_fulfilled, on_rejected, derived.clone(), context);
    Ok(JsValue::Object(derived))
}

/// `Promise.resolve` (§27.2.4.7).
fn resolve_static(_this: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
    let value = args.first().cloned().unwrap_or(JsValue::undefined());
    if let JsValue::Object(obj) = &value {
        if obj.with_kind(|k| matches!(k, ObjectKind::Promise(_))) {
            return Ok(value);
        }
    }
    let p = promise::new_promise(context);
    promise::resolve_promise(&p, value, context);
    Ok(JsValue::Object(p))
}

/// `Promise.reject` (§27.2.4.6).
fn reject_static(_this: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
    let reason = args.first().cloned().unwrap_or(JsValue::undefined());
    let p = promise::new_promise(context);
    promise::reject_promise(&p, reason, context);
    Ok(JsValue::Object(p))
}

#[cfg(test)]
mod tests;
