//! `%IteratorPrototype%` (§4.9): every built-in iterator's prototype
//! inherits from here, which is why `[Symbol.iterator]` returning `this`
//! — making any iterator itself iterable — only needs writing once.
//! `next` also lives here rather than on a per-kind prototype: this
//! implementation has exactly one producing iterator kind so far
//! (`ObjectKind::ArrayIterator`), and dispatches on it directly instead
//! of adding a prototype per kind.

use crate::builtins::install_method;
use crate::context::Context;
use crate::error::{JsError, JsNativeError, JsResult};
use crate::object::ObjectKind;
use crate::value::JsValue;

pub fn init(context: &mut Context) {
    let function_prototype = context.intrinsics().function_prototype.clone();
    let iterator_prototype = context.intrinsics().iterator_prototype.clone();
    let closure = context.realm().global_env();

    install_method(&iterator_prototype, "next", 0, next, &function_prototype, &closure);

    let iterator_sym = context.realm().well_known_symbols().iterator.clone();
    let self_iterator = crate::function::new_native_function(
        "[Symbol.iterator]",
        0,
        |this, _args, _context| Ok(this.clone()),
        Some(function_prototype),
        closure,
    );
    iterator_prototype.create_hidden_property(iterator_sym, JsValue::Object(self_iterator));
}

fn next(this: &JsValue, _args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
    let obj = this.as_object().cloned().ok_or_else(|| JsNativeError::typ().with_message("next called on a non-object"))?;
    let stepped = obj.with_kind_mut(|kind| -> Result<Option<JsValue>, JsError> {
        match kind {
        ObjectKind::ArrayIterator(data) => {
            let target = data.target.clone();
            let receiver = JsValue::Object(target.clone());
            let len = target.get(&"length".into(), &receiver, context)?.to_number(context)? as usize;
            if data.index >= len {
                Ok(None)
            } else {
                let value = target.get(&data.index.to_string().as_str().into(), &receiver, context)?;
                data.index += 1;
                Ok(Some(value))
            }
        }
        _ => Err(JsNativeError::typ().with_message("next called on an incompatible receiver").into()),
        }
    })?;

    let result = context.new_object();
    match stepped {
        Some(value) => {
            result.create_data_property("value", value);
            result.create_data_property("done", JsValue::from(false));
        }
        None => {
            result.create_data_property("value", JsValue::undefined());
            result.create_data_property("done", JsValue::from(true));
        }
    }
    Ok(JsValue::Object(result))
}

#[cfg(test)]
mod tests;
