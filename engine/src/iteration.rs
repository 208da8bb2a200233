//! The Iterator protocol (§4.9): `GetIterator`, `IteratorStep`,
//! `IteratorClose`, plus the non-protocol `for-in` key enumeration
//! (§4.9's "`for-in` walks enumerable string keys up the prototype
//! chain, skipping duplicates — a separate mechanism from the
//! `Symbol.iterator` protocol `for-of` uses").

use ecma_gc::{Finalize, Trace};

use crate::context::Context;
use crate::error::{JsNativeError, JsResult};
use crate::object::JsObject;
use crate::property::PropertyKey;
use crate::value::JsValue;

/// The state behind `%ArrayIteratorPrototype%.next` (§4.9): the array
/// being walked plus the next index to read. `CreateArrayIterator`
/// builds one of these per call to `Array.prototype[Symbol.iterator]`/
/// `.values()`, so each call gets its own independent cursor.
#[derive(Debug)]
pub struct ArrayIteratorData {
    pub(crate) target: JsObject,
    pub(crate) index: usize,
}

impl ArrayIteratorData {
    #[must_use]
    pub fn new(target: JsObject) -> Self {
        ArrayIteratorData { target, index: 0 }
    }
}

impl Finalize for ArrayIteratorData {}
unsafe impl Trace for ArrayIteratorData {
    ecma_gc::custom_trace!(this, this.target.trace());
}

/// An Iterator Record (§4.9): the iterator object plus its bound `next`
/// method, with a `done` latch so a finished iterator reports `None`
/// forever after instead of calling `next` again.
pub struct IteratorRecord {
    iterator: JsObject,
    next_method: JsValue,
    done: bool,
}

/// `GetIterator`: looks up `value[Symbol.iterator]` and calls it.
pub fn get_iterator(context: &mut Context, value: &JsValue) -> JsResult<IteratorRecord> {
    let obj = value.to_object(context)?;
    let iterator_sym = context.realm().well_known_symbols().iterator.clone();
    let method = obj.get(&PropertyKey::Symbol(iterator_sym), value, context)?;
    let iterator_value = crate::function::call_from_value(&method, value, &[], context)?;
    let iterator = iterator_value
        .as_object()
        .cloned()
        .ok_or_else(|| JsNativeError::typ().with_message("result of Symbol.iterator is not an object"))?;
    let next_method = iterator.get(&PropertyKey::from_str("next"), &JsValue::Object(iterator.clone()), context)?;
    Ok(IteratorRecord { iterator, next_method, done: false })
}

/// `IteratorStep`: advances the iterator once, returning `None` once
/// `{ done: true }` is reported.
pub fn iterator_step(context: &mut Context, record: &mut IteratorRecord) -> JsResult<Option<JsValue>> {
    if record.done {
        return Ok(None);
    }
    let receiver = JsValue::Object(record.iterator.clone());
    let result = crate::function::call_from_value(&record.next_method, &receiver, &[], context)?;
    let result_obj = result
        .as_object()
        .cloned()
        .ok_or_else(|| JsNativeError::typ().with_message("iterator result is not an object"))?;
    let done = result_obj.get(&PropertyKey::from_str("done"), &result, context)?.to_boolean();
    if done {
        record.done = true;
        return Ok(None);
    }
    let value = result_obj.get(&PropertyKey::from_str("value"), &result, context)?;
    Ok(Some(value))
}

/// `IteratorClose`: called when a `for-of` loop body exits early
/// (`break`, `return`, or an uncaught throw) so generator-backed
/// iterators get a chance to run their `finally` blocks. Errors from
/// `return` itself are swallowed when `completion_is_throw` already has
/// an error to propagate, mirroring `IteratorClose`'s rule that the
/// original abrupt completion wins.
pub fn iterator_close(context: &mut Context, record: &IteratorRecord, completion_is_throw: bool) -> JsResult<()> {
    if record.done {
        return Ok(());
    }
    let receiver = JsValue::Object(record.iterator.clone());
    let return_method = record.iterator.get(&PropertyKey::from_str("return"), &receiver, context)?;
    if return_method.is_undefined() {
        return Ok(());
    }
    let result = crate::function::call_from_value(&return_method, &receiver, &[], context);
    if completion_is_throw {
        return Ok(());
    }
    result.map(|_| ())
}

/// `EnumerateObjectProperties`, condensed: collects enumerable string
/// keys walking the prototype chain once, skipping names already seen
/// (whether or not the shadowing property was itself enumerable).
pub fn enumerable_keys(obj: &JsObject) -> Vec<PropertyKey> {
    let mut seen = Vec::new();
    let mut out = Vec::new();
    let mut current = Some(obj.clone());
    while let Some(o) = current {
        for key in o.own_property_keys() {
            if seen.contains(&key) {
                continue;
            }
            seen.push(key.clone());
            if let PropertyKey::String(_) = &key {
                if o.get_own_property(&key).is_some_and(|d| d.enumerable()) {
                    out.push(key);
                }
            }
        }
        current = o.prototype();
    }
    out
}
