//! `Array` and the prototype methods scripts lean on most: mutating
//! (`push`/`pop`/`shift`/`unshift`), searching (`indexOf`/`includes`),
//! and the higher-order trio `forEach`/`map`/`filter`/`reduce`.

use crate::builtins::install_method;
use crate::context::Context;
use crate::error::JsResult;
use crate::function::call_from_value;
use crate::iteration::ArrayIteratorData;
use crate::object::{JsObject, ObjectKind};
use crate::value::JsValue;

pub fn init(context: &mut Context) {
    let function_prototype = context.intrinsics().function_prototype.clone();
    let array_prototype = context.intrinsics().array_prototype.clone();
    let closure = context.realm().global_env();

    let values_fn = crate::function::new_native_function("values", 0, values, Some(function_prototype.clone()), closure.clone());
    array_prototype.create_hidden_property("values", JsValue::Object(values_fn.clone()));
    let iterator_sym = context.realm().well_known_symbols().iterator.clone();
    array_prototype.create_hidden_property(iterator_sym, JsValue::Object(values_fn));

    install_method(&array_prototype, "push", 1, push, &function_prototype, &closure);
    install_method(&array_prototype, "pop", 0, pop, &function_prototype, &closure);
    install_method(&array_prototype, "shift", 0, shift, &function_prototype, &closure);
    install_method(&array_prototype, "unshift", 1, unshift, &function_prototype, &closure);
    install_method(&array_prototype, "slice", 2, slice, &function_prototype, &closure);
    install_method(&array_prototype, "indexOf", 1, index_of, &function_prototype, &closure);
    install_method(&array_prototype, "includes", 1, includes, &function_prototype, &closure);
    install_method(&array_prototype, "join", 1, join, &function_prototype, &closure);
    install_method(&array_prototype, "concat", 1, concat, &function_prototype, &closure);
    install_method(&array_prototype, "forEach", 1, for_each, &function_prototype, &closure);
    install_method(&array_prototype, "map", 1, map, &function_prototype, &closure);
    install_method(&array_prototype, "filter", 1, filter, &function_prototype, &closure);
    install_method(&array_prototype, "reduce", 1, reduce, &function_prototype, &closure);
    install_method(&array_prototype, "toString", 0, to_string, &function_prototype, &closure);

    let ctor = crate::builtins::install_constructor(context, "Array", 1, call, construct, &array_prototype);
    let function_prototype = context.intrinsics().function_prototype.clone();
    let closure = context.realm().global_env();
    install_method(&ctor, "isArray", 1, is_array, &function_prototype, &closure);
}

fn call(_this: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
    build(args, context)
}

fn construct(_new_target: &JsObject, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
    build(args, context)
}

fn build(args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
    if args.len() == 1 {
        if let Some(n) = args[0].as_number() {
            return Ok(JsValue::Object(context.new_array(vec![JsValue::undefined(); n as usize])));
        }
    }
    Ok(JsValue::Object(context.new_array(args.to_vec())))
}

fn values(this: &JsValue, _args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
    let target = this.to_object(context)?;
    let iterator_prototype = context.intrinsics().iterator_prototype.clone();
    let iterator = JsObject::new(Some(iterator_prototype), ObjectKind::ArrayIterator(ArrayIteratorData::new(target)));
    Ok(JsValue::Object(iterator))
}

fn is_array(_this: &JsValue, args: &[JsValue], _context: &mut Context) -> JsResult<JsValue> {
    Ok(JsValue::from(args.first().and_then(JsValue::as_object).is_some_and(JsObject::is_array)))
}

fn length_of(this: &JsValue, context: &mut Context) -> JsResult<usize> {
    let obj = this.to_object(context)?;
    let len = obj.get(&"length".into(), this, context)?.to_number(context)?;
    Ok(len as usize)
}

fn set_length(obj: &JsObject, len: usize, context: &mut Context) -> JsResult<()> {
    obj.set_or_throw("length", JsValue::from(len as f64), context)
}

fn elements_of(this: &JsValue, context: &mut Context) -> JsResult<Vec<JsValue>> {
    let obj = this.to_object(context)?;
    let len = length_of(this, context)?;
    let mut out = Vec::with_capacity(len);
    for i in 0..len {
        out.push(obj.get(&i.to_string().as_str().into(), this, context)?);
    }
    Ok(out)
}

fn push(this: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
    let obj = this.to_object(context)?;
    let mut len = length_of(this, context)?;
    for arg in args {
        obj.create_data_property(len.to_string().as_str(), arg.clone());
        len += 1;
    }
    set_length(&obj, len, context)?;
    Ok(JsValue::from(len as f64))
}

fn pop(this: &JsValue, _args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
    let obj = this.to_object(context)?;
    let len = length_of(this, context)?;
    if len == 0 {
        return Ok(JsValue::undefined());
    }
    let last = len - 1;
    let key = last.to_string();
    let value = obj.get(&key.as_str().into(), this, context)?;
    obj.delete(&key.as_str().into());
    set_length(&obj, last, context)?;
    Ok(value)
}

fn shift(this: &JsValue, _args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
    let mut elements = elements_of(this, context)?;
    if elements.is_empty() {
        return Ok(JsValue::undefined());
    }
    let first = elements.remove(0);
    let obj = this.to_object(context)?;
    for (i, v) in elements.iter().enumerate() {
        obj.create_data_property(i.to_string().as_str(), v.clone());
    }
    obj.delete(&elements.len().to_string().as_str().into());
    set_length(&obj, elements.len(), context)?;
    Ok(first)
}

fn unshift(this: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
    let mut elements = elements_of(this, context)?;
    for (i, arg) in args.iter().enumerate() {
        elements.insert(i, arg.clone());
    }
    let obj = this.to_object(context)?;
    for (i, v) in elements.iter().enumerate() {
        obj.create_data_property(i.to_string().as_str(), v.clone());
    }
    set_length(&obj, elements.len(), context)?;
    Ok(JsValue::from(elements.len() as f64))
}

fn slice(this: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
    let elements = elements_of(this, context)?;
    let len = elements.len();
    let normalize = |v: Option<&JsValue>, default: usize, context: &mut Context| -> JsResult<usize> {
        match v {
            None => Ok(default),
            Some(v) => {
                let n = v.to_number(context)?;
                Ok(clamp_index(n, len))
            }
        }
    };
    let start = normalize(args.first(), 0, context)?;
    let end = normalize(args.get(1), len, context)?;
    let slice = if start < end { elements[start..end].to_vec() } else { Vec::new() };
    Ok(JsValue::Object(context.new_array(slice)))
}

fn clamp_index(n: f64, len: usize) -> usize {
    if n.is_nan() {
        return 0;
    }
    if n < 0.0 {
        ((len as f64 + n).max(0.0)) as usize
    } else {
        (n as usize).min(len)
    }
}

fn index_of(this: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
    let elements = elements_of(this, context)?;
    let target = args.first().cloned().unwrap_or(JsValue::undefined());
    let found = elements.iter().position(|v| JsValue::strict_equals(v, &target));
    Ok(JsValue::from(found.map_or(-1.0, |i| i as f64)))
}

fn includes(this: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
    let elements = elements_of(this, context)?;
    let target = args.first().cloned().unwrap_or(JsValue::undefined());
    Ok(JsValue::from(elements.iter().any(|v| JsValue::strict_equals(v, &target) || JsValue::same_value(v, &target))))
}

fn join(this: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
    let elements = elements_of(this, context)?;
    let separator = match args.first() {
        Some(v) if !matches!(v, JsValue::Undefined) => v.to_js_string(context)?.to_string(),
        _ => ",".to_string(),
    };
    let mut parts = Vec::with_capacity(elements.len());
    for v in &elements {
        if v.is_nullish() {
            parts.push(String::new());
        } else {
            parts.push(v.to_js_string(context)?.to_string());
        }
    }
    Ok(JsValue::from(crate::string::JsString::new(parts.join(&separator))))
}

fn concat(this: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
    let mut out = elements_of(this, context)?;
    for arg in args {
        if arg.as_object().is_some_and(JsObject::is_array) {
            out.extend(elements_of(arg, context)?);
        } else {
            out.push(arg.clone());
        }
    }
    Ok(JsValue::Object(context.new_array(out)))
}

fn for_each(this: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
    let elements = elements_of(this, context)?;
    let callback = args.first().cloned().unwrap_or(JsValue::undefined());
    for (i, v) in elements.iter().enumerate() {
        call_from_value(&callback, &JsValue::undefined(), &[v.clone(), JsValue::from(i as f64), this.clone()], context)?;
    }
    Ok(JsValue::undefined())
}

fn map(this: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
    let elements = elements_of(this, context)?;
    let callback = args.first().cloned().unwrap_or(JsValue::undefined());
    let mut out = Vec::with_capacity(elements.len());
    for (i, v) in elements.iter().enumerate() {
        out.push(call_from_value(&callback, &JsValue::undefined(), &[v.clone(), JsValue::from(i as f64), this.clone()], context)?);
    }
    Ok(JsValue::Object(context.new_array(out)))
}

fn filter(this: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
    let elements = elements_of(this, context)?;
    let callback = args.first().cloned().unwrap_or(JsValue::undefined());
    let mut out = Vec::new();
    for (i, v) in elements.iter().enumerate() {
        let keep = call_from_value(&callback, &JsValue::undefined(), &[v.clone(), JsValue::from(i as f64), this.clone()], context)?;
        if keep.to_boolean() {
            out.push(v.clone());
        }
    }
    Ok(JsValue::Object(context.new_array(out)))
}

fn reduce(this: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
    let elements = elements_of(this, context)?;
    let callback = args.first().cloned().unwrap_or(JsValue::undefined());
    let mut iter = elements.iter().enumerate();
    let mut accumulator = match args.get(1) {
        Some(initial) => initial.clone(),
        None => match iter.next() {
            Some((_, v)) => v.clone(),
            None => {
                return Err(crate::error::JsNativeError::typ().with_message("Reduce of empty array with no initial value").into());
            }
        },
    };
    for (i, v) in iter {
        accumulator = call_from_value(&callback, &JsValue::undefined(), &[accumulator, v.clone(), JsValue::from(i as f64), this.clone()], context)?;
    }
    Ok(accumulator)
}

fn to_string(this: &JsValue, _args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
    join(this, &[], context)
}

#[cfg(test)]
mod tests;
