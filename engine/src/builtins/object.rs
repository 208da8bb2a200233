//! `Object`, `Object.prototype`, and the handful of `Object.*` static
//! methods scripts reach for most (`keys`/`values`/`entries`/`assign`/
//! `freeze`/`create`/`getPrototypeOf`/`defineProperty`).

use crate::builtins::{install_constructor, install_method, own_enumerable_string_keys};
use crate::context::Context;
use crate::error::{JsNativeError, JsResult};
use crate::object::JsObject;
use crate::property::{PropertyDescriptor, PropertyKey};
use crate::value::JsValue;

pub fn init(context: &mut Context) {
    let function_prototype = context.intrinsics().function_prototype.clone();
    let object_prototype = context.intrinsics().object_prototype.clone();
    let closure = context.realm().global_env();

    install_method(&object_prototype, "toString", 0, to_string, &function_prototype, &closure);
    install_method(&object_prototype, "valueOf", 0, value_of, &function_prototype, &closure);
    install_method(&object_prototype, "hasOwnProperty", 1, has_own_property, &function_prototype, &closure);
    install_method(&object_prototype, "isPrototypeOf", 1, is_prototype_of, &function_prototype, &closure);
    install_method(&object_prototype, "propertyIsEnumerable", 1, property_is_enumerable, &function_prototype, &closure);

    let ctor = install_constructor(context, "Object", 1, call, construct, &object_prototype);

    let function_prototype = context.intrinsics().function_prototype.clone();
    let closure = context.realm().global_env();
    install_method(&ctor, "keys", 1, keys, &function_prototype, &closure);
    install_method(&ctor, "values", 1, values, &function_prototype, &closure);
    install_method(&ctor, "entries", 1, entries, &function_prototype, &closure);
    install_method(&ctor, "assign", 2, assign, &function_prototype, &closure);
    install_method(&ctor, "freeze", 1, freeze, &function_prototype, &closure);
    install_method(&ctor, "isFrozen", 1, is_frozen, &function_prototype, &closure);
    install_method(&ctor, "getPrototypeOf", 1, get_prototype_of, &function_prototype, &closure);
    install_method(&ctor, "setPrototypeOf", 2, set_prototype_of, &function_prototype, &closure);
    install_method(&ctor, "create", 2, create, &function_prototype, &closure);
    install_method(&ctor, "defineProperty", 3, define_property, &function_prototype, &closure);
}

fn call(_this: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
    match args.first() {
        Some(v) if !v.is_nullish() => Ok(JsValue::Object(v.to_object(context)?)),
        _ => Ok(JsValue::Object(context.new_object())),
    }
}

fn construct(_new_target: &JsObject, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
    call(&JsValue::undefined(), args, context)
}

fn to_string(_this: &JsValue, _args: &[JsValue], _context: &mut Context) -> JsResult<JsValue> {
    Ok(JsValue::from("[object Object]"))
}

fn value_of(this: &JsValue, _args: &[JsValue], _context: &mut Context) -> JsResult<JsValue> {
    Ok(this.clone())
}

fn has_own_property(this: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
    let obj = this.to_object(context)?;
    let key = args.first().cloned().unwrap_or(JsValue::undefined()).to_property_key(context)?;
    Ok(JsValue::from(obj.get_own_property(&key).is_some()))
}

fn property_is_enumerable(this: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
    let obj = this.to_object(context)?;
    let key = args.first().cloned().unwrap_or(JsValue::undefined()).to_property_key(context)?;
    Ok(JsValue::from(obj.get_own_property(&key).is_some_and(|d| d.enumerable())))
}

fn is_prototype_of(this: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
    let Some(candidate) = args.first().and_then(JsValue::as_object) else {
        return Ok(JsValue::from(false));
    };
    let target = this.to_object(context)?;
    let mut current = candidate.prototype();
    while let Some(proto) = current {
        if JsObject::ptr_eq(&proto, &target) {
            return Ok(JsValue::from(true));
        }
        current = proto.prototype();
    }
    Ok(JsValue::from(false))
}

fn keys(_this: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
    let obj = args.first().cloned().unwrap_or(JsValue::undefined()).to_object(context)?;
    let keys: Vec<JsValue> = own_enumerable_string_keys(&obj).into_iter().map(|k| JsValue::from(crate::string::JsString::new(k.to_string()))).collect();
    Ok(JsValue::Object(context.new_array(keys)))
}

fn values(_this: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
    let obj = args.first().cloned().unwrap_or(JsValue::undefined()).to_object(context)?;
    let receiver = JsValue::Object(obj.clone());
    let mut out = Vec::new();
    for key in own_enumerable_string_keys(&obj) {
        out.push(obj.get(&key, &receiver, context)?);
    }
    Ok(JsValue::Object(context.new_array(out)))
}

fn entries(_this: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
    let obj = args.first().cloned().unwrap_or(JsValue::undefined()).to_object(context)?;
    let receiver = JsValue::Object(obj.clone());
    let mut out = Vec::new();
    for key in own_enumerable_string_keys(&obj) {
        let value = obj.get(&key, &receiver, context)?;
        let pair = context.new_array(vec![JsValue::from(crate::string::JsString::new(key.to_string())), value]);
        out.push(JsValue::Object(pair));
    }
    Ok(JsValue::Object(context.new_array(out)))
}

fn assign(_this: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
    let Some(target) = args.first() else {
        return Err(JsNativeError::typ().with_message("Object.assign requires a target").into());
    };
    let target_obj = target.to_object(context)?;
    for source in &args[1..] {
        if source.is_nullish() {
            continue;
        }
        let source_obj = source.to_object(context)?;
        let receiver = JsValue::Object(source_obj.clone());
        for key in own_enumerable_string_keys(&source_obj) {
            let value = source_obj.get(&key, &receiver, context)?;
            target_obj.set_or_throw(key, value, context)?;
        }
    }
    Ok(target.clone())
}

fn freeze(_this: &JsValue, args: &[JsValue], _context: &mut Context) -> JsResult<JsValue> {
    let value = args.first().cloned().unwrap_or(JsValue::undefined());
    if let Some(obj) = value.as_object() {
        obj.prevent_extensions();
        for key in obj.own_property_keys() {
            if let Some(desc) = obj.get_own_property(&key) {
                let frozen = match desc {
                    PropertyDescriptor::Data { value, enumerable, .. } => PropertyDescriptor::Data { value, writable: false, enumerable, configurable: false },
                    PropertyDescriptor::Accessor { get, set, enumerable, .. } => PropertyDescriptor::Accessor { get, set, enumerable, configurable: false },
                };
                obj.define_own_property(key, frozen);
            }
        }
    }
    Ok(value)
}

fn is_frozen(_this: &JsValue, args: &[JsValue], _context: &mut Context) -> JsResult<JsValue> {
    let Some(obj) = args.first().and_then(JsValue::as_object) else {
        return Ok(JsValue::from(true));
    };
    if obj.is_extensible() {
        return Ok(JsValue::from(false));
    }
    let frozen = obj.own_property_keys().into_iter().all(|key| !obj.get_own_property(&key).is_some_and(|d| d.configurable()));
    Ok(JsValue::from(frozen))
}

fn get_prototype_of(_this: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
    let obj = args.first().cloned().unwrap_or(JsValue::undefined()).to_object(context)?;
    Ok(obj.prototype().map_or(JsValue::null(), JsValue::Object))
}

fn set_prototype_of(_this: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
    let target = args.first().cloned().unwrap_or(JsValue::undefined());
    let obj = target.to_object(context)?;
    match args.get(1) {
        Some(JsValue::Object(proto)) => obj.set_prototype(Some(proto.clone())),
        Some(JsValue::Null) | None => obj.set_prototype(None),
        _ => return Err(JsNativeError::typ().with_message("prototype must be an object or null").into()),
    }
    Ok(target)
}

fn create(_this: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
    let proto = match args.first() {
        Some(JsValue::Object(o)) => Some(o.clone()),
        Some(JsValue::Null) | None => None,
        _ => return Err(JsNativeError::typ().with_message("Object prototype may only be an object or null").into()),
    };
    let obj = JsObject::ordinary(proto);
    if let Some(JsValue::Object(props)) = args.get(1) {
        let receiver = JsValue::Object(props.clone());
        for key in own_enumerable_string_keys(props) {
            let descriptor_obj = props.get(&key, &receiver, context)?;
            let value = descriptor_obj.to_object(context)?.get(&PropertyKey::from_str("value"), &descriptor_obj, context)?;
            obj.create_data_property(key, value);
        }
    }
    Ok(JsValue::Object(obj))
}

fn define_property(_this: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
    let target = args.first().cloned().ok_or_else(|| JsNativeError::typ().with_message("Object.defineProperty called on non-object"))?;
    let obj = target.as_object().cloned().ok_or_else(|| JsNativeError::typ().with_message("Object.defineProperty called on non-object"))?;
    let key = args.get(1).cloned().unwrap_or(JsValue::undefined()).to_property_key(context)?;
    let descriptor = args.get(2).cloned().unwrap_or(JsValue::undefined());
    let descriptor_obj = descriptor.to_object(context)?;
    let receiver = descriptor.clone();
    let has = |name: &str| descriptor_obj.has_property(&PropertyKey::from_str(name));
    let get_prop = |name: &str, ctx: &mut Context| descriptor_obj.get(&PropertyKey::from_str(name), &receiver, ctx);

    if has("get") || has("set") {
        let get = if has("get") { Some(get_prop("get", context)?) } else { None };
        let set = if has("set") { Some(get_prop("set", context)?) } else { None };
        let enumerable = if has("enumerable") { get_prop("enumerable", context)?.to_boolean() } else { false };
        let configurable = if has("configurable") { get_prop("configurable", context)?.to_boolean() } else { false };
        obj.define_own_property(key, PropertyDescriptor::Accessor { get, set, enumerable, configurable });
    } else {
        let value = if has("value") { get_prop("value", context)? } else { JsValue::undefined() };
        let writable = if has("writable") { get_prop("writable", context)?.to_boolean() } else { false };
        let enumerable = if has("enumerable") { get_prop("enumerable", context)?.to_boolean() } else { false };
        let configurable = if has("configurable") { get_prop("configurable", context)?.to_boolean() } else { false };
        obj.define_own_property(key, PropertyDescriptor::Data { value, writable, enumerable, configurable });
    }
    Ok(target)
}

#[cfg(test)]
mod tests;
