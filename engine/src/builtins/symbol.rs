//! `Symbol`: callable but never constructible, plus the well-known
//! symbols every realm's [`crate::realm::Realm::well_known_symbols`]
//! already holds — this module just makes them reachable from script.

use crate::builtins::install_method;
use crate::context::Context;
use crate::error::{JsNativeError, JsResult};
use crate::function::new_native_function;
use crate::object::JsObject;
use crate::string::JsString;
use crate::symbol::JsSymbol;
use crate::value::JsValue;

pub fn init(context: &mut Context) {
    let function_prototype = context.intrinsics().function_prototype.clone();
    let symbol_prototype = context.intrinsics().symbol_prototype.clone();
    let closure = context.realm().global_env();

    install_method(&symbol_prototype, "toString", 0, to_string, &function_prototype, &closure);

    let ctor = new_native_function("Symbol", 0, call, Some(function_prototype.clone()), closure.clone());
    ctor.create_hidden_property("prototype", JsValue::Object(symbol_prototype.clone()));
    symbol_prototype.create_hidden_property("constructor", JsValue::Object(ctor.clone()));

    let well_known = context.realm().well_known_symbols().clone();
    ctor.create_hidden_property("iterator", JsValue::Symbol(well_known.iterator.clone()));
    ctor.create_hidden_property("asyncIterator", JsValue::Symbol(well_known.async_iterator.clone()));
    ctor.create_hidden_property("toPrimitive", JsValue::Symbol(well_known.to_primitive.clone()));
    ctor.create_hidden_property("toStringTag", JsValue::Symbol(well_known.to_string_tag.clone()));
    ctor.create_hidden_property("hasInstance", JsValue::Symbol(well_known.has_instance.clone()));

    context.realm().global_object().create_data_property("Symbol", JsValue::Object(ctor));
}

fn call(_this: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
    let description = match args.first() {
        Some(v) if !matches!(v, JsValue::Undefined) => Some(v.to_js_string(context)?),
        _ => None,
    };
    Ok(JsValue::Symbol(JsSymbol::new(description)))
}

fn to_string(this: &JsValue, _args: &[JsValue], _context: &mut Context) -> JsResult<JsValue> {
    let JsValue::Symbol(sym) = this else {
        return Err(JsNativeError::typ().with_message("not a Symbol").into());
    };
    Ok(JsValue::from(JsString::new(sym.to_string())))
}

#[cfg(test)]
mod tests;
