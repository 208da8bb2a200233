//! `Number`, its well-known constant statics, and the global
//! `parseInt`/`parseFloat`/`isNaN`/`isFinite` functions, which live on
//! `Number` in ECMA-262 but are reachable unqualified too (installed
//! onto the global object by [`crate::builtins::global`]).

use crate::builtins::install_method;
use crate::context::Context;
use crate::error::JsResult;
use crate::object::{JsObject, ObjectKind};
use crate::value::JsValue;

pub fn init(context: &mut Context) {
    let function_prototype = context.intrinsics().function_prototype.clone();
    let number_prototype = context.intrinsics().number_prototype.clone();
    let closure = context.realm().global_env();

    install_method(&number_prototype, "toString", 1, to_string, &function_prototype, &closure);
    install_method(&number_prototype, "valueOf", 0, value_of, &function_prototype, &closure);
    install_method(&number_prototype, "toFixed", 1, to_fixed, &function_prototype, &closure);

    let ctor = crate::builtins::install_constructor(context, "Number", 1, call, construct, &number_prototype);

    ctor.create_hidden_property("MAX_SAFE_INTEGER", JsValue::from(9_007_199_254_740_991.0));
    ctor.create_hidden_property("MIN_SAFE_INTEGER", JsValue::from(-9_007_199_254_740_991.0));
    ctor.create_hidden_property("MAX_VALUE", JsValue::from(f64::MAX));
    ctor.create_hidden_property("MIN_VALUE", JsValue::from(f64::MIN_POSITIVE));
    ctor.create_hidden_property("EPSILON", JsValue::from(f64::EPSILON));
    ctor.create_hidden_property("NaN", JsValue::from(f64::NAN));
    ctor.create_hidden_property("POSITIVE_INFINITY", JsValue::from(f64::INFINITY));
    ctor.create_hidden_property("NEGATIVE_INFINITY", JsValue::from(f64::NEG_INFINITY));

    let function_prototype = context.intrinsics().function_prototype.clone();
    let closure = context.realm().global_env();
    install_method(&ctor, "isInteger", 1, is_integer, &function_prototype, &closure);
    install_method(&ctor, "isFinite", 1, is_finite, &function_prototype, &closure);
    install_method(&ctor, "isNaN", 1, is_nan, &function_prototype, &closure);
    install_method(&ctor, "parseFloat", 1, parse_float, &function_prototype, &closure);
    install_method(&ctor, "parseInt", 2, parse_int, &function_prototype, &closure);
}

fn call(_this: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
    match args.first() {
        Some(v) => Ok(JsValue::from(v.to_number(context)?)),
        None => Ok(JsValue::from(0.0)),
    }
}

fn construct(_new_target: &JsObject, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
    let n = match args.first() {
        Some(v) => v.to_number(context)?,
        None => 0.0,
    };
    Ok(JsValue::Object(context.new_number_object(n)))
}

fn unwrap(this: &JsValue) -> JsResult<f64> {
    match this {
        JsValue::Number(n) => Ok(*n),
        JsValue::Object(o) => o.with_kind(|k| match k {
            ObjectKind::Number(n) => Ok(*n),
            _ => Err(crate::error::JsNativeError::typ().with_message("not a Number").into()),
        }),
        _ => Err(crate::error::JsNativeError::typ().with_message("not a Number").into()),
    }
}

fn to_string(this: &JsValue, _args: &[JsValue], _context: &mut Context) -> JsResult<JsValue> {
    Ok(JsValue::from(crate::string::JsString::new(crate::value::number_to_string(unwrap(this)?))))
}

fn value_of(this: &JsValue, _args: &[JsValue], _context: &mut Context) -> JsResult<JsValue> {
    Ok(JsValue::from(unwrap(this)?))
}

fn to_fixed(this: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
    let n = unwrap(this)?;
    let digits = match args.first() {
        Some(v) => v.to_number(context)? as usize,
        None => 0,
    };
    Ok(JsValue::from(crate::string::JsString::new(format!("{n:.digits$}"))))
}

pub(crate) fn is_integer(_this: &JsValue, args: &[JsValue], _context: &mut Context) -> JsResult<JsValue> {
    Ok(JsValue::from(matches!(args.first(), Some(JsValue::Number(n)) if n.is_finite() && n.fract() == 0.0)))
}

fn is_finite(_this: &JsValue, args: &[JsValue], _context: &mut Context) -> JsResult<JsValue> {
    Ok(JsValue::from(matches!(args.first(), Some(JsValue::Number(n)) if n.is_finite())))
}

fn is_nan(_this: &JsValue, args: &[JsValue], _context: &mut Context) -> JsResult<JsValue> {
    Ok(JsValue::from(matches!(args.first(), Some(JsValue::Number(n)) if n.is_nan())))
}

pub(crate) fn parse_float(_this: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
    let s = args.first().cloned().unwrap_or(JsValue::undefined()).to_js_string(context)?.to_string();
    let trimmed = s.trim_start();
    let end = trimmed
        .char_indices()
        .find(|(i, _)| {
            let prefix = &trimmed[..*i + 1];
            prefix.parse::<f64>().is_err() && !matches!(prefix, "-" | "+" | "." | "-." | "+.")
        })
        .map_or(trimmed.len(), |(i, _)| i);
    let candidate = &trimmed[..end];
    Ok(JsValue::from(candidate.parse::<f64>().unwrap_or(f64::NAN)))
}

pub(crate) fn parse_int(_this: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
    let s = args.first().cloned().unwrap_or(JsValue::undefined()).to_js_string(context)?.to_string();
    let radix = match args.get(1) {
        Some(v) if !matches!(v, JsValue::Undefined) => {
            let r = v.to_number(context)? as u32;
            if r == 0 { 10 } else { r }
        }
        _ => 10,
    };
    let trimmed = s.trim();
    let (sign, rest) = match trimmed.strip_prefix('-') {
        Some(rest) => (-1.0, rest),
        None => (1.0, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };
    let rest = if radix == 16 { rest.strip_prefix("0x").or_else(|| rest.strip_prefix("0X")).unwrap_or(rest) } else { rest };
    let digits: String = rest.chars().take_while(|c| c.is_digit(radix)).collect();
    if digits.is_empty() {
        return Ok(JsValue::from(f64::NAN));
    }
    let value = digits.chars().fold(0.0_f64, |acc, c| acc * radix as f64 + c.to_digit(radix).unwrap() as f64);
    Ok(JsValue::from(sign * value))
}

#[cfg(test)]
mod tests;
