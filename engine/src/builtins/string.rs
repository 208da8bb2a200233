//! `String` and the prototype methods that cover most script usage —
//! case conversion, trimming, searching, and splitting.

use crate::builtins::install_method;
use crate::context::Context;
use crate::error::JsResult;
use crate::object::{JsObject, ObjectKind};
use crate::string::JsString;
use crate::value::JsValue;

pub fn init(context: &mut Context) {
    let function_prototype = context.intrinsics().function_prototype.clone();
    let string_prototype = context.intrinsics().string_prototype.clone();
    let closure = context.realm().global_env();

    install_method(&string_prototype, "toString", 0, to_string, &function_prototype, &closure);
    install_method(&string_prototype, "valueOf", 0, to_string, &function_prototype, &closure);
    install_method(&string_prototype, "charAt", 1, char_at, &function_prototype, &closure);
    install_method(&string_prototype, "charCodeAt", 1, char_code_at, &function_prototype, &closure);
    install_method(&string_prototype, "slice", 2, slice, &function_prototype, &closure);
    install_method(&string_prototype, "indexOf", 1, index_of, &function_prototype, &closure);
    install_method(&string_prototype, "includes", 1, includes, &function_prototype, &closure);
    install_method(&string_prototype, "startsWith", 1, starts_with, &function_prototype, &closure);
    install_method(&string_prototype, "endsWith", 1, ends_with, &function_prototype, &closure);
    install_method(&string_prototype, "split", 1, split, &function_prototype, &closure);
    install_method(&string_prototype, "toUpperCase", 0, to_upper_case, &function_prototype, &closure);
    install_method(&string_prototype, "toLowerCase", 0, to_lower_case, &function_prototype, &closure);
    install_method(&string_prototype, "trim", 0, trim, &function_prototype, &closure);
    install_method(&string_prototype, "concat", 1, concat, &function_prototype, &closure);
    install_method(&string_prototype, "repeat", 1, repeat, &function_prototype, &closure);
    install_method(&string_prototype, "replace", 2, replace, &function_prototype, &closure);

    crate::builtins::install_constructor(context, "String", 1, call, construct, &string_prototype);
}

fn call(_this: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
    let s = match args.first() {
        Some(v) => v.to_js_string(context)?,
        None => JsString::new(""),
    };
    Ok(JsValue::from(s))
}

fn construct(_new_target: &JsObject, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
    let s = match args.first() {
        Some(v) => v.to_js_string(context)?,
        None => JsString::new(""),
    };
    Ok(JsValue::Object(context.new_string_object(s)))
}

fn unwrap(this: &JsValue, context: &mut Context) -> JsResult<String> {
    match this {
        JsValue::String(s) => Ok(s.to_string()),
        JsValue::Object(o) => o.with_kind(|k| match k {
            ObjectKind::String(s) => Ok(s.to_string()),
            _ => this.to_js_string(context).map(|s| s.to_string()),
        }),
        _ => this.to_js_string(context).map(|s| s.to_string()),
    }
}

fn jsstr(s: impl Into<std::rc::Rc<str>>) -> JsValue {
    JsValue::from(JsString::new(s))
}

fn to_string(this: &JsValue, _args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
    Ok(jsstr(unwrap(this, context)?))
}

fn char_at(this: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
    let s = unwrap(this, context)?;
    let index = args.first().map(|v| v.to_number(context)).transpose()?.unwrap_or(0.0);
    let chars: Vec<char> = s.chars().collect();
    if index < 0.0 || index as usize >= chars.len() {
        return Ok(jsstr(""));
    }
    Ok(jsstr(chars[index as usize].to_string()))
}

fn char_code_at(this: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
    let s = unwrap(this, context)?;
    let index = args.first().map(|v| v.to_number(context)).transpose()?.unwrap_or(0.0);
    let chars: Vec<char> = s.chars().collect();
    if index < 0.0 || index as usize >= chars.len() {
        return Ok(JsValue::from(f64::NAN));
    }
    Ok(JsValue::from(chars[index as usize] as u32 as f64))
}

fn clamp(n: f64, len: usize) -> usize {
    if n.is_nan() || n < 0.0 {
        0
    } else {
        (n as usize).min(len)
    }
}

fn slice(this: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
    let s = unwrap(this, context)?;
    let chars: Vec<char> = s.chars().collect();
    let len = chars.len();
    let start = match args.first() {
        Some(v) => {
            let n = v.to_number(context)?;
            if n < 0.0 { ((len as f64 + n).max(0.0)) as usize } else { clamp(n, len) }
        }
        None => 0,
    };
    let end = match args.get(1) {
        Some(v) if !matches!(v, JsValue::Undefined) => {
            let n = v.to_number(context)?;
            if n < 0.0 { ((len as f64 + n).max(0.0)) as usize } else { clamp(n, len) }
        }
        _ => len,
    };
    if start >= end {
        return Ok(jsstr(""));
    }
    Ok(jsstr(chars[start..end].iter().collect::<String>()))
}

fn index_of(this: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
    let s = unwrap(this, context)?;
    let needle = args.first().cloned().unwrap_or(JsValue::undefined()).to_js_string(context)?.to_string();
    Ok(JsValue::from(s.find(&needle).map_or(-1.0, |i| s[..i].chars().count() as f64)))
}

fn includes(this: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
    let s = unwrap(this, context)?;
    let needle = args.first().cloned().unwrap_or(JsValue::undefined()).to_js_string(context)?.to_string();
    Ok(JsValue::from(s.contains(&needle)))
}

fn starts_with(this: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
    let s = unwrap(this, context)?;
    let needle = args.first().cloned().unwrap_or(JsValue::undefined()).to_js_string(context)?.to_string();
    Ok(JsValue::from(s.starts_with(&needle)))
}

fn ends_with(this: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
    let s = unwrap(this, context)?;
    let needle = args.first().cloned().unwrap_or(JsValue::undefined()).to_js_string(context)?.to_string();
    Ok(JsValue::from(s.ends_with(&needle)))
}

fn split(this: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
    let s = unwrap(this, context)?;
    let pieces: Vec<JsValue> = match args.first() {
        Some(v) if !matches!(v, JsValue::Undefined) => {
            let sep = v.to_js_string(context)?.to_string();
            if sep.is_empty() {
                s.chars().map(|c| jsstr(c.to_string())).collect()
            } else {
                s.split(&sep).map(|p| jsstr(p.to_string())).collect()
            }
        }
        _ => vec![jsstr(s)],
    };
    Ok(JsValue::Object(context.new_array(pieces)))
}

fn to_upper_case(this: &JsValue, _args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
    Ok(jsstr(unwrap(this, context)?.to_uppercase()))
}

fn to_lower_case(this: &JsValue, _args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
    Ok(jsstr(unwrap(this, context)?.to_lowercase()))
}

fn trim(this: &JsValue, _args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
    Ok(jsstr(unwrap(this, context)?.trim().to_string()))
}

fn concat(this: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
    let mut s = unwrap(this, context)?;
    for arg in args {
        s.push_str(&arg.to_js_string(context)?.to_string());
    }
    Ok(jsstr(s))
}

fn repeat(this: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
    let s = unwrap(this, context)?;
    let count = args.first().map(|v| v.to_number(context)).transpose()?.unwrap_or(0.0);
    if count < 0.0 || !count.is_finite() {
        return Err(crate::error::JsNativeError::range().with_message("invalid count value").into());
    }
    Ok(jsstr(s.repeat(count as usize)))
}

fn replace(this: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
    let s = unwrap(this, context)?;
    let pattern = args.first().cloned().unwrap_or(JsValue::undefined()).to_js_string(context)?.to_string();
    let replacement = args.get(1).cloned().unwrap_or(JsValue::undefined()).to_js_string(context)?.to_string();
    Ok(jsstr(s.replacen(&pattern, &replacement, 1)))
}

#[cfg(test)]
mod tests;
