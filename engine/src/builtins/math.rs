//! `Math`: a plain object carrying the constants and functions scripts
//! reach for, never constructible and never called.

use crate::builtins::install_method;
use crate::context::Context;
use crate::error::JsResult;
use crate::value::JsValue;

pub fn init(context: &mut Context) {
    let function_prototype = context.intrinsics().function_prototype.clone();
    let closure = context.realm().global_env();
    let math = context.new_object();

    math.create_hidden_property("PI", JsValue::from(std::f64::consts::PI));
    math.create_hidden_property("E", JsValue::from(std::f64::consts::E));
    math.create_hidden_property("LN2", JsValue::from(std::f64::consts::LN_2));
    math.create_hidden_property("LN10", JsValue::from(std::f64::consts::LN_10));
    math.create_hidden_property("SQRT2", JsValue::from(std::f64::consts::SQRT_2));

    install_method(&math, "abs", 1, |_, a, c| unary(a, c, f64::abs), &function_prototype, &closure);
    install_method(&math, "floor", 1, |_, a, c| unary(a, c, f64::floor), &function_prototype, &closure);
    install_method(&math, "ceil", 1, |_, a, c| unary(a, c, f64::ceil), &function_prototype, &closure);
    install_method(&math, "round", 1, |_, a, c| unary(a, c, round_half_up), &function_prototype, &closure);
    install_method(&math, "trunc", 1, |_, a, c| unary(a, c, f64::trunc), &function_prototype, &closure);
    install_method(&math, "sqrt", 1, |_, a, c| unary(a, c, f64::sqrt), &function_prototype, &closure);
    install_method(&math, "cbrt", 1, |_, a, c| unary(a, c, f64::cbrt), &function_prototype, &closure);
    install_method(&math, "sign", 1, |_, a, c| unary(a, c, f64::signum), &function_prototype, &closure);
    install_method(&math, "log", 1, |_, a, c| unary(a, c, f64::ln), &function_prototype, &closure);
    install_method(&math, "log2", 1, |_, a, c| unary(a, c, f64::log2), &function_prototype, &closure);
    install_method(&math, "log10", 1, |_, a, c| unary(a, c, f64::log10), &function_prototype, &closure);
    install_method(&math, "exp", 1, |_, a, c| unary(a, c, f64::exp), &function_prototype, &closure);
    install_method(&math, "sin", 1, |_, a, c| unary(a, c, f64::sin), &function_prototype, &closure);
    install_method(&math, "cos", 1, |_, a, c| unary(a, c, f64::cos), &function_prototype, &closure);
    install_method(&math, "tan", 1, |_, a, c| unary(a, c, f64::tan), &function_prototype, &closure);
    install_method(&math, "pow", 2, pow, &function_prototype, &closure);
    install_method(&math, "max", 2, max, &function_prototype, &closure);
    install_method(&math, "min", 2, min, &function_prototype, &closure);
    install_method(&math, "random", 0, random, &function_prototype, &closure);

    context.realm().global_object().create_data_property("Math", JsValue::Object(math));
}

fn round_half_up(n: f64) -> f64 {
    (n + 0.5).floor()
}

fn unary(args: &[JsValue], context: &mut Context, f: impl FnOnce(f64) -> f64) -> JsResult<JsValue> {
    let n = args.first().map(|v| v.to_number(context)).transpose()?.unwrap_or(f64::NAN);
    Ok(JsValue::from(f(n)))
}

fn pow(_this: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
    let base = args.first().map(|v| v.to_number(context)).transpose()?.unwrap_or(f64::NAN);
    let exp = args.get(1).map(|v| v.to_number(context)).transpose()?.unwrap_or(f64::NAN);
    Ok(JsValue::from(base.powf(exp)))
}

fn max(_this: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
    let mut result = f64::NEG_INFINITY;
    for arg in args {
        let n = arg.to_number(context)?;
        if n.is_nan() {
            return Ok(JsValue::from(f64::NAN));
        }
        result = result.max(n);
    }
    Ok(JsValue::from(result))
}

fn min(_this: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
    let mut result = f64::INFINITY;
    for arg in args {
        let n = arg.to_number(context)?;
        if n.is_nan() {
            return Ok(JsValue::from(f64::NAN));
        }
        result = result.min(n);
    }
    Ok(JsValue::from(result))
}

fn random(_this: &JsValue, _args: &[JsValue], _context: &mut Context) -> JsResult<JsValue> {
    use std::cell::Cell;
    use std::time::{SystemTime, UNIX_EPOCH};
    thread_local! {
        static STATE: Cell<u64> = Cell::new(0);
    }
    STATE.with(|state| {
        if state.get() == 0 {
            let seed = SystemTime::now().duration_since(UNIX_EPOCH).map_or(0x2545F4914F6CDD1D, |d| d.as_nanos() as u64);
            state.set(seed | 1);
        }
        let mut x = state.get();
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        state.set(x);
        Ok(JsValue::from((x >> 11) as f64 / (1u64 << 53) as f64))
    })
}

#[cfg(test)]
mod tests;
