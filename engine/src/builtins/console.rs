//! `console.log`/`warn`/`error`/`info`, routed through the [`log`] crate
//! rather than directly to stdout — so a host embedding this engine
//! gets to decide where script output actually lands.

use crate::builtins::install_method;
use crate::context::Context;
use crate::error::JsResult;
use crate::value::JsValue;

pub fn init(context: &mut Context) {
    let function_prototype = context.intrinsics().function_prototype.clone();
    let closure = context.realm().global_env();
    let console = context.new_object();

    install_method(&console, "log", 0, log, &function_prototype, &closure);
    install_method(&console, "info", 0, info, &function_prototype, &closure);
    install_method(&console, "warn", 0, warn, &function_prototype, &closure);
    install_method(&console, "error", 0, error, &function_prototype, &closure);
    install_method(&console, "debug", 0, debug, &function_prototype, &closure);

    context.realm().global_object().create_data_property("console", JsValue::Object(console));
}

fn render(args: &[JsValue], context: &mut Context) -> JsResult<String> {
    let mut parts = Vec::with_capacity(args.len());
    for arg in args {
        parts.push(arg.to_js_string(context)?.to_string());
    }
    Ok(parts.join(" "))
}

fn log(_this: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
    log::info!("{}", render(args, context)?);
    Ok(JsValue::undefined())
}

fn info(_this: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
    log::info!("{}", render(args, context)?);
    Ok(JsValue::undefined())
}

fn warn(_this: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
    log::warn!("{}", render(args, context)?);
    Ok(JsValue::undefined())
}

fn error(_this: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
    log::error!("{}", render(args, context)?);
    Ok(JsValue::undefined())
}

fn debug(_this: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
    log::debug!("{}", render(args, context)?);
    Ok(JsValue::undefined())
}

#[cfg(test)]
mod tests;
