//! `JSON.stringify`/`JSON.parse`, hand-rolled against [`JsValue`]/
//! [`JsObject`] directly rather than through a `serde` round-trip —
//! there's no `Serialize`/`Deserialize` impl for these types to hang
//! a derive off of, and the grammar here is small enough to walk by hand.

use crate::builtins::own_enumerable_string_keys;
use crate::context::Context;
use crate::error::{JsNativeError, JsResult};
use crate::string::JsString;
use crate::value::JsValue;

pub fn init(context: &mut Context) {
    let function_prototype = context.intrinsics().function_prototype.clone();
    let closure = context.realm().global_env();
    let json = context.new_object();

    crate::builtins::install_method(&json, "stringify", 3, stringify, &function_prototype, &closure);
    crate::builtins::install_method(&json, "parse", 2, parse, &function_prototype, &closure);

    context.realm().global_object().create_data_property("JSON", JsValue::Object(json));
}

fn stringify(_this: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
    let value = args.first().cloned().unwrap_or(JsValue::undefined());
    match to_json_string(&value, context)? {
        Some(s) => Ok(JsValue::from(JsString::new(s))),
        None => Ok(JsValue::undefined()),
    }
}

fn to_json_string(value: &JsValue, context: &mut Context) -> JsResult<Option<String>> {
    Ok(match value {
        JsValue::Undefined => None,
        JsValue::Symbol(_) => None,
        JsValue::Null => Some("null".to_string()),
        JsValue::Boolean(b) => Some(b.to_string()),
        JsValue::Number(n) => Some(if n.is_finite() { n.to_string() } else { "null".to_string() }),
        JsValue::BigInt(_) => return Err(JsNativeError::typ().with_message("cannot serialize a BigInt").into()),
        JsValue::String(s) => Some(quote(&s.to_string())),
        JsValue::Object(obj) if obj.is_callable() => None,
        JsValue::Object(obj) if obj.is_array() => {
            let len = obj.get(&"length".into(), value, context)?.to_number(context)? as usize;
            let mut parts = Vec::with_capacity(len);
            for i in 0..len {
                let element = obj.get(&i.to_string().as_str().into(), value, context)?;
                parts.push(to_json_string(&element, context)?.unwrap_or_else(|| "null".to_string()));
            }
            Some(format!("[{}]", parts.join(",")))
        }
        JsValue::Object(obj) => {
            let receiver = JsValue::Object(obj.clone());
            let mut parts = Vec::new();
            for key in own_enumerable_string_keys(obj) {
                let property = obj.get(&key, &receiver, context)?;
                if let Some(encoded) = to_json_string(&property, context)? {
                    parts.push(format!("{}:{encoded}", quote(&key.to_string())));
                }
            }
            Some(format!("{{{}}}", parts.join(",")))
        }
    })
}

fn quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if (c as u32) < 0x20 => out.push_str(&format!("\\u{:04x}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

fn parse(_this: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
    let text = args.first().cloned().unwrap_or(JsValue::undefined()).to_js_string(context)?.to_string();
    let mut parser = JsonParser { input: text.as_bytes(), pos: 0 };
    parser.skip_whitespace();
    let value = parser.parse_value(context)?;
    parser.skip_whitespace();
    if parser.pos != parser.input.len() {
        return Err(JsNativeError::syntax().with_message("unexpected trailing characters in JSON").into());
    }
    Ok(value)
}

struct JsonParser<'a> {
    input: &'a [u8],
    pos: usize,
}

impl<'a> JsonParser<'a> {
    fn skip_whitespace(&mut self) {
        while matches!(self.input.get(self.pos), Some(b' ' | b'\t' | b'\n' | b'\r')) {
            self.pos += 1;
        }
    }

    fn peek(&self) -> Option<u8> {
        self.input.get(self.pos).copied()
    }

    fn expect(&mut self, literal: &str) -> JsResult<()> {
        let bytes = literal.as_bytes();
        if self.input[self.pos..].starts_with(bytes) {
            self.pos += bytes.len();
            Ok(())
        } else {
            Err(JsNativeError::syntax().with_message(format!("expected `{literal}` in JSON")).into())
        }
    }

    fn parse_value(&mut self, context: &mut Context) -> JsResult<JsValue> {
        self.skip_whitespace();
        match self.peek() {
            Some(b'{') => self.parse_object(context),
            Some(b'[') => self.parse_array(context),
            Some(b'"') => Ok(JsValue::from(JsString::new(self.parse_string()?))),
            Some(b't') => {
                self.expect("true")?;
                Ok(JsValue::from(true))
            }
            Some(b'f') => {
                self.expect("false")?;
                Ok(JsValue::from(false))
            }
            Some(b'n') => {
                self.expect("null")?;
                Ok(JsValue::null())
            }
            Some(c) if c == b'-' || c.is_ascii_digit() => self.parse_number(),
            _ => Err(JsNativeError::syntax().with_message("unexpected character in JSON").into()),
        }
    }

    fn parse_number(&mut self) -> JsResult<JsValue> {
        let start = self.pos;
        if self.peek() == Some(b'-') {
            self.pos += 1;
        }
        while matches!(self.peek(), Some(c) if c.is_ascii_digit() || matches!(c, b'.' | b'e' | b'E' | b'+' | b'-')) {
            self.pos += 1;
        }
        let text = std::str::from_utf8(&self.input[start..self.pos]).unwrap_or("");
        text.parse::<f64>().map(JsValue::from).map_err(|_| JsNativeError::syntax().with_message("invalid number in JSON").into())
    }

    fn parse_string(&mut self) -> JsResult<String> {
        self.pos += 1;
        let mut out = String::new();
        loop {
            match self.peek() {
                None => return Err(JsNativeError::syntax().with_message("unterminated string in JSON").into()),
                Some(b'"') => {
                    self.pos += 1;
                    return Ok(out);
                }
                Some(b'\\') => {
                    self.pos += 1;
                    match self.peek() {
                        Some(b'"') => out.push('"'),
                        Some(b'\\') => out.push('\\'),
                        Some(b'/') => out.push('/'),
                        Some(b'n') => out.push('\n'),
                        Some(b't') => out.push('\t'),
                        Some(b'r') => out.push('\r'),
                        Some(b'b') => out.push('\u{8}'),
                        Some(b'f') => out.push('\u{c}'),
                        Some(b'u') => {
                            let hex = self
                                .input
                                .get(self.pos + 1..self.pos + 5)
                                .and_then(|b| std::str::from_utf8(b).ok())
                                .unwrap_or("0000");
                            let code = u32::from_str_radix(hex, 16).unwrap_or(0);
                            out.push(char::from_u32(code).unwrap_or('\u{fffd}'));
                            self.pos += 4;
                        }
                        _ => return Err(JsNativeError::syntax().with_message("invalid escape in JSON").into()),
                    }
                    self.pos += 1;
                }
                Some(_) => {
                    let rest = std::str::from_utf8(&self.input[self.pos..]).unwrap_or("");
                    let c = rest.chars().next().unwrap_or('\u{fffd}');
                    out.push(c);
                    self.pos += c.len_utf8();
                }
            }
        }
    }

    fn parse_array(&mut self, context: &mut Context) -> JsResult<JsValue> {
        self.pos += 1;
        let mut elements = Vec::new();
        self.skip_whitespace();
        if self.peek() == Some(b']') {
            self.pos += 1;
            return Ok(JsValue::Object(context.new_array(elements)));
        }
        loop {
            elements.push(self.parse_value(context)?);
            self.skip_whitespace();
            match self.peek() {
                Some(b',') => {
                    self.pos += 1;
                }
                Some(b']') => {
                    self.pos += 1;
                    break;
                }
                _ => return Err(JsNativeError::syntax().with_message("expected `,` or `]` in JSON").into()),
            }
        }
        Ok(JsValue::Object(context.new_array(elements)))
    }

    fn parse_object(&mut self, context: &mut Context) -> JsResult<JsValue> {
        self.pos += 1;
        let obj = context.new_object();
        self.skip_whitespace();
        if self.peek() == Some(b'}') {
            self.pos += 1;
            return Ok(JsValue::Object(obj));
        }
        loop {
            self.skip_whitespace();
            if self.peek() != Some(b'"') {
                return Err(JsNativeError::syntax().with_message("expected property name in JSON").into());
            }
            let key = self.parse_string()?;
            self.skip_whitespace();
            if self.peek() != Some(b':') {
                return Err(JsNativeError::syntax().with_message("expected `:` in JSON").into());
            }
            self.pos += 1;
            let value = self.parse_value(context)?;
            obj.create_data_property(key.as_str(), value);
            self.skip_whitespace();
            match self.peek() {
                Some(b',') => {
                    self.pos += 1;
                }
                Some(b'}') => {
                    self.pos += 1;
                    break;
                }
                _ => return Err(JsNativeError::syntax().with_message("expected `,` or `}` in JSON").into()),
            }
        }
        Ok(JsValue::Object(obj))
    }
}

#[cfg(test)]
mod tests;
