//! [`JsValue`] and the abstract type-conversion operations of §3.1
//! ("Value: primitive types (Undefined, Null, Boolean, Number, String,
//! Symbol, BigInt) plus Object").

use ecma_gc::{Finalize, Trace};

use crate::bigint::JsBigInt;
use crate::error::{JsNativeError, JsResult};
use crate::object::JsObject;
use crate::property::PropertyKey;
use crate::string::JsString;
use crate::symbol::JsSymbol;

#[derive(Debug, Clone)]
pub enum JsValue {
    Undefined,
    Null,
    Boolean(bool),
    Number(f64),
    String(JsString),
    Symbol(JsSymbol),
    BigInt(JsBigInt),
    Object(JsObject),
}

impl Finalize for JsValue {}
unsafe impl Trace for JsValue {
    ecma_gc::custom_trace!(this, {
        if let JsValue::Object(obj) = this {
            obj.trace();
        }
    });
}

impl JsValue {
    #[must_use]
    pub fn undefined() -> Self {
        JsValue::Undefined
    }

    #[must_use]
    pub fn null() -> Self {
        JsValue::Null
    }

    #[must_use]
    pub fn is_undefined(&self) -> bool {
        matches!(self, JsValue::Undefined)
    }

    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, JsValue::Null)
    }

    #[must_use]
    pub fn is_nullish(&self) -> bool {
        self.is_undefined() || self.is_null()
    }

    #[must_use]
    pub fn is_object(&self) -> bool {
        matches!(self, JsValue::Object(_))
    }

    #[must_use]
    pub fn as_object(&self) -> Option<&JsObject> {
        match self {
            JsValue::Object(o) => Some(o),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            JsValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_string(&self) -> Option<&JsString> {
        match self {
            JsValue::String(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_callable(&self) -> Option<&JsObject> {
        self.as_object().filter(|o| o.is_callable())
    }

    /// `typeof` (§4.3 "expressions" table): the one place `function` and
    /// `object` diverge even though both are `JsValue::Object`.
    #[must_use]
    pub fn type_of(&self) -> &'static str {
        match self {
            JsValue::Undefined => "undefined",
            JsValue::Null => "object",
            JsValue::Boolean(_) => "boolean",
            JsValue::Number(_) => "number",
            JsValue::String(_) => "string",
            JsValue::Symbol(_) => "symbol",
            JsValue::BigInt(_) => "bigint",
            JsValue::Object(o) if o.is_callable() => "function",
            JsValue::Object(_) => "object",
        }
    }

    /// `ToBoolean` (§3.1's abstract type-conversion suite).
    #[must_use]
    pub fn to_boolean(&self) -> bool {
        match self {
            JsValue::Undefined | JsValue::Null => false,
            JsValue::Boolean(b) => *b,
            JsValue::Number(n) => *n != 0.0 && !n.is_nan(),
            JsValue::String(s) => !s.is_empty(),
            JsValue::Symbol(_) | JsValue::Object(_) => true,
            JsValue::BigInt(b) => !b.is_zero(),
        }
    }

    /// `ToNumber`.
    pub fn to_number(&self, context: &mut crate::context::Context) -> JsResult<f64> {
        match self {
            JsValue::Undefined => Ok(f64::NAN),
            JsValue::Null => Ok(0.0),
            JsValue::Boolean(b) => Ok(if *b { 1.0 } else { 0.0 }),
            JsValue::Number(n) => Ok(*n),
            JsValue::String(s) => Ok(string_to_number(s.as_str())),
            JsValue::BigInt(_) => Err(JsNativeError::typ().with_message("cannot convert a BigInt value to a number").into()),
            JsValue::Symbol(_) => Err(JsNativeError::typ().with_message("cannot convert a Symbol value to a number").into()),
            JsValue::Object(_) => {
                let primitive = self.to_primitive(context, PreferredType::Number)?;
                if primitive.is_object() {
                    return Ok(f64::NAN);
                }
                primitive.to_number(context)
            }
        }
    }

    /// `ToString`.
    pub fn to_js_string(&self, context: &mut crate::context::Context) -> JsResult<JsString> {
        match self {
            JsValue::Undefined => Ok(JsString::new("undefined")),
            JsValue::Null => Ok(JsString::new("null")),
            JsValue::Boolean(b) => Ok(JsString::new(b.to_string())),
            JsValue::Number(n) => Ok(JsString::new(number_to_string(*n))),
            JsValue::String(s) => Ok(s.clone()),
            JsValue::BigInt(b) => Ok(JsString::new(b.to_string())),
            JsValue::Symbol(_) => Err(JsNativeError::typ().with_message("cannot convert a Symbol value to a string").into()),
            JsValue::Object(_) => {
                let primitive = self.to_primitive(context, PreferredType::String)?;
                if primitive.is_object() {
                    return Err(JsNativeError::typ().with_message("cannot convert object to string").into());
                }
                primitive.to_js_string(context)
            }
        }
    }

    /// `ToPropertyKey`.
    pub fn to_property_key(&self, context: &mut crate::context::Context) -> JsResult<PropertyKey> {
        if let JsValue::Symbol(s) = self {
            return Ok(PropertyKey::Symbol(s.clone()));
        }
        Ok(PropertyKey::String(self.to_js_string(context)?))
    }

    /// `ToObject`.
    pub fn to_object(&self, context: &mut crate::context::Context) -> JsResult<JsObject> {
        match self {
            JsValue::Object(o) => Ok(o.clone()),
            JsValue::Undefined | JsValue::Null => {
                Err(JsNativeError::typ().with_message("cannot convert undefined or null to object").into())
            }
            JsValue::Boolean(b) => Ok(context.new_boolean_object(*b)),
            JsValue::Number(n) => Ok(context.new_number_object(*n)),
            JsValue::String(s) => Ok(context.new_string_object(s.clone())),
            JsValue::Symbol(_) | JsValue::BigInt(_) => {
                Err(JsNativeError::typ().with_message("wrapper objects for this type are not implemented").into())
            }
        }
    }

    /// `ToPrimitive`, minus the `Symbol.toPrimitive` override (exotic
    /// built-in method bodies beyond the essentials are out of scope) —
    /// tries `valueOf` then `toString` for `Number` preference, the
    /// reverse for `String`, matching `OrdinaryToPrimitive`.
    pub fn to_primitive(&self, context: &mut crate::context::Context, preferred: PreferredType) -> JsResult<JsValue> {
        let JsValue::Object(obj) = self else {
            return Ok(self.clone());
        };
        let methods: [&str; 2] = match preferred {
            PreferredType::Number => ["valueOf", "toString"],
            PreferredType::String => ["toString", "valueOf"],
        };
        for name in methods {
            let key = PropertyKey::from_str(name);
            let method = obj.get(&key, self, context)?;
            if let Some(callable) = method.as_callable() {
                let result = crate::function::call_from_value(&JsValue::Object(callable.clone()), self, &[], context)?;
                if !result.is_object() {
                    return Ok(result);
                }
            }
        }
        Err(JsNativeError::typ().with_message("cannot convert object to primitive value").into())
    }

    /// `IsCallable`.
    #[must_use]
    pub fn is_callable(&self) -> bool {
        self.as_callable().is_some()
    }

    /// `SameValue` (strict-equality's cousin used by e.g. property-key
    /// comparisons and `Object.is`).
    #[must_use]
    pub fn same_value(a: &JsValue, b: &JsValue) -> bool {
        match (a, b) {
            (JsValue::Number(a), JsValue::Number(b)) => {
                if a.is_nan() && b.is_nan() {
                    true
                } else if *a == 0.0 && *b == 0.0 {
                    a.is_sign_positive() == b.is_sign_positive()
                } else {
                    a == b
                }
            }
            _ => JsValue::strict_equals(a, b),
        }
    }

    /// `IsStrictlyEqual` (the `===` operator's abstract operation).
    #[must_use]
    pub fn strict_equals(a: &JsValue, b: &JsValue) -> bool {
        match (a, b) {
            (JsValue::Undefined, JsValue::Undefined) | (JsValue::Null, JsValue::Null) => true,
            (JsValue::Number(a), JsValue::Number(b)) => a == b,
            (JsValue::String(a), JsValue::String(b)) => a == b,
            (JsValue::Boolean(a), JsValue::Boolean(b)) => a == b,
            (JsValue::Symbol(a), JsValue::Symbol(b)) => a == b,
            (JsValue::BigInt(a), JsValue::BigInt(b)) => a == b,
            (JsValue::Object(a), JsValue::Object(b)) => JsObject::ptr_eq(a, b),
            _ => false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreferredType {
    Number,
    String,
}

pub(crate) fn string_to_number(s: &str) -> f64 {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return 0.0;
    }
    if let Some(hex) = trimmed.strip_prefix("0x").or_else(|| trimmed.strip_prefix("0X")) {
        return i64::from_str_radix(hex, 16).map(|v| v as f64).unwrap_or(f64::NAN);
    }
    trimmed.parse().unwrap_or(f64::NAN)
}

/// `Number::toString` (radix 10): matches JS number formatting for the
/// common cases (integers print without a decimal point, `NaN`/`Infinity`
/// print literally) without implementing the full shortest-round-trip
/// algorithm the spec mandates.
#[must_use]
pub fn number_to_string(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n.is_infinite() {
        if n > 0.0 { "Infinity".to_string() } else { "-Infinity".to_string() }
    } else if n == 0.0 {
        "0".to_string()
    } else if n.fract() == 0.0 && n.abs() < 1e21 {
        format!("{n:.0}")
    } else {
        format!("{n}")
    }
}

impl From<bool> for JsValue {
    fn from(b: bool) -> Self {
        JsValue::Boolean(b)
    }
}

impl From<f64> for JsValue {
    fn from(n: f64) -> Self {
        JsValue::Number(n)
    }
}

impl From<JsString> for JsValue {
    fn from(s: JsString) -> Self {
        JsValue::String(s)
    }
}

impl From<&str> for JsValue {
    fn from(s: &str) -> Self {
        JsValue::String(JsString::new(s))
    }
}

impl From<JsObject> for JsValue {
    fn from(o: JsObject) -> Self {
        JsValue::Object(o)
    }
}
