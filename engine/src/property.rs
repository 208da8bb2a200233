//! Property keys and Property Descriptor Records (§3.2 of the data model:
//! "every own property ... is described by attributes: value, writable,
//! enumerable, configurable, or accessor get/set").

use ecma_gc::{Finalize, Trace};

use crate::string::JsString;
use crate::symbol::JsSymbol;
use crate::value::JsValue;

/// A property key: a string or a symbol. Array indices are folded into the
/// `String` case as their canonical decimal text, per `CanonicalNumericIndexString`
/// — a dedicated `Index` variant isn't needed at this implementation's scale.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PropertyKey {
    String(JsString),
    Symbol(JsSymbol),
}

impl PropertyKey {
    #[must_use]
    pub fn from_str(s: &str) -> Self {
        PropertyKey::String(JsString::new(s))
    }

    /// The value of an `ArrayIndex` property key, if this key is one
    /// (§4.9 "iteration protocol" walks array-likes by index).
    #[must_use]
    pub fn as_array_index(&self) -> Option<u32> {
        match self {
            PropertyKey::String(s) => {
                let text = s.as_str();
                if text == "0" {
                    return Some(0);
                }
                if text.starts_with('0') || text.is_empty() {
                    return None;
                }
                text.parse().ok()
            }
            PropertyKey::Symbol(_) => None,
        }
    }
}

impl Finalize for PropertyKey {}
unsafe impl Trace for PropertyKey {
    ecma_gc::empty_trace!();
}

impl std::fmt::Display for PropertyKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PropertyKey::String(s) => write!(f, "{s}"),
            PropertyKey::Symbol(s) => write!(f, "{s}"),
        }
    }
}

impl From<&str> for PropertyKey {
    fn from(s: &str) -> Self {
        PropertyKey::from_str(s)
    }
}

impl From<JsString> for PropertyKey {
    fn from(s: JsString) -> Self {
        PropertyKey::String(s)
    }
}

impl From<JsSymbol> for PropertyKey {
    fn from(s: JsSymbol) -> Self {
        PropertyKey::Symbol(s)
    }
}

/// A Property Descriptor Record. `Accessor` descriptors carry `get`/`set`
/// functions instead of a `value`; the two shapes are mutually exclusive
/// per `IsAccessorDescriptor`/`IsDataDescriptor`.
#[derive(Debug, Clone)]
pub enum PropertyDescriptor {
    Data {
        value: JsValue,
        writable: bool,
        enumerable: bool,
        configurable: bool,
    },
    Accessor {
        get: Option<JsValue>,
        set: Option<JsValue>,
        enumerable: bool,
        configurable: bool,
    },
}

impl PropertyDescriptor {
    #[must_use]
    pub fn data(value: JsValue, writable: bool, enumerable: bool, configurable: bool) -> Self {
        PropertyDescriptor::Data { value, writable, enumerable, configurable }
    }

    /// The descriptor ordinary properties get from literal/assignment
    /// syntax: writable, enumerable, and configurable (§3.2's
    /// `CreateDataPropertyOrThrow` default).
    #[must_use]
    pub fn data_wec(value: JsValue) -> Self {
        Self::data(value, true, true, true)
    }

    #[must_use]
    pub fn enumerable(&self) -> bool {
        match self {
            PropertyDescriptor::Data { enumerable, .. } | PropertyDescriptor::Accessor { enumerable, .. } => *enumerable,
        }
    }

    #[must_use]
    pub fn configurable(&self) -> bool {
        match self {
            PropertyDescriptor::Data { configurable, .. } | PropertyDescriptor::Accessor { configurable, .. } => *configurable,
        }
    }

    #[must_use]
    pub fn is_accessor(&self) -> bool {
        matches!(self, PropertyDescriptor::Accessor { .. })
    }

    #[must_use]
    pub fn value(&self) -> Option<&JsValue> {
        match self {
            PropertyDescriptor::Data { value, .. } => Some(value),
            PropertyDescriptor::Accessor { .. } => None,
        }
    }
}

impl Finalize for PropertyDescriptor {}
unsafe impl Trace for PropertyDescriptor {
    ecma_gc::custom_trace!(this, {
        match this {
            PropertyDescriptor::Data { value, .. } => value.trace(),
            PropertyDescriptor::Accessor { get, set, .. } => {
                get.trace();
                set.trace();
            }
        }
    });
}
