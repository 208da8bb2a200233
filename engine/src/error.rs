//! Two disjoint error currencies (`SPEC_FULL.md` §B):
//!
//! - [`EngineError`]: host-facing failures (a malformed plugin, a
//!   `Context` misconfiguration) returned as `Result<T, EngineError>` from
//!   functions the embedder calls directly. Never script-observable.
//! - [`JsError`]/[`JsNativeError`]: a *thrown* ECMAScript value, carried
//!   inside [`crate::completion::Completion::Throw`] rather than
//!   `Result::Err` — exceptions are control flow inside the evaluator
//!   (§9 "Exceptions as control flow"), not Rust errors.

use std::fmt;

use thiserror::Error;

use crate::value::JsValue;

/// A host-facing failure: something wrong with how the engine itself was
/// driven, not a script-level exception.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("parse error: {0}")]
    Parse(#[from] ecma_parser::ParseError),

    #[error("plugin {name} rejected installation: {reason}")]
    PluginRejected { name: String, reason: String },

    #[error("no job queue installed and a microtask was scheduled")]
    NoJobQueue,

    #[error("context has no running execution context")]
    NoRunningExecutionContext,
}

pub type EngineResult<T> = Result<T, EngineError>;

/// The kind of built-in error constructor a [`JsNativeError`] corresponds
/// to (§7 "abrupt completions ... `TypeError`, `RangeError`,
/// `ReferenceError`, `SyntaxError`").
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JsNativeErrorKind {
    Type,
    Range,
    Reference,
    Syntax,
    Eval,
    Uri,
}

impl JsNativeErrorKind {
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            JsNativeErrorKind::Type => "TypeError",
            JsNativeErrorKind::Range => "RangeError",
            JsNativeErrorKind::Reference => "ReferenceError",
            JsNativeErrorKind::Syntax => "SyntaxError",
            JsNativeErrorKind::Eval => "EvalError",
            JsNativeErrorKind::Uri => "URIError",
        }
    }
}

/// A Rust-side description of a native error, not yet realized as a
/// `JsValue` (that happens in [`JsNativeError::into_value`], which needs a
/// `Context` to look up the right error-prototype intrinsic).
#[derive(Debug, Clone)]
pub struct JsNativeError {
    kind: JsNativeErrorKind,
    message: String,
}

impl JsNativeError {
    #[must_use]
    pub fn new(kind: JsNativeErrorKind, message: impl Into<String>) -> Self {
        JsNativeError { kind, message: message.into() }
    }

    #[must_use]
    pub fn typ() -> Self {
        Self::new(JsNativeErrorKind::Type, "")
    }

    #[must_use]
    pub fn range() -> Self {
        Self::new(JsNativeErrorKind::Range, "")
    }

    #[must_use]
    pub fn reference() -> Self {
        Self::new(JsNativeErrorKind::Reference, "")
    }

    #[must_use]
    pub fn syntax() -> Self {
        Self::new(JsNativeErrorKind::Syntax, "")
    }

    #[must_use]
    pub fn eval() -> Self {
        Self::new(JsNativeErrorKind::Eval, "")
    }

    #[must_use]
    pub fn uri() -> Self {
        Self::new(JsNativeErrorKind::Uri, "")
    }

    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    #[must_use]
    pub fn kind(&self) -> JsNativeErrorKind {
        self.kind
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for JsNativeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind.name(), self.message)
    }
}

/// A thrown value, wrapping either a constructed native error or an
/// arbitrary `JsValue` thrown via `throw expr;`.
#[derive(Debug, Clone)]
pub struct JsError {
    value: JsErrorValue,
}

#[derive(Debug, Clone)]
enum JsErrorValue {
    Native(JsNativeError),
    Value(JsValue),
}

impl JsError {
    #[must_use]
    pub fn from_native(err: JsNativeError) -> Self {
        JsError { value: JsErrorValue::Native(err) }
    }

    #[must_use]
    pub fn from_value(value: JsValue) -> Self {
        JsError { value: JsErrorValue::Value(value) }
    }

    /// Realizes this error as a thrown `JsValue`: native errors become
    /// `Error`-prototype objects constructed through `context`; opaque
    /// thrown values pass through unchanged.
    pub fn into_value(self, context: &mut crate::context::Context) -> JsValue {
        match self.value {
            JsErrorValue::Native(native) => context.construct_native_error(&native),
            JsErrorValue::Value(value) => value,
        }
    }

    #[must_use]
    pub fn as_native(&self) -> Option<&JsNativeError> {
        match &self.value {
            JsErrorValue::Native(n) => Some(n),
            JsErrorValue::Value(_) => None,
        }
    }
}

impl From<JsNativeError> for JsError {
    fn from(err: JsNativeError) -> Self {
        JsError::from_native(err)
    }
}

impl fmt::Display for JsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            JsErrorValue::Native(n) => write!(f, "{n}"),
            JsErrorValue::Value(v) => write!(f, "{v:?}"),
        }
    }
}

/// Result of a native operation that can throw. Most internal evaluator
/// helpers (abstract operations) return this rather than a full
/// `Completion`, since they can only ever produce `Normal` or `Throw`.
pub type JsResult<T> = Result<T, JsError>;
