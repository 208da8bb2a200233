//! [`JsString`]: the evaluator's `String` value type.
//!
//! Represented as a reference-counted `str`, not boa's UTF-16 code-unit
//! array — this implementation keeps strings as plain Rust text throughout
//! (see `DESIGN.md`). A `JsString` is acyclic, so it is a plain `Rc`, not a
//! traced `Gc` pointer.

use std::fmt;
use std::rc::Rc;

#[derive(Debug, Clone, Eq)]
pub struct JsString {
    inner: Rc<str>,
}

impl JsString {
    #[must_use]
    pub fn new(s: impl Into<Rc<str>>) -> Self {
        JsString { inner: s.into() }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.inner
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.chars().count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    #[must_use]
    pub fn concat(&self, other: &JsString) -> JsString {
        JsString::new(format!("{}{}", self.inner, other.inner))
    }
}

impl PartialEq for JsString {
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner
    }
}

impl std::hash::Hash for JsString {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.inner.hash(state);
    }
}

impl PartialOrd for JsString {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for JsString {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.inner.cmp(&other.inner)
    }
}

impl fmt::Display for JsString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.inner)
    }
}

impl From<&str> for JsString {
    fn from(s: &str) -> Self {
        JsString::new(s)
    }
}

impl From<String> for JsString {
    fn from(s: String) -> Self {
        JsString::new(s)
    }
}
