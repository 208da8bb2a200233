//! [`JsSymbol`]: the evaluator's `Symbol` value type.
//!
//! Identity, not content, is what makes two symbols equal, so this is a
//! small `Rc`-shared record carrying a process-wide unique id plus an
//! optional description.

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

use crate::string::JsString;

thread_local! {
    static NEXT_ID: Cell<u64> = const { Cell::new(1) };
}

#[derive(Debug)]
struct SymbolData {
    id: u64,
    description: Option<JsString>,
}

#[derive(Debug, Clone)]
pub struct JsSymbol {
    inner: Rc<SymbolData>,
}

impl JsSymbol {
    #[must_use]
    pub fn new(description: Option<JsString>) -> Self {
        let id = NEXT_ID.with(|n| {
            let id = n.get();
            n.set(id + 1);
            id
        });
        JsSymbol { inner: Rc::new(SymbolData { id, description }) }
    }

    #[must_use]
    pub fn description(&self) -> Option<&JsString> {
        self.inner.description.as_ref()
    }

    #[must_use]
    pub fn id(&self) -> u64 {
        self.inner.id
    }
}

impl PartialEq for JsSymbol {
    fn eq(&self, other: &Self) -> bool {
        self.inner.id == other.inner.id
    }
}

impl Eq for JsSymbol {}

impl std::hash::Hash for JsSymbol {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.inner.id.hash(state);
    }
}

impl fmt::Display for JsSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Symbol({})", self.inner.description.as_ref().map_or("", JsString::as_str))
    }
}

/// Well-known symbols (§6.1.5.1 "Well-Known Symbols" of ECMA-262), created
/// once per realm (§3.8 "Realm").
#[derive(Debug, Clone)]
pub struct WellKnownSymbols {
    pub iterator: JsSymbol,
    pub async_iterator: JsSymbol,
    pub to_primitive: JsSymbol,
    pub to_string_tag: JsSymbol,
    pub has_instance: JsSymbol,
}

impl WellKnownSymbols {
    #[must_use]
    pub fn new() -> Self {
        WellKnownSymbols {
            iterator: JsSymbol::new(Some(JsString::new("Symbol.iterator"))),
            async_iterator: JsSymbol::new(Some(JsString::new("Symbol.asyncIterator"))),
            to_primitive: JsSymbol::new(Some(JsString::new("Symbol.toPrimitive"))),
            to_string_tag: JsSymbol::new(Some(JsString::new("Symbol.toStringTag"))),
            has_instance: JsSymbol::new(Some(JsString::new("Symbol.hasInstance"))),
        }
    }
}

impl Default for WellKnownSymbols {
    fn default() -> Self {
        Self::new()
    }
}
