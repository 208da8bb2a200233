//! String interner for the ecma-rt ECMAScript runtime.
//!
//! Identifiers, property keys and literal strings that reach the AST are
//! interned into a [`Sym`] so that later stages (the evaluator's identifier
//! resolution, property lookups) compare and hash a 32-bit integer instead of
//! a `str`. A fixed set of strings the engine refers to constantly
//! (`"prototype"`, `"constructor"`, `"length"`, ...) are pre-interned so every
//! fresh [`Interner`] starts with the same stable [`Sym`] values for them.

use std::num::NonZeroU32;

use indexmap::IndexSet;
use once_cell::sync::Lazy;
use rustc_hash::FxBuildHasher;

/// The well-known strings every [`Interner`] is seeded with, in order.
/// Their index in this array plus one is their [`Sym`] value.
static COMMON_STRINGS: &[&str] = &[
    "",
    "prototype",
    "constructor",
    "length",
    "name",
    "message",
    "value",
    "this",
    "arguments",
    "undefined",
    "null",
    "true",
    "false",
    "get",
    "set",
    "toString",
    "valueOf",
    "Symbol.iterator",
    "done",
    "next",
    "return",
];

static COMMON_LOOKUP: Lazy<std::collections::HashMap<&'static str, Sym>> = Lazy::new(|| {
    COMMON_STRINGS
        .iter()
        .enumerate()
        .map(|(i, s)| (*s, Sym::new((i + 1) as u32)))
        .collect()
});

/// An interned string handle. Cheap to copy, compare and hash.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Sym(NonZeroU32);

impl Sym {
    fn new(index: u32) -> Self {
        Sym(NonZeroU32::new(index).expect("symbol index is 1-based"))
    }

    fn index(self) -> usize {
        (self.0.get() - 1) as usize
    }

    /// The `Sym` for the empty string; every interner is seeded with it at
    /// index 0 so it is always available without a lookup.
    pub const EMPTY_STRING: Sym = Sym(match NonZeroU32::new(1) {
        Some(n) => n,
        None => unreachable!(),
    });
}

/// A string interner. Each [`ecma_engine::Context`](../ecma_engine/struct.Context.html)
/// owns one; identifiers parsed into the AST and produced by the evaluator
/// (e.g. `ToString` on a computed property key) are interned through it.
#[derive(Debug)]
pub struct Interner {
    strings: IndexSet<Box<str>, FxBuildHasher>,
}

impl Default for Interner {
    fn default() -> Self {
        let mut strings = IndexSet::with_hasher(FxBuildHasher::default());
        for s in COMMON_STRINGS {
            strings.insert((*s).into());
        }
        Interner { strings }
    }
}

impl Interner {
    /// Creates a fresh interner, pre-seeded with [`COMMON_STRINGS`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Interns `s`, returning a stable [`Sym`] for it. Interning the same
    /// string twice (even across two `get_or_intern` calls on the same
    /// interner) returns the same `Sym`.
    pub fn get_or_intern(&mut self, s: impl AsRef<str>) -> Sym {
        let s = s.as_ref();
        if let Some(sym) = COMMON_LOOKUP.get(s) {
            return *sym;
        }
        let (index, _) = self.strings.insert_full(s.into());
        Sym::new((index + 1) as u32)
    }

    /// Resolves a [`Sym`] back to its string. Panics if `sym` was not
    /// produced by this interner (or its common-string seed set).
    #[must_use]
    pub fn resolve(&self, sym: Sym) -> &str {
        self.strings
            .get_index(sym.index())
            .unwrap_or_else(|| panic!("Sym {sym:?} not present in this interner"))
    }

    /// Looks up a string without interning it.
    #[must_use]
    pub fn get(&self, s: impl AsRef<str>) -> Option<Sym> {
        let s = s.as_ref();
        if let Some(sym) = COMMON_LOOKUP.get(s) {
            return Some(*sym);
        }
        self.strings
            .get_index_of(s)
            .map(|i| Sym::new((i + 1) as u32))
    }
}

/// Trait for types that can render themselves back to source given an
/// [`Interner`] to resolve their [`Sym`]s against. AST nodes implement this
/// instead of `Display` since they hold symbols, not strings.
pub trait ToInternedString {
    /// Renders `self` to a human-readable string using `interner` to resolve
    /// any interned identifiers.
    fn to_interned_string(&self, interner: &Interner) -> String;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn common_strings_stable_across_interners() {
        let mut a = Interner::new();
        let mut b = Interner::new();
        assert_eq!(a.get_or_intern("prototype"), b.get_or_intern("prototype"));
    }

    #[test]
    fn round_trips_fresh_strings() {
        let mut i = Interner::new();
        let sym = i.get_or_intern("myVariable");
        assert_eq!(i.resolve(sym), "myVariable");
        assert_eq!(i.get_or_intern("myVariable"), sym);
    }

    #[test]
    fn empty_string_is_preseeded() {
        let i = Interner::new();
        assert_eq!(i.resolve(Sym::EMPTY_STRING), "");
    }
}
