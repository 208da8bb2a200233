//! Binding patterns: the left-hand sides of destructuring assignment,
//! `let`/`const`/`var` bindings, and formal parameters (ECMA-262
//! `BindingPattern`).

use ecma_interner::Sym;

use crate::expression::{Expression, Identifier, PropertyKey};

/// A binding target: a plain identifier or a destructuring pattern.
#[derive(Debug, Clone, PartialEq)]
pub enum Pattern {
    Identifier(Identifier),
    Object(ObjectPattern),
    Array(ArrayPattern),
}

impl Pattern {
    /// The identifier this pattern binds to, if it is a plain identifier.
    #[must_use]
    pub fn as_identifier(&self) -> Option<Identifier> {
        match self {
            Pattern::Identifier(id) => Some(*id),
            _ => None,
        }
    }
}

/// An `ObjectBindingPattern`: `{ a, b: c, ...rest }`.
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectPattern {
    pub properties: Vec<ObjectPatternElement>,
    pub rest: Option<Identifier>,
}

/// One non-rest element of an [`ObjectPattern`].
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectPatternElement {
    pub key: PropertyKey,
    pub value: Pattern,
    pub default: Option<Expression>,
}

/// An `ArrayBindingPattern`: `[a, , b = 1, ...rest]`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ArrayPattern {
    pub elements: Vec<Option<ArrayPatternElement>>,
    pub rest: Option<Box<Pattern>>,
}

/// One non-hole, non-rest element of an [`ArrayPattern`].
#[derive(Debug, Clone, PartialEq)]
pub struct ArrayPatternElement {
    pub pattern: Pattern,
    pub default: Option<Expression>,
}

/// Collects the bound names (`BoundNames`) introduced by `pattern`, in
/// source order, appending them to `out`.
pub fn bound_names_of_pattern(pattern: &Pattern, out: &mut Vec<Sym>) {
    match pattern {
        Pattern::Identifier(id) => out.push(id.sym()),
        Pattern::Object(obj) => {
            for element in &obj.properties {
                bound_names_of_pattern(&element.value, out);
            }
            if let Some(rest) = obj.rest {
                out.push(rest.sym());
            }
        }
        Pattern::Array(arr) => {
            for element in arr.elements.iter().flatten() {
                bound_names_of_pattern(&element.pattern, out);
            }
            if let Some(rest) = &arr.rest {
                bound_names_of_pattern(rest, out);
            }
        }
    }
}
