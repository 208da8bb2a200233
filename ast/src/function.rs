//! Function and class node shapes, shared by declarations and expressions.

use crate::expression::{Expression, Identifier, PropertyKey};
use crate::pattern::Pattern;
use crate::statement_list::StatementList;

/// One entry of a `FormalParameterList`.
#[derive(Debug, Clone, PartialEq)]
pub struct FormalParameter {
    pub pattern: Pattern,
    pub default: Option<Expression>,
    pub is_rest: bool,
}

impl FormalParameter {
    /// True when no parameter in the list ahead of this one shares this
    /// invariant; used by `FunctionDeclarationInstantiation` (§4.8) to
    /// decide whether the parameter list is "simple" (bare identifiers, no
    /// defaults, no rest, no destructuring).
    #[must_use]
    pub fn is_simple(&self) -> bool {
        !self.is_rest && self.default.is_none() && matches!(self.pattern, Pattern::Identifier(_))
    }
}

/// A function's formal parameter list.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FormalParameterList {
    pub parameters: Vec<FormalParameter>,
}

impl FormalParameterList {
    #[must_use]
    pub fn is_simple(&self) -> bool {
        self.parameters.iter().all(FormalParameter::is_simple)
    }

    #[must_use]
    pub fn has_duplicates(&self) -> bool {
        let mut seen = Vec::new();
        for param in &self.parameters {
            let mut names = Vec::new();
            crate::pattern::bound_names_of_pattern(&param.pattern, &mut names);
            for name in names {
                if seen.contains(&name) {
                    return true;
                }
                seen.push(name);
            }
        }
        false
    }

    #[must_use]
    pub fn expected_argument_count(&self) -> usize {
        self.parameters
            .iter()
            .take_while(|p| !p.is_rest && p.default.is_none())
            .count()
    }
}

/// A `FunctionDeclaration` or `FunctionExpression`.
#[derive(Debug, Clone, PartialEq)]
pub struct Function {
    pub name: Option<Identifier>,
    pub parameters: FormalParameterList,
    pub body: StatementList,
    pub is_async: bool,
    pub is_generator: bool,
}

/// The body of an [`ArrowFunction`]: either a `ConciseBody` expression or a
/// full block.
#[derive(Debug, Clone, PartialEq)]
pub enum ArrowBody {
    Expression(Box<Expression>),
    Block(StatementList),
}

/// An `ArrowFunction`. Arrow functions have no `arguments` object, no
/// `prototype`, and lexically inherit `this`/`super`/`new.target` (§4.7).
#[derive(Debug, Clone, PartialEq)]
pub struct ArrowFunction {
    pub name: Option<Identifier>,
    pub parameters: FormalParameterList,
    pub body: ArrowBody,
    pub is_async: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MethodKind {
    Method,
    Get,
    Set,
}

/// One element of a `ClassBody`.
#[derive(Debug, Clone, PartialEq)]
pub enum ClassElement {
    Method {
        key: PropertyKey,
        function: Function,
        kind: MethodKind,
        is_static: bool,
    },
    Field {
        key: PropertyKey,
        value: Option<Expression>,
        is_static: bool,
    },
}

/// A `ClassDeclaration` or `ClassExpression`.
#[derive(Debug, Clone, PartialEq)]
pub struct Class {
    pub name: Option<Identifier>,
    pub super_class: Option<Expression>,
    pub elements: Vec<ClassElement>,
}
