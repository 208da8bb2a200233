//! `StatementList`: the body of a script, block, or function.

use ecma_interner::Sym;

use crate::declaration::Declaration;
use crate::statement::Statement;

/// One item of a `StatementList`.
#[derive(Debug, Clone, PartialEq)]
pub enum StatementListItem {
    Statement(Statement),
    Declaration(Declaration),
}

/// A sequence of statements/declarations, e.g. a script body, function
/// body, or block body.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StatementList {
    items: Vec<StatementListItem>,
    strict: bool,
}

impl StatementList {
    #[must_use]
    pub fn new(items: Vec<StatementListItem>) -> Self {
        let strict = Self::directive_prologue_is_strict(&items);
        StatementList { items, strict }
    }

    #[must_use]
    pub fn items(&self) -> &[StatementListItem] {
        &self.items
    }

    /// Whether this statement list's directive prologue contains
    /// `"use strict"`.
    #[must_use]
    pub fn strict(&self) -> bool {
        self.strict
    }

    fn directive_prologue_is_strict(items: &[StatementListItem]) -> bool {
        for item in items {
            match item {
                StatementListItem::Statement(Statement::Expression(
                    crate::expression::Expression::Literal(crate::expression::Literal::Str(_)),
                )) => {
                    // A directive; whether it is specifically "use strict"
                    // is resolved by the parser against the interner before
                    // this list is built, recorded via `with_strict`.
                    continue;
                }
                _ => break,
            }
        }
        false
    }

    /// Overrides the strict-mode flag; used by the parser once it has
    /// resolved the directive prologue's interned strings against
    /// `"use strict"`, and by function bodies that inherit strictness from
    /// an enclosing scope.
    #[must_use]
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// `LexicallyDeclaredNames` of this list (§4.1): names bound by `let`,
    /// `const`, or `class` directly in this list (not nested blocks).
    #[must_use]
    pub fn lexically_declared_names(&self) -> Vec<Sym> {
        let mut out = Vec::new();
        for item in &self.items {
            if let StatementListItem::Declaration(decl) = item {
                if !decl.is_hoistable() {
                    decl.bound_names(&mut out);
                } else {
                    // FunctionDeclarations are var-like at the top level of
                    // a script/function body; block-scoped contexts treat
                    // them as lexical. The evaluator's declaration
                    // instantiation distinguishes these by the kind of
                    // environment it is instantiating into.
                    decl.bound_names(&mut out);
                }
            }
        }
        out
    }

    /// `VarDeclaredNames` of this list, recursing into nested statements
    /// (`if`/`while`/`for`/`try`/... bodies) but not into nested function
    /// bodies.
    #[must_use]
    pub fn var_declared_names(&self) -> Vec<Sym> {
        let mut out = Vec::new();
        for item in &self.items {
            crate::operations::var_declared_names_of_item(item, &mut out);
        }
        out
    }

    /// `FunctionDeclaration`s directly in this list, in source order, used
    /// by `GlobalDeclarationInstantiation`/`FunctionDeclarationInstantiation`
    /// to pre-bind hoisted functions ahead of other bindings.
    pub fn function_declarations(&self) -> impl Iterator<Item = &crate::function::Function> {
        self.items.iter().filter_map(|item| match item {
            StatementListItem::Declaration(Declaration::Function(f)) => Some(f),
            _ => None,
        })
    }
}
