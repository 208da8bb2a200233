//! Abstract syntax tree consumed by the evaluator.
//!
//! This crate defines Parse Node shapes only — no lexer, no parser. Any
//! ES-aware parser may produce this tree (§6 "AST"); [`ecma_parser`] is the
//! default one.
//!
//! Module shape deliberately trims two things boa's `boa_ast` carries:
//! modules (`import`/`export`) and the Temporal proposal's node types,
//! both out of scope (module loader resolution and ECMA-402/Stage-3
//! proposals are explicit non-goals). Strings are plain Rust `String`s
//! resolved through [`ecma_interner`], not UTF-16 code-unit arrays.

pub mod declaration;
pub mod expression;
pub mod function;
pub mod keyword;
pub mod operations;
pub mod pattern;
pub mod position;
pub mod punctuator;
pub mod statement;
pub mod statement_list;

pub use declaration::{Binding, DeclKind, Declaration, LexicalDeclaration, VariableList};
pub use expression::{Expression, Identifier, Literal, PropertyKey};
pub use function::{ArrowFunction, Class, FormalParameter, FormalParameterList, Function};
pub use keyword::Keyword;
pub use pattern::{ArrayPattern, ObjectPattern, Pattern};
pub use position::{Position, Span};
pub use punctuator::Punctuator;
pub use statement::Statement;
pub use statement_list::{StatementList, StatementListItem};

/// A parsed program: a script's top-level statement list plus whether its
/// own directive prologue (or an enclosing one) makes it strict (§3.10
/// "Script Record").
#[derive(Debug, Clone, PartialEq)]
pub struct Script {
    body: StatementList,
}

impl Script {
    #[must_use]
    pub fn new(body: StatementList) -> Self {
        Script { body }
    }

    #[must_use]
    pub fn body(&self) -> &StatementList {
        &self.body
    }

    #[must_use]
    pub fn strict(&self) -> bool {
        self.body.strict()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ecma_interner::Interner;

    #[test]
    fn bound_names_collects_destructured_identifiers() {
        let mut interner = Interner::new();
        let a = interner.get_or_intern("a");
        let b = interner.get_or_intern("b");

        let pattern = Pattern::Array(pattern::ArrayPattern {
            elements: vec![
                Some(pattern::ArrayPatternElement {
                    pattern: Pattern::Identifier(Identifier::new(a)),
                    default: None,
                }),
                None,
            ],
            rest: Some(Box::new(Pattern::Identifier(Identifier::new(b)))),
        });

        let mut out = Vec::new();
        pattern::bound_names_of_pattern(&pattern, &mut out);
        assert_eq!(out, vec![a, b]);
    }

    #[test]
    fn var_declared_names_recurse_through_nested_blocks_not_functions() {
        let mut interner = Interner::new();
        let x = interner.get_or_intern("x");
        let y = interner.get_or_intern("y");

        let inner_var = StatementListItem::Statement(Statement::Var(VariableList {
            bindings: vec![Binding {
                pattern: Pattern::Identifier(Identifier::new(x)),
                init: None,
            }],
        }));
        let block = Statement::Block(statement::Block(StatementList::new(vec![inner_var])));

        let nested_fn_var = StatementListItem::Statement(Statement::Var(VariableList {
            bindings: vec![Binding {
                pattern: Pattern::Identifier(Identifier::new(y)),
                init: None,
            }],
        }));
        let inner_function = Function {
            name: None,
            parameters: function::FormalParameterList::default(),
            body: StatementList::new(vec![nested_fn_var]),
            is_async: false,
            is_generator: false,
        };
        let fn_decl = StatementListItem::Declaration(Declaration::Function(inner_function));

        let script = StatementList::new(vec![StatementListItem::Statement(block), fn_decl]);
        assert_eq!(script.var_declared_names(), vec![x]);
    }

    #[test]
    fn contains_detects_this_but_not_through_arrow_block_body() {
        let expr = Expression::This;
        let flags = operations::contains_in_expression(&expr);
        assert!(flags.this);
        assert!(!flags.new_target);
    }
}
