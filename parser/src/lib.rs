//! Lexer and parser producing [`ecma_ast`] trees.
//!
//! This is the default pluggable parser named in the external-interfaces
//! design (§6 "AST" — "any ES-aware parser may produce the AST"); nothing
//! downstream depends on this crate beyond the `Script` it returns.

mod error;
mod lexer;
mod parser;

pub use error::{ParseError, ParseResult};
pub use lexer::{Lexer, Token, TokenKind};
pub use parser::parse_script;

#[cfg(test)]
mod tests {
    use super::*;
    use ecma_ast::{Statement, StatementListItem};
    use ecma_interner::Interner;

    fn parse(src: &str) -> ecma_ast::Script {
        let mut interner = Interner::new();
        parse_script(src, &mut interner).unwrap_or_else(|e| panic!("parse error in {src:?}: {e}"))
    }

    #[test]
    fn parses_lexical_and_var_declarations() {
        let script = parse("let a = 1; const b = 2; var c;");
        assert_eq!(script.body().items().len(), 3);
    }

    #[test]
    fn parses_function_declaration_and_call() {
        let script = parse("function add(a, b) { return a + b; } add(1, 2);");
        assert_eq!(script.body().items().len(), 2);
    }

    #[test]
    fn parses_arrow_function_with_block_body() {
        let script = parse("const f = (a, b) => { return a + b; };");
        assert_eq!(script.body().items().len(), 1);
    }

    #[test]
    fn parses_arrow_function_with_expression_body_single_param() {
        let script = parse("const double = x => x * 2;");
        assert_eq!(script.body().items().len(), 1);
    }

    #[test]
    fn parses_if_while_for_statements() {
        let script = parse("if (a) { b(); } else { c(); } while (a) { a = a - 1; } for (let i = 0; i < 10; i++) { sum(i); }");
        assert_eq!(script.body().items().len(), 3);
    }

    #[test]
    fn parses_for_of_and_for_in() {
        let script = parse("for (const x of xs) { use(x); } for (const k in obj) { use(k); }");
        assert_eq!(script.body().items().len(), 2);
    }

    #[test]
    fn parses_try_catch_finally() {
        let script = parse("try { risky(); } catch (e) { handle(e); } finally { cleanup(); }");
        assert_eq!(script.body().items().len(), 1);
    }

    #[test]
    fn parses_classes_with_methods_and_fields() {
        let script = parse("class Point { constructor(x, y) { this.x = x; this.y = y; } static origin() { return new Point(0, 0); } }");
        assert_eq!(script.body().items().len(), 1);
    }

    #[test]
    fn parses_template_literals_with_interpolation() {
        let script = parse("const s = `hello ${name}!`;");
        assert_eq!(script.body().items().len(), 1);
    }

    #[test]
    fn parses_destructuring_bindings() {
        let script = parse("const { a, b: c, ...rest } = obj; const [x, , y] = arr;");
        assert_eq!(script.body().items().len(), 2);
    }

    #[test]
    fn parses_optional_chaining_and_nullish_coalescing() {
        let script = parse("const v = a?.b?.[0] ?? fallback;");
        assert_eq!(script.body().items().len(), 1);
    }

    #[test]
    fn parses_labelled_break_and_continue() {
        let script = parse("outer: for (let i = 0; i < 1; i++) { if (i) { break outer; } continue outer; }");
        match &script.body().items()[0] {
            StatementListItem::Statement(Statement::Labelled(_)) => {}
            other => panic!("expected labelled statement, got {other:?}"),
        }
    }

    #[test]
    fn respects_automatic_semicolon_insertion() {
        let script = parse("let a = 1\nlet b = 2\n");
        assert_eq!(script.body().items().len(), 2);
    }

    #[test]
    fn marks_use_strict_directive_prologue() {
        let script = parse("\"use strict\";\nlet a = 1;");
        assert!(script.strict());
    }

    #[test]
    fn parses_async_await_and_generator_functions() {
        let script = parse("async function fetch() { await pending(); } function* gen() { yield 1; yield* more(); }");
        assert_eq!(script.body().items().len(), 2);
    }
}
