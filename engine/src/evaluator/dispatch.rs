//! The pluggable half of syntax-directed dispatch (§4.3): "for each
//! syntax operation, a table maps AST node kind to an ordered list of
//! handlers; a handler returns a result or NOT_APPLICABLE, which tries
//! the next one." [`evaluate_expression`](crate::evaluator::expression::evaluate_expression)
//! and [`execute_statement`](crate::evaluator::statement) consult this
//! table first; a plug-in installed via [`crate::builtins::BuiltinPlugin`]
//! can register a handler here without ever touching either function's
//! own match arms, which stay as the final, always-present handler run
//! when every registered handler returns NOT_APPLICABLE.

use rustc_hash::FxHashMap;

use ecma_ast::expression::Expression;
use ecma_ast::statement::Statement;

use crate::completion::Completion;
use crate::context::Context;
use crate::error::JsResult;
use crate::value::JsValue;

/// Which top-level `Expression` variant a node is (§4.3's AST node kind,
/// specialized to expressions). Kept as a small `Copy` enum rather than a
/// string or a discriminant integer so a plug-in can match on it exhaustively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExprKind {
    This,
    NewTarget,
    Identifier,
    Literal,
    ArrayLiteral,
    ObjectLiteral,
    Function,
    ArrowFunction,
    Class,
    TemplateLiteral,
    PropertyAccess,
    New,
    Call,
    Assign,
    Binary,
    Logical,
    Unary,
    Update,
    Conditional,
    Spread,
    Sequence,
    Parenthesized,
    Await,
    Yield,
}

impl ExprKind {
    #[must_use]
    pub fn of(expr: &Expression) -> Self {
        match expr {
            Expression::This => ExprKind::This,
            Expression::NewTarget => ExprKind::NewTarget,
            Expression::Identifier(_) => ExprKind::Identifier,
            Expression::Literal(_) => ExprKind::Literal,
            Expression::ArrayLiteral(_) => ExprKind::ArrayLiteral,
            Expression::ObjectLiteral(_) => ExprKind::ObjectLiteral,
            Expression::Function(_) => ExprKind::Function,
            Expression::ArrowFunction(_) => ExprKind::ArrowFunction,
            Expression::Class(_) => ExprKind::Class,
            Expression::TemplateLiteral(_) => ExprKind::TemplateLiteral,
            Expression::PropertyAccess(_) => ExprKind::PropertyAccess,
            Expression::New(_) => ExprKind::New,
            Expression::Call(_) => ExprKind::Call,
            Expression::Assign(_) => ExprKind::Assign,
            Expression::Binary(_) => ExprKind::Binary,
            Expression::Logical(_) => ExprKind::Logical,
            Expression::Unary(_) => ExprKind::Unary,
            Expression::Update(_) => ExprKind::Update,
            Expression::Conditional(_) => ExprKind::Conditional,
            Expression::Spread(_) => ExprKind::Spread,
            Expression::Sequence(_) => ExprKind::Sequence,
            Expression::Parenthesized(_) => ExprKind::Parenthesized,
            Expression::Await(_) => ExprKind::Await,
            Expression::Yield { .. } => ExprKind::Yield,
        }
    }
}

/// A handler for the `Evaluation` syntax operation over expressions.
/// `Ok(None)` is the spec's NOT_APPLICABLE sentinel; `Ok(Some(v))`/
/// `Err(e)` are this handler's own result.
pub type ExprHandler = fn(&mut Context, &Expression) -> JsResult<Option<JsValue>>;

/// Which top-level `Statement` variant a node is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StmtKind {
    Block,
    Var,
    Empty,
    Expression,
    If,
    While,
    DoWhile,
    For,
    ForIn,
    ForOf,
    Continue,
    Break,
    Return,
    With,
    Labelled,
    Switch,
    Try,
    Throw,
    Debugger,
}

impl StmtKind {
    #[must_use]
    pub fn of(stmt: &Statement) -> Self {
        match stmt {
            Statement::Block(_) => StmtKind::Block,
            Statement::Var(_) => StmtKind::Var,
            Statement::Empty => StmtKind::Empty,
            Statement::Expression(_) => StmtKind::Expression,
            Statement::If(_) => StmtKind::If,
            Statement::While(_) => StmtKind::While,
            Statement::DoWhile(_) => StmtKind::DoWhile,
            Statement::For(_) => StmtKind::For,
            Statement::ForIn(_) => StmtKind::ForIn,
            Statement::ForOf(_) => StmtKind::ForOf,
            Statement::Continue(_) => StmtKind::Continue,
            Statement::Break(_) => StmtKind::Break,
            Statement::Return(_) => StmtKind::Return,
            Statement::With(_) => StmtKind::With,
            Statement::Labelled(_) => StmtKind::Labelled,
            Statement::Switch(_) => StmtKind::Switch,
            Statement::Try(_) => StmtKind::Try,
            Statement::Throw(_) => StmtKind::Throw,
            Statement::Debugger => StmtKind::Debugger,
        }
    }
}

/// A handler for the `Evaluation` syntax operation over statements.
/// `None` is NOT_APPLICABLE; `Some(completion)` is this handler's result
/// (which may itself be an abrupt completion, including `Throw`).
pub type StmtHandler = fn(&mut Context, &Statement) -> Option<Completion>;

/// `(syntax_op, node_kind) → ordered handler list` (§4.3). One table per
/// syntax operation this evaluator actually has pluggable handlers for —
/// `Evaluation` over expressions and `Evaluation` over statements — rather
/// than a single table keyed by `(SyntaxOp, AnyNodeKind)`, since there is
/// no second syntax operation here for a `SyntaxOp` axis to distinguish.
pub struct HandlerTable<K, H> {
    handlers: FxHashMap<K, Vec<H>>,
}

impl<K, H> Default for HandlerTable<K, H> {
    fn default() -> Self {
        HandlerTable { handlers: FxHashMap::default() }
    }
}

impl<K: std::hash::Hash + Eq, H: Copy> HandlerTable<K, H> {
    /// Registers `handler` ahead of every handler already registered for
    /// `kind`, so a plug-in installed later gets first refusal — matching
    /// `Context::install`'s own dependency-ordered loading, where a
    /// later-installed plug-in is the one most likely to be specializing
    /// behaviour an earlier one set up.
    pub fn register(&mut self, kind: K, handler: H) {
        self.handlers.entry(kind).or_default().insert(0, handler);
    }

    #[must_use]
    pub fn handlers_for(&self, kind: &K) -> &[H] {
        self.handlers.get(kind).map(Vec::as_slice).unwrap_or(&[])
    }
}
