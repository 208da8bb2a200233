//! Syntax-directed operations used by declaration instantiation (§4.8) and
//! early-error-style checks, implemented as plain recursive functions over
//! the AST rather than a generic visitor.

use ecma_interner::Sym;

use crate::declaration::Declaration;
use crate::expression::{AssignTarget, Expression, PropertyAccessField, PropertyAccessTarget, PropertyDefinition, PropertyKey};
use crate::statement::{ForInit, IterableLoopInitializer, Statement};
use crate::statement_list::{StatementList, StatementListItem};

/// `VarDeclaredNames` for a single statement list item, recursing into
/// nested statement bodies but never into nested function bodies (a
/// function body has its own, independent `VarDeclaredNames`).
pub fn var_declared_names_of_item(item: &StatementListItem, out: &mut Vec<Sym>) {
    match item {
        StatementListItem::Declaration(_) => {}
        StatementListItem::Statement(stmt) => var_declared_names_of_statement(stmt, out),
    }
}

fn var_declared_names_of_statement(stmt: &Statement, out: &mut Vec<Sym>) {
    match stmt {
        Statement::Var(list) => {
            for binding in &list.bindings {
                crate::pattern::bound_names_of_pattern(&binding.pattern, out);
            }
        }
        Statement::Block(block) => out.extend(block.0.var_declared_names()),
        Statement::If(if_stmt) => {
            var_declared_names_of_statement(&if_stmt.then, out);
            if let Some(else_) = &if_stmt.else_ {
                var_declared_names_of_statement(else_, out);
            }
        }
        Statement::While(w) => var_declared_names_of_statement(&w.body, out),
        Statement::DoWhile(d) => var_declared_names_of_statement(&d.body, out),
        Statement::For(f) => {
            if let Some(ForInit::Var(list)) = &f.init {
                for binding in &list.bindings {
                    crate::pattern::bound_names_of_pattern(&binding.pattern, out);
                }
            }
            var_declared_names_of_statement(&f.body, out);
        }
        Statement::ForIn(f) => {
            if let IterableLoopInitializer::Var(pattern) = &f.init {
                crate::pattern::bound_names_of_pattern(pattern, out);
            }
            var_declared_names_of_statement(&f.body, out);
        }
        Statement::ForOf(f) => {
            if let IterableLoopInitializer::Var(pattern) = &f.init {
                crate::pattern::bound_names_of_pattern(pattern, out);
            }
            var_declared_names_of_statement(&f.body, out);
        }
        Statement::With(w) => var_declared_names_of_statement(&w.body, out),
        Statement::Labelled(l) => var_declared_names_of_statement(&l.body, out),
        Statement::Switch(s) => {
            for case in &s.cases {
                out.extend(case.body.var_declared_names());
            }
        }
        Statement::Try(t) => {
            out.extend(t.block.0.var_declared_names());
            if let Some(catch) = &t.catch {
                out.extend(catch.block.0.var_declared_names());
            }
            if let Some(finally) = &t.finally {
                out.extend(finally.0.var_declared_names());
            }
        }
        Statement::Empty
        | Statement::Expression(_)
        | Statement::Continue(_)
        | Statement::Break(_)
        | Statement::Return(_)
        | Statement::Throw(_)
        | Statement::Debugger => {}
    }
}

/// `BoundNames` of a top-level declaration, or of a pattern standing in for
/// one (used on catch parameters and formal parameters).
#[must_use]
pub fn bound_names(decl: &Declaration) -> Vec<Sym> {
    let mut out = Vec::new();
    decl.bound_names(&mut out);
    out
}

/// `LexicallyDeclaredNames` of a statement list (delegates to the type, kept
/// here as a free function for symmetry with the other SDOs).
#[must_use]
pub fn lexically_declared_names(list: &StatementList) -> Vec<Sym> {
    list.lexically_declared_names()
}

/// A coarse `Contains`-style probe: does `expr` (or anything it contains,
/// not crossing into a nested function's own body) reference `this`,
/// `super`, `new.target`, `await`, or `yield`? The evaluator's function
/// instantiation uses this to decide whether a function needs a `this`
/// binding initialized and whether its body is parsed as a generator/async
/// context; arrow functions are transparent to it since they inherit these
/// from their enclosing scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ContainsFlags {
    pub this: bool,
    pub super_property: bool,
    pub new_target: bool,
    pub await_expr: bool,
    pub yield_expr: bool,
}

impl ContainsFlags {
    fn merge(&mut self, other: ContainsFlags) {
        self.this |= other.this;
        self.super_property |= other.super_property;
        self.new_target |= other.new_target;
        self.await_expr |= other.await_expr;
        self.yield_expr |= other.yield_expr;
    }
}

/// Computes [`ContainsFlags`] for an expression, not descending into
/// function/arrow/class bodies except for arrow function bodies, which are
/// lexically transparent to `this`/`super`/`new.target` (but not to
/// `await`/`yield`, which belong to the arrow's own async/generator status
/// — since this crate gives arrows no generator status, `yield`/`await`
/// inside one is attributed to the enclosing scope only when the arrow
/// itself is not async).
#[must_use]
pub fn contains_in_expression(expr: &Expression) -> ContainsFlags {
    let mut flags = ContainsFlags::default();
    walk_expression(expr, &mut flags);
    flags
}

fn walk_expression(expr: &Expression, flags: &mut ContainsFlags) {
    match expr {
        Expression::This => flags.this = true,
        Expression::NewTarget => flags.new_target = true,
        Expression::Identifier(_) | Expression::Literal(_) | Expression::Function(_) | Expression::Class(_) => {}
        Expression::ArrayLiteral(items) => {
            for item in items.iter().flatten() {
                walk_expression(item, flags);
            }
        }
        Expression::ObjectLiteral(props) => {
            for prop in props {
                match prop {
                    PropertyDefinition::IdentifierRef(_) => {}
                    PropertyDefinition::Property(key, value) => {
                        walk_property_key(key, flags);
                        walk_expression(value, flags);
                    }
                    PropertyDefinition::MethodDefinition(key, _, _) => walk_property_key(key, flags),
                    PropertyDefinition::SpreadObject(value) => walk_expression(value, flags),
                }
            }
        }
        Expression::ArrowFunction(arrow) => match &arrow.body {
            crate::function::ArrowBody::Expression(inner) => walk_expression(inner, flags),
            crate::function::ArrowBody::Block(_) => {}
        },
        Expression::TemplateLiteral(tpl) => {
            for expr in &tpl.exprs {
                walk_expression(expr, flags);
            }
        }
        Expression::PropertyAccess(access) => {
            match access.target.as_ref() {
                PropertyAccessTarget::Expression(target) => walk_expression(target, flags),
                PropertyAccessTarget::Super => flags.super_property = true,
            }
            if let PropertyAccessField::Expr(field) = &access.field {
                walk_expression(field, flags);
            }
        }
        Expression::New(new_expr) => {
            walk_expression(&new_expr.callee, flags);
            for arg in &new_expr.args {
                walk_expression(arg, flags);
            }
        }
        Expression::Call(call) => {
            walk_expression(&call.callee, flags);
            for arg in &call.args {
                walk_expression(arg, flags);
            }
        }
        Expression::Assign(assign) => {
            walk_assign_target(&assign.target, flags);
            walk_expression(&assign.value, flags);
        }
        Expression::Binary(bin) => {
            walk_expression(&bin.left, flags);
            walk_expression(&bin.right, flags);
        }
        Expression::Logical(log) => {
            walk_expression(&log.left, flags);
            walk_expression(&log.right, flags);
        }
        Expression::Unary(unary) => walk_expression(&unary.expr, flags),
        Expression::Update(update) => walk_assign_target(&update.target, flags),
        Expression::Conditional(cond) => {
            walk_expression(&cond.cond, flags);
            walk_expression(&cond.then, flags);
            walk_expression(&cond.else_, flags);
        }
        Expression::Spread(inner) | Expression::Parenthesized(inner) => walk_expression(inner, flags),
        Expression::Sequence(exprs) => {
            for expr in exprs {
                walk_expression(expr, flags);
            }
        }
        Expression::Await(inner) => {
            flags.await_expr = true;
            walk_expression(inner, flags);
        }
        Expression::Yield { arg, .. } => {
            flags.yield_expr = true;
            if let Some(arg) = arg {
                walk_expression(arg, flags);
            }
        }
    }
}

fn walk_property_key(key: &PropertyKey, flags: &mut ContainsFlags) {
    if let PropertyKey::Computed(expr) = key {
        walk_expression(expr, flags);
    }
}

fn walk_assign_target(target: &AssignTarget, flags: &mut ContainsFlags) {
    match target {
        AssignTarget::Identifier(_) | AssignTarget::Pattern(_) => {}
        AssignTarget::Access(access) => {
            let mut tmp = ContainsFlags::default();
            walk_expression(&Expression::PropertyAccess(access.clone()), &mut tmp);
            flags.merge(tmp);
        }
    }
}
