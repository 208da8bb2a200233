//! Statement execution (§4.1): "statements produce Completion Records,
//! not values — `Normal` for fall-through, `Break`/`Continue` carrying an
//! optional target label, `Return`/`Throw` unwinding all the way to the
//! nearest function call or script boundary."
//!
//! Block scoping is done by swapping `Context::lexical_environment` for
//! the statement list's duration and restoring it afterward, rather than
//! by pushing a whole new execution context — only function/constructor
//! calls get their own frame on the execution context stack.

use ecma_interner::Sym;

use ecma_ast::declaration::{Declaration, DeclKind, VariableList};
use ecma_ast::statement::{
    Catch, DoWhile, For, ForInit, ForInLoop, ForOfLoop, IterableLoopInitializer, If, Labelled, Statement, Switch, Try, While, With,
};
use ecma_ast::statement_list::{StatementList, StatementListItem};

use crate::completion::{propagate, try_js, Completion};
use crate::context::Context;
use crate::environment::{BindingKind, Environment};
use crate::error::{JsError, JsResult};
use crate::evaluator::expression::evaluate_expression;
use crate::value::JsValue;

/// Executes a statement list against an environment already installed as
/// the current lexical (and, for function/script bodies, variable)
/// environment — declaration instantiation for `body` is the caller's
/// job, not this function's.
pub fn execute_statement_list(context: &mut Context, body: &StatementList, env: &Environment) -> Completion {
    let mut last = JsValue::undefined();
    for item in body.items() {
        last = match item {
            StatementListItem::Statement(stmt) => propagate!(execute_statement(context, stmt)),
            StatementListItem::Declaration(decl) => propagate!(execute_declaration(context, decl, env)),
        };
    }
    Completion::Normal(last)
}

fn execute_declaration(context: &mut Context, decl: &Declaration, env: &Environment) -> Completion {
    match decl {
        // Function declarations are bound eagerly during declaration
        // instantiation; reaching one during ordinary execution is a no-op.
        Declaration::Function(_) => Completion::Normal(JsValue::undefined()),
        Declaration::Lexical(lex) => execute_lexical_declaration(context, lex, env),
        Declaration::Class(class) => {
            let closure = context.lexical_environment();
            let ctor = match crate::evaluator::class::evaluate_class_definition(context, class, &closure) {
                Ok(c) => c,
                Err(e) => return Completion::Throw(e),
            };
            if let Some(name) = class.name {
                if let Err(e) = env.initialize_binding(name.sym(), JsValue::Object(ctor), context) {
                    return Completion::Throw(e);
                }
            }
            Completion::Normal(JsValue::undefined())
        }
    }
}

fn execute_lexical_declaration(context: &mut Context, lex: &ecma_ast::declaration::LexicalDeclaration, env: &Environment) -> Completion {
    let kind = match lex.kind {
        DeclKind::Let => BindingKind::MutableLexical,
        DeclKind::Const => BindingKind::Immutable,
    };
    for binding in &lex.bindings {
        let value = match &binding.init {
            Some(expr) => try_js!(evaluate_expression(context, expr)),
            None => JsValue::undefined(),
        };
        if let Err(e) = crate::binding::declare_and_initialize(context, &binding.pattern, value, env, kind) {
            return Completion::Throw(e);
        }
    }
    Completion::Normal(JsValue::undefined())
}

/// `Evaluation` over statements (§4.3): the statement-side counterpart of
/// `evaluator::expression::evaluate_expression`'s dispatch — tries any
/// plug-in-registered handler for this node's kind before falling
/// through to `execute_statement_core`'s own match arm.
fn execute_statement(context: &mut Context, stmt: &Statement) -> Completion {
    let kind = crate::evaluator::dispatch::StmtKind::of(stmt);
    for handler in context.statement_handlers_for(kind) {
        if let Some(completion) = handler(context, stmt) {
            return completion;
        }
    }
    execute_statement_core(context, stmt)
}

fn execute_statement_core(context: &mut Context, stmt: &Statement) -> Completion {
    match stmt {
        Statement::Block(block) => execute_block(context, &block.0),
        Statement::Var(list) => execute_var(context, list),
        Statement::Empty | Statement::Debugger => Completion::Normal(JsValue::undefined()),
        Statement::Expression(expr) => crate::completion::from_js_result(evaluate_expression(context, expr)),
        Statement::If(if_stmt) => execute_if(context, if_stmt),
        Statement::While(w) => execute_while(context, w, None),
        Statement::DoWhile(w) => execute_do_while(context, w, None),
        Statement::For(f) => execute_for(context, f, None),
        Statement::ForIn(f) => execute_for_in(context, f, None),
        Statement::ForOf(f) => execute_for_of(context, f, None),
        Statement::Continue(label) => Completion::Continue(*label),
        Statement::Break(label) => Completion::Break(*label),
        Statement::Return(expr) => {
            let value = match expr {
                Some(expr) => try_js!(evaluate_expression(context, expr)),
                None => JsValue::undefined(),
            };
            Completion::Return(value)
        }
        Statement::With(with_stmt) => execute_with(context, with_stmt),
        Statement::Labelled(labelled) => execute_labelled(context, labelled),
        Statement::Switch(switch) => execute_switch(context, switch),
        Statement::Try(try_stmt) => execute_try(context, try_stmt),
        Statement::Throw(expr) => {
            let value = try_js!(evaluate_expression(context, expr));
            Completion::Throw(JsError::from_value(value))
        }
    }
}

/// Runs a loop body once and interprets the resulting completion against
/// the loop's own label: `Continue`/`Break` with no label, or one
/// matching `label`, are handled here; everything else (an outer label,
/// `Return`, `Throw`) propagates to the caller via `ControlFlow::Break`.
enum LoopStep {
    Again,
    Done(Completion),
    Propagate(Completion),
}

fn loop_step(label: Option<Sym>, result: Completion) -> LoopStep {
    match result {
        Completion::Normal(_) => LoopStep::Again,
        Completion::Continue(None) => LoopStep::Again,
        Completion::Continue(Some(lbl)) if Some(lbl) == label => LoopStep::Again,
        Completion::Break(None) => LoopStep::Done(Completion::Normal(JsValue::undefined())),
        Completion::Break(Some(lbl)) if Some(lbl) == label => LoopStep::Done(Completion::Normal(JsValue::undefined())),
        other => LoopStep::Propagate(other),
    }
}

fn execute_block(context: &mut Context, body: &StatementList) -> Completion {
    let outer = context.lexical_environment();
    let block_env = Environment::declarative(Some(outer.clone()));
    if let Err(e) = crate::declaration_instantiation::instantiate_var_and_lexical_declarations(context, body, &block_env, false) {
        return Completion::Throw(e);
    }
    context.set_lexical_environment(block_env.clone());
    let result = execute_statement_list(context, body, &block_env);
    context.set_lexical_environment(outer);
    result
}

fn execute_var(context: &mut Context, list: &VariableList) -> Completion {
    for binding in &list.bindings {
        if let Some(init) = &binding.init {
            let value = try_js!(evaluate_expression(context, init));
            if let Err(e) = crate::binding::assign_pattern(context, &binding.pattern, value) {
                return Completion::Throw(e);
            }
        }
    }
    Completion::Normal(JsValue::undefined())
}

fn execute_if(context: &mut Context, if_stmt: &If) -> Completion {
    let test = try_js!(evaluate_expression(context, &if_stmt.cond));
    if test.to_boolean() {
        execute_statement(context, &if_stmt.then)
    } else if let Some(else_) = &if_stmt.else_ {
        execute_statement(context, else_)
    } else {
        Completion::Normal(JsValue::undefined())
    }
}

fn execute_with(context: &mut Context, with_stmt: &With) -> Completion {
    let object = try_js!(evaluate_expression(context, &with_stmt.object));
    let obj = try_js!(object.to_object(context));
    let outer = context.lexical_environment();
    let with_env = Environment::object(Some(outer.clone()), obj, true);
    context.set_lexical_environment(with_env);
    let result = execute_statement(context, &with_stmt.body);
    context.set_lexical_environment(outer);
    result
}

fn execute_while(context: &mut Context, while_stmt: &While, label: Option<Sym>) -> Completion {
    loop {
        let test = try_js!(evaluate_expression(context, &while_stmt.cond));
        if !test.to_boolean() {
            return Completion::Normal(JsValue::undefined());
        }
        match loop_step(label, execute_statement(context, &while_stmt.body)) {
            LoopStep::Again => {}
            LoopStep::Done(c) | LoopStep::Propagate(c) => return c,
        }
    }
}

fn execute_do_while(context: &mut Context, stmt: &DoWhile, label: Option<Sym>) -> Completion {
    loop {
        match loop_step(label, execute_statement(context, &stmt.body)) {
            LoopStep::Again => {}
            LoopStep::Done(c) | LoopStep::Propagate(c) => return c,
        }
        let test = try_js!(evaluate_expression(context, &stmt.cond));
        if !test.to_boolean() {
            return Completion::Normal(JsValue::undefined());
        }
    }
}

/// `ForBodyEvaluation`'s `CreatePerIterationEnvironment`: each `let`-bound
/// name in the loop head gets a fresh environment per pass, seeded from
/// the previous pass's value, so a closure created in iteration N keeps
/// observing its own snapshot after the loop ends rather than whatever
/// the final iteration left behind.
fn create_per_iteration_environment(context: &mut Context, outer: &Environment, names: &[Sym], last_env: &Environment) -> JsResult<Environment> {
    let new_env = Environment::declarative(Some(outer.clone()));
    for &name in names {
        let value = last_env.get_binding_value(name, context)?;
        new_env.create_binding(name, BindingKind::MutableLexical, context);
        new_env.initialize_binding(name, value, context)?;
    }
    Ok(new_env)
}

/// The names `CreatePerIterationEnvironment` copies forward: the bound
/// names of a `let` loop head. `const` and `var` heads don't get a fresh
/// binding per iteration — `const` can't be reassigned, so every closure
/// sharing the one binding is unobservable, and `var` isn't scoped to the
/// loop at all.
fn per_iteration_binding_names(init: Option<&ForInit>) -> Vec<Sym> {
    let mut names = Vec::new();
    if let Some(ForInit::VarDecl(Declaration::Lexical(lex))) = init {
        if lex.kind == DeclKind::Let {
            for binding in &lex.bindings {
                ecma_ast::pattern::bound_names_of_pattern(&binding.pattern, &mut names);
            }
        }
    }
    names
}

/// `ForBodyEvaluation`: runs the loop head's init, then tests/bodies/steps
/// against a lexical environment refreshed every iteration for any
/// `let`-bound loop variables (see `create_per_iteration_environment`).
fn execute_for(context: &mut Context, for_stmt: &For, label: Option<Sym>) -> Completion {
    let outer = context.lexical_environment();
    let mut loop_env = Environment::declarative(Some(outer.clone()));
    context.set_lexical_environment(loop_env.clone());
    let init_result = run_for_init(context, for_stmt.init.as_ref(), &loop_env);
    if let Err(e) = init_result {
        context.set_lexical_environment(outer);
        return Completion::Throw(e);
    }
    let per_iteration_names = per_iteration_binding_names(for_stmt.init.as_ref());
    if !per_iteration_names.is_empty() {
        loop_env = match create_per_iteration_environment(context, &outer, &per_iteration_names, &loop_env) {
            Ok(env) => env,
            Err(e) => {
                context.set_lexical_environment(outer);
                return Completion::Throw(e);
            }
        };
        context.set_lexical_environment(loop_env.clone());
    }
    let result = loop {
        if let Some(cond) = &for_stmt.cond {
            match evaluate_expression(context, cond) {
                Ok(v) if !v.to_boolean() => break Completion::Normal(JsValue::undefined()),
                Ok(_) => {}
                Err(e) => break Completion::Throw(e),
            }
        }
        match loop_step(label, execute_statement(context, &for_stmt.body)) {
            LoopStep::Again => {}
            LoopStep::Done(c) | LoopStep::Propagate(c) => break c,
        }
        if !per_iteration_names.is_empty() {
            loop_env = match create_per_iteration_environment(context, &outer, &per_iteration_names, &loop_env) {
                Ok(env) => env,
                Err(e) => break Completion::Throw(e),
            };
            context.set_lexical_environment(loop_env.clone());
        }
        if let Some(step) = &for_stmt.step {
            if let Err(e) = evaluate_expression(context, step) {
                break Completion::Throw(e);
            }
        }
    };
    context.set_lexical_environment(outer);
    result
}

fn run_for_init(context: &mut Context, init: Option<&ForInit>, loop_env: &Environment) -> crate::error::JsResult<()> {
    match init {
        None => Ok(()),
        Some(ForInit::Expression(expr)) => evaluate_expression(context, expr).map(|_| ()),
        Some(ForInit::Var(list)) => {
            for binding in &list.bindings {
                let value = match &binding.init {
                    Some(expr) => evaluate_expression(context, expr)?,
                    None => JsValue::undefined(),
                };
                crate::binding::assign_pattern(context, &binding.pattern, value)?;
            }
            Ok(())
        }
        Some(ForInit::VarDecl(Declaration::Lexical(lex))) => {
            let kind = match lex.kind {
                DeclKind::Let => BindingKind::MutableLexical,
                DeclKind::Const => BindingKind::Immutable,
            };
            for binding in &lex.bindings {
                let value = match &binding.init {
                    Some(expr) => evaluate_expression(context, expr)?,
                    None => JsValue::undefined(),
                };
                crate::binding::declare_and_initialize(context, &binding.pattern, value, loop_env, kind)?;
            }
            Ok(())
        }
        // The grammar never produces a function/class declaration in a
        // `for`-loop head; `ForInit::VarDecl` exists only for `let`/`const`.
        Some(ForInit::VarDecl(_)) => Ok(()),
    }
}

fn bind_for_loop_head(context: &mut Context, init: &IterableLoopInitializer, value: JsValue, env: &Environment) -> crate::error::JsResult<()> {
    match init {
        IterableLoopInitializer::Var(pattern) => crate::binding::declare_and_initialize(context, pattern, value, env, BindingKind::Mutable),
        IterableLoopInitializer::Let(pattern) => crate::binding::declare_and_initialize(context, pattern, value, env, BindingKind::MutableLexical),
        IterableLoopInitializer::Const(pattern) => crate::binding::declare_and_initialize(context, pattern, value, env, BindingKind::Immutable),
        IterableLoopInitializer::Assign(target) => crate::evaluator::expression::assign_to_target(context, target, value),
    }
}

fn execute_for_in(context: &mut Context, for_in: &ForInLoop, label: Option<Sym>) -> Completion {
    let target = try_js!(evaluate_expression(context, &for_in.target));
    if target.is_nullish() {
        return Completion::Normal(JsValue::undefined());
    }
    let obj = try_js!(target.to_object(context));
    for key in crate::iteration::enumerable_keys(&obj) {
        let outer = context.lexical_environment();
        let iter_env = Environment::declarative(Some(outer.clone()));
        context.set_lexical_environment(iter_env.clone());
        let value = JsValue::String(crate::string::JsString::new(key.to_string()));
        let bind_result = bind_for_loop_head(context, &for_in.init, value, &iter_env);
        if let Err(e) = bind_result {
            context.set_lexical_environment(outer);
            return Completion::Throw(e);
        }
        let body_result = execute_statement(context, &for_in.body);
        context.set_lexical_environment(outer);
        match loop_step(label, body_result) {
            LoopStep::Again => {}
            LoopStep::Done(c) | LoopStep::Propagate(c) => return c,
        }
    }
    Completion::Normal(JsValue::undefined())
}

fn execute_for_of(context: &mut Context, for_of: &ForOfLoop, label: Option<Sym>) -> Completion {
    let target = try_js!(evaluate_expression(context, &for_of.target));
    let mut iter = try_js!(crate::iteration::get_iterator(context, &target));
    loop {
        let item = match crate::iteration::iterator_step(context, &mut iter) {
            Ok(Some(v)) => v,
            Ok(None) => return Completion::Normal(JsValue::undefined()),
            Err(e) => return Completion::Throw(e),
        };
        let outer = context.lexical_environment();
        let iter_env = Environment::declarative(Some(outer.clone()));
        context.set_lexical_environment(iter_env.clone());
        let bind_result = bind_for_loop_head(context, &for_of.init, item, &iter_env);
        let body_result = match bind_result {
            Ok(()) => execute_statement(context, &for_of.body),
            Err(e) => Completion::Throw(e),
        };
        context.set_lexical_environment(outer);

        let is_throw = matches!(body_result, Completion::Throw(_));
        match loop_step(label, body_result) {
            LoopStep::Again => continue,
            LoopStep::Done(c) => {
                let _ = crate::iteration::iterator_close(context, &iter, is_throw);
                return c;
            }
            LoopStep::Propagate(c) => {
                let _ = crate::iteration::iterator_close(context, &iter, is_throw);
                return c;
            }
        }
    }
}

fn execute_switch(context: &mut Context, switch: &Switch) -> Completion {
    let discriminant = try_js!(evaluate_expression(context, &switch.discriminant));
    let outer = context.lexical_environment();
    let switch_env = Environment::declarative(Some(outer.clone()));
    for case in &switch.cases {
        if let Err(e) = crate::declaration_instantiation::instantiate_var_and_lexical_declarations(context, &case.body, &switch_env, false) {
            return Completion::Throw(e);
        }
    }
    context.set_lexical_environment(switch_env.clone());

    let result = (|| -> Completion {
        let mut matched = None;
        for (i, case) in switch.cases.iter().enumerate() {
            if let Some(test) = &case.test {
                let test_value = try_js!(evaluate_expression(context, test));
                if JsValue::strict_equals(&discriminant, &test_value) {
                    matched = Some(i);
                    break;
                }
            }
        }
        let start = matched.or_else(|| switch.cases.iter().position(|c| c.test.is_none()));
        let Some(start) = start else {
            return Completion::Normal(JsValue::undefined());
        };
        for case in &switch.cases[start..] {
            match execute_statement_list(context, &case.body, &switch_env) {
                Completion::Normal(_) => {}
                Completion::Break(None) => return Completion::Normal(JsValue::undefined()),
                other => return other,
            }
        }
        Completion::Normal(JsValue::undefined())
    })();

    context.set_lexical_environment(outer);
    result
}

fn execute_try(context: &mut Context, try_stmt: &Try) -> Completion {
    let try_result = execute_block(context, &try_stmt.block.0);
    let after_catch = match (try_result, &try_stmt.catch) {
        (Completion::Throw(err), Some(catch)) => execute_catch(context, catch, err),
        (other, _) => other,
    };
    match &try_stmt.finally {
        None => after_catch,
        Some(finally_block) => match execute_block(context, &finally_block.0) {
            Completion::Normal(_) => after_catch,
            other => other,
        },
    }
}

fn execute_catch(context: &mut Context, catch: &Catch, err: JsError) -> Completion {
    let outer = context.lexical_environment();
    let catch_env = Environment::declarative(Some(outer.clone()));
    if let Some(param) = &catch.param {
        let value = err.into_value(context);
        if let Err(e) = crate::binding::declare_and_initialize(context, param, value, &catch_env, BindingKind::MutableLexical) {
            context.set_lexical_environment(outer);
            return Completion::Throw(e);
        }
    }
    if let Err(e) = crate::declaration_instantiation::instantiate_var_and_lexical_declarations(context, &catch.block.0, &catch_env, false) {
        context.set_lexical_environment(outer);
        return Completion::Throw(e);
    }
    context.set_lexical_environment(catch_env.clone());
    let result = execute_statement_list(context, &catch.block.0, &catch_env);
    context.set_lexical_environment(outer);
    result
}

/// Dispatches a labelled statement: loop bodies get the label threaded
/// through so a matching `continue` restarts the loop instead of exiting
/// it; everything else just needs a matching `break` converted to
/// `Normal` once it bubbles back up here.
fn execute_labelled(context: &mut Context, labelled: &Labelled) -> Completion {
    let result = execute_labelled_body(context, &labelled.body, labelled.label);
    match result {
        Completion::Break(Some(lbl)) if lbl == labelled.label => Completion::Normal(JsValue::undefined()),
        other => other,
    }
}

fn execute_labelled_body(context: &mut Context, stmt: &Statement, label: Sym) -> Completion {
    match stmt {
        Statement::While(w) => execute_while(context, w, Some(label)),
        Statement::DoWhile(w) => execute_do_while(context, w, Some(label)),
        Statement::For(f) => execute_for(context, f, Some(label)),
        Statement::ForIn(f) => execute_for_in(context, f, Some(label)),
        Statement::ForOf(f) => execute_for_of(context, f, Some(label)),
        // `outer: inner: for (...)` — peel the nested label the same way,
        // then let this frame's `break outer`/`break inner` conversion
        // happen one level up the call stack.
        Statement::Labelled(inner) => {
            let result = execute_labelled_body(context, &inner.body, inner.label);
            match result {
                Completion::Break(Some(lbl)) if lbl == inner.label => Completion::Normal(JsValue::undefined()),
                other => other,
            }
        }
        _ => execute_statement(context, stmt),
    }
}

#[cfg(test)]
mod tests {
    use crate::context::ContextBuilder;
    use crate::value::JsValue;

    fn eval_source(source: &str) -> JsValue {
        let mut context = ContextBuilder::new().build();
        context.evaluate_script(source).expect("script should evaluate without throwing")
    }

    #[test]
    fn while_loop_accumulates() {
        let result = eval_source("let i = 0, sum = 0; while (i < 5) { sum += i; i++; } sum;");
        assert_eq!(result.as_number(), Some(10.0));
    }

    #[test]
    fn labelled_continue_skips_to_next_outer_iteration() {
        let result = eval_source(
            "let out = [];
             outer: for (let i = 0; i < 3; i++) {
                 for (let j = 0; j < 3; j++) {
                     if (j === 1) continue outer;
                     out.push(i * 10 + j);
                 }
             }
             out.length;",
        );
        assert_eq!(result.as_number(), Some(3.0));
    }

    #[test]
    fn labelled_break_exits_outer_loop() {
        let result = eval_source(
            "let count = 0;
             outer: for (let i = 0; i < 5; i++) {
                 for (let j = 0; j < 5; j++) {
                     count++;
                     if (i === 1 && j === 1) break outer;
                 }
             }
             count;",
        );
        assert_eq!(result.as_number(), Some(7.0));
    }

    #[test]
    fn try_catch_finally_runs_finally_on_throw() {
        let result = eval_source(
            "let order = [];
             try {
                 order.push('try');
                 throw new Error('boom');
             } catch (e) {
                 order.push('catch:' + e.message);
             } finally {
                 order.push('finally');
             }
             order.join(',');",
        );
        assert_eq!(result.as_string().map(|s| s.as_str().to_string()), Some("try,catch:boom,finally".to_string()));
    }

    #[test]
    fn switch_falls_through_until_break() {
        let result = eval_source(
            "function classify(n) {
                 let label = '';
                 switch (n) {
                     case 1:
                     case 2:
                         label += 'small';
                         break;
                     case 3:
                         label += 'three';
                     default:
                         label += '+default';
                 }
                 return label;
             }
             classify(2) + '|' + classify(3);",
        );
        assert_eq!(result.as_string().map(|s| s.as_str().to_string()), Some("small|three+default".to_string()));
    }

    #[test]
    fn for_of_respects_break_and_closes_iterator() {
        let result = eval_source(
            "let seen = [];
             for (const x of [1, 2, 3, 4]) {
                 if (x === 3) break;
                 seen.push(x);
             }
             seen.join(',');",
        );
        assert_eq!(result.as_string().map(|s| s.as_str().to_string()), Some("1,2".to_string()));
    }

    #[test]
    fn for_in_enumerates_own_and_inherited_keys() {
        let result = eval_source(
            "function Base() { this.a = 1; }
             Base.prototype.b = 2;
             let keys = [];
             for (const k in new Base()) { keys.push(k); }
             keys.join(',');",
        );
        assert_eq!(result.as_string().map(|s| s.as_str().to_string()), Some("a,b".to_string()));
    }
}
