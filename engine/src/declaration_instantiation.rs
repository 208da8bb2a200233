//! `GlobalDeclarationInstantiation` and `FunctionDeclarationInstantiation`
//! (§4.8): "before a script or function body runs a single statement,
//! every `var`, function declaration, and lexical (`let`/`const`/class)
//! binding it introduces is created up front."

use std::rc::Rc;

use ecma_ast::{Declaration, FormalParameterList, Pattern, StatementList, StatementListItem};

use crate::context::Context;
use crate::environment::{BindingKind, Environment};
use crate::error::JsResult;
use crate::function::{FunctionData, FunctionKind, OrdinaryFunction, ThisMode};
use crate::object::{JsObject, ObjectKind};
use crate::value::JsValue;

/// `TopLevelLexicallyDeclaredNames`: `let`/`const`/`class` names at this
/// list's own level, paired with the binding kind to create. Function
/// declarations are deliberately excluded here even though
/// `StatementList::lexically_declared_names` counts them too — at a
/// script or function top level they are var-like, not lexical.
fn top_level_lexical_bindings(body: &StatementList) -> Vec<(ecma_interner::Sym, BindingKind)> {
    let mut out = Vec::new();
    for item in body.items() {
        let StatementListItem::Declaration(decl) = item else { continue };
        let kind = match decl {
            Declaration::Lexical(lex) => match lex.kind {
                ecma_ast::DeclKind::Let => BindingKind::MutableLexical,
                ecma_ast::DeclKind::Const => BindingKind::Immutable,
            },
            Declaration::Class(_) => BindingKind::MutableLexical,
            Declaration::Function(_) => continue,
        };
        let mut names = Vec::new();
        decl.bound_names(&mut names);
        out.extend(names.into_iter().map(|name| (name, kind)));
    }
    out
}

/// Builds the `OrdinaryFunction` + closure-captured `JsObject` for a
/// `FunctionDeclaration`/`FunctionExpression` node, without installing
/// it anywhere; callers bind the result to a name or leave it anonymous.
pub fn instantiate_function_object(context: &Context, function: &ecma_ast::Function, closure: &Environment) -> JsObject {
    let name = function
        .name
        .map(|id| context.interner().resolve(id.sym()).to_string())
        .unwrap_or_default();
    let is_constructor = !function.is_async && !function.is_generator;
    let data = FunctionData {
        name: crate::string::JsString::new(name),
        length: function.parameters.expected_argument_count(),
        kind: FunctionKind::Ordinary(OrdinaryFunction {
            parameters: Rc::new(function.parameters.clone()),
            body: Rc::new(function.body.clone()),
            this_mode: if function.body.strict() { ThisMode::Strict } else { ThisMode::Global },
            is_generator: function.is_generator,
            is_async: function.is_async,
            is_derived_constructor: false,
            constructor_parent: None,
            fields: Rc::new(Vec::new()),
        }),
        closure: closure.clone(),
        is_constructor,
        is_class_constructor: false,
        home_object: None,
    };
    let prototype = context.intrinsics().function_prototype.clone();
    let obj = JsObject::new(Some(prototype), ObjectKind::Function(data));
    obj.create_hidden_property("length", JsValue::from(function.parameters.expected_argument_count() as f64));
    if is_constructor {
        let proto = JsObject::ordinary(Some(context.intrinsics().object_prototype.clone()));
        proto.create_hidden_property("constructor", JsValue::Object(obj.clone()));
        obj.create_hidden_property("prototype", JsValue::Object(proto));
    }
    obj
}

/// `GlobalDeclarationInstantiation`.
pub fn global_declaration_instantiation(
    context: &mut Context,
    body: &StatementList,
    lexical_env: &Environment,
    var_env: &Environment,
) -> JsResult<()> {
    for (name, kind) in top_level_lexical_bindings(body) {
        lexical_env.create_binding(name, kind, context);
    }
    for name in body.var_declared_names() {
        if !var_env.has_binding(name, context) {
            var_env.create_binding(name, BindingKind::Mutable, context);
            var_env.initialize_binding(name, JsValue::undefined(), context)?;
        }
    }
    for function in body.function_declarations() {
        let func_obj = instantiate_function_object(context, function, lexical_env);
        if let Some(name) = function.name {
            var_env.create_binding(name.sym(), BindingKind::Mutable, context);
            var_env.initialize_binding(name.sym(), JsValue::Object(func_obj), context)?;
        }
    }
    Ok(())
}

/// The subset of declaration instantiation a block/arrow-body needs:
/// create this level's own lexical bindings in `env`, optionally hoist
/// `var`s into `env` as well (when `env` also serves as the body's
/// variable environment, as it does for function/arrow bodies), and
/// materialize nested top-level function declarations eagerly.
pub fn instantiate_var_and_lexical_declarations(
    context: &mut Context,
    body: &StatementList,
    env: &Environment,
    hoist_vars_here: bool,
) -> JsResult<()> {
    for (name, kind) in top_level_lexical_bindings(body) {
        env.create_binding(name, kind, context);
    }
    if hoist_vars_here {
        for name in body.var_declared_names() {
            if !env.has_binding(name, context) {
                env.create_binding(name, BindingKind::Mutable, context);
                env.initialize_binding(name, JsValue::undefined(), context)?;
            }
        }
    }
    for function in body.function_declarations() {
        let func_obj = instantiate_function_object(context, function, env);
        if let Some(name) = function.name {
            if !env.has_binding(name.sym(), context) {
                env.create_binding(name.sym(), BindingKind::Mutable, context);
            }
            env.initialize_binding(name.sym(), JsValue::Object(func_obj), context)?;
        }
    }
    Ok(())
}

/// `FunctionDeclarationInstantiation` (§4.8): binds parameters, creates
/// the `arguments` object for non-arrow functions, then hoists the
/// body's own `var`/function declarations into the same environment
/// (a simplification of the spec's two-environment split for functions
/// whose parameter list references a var of the same name).
pub fn function_declaration_instantiation(
    context: &mut Context,
    parameters: &FormalParameterList,
    body: &StatementList,
    args: &[JsValue],
    env: &Environment,
    is_generator_or_async: bool,
) -> JsResult<()> {
    bind_parameters(context, parameters, args, env)?;
    if !is_generator_or_async {
        let arguments = make_arguments_object(context, args);
        let arguments_sym = context.interner_mut().get_or_intern("arguments");
        if !env.has_binding(arguments_sym, context) {
            env.create_binding(arguments_sym, BindingKind::Mutable, context);
            env.initialize_binding(arguments_sym, JsValue::Object(arguments), context)?;
        }
    }
    instantiate_var_and_lexical_declarations(context, body, env, true)
}

fn make_arguments_object(context: &mut Context, args: &[JsValue]) -> JsObject {
    let obj = JsObject::ordinary(Some(context.intrinsics().object_prototype.clone()));
    for (i, v) in args.iter().enumerate() {
        obj.create_data_property(i.to_string().as_str(), v.clone());
    }
    obj.create_hidden_property("length", JsValue::from(args.len() as f64));
    obj
}

/// Binds `args` against `parameters` into `env` (the parameter-list half
/// of `FunctionDeclarationInstantiation`, shared with arrow functions
/// which skip the rest of it).
pub fn bind_parameters(context: &mut Context, parameters: &FormalParameterList, args: &[JsValue], env: &Environment) -> JsResult<()> {
    let mut index = 0;
    for param in &parameters.parameters {
        if param.is_rest {
            let rest: Vec<JsValue> = args.get(index..).unwrap_or_default().to_vec();
            let array = JsValue::Object(context.new_array(rest));
            bind_parameter_pattern(context, &param.pattern, array, env)?;
            break;
        }
        let value = args.get(index).cloned().unwrap_or(JsValue::Undefined);
        let value = match &param.default {
            Some(expr) if value.is_undefined() => crate::evaluator::expression::evaluate_expression(context, expr)?,
            _ => value,
        };
        bind_parameter_pattern(context, &param.pattern, value, env)?;
        index += 1;
    }
    Ok(())
}

fn bind_parameter_pattern(context: &mut Context, pattern: &Pattern, value: JsValue, env: &Environment) -> JsResult<()> {
    let mut names = Vec::new();
    ecma_ast::pattern::bound_names_of_pattern(pattern, &mut names);
    for name in names {
        if !env.has_binding(name, context) {
            env.create_binding(name, BindingKind::Mutable, context);
        }
    }
    crate::binding::declare_and_initialize(context, pattern, value, env, BindingKind::Mutable)
}
