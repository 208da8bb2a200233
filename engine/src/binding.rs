//! Destructuring pattern binding (§4.6's `BindingInitialization` /
//! `DestructuringAssignmentEvaluation`), shared by `let`/`const`/`var`
//! declarations, parameter lists, `catch` clauses, and `for-in`/`for-of`
//! loop heads.

use ecma_ast::{ArrayPattern, ObjectPattern, Pattern};

use crate::context::Context;
use crate::environment::{BindingKind, Environment};
use crate::error::{JsNativeError, JsResult};
use crate::property::PropertyKey;
use crate::value::JsValue;

/// Declares (if not already declared) and initializes every identifier
/// in `pattern` against `value`, in `env`.
pub fn declare_and_initialize(context: &mut Context, pattern: &Pattern, value: JsValue, env: &Environment, kind: BindingKind) -> JsResult<()> {
    match pattern {
        Pattern::Identifier(id) => {
            if !env.has_binding(id.sym(), context) {
                env.create_binding(id.sym(), kind, context);
            }
            env.initialize_binding(id.sym(), value, context)
        }
        Pattern::Array(array) => bind_array_declare(context, array, value, env, kind),
        Pattern::Object(object) => bind_object_declare(context, object, value, env, kind),
    }
}

fn bind_array_declare(context: &mut Context, pattern: &ArrayPattern, value: JsValue, env: &Environment, kind: BindingKind) -> JsResult<()> {
    let mut iter = crate::iteration::get_iterator(context, &value)?;
    for element in &pattern.elements {
        let item = crate::iteration::iterator_step(context, &mut iter)?;
        if let Some(element) = element {
            let item_value = item.unwrap_or(JsValue::Undefined);
            let resolved = apply_default(context, item_value, element.default.as_ref())?;
            declare_and_initialize(context, &element.pattern, resolved, env, kind)?;
        }
    }
    if let Some(rest) = &pattern.rest {
        let mut remaining = Vec::new();
        while let Some(v) = crate::iteration::iterator_step(context, &mut iter)? {
            remaining.push(v);
        }
        let array = JsValue::Object(context.new_array(remaining));
        declare_and_initialize(context, rest, array, env, kind)?;
    }
    Ok(())
}

fn bind_object_declare(context: &mut Context, pattern: &ObjectPattern, value: JsValue, env: &Environment, kind: BindingKind) -> JsResult<()> {
    if value.is_nullish() {
        return Err(JsNativeError::typ().with_message("cannot destructure null or undefined").into());
    }
    let mut seen = Vec::new();
    for prop in &pattern.properties {
        let key = property_key_of(context, &prop.key)?;
        seen.push(key.clone());
        let obj = value.to_object(context)?;
        let item_value = obj.get(&key, &value, context)?;
        let resolved = apply_default(context, item_value, prop.default.as_ref())?;
        declare_and_initialize(context, &prop.value, resolved, env, kind)?;
    }
    if let Some(rest) = &pattern.rest {
        let obj = value.to_object(context)?;
        let rest_obj = context.new_object();
        for key in obj.own_property_keys() {
            if seen.contains(&key) {
                continue;
            }
            if let Some(desc) = obj.get_own_property(&key) {
                if desc.enumerable() {
                    let v = obj.get(&key, &value, context)?;
                    rest_obj.create_data_property(key, v);
                }
            }
        }
        if !env.has_binding(rest.sym(), context) {
            env.create_binding(rest.sym(), kind, context);
        }
        env.initialize_binding(rest.sym(), JsValue::Object(rest_obj), context)?;
    }
    Ok(())
}

pub(crate) fn property_key_of(context: &mut Context, key: &ecma_ast::PropertyKey) -> JsResult<PropertyKey> {
    match key {
        ecma_ast::PropertyKey::Literal(sym) => Ok(PropertyKey::from_str(context.interner().resolve(*sym))),
        ecma_ast::PropertyKey::Computed(expr) => {
            let v = crate::evaluator::expression::evaluate_expression(context, expr)?;
            v.to_property_key(context)
        }
    }
}

fn apply_default(context: &mut Context, value: JsValue, default: Option<&ecma_ast::Expression>) -> JsResult<JsValue> {
    match default {
        Some(expr) if value.is_undefined() => crate::evaluator::expression::evaluate_expression(context, expr),
        _ => Ok(value),
    }
}

/// `DestructuringAssignmentEvaluation`: like [`declare_and_initialize`]
/// but assigns through existing bindings/targets instead of declaring
/// new ones (the left side of `({a, b} = obj)`).
pub fn assign_pattern(context: &mut Context, pattern: &Pattern, value: JsValue) -> JsResult<()> {
    match pattern {
        Pattern::Identifier(id) => {
            let env = context.resolve_binding(id.sym());
            let reference = crate::reference::Reference::identifier(env, id.sym(), false);
            reference.put_value(value, context)
        }
        Pattern::Array(array) => assign_array(context, array, value),
        Pattern::Object(object) => assign_object(context, object, value),
    }
}

fn assign_array(context: &mut Context, pattern: &ArrayPattern, value: JsValue) -> JsResult<()> {
    let mut iter = crate::iteration::get_iterator(context, &value)?;
    for element in &pattern.elements {
        let item = crate::iteration::iterator_step(context, &mut iter)?;
        if let Some(element) = element {
            let item_value = item.unwrap_or(JsValue::Undefined);
            let resolved = apply_default(context, item_value, element.default.as_ref())?;
            assign_pattern(context, &element.pattern, resolved)?;
        }
    }
    if let Some(rest) = &pattern.rest {
        let mut remaining = Vec::new();
        while let Some(v) = crate::iteration::iterator_step(context, &mut iter)? {
            remaining.push(v);
        }
        let array = JsValue::Object(context.new_array(remaining));
        assign_pattern(context, rest, array)?;
    }
    Ok(())
}

fn assign_object(context: &mut Context, pattern: &ObjectPattern, value: JsValue) -> JsResult<()> {
    if value.is_nullish() {
        return Err(JsNativeError::typ().with_message("cannot destructure null or undefined").into());
    }
    let mut seen = Vec::new();
    for prop in &pattern.properties {
        let key = property_key_of(context, &prop.key)?;
        seen.push(key.clone());
        let obj = value.to_object(context)?;
        let item_value = obj.get(&key, &value, context)?;
        let resolved = apply_default(context, item_value, prop.default.as_ref())?;
        assign_pattern(context, &prop.value, resolved)?;
    }
    if let Some(rest) = &pattern.rest {
        let obj = value.to_object(context)?;
        let rest_obj = context.new_object();
        for key in obj.own_property_keys() {
            if seen.contains(&key) {
                continue;
            }
            if let Some(desc) = obj.get_own_property(&key) {
                if desc.enumerable() {
                    let v = obj.get(&key, &value, context)?;
                    rest_obj.create_data_property(key, v);
                }
            }
        }
        let env = context.resolve_binding(rest.sym());
        let reference = crate::reference::Reference::identifier(env, rest.sym(), false);
        reference.put_value(JsValue::Object(rest_obj), context)?;
    }
    Ok(())
}
