//! `ClassDefinitionEvaluation` (§3.7's class desugaring): builds the
//! constructor function object, wires up the prototype chain between a
//! derived class and its superclass, and installs methods/accessors.
//! Class field initializers run later, against each instance's own
//! `this` binding — see [`initialize_instance_fields`].

use std::rc::Rc;

use ecma_ast::function::{Class, ClassElement, MethodKind};
use ecma_ast::PropertyKey as AstPropertyKey;

use crate::context::Context;
use crate::environment::Environment;
use crate::error::{JsNativeError, JsResult};
use crate::function::{FunctionData, FunctionKind, OrdinaryFunction, ThisMode};
use crate::object::{JsObject, ObjectKind};
use crate::property::{PropertyDescriptor, PropertyKey};
use crate::string::JsString;
use crate::value::JsValue;

/// `ClassDefinitionEvaluation`: returns the class's constructor object.
pub fn evaluate_class_definition(context: &mut Context, class: &Class, closure: &Environment) -> JsResult<JsObject> {
    let (parent_prototype, constructor_parent) = match &class.super_class {
        Some(expr) => {
            let value = crate::evaluator::expression::evaluate_expression(context, expr)?;
            if value.is_null() {
                (None, None)
            } else {
                let parent_ctor = value
                    .as_callable()
                    .cloned()
                    .ok_or_else(|| JsNativeError::typ().with_message("class extends value is not a constructor"))?;
                let proto_key = PropertyKey::from_str("prototype");
                let proto = parent_ctor
                    .get(&proto_key, &value, context)?
                    .as_object()
                    .cloned();
                (proto, Some(parent_ctor))
            }
        }
        None => (Some(context.intrinsics().object_prototype.clone()), None),
    };
    let is_derived = class.super_class.is_some();

    let prototype = JsObject::ordinary(parent_prototype);

    let mut fields = Vec::new();
    let mut explicit_constructor = None;
    for element in &class.elements {
        match element {
            ClassElement::Method { key, function, kind, is_static: false } if is_constructor_key(context, key) && *kind == MethodKind::Method => {
                explicit_constructor = Some(function.clone());
            }
            _ => {}
        }
    }

    let name = class.name.map(|id| context.interner().resolve(id.sym()).to_string()).unwrap_or_default();
    let (parameters, body) = match &explicit_constructor {
        Some(f) => (f.parameters.clone(), f.body.clone()),
        None => default_constructor(context, is_derived),
    };

    for element in &class.elements {
        if let ClassElement::Field { key, value, is_static: false } = element {
            let prop_key = crate::binding::property_key_of(context, key)?;
            fields.push((prop_key, value.clone()));
        }
    }

    let length = parameters.expected_argument_count();
    let ctor_data = FunctionData {
        name: JsString::new(name.clone()),
        length,
        kind: FunctionKind::Ordinary(OrdinaryFunction {
            parameters: Rc::new(parameters),
            body: Rc::new(body),
            this_mode: ThisMode::Strict,
            is_generator: false,
            is_async: false,
            is_derived_constructor: is_derived,
            constructor_parent: constructor_parent.clone(),
            fields: Rc::new(fields),
        }),
        closure: closure.clone(),
        is_constructor: true,
        is_class_constructor: true,
        home_object: Some(prototype.clone()),
    };
    // A derived class's constructor inherits statics through its own
    // [[Prototype]] link to the parent *constructor* (not the parent's
    // `.prototype` object) — `class B extends A {}` makes `B.__proto__ === A`.
    let ctor = JsObject::new(Some(context.intrinsics().function_prototype.clone()), ObjectKind::Function(ctor_data));
    if let Some(parent) = &constructor_parent {
        ctor.set_prototype(Some(parent.clone()));
    }
    ctor.create_hidden_property("length", JsValue::from(length as f64));
    ctor.create_hidden_property("name", JsValue::from(name.as_str()));
    ctor.create_hidden_property("prototype", JsValue::Object(prototype.clone()));
    prototype.create_hidden_property("constructor", JsValue::Object(ctor.clone()));

    for element in &class.elements {
        match element {
            ClassElement::Method { key, function, kind, is_static } if !(*kind == MethodKind::Method && !*is_static && is_constructor_key(context, key)) => {
                let prop_key = crate::binding::property_key_of(context, key)?;
                let target = if *is_static { &ctor } else { &prototype };
                let home = if *is_static { ctor.clone() } else { prototype.clone() };
                let method_obj = build_method(context, function, closure, &home);
                install_method(target, prop_key, *kind, method_obj);
            }
            ClassElement::Field { key, value, is_static: true } => {
                let prop_key = crate::binding::property_key_of(context, key)?;
                let v = match value {
                    Some(expr) => crate::evaluator::expression::evaluate_expression(context, expr)?,
                    None => JsValue::undefined(),
                };
                ctor.create_data_property(prop_key, v);
            }
            _ => {}
        }
    }

    Ok(ctor)
}

fn is_constructor_key(context: &Context, key: &AstPropertyKey) -> bool {
    matches!(key, AstPropertyKey::Literal(sym) if context.interner().resolve(*sym) == "constructor")
}

/// A derived class with no explicit constructor gets `constructor(...args) { super(...args); }`;
/// a base class gets an empty body.
fn default_constructor(context: &mut Context, is_derived: bool) -> (ecma_ast::FormalParameterList, ecma_ast::StatementList) {
    if !is_derived {
        return (ecma_ast::FormalParameterList::default(), ecma_ast::StatementList::default());
    }
    let args_sym = context.interner_mut().get_or_intern("args");
    let ctor_sym = context.interner_mut().get_or_intern("constructor");
    let parameters = ecma_ast::FormalParameterList {
        parameters: vec![ecma_ast::function::FormalParameter {
            pattern: ecma_ast::Pattern::Identifier(ecma_ast::expression::Identifier::new(args_sym)),
            default: None,
            is_rest: true,
        }],
    };
    let super_call = ecma_ast::Expression::Call(ecma_ast::expression::Call {
        callee: Box::new(ecma_ast::Expression::PropertyAccess(ecma_ast::expression::PropertyAccess {
            target: Box::new(ecma_ast::expression::PropertyAccessTarget::Super),
            field: ecma_ast::expression::PropertyAccessField::Key(ctor_sym),
            optional: false,
        })),
        args: vec![ecma_ast::Expression::Spread(Box::new(ecma_ast::Expression::Identifier(ecma_ast::expression::Identifier::new(args_sym))))],
        optional: false,
    });
    let body = ecma_ast::StatementList::new(vec![ecma_ast::StatementListItem::Statement(ecma_ast::statement::Statement::Expression(super_call))]);
    (parameters, body)
}

fn build_method(context: &Context, function: &ecma_ast::Function, closure: &Environment, home_object: &JsObject) -> JsObject {
    let obj = crate::declaration_instantiation::instantiate_function_object(context, function, closure);
    obj.with_kind_mut(|kind| {
        if let ObjectKind::Function(data) = kind {
            data.home_object = Some(home_object.clone());
            data.is_constructor = false;
        }
    });
    obj.delete(&PropertyKey::from_str("prototype"));
    obj
}

fn install_method(target: &JsObject, key: PropertyKey, kind: MethodKind, method: JsObject) {
    match kind {
        MethodKind::Method => target.define_own_property(key, PropertyDescriptor::data(JsValue::Object(method), true, false, true)),
        MethodKind::Get => {
            let existing = target.get_own_property(&key);
            let set = match existing {
                Some(PropertyDescriptor::Accessor { set, .. }) => set,
                _ => None,
            };
            target.define_own_property(key, PropertyDescriptor::Accessor { get: Some(JsValue::Object(method)), set, enumerable: false, configurable: true })
        }
        MethodKind::Set => {
            let existing = target.get_own_property(&key);
            let get = match existing {
                Some(PropertyDescriptor::Accessor { get, .. }) => get,
                _ => None,
            };
            target.define_own_property(key, PropertyDescriptor::Accessor { get, set: Some(JsValue::Object(method)), enumerable: false, configurable: true })
        }
    };
}

/// `InitializeInstanceElements`: evaluates each field's initializer
/// against the current `this` binding and defines it as an own data
/// property.
pub fn initialize_instance_fields(
    context: &mut Context,
    fields: &[(PropertyKey, Option<ecma_ast::expression::Expression>)],
) -> JsResult<()> {
    if fields.is_empty() {
        return Ok(());
    }
    let this = context.resolve_this_binding()?;
    let obj = this.as_object().cloned().expect("this is bound to an object during field initialization");
    for (key, init) in fields {
        let value = match init {
            Some(expr) => crate::evaluator::expression::evaluate_expression(context, expr)?,
            None => JsValue::undefined(),
        };
        obj.create_data_property(key.clone(), value);
    }
    Ok(())
}
