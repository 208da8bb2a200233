//! Expression evaluation (§4.1's syntax-directed dispatch over
//! `ecma_ast::Expression`): every node from a literal up through
//! assignment, plus the abstract operations (`ToNumeric`, Abstract
//! Equality/Relational Comparison, `instanceof`) the operators need.

use std::rc::Rc;

use ecma_ast::expression::{
    Assign, AssignOp, AssignTarget, Binary, BinaryOp, Call, Conditional, Expression, Literal,
    Logical, LogicalOp, MethodKind as ObjectMethodKind, New, PropertyAccess, PropertyAccessField,
    PropertyAccessTarget, PropertyDefinition, TemplateLiteral, Unary, UnaryOp, Update, UpdateOp,
};
use ecma_ast::function::ArrowFunction;

use crate::bigint::JsBigInt;
use crate::context::Context;
use crate::error::{JsNativeError, JsResult};
use crate::function::{ArrowFunctionData, FunctionData, FunctionKind};
use crate::object::{JsObject, ObjectKind};
use crate::property::{PropertyDescriptor, PropertyKey};
use crate::reference::Reference;
use crate::string::JsString;
use crate::value::{JsValue, PreferredType};

/// `Evaluation` over expressions (§4.3): tries any handler a plug-in
/// registered for this node's kind first (see `crate::evaluator::
/// dispatch`), in most-recently-registered order; falls through to
/// `evaluate_expression_core`'s own match arm once every registered
/// handler has returned NOT_APPLICABLE (or none were registered at all,
/// the common case for a context with no plug-ins hooking expressions).
pub fn evaluate_expression(context: &mut Context, expr: &Expression) -> JsResult<JsValue> {
    let kind = crate::evaluator::dispatch::ExprKind::of(expr);
    for handler in context.expression_handlers_for(kind) {
        if let Some(value) = handler(context, expr)? {
            return Ok(value);
        }
    }
    evaluate_expression_core(context, expr)
}

fn evaluate_expression_core(context: &mut Context, expr: &Expression) -> JsResult<JsValue> {
    match expr {
        Expression::This => context.resolve_this_binding(),
        Expression::NewTarget => Ok(context.get_new_target()),
        Expression::Identifier(id) => {
            let env = context.resolve_binding(id.sym());
            Reference::identifier(env, id.sym(), false).get_value(context)
        }
        Expression::Literal(lit) => evaluate_literal(context, lit),
        Expression::ArrayLiteral(elements) => evaluate_array_literal(context, elements),
        Expression::ObjectLiteral(props) => evaluate_object_literal(context, props),
        Expression::Function(function) => {
            let closure = context.lexical_environment();
            Ok(JsValue::Object(crate::declaration_instantiation::instantiate_function_object(context, function, &closure)))
        }
        Expression::ArrowFunction(arrow) => Ok(JsValue::Object(build_arrow_function(context, arrow))),
        Expression::Class(class) => {
            let closure = context.lexical_environment();
            Ok(JsValue::Object(crate::evaluator::class::evaluate_class_definition(context, class, &closure)?))
        }
        Expression::TemplateLiteral(tpl) => evaluate_template_literal(context, tpl),
        Expression::PropertyAccess(pa) => get_member(context, pa).map(|(_, value)| value),
        Expression::New(new_expr) => evaluate_new(context, new_expr),
        Expression::Call(call) => evaluate_call(context, call),
        Expression::Assign(assign) => evaluate_assign(context, assign),
        Expression::Binary(bin) => evaluate_binary(context, bin),
        Expression::Logical(logical) => evaluate_logical(context, logical),
        Expression::Unary(unary) => evaluate_unary(context, unary),
        Expression::Update(update) => evaluate_update(context, update),
        Expression::Conditional(cond) => evaluate_conditional(context, cond),
        Expression::Spread(_) => Err(JsNativeError::syntax().with_message("unexpected spread element").into()),
        Expression::Sequence(exprs) => evaluate_sequence(context, exprs),
        Expression::Parenthesized(inner) => evaluate_expression(context, inner),
        // Suspension is out of scope: `await`/`yield` evaluate their
        // operand synchronously and hand the value straight back.
        Expression::Await(inner) => evaluate_expression(context, inner),
        Expression::Yield { arg, .. } => match arg {
            Some(expr) => evaluate_expression(context, expr),
            None => Ok(JsValue::undefined()),
        },
    }
}

fn evaluate_literal(context: &mut Context, lit: &Literal) -> JsResult<JsValue> {
    match lit {
        Literal::Undefined => Ok(JsValue::undefined()),
        Literal::Null => Ok(JsValue::null()),
        Literal::Bool(b) => Ok(JsValue::from(*b)),
        Literal::Num(n) => Ok(JsValue::from(*n)),
        Literal::Str(sym) => Ok(JsValue::from(context.interner().resolve(*sym))),
        Literal::BigInt(b) => Ok(JsValue::BigInt(JsBigInt::from(b.clone()))),
        // No regular-expression engine behind this: the literal surfaces
        // as a plain object carrying its source text, not a matcher.
        Literal::Regex { pattern, flags } => {
            let obj = context.new_object();
            obj.create_hidden_property("source", JsValue::from(context.interner().resolve(*pattern)));
            obj.create_hidden_property("flags", JsValue::from(context.interner().resolve(*flags)));
            Ok(JsValue::Object(obj))
        }
    }
}

fn evaluate_sequence(context: &mut Context, exprs: &[Expression]) -> JsResult<JsValue> {
    let mut last = JsValue::undefined();
    for expr in exprs {
        last = evaluate_expression(context, expr)?;
    }
    Ok(last)
}

fn evaluate_array_literal(context: &mut Context, elements: &[Option<Expression>]) -> JsResult<JsValue> {
    let mut out = Vec::new();
    for element in elements {
        match element {
            None => out.push(JsValue::undefined()),
            Some(Expression::Spread(inner)) => {
                let value = evaluate_expression(context, inner)?;
                let mut iter = crate::iteration::get_iterator(context, &value)?;
                while let Some(item) = crate::iteration::iterator_step(context, &mut iter)? {
                    out.push(item);
                }
            }
            Some(expr) => out.push(evaluate_expression(context, expr)?),
        }
    }
    Ok(JsValue::Object(context.new_array(out)))
}

fn evaluate_object_literal(context: &mut Context, props: &[PropertyDefinition]) -> JsResult<JsValue> {
    let obj = context.new_object();
    let closure = context.lexical_environment();
    for prop in props {
        match prop {
            PropertyDefinition::IdentifierRef(id) => {
                let env = context.resolve_binding(id.sym());
                let value = Reference::identifier(env, id.sym(), false).get_value(context)?;
                let key = PropertyKey::from_str(context.interner().resolve(id.sym()));
                obj.create_data_property(key, value);
            }
            PropertyDefinition::Property(key, expr) => {
                let key = crate::binding::property_key_of(context, key)?;
                let value = evaluate_expression(context, expr)?;
                obj.create_data_property(key, value);
            }
            PropertyDefinition::MethodDefinition(key, kind, function) => {
                let key = crate::binding::property_key_of(context, key)?;
                let method_obj = crate::declaration_instantiation::instantiate_function_object(context, function, &closure);
                method_obj.with_kind_mut(|data| {
                    if let ObjectKind::Function(d) = data {
                        d.home_object = Some(obj.clone());
                        d.is_constructor = false;
                    }
                });
                method_obj.delete(&PropertyKey::from_str("prototype"));
                install_object_method(&obj, key, *kind, method_obj);
            }
            PropertyDefinition::SpreadObject(expr) => {
                let value = evaluate_expression(context, expr)?;
                if let Some(source) = value.as_object().cloned() {
                    for key in own_enumerable_keys(&source) {
                        let v = source.get(&key, &value, context)?;
                        obj.create_data_property(key, v);
                    }
                }
            }
        }
    }
    Ok(JsValue::Object(obj))
}

/// Unlike a class method (always non-enumerable), an object-literal
/// method/accessor is an ordinary enumerable own property.
fn install_object_method(target: &JsObject, key: PropertyKey, kind: ObjectMethodKind, method: JsObject) {
    match kind {
        ObjectMethodKind::Get => {
            let set = match target.get_own_property(&key) {
                Some(PropertyDescriptor::Accessor { set, .. }) => set,
                _ => None,
            };
            target.define_own_property(key, PropertyDescriptor::Accessor { get: Some(JsValue::Object(method)), set, enumerable: true, configurable: true });
        }
        ObjectMethodKind::Set => {
            let get = match target.get_own_property(&key) {
                Some(PropertyDescriptor::Accessor { get, .. }) => get,
                _ => None,
            };
            target.define_own_property(key, PropertyDescriptor::Accessor { get, set: Some(JsValue::Object(method)), enumerable: true, configurable: true });
        }
        ObjectMethodKind::Ordinary | ObjectMethodKind::Generator | ObjectMethodKind::Async | ObjectMethodKind::AsyncGenerator => {
            target.define_own_property(key, PropertyDescriptor::data_wec(JsValue::Object(method)));
        }
    }
}

/// `CopyDataProperties`'s key set: own enumerable properties only, unlike
/// `for-in`'s walk up the prototype chain (see `iteration::enumerable_keys`).
fn own_enumerable_keys(obj: &JsObject) -> Vec<PropertyKey> {
    obj.own_property_keys().into_iter().filter(|key| obj.get_own_property(key).is_some_and(|d| d.enumerable())).collect()
}

fn evaluate_template_literal(context: &mut Context, tpl: &TemplateLiteral) -> JsResult<JsValue> {
    let mut result = JsString::new(context.interner().resolve(tpl.quasis[0]));
    for (i, expr) in tpl.exprs.iter().enumerate() {
        let value = evaluate_expression(context, expr)?;
        result = result.concat(&value.to_js_string(context)?);
        let quasi = JsString::new(context.interner().resolve(tpl.quasis[i + 1]));
        result = result.concat(&quasi);
    }
    Ok(JsValue::String(result))
}

fn build_arrow_function(context: &mut Context, arrow: &ArrowFunction) -> JsObject {
    let name = arrow.name.map(|id| context.interner().resolve(id.sym()).to_string()).unwrap_or_default();
    let length = arrow.parameters.expected_argument_count();
    let closure = context.lexical_environment();
    let data = FunctionData {
        name: JsString::new(name.clone()),
        length,
        kind: FunctionKind::Arrow(ArrowFunctionData {
            parameters: Rc::new(arrow.parameters.clone()),
            body: Rc::new(arrow.body.clone()),
            is_async: arrow.is_async,
        }),
        closure,
        is_constructor: false,
        is_class_constructor: false,
        home_object: None,
    };
    let obj = JsObject::new(Some(context.intrinsics().function_prototype.clone()), ObjectKind::Function(data));
    obj.create_hidden_property("length", JsValue::from(length as f64));
    obj.create_hidden_property("name", JsValue::from(name.as_str()));
    obj
}

// ---- Member access (§4.1's `MemberExpression`/`SuperProperty`) ----

/// Evaluates `target.field`/`target[field]`, returning both the member's
/// value and the base value a following call binds as `this` — a
/// `Reference` can't give us the latter back out, so member access
/// doesn't go through one here.
fn get_member(context: &mut Context, pa: &PropertyAccess) -> JsResult<(JsValue, JsValue)> {
    let key = property_key_of_field(context, &pa.field)?;
    match pa.target.as_ref() {
        PropertyAccessTarget::Super => {
            let this = context.resolve_this_binding()?;
            let value = match context.running_home_object().and_then(|home| home.prototype()) {
                Some(proto) => proto.get(&key, &this, context)?,
                None => JsValue::undefined(),
            };
            Ok((this, value))
        }
        PropertyAccessTarget::Expression(expr) => {
            let base = evaluate_expression(context, expr)?;
            if pa.optional && base.is_nullish() {
                return Ok((JsValue::undefined(), JsValue::undefined()));
            }
            let obj = base.to_object(context)?;
            let value = obj.get(&key, &base, context)?;
            Ok((base, value))
        }
    }
}

fn set_member(context: &mut Context, pa: &PropertyAccess, value: JsValue) -> JsResult<()> {
    let key = property_key_of_field(context, &pa.field)?;
    match pa.target.as_ref() {
        PropertyAccessTarget::Super => {
            let this = context.resolve_this_binding()?;
            if let Some(proto) = context.running_home_object().and_then(|home| home.prototype()) {
                proto.set(key, value, &this, context)?;
            }
            Ok(())
        }
        PropertyAccessTarget::Expression(expr) => {
            let base = evaluate_expression(context, expr)?;
            let obj = base.to_object(context)?;
            obj.set_or_throw(key, value, context)
        }
    }
}

fn property_key_of_field(context: &mut Context, field: &PropertyAccessField) -> JsResult<PropertyKey> {
    match field {
        PropertyAccessField::Key(sym) => Ok(PropertyKey::from_str(context.interner().resolve(*sym))),
        PropertyAccessField::Expr(expr) => {
            let value = evaluate_expression(context, expr)?;
            value.to_property_key(context)
        }
    }
}

// ---- Calls, `new`, and `super(...)` ----

fn evaluate_arguments(context: &mut Context, args: &[Expression]) -> JsResult<Vec<JsValue>> {
    let mut out = Vec::new();
    for arg in args {
        if let Expression::Spread(inner) = arg {
            let value = evaluate_expression(context, inner)?;
            let mut iter = crate::iteration::get_iterator(context, &value)?;
            while let Some(item) = crate::iteration::iterator_step(context, &mut iter)? {
                out.push(item);
            }
        } else {
            out.push(evaluate_expression(context, arg)?);
        }
    }
    Ok(out)
}

fn evaluate_call(context: &mut Context, call: &Call) -> JsResult<JsValue> {
    if is_super_call(context, call) {
        return evaluate_super_call(context, call);
    }
    let (this_value, callee_value) = match call.callee.as_ref() {
        Expression::PropertyAccess(pa) => get_member(context, pa)?,
        other => (JsValue::undefined(), evaluate_expression(context, other)?),
    };
    if call.optional && callee_value.is_nullish() {
        return Ok(JsValue::undefined());
    }
    let args = evaluate_arguments(context, &call.args)?;
    crate::function::call_from_value(&callee_value, &this_value, &args, context)
}

/// Detects the parser's `super(...)` desugaring: a call whose callee is
/// `super.constructor`. There's no dedicated `SuperCall` AST node, so an
/// explicit `super.constructor()` in source is indistinguishable from it —
/// an accepted limitation of this AST's shape.
fn is_super_call(context: &Context, call: &Call) -> bool {
    let Expression::PropertyAccess(pa) = call.callee.as_ref() else { return false };
    if !matches!(pa.target.as_ref(), PropertyAccessTarget::Super) {
        return false;
    }
    matches!(&pa.field, PropertyAccessField::Key(sym) if context.interner().resolve(*sym) == "constructor")
}

fn evaluate_super_call(context: &mut Context, call: &Call) -> JsResult<JsValue> {
    let (_ctor_obj, data, env) = context
        .running_constructor_frame()
        .ok_or_else(|| JsNativeError::syntax().with_message("'super' keyword is only valid inside a derived class constructor"))?;
    let parent = data
        .constructor_parent
        .clone()
        .ok_or_else(|| JsNativeError::syntax().with_message("'super' keyword unexpected here"))?;
    let args = evaluate_arguments(context, &call.args)?;
    let new_target_value = context.get_new_target();
    let new_target = new_target_value.as_object().cloned().unwrap_or_else(|| parent.clone());
    let result = crate::function::construct_object(&parent, &args, &new_target, context)?;
    env.bind_this(result.clone());
    crate::evaluator::class::initialize_instance_fields(context, &data.fields)?;
    Ok(JsValue::undefined())
}

fn evaluate_new(context: &mut Context, new_expr: &New) -> JsResult<JsValue> {
    let callee = evaluate_expression(context, &new_expr.callee)?;
    let ctor = callee.as_callable().cloned().ok_or_else(|| JsNativeError::typ().with_message("value is not a constructor"))?;
    let args = evaluate_arguments(context, &new_expr.args)?;
    crate::function::construct_object(&ctor, &args, &ctor, context)
}

// ---- Assignment, update, compound operators ----

fn read_target(context: &mut Context, target: &AssignTarget) -> JsResult<JsValue> {
    match target {
        AssignTarget::Identifier(id) => {
            let env = context.resolve_binding(id.sym());
            Reference::identifier(env, id.sym(), false).get_value(context)
        }
        AssignTarget::Access(pa) => get_member(context, pa).map(|(_, value)| value),
        AssignTarget::Pattern(_) => unreachable!("a destructuring pattern is never the target of a compound assignment or update"),
    }
}

pub(crate) fn assign_to_target(context: &mut Context, target: &AssignTarget, value: JsValue) -> JsResult<()> {
    match target {
        AssignTarget::Identifier(id) => {
            let env = context.resolve_binding(id.sym());
            Reference::identifier(env, id.sym(), false).put_value(value, context)
        }
        AssignTarget::Access(pa) => set_member(context, pa, value),
        AssignTarget::Pattern(pattern) => crate::binding::assign_pattern(context, pattern, value),
    }
}

fn evaluate_assign(context: &mut Context, assign: &Assign) -> JsResult<JsValue> {
    match assign.op {
        AssignOp::Assign => match assign.target.as_ref() {
            AssignTarget::Pattern(pattern) => {
                let value = evaluate_expression(context, &assign.value)?;
                crate::binding::assign_pattern(context, pattern, value.clone())?;
                Ok(value)
            }
            target => {
                let value = evaluate_expression(context, &assign.value)?;
                assign_to_target(context, target, value.clone())?;
                Ok(value)
            }
        },
        AssignOp::BoolAnd | AssignOp::BoolOr | AssignOp::Coalesce => {
            let current = read_target(context, &assign.target)?;
            let should_assign = match assign.op {
                AssignOp::BoolAnd => current.to_boolean(),
                AssignOp::BoolOr => !current.to_boolean(),
                AssignOp::Coalesce => current.is_nullish(),
                _ => unreachable!(),
            };
            if !should_assign {
                return Ok(current);
            }
            let value = evaluate_expression(context, &assign.value)?;
            assign_to_target(context, &assign.target, value.clone())?;
            Ok(value)
        }
        op => {
            let current = read_target(context, &assign.target)?;
            let rhs = evaluate_expression(context, &assign.value)?;
            let result = apply_compound_op(context, op, current, rhs)?;
            assign_to_target(context, &assign.target, result.clone())?;
            Ok(result)
        }
    }
}

fn apply_compound_op(context: &mut Context, op: AssignOp, left: JsValue, right: JsValue) -> JsResult<JsValue> {
    match op {
        AssignOp::Add => js_add(context, left, right),
        AssignOp::Sub => numeric_arithmetic(context, left, right, BinaryOp::Sub),
        AssignOp::Mul => numeric_arithmetic(context, left, right, BinaryOp::Mul),
        AssignOp::Div => numeric_arithmetic(context, left, right, BinaryOp::Div),
        AssignOp::Mod => numeric_arithmetic(context, left, right, BinaryOp::Mod),
        AssignOp::Exp => numeric_arithmetic(context, left, right, BinaryOp::Exp),
        AssignOp::And => bitwise(context, left, right, BitwiseOp::And),
        AssignOp::Or => bitwise(context, left, right, BitwiseOp::Or),
        AssignOp::Xor => bitwise(context, left, right, BitwiseOp::Xor),
        AssignOp::Shl => bitwise(context, left, right, BitwiseOp::Shl),
        AssignOp::Shr => bitwise(context, left, right, BitwiseOp::Shr),
        AssignOp::UShr => bitwise(context, left, right, BitwiseOp::UShr),
        AssignOp::Assign | AssignOp::BoolAnd | AssignOp::BoolOr | AssignOp::Coalesce => unreachable!(),
    }
}

fn evaluate_update(context: &mut Context, update: &Update) -> JsResult<JsValue> {
    let current = read_target(context, &update.target)?;
    let is_increment = matches!(update.op, UpdateOp::IncPre | UpdateOp::IncPost);
    let (old_value, new_value) = match to_numeric(context, current)? {
        Numeric::Number(n) => {
            let delta = if is_increment { 1.0 } else { -1.0 };
            (JsValue::from(n), JsValue::from(n + delta))
        }
        Numeric::BigInt(b) => {
            let one = JsBigInt::from(1i64);
            let updated = if is_increment { &b + &one } else { &b - &one };
            (JsValue::BigInt(b), JsValue::BigInt(updated))
        }
    };
    assign_to_target(context, &update.target, new_value.clone())?;
    Ok(match update.op {
        UpdateOp::IncPre | UpdateOp::DecPre => new_value,
        UpdateOp::IncPost | UpdateOp::DecPost => old_value,
    })
}

fn evaluate_conditional(context: &mut Context, cond: &Conditional) -> JsResult<JsValue> {
    let test = evaluate_expression(context, &cond.cond)?;
    if test.to_boolean() {
        evaluate_expression(context, &cond.then)
    } else {
        evaluate_expression(context, &cond.else_)
    }
}

fn evaluate_logical(context: &mut Context, logical: &Logical) -> JsResult<JsValue> {
    let left = evaluate_expression(context, &logical.left)?;
    match logical.op {
        LogicalOp::And => {
            if left.to_boolean() {
                evaluate_expression(context, &logical.right)
            } else {
                Ok(left)
            }
        }
        LogicalOp::Or => {
            if left.to_boolean() {
                Ok(left)
            } else {
                evaluate_expression(context, &logical.right)
            }
        }
        LogicalOp::Coalesce => {
            if left.is_nullish() {
                evaluate_expression(context, &logical.right)
            } else {
                Ok(left)
            }
        }
    }
}

fn evaluate_unary(context: &mut Context, unary: &Unary) -> JsResult<JsValue> {
    match unary.op {
        UnaryOp::Delete => evaluate_delete(context, &unary.expr),
        UnaryOp::TypeOf => evaluate_typeof(context, &unary.expr),
        UnaryOp::Void => {
            evaluate_expression(context, &unary.expr)?;
            Ok(JsValue::undefined())
        }
        UnaryOp::Plus => {
            let value = evaluate_expression(context, &unary.expr)?;
            Ok(JsValue::from(value.to_number(context)?))
        }
        UnaryOp::Minus => {
            let value = evaluate_expression(context, &unary.expr)?;
            match to_numeric(context, value)? {
                Numeric::Number(n) => Ok(JsValue::from(-n)),
                Numeric::BigInt(b) => Ok(JsValue::BigInt(-&b)),
            }
        }
        UnaryOp::Not => {
            let value = evaluate_expression(context, &unary.expr)?;
            Ok(JsValue::from(!value.to_boolean()))
        }
        UnaryOp::BitNot => {
            let value = evaluate_expression(context, &unary.expr)?;
            match to_numeric(context, value)? {
                Numeric::Number(n) => Ok(JsValue::from(f64::from(!f64_to_int32(n)))),
                Numeric::BigInt(b) => Ok(JsValue::BigInt(-&(&b + &JsBigInt::from(1i64)))),
            }
        }
    }
}

fn evaluate_delete(context: &mut Context, expr: &Expression) -> JsResult<JsValue> {
    match expr {
        Expression::PropertyAccess(pa) => match pa.target.as_ref() {
            PropertyAccessTarget::Super => Err(JsNativeError::reference().with_message("unsupported reference to 'super' property for delete").into()),
            PropertyAccessTarget::Expression(base_expr) => {
                let base = evaluate_expression(context, base_expr)?;
                let key = property_key_of_field(context, &pa.field)?;
                let obj = base.to_object(context)?;
                Ok(JsValue::from(obj.delete(&key)))
            }
        },
        _ => {
            evaluate_expression(context, expr)?;
            Ok(JsValue::from(true))
        }
    }
}

fn evaluate_typeof(context: &mut Context, expr: &Expression) -> JsResult<JsValue> {
    if let Expression::Identifier(id) = expr {
        if context.resolve_binding(id.sym()).is_none() {
            return Ok(JsValue::from("undefined"));
        }
    }
    let value = evaluate_expression(context, expr)?;
    Ok(JsValue::from(value.type_of()))
}

// ---- Binary operators: `ToNumeric`, arithmetic, bitwise, comparisons ----

enum Numeric {
    Number(f64),
    BigInt(JsBigInt),
}

fn to_numeric(context: &mut Context, value: JsValue) -> JsResult<Numeric> {
    let primitive = value.to_primitive(context, PreferredType::Number)?;
    numeric_of_primitive(context, primitive)
}

fn numeric_of_primitive(context: &mut Context, primitive: JsValue) -> JsResult<Numeric> {
    match primitive {
        JsValue::BigInt(b) => Ok(Numeric::BigInt(b)),
        other => Ok(Numeric::Number(other.to_number(context)?)),
    }
}

fn js_add(context: &mut Context, left: JsValue, right: JsValue) -> JsResult<JsValue> {
    let lprim = left.to_primitive(context, PreferredType::Number)?;
    let rprim = right.to_primitive(context, PreferredType::Number)?;
    if matches!(lprim, JsValue::String(_)) || matches!(rprim, JsValue::String(_)) {
        let ls = lprim.to_js_string(context)?;
        let rs = rprim.to_js_string(context)?;
        return Ok(JsValue::String(ls.concat(&rs)));
    }
    match (numeric_of_primitive(context, lprim)?, numeric_of_primitive(context, rprim)?) {
        (Numeric::Number(a), Numeric::Number(b)) => Ok(JsValue::from(a + b)),
        (Numeric::BigInt(a), Numeric::BigInt(b)) => Ok(JsValue::BigInt(&a + &b)),
        _ => Err(JsNativeError::typ().with_message("cannot mix BigInt and other types, use explicit conversions").into()),
    }
}

fn numeric_arithmetic(context: &mut Context, left: JsValue, right: JsValue, op: BinaryOp) -> JsResult<JsValue> {
    match (to_numeric(context, left)?, to_numeric(context, right)?) {
        (Numeric::Number(a), Numeric::Number(b)) => Ok(JsValue::from(match op {
            BinaryOp::Sub => a - b,
            BinaryOp::Mul => a * b,
            BinaryOp::Div => a / b,
            BinaryOp::Mod => a % b,
            BinaryOp::Exp => a.powf(b),
            _ => unreachable!(),
        })),
        (Numeric::BigInt(a), Numeric::BigInt(b)) => {
            let result = match op {
                BinaryOp::Sub => &a - &b,
                BinaryOp::Mul => &a * &b,
                BinaryOp::Div => {
                    if b.is_zero() {
                        return Err(JsNativeError::range().with_message("division by zero").into());
                    }
                    &a / &b
                }
                BinaryOp::Mod => {
                    if b.is_zero() {
                        return Err(JsNativeError::range().with_message("division by zero").into());
                    }
                    &a % &b
                }
                BinaryOp::Exp => bigint_pow(&a, &b)?,
                _ => unreachable!(),
            };
            Ok(JsValue::BigInt(result))
        }
        _ => Err(JsNativeError::typ().with_message("cannot mix BigInt and other types, use explicit conversions").into()),
    }
}

fn bigint_pow(base: &JsBigInt, exp: &JsBigInt) -> JsResult<JsBigInt> {
    if *exp < JsBigInt::zero() {
        return Err(JsNativeError::range().with_message("exponent must be non-negative").into());
    }
    let exponent = bigint_to_u32(exp)?;
    let mut result = JsBigInt::from(1i64);
    for _ in 0..exponent {
        result = &result * base;
    }
    Ok(result)
}

fn bigint_to_u32(b: &JsBigInt) -> JsResult<u32> {
    use num_traits::ToPrimitive;
    b.as_inner().to_u32().ok_or_else(|| JsNativeError::range().with_message("BigInt value out of range").into())
}

#[derive(Clone, Copy)]
enum BitwiseOp {
    And,
    Or,
    Xor,
    Shl,
    Shr,
    UShr,
}

fn bitwise(context: &mut Context, left: JsValue, right: JsValue, op: BitwiseOp) -> JsResult<JsValue> {
    match (to_numeric(context, left)?, to_numeric(context, right)?) {
        (Numeric::Number(a), Numeric::Number(b)) => {
            let ia = f64_to_int32(a);
            let ib = f64_to_int32(b);
            let shift = f64_to_uint32(b) & 31;
            let value = match op {
                BitwiseOp::And => f64::from(ia & ib),
                BitwiseOp::Or => f64::from(ia | ib),
                BitwiseOp::Xor => f64::from(ia ^ ib),
                BitwiseOp::Shl => f64::from(ia.wrapping_shl(shift)),
                BitwiseOp::Shr => f64::from(ia.wrapping_shr(shift)),
                BitwiseOp::UShr => f64::from(f64_to_uint32(a).wrapping_shr(shift)),
            };
            Ok(JsValue::from(value))
        }
        (Numeric::BigInt(a), Numeric::BigInt(b)) => {
            if matches!(op, BitwiseOp::UShr) {
                return Err(JsNativeError::typ().with_message("BigInts have no unsigned right shift, use >> instead").into());
            }
            let result = match op {
                BitwiseOp::And => &a & &b,
                BitwiseOp::Or => &a | &b,
                BitwiseOp::Xor => &a ^ &b,
                BitwiseOp::Shl => &a << bigint_to_u32(&b)?,
                BitwiseOp::Shr => &a >> bigint_to_u32(&b)?,
                BitwiseOp::UShr => unreachable!(),
            };
            Ok(JsValue::BigInt(result))
        }
        _ => Err(JsNativeError::typ().with_message("cannot mix BigInt and other types, use explicit conversions").into()),
    }
}

fn f64_to_uint32(n: f64) -> u32 {
    if !n.is_finite() || n == 0.0 {
        return 0;
    }
    n.trunc().rem_euclid(4_294_967_296.0) as u32
}

fn f64_to_int32(n: f64) -> i32 {
    f64_to_uint32(n) as i32
}

fn relational_compare(context: &mut Context, left: JsValue, right: JsValue, op: BinaryOp) -> JsResult<JsValue> {
    let lprim = left.to_primitive(context, PreferredType::Number)?;
    let rprim = right.to_primitive(context, PreferredType::Number)?;
    if let (JsValue::String(a), JsValue::String(b)) = (&lprim, &rprim) {
        return Ok(JsValue::from(compare_matches(op, a.as_str().cmp(b.as_str()))));
    }
    match (numeric_of_primitive(context, lprim)?, numeric_of_primitive(context, rprim)?) {
        (Numeric::Number(a), Numeric::Number(b)) => {
            if a.is_nan() || b.is_nan() {
                return Ok(JsValue::from(false));
            }
            Ok(JsValue::from(match op {
                BinaryOp::LessThan => a < b,
                BinaryOp::GreaterThan => a > b,
                BinaryOp::LessThanOrEq => a <= b,
                BinaryOp::GreaterThanOrEq => a >= b,
                _ => unreachable!(),
            }))
        }
        (Numeric::BigInt(a), Numeric::BigInt(b)) => Ok(JsValue::from(compare_matches(op, a.cmp(&b)))),
        (Numeric::BigInt(a), Numeric::Number(b)) => {
            if b.is_nan() {
                return Ok(JsValue::from(false));
            }
            let ordering = a.to_f64().partial_cmp(&b).unwrap_or(std::cmp::Ordering::Equal);
            Ok(JsValue::from(compare_matches(op, ordering)))
        }
        (Numeric::Number(a), Numeric::BigInt(b)) => {
            if a.is_nan() {
                return Ok(JsValue::from(false));
            }
            let ordering = a.partial_cmp(&b.to_f64()).unwrap_or(std::cmp::Ordering::Equal);
            Ok(JsValue::from(compare_matches(op, ordering)))
        }
    }
}

fn compare_matches(op: BinaryOp, ordering: std::cmp::Ordering) -> bool {
    use std::cmp::Ordering::{Greater, Less};
    match op {
        BinaryOp::LessThan => ordering == Less,
        BinaryOp::GreaterThan => ordering == Greater,
        BinaryOp::LessThanOrEq => ordering != Greater,
        BinaryOp::GreaterThanOrEq => ordering != Less,
        _ => unreachable!(),
    }
}

/// Abstract Equality Comparison (§3.1's `==`): same-type operands fall
/// back to `IsStrictlyEqual`, cross-type pairs get coerced one hop at a
/// time until the recursion lands on a same-type or unequal pair.
fn loose_equals(context: &mut Context, a: &JsValue, b: &JsValue) -> JsResult<bool> {
    if std::mem::discriminant(a) == std::mem::discriminant(b) {
        return Ok(JsValue::strict_equals(a, b));
    }
    match (a, b) {
        (JsValue::Null, JsValue::Undefined) | (JsValue::Undefined, JsValue::Null) => Ok(true),
        (JsValue::Number(x), JsValue::String(s)) => Ok(*x == crate::value::string_to_number(s.as_str())),
        (JsValue::String(s), JsValue::Number(x)) => Ok(crate::value::string_to_number(s.as_str()) == *x),
        (JsValue::BigInt(x), JsValue::String(s)) => Ok(JsBigInt::from_string(s.as_str()).is_some_and(|v| v == *x)),
        (JsValue::String(s), JsValue::BigInt(x)) => Ok(JsBigInt::from_string(s.as_str()).is_some_and(|v| v == *x)),
        (JsValue::Boolean(_), _) => {
            let numeric = JsValue::from(a.to_number(context)?);
            loose_equals(context, &numeric, b)
        }
        (_, JsValue::Boolean(_)) => {
            let numeric = JsValue::from(b.to_number(context)?);
            loose_equals(context, a, &numeric)
        }
        (JsValue::Number(x), JsValue::BigInt(y)) | (JsValue::BigInt(y), JsValue::Number(x)) => Ok(x.is_finite() && x.fract() == 0.0 && y.to_f64() == *x),
        (JsValue::Object(_), JsValue::Number(_) | JsValue::String(_) | JsValue::BigInt(_) | JsValue::Symbol(_)) => {
            let primitive = a.to_primitive(context, PreferredType::Number)?;
            loose_equals(context, &primitive, b)
        }
        (JsValue::Number(_) | JsValue::String(_) | JsValue::BigInt(_) | JsValue::Symbol(_), JsValue::Object(_)) => {
            let primitive = b.to_primitive(context, PreferredType::Number)?;
            loose_equals(context, a, &primitive)
        }
        _ => Ok(false),
    }
}

fn in_operator(context: &mut Context, key: JsValue, obj: JsValue) -> JsResult<bool> {
    let object = obj.as_object().ok_or_else(|| JsNativeError::typ().with_message("cannot use 'in' operator to search for a property in a non-object"))?;
    let key = key.to_property_key(context)?;
    Ok(object.has_property(&key))
}

fn instanceof_operator(context: &mut Context, value: JsValue, target: JsValue) -> JsResult<bool> {
    let ctor = target.as_object().cloned().ok_or_else(|| JsNativeError::typ().with_message("right-hand side of 'instanceof' is not an object"))?;
    let has_instance = context.realm().well_known_symbols().has_instance.clone();
    let method = ctor.get(&PropertyKey::Symbol(has_instance), &target, context)?;
    if let Some(callable) = method.as_callable().cloned() {
        let result = crate::function::call_from_value(&JsValue::Object(callable), &target, &[value], context)?;
        return Ok(result.to_boolean());
    }
    ordinary_has_instance(context, &value, &ctor)
}

fn ordinary_has_instance(context: &mut Context, value: &JsValue, ctor: &JsObject) -> JsResult<bool> {
    if !ctor.is_callable() {
        return Err(JsNativeError::typ().with_message("right-hand side of 'instanceof' is not callable").into());
    }
    let Some(obj) = value.as_object() else { return Ok(false) };
    let proto_value = ctor.get(&PropertyKey::from_str("prototype"), &JsValue::Object(ctor.clone()), context)?;
    let Some(proto) = proto_value.as_object() else {
        return Err(JsNativeError::typ().with_message("function has non-object prototype in instanceof check").into());
    };
    let mut current = obj.prototype();
    while let Some(p) = current {
        if JsObject::ptr_eq(&p, proto) {
            return Ok(true);
        }
        current = p.prototype();
    }
    Ok(false)
}

fn evaluate_binary(context: &mut Context, bin: &Binary) -> JsResult<JsValue> {
    let left = evaluate_expression(context, &bin.left)?;
    let right = evaluate_expression(context, &bin.right)?;
    match bin.op {
        BinaryOp::Add => js_add(context, left, right),
        BinaryOp::Sub | BinaryOp::Mul | BinaryOp::Div | BinaryOp::Mod | BinaryOp::Exp => numeric_arithmetic(context, left, right, bin.op),
        BinaryOp::Eq => Ok(JsValue::from(loose_equals(context, &left, &right)?)),
        BinaryOp::NotEq => Ok(JsValue::from(!loose_equals(context, &left, &right)?)),
        BinaryOp::StrictEq => Ok(JsValue::from(JsValue::strict_equals(&left, &right))),
        BinaryOp::StrictNotEq => Ok(JsValue::from(!JsValue::strict_equals(&left, &right))),
        BinaryOp::LessThan | BinaryOp::GreaterThan | BinaryOp::LessThanOrEq | BinaryOp::GreaterThanOrEq => relational_compare(context, left, right, bin.op),
        BinaryOp::In => Ok(JsValue::from(in_operator(context, left, right)?)),
        BinaryOp::InstanceOf => Ok(JsValue::from(instanceof_operator(context, left, right)?)),
        BinaryOp::And => bitwise(context, left, right, BitwiseOp::And),
        BinaryOp::Or => bitwise(context, left, right, BitwiseOp::Or),
        BinaryOp::Xor => bitwise(context, left, right, BitwiseOp::Xor),
        BinaryOp::Shl => bitwise(context, left, right, BitwiseOp::Shl),
        BinaryOp::Shr => bitwise(context, left, right, BitwiseOp::Shr),
        BinaryOp::UShr => bitwise(context, left, right, BitwiseOp::UShr),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::ContextBuilder;

    fn eval_source(source: &str) -> JsValue {
        let mut context = ContextBuilder::new().build();
        context.evaluate_script(source).expect("script should evaluate")
    }

    #[test]
    fn arithmetic_and_string_coercion() {
        assert_eq!(eval_source("1 + 2").to_number(&mut ContextBuilder::new().build()).unwrap(), 3.0);
        let v = eval_source("'a' + 1");
        assert_eq!(v.as_string().unwrap().as_str(), "a1");
    }

    #[test]
    fn loose_vs_strict_equality() {
        assert!(eval_source("1 == '1'").to_boolean());
        assert!(!eval_source("1 === '1'").to_boolean());
        assert!(eval_source("null == undefined").to_boolean());
    }

    #[test]
    fn optional_chaining_short_circuits() {
        assert!(eval_source("undefined?.x").is_undefined());
    }

    #[test]
    fn instanceof_walks_prototype_chain() {
        let src = "function F() {} var f = new F(); f instanceof F";
        assert!(eval_source(src).to_boolean());
    }

    #[test]
    fn bitwise_wraps_to_int32() {
        let v = eval_source("4294967295 | 0");
        assert_eq!(v.as_number().unwrap(), -1.0);
    }
}
