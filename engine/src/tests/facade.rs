//! Exercises `Context::install`/`get_intrinsic`/`throw` (`SPEC_FULL.md`
//! §6's "Engine facade") directly, rather than only indirectly through
//! `builtins::initialize`'s own startup pass.

use ecma_ast::expression::{Expression, UnaryOp};

use crate::builtins::BuiltinPlugin;
use crate::context::{Context, ContextBuilder};
use crate::error::JsNativeErrorKind;
use crate::evaluator::dispatch::ExprKind;
use crate::object::{JsObject, ObjectKind};
use crate::value::JsValue;

struct CountsToTen;

impl BuiltinPlugin for CountsToTen {
    fn id(&self) -> &'static str {
        "counts-to-ten"
    }

    fn create_intrinsics(&self, context: &mut Context) {
        let obj = JsObject::new(Some(context.intrinsics().object_prototype.clone()), ObjectKind::Ordinary);
        obj.create_hidden_property("value", JsValue::from(10.0));
        context.realm().global_object().create_data_property("countsToTen", JsValue::Object(obj));
    }
}

struct NeedsMissingDependency;

impl BuiltinPlugin for NeedsMissingDependency {
    fn id(&self) -> &'static str {
        "needs-missing-dependency"
    }

    fn dependencies(&self) -> &'static [&'static str] {
        &["a-plugin-that-was-never-installed"]
    }

    fn create_intrinsics(&self, _context: &mut Context) {
        unreachable!("install should reject before this runs");
    }
}

struct ClassifiesSecretsPlugin;

fn classify_secrets(context: &mut Context, expr: &Expression) -> crate::error::JsResult<Option<JsValue>> {
    let Expression::Unary(unary) = expr else { return Ok(None) };
    if unary.op != UnaryOp::TypeOf {
        return Ok(None);
    }
    let Expression::Identifier(id) = unary.expr.as_ref() else { return Ok(None) };
    if context.interner().resolve(id.sym()) != "secret" {
        return Ok(None);
    }
    Ok(Some(JsValue::from("classified")))
}

impl BuiltinPlugin for ClassifiesSecretsPlugin {
    fn id(&self) -> &'static str {
        "classifies-secrets"
    }

    fn create_intrinsics(&self, _context: &mut Context) {}

    fn register_handlers(&self, context: &mut Context) {
        context.register_expression_handler(ExprKind::Unary, classify_secrets);
    }
}

#[test]
fn a_plugin_handler_intercepts_its_own_node_kind_and_falls_through_for_everything_else() {
    let mut context = ContextBuilder::new().build();
    context.install(&ClassifiesSecretsPlugin).unwrap();
    let result = context.evaluate_script("var secret = 1; typeof secret;").unwrap();
    assert_eq!(result.as_string().map(|s| s.to_string()), Some("classified".to_string()));
    let untouched = context.evaluate_script("typeof 1;").unwrap();
    assert_eq!(untouched.as_string().map(|s| s.to_string()), Some("number".to_string()));
}

#[test]
fn install_runs_a_plugin_exactly_once_even_if_installed_twice() {
    let mut context = ContextBuilder::new().build();
    context.install(&CountsToTen).unwrap();
    context.install(&CountsToTen).unwrap();
    let result = context.evaluate_script("countsToTen.value;").unwrap();
    assert_eq!(result.as_number(), Some(10.0));
}

#[test]
fn install_rejects_a_plugin_whose_dependency_is_not_installed() {
    let mut context = ContextBuilder::new().build();
    let err = context.install(&NeedsMissingDependency).unwrap_err();
    assert!(err.to_string().contains("a-plugin-that-was-never-installed"));
}

#[test]
fn get_intrinsic_finds_both_prototypes_and_registered_constructors() {
    let context = ContextBuilder::new().build();
    assert!(context.get_intrinsic("Object.prototype").is_some());
    assert!(context.get_intrinsic("Array").is_some());
    assert!(context.get_intrinsic("not-a-real-intrinsic").is_none());
}

#[test]
fn throw_builds_a_catchable_error_of_the_requested_kind() {
    let mut context = ContextBuilder::new().build();
    let err = context.throw(JsNativeErrorKind::Type, "went wrong");
    let value = err.into_value(&mut context);
    let obj = value.as_object().unwrap();
    let descriptor = obj.get_own_property(&crate::property::PropertyKey::from_str("name")).unwrap();
    let name = descriptor.value().and_then(|v| v.as_string()).map(|s| s.to_string());
    assert_eq!(name, Some("TypeError".to_string()));
}
