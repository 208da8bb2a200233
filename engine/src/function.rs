//! Function objects (§3.7 "function objects: parameters, [[Call]] and
//! optionally [[Construct]] ... native or ECMAScript-code-backed").

use std::rc::Rc;

use ecma_ast::{FormalParameterList, StatementList};
use ecma_gc::{Finalize, Trace};

use crate::context::Context;
use crate::environment::Environment;
use crate::error::{JsError, JsNativeError, JsResult};
use crate::object::{JsObject, ObjectKind};
use crate::string::JsString;
use crate::value::JsValue;

/// The native function pointer shape every built-in method implements
/// (§3.10 "Built-in Function Objects": `fn(this, args, context) -> JsResult<JsValue>`).
pub type NativeFunctionPointer = fn(this: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue>;

/// The native constructor pointer shape a built-in constructor
/// implements, receiving `new.target` so subclassing
/// (`class Mine extends Array {}`) can look up the right prototype.
pub type NativeConstructorPointer = fn(new_target: &JsObject, args: &[JsValue], context: &mut Context) -> JsResult<JsValue>;

/// How a non-arrow function's `this` gets bound on entry (§3.7's split
/// between "lexical this" arrows and ordinary functions, and between
/// strict/sloppy-mode `this` coercion).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThisMode {
    Lexical,
    Strict,
    Global,
}

#[derive(Clone)]
pub struct NativeFunction {
    pub pointer: NativeFunctionPointer,
    pub construct: Option<NativeConstructorPointer>,
}

impl std::fmt::Debug for NativeFunction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NativeFunction").finish_non_exhaustive()
    }
}

/// An ECMAScript-code-backed ordinary function: carries its own
/// parameter list and body so `[[Call]]`/`[[Construct]]` can run
/// `FunctionDeclarationInstantiation` against a fresh environment.
#[derive(Debug, Clone)]
pub struct OrdinaryFunction {
    pub parameters: Rc<FormalParameterList>,
    pub body: Rc<StatementList>,
    pub this_mode: ThisMode,
    pub is_generator: bool,
    pub is_async: bool,
    /// True for a derived class's constructor: `this` is not created
    /// until a `super(...)` call runs inside the constructor body
    /// (§3.6 "this binding ... uninitialized until the superclass
    /// constructor invocation").
    pub is_derived_constructor: bool,
    pub constructor_parent: Option<JsObject>,
    /// Instance field initializers (`ClassFieldDefinitionRecord`s, §3.7):
    /// keys are resolved once during class definition, values are
    /// evaluated fresh against each new instance's `this` binding —
    /// right after object creation for a base class, right after
    /// `super()` returns for a derived one.
    pub fields: Rc<Vec<(crate::property::PropertyKey, Option<ecma_ast::expression::Expression>)>>,
}

#[derive(Debug, Clone)]
pub struct ArrowFunctionData {
    pub parameters: Rc<FormalParameterList>,
    pub body: Rc<ecma_ast::function::ArrowBody>,
    pub is_async: bool,
}

/// A `Function.prototype.bind` result (§10.4.1's `[[BoundTargetFunction]]`/
/// `[[BoundThis]]`/`[[BoundArguments]]` internal slots), kept as native
/// Rust state on the function object itself rather than script-visible
/// hidden properties — the call-site `this` a bound function sees is
/// whatever the caller passed, not its own identity, so it can't recover
/// its target by reading `this` back.
#[derive(Debug, Clone)]
pub struct BoundFunctionData {
    pub target: JsObject,
    pub bound_this: JsValue,
    pub bound_args: Vec<JsValue>,
}

#[derive(Debug, Clone)]
pub enum FunctionKind {
    Native(NativeFunction),
    Ordinary(OrdinaryFunction),
    Arrow(ArrowFunctionData),
    Bound(BoundFunctionData),
    /// One half of a `NewPromiseCapability` resolve/reject pair (§27.2.1.3.2):
    /// the target promise plus whether this half rejects rather than resolves.
    PromiseSettle(JsObject, bool),
    /// A `Promise.prototype.finally` callback wrapper (§27.2.5.3): runs the
    /// captured handler with no arguments, then passes the settled value
    /// (or reason) through unchanged — rejecting if `is_reject`.
    PromiseFinally(JsValue, bool),
}

impl Finalize for FunctionKind {}
unsafe impl Trace for FunctionKind {
    ecma_gc::custom_trace!(this, {
        match this {
            FunctionKind::Bound(bound) => {
                bound.target.trace();
                bound.bound_this.trace();
                for arg in &bound.bound_args {
                    arg.trace();
                }
            }
            FunctionKind::PromiseSettle(promise, _) => promise.trace(),
            FunctionKind::PromiseFinally(handler, _) => handler.trace(),
            _ => {}
        }
    });
}

/// The data a `JsObject` of `ObjectKind::Function` carries (§3.7): its
/// code, the environment it closed over, and the bookkeeping
/// `name`/`length`/constructibility the spec's function-object creation
/// abstract operations install as own properties too, but which the
/// evaluator also needs to read back directly on `[[Call]]`.
#[derive(Debug, Clone)]
pub struct FunctionData {
    pub name: JsString,
    pub length: usize,
    pub kind: FunctionKind,
    pub closure: Environment,
    pub is_constructor: bool,
    pub is_class_constructor: bool,
    pub home_object: Option<JsObject>,
}

impl Finalize for FunctionData {}
unsafe impl Trace for FunctionData {
    ecma_gc::custom_trace!(this, {
        this.closure.trace();
        this.home_object.trace();
        this.kind.trace();
    });
}

impl FunctionData {
    #[must_use]
    pub fn native(name: JsString, length: usize, pointer: NativeFunctionPointer, closure: Environment) -> Self {
        FunctionData {
            name,
            length,
            kind: FunctionKind::Native(NativeFunction { pointer, construct: None }),
            closure,
            is_constructor: false,
            is_class_constructor: false,
            home_object: None,
        }
    }

    #[must_use]
    pub fn native_constructor(
        name: JsString,
        length: usize,
        pointer: NativeFunctionPointer,
        construct: NativeConstructorPointer,
        closure: Environment,
    ) -> Self {
        FunctionData {
            name,
            length,
            kind: FunctionKind::Native(NativeFunction { pointer, construct: Some(construct) }),
            closure,
            is_constructor: true,
            is_class_constructor: false,
            home_object: None,
        }
    }

    #[must_use]
    pub fn bound(name: JsString, length: usize, bound: BoundFunctionData, closure: Environment, is_constructor: bool) -> Self {
        FunctionData {
            name,
            length,
            kind: FunctionKind::Bound(bound),
            closure,
            is_constructor,
            is_class_constructor: false,
            home_object: None,
        }
    }
}

fn anonymous_native(name: &str, length: usize, kind: FunctionKind, closure: Environment, prototype: Option<JsObject>) -> JsObject {
    let name = JsString::new(name);
    let data = FunctionData { name: name.clone(), length, kind, closure, is_constructor: false, is_class_constructor: false, home_object: None };
    finish_native_function(data, name, length, prototype)
}

/// Builds one half of a `NewPromiseCapability` resolve/reject pair.
/// See [`crate::promise::new_promise_capability`].
#[must_use]
pub fn new_promise_settle_function(promise: JsObject, is_reject: bool, prototype: Option<JsObject>, closure: Environment) -> JsObject {
    let name = if is_reject { "reject" } else { "resolve" };
    anonymous_native(name, 1, FunctionKind::PromiseSettle(promise, is_reject), closure, prototype)
}

/// Builds a `Promise.prototype.finally` callback half. See
/// `builtins/promise.rs::finally`.
#[must_use]
pub fn new_promise_finally_function(handler: JsValue, is_reject: bool, prototype: Option<JsObject>, closure: Environment) -> JsObject {
    anonymous_native("", 1, FunctionKind::PromiseFinally(handler, is_reject), closure, prototype)
}

/// Builds the `[[BoundTargetFunction]]` function object `bind` returns
/// (§10.4.1). Constructible exactly when `target` is.
#[must_use]
pub fn new_bound_function(
    target: JsObject,
    bound_this: JsValue,
    bound_args: Vec<JsValue>,
    prototype: Option<JsObject>,
    closure: Environment,
) -> JsObject {
    let name = target.with_kind(|k| if let ObjectKind::Function(d) = k { Some(d.name.clone()) } else { None }).unwrap_or_else(|| JsString::new(""));
    let length = target.with_kind(|k| if let ObjectKind::Function(d) = k { Some(d.length.saturating_sub(bound_args.len())) } else { None }).unwrap_or(0);
    let is_ctor = target.with_kind(|k| if let ObjectKind::Function(d) = k { d.is_constructor } else { false });
    let bound_name = JsString::new(format!("bound {name}"));
    let data = FunctionData::bound(bound_name.clone(), length, BoundFunctionData { target, bound_this, bound_args }, closure, is_ctor);
    finish_native_function(data, bound_name, length, prototype)
}

/// Builds a callable `JsObject` wrapping a native function, with a
/// `FunctionPrototype`-less prototype (callers install the real one once
/// the realm's intrinsics exist).
#[must_use]
pub fn new_native_function(
    name: impl Into<JsString>,
    length: usize,
    pointer: NativeFunctionPointer,
    prototype: Option<JsObject>,
    closure: Environment,
) -> JsObject {
    let name = name.into();
    let data = FunctionData::native(name.clone(), length, pointer, closure);
    finish_native_function(data, name, length, prototype)
}

/// As [`new_native_function`], but constructible via `new` (§3.10
/// "Built-in Function Objects" that also implement `[[Construct]]`).
#[must_use]
pub fn new_native_constructor(
    name: impl Into<JsString>,
    length: usize,
    pointer: NativeFunctionPointer,
    construct: NativeConstructorPointer,
    prototype: Option<JsObject>,
    closure: Environment,
) -> JsObject {
    let name = name.into();
    let data = FunctionData::native_constructor(name.clone(), length, pointer, construct, closure);
    finish_native_function(data, name, length, prototype)
}

fn finish_native_function(data: FunctionData, name: JsString, length: usize, prototype: Option<JsObject>) -> JsObject {
    let obj = JsObject::new(prototype, ObjectKind::Function(data));
    obj.create_hidden_property("length", JsValue::from(length as f64));
    obj.create_hidden_property("name", JsValue::from(name));
    obj
}

/// `Call` (§6.2.2's behavioral abstract operation): dispatches to the
/// native pointer, or to the evaluator for ECMAScript-code functions.
pub fn call_from_value(callee: &JsValue, this: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
    let Some(obj) = callee.as_callable() else {
        return Err(JsNativeError::typ().with_message("value is not callable").into());
    };
    call_object(&obj, this, args, context)
}

pub fn call_object(obj: &JsObject, this: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
    let kind_snapshot = obj.with_kind(|kind| match kind {
        ObjectKind::Function(data) => Some((data.kind.clone(), data.closure.clone(), data.this_mode_or_strict())),
        _ => None,
    });
    let Some((kind, closure, this_mode)) = kind_snapshot else {
        return Err(JsNativeError::typ().with_message("value is not callable").into());
    };
    match kind {
        FunctionKind::Native(native) => (native.pointer)(this, args, context),
        FunctionKind::Ordinary(ordinary) => {
            context.call_ordinary_function(obj, &ordinary, &closure, this, args, this_mode)
        }
        FunctionKind::Arrow(arrow) => context.call_arrow_function(obj, &arrow, &closure, args),
        FunctionKind::Bound(bound) => {
            let mut full_args = bound.bound_args.clone();
            full_args.extend_from_slice(args);
            call_object(&bound.target, &bound.bound_this, &full_args, context)
        }
        FunctionKind::PromiseSettle(promise, is_reject) => {
            let value = args.first().cloned().unwrap_or(JsValue::undefined());
            if is_reject {
                crate::promise::reject_promise(&promise, value, context);
            } else {
                crate::promise::resolve_promise(&promise, value, context);
            }
            Ok(JsValue::undefined())
        }
        FunctionKind::PromiseFinally(handler, is_reject) => {
            let value = args.first().cloned().unwrap_or(JsValue::undefined());
            call_object(&handler.as_object().cloned().ok_or_else(|| JsError::from(JsNativeError::typ().with_message("not a function")))?, &JsValue::undefined(), &[], context)?;
            if is_reject {
                Err(JsError::from_value(value))
            } else {
                Ok(value)
            }
        }
    }
}

/// `Construct` (§6.2.2): only meaningful for constructor-capable
/// function objects (native constructors, ordinary non-arrow,
/// non-generator, non-async functions, and class constructors).
pub fn construct_object(
    obj: &JsObject,
    args: &[JsValue],
    new_target: &JsObject,
    context: &mut Context,
) -> JsResult<JsValue> {
    let snapshot = obj.with_kind(|kind| match kind {
        ObjectKind::Function(data) if data.is_constructor => Some(data.kind.clone()),
        _ => None,
    });
    match snapshot {
        Some(FunctionKind::Native(native)) => {
            let construct = native.construct.ok_or_else(|| {
                JsError::from(JsNativeError::typ().with_message("value is not a constructor"))
            })?;
            construct(new_target, args, context)
        }
        Some(FunctionKind::Ordinary(_)) => context.construct_ordinary(obj, args, new_target),
        Some(FunctionKind::Bound(bound)) => {
            let target_new_target = if JsObject::ptr_eq(new_target, obj) { bound.target.clone() } else { new_target.clone() };
            let mut full_args = bound.bound_args.clone();
            full_args.extend_from_slice(args);
            construct_object(&bound.target, &full_args, &target_new_target, context)
        }
        _ => Err(JsNativeError::typ().with_message("value is not a constructor").into()),
    }
}

impl FunctionData {
    fn this_mode_or_strict(&self) -> ThisMode {
        match &self.kind {
            FunctionKind::Ordinary(o) => o.this_mode,
            FunctionKind::Arrow(_) => ThisMode::Lexical,
            FunctionKind::Native(_) | FunctionKind::Bound(_) | FunctionKind::PromiseSettle(..) | FunctionKind::PromiseFinally(..) => ThisMode::Strict,
        }
    }
}
