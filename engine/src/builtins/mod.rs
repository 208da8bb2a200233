//! The realm's built-in globals (§3.8 "every intrinsic a realm starts
//! with"). One module per built-in, installed onto the prototypes
//! [`crate::context::ContextBuilder::build`] already created and wired
//! into the global object. Covers the constructors and prototype/static
//! methods scripts reach for most often — not every method ECMA-262
//! defines for `Object`/`Array`/`String`/etc., which this implementation
//! doesn't try to be exhaustive about.

pub mod array;
pub mod boolean;
pub mod console;
pub mod error;
pub mod function;
pub mod global;
pub mod iterator;
pub mod json;
pub mod math;
pub mod number;
pub mod object;
pub mod promise;
pub mod string;
pub mod symbol;

use crate::context::Context;
use crate::environment::Environment;
use crate::function::{new_native_constructor, new_native_function, NativeConstructorPointer, NativeFunctionPointer};
use crate::object::JsObject;
use crate::value::JsValue;

/// A pluggable unit of `CreateIntrinsics(realm, stagedGlobals)` (§6
/// "Plugin"): an id other plugins can depend on, a list of dependency ids
/// that must already be installed, and the actual realm-population step.
/// [`Context::install`] is where these get resolved against what's already
/// installed; this trait only describes one plugin's shape.
pub trait BuiltinPlugin {
    /// Stable name other plugins reference from [`Self::dependencies`] and
    /// hosts pass to diagnose a rejected install.
    fn id(&self) -> &'static str;

    /// Plugin ids that [`Context::install`] requires to already be
    /// installed before this one's [`Self::create_intrinsics`] runs.
    fn dependencies(&self) -> &'static [&'static str] {
        &[]
    }

    /// Populates the realm: creates constructors/prototypes, installs
    /// global bindings. Mirrors what each built-in module's `init` already
    /// did before plugins existed as a distinct concept.
    fn create_intrinsics(&self, context: &mut Context);

    /// Registers this plugin's syntax-operation handlers, if any (§4.3)
    /// — run once, right after [`Self::create_intrinsics`]. No built-in
    /// this workspace ships needs to intercept `Evaluation` itself, so
    /// the default is a no-op; a plug-in that does (e.g. one adding a new
    /// expression-level trap) overrides this instead of touching
    /// `evaluate_expression`/`execute_statement`'s own match arms.
    fn register_handlers(&self, _context: &mut Context) {}
}

macro_rules! leaf_plugin {
    ($name:ident, $id:literal, $init:path) => {
        struct $name;
        impl BuiltinPlugin for $name {
            fn id(&self) -> &'static str {
                $id
            }
            fn create_intrinsics(&self, context: &mut Context) {
                $init(context);
            }
        }
    };
    ($name:ident, $id:literal, $init:path, deps: [$($dep:literal),+ $(,)?]) => {
        struct $name;
        impl BuiltinPlugin for $name {
            fn id(&self) -> &'static str {
                $id
            }
            fn dependencies(&self) -> &'static [&'static str] {
                &[$($dep),+]
            }
            fn create_intrinsics(&self, context: &mut Context) {
                $init(context);
            }
        }
    };
}

leaf_plugin!(ObjectPlugin, "object", object::init);
leaf_plugin!(FunctionPlugin, "function", function::init, deps: ["object"]);
leaf_plugin!(IteratorPlugin, "iterator", iterator::init, deps: ["object"]);
leaf_plugin!(ArrayPlugin, "array", array::init, deps: ["object", "iterator", "function"]);
leaf_plugin!(BooleanPlugin, "boolean", boolean::init, deps: ["object", "function"]);
leaf_plugin!(NumberPlugin, "number", number::init, deps: ["object", "function"]);
leaf_plugin!(StringPlugin, "string", string::init, deps: ["object", "function"]);
leaf_plugin!(SymbolPlugin, "symbol", symbol::init, deps: ["object", "function"]);
leaf_plugin!(ErrorPlugin, "error", error::init, deps: ["object", "function"]);
leaf_plugin!(MathPlugin, "math", math::init, deps: ["object", "function"]);
leaf_plugin!(JsonPlugin, "json", json::init, deps: ["object", "function"]);
leaf_plugin!(PromisePlugin, "promise", promise::init, deps: ["object", "function"]);
leaf_plugin!(ConsolePlugin, "console", console::init, deps: ["function"]);
leaf_plugin!(
    GlobalPlugin,
    "global",
    global::init,
    deps: ["object", "function", "array", "boolean", "number", "string", "symbol", "error", "math", "json", "promise", "console"]
);

/// The built-in plugin set this workspace ships, unordered — dependency
/// order is resolved by [`topologically_sorted`] rather than encoded here.
fn registry() -> Vec<Box<dyn BuiltinPlugin>> {
    vec![
        Box::new(ObjectPlugin),
        Box::new(FunctionPlugin),
        Box::new(IteratorPlugin),
        Box::new(ArrayPlugin),
        Box::new(BooleanPlugin),
        Box::new(NumberPlugin),
        Box::new(StringPlugin),
        Box::new(SymbolPlugin),
        Box::new(ErrorPlugin),
        Box::new(MathPlugin),
        Box::new(JsonPlugin),
        Box::new(PromisePlugin),
        Box::new(ConsolePlugin),
        Box::new(GlobalPlugin),
    ]
}

/// Kahn's algorithm over [`BuiltinPlugin::dependencies`]: repeatedly peel
/// off plugins whose dependencies are already satisfied. The built-in set
/// is fixed and acyclic by construction, so a plugin this can't place is a
/// programming error in the table above, not something a host triggered.
fn topologically_sorted(mut remaining: Vec<Box<dyn BuiltinPlugin>>) -> Vec<Box<dyn BuiltinPlugin>> {
    let mut installed = Vec::new();
    let mut sorted = Vec::new();
    while !remaining.is_empty() {
        let mut next_remaining = Vec::new();
        let mut progressed = false;
        for plugin in remaining {
            if plugin.dependencies().iter().all(|dep| installed.contains(dep)) {
                installed.push(plugin.id());
                sorted.push(plugin);
                progressed = true;
            } else {
                next_remaining.push(plugin);
            }
        }
        remaining = next_remaining;
        if !progressed {
            let stuck: Vec<_> = remaining.iter().map(|p| p.id()).collect();
            panic!("built-in plugin dependency graph has a cycle or an unresolvable dependency among: {stuck:?}");
        }
    }
    sorted
}

/// Installs every built-in module's plugin against a freshly built
/// [`Context`] (called once, from [`crate::context::ContextBuilder::build`]),
/// in dependency order.
pub fn initialize(context: &mut Context) {
    for plugin in topologically_sorted(registry()) {
        context
            .install(plugin.as_ref())
            .expect("the built-in plugin set's dependency graph is satisfied by topological order");
    }
}

/// Attaches a non-enumerable native method to `target` under `name`,
/// matching how ordinary method properties look when a class or object
/// literal installs them (§3.2's `CreateMethodProperty`).
fn install_method(target: &JsObject, name: &str, length: usize, pointer: NativeFunctionPointer, function_prototype: &JsObject, closure: &Environment) {
    let f = new_native_function(name, length, pointer, Some(function_prototype.clone()), closure.clone());
    target.create_hidden_property(name, JsValue::Object(f));
}

/// Builds a constructor function object, wires its `prototype`/
/// `constructor` cross-links, and registers it as a global binding —
/// the one-time setup every `XConstructor::init` does for its `X`.
fn install_constructor(
    context: &mut Context,
    name: &'static str,
    length: usize,
    call: NativeFunctionPointer,
    construct: NativeConstructorPointer,
    prototype: &JsObject,
) -> JsObject {
    let function_prototype = context.intrinsics().function_prototype.clone();
    let closure = context.realm().global_env();
    let ctor = new_native_constructor(name, length, call, construct, Some(function_prototype), closure);
    ctor.create_hidden_property("prototype", JsValue::Object(prototype.clone()));
    prototype.create_hidden_property("constructor", JsValue::Object(ctor.clone()));
    context.realm().global_object().create_data_property(name, JsValue::Object(ctor.clone()));
    context.register_constructor(name, ctor.clone());
    ctor
}

/// Own, enumerable, string-keyed properties only — `Object.keys`/
/// `Object.values`/`Object.entries`/`JSON.stringify`'s `CopyDataProperties`-
/// style walk, as opposed to `for-in`'s full prototype-chain enumeration.
pub(crate) fn own_enumerable_string_keys(obj: &JsObject) -> Vec<crate::property::PropertyKey> {
    obj.own_property_keys()
        .into_iter()
        .filter(|k| matches!(k, crate::property::PropertyKey::String(_)))
        .filter(|k| obj.get_own_property(k).is_some_and(|d| d.enumerable()))
        .collect()
}
