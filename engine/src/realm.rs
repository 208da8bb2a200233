//! The Realm Record (§3.8): "a realm bundles a global object, a global
//! environment, and the set of intrinsic objects every built-in
//! constructor and prototype method needs to close over."

use rustc_hash::FxHashMap;

use crate::environment::Environment;
use crate::error::JsNativeErrorKind;
use crate::object::JsObject;
use crate::symbol::WellKnownSymbols;

/// The realm's intrinsic objects (§3.8's `%Object.prototype%`-style
/// table), condensed to the prototypes and constructors the evaluator
/// and built-ins module actually need a handle to.
#[derive(Debug, Clone)]
pub struct Intrinsics {
    pub object_prototype: JsObject,
    pub function_prototype: JsObject,
    pub array_prototype: JsObject,
    pub string_prototype: JsObject,
    pub number_prototype: JsObject,
    pub boolean_prototype: JsObject,
    pub error_prototype: JsObject,
    pub native_error_prototypes: FxHashMap<NativeErrorKindKey, JsObject>,
    pub symbol_prototype: JsObject,
    pub iterator_prototype: JsObject,
    pub promise_prototype: JsObject,
    pub constructors: FxHashMap<&'static str, JsObject>,
}

/// A hashable mirror of [`JsNativeErrorKind`] used as an intrinsics map
/// key ([`JsNativeErrorKind`] itself stays `Copy`-small and doesn't need
/// `Hash`/`Eq` anywhere else).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NativeErrorKindKey {
    Type,
    Range,
    Reference,
    Syntax,
    Eval,
    Uri,
}

impl From<JsNativeErrorKind> for NativeErrorKindKey {
    fn from(kind: JsNativeErrorKind) -> Self {
        match kind {
            JsNativeErrorKind::Type => NativeErrorKindKey::Type,
            JsNativeErrorKind::Range => NativeErrorKindKey::Range,
            JsNativeErrorKind::Reference => NativeErrorKindKey::Reference,
            JsNativeErrorKind::Syntax => NativeErrorKindKey::Syntax,
            JsNativeErrorKind::Eval => NativeErrorKindKey::Eval,
            JsNativeErrorKind::Uri => NativeErrorKindKey::Uri,
        }
    }
}

/// The realm's global environment, split the way a spec
/// GlobalEnvironmentRecord is: an Object Environment Record over the
/// global object (what `var`/function declarations bind into) with a
/// Declarative Environment Record layered on top of it (what `let`/
/// `const`/class declarations bind into, so they can shadow without
/// touching the global object's own properties).
#[derive(Debug, Clone)]
pub struct Realm {
    global_object: JsObject,
    global_object_env: Environment,
    global_lexical_env: Environment,
    intrinsics: Intrinsics,
    well_known_symbols: WellKnownSymbols,
}

impl Realm {
    #[must_use]
    pub fn new(global_object: JsObject, global_object_env: Environment, intrinsics: Intrinsics) -> Self {
        let global_lexical_env = Environment::declarative(Some(global_object_env.clone()));
        Realm { global_object, global_object_env, global_lexical_env, intrinsics, well_known_symbols: WellKnownSymbols::new() }
    }

    #[must_use]
    pub fn global_object(&self) -> JsObject {
        self.global_object.clone()
    }

    /// The environment new top-level closures capture, and the script's
    /// initial `LexicalEnvironment`.
    #[must_use]
    pub fn global_env(&self) -> Environment {
        self.global_lexical_env.clone()
    }

    /// The script's initial `VariableEnvironment`: `var`/function
    /// declarations land here, directly on the global object.
    #[must_use]
    pub fn global_var_env(&self) -> Environment {
        self.global_object_env.clone()
    }

    #[must_use]
    pub fn intrinsics(&self) -> &Intrinsics {
        &self.intrinsics
    }

    pub fn intrinsics_mut(&mut self) -> &mut Intrinsics {
        &mut self.intrinsics
    }

    #[must_use]
    pub fn well_known_symbols(&self) -> &WellKnownSymbols {
        &self.well_known_symbols
    }
}
