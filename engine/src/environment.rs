//! Environment Records (§3.6): "Declarative ... Object ... Function ...
//! Global", linked into an environment chain via `outer`.

use ecma_gc::{Finalize, Gc, GcRefCell, Trace};
use rustc_hash::FxHashMap;

use ecma_interner::Sym;

use crate::context::Context;
use crate::error::{JsNativeError, JsResult};
use crate::object::JsObject;
use crate::value::JsValue;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindingKind {
    /// `var`-style: created during instantiation, initialized to
    /// `undefined`, re-declarable.
    Mutable,
    /// `let`: mutable once initialized, but starts in the temporal dead
    /// zone (§3.6 "the binding exists but reading/writing before its
    /// declaration throws a ReferenceError — 'temporal dead zone'").
    MutableLexical,
    /// `const`: like `MutableLexical`, but a second `set` throws.
    Immutable,
}

#[derive(Debug, Clone)]
struct Binding {
    kind: BindingKind,
    value: Option<JsValue>,
}

impl Finalize for Binding {}
unsafe impl Trace for Binding {
    ecma_gc::custom_trace!(this, this.value.trace());
}

/// A Declarative Environment Record: the bindings introduced by a block,
/// function body, `catch` clause, or `for` loop head.
#[derive(Debug, Default)]
pub struct DeclarativeEnvironment {
    bindings: GcRefCell<FxHashMap<Sym, Binding>>,
}

impl Finalize for DeclarativeEnvironment {}
unsafe impl Trace for DeclarativeEnvironment {
    ecma_gc::custom_trace!(this, {
        for binding in this.bindings.borrow().values() {
            binding.trace();
        }
    });
}

impl DeclarativeEnvironment {
    fn create(&self, name: Sym, kind: BindingKind, value: Option<JsValue>) {
        self.bindings.borrow_mut().insert(name, Binding { kind, value });
    }

    fn has_binding(&self, name: Sym) -> bool {
        self.bindings.borrow().contains_key(&name)
    }

    fn initialize(&self, name: Sym, value: JsValue) {
        if let Some(binding) = self.bindings.borrow_mut().get_mut(&name) {
            binding.value = Some(value);
        }
    }

    fn get(&self, name: Sym) -> JsResult<JsValue> {
        let bindings = self.bindings.borrow();
        match bindings.get(&name) {
            Some(Binding { value: Some(v), .. }) => Ok(v.clone()),
            Some(Binding { value: None, .. }) => {
                Err(JsNativeError::reference().with_message("cannot access binding before initialization").into())
            }
            None => Err(JsNativeError::reference().with_message("binding not found").into()),
        }
    }

    fn set(&self, name: Sym, value: JsValue) -> JsResult<()> {
        let mut bindings = self.bindings.borrow_mut();
        match bindings.get_mut(&name) {
            Some(Binding { kind: BindingKind::Immutable, value: Some(_), .. }) => {
                Err(JsNativeError::typ().with_message("assignment to constant variable").into())
            }
            Some(binding) if binding.value.is_none() => {
                Err(JsNativeError::reference().with_message("cannot access binding before initialization").into())
            }
            Some(binding) => {
                binding.value = Some(value);
                Ok(())
            }
            None => Err(JsNativeError::reference().with_message("binding not found").into()),
        }
    }

    fn delete(&self, name: Sym) -> bool {
        self.bindings.borrow_mut().remove(&name);
        true
    }
}

/// An Object Environment Record (`with` statements, the global object's
/// own declarations): bindings delegate to an object's properties.
#[derive(Debug)]
pub struct ObjectEnvironment {
    bindings: JsObject,
    with_environment: bool,
}

impl Finalize for ObjectEnvironment {}
unsafe impl Trace for ObjectEnvironment {
    ecma_gc::custom_trace!(this, this.bindings.trace());
}

/// A single link in the environment chain.
#[derive(Debug)]
struct EnvironmentRecord {
    outer: Option<Environment>,
    kind: EnvironmentKind,
}

#[derive(Debug)]
enum EnvironmentKind {
    Declarative(DeclarativeEnvironment),
    Object(ObjectEnvironment),
    /// A Function Environment Record: a declarative environment plus
    /// `this`, for ordinary (non-arrow) function calls. `this` is a cell
    /// rather than a plain field because derived-class constructors start
    /// with no `this` binding until `super()` runs (§3.6 "this binding
    /// ... uninitialized until the superclass constructor ... returns").
    Function { declarative: DeclarativeEnvironment, this: GcRefCell<Option<JsValue>>, new_target: JsValue },
}

impl Finalize for EnvironmentRecord {}
unsafe impl Trace for EnvironmentRecord {
    ecma_gc::custom_trace!(this, {
        this.outer.trace();
        match &this.kind {
            EnvironmentKind::Declarative(d) => d.trace(),
            EnvironmentKind::Object(o) => o.trace(),
            EnvironmentKind::Function { declarative, this: this_val, new_target } => {
                declarative.trace();
                this_val.trace();
                new_target.trace();
            }
        }
    });
}

/// An Environment Record handle: cheap to clone, shared by every closure
/// and execution context that points at the same lexical scope.
#[derive(Debug, Clone)]
pub struct Environment {
    inner: Gc<EnvironmentRecord>,
}

impl Finalize for Environment {}
unsafe impl Trace for Environment {
    ecma_gc::custom_trace!(this, this.inner.trace());
}

impl Environment {
    #[must_use]
    pub fn declarative(outer: Option<Environment>) -> Self {
        Environment {
            inner: Gc::new(EnvironmentRecord {
                outer,
                kind: EnvironmentKind::Declarative(DeclarativeEnvironment::default()),
            }),
        }
    }

    #[must_use]
    pub fn object(outer: Option<Environment>, bindings: JsObject, with_environment: bool) -> Self {
        Environment {
            inner: Gc::new(EnvironmentRecord {
                outer,
                kind: EnvironmentKind::Object(ObjectEnvironment { bindings, with_environment }),
            }),
        }
    }

    #[must_use]
    pub fn function(outer: Option<Environment>, this: Option<JsValue>, new_target: JsValue) -> Self {
        Environment {
            inner: Gc::new(EnvironmentRecord {
                outer,
                kind: EnvironmentKind::Function {
                    declarative: DeclarativeEnvironment::default(),
                    this: GcRefCell::new(this),
                    new_target,
                },
            }),
        }
    }

    #[must_use]
    pub fn outer(&self) -> Option<Environment> {
        self.inner.outer.clone()
    }

    /// `CreateMutableBinding` / `CreateImmutableBinding` (the `var`/`let`/
    /// `const` forms collapsed into one call with a `BindingKind`).
    pub fn create_binding(&self, name: Sym, kind: BindingKind, context: &mut Context) {
        match &self.inner.kind {
            EnvironmentKind::Declarative(d) => d.create(name, kind, None),
            EnvironmentKind::Function { declarative, .. } => declarative.create(name, kind, None),
            EnvironmentKind::Object(o) => {
                let key = context.interner().resolve(name).to_string();
                o.bindings.create_data_property(key.as_str(), JsValue::undefined());
            }
        }
    }

    pub fn initialize_binding(&self, name: Sym, value: JsValue, context: &mut Context) -> JsResult<()> {
        match &self.inner.kind {
            EnvironmentKind::Declarative(d) => {
                d.initialize(name, value);
                Ok(())
            }
            EnvironmentKind::Function { declarative, .. } => {
                declarative.initialize(name, value);
                Ok(())
            }
            EnvironmentKind::Object(o) => {
                let key = context.interner().resolve(name).to_string();
                o.bindings.clone().set_or_throw(key.as_str(), value, context)
            }
        }
    }

    #[must_use]
    pub fn has_binding(&self, name: Sym, context: &mut Context) -> bool {
        match &self.inner.kind {
            EnvironmentKind::Declarative(d) => d.has_binding(name),
            EnvironmentKind::Function { declarative, .. } => declarative.has_binding(name),
            EnvironmentKind::Object(o) => {
                let key = context.interner().resolve(name).to_string();
                o.bindings.has_property(&key.as_str().into())
            }
        }
    }

    pub fn get_binding_value(&self, name: Sym, context: &mut Context) -> JsResult<JsValue> {
        match &self.inner.kind {
            EnvironmentKind::Declarative(d) => d.get(name),
            EnvironmentKind::Function { declarative, .. } => declarative.get(name),
            EnvironmentKind::Object(o) => {
                let name_str = context.interner().resolve(name).to_string();
                let key = name_str.as_str().into();
                let bindings = o.bindings.clone();
                if !bindings.has_property(&key) {
                    return Err(JsNativeError::reference().with_message(format!("{name_str} is not defined")).into());
                }
                let receiver = JsValue::Object(bindings.clone());
                bindings.get(&key, &receiver, context)
            }
        }
    }

    pub fn set_mutable_binding(&self, name: Sym, value: JsValue, context: &mut Context) -> JsResult<()> {
        match &self.inner.kind {
            EnvironmentKind::Declarative(d) => d.set(name, value),
            EnvironmentKind::Function { declarative, .. } => declarative.set(name, value),
            EnvironmentKind::Object(o) => {
                let key = context.interner().resolve(name).to_string();
                o.bindings.clone().set_or_throw(key.as_str(), value, context)
            }
        }
    }

    pub fn delete_binding(&self, name: Sym, context: &mut Context) -> bool {
        match &self.inner.kind {
            EnvironmentKind::Declarative(d) => d.delete(name),
            EnvironmentKind::Function { declarative, .. } => declarative.delete(name),
            EnvironmentKind::Object(o) => {
                if o.with_environment {
                    let key = context.interner().resolve(name).to_string();
                    o.bindings.delete(&key.as_str().into())
                } else {
                    false
                }
            }
        }
    }

    /// `HasThisBinding`/`GetThisBinding` combined: `None` means this
    /// environment doesn't provide a `this` (or a derived-class
    /// constructor hasn't called `super()` yet).
    #[must_use]
    pub fn this_binding(&self) -> Option<JsValue> {
        match &self.inner.kind {
            EnvironmentKind::Function { this, .. } => this.borrow().clone(),
            _ => None,
        }
    }

    #[must_use]
    pub fn new_target(&self) -> Option<JsValue> {
        match &self.inner.kind {
            EnvironmentKind::Function { new_target, .. } => Some(new_target.clone()),
            _ => None,
        }
    }

    /// `BindThisValue`: used once, by a derived-class constructor after
    /// its `super()` call resolves.
    pub fn bind_this(&self, this: JsValue) {
        if let EnvironmentKind::Function { this: slot, .. } = &self.inner.kind {
            *slot.borrow_mut() = Some(this);
        }
    }

    /// Resolves `name` by walking `self` then `outer` links
    /// (`GetIdentifierReference`, minus strictness tagging — callers track
    /// that separately from the AST node).
    #[must_use]
    pub fn resolve(&self, name: Sym, context: &mut Context) -> Option<Environment> {
        let mut current = Some(self.clone());
        while let Some(env) = current {
            if env.has_binding(name, context) {
                return Some(env);
            }
            current = env.outer();
        }
        None
    }

    /// Looks up the nearest environment with a `this` binding, per
    /// `GetThisEnvironment`.
    #[must_use]
    pub fn this_environment(&self) -> Environment {
        let mut current = self.clone();
        loop {
            if matches!(current.inner.kind, EnvironmentKind::Function { .. }) {
                return current;
            }
            match current.outer() {
                Some(outer) => current = outer,
                None => return current,
            }
        }
    }
}
