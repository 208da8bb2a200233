//! [`JsObject`] and the Ordinary Object internal methods (§3.2 "the full
//! ordinary `[[...]]` internal method suite: GetPrototypeOf,
//! SetPrototypeOf, IsExtensible, PreventExtensions, GetOwnProperty,
//! DefineOwnProperty, HasProperty, Get, Set, Delete, OwnPropertyKeys, plus
//! Call/Construct for callable objects").

use ecma_gc::{Finalize, Gc, GcRefCell, Trace};
use indexmap::IndexMap;

use crate::environment::Environment;
use crate::error::{JsNativeError, JsResult};
use crate::function::FunctionData;
use crate::iteration::ArrayIteratorData;
use crate::promise::PromiseData;
use crate::property::{PropertyDescriptor, PropertyKey};
use crate::string::JsString;
use crate::value::JsValue;

/// What distinguishes an object beyond "has a property map and a
/// prototype": exotic behavior, or a wrapped primitive.
#[derive(Debug)]
pub enum ObjectKind {
    Ordinary,
    Array,
    Function(FunctionData),
    Boolean(bool),
    Number(f64),
    String(JsString),
    Error,
    Arguments,
    Promise(PromiseData),
    ArrayIterator(ArrayIteratorData),
}

impl Finalize for ObjectKind {}
unsafe impl Trace for ObjectKind {
    ecma_gc::custom_trace!(this, {
        match this {
            ObjectKind::Function(data) => data.trace(),
            ObjectKind::Promise(data) => data.trace(),
            ObjectKind::ArrayIterator(data) => data.trace(),
            _ => {}
        }
    });
}

#[derive(Debug)]
pub struct ObjectData {
    prototype: Option<JsObject>,
    extensible: bool,
    properties: IndexMap<PropertyKey, PropertyDescriptor>,
    kind: ObjectKind,
}

impl Finalize for ObjectData {}
unsafe impl Trace for ObjectData {
    ecma_gc::custom_trace!(this, {
        this.prototype.trace();
        for v in this.properties.values() {
            v.trace();
        }
        this.kind.trace();
    });
}

/// A garbage-collected ECMAScript object: every `JsObject` handle shares
/// the same underlying allocation, mirroring how objects are shared by
/// reference in the language itself.
#[derive(Debug, Clone)]
pub struct JsObject {
    inner: Gc<GcRefCell<ObjectData>>,
}

impl JsObject {
    #[must_use]
    pub fn new(prototype: Option<JsObject>, kind: ObjectKind) -> Self {
        JsObject {
            inner: Gc::new(GcRefCell::new(ObjectData {
                prototype,
                extensible: true,
                properties: IndexMap::new(),
                kind,
            })),
        }
    }

    #[must_use]
    pub fn ordinary(prototype: Option<JsObject>) -> Self {
        Self::new(prototype, ObjectKind::Ordinary)
    }

    #[must_use]
    pub fn ptr_eq(a: &JsObject, b: &JsObject) -> bool {
        Gc::ptr_eq(&a.inner, &b.inner)
    }

    #[must_use]
    pub fn is_callable(&self) -> bool {
        matches!(self.inner.borrow().kind, ObjectKind::Function(_))
    }

    #[must_use]
    pub fn is_array(&self) -> bool {
        matches!(self.inner.borrow().kind, ObjectKind::Array)
    }

    pub fn with_kind<R>(&self, f: impl FnOnce(&ObjectKind) -> R) -> R {
        f(&self.inner.borrow().kind)
    }

    pub fn with_kind_mut<R>(&self, f: impl FnOnce(&mut ObjectKind) -> R) -> R {
        f(&mut self.inner.borrow_mut().kind)
    }

    // ---- [[GetPrototypeOf]] / [[SetPrototypeOf]] ----

    #[must_use]
    pub fn prototype(&self) -> Option<JsObject> {
        self.inner.borrow().prototype.clone()
    }

    pub fn set_prototype(&self, proto: Option<JsObject>) {
        self.inner.borrow_mut().prototype = proto;
    }

    // ---- [[IsExtensible]] / [[PreventExtensions]] ----

    #[must_use]
    pub fn is_extensible(&self) -> bool {
        self.inner.borrow().extensible
    }

    pub fn prevent_extensions(&self) {
        self.inner.borrow_mut().extensible = false;
    }

    // ---- [[GetOwnProperty]] ----

    #[must_use]
    pub fn get_own_property(&self, key: &PropertyKey) -> Option<PropertyDescriptor> {
        self.inner.borrow().properties.get(key).cloned()
    }

    // ---- [[DefineOwnProperty]] ----

    /// Ordinary `[[DefineOwnProperty]]`, simplified: this implementation
    /// does not validate descriptor-merge compatibility (§9 "most
    /// complete/ornate validation code paths ... trimmed to their
    /// essential decision"), it just installs the descriptor, rejecting
    /// only the two checks scripts actually observe: extending a
    /// non-extensible object, and redefining a non-configurable property.
    pub fn define_own_property(&self, key: PropertyKey, desc: PropertyDescriptor) -> bool {
        let mut data = self.inner.borrow_mut();
        if let Some(existing) = data.properties.get(&key) {
            if !existing.configurable() {
                return false;
            }
        } else if !data.extensible {
            return false;
        }
        data.properties.insert(key, desc);
        true
    }

    pub fn delete(&self, key: &PropertyKey) -> bool {
        let mut data = self.inner.borrow_mut();
        match data.properties.get(key) {
            Some(desc) if !desc.configurable() => false,
            Some(_) => {
                data.properties.shift_remove(key);
                true
            }
            None => true,
        }
    }

    #[must_use]
    pub fn own_property_keys(&self) -> Vec<PropertyKey> {
        self.inner.borrow().properties.keys().cloned().collect()
    }

    // ---- [[HasProperty]] / [[Get]] / [[Set]] ----

    #[must_use]
    pub fn has_property(&self, key: &PropertyKey) -> bool {
        if self.inner.borrow().properties.contains_key(key) {
            return true;
        }
        match self.prototype() {
            Some(proto) => proto.has_property(key),
            None => false,
        }
    }

    /// `OrdinaryGet`: walks the prototype chain for data properties,
    /// invokes accessor getters bound to `receiver`.
    pub fn get(&self, key: &PropertyKey, receiver: &JsValue, context: &mut crate::context::Context) -> JsResult<JsValue> {
        match self.get_own_property(key) {
            Some(PropertyDescriptor::Data { value, .. }) => Ok(value),
            Some(PropertyDescriptor::Accessor { get: Some(getter), .. }) => {
                crate::function::call_from_value(&getter, receiver, &[], context)
            }
            Some(PropertyDescriptor::Accessor { get: None, .. }) => Ok(JsValue::undefined()),
            None => match self.prototype() {
                Some(proto) => proto.get(key, receiver, context),
                None => Ok(JsValue::undefined()),
            },
        }
    }

    /// `OrdinarySet`: walks to find an existing accessor/non-writable
    /// property before falling back to `CreateDataProperty` on `receiver`.
    pub fn set(
        &self,
        key: PropertyKey,
        value: JsValue,
        receiver: &JsValue,
        context: &mut crate::context::Context,
    ) -> JsResult<bool> {
        if let Some(existing) = self.get_own_property(&key) {
            return match existing {
                PropertyDescriptor::Data { writable: false, .. } => Ok(false),
                PropertyDescriptor::Data { enumerable, configurable, .. } => {
                    if let Some(receiver_obj) = receiver.as_object() {
                        Ok(receiver_obj.define_own_property(
                            key,
                            PropertyDescriptor::Data { value, writable: true, enumerable, configurable },
                        ))
                    } else {
                        Ok(false)
                    }
                }
                PropertyDescriptor::Accessor { set: Some(setter), .. } => {
                    crate::function::call_from_value(&setter, receiver, &[value], context)?;
                    Ok(true)
                }
                PropertyDescriptor::Accessor { set: None, .. } => Ok(false),
            };
        }
        if let Some(proto) = self.prototype() {
            if proto.has_property(&key) {
                return proto.set(key, value, receiver, context);
            }
        }
        if let Some(receiver_obj) = receiver.as_object() {
            Ok(receiver_obj.define_own_property(key, PropertyDescriptor::data_wec(value)))
        } else {
            Ok(false)
        }
    }

    /// Convenience: `Set` with `receiver` fixed to `self`, and a thrown
    /// `TypeError` when the assignment silently fails (used by definite
    /// `CreateDataPropertyOrThrow`-style internal callers, not by the
    /// lenient sloppy-mode `PutValue` path in `reference.rs`).
    pub fn set_or_throw(
        &self,
        key: impl Into<PropertyKey>,
        value: JsValue,
        context: &mut crate::context::Context,
    ) -> JsResult<()> {
        let key = key.into();
        let receiver = JsValue::Object(self.clone());
        if self.set(key.clone(), value, &receiver, context)? {
            Ok(())
        } else {
            Err(JsNativeError::typ().with_message(format!("cannot set property '{key}'")).into())
        }
    }

    pub fn create_data_property(&self, key: impl Into<PropertyKey>, value: JsValue) {
        self.define_own_property(key.into(), PropertyDescriptor::data_wec(value));
    }

    /// Non-enumerable variant, used for `length`, `constructor`, internal
    /// plumbing properties the spec marks `{ [[Enumerable]]: false }`.
    pub fn create_hidden_property(&self, key: impl Into<PropertyKey>, value: JsValue) {
        self.define_own_property(key.into(), PropertyDescriptor::data(value, true, false, true));
    }
}

impl PartialEq for JsObject {
    fn eq(&self, other: &Self) -> bool {
        JsObject::ptr_eq(self, other)
    }
}

impl Finalize for JsObject {}
unsafe impl Trace for JsObject {
    ecma_gc::custom_trace!(this, this.inner.trace());
}

/// The lexical environment a closure was created in, kept alive by the
/// function object that captured it (§3.9 "closures that capture their
/// defining environment").
impl ObjectData {
    #[must_use]
    pub fn captured_environment(&self) -> Option<Environment> {
        match &self.kind {
            ObjectKind::Function(data) => Some(data.closure.clone()),
            _ => None,
        }
    }
}
