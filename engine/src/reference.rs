//! Reference Records (§3.4): "the result of evaluating an identifier or a
//! property accessor ... GetValue/PutValue operate through them so
//! assignment and `typeof` on an unresolvable reference can behave
//! specially."

use ecma_interner::Sym;

use crate::context::Context;
use crate::environment::Environment;
use crate::error::{JsNativeError, JsResult};
use crate::property::PropertyKey;
use crate::value::JsValue;

#[derive(Debug, Clone)]
pub enum ReferenceBase {
    /// An identifier reference, resolved to the environment that binds
    /// it (or unresolved, for `typeof` on a never-declared name).
    Environment(Option<Environment>, Sym),
    /// A property reference off a concrete base value.
    Value(JsValue),
}

/// A Reference Record.
#[derive(Debug, Clone)]
pub struct Reference {
    base: ReferenceBase,
    key: Option<PropertyKey>,
    strict: bool,
}

impl Reference {
    #[must_use]
    pub fn identifier(env: Option<Environment>, name: Sym, strict: bool) -> Self {
        Reference { base: ReferenceBase::Environment(env, name), key: None, strict }
    }

    #[must_use]
    pub fn property(base: JsValue, key: PropertyKey, strict: bool) -> Self {
        Reference { base: ReferenceBase::Value(base), key: Some(key), strict }
    }

    #[must_use]
    pub fn is_unresolvable_reference(&self) -> bool {
        matches!(self.base, ReferenceBase::Environment(None, _))
    }

    #[must_use]
    pub fn is_property_reference(&self) -> bool {
        matches!(self.base, ReferenceBase::Value(_))
    }

    /// `GetValue` (§3.4).
    pub fn get_value(&self, context: &mut Context) -> JsResult<JsValue> {
        match &self.base {
            ReferenceBase::Environment(None, name) => Err(JsNativeError::reference()
                .with_message(format!("{} is not defined", context.interner().resolve(*name)))
                .into()),
            ReferenceBase::Environment(Some(env), name) => env.get_binding_value(*name, context),
            ReferenceBase::Value(base) => {
                let key = self.key.clone().expect("property reference always carries a key");
                let obj = base.to_object(context)?;
                obj.get(&key, base, context)
            }
        }
    }

    /// `PutValue` (§3.4): sloppy-mode assignment to an unresolvable
    /// reference creates a global property instead of throwing, per
    /// `ResolveBinding`'s non-strict fallback.
    pub fn put_value(&self, value: JsValue, context: &mut Context) -> JsResult<()> {
        match &self.base {
            ReferenceBase::Environment(None, name) => {
                if self.strict {
                    return Err(JsNativeError::reference()
                        .with_message(format!("{} is not defined", context.interner().resolve(*name)))
                        .into());
                }
                let global = context.realm().global_object();
                let key = context.interner().resolve(*name).to_string();
                global.set_or_throw(key.as_str(), value, context)
            }
            ReferenceBase::Environment(Some(env), name) => env.set_mutable_binding(*name, value, context),
            ReferenceBase::Value(base) => {
                let key = self.key.clone().expect("property reference always carries a key");
                let obj = base.to_object(context)?;
                if !obj.set(key.clone(), value, base, context)? && self.strict {
                    return Err(JsNativeError::typ().with_message(format!("cannot assign to read only property '{key}'")).into());
                }
                Ok(())
            }
        }
    }
}
