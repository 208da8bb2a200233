//! The `Promise` internal slots and the abstract operations §27.2.1
//! names directly: `FulfillPromise`, `RejectPromise`, and
//! `PerformPromiseThen`. `builtins/promise.rs` wires these onto the
//! script-visible `Promise` constructor and prototype; this module only
//! knows about `ObjectKind::Promise` and the engine's job queue.

use ecma_gc::{Finalize, Trace};

use crate::context::Context;
use crate::object::{JsObject, ObjectKind};
use crate::value::JsValue;

/// §27.2.6: "A promise is in one of three mutually exclusive states."
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromiseState {
    Pending,
    Fulfilled,
    Rejected,
}

/// One entry of `[[PromiseFulfillReactions]]`/`[[PromiseRejectReactions]]`
/// (§27.2.1.3.1 `PromiseReaction` Records): the handler to run (`None`
/// is the identity/propagate-unchanged behavior an omitted `then()`
/// argument leaves in place) and the promise the reaction's outcome
/// settles.
#[derive(Debug, Clone)]
pub struct PromiseReaction {
    pub handler: Option<JsValue>,
    pub derived_promise: JsObject,
}

/// The `[[PromiseState]]`/`[[PromiseResult]]`/reaction-list internal
/// slots (§27.2.6), kept as native Rust state rather than script-visible
/// properties — reactions carry `JsObject`s and optional handler
/// `JsValue`s the property-map representation has no natural place for.
/// A settled `state` doubles as the `[[AlreadyResolved]]` guard:
/// [`fulfill_promise`]/[`reject_promise`] are no-ops once it leaves
/// `Pending`, so a resolve/reject pair never needs a separate flag.
#[derive(Debug, Clone)]
pub struct PromiseData {
    pub state: PromiseState,
    pub result: JsValue,
    pub fulfill_reactions: Vec<PromiseReaction>,
    pub reject_reactions: Vec<PromiseReaction>,
}

impl PromiseData {
    #[must_use]
    pub fn pending() -> Self {
        PromiseData { state: PromiseState::Pending, result: JsValue::undefined(), fulfill_reactions: Vec::new(), reject_reactions: Vec::new() }
    }
}

impl Finalize for PromiseData {}
unsafe impl Trace for PromiseData {
    ecma_gc::custom_trace!(this, {
        this.result.trace();
        for r in this.fulfill_reactions.iter().chain(this.reject_reactions.iter()) {
            r.handler.trace();
            r.derived_promise.trace();
        }
    });
}

#[must_use]
pub fn new_promise(context: &Context) -> JsObject {
    JsObject::new(Some(context.intrinsics().promise_prototype.clone()), ObjectKind::Promise(PromiseData::pending()))
}

/// `NewPromiseCapability` (§27.2.1.5) inlined for `%Promise%` itself:
/// a pending promise plus a resolve/reject pair that closes over it via
/// [`crate::function::FunctionKind::PromiseSettle`] — a native call gets
/// no captured-closure parameter, so the pair carries its target promise
/// as part of the function object's own data, the same way a bound
/// function carries its `[[BoundTargetFunction]]`.
#[must_use]
pub fn new_promise_capability(context: &Context) -> (JsObject, JsValue, JsValue) {
    let promise = new_promise(context);
    let function_prototype = context.intrinsics().function_prototype.clone();
    let closure = context.realm().global_env();
    let resolve = crate::function::new_promise_settle_function(promise.clone(), false, Some(function_prototype.clone()), closure.clone());
    let reject = crate::function::new_promise_settle_function(promise.clone(), true, Some(function_prototype), closure);
    (promise, JsValue::Object(resolve), JsValue::Object(reject))
}

/// `FulfillPromise` (§27.2.1.4): settles a still-pending promise as
/// fulfilled and schedules its queued fulfill reactions as jobs.
pub fn fulfill_promise(promise: &JsObject, value: JsValue, context: &mut Context) {
    settle(promise, PromiseState::Fulfilled, value, context);
}

/// `RejectPromise` (§27.2.1.7): settles a still-pending promise as
/// rejected and schedules its queued reject reactions as jobs.
pub fn reject_promise(promise: &JsObject, reason: JsValue, context: &mut Context) {
    settle(promise, PromiseState::Rejected, reason, context);
}

fn settle(promise: &JsObject, state: PromiseState, value: JsValue, context: &mut Context) {
    let reactions = promise.with_kind_mut(|kind| {
        let ObjectKind::Promise(data) = kind else { return None };
        if data.state != PromiseState::Pending {
            return None;
        }
        data.state = state;
        data.result = value.clone();
        let reactions = if state == PromiseState::Fulfilled { std::mem::take(&mut data.fulfill_reactions) } else { std::mem::take(&mut data.reject_reactions) };
        data.fulfill_reactions.clear();
        data.reject_reactions.clear();
        Some(reactions)
    });
    let Some(reactions) = reactions else { return };
    for reaction in reactions {
        let value = value.clone();
        context.enqueue_job(move |ctx| trigger_reaction_job(reaction, state, value, ctx));
    }
}

/// `[[Resolve]]` (§27.2.1.3.2's resolving function), without the full
/// thenable-job resolution cycle: a `Promise` argument adopts the
/// target's eventual state via [`perform_promise_then`]; any other
/// value (including a plain thenable object) fulfills with itself
/// rather than being chained through its own `then` — a declared
/// simplification for this non-exhaustive implementation.
pub fn resolve_promise(promise: &JsObject, value: JsValue, context: &mut Context) {
    if let JsValue::Object(obj) = &value {
        if obj.with_kind(|k| matches!(k, ObjectKind::Promise(_))) && !JsObject::ptr_eq(obj, promise) {
            perform_promise_then(obj, None, None, promise.clone(), context);
            return;
        }
    }
    fulfill_promise(promise, value, context);
}

/// `PerformPromiseThen` (§27.2.5.4.1): queues a reaction if `promise`
/// is still pending, or schedules one as a job immediately if it
/// already settled.
pub fn perform_promise_then(promise: &JsObject, on_fulfilled: Option<JsValue>, on_rejected: Option<JsValue>, derived_promise: JsObject, context: &mut Context) {
    let snapshot = promise.with_kind(|k| {
        let ObjectKind::Promise(data) = k else { return None };
        Some((data.state, data.result.clone()))
    });
    let Some((state, result)) = snapshot else { return };
    match state {
        PromiseState::Pending => {
            promise.with_kind_mut(|k| {
                if let ObjectKind::Promise(data) = k {
                    data.fulfill_reactions.push(PromiseReaction { handler: on_fulfilled, derived_promise: derived_promise.clone() });
                    data.reject_reactions.push(PromiseReaction { handler: on_rejected, derived_promise });
                }
            });
        }
        PromiseState::Fulfilled => {
            let reaction = PromiseReaction { handler: on_fulfilled, derived_promise };
            context.enqueue_job(move |ctx| trigger_reaction_job(reaction, PromiseState::Fulfilled, result, ctx));
        }
        PromiseState::Rejected => {
            let reaction = PromiseReaction { handler: on_rejected, derived_promise };
            context.enqueue_job(move |ctx| trigger_reaction_job(reaction, PromiseState::Rejected, result, ctx));
        }
    }
}

fn trigger_reaction_job(reaction: PromiseReaction, state: PromiseState, value: JsValue, context: &mut Context) {
    match (&reaction.handler, state) {
        (Some(handler), _) => match crate::function::call_from_value(handler, &JsValue::undefined(), &[value], context) {
            Ok(v) => resolve_promise(&reaction.derived_promise, v, context),
            Err(e) => {
                let v = e.into_value(context);
                reject_promise(&reaction.derived_promise, v, context);
            }
        },
        (None, PromiseState::Fulfilled) => resolve_promise(&reaction.derived_promise, value, context),
        (None, PromiseState::Rejected) => reject_promise(&reaction.derived_promise, value, context),
        (None, PromiseState::Pending) => unreachable!("a queued reaction only fires once its promise has settled"),
    }
}
