//! The [`Trace`] and [`Finalize`] traits.
//!
//! Every type reachable from a [`crate::Gc`] must implement [`Trace`] so the
//! collector can discover the edges of the object graph (prototype chains,
//! closures capturing their defining environment, bound-function targets,
//! promise reaction lists — all of §3.9's "ownership" note in the spec).
//! `trace` is called during the mark phase; a [`crate::Gc`] field's own
//! `trace` impl marks its box and only recurses the first time it is
//! reached in a cycle, so a cyclic graph terminates naturally.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Runs a user-provided cleanup action the moment a value is swept. Most
/// types need no finalizer; the blanket default is a no-op.
pub trait Finalize {
    /// Called exactly once, right before the value's memory is reclaimed.
    fn finalize(&self) {}
}

/// # Safety
///
/// Implementations must call `trace()` on every [`crate::Gc`] reachable
/// through `self`, directly or through intermediate plain Rust containers.
/// Missing an edge lets the collector free a value still referenced from
/// script-visible state, which is memory-unsafe — hence this trait is
/// `unsafe` to implement, not merely to call.
pub unsafe trait Trace: Finalize {
    /// Marks every [`crate::Gc`] directly or transitively owned by `self`.
    fn trace(&self);

    /// Runs [`Finalize::finalize`] for `self`.
    fn run_finalizer(&self) {
        Finalize::finalize(self);
    }
}

/// Implements [`Trace`] (and the default [`Finalize`]) for a type with no
/// `Gc` children — `i32`, `String`, enums over such leaves, and similar.
#[macro_export]
macro_rules! empty_trace {
    () => {
        #[inline]
        fn trace(&self) {}
    };
}

/// Delegates [`Trace::trace`] to each named field, for a struct whose fields
/// are all `Trace`. Saves writing the obvious recursive impl by hand.
#[macro_export]
macro_rules! custom_trace {
    ($this:ident, $body:expr) => {
        #[inline]
        fn trace(&self) {
            let $this = self;
            $body
        }
    };
}

macro_rules! leaf_impls {
    ($($t:ty),* $(,)?) => {
        $(
            impl Finalize for $t {}
            unsafe impl Trace for $t {
                empty_trace!();
            }
        )*
    };
}

leaf_impls!(
    (), bool, char, str, String,
    i8, i16, i32, i64, i128, isize,
    u8, u16, u32, u64, u128, usize,
    f32, f64,
);

impl<T: Finalize> Finalize for Option<T> {}
unsafe impl<T: Trace> Trace for Option<T> {
    custom_trace!(this, {
        if let Some(v) = this {
            v.trace();
        }
    });
}

impl<T: Finalize, E: Finalize> Finalize for Result<T, E> {}
unsafe impl<T: Trace, E: Trace> Trace for Result<T, E> {
    custom_trace!(this, {
        match this {
            Ok(v) => v.trace(),
            Err(e) => e.trace(),
        }
    });
}

impl<T: Finalize> Finalize for Vec<T> {}
unsafe impl<T: Trace> Trace for Vec<T> {
    custom_trace!(this, {
        for v in this {
            v.trace();
        }
    });
}

impl<T: Finalize> Finalize for Box<T> {}
unsafe impl<T: Trace> Trace for Box<T> {
    custom_trace!(this, (**this).trace());
}

impl<T: Finalize> Finalize for Rc<T> {}
unsafe impl<T: Trace> Trace for Rc<T> {
    custom_trace!(this, (**this).trace());
}

impl<T: Finalize + Copy> Finalize for Cell<T> {}
unsafe impl<T: Trace + Copy> Trace for Cell<T> {
    custom_trace!(this, this.get().trace());
}

impl<T: Finalize> Finalize for RefCell<T> {}
unsafe impl<T: Trace> Trace for RefCell<T> {
    custom_trace!(this, {
        if let Ok(v) = this.try_borrow() {
            v.trace();
        }
    });
}
