//! [`GcRefCell`]: interior mutability for values living behind a [`crate::Gc`].
//!
//! Object property maps, environment binding maps and the context stack's
//! per-context mutable state all need `Gc<GcRefCell<T>>` rather than plain
//! `Gc<T>`, since the evaluator mutates them while other `Gc` handles to the
//! same value are alive (e.g. a closure's captured environment is read by
//! every invocation of that closure).

use std::cell::{Ref, RefCell, RefMut};
use std::fmt;

use crate::trace::{Finalize, Trace};

/// A `RefCell` whose contents are traced. Runtime-checked borrowing rules
/// are identical to `std::cell::RefCell`; a second mutable borrow while one
/// is outstanding panics, matching `RefCell`'s contract (the evaluator never
/// needs overlapping mutable borrows of the same binding map — each
/// operation completes, dropping its guard, before the next begins).
#[derive(Default)]
pub struct GcRefCell<T> {
    cell: RefCell<T>,
}

impl<T> GcRefCell<T> {
    /// Wraps `value`.
    pub fn new(value: T) -> Self {
        GcRefCell {
            cell: RefCell::new(value),
        }
    }

    /// Immutably borrows the wrapped value.
    ///
    /// # Panics
    /// Panics if the value is currently mutably borrowed.
    #[must_use]
    pub fn borrow(&self) -> Ref<'_, T> {
        self.cell.borrow()
    }

    /// Mutably borrows the wrapped value.
    ///
    /// # Panics
    /// Panics if the value is currently borrowed.
    pub fn borrow_mut(&self) -> RefMut<'_, T> {
        self.cell.borrow_mut()
    }

    /// Consumes the cell, returning the wrapped value.
    pub fn into_inner(self) -> T {
        self.cell.into_inner()
    }
}

impl<T: Finalize> Finalize for GcRefCell<T> {}

unsafe impl<T: Trace> Trace for GcRefCell<T> {
    fn trace(&self) {
        if let Ok(v) = self.cell.try_borrow() {
            v.trace();
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for GcRefCell<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GcRefCell").field("cell", &self.cell).finish()
    }
}
