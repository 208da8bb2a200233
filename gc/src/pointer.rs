//! [`Gc`]: the shared, traced pointer used throughout the object/environment
//! graph (§3.9 "Ownership" — objects and environments form a cyclic graph
//! reachable from the realm and the context stack; the arena here plus
//! [`crate::internals::force_collect`] is that reachability sweep).

use std::fmt;
use std::ops::Deref;
use std::ptr::NonNull;

use crate::internals::{self, GcBoxHeader};
use crate::trace::{Finalize, Trace};

pub(crate) struct GcBox<T: ?Sized + Trace> {
    pub(crate) header: GcBoxHeader,
    pub(crate) value: T,
}

/// A garbage-collected pointer to a `Trace`able value.
///
/// Cloning a `Gc` is cheap (bumps a root count, not a deep copy) and shares
/// the underlying allocation, exactly like [`std::rc::Rc`] — except that
/// cycles through `Gc` pointers are reclaimed by the tracing collector
/// instead of leaking, which is why boa-style engines use it for the
/// object/environment graph instead of `Rc`.
pub struct Gc<T: Trace + 'static> {
    ptr: NonNull<GcBox<T>>,
}

impl<T: Trace + 'static> Gc<T> {
    /// Allocates `value` on the GC heap.
    pub fn new(value: T) -> Self {
        let gc_box = Box::new(GcBox {
            header: GcBoxHeader::new(),
            value,
        });
        let size = std::mem::size_of_val(&*gc_box);
        let ptr = NonNull::from(Box::leak(gc_box));
        // SAFETY: `ptr` was just allocated and points to a live `GcBox<T>`;
        // unsizing it to `GcBox<dyn Trace>` only erases its vtable, it
        // remains the same address.
        let erased: NonNull<GcBox<dyn Trace>> = ptr;
        internals::register(erased, size);
        Gc { ptr }
    }

    fn gc_box(&self) -> &GcBox<T> {
        // SAFETY: `self.ptr` stays valid for as long as this `Gc` is alive,
        // since it holds a root on the box (see `Clone`/`Drop`).
        unsafe { self.ptr.as_ref() }
    }

    /// Number of outstanding `Gc<T>` handles pointing at the same box,
    /// i.e. how many times this allocation is currently rooted.
    #[must_use]
    pub fn root_count(&self) -> u32 {
        self.gc_box().header.roots.get()
    }
}

impl<T: Trace + 'static> Clone for Gc<T> {
    fn clone(&self) -> Self {
        let header = &self.gc_box().header;
        header.roots.set(header.roots.get() + 1);
        Gc { ptr: self.ptr }
    }
}

impl<T: Trace + 'static> Drop for Gc<T> {
    fn drop(&mut self) {
        let header = &self.gc_box().header;
        header.roots.set(header.roots.get().saturating_sub(1));
        // Deallocation happens during the next `force_collect`, not here —
        // the box may still be reachable through a cycle another root
        // traces into.
    }
}

impl<T: Trace + 'static> Deref for Gc<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.gc_box().value
    }
}

impl<T: Trace + 'static> Finalize for Gc<T> {}

unsafe impl<T: Trace + 'static> Trace for Gc<T> {
    fn trace(&self) {
        let gc_box = self.gc_box();
        internals::mark_reachable(&gc_box.header, || gc_box.value.trace());
    }
}

impl<T: Trace + fmt::Debug> fmt::Debug for Gc<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&**self, f)
    }
}

impl<T: Trace + PartialEq> PartialEq for Gc<T> {
    fn eq(&self, other: &Self) -> bool {
        **self == **other
    }
}

impl<T: Trace + Eq> Eq for Gc<T> {}

impl<T: Trace + 'static> Gc<T> {
    /// Pointer identity: whether both handles refer to the same allocation.
    /// This is the primitive [`crate::GcRefCell`]-free variant of the
    /// object model's `SameValue` identity check for objects.
    #[must_use]
    pub fn ptr_eq(this: &Self, other: &Self) -> bool {
        std::ptr::eq(this.ptr.as_ptr(), other.ptr.as_ptr())
    }
}
