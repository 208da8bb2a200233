//! The global, thread-local arena and the mark-sweep collection cycle.
//!
//! The engine is single-threaded (§5 of the spec), so a thread-local arena
//! with `Cell`-based bookkeeping is sufficient — no atomics, no locks.

use std::cell::{Cell, RefCell};
use std::ptr::NonNull;

use crate::pointer::GcBox;
use crate::trace::Trace;

pub(crate) struct GcBoxHeader {
    pub(crate) roots: Cell<u32>,
    pub(crate) marked: Cell<bool>,
}

impl GcBoxHeader {
    pub(crate) fn new() -> Self {
        GcBoxHeader {
            roots: Cell::new(1),
            marked: Cell::new(false),
        }
    }
}

struct Arena {
    boxes: Vec<NonNull<GcBox<dyn Trace>>>,
    bytes_allocated: usize,
    collections: usize,
}

thread_local! {
    static ARENA: RefCell<Arena> = RefCell::new(Arena {
        boxes: Vec::new(),
        bytes_allocated: 0,
        collections: 0,
    });
}

/// Collection runs once allocated bytes since the last sweep cross this
/// threshold. Kept small since this is a teaching-scale interpreter, not a
/// production VM tuned for pause times.
const COLLECT_THRESHOLD_BYTES: usize = 1 << 20;

pub(crate) fn register(ptr: NonNull<GcBox<dyn Trace>>, size: usize) {
    ARENA.with(|arena| {
        let mut a = arena.borrow_mut();
        a.boxes.push(ptr);
        a.bytes_allocated += size;
        let should_collect = a.bytes_allocated > COLLECT_THRESHOLD_BYTES;
        drop(a);
        if should_collect {
            collect();
        }
    });
}

/// Marks `header` as reachable and, the first time it is reached in this
/// cycle, recurses into its value. Called by [`crate::Gc::trace`]; exposed
/// crate-wide so `Gc<T>`'s `Trace` impl can call it without re-entering the
/// public API.
pub(crate) fn mark_reachable(header: &GcBoxHeader, recurse: impl FnOnce()) {
    if !header.marked.replace(true) {
        recurse();
    }
}

/// Runs a full mark-sweep cycle immediately, regardless of the allocation
/// threshold. Exposed for tests and for hosts that want deterministic
/// collection points (e.g. between REPL evaluations).
pub fn force_collect() {
    collect();
}

fn collect() {
    ARENA.with(|arena| {
        let mut a = arena.borrow_mut();
        a.collections += 1;

        // Mark: anything with roots > 0 is reachable from outside the
        // arena (a live `Gc<T>` the host or the running script still
        // holds); trace from there.
        for &ptr in &a.boxes {
            // SAFETY: every pointer in `boxes` was registered by `Gc::new`
            // and is only removed by the retain below, so it is still a
            // valid, live allocation.
            let gc_box = unsafe { ptr.as_ref() };
            if gc_box.header.roots.get() > 0 {
                mark_reachable(&gc_box.header, || gc_box.value.trace());
            }
        }

        let mut swept = 0usize;
        a.boxes.retain(|&ptr| {
            // SAFETY: see above.
            let gc_box = unsafe { ptr.as_ref() };
            if gc_box.header.marked.get() {
                gc_box.header.marked.set(false);
                true
            } else {
                gc_box.value.run_finalizer();
                swept += 1;
                // SAFETY: this box is unmarked, meaning no root traced into
                // it during this cycle, so no `Gc<T>` anywhere in the arena
                // or on the stack can dereference it after this point.
                unsafe {
                    drop(Box::from_raw(ptr.as_ptr()));
                }
                false
            }
        });

        a.bytes_allocated = 0;
        log::trace!("gc: collection #{} swept {swept} object(s)", a.collections);
    });
}

/// Test/debug helpers mirroring the shape of the teacher's retrieved GC
/// test helpers, scaled down to this collector's simpler bookkeeping.
#[derive(Debug, Clone, Copy)]
pub struct GcTester;

impl GcTester {
    /// Asserts that exactly `n` collection cycles have run so far on this
    /// thread.
    pub fn assert_collections(n: usize) {
        ARENA.with(|arena| assert_eq!(arena.borrow().collections, n));
    }

    /// Asserts the arena currently holds no live boxes.
    pub fn assert_empty() {
        ARENA.with(|arena| assert!(arena.borrow().boxes.is_empty()));
    }

    /// Number of boxes currently live on this thread's arena.
    #[must_use]
    pub fn live_count() -> usize {
        ARENA.with(|arena| arena.borrow().boxes.len())
    }
}
