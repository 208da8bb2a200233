//! Tracing garbage collector for the ecma-rt ECMAScript runtime.
//!
//! The evaluator's object/environment graph is cyclic by nature (prototype
//! chains, closures that capture their defining environment, bound
//! functions, `Promise` reaction lists). A plain `Rc` would leak those
//! cycles. [`Gc`] is a mark-sweep-collected alternative: same ergonomics as
//! `Rc<T>`, but [`force_collect`] periodically reclaims unreachable cycles.

mod cell;
mod internals;
mod pointer;
mod trace;

pub use cell::GcRefCell;
pub use internals::{force_collect, GcTester};
pub use pointer::Gc;
pub use trace::{Finalize, Trace};

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[derive(Debug)]
    struct Node {
        next: RefCell<Option<Gc<Node>>>,
    }

    impl Finalize for Node {}
    unsafe impl Trace for Node {
        crate::custom_trace!(this, this.next.trace());
    }

    #[test]
    fn reclaims_a_cycle() {
        let a = Gc::new(Node {
            next: RefCell::new(None),
        });
        let b = Gc::new(Node {
            next: RefCell::new(Some(a.clone())),
        });
        *a.next.borrow_mut() = Some(b.clone());

        drop(a);
        drop(b);
        // Both nodes are now unreachable from any root, even though they
        // still point at each other; a non-tracing Rc pair would leak here.
        force_collect();
    }

    #[test]
    fn keeps_rooted_values_alive() {
        let v = Gc::new(42i32);
        force_collect();
        assert_eq!(*v, 42);
    }

    #[test]
    fn gc_ref_cell_allows_mutation_through_shared_gc() {
        let cell = Gc::new(GcRefCell::new(String::from("a")));
        let shared = cell.clone();
        cell.borrow_mut().push('b');
        assert_eq!(&*shared.borrow(), "ab");
    }
}
