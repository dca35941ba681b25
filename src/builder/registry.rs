//! Teardown registry for one construction context.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::reactive::Unsubscribe;

/// Append-only list of pending teardown actions, drained as a unit.
///
/// Clones share the same list.
#[derive(Clone, Default)]
pub struct Registry {
    pending: Rc<RefCell<Vec<Unsubscribe>>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a teardown action.
    pub fn register(&self, unsubscribe: Unsubscribe) {
        self.pending.borrow_mut().push(unsubscribe);
    }

    /// Run every recorded action once, in registration order, and clear the
    /// list. Calling it again with nothing new registered does nothing.
    ///
    /// Returns how many actions ran.
    pub fn teardown(&self) -> usize {
        // Take the list first so actions may register or tear down re-entrantly.
        let drained = std::mem::take(&mut *self.pending.borrow_mut());
        let count = drained.len();
        for unsubscribe in drained {
            unsubscribe.call();
        }
        count
    }

    pub fn len(&self) -> usize {
        self.pending.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.borrow().is_empty()
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("pending", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn logging(log: &Rc<RefCell<Vec<u32>>>, n: u32) -> Unsubscribe {
        let log = Rc::clone(log);
        Unsubscribe::new(move || log.borrow_mut().push(n))
    }

    #[test]
    fn teardown_runs_in_registration_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let registry = Registry::new();
        registry.register(logging(&log, 1));
        registry.register(logging(&log, 2));
        registry.register(logging(&log, 3));
        assert_eq!(registry.len(), 3);
        assert_eq!(registry.teardown(), 3);
        assert_eq!(*log.borrow(), vec![1, 2, 3]);
        assert!(registry.is_empty());
    }

    #[test]
    fn second_teardown_is_a_noop() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let registry = Registry::new();
        registry.register(logging(&log, 1));
        registry.teardown();
        assert_eq!(registry.teardown(), 0);
        assert_eq!(*log.borrow(), vec![1]);
    }

    #[test]
    fn clones_share_the_list() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let registry = Registry::new();
        let other = registry.clone();
        other.register(logging(&log, 7));
        assert_eq!(registry.teardown(), 1);
        assert_eq!(*log.borrow(), vec![7]);
    }

    #[test]
    fn registering_after_teardown_is_kept_for_the_next_one() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let registry = Registry::new();
        registry.register(logging(&log, 1));
        registry.teardown();
        registry.register(logging(&log, 2));
        assert_eq!(registry.teardown(), 1);
        assert_eq!(*log.borrow(), vec![1, 2]);
    }
}
