//! Type-erased reactive accessors consumed by the builder.

use std::rc::Rc;

use super::observable::{Observable, Unsubscribe};
use crate::value::Value;

/// Read-and-watch view of a reactive value, with the payload converted to a
/// [`Value`].
///
/// The builder only ever reads and watches; writes stay on the concrete
/// cell type (e.g. [`Observable::set`]).
pub trait Reactive {
    /// The current value.
    fn current(&self) -> Value;

    /// Invoke `callback` with each future value until the returned
    /// [`Unsubscribe`] is called.
    fn watch(&self, callback: Box<dyn Fn(Value)>) -> Unsubscribe;
}

impl<T> Reactive for Observable<T>
where
    T: Clone + Into<Value> + 'static,
{
    fn current(&self) -> Value {
        self.get().into()
    }

    fn watch(&self, callback: Box<dyn Fn(Value)>) -> Unsubscribe {
        self.subscribe(move |v: &T| callback(v.clone().into()))
    }
}

impl<R: Reactive + ?Sized> Reactive for Rc<R> {
    fn current(&self) -> Value {
        (**self).current()
    }

    fn watch(&self, callback: Box<dyn Fn(Value)>) -> Unsubscribe {
        (**self).watch(callback)
    }
}
