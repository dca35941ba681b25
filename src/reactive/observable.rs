//! Observable<T>: a reactive cell with read, write-and-notify, and subscribe.
//!
//! Cells live in a single-threaded, thread-local runtime; an `Observable<T>`
//! is a `Copy` handle holding the cell's id. Notification is synchronous: by
//! the time `set` returns, every subscriber has seen the new value.

use std::any::Any;
use std::cell::RefCell;
use std::fmt;
use std::marker::PhantomData;
use std::rc::Rc;

use slotmap::{new_key_type, SlotMap};

new_key_type! {
    /// Identifies a cell inside the runtime.
    pub struct ObservableId;
    struct SubscriberId;
}

// ---------------------------------------------------------------------------
// Runtime internals
// ---------------------------------------------------------------------------

type Subscriber = Rc<dyn Fn(&dyn Any)>;

struct Cell {
    value: Box<dyn Any>,
    subscribers: SlotMap<SubscriberId, Subscriber>,
}

struct Runtime {
    cells: SlotMap<ObservableId, Cell>,
}

thread_local! {
    static RUNTIME: RefCell<Runtime> = RefCell::new(Runtime {
        cells: SlotMap::with_key(),
    });
}

// ---------------------------------------------------------------------------
// Unsubscribe
// ---------------------------------------------------------------------------

/// A one-shot teardown action returned by `subscribe`.
///
/// Dropping an `Unsubscribe` without calling it leaves the subscription in
/// place for the lifetime of the cell.
#[must_use = "dropping an Unsubscribe keeps the subscription alive"]
pub struct Unsubscribe(Box<dyn FnOnce()>);

impl Unsubscribe {
    pub fn new(f: impl FnOnce() + 'static) -> Self {
        Self(Box::new(f))
    }

    /// Run the teardown.
    pub fn call(self) {
        (self.0)()
    }
}

impl fmt::Debug for Unsubscribe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Unsubscribe(<fn>)")
    }
}

// ---------------------------------------------------------------------------
// Observable
// ---------------------------------------------------------------------------

/// Handle to a reactive cell holding a `T`.
pub struct Observable<T: 'static> {
    id: ObservableId,
    _marker: PhantomData<T>,
}

impl<T: 'static> Copy for Observable<T> {}
impl<T: 'static> Clone for Observable<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: 'static> fmt::Debug for Observable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observable").field("id", &self.id).finish()
    }
}

impl<T: 'static> Observable<T> {
    /// Create a cell holding `initial`.
    pub fn new(initial: T) -> Self {
        let id = RUNTIME.with(|rt| {
            rt.borrow_mut().cells.insert(Cell {
                value: Box::new(initial),
                subscribers: SlotMap::with_key(),
            })
        });
        Self {
            id,
            _marker: PhantomData,
        }
    }

    pub fn id(&self) -> ObservableId {
        self.id
    }

    /// Read the current value.
    pub fn get(&self) -> T
    where
        T: Clone,
    {
        self.with(T::clone)
    }

    /// Read by reference without cloning. `f` must not write this cell.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        RUNTIME.with(|rt| {
            let rt = rt.borrow();
            let value = rt.cells[self.id]
                .value
                .downcast_ref::<T>()
                .expect("observable type mismatch");
            f(value)
        })
    }

    /// Overwrite the value and notify subscribers.
    pub fn set(&self, value: T)
    where
        T: Clone,
    {
        RUNTIME.with(|rt| {
            rt.borrow_mut().cells[self.id].value = Box::new(value.clone());
        });
        self.notify(&value);
    }

    /// Mutate the value in place and notify subscribers.
    pub fn update(&self, f: impl FnOnce(&mut T))
    where
        T: Clone,
    {
        let value = RUNTIME.with(|rt| {
            let mut rt = rt.borrow_mut();
            let cell = &mut rt.cells[self.id];
            let current = cell.value.downcast_mut::<T>()?;
            f(current);
            Some(current.clone())
        });
        if let Some(value) = value {
            self.notify(&value);
        }
    }

    /// Register `f` to run with every future value. The returned
    /// [`Unsubscribe`] removes it.
    pub fn subscribe(&self, f: impl Fn(&T) + 'static) -> Unsubscribe {
        let subscriber: Subscriber = Rc::new(move |any: &dyn Any| {
            if let Some(v) = any.downcast_ref::<T>() {
                f(v);
            }
        });
        let cell_id = self.id;
        let sub_id = RUNTIME.with(|rt| {
            rt.borrow_mut().cells[cell_id]
                .subscribers
                .insert(subscriber)
        });
        Unsubscribe::new(move || {
            RUNTIME.with(|rt| {
                if let Some(cell) = rt.borrow_mut().cells.get_mut(cell_id) {
                    cell.subscribers.remove(sub_id);
                }
            });
        })
    }

    /// Number of live subscriptions on this cell.
    pub fn subscriber_count(&self) -> usize {
        RUNTIME.with(|rt| rt.borrow().cells[self.id].subscribers.len())
    }

    fn notify(&self, value: &T) {
        let subs: Vec<(SubscriberId, Subscriber)> = RUNTIME.with(|rt| {
            rt.borrow().cells[self.id]
                .subscribers
                .iter()
                .map(|(k, s)| (k, Rc::clone(s)))
                .collect()
        });
        for (key, sub) in subs {
            // A subscriber removed by an earlier one in this pass is skipped.
            let live = RUNTIME.with(|rt| rt.borrow().cells[self.id].subscribers.contains_key(key));
            if live {
                sub(value);
            }
        }
    }
}
