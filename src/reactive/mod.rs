//! Reactive values: observable cells and the accessor view the builder binds to.
//!
//! - [`Observable`]: a cell with `get`, `set` (synchronous notify) and
//!   `subscribe` returning an [`Unsubscribe`].
//! - [`Reactive`]: type-erased read/watch view over any reactive source.

pub mod accessor;
pub mod observable;

pub use accessor::Reactive;
pub use observable::{Observable, ObservableId, Unsubscribe};
