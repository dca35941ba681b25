//! # hyperscript
//!
//! Build element trees from compact, heterogeneous argument lists.
//!
//! A call such as `build(["p.lead#intro", "Hello"])` creates a `<p>` with a
//! class and an id, then appends a text child. Arguments may be selector
//! strings, text, scalars, existing nodes, lists, options bags (attributes,
//! properties, styles, event handlers) or reactive values that keep the node
//! in sync after construction.
//!
//! ## Core Systems
//!
//! - **[`dom`]**: Slotmap-backed node arena and the [`Document`] capability trait
//! - **[`builder`]**: Selector parsing, argument classification, option binding, entry points
//! - **[`reactive`]**: Observable cells and the type-erased [`Reactive`] accessor
//! - **[`value`]**: Dynamic values shared by properties and reactive cells
//! - **[`config`]**: Builder configuration
//! - **[`error`]**: Error types
//!
//! ## Example
//!
//! ```
//! use hyperscript::{Arg, Builder, Dom, Observable, Options};
//!
//! let builder = Builder::new(Dom::shared());
//! let ctx = builder.context();
//! let name = Observable::new("world");
//!
//! let node = ctx
//!     .build([
//!         Arg::from("p.greeting"),
//!         Options::new().set("title", "hi").into(),
//!         "Hello, ".into(),
//!         name.into(),
//!     ])
//!     .unwrap()
//!     .unwrap();
//!
//! name.set("there");
//! assert_eq!(
//!     builder.document().borrow().outer_html(node),
//!     r#"<p class="greeting" title="hi">Hello, there</p>"#
//! );
//! ctx.teardown();
//! ```

// Foundation
pub mod config;
pub mod error;
pub mod value;

// Core systems
pub mod dom;
pub mod reactive;

// Construction
pub mod builder;

pub use builder::{
    Arg, Builder, Context, Handling, OptionValue, Options, Registry, Scalar, Selector, Style,
    StyleProp, StyleValue, Trace,
};
pub use config::{BuilderConfig, UnrecognizedPolicy};
pub use dom::{dispatch_event, Document, Dom, Event, Listener, NodeId, Priority};
pub use error::{BuildError, DomError};
pub use reactive::{Observable, Reactive, Unsubscribe};
pub use value::Value;

// Proc macros (feature-gated)
#[cfg(feature = "macros")]
pub use hyperscript_macros::h;
