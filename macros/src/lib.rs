//! Proc macros for hyperscript: the `h!` builder macro.
//!
//! This crate is not meant to be used directly. Enable the `macros` feature on `hyperscript`.

use proc_macro::TokenStream;

mod h_macro;

/// Build a node from a builder and a list of arguments.
///
/// Expands to `builder.build(args)` and so returns
/// `Result<Option<NodeId>, BuildError>`. The builder may be a `Builder` or a
/// `Context`.
///
/// # Syntax
///
/// - `{ key: expr, ... }` is an options bag. Keys are identifiers, `-`
///   joined identifiers (`data-id`) or string literals.
/// - `style: { "prop": expr, ... }` builds a style map; `attrs: { ... }`
///   sets literal attributes.
/// - A closure under an `on<event>` key binds an event handler. Any other
///   value under such a key is assigned like every other key, so pass a named
///   function as `onclick: OptionValue::handler(f)`.
/// - `[ ... ]` is a list, expanded in place.
/// - Anything else is an expression converted with `Arg::from`.
///
/// # Example
///
/// ```ignore
/// let node = h!(builder, "button.primary",
///     { r#type: "submit", onclick: |_| submit(), style: { color: color } },
///     "Save",
/// )?;
/// ```
#[proc_macro]
pub fn h(input: TokenStream) -> TokenStream {
    h_macro::h_impl(input.into())
        .unwrap_or_else(|err| err.to_compile_error())
        .into()
}
