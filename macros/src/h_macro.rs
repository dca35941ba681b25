//! h! macro: parse builder arguments and generate `Arg` values for a build call.

use proc_macro2::{Span, TokenStream};
use quote::quote;
use syn::ext::IdentExt;
use syn::parse::{Parse, ParseStream};
use syn::punctuated::Punctuated;
use syn::{braced, bracketed, token, Error, Expr, Ident, LitStr, Result, Token};

// ---------------------------------------------------------------------------
// AST types
// ---------------------------------------------------------------------------

/// An options key: a string literal, or identifiers joined by `-`
/// (`data-id`, `r#type`).
#[derive(Debug, Clone)]
pub(crate) struct Key {
    pub name: String,
    pub span: Span,
}

/// The value side of an options entry.
pub(crate) enum EntryValue {
    /// `{ "name": expr, ... }`, only under `style` and `attrs`.
    Map(Vec<(Key, Expr)>),
    Expr(Expr),
}

/// One `key: value` pair of an options bag.
pub(crate) struct Entry {
    pub key: Key,
    pub value: EntryValue,
}

/// One positional argument.
pub(crate) enum Item {
    /// `{ key: value, ... }`
    Options(Vec<Entry>),
    /// `[ item, ... ]`
    List(Vec<Item>),
    Expr(Expr),
}

/// The top-level h! input: the builder expression, then the arguments.
struct HInput {
    builder: Expr,
    items: Vec<Item>,
}

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

impl Parse for Key {
    fn parse(input: ParseStream) -> Result<Self> {
        if input.peek(LitStr) {
            let lit: LitStr = input.parse()?;
            return Ok(Key {
                name: lit.value(),
                span: lit.span(),
            });
        }
        let first = Ident::parse_any(input)?;
        let span = first.span();
        let mut name = first.unraw().to_string();
        while input.peek(Token![-]) {
            input.parse::<Token![-]>()?;
            let next = Ident::parse_any(input)?;
            name.push('-');
            name.push_str(&next.unraw().to_string());
        }
        Ok(Key { name, span })
    }
}

impl Parse for Item {
    fn parse(input: ParseStream) -> Result<Self> {
        if input.peek(token::Brace) {
            let content;
            braced!(content in input);
            let entries = Punctuated::<Entry, Token![,]>::parse_terminated(&content)?;
            return Ok(Item::Options(entries.into_iter().collect()));
        }
        if input.peek(token::Bracket) {
            let content;
            bracketed!(content in input);
            let items = Punctuated::<Item, Token![,]>::parse_terminated(&content)?;
            return Ok(Item::List(items.into_iter().collect()));
        }
        Ok(Item::Expr(input.parse()?))
    }
}

impl Parse for Entry {
    fn parse(input: ParseStream) -> Result<Self> {
        let key: Key = input.parse()?;
        input.parse::<Token![:]>()?;
        let nests = key.name == "style" || key.name == "attrs";
        let value = if nests && input.peek(token::Brace) {
            let content;
            braced!(content in input);
            let pairs = Punctuated::<MapPair, Token![,]>::parse_terminated(&content)?;
            EntryValue::Map(pairs.into_iter().map(|p| (p.key, p.value)).collect())
        } else if input.peek(token::Brace) {
            return Err(Error::new(
                key.span,
                format!("`{}` does not take a nested map; only `style` and `attrs` do", key.name),
            ));
        } else {
            EntryValue::Expr(input.parse()?)
        };
        Ok(Entry { key, value })
    }
}

struct MapPair {
    key: Key,
    value: Expr,
}

impl Parse for MapPair {
    fn parse(input: ParseStream) -> Result<Self> {
        let key = input.parse()?;
        input.parse::<Token![:]>()?;
        let value = input.parse()?;
        Ok(MapPair { key, value })
    }
}

impl Parse for HInput {
    fn parse(input: ParseStream) -> Result<Self> {
        let builder: Expr = input.parse()?;
        let mut items = Vec::new();
        while !input.is_empty() {
            input.parse::<Token![,]>()?;
            if input.is_empty() {
                break;
            }
            items.push(input.parse()?);
        }
        Ok(HInput { builder, items })
    }
}

// ---------------------------------------------------------------------------
// Code generation
// ---------------------------------------------------------------------------

fn generate_entry(entry: &Entry) -> TokenStream {
    let key = &entry.key.name;
    match &entry.value {
        EntryValue::Map(pairs) if key == "style" => {
            let sets = pairs.iter().map(|(k, v)| {
                let name = &k.name;
                quote! { .set(#name, #v) }
            });
            quote! { .style(::hyperscript::Style::new() #(#sets)*) }
        }
        EntryValue::Map(pairs) => {
            let attrs = pairs.iter().map(|(k, v)| {
                let name = &k.name;
                quote! { (#name, ::hyperscript::Value::from(#v)) }
            });
            quote! { .attrs([#(#attrs),*]) }
        }
        EntryValue::Expr(expr @ Expr::Closure(_)) if key.starts_with("on") && key.len() > 2 => {
            quote! { .handler(#key, #expr) }
        }
        EntryValue::Expr(expr) => quote! { .set(#key, #expr) },
    }
}

/// Generate an `Arg` expression for one item.
fn generate_item(item: &Item) -> TokenStream {
    match item {
        Item::Options(entries) => {
            let calls = entries.iter().map(generate_entry);
            quote! { ::hyperscript::Arg::Options(::hyperscript::Options::new() #(#calls)*) }
        }
        Item::List(items) => {
            let items = items.iter().map(generate_item);
            quote! { ::hyperscript::Arg::List(::std::vec![#(#items),*]) }
        }
        Item::Expr(expr) => quote! { ::hyperscript::Arg::from(#expr) },
    }
}

/// Entry point: generate code for the entire h! macro.
pub(crate) fn h_impl(input: TokenStream) -> Result<TokenStream> {
    let parsed: HInput = syn::parse2(input)?;
    if parsed.items.is_empty() {
        return Err(Error::new(
            Span::call_site(),
            "h! macro requires at least one argument after the builder",
        ));
    }
    let builder = &parsed.builder;
    let items = parsed.items.iter().map(generate_item);
    Ok(quote! {
        {
            let __args: ::std::vec::Vec<::hyperscript::Arg> = ::std::vec![#(#items),*];
            (#builder).build(__args)
        }
    })
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use quote::quote;

    fn parse_items(tokens: TokenStream) -> Result<Vec<Item>> {
        syn::parse2::<HInput>(tokens).map(|h| h.items)
    }

    fn gen(tokens: TokenStream) -> String {
        h_impl(tokens).unwrap().to_string()
    }

    // -----------------------------------------------------------------------
    // Parsing tests
    // -----------------------------------------------------------------------

    #[test]
    fn parse_positional_arguments() {
        let items = parse_items(quote! { b, "p.x", "text", count }).unwrap();
        assert_eq!(items.len(), 3);
        assert!(items.iter().all(|i| matches!(i, Item::Expr(_))));
    }

    #[test]
    fn parse_trailing_comma() {
        let items = parse_items(quote! { b, "p", }).unwrap();
        assert_eq!(items.len(), 1);
    }

    #[test]
    fn parse_options_keys() {
        let items = parse_items(quote! {
            b, "input", { r#type: "checkbox", data-id: 4, "aria-label": "x", for: "a" }
        })
        .unwrap();
        let Item::Options(entries) = &items[1] else {
            panic!("expected options");
        };
        let keys: Vec<_> = entries.iter().map(|e| e.key.name.as_str()).collect();
        assert_eq!(keys, ["type", "data-id", "aria-label", "for"]);
    }

    #[test]
    fn parse_nested_list() {
        let items = parse_items(quote! { b, "ul", ["a", ["b", "c"]] }).unwrap();
        let Item::List(list) = &items[1] else {
            panic!("expected list");
        };
        assert_eq!(list.len(), 2);
        assert!(matches!(&list[1], Item::List(inner) if inner.len() == 2));
    }

    #[test]
    fn parse_style_map() {
        let items = parse_items(quote! { b, "div", { style: { color: c, "font-size": "2em" } } })
            .unwrap();
        let Item::Options(entries) = &items[1] else {
            panic!("expected options");
        };
        let EntryValue::Map(pairs) = &entries[0].value else {
            panic!("expected map");
        };
        assert_eq!(pairs[0].0.name, "color");
        assert_eq!(pairs[1].0.name, "font-size");
    }

    #[test]
    fn parse_error_nested_map_elsewhere() {
        let err = parse_items(quote! { b, "div", { title: { a: 1 } } }).err().unwrap();
        assert!(err.to_string().contains("does not take a nested map"));
    }

    // -----------------------------------------------------------------------
    // Code generation tests
    // -----------------------------------------------------------------------

    #[test]
    fn codegen_expressions() {
        let s = gen(quote! { b, "p", 4 });
        assert!(s.contains(":: hyperscript :: Arg :: from (\"p\")"));
        assert!(s.contains(":: hyperscript :: Arg :: from (4)"));
        assert!(s.contains("(b) . build (__args)"));
    }

    #[test]
    fn codegen_options() {
        let s = gen(quote! { b, "input", { name: "yes", onclick: |_| {} } });
        assert!(s.contains(". set (\"name\" , \"yes\")"), "{s}");
        assert!(s.contains(". handler (\"onclick\" ,"), "{s}");
    }

    #[test]
    fn codegen_style_and_attrs() {
        let s = gen(quote! { b, "div", { style: { color: c }, attrs: { "for": "x" } } });
        assert!(s.contains(". style (:: hyperscript :: Style :: new () . set (\"color\" , c))"), "{s}");
        assert!(s.contains(". attrs ([(\"for\" , :: hyperscript :: Value :: from (\"x\"))])"), "{s}");
    }

    #[test]
    fn codegen_plain_style_is_set() {
        let s = gen(quote! { b, "div", { style: "color: red" } });
        assert!(s.contains(". set (\"style\" , \"color: red\")"), "{s}");
    }

    #[test]
    fn codegen_on_prefixed_values_are_properties() {
        let s = gen(quote! { b, "div", { only: true, online: status, onclick: handler } });
        assert!(s.contains(". set (\"only\" , true)"), "{s}");
        assert!(s.contains(". set (\"online\" , status)"), "{s}");
        assert!(s.contains(". set (\"onclick\" , handler)"), "{s}");
        assert!(!s.contains("handler (\""), "{s}");
    }

    #[test]
    fn codegen_bare_on_is_not_a_handler() {
        let s = gen(quote! { b, "div", { on: 1 } });
        assert!(s.contains(". set (\"on\" , 1)"), "{s}");
    }

    #[test]
    fn codegen_list() {
        let s = gen(quote! { b, "ul", ["a", "b"] });
        assert!(s.contains(":: hyperscript :: Arg :: List"));
    }

    #[test]
    fn codegen_requires_arguments() {
        let err = h_impl(quote! { b }).unwrap_err();
        assert!(err.to_string().contains("at least one argument"));
    }
}
