//! The builder: turns argument lists into nodes.
//!
//! A [`Builder`] owns a shared handle to the [`Document`] it creates nodes in.
//! [`Builder::build`] is the one-shot form: subscriptions it creates are never
//! released. [`Builder::context`] hands out a [`Context`] whose builds share a
//! [`Registry`], released as a unit by [`Context::teardown`].

pub mod arg;
mod bind;
pub mod classify;
pub mod options;
pub mod registry;
pub mod selector;

use std::cell::RefCell;
use std::rc::Rc;

pub use arg::{Arg, Scalar};
pub use classify::Handling;
pub use options::{OptionValue, Options, Style, StyleProp, StyleValue};
pub use registry::Registry;
pub use selector::Selector;

use crate::config::BuilderConfig;
use crate::dom::{Document, Dom, NodeId};
use crate::error::BuildError;
use classify::Assembly;

/// The node a build produced plus how each argument was handled, in
/// consumption order with lists flattened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trace {
    pub node: Option<NodeId>,
    pub handlings: Vec<Handling>,
}

/// Node builder over a shared document.
pub struct Builder<D: Document + 'static = Dom> {
    doc: Rc<RefCell<D>>,
    config: Rc<BuilderConfig>,
}

impl<D: Document + 'static> Clone for Builder<D> {
    fn clone(&self) -> Self {
        Self {
            doc: Rc::clone(&self.doc),
            config: Rc::clone(&self.config),
        }
    }
}

impl<D: Document + 'static> Builder<D> {
    pub fn new(doc: Rc<RefCell<D>>) -> Self {
        Self::with_config(doc, BuilderConfig::default())
    }

    pub fn with_config(doc: Rc<RefCell<D>>, config: BuilderConfig) -> Self {
        Self {
            doc,
            config: Rc::new(config),
        }
    }

    pub fn document(&self) -> &Rc<RefCell<D>> {
        &self.doc
    }

    pub fn config(&self) -> &BuilderConfig {
        &self.config
    }

    /// Build one node. Returns `None` if no argument established a node.
    pub fn build<I>(&self, args: I) -> Result<Option<NodeId>, BuildError>
    where
        I: IntoIterator,
        I::Item: Into<Arg>,
    {
        Ok(self.trace(args)?.node)
    }

    /// Like [`build`](Self::build), also reporting how each argument was handled.
    pub fn trace<I>(&self, args: I) -> Result<Trace, BuildError>
    where
        I: IntoIterator,
        I::Item: Into<Arg>,
    {
        self.run(&Registry::new(), args)
    }

    /// A scoped builder sharing this builder's document and config.
    pub fn context(&self) -> Context<D> {
        Context {
            builder: self.clone(),
            registry: Registry::new(),
        }
    }

    fn run<I>(&self, registry: &Registry, args: I) -> Result<Trace, BuildError>
    where
        I: IntoIterator,
        I::Item: Into<Arg>,
    {
        let _span = tracing::trace_span!("build").entered();
        let mut assembly = Assembly::new(&self.doc, &self.config, registry);
        for arg in args {
            assembly.classify(arg.into())?;
        }
        let (node, handlings) = assembly.finish();
        Ok(Trace { node, handlings })
    }
}

/// A scoped builder: every build shares one [`Registry`].
pub struct Context<D: Document + 'static = Dom> {
    builder: Builder<D>,
    registry: Registry,
}

impl<D: Document + 'static> Context<D> {
    pub fn new(doc: Rc<RefCell<D>>) -> Self {
        Builder::new(doc).context()
    }

    pub fn build<I>(&self, args: I) -> Result<Option<NodeId>, BuildError>
    where
        I: IntoIterator,
        I::Item: Into<Arg>,
    {
        Ok(self.trace(args)?.node)
    }

    pub fn trace<I>(&self, args: I) -> Result<Trace, BuildError>
    where
        I: IntoIterator,
        I::Item: Into<Arg>,
    {
        self.builder.run(&self.registry, args)
    }

    /// Release every listener and subscription created through this context.
    /// Returns how many were released; a repeated call returns 0.
    pub fn teardown(&self) -> usize {
        let released = self.registry.teardown();
        tracing::debug!(released, "context torn down");
        released
    }

    /// Number of teardown actions currently registered.
    pub fn pending(&self) -> usize {
        self.registry.len()
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn builder(&self) -> &Builder<D> {
        &self.builder
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use chrono::{FixedOffset, TimeZone};
    use pretty_assertions::assert_eq;
    use regex::Regex;

    use super::*;
    use crate::dom::dispatch_event;
    use crate::reactive::Observable;
    use crate::value::Value;

    fn builder() -> Builder {
        Builder::new(Dom::shared())
    }

    fn html(b: &Builder, node: Option<NodeId>) -> String {
        b.document().borrow().outer_html(node.unwrap())
    }

    #[test]
    fn selector_parts() {
        let b = builder();
        let node = b.build(["span.c1.c2#main"]).unwrap().unwrap();
        let doc = b.document().borrow();
        let data = doc.get(node).unwrap();
        assert_eq!(data.tag(), Some("span"));
        assert_eq!(data.classes(), ["c1", "c2"]);
        assert_eq!(data.id(), Some("main"));
    }

    #[test]
    fn class_or_id_only_uses_default_tag() {
        let b = builder();
        let panel = b.build([".panel"]).unwrap();
        let frame = b.build(["#frame"]).unwrap();
        assert_eq!(html(&b, panel), r#"<div class="panel"></div>"#);
        assert_eq!(html(&b, frame), r#"<div id="frame"></div>"#);
    }

    #[test]
    fn nested_nodes() {
        let b = builder();
        let h1 = b.build(["h1", "Title"]).unwrap().unwrap();
        let p = b.build(["p", "Paragraph"]).unwrap().unwrap();
        let div = b.build([Arg::from("div"), h1.into(), p.into()]).unwrap();
        assert_eq!(html(&b, div), "<div><h1>Title</h1><p>Paragraph</p></div>");
    }

    #[test]
    fn list_equals_positional() {
        let b = builder();
        let listed = b
            .build([Arg::from("ul"), Arg::list(["a", "b"]), "c".into()])
            .unwrap();
        let flat = b.build(["ul", "a", "b", "c"]).unwrap();
        assert_eq!(html(&b, listed), html(&b, flat));
    }

    #[test]
    fn scalars_render_canonically() {
        let b = builder();
        let date = FixedOffset::east_opt(0)
            .unwrap()
            .with_ymd_and_hms(2001, 1, 15, 0, 0, 0)
            .unwrap();
        let node = b
            .build([
                Arg::from("p"),
                true.into(),
                false.into(),
                4_i32.into(),
                date.into(),
                Regex::new("hello").unwrap().into(),
            ])
            .unwrap();
        assert_eq!(
            b.document().borrow().text_content(node.unwrap()),
            "truefalse4Mon Jan 15 2001 00:00:00 GMT+0000/hello/"
        );
        assert_eq!(b.document().borrow().children(node.unwrap()).len(), 5);
    }

    #[test]
    fn input_attributes_are_ordered() {
        let b = builder();
        let node = b
            .build([
                Arg::from("input"),
                Options::new().set("name", "yes").set("type", "checkbox").into(),
            ])
            .unwrap();
        assert_eq!(html(&b, node), r#"<input name="yes" type="checkbox">"#);
    }

    #[test]
    fn reactive_style_follows_value() {
        let b = builder();
        let color = Observable::new("red");
        let node = b
            .build([
                Arg::from("div"),
                Options::new().style(Style::new().set("color", color)).into(),
            ])
            .unwrap()
            .unwrap();
        let color_of = || {
            b.document()
                .borrow()
                .get(node)
                .unwrap()
                .style_property("color")
                .map(str::to_owned)
        };
        assert_eq!(color_of().as_deref(), Some("red"));
        color.set("blue");
        assert_eq!(color_of().as_deref(), Some("blue"));
    }

    #[test]
    fn one_shot_build_keeps_subscriptions() {
        let b = builder();
        let text = Observable::new("a");
        b.build([Arg::from("p"), text.into()]).unwrap();
        assert_eq!(text.subscriber_count(), 1);
    }

    #[test]
    fn teardown_freezes_nodes() {
        let b = builder();
        let ctx = b.context();
        let title = Observable::new("Welcome");
        let color = Observable::new("red");
        let clicks = Rc::new(Cell::new(0));
        let c = Rc::clone(&clicks);

        let node = ctx
            .build([
                Arg::from("h1"),
                Options::new()
                    .style(Style::new().set("color", color))
                    .on("click", move |_| c.set(c.get() + 1))
                    .into(),
                title.into(),
            ])
            .unwrap()
            .unwrap();
        assert_eq!(ctx.pending(), 3);

        title.set("Hello");
        dispatch_event(b.document(), node, "click");
        assert_eq!(html(&b, Some(node)), r#"<h1 style="color: red;">Hello</h1>"#);
        assert_eq!(clicks.get(), 1);

        assert_eq!(ctx.teardown(), 3);
        title.set("Gone");
        color.set("blue");
        dispatch_event(b.document(), node, "click");
        assert_eq!(html(&b, Some(node)), r#"<h1 style="color: red;">Hello</h1>"#);
        assert_eq!(clicks.get(), 1);
        assert_eq!(title.subscriber_count(), 0);

        assert_eq!(ctx.teardown(), 0);
        assert_eq!(ctx.pending(), 0);
    }

    #[test]
    fn context_shares_registry_across_builds() {
        let ctx = Context::new(Dom::shared());
        let v = Observable::new(1);
        ctx.build([Arg::from("p"), v.into()]).unwrap();
        ctx.build([Arg::from("p"), v.into()]).unwrap();
        assert_eq!(ctx.pending(), 2);
        assert_eq!(v.subscriber_count(), 2);
        ctx.teardown();
        assert_eq!(v.subscriber_count(), 0);
    }

    #[test]
    fn reactive_properties() {
        let b = builder();
        let checked = Observable::new(false);
        let node = b
            .build([
                Arg::from("input"),
                Options::new().set("type", "checkbox").set("checked", checked).into(),
            ])
            .unwrap()
            .unwrap();
        checked.set(true);
        assert_eq!(
            b.document().borrow().get_property(node, "checked"),
            Some(Value::Bool(true))
        );
    }

    #[test]
    fn trace_reports_handlings() {
        let b = builder();
        let trace = b
            .trace([Arg::from("p"), "x".into(), Arg::Empty, Options::new().into()])
            .unwrap();
        assert!(trace.node.is_some());
        assert_eq!(
            trace.handlings,
            vec![Handling::Selector, Handling::Text, Handling::Skipped, Handling::Options]
        );
    }

    #[test]
    fn errors_stop_the_build() {
        let b = builder();
        assert_eq!(
            b.build([Arg::from(4_i32)]).unwrap_err(),
            BuildError::NoNode { kind: "scalar" }
        );
        let err = b
            .build([Arg::from("p"), Options::new().set("attrs", 1).into()])
            .unwrap_err();
        assert!(matches!(err, BuildError::InvalidOption { .. }));
    }
}
