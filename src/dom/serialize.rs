//! HTML serialization of subtrees.

use super::node::{NodeId, NodeKind};
use super::tree::Dom;

/// Elements that never have a closing tag.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

impl Dom {
    /// Serialize a node and its descendants. Missing nodes serialize to `""`.
    pub fn outer_html(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.write_node(id, &mut out);
        out
    }

    /// Serialize only the descendants of a node.
    pub fn inner_html(&self, id: NodeId) -> String {
        let mut out = String::new();
        for &child in self.children(id) {
            self.write_node(child, &mut out);
        }
        out
    }

    fn write_node(&self, id: NodeId, out: &mut String) {
        let Some(data) = self.get(id) else {
            return;
        };
        match &data.kind {
            NodeKind::Text(text) => escape_text(text, out),
            NodeKind::Element { tag } => {
                out.push('<');
                out.push_str(tag);
                for (name, value) in data.attributes() {
                    out.push(' ');
                    out.push_str(name);
                    out.push_str("=\"");
                    escape_attribute(value, out);
                    out.push('"');
                }
                out.push('>');
                if VOID_ELEMENTS.contains(&tag.to_ascii_lowercase().as_str()) {
                    return;
                }
                for &child in self.children(id) {
                    self.write_node(child, out);
                }
                out.push_str("</");
                out.push_str(tag);
                out.push('>');
            }
        }
    }
}

fn escape_text(text: &str, out: &mut String) {
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
}

fn escape_attribute(value: &str, out: &mut String) {
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::node::NodeData;

    #[test]
    fn empty_element() {
        let mut dom = Dom::new();
        let h1 = dom.create(NodeData::element("h1"));
        assert_eq!(dom.outer_html(h1), "<h1></h1>");
    }

    #[test]
    fn nested_with_attributes() {
        let mut dom = Dom::new();
        let div = dom.create(NodeData::element("div").with_id("app").with_class("panel"));
        let text = dom.create(NodeData::text("hi"));
        dom.append(div, text).unwrap();
        assert_eq!(
            dom.outer_html(div),
            r#"<div id="app" class="panel">hi</div>"#
        );
        assert_eq!(dom.inner_html(div), "hi");
    }

    #[test]
    fn void_elements_have_no_closing_tag() {
        let mut dom = Dom::new();
        let mut data = NodeData::element("input");
        data.set_attribute("name", "yes");
        let input = dom.create(data);
        assert_eq!(dom.outer_html(input), r#"<input name="yes">"#);
    }

    #[test]
    fn escaping() {
        let mut dom = Dom::new();
        let mut data = NodeData::element("a");
        data.set_attribute("title", r#"say "hi" & go"#);
        let a = dom.create(data);
        let text = dom.create(NodeData::text("<b> & </b>"));
        dom.append(a, text).unwrap();
        assert_eq!(
            dom.outer_html(a),
            r#"<a title="say &quot;hi&quot; &amp; go">&lt;b&gt; &amp; &lt;/b&gt;</a>"#
        );
    }

    #[test]
    fn missing_node_is_empty() {
        let mut dom = Dom::new();
        let id = dom.create(NodeData::element("p"));
        dom.remove(id);
        assert_eq!(dom.outer_html(id), "");
    }
}
