//! Tree queries: by id, class, tag; generic predicate matching.

use super::node::{NodeData, NodeId};
use super::tree::Dom;

impl Dom {
    /// Find the first node whose `id` attribute matches.
    ///
    /// Searches the whole arena, attached or not, in insertion order.
    pub fn query_by_id(&self, id: &str) -> Option<NodeId> {
        self.iter_nodes()
            .find(|(_, data)| data.id() == Some(id))
            .map(|(node_id, _)| node_id)
    }

    /// Find all nodes that carry the given class.
    pub fn query_by_class(&self, class: &str) -> Vec<NodeId> {
        self.query_all(|data| data.has_class(class))
    }

    /// Find all elements with the given tag name.
    pub fn query_by_tag(&self, tag: &str) -> Vec<NodeId> {
        self.query_all(|data| data.tag() == Some(tag))
    }

    /// Find all nodes matching an arbitrary predicate.
    pub fn query_all(&self, predicate: impl Fn(&NodeData) -> bool) -> Vec<NodeId> {
        self.iter_nodes()
            .filter(|(_, data)| predicate(data))
            .map(|(node_id, _)| node_id)
            .collect()
    }

    fn iter_nodes(&self) -> impl Iterator<Item = (NodeId, &NodeData)> {
        self.nodes.iter()
    }
}

#[cfg(test)]
mod tests {
    use crate::dom::node::NodeData;
    use crate::dom::tree::Dom;

    fn build_query_tree() -> Dom {
        let mut dom = Dom::new();
        let root = dom.create(NodeData::element("main").with_id("root"));
        let nav = dom.create(NodeData::element("nav").with_id("sidebar").with_class("menu"));
        let save = dom.create(
            NodeData::element("button")
                .with_id("save")
                .with_class("primary")
                .with_class("btn"),
        );
        let cancel = dom.create(NodeData::element("button").with_id("cancel").with_class("btn"));
        dom.append(root, nav).unwrap();
        dom.append(nav, save).unwrap();
        dom.append(nav, cancel).unwrap();
        dom
    }

    #[test]
    fn query_by_id_found() {
        let dom = build_query_tree();
        let id = dom.query_by_id("sidebar").unwrap();
        assert_eq!(dom.get(id).unwrap().tag(), Some("nav"));
        assert!(dom.query_by_id("nonexistent").is_none());
    }

    #[test]
    fn query_by_class() {
        let dom = build_query_tree();
        assert_eq!(dom.query_by_class("btn").len(), 2);
        assert_eq!(dom.query_by_class("menu").len(), 1);
        assert!(dom.query_by_class("nope").is_empty());
    }

    #[test]
    fn query_by_tag() {
        let dom = build_query_tree();
        assert_eq!(dom.query_by_tag("button").len(), 2);
        assert_eq!(dom.query_by_tag("main").len(), 1);
    }

    #[test]
    fn text_nodes_never_match_tags() {
        let mut dom = Dom::new();
        dom.create(NodeData::text("button"));
        assert!(dom.query_by_tag("button").is_empty());
    }

    #[test]
    fn query_all_custom_predicate() {
        let dom = build_query_tree();
        let results = dom.query_all(|data| data.id().is_some_and(|id| id.starts_with('s')));
        assert_eq!(results.len(), 2);
    }
}
