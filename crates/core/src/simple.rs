//! Simple in-memory tree implementation of [`DocNode`].
//!
//! Backs the tests and the playground, and serves any host that does not
//! bring its own tree. Nodes are `Arc`-backed handles with interior `RwLock`s
//! so clones stay cheap and shareable; parents are held as `Weak` references
//! to keep ownership strictly parent-owns-children.
//!
//! Example:
//! ```
//! use docpatch_core::{elem, text, DocNode};
//!
//! // <p class="intro">Hello</p>
//! let p = elem()
//!     .attr("class", "intro")
//!     .child(text("Hello"))
//!     .build();
//!
//! assert_eq!(p.child_count(), 1);
//! assert_eq!(p.child(0).unwrap().text_value().as_deref(), Some("Hello"));
//! assert_eq!(p.attribute("class").as_deref(), Some("intro"));
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Arc, RwLock, Weak};

use crate::node::{DocNode, NodeKind};

#[derive(Debug)]
struct Inner {
    kind: NodeKind,
    value: Option<String>,
    attributes: RwLock<BTreeMap<String, String>>,
    parent: RwLock<Option<Weak<Inner>>>,
    children: RwLock<Vec<SimpleNode>>,
}

/// An `Arc`-backed node handle with identity equality.
#[derive(Clone)]
pub struct SimpleNode(Arc<Inner>);

impl PartialEq for SimpleNode {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for SimpleNode {}

impl std::hash::Hash for SimpleNode {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        std::ptr::hash(Arc::as_ptr(&self.0), state);
    }
}

impl fmt::Debug for SimpleNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut dbg = f.debug_struct("SimpleNode");
        dbg.field("kind", &self.0.kind);
        if let Some(value) = &self.0.value {
            dbg.field("value", value);
        }
        dbg.finish_non_exhaustive()
    }
}

impl SimpleNode {
    fn new(kind: NodeKind, value: Option<String>) -> Self {
        SimpleNode(Arc::new(Inner {
            kind,
            value,
            attributes: RwLock::new(BTreeMap::new()),
            parent: RwLock::new(None),
            children: RwLock::new(Vec::new()),
        }))
    }

    pub fn element() -> SimpleNodeBuilder {
        SimpleNodeBuilder::new()
    }

    pub fn text(payload: &str) -> SimpleNode {
        SimpleNode::new(NodeKind::Text, Some(payload.to_string()))
    }

    fn set_parent(&self, parent: Option<&SimpleNode>) {
        let mut slot = self.0.parent.write().unwrap();
        *slot = parent.map(|p| Arc::downgrade(&p.0));
    }

    /// Render the subtree as a compact string for assertions and demos,
    /// e.g. `<{class="cool"}[Goodbye, |World]>`.
    pub fn dump(&self) -> String {
        match self.kind() {
            NodeKind::Text => self.0.value.clone().unwrap_or_default(),
            NodeKind::Element => {
                let mut out = String::from("<");
                let attrs = self.0.attributes.read().unwrap();
                if !attrs.is_empty() {
                    out.push('{');
                    for (i, (k, v)) in attrs.iter().enumerate() {
                        if i > 0 {
                            out.push(' ');
                        }
                        out.push_str(k);
                        out.push_str("=\"");
                        out.push_str(v);
                        out.push('"');
                    }
                    out.push('}');
                }
                out.push('[');
                for (i, child) in self.children_vec().iter().enumerate() {
                    if i > 0 {
                        out.push('|');
                    }
                    out.push_str(&child.dump());
                }
                out.push_str("]>");
                out
            }
        }
    }
}

impl DocNode for SimpleNode {
    fn kind(&self) -> NodeKind {
        self.0.kind
    }

    fn text_value(&self) -> Option<String> {
        self.0.value.clone()
    }

    fn parent(&self) -> Option<Self> {
        let slot = self.0.parent.read().unwrap();
        slot.as_ref().and_then(Weak::upgrade).map(SimpleNode)
    }

    fn child_count(&self) -> usize {
        self.0.children.read().unwrap().len()
    }

    fn child(&self, index: usize) -> Option<Self> {
        self.0.children.read().unwrap().get(index).cloned()
    }

    fn children_vec(&self) -> Vec<Self> {
        self.0.children.read().unwrap().clone()
    }

    fn attribute(&self, name: &str) -> Option<String> {
        self.0.attributes.read().unwrap().get(name).cloned()
    }

    fn new_element() -> Self {
        SimpleNode::new(NodeKind::Element, None)
    }

    fn new_text(payload: &str) -> Self {
        SimpleNode::text(payload)
    }

    fn insert_child(&self, index: usize, node: Self) {
        node.set_parent(Some(self));
        self.0.children.write().unwrap().insert(index, node);
    }

    fn remove_child(&self, index: usize) -> Option<Self> {
        let mut children = self.0.children.write().unwrap();
        if index >= children.len() {
            return None;
        }
        let node = children.remove(index);
        node.set_parent(None);
        Some(node)
    }

    fn set_attribute(&self, name: &str, value: &str) {
        self.0
            .attributes
            .write()
            .unwrap()
            .insert(name.to_string(), value.to_string());
    }
}

/// Chainable builder for element nodes.
pub struct SimpleNodeBuilder {
    node: SimpleNode,
    pending_children: Vec<SimpleNode>,
}

impl SimpleNodeBuilder {
    fn new() -> Self {
        Self {
            node: SimpleNode::new(NodeKind::Element, None),
            pending_children: Vec::new(),
        }
    }

    pub fn attr(self, name: &str, value: &str) -> Self {
        self.node.set_attribute(name, value);
        self
    }

    pub fn child(mut self, child: impl Into<SimpleNodeOrBuilder>) -> Self {
        match child.into() {
            SimpleNodeOrBuilder::Built(n) => self.pending_children.push(n),
            SimpleNodeOrBuilder::Builder(b) => self.pending_children.push(b.build()),
        }
        self
    }

    pub fn build(self) -> SimpleNode {
        for child in &self.pending_children {
            child.set_parent(Some(&self.node));
        }
        self.node
            .0
            .children
            .write()
            .unwrap()
            .extend(self.pending_children);
        self.node
    }
}

pub enum SimpleNodeOrBuilder {
    Built(SimpleNode),
    Builder(SimpleNodeBuilder),
}

impl From<SimpleNode> for SimpleNodeOrBuilder {
    fn from(n: SimpleNode) -> Self {
        SimpleNodeOrBuilder::Built(n)
    }
}

impl From<SimpleNodeBuilder> for SimpleNodeOrBuilder {
    fn from(b: SimpleNodeBuilder) -> Self {
        SimpleNodeOrBuilder::Builder(b)
    }
}

// Convenience helpers for concise tree construction in tests.
pub fn elem() -> SimpleNodeBuilder {
    SimpleNode::element()
}

pub fn text(payload: &str) -> SimpleNode {
    SimpleNode::text(payload)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn sample_tree() -> SimpleNode {
        elem()
            .attr("class", "outer")
            .child(text("Hello, "))
            .child(elem().child(text("World")))
            .build()
    }

    #[rstest]
    fn builder_wires_parent_links(sample_tree: SimpleNode) {
        let first = sample_tree.child(0).unwrap();
        assert_eq!(first.parent().unwrap(), sample_tree);
        let inner = sample_tree.child(1).unwrap();
        assert_eq!(inner.child(0).unwrap().parent().unwrap(), inner);
    }

    #[rstest]
    fn handle_equality_is_identity(sample_tree: SimpleNode) {
        let a = text("same payload");
        let b = text("same payload");
        assert_ne!(a, b);
        assert_eq!(sample_tree.child(0).unwrap(), sample_tree.child(0).unwrap());
    }

    #[rstest]
    fn insert_and_remove_maintain_links(sample_tree: SimpleNode) {
        let inserted = text("spliced");
        sample_tree.insert_child(1, inserted.clone());
        assert_eq!(sample_tree.child_count(), 3);
        assert_eq!(inserted.parent().unwrap(), sample_tree);

        let removed = sample_tree.remove_child(1).unwrap();
        assert_eq!(removed, inserted);
        assert!(removed.parent().is_none());
        assert_eq!(sample_tree.child_count(), 2);
    }

    #[rstest]
    fn remove_out_of_range_returns_none(sample_tree: SimpleNode) {
        assert!(sample_tree.remove_child(5).is_none());
    }

    #[rstest]
    fn text_leaves_have_no_children(sample_tree: SimpleNode) {
        let leaf = sample_tree.child(0).unwrap();
        assert_eq!(leaf.kind(), NodeKind::Text);
        assert_eq!(leaf.child_count(), 0);
        assert!(leaf.child(0).is_none());
    }

    #[test]
    fn dump_renders_nested_shape() {
        let tree = elem()
            .child(text("a"))
            .child(elem().attr("class", "cool").child(text("b")))
            .build();
        assert_eq!(tree.dump(), "<[a|<{class=\"cool\"}[b]>]>");
    }

    #[test]
    fn dump_of_a_text_leaf_is_its_payload() {
        assert_eq!(text("plain").dump(), "plain");
        assert_eq!(elem().build().dump(), "<[]>");
    }
}
