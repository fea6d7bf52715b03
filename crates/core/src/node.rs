//! The tree-primitive interface the patch VM operates against.
//!
//! [`DocNode`] is the abstract surface a host tree must provide: kind and
//! attribute queries, ordered child access with a parent back-reference, and
//! the small set of structural mutations (create, insert-before, remove,
//! set-attribute). The VM never owns nodes; handles are cheap clones that
//! address nodes owned by the tree itself, and equality between handles is
//! node identity, not structural equality.

use core::fmt;

/// Distinguishes the two node variants of the document model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// Owns an ordered child sequence and a set of named attributes.
    Element,
    /// Opaque string payload; never has children and can never be entered.
    Text,
}

/// Handle to one node of a host document tree.
///
/// Implementations must guarantee identity semantics for `PartialEq`: two
/// handles compare equal iff they address the same node in the same tree.
/// Child order is the only addressing scheme the VM uses, so implementations
/// must keep it stable across unrelated mutations.
pub trait DocNode: Clone + PartialEq + fmt::Debug + Sized {
    fn kind(&self) -> NodeKind;

    /// Payload of a [`NodeKind::Text`] node; `None` for elements.
    fn text_value(&self) -> Option<String>;

    /// Parent handle, or `None` for the tree root (and for detached nodes).
    fn parent(&self) -> Option<Self>;

    fn child_count(&self) -> usize;

    /// Child at `index`, or `None` when `index >= child_count()`.
    fn child(&self, index: usize) -> Option<Self>;

    /// Snapshot of the child list as handles.
    fn children_vec(&self) -> Vec<Self> {
        (0..self.child_count()).filter_map(|i| self.child(i)).collect()
    }

    fn attribute(&self, name: &str) -> Option<String>;

    /// Create a detached element with no children and no attributes.
    fn new_element() -> Self;

    /// Create a detached text leaf holding `payload`.
    fn new_text(payload: &str) -> Self;

    /// Insert `node` into this element's child list before the child at
    /// `index`; `index == child_count()` appends. The node is re-parented to
    /// this element.
    ///
    /// # Panics
    /// May panic when `index > child_count()` or when called on a text leaf;
    /// callers are expected to validate first.
    fn insert_child(&self, index: usize, node: Self);

    /// Detach and return the child at `index`, or `None` when out of range.
    /// The detached node keeps its own subtree but loses its parent link.
    fn remove_child(&self, index: usize) -> Option<Self>;

    fn set_attribute(&self, name: &str, value: &str);
}
