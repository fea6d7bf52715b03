//! The instruction set consumed by a driver.
//!
//! A program is an ordered sequence of [`Instruction`]s. How that sequence is
//! carried on a wire or on disk is the driver's business; the serde derives
//! only make the enum transportable as tagged tuples.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One structural edit step, applied against the current cursor position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Instruction {
    /// Descend into the current node, which must be an element.
    Enter,
    /// Ascend one level, advancing past the container just exited.
    Unenter,
    /// Skip `n` siblings without visiting them.
    AdvanceElements(usize),
    /// Remove `n` nodes at the current position, subtrees included.
    DeleteElements(usize),
    /// Splice a text leaf in at the current position without advancing.
    InsertDocString(String),
    /// Wrap the `n` preceding siblings into a fresh element carrying the
    /// given attributes.
    WrapPrevious(usize, BTreeMap<String, String>),
    /// Dissolve the current container, splicing its children into the parent.
    UnwrapSelf,
}
