//! The instruction interpreter.
//!
//! [`PatchVm`] owns a [`CursorStack`] over a borrowed tree and exposes the
//! seven structural edit operations plus the `done` predicate. Instructions
//! are applied one at a time, each running to completion; the first violated
//! precondition aborts the run and leaves the tree in whatever state the
//! failing instruction reached.

use std::collections::BTreeMap;

use docpatch_core::{DocNode, NodeKind};
use tracing::trace;

use crate::cursor::CursorStack;
use crate::error::PatchError;
use crate::instruction::Instruction;

/// A stack-based VM replaying one edit program against one tree.
pub struct PatchVm<N: DocNode> {
    stack: CursorStack<N>,
}

impl<N: DocNode> PatchVm<N> {
    /// Start a run positioned at `(root, 0)`. The root must be an element.
    pub fn new(root: N) -> Result<Self, PatchError> {
        if root.kind() != NodeKind::Element {
            return Err(PatchError::NotAnElement);
        }
        Ok(Self { stack: CursorStack::new(root) })
    }

    /// Read-only view of the cursor stack, bottom frame first.
    pub fn cursor(&self) -> &CursorStack<N> {
        &self.stack
    }

    pub fn depth(&self) -> usize {
        self.stack.depth()
    }

    /// The sole termination signal: true once the root frame's index has
    /// consumed every root child and no nested frame remains.
    pub fn is_done(&self) -> bool {
        self.stack.is_done()
    }

    /// The child addressed by the top frame, or `None` at the end of the
    /// current container.
    pub fn current_node(&self) -> Result<Option<N>, PatchError> {
        self.stack.current_node("current_node")
    }

    /// Descend into the current node. Fails with [`PatchError::NotAnElement`]
    /// when the cursor addresses a text leaf or sits at the end.
    pub fn enter(&mut self) -> Result<(), PatchError> {
        let node = self
            .stack
            .current_node("enter")?
            .ok_or(PatchError::NotAnElement)?;
        if node.kind() != NodeKind::Element {
            return Err(PatchError::NotAnElement);
        }
        self.stack.push(node);
        trace!(depth = self.stack.depth(), "enter");
        Ok(())
    }

    /// Ascend one level, advancing the resumed frame past the container just
    /// exited.
    pub fn unenter(&mut self) -> Result<(), PatchError> {
        self.stack.pop_and_resume()?;
        trace!(depth = self.stack.depth(), "unenter");
        Ok(())
    }

    /// Skip `n` siblings. `advance_elements(0)` is a strict no-op.
    pub fn advance_elements(&mut self, n: usize) -> Result<(), PatchError> {
        self.stack.advance(n, "advance_elements")?;
        trace!(n, "advance_elements");
        Ok(())
    }

    /// Remove the node at the cursor, `n` times in a row. Removal shifts the
    /// next sibling into the same index, so the cursor does not move between
    /// iterations. Detached subtrees are dropped.
    pub fn delete_elements(&mut self, n: usize) -> Result<(), PatchError> {
        for _ in 0..n {
            let frame = self.stack.top("delete_elements")?;
            let container = frame.container().clone();
            let index = frame.index();
            container
                .remove_child(index)
                .ok_or(PatchError::NoCurrentNode { op: "delete_elements" })?;
        }
        trace!(n, "delete_elements");
        Ok(())
    }

    /// Splice a text leaf in at the current index. The cursor is not
    /// advanced, so the inserted leaf becomes the current node; programs that
    /// mean to skip past it must advance explicitly.
    pub fn insert_doc_string(&mut self, payload: &str) -> Result<(), PatchError> {
        let frame = self.stack.top("insert_doc_string")?;
        let container = frame.container().clone();
        let index = frame.index();
        container.insert_child(index, N::new_text(payload));
        trace!(index, len = payload.len(), "insert_doc_string");
        Ok(())
    }

    /// Wrap the `n` siblings immediately preceding the cursor into a fresh
    /// element carrying `attributes`. The wrapper ends up where the first of
    /// those siblings used to be, and the moved nodes keep their relative
    /// order as its children.
    ///
    /// The stored frame index is deliberately left untouched even though the
    /// wrapped siblings no longer count; a program that does not account for
    /// the shift sees [`PatchError::OutOfRange`] on its next cursor read.
    pub fn wrap_previous(
        &mut self,
        n: usize,
        attributes: &BTreeMap<String, String>,
    ) -> Result<(), PatchError> {
        let frame = self.stack.top("wrap_previous")?;
        let container = frame.container().clone();
        let index = frame.index();
        if index < n {
            // The wrap would reach back past the start of the container:
            // `n` siblings requested, only `index` precede the cursor.
            return Err(PatchError::OutOfRange {
                op: "wrap_previous",
                what: "preceding siblings",
                value: n,
                limit: index,
            });
        }

        let wrapper = N::new_element();
        for (name, value) in attributes {
            wrapper.set_attribute(name, value);
        }
        container.insert_child(index, wrapper.clone());

        // Each move takes the sibling just before the wrapper, so the wrapper
        // slides left by one per iteration and the moved nodes stack up in
        // their original order.
        let mut wrapper_pos = index;
        for _ in 0..n {
            let moved = container
                .remove_child(wrapper_pos - 1)
                .ok_or(PatchError::NoCurrentNode { op: "wrap_previous" })?;
            wrapper.insert_child(0, moved);
            wrapper_pos -= 1;
        }
        trace!(n, index, "wrap_previous");
        Ok(())
    }

    /// Dissolve the current container: splice its children into the parent at
    /// the container's own position, then drop the emptied container. The
    /// cursor resumes in the parent immediately after the relocated content.
    pub fn unwrap_self(&mut self) -> Result<(), PatchError> {
        let node = self.stack.pop()?.container().clone();
        let parent = self.stack.top("unwrap_self")?.container().clone();
        let mut pos = parent
            .children_vec()
            .iter()
            .position(|child| child == &node)
            .ok_or(PatchError::NoCurrentNode { op: "unwrap_self" })?;

        let moved = node.child_count();
        while node.child_count() > 0 {
            let child = node
                .remove_child(0)
                .ok_or(PatchError::NoCurrentNode { op: "unwrap_self" })?;
            parent.insert_child(pos, child);
            pos += 1;
            self.stack.advance(1, "unwrap_self")?;
        }
        parent
            .remove_child(pos)
            .ok_or(PatchError::NoCurrentNode { op: "unwrap_self" })?;
        trace!(moved, depth = self.stack.depth(), "unwrap_self");
        Ok(())
    }

    /// Apply one decoded instruction.
    pub fn apply(&mut self, instruction: &Instruction) -> Result<(), PatchError> {
        match instruction {
            Instruction::Enter => self.enter(),
            Instruction::Unenter => self.unenter(),
            Instruction::AdvanceElements(n) => self.advance_elements(*n),
            Instruction::DeleteElements(n) => self.delete_elements(*n),
            Instruction::InsertDocString(payload) => self.insert_doc_string(payload),
            Instruction::WrapPrevious(n, attributes) => self.wrap_previous(*n, attributes),
            Instruction::UnwrapSelf => self.unwrap_self(),
        }
    }

    /// Apply a whole program in order, stopping at the first failure.
    pub fn run_program<I>(&mut self, program: I) -> Result<(), PatchError>
    where
        I: IntoIterator<Item = Instruction>,
    {
        for instruction in program {
            self.apply(&instruction)?;
        }
        Ok(())
    }
}
