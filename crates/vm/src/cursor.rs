//! Cursor bookkeeping for the patch VM.
//!
//! A [`CursorStack`] is a non-empty stack of [`Frame`]s. The bottom frame's
//! container is the tree root, the top frame is the container currently being
//! addressed, and stack depth equals the nesting depth of `Enter` calls not
//! yet matched by `Unenter`/`UnwrapSelf`. Only the top frame is ever read or
//! written by an instruction.

use docpatch_core::DocNode;
use smallvec::SmallVec;

use crate::error::PatchError;

/// One level of cursor nesting: a container and a position in its child list.
///
/// Outside of a mutating instruction, `0 <= index <= child_count(container)`
/// holds for every frame; `index == child_count` means the cursor sits past
/// the last child.
#[derive(Debug, Clone)]
pub struct Frame<N> {
    container: N,
    index: usize,
}

impl<N> Frame<N> {
    pub fn container(&self) -> &N {
        &self.container
    }

    pub fn index(&self) -> usize {
        self.index
    }
}

/// The VM's traversal position.
#[derive(Debug, Clone)]
pub struct CursorStack<N: DocNode> {
    frames: SmallVec<[Frame<N>; 8]>,
}

impl<N: DocNode> CursorStack<N> {
    /// Start a traversal at `(root, 0)`.
    pub fn new(root: N) -> Self {
        let mut frames = SmallVec::new();
        frames.push(Frame { container: root, index: 0 });
        Self { frames }
    }

    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// All frames, bottom (root) first. Read-only diagnostic view.
    pub fn frames(&self) -> &[Frame<N>] {
        &self.frames
    }

    /// The current frame, validated against the bounds invariant. A stored
    /// index beyond the container's child count (possible after a
    /// `WrapPrevious` the program did not compensate for) surfaces here.
    pub fn top(&self, op: &'static str) -> Result<&Frame<N>, PatchError> {
        let frame = self
            .frames
            .last()
            .ok_or(PatchError::NoCurrentNode { op })?;
        let limit = frame.container.child_count();
        if frame.index > limit {
            return Err(PatchError::OutOfRange { op, what: "index", value: frame.index, limit });
        }
        Ok(frame)
    }

    /// The child addressed by the top frame, or `None` when the cursor sits
    /// at the end of its container.
    pub fn current_node(&self, op: &'static str) -> Result<Option<N>, PatchError> {
        let frame = self.top(op)?;
        Ok(frame.container.child(frame.index))
    }

    /// True iff only the root frame remains and its index has consumed every
    /// root child. An empty stack is a defensive terminal state and also
    /// reports done.
    pub fn is_done(&self) -> bool {
        match self.frames.as_slice() {
            [] => true,
            [root] => root.index == root.container.child_count(),
            _ => false,
        }
    }

    /// Descend into `container`, which becomes the new current frame at
    /// index 0.
    pub fn push(&mut self, container: N) {
        self.frames.push(Frame { container, index: 0 });
    }

    /// Pop the top frame and advance the resumed frame past the container
    /// just exited. Fails when only the root frame is left, or when the
    /// bumped index would exceed the resumed container's child count.
    pub fn pop_and_resume(&mut self) -> Result<(), PatchError> {
        if self.frames.len() <= 1 {
            return Err(PatchError::CannotUnenterRoot);
        }
        self.frames.pop();
        self.advance(1, "unenter")
    }

    /// Pop the top frame without touching the resumed frame. Used by
    /// `UnwrapSelf`, which accounts for the exited container itself.
    pub fn pop(&mut self) -> Result<Frame<N>, PatchError> {
        if self.frames.len() <= 1 {
            return Err(PatchError::CannotUnenterRoot);
        }
        self.frames.pop().ok_or(PatchError::CannotUnenterRoot)
    }

    /// Move the top frame's index forward by `n`, keeping it within
    /// `0..=child_count`.
    pub fn advance(&mut self, n: usize, op: &'static str) -> Result<(), PatchError> {
        let frame = self
            .frames
            .last_mut()
            .ok_or(PatchError::NoCurrentNode { op })?;
        let target = frame.index + n;
        let limit = frame.container.child_count();
        if target > limit {
            return Err(PatchError::OutOfRange { op, what: "index", value: target, limit });
        }
        frame.index = target;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docpatch_core::{SimpleNode, elem, text};

    fn two_child_root() -> SimpleNode {
        elem()
            .child(elem().child(text("a")))
            .child(text("b"))
            .build()
    }

    #[test]
    fn starts_at_root_index_zero() {
        let stack = CursorStack::new(two_child_root());
        assert_eq!(stack.depth(), 1);
        assert_eq!(stack.frames()[0].index(), 0);
        assert!(!stack.is_done());
    }

    #[test]
    fn advance_to_end_is_done() {
        let mut stack = CursorStack::new(two_child_root());
        stack.advance(2, "advance_elements").unwrap();
        assert!(stack.is_done());
        assert!(stack.current_node("probe").unwrap().is_none());
    }

    #[test]
    fn advance_past_end_is_out_of_range() {
        let mut stack = CursorStack::new(two_child_root());
        let err = stack.advance(3, "advance_elements").unwrap_err();
        assert_eq!(
            err,
            PatchError::OutOfRange { op: "advance_elements", what: "index", value: 3, limit: 2 }
        );
    }

    #[test]
    fn root_frame_cannot_be_popped() {
        let mut stack = CursorStack::new(two_child_root());
        assert_eq!(stack.pop_and_resume().unwrap_err(), PatchError::CannotUnenterRoot);
        assert!(stack.pop().is_err());
    }

    #[test]
    fn pop_and_resume_consumes_the_exited_child() {
        let root = two_child_root();
        let mut stack = CursorStack::new(root.clone());
        let first = stack.current_node("probe").unwrap().unwrap();
        stack.push(first);
        assert_eq!(stack.depth(), 2);

        stack.pop_and_resume().unwrap();
        assert_eq!(stack.depth(), 1);
        assert_eq!(stack.frames()[0].index(), 1);
    }
}
