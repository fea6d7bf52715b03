//! Typed error definitions for the patch VM.
//!
//! Every [`PatchError`] is fatal to the run: the failing instruction leaves
//! the tree in whatever partially-mutated state it reached, and the VM
//! performs no rollback. A violated precondition always means the supplied
//! instruction sequence does not fit the tree it is being replayed against.

use thiserror::Error;

/// Failure raised by an instruction or a cursor primitive.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PatchError {
    /// `Enter` addressed a text leaf or an absent node.
    #[error("cannot enter: current node is a text leaf or absent")]
    NotAnElement,

    /// `Unenter` or `UnwrapSelf` was issued with only the root frame left.
    #[error("the root frame cannot be exited")]
    CannotUnenterRoot,

    /// An instruction required a concrete current node while the cursor sat
    /// at the end of its container.
    #[error("{op}: no node at the current cursor position")]
    NoCurrentNode {
        /// Instruction or primitive that needed the node.
        op: &'static str,
    },

    /// An index or count fell outside the range its operation allows: a
    /// frame index beyond `0..=child_count`, or a `WrapPrevious` reaching
    /// back past the start of its container.
    #[error("{op}: {what} {value} out of range (limit {limit})")]
    OutOfRange {
        /// Instruction or primitive that observed the violation.
        op: &'static str,
        /// What overran: `"index"` for cursor positions, `"preceding
        /// siblings"` for the reach of a wrap.
        what: &'static str,
        /// The offending value.
        value: usize,
        /// Highest value still in range.
        limit: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_range_display_names_what_overran() {
        let err = PatchError::OutOfRange {
            op: "advance_elements",
            what: "index",
            value: 3,
            limit: 2,
        };
        assert_eq!(err.to_string(), "advance_elements: index 3 out of range (limit 2)");

        let err = PatchError::OutOfRange {
            op: "wrap_previous",
            what: "preceding siblings",
            value: 2,
            limit: 1,
        };
        assert_eq!(
            err.to_string(),
            "wrap_previous: preceding siblings 2 out of range (limit 1)"
        );
    }
}
