pub mod node;
pub mod simple;

pub use node::{DocNode, NodeKind};
pub use simple::{SimpleNode, SimpleNodeBuilder, elem, text};
