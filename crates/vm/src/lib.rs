mod cursor;
mod error;
mod instruction;
mod vm;

pub use cursor::{CursorStack, Frame};
pub use error::PatchError;
pub use instruction::Instruction;
pub use vm::PatchVm;
