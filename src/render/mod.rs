mod attach;
mod document;

pub use attach::{append_select, move_to_back, move_to_front};
pub use document::{ClassList, Document, NodeId};
