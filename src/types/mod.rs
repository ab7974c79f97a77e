mod list;
mod node;
mod object;

pub use list::NodeList;
pub use node::{KeyNode, Node, NodeType};
