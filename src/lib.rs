//! Parse JSON text into an owned [`Node`] tree, edit it, and write it back.
//!
//! ```
//! let mut tree = jsontree::parse(r#"{"a":1,"b":[1,2,3]}"#)?;
//! tree.add_pair("c", jsontree::Node::Bool(true))?;
//! assert!(tree.remove_key("a"));
//! assert_eq!(jsontree::serialize(&tree)?, r#"{"b":[1,2,3],"c":true}"#);
//! # Ok::<(), jsontree::Error>(())
//! ```

pub mod constants;
pub mod decode;
pub mod encode;
pub mod error;
pub mod options;
mod serde;
pub mod text;
pub mod types;

use std::io::{Read, Write};
use std::str::FromStr;

pub use crate::error::{Error, ErrorKind, ErrorStage, Location};
pub use crate::options::{EncodeOptions, HexCase, ParseOptions, Whitespace};
pub use crate::types::{KeyNode, Node, NodeList, NodeType};

pub type Result<T> = std::result::Result<T, Error>;

pub fn parse(input: &str) -> Result<Node> {
    parse_with_options(input, &ParseOptions::default())
}

pub fn parse_with_options(input: &str, options: &ParseOptions) -> Result<Node> {
    decode::from_str(input, options)
}

pub fn parse_slice(input: &[u8]) -> Result<Node> {
    decode::from_slice(input, &ParseOptions::default())
}

pub fn parse_reader<R: Read>(reader: R) -> Result<Node> {
    decode::from_reader(reader, &ParseOptions::default())
}

pub fn serialize(node: &Node) -> Result<String> {
    serialize_with_options(node, &EncodeOptions::default())
}

pub fn serialize_with_options(node: &Node, options: &EncodeOptions) -> Result<String> {
    encode::to_string(node, options)
}

pub fn serialize_to_vec(node: &Node) -> Result<Vec<u8>> {
    encode::to_vec(node, &EncodeOptions::default())
}

pub fn serialize_to_writer<W: Write>(writer: W, node: &Node) -> Result<()> {
    encode::to_writer(writer, node, &EncodeOptions::default())
}

/// Independent deep copy of `node` and everything below it.
pub fn copy_tree(node: &Node) -> Node {
    node.clone()
}

/// Releases a whole tree. Dropping the node does the same; this only names it.
pub fn delete_tree(node: Node) {
    drop(node);
}

impl FromStr for Node {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        parse(s)
    }
}
