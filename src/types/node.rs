use std::fmt;

use smol_str::SmolStr;

use crate::error::{Error, ErrorKind};
use crate::types::NodeList;
use crate::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeType {
    Object,
    Array,
    Key,
    String,
    Int,
    Float,
    Bool,
}

impl NodeType {
    pub fn as_str(self) -> &'static str {
        match self {
            NodeType::Object => "object",
            NodeType::Array => "array",
            NodeType::Key => "key",
            NodeType::String => "string",
            NodeType::Int => "int",
            NodeType::Float => "float",
            NodeType::Bool => "bool",
        }
    }
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One element of a document tree.
///
/// Containers own their children exclusively, so a tree is dropped as a unit
/// and [`Clone`] always produces an independent deep copy.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// Children are expected to be [`Node::Key`] entries.
    Object(NodeList),
    /// Children are expected to be anything but [`Node::Key`].
    Array(NodeList),
    Key(KeyNode),
    String(String),
    Int(i64),
    Float(f64),
    Bool(bool),
}

/// A named object entry owning its value.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct KeyNode {
    pub name: SmolStr,
    /// Holds exactly one value in a well-formed tree.
    pub children: NodeList,
}

impl KeyNode {
    pub fn new(name: impl Into<SmolStr>, value: Node) -> Result<Self> {
        let mut children = NodeList::new();
        children.push(value)?;
        Ok(Self {
            name: name.into(),
            children,
        })
    }

    pub(crate) fn from_parts(name: SmolStr, children: NodeList) -> Self {
        Self { name, children }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// First value child, if any.
    pub fn value(&self) -> Option<&Node> {
        self.children.first()
    }

    pub fn value_mut(&mut self) -> Option<&mut Node> {
        self.children.first_mut()
    }

    /// The value of a well-formed key: exactly one child.
    pub fn single_value(&self) -> Result<&Node> {
        match self.children.len() {
            1 => Ok(&self.children[0]),
            0 => Err(Error::tree(
                ErrorKind::MissingValue,
                format!("key \"{}\" has no value", self.name),
            )),
            n => Err(Error::tree(
                ErrorKind::KeyHasMultipleChildren,
                format!("key \"{}\" has {n} values", self.name),
            )),
        }
    }
}

impl Node {
    /// A zero-valued node of the given type.
    pub fn new(node_type: NodeType) -> Self {
        match node_type {
            NodeType::Object => Node::Object(NodeList::new()),
            NodeType::Array => Node::Array(NodeList::new()),
            NodeType::Key => Node::Key(KeyNode::default()),
            NodeType::String => Node::String(String::new()),
            NodeType::Int => Node::Int(0),
            NodeType::Float => Node::Float(0.0),
            NodeType::Bool => Node::Bool(false),
        }
    }

    pub fn object() -> Self {
        Node::Object(NodeList::new())
    }

    pub fn array() -> Self {
        Node::Array(NodeList::new())
    }

    pub fn key(name: impl Into<SmolStr>, value: Node) -> Result<Self> {
        KeyNode::new(name, value).map(Node::Key)
    }

    pub fn node_type(&self) -> NodeType {
        match self {
            Node::Object(_) => NodeType::Object,
            Node::Array(_) => NodeType::Array,
            Node::Key(_) => NodeType::Key,
            Node::String(_) => NodeType::String,
            Node::Int(_) => NodeType::Int,
            Node::Float(_) => NodeType::Float,
            Node::Bool(_) => NodeType::Bool,
        }
    }

    pub fn is_key(&self) -> bool {
        matches!(self, Node::Key(_))
    }

    pub fn children(&self) -> Option<&NodeList> {
        match self {
            Node::Object(children) | Node::Array(children) => Some(children),
            Node::Key(key) => Some(&key.children),
            _ => None,
        }
    }

    pub fn children_mut(&mut self) -> Option<&mut NodeList> {
        match self {
            Node::Object(children) | Node::Array(children) => Some(children),
            Node::Key(key) => Some(&mut key.children),
            _ => None,
        }
    }

    /// Appends a child to a container node.
    pub fn push(&mut self, child: Node) -> Result<()> {
        let node_type = self.node_type();
        match self.children_mut() {
            Some(children) => children.push(child),
            None => Err(Error::tree(
                ErrorKind::InvalidType,
                format!("{node_type} node cannot hold children"),
            )),
        }
    }

    /// String payload, or the name of a key.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Node::String(text) => Some(text),
            Node::Key(key) => Some(&key.name),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Node::Int(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Node::Float(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Node::Bool(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_key(&self) -> Option<&KeyNode> {
        match self {
            Node::Key(key) => Some(key),
            _ => None,
        }
    }
}

impl From<i64> for Node {
    fn from(value: i64) -> Self {
        Node::Int(value)
    }
}

impl From<i32> for Node {
    fn from(value: i32) -> Self {
        Node::Int(value as i64)
    }
}

impl From<f64> for Node {
    fn from(value: f64) -> Self {
        Node::Float(value)
    }
}

impl From<bool> for Node {
    fn from(value: bool) -> Self {
        Node::Bool(value)
    }
}

impl From<&str> for Node {
    fn from(value: &str) -> Self {
        Node::String(value.to_owned())
    }
}

impl From<String> for Node {
    fn from(value: String) -> Self {
        Node::String(value)
    }
}
