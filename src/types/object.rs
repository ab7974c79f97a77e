use smol_str::SmolStr;

use crate::error::{Error, ErrorKind};
use crate::types::{KeyNode, Node};
use crate::Result;

impl Node {
    fn key_position(&self, key: &str) -> Option<usize> {
        match self {
            Node::Object(children) => children
                .iter()
                .position(|child| matches!(child, Node::Key(entry) if entry.name == key)),
            _ => None,
        }
    }

    /// Value of the first entry named `key`. Later duplicates are never seen.
    pub fn get(&self, key: &str) -> Option<&Node> {
        let index = self.key_position(key)?;
        match self {
            Node::Object(children) => children.get(index)?.as_key()?.value(),
            _ => None,
        }
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Node> {
        let index = self.key_position(key)?;
        match self {
            Node::Object(children) => match children.get_mut(index)? {
                Node::Key(entry) => entry.value_mut(),
                _ => None,
            },
            _ => None,
        }
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.key_position(key).is_some()
    }

    /// Drops the first entry named `key` along with its value.
    pub fn remove_key(&mut self, key: &str) -> bool {
        let Some(index) = self.key_position(key) else {
            return false;
        };
        match self {
            Node::Object(children) => children.remove_range(index, 1),
            _ => false,
        }
    }

    /// Appends a `key` entry owning `value`. Duplicate names are allowed.
    pub fn add_pair(&mut self, key: impl Into<SmolStr>, value: Node) -> Result<()> {
        match self {
            Node::Object(children) => children.push(Node::Key(KeyNode::new(key, value)?)),
            other => Err(Error::tree(
                ErrorKind::InvalidType,
                format!("cannot add a pair to a {} node", other.node_type()),
            )),
        }
    }

    /// `(name, value)` for every key entry of an object, in order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, Option<&Node>)> {
        let children = match self {
            Node::Object(children) => children.as_slice(),
            _ => &[],
        };
        children
            .iter()
            .filter_map(Node::as_key)
            .map(|entry| (entry.name(), entry.value()))
    }
}
