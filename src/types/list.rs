use std::{mem, ops::Index, ptr, slice};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

#[cfg(feature = "parallel")]
use crate::constants::PARALLEL_THRESHOLD;
use crate::error::{Error, ErrorKind, ErrorStage};
use crate::types::{KeyNode, Node};
use crate::Result;

/// Ordered, owned children of an `Object`, `Array` or `Key` node.
///
/// Growth never aborts: every operation that can allocate reserves first and
/// reports [`ErrorKind::OutOfMemory`] on failure.
#[derive(Debug, Default)]
pub struct NodeList {
    items: Vec<Node>,
}

impl NodeList {
    /// An empty list. Does not allocate.
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn push(&mut self, node: Node) -> Result<()> {
        self.reserve(1)?;
        self.items.push(node);
        Ok(())
    }

    /// Pushes `node` if present; `None` leaves the list untouched.
    pub fn push_opt(&mut self, node: Option<Node>) -> Result<()> {
        match node {
            Some(node) => self.push(node),
            None => Ok(()),
        }
    }

    pub fn pop(&mut self) -> Option<Node> {
        self.items.pop()
    }

    /// Appends every node of `other` after the existing ones.
    pub fn merge(&mut self, mut other: NodeList) -> Result<()> {
        if other.is_empty() {
            return Ok(());
        }
        if self.is_empty() {
            mem::swap(&mut self.items, &mut other.items);
            return Ok(());
        }
        self.reserve(other.len())?;
        self.items.append(&mut other.items);
        Ok(())
    }

    /// Position of `node` by identity, not by value.
    pub fn index_of(&self, node: &Node) -> Option<usize> {
        self.items.iter().position(|item| ptr::eq(item, node))
    }

    /// Drops `count` nodes starting at `start`, together with their subtrees.
    /// Returns `false` without touching the list when the range does not fit.
    pub fn remove_range(&mut self, start: usize, count: usize) -> bool {
        if count == 0 {
            return false;
        }
        let end = match start.checked_add(count) {
            Some(end) if end <= self.items.len() => end,
            _ => return false,
        };
        self.items.drain(start..end);
        if self.items.is_empty() {
            self.items = Vec::new();
        }
        true
    }

    pub fn insert(&mut self, index: usize, node: Node) -> Result<()> {
        if index > self.items.len() {
            return Err(Error::tree(
                ErrorKind::IndexOutOfRange,
                format!(
                    "insert index {index} is past the end of a list of {}",
                    self.items.len()
                ),
            ));
        }
        self.reserve(1)?;
        self.items.insert(index, node);
        Ok(())
    }

    /// Borrowed view of `[start, end)`.
    pub fn slice(&self, start: usize, end: usize) -> Option<&[Node]> {
        self.items.get(start..end)
    }

    pub fn slice_from(&self, start: usize) -> Option<&[Node]> {
        self.items.get(start..)
    }

    pub fn get(&self, index: usize) -> Option<&Node> {
        self.items.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Node> {
        self.items.get_mut(index)
    }

    pub fn first(&self) -> Option<&Node> {
        self.items.first()
    }

    pub fn first_mut(&mut self) -> Option<&mut Node> {
        self.items.first_mut()
    }

    pub fn as_slice(&self) -> &[Node] {
        &self.items
    }

    pub fn iter(&self) -> slice::Iter<'_, Node> {
        self.items.iter()
    }

    pub fn iter_mut(&mut self) -> slice::IterMut<'_, Node> {
        self.items.iter_mut()
    }

    pub fn into_vec(mut self) -> Vec<Node> {
        mem::take(&mut self.items)
    }

    /// Independent copy of every node, in order.
    ///
    /// Walks the tree with an explicit stack, so copy depth is bounded by
    /// memory rather than by the call stack.
    pub fn deep_copy(&self) -> NodeList {
        #[cfg(feature = "parallel")]
        {
            if self.items.len() >= PARALLEL_THRESHOLD {
                let items: Vec<Node> = self.items.par_iter().map(Node::clone).collect();
                return NodeList { items };
            }
        }

        let mut stack = vec![CopyFrame::open(self, None)];
        loop {
            let Some(frame) = stack.last_mut() else {
                return NodeList::new();
            };
            match frame.source.next() {
                Some(Node::Object(children)) => {
                    stack.push(CopyFrame::open(children, Some(Shell::Object)));
                }
                Some(Node::Array(children)) => {
                    stack.push(CopyFrame::open(children, Some(Shell::Array)));
                }
                Some(Node::Key(entry)) => {
                    stack.push(CopyFrame::open(&entry.children, Some(Shell::Key(entry))));
                }
                Some(leaf) => frame.items.push(leaf.clone()),
                None => {
                    let Some(done) = stack.pop() else {
                        return NodeList::new();
                    };
                    let list = NodeList { items: done.items };
                    let Some(shell) = done.shell else {
                        return list;
                    };
                    if let Some(parent) = stack.last_mut() {
                        parent.items.push(shell.wrap(list));
                    }
                }
            }
        }
    }

    fn reserve(&mut self, additional: usize) -> Result<()> {
        self.items
            .try_reserve(additional)
            .map_err(|_| Error::out_of_memory(ErrorStage::Tree))
    }
}

/// The container a copied child list is wrapped back into.
enum Shell<'a> {
    Object,
    Array,
    Key(&'a KeyNode),
}

impl Shell<'_> {
    fn wrap(self, children: NodeList) -> Node {
        match self {
            Shell::Object => Node::Object(children),
            Shell::Array => Node::Array(children),
            Shell::Key(entry) => Node::Key(KeyNode::from_parts(entry.name.clone(), children)),
        }
    }
}

struct CopyFrame<'a> {
    source: slice::Iter<'a, Node>,
    items: Vec<Node>,
    shell: Option<Shell<'a>>,
}

impl<'a> CopyFrame<'a> {
    fn open(list: &'a NodeList, shell: Option<Shell<'a>>) -> Self {
        Self {
            source: list.items.iter(),
            items: Vec::with_capacity(list.items.len()),
            shell,
        }
    }
}

impl Clone for NodeList {
    fn clone(&self) -> Self {
        self.deep_copy()
    }
}

// Compared level by level with a work list rather than by recursion.
impl PartialEq for NodeList {
    fn eq(&self, other: &Self) -> bool {
        let mut pending: Vec<(&[Node], &[Node])> = vec![(self.as_slice(), other.as_slice())];
        while let Some((left, right)) = pending.pop() {
            if left.len() != right.len() {
                return false;
            }
            for (a, b) in left.iter().zip(right) {
                match (a, b) {
                    (Node::Object(x), Node::Object(y)) | (Node::Array(x), Node::Array(y)) => {
                        pending.push((x.as_slice(), y.as_slice()));
                    }
                    (Node::Key(x), Node::Key(y)) => {
                        if x.name != y.name {
                            return false;
                        }
                        pending.push((x.children.as_slice(), y.children.as_slice()));
                    }
                    _ if a != b => return false,
                    _ => {}
                }
            }
        }
        true
    }
}

// Iterative teardown so deeply nested trees do not exhaust the stack.
impl Drop for NodeList {
    fn drop(&mut self) {
        if self.items.iter().all(|node| node.children().map_or(true, NodeList::is_empty)) {
            return;
        }
        let mut pending = mem::take(&mut self.items);
        while let Some(mut node) = pending.pop() {
            if let Some(children) = node.children_mut() {
                pending.append(&mut children.items);
            }
        }
    }
}

impl From<Vec<Node>> for NodeList {
    fn from(items: Vec<Node>) -> Self {
        Self { items }
    }
}

impl FromIterator<Node> for NodeList {
    fn from_iter<I: IntoIterator<Item = Node>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

impl Index<usize> for NodeList {
    type Output = Node;

    fn index(&self, index: usize) -> &Node {
        &self.items[index]
    }
}

impl<'a> IntoIterator for &'a NodeList {
    type Item = &'a Node;
    type IntoIter = slice::Iter<'a, Node>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<'a> IntoIterator for &'a mut NodeList {
    type Item = &'a mut Node;
    type IntoIter = slice::IterMut<'a, Node>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter_mut()
    }
}
