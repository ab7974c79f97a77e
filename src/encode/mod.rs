mod writer;

use std::io::Write;

use crate::error::{Error, ErrorKind, ErrorStage};
use crate::options::EncodeOptions;
use crate::types::{KeyNode, Node};
use crate::Result;

use writer::Writer;

/// Writes `node` as compact JSON text.
///
/// Objects may only hold `Key` children and arrays may not hold any; each key
/// must own exactly one value. The first violation aborts the whole traversal.
///
/// # Examples
///
/// ```
/// use jsontree::{encode, EncodeOptions, Node};
///
/// let mut object = Node::object();
/// object.add_pair("a", Node::Int(1))?;
/// assert_eq!(encode::to_string(&object, &EncodeOptions::default())?, r#"{"a":1}"#);
/// # Ok::<(), jsontree::Error>(())
/// ```
pub fn to_string(node: &Node, options: &EncodeOptions) -> Result<String> {
    encode_impl(node, options).map(Writer::finish)
}

pub fn to_vec(node: &Node, options: &EncodeOptions) -> Result<Vec<u8>> {
    encode_impl(node, options).map(Writer::finish_bytes)
}

pub fn to_writer<W: Write>(mut writer: W, node: &Node, options: &EncodeOptions) -> Result<()> {
    let bytes = to_vec(node, options)?;
    writer.write_all(&bytes)?;
    Ok(())
}

fn encode_impl(node: &Node, options: &EncodeOptions) -> Result<Writer> {
    tracing::trace!(node_type = %node.node_type(), "serializing tree");
    let mut writer = Writer::new(options.clone());
    write_node(&mut writer, node).inspect_err(|err| {
        tracing::debug!(kind = ?err.kind, error = %err, "serialize failed");
    })?;
    Ok(writer)
}

/// Pending output for the explicit-stack walk.
enum Step<'a> {
    Value(&'a Node),
    Entry(&'a KeyNode),
    Punct(char),
}

fn write_node(writer: &mut Writer, node: &Node) -> Result<()> {
    let mut pending = vec![Step::Value(node)];
    while let Some(step) = pending.pop() {
        match step {
            Step::Punct(ch) => writer.write_char(ch)?,
            Step::Entry(entry) => {
                let value = entry
                    .single_value()
                    .map_err(|err| err.with_stage(ErrorStage::Serialize))?;
                writer.write_quoted_string(entry.name())?;
                writer.write_char(':')?;
                pending.push(Step::Value(value));
            }
            Step::Value(Node::Object(children)) => {
                for (idx, child) in children.iter().enumerate() {
                    if !matches!(child, Node::Key(_)) {
                        return Err(Error::serialize(
                            ErrorKind::InvalidType,
                            format!("object child {idx} is a {}, not a key", child.node_type()),
                        ));
                    }
                }
                writer.write_char('{')?;
                expand(&mut pending, children.as_slice(), '}')?;
            }
            Step::Value(Node::Array(children)) => {
                for (idx, child) in children.iter().enumerate() {
                    if let Node::Key(entry) = child {
                        return Err(Error::serialize(
                            ErrorKind::InvalidType,
                            format!("array element {idx} is the key \"{}\"", entry.name()),
                        ));
                    }
                }
                writer.write_char('[')?;
                expand(&mut pending, children.as_slice(), ']')?;
            }
            Step::Value(Node::Key(entry)) => pending.push(Step::Entry(entry)),
            Step::Value(Node::String(value)) => writer.write_quoted_string(value)?,
            Step::Value(Node::Int(value)) => writer.write_i64(*value)?,
            Step::Value(Node::Float(value)) => writer.write_f64(*value)?,
            Step::Value(Node::Bool(value)) => writer.write_bool(*value)?,
        }
    }
    Ok(())
}

/// Queues `children` and the closing bracket so they pop in document order.
fn expand<'a>(pending: &mut Vec<Step<'a>>, children: &'a [Node], close: char) -> Result<()> {
    pending
        .try_reserve(children.len() * 2 + 1)
        .map_err(|_| Error::out_of_memory(ErrorStage::Serialize))?;
    pending.push(Step::Punct(close));
    for (idx, child) in children.iter().enumerate().rev() {
        pending.push(Step::Value(child));
        if idx > 0 {
            pending.push(Step::Punct(','));
        }
    }
    Ok(())
}
