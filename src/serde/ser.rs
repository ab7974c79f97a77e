use ::serde::ser::{Error as _, Serialize, SerializeMap, SerializeSeq, Serializer};

use crate::types::{KeyNode, Node, NodeList};

impl Serialize for Node {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Node::Object(children) => serialize_object(children, serializer),
            Node::Array(children) => serialize_array(children, serializer),
            Node::Key(entry) => {
                let mut map = serializer.serialize_map(Some(1))?;
                serialize_entry::<S>(&mut map, entry)?;
                map.end()
            }
            Node::String(value) => serializer.serialize_str(value),
            Node::Int(value) => serializer.serialize_i64(*value),
            Node::Float(value) if value.is_finite() => serializer.serialize_f64(*value),
            Node::Float(value) => Err(S::Error::custom(format!(
                "{value} has no JSON representation"
            ))),
            Node::Bool(value) => serializer.serialize_bool(*value),
        }
    }
}

fn serialize_object<S: Serializer>(children: &NodeList, serializer: S) -> Result<S::Ok, S::Error> {
    let mut map = serializer.serialize_map(Some(children.len()))?;
    for child in children {
        match child {
            Node::Key(entry) => serialize_entry::<S>(&mut map, entry)?,
            other => {
                return Err(S::Error::custom(format!(
                    "object holds a {} node instead of a key",
                    other.node_type()
                )));
            }
        }
    }
    map.end()
}

fn serialize_array<S: Serializer>(children: &NodeList, serializer: S) -> Result<S::Ok, S::Error> {
    let mut seq = serializer.serialize_seq(Some(children.len()))?;
    for child in children {
        if let Node::Key(entry) = child {
            return Err(S::Error::custom(format!(
                "array holds the key \"{}\"",
                entry.name()
            )));
        }
        seq.serialize_element(child)?;
    }
    seq.end()
}

fn serialize_entry<S: Serializer>(
    map: &mut S::SerializeMap,
    entry: &KeyNode,
) -> Result<(), S::Error> {
    let value = entry
        .single_value()
        .map_err(|err| S::Error::custom(err.message))?;
    map.serialize_entry(entry.name(), value)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::types::{Node, NodeList};

    #[rstest::rstest]
    fn test_object_to_json() {
        let mut object = Node::object();
        object.add_pair("a", Node::Int(1)).unwrap();
        let mut list = Node::array();
        list.push(Node::Float(1.5)).unwrap();
        list.push(Node::from("x")).unwrap();
        object.add_pair("b", list).unwrap();

        let value = serde_json::to_value(&object).unwrap();
        assert_eq!(value, json!({"a": 1, "b": [1.5, "x"]}));
    }

    #[rstest::rstest]
    fn test_key_as_single_entry_map() {
        let key = Node::key("k", Node::Bool(true)).unwrap();
        assert_eq!(serde_json::to_string(&key).unwrap(), r#"{"k":true}"#);
    }

    #[rstest::rstest]
    fn test_invalid_shapes_fail() {
        let object = Node::Object(NodeList::from(vec![Node::Int(1)]));
        assert!(serde_json::to_value(&object).is_err());

        let key = Node::key("k", Node::Int(1)).unwrap();
        let array = Node::Array(NodeList::from(vec![key]));
        assert!(serde_json::to_value(&array).is_err());

        assert!(serde_json::to_value(Node::Float(f64::INFINITY)).is_err());
    }
}
