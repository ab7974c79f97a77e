use std::fmt;

use ::serde::de::{self, Deserialize, Deserializer, MapAccess, SeqAccess, Visitor};

use crate::types::{KeyNode, Node, NodeList};

impl<'de> Deserialize<'de> for Node {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(NodeVisitor)
    }
}

struct NodeVisitor;

impl<'de> Visitor<'de> for NodeVisitor {
    type Value = Node;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an object, array, string, number or boolean")
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<Node, E> {
        Ok(Node::Bool(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Node, E> {
        Ok(Node::Int(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Node, E> {
        Ok(i64::try_from(v).map_or(Node::Float(v as f64), Node::Int))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Node, E> {
        Ok(Node::Float(v))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Node, E> {
        Ok(Node::String(v.to_owned()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<Node, E> {
        Ok(Node::String(v))
    }

    fn visit_unit<E: de::Error>(self) -> Result<Node, E> {
        Err(E::custom("null has no node representation"))
    }

    fn visit_none<E: de::Error>(self) -> Result<Node, E> {
        self.visit_unit()
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Node, D::Error> {
        Node::deserialize(deserializer)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Node, A::Error> {
        let mut items = NodeList::new();
        while let Some(item) = seq.next_element::<Node>()? {
            items.push(item).map_err(de::Error::custom)?;
        }
        Ok(Node::Array(items))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Node, A::Error> {
        let mut entries = NodeList::new();
        while let Some((name, value)) = map.next_entry::<String, Node>()? {
            let entry = KeyNode::new(name, value).map_err(de::Error::custom)?;
            entries.push(Node::Key(entry)).map_err(de::Error::custom)?;
        }
        Ok(Node::Object(entries))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::types::Node;

    #[rstest::rstest]
    fn test_from_json_value() {
        let node: Node = serde_json::from_value(json!({"a": [1, 2.5, "s", false]})).unwrap();
        let items = node.get("a").and_then(Node::children).unwrap();
        assert_eq!(items[0], Node::Int(1));
        assert_eq!(items[1], Node::Float(2.5));
        assert_eq!(items[2], Node::from("s"));
        assert_eq!(items[3], Node::Bool(false));
    }

    #[rstest::rstest]
    fn test_large_unsigned_becomes_float() {
        let node: Node = serde_json::from_str("18446744073709551615").unwrap();
        assert_eq!(node, Node::Float(u64::MAX as f64));
    }

    #[rstest::rstest]
    fn test_duplicate_keys_kept_in_order() {
        let node: Node = serde_json::from_str(r#"{"k":1,"k":2}"#).unwrap();
        let names: Vec<&str> = node.entries().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["k", "k"]);
        assert_eq!(node.get("k"), Some(&Node::Int(1)));
    }

    #[rstest::rstest]
    #[case("null")]
    #[case("[1,null]")]
    fn test_null_rejected(#[case] input: &str) {
        assert!(serde_json::from_str::<Node>(input).is_err());
    }
}
