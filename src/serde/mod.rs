//! `serde` support for [`Node`], so trees move to and from `serde_json::Value`
//! and any other serde data format.

mod de;
mod ser;

use serde_json::Value;

use crate::error::{Error, ErrorKind};
use crate::types::Node;

impl TryFrom<Value> for Node {
    type Error = Error;

    /// Fails on `null`, which has no node representation.
    fn try_from(value: Value) -> Result<Self, Self::Error> {
        serde_json::from_value(value).map_err(|err| {
            Error::tree(ErrorKind::Unsupported, format!("cannot convert value: {err}"))
        })
    }
}

impl TryFrom<&Node> for Value {
    type Error = Error;

    fn try_from(node: &Node) -> Result<Self, Self::Error> {
        serde_json::to_value(node).map_err(|err| {
            Error::tree(ErrorKind::Unsupported, format!("cannot convert node: {err}"))
        })
    }
}
